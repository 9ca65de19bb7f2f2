use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use models::{Entity, Id};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{fs, sync::RwLock};
use tracing::{debug, info};

use crate::errors::ServiceError;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct TableData {
    /// Highest id ever handed out. Deleted ids are never reused.
    #[serde(default)]
    last_id: Id,
    #[serde(default)]
    rows: BTreeMap<Id, Value>,
}

type Tables = BTreeMap<String, TableData>;

/// JSON file-backed database holding one table per entity type.
///
/// Every write rewrites the whole file (temp file + rename) while the write
/// lock is held, so a write is on disk before the call returns and concurrent
/// writes are committed one at a time. A failed flush rolls the table back.
pub struct JsonFileDb {
    tables: RwLock<Tables>,
    file_path: Option<PathBuf>,
}

impl JsonFileDb {
    /// Open the database at `path`, creating an empty file if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
            }
        }

        let tables: Tables = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Tables::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Storage(format!("corrupt database {}: {e}", file_path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty = Tables::new();
                write_atomically(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(ServiceError::storage(e)),
        };

        info!(path = %file_path.display(), tables = tables.len(), "database opened");
        Ok(Arc::new(Self { tables: RwLock::new(tables), file_path: Some(file_path) }))
    }

    /// Non-durable instance, for tests.
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self { tables: RwLock::new(Tables::new()), file_path: None })
    }

    pub async fn list<E: Entity>(&self) -> Result<Vec<E>, ServiceError> {
        let tables = self.tables.read().await;
        match tables.get(E::TABLE) {
            Some(t) => t.rows.values().map(decode::<E>).collect(),
            None => Ok(Vec::new()),
        }
    }

    pub async fn get<E: Entity>(&self, id: Id) -> Result<Option<E>, ServiceError> {
        let tables = self.tables.read().await;
        tables
            .get(E::TABLE)
            .and_then(|t| t.rows.get(&id))
            .map(decode::<E>)
            .transpose()
    }

    /// Assign the next id to `record`, store it and return it.
    pub async fn insert<E: Entity>(&self, mut record: E) -> Result<E, ServiceError> {
        self.mutate(E::TABLE, move |table| {
            let id = table.last_id + 1;
            record.assign_id(id);
            table.rows.insert(id, encode(&record)?);
            table.last_id = id;
            debug!(table = E::TABLE, id, "row inserted");
            Ok((record, true))
        })
        .await
    }

    /// Merge `patch` into row `id`. `None` if the row does not exist.
    pub async fn update<E: Entity>(&self, id: Id, patch: E::Patch) -> Result<Option<E>, ServiceError> {
        self.mutate(E::TABLE, move |table| {
            let Some(raw) = table.rows.get_mut(&id) else { return Ok((None, false)) };
            let mut record = decode::<E>(raw)?;
            record.apply(patch);
            *raw = encode(&record)?;
            debug!(table = E::TABLE, id, "row updated");
            Ok((Some(record), true))
        })
        .await
    }

    /// Hard delete; returns whether the row existed.
    pub async fn delete<E: Entity>(&self, id: Id) -> Result<bool, ServiceError> {
        self.mutate(E::TABLE, move |table| {
            let existed = table.rows.remove(&id).is_some();
            if existed {
                debug!(table = E::TABLE, id, "row deleted");
            }
            Ok((existed, existed))
        })
        .await
    }

    /// Apply `f` to one table; persist if it reports a change, roll back if persisting fails.
    async fn mutate<R, F>(&self, table: &str, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut TableData) -> Result<(R, bool), ServiceError>,
    {
        let mut tables = self.tables.write().await;
        let before = tables.get(table).cloned();
        let mut working = before.clone().unwrap_or_default();
        let (out, dirty) = f(&mut working)?;
        if !dirty {
            return Ok(out);
        }
        tables.insert(table.to_string(), working);

        if let Some(path) = &self.file_path {
            if let Err(e) = write_atomically(path, &tables).await {
                match before {
                    Some(prev) => tables.insert(table.to_string(), prev),
                    None => tables.remove(table),
                };
                return Err(e);
            }
        }
        Ok(out)
    }
}

async fn write_atomically(path: &Path, tables: &Tables) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(tables).map_err(ServiceError::storage)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, data).await.map_err(ServiceError::storage)?;
    fs::rename(&tmp, path).await.map_err(ServiceError::storage)?;
    Ok(())
}

fn encode<E: Entity>(record: &E) -> Result<Value, ServiceError> {
    serde_json::to_value(record).map_err(ServiceError::storage)
}

fn decode<E: Entity>(raw: &Value) -> Result<E, ServiceError> {
    serde_json::from_value(raw.clone())
        .map_err(|e| ServiceError::Storage(format!("bad row in {}: {e}", E::TABLE)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{Class, ClassPatch, NewClass, NewStudent, Student, StudentPatch};

    fn student(name: &str) -> Student {
        Student::from(NewStudent { name: Some(name.into()), ..Default::default() })
    }

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("escola_db_{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn ids_are_monotonic_and_never_reused() -> Result<(), anyhow::Error> {
        let db = JsonFileDb::in_memory();
        let a = db.insert(student("Ana")).await?;
        let b = db.insert(student("Bruno")).await?;
        assert_eq!((a.id, b.id), (1, 2));

        assert!(db.delete::<Student>(b.id).await?);
        let c = db.insert(student("Carla")).await?;
        assert_eq!(c.id, 3);
        Ok(())
    }

    #[tokio::test]
    async fn tables_are_independent() -> Result<(), anyhow::Error> {
        let db = JsonFileDb::in_memory();
        db.insert(student("Ana")).await?;
        let class = db.insert(Class::from(NewClass::default())).await?;
        assert_eq!(class.id, 1);
        assert_eq!(db.list::<Student>().await?.len(), 1);
        assert_eq!(db.list::<Class>().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_missing_rows() -> Result<(), anyhow::Error> {
        let db = JsonFileDb::in_memory();
        assert!(db.update::<Class>(9, ClassPatch::default()).await?.is_none());
        assert!(!db.delete::<Class>(9).await?);
        assert!(db.get::<Class>(9).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn delete_twice_reports_absence_the_second_time() -> Result<(), anyhow::Error> {
        let db = JsonFileDb::in_memory();
        let a = db.insert(student("Ana")).await?;
        assert!(db.delete::<Student>(a.id).await?);
        assert!(!db.delete::<Student>(a.id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn writes_survive_reopen() -> Result<(), anyhow::Error> {
        let path = temp_path();
        {
            let db = JsonFileDb::open(&path).await?;
            let a = db.insert(student("Ana")).await?;
            db.insert(student("Bruno")).await?;
            let patch = StudentPatch { age: Some(Some(16)), ..Default::default() };
            db.update::<Student>(a.id, patch).await?;
            db.delete::<Student>(2).await?;
        }

        let reopened = JsonFileDb::open(&path).await?;
        let rows = reopened.list::<Student>().await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name.as_deref(), Some("Ana"));
        assert_eq!(rows[0].age, Some(16));
        // last_id 持久化：重启后不会复用已删除的 id
        assert_eq!(reopened.insert(student("Carla")).await?.id, 3);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() -> Result<(), anyhow::Error> {
        let path = temp_path();
        tokio::fs::write(&path, b"{not json").await?;
        assert!(matches!(JsonFileDb::open(&path).await, Err(ServiceError::Storage(_))));
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }
}
