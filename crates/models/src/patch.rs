//! Merge-patch helpers.
//!
//! Nullable columns use `Option<Option<T>>`: the outer `None` means the key was
//! absent, `Some(None)` means an explicit `null`. Serde collapses both to `None`
//! unless the field goes through [`nullable`].

use serde::{Deserialize, Deserializer};

/// `#[serde(default, deserialize_with = "crate::patch::nullable")]`
pub fn nullable<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Absent keeps, `null` clears, a value overwrites.
pub fn merge<T>(slot: &mut Option<T>, incoming: Option<Option<T>>) {
    if let Some(v) = incoming {
        *slot = v;
    }
}

/// For non-nullable columns: only a concrete value overwrites.
pub fn overwrite<T>(slot: &mut T, incoming: Option<T>) {
    if let Some(v) = incoming {
        *slot = v;
    }
}
