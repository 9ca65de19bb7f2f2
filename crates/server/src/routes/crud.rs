//! Generic handlers for entities with no cross-service checks.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use models::{Entity, Id};
use serde::de::DeserializeOwned;
use service::crud::CrudService;

use crate::errors::ApiError;

/// `GET|POST /` and `GET|PUT|DELETE /:id` for one entity.
pub fn crud_routes<E, N>(svc: CrudService<E>) -> Router
where
    E: Entity,
    E::Patch: DeserializeOwned,
    N: DeserializeOwned + Into<E> + Send + 'static,
{
    Router::new()
        .route("/", get(list::<E>).post(create::<E, N>))
        .route("/:id", get(fetch::<E>).put(update::<E>).delete(remove::<E>))
        .with_state(svc)
}

pub async fn list<E: Entity>(State(svc): State<CrudService<E>>) -> Result<Json<Vec<E>>, ApiError> {
    Ok(Json(svc.list().await?))
}

pub async fn fetch<E: Entity>(State(svc): State<CrudService<E>>, Path(id): Path<Id>) -> Result<Json<E>, ApiError> {
    Ok(Json(svc.get(id).await?))
}

pub async fn create<E, N>(
    State(svc): State<CrudService<E>>,
    payload: Result<Json<N>, JsonRejection>,
) -> Result<(StatusCode, Json<E>), ApiError>
where
    E: Entity,
    N: DeserializeOwned + Into<E>,
{
    let Json(input) = payload?;
    let created = svc.create(input.into()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update<E>(
    State(svc): State<CrudService<E>>,
    Path(id): Path<Id>,
    payload: Result<Json<E::Patch>, JsonRejection>,
) -> Result<Json<E>, ApiError>
where
    E: Entity,
    E::Patch: DeserializeOwned,
{
    let Json(patch) = payload?;
    Ok(Json(svc.update(id, patch).await?))
}

pub async fn remove<E: Entity>(State(svc): State<CrudService<E>>, Path(id): Path<Id>) -> Result<StatusCode, ApiError> {
    svc.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
