//! Activities service: activities (checked against the management service)
//! and grades (stored as given).

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use models::{Activity, ActivityPatch, Grade, Id, NewActivity, NewGrade};
use service::{activities::ActivityService, crud::CrudService};

use super::crud::crud_routes;
use crate::errors::ApiError;

pub const SERVICE: &str = "atividades";
pub const PREFIXES: &[&str] = &["/atividades", "/notas"];

#[derive(Clone)]
pub struct AtividadesState {
    pub activities: ActivityService,
    pub grades: CrudService<Grade>,
}

pub fn build_router(state: AtividadesState) -> Router {
    let activities = Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(fetch).put(update).delete(remove))
        .with_state(state.activities);

    let routes = Router::new()
        .nest("/atividades", activities)
        .nest("/notas", crud_routes::<Grade, NewGrade>(state.grades));
    super::finish(SERVICE, PREFIXES, routes)
}

async fn list(State(svc): State<ActivityService>) -> Result<Json<Vec<Activity>>, ApiError> {
    Ok(Json(svc.list().await?))
}

async fn fetch(State(svc): State<ActivityService>, Path(id): Path<Id>) -> Result<Json<Activity>, ApiError> {
    Ok(Json(svc.get(id).await?))
}

async fn create(
    State(svc): State<ActivityService>,
    payload: Result<Json<NewActivity>, JsonRejection>,
) -> Result<(StatusCode, Json<Activity>), ApiError> {
    let Json(input) = payload?;
    Ok((StatusCode::CREATED, Json(svc.create(input).await?)))
}

async fn update(
    State(svc): State<ActivityService>,
    Path(id): Path<Id>,
    payload: Result<Json<ActivityPatch>, JsonRejection>,
) -> Result<Json<Activity>, ApiError> {
    let Json(patch) = payload?;
    Ok(Json(svc.update(id, patch).await?))
}

async fn remove(State(svc): State<ActivityService>, Path(id): Path<Id>) -> Result<StatusCode, ApiError> {
    svc.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
