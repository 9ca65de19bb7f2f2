//! Reservations service.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use models::{Id, NewReservation, Reservation, ReservationPatch};
use service::reservations::ReservationService;

use crate::errors::ApiError;

pub const SERVICE: &str = "reservas";
pub const PREFIXES: &[&str] = &["/reservas"];

pub fn build_router(reservations: ReservationService) -> Router {
    let routes = Router::new()
        .route("/reservas", get(list).post(create))
        .route("/reservas/:id", get(fetch).put(update).delete(remove))
        .with_state(reservations);
    super::finish(SERVICE, PREFIXES, routes)
}

async fn list(State(svc): State<ReservationService>) -> Result<Json<Vec<Reservation>>, ApiError> {
    Ok(Json(svc.list().await?))
}

async fn fetch(State(svc): State<ReservationService>, Path(id): Path<Id>) -> Result<Json<Reservation>, ApiError> {
    Ok(Json(svc.get(id).await?))
}

async fn create(
    State(svc): State<ReservationService>,
    payload: Result<Json<NewReservation>, JsonRejection>,
) -> Result<(StatusCode, Json<Reservation>), ApiError> {
    let Json(input) = payload?;
    Ok((StatusCode::CREATED, Json(svc.create(input).await?)))
}

async fn update(
    State(svc): State<ReservationService>,
    Path(id): Path<Id>,
    payload: Result<Json<ReservationPatch>, JsonRejection>,
) -> Result<Json<Reservation>, ApiError> {
    let Json(patch) = payload?;
    Ok(Json(svc.update(id, patch).await?))
}

async fn remove(State(svc): State<ReservationService>, Path(id): Path<Id>) -> Result<StatusCode, ApiError> {
    svc.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
