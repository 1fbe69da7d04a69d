//! Collection and item handlers shared by every entity type

use crate::{models::Entity, services::CrudService, Result};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

type Service<E> = State<Arc<CrudService<E>>>;

/// GET /api/{collection}
pub async fn find_all<E: Entity>(State(service): Service<E>) -> Result<Json<Vec<E>>> {
    let entities = service.find_all().await?;
    Ok(Json(entities))
}

/// GET /api/{collection}/{id}
///
/// An unknown id answers 404 with an empty body.
pub async fn find_one<E: Entity>(
    State(service): Service<E>,
    Path(id): Path<i64>,
) -> Result<Response> {
    match service.find_one(id).await? {
        Some(entity) => Ok((StatusCode::OK, Json(entity)).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

/// POST /api/{collection}
pub async fn create<E: Entity>(
    State(service): Service<E>,
    Json(entity): Json<E>,
) -> Result<(StatusCode, Json<E>)> {
    let created = service.create(entity).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/{collection}/{id}
///
/// The id from the path replaces any id in the body.
pub async fn update<E: Entity>(
    State(service): Service<E>,
    Path(id): Path<i64>,
    Json(mut entity): Json<E>,
) -> Result<Json<E>> {
    entity.set_id(Some(id));
    let updated = service.update(entity).await?;
    Ok(Json(updated))
}

/// DELETE /api/{collection}/{id}
pub async fn delete<E: Entity>(
    State(service): Service<E>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
