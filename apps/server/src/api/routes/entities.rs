use crate::api::handlers::entities;
use crate::{models::Entity, services::CrudService, state::AppState};
use axum::{routing::get, Router};
use std::sync::Arc;

/// Collection and item routes for one entity type, mounted under `/api/{collection}`.
pub fn entity_routes<E: Entity>(service: Arc<CrudService<E>>) -> Router<AppState> {
    let collection = format!("/api/{}", E::COLLECTION);
    let item = format!("{collection}/:id");

    Router::new()
        .route(
            &collection,
            get(entities::find_all::<E>).post(entities::create::<E>),
        )
        .route(
            &item,
            get(entities::find_one::<E>)
                .put(entities::update::<E>)
                .delete(entities::delete::<E>),
        )
        .with_state(service)
}
