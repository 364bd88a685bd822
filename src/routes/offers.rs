// Handlers for /api/offers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{CreateOffersRequest, SearchParams, SearchResponse},
    regions::RegionHierarchy,
    search,
    store::OfferStore,
};

pub async fn search_offers(
    State(store): State<Arc<OfferStore>>,
    State(regions): State<Arc<RegionHierarchy>>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> AppResult<Json<SearchResponse>> {
    let Query(params) = query?;
    params.validate()?;
    tracing::debug!("[HANDLER] GET /api/offers - params: {:?}", params);

    // Hold the read lock for the whole search so it sees one consistent state
    let snapshot = store.snapshot().await;
    let response = search::search(&snapshot, &params, &regions);
    drop(snapshot);

    tracing::info!(
        "[HANDLER] GET /api/offers - returning {} offers",
        response.offers.len()
    );
    Ok(Json(response))
}

pub async fn create_offers(
    State(store): State<Arc<OfferStore>>,
    body: Result<Json<CreateOffersRequest>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(request) = body?;
    request.validate()?;

    let batch_size = request.offers.len();
    let total = store.append(request.offers).await;
    tracing::info!(
        "[HANDLER] POST /api/offers - appended {} offers, store now holds {}",
        batch_size,
        total
    );
    Ok(StatusCode::OK)
}

pub async fn delete_offers(State(store): State<Arc<OfferStore>>) -> StatusCode {
    let removed = store.clear().await;
    tracing::info!("[HANDLER] DELETE /api/offers - removed {} offers", removed);
    StatusCode::OK
}
