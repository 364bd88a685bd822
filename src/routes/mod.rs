// Route definitions

use axum::{
    extract::FromRef,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::regions::RegionHierarchy;
use crate::store::OfferStore;

mod offers;

// Shared state handed to every handler; FromRef lets handlers extract single fields
#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: Arc<OfferStore>,
    pub regions: Arc<RegionHierarchy>,
}

impl AppState {
    pub fn new(regions: RegionHierarchy) -> Self {
        AppState {
            store: Arc::new(OfferStore::new()),
            regions: Arc::new(regions),
        }
    }
}

pub fn create_router(app_state: AppState) -> Router {
    // All three offer operations live on the same path
    let api_router = Router::new().route(
        "/offers",
        get(offers::search_offers)
            .post(offers::create_offers)
            .delete(offers::delete_offers),
    );

    Router::new()
        .route("/", get(|| async { "offer_search" }))
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
