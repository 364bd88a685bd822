//! Rental offer search service.
//!
//! Stores rental offers in memory and answers parametric searches over them:
//! region and time-window filtering, price sorting with pagination, and five
//! facet summaries (price and free-kilometer histograms, car type, seat and
//! vollkasko counts).
//!
//! - **`regions`**: read-only region tree resolving parent regions to their leaves.
//! - **`store`**: the lock-guarded offer collection.
//! - **`search`**: filter engine, sorter/paginator and facet aggregator.
//! - **`routes`**: the `/api/offers` HTTP surface.

pub mod config;
pub mod error;
pub mod models;
pub mod regions;
pub mod routes;
pub mod search;
pub mod store;
