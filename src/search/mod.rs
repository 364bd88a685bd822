//! Search pipeline: required filters, then the result page and the facets,
//! both computed from the same base filtered set.

pub mod facets;
pub mod filter;
pub mod paging;

use crate::models::{Offer, SearchParams, SearchResponse, SearchResultOffer};
use crate::regions::RegionHierarchy;
use facets::FacetAccumulator;
use filter::OfferFilter;
use paging::{page_range, sort_offers};

pub fn search(offers: &[Offer], params: &SearchParams, regions: &RegionHierarchy) -> SearchResponse {
    let filter = OfferFilter::new(params, regions);
    let mut accumulator =
        FacetAccumulator::new(params.price_range_width, params.min_free_kilometer_width);
    let mut results = Vec::new();
    let mut base_size = 0usize;

    for offer in offers {
        let Some(misses) = filter.classify(offer) else {
            continue;
        };
        base_size += 1;
        accumulator.add(offer, misses);
        if misses.none() {
            results.push(offer);
        }
    }

    sort_offers(&mut results, params.sort_order);
    let page = page_range(results.len(), params.page, params.page_size);
    tracing::debug!(
        "Search in region {} (parent: {}): {} base offers, {} results, page {:?}",
        params.region_id,
        regions.is_parent(params.region_id),
        base_size,
        results.len(),
        page
    );

    let facets = accumulator.finish();
    SearchResponse {
        offers: results[page].iter().map(|offer| SearchResultOffer::from(*offer)).collect(),
        price_ranges: facets.price_ranges,
        car_type_counts: facets.car_type_counts,
        seats_count: facets.seats_count,
        free_kilometer_range: facets.free_kilometer_range,
        vollkasko_count: facets.vollkasko_count,
    }
}
