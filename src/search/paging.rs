use crate::models::{Offer, SortOrder};
use std::cmp::Ordering;
use std::ops::Range;

fn compare(order: SortOrder, a: &Offer, b: &Offer) -> Ordering {
    let by_price = match order {
        SortOrder::PriceAsc => a.price.cmp(&b.price),
        SortOrder::PriceDesc => b.price.cmp(&a.price),
    };
    // Equal prices always fall back to ascending ID
    by_price.then_with(|| a.id.cmp(&b.id))
}

pub fn sort_offers(offers: &mut [&Offer], order: SortOrder) {
    offers.sort_by(|a, b| compare(order, a, b));
}

/// Zero-based page window over `total` items. Empty when the page starts past the end.
pub fn page_range(total: usize, page: u32, page_size: u32) -> Range<usize> {
    let start = (page as usize).saturating_mul(page_size as usize);
    if start >= total {
        return 0..0;
    }
    let end = start.saturating_add(page_size as usize).min(total);
    start..end
}
