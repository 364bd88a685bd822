//! Facet aggregation over the base filtered set.
//!
//! Every facet counts the offers that pass all optional filters except the one
//! on its own dimension. Offers are classified once through [`Misses`]: an offer
//! missing no filter feeds every facet, an offer missing exactly one feeds only
//! that dimension's facet, and anything else feeds none.

use super::filter::{Dimension, Misses};
use crate::models::{CarTypeCount, Offer, RangeBucket, SeatsCount, VollkaskoCount};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Facets {
    pub price_ranges: Vec<RangeBucket>,
    pub car_type_counts: CarTypeCount,
    pub seats_count: Vec<SeatsCount>,
    pub free_kilometer_range: Vec<RangeBucket>,
    pub vollkasko_count: VollkaskoCount,
}

/// Fixed-width histogram. Keys are bucket starts, so iteration is already ordered.
#[derive(Debug, Clone)]
pub struct Histogram {
    width: u32,
    buckets: BTreeMap<u32, u32>,
}

impl Histogram {
    /// `width` must be positive; request validation guarantees it.
    pub fn new(width: u32) -> Self {
        Histogram {
            width: width.max(1),
            buckets: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, value: u32) {
        // Rounds down to the bucket start
        let start = value - value % self.width;
        *self.buckets.entry(start).or_insert(0) += 1;
    }

    /// Empty buckets never appear: only observed starts are keys.
    pub fn into_buckets(self) -> Vec<RangeBucket> {
        let width = self.width;
        self.buckets
            .into_iter()
            .map(|(start, count)| RangeBucket {
                start: u64::from(start),
                end: u64::from(start) + u64::from(width),
                count,
            })
            .collect()
    }
}

pub struct FacetAccumulator {
    prices: Histogram,
    free_kilometers: Histogram,
    car_types: CarTypeCount,
    seats: BTreeMap<u32, u32>,
    vollkasko: VollkaskoCount,
}

impl FacetAccumulator {
    pub fn new(price_range_width: u32, free_kilometer_width: u32) -> Self {
        FacetAccumulator {
            prices: Histogram::new(price_range_width),
            free_kilometers: Histogram::new(free_kilometer_width),
            car_types: CarTypeCount::default(),
            seats: BTreeMap::new(),
            vollkasko: VollkaskoCount::default(),
        }
    }

    pub fn add(&mut self, offer: &Offer, misses: Misses) {
        if misses.only(Dimension::Price) {
            self.prices.add(offer.price);
        }
        if misses.only(Dimension::CarType) {
            self.car_types.add(offer.car_type);
        }
        if misses.only(Dimension::Seats) {
            *self.seats.entry(offer.number_seats).or_insert(0) += 1;
        }
        if misses.only(Dimension::FreeKilometers) {
            self.free_kilometers.add(offer.free_kilometers);
        }
        if misses.only(Dimension::Vollkasko) {
            if offer.has_vollkasko {
                self.vollkasko.true_count += 1;
            } else {
                self.vollkasko.false_count += 1;
            }
        }
    }

    pub fn finish(self) -> Facets {
        Facets {
            price_ranges: self.prices.into_buckets(),
            car_type_counts: self.car_types,
            seats_count: self
                .seats
                .into_iter()
                .map(|(number_seats, count)| SeatsCount { number_seats, count })
                .collect(),
            free_kilometer_range: self.free_kilometers.into_buckets(),
            vollkasko_count: self.vollkasko,
        }
    }
}
