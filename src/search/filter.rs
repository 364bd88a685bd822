use crate::models::{CarType, DAY_MS, Offer, SearchParams};
use crate::regions::RegionHierarchy;

/// The five optional filter dimensions. Each facet leaves out its own one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Price,
    CarType,
    Seats,
    FreeKilometers,
    Vollkasko,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Price,
        Dimension::CarType,
        Dimension::Seats,
        Dimension::FreeKilometers,
        Dimension::Vollkasko,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of dimensions an offer failed. Empty means the offer passes every optional filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Misses(u8);

impl Misses {
    pub fn none(self) -> bool {
        self.0 == 0
    }

    #[cfg(test)]
    pub fn contains(self, dimension: Dimension) -> bool {
        self.0 & dimension.bit() != 0
    }

    /// True when the offer passes every filter except possibly `dimension`'s.
    pub fn only(self, dimension: Dimension) -> bool {
        self.0 & !dimension.bit() == 0
    }

    fn insert(&mut self, dimension: Dimension) {
        self.0 |= dimension.bit();
    }
}

/// Time containment and region match. Always applied first.
pub struct RequiredFilter<'a> {
    time_range_start: i64,
    time_range_end: i64,
    duration_ms: i64,
    region_id: i32,
    regions: &'a RegionHierarchy,
}

impl<'a> RequiredFilter<'a> {
    pub fn new(params: &SearchParams, regions: &'a RegionHierarchy) -> Self {
        RequiredFilter {
            time_range_start: params.time_range_start,
            time_range_end: params.time_range_end,
            duration_ms: i64::from(params.number_days) * DAY_MS,
            region_id: params.region_id,
            regions,
        }
    }

    pub fn matches(&self, offer: &Offer) -> bool {
        // The offer must fit entirely inside the window and last exactly numberDays
        if offer.start_date < self.time_range_start
            || offer.end_date > self.time_range_end
            || offer.start_date.checked_add(self.duration_ms) != Some(offer.end_date)
        {
            return false;
        }

        self.regions.contains(self.region_id, offer.most_specific_region_id)
    }
}

/// Optional filters. Unset or zero values are no-ops.
#[derive(Debug, Clone, Default)]
pub struct OptionalFilters {
    min_price: Option<u32>,
    max_price: Option<u32>,
    min_seats: Option<u32>,
    min_free_kilometers: Option<u32>,
    car_type: Option<CarType>,
    only_vollkasko: bool,
}

impl OptionalFilters {
    pub fn from_params(params: &SearchParams) -> Self {
        let positive = |value: Option<u32>| value.filter(|v| *v > 0);
        OptionalFilters {
            min_price: positive(params.min_price),
            max_price: positive(params.max_price),
            min_seats: positive(params.min_number_seats),
            min_free_kilometers: positive(params.min_free_kilometer),
            car_type: params.car_type,
            only_vollkasko: params.only_vollkasko.unwrap_or(false),
        }
    }

    pub fn matches_dimension(&self, dimension: Dimension, offer: &Offer) -> bool {
        match dimension {
            Dimension::Price => {
                self.min_price.is_none_or(|min| offer.price >= min)
                    && self.max_price.is_none_or(|max| offer.price < max)
            }
            Dimension::CarType => self.car_type.is_none_or(|car_type| offer.car_type == car_type),
            Dimension::Seats => self.min_seats.is_none_or(|min| offer.number_seats >= min),
            Dimension::FreeKilometers => self
                .min_free_kilometers
                .is_none_or(|min| offer.free_kilometers >= min),
            Dimension::Vollkasko => !self.only_vollkasko || offer.has_vollkasko,
        }
    }

    pub fn misses(&self, offer: &Offer) -> Misses {
        let mut misses = Misses::default();
        for dimension in Dimension::ALL {
            if !self.matches_dimension(dimension, offer) {
                misses.insert(dimension);
            }
        }
        misses
    }

    #[cfg(test)]
    pub fn matches_all(&self, offer: &Offer) -> bool {
        self.misses(offer).none()
    }

    #[cfg(test)]
    pub fn matches_except(&self, excluded: Dimension, offer: &Offer) -> bool {
        self.misses(offer).only(excluded)
    }
}

/// Both tiers together: what an offer must satisfy to appear in the result page.
pub struct OfferFilter<'a> {
    required: RequiredFilter<'a>,
    optional: OptionalFilters,
}

impl<'a> OfferFilter<'a> {
    pub fn new(params: &SearchParams, regions: &'a RegionHierarchy) -> Self {
        OfferFilter {
            required: RequiredFilter::new(params, regions),
            optional: OptionalFilters::from_params(params),
        }
    }

    /// `None` when the offer is outside the base filtered set, otherwise the
    /// optional filters it failed.
    pub fn classify(&self, offer: &Offer) -> Option<Misses> {
        if self.required.matches(offer) {
            Some(self.optional.misses(offer))
        } else {
            None
        }
    }

    #[cfg(test)]
    pub fn matches(&self, offer: &Offer) -> bool {
        self.classify(offer).is_some_and(Misses::none)
    }
}
