// Wire-level data structures for the offers API
// e.g., Offer, SearchParams, SearchResponse and the facet summaries

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// One day in milliseconds, the unit of `numberDays`.
pub const DAY_MS: i64 = 86_400_000;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CarType {
    Small,
    Sports,
    Luxury,
    Family,
}

impl FromStr for CarType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(CarType::Small),
            "sports" => Ok(CarType::Sports),
            "luxury" => Ok(CarType::Luxury),
            "family" => Ok(CarType::Family),
            _ => Err(format!(
                "unknown variant `{}`, expected one of `small`, `sports`, `luxury`, `family`",
                s
            )),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    PriceAsc,
    PriceDesc,
}

// A rental offer as posted by the client. Immutable once stored.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "ID")]
    pub id: String,
    pub data: String, // Opaque payload, passed through untouched
    #[serde(rename = "mostSpecificRegionID")]
    pub most_specific_region_id: i32,
    pub start_date: i64,
    pub end_date: i64,
    pub number_seats: u32,
    pub price: u32,
    pub car_type: CarType,
    pub has_vollkasko: bool,
    pub free_kilometers: u32,
}

// Query parameters of GET /api/offers
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    // Required
    #[serde(rename = "regionID")]
    pub region_id: i32,
    pub time_range_start: i64,
    pub time_range_end: i64,
    pub number_days: u32,
    pub sort_order: SortOrder,
    pub page: u32,
    pub page_size: u32,
    pub price_range_width: u32,
    pub min_free_kilometer_width: u32,

    // Optional filters; an empty value (`minPrice=`) counts as unset
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_number_seats: Option<u32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_price: Option<u32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_price: Option<u32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub car_type: Option<CarType>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub only_vollkasko: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_free_kilometer: Option<u32>,
}

// Query values arrive as strings, so parse them here instead of through serde's typed path
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

impl SearchParams {
    /// Rejects widths and sizes the search pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let positive = [
            ("numberDays", self.number_days),
            ("pageSize", self.page_size),
            ("priceRangeWidth", self.price_range_width),
            ("minFreeKilometerWidth", self.min_free_kilometer_width),
        ];
        match positive.iter().find(|(_, value)| *value == 0) {
            Some((field, _)) => Err(ValidationError::NonPositive { field: *field }),
            None => Ok(()),
        }
    }
}

// Body of POST /api/offers
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateOffersRequest {
    pub offers: Vec<Offer>,
}

impl CreateOffersRequest {
    /// The batch is accepted or rejected as a whole.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.offers.is_empty() {
            return Err(ValidationError::EmptyBatch);
        }
        if let Some(offer) = self.offers.iter().find(|o| o.end_date <= o.start_date) {
            return Err(ValidationError::InvalidTimeSpan {
                id: offer.id.clone(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },
    #[error("at least one offer is required")]
    EmptyBatch,
    #[error("offer {id} must end after it starts")]
    InvalidTimeSpan { id: String },
}

// --- Response structures ---

// Public projection of an offer; nothing else leaves the service
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchResultOffer {
    #[serde(rename = "ID")]
    pub id: String,
    pub data: String,
}

impl From<&Offer> for SearchResultOffer {
    fn from(offer: &Offer) -> Self {
        SearchResultOffer {
            id: offer.id.clone(),
            data: offer.data.clone(),
        }
    }
}

/// A histogram bucket `[start, end)`. Shared by price and free kilometers.
/// Bounds are u64 so the top bucket's `end` never has to be clamped.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct RangeBucket {
    pub start: u64,
    pub end: u64,
    pub count: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarTypeCount {
    pub small: u32,
    pub sports: u32,
    pub luxury: u32,
    pub family: u32,
}

impl CarTypeCount {
    pub fn add(&mut self, car_type: CarType) {
        match car_type {
            CarType::Small => self.small += 1,
            CarType::Sports => self.sports += 1,
            CarType::Luxury => self.luxury += 1,
            CarType::Family => self.family += 1,
        }
    }

    #[cfg(test)]
    pub fn total(&self) -> u32 {
        self.small + self.sports + self.luxury + self.family
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeatsCount {
    pub number_seats: u32,
    pub count: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VollkaskoCount {
    pub true_count: u32,
    pub false_count: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub offers: Vec<SearchResultOffer>,
    pub price_ranges: Vec<RangeBucket>,
    pub car_type_counts: CarTypeCount,
    pub seats_count: Vec<SeatsCount>,
    pub free_kilometer_range: Vec<RangeBucket>,
    pub vollkasko_count: VollkaskoCount,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_POST_REQUEST: &str = r#"
    {
      "offers": [
        {
          "ID": "01934a57-7988-7879-bb9b-e03bd4e77b9d",
          "data": "string",
          "mostSpecificRegionID": 5,
          "startDate": 1732104000000,
          "endDate": 1732449600000,
          "numberSeats": 5,
          "price": 10000,
          "carType": "luxury",
          "hasVollkasko": true,
          "freeKilometers": 120
        }
      ]
    }
    "#;

    fn params() -> SearchParams {
        SearchParams {
            region_id: 0,
            time_range_start: 0,
            time_range_end: 10 * DAY_MS,
            number_days: 2,
            sort_order: SortOrder::PriceAsc,
            page: 0,
            page_size: 10,
            price_range_width: 100,
            min_free_kilometer_width: 50,
            min_number_seats: None,
            min_price: None,
            max_price: None,
            car_type: None,
            only_vollkasko: None,
            min_free_kilometer: None,
        }
    }

    #[test]
    fn test_parse_post_body() {
        let request: CreateOffersRequest = serde_json::from_str(SAMPLE_POST_REQUEST).unwrap();
        let offer = &request.offers[0];

        assert_eq!(offer.id, "01934a57-7988-7879-bb9b-e03bd4e77b9d");
        assert_eq!(offer.most_specific_region_id, 5);
        assert_eq!(offer.car_type, CarType::Luxury);
        assert!(offer.has_vollkasko);
        assert_eq!(offer.free_kilometers, 120);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_unknown_car_type_is_rejected() {
        let body = SAMPLE_POST_REQUEST.replace("luxury", "convertible");
        assert!(serde_json::from_str::<CreateOffersRequest>(&body).is_err());
    }

    #[test]
    fn test_empty_batch_is_rejected() {
        let request = CreateOffersRequest { offers: vec![] };
        assert_eq!(request.validate(), Err(ValidationError::EmptyBatch));
    }

    #[test]
    fn test_inverted_time_span_is_rejected() {
        let mut request: CreateOffersRequest = serde_json::from_str(SAMPLE_POST_REQUEST).unwrap();
        request.offers[0].end_date = request.offers[0].start_date;

        assert_eq!(
            request.validate(),
            Err(ValidationError::InvalidTimeSpan {
                id: "01934a57-7988-7879-bb9b-e03bd4e77b9d".to_string()
            })
        );
    }

    #[test]
    fn test_zero_widths_are_rejected() {
        assert!(params().validate().is_ok());

        let mut p = params();
        p.page_size = 0;
        assert_eq!(p.validate(), Err(ValidationError::NonPositive { field: "pageSize" }));

        let mut p = params();
        p.min_free_kilometer_width = 0;
        assert_eq!(
            p.validate().unwrap_err().to_string(),
            "minFreeKilometerWidth must be greater than zero"
        );
    }

    const REQUIRED_QUERY: &str = "regionID=0&timeRangeStart=0&timeRangeEnd=864000000&numberDays=2\
        &sortOrder=price-asc&page=0&pageSize=10&priceRangeWidth=100&minFreeKilometerWidth=50";

    fn parse_query(optional: &str) -> Result<SearchParams, String> {
        let uri: axum::http::Uri = format!("/api/offers?{}{}", REQUIRED_QUERY, optional)
            .parse()
            .unwrap();
        axum::extract::Query::<SearchParams>::try_from_uri(&uri)
            .map(|query| query.0)
            .map_err(|rejection| rejection.body_text())
    }

    #[test]
    fn test_empty_optional_values_are_unset() {
        let p = parse_query(
            "&minNumberSeats=&minPrice=&maxPrice=&carType=&onlyVollkasko=&minFreeKilometer=",
        )
        .unwrap();

        assert_eq!(p.min_number_seats, None);
        assert_eq!(p.min_price, None);
        assert_eq!(p.max_price, None);
        assert_eq!(p.car_type, None);
        assert_eq!(p.only_vollkasko, None);
        assert_eq!(p.min_free_kilometer, None);
    }

    #[test]
    fn test_optional_values_are_parsed() {
        let p = parse_query("&minPrice=150&carType=family&onlyVollkasko=true").unwrap();
        assert_eq!(p.min_price, Some(150));
        assert_eq!(p.car_type, Some(CarType::Family));
        assert_eq!(p.only_vollkasko, Some(true));
        assert_eq!(p.max_price, None);

        assert!(parse_query("&minPrice=cheap").is_err());
        assert!(parse_query("&carType=convertible").is_err());
    }

    #[test]
    fn test_response_uses_camel_case_keys() {
        let response = SearchResponse {
            offers: vec![SearchResultOffer {
                id: "a".to_string(),
                data: "payload".to_string(),
            }],
            price_ranges: vec![RangeBucket { start: 0, end: 10, count: 1 }],
            car_type_counts: CarTypeCount::default(),
            seats_count: vec![SeatsCount { number_seats: 5, count: 1 }],
            free_kilometer_range: vec![],
            vollkasko_count: VollkaskoCount::default(),
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["offers"][0]["ID"], "a");
        assert_eq!(json["offers"][0]["data"], "payload");
        assert_eq!(json["priceRanges"][0]["end"], 10);
        assert_eq!(json["carTypeCounts"]["family"], 0);
        assert_eq!(json["seatsCount"][0]["numberSeats"], 5);
        assert!(json["freeKilometerRange"].as_array().unwrap().is_empty());
        assert_eq!(json["vollkaskoCount"]["trueCount"], 0);
    }
}
