use std::fmt;

use crate::text;

/// Reserved city value that selects a search across the whole country.
pub const WHOLE_COUNTRY_SENTINEL: &str = "__WHOLE_COUNTRY__";

/// Raw search form contents, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchForm {
    pub country: String,
    pub city: String,
    pub category: String,
    pub max_results: String,
}

/// Validated parameters for `POST /api/search`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub country: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
    pub max_results: Option<u32>,
    pub whole_country: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    CityRequired,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::CityRequired => f.write_str(text::VALIDATION_CITY_REQUIRED),
        }
    }
}

impl std::error::Error for ValidationError {}

impl SearchForm {
    /// Form with every field cleared except the country.
    pub fn with_country(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            ..Self::default()
        }
    }

    pub fn to_request(&self) -> Result<SearchRequest, ValidationError> {
        let city = self.city.trim();
        if city.is_empty() {
            return Err(ValidationError::CityRequired);
        }
        let whole_country = city == WHOLE_COUNTRY_SENTINEL;

        Ok(SearchRequest {
            country: non_empty(&self.country),
            city: if whole_country {
                None
            } else {
                Some(city.to_string())
            },
            category: non_empty(&self.category),
            max_results: parse_max_results(&self.max_results),
            whole_country,
        })
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// Anything that is not a positive integer means "no limit".
fn parse_max_results(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|value| *value > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(city: &str) -> SearchForm {
        SearchForm {
            country: "  Россия ".to_string(),
            city: city.to_string(),
            category: " кафе ".to_string(),
            max_results: "25".to_string(),
        }
    }

    #[test]
    fn trims_fields_and_parses_limit() {
        let request = form(" Москва ").to_request().unwrap();
        assert_eq!(
            request,
            SearchRequest {
                country: Some("Россия".to_string()),
                city: Some("Москва".to_string()),
                category: Some("кафе".to_string()),
                max_results: Some(25),
                whole_country: false,
            }
        );
    }

    #[test]
    fn whole_country_sentinel_clears_city() {
        let request = form(WHOLE_COUNTRY_SENTINEL).to_request().unwrap();
        assert_eq!(request.city, None);
        assert!(request.whole_country);
    }

    #[test]
    fn blank_city_is_rejected() {
        assert_eq!(form("   ").to_request(), Err(ValidationError::CityRequired));
    }

    #[test]
    fn non_positive_or_garbage_limit_is_dropped() {
        for raw in ["", "0", "-3", "abc"] {
            let mut f = form("Казань");
            f.max_results = raw.to_string();
            assert_eq!(f.to_request().unwrap().max_results, None, "input {raw:?}");
        }
    }
}
