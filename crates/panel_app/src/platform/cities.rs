use std::collections::BTreeMap;

use panel_logging::{panel_info, panel_warn};

/// Source of the city choices offered for a country.
pub trait CityDirectory {
    /// Re-derive the city list for `country`.
    fn refresh(&mut self, country: &str);
    fn cities(&self) -> &[String];
}

/// City lists taken from the `cities_by_country` config table.
pub struct ConfiguredCities {
    by_country: BTreeMap<String, Vec<String>>,
    current: Vec<String>,
}

impl ConfiguredCities {
    pub fn new(by_country: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            by_country,
            current: Vec::new(),
        }
    }
}

impl CityDirectory for ConfiguredCities {
    fn refresh(&mut self, country: &str) {
        match self.by_country.get(country) {
            Some(cities) => {
                self.current = cities.clone();
                panel_info!("{} cities available for {}", cities.len(), country);
            }
            None => {
                self.current.clear();
                panel_warn!("No city list configured for {}", country);
            }
        }
    }

    fn cities(&self) -> &[String] {
        &self.current
    }
}
