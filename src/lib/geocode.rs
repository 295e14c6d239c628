use crate::*;
use serde_derive::Deserialize;
use std::collections::HashMap;

/// A place returned by the geocoder.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    /// Short label, when the geocoder provides one.
    pub name: Option<String>,
    pub coordinates: Coordinates,
    pub country: Option<String>,
    pub display_name: String,
}

impl GeocodeResult {
    /// The short label, falling back to the first segment of the display name.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => self
                .display_name
                .split(',')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string(),
        }
    }
}

/// Resolves free text into places.
pub trait Geocoder {
    /// Returns at most `limit` candidates, best match first.
    fn search(&self, query: &str, limit: usize) -> Result<Vec<GeocodeResult>, LookupError>;
}

/// A place as it comes over the wire from Nominatim.
#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: HashMap<String, String>,
}

impl NominatimPlace {
    pub fn into_result(self) -> Option<GeocodeResult> {
        let lat = self.lat.trim().parse::<f64>().ok()?;
        let lon = self.lon.trim().parse::<f64>().ok()?;
        let mut address = self.address;
        Some(GeocodeResult {
            name: self.name,
            coordinates: Coordinates::new(lat, lon),
            country: address.remove("country").filter(|c| !c.is_empty()),
            display_name: self.display_name,
        })
    }
}

/// Geocoder backed by an OpenStreetMap Nominatim instance.
pub struct NominatimGeocoder {
    endpoint: String,
    user_agent: String,
}

impl NominatimGeocoder {
    pub fn new(endpoint: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            user_agent: user_agent.into(),
        }
    }

    pub fn search_url(&self, query: &str, limit: usize) -> String {
        format!(
            "{}?q={}&format=json&limit={}&addressdetails=1",
            join_url(&self.endpoint, "search"),
            urlencoding::encode(query),
            limit
        )
    }
}

impl Geocoder for NominatimGeocoder {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<GeocodeResult>, LookupError> {
        let url = self.search_url(query, limit);
        let places: Vec<NominatimPlace> = fetch_json(&url, &self.user_agent)?;
        let total = places.len();
        let results: Vec<GeocodeResult> = places
            .into_iter()
            .filter_map(NominatimPlace::into_result)
            .take(limit)
            .collect();
        if results.len() < total.min(limit) {
            log::warn!("Dropped geocoding results with unparsable coordinates for '{}'.", query);
        }
        Ok(results)
    }
}

#[test]
fn search_url_encodes_the_query() {
    let geocoder = NominatimGeocoder::new("https://nominatim.openstreetmap.org/", "TripMind-App");
    assert_eq!(
        geocoder.search_url("São Paulo", 1),
        "https://nominatim.openstreetmap.org/search?q=S%C3%A3o%20Paulo&format=json&limit=1&addressdetails=1"
    );
}

#[test]
fn nominatim_places_decode_into_results() {
    let body = r#"[{
        "place_id": 1,
        "lat": "35.6768601",
        "lon": "139.7638947",
        "display_name": "Tokyo, Japan",
        "name": "Tokyo",
        "address": {"city": "Tokyo", "country": "Japan", "country_code": "jp"}
    }]"#;
    let places: Vec<NominatimPlace> = serde_json::from_str(body).unwrap();
    let result = places.into_iter().next().unwrap().into_result().unwrap();
    assert_eq!(result.coordinates, Coordinates::new(35.6768601, 139.7638947));
    assert_eq!(result.country.as_deref(), Some("Japan"));
    assert_eq!(result.label(), "Tokyo");
}

#[test]
fn label_falls_back_to_the_display_name() {
    let result = GeocodeResult {
        name: Some("  ".to_string()),
        coordinates: Coordinates::new(0.0, 0.0),
        country: None,
        display_name: "Kathmandu, Bagmati Province, Nepal".to_string(),
    };
    assert_eq!(result.label(), "Kathmandu");
}

#[test]
fn unparsable_coordinates_are_dropped() {
    let place = NominatimPlace {
        lat: "north".to_string(),
        lon: "1.0".to_string(),
        display_name: "Nowhere".to_string(),
        name: None,
        address: HashMap::new(),
    };
    assert!(place.into_result().is_none());
}
