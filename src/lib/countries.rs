use crate::*;
use serde_derive::Deserialize;
use std::collections::BTreeMap;

/// The short country card shown on the community page and passed to the detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct CountrySummary {
    pub name: String,
    pub region: String,
    pub capital: String,
    pub population: String,
}

/// Everything the detail page can use from the country data endpoint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CountryInfo {
    pub name: Option<String>,
    pub region: Option<String>,
    pub capital: Option<String>,
    pub population: Option<u64>,
    pub language: Option<String>,
    pub currency: Option<String>,
}

impl CountryInfo {
    pub fn to_summary(&self) -> CountrySummary {
        CountrySummary {
            name: self.name.clone().unwrap_or_else(|| "Unknown".to_string()),
            region: self.region.clone().unwrap_or_else(|| "Unknown".to_string()),
            capital: self.capital.clone().unwrap_or_else(|| "N/A".to_string()),
            population: self
                .population
                .map(format_population)
                .unwrap_or_else(|| "N/A".to_string()),
        }
    }
}

/// Formats a head count in millions with one decimal, e.g. `2.8M`.
pub fn format_population(population: u64) -> String {
    format!("{:.1}M", population as f64 / 1_000_000.0)
}

pub trait CountryLookup {
    /// Countries whose name contains `name`.
    fn search(&self, name: &str) -> Result<Vec<CountryInfo>, LookupError>;
    /// The country whose full name is exactly `name`.
    fn details(&self, name: &str) -> Result<Option<CountryInfo>, LookupError>;
}

#[derive(Debug, Deserialize)]
struct RawName {
    common: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCurrency {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCapital {
    Many(Vec<String>),
    One(String),
}

#[derive(Debug, Deserialize)]
struct RawCountry {
    name: Option<RawName>,
    region: Option<String>,
    capital: Option<RawCapital>,
    population: Option<u64>,
    #[serde(default)]
    languages: BTreeMap<String, String>,
    #[serde(default)]
    currencies: BTreeMap<String, RawCurrency>,
}

impl From<RawCountry> for CountryInfo {
    fn from(raw: RawCountry) -> Self {
        let capital = match raw.capital {
            Some(RawCapital::Many(capitals)) => capitals.into_iter().next(),
            Some(RawCapital::One(capital)) => Some(capital),
            None => None,
        };
        Self {
            name: raw.name.and_then(|n| n.common).filter(|n| !n.is_empty()),
            region: raw.region.filter(|r| !r.is_empty()),
            capital: capital.filter(|c| !c.is_empty()),
            population: raw.population.filter(|p| *p > 0),
            language: raw.languages.into_iter().next().map(|(_, l)| l),
            currency: raw.currencies.into_iter().next().and_then(|(_, c)| c.name),
        }
    }
}

fn from_raw(raw: Vec<RawCountry>) -> Vec<CountryInfo> {
    raw.into_iter().map(CountryInfo::from).collect()
}

#[cfg(test)]
fn parse_countries(body: &str) -> Result<Vec<CountryInfo>, serde_json::Error> {
    Ok(from_raw(serde_json::from_str(body)?))
}

/// Client for the REST Countries API.
pub struct RestCountries {
    endpoint: String,
    user_agent: String,
}

impl RestCountries {
    pub fn new(endpoint: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            user_agent: user_agent.into(),
        }
    }

    pub fn search_url(&self, name: &str) -> String {
        format!(
            "{}?fields=name,capital,region,population",
            join_url(&self.endpoint, &format!("name/{}", urlencoding::encode(name)))
        )
    }

    pub fn details_url(&self, name: &str) -> String {
        format!(
            "{}?fullText=true",
            join_url(&self.endpoint, &format!("name/{}", urlencoding::encode(name)))
        )
    }

    fn fetch(&self, url: &str) -> Result<Vec<CountryInfo>, LookupError> {
        Ok(from_raw(fetch_json(url, &self.user_agent)?))
    }
}

impl CountryLookup for RestCountries {
    fn search(&self, name: &str) -> Result<Vec<CountryInfo>, LookupError> {
        self.fetch(&self.search_url(name))
    }

    fn details(&self, name: &str) -> Result<Option<CountryInfo>, LookupError> {
        Ok(self.fetch(&self.details_url(name))?.into_iter().next())
    }
}

#[test]
fn population_is_formatted_in_millions() {
    assert_eq!(format_population(2_795_484), "2.8M");
    assert_eq!(format_population(125_700_000), "125.7M");
}

#[test]
fn rest_countries_payload_decodes() {
    let body = r#"[{
        "name": {"common": "Peru", "official": "Republic of Peru"},
        "capital": ["Lima"],
        "region": "Americas",
        "population": 32971846,
        "languages": {"aym": "Aymara"},
        "currencies": {"PEN": {"name": "Peruvian sol", "symbol": "S/ "}}
    }]"#;
    let countries = parse_countries(body).unwrap();
    assert_eq!(countries.len(), 1);
    let peru = &countries[0];
    assert_eq!(peru.capital.as_deref(), Some("Lima"));
    assert_eq!(peru.language.as_deref(), Some("Aymara"));
    assert_eq!(peru.currency.as_deref(), Some("Peruvian sol"));
    assert_eq!(
        peru.to_summary(),
        CountrySummary {
            name: "Peru".to_string(),
            region: "Americas".to_string(),
            capital: "Lima".to_string(),
            population: "33.0M".to_string(),
        }
    );
}

#[test]
fn missing_fields_summarize_as_placeholders() {
    let summary = CountryInfo::default().to_summary();
    assert_eq!(summary.name, "Unknown");
    assert_eq!(summary.capital, "N/A");
    assert_eq!(summary.population, "N/A");
}

#[test]
fn urls_follow_the_rest_countries_layout() {
    let client = RestCountries::new("https://restcountries.com/v3.1", "TripMind-App");
    assert_eq!(
        client.search_url("new zealand"),
        "https://restcountries.com/v3.1/name/new%20zealand?fields=name,capital,region,population"
    );
    assert_eq!(
        client.details_url("Peru"),
        "https://restcountries.com/v3.1/name/Peru?fullText=true"
    );
}
