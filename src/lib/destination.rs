use crate::*;
use std::fmt;

/// Everything the detail page shows about a country.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationProfile {
    pub name: String,
    pub region: String,
    pub capital: String,
    pub population: String,
    pub language: String,
    pub currency: String,
    pub best_time: String,
    pub culture: String,
    pub attractions: Vec<String>,
    pub cuisine: Vec<String>,
    pub festivals: Vec<String>,
    pub tips: String,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl From<&DestinationFacts> for DestinationProfile {
    fn from(facts: &DestinationFacts) -> Self {
        Self {
            name: facts.name.to_string(),
            region: facts.region.to_string(),
            capital: facts.capital.to_string(),
            population: facts.population.to_string(),
            language: facts.language.to_string(),
            currency: facts.currency.to_string(),
            best_time: facts.best_time.to_string(),
            culture: facts.culture.to_string(),
            attractions: owned(facts.attractions),
            cuisine: owned(facts.cuisine),
            festivals: owned(facts.festivals),
            tips: facts.tips.to_string(),
        }
    }
}

impl DestinationProfile {
    /// A profile assembled from the country data endpoint, topped up with what the
    /// previous page passed along.
    pub fn from_country_data(info: &CountryInfo, passed: &CountrySummary) -> Self {
        let name = info.name.clone().unwrap_or_else(|| passed.name.clone());
        let capital = info.capital.clone().unwrap_or_else(|| passed.capital.clone());
        Self {
            culture: format!(
                "{} is a fascinating destination with rich cultural heritage and diverse traditions. \
                 This beautiful country offers unique experiences for every traveler.",
                name
            ),
            attractions: vec![
                format!("{} - Capital city with major landmarks", capital),
                "Historical monuments and heritage sites".to_string(),
                "Natural landscapes and scenic beauty".to_string(),
                "Local markets and shopping districts".to_string(),
                "Cultural museums and art galleries".to_string(),
            ],
            name,
            region: info.region.clone().unwrap_or_else(|| passed.region.clone()),
            capital,
            population: info
                .population
                .map(format_population)
                .unwrap_or_else(|| passed.population.clone()),
            language: info.language.clone().unwrap_or_else(|| "Various".to_string()),
            currency: info
                .currency
                .clone()
                .unwrap_or_else(|| "Local Currency".to_string()),
            best_time: "Year-round (varies by region)".to_string(),
            cuisine: owned(&[
                "Traditional local dishes",
                "Regional specialties",
                "Street food delicacies",
                "Fresh local produce",
                "International cuisine options",
            ]),
            festivals: owned(&[
                "National Day celebrations",
                "Cultural festivals",
                "Religious holidays",
                "Local traditions",
            ]),
            tips: "Research local customs and traditions before visiting. Check visa requirements \
                   and travel advisories. Learn basic phrases in the local language."
                .to_string(),
        }
    }

    /// The bare profile used when only the passed card is known.
    pub fn from_summary(passed: &CountrySummary) -> Self {
        Self {
            name: passed.name.clone(),
            region: passed.region.clone(),
            capital: passed.capital.clone(),
            population: passed.population.clone(),
            language: "Various".to_string(),
            currency: "Local Currency".to_string(),
            best_time: "Year-round".to_string(),
            culture: format!("{} is a wonderful destination waiting to be explored!", passed.name),
            attractions: owned(&[
                "Explore the capital city",
                "Visit local landmarks",
                "Experience the culture",
            ]),
            cuisine: owned(&["Traditional dishes", "Local specialties"]),
            festivals: owned(&["Cultural celebrations"]),
            tips: "Plan ahead and enjoy your trip!".to_string(),
        }
    }
}

impl fmt::Display for DestinationProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.name, self.region)?;
        writeln!(f, "  Capital:    {}", self.capital)?;
        writeln!(f, "  Population: {}", self.population)?;
        writeln!(f, "  Language:   {}", self.language)?;
        writeln!(f, "  Currency:   {}", self.currency)?;
        writeln!(f, "  Best time:  {}", self.best_time)?;
        writeln!(f, "\n{}", self.culture)?;
        for (title, items) in [
            ("Top attractions", &self.attractions),
            ("Local cuisine", &self.cuisine),
            ("Festivals", &self.festivals),
        ]
        .iter()
        {
            writeln!(f, "\n{}:", title)?;
            for item in items.iter() {
                writeln!(f, "  - {}", item)?;
            }
        }
        write!(f, "\nTravel tips: {}", self.tips)
    }
}

/// How a detail page arrived at the profile it shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The country has a hand written entry.
    Found(DestinationProfile),
    /// Built from the country data endpoint.
    FromCountryData(DestinationProfile),
    /// The endpoint failed, built from the passed card alone.
    FromNavigationState(DestinationProfile),
    /// Nothing known and nothing passed.
    UsingFallback(DestinationProfile),
}

impl Resolution {
    pub fn profile(&self) -> &DestinationProfile {
        match self {
            Resolution::Found(p)
            | Resolution::FromCountryData(p)
            | Resolution::FromNavigationState(p)
            | Resolution::UsingFallback(p) => p,
        }
    }
}

/// Picks the profile for `/destination/<country>`.
///
/// The endpoint is only asked when the country has no entry of its own and the
/// previous page passed a card along.
pub fn resolve(
    country: &str,
    passed: Option<&CountrySummary>,
    countries: &dyn CountryLookup,
) -> Resolution {
    if let Some(facts) = find_facts(country) {
        return Resolution::Found(facts.into());
    }

    let passed = match passed {
        Some(passed) => passed,
        None => return fallback(country),
    };

    match countries.details(country) {
        Ok(Some(info)) => Resolution::FromCountryData(DestinationProfile::from_country_data(&info, passed)),
        Ok(None) => {
            log::warn!("No country data for {}.", country);
            Resolution::FromNavigationState(DestinationProfile::from_summary(passed))
        }
        Err(e) => {
            log::warn!("Error fetching country data for {}. Reason:\r\n{}", country, e);
            Resolution::FromNavigationState(DestinationProfile::from_summary(passed))
        }
    }
}

fn fallback(country: &str) -> Resolution {
    log::info!("Nothing known about {}, showing {}.", country, FALLBACK_DESTINATION);
    let profile = match find_facts(FALLBACK_DESTINATION) {
        Some(facts) => facts.into(),
        None => DestinationProfile::from_summary(&CountrySummary {
            name: FALLBACK_DESTINATION.to_string(),
            region: "Unknown".to_string(),
            capital: "N/A".to_string(),
            population: "N/A".to_string(),
        }),
    };
    Resolution::UsingFallback(profile)
}

/// A resolved profile with its hero image.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationPage {
    pub resolution: Resolution,
    pub hero_image: String,
}

impl DestinationPage {
    pub fn load(
        country: &str,
        passed: Option<&CountrySummary>,
        countries: &dyn CountryLookup,
        images: &dyn ImageLookup,
    ) -> Self {
        let resolution = resolve(country, passed, countries);
        let hero_image = background_image(images, &resolution.profile().name);
        Self {
            resolution,
            hero_image,
        }
    }

    pub fn profile(&self) -> &DestinationProfile {
        self.resolution.profile()
    }
}

#[cfg(test)]
pub(crate) struct FakeCountries {
    pub countries: Vec<CountryInfo>,
    pub status: Option<u16>,
    pub calls: std::cell::Cell<usize>,
}

#[cfg(test)]
impl FakeCountries {
    pub fn with(countries: Vec<CountryInfo>) -> Self {
        Self {
            countries,
            status: None,
            calls: Default::default(),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            countries: vec![],
            status: Some(status),
            calls: Default::default(),
        }
    }

    fn answer(&self) -> Result<Vec<CountryInfo>, LookupError> {
        self.calls.set(self.calls.get() + 1);
        match self.status {
            Some(status) => Err(LookupError::Status {
                url: "https://restcountries.com/v3.1/name".to_string(),
                status,
            }),
            None => Ok(self.countries.clone()),
        }
    }
}

#[cfg(test)]
impl CountryLookup for FakeCountries {
    fn search(&self, name: &str) -> Result<Vec<CountryInfo>, LookupError> {
        let name = name.to_lowercase();
        Ok(self
            .answer()?
            .into_iter()
            .filter(|c| {
                c.name
                    .as_deref()
                    .map_or(false, |n| n.to_lowercase().contains(&name))
            })
            .collect())
    }

    fn details(&self, name: &str) -> Result<Option<CountryInfo>, LookupError> {
        Ok(self
            .answer()?
            .into_iter()
            .find(|c| c.name.as_deref() == Some(name)))
    }
}

#[cfg(test)]
fn peru_card() -> CountrySummary {
    CountrySummary {
        name: "Peru".to_string(),
        region: "Americas".to_string(),
        capital: "Lima".to_string(),
        population: "33.0M".to_string(),
    }
}

#[test]
fn known_countries_skip_the_endpoint() {
    let countries = FakeCountries::failing(500);
    let resolution = resolve("Japan", Some(&peru_card()), &countries);
    match &resolution {
        Resolution::Found(profile) => assert_eq!(profile.capital, "Tokyo"),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(countries.calls.get(), 0);
}

#[test]
fn passed_cards_are_enriched_from_country_data() {
    let countries = FakeCountries::with(vec![CountryInfo {
        name: Some("Peru".to_string()),
        region: Some("Americas".to_string()),
        capital: Some("Lima".to_string()),
        population: Some(34_352_720),
        language: Some("Quechua".to_string()),
        currency: None,
    }]);
    let profile = match resolve("Peru", Some(&peru_card()), &countries) {
        Resolution::FromCountryData(profile) => profile,
        other => panic!("unexpected {:?}", other),
    };
    assert_eq!(profile.population, "34.4M");
    assert_eq!(profile.language, "Quechua");
    assert_eq!(profile.currency, "Local Currency");
    assert_eq!(profile.best_time, "Year-round (varies by region)");
    assert_eq!(profile.attractions[0], "Lima - Capital city with major landmarks");
}

#[test]
fn endpoint_failures_fall_back_to_the_passed_card() {
    let resolution = resolve("Peru", Some(&peru_card()), &FakeCountries::failing(404));
    let profile = match resolution {
        Resolution::FromNavigationState(profile) => profile,
        other => panic!("unexpected {:?}", other),
    };
    assert_eq!(profile.capital, "Lima");
    assert_eq!(profile.best_time, "Year-round");
    assert_eq!(profile.culture, "Peru is a wonderful destination waiting to be explored!");

    // An empty answer counts as a failure too.
    let resolution = resolve("Peru", Some(&peru_card()), &FakeCountries::with(vec![]));
    assert!(matches!(resolution, Resolution::FromNavigationState(_)));
}

#[test]
fn unknown_countries_without_a_card_show_nepal() {
    let countries = FakeCountries::with(vec![]);
    let resolution = resolve("Atlantis", None, &countries);
    assert!(matches!(resolution, Resolution::UsingFallback(_)));
    assert_eq!(resolution.profile().name, "Nepal");
    assert_eq!(countries.calls.get(), 0);
}

#[test]
fn hero_image_degrades_to_the_placeholder() {
    let page = DestinationPage::load("France", None, &FakeCountries::with(vec![]), &FixedImages(None));
    assert_eq!(page.profile().name, "France");
    assert_eq!(page.hero_image, placeholder_image_url("France"));

    let page = DestinationPage::load(
        "France",
        None,
        &FakeCountries::with(vec![]),
        &FixedImages(Some("https://img/paris.jpg")),
    );
    assert_eq!(page.hero_image, "https://img/paris.jpg");
}
