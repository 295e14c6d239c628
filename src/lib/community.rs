use crate::*;

pub const MAX_REMOTE_RESULTS: usize = 12;
pub const NO_RESULTS: &str = "No destinations found";

/// Featured cards matching `query` by name, region or capital.
pub fn filter_cards(query: &str) -> Vec<&'static CommunityCard> {
    let query = query.to_lowercase();
    COMMUNITY_CARDS
        .iter()
        .filter(|card| {
            [card.name, card.region, card.capital]
                .iter()
                .any(|field| field.to_lowercase().contains(&query))
        })
        .collect()
}

/// Countries matching `query` worldwide. Failures are logged and read as no matches.
pub fn search_countries(countries: &dyn CountryLookup, query: &str) -> Vec<CountrySummary> {
    match countries.search(query) {
        Ok(found) => found
            .iter()
            .take(MAX_REMOTE_RESULTS)
            .map(CountryInfo::to_summary)
            .collect(),
        Err(e) => {
            log::warn!("Country search for '{}' failed. Reason:\r\n{}", query, e);
            vec![]
        }
    }
}

/// The community page's search box and result grid.
#[derive(Debug, Default)]
pub struct CommunitySearch {
    query: String,
    remote: Option<Vec<CountrySummary>>,
}

impl CommunitySearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Changing the query discards the previous worldwide results.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.remote = None;
    }

    pub fn clear(&mut self) {
        self.set_query("");
    }

    /// Runs the worldwide search for the current query. Blank queries never hit the endpoint.
    pub fn search(&mut self, countries: &dyn CountryLookup) {
        if self.query.trim().is_empty() {
            self.remote = None;
            return;
        }
        self.remote = Some(search_countries(countries, &self.query));
    }

    fn showing_remote(&self) -> bool {
        self.remote.is_some() && !self.query.trim().is_empty()
    }

    pub fn displayed(&self) -> Vec<CountrySummary> {
        match &self.remote {
            Some(remote) if self.showing_remote() => remote.clone(),
            _ => filter_cards(&self.query)
                .into_iter()
                .map(CommunityCard::to_summary)
                .collect(),
        }
    }

    /// The line above the grid, e.g. `Found 3 destinations from around the world`.
    /// Nothing is shown while the query is empty.
    pub fn count_text(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }
        let count = self.displayed().len();
        let noun = if count == 1 { "destination" } else { "destinations" };
        let suffix = if self.showing_remote() { " from around the world" } else { "" };
        Some(format!("Found {} {}{}", count, noun, suffix))
    }

    /// Where the "Explore" button on a card leads.
    pub fn explore(card: &CountrySummary) -> (Route, NavigationState) {
        (
            Route::Destination(card.name.clone()),
            NavigationState {
                country_data: Some(card.clone()),
            },
        )
    }
}

/// Background image for every featured card, in card order.
pub fn card_images(images: &dyn ImageLookup) -> Vec<(&'static str, String)> {
    COMMUNITY_CARDS
        .iter()
        .map(|card| (card.name, background_image(images, card.name)))
        .collect()
}

#[test]
fn local_filter_matches_any_card_field() {
    let names = |q: &str| filter_cards(q).iter().map(|c| c.name).collect::<Vec<_>>();
    assert_eq!(names("KATH"), vec!["Nepal"]);
    assert_eq!(names("doha"), vec!["Qatar"]);
    assert_eq!(names("").len(), COMMUNITY_CARDS.len());
    assert!(names("zzz").is_empty());
}

#[test]
fn remote_results_replace_the_local_filter() {
    let many = (0..20)
        .map(|i| CountryInfo {
            name: Some(format!("Land {}", i)),
            ..Default::default()
        })
        .collect();
    let countries = FakeCountries::with(many);

    let mut search = CommunitySearch::new();
    search.set_query("land");
    assert!(search.displayed().is_empty());
    assert_eq!(search.count_text().as_deref(), Some("Found 0 destinations"));

    search.search(&countries);
    let shown = search.displayed();
    assert_eq!(shown.len(), MAX_REMOTE_RESULTS);
    assert_eq!(shown[0].capital, "N/A");
    assert_eq!(
        search.count_text().as_deref(),
        Some("Found 12 destinations from around the world")
    );

    search.clear();
    assert_eq!(search.displayed().len(), COMMUNITY_CARDS.len());
    assert_eq!(search.count_text(), None);
}

#[test]
fn failed_remote_search_shows_nothing() {
    let mut search = CommunitySearch::new();
    search.set_query("Japan");
    search.search(&FakeCountries::failing(404));
    assert!(search.displayed().is_empty());
    assert_eq!(
        search.count_text().as_deref(),
        Some("Found 0 destinations from around the world")
    );
}

#[test]
fn blank_queries_stay_local() {
    let countries = FakeCountries::with(vec![]);
    let mut search = CommunitySearch::new();
    search.set_query("   ");
    search.search(&countries);
    assert_eq!(countries.calls.get(), 0);
    assert_eq!(search.count_text().as_deref(), Some("Found 0 destinations"));
}

#[test]
fn exploring_a_card_passes_it_along() {
    let card = COMMUNITY_CARDS[2].to_summary();
    let (route, state) = CommunitySearch::explore(&card);
    assert_eq!(route, Route::Destination(card.name.clone()));
    assert_eq!(state.country_data, Some(card));
}

#[test]
fn every_card_gets_an_image() {
    let images = card_images(&FixedImages(None));
    assert_eq!(images.len(), COMMUNITY_CARDS.len());
    assert_eq!(images[0].1, placeholder_image_url(COMMUNITY_CARDS[0].name));
}
