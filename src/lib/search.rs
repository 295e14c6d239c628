//! The destination search widget: turns a place name into a map focus and a marker.
//!
//! Every lookup is tagged with a [`SearchTicket`]. Only the answer to the most
//! recently issued ticket is applied; answers to older tickets are dropped, so a
//! slow first search can no longer overwrite a fast second one.

use crate::*;

/// Minimum number of characters a widget query needs after trimming.
pub const MIN_QUERY_CHARS: usize = 2;

pub const QUERY_TOO_SHORT: &str = "Please type at least 2 characters";
pub const QUICK_QUERY_EMPTY: &str = "Please type a city or country name!";
pub const SEARCH_FAILED: &str = "Search failed. Please try again.";
pub const SEARCH_UNREACHABLE: &str =
    "Location not found. Please check your spelling and try again.";
pub const QUICK_SEARCH_FAILED: &str = "Location not found";

/// The two places a search can be started from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SearchEntry {
    /// The search box of the map widget. Focuses at [`SEARCH_ZOOM`].
    Widget,
    /// The quick search form. Focuses at [`PRESET_ZOOM`] and keeps the full address.
    Quick,
}

impl SearchEntry {
    pub fn zoom(self) -> u32 {
        match self {
            SearchEntry::Widget => SEARCH_ZOOM,
            SearchEntry::Quick => PRESET_ZOOM,
        }
    }
}

/// Identifies one dispatched lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub query: String,
    pub entry: SearchEntry,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The query was refused before any lookup. Carries the message shown.
    Rejected(String),
    /// The map moved to the contained marker.
    Focused(Marker),
    /// The geocoder knew nothing about the query.
    NotFound(String),
    /// The lookup failed. Carries the message shown.
    Failed(String),
    /// A newer search was issued before this one completed; nothing was applied.
    Stale,
}

pub struct SearchWidget {
    view: MapView,
    selected: Option<Marker>,
    search_results: Vec<Marker>,
    error: Option<String>,
    generation: u64,
    searching: bool,
}

fn first_segment(display_name: &str) -> &str {
    display_name.split(',').next().unwrap_or_default().trim()
}

impl SearchWidget {
    pub fn new() -> Self {
        Self {
            view: MapView::world(),
            selected: None,
            search_results: vec![],
            error: None,
            generation: 0,
            searching: false,
        }
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn selected(&self) -> Option<&Marker> {
        self.selected.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Validates a widget query and issues a ticket for it.
    ///
    /// Returns `None` and records the validation message if the query is too short.
    pub fn begin(&mut self, query: &str) -> Option<SearchTicket> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            log::debug!("Rejected search for '{}': too short.", query);
            self.error = Some(QUERY_TOO_SHORT.to_string());
            return None;
        }
        Some(self.issue(query, SearchEntry::Widget))
    }

    /// Validates a quick search query and issues a ticket for it.
    pub fn begin_quick(&mut self, query: &str) -> Option<SearchTicket> {
        let query = query.trim();
        if query.is_empty() {
            self.error = Some(QUICK_QUERY_EMPTY.to_string());
            return None;
        }
        Some(self.issue(query, SearchEntry::Quick))
    }

    fn issue(&mut self, query: &str, entry: SearchEntry) -> SearchTicket {
        self.generation += 1;
        self.searching = true;
        self.error = None;
        SearchTicket {
            generation: self.generation,
            query: query.to_string(),
            entry,
        }
    }

    /// Applies the answer to a ticket if it is still the latest one.
    pub fn complete(
        &mut self,
        ticket: &SearchTicket,
        result: Result<Vec<GeocodeResult>, LookupError>,
    ) -> SearchOutcome {
        if ticket.generation != self.generation {
            log::debug!(
                "Dropping stale search #{} for '{}', latest is #{}.",
                ticket.generation,
                ticket.query,
                self.generation
            );
            return SearchOutcome::Stale;
        }
        self.searching = false;

        let outcome = match result {
            Ok(results) => match results.into_iter().next() {
                Some(first) => {
                    let marker = Self::marker_for(&first, ticket.entry);
                    // The quick search form leaves the destination list alone.
                    if ticket.entry == SearchEntry::Widget {
                        self.search_results = vec![marker.clone()];
                    }
                    self.view.markers = vec![marker.clone()];
                    self.view.focus(first.coordinates, ticket.entry.zoom());
                    self.selected = Some(marker.clone());
                    log::info!("Map moved to {} at {}.", first.display_name, first.coordinates);
                    SearchOutcome::Focused(marker)
                }
                None => {
                    let message = match ticket.entry {
                        SearchEntry::Widget => format!("Location not found: \"{}\"", ticket.query),
                        SearchEntry::Quick => QUICK_SEARCH_FAILED.to_string(),
                    };
                    SearchOutcome::NotFound(message)
                }
            },
            Err(e) => {
                log::warn!("Search for '{}' failed. Reason:\r\n{}", ticket.query, e);
                let message = match (ticket.entry, &e) {
                    (SearchEntry::Quick, _) => QUICK_SEARCH_FAILED,
                    (SearchEntry::Widget, LookupError::Status { .. }) => SEARCH_FAILED,
                    (SearchEntry::Widget, _) => SEARCH_UNREACHABLE,
                };
                SearchOutcome::Failed(message.to_string())
            }
        };

        if let SearchOutcome::NotFound(message) | SearchOutcome::Failed(message) = &outcome {
            self.error = Some(message.clone());
        }
        outcome
    }

    fn marker_for(result: &GeocodeResult, entry: SearchEntry) -> Marker {
        let head = first_segment(&result.display_name).to_string();
        let (name, description) = match entry {
            SearchEntry::Widget => (result.label(), format!("Explore {}", head)),
            SearchEntry::Quick => (head, result.display_name.clone()),
        };
        Marker {
            name,
            country: result.country.clone().unwrap_or_default(),
            coordinates: result.coordinates,
            description,
            emoji: "📍".to_string(),
            is_search_result: true,
            display_name: Some(result.display_name.clone()),
        }
    }

    /// Looks up `query` and focuses the map on the best match.
    pub fn submit(&mut self, query: &str, geocoder: &dyn Geocoder) -> SearchOutcome {
        match self.begin(query) {
            Some(ticket) => {
                let result = geocoder.search(&ticket.query, 1);
                self.complete(&ticket, result)
            }
            None => SearchOutcome::Rejected(QUERY_TOO_SHORT.to_string()),
        }
    }

    /// The quick search form: any non-empty query, focused at the preset zoom.
    pub fn quick_search(&mut self, query: &str, geocoder: &dyn Geocoder) -> SearchOutcome {
        match self.begin_quick(query) {
            Some(ticket) => {
                let result = geocoder.search(&ticket.query, 1);
                self.complete(&ticket, result)
            }
            None => SearchOutcome::Rejected(QUICK_QUERY_EMPTY.to_string()),
        }
    }

    /// Focuses a preset destination without a lookup. The pinned markers stay as they are.
    pub fn select_preset(&mut self, preset: &PresetDestination) {
        let marker = Marker::from(preset);
        self.view.focus(marker.coordinates, PRESET_ZOOM);
        self.selected = Some(marker);
        self.error = None;
    }

    /// Returns to the world view with the presets pinned.
    pub fn reset(&mut self) {
        self.view = MapView::world();
        self.selected = None;
        self.search_results.clear();
        self.error = None;
    }

    /// The destination buttons below the map.
    pub fn displayed_destinations(&self) -> Vec<Marker> {
        if self.search_results.is_empty() {
            PRESET_DESTINATIONS.iter().map(Marker::from).collect()
        } else {
            self.search_results.clone()
        }
    }

    pub fn status_text(&self) -> String {
        match &self.selected {
            Some(marker) => format!(
                "Zoomed in on {} • Click \"Reset View\" to see full world map",
                marker.name
            ),
            None => "Search for any location or click destinations below to zoom in".to_string(),
        }
    }
}

impl Default for SearchWidget {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) struct FakeGeocoder {
    pub results: Vec<GeocodeResult>,
    pub status: Option<u16>,
    pub calls: std::cell::Cell<usize>,
}

#[cfg(test)]
impl FakeGeocoder {
    pub fn with(results: Vec<GeocodeResult>) -> Self {
        Self {
            results,
            status: None,
            calls: std::cell::Cell::new(0),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            results: vec![],
            status: Some(status),
            calls: std::cell::Cell::new(0),
        }
    }
}

#[cfg(test)]
impl Geocoder for FakeGeocoder {
    fn search(&self, _query: &str, limit: usize) -> Result<Vec<GeocodeResult>, LookupError> {
        self.calls.set(self.calls.get() + 1);
        match self.status {
            Some(status) => Err(LookupError::Status {
                url: "https://nominatim.test/search".to_string(),
                status,
            }),
            None => Ok(self.results.iter().take(limit).cloned().collect()),
        }
    }
}

#[cfg(test)]
fn lisbon() -> GeocodeResult {
    GeocodeResult {
        name: Some("Lisboa".to_string()),
        coordinates: Coordinates::new(38.7077507, -9.1365919),
        country: Some("Portugal".to_string()),
        display_name: "Lisboa, Portugal".to_string(),
    }
}

#[test]
fn short_queries_never_reach_the_geocoder() {
    let geocoder = FakeGeocoder::with(vec![lisbon()]);
    let mut widget = SearchWidget::new();
    for query in &["", " ", "a", "  b  ", "é"] {
        let outcome = widget.submit(query, &geocoder);
        assert_eq!(outcome, SearchOutcome::Rejected(QUERY_TOO_SHORT.to_string()));
        assert_eq!(widget.error(), Some(QUERY_TOO_SHORT));
    }
    assert_eq!(geocoder.calls.get(), 0);
    assert_eq!(widget.view(), &MapView::world());
}

#[test]
fn a_hit_focuses_the_first_result() {
    let mut second = lisbon();
    second.coordinates = Coordinates::new(0.0, 0.0);
    let geocoder = FakeGeocoder::with(vec![lisbon(), second]);
    let mut widget = SearchWidget::new();

    let outcome = widget.submit("  Lisbon ", &geocoder);

    let marker = match outcome {
        SearchOutcome::Focused(marker) => marker,
        other => panic!("unexpected outcome {:?}", other),
    };
    assert_eq!(marker.name, "Lisboa");
    assert_eq!(marker.country, "Portugal");
    assert_eq!(marker.description, "Explore Lisboa");
    assert_eq!(widget.view().center, lisbon().coordinates);
    assert_eq!(widget.view().zoom, SEARCH_ZOOM);
    assert_eq!(widget.view().markers, vec![marker.clone()]);
    assert_eq!(widget.selected(), Some(&marker));
    assert_eq!(widget.displayed_destinations(), vec![marker]);
    assert!(widget.error().is_none());
    assert!(!widget.is_searching());
}

#[test]
fn no_results_leave_the_map_untouched() {
    let mut widget = SearchWidget::new();
    widget.select_preset(&PRESET_DESTINATIONS[1]);
    let before = widget.view().clone();

    let outcome = widget.submit("Atlantis", &FakeGeocoder::with(vec![]));

    assert_eq!(
        outcome,
        SearchOutcome::NotFound("Location not found: \"Atlantis\"".to_string())
    );
    assert_eq!(widget.view(), &before);
    assert_eq!(widget.error(), Some("Location not found: \"Atlantis\""));
    assert_eq!(widget.selected().map(|m| m.name.as_str()), Some("Tokyo"));
}

#[test]
fn failures_report_and_keep_prior_state() {
    let mut widget = SearchWidget::new();
    widget.submit("Lisbon", &FakeGeocoder::with(vec![lisbon()]));
    let before = widget.view().clone();

    let outcome = widget.submit("Porto", &FakeGeocoder::failing(503));
    assert_eq!(outcome, SearchOutcome::Failed(SEARCH_FAILED.to_string()));
    assert_eq!(widget.view(), &before);

    let ticket = widget.begin("Porto").unwrap();
    let outcome = widget.complete(
        &ticket,
        Err(LookupError::Transport {
            url: "https://nominatim.test/search".to_string(),
            reason: "connection refused".to_string(),
        }),
    );
    assert_eq!(outcome, SearchOutcome::Failed(SEARCH_UNREACHABLE.to_string()));
    assert_eq!(widget.view(), &before);
}

#[test]
fn reset_always_returns_to_the_world_view() {
    let mut widget = SearchWidget::new();
    widget.submit("Lisbon", &FakeGeocoder::with(vec![lisbon()]));
    widget.submit("x", &FakeGeocoder::with(vec![]));
    widget.reset();

    assert_eq!(widget.view().center, Coordinates::new(20.0, 0.0));
    assert_eq!(widget.view().zoom, 2);
    assert_eq!(widget.view().markers.len(), PRESET_DESTINATIONS.len());
    assert!(widget.selected().is_none());
    assert!(widget.error().is_none());
    assert_eq!(
        widget.status_text(),
        "Search for any location or click destinations below to zoom in"
    );
}

#[test]
fn presets_focus_without_a_lookup() {
    let mut widget = SearchWidget::new();
    let sydney = find_preset("Sydney").unwrap();
    widget.select_preset(sydney);

    assert_eq!(widget.view().center, sydney.coordinates);
    assert_eq!(widget.view().zoom, PRESET_ZOOM);
    assert_eq!(widget.view().markers.len(), PRESET_DESTINATIONS.len());
    assert_eq!(
        widget.status_text(),
        "Zoomed in on Sydney • Click \"Reset View\" to see full world map"
    );
}

#[test]
fn stale_answers_are_discarded() {
    let mut widget = SearchWidget::new();
    let slow = widget.begin("Lisbon").unwrap();
    let fast = widget.begin("Tokyo").unwrap();
    assert!(fast.generation > slow.generation);

    let tokyo = GeocodeResult {
        name: Some("Tokyo".to_string()),
        coordinates: Coordinates::new(35.6895, 139.6917),
        country: Some("Japan".to_string()),
        display_name: "Tokyo, Japan".to_string(),
    };
    assert!(matches!(
        widget.complete(&fast, Ok(vec![tokyo.clone()])),
        SearchOutcome::Focused(_)
    ));
    assert_eq!(widget.complete(&slow, Ok(vec![lisbon()])), SearchOutcome::Stale);
    assert_eq!(widget.view().center, tokyo.coordinates);
}

#[test]
fn quick_search_uses_the_preset_zoom_and_full_address() {
    let mut widget = SearchWidget::new();
    assert_eq!(
        widget.quick_search("   ", &FakeGeocoder::with(vec![])),
        SearchOutcome::Rejected(QUICK_QUERY_EMPTY.to_string())
    );

    let outcome = widget.quick_search("L", &FakeGeocoder::with(vec![lisbon()]));
    let marker = match outcome {
        SearchOutcome::Focused(marker) => marker,
        other => panic!("unexpected outcome {:?}", other),
    };
    assert_eq!(marker.description, "Lisboa, Portugal");
    assert_eq!(widget.view().zoom, PRESET_ZOOM);
    assert_eq!(widget.view().markers, vec![marker]);
    let presets: Vec<Marker> = PRESET_DESTINATIONS.iter().map(Marker::from).collect();
    assert_eq!(widget.displayed_destinations(), presets);

    let outcome = widget.quick_search("Nowhere", &FakeGeocoder::failing(500));
    assert_eq!(outcome, SearchOutcome::Failed(QUICK_SEARCH_FAILED.to_string()));
}
