use crate::*;
use std::fmt;

/// The pages of the app, keyed by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    PlanTrip,
    Community,
    About,
    Login,
    TripNotes,
    TripPlanner,
    ShareAdventure,
    /// `/destination/<country>` with the country already decoded.
    Destination(String),
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Route {
        let path = path
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Route::Home,
            "/plan-trip" => Route::PlanTrip,
            "/community" => Route::Community,
            "/about" => Route::About,
            "/login" => Route::Login,
            "/trip-notes" => Route::TripNotes,
            "/trip-planner" => Route::TripPlanner,
            "/share-adventure" => Route::ShareAdventure,
            other => match other.strip_prefix("/destination/") {
                Some(country) if !country.is_empty() && !country.contains('/') => {
                    match urlencoding::decode(country) {
                        Ok(country) => Route::Destination(country.into_owned()),
                        Err(e) => {
                            log::warn!("Undecodable destination in {}. Reason:\r\n{}", path, e);
                            Route::NotFound(path.to_string())
                        }
                    }
                }
                _ => Route::NotFound(path.to_string()),
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::PlanTrip => "/plan-trip".to_string(),
            Route::Community => "/community".to_string(),
            Route::About => "/about".to_string(),
            Route::Login => "/login".to_string(),
            Route::TripNotes => "/trip-notes".to_string(),
            Route::TripPlanner => "/trip-planner".to_string(),
            Route::ShareAdventure => "/share-adventure".to_string(),
            Route::Destination(country) => format!("/destination/{}", urlencoding::encode(country)),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Whether the navigation bar and footer are drawn around the page.
    pub fn shows_chrome(&self) -> bool {
        *self != Route::Login
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Data handed from one page to the next alongside a route.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NavigationState {
    pub country_data: Option<CountrySummary>,
}

#[test]
fn every_page_round_trips_through_its_path() {
    let routes = vec![
        Route::Home,
        Route::PlanTrip,
        Route::Community,
        Route::About,
        Route::Login,
        Route::TripNotes,
        Route::TripPlanner,
        Route::ShareAdventure,
        Route::Destination("United Kingdom".to_string()),
    ];
    for route in routes {
        assert_eq!(Route::parse(&route.path()), route);
    }
}

#[test]
fn destination_names_are_percent_encoded() {
    let route = Route::Destination("Côte d'Ivoire".to_string());
    assert_eq!(route.path(), "/destination/C%C3%B4te%20d%27Ivoire");
    assert_eq!(
        Route::parse("/destination/New%20Zealand?ref=community"),
        Route::Destination("New Zealand".to_string())
    );
}

#[test]
fn unknown_paths_are_not_found() {
    assert_eq!(Route::parse("/nowhere"), Route::NotFound("/nowhere".to_string()));
    assert_eq!(
        Route::parse("/destination/"),
        Route::NotFound("/destination/".to_string())
    );
    assert_eq!(Route::parse("/about/"), Route::About);
}

#[test]
fn login_hides_navigation() {
    assert!(!Route::Login.shows_chrome());
    assert!(Route::Destination("Japan".to_string()).shows_chrome());
}
