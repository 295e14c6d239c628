use crate::app_state::AppState;
use crate::{Command, PlanAction, PlanField, PlanTripAction, PlanTripFieldArg};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::time::{Duration, Instant};
use thiserror::Error;
use tripmind::*;

/// How long `search` waits for outstanding lookups.
const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    PlanTrip(#[from] PlanTripError),
    #[error("could not read the photo: {0}")]
    Photo(#[from] std::io::Error),
    /// The input was refused. The message has already been shown.
    #[error("{0}")]
    Rejected(String),
}

pub(crate) fn run(command: Command, app: &AppState) -> Result<(), CommandError> {
    match command {
        Command::Search { queries } => search(app, &queries),
        Command::QuickSearch { query } => {
            let mut widget = SearchWidget::new();
            let outcome = widget.quick_search(&query, &*app.geocoder);
            report_search(&widget, outcome)
        }
        Command::Preset { name } => preset(name.as_deref()),
        Command::Destination {
            country,
            via_community,
        } => destination(app, &country, via_community),
        Command::Community { query, worldwide } => community(app, query.unwrap_or_default(), worldwide),
        Command::Plan { action } => plan(app, action),
        Command::PlanTrip { action } => plan_trip(app, action),
        Command::Notes { texts } => notes(&texts),
        Command::Share {
            name,
            destination,
            start,
            end,
            story,
            photo,
        } => {
            let mut board = AdventureBoard::new();
            board.set_field(AdventureField::Name, name);
            board.set_field(AdventureField::Destination, destination);
            board.set_field(AdventureField::StartDate, start);
            board.set_field(AdventureField::EndDate, end);
            board.set_field(AdventureField::Story, story);
            if let Some(photo) = photo {
                board.attach_photo_file(photo)?;
            }
            match board.submit() {
                Some(adventure) => {
                    println!("{} shared a story from {}", adventure.name, adventure.destination);
                    println!("{} → {}", adventure.start_date, adventure.end_date);
                    println!("\n{}", adventure.story);
                    if let Some(photo) = &adventure.photo {
                        println!("\nPhoto attached ({} bytes as data URL)", photo.len());
                    }
                    Ok(())
                }
                None => rejected("Please fill in every field before sharing."),
            }
        }
        Command::Login { email, password } => login(app, email, password),
        Command::Contact {
            name,
            email,
            message,
        } => {
            let mut form = ContactForm::new();
            form.set_field(ContactField::Name, name);
            form.set_field(ContactField::Email, email);
            form.set_field(ContactField::Message, message);
            let now = Instant::now();
            if let Err(invalid) = form.submit(now) {
                return rejected(&format!("Please check {}.", list(&invalid)));
            }
            if let Some(banner) = form.banner(now) {
                println!("{}", banner);
            }
            Ok(())
        }
        Command::About => {
            println!("Meet the team");
            for member in TEAM.iter() {
                println!("  {} - {}", member.name, member.role);
            }
            println!("\nWhat we offer");
            for feature in FEATURES.iter() {
                println!("  {}: {}", feature.title, feature.description);
            }
            Ok(())
        }
        Command::Route { path } => {
            let route = Route::parse(&path);
            println!("{:?} at {}", route, route);
            if !route.shows_chrome() {
                println!("Navigation and footer are hidden on this page.");
            }
            Ok(())
        }
    }
}

fn rejected(message: &str) -> Result<(), CommandError> {
    println!("{}", message);
    Err(CommandError::Rejected(message.to_string()))
}

fn list<T: Debug>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| format!("{:?}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_errors<K: Debug>(errors: &BTreeMap<K, &'static str>) {
    for (field, message) in errors {
        println!("  {:?}: {}", field, message);
    }
}

fn print_map(widget: &SearchWidget) {
    let view = widget.view();
    println!(
        "Map centered on {} at zoom {} (tile {})",
        view.center,
        view.zoom,
        view.center_tile()
    );
    for marker in view.markers.iter() {
        println!("  📍 {} {}, {} at {}", marker.emoji, marker.name, marker.country, marker.coordinates);
    }
    println!("{}", widget.status_text());
    let names: Vec<String> = widget
        .displayed_destinations()
        .into_iter()
        .map(|m| m.name)
        .collect();
    println!("Destinations: {}", names.join(" | "));
}

fn report_search(widget: &SearchWidget, outcome: SearchOutcome) -> Result<(), CommandError> {
    match outcome {
        SearchOutcome::Focused(marker) => {
            println!("Found {}", marker.display_name.as_deref().unwrap_or(&marker.name));
            print_map(widget);
            Ok(())
        }
        SearchOutcome::Stale => {
            print_map(widget);
            Ok(())
        }
        SearchOutcome::Rejected(message)
        | SearchOutcome::NotFound(message)
        | SearchOutcome::Failed(message) => rejected(&message),
    }
}

fn search(app: &AppState, queries: &[String]) -> Result<(), CommandError> {
    let mut widget = SearchWidget::new();
    let mut runner = app.search_runner();
    for query in queries {
        if let Some(outcome) = runner.submit(&mut widget, query) {
            log::warn!("Skipping '{}': {:?}", query, outcome);
        }
    }
    let outcomes = runner.wait_all(&mut widget, SEARCH_TIMEOUT);
    match outcomes
        .into_iter()
        .filter(|o| *o != SearchOutcome::Stale)
        .last()
    {
        Some(outcome) => report_search(&widget, outcome),
        None => match widget.error() {
            Some(error) => rejected(error),
            None => {
                print_map(&widget);
                Ok(())
            }
        },
    }
}

fn preset(name: Option<&str>) -> Result<(), CommandError> {
    let name = match name {
        Some(name) => name,
        None => {
            for preset in PRESET_DESTINATIONS.iter() {
                println!("{} {}, {}: {}", preset.emoji, preset.name, preset.country, preset.description);
            }
            return Ok(());
        }
    };
    match find_preset(name) {
        Some(preset) => {
            let mut widget = SearchWidget::new();
            widget.select_preset(preset);
            print_map(&widget);
            Ok(())
        }
        None => rejected(&format!("{} is not one of the popular destinations.", name)),
    }
}

fn destination(app: &AppState, country: &str, via_community: bool) -> Result<(), CommandError> {
    let state = if via_community {
        let card = COMMUNITY_CARDS
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(country))
            .map(CommunityCard::to_summary)
            .or_else(|| search_countries(&app.countries, country).into_iter().next());
        NavigationState { country_data: card }
    } else {
        NavigationState::default()
    };
    let route = Route::Destination(country.to_string());
    log::debug!("Opening {} with {:?}.", route, state);

    let page = DestinationPage::load(country, state.country_data.as_ref(), &app.countries, &app.images);
    match &page.resolution {
        Resolution::Found(_) => {}
        Resolution::FromCountryData(_) => println!("(assembled from country data)"),
        Resolution::FromNavigationState(_) => println!("(country data unavailable, showing basics)"),
        Resolution::UsingFallback(p) => println!("(nothing known about {}, showing {})", country, p.name),
    }
    println!("{}", page.profile());
    println!("\nHero image: {}", page.hero_image);
    Ok(())
}

fn community(app: &AppState, query: String, worldwide: bool) -> Result<(), CommandError> {
    let mut search = CommunitySearch::new();
    search.set_query(query);
    if worldwide {
        search.search(&app.countries);
    }
    if let Some(count) = search.count_text() {
        println!("{}", count);
    }
    let shown = search.displayed();
    if shown.is_empty() {
        println!("{}", NO_RESULTS);
        return Ok(());
    }
    let images: BTreeMap<&str, String> = if worldwide {
        BTreeMap::new()
    } else {
        card_images(&app.images).into_iter().collect()
    };
    for card in shown.iter() {
        let (route, _) = CommunitySearch::explore(card);
        println!(
            "{} ({}) capital {}, population {} → {}",
            card.name, card.region, card.capital, card.population, route
        );
        if let Some(image) = images.get(card.name.as_str()) {
            println!("    {}", image);
        }
    }
    Ok(())
}

impl From<PlanField> for PlannerField {
    fn from(field: PlanField) -> Self {
        match field {
            PlanField::Destination => PlannerField::Destination,
            PlanField::StartDate => PlannerField::StartDate,
            PlanField::EndDate => PlannerField::EndDate,
            PlanField::Budget => PlannerField::Budget,
            PlanField::Notes => PlannerField::Notes,
        }
    }
}

fn plan(app: &AppState, action: PlanAction) -> Result<(), CommandError> {
    let mut planner = TripPlanner::load(app.store.clone());
    match action {
        PlanAction::Show => {
            for field in PlannerField::ALL.iter() {
                println!("{:?}: {}", field, planner.draft().field(*field));
            }
            if let Some(days) = planner.trip_length() {
                println!("Trip length: {} day(s)", days);
            }
            print_errors(&planner.draft().errors());
            Ok(())
        }
        PlanAction::Set { field, value } => {
            let field = PlannerField::from(field);
            planner.set_field(field, value);
            planner.touch(field);
            print_errors(&planner.visible_errors());
            Ok(())
        }
        PlanAction::Submit => match planner.submit() {
            Ok(summary) => {
                println!("{}", summary);
                Ok(())
            }
            Err(errors) => {
                print_errors(&errors);
                Err(CommandError::Rejected("the trip plan has errors".to_string()))
            }
        },
        PlanAction::Clear => {
            planner.clear();
            Ok(())
        }
    }
}

impl From<PlanTripFieldArg> for PlanTripField {
    fn from(field: PlanTripFieldArg) -> Self {
        match field {
            PlanTripFieldArg::Destination => PlanTripField::Destination,
            PlanTripFieldArg::StartDate => PlanTripField::StartDate,
            PlanTripFieldArg::EndDate => PlanTripField::EndDate,
            PlanTripFieldArg::Budget => PlanTripField::Budget,
        }
    }
}

fn plan_trip(app: &AppState, action: PlanTripAction) -> Result<(), CommandError> {
    let mut form = PlanTripForm::load(app.store.clone());
    match action {
        PlanTripAction::Show => {
            let draft = form.draft();
            println!("Destination: {}", draft.destination);
            println!("Dates:       {} → {}", draft.start_date, draft.end_date);
            println!("Budget:      {}", draft.budget);
            for option in INTEREST_OPTIONS.iter() {
                let mark = if draft.interests.iter().any(|i| i == option.id) { "x" } else { " " };
                println!("  [{}] {} ({})", mark, option.label, option.id);
            }
            Ok(())
        }
        PlanTripAction::Set { field, value } => {
            form.set_field(field.into(), value);
            Ok(())
        }
        PlanTripAction::Toggle { interest } => {
            let selected = form.toggle_interest(&interest)?;
            println!("{} {}", interest, if selected { "selected" } else { "deselected" });
            Ok(())
        }
        PlanTripAction::Submit => match form.submit() {
            Ok(confirmation) => {
                println!("{}", confirmation);
                Ok(())
            }
            Err(missing) => rejected(&format!("Please fill in {}.", list(&missing))),
        },
    }
}

fn notes(texts: &[String]) -> Result<(), CommandError> {
    let mut list = NoteList::new();
    for text in texts {
        if let Err(e) = list.add(text) {
            log::warn!("Skipping note. Reason:\r\n{}", e);
        }
    }
    for note in list.notes() {
        println!("{} ({})\n  {}", note.date, note.id, note.text);
    }
    Ok(())
}

fn login(app: &AppState, email: String, password: String) -> Result<(), CommandError> {
    let mut form = LoginForm::new(app.login_delays);
    form.set_field(LoginField::Email, email);
    form.set_field(LoginField::Password, password);
    let result = form.submit(&ThreadTimer, |state| match state {
        LoginState::Authenticating => println!("Signing in..."),
        LoginState::Succeeded => println!("Welcome back! Redirecting..."),
        LoginState::Idle => {}
    });
    match result {
        Ok(route) => {
            println!("→ {}", route);
            Ok(())
        }
        Err(errors) => {
            print_errors(&errors);
            Err(CommandError::Rejected("sign in was refused".to_string()))
        }
    }
}
