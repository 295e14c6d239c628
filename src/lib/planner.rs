use crate::*;
use chrono::NaiveDate;
use serde_derive::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const PLANNER_DRAFT_KEY: &str = "tripmind:planner";

/// Parses a form date in `YYYY-MM-DD` form.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Formats a dollar amount without cents, e.g. `$2,000`.
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum PlannerField {
    Destination,
    StartDate,
    EndDate,
    Budget,
    Notes,
}

impl PlannerField {
    pub const ALL: [PlannerField; 5] = [
        PlannerField::Destination,
        PlannerField::StartDate,
        PlannerField::EndDate,
        PlannerField::Budget,
        PlannerField::Notes,
    ];
}

/// The trip planner form as it is saved between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TripDraft {
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: String,
    pub notes: String,
}

impl TripDraft {
    pub fn field(&self, field: PlannerField) -> &str {
        match field {
            PlannerField::Destination => &self.destination,
            PlannerField::StartDate => &self.start_date,
            PlannerField::EndDate => &self.end_date,
            PlannerField::Budget => &self.budget,
            PlannerField::Notes => &self.notes,
        }
    }

    fn field_mut(&mut self, field: PlannerField) -> &mut String {
        match field {
            PlannerField::Destination => &mut self.destination,
            PlannerField::StartDate => &mut self.start_date,
            PlannerField::EndDate => &mut self.end_date,
            PlannerField::Budget => &mut self.budget,
            PlannerField::Notes => &mut self.notes,
        }
    }

    pub fn errors(&self) -> BTreeMap<PlannerField, &'static str> {
        let mut errors = BTreeMap::new();
        if self.destination.trim().is_empty() {
            errors.insert(PlannerField::Destination, "Please enter a destination.");
        }

        let start = parse_date(&self.start_date);
        if self.start_date.trim().is_empty() {
            errors.insert(PlannerField::StartDate, "Start date is required.");
        } else if start.is_none() {
            errors.insert(PlannerField::StartDate, "Start date must be a valid date.");
        }

        let end = parse_date(&self.end_date);
        if self.end_date.trim().is_empty() {
            errors.insert(PlannerField::EndDate, "End date is required.");
        } else if end.is_none() {
            errors.insert(PlannerField::EndDate, "End date must be a valid date.");
        }
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                errors.insert(PlannerField::EndDate, "End date must be after start date.");
            }
        }

        if !self.budget.trim().is_empty() {
            match self.budget.trim().parse::<f64>() {
                Ok(budget) if !budget.is_finite() => {
                    errors.insert(PlannerField::Budget, "Budget must be a number.");
                }
                Ok(budget) if budget < 0.0 => {
                    errors.insert(PlannerField::Budget, "Budget can't be negative.");
                }
                Ok(_) => {}
                Err(_) => {
                    errors.insert(PlannerField::Budget, "Budget must be a number.");
                }
            }
        }
        errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Inclusive number of days between the two dates, at least 1.
    pub fn trip_length(&self) -> Option<i64> {
        let start = parse_date(&self.start_date)?;
        let end = parse_date(&self.end_date)?;
        Some((end - start).num_days().max(0) + 1)
    }

    pub fn budget_amount(&self) -> Option<f64> {
        self.budget
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|budget| budget.is_finite())
    }
}

/// The read-only view shown after a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct TripSummary {
    pub destination: String,
    pub dates: String,
    pub budget: String,
    pub length: String,
    pub notes: String,
}

impl TripSummary {
    pub fn from_draft(draft: &TripDraft) -> Self {
        let length = match draft.trip_length() {
            Some(1) => "1 day".to_string(),
            Some(days) => format!("{} days", days),
            None => "—".to_string(),
        };
        Self {
            destination: draft.destination.clone(),
            dates: format!("{} → {}", draft.start_date, draft.end_date),
            budget: draft
                .budget_amount()
                .map(format_usd)
                .unwrap_or_else(|| "—".to_string()),
            length,
            notes: if draft.notes.is_empty() {
                "—".to_string()
            } else {
                draft.notes.clone()
            },
        }
    }
}

impl std::fmt::Display for TripSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Destination: {}", self.destination)?;
        writeln!(f, "Dates:       {}", self.dates)?;
        writeln!(f, "Budget:      {}", self.budget)?;
        writeln!(f, "Trip Length: {}", self.length)?;
        write!(f, "Notes:       {}", self.notes)
    }
}

/// Trip planner form state. Every edit is written through to the draft store.
pub struct TripPlanner<S: DraftStore> {
    store: S,
    draft: TripDraft,
    touched: BTreeSet<PlannerField>,
    submitted: Option<TripSummary>,
}

impl<S: DraftStore> TripPlanner<S> {
    /// Creates the form, restoring a saved draft if there is one.
    pub fn load(store: S) -> Self {
        let draft = load_draft(&store, PLANNER_DRAFT_KEY);
        Self {
            store,
            draft,
            touched: BTreeSet::new(),
            submitted: None,
        }
    }

    pub fn draft(&self) -> &TripDraft {
        &self.draft
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn summary(&self) -> Option<&TripSummary> {
        self.submitted.as_ref()
    }

    pub fn set_field(&mut self, field: PlannerField, value: impl Into<String>) {
        *self.draft.field_mut(field) = value.into();

        // A start date past the end date drags the end date along.
        if field == PlannerField::StartDate {
            if let (Some(start), Some(end)) = (
                parse_date(&self.draft.start_date),
                parse_date(&self.draft.end_date),
            ) {
                if end < start {
                    self.draft.end_date = self.draft.start_date.clone();
                }
            }
        }
        self.save();
    }

    /// Marks a field as visited so its error becomes visible.
    pub fn touch(&mut self, field: PlannerField) {
        self.touched.insert(field);
    }

    /// Errors of the fields the user already visited.
    pub fn visible_errors(&self) -> BTreeMap<PlannerField, &'static str> {
        self.draft
            .errors()
            .into_iter()
            .filter(|(field, _)| self.touched.contains(field))
            .collect()
    }

    pub fn trip_length(&self) -> Option<i64> {
        self.draft.trip_length()
    }

    /// Produces the summary if the form is valid; otherwise reveals every error.
    pub fn submit(&mut self) -> Result<&TripSummary, BTreeMap<PlannerField, &'static str>> {
        self.touched.extend(PlannerField::ALL.iter().copied());
        let errors = self.draft.errors();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(self.submitted.insert(TripSummary::from_draft(&self.draft)))
    }

    pub fn clear(&mut self) {
        self.draft = TripDraft::default();
        self.touched.clear();
        self.submitted = None;
        self.save();
    }

    fn save(&mut self) {
        save_draft(&mut self.store, PLANNER_DRAFT_KEY, &self.draft);
    }
}

#[cfg(test)]
fn draft(start: &str, end: &str) -> TripDraft {
    TripDraft {
        destination: "Tokyo".to_string(),
        start_date: start.to_string(),
        end_date: end.to_string(),
        ..TripDraft::default()
    }
}

#[test]
fn end_before_start_is_flagged() {
    let errors = draft("2026-05-10", "2026-05-09").errors();
    assert_eq!(
        errors.get(&PlannerField::EndDate),
        Some(&"End date must be after start date.")
    );

    let mut planner = TripPlanner::load(MemoryStore::new());
    planner.set_field(PlannerField::Destination, "Tokyo");
    planner.set_field(PlannerField::StartDate, "2026-05-10");
    planner.set_field(PlannerField::EndDate, "2026-05-01");
    let errors = planner.submit().unwrap_err();
    assert!(errors.contains_key(&PlannerField::EndDate));
    assert!(planner.summary().is_none());
}

#[test]
fn trip_length_is_inclusive() {
    assert_eq!(draft("2026-05-10", "2026-05-10").trip_length(), Some(1));
    assert_eq!(draft("2026-05-10", "2026-05-16").trip_length(), Some(7));
    assert_eq!(draft("2026-02-27", "2026-03-01").trip_length(), Some(3));
    assert_eq!(draft("2026-05-10", "").trip_length(), None);
}

#[test]
fn missing_and_malformed_fields_are_reported() {
    let errors = TripDraft {
        budget: "-5".to_string(),
        start_date: "tomorrow".to_string(),
        ..TripDraft::default()
    }
    .errors();
    assert_eq!(errors[&PlannerField::Destination], "Please enter a destination.");
    assert_eq!(errors[&PlannerField::StartDate], "Start date must be a valid date.");
    assert_eq!(errors[&PlannerField::EndDate], "End date is required.");
    assert_eq!(errors[&PlannerField::Budget], "Budget can't be negative.");

    let mut ok = draft("2026-05-10", "2026-05-12");
    ok.budget = "abc".to_string();
    assert_eq!(ok.errors()[&PlannerField::Budget], "Budget must be a number.");
    ok.budget = String::new();
    assert!(ok.is_valid());
}

#[test]
fn non_finite_budgets_are_rejected() {
    let mut trip = draft("2026-05-10", "2026-05-12");
    for budget in &["NaN", "inf", "-infinity", "1e400"] {
        trip.budget = budget.to_string();
        assert_eq!(
            trip.errors().get(&PlannerField::Budget),
            Some(&"Budget must be a number."),
            "{}",
            budget
        );
        assert_eq!(trip.budget_amount(), None);
    }
    trip.budget = "1e3".to_string();
    assert!(trip.is_valid());
    assert_eq!(trip.budget_amount(), Some(1000.0));
}

#[test]
fn errors_stay_hidden_until_touched() {
    let mut planner = TripPlanner::load(MemoryStore::new());
    assert!(planner.visible_errors().is_empty());
    planner.touch(PlannerField::Destination);
    assert_eq!(planner.visible_errors().len(), 1);
    let _ = planner.submit();
    assert_eq!(planner.visible_errors().len(), 3);
}

#[test]
fn moving_the_start_date_drags_the_end_date() {
    let mut planner = TripPlanner::load(MemoryStore::new());
    planner.set_field(PlannerField::StartDate, "2026-05-10");
    planner.set_field(PlannerField::EndDate, "2026-05-12");
    planner.set_field(PlannerField::StartDate, "2026-05-20");
    assert_eq!(planner.draft().end_date, "2026-05-20");
    assert_eq!(planner.trip_length(), Some(1));
}

#[test]
fn drafts_are_restored_on_reload() {
    let mut planner = TripPlanner::load(MemoryStore::new());
    planner.set_field(PlannerField::Destination, "Tokyo");
    let store = planner.into_store();

    let saved = store.get(PLANNER_DRAFT_KEY).unwrap().unwrap();
    assert!(saved.contains(r#""destination":"Tokyo""#));
    assert!(saved.contains(r#""startDate":"""#));

    let reloaded = TripPlanner::load(store);
    assert_eq!(reloaded.draft().destination, "Tokyo");
}

#[test]
fn unreadable_drafts_are_ignored() {
    let mut store = MemoryStore::new();
    store.set(PLANNER_DRAFT_KEY, "not json").unwrap();
    let planner = TripPlanner::load(store);
    assert_eq!(planner.draft(), &TripDraft::default());
}

#[test]
fn submission_produces_a_summary() {
    let mut planner = TripPlanner::load(MemoryStore::new());
    planner.set_field(PlannerField::Destination, "Tokyo, Japan");
    planner.set_field(PlannerField::StartDate, "2026-05-10");
    planner.set_field(PlannerField::EndDate, "2026-05-16");
    planner.set_field(PlannerField::Budget, "2000");

    let summary = planner.submit().unwrap().clone();
    assert_eq!(summary.dates, "2026-05-10 → 2026-05-16");
    assert_eq!(summary.budget, "$2,000");
    assert_eq!(summary.length, "7 days");
    assert_eq!(summary.notes, "—");

    planner.clear();
    assert!(planner.summary().is_none());
    assert_eq!(planner.draft(), &TripDraft::default());
}

#[test]
fn dollars_are_grouped_by_thousands() {
    assert_eq!(format_usd(0.0), "$0");
    assert_eq!(format_usd(999.6), "$1,000");
    assert_eq!(format_usd(1_234_567.0), "$1,234,567");
    assert_eq!(format_usd(-1500.0), "-$1,500");
}
