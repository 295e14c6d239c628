use crate::*;
use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

pub const PLAN_TRIP_DRAFT_KEY: &str = "tripmind:plan-trip";
pub const ITINERARY_CONFIRMATION: &str = "Generating your personalized itinerary! 🎉";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlanTripField {
    Destination,
    StartDate,
    EndDate,
    Budget,
}

#[derive(Debug, Error, PartialEq)]
pub enum PlanTripError {
    #[error("'{0}' is not one of the offered interests")]
    UnknownInterest(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanTripDraft {
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: String,
    pub interests: Vec<String>,
}

/// The "Plan Your Dream Trip" form with its interest picker.
pub struct PlanTripForm<S: DraftStore> {
    store: S,
    draft: PlanTripDraft,
}

impl<S: DraftStore> PlanTripForm<S> {
    pub fn load(store: S) -> Self {
        let draft = load_draft(&store, PLAN_TRIP_DRAFT_KEY);
        Self { store, draft }
    }

    pub fn draft(&self) -> &PlanTripDraft {
        &self.draft
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn set_field(&mut self, field: PlanTripField, value: impl Into<String>) {
        let value = value.into();
        match field {
            PlanTripField::Destination => self.draft.destination = value,
            PlanTripField::StartDate => self.draft.start_date = value,
            PlanTripField::EndDate => self.draft.end_date = value,
            PlanTripField::Budget => self.draft.budget = value,
        }
        save_draft(&mut self.store, PLAN_TRIP_DRAFT_KEY, &self.draft);
    }

    /// Selects an interest or deselects it if it was selected. Returns whether it is selected now.
    pub fn toggle_interest(&mut self, id: &str) -> Result<bool, PlanTripError> {
        if find_interest(id).is_none() {
            return Err(PlanTripError::UnknownInterest(id.to_string()));
        }
        let selected = match self.draft.interests.iter().position(|i| i == id) {
            Some(index) => {
                self.draft.interests.remove(index);
                false
            }
            None => {
                self.draft.interests.push(id.to_string());
                true
            }
        };
        save_draft(&mut self.store, PLAN_TRIP_DRAFT_KEY, &self.draft);
        Ok(selected)
    }

    /// Required fields that are still blank.
    pub fn missing_fields(&self) -> Vec<PlanTripField> {
        let draft = &self.draft;
        vec![
            (PlanTripField::Destination, &draft.destination),
            (PlanTripField::StartDate, &draft.start_date),
            (PlanTripField::EndDate, &draft.end_date),
            (PlanTripField::Budget, &draft.budget),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn submit(&self) -> Result<&'static str, Vec<PlanTripField>> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(missing);
        }
        log::info!(
            "Itinerary requested for {} with interests {:?}.",
            self.draft.destination,
            self.draft.interests
        );
        Ok(ITINERARY_CONFIRMATION)
    }
}

#[test]
fn interests_toggle_on_and_off() {
    let mut form = PlanTripForm::load(MemoryStore::new());
    assert_eq!(form.toggle_interest("food"), Ok(true));
    assert_eq!(form.toggle_interest("beach"), Ok(true));
    assert_eq!(form.toggle_interest("food"), Ok(false));
    assert_eq!(form.draft().interests, vec!["beach".to_string()]);
    assert_eq!(
        form.toggle_interest("karaoke"),
        Err(PlanTripError::UnknownInterest("karaoke".to_string()))
    );
}

#[test]
fn every_field_is_required() {
    let mut form = PlanTripForm::load(MemoryStore::new());
    form.set_field(PlanTripField::Destination, "Kyoto");
    assert_eq!(
        form.submit(),
        Err(vec![
            PlanTripField::StartDate,
            PlanTripField::EndDate,
            PlanTripField::Budget
        ])
    );
    form.set_field(PlanTripField::StartDate, "2026-04-01");
    form.set_field(PlanTripField::EndDate, "2026-04-08");
    form.set_field(PlanTripField::Budget, "3500");
    assert_eq!(form.submit(), Ok(ITINERARY_CONFIRMATION));
}

#[test]
fn plan_trip_draft_uses_its_own_key() {
    let mut form = PlanTripForm::load(MemoryStore::new());
    form.set_field(PlanTripField::Destination, "Kyoto");
    form.toggle_interest("culture").unwrap();
    let store = form.into_store();
    assert!(store.get(PLANNER_DRAFT_KEY).unwrap().is_none());

    let reloaded = PlanTripForm::load(store);
    assert_eq!(reloaded.draft().destination, "Kyoto");
    assert_eq!(reloaded.draft().interests, vec!["culture".to_string()]);
}
