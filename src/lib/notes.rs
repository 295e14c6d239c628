use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum NoteError {
    #[error("a note needs some text")]
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: u64,
    pub text: String,
    /// Creation date as shown to the user, e.g. `Oct 16, 2026`.
    pub date: String,
}

/// In-memory trip notes, newest first.
#[derive(Debug, Default)]
pub struct NoteList {
    notes: Vec<Note>,
    last_id: u64,
}

impl NoteList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn add(&mut self, text: &str) -> Result<&Note, NoteError> {
        self.add_at(text, chrono::Local::now().naive_local())
    }

    /// Adds a note created at `now`. The text is kept exactly as typed.
    pub fn add_at(&mut self, text: &str, now: NaiveDateTime) -> Result<&Note, NoteError> {
        if text.trim().is_empty() {
            return Err(NoteError::Empty);
        }
        // Ids come from the creation time but must stay unique within the list.
        let millis = now.and_utc().timestamp_millis().max(0) as u64;
        let id = millis.max(self.last_id + 1);
        self.last_id = id;

        self.notes.insert(
            0,
            Note {
                id,
                text: text.to_string(),
                date: now.format("%b %-d, %Y").to_string(),
            },
        );
        Ok(&self.notes[0])
    }

    /// Removes the note with `id`. Returns whether a note was removed.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        before != self.notes.len()
    }
}

#[cfg(test)]
fn at(date: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S").unwrap()
}

#[test]
fn notes_are_prepended_with_a_readable_date() {
    let mut list = NoteList::new();
    list.add_at("Book the ryokan", at("2026-10-16 09:00:00")).unwrap();
    let note = list.add_at("Buy a JR pass\n", at("2026-10-17 10:30:00")).unwrap().clone();

    assert_eq!(note.date, "Oct 17, 2026");
    assert_eq!(note.text, "Buy a JR pass\n");
    assert_eq!(list.notes()[0], note);
    assert_eq!(list.notes()[1].text, "Book the ryokan");
}

#[test]
fn blank_notes_are_refused() {
    let mut list = NoteList::new();
    assert_eq!(list.add("   \n\t").unwrap_err(), NoteError::Empty);
    assert!(list.is_empty());
}

#[test]
fn ids_stay_unique_within_the_same_instant() {
    let mut list = NoteList::new();
    let now = at("2026-10-16 09:00:00");
    let first = list.add_at("one", now).unwrap().id;
    let second = list.add_at("two", now).unwrap().id;
    assert!(second > first);

    assert!(list.delete(first));
    assert!(!list.delete(first));
    assert_eq!(list.len(), 1);
    assert_eq!(list.notes()[0].id, second);
}
