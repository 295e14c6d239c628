use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::path::Path;

/// A shared travel story.
#[derive(Debug, Clone, PartialEq)]
pub struct Adventure {
    pub id: u64,
    pub name: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub story: String,
    /// `data:` URL of the attached photo, if any.
    pub photo: Option<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AdventureField {
    Name,
    Destination,
    StartDate,
    EndDate,
    Story,
}

/// Guesses an image MIME type from a file name.
pub fn image_mime_type(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("avif") => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Encodes file contents as a `data:` URL suitable for a local preview.
pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, BASE64.encode(bytes))
}

/// The share-an-adventure form and the session feed below it.
#[derive(Debug, Default)]
pub struct AdventureBoard {
    name: String,
    destination: String,
    start_date: String,
    end_date: String,
    story: String,
    photo: Option<String>,
    feed: Vec<Adventure>,
    next_id: u64,
}

impl AdventureBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, field: AdventureField, value: impl Into<String>) {
        let value = value.into();
        match field {
            AdventureField::Name => self.name = value,
            AdventureField::Destination => self.destination = value,
            AdventureField::StartDate => self.start_date = value,
            AdventureField::EndDate => self.end_date = value,
            AdventureField::Story => self.story = value,
        }
    }

    pub fn field(&self, field: AdventureField) -> &str {
        match field {
            AdventureField::Name => &self.name,
            AdventureField::Destination => &self.destination,
            AdventureField::StartDate => &self.start_date,
            AdventureField::EndDate => &self.end_date,
            AdventureField::Story => &self.story,
        }
    }

    /// Submission is enabled exactly when every text field and both dates are filled in.
    pub fn can_submit(&self) -> bool {
        [
            &self.name,
            &self.destination,
            &self.start_date,
            &self.end_date,
            &self.story,
        ]
        .iter()
        .all(|v| !v.trim().is_empty())
    }

    /// Attaches a photo from memory, producing its preview.
    pub fn attach_photo(&mut self, file_name: &str, bytes: &[u8]) -> &str {
        let preview = data_url(image_mime_type(file_name), bytes);
        self.photo.insert(preview).as_str()
    }

    /// Attaches a photo read from disk.
    pub fn attach_photo_file(&mut self, path: impl AsRef<Path>) -> std::io::Result<&str> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        Ok(self.attach_photo(&file_name, &bytes))
    }

    pub fn photo_preview(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    pub fn remove_photo(&mut self) {
        self.photo = None;
    }

    /// Moves the form into the feed and resets it. Does nothing while the form is incomplete.
    pub fn submit(&mut self) -> Option<&Adventure> {
        if !self.can_submit() {
            return None;
        }
        self.next_id += 1;
        let adventure = Adventure {
            id: self.next_id,
            name: std::mem::take(&mut self.name),
            destination: std::mem::take(&mut self.destination),
            start_date: std::mem::take(&mut self.start_date),
            end_date: std::mem::take(&mut self.end_date),
            story: std::mem::take(&mut self.story),
            photo: self.photo.take(),
        };
        log::debug!("Shared adventure #{} to {}.", adventure.id, adventure.destination);
        self.feed.insert(0, adventure);
        self.feed.first()
    }

    pub fn feed(&self) -> &[Adventure] {
        &self.feed
    }

    /// Leaving the page forgets every story shared in this session.
    pub fn leave(&mut self) {
        self.feed.clear();
    }
}

#[cfg(test)]
fn filled() -> AdventureBoard {
    let mut board = AdventureBoard::new();
    board.set_field(AdventureField::Name, "Ana");
    board.set_field(AdventureField::Destination, "Paris, France");
    board.set_field(AdventureField::StartDate, "2026-06-01");
    board.set_field(AdventureField::EndDate, "2026-06-07");
    board.set_field(AdventureField::Story, "Croissants every morning.");
    board
}

#[test]
fn submit_tracks_every_required_field() {
    let fields = [
        AdventureField::Name,
        AdventureField::Destination,
        AdventureField::StartDate,
        AdventureField::EndDate,
        AdventureField::Story,
    ];
    assert!(filled().can_submit());
    for field in fields.iter() {
        let mut board = filled();
        board.set_field(*field, "   ");
        assert!(!board.can_submit(), "{:?} left blank", field);
        assert!(board.submit().is_none());
    }
}

#[test]
fn stories_are_prepended_and_the_form_resets() {
    let mut board = filled();
    board.attach_photo("eiffel.PNG", b"\x89PNG");
    let first = board.submit().unwrap().clone();
    assert_eq!(first.photo.as_deref(), Some("data:image/png;base64,iVBORw=="));
    assert_eq!(board.field(AdventureField::Name), "");
    assert!(board.photo_preview().is_none());
    assert!(!board.can_submit());

    board.set_field(AdventureField::Name, "Ben");
    board.set_field(AdventureField::Destination, "Kyoto");
    board.set_field(AdventureField::StartDate, "2026-09-01");
    board.set_field(AdventureField::EndDate, "2026-09-03");
    board.set_field(AdventureField::Story, "Temples at dawn.");
    let second = board.submit().unwrap().clone();
    assert!(second.id > first.id);
    assert!(second.photo.is_none());
    assert_eq!(board.feed().len(), 2);
    assert_eq!(board.feed()[1], first);

    board.leave();
    assert!(board.feed().is_empty());
}

#[test]
fn mime_types_follow_the_extension() {
    assert_eq!(image_mime_type("a.jpeg"), "image/jpeg");
    assert_eq!(image_mime_type("a.JPG"), "image/jpeg");
    assert_eq!(image_mime_type("noext"), "application/octet-stream");
}

#[test]
fn photos_can_be_read_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("harbour.gif");
    std::fs::write(&path, b"GIF89a").unwrap();
    let mut board = AdventureBoard::new();
    let preview = board.attach_photo_file(&path).unwrap().to_string();
    assert_eq!(preview, "data:image/gif;base64,R0lGODlh");
}
