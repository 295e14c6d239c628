use crate::*;
use std::time::{Duration, Instant};

pub const CONTACT_THANKS: &str = "Thanks for reaching out! We'll get back to you soon.";
pub const BANNER_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

/// The "Get in touch" form on the about page.
#[derive(Debug, Default)]
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
    banner_until: Option<Instant>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
        }
    }

    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    /// Fields that would stop the browser from submitting.
    pub fn invalid_fields(&self) -> Vec<ContactField> {
        let mut invalid = vec![];
        if self.name.trim().is_empty() {
            invalid.push(ContactField::Name);
        }
        if !is_valid_email(&self.email) {
            invalid.push(ContactField::Email);
        }
        if self.message.trim().is_empty() {
            invalid.push(ContactField::Message);
        }
        invalid
    }

    /// Sends the message at `now`. The form clears and the thank-you banner shows for five seconds.
    pub fn submit(&mut self, now: Instant) -> Result<(), Vec<ContactField>> {
        let invalid = self.invalid_fields();
        if !invalid.is_empty() {
            return Err(invalid);
        }
        log::info!("Contact message from {} <{}>.", self.name, self.email);
        self.name.clear();
        self.email.clear();
        self.message.clear();
        self.banner_until = Some(now + BANNER_DURATION);
        Ok(())
    }

    pub fn banner(&self, now: Instant) -> Option<&'static str> {
        match self.banner_until {
            Some(until) if now < until => Some(CONTACT_THANKS),
            _ => None,
        }
    }
}

#[test]
fn banner_expires_after_five_seconds() {
    let mut form = ContactForm::new();
    form.set_field(ContactField::Name, "Ana");
    form.set_field(ContactField::Email, "ana@example.com");
    form.set_field(ContactField::Message, "Loved the Kyoto guide!");

    let now = Instant::now();
    assert_eq!(form.banner(now), None);
    form.submit(now).unwrap();

    assert_eq!(form.field(ContactField::Message), "");
    assert_eq!(form.banner(now + Duration::from_secs(4)), Some(CONTACT_THANKS));
    assert_eq!(form.banner(now + BANNER_DURATION), None);
}

#[test]
fn incomplete_messages_are_held_back() {
    let mut form = ContactForm::new();
    form.set_field(ContactField::Email, "not-an-address");
    let now = Instant::now();
    assert_eq!(
        form.submit(now),
        Err(vec![ContactField::Name, ContactField::Email, ContactField::Message])
    );
    assert_eq!(form.field(ContactField::Email), "not-an-address");
    assert_eq!(form.banner(now), None);
}
