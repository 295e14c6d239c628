use crate::*;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::time::Duration;

pub const MIN_PASSWORD_CHARS: usize = 6;

/// Waits for a while. Lets the simulated sign-in run without real sleeps in tests.
pub trait Timer {
    fn sleep(&self, duration: Duration);
}

/// Sleeps on the current thread.
pub struct ThreadTimer;

impl Timer for ThreadTimer {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoginState {
    Idle,
    Authenticating,
    Succeeded,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LoginDelays {
    /// How long the pretend round trip takes.
    pub authenticate: Duration,
    /// How long the success state is shown before going home.
    pub redirect: Duration,
}

impl Default for LoginDelays {
    fn default() -> Self {
        Self {
            authenticate: Duration::from_millis(2000),
            redirect: Duration::from_millis(1500),
        }
    }
}

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("the email pattern is valid")
});

/// Checks an address against `^[^\s@]+@[^\s@]+\.[^\s@]+$`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

#[derive(Debug)]
pub struct LoginForm {
    email: String,
    password: String,
    errors: BTreeMap<LoginField, &'static str>,
    state: LoginState,
    delays: LoginDelays,
}

impl LoginForm {
    pub fn new(delays: LoginDelays) -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            errors: BTreeMap::new(),
            state: LoginState::Idle,
            delays,
        }
    }

    pub fn state(&self) -> LoginState {
        self.state
    }

    pub fn errors(&self) -> &BTreeMap<LoginField, &'static str> {
        &self.errors
    }

    /// Updates a field and clears the error shown for it.
    pub fn set_field(&mut self, field: LoginField, value: impl Into<String>) {
        match field {
            LoginField::Email => self.email = value.into(),
            LoginField::Password => self.password = value.into(),
        }
        self.errors.remove(&field);
    }

    pub fn validate(&self) -> BTreeMap<LoginField, &'static str> {
        let mut errors = BTreeMap::new();
        if self.email.is_empty() {
            errors.insert(LoginField::Email, "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.insert(LoginField::Email, "Please enter a valid email address");
        }
        if self.password.is_empty() {
            errors.insert(LoginField::Password, "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_CHARS {
            errors.insert(LoginField::Password, "Password must be at least 6 characters");
        }
        errors
    }

    /// Runs the simulated sign-in and returns where to go afterwards.
    ///
    /// `on_state` sees every state the form passes through. No credentials are checked.
    pub fn submit(
        &mut self,
        timer: &dyn Timer,
        mut on_state: impl FnMut(LoginState),
    ) -> Result<Route, BTreeMap<LoginField, &'static str>> {
        let errors = self.validate();
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(errors);
        }

        self.state = LoginState::Authenticating;
        on_state(self.state);
        timer.sleep(self.delays.authenticate);

        self.state = LoginState::Succeeded;
        log::info!("Signed in as {}.", self.email);
        on_state(self.state);
        timer.sleep(self.delays.redirect);

        Ok(Route::Home)
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new(LoginDelays::default())
    }
}

#[cfg(test)]
#[derive(Default)]
struct RecordingTimer(std::cell::RefCell<Vec<Duration>>);

#[cfg(test)]
impl Timer for RecordingTimer {
    fn sleep(&self, duration: Duration) {
        self.0.borrow_mut().push(duration);
    }
}

#[test]
fn valid_credentials_take_the_success_path() {
    let timer = RecordingTimer::default();
    let mut form = LoginForm::default();
    form.set_field(LoginField::Email, "user@example.com");
    form.set_field(LoginField::Password, "abcdef");

    let mut states = vec![];
    let route = form.submit(&timer, |s| states.push(s)).unwrap();

    assert_eq!(route, Route::Home);
    assert_eq!(states, vec![LoginState::Authenticating, LoginState::Succeeded]);
    assert_eq!(form.state(), LoginState::Succeeded);
    assert_eq!(
        *timer.0.borrow(),
        vec![Duration::from_millis(2000), Duration::from_millis(1500)]
    );
}

#[test]
fn malformed_email_blocks_submission() {
    let timer = RecordingTimer::default();
    let mut form = LoginForm::default();
    form.set_field(LoginField::Email, "bad-email");
    form.set_field(LoginField::Password, "abcdef");

    let errors = form.submit(&timer, |_| {}).unwrap_err();
    assert_eq!(errors[&LoginField::Email], "Please enter a valid email address");
    assert!(!errors.contains_key(&LoginField::Password));
    assert_eq!(form.state(), LoginState::Idle);
    assert!(timer.0.borrow().is_empty());

    form.set_field(LoginField::Email, "user@example.com");
    assert!(form.errors().is_empty());
}

#[test]
fn missing_and_short_fields_are_reported() {
    let mut form = LoginForm::default();
    let errors = form.validate();
    assert_eq!(errors[&LoginField::Email], "Email is required");
    assert_eq!(errors[&LoginField::Password], "Password is required");

    form.set_field(LoginField::Password, "abcde");
    assert_eq!(
        form.validate()[&LoginField::Password],
        "Password must be at least 6 characters"
    );
}

#[test]
fn email_pattern_matches_the_usual_shape() {
    for ok in &["a@b.co", "first.last@sub.example.org", "x@y.z.w", "a@b..c", "a@.b.c"] {
        assert!(is_valid_email(ok), "{}", ok);
    }
    for bad in &["", "@b.co", "a@", "a@b", "a@.b", "a@b.", "a b@c.d", "a@b@c.d", "a@b .c"] {
        assert!(!is_valid_email(bad), "{}", bad);
    }
}
