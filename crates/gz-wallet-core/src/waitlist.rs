//! Waitlist signup, kept only in the visitor's browser storage.

use regex::Regex;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::info;

use crate::error::WaitlistError;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Plain-text key/value storage (`localStorage` in the browser).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), WaitlistError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), WaitlistError> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Border hint for the email field while typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldHint {
    Neutral,
    Invalid,
}

impl FieldHint {
    pub fn for_input(value: &str) -> Self {
        if !value.is_empty() && !is_valid_email(value) {
            FieldHint::Invalid
        } else {
            FieldHint::Neutral
        }
    }

    pub fn border_color(self) -> &'static str {
        match self {
            FieldHint::Neutral => "rgba(255, 255, 255, 0.1)",
            FieldHint::Invalid => "rgba(255, 100, 100, 0.5)",
        }
    }
}

pub struct Waitlist<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> Waitlist<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Email saved by an earlier visit, if any.
    pub fn existing(&self) -> Option<String> {
        self.store.get(&self.key).filter(|email| !email.is_empty())
    }

    pub fn join(&self, email: &str) -> Result<String, WaitlistError> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(WaitlistError::InvalidEmail(email.to_owned()));
        }
        self.store.set(&self.key, email)?;
        info!(email, "joined waitlist");
        Ok(email.to_owned())
    }
}
