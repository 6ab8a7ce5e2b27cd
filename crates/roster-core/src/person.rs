//! Person — the single managed entity.
//!
//! A person is a flat four-field record. The id is assigned by storage on
//! insert and is never mutated or reused afterwards; the remaining fields are
//! all optional free-form strings.

use serde::{Deserialize, Serialize};

/// A stored person row, as persisted and as serialized on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub id:         i64,
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub email:      Option<String>,
}

/// Input for creating a person. The id is chosen by the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPerson {
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub email:      Option<String>,
}

/// Input for updating a person. Fields left absent keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonUpdate {
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub email:      Option<String>,
}

impl PersonUpdate {
  /// Overlay the provided fields onto `person`, leaving the rest untouched.
  pub fn apply_to(self, person: &mut Person) {
    if let Some(first_name) = self.first_name {
      person.first_name = Some(first_name);
    }
    if let Some(last_name) = self.last_name {
      person.last_name = Some(last_name);
    }
    if let Some(email) = self.email {
      person.email = Some(email);
    }
  }
}
