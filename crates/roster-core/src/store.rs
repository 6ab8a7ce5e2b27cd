//! The `PersonStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use crate::person::{NewPerson, Person, PersonUpdate};

/// Abstraction over a person directory backend.
///
/// Lookups by id distinguish "no such row" (`Ok(None)`) from backend failure
/// (`Err`); mutations of a nonexistent id report `Ok(None)` rather than
/// succeeding with zero rows affected.
pub trait PersonStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// List every person, ordered by ascending id.
  fn list_persons(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Retrieve a person by id. Returns `None` if not found.
  fn get_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Persist a new person and return it with its store-assigned id.
  fn add_person(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Overlay `update` onto the row matching `id` and return the result.
  /// Returns `None` if no row matched.
  fn update_person(
    &self,
    id: i64,
    update: PersonUpdate,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Remove the row matching `id`, returning its last stored values.
  /// Returns `None` if no row matched.
  fn delete_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;
}
