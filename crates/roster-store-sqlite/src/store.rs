//! [`SqliteStore`] — the SQLite implementation of [`PersonStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use roster_core::{
  person::{NewPerson, Person, PersonUpdate},
  store::PersonStore,
};

use crate::{Error, Result, schema::SCHEMA};

const SELECT_PERSON: &str =
  "SELECT id, first_name, last_name, email FROM persons WHERE id = ?1";

fn person_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Person> {
  Ok(Person {
    id:         row.get(0)?,
    first_name: row.get(1)?,
    last_name:  row.get(2)?,
    email:      row.get(3)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person directory backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = Error;

  async fn list_persons(&self) -> Result<Vec<Person>> {
    let persons = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, first_name, last_name, email FROM persons ORDER BY id ASC",
        )?;
        let rows = stmt
          .query_map([], person_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(persons)
  }

  async fn get_person(&self, id: i64) -> Result<Option<Person>> {
    let person = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(SELECT_PERSON, rusqlite::params![id], person_from_row)
            .optional()?,
        )
      })
      .await?;
    Ok(person)
  }

  async fn add_person(&self, input: NewPerson) -> Result<Person> {
    let person = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO persons (first_name, last_name, email) VALUES (?1, ?2, ?3)",
          rusqlite::params![input.first_name, input.last_name, input.email],
        )?;
        Ok(Person {
          id:         conn.last_insert_rowid(),
          first_name: input.first_name,
          last_name:  input.last_name,
          email:      input.email,
        })
      })
      .await?;
    Ok(person)
  }

  async fn update_person(
    &self,
    id: i64,
    update: PersonUpdate,
  ) -> Result<Option<Person>> {
    // Fetch, overlay, and write back inside one closure so both statements
    // run back-to-back on the connection thread.
    let person = self
      .conn
      .call(move |conn| {
        let existing = conn
          .query_row(SELECT_PERSON, rusqlite::params![id], person_from_row)
          .optional()?;

        let Some(mut person) = existing else {
          return Ok(None);
        };
        update.apply_to(&mut person);

        conn.execute(
          "UPDATE persons SET first_name = ?1, last_name = ?2, email = ?3
           WHERE id = ?4",
          rusqlite::params![
            person.first_name,
            person.last_name,
            person.email,
            id
          ],
        )?;

        Ok(Some(person))
      })
      .await?;
    Ok(person)
  }

  async fn delete_person(&self, id: i64) -> Result<Option<Person>> {
    let person = self
      .conn
      .call(move |conn| {
        let existing = conn
          .query_row(SELECT_PERSON, rusqlite::params![id], person_from_row)
          .optional()?;

        let Some(person) = existing else {
          return Ok(None);
        };
        conn.execute("DELETE FROM persons WHERE id = ?1", rusqlite::params![id])?;

        Ok(Some(person))
      })
      .await?;
    Ok(person)
  }
}
