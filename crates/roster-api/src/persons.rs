//! Handlers for `/users` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/users` | All persons, ascending id |
//! | `POST`   | `/users` | Body: [`NewPerson`]; returns 201 + created person |
//! | `GET`    | `/users/:id` | 404 if not found |
//! | `PUT`    | `/users/:id` | Body: [`PersonUpdate`]; absent fields keep their value |
//! | `DELETE` | `/users/:id` | Returns the deleted person's prior values |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  person::{NewPerson, Person, PersonUpdate},
  store::PersonStore,
};
use serde::Serialize;

use crate::error::ApiError;

/// JSON envelope returned by the mutating handlers.
#[derive(Debug, Serialize)]
pub struct PersonMessage {
  pub message: &'static str,
  pub person:  Person,
}

fn parse_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
  let Path(id) = path.map_err(|e| ApiError::BadRequest(e.to_string()))?;
  Ok(id)
}

fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
  let Json(value) = body.map_err(|e| ApiError::BadRequest(e.to_string()))?;
  Ok(value)
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /users`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Person>>, ApiError>
where
  S: PersonStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let persons = store
    .list_persons()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(persons))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /users` — body: `{"first_name":…,"last_name":…,"email":…}`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewPerson>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PersonStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input = parse_body(body)?;
  let person = store
    .add_person(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((
    StatusCode::CREATED,
    Json(PersonMessage { message: "Person created", person }),
  ))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /users/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Person>, ApiError>
where
  S: PersonStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let id = parse_id(path)?;
  let person = store
    .get_person(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("person {id} not found")))?;
  Ok(Json(person))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /users/:id` — body may carry any subset of the person's fields.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<i64>, PathRejection>,
  body: Result<Json<PersonUpdate>, JsonRejection>,
) -> Result<Json<PersonMessage>, ApiError>
where
  S: PersonStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let id = parse_id(path)?;
  let update = parse_body(body)?;
  let person = store
    .update_person(id, update)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("person {id} not found")))?;
  Ok(Json(PersonMessage { message: "Person updated", person }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /users/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<i64>, PathRejection>,
) -> Result<Json<PersonMessage>, ApiError>
where
  S: PersonStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let id = parse_id(path)?;
  let person = store
    .delete_person(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("person {id} not found")))?;
  Ok(Json(PersonMessage { message: "Person deleted", person }))
}
