//! JSON REST API for the roster person directory.
//!
//! Exposes an axum [`Router`] backed by any [`roster_core::store::PersonStore`].
//! TLS and transport concerns are the caller's responsibility.

pub mod error;
pub mod persons;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use roster_core::store::PersonStore;
use serde::Serialize;

pub use error::ApiError;

/// Payload of `GET /`.
#[derive(Debug, Serialize)]
struct WelcomeMessage {
  service: &'static str,
  version: &'static str,
  message: &'static str,
}

/// `GET /`
async fn welcome() -> Json<WelcomeMessage> {
  Json(WelcomeMessage {
    service: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
    message: "Welcome!",
  })
}

/// Build a fully-materialised router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn router<S>(store: Arc<S>) -> Router<()>
where
  S: PersonStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/", get(welcome))
    .route("/users", get(persons::list::<S>).post(persons::create::<S>))
    .route(
      "/users/{id}",
      get(persons::get_one::<S>)
        .put(persons::update_one::<S>)
        .delete(persons::delete_one::<S>),
    )
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use roster_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn make_store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::open_in_memory().await.unwrap())
  }

  async fn oneshot_raw(
    store:  Arc<SqliteStore>,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(json) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(json.to_string())
      }
      None => Body::empty(),
    };
    let req = builder.body(body).unwrap();
    router(store).oneshot(req).await.unwrap()
  }

  async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  fn ada() -> Value {
    json!({
      "first_name": "Ada",
      "last_name":  "Lovelace",
      "email":      "ada@example.com",
    })
  }

  // ── Welcome ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn welcome_returns_service_metadata() {
    let resp = oneshot_raw(make_store().await, "GET", "/", None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    assert_eq!(body["message"], "Welcome!");
    assert_eq!(body["service"], "roster-api");
    assert!(body["version"].is_string());
  }

  // ── List ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_on_empty_table_returns_empty_array() {
    let resp = oneshot_raw(make_store().await, "GET", "/users", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!([]));
  }

  #[tokio::test]
  async fn list_returns_persons_in_id_order() {
    let store = make_store().await;
    for name in ["Ada", "Grace", "Edsger"] {
      let resp = oneshot_raw(
        store.clone(),
        "POST",
        "/users",
        Some(json!({ "first_name": name })),
      )
      .await;
      assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = oneshot_raw(store, "GET", "/users", None).await;
    let body = json_body(resp).await;
    let ids: Vec<i64> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|p| p["id"].as_i64().unwrap())
      .collect();
    assert_eq!(ids, vec![1, 2, 3]);
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_assigns_id_and_echoes_fields() {
    let resp =
      oneshot_raw(make_store().await, "POST", "/users", Some(ada())).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = json_body(resp).await;
    assert_eq!(body["message"], "Person created");
    assert_eq!(body["person"]["id"], 1);
    assert_eq!(body["person"]["first_name"], "Ada");
    assert_eq!(body["person"]["last_name"], "Lovelace");
    assert_eq!(body["person"]["email"], "ada@example.com");
  }

  #[tokio::test]
  async fn create_with_malformed_body_returns_400() {
    let store = make_store().await;
    let req = Request::builder()
      .method("POST")
      .uri("/users")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();
    let resp = router(store).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = json_body(resp).await;
    assert!(body["error"].is_string());
  }

  // ── Get one ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_after_create_returns_same_person() {
    let store = make_store().await;
    let created = json_body(
      oneshot_raw(store.clone(), "POST", "/users", Some(ada())).await,
    )
    .await;

    let resp = oneshot_raw(store, "GET", "/users/1", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, created["person"]);
  }

  #[tokio::test]
  async fn get_missing_person_returns_404_with_json_error() {
    let resp = oneshot_raw(make_store().await, "GET", "/users/1", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body = json_body(resp).await;
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn get_with_non_numeric_id_returns_400() {
    let resp =
      oneshot_raw(make_store().await, "GET", "/users/abc", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = json_body(resp).await;
    assert!(body["error"].is_string());
  }

  // ── Update ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_with_subset_of_fields_keeps_the_rest() {
    let store = make_store().await;
    oneshot_raw(store.clone(), "POST", "/users", Some(ada())).await;

    let resp = oneshot_raw(
      store.clone(),
      "PUT",
      "/users/1",
      Some(json!({ "email": "ada@newmail.com" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["message"], "Person updated");

    let fetched =
      json_body(oneshot_raw(store, "GET", "/users/1", None).await).await;
    assert_eq!(fetched["first_name"], "Ada");
    assert_eq!(fetched["last_name"], "Lovelace");
    assert_eq!(fetched["email"], "ada@newmail.com");
  }

  #[tokio::test]
  async fn update_missing_person_returns_404() {
    let resp = oneshot_raw(
      make_store().await,
      "PUT",
      "/users/9",
      Some(json!({ "email": "nobody@example.com" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Delete ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_returns_prior_values_then_get_returns_404() {
    let store = make_store().await;
    oneshot_raw(store.clone(), "POST", "/users", Some(ada())).await;

    let resp = oneshot_raw(store.clone(), "DELETE", "/users/1", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["message"], "Person deleted");
    assert_eq!(body["person"]["email"], "ada@example.com");

    let resp = oneshot_raw(store, "GET", "/users/1", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn delete_missing_person_returns_404() {
    let resp =
      oneshot_raw(make_store().await, "DELETE", "/users/9", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
