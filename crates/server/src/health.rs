use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use haggle_core::Seller;
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    pub catalog: Arc<Vec<Seller>>,
    pub provisioner_mode: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub catalog: HealthCheck,
    pub voice_agent: HealthCheck,
    pub checked_at: String,
}

pub fn router(state: HealthState) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let catalog = catalog_check(&state.catalog);
    let ready = catalog.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "haggle-server runtime initialized".to_string(),
        },
        catalog,
        voice_agent: HealthCheck {
            status: "ready",
            detail: format!("provisioner mode: {}", state.provisioner_mode),
        },
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

fn catalog_check(catalog: &[Seller]) -> HealthCheck {
    if catalog.is_empty() {
        HealthCheck { status: "degraded", detail: "seller catalog is empty".to_string() }
    } else {
        HealthCheck { status: "ready", detail: format!("{} sellers loaded", catalog.len()) }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode, Json};
    use haggle_core::catalog::demo_sellers;

    use crate::health::{health, HealthState};

    #[tokio::test]
    async fn health_returns_ready_with_a_populated_catalog() {
        let state =
            HealthState { catalog: Arc::new(demo_sellers()), provisioner_mode: "noop" };

        let (status, Json(payload)) = health(State(state)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "ready");
        assert_eq!(payload.catalog.status, "ready");
        assert!(payload.voice_agent.detail.contains("noop"));
    }

    #[tokio::test]
    async fn health_degrades_when_the_catalog_is_empty() {
        let state = HealthState { catalog: Arc::new(Vec::new()), provisioner_mode: "noop" };

        let (status, Json(payload)) = health(State(state)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(payload.status, "degraded");
        assert_eq!(payload.catalog.status, "degraded");
    }
}
