//! Assignments Lambda - publishes and serves the daily assignment notes.
//!
//! Endpoints:
//! - GET /assignments - List assignments, optionally filtered to a date range
//! - GET /assignments/{date} - Get the assignment for a date
//! - PUT /assignments/{date} - Create or update the assignment for a date
//! - DELETE /assignments/{date} - Delete the assignment for a date
//! - OPTIONS (any path) - CORS preflight

use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use shared::http::{error_response, json_response, preflight_response};
use shared::models::{ApiResponse, Assignment, ListResponse, PutAssignmentRequest};
use shared::parse_body;
use shared::{is_valid_date, AssignmentStore, Config};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Application state
struct AppState {
    store: AssignmentStore,
    config: Config,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let config = Config::from_env().map_err(|e| format!("Incomplete configuration: {}", e))?;

        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let secrets_client = aws_sdk_secretsmanager::Client::new(&aws_config);
        let credentials =
            shared::get_database_credentials(&secrets_client, &config.db_secret_arn).await?;

        let pool = shared::db::create_pool(&config, &credentials).await?;
        let store = AssignmentStore::new(pool);
        store.ensure_schema().await?;

        Ok(Self { store, config })
    }
}

/// Validated query parameters for the list endpoint.
#[derive(Debug, PartialEq, Eq)]
struct ListQuery {
    range: Option<(String, String)>,
    limit: i64,
}

impl ListQuery {
    fn contains(&self, date: &str) -> bool {
        match &self.range {
            Some((start, end)) => date >= start.as_str() && date <= end.as_str(),
            None => true,
        }
    }
}

/// Parse list query parameters. A `start` or `end` that is present but not a
/// valid date rejects the whole request; the range only applies when both
/// bounds are given. A non-numeric `limit` falls back to the default.
fn parse_list_query(
    start: Option<&str>,
    end: Option<&str>,
    limit: Option<&str>,
    default_limit: i64,
) -> Result<ListQuery, String> {
    for (name, value) in [("start", start), ("end", end)] {
        if let Some(value) = value {
            if !is_valid_date(value) {
                return Err(format!("Invalid query parameter: {}", name));
            }
        }
    }

    let range = match (start, end) {
        (Some(start), Some(end)) => Some((start.to_string(), end.to_string())),
        _ => None,
    };

    let limit = limit
        .and_then(|l| l.parse().ok())
        .filter(|l| *l > 0)
        .unwrap_or(default_limit);

    Ok(ListQuery { range, limit })
}

/// Extract the date segment from an `/assignments/{date}` path.
fn date_from_path(path: &str) -> Option<&str> {
    let date = path.strip_prefix("/assignments/")?;
    if date.is_empty() || date.contains('/') {
        return None;
    }
    Some(date)
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let raw_path = event.uri().path();
    // Strip /api stage prefix if present (API Gateway REST API includes stage in path)
    let path = raw_path.strip_prefix("/api").unwrap_or(raw_path);
    let method = event.method().as_str();

    info!("Received request: method={}, path={}", method, path);

    if method == "OPTIONS" {
        return preflight_response();
    }

    if let Some(date) = date_from_path(path) {
        if !is_valid_date(date) {
            return error_response(400, "Invalid date format");
        }
        return match method {
            "GET" => get_assignment(&state, date).await,
            "PUT" => put_assignment(&state, date, &event).await,
            "DELETE" => delete_assignment(&state, date).await,
            _ => error_response(405, "Method not allowed"),
        };
    }

    match (method, path) {
        ("GET", "/assignments") => list_assignments(&state, &event).await,
        (_, "/assignments") => error_response(405, "Method not allowed"),
        _ => error_response(404, "Not found"),
    }
}

async fn get_assignment(state: &AppState, date: &str) -> Result<Response<Body>, Error> {
    match state.store.get(date).await {
        Ok(Some(record)) => json_response(200, &ApiResponse::success(record)),
        Ok(None) => json_response(
            200,
            &ApiResponse::<Assignment>::success_with_message(None, "No assignment for this date"),
        ),
        Err(e) => {
            error!("Failed to fetch assignment for {}: {}", date, e);
            error_response(500, "Internal server error")
        }
    }
}

async fn put_assignment(
    state: &AppState,
    date: &str,
    event: &Request,
) -> Result<Response<Body>, Error> {
    let request: PutAssignmentRequest = parse_body!(event.body());
    let content = request.content.trim();
    if content.is_empty() {
        return error_response(400, "Assignment content must not be empty");
    }

    match state.store.put(date, content).await {
        Ok(result) => {
            info!(
                "{} assignment for {}",
                if result.created { "Created" } else { "Updated" },
                date
            );
            let message = if result.created {
                "Assignment created"
            } else {
                "Assignment updated"
            };
            json_response(
                200,
                &ApiResponse::success_with_message(Some(result.record), message),
            )
        }
        Err(e) => {
            error!("Failed to store assignment for {}: {}", date, e);
            error_response(500, "Internal server error")
        }
    }
}

async fn delete_assignment(state: &AppState, date: &str) -> Result<Response<Body>, Error> {
    match state.store.delete(date).await {
        Ok(true) => {
            info!("Deleted assignment for {}", date);
            json_response(
                200,
                &ApiResponse::<()>::success_with_message(None, "Assignment deleted"),
            )
        }
        Ok(false) => error_response(404, "No assignment for this date"),
        Err(e) => {
            error!("Failed to delete assignment for {}: {}", date, e);
            error_response(500, "Internal server error")
        }
    }
}

async fn list_assignments(state: &AppState, event: &Request) -> Result<Response<Body>, Error> {
    let params = event.query_string_parameters();
    let query = match parse_list_query(
        params.first("start"),
        params.first("end"),
        params.first("limit"),
        state.config.page_size,
    ) {
        Ok(query) => query,
        Err(message) => return error_response(400, message),
    };

    let keys = match state.store.list_keys(query.limit).await {
        Ok(keys) => keys,
        Err(e) => {
            error!("Failed to list assignment keys: {}", e);
            return error_response(500, "Internal server error");
        }
    };
    let total = keys.len();

    let mut records = Vec::new();
    for key in &keys {
        if !query.contains(key) {
            continue;
        }
        match state.store.get(key).await {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {} // deleted between list and get
            Err(e) => warn!("Skipping unreadable assignment {}: {}", key, e),
        }
    }

    // Newest first
    records.sort_by(|a, b| b.date.cmp(&a.date));

    json_response(
        200,
        &ListResponse {
            success: true,
            count: records.len(),
            total,
            data: records,
        },
    )
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new().await?);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
