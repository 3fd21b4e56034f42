use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use rand::Rng;
use serde::Deserialize;
use serde_json::{json, Value};

use super::state::AppState;
use crate::error::{BabelError, Result};
use crate::library::coordinate::{BOOKS_PER_HEXAGON, SHELVES, VOLUMES, WALLS};
use crate::library::{Book, Coordinate};
use crate::search::{SearchMode, SearchOutcome};

/// Largest hexagon `/api/random-book` picks, so ids stay exact in JavaScript clients.
const MAX_RANDOM_HEXAGON: u64 = (1 << 53) - 1;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub mode: Option<String>,
    /// Kept loose so a non-integer count is reported as a bad limit.
    #[serde(default)]
    pub max_results: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ExploreParams {
    pub limit: Option<i64>,
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "mode": state.config().library.mode.as_str(),
        "enhancedEnabled": state.search().enhanced_enabled(),
    }))
}

/// POST /api/search
pub async fn search(
    State(state): State<AppState>,
    body: std::result::Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(request) = body.map_err(|e| BabelError::InvalidRequest(e.body_text()))?;

    let mode = match request.mode.as_deref() {
        Some(m) => m.parse::<SearchMode>()?,
        None => state.default_mode(),
    };
    let max_results = request.max_results.as_ref().map(json_limit).transpose()?;

    tracing::info!(query = %request.query, mode = %mode, "search");
    let outcome = state.search().search(&request.query, mode, max_results).await?;
    Ok(Json(search_body(&state, outcome)))
}

/// GET /api/book/{hexagon}/{wall}/{shelf}/{volume}
///
/// Out-of-range components are rejected rather than wrapped.
pub async fn book(
    State(state): State<AppState>,
    path: std::result::Result<Path<(String, String, String, String)>, PathRejection>,
) -> Result<Json<Book>> {
    let Path((hexagon, wall, shelf, volume)) =
        path.map_err(|e| BabelError::InvalidCoordinate(e.body_text()))?;
    let coordinate = Coordinate::parse_parts(&hexagon, &wall, &shelf, &volume)?;
    generate(&state, coordinate).await.map(Json)
}

/// GET /api/random-book
pub async fn random_book(State(state): State<AppState>) -> Result<Json<Book>> {
    let coordinate = {
        let mut rng = rand::rng();
        Coordinate::wrapping(
            rng.random_range(0..=MAX_RANDOM_HEXAGON),
            rng.random_range(0..i64::from(WALLS)),
            rng.random_range(0..i64::from(SHELVES)),
            rng.random_range(0..i64::from(VOLUMES)),
        )
    };
    tracing::debug!(coordinate = %coordinate.id(), "random book");
    generate(&state, coordinate).await.map(Json)
}

/// GET /api/concepts
pub async fn concepts(State(state): State<AppState>) -> Json<Value> {
    let vocab = state.library().vocabulary();
    Json(json!({
        "concepts": vocab.concept_names(),
        "fields": vocab.field_names(),
        "adjectives": vocab.adjectives,
        "genres": vocab.genres,
        "modes": SearchMode::ALL.iter().map(|m| m.as_str()).collect::<Vec<_>>(),
        "geometry": geometry(),
    }))
}

/// GET /api/explore/{concept}?limit=n
pub async fn explore(
    State(state): State<AppState>,
    Path(concept): Path<String>,
    params: std::result::Result<Query<ExploreParams>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(params) = params.map_err(|e| BabelError::InvalidLimit(e.body_text()))?;
    let limit = params.limit.map(positive_limit).transpose()?;

    tracing::info!(concept = %concept, "explore");
    let outcome = state
        .search()
        .search(&concept, SearchMode::Precise, limit)
        .await?;
    let mut body = search_body(&state, outcome);
    body["concept"] = Value::String(concept);
    Ok(Json(body))
}

async fn generate(state: &AppState, coordinate: Coordinate) -> Result<Book> {
    let library = state.library_arc();
    let book = tokio::task::spawn_blocking(move || library.generate_book(&coordinate)).await?;
    Ok(book)
}

fn positive_limit(raw: i64) -> Result<usize> {
    match usize::try_from(raw) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(BabelError::InvalidLimit(format!(
            "maxResults must be a positive integer, got {raw}"
        ))),
    }
}

fn json_limit(raw: &Value) -> Result<usize> {
    match raw.as_i64() {
        Some(n) => positive_limit(n),
        None => Err(BabelError::InvalidLimit(format!(
            "maxResults must be a positive integer, got {raw}"
        ))),
    }
}

fn geometry() -> Value {
    json!({
        "walls": WALLS,
        "shelves": SHELVES,
        "volumes": VOLUMES,
        "booksPerHexagon": BOOKS_PER_HEXAGON,
        "hexagons": "unbounded",
    })
}

fn search_body(state: &AppState, outcome: SearchOutcome) -> Value {
    let algorithm = if outcome.external {
        "external-collaborator"
    } else {
        "concept-hash-probe"
    };
    let explanation = if outcome.external {
        "Results were supplied by the external search collaborator.".to_string()
    } else {
        format!(
            "Each query term is hashed to an unsigned 32-bit value. The hash picks a hexagon, \
             and rotations of it pick the wall, shelf and volume. Books at each probe and up to \
             {} volumes either side on the same shelf were generated and scored; \
             {} books were examined in total.",
            state.search().engine().settings().neighbor_span,
            outcome.total_explored
        )
    };

    json!({
        "query": outcome.query,
        "results": outcome.results,
        "metadata": {
            "library": {
                "mode": state.config().library.mode.as_str(),
                "infinite": true,
                "procedural": !outcome.external,
            },
            "search": {
                "algorithm": algorithm,
                "mode": outcome.mode.as_str(),
                "requestedMode": outcome.requested_mode.as_str(),
                "totalExplored": outcome.total_explored,
                "truncated": outcome.truncated,
                "fallback": outcome.fallback_reason.is_some(),
                "fallbackReason": outcome.fallback_reason,
            },
        },
        "educational": {
            "geometry": geometry(),
            "probes": outcome.probes,
            "explanation": explanation,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_must_be_positive() {
        assert_eq!(positive_limit(5).unwrap(), 5);
        assert!(matches!(positive_limit(0), Err(BabelError::InvalidLimit(_))));
        assert!(matches!(positive_limit(-3), Err(BabelError::InvalidLimit(_))));
    }

    #[test]
    fn non_integer_limits_are_limit_errors() {
        assert_eq!(json_limit(&json!(7)).unwrap(), 7);
        for raw in [json!(1e20), json!(2.5), json!("five"), json!(-1)] {
            assert!(matches!(json_limit(&raw), Err(BabelError::InvalidLimit(_))), "{raw}");
        }
    }

    #[test]
    fn geometry_reports_books_per_hexagon() {
        assert_eq!(geometry()["booksPerHexagon"], 640);
        assert_eq!(geometry()["walls"], 4);
    }
}
