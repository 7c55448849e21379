//! HTTP route handlers for the suggestion API.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::suggestions::{
    ResponseParser, SuggestionError, SuggestionService, Suggestions, select_response_parser,
};

use super::state::AppState;

/// Create the API router with all routes.
#[must_use]
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/engines", get(list_engines))
        .route("/api/suggestions", get(get_suggestions))
        .route("/api/suggestions/parse", post(parse_response))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "search-suggestions",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Search engine DTO.
#[derive(Debug, Serialize)]
pub struct EngineDto {
    /// Engine display name.
    pub name: String,
    /// Parser applied to this engine's responses.
    pub parser: ResponseParser,
    /// Whether the engine has a suggestion endpoint.
    pub supports_suggestions: bool,
}

/// List registered engines.
async fn list_engines(State(state): State<Arc<AppState>>) -> Json<Vec<EngineDto>> {
    let engines = state
        .service
        .engines()
        .into_iter()
        .map(|engine| EngineDto {
            name: engine.name.clone(),
            parser: engine.response_parser(),
            supports_suggestions: engine.can_provide_suggestions(),
        })
        .collect();
    Json(engines)
}

/// Suggestion query parameters.
#[derive(Debug, Deserialize)]
pub struct SuggestionParams {
    /// Engine display name.
    pub engine: String,
    /// Text typed so far.
    pub q: String,
}

/// Handle suggestion requests.
async fn get_suggestions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestionParams>,
) -> Result<Json<Suggestions>, (StatusCode, String)> {
    let suggestions = state
        .service
        .suggest(&params.engine, &params.q)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(suggestions))
}

/// Raw response parse request.
#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    /// Engine display name, used only to select the parser.
    pub engine: String,
    /// Raw response body from the engine's suggestion endpoint.
    pub body: String,
}

/// Raw response parse result.
#[derive(Debug, Serialize)]
pub struct ParseResponse {
    /// Engine display name from the request.
    pub engine: String,
    /// Parser that was applied.
    pub parser: ResponseParser,
    /// Extracted suggestions.
    pub suggestions: Vec<String>,
}

/// Parse a raw suggestion response with the engine's parser.
async fn parse_response(
    Json(request): Json<ParseRequest>,
) -> Result<Json<ParseResponse>, (StatusCode, String)> {
    let suggestions = SuggestionService::parse_raw(&request.engine, &request.body)
        .map_err(|e| error_response(&e.into()))?;

    Ok(Json(ParseResponse {
        parser: select_response_parser(&request.engine),
        engine: request.engine,
        suggestions,
    }))
}

/// Map a suggestion error to an HTTP status and message.
fn error_response(err: &SuggestionError) -> (StatusCode, String) {
    let status = match err {
        SuggestionError::UnknownEngine(_) => StatusCode::NOT_FOUND,
        SuggestionError::SuggestionsUnsupported(_) => StatusCode::BAD_REQUEST,
        SuggestionError::Parse(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SuggestionError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        SuggestionError::HttpRequest(_) | SuggestionError::HttpStatus(_) => StatusCode::BAD_GATEWAY,
        SuggestionError::HttpClient(_)
        | SuggestionError::InvalidUrl(_)
        | SuggestionError::Config(_)
        | SuggestionError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::warn!("Suggestion request failed: {err}");
    }

    (status, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;
    use url::Url;

    use crate::suggestions::{SearchEngine, SuggestionConfig, SuggestionFetcher};

    struct CannedFetcher;

    #[async_trait]
    impl SuggestionFetcher for CannedFetcher {
        async fn fetch(&self, url: &Url) -> Result<String, SuggestionError> {
            match url.host_str() {
                Some("broken.test") => Ok("<html>".to_string()),
                Some("busy.test") => Err(SuggestionError::RateLimited(30)),
                _ => Ok(r#"["fire",["firefox","fire tv"]]"#.to_string()),
            }
        }
    }

    fn state() -> Option<Arc<AppState>> {
        let config = SuggestionConfig::new()
            .with_engine(SearchEngine::new("Local").with_suggest_url("http://local.test/?q={searchTerms}"))
            .with_engine(SearchEngine::new("Broken").with_suggest_url("http://broken.test/?q={searchTerms}"))
            .with_engine(SearchEngine::new("Busy").with_suggest_url("http://busy.test/?q={searchTerms}"))
            .with_engine(SearchEngine::new("Azerdict"));
        SuggestionService::with_fetcher(config, Arc::new(CannedFetcher))
            .ok()
            .map(AppState::from_service)
    }

    async fn call(request: Request<Body>) -> (StatusCode, Value) {
        let Some(state) = state() else {
            return (StatusCode::INTERNAL_SERVER_ERROR, Value::Null);
        };
        let response = match create_router(state).oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap_or_default()
    }

    fn parse_request(body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/suggestions/parse")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_engines_listing() {
        let (status, body) = call(get_request("/api/engines")).await;
        assert_eq!(status, StatusCode::OK);

        let engines = body.as_array().cloned().unwrap_or_default();
        let azerdict = engines.iter().find(|e| e["name"] == "Azerdict");
        assert_eq!(azerdict.map(|e| e["parser"].clone()), Some(Value::from("azerdict")));
        assert_eq!(
            azerdict.map(|e| e["supports_suggestions"].clone()),
            Some(Value::from(false))
        );
    }

    #[tokio::test]
    async fn test_suggestions() {
        let (status, body) = call(get_request("/api/suggestions?engine=Local&q=fire")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["engine"], "Local");
        assert_eq!(body["query"], "fire");
        assert_eq!(body["suggestions"], serde_json::json!(["firefox", "fire tv"]));
    }

    #[tokio::test]
    async fn test_suggestion_error_statuses() {
        let cases = [
            ("/api/suggestions?engine=Missing&q=a", StatusCode::NOT_FOUND),
            ("/api/suggestions?engine=Azerdict&q=a", StatusCode::BAD_REQUEST),
            ("/api/suggestions?engine=Broken&q=a", StatusCode::UNPROCESSABLE_ENTITY),
            ("/api/suggestions?engine=Busy&q=a", StatusCode::TOO_MANY_REQUESTS),
        ];
        for (uri, expected) in cases {
            let (status, _) = call(get_request(uri)).await;
            assert_eq!(status, expected, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_parse_endpoint() {
        let request = serde_json::json!({
            "engine": "Qwant",
            "body": r#"{"data":{"items":[{"value":"p"},{"value":"q"}]}}"#,
        });
        let (status, body) = call(parse_request(&request)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["parser"], "qwant");
        assert_eq!(body["suggestions"], serde_json::json!(["p", "q"]));
    }

    #[tokio::test]
    async fn test_parse_endpoint_rejects_malformed_body() {
        let request = serde_json::json!({"engine": "Azerdict", "body": r#"{"items":[]}"#});
        let (status, _) = call(parse_request(&request)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_error_response_message() {
        let (status, message) = error_response(&SuggestionError::UnknownEngine("X".to_string()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "unknown search engine: X");
    }
}
