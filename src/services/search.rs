use crate::models::SearchHit;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling the semantic search service
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Search service returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Lowercase a query and collapse its whitespace
///
/// The same form is sent to the search service and used as the cache key,
/// so queries sharing a cache entry also share a remote result.
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Debug, Serialize)]
struct SearchPayload<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct SearchPayloadResponse {
    breeds: Vec<SearchHit>,
}

/// Client for a remote embedding-based breed search service
///
/// The service takes `{"query": "..."}` and answers
/// `{"breeds": [{"breed": "...", "score": 0.42}, ...]}` ordered by
/// similarity. Results still have to be merged against the local catalog.
#[derive(Debug, Clone)]
pub struct SemanticSearchClient {
    endpoint: String,
    client: Client,
}

impl SemanticSearchClient {
    /// Create a new search client
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SearchError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run a search and return at most `limit` hits
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError> {
        let query = normalize_query(query);
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        tracing::debug!("Searching {} for: {}", self.endpoint, query);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&SearchPayload { query: &query })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::ApiError(format!("{}: {}", status, body)));
        }

        let body = response.bytes().await?;
        let payload: SearchPayloadResponse = serde_json::from_slice(&body)
            .map_err(|e| SearchError::InvalidResponse(format!("Failed to parse hits: {}", e)))?;

        let mut hits = payload.breeds;
        hits.truncate(limit);

        tracing::debug!("Search service returned {} hits", hits.len());
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> SemanticSearchClient {
        SemanticSearchClient::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_search_parses_hits() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(mockito::Matcher::Json(serde_json::json!({"query": "calm lap dog"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"breeds": [{"breed": "Pug", "score": 0.61}, {"breed": "Maltese", "score": 0.58}]}"#)
            .create_async()
            .await;

        let hits = client(&server.url()).search("  calm lap dog ", 10).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            hits,
            vec![
                SearchHit { breed: "Pug".to_string(), score: 0.61 },
                SearchHit { breed: "Maltese".to_string(), score: 0.58 },
            ]
        );
    }

    #[tokio::test]
    async fn test_search_sends_normalized_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(mockito::Matcher::Json(serde_json::json!({"query": "calm dog"})))
            .with_status(200)
            .with_body(r#"{"breeds": []}"#)
            .create_async()
            .await;

        let hits = client(&server.url()).search("  Calm \t DOG ", 10).await.unwrap();

        mock.assert_async().await;
        assert!(hits.is_empty());
    }

    #[test]
    fn test_normalize_query_matches_cache_key() {
        assert_eq!(normalize_query("  Calm \t DOG "), "calm dog");
        assert_eq!(
            crate::services::CacheKey::search("  Calm \t DOG "),
            format!("search:{}", normalize_query("calm dog"))
        );
    }

    #[tokio::test]
    async fn test_search_truncates_to_limit() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"breeds": [{"breed": "A", "score": 0.9}, {"breed": "B", "score": 0.8}, {"breed": "C", "score": 0.7}]}"#)
            .create_async()
            .await;

        let hits = client(&server.url()).search("anything", 2).await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn test_search_rejects_empty_query() {
        // No server: the request must never be sent
        let result = client("http://127.0.0.1:9").search("   ", 10).await;
        assert!(matches!(result, Err(SearchError::EmptyQuery)));
    }

    #[tokio::test]
    async fn test_search_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(500)
            .with_body("model not loaded")
            .create_async()
            .await;

        let result = client(&server.url()).search("big dog", 10).await;
        assert!(matches!(result, Err(SearchError::ApiError(msg)) if msg.contains("model not loaded")));
    }

    #[tokio::test]
    async fn test_search_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"results": []}"#)
            .create_async()
            .await;

        let result = client(&server.url()).search("big dog", 10).await;
        assert!(matches!(result, Err(SearchError::InvalidResponse(_))));
    }
}
