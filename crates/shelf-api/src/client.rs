//! Catalog API client.

use reqwest::Url;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use shelf_model::{Book, Bookshelf, PaginationParams};

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("shelf/", env!("CARGO_PKG_VERSION"));

/// Client for the catalog REST API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: Url,
    user_id: String,
}

impl CatalogClient {
    /// Creates a client from injected configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(config.base_url.clone()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            user_id: config.user_id.clone(),
        })
    }

    /// Lists the configured user's shelves.
    pub async fn bookshelves(&self, params: PaginationParams) -> Result<Vec<Bookshelf>> {
        let url = self.endpoint(&["users", &self.user_id, "shelves"], params)?;
        self.get_json(url).await
    }

    /// Resolves a shelf to the ordered form ids it contains.
    pub async fn shelf_book_ids(
        &self,
        shelf_id: &str,
        params: PaginationParams,
    ) -> Result<Vec<String>> {
        let url = self.endpoint(&["shelves", shelf_id, "forms"], params)?;
        self.get_json(url).await
    }

    /// Fetches the full record of one form.
    pub async fn book_details(&self, form_id: &str) -> Result<Book> {
        let url = self.endpoint(&["forms", form_id], PaginationParams::default())?;
        self.get_json(url).await
    }

    /// Builds an endpoint URL below the base URL, percent-encoding segments.
    pub(crate) fn endpoint(&self, segments: &[&str], params: PaginationParams) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        let pairs = params.query_pairs();
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in &pairs {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!(url = %url, "GET");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: format!(
                    "API Error: {}",
                    status.canonical_reason().unwrap_or("Unknown status")
                ),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Answers the first request on a loopback port with `response` and
    /// returns the base URL to reach it.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = vec![0u8; 4096];
            let _ = socket.read(&mut request).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}")
    }

    fn client(base_url: &str) -> CatalogClient {
        CatalogClient::new(&ApiConfig::default().with_base_url(base_url)).unwrap()
    }

    #[test]
    fn test_client_creation() {
        assert!(CatalogClient::new(&ApiConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let config = ApiConfig::default().with_base_url("not a url");
        assert!(matches!(
            CatalogClient::new(&config),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_shelves_url() {
        let client = client("https://api.glose.com");
        let url = client
            .endpoint(
                &["users", "u1", "shelves"],
                PaginationParams::with_limit(100),
            )
            .unwrap();
        assert_eq!(url.as_str(), "https://api.glose.com/users/u1/shelves?limit=100");
    }

    #[test]
    fn test_url_keeps_base_path_and_encodes_segments() {
        let client = client("http://localhost:8080/api/");
        let url = client
            .endpoint(&["forms", "a b/c"], PaginationParams::default())
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/forms/a%20b%2Fc");
    }

    #[tokio::test]
    async fn test_not_found_maps_to_status_error() {
        let base_url = serve_once(
            "HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;

        let err = client(&base_url).book_details("missing").await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert!(matches!(
            &err,
            ApiError::Status { message, .. } if message == "API Error: Not Found"
        ));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_server_error_is_retryable() {
        let base_url = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;

        let err = client(&base_url)
            .shelf_book_ids("s1", PaginationParams::default())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(503));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_decode_error() {
        let base_url = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 9\r\nconnection: close\r\n\r\nnot json!",
        )
        .await;

        let err = client(&base_url).book_details("f1").await.unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_shelf_ids_decode_in_order() {
        let base_url = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 13\r\nconnection: close\r\n\r\n[\"b\",\"a\",\"c\"]",
        )
        .await;

        let ids = client(&base_url)
            .shelf_book_ids("s1", PaginationParams::with_limit(50))
            .await
            .unwrap();

        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
