// src/fetch.rs
// =============================================================================
// Retrieves the page we are going to analyse.
//
// This is the only fetch whose failure is fatal: if the page itself cannot
// be downloaded, or answers with anything but a success status, there is
// nothing to analyse and the whole run stops.
// =============================================================================

use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::config::InspectorConfig;
use crate::error::{AnalysisError, Result};

// Validates the base URL before any network activity happens
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| AnalysisError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AnalysisError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

// Builds the HTTP client used for the page download.
// Probes get their own client (see health::probe) with the probe timeout.
pub fn build_client(config: &InspectorConfig) -> Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.fetch_timeout)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(AnalysisError::Client)
}

// Downloads the page and returns its body as text.
//
// Errors:
//   Fetch  - transport failure (DNS, connect, timeout, ...)
//   Status - the server answered with a non-success status
//   Parse  - the body could not be read/decoded
pub async fn fetch_document(client: &Client, url: &str) -> Result<String> {
    info!(url, "fetching page");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| AnalysisError::Fetch {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(AnalysisError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| AnalysisError::Parse {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    debug!(url, bytes = body.len(), "page downloaded");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(AnalysisError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_parse_base_url_rejects_non_http() {
        assert!(matches!(
            parse_base_url("ftp://x.test/"),
            Err(AnalysisError::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_success_returns_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string("<html><title>Hi</title></html>"),
            )
            .mount(&mock_server)
            .await;

        let client = build_client(&InspectorConfig::default()).unwrap();
        let body = fetch_document(&client, &format!("{}/", mock_server.uri()))
            .await
            .unwrap();

        assert!(body.contains("<title>Hi</title>"));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_fatal() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = build_client(&InspectorConfig::default()).unwrap();
        let err = fetch_document(&client, &mock_server.uri()).await.unwrap_err();

        assert!(matches!(err, AnalysisError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_fatal() {
        // Nothing listens on port 1 of the loopback interface
        let client = build_client(&InspectorConfig::default()).unwrap();
        let err = fetch_document(&client, "http://127.0.0.1:1/")
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::Fetch { .. }));
    }
}
