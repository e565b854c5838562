//! API utilities for frontend-backend communication
//!
//! Every helper returns `Result<T, String>`: the error is ready to be shown
//! to the operator (server message when the backend sent one).

use contracts::shared::api_response::{ApiEnvelope, Pagination};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::shared::config::client_config;

pub const LOAD_FAILED: &str = "Error al cargar los datos";

/// Base URL for API requests
///
/// Empty `[api] base_url` means the same origin as the page, so paths stay
/// relative.
pub fn api_base() -> String {
    client_config().api.base_url.trim_end_matches('/').to_string()
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/tickets/api/ticket/15");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Path with an optional query string
pub fn with_query(path: &str, query: &str) -> String {
    let query = query.trim_start_matches('?');
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

fn ajax(builder: RequestBuilder) -> RequestBuilder {
    builder
        .header("X-Requested-With", "XMLHttpRequest")
        .header("Accept", "application/json")
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        let status = response.status();
        // backend кладёт причину в message даже при 4xx/5xx
        let message = response
            .json::<ApiEnvelope<serde_json::Value>>()
            .await
            .ok()
            .and_then(|env| env.message)
            .map(|m| m.text())
            .filter(|m| !m.trim().is_empty());
        return Err(message.unwrap_or_else(|| format!("HTTP error: {}", status)));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    log::debug!("GET {}", url);
    let response = ajax(Request::get(url))
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    read_json(response).await
}

/// POST `application/x-www-form-urlencoded`
pub async fn post_form<B: Serialize, T: DeserializeOwned>(url: &str, body: &B) -> Result<T, String> {
    let encoded =
        serde_qs::to_string(body).map_err(|e| format!("Failed to encode form: {}", e))?;
    log::debug!("POST {} ({})", url, encoded);
    let response = ajax(Request::post(url))
        .header("Content-Type", "application/x-www-form-urlencoded; charset=UTF-8")
        .body(encoded)
        .map_err(|e| format!("Failed to build request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    read_json(response).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(url: &str, body: &B) -> Result<T, String> {
    log::debug!("POST {}", url);
    let response = ajax(Request::post(url))
        .json(body)
        .map_err(|e| format!("Failed to encode body: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    read_json(response).await
}

/// GET of an enveloped endpoint: `data` plus optional pagination
pub async fn fetch_envelope<T: DeserializeOwned>(
    url: &str,
) -> Result<(T, Option<Pagination>), String> {
    let envelope: ApiEnvelope<T> = get_json(url).await?;
    envelope.into_result(LOAD_FAILED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_query() {
        assert_eq!(with_query("/a", ""), "/a");
        assert_eq!(with_query("/a", "?page=2"), "/a?page=2");
        assert_eq!(with_query("/a", "page=2&state=Asignado"), "/a?page=2&state=Asignado");
    }

    #[test]
    fn test_api_url_same_origin_by_default() {
        assert_eq!(api_url("/tickets/api/warranty"), "/tickets/api/warranty");
    }
}
