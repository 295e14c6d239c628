use serde::de::DeserializeOwned;
use thiserror::Error;

/// Why a lookup against one of the public endpoints failed.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The server answered with a non-success status.
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },
    /// The request never produced a server response.
    #[error("request to {url} could not be sent: {reason}")]
    Transport { url: String, reason: String },
    /// The body could not be read or did not have the expected shape.
    #[error("response from {url} could not be decoded: {reason}")]
    Decode { url: String, reason: String },
}

/// Performs a GET request and decodes the JSON body.
pub fn fetch_json<T: DeserializeOwned>(url: &str, user_agent: &str) -> Result<T, LookupError> {
    log::debug!("GET {}", url);
    let response = ureq::get(url)
        .set("User-Agent", user_agent)
        .set("Accept", "application/json")
        .call();

    if response.synthetic() {
        let reason = response.status_line().to_string();
        log::warn!("Http request to {} failed. Reason:\r\n{}", url, reason);
        return Err(LookupError::Transport {
            url: url.to_string(),
            reason,
        });
    }

    if !response.ok() {
        log::warn!(
            "Http request to {} failed. Reason:\r\n{:?}",
            url,
            response.status()
        );
        return Err(LookupError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let body = response.into_string().map_err(|e| {
        log::warn!("Could not read http response for {}. Reason:\r\n{}", url, e);
        LookupError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        }
    })?;

    serde_json::from_str(&body).map_err(|e| LookupError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Joins an endpoint root and a path without doubling the slash.
pub fn join_url(endpoint: &str, path: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[test]
fn join_url_handles_trailing_and_leading_slashes() {
    assert_eq!(
        join_url("https://nominatim.openstreetmap.org/", "/search"),
        "https://nominatim.openstreetmap.org/search"
    );
    assert_eq!(join_url("http://a", "b"), "http://a/b");
}

#[test]
fn errors_render_the_url() {
    let error = LookupError::Status {
        url: "http://a/b".to_string(),
        status: 503,
    };
    assert_eq!(
        error.to_string(),
        "request to http://a/b failed with status 503"
    );
}
