// Back-office HTTP client
//
// Wraps `reqwest::Client` with resource URL construction and response
// handling. The per-resource CRUD surface lives in `resources.rs` as
// inherent methods so this module stays focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Default mount point of the back-office REST resources.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/Locapart/resources/";

/// Maximum number of body bytes quoted in error messages.
const BODY_PREVIEW: usize = 200;

/// Raw HTTP client for the back-office resources.
///
/// Every path is resolved against `base_url`, so `"ville"` becomes
/// `{base_url}/ville`. List calls decode a JSON array; mutation calls
/// tolerate empty bodies and only decode an echoed entity when the
/// server sends one.
#[derive(Debug, Clone)]
pub struct LocapartClient {
    http: reqwest::Client,
    base_url: Url,
}

impl LocapartClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The resource base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/{path}`, tolerating a missing or doubled slash.
    pub(crate) fn resource_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the whole body as `T`.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await?;
        let body = Self::checked_body(resp).await?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }

    /// Send a POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<Option<T>, Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).json(body).send().await?;
        Self::mutation_body(resp).await
    }

    /// Send a PUT request with a JSON body.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<Option<T>, Error> {
        debug!("PUT {}", url);
        let resp = self.http.put(url).json(body).send().await?;
        Self::mutation_body(resp).await
    }

    /// Send a DELETE request.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);
        let resp = self.http.delete(url).send().await?;
        Self::checked_body(resp).await.map(drop)
    }

    /// Send a body-less GET that performs a mutation (`/{resource}/delete/{id}`).
    pub(crate) async fn get_command(&self, url: Url) -> Result<(), Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        Self::checked_body(resp).await.map(drop)
    }

    // ── Response handling ────────────────────────────────────────────

    /// Reject non-2xx responses, returning the body text otherwise.
    async fn checked_body(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                message: if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_owned()
                } else {
                    preview(&body).to_owned()
                },
            });
        }

        Ok(resp.text().await?)
    }

    /// Decode the echoed entity of a mutation, if there is one.
    ///
    /// Empty bodies and bodies that are not an entity object yield `None`;
    /// the server is not required to echo anything.
    async fn mutation_body<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<Option<T>, Error> {
        let body = Self::checked_body(resp).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value @ serde_json::Value::Object(_)) => match serde_json::from_value(value) {
                Ok(entity) => Ok(Some(entity)),
                Err(e) => {
                    trace!(error = %e, "mutation echo does not decode as an entity");
                    Ok(None)
                }
            },
            _ => {
                trace!("mutation response carried no entity object");
                Ok(None)
            }
        }
    }
}

/// Clip `body` to at most `BODY_PREVIEW` bytes on a char boundary.
fn preview(body: &str) -> &str {
    if body.len() <= BODY_PREVIEW {
        return body;
    }
    let mut end = BODY_PREVIEW;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> LocapartClient {
        LocapartClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn resource_url_joins_with_single_slash() {
        let c = client("http://localhost:8080/Locapart/resources/");
        assert_eq!(
            c.resource_url("ville").unwrap().as_str(),
            "http://localhost:8080/Locapart/resources/ville"
        );

        let c = client("http://localhost:8080/Locapart/resources");
        assert_eq!(
            c.resource_url("/appartement/delete/4").unwrap().as_str(),
            "http://localhost:8080/Locapart/resources/appartement/delete/4"
        );
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let body = "é".repeat(150);
        let clipped = preview(&body);
        assert!(clipped.len() <= BODY_PREVIEW);
        assert!(body.starts_with(clipped));
    }
}
