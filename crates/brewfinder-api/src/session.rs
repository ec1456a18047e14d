// Transport session
//
// Executes canonical request descriptors over HTTP. The session holds the
// shared state every call depends on: the API base URL (set once at
// bootstrap) and the auth token (stored by the domain client after login,
// attached to every subsequent request). The session itself never mutates
// the token as part of a call.

use std::sync::RwLock;

use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::request::{Fields, RequestSpec};
use crate::transport::TransportConfig;

/// Response envelope surfaced when a caller opts out of data-only unwrapping
/// (e.g. logout, photo upload — callers need the status, not the payload).
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    pub status: reqwest::StatusCode,
    pub headers: reqwest::header::HeaderMap,
    pub data: Value,
}

/// Explicitly constructed transport state. One session per client; no
/// module-level globals.
///
/// Token mutation is not synchronized beyond the lock itself: if two logins
/// race, the last writer wins and later calls carry whichever token landed
/// last.
pub struct Session {
    http: reqwest::Client,
    base_url: Url,
    /// Auth token returned by login. Attached verbatim as the
    /// `Authorization` header value — the backend expects no scheme prefix.
    auth_token: RwLock<Option<String>>,
}

impl Session {
    /// Create a session from the bootstrap base URL and transport settings.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            auth_token: RwLock::new(None),
        }
    }

    /// The API base URL relative request paths resolve against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── Auth token state ─────────────────────────────────────────────

    /// Store the token attached to every subsequent request.
    pub fn set_auth_token(&self, token: String) {
        debug!("auth token updated");
        *self.auth_token.write().expect("auth token lock poisoned") = Some(token);
    }

    /// Drop the stored token; subsequent requests go out unauthenticated.
    pub fn clear_auth_token(&self) {
        debug!("auth token cleared");
        *self.auth_token.write().expect("auth token lock poisoned") = None;
    }

    /// The currently stored token, if any.
    pub fn auth_token(&self) -> Option<String> {
        self.auth_token
            .read()
            .expect("auth token lock poisoned")
            .clone()
    }

    // ── Request execution ────────────────────────────────────────────

    /// Execute a canonical descriptor and return the full envelope.
    ///
    /// Relative URLs resolve against the session base URL; absolute URLs
    /// bypass it (the reverse-geocode call depends on this). Non-success
    /// statuses become [`Error::Http`] carrying the status and raw body.
    pub async fn perform(&self, spec: RequestSpec) -> Result<ResponseEnvelope, Error> {
        let url = self.resolve_url(&spec.url)?;
        debug!(method = %spec.method, %url, "performing request");

        let mut req = self.http.request(spec.method, url);
        if let Some(query) = &spec.query {
            req = req.query(&query_pairs(query));
        }
        if let Some(body) = &spec.body {
            req = req.json(body);
        }
        if let Some(timeout) = spec.timeout {
            req = req.timeout(timeout);
        }

        // an explicit per-request Authorization header wins over the stored token
        let explicit_auth = spec
            .headers
            .keys()
            .any(|k| k.eq_ignore_ascii_case("authorization"));
        if !explicit_auth {
            req = self.apply_auth(req)?;
        }
        for (name, value) in &spec.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        let resp = req.send().await.map_err(Error::Transport)?;
        read_envelope(resp).await
    }

    /// Execute a descriptor and unwrap to just the payload — the default
    /// shape nearly every domain method wants.
    pub async fn perform_data(&self, spec: RequestSpec) -> Result<Value, Error> {
        Ok(self.perform(spec).await?.data)
    }

    /// POST a multipart form — the one non-JSON call shape (photo upload).
    /// Same base-URL resolution and auth handling as [`perform`](Self::perform).
    pub async fn upload(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<ResponseEnvelope, Error> {
        let url = self.resolve_url(path)?;
        debug!(%url, "uploading multipart form");

        let req = self.apply_auth(self.http.post(url).multipart(form))?;
        let resp = req.send().await.map_err(Error::Transport)?;
        read_envelope(resp).await
    }

    // ── Helpers ──────────────────────────────────────────────────────

    fn resolve_url(&self, raw: &str) -> Result<Url, Error> {
        match Url::parse(raw) {
            Ok(absolute) => Ok(absolute),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                self.base_url.join(raw).map_err(Error::InvalidUrl)
            }
            Err(e) => Err(Error::InvalidUrl(e)),
        }
    }

    fn apply_auth(&self, req: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, Error> {
        let Some(token) = self.auth_token() else {
            return Ok(req);
        };
        let mut value = HeaderValue::from_str(&token)
            .map_err(|e| Error::InvalidHeader(format!("stored auth token: {e}")))?;
        value.set_sensitive(true);
        Ok(req.header(AUTHORIZATION, value))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.auth_token().is_some())
            .finish_non_exhaustive()
    }
}

/// Render a query map as wire pairs. Scalars serialize bare (no JSON
/// quoting), nulls are skipped, and the rare nested value falls back to its
/// JSON text.
fn query_pairs(fields: &Fields) -> Vec<(String, String)> {
    fields
        .iter()
        .filter_map(|(name, value)| {
            let rendered = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                other => other.to_string(),
            };
            Some((name.clone(), rendered))
        })
        .collect()
}

async fn read_envelope(resp: reqwest::Response) -> Result<ResponseEnvelope, Error> {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = resp.text().await.map_err(Error::Transport)?;

    if !status.is_success() {
        return Err(Error::Http {
            status: status.as_u16(),
            body,
        });
    }

    let data = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: body.clone(),
        })?
    };

    Ok(ResponseEnvelope {
        status,
        headers,
        data,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn session() -> Session {
        let base = Url::parse("https://api.brewfinder.test/v1/").expect("static url");
        Session::with_client(reqwest::Client::new(), base)
    }

    #[test]
    fn relative_urls_resolve_against_base() {
        let s = session();
        let url = s.resolve_url("/breweries/5").expect("resolves");
        assert_eq!(url.as_str(), "https://api.brewfinder.test/breweries/5");
    }

    #[test]
    fn absolute_urls_bypass_base() {
        let s = session();
        let url = s
            .resolve_url("https://api.mapbox.com/geocoding/v5/mapbox.places/x.json")
            .expect("resolves");
        assert_eq!(url.host_str(), Some("api.mapbox.com"));
    }

    #[test]
    fn query_pairs_render_scalars_and_skip_nulls() {
        let mut fields = Fields::new();
        fields.insert("f".into(), json!("geojson"));
        fields.insert("limit".into(), json!(25));
        fields.insert("active".into(), json!(true));
        fields.insert("nothing".into(), Value::Null);

        let mut pairs = query_pairs(&fields);
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("active".to_owned(), "true".to_owned()),
                ("f".to_owned(), "geojson".to_owned()),
                ("limit".to_owned(), "25".to_owned()),
            ]
        );
    }

    #[test]
    fn token_state_round_trips() {
        let s = session();
        assert_eq!(s.auth_token(), None);
        s.set_auth_token("abc".into());
        assert_eq!(s.auth_token(), Some("abc".to_owned()));
        s.clear_auth_token();
        assert_eq!(s.auth_token(), None);
    }
}
