// Domain client
//
// Façade exposing one method per resource operation. Each method is a thin
// adapter: build normalizer input with resource-specific defaults, hand the
// canonical spec to the session, and reshape the result where the resource
// demands it. Endpoint modules live under `resources/` as inherent impls to
// keep this module focused on construction and plumbing.

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::Error;
use crate::request::CallArgs;
use crate::session::{ResponseEnvelope, Session};
use crate::transport::TransportConfig;

/// Client for the Brewery Finder API.
///
/// Owns the [`Session`] (base URL + auth token); all resource operations
/// are inherent methods implemented in the `resources` and `geocode`
/// modules.
#[derive(Debug)]
pub struct BreweryClient {
    session: Session,
}

impl BreweryClient {
    /// Create a client from the bootstrap base URL and transport settings.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self::with_session(Session::new(base_url, transport)?))
    }

    /// Wrap an already-constructed session (e.g. one sharing a prebuilt
    /// `reqwest::Client`).
    pub fn with_session(session: Session) -> Self {
        Self { session }
    }

    /// The underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Normalize and execute, unwrapping to the payload.
    pub(crate) async fn request(&self, args: CallArgs) -> Result<Value, Error> {
        self.session.perform_data(args.normalize()).await
    }

    /// Normalize and execute, keeping the full envelope.
    pub(crate) async fn request_envelope(&self, args: CallArgs) -> Result<ResponseEnvelope, Error> {
        self.session.perform(args.normalize()).await
    }
}

/// Decode an unwrapped payload into a typed model, keeping the raw JSON
/// around for diagnosis when the shape doesn't line up.
pub(crate) fn decode<T: DeserializeOwned>(data: Value) -> Result<T, Error> {
    let body = data.to_string();
    serde_json::from_value(data).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body,
    })
}
