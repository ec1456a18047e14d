// Domain models
//
// Lenient serde models for the Brewery Finder backend. List payloads are
// format-dependent (`f=geojson` vs plain JSON), so list endpoints surface
// raw `serde_json::Value`; only stable shapes are typed here. Fields use
// `#[serde(default)]` liberally because the backend is inconsistent about
// field presence.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Styles ───────────────────────────────────────────────────────────

/// Beer style row from `GET /beer/styles`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Style {
    #[serde(default)]
    pub id: Option<i64>,
    pub style_name: String,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// UI-shaped projection of a style name, produced only by the "as options"
/// view; the raw resource list is returned unmodified otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleOption {
    pub text: String,
    pub value: String,
}

// ── Users ────────────────────────────────────────────────────────────

/// Parsed login response.
///
/// `token` is absent when the server declines the login without an HTTP
/// error; callers must check the field themselves.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// User projection behind the activation check
/// (`GET /users/{id}?fields=username,active,id`).
#[derive(Debug, Clone, Deserialize)]
pub struct UserActivation {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    /// String-typed boolean from the backing store. Exactly `"True"` means
    /// active; `"true"`, `"1"` and friends do not.
    #[serde(default)]
    pub active: Option<String>,
}

/// Fields for `POST /users/create`. The password is base64-encoded at send
/// time (reversible transport encoding, not a security measure).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: SecretString,
    /// Template the backend embeds in the activation email,
    /// e.g. `https://app.example.com/users/{id}/activate`.
    pub activation_url: String,
}

// ── Export ───────────────────────────────────────────────────────────

/// Parameters for `export_data`.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub table: String,
    pub format: String,
}

impl Default for ExportRequest {
    fn default() -> Self {
        Self {
            table: "breweries".to_owned(),
            format: "csv".to_owned(),
        }
    }
}

// ── Photos ───────────────────────────────────────────────────────────

/// In-memory photo payload for multipart upload.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}
