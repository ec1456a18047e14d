// Request normalization
//
// The single chokepoint between the loosely-shaped calling convention the
// domain client uses and the fixed transport contract the session executes.
// Every call funnels through `CallArgs::normalize`, which resolves the
// method, partitions loose fields against the reserved allow-list, and
// consolidates them into the method-appropriate `query`/`body` bucket.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Method;
use serde_json::{Map, Value};
use tracing::debug;

/// Free-form JSON field bag (`serde_json::Map`).
pub type Fields = Map<String, Value>;

/// Transport-level field names that are never folded into `query`/`body`.
///
/// Checked by set membership during [`CallArgs::normalize`]. Adding a
/// transport option is a one-place change here. These names are first-class
/// struct fields on [`RequestOptions`]; a loose field carrying one of them
/// is a caller mistake and is discarded rather than allowed to shadow the
/// typed field.
pub const RESERVED_FIELDS: &[&str] = &[
    "url",
    "method",
    "base_url",
    "headers",
    "query",
    "body",
    "timeout",
    "auth",
    "query_serializer",
    "on_upload_progress",
    "on_download_progress",
    "response_type",
    "response_encoding",
    "proxy",
    "max_redirects",
    "validate_status",
];

/// Whether `name` is a reserved transport field.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_FIELDS.contains(&name)
}

/// Methods whose unclassified fields route to `body`; everything else
/// (reads) routes to `query`.
fn routes_to_body(method: &Method) -> bool {
    [Method::POST, Method::PUT, Method::DELETE, Method::PATCH].contains(method)
}

// ── Options bag ──────────────────────────────────────────────────────

/// The loosely-shaped options bag accepted by every domain call.
///
/// Transport fields are typed; arbitrary resource fields go into `fields`
/// and are bucketed into `query` or `body` at normalize time. Explicit
/// `query`/`body` maps pass through verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Target URL; usually supplied via [`CallArgs::from_url`] instead.
    pub url: Option<String>,
    /// HTTP method. Defaults to GET when unset.
    pub method: Option<Method>,
    /// Extra request headers, applied after session defaults.
    pub headers: BTreeMap<String, String>,
    /// Per-request timeout override.
    pub timeout: Option<Duration>,
    /// Explicit query-string fields.
    pub query: Option<Fields>,
    /// Explicit JSON body fields.
    pub body: Option<Fields>,
    /// Unclassified resource fields, bucketed by method at normalize time.
    pub fields: Fields,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Add a request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the explicit query map.
    pub fn query(mut self, query: Fields) -> Self {
        self.query = Some(query);
        self
    }

    /// Set the explicit body map.
    pub fn body(mut self, body: Fields) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a loose resource field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Add a loose resource field only if no field of that name exists yet.
    /// Used by domain methods to apply resource defaults without clobbering
    /// caller overrides.
    pub fn default_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        if !self.fields.contains_key(name) {
            self.fields.insert(name.to_owned(), value.into());
        }
        self
    }
}

// ── Canonical descriptor ─────────────────────────────────────────────

/// Canonical, fully-resolved request descriptor produced by
/// [`CallArgs::normalize`] and executed by the session.
///
/// Guarantees: `method` is always resolved; unclassified fields have been
/// consolidated into at most one of `query`/`body`; no reserved transport
/// field name appears inside either bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub url: String,
    pub method: Method,
    pub headers: BTreeMap<String, String>,
    pub timeout: Option<Duration>,
    pub query: Option<Fields>,
    pub body: Option<Fields>,
}

// ── Call arguments ───────────────────────────────────────────────────

/// The two calling shapes accepted per call.
///
/// Replaces a string-or-object polymorphic first argument with an explicit
/// tagged union: either a URL plus an options bag, or a single merged bag
/// that already carries its URL.
#[derive(Debug, Clone, PartialEq)]
pub enum CallArgs {
    /// URL supplied separately from the options bag.
    Url(String, RequestOptions),
    /// A single merged options bag.
    Options(RequestOptions),
}

impl CallArgs {
    /// URL-first calling shape. Overwrites any `url` already present in
    /// `options`.
    pub fn from_url(url: impl Into<String>, options: RequestOptions) -> Self {
        Self::Url(url.into(), options)
    }

    /// Merged calling shape; `options` carries its own `url`.
    pub fn from_options(options: RequestOptions) -> Self {
        Self::Options(options)
    }

    /// Plain GET of a URL with no options.
    pub fn get(url: impl Into<String>) -> Self {
        Self::Url(url.into(), RequestOptions::new())
    }

    /// Produce the canonical [`RequestSpec`].
    ///
    /// Never fails: a missing URL resolves to the empty string and surfaces
    /// as an invalid-URL error at the transport layer. The bucketing rules:
    ///
    /// 1. `method` defaults to GET;
    /// 2. loose fields named on [`RESERVED_FIELDS`] are discarded;
    /// 3. remaining loose fields move into `query` for reads and `body` for
    ///    mutating verbs, merging into an explicit bucket when one is
    ///    already present (loose fields overwrite same-named entries).
    pub fn normalize(self) -> RequestSpec {
        let mut options = match self {
            Self::Url(url, mut options) => {
                options.url = Some(url);
                options
            }
            Self::Options(options) => options,
        };

        let method = options.method.take().unwrap_or(Method::GET);

        let mut loose = Fields::new();
        for (name, value) in std::mem::take(&mut options.fields) {
            if is_reserved(&name) {
                debug!(field = %name, "discarding reserved name from loose fields");
                continue;
            }
            loose.insert(name, value);
        }

        if !loose.is_empty() {
            let bucket = if routes_to_body(&method) {
                options.body.get_or_insert_with(Fields::new)
            } else {
                options.query.get_or_insert_with(Fields::new)
            };
            bucket.extend(loose);
        }

        RequestSpec {
            url: options.url.unwrap_or_default(),
            method,
            headers: options.headers,
            timeout: options.timeout,
            query: options.query,
            body: options.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn fields(pairs: &[(&str, Value)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    #[test]
    fn url_first_and_merged_shapes_are_equivalent() {
        let options = RequestOptions::new()
            .method(Method::POST)
            .field("name", "Pike Place")
            .header("X-Trace", "1");

        let mut merged = options.clone();
        merged.url = Some("/breweries".to_owned());

        assert_eq!(
            CallArgs::from_url("/breweries", options).normalize(),
            CallArgs::from_options(merged).normalize()
        );
    }

    #[test]
    fn url_argument_overwrites_options_url() {
        let mut options = RequestOptions::new();
        options.url = Some("/stale".to_owned());

        let spec = CallArgs::from_url("/fresh", options).normalize();
        assert_eq!(spec.url, "/fresh");
    }

    #[test]
    fn get_routes_loose_fields_to_query() {
        let spec = CallArgs::from_url(
            "/breweries",
            RequestOptions::new().field("a", 1).field("b", "two"),
        )
        .normalize();

        assert_eq!(spec.method, Method::GET);
        assert_eq!(spec.query, Some(fields(&[("a", json!(1)), ("b", json!("two"))])));
        assert_eq!(spec.body, None);
    }

    #[test]
    fn post_routes_loose_fields_to_body() {
        let spec = CallArgs::from_url(
            "/breweries",
            RequestOptions::new()
                .method(Method::POST)
                .field("a", 1)
                .field("b", "two"),
        )
        .normalize();

        assert_eq!(spec.body, Some(fields(&[("a", json!(1)), ("b", json!("two"))])));
        assert_eq!(spec.query, None);
    }

    #[test]
    fn put_and_delete_also_route_to_body() {
        for method in [Method::PUT, Method::DELETE] {
            let spec = CallArgs::from_url(
                "/data/beers/1/update",
                RequestOptions::new().method(method).field("style", "IPA"),
            )
            .normalize();
            assert_eq!(spec.body, Some(fields(&[("style", json!("IPA"))])));
            assert_eq!(spec.query, None);
        }
    }

    #[test]
    fn reserved_names_never_reach_a_bucket() {
        let spec = CallArgs::from_url(
            "/breweries",
            RequestOptions::new()
                .field("headers", json!({"X-Evil": "1"}))
                .field("timeout", 9999)
                .field("name", "ok"),
        )
        .normalize();

        assert_eq!(spec.query, Some(fields(&[("name", json!("ok"))])));
        assert!(spec.headers.is_empty());
        assert_eq!(spec.timeout, None);
    }

    #[test]
    fn method_defaults_to_get_and_is_preserved_when_supplied() {
        let defaulted = CallArgs::get("/beers").normalize();
        assert_eq!(defaulted.method, Method::GET);

        let supplied =
            CallArgs::from_url("/beers", RequestOptions::new().method(Method::PUT)).normalize();
        assert_eq!(supplied.method, Method::PUT);
    }

    #[test]
    fn loose_fields_merge_into_explicit_bucket() {
        let spec = CallArgs::from_url(
            "/breweries",
            RequestOptions::new()
                .query(fields(&[("page", json!(2)), ("f", json!("json"))]))
                .field("f", "geojson")
                .field("limit", 10),
        )
        .normalize();

        // loose fields land in the existing bucket and overwrite collisions
        assert_eq!(
            spec.query,
            Some(fields(&[
                ("f", json!("geojson")),
                ("limit", json!(10)),
                ("page", json!(2)),
            ]))
        );
    }

    #[test]
    fn explicit_buckets_pass_through_untouched() {
        let body = fields(&[("name", json!("Stone"))]);
        let spec = CallArgs::from_url(
            "/users/create",
            RequestOptions::new().method(Method::POST).body(body.clone()),
        )
        .normalize();

        assert_eq!(spec.body, Some(body));
        assert_eq!(spec.query, None);
    }

    #[test]
    fn default_field_does_not_clobber_caller_value() {
        let options = RequestOptions::new()
            .field("f", "json")
            .default_field("f", "geojson")
            .default_field("limit", 50);

        assert_eq!(options.fields["f"], json!("json"));
        assert_eq!(options.fields["limit"], json!(50));
    }

    #[test]
    fn missing_url_resolves_to_empty_string() {
        let spec = CallArgs::from_options(RequestOptions::new()).normalize();
        assert_eq!(spec.url, "");
    }
}
