// Generic table endpoints
//
// Uniform create/update/delete against any backend table, plus export.
// The backend embeds the verb in the path (`/data/{table}/create`,
// `/{id}/update`, `/{id}/delete`) — these are not plain REST verbs against
// the collection URL.

use reqwest::Method;
use serde_json::Value;
use tracing::warn;

use crate::client::BreweryClient;
use crate::error::Error;
use crate::models::ExportRequest;
use crate::request::{CallArgs, Fields, RequestOptions};

/// Render a JSON scalar the way it appears in a path segment.
fn path_segment(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

impl BreweryClient {
    /// Create a record in any table. Loose fields in `options` become the
    /// request body.
    ///
    /// `POST /data/{table}/create`
    pub async fn create_item(&self, table: &str, options: RequestOptions) -> Result<Value, Error> {
        self.request(CallArgs::from_url(
            format!("/data/{table}/create"),
            options.method(Method::POST),
        ))
        .await
    }

    /// Update a record. The record id rides inside the payload's `id`
    /// field; a payload without one produces an invalid path and surfaces
    /// as the backend's error.
    ///
    /// `PUT /data/{table}/{id}/update`
    pub async fn update_item(&self, table: &str, data: Fields) -> Result<Value, Error> {
        let id = data.get("id").map(path_segment).unwrap_or_default();
        let options = RequestOptions::new().method(Method::PUT).body(data);
        self.request(CallArgs::from_url(
            format!("/data/{table}/{id}/update"),
            options,
        ))
        .await
    }

    /// Delete a record by id.
    ///
    /// `DELETE /data/{table}/{id}/delete`
    pub async fn delete_item(&self, table: &str, id: i64) -> Result<Value, Error> {
        self.request(CallArgs::from_url(
            format!("/data/{table}/{id}/delete"),
            RequestOptions::new().method(Method::DELETE),
        ))
        .await
    }

    /// Export a table in the requested format.
    ///
    /// The one operation that absorbs failure: any error is logged and
    /// `None` is returned instead of propagating. Every other method lets
    /// failures bubble to the caller — do not generalize this.
    ///
    /// `POST /data/{table}/export?f={format}`
    pub async fn export_data(&self, export: ExportRequest) -> Option<Value> {
        let url = format!("/data/{}/export?f={}", export.table, export.format);
        let result = self
            .request(CallArgs::from_url(
                url,
                RequestOptions::new().method(Method::POST),
            ))
            .await;

        match result {
            Ok(data) => Some(data),
            Err(err) => {
                warn!(error = %err, table = %export.table, "export data failed");
                None
            }
        }
    }
}
