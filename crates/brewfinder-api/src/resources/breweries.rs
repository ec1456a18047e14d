// Brewery endpoints
//
// Breweries are the map-facing resource: list payloads default to the
// geo-tagged format so they can land directly on a map layer.

use serde_json::Value;
use tracing::debug;

use crate::client::BreweryClient;
use crate::error::Error;
use crate::request::{CallArgs, RequestOptions};

impl BreweryClient {
    /// List breweries, defaulting the output format field `f` to
    /// `"geojson"` unless the caller overrides it.
    ///
    /// `GET /breweries`
    pub async fn list_breweries(&self, options: RequestOptions) -> Result<Value, Error> {
        let options = options.default_field("f", "geojson");
        self.request(CallArgs::from_url("/breweries", options)).await
    }

    /// Fetch a single brewery.
    ///
    /// An absent or non-positive id resolves to `None` without a network
    /// round trip — a guard against accidental unfiltered reads, not an
    /// error.
    ///
    /// `GET /breweries/{id}`
    pub async fn get_brewery(
        &self,
        id: Option<i64>,
        options: RequestOptions,
    ) -> Result<Option<Value>, Error> {
        let Some(id) = id.filter(|id| *id > 0) else {
            debug!("get_brewery called without an id, skipping request");
            return Ok(None);
        };
        self.request(CallArgs::from_url(format!("/breweries/{id}"), options))
            .await
            .map(Some)
    }

    /// List the beers brewed at one brewery.
    ///
    /// `GET /breweries/{id}/beers`
    pub async fn list_brewery_beers(
        &self,
        brewery_id: i64,
        options: RequestOptions,
    ) -> Result<Value, Error> {
        self.request(CallArgs::from_url(
            format!("/breweries/{brewery_id}/beers"),
            options,
        ))
        .await
    }
}
