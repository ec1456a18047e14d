// Beer and style endpoints

use serde_json::Value;

use crate::client::{BreweryClient, decode};
use crate::error::Error;
use crate::models::{Style, StyleOption};
use crate::request::{CallArgs, RequestOptions};

impl BreweryClient {
    /// List beers.
    ///
    /// `GET /beers`
    pub async fn list_beers(&self, options: RequestOptions) -> Result<Value, Error> {
        self.request(CallArgs::from_url("/beers", options)).await
    }

    /// Fetch a single beer.
    ///
    /// `GET /beers/{id}`
    pub async fn get_beer(&self, id: i64) -> Result<Value, Error> {
        self.request(CallArgs::get(format!("/beers/{id}"))).await
    }

    /// List the photos attached to a beer.
    ///
    /// `GET /beers/{id}/photos`
    pub async fn list_beer_photos(
        &self,
        beer_id: i64,
        options: RequestOptions,
    ) -> Result<Value, Error> {
        self.request(CallArgs::from_url(
            format!("/beers/{beer_id}/photos"),
            options,
        ))
        .await
    }

    /// Query photo records — the whole collection, or one record when
    /// `photo_id` is given.
    ///
    /// `GET /beer_photos[/{id}]`
    pub async fn query_beer_photos(
        &self,
        photo_id: Option<i64>,
        options: RequestOptions,
    ) -> Result<Value, Error> {
        let url = match photo_id {
            Some(id) => format!("/beer_photos/{id}"),
            None => "/beer_photos".to_owned(),
        };
        self.request(CallArgs::from_url(url, options)).await
    }

    /// The raw style list.
    ///
    /// `GET /beer/styles`
    pub async fn get_styles(&self, options: RequestOptions) -> Result<Vec<Style>, Error> {
        decode(self.request(CallArgs::from_url("/beer/styles", options)).await?)
    }

    /// Style names projected into sorted `{text, value}` options for form
    /// controls.
    pub async fn get_style_options(
        &self,
        options: RequestOptions,
    ) -> Result<Vec<StyleOption>, Error> {
        let mut names: Vec<String> = self
            .get_styles(options)
            .await?
            .into_iter()
            .map(|s| s.style_name)
            .collect();
        names.sort();
        Ok(names
            .into_iter()
            .map(|name| StyleOption {
                text: name.clone(),
                value: name,
            })
            .collect())
    }
}
