// Photo endpoints
//
// Photo upload is the one multipart call in the API. Endpoint selection is
// conditional: replacing an existing photo routes to its update path,
// everything else goes through the add path.

use reqwest::multipart;

use crate::client::BreweryClient;
use crate::error::Error;
use crate::models::PhotoUpload;
use crate::session::ResponseEnvelope;

/// An existing-photo id routes to the update endpoint only when it parses
/// to a positive integer; `None`, zero, negatives, and non-numeric strings
/// all mean "add a new photo".
fn update_target(existing_photo_id: Option<&str>) -> Option<i64> {
    existing_photo_id
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
}

impl BreweryClient {
    /// Upload a photo for a beer as `multipart/form-data` with `photo`
    /// (binary) and `beer_id` fields. Returns the full envelope.
    ///
    /// `POST /beer_photo/add`, or `POST /beer_photos/{id}/update` when an
    /// existing photo is being replaced.
    pub async fn upload_photo(
        &self,
        beer_id: i64,
        photo: PhotoUpload,
        existing_photo_id: Option<&str>,
    ) -> Result<ResponseEnvelope, Error> {
        let part = multipart::Part::bytes(photo.bytes).file_name(photo.file_name);
        let form = multipart::Form::new()
            .part("photo", part)
            .text("beer_id", beer_id.to_string());

        let path = match update_target(existing_photo_id) {
            Some(id) => format!("/beer_photos/{id}/update"),
            None => "/beer_photo/add".to_owned(),
        };
        self.session().upload(&path, form).await
    }

    /// Download URL for a photo, optionally cache-busted with a `cb`
    /// timestamp query parameter.
    ///
    /// `GET /beer_photos/{id}/download`
    pub fn photo_url(&self, photo_id: i64, cache_bust: bool) -> String {
        let base = self.session().base_url().as_str().trim_end_matches('/');
        let mut url = format!("{base}/beer_photos/{photo_id}/download");
        if cache_bust {
            let millis = chrono::Utc::now().timestamp_millis();
            url.push_str(&format!("?cb={millis}"));
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_target_requires_a_positive_integer() {
        assert_eq!(update_target(Some("12")), Some(12));
        assert_eq!(update_target(Some(" 7 ")), Some(7));
        assert_eq!(update_target(Some("0")), None);
        assert_eq!(update_target(Some("-3")), None);
        assert_eq!(update_target(Some("12photo")), None);
        assert_eq!(update_target(Some("")), None);
        assert_eq!(update_target(None), None);
    }
}
