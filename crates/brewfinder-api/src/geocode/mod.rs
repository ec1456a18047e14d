// Reverse geocoding
//
// Thin wrapper over the Mapbox places API plus the response adapter that
// extracts a structured address from the free-text place name. The parse is
// structural, not semantic: it slices the last four comma-separated
// segments of the place name, so it lives behind this module boundary and
// can be swapped wholesale if the upstream format changes.

pub mod states;

use serde::{Deserialize, Serialize};

use crate::client::{BreweryClient, decode};
use crate::error::Error;
use crate::request::{CallArgs, RequestOptions};

/// Structured address extracted from a reverse-geocode response. All fields
/// are `None` together when the service returns no match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub address: Option<String>,
    pub city: Option<String>,
    /// Postal abbreviation, mapped from the full state name in the place
    /// string. `None` when the name isn't in the lookup table.
    pub state: Option<String>,
    pub zip: Option<String>,
}

// ── Upstream response shape ──────────────────────────────────────────

/// Minimal view of the Mapbox feature collection — only what the adapter
/// reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub place_name: String,
}

// ── Adapter ──────────────────────────────────────────────────────────

/// Extract a [`GeocodeResult`] from a feature collection.
///
/// Only the last four comma-separated segments of the first feature's
/// place name are used — when the coordinate hits a known venue, Mapbox
/// prefixes its name and the prefix must be discarded. Segment layout:
/// `address, city, state zip, country`. The "state zip" segment splits on
/// whitespace: the last token is the zip, the rest rejoined is the state
/// name, mapped through the full-name → abbreviation table.
///
/// Zero features, or a place name with fewer than four segments, yield the
/// all-`None` result.
pub fn adapt(collection: &FeatureCollection) -> GeocodeResult {
    let Some(feature) = collection.features.first() else {
        return GeocodeResult::default();
    };

    let segments: Vec<&str> = feature.place_name.split(',').collect();
    if segments.len() < 4 {
        return GeocodeResult::default();
    }
    let parts = &segments[segments.len() - 4..];

    let tokens: Vec<&str> = parts[2].split_whitespace().collect();
    let (state, zip) = match tokens.split_last() {
        Some((zip, state_tokens)) => (
            states::state_abbreviation(&state_tokens.join(" ")).map(str::to_owned),
            Some((*zip).to_owned()),
        ),
        None => (None, None),
    };

    GeocodeResult {
        address: Some(parts[0].trim().to_owned()),
        city: Some(parts[1].trim().to_owned()),
        state,
        zip,
    }
}

impl BreweryClient {
    /// Reverse-geocode a coordinate through the Mapbox places API.
    ///
    /// The endpoint URL is absolute and bypasses the session base URL. A
    /// no-match response yields the all-`None` result; transport failures
    /// propagate like any other call.
    pub async fn reverse_geocode(
        &self,
        lat: f64,
        lng: f64,
        access_token: &str,
    ) -> Result<GeocodeResult, Error> {
        let url = format!("https://api.mapbox.com/geocoding/v5/mapbox.places/{lng}%2C{lat}.json");
        let options = RequestOptions::new().field("access_token", access_token);

        let data = self.request(CallArgs::from_url(url, options)).await?;
        let collection: FeatureCollection = decode(data)?;
        Ok(adapt(&collection))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn collection(place_name: &str) -> FeatureCollection {
        FeatureCollection {
            features: vec![Feature {
                place_name: place_name.to_owned(),
            }],
        }
    }

    #[test]
    fn no_features_yields_all_none() {
        let result = adapt(&FeatureCollection::default());
        assert_eq!(result, GeocodeResult::default());
    }

    #[test]
    fn venue_prefix_is_discarded() {
        let result = adapt(&collection(
            "Joe's Bar, 123 Main St, Springfield, Illinois 62704, United States",
        ));
        assert_eq!(
            result,
            GeocodeResult {
                address: Some("123 Main St".to_owned()),
                city: Some("Springfield".to_owned()),
                state: Some("IL".to_owned()),
                zip: Some("62704".to_owned()),
            }
        );
    }

    #[test]
    fn plain_address_parses_without_prefix() {
        let result = adapt(&collection("600 Capitol Way N, Olympia, Washington 98501, United States"));
        assert_eq!(result.address.as_deref(), Some("600 Capitol Way N"));
        assert_eq!(result.city.as_deref(), Some("Olympia"));
        assert_eq!(result.state.as_deref(), Some("WA"));
        assert_eq!(result.zip.as_deref(), Some("98501"));
    }

    #[test]
    fn multi_word_state_names_resolve() {
        let result = adapt(&collection(
            "10 Elm St, Concord, New Hampshire 03301, United States",
        ));
        assert_eq!(result.state.as_deref(), Some("NH"));
        assert_eq!(result.zip.as_deref(), Some("03301"));
    }

    #[test]
    fn abbreviation_in_place_string_finds_no_state() {
        // lookup is keyed by full name; an abbreviated segment misses
        let result = adapt(&collection("123 Main St, Springfield, IL 62704, USA"));
        assert_eq!(result.address.as_deref(), Some("123 Main St"));
        assert_eq!(result.city.as_deref(), Some("Springfield"));
        assert_eq!(result.state, None);
        assert_eq!(result.zip.as_deref(), Some("62704"));
    }

    #[test]
    fn too_few_segments_yields_all_none() {
        let result = adapt(&collection("Somewhere, Nowhere 00000"));
        assert_eq!(result, GeocodeResult::default());
    }
}
