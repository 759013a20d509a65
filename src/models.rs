use serde::{Deserialize, Serialize};

use crate::pagination::FetchRequest;

pub type ArtworkId = u64;

/// One row of the table. Only `id` is interpreted; the rest is display text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Artwork {
    pub id: ArtworkId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub date_start: Option<i64>,
    #[serde(default)]
    pub date_end: Option<i64>,
}

/// One fetched window of the remote collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub records: Vec<Artwork>,
    pub total: u64,
}

/// Body of `GET /artworks`. Fields other than these are ignored.
#[derive(Debug, Deserialize)]
pub struct ArtworksResponse {
    pub data: Vec<Artwork>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Deserialize)]
pub struct PaginationInfo {
    pub total: u64,
}

impl From<ArtworksResponse> for Page {
    fn from(body: ArtworksResponse) -> Self {
        Page {
            records: body.data,
            total: body.pagination.total,
        }
    }
}

/// Completion of a background fetch, delivered to the UI loop.
#[derive(Debug)]
pub enum FetchEvent {
    Loaded { request: FetchRequest, page: Page },
    Failed { request: FetchRequest, error: String },
}

/// Modal drawn over the table. Only one at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    PageSizePrompt { input: String },
    Alert { message: String },
    SelectionSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_response_with_nulls_and_extra_fields() {
        let body = serde_json::json!({
            "pagination": { "total": 2, "limit": 2, "current_page": 1 },
            "data": [
                {
                    "id": 27992,
                    "title": "A Sunday on La Grande Jatte",
                    "place_of_origin": "France",
                    "artist_display": "Georges Seurat\nFrench, 1859-1891",
                    "date_start": 1884,
                    "date_end": 1886,
                    "image_id": "ignored"
                },
                { "id": 7, "title": null, "place_of_origin": null, "date_start": null }
            ]
        });
        let page: Page = serde_json::from_value::<ArtworksResponse>(body).unwrap().into();

        assert_eq!(page.total, 2);
        assert_eq!(page.records[0].date_end, Some(1886));
        assert_eq!(
            page.records[1],
            Artwork {
                id: 7,
                title: None,
                place_of_origin: None,
                artist_display: None,
                date_start: None,
                date_end: None,
            }
        );
    }

    #[test]
    fn test_response_without_total_is_rejected() {
        let body = serde_json::json!({ "data": [], "pagination": {} });
        assert!(serde_json::from_value::<ArtworksResponse>(body).is_err());
    }
}
