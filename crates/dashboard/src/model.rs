//! Wire types exchanged with the coffee API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A coffee as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coffee {
    /// Store-assigned identifier.
    pub id: i32,
    /// Unique display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Unit price.
    pub price: f64,
    /// Image URL.
    pub image: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// JSON body for creating a coffee with an image URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCoffee {
    /// Unique display name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unit price.
    pub price: f64,
    /// Image URL.
    pub image: String,
}

/// Local image file sent as a multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Original file name; the server derives the object key from it.
    pub file_name: String,
    /// MIME type, when known.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Multipart create request carrying the image bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCoffeeUpload {
    /// Unique display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Unit price.
    pub price: f64,
    /// Image to upload.
    pub file: ImageFile,
}

/// Partial update; `None` fields are omitted from the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoffeeUpdate {
    /// Replacement name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Replacement image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn coffee_reads_camel_case_timestamps() {
        let coffee: Coffee = serde_json::from_value(json!({
            "id": 4,
            "name": "Mocha",
            "description": null,
            "price": 3.2,
            "image": "https://example.test/mocha.jpg",
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-02T10:00:00Z"
        }))
        .expect("coffee decodes");

        assert_eq!(coffee.id, 4);
        assert!(coffee.description.is_none());
        assert!(coffee.updated_at > coffee.created_at);
    }

    #[rstest]
    fn update_omits_unset_fields() {
        let update = CoffeeUpdate {
            price: Some(2.75),
            ..CoffeeUpdate::default()
        };

        assert_eq!(
            serde_json::to_value(&update).expect("serialises"),
            json!({ "price": 2.75 })
        );
    }

    #[rstest]
    fn new_coffee_omits_missing_description() {
        let coffee = NewCoffee {
            name: "Latte".to_owned(),
            description: None,
            price: 2.5,
            image: "https://example.test/latte.jpg".to_owned(),
        };

        let value = serde_json::to_value(&coffee).expect("serialises");

        assert!(value.get("description").is_none());
    }
}
