// src/models/content.rs
// DOCUMENTATION: Website content (settings) structures
// PURPOSE: Keyed content blocks that populate page text/media from the dashboard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

/// Allowed values for the content_type column
pub const CONTENT_TYPES: &[&str] = &[
    "TEXT",
    "TEXTAREA",
    "RICH_TEXT",
    "IMAGE",
    "VIDEO",
    "GALLERY",
    "TESTIMONIAL",
    "FEATURE",
    "CTA",
];

/// Allowed values for the media_type column
pub const MEDIA_TYPES: &[&str] = &["IMAGE", "VIDEO", "DOCUMENT"];

/// Represents a website content record from the database
/// DOCUMENTATION: Each record is one keyed unit of page content,
/// grouped by page and section and ordered for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WebsiteContent {
    pub id: Uuid,

    /// Unique lookup key (e.g. "home_hero_title")
    pub key: String,

    /// Label shown in the dashboard editor
    pub title: String,

    /// Text payload
    pub content: Option<String>,

    /// Media payload URL
    pub media_url: Option<String>,

    /// IMAGE, VIDEO, DOCUMENT
    pub media_type: Option<String>,

    /// TEXT, RICH_TEXT, IMAGE, GALLERY, ...
    pub content_type: String,

    /// Page the block belongs to (e.g. "home")
    pub page: String,

    /// Section within the page (e.g. "hero")
    pub section: String,

    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WebsiteContent {
    /// Flattened value for the legacy key-value settings map:
    /// text content first, media URL as fallback
    pub fn flat_value(&self) -> String {
        self.content
            .clone()
            .filter(|c| !c.is_empty())
            .or_else(|| self.media_url.clone())
            .unwrap_or_default()
    }
}

/// Request DTO for POST /content and /content/upsert
#[derive(Debug, Deserialize, Validate)]
pub struct CreateContentRequest {
    #[validate(length(min = 1, max = 255))]
    pub key: String,

    #[validate(length(min = 1, max = 255))]
    pub title: String,

    pub content: Option<String>,
    pub media_url: Option<String>,
    pub media_type: Option<String>,

    pub content_type: String,

    #[validate(length(min = 1, max = 100))]
    pub page: String,

    #[validate(length(min = 1, max = 100))]
    pub section: String,

    #[serde(default)]
    pub display_order: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Request DTO for PUT /content/{id}
#[derive(Debug, Deserialize, Default)]
pub struct UpdateContentRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub media_url: Option<String>,
    pub media_type: Option<String>,
    pub content_type: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Query parameters for GET /content
#[derive(Debug, Deserialize)]
pub struct ContentQuery {
    pub page: Option<String>,
    pub section: Option<String>,
}

/// Response DTO for GET /content
/// Carries the blocks and the flattened key-value map consumed by
/// older frontend code
#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub blocks: Vec<WebsiteContent>,
    pub settings: HashMap<String, String>,
}

impl ContentResponse {
    pub fn from_blocks(blocks: Vec<WebsiteContent>) -> Self {
        let settings = blocks
            .iter()
            .map(|b| (b.key.clone(), b.flat_value()))
            .collect();

        ContentResponse { blocks, settings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn block(key: &str, content: Option<&str>, media: Option<&str>) -> WebsiteContent {
        WebsiteContent {
            id: Uuid::new_v4(),
            key: key.to_string(),
            title: key.to_string(),
            content: content.map(String::from),
            media_url: media.map(String::from),
            media_type: None,
            content_type: "TEXT".to_string(),
            page: "home".to_string(),
            section: "hero".to_string(),
            display_order: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_flat_value_prefers_content() {
        let b = block("k", Some("text"), Some("http://img"));
        assert_eq!(b.flat_value(), "text");
    }

    #[test]
    fn test_flat_value_falls_back_to_media() {
        let b = block("k", None, Some("http://img"));
        assert_eq!(b.flat_value(), "http://img");

        let empty = block("k", Some(""), Some("http://img"));
        assert_eq!(empty.flat_value(), "http://img");
    }

    #[test]
    fn test_settings_map_flattening() {
        let response = ContentResponse::from_blocks(vec![
            block("hero_title", Some("Sail the Nile"), None),
            block("hero_image", None, Some("http://img/hero.jpg")),
        ]);

        assert_eq!(response.settings["hero_title"], "Sail the Nile");
        assert_eq!(response.settings["hero_image"], "http://img/hero.jpg");
        assert_eq!(response.blocks.len(), 2);
    }
}
