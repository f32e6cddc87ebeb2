// src/models/page.rs
// DOCUMENTATION: Page and content block structures
// PURPOSE: Dashboard-managed pages built from typed, ordered blocks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Allowed values for the pages.status column
pub const PAGE_STATUSES: &[&str] = &["DRAFT", "PUBLISHED"];

/// Allowed values for the content_blocks.block_type column
pub const BLOCK_TYPES: &[&str] = &["RICH_TEXT", "IMAGE", "GALLERY", "VIDEO", "CTA"];

/// Represents a page record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Page {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    /// DRAFT or PUBLISHED
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A typed unit of page content with an explicit display order
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContentBlock {
    pub id: Uuid,
    pub page_id: Uuid,
    /// RICH_TEXT, IMAGE, GALLERY, VIDEO, CTA
    pub block_type: String,
    /// Type-specific payload (text, URLs, captions...)
    pub content: Value,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for POST /pages
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePageRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(min = 1, max = 255))]
    pub slug: String,

    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "DRAFT".to_string()
}

/// Request DTO for PUT /pages/{id}
#[derive(Debug, Deserialize, Default)]
pub struct UpdatePageRequest {
    pub title: Option<String>,
    pub status: Option<String>,
}

/// Request DTO for POST /pages/{id}/blocks
#[derive(Debug, Deserialize)]
pub struct CreateBlockRequest {
    #[serde(rename = "type")]
    pub block_type: String,

    #[serde(default)]
    pub content: Option<Value>,
}

/// Request DTO for PATCH /pages/{id}/blocks/{block_id}
#[derive(Debug, Deserialize)]
pub struct UpdateBlockRequest {
    pub content: Value,
}

/// Request DTO for PATCH /pages/{id}/blocks/reorder
/// Blocks are renumbered 0..n-1 following the order of ids
#[derive(Debug, Deserialize)]
pub struct ReorderBlocksRequest {
    pub block_ids: Vec<Uuid>,
}
