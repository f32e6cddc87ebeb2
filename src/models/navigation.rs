// src/models/navigation.rs
// DOCUMENTATION: Navigation item structures
// PURPOSE: Menu entries grouped by location, with one level of nesting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents a navigation item record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NavigationItem {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    /// Link target: _self or _blank
    pub target: String,
    pub icon: Option<String>,
    /// Parent item for dropdown menus
    pub parent_id: Option<Uuid>,
    /// header, footer, ...
    pub menu_location: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for POST /dashboard/navigation
#[derive(Debug, Deserialize, Validate)]
pub struct CreateNavigationRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(min = 1, max = 2048))]
    pub url: String,

    #[serde(default = "default_target")]
    pub target: String,

    pub icon: Option<String>,
    pub parent_id: Option<Uuid>,

    #[serde(default = "default_location")]
    pub menu_location: String,

    #[serde(default)]
    pub display_order: i32,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_target() -> String {
    "_self".to_string()
}

fn default_location() -> String {
    "header".to_string()
}

fn default_active() -> bool {
    true
}

/// Request DTO for PUT /dashboard/navigation/{id}
#[derive(Debug, Deserialize, Default)]
pub struct UpdateNavigationRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub target: Option<String>,
    pub icon: Option<String>,
    pub parent_id: Option<Uuid>,
    pub menu_location: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Navigation item with resolved children for menu rendering
#[derive(Debug, Serialize)]
pub struct NavigationTreeItem {
    #[serde(flatten)]
    pub item: NavigationItem,
    pub children: Vec<NavigationItem>,
}

/// Build a one-level tree out of a flat, ordered item list
/// Children whose parent is not in the list are dropped
pub fn build_tree(items: Vec<NavigationItem>) -> Vec<NavigationTreeItem> {
    let (roots, children): (Vec<_>, Vec<_>) =
        items.into_iter().partition(|i| i.parent_id.is_none());

    roots
        .into_iter()
        .map(|root| {
            let own_children = children
                .iter()
                .filter(|c| c.parent_id == Some(root.id))
                .cloned()
                .collect();
            NavigationTreeItem {
                item: root,
                children: own_children,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, parent: Option<Uuid>) -> NavigationItem {
        NavigationItem {
            id: Uuid::new_v4(),
            title: title.to_string(),
            url: "/".to_string(),
            target: "_self".to_string(),
            icon: None,
            parent_id: parent,
            menu_location: "header".to_string(),
            display_order: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_tree_nests_children() {
        let root = item("Cruises", None);
        let child_a = item("Luxury", Some(root.id));
        let child_b = item("Budget", Some(root.id));
        let other_root = item("Contact", None);

        let tree = build_tree(vec![root.clone(), child_a, child_b, other_root]);

        assert_eq!(tree.len(), 2);
        let cruises = tree.iter().find(|t| t.item.title == "Cruises").unwrap();
        assert_eq!(cruises.children.len(), 2);
        let contact = tree.iter().find(|t| t.item.title == "Contact").unwrap();
        assert!(contact.children.is_empty());
    }

    #[test]
    fn test_build_tree_orphan_child_dropped() {
        let child = item("Orphan", Some(Uuid::new_v4()));
        let tree = build_tree(vec![child]);
        // A child pointing at a missing parent is not promoted to root
        assert!(tree.is_empty());
    }
}
