use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Main product category. Products only ever read its display name.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Category {
    /// Unique identifier of the category.
    pub id: i32,
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Human-readable name of the category.
    pub name: String,
    /// Timestamp for when the category record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the category record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new category for a hub.
#[derive(Debug, Clone)]
pub struct NewCategory {
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Human-readable name of the category.
    pub name: String,
    /// Timestamp captured when the category payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewCategory {
    /// Build a new category payload with the supplied name and current timestamp.
    pub fn new(hub_id: i32, name: impl Into<String>) -> Self {
        Self {
            hub_id,
            name: name.into(),
            updated_at: Local::now().naive_utc(),
        }
    }
}
