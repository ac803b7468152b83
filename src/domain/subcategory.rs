use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Secondary category nested under a main category.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SubCategory {
    pub id: i32,
    pub hub_id: i32,
    /// Parent main category.
    pub category_id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a subcategory.
#[derive(Debug, Clone)]
pub struct NewSubCategory {
    pub hub_id: i32,
    pub category_id: i32,
    pub name: String,
    pub updated_at: NaiveDateTime,
}

impl NewSubCategory {
    /// Build a subcategory payload under `category_id`.
    pub fn new(hub_id: i32, category_id: i32, name: impl Into<String>) -> Self {
        Self {
            hub_id,
            category_id,
            name: name.into(),
            updated_at: Local::now().naive_utc(),
        }
    }
}
