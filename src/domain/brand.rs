use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Brand {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewBrand {
    pub hub_id: i32,
    pub name: String,
    pub updated_at: NaiveDateTime,
}

impl NewBrand {
    /// Build a brand payload with the current timestamp.
    pub fn new(hub_id: i32, name: impl Into<String>) -> Self {
        Self {
            hub_id,
            name: name.into(),
            updated_at: Local::now().naive_utc(),
        }
    }
}
