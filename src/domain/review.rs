use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Review left on a product. The review owns the link through `product_id`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Review {
    pub id: i32,
    pub hub_id: i32,
    /// Product this review points back at.
    pub product_id: i32,
    pub title: Option<String>,
    pub ratings: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a review.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub hub_id: i32,
    pub product_id: i32,
    pub title: Option<String>,
    pub ratings: f64,
    pub updated_at: NaiveDateTime,
}

impl NewReview {
    /// Build a review payload for `product_id` with the current timestamp.
    pub fn new(hub_id: i32, product_id: i32, ratings: f64) -> Self {
        Self {
            hub_id,
            product_id,
            title: None,
            ratings,
            updated_at: Local::now().naive_utc(),
        }
    }

    /// Attach a short title to the review.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Query definition used to list reviews for a hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewListQuery {
    pub hub_id: i32,
    /// Only return reviews whose `product_id` matches.
    pub product_id: Option<i32>,
}

impl ReviewListQuery {
    /// Construct a query that targets all reviews belonging to `hub_id`.
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            product_id: None,
        }
    }

    /// Restrict the results to reviews of a single product.
    pub fn product(mut self, product_id: i32) -> Self {
        self.product_id = Some(product_id);
        self
    }
}
