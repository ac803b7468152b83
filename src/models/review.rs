use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::review::{NewReview as DomainNewReview, Review as DomainReview};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct Review {
    pub id: i32,
    pub hub_id: i32,
    pub product_id: i32,
    pub title: Option<String>,
    pub ratings: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct NewReview<'a> {
    pub hub_id: i32,
    pub product_id: i32,
    pub title: Option<&'a str>,
    pub ratings: f64,
    pub updated_at: NaiveDateTime,
}

impl From<Review> for DomainReview {
    fn from(value: Review) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            product_id: value.product_id,
            title: value.title,
            ratings: value.ratings,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewReview> for NewReview<'a> {
    fn from(value: &'a DomainNewReview) -> Self {
        Self {
            hub_id: value.hub_id,
            product_id: value.product_id,
            title: value.title.as_deref(),
            ratings: value.ratings,
            updated_at: value.updated_at,
        }
    }
}
