use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::brand::{Brand as DomainBrand, NewBrand as DomainNewBrand};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::brands)]
pub struct Brand {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::brands)]
pub struct NewBrand<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub updated_at: NaiveDateTime,
}

impl From<Brand> for DomainBrand {
    fn from(value: Brand) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            name: value.name,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewBrand> for NewBrand<'a> {
    fn from(value: &'a DomainNewBrand) -> Self {
        Self {
            hub_id: value.hub_id,
            name: value.name.as_str(),
            updated_at: value.updated_at,
        }
    }
}
