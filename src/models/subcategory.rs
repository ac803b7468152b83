use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::subcategory::{
    NewSubCategory as DomainNewSubCategory, SubCategory as DomainSubCategory,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::subcategories)]
pub struct SubCategory {
    pub id: i32,
    pub hub_id: i32,
    pub category_id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::subcategories)]
pub struct NewSubCategory<'a> {
    pub hub_id: i32,
    pub category_id: i32,
    pub name: &'a str,
    pub updated_at: NaiveDateTime,
}

impl From<SubCategory> for DomainSubCategory {
    fn from(value: SubCategory) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            category_id: value.category_id,
            name: value.name,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewSubCategory> for NewSubCategory<'a> {
    fn from(value: &'a DomainNewSubCategory) -> Self {
        Self {
            hub_id: value.hub_id,
            category_id: value.category_id,
            name: value.name.as_str(),
            updated_at: value.updated_at,
        }
    }
}
