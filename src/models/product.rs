use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, ProductCategory,
    UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub hub_id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub quantity: i32,
    pub sold: i32,
    pub price: f64,
    pub price_after_discount: Option<f64>,
    pub image_cover: String,
    pub category_id: i32,
    pub brand_id: Option<i32>,
    pub ratings_average: Option<f64>,
    pub ratings_quantity: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub hub_id: i32,
    pub title: &'a str,
    pub slug: &'a str,
    pub description: &'a str,
    pub quantity: i32,
    pub sold: i32,
    pub price: f64,
    pub price_after_discount: Option<f64>,
    pub image_cover: &'a str,
    pub category_id: i32,
    pub brand_id: Option<i32>,
    pub ratings_average: Option<f64>,
    pub ratings_quantity: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProduct<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub description: &'a str,
    pub quantity: i32,
    pub sold: i32,
    pub price: f64,
    pub price_after_discount: Option<f64>,
    pub image_cover: &'a str,
    pub category_id: i32,
    pub brand_id: Option<i32>,
    pub ratings_average: Option<f64>,
    pub ratings_quantity: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_colors)]
pub struct ProductColor {
    pub id: i32,
    pub product_id: i32,
    pub position: i32,
    pub label: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_colors)]
pub struct NewProductColor<'a> {
    pub product_id: i32,
    pub position: i32,
    pub label: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_images)]
pub struct ProductImage {
    pub id: i32,
    pub product_id: i32,
    pub position: i32,
    pub file_name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_images)]
pub struct NewProductImage<'a> {
    pub product_id: i32,
    pub position: i32,
    pub file_name: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_subcategories)]
pub struct ProductSubCategory {
    pub id: i32,
    pub product_id: i32,
    pub subcategory_id: i32,
    pub position: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_subcategories)]
pub struct NewProductSubCategory {
    pub product_id: i32,
    pub subcategory_id: i32,
    pub position: i32,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            title: value.title,
            slug: value.slug,
            description: value.description,
            quantity: value.quantity,
            sold: value.sold,
            price: value.price,
            price_after_discount: value.price_after_discount,
            colors: Vec::new(),
            image_cover: value.image_cover,
            images: Vec::new(),
            category: ProductCategory::unresolved(value.category_id),
            subcategory_ids: Vec::new(),
            brand_id: value.brand_id,
            ratings_average: value.ratings_average,
            ratings_quantity: value.ratings_quantity,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            hub_id: value.hub_id,
            title: value.title.as_str(),
            slug: value.slug.as_str(),
            description: value.description.as_str(),
            quantity: value.quantity,
            sold: value.sold,
            price: value.price,
            price_after_discount: value.price_after_discount,
            image_cover: value.image_cover.as_str(),
            category_id: value.category_id,
            brand_id: value.brand_id,
            ratings_average: value.ratings_average,
            ratings_quantity: value.ratings_quantity,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            title: value.title.as_str(),
            slug: value.slug.as_str(),
            description: value.description.as_str(),
            quantity: value.quantity,
            sold: value.sold,
            price: value.price,
            price_after_discount: value.price_after_discount,
            image_cover: value.image_cover.as_str(),
            category_id: value.category_id,
            brand_id: value.brand_id,
            ratings_average: value.ratings_average,
            ratings_quantity: value.ratings_quantity,
            updated_at: value.updated_at,
        }
    }
}
