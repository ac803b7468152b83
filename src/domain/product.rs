use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::review::ReviewListQuery;

/// Domain representation of a catalog product.
///
/// Records returned by a repository carry the stored values: bare image
/// filenames and a category reference without a name. Records returned by
/// [`crate::repository::catalog::ProductCatalog`] have been through the
/// lifecycle pipeline and carry derived URLs and the populated category.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Display title, trimmed.
    pub title: String,
    /// Lowercase URL slug.
    pub slug: String,
    /// Long description shown on the product page.
    pub description: String,
    /// Units in inventory.
    pub quantity: i32,
    /// Cumulative units sold.
    pub sold: i32,
    /// Price in currency units.
    pub price: f64,
    /// Optional discounted price.
    pub price_after_discount: Option<f64>,
    /// Ordered color labels.
    pub colors: Vec<String>,
    /// Cover image, a bare filename in storage and a URL once materialized.
    pub image_cover: String,
    /// Gallery images, bare filenames in storage and URLs once materialized.
    pub images: Vec<String>,
    /// Main category reference.
    pub category: ProductCategory,
    /// Ordered subcategory references.
    pub subcategory_ids: Vec<i32>,
    /// Optional brand reference.
    pub brand_id: Option<i32>,
    /// Average review rating in `[1, 5]`, absent until reviews exist.
    pub ratings_average: Option<f64>,
    /// Number of ratings received.
    pub ratings_quantity: i32,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Query selecting the reviews that point back at this product.
    ///
    /// Reviews are never stored on the product itself; the review store
    /// executes this query when a caller asks for them.
    pub fn reviews_query(&self) -> ReviewListQuery {
        ReviewListQuery::new(self.hub_id).product(self.id)
    }
}

/// Category reference embedded in a product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ProductCategory {
    /// Identifier of the referenced category.
    pub id: i32,
    /// Display name, present once the reference has been populated.
    pub name: Option<String>,
}

impl ProductCategory {
    /// Reference that has not been populated yet.
    pub fn unresolved(id: i32) -> Self {
        Self { id, name: None }
    }

    /// Whether the display name has been attached.
    pub fn is_populated(&self) -> bool {
        self.name.is_some()
    }
}

/// Relations a read should populate alongside the product rows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Populate {
    /// Attach the referenced category's display name.
    pub category: bool,
}

impl Populate {
    /// Plan that populates nothing and returns the stored references.
    pub fn none() -> Self {
        Self::default()
    }

    /// Request the category display name.
    pub fn with_category(mut self) -> Self {
        self.category = true;
        self
    }
}

/// Payload required to insert a new product for a hub.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Owning hub identifier.
    pub hub_id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub quantity: i32,
    pub sold: i32,
    pub price: f64,
    pub price_after_discount: Option<f64>,
    pub colors: Vec<String>,
    /// Bare cover image filename.
    pub image_cover: String,
    /// Bare gallery image filenames.
    pub images: Vec<String>,
    pub category_id: i32,
    pub subcategory_ids: Vec<i32>,
    pub brand_id: Option<i32>,
    pub ratings_average: Option<f64>,
    pub ratings_quantity: i32,
    /// Timestamp captured when the product payload was created.
    pub updated_at: NaiveDateTime,
}

/// Full replacement applied when updating an existing product.
///
/// Updates are produced by merging a patch onto the stored record and
/// validating the result, so every column is always set.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProduct {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub quantity: i32,
    pub sold: i32,
    pub price: f64,
    pub price_after_discount: Option<f64>,
    pub colors: Vec<String>,
    pub image_cover: String,
    pub images: Vec<String>,
    pub category_id: i32,
    pub subcategory_ids: Vec<i32>,
    pub brand_id: Option<i32>,
    pub ratings_average: Option<f64>,
    pub ratings_quantity: i32,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

/// Query definition used to list products for a hub.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductListQuery {
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Optional main category filter.
    pub category_id: Option<i32>,
    /// Optional brand filter.
    pub brand_id: Option<i32>,
    /// Relations populated on every returned product.
    pub populate: Populate,
}

impl ProductListQuery {
    /// Construct a query that targets all products belonging to `hub_id`.
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            category_id: None,
            brand_id: None,
            populate: Populate::none(),
        }
    }

    /// Restrict the results to a main category.
    pub fn category(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Restrict the results to a brand.
    pub fn brand(mut self, brand_id: i32) -> Self {
        self.brand_id = Some(brand_id);
        self
    }

    /// Replace the population plan of the query.
    pub fn populate(mut self, populate: Populate) -> Self {
        self.populate = populate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn populate_defaults_to_stored_references() {
        assert!(!Populate::none().category);
        assert!(Populate::none().with_category().category);
    }

    #[test]
    fn list_query_builders_set_filters() {
        let query = ProductListQuery::new(3).category(7).brand(9);

        assert_eq!(query.hub_id, 3);
        assert_eq!(query.category_id, Some(7));
        assert_eq!(query.brand_id, Some(9));
        assert_eq!(query.populate, Populate::none());
    }
}
