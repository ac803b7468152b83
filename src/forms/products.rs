use std::borrow::Cow;

use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::product::{NewProduct, Product, UpdateProduct};

/// Allowed length range for a product title, counted in characters.
const TITLE_MIN_LEN: usize = 3;
const TITLE_MAX_LEN: usize = 100;

/// Minimum length of a product description, counted in characters.
const DESCRIPTION_MIN_LEN: u64 = 20;

/// Upper bound for a product price in currency units.
const PRICE_MAX: f64 = 2_000_000.0;

/// Allowed range for the average rating.
const RATING_MIN: f64 = 1.0;
const RATING_MAX: f64 = 5.0;

/// Order in which violations are reported.
const FIELD_ORDER: [&str; 15] = [
    "title",
    "slug",
    "description",
    "quantity",
    "sold",
    "price",
    "price_after_discount",
    "colors",
    "image_cover",
    "images",
    "category",
    "subcategories",
    "brand",
    "ratings_average",
    "ratings_quantity",
];

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Name of the offending field.
    pub field: String,
    /// Rule that failed, e.g. `required`, `length` or `range`.
    pub rule: String,
    /// Human-readable explanation.
    pub message: String,
}

/// Every rule violation of a single write attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("{}", join_messages(.0))]
pub struct ProductViolations(Vec<Violation>);

impl ProductViolations {
    fn single(field: &str, rule: &str, message: &str) -> Self {
        Self(vec![Violation {
            field: field.to_string(),
            rule: rule.to_string(),
            message: message.to_string(),
        }])
    }

    /// A request body whose values have the wrong JSON type.
    pub fn malformed_body(message: &str) -> Self {
        Self::single("body", "type", message)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.0
            .iter()
            .map(|violation| violation.message.as_str())
            .collect()
    }

    pub fn fields(&self) -> Vec<&str> {
        self.0
            .iter()
            .map(|violation| violation.field.as_str())
            .collect()
    }

    pub fn contains_message(&self, message: &str) -> bool {
        self.0.iter().any(|violation| violation.message == message)
    }
}

impl From<ValidationErrors> for ProductViolations {
    fn from(errors: ValidationErrors) -> Self {
        let mut violations: Vec<Violation> = Vec::new();

        for (field, field_errors) in errors.field_errors() {
            let field = field.to_string();
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("invalid {field}"));
                violations.push(Violation {
                    field: field.clone(),
                    rule: error.code.to_string(),
                    message,
                });
            }
        }

        violations.sort_by_key(|violation| {
            FIELD_ORDER
                .iter()
                .position(|name| *name == violation.field)
                .unwrap_or(FIELD_ORDER.len())
        });

        Self(violations)
    }
}

fn join_messages(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| violation.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductViolations>;

/// Candidate product submitted for creation.
///
/// Required values are optional here so that a missing field is reported as
/// a violation together with every other problem instead of failing
/// deserialization.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct AddProductForm {
    #[validate(
        required(message = "Product title is required"),
        custom(function = "validate_title")
    )]
    pub title: Option<String>,
    #[validate(required(message = "Product slug is required"))]
    pub slug: Option<String>,
    #[validate(
        required(message = "Product description is required"),
        length(
            min = DESCRIPTION_MIN_LEN,
            message = "Too short product description"
        )
    )]
    pub description: Option<String>,
    #[validate(required(message = "Product quantity is required"))]
    pub quantity: Option<i32>,
    /// Units sold so far, 0 when omitted.
    pub sold: Option<i32>,
    #[validate(
        required(message = "Product price is required"),
        range(max = PRICE_MAX, message = "Too long product price")
    )]
    pub price: Option<f64>,
    #[serde(alias = "priceAfterDiscount")]
    pub price_after_discount: Option<f64>,
    pub colors: Vec<String>,
    /// Bare filename of the cover image.
    #[serde(alias = "imageCover")]
    #[validate(required(message = "Product Image cover is required"))]
    pub image_cover: Option<String>,
    /// Bare filenames of the gallery images.
    #[serde(alias = "image")]
    pub images: Vec<String>,
    /// Main category identifier.
    #[validate(required(message = "Product must belong to main category"))]
    pub category: Option<i32>,
    pub subcategories: Vec<i32>,
    pub brand: Option<i32>,
    #[serde(alias = "ratingsAverage")]
    #[validate(custom(function = "validate_ratings_average"))]
    pub ratings_average: Option<f64>,
    /// Number of ratings, 0 when omitted.
    #[serde(alias = "ratingsQuantity")]
    pub ratings_quantity: Option<i32>,
}

/// Normalized values of a candidate that passed every rule.
struct ValidProduct {
    title: String,
    slug: String,
    description: String,
    quantity: i32,
    sold: i32,
    price: f64,
    price_after_discount: Option<f64>,
    colors: Vec<String>,
    image_cover: String,
    images: Vec<String>,
    category_id: i32,
    subcategory_ids: Vec<i32>,
    brand_id: Option<i32>,
    ratings_average: Option<f64>,
    ratings_quantity: i32,
}

impl AddProductForm {
    /// Validates and normalizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self, hub_id: i32) -> ProductFormResult<NewProduct> {
        let valid = self.into_valid()?;

        Ok(NewProduct {
            hub_id,
            title: valid.title,
            slug: valid.slug,
            description: valid.description,
            quantity: valid.quantity,
            sold: valid.sold,
            price: valid.price,
            price_after_discount: valid.price_after_discount,
            colors: valid.colors,
            image_cover: valid.image_cover,
            images: valid.images,
            category_id: valid.category_id,
            subcategory_ids: valid.subcategory_ids,
            brand_id: valid.brand_id,
            ratings_average: valid.ratings_average,
            ratings_quantity: valid.ratings_quantity,
            updated_at: Local::now().naive_utc(),
        })
    }

    /// Trim the title and lowercase the slug; empty text counts as missing.
    fn normalized(mut self) -> Self {
        self.title = self
            .title
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty());
        self.slug = self
            .slug
            .map(|slug| slug.to_lowercase())
            .filter(|slug| !slug.trim().is_empty());
        self.description = self
            .description
            .filter(|description| !description.is_empty());
        self.image_cover = self
            .image_cover
            .filter(|image_cover| !image_cover.trim().is_empty());
        self
    }

    fn into_valid(self) -> ProductFormResult<ValidProduct> {
        let form = self.normalized();
        form.validate()?;

        let AddProductForm {
            title: Some(title),
            slug: Some(slug),
            description: Some(description),
            quantity: Some(quantity),
            sold,
            price: Some(price),
            price_after_discount,
            colors,
            image_cover: Some(image_cover),
            images,
            category: Some(category_id),
            subcategories,
            brand,
            ratings_average,
            ratings_quantity,
        } = form
        else {
            return Err(ProductViolations::single(
                "product",
                "required",
                "Product is missing required fields",
            ));
        };

        Ok(ValidProduct {
            title,
            slug,
            description,
            quantity,
            sold: sold.unwrap_or(0),
            price,
            price_after_discount,
            colors,
            image_cover,
            images,
            category_id,
            subcategory_ids: subcategories,
            brand_id: brand,
            ratings_average,
            ratings_quantity: ratings_quantity.unwrap_or(0),
        })
    }
}

/// Patch submitted when editing an existing product.
///
/// Absent fields keep their stored value. For `price_after_discount`, `brand`
/// and `ratings_average` an explicit `null` clears the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EditProductForm {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub sold: Option<i32>,
    pub price: Option<f64>,
    #[serde(alias = "priceAfterDiscount", deserialize_with = "double_option")]
    pub price_after_discount: Option<Option<f64>>,
    pub colors: Option<Vec<String>>,
    #[serde(alias = "imageCover")]
    pub image_cover: Option<String>,
    #[serde(alias = "image")]
    pub images: Option<Vec<String>>,
    pub category: Option<i32>,
    pub subcategories: Option<Vec<i32>>,
    #[serde(deserialize_with = "double_option")]
    pub brand: Option<Option<i32>>,
    #[serde(alias = "ratingsAverage", deserialize_with = "double_option")]
    pub ratings_average: Option<Option<f64>>,
    #[serde(alias = "ratingsQuantity")]
    pub ratings_quantity: Option<i32>,
}

impl EditProductForm {
    /// Merge the patch onto the stored record and re-apply the creation rules.
    ///
    /// `current` must carry stored values (bare filenames), as returned by a
    /// repository read.
    pub fn into_update_product(self, current: &Product) -> ProductFormResult<UpdateProduct> {
        let valid = self.merge_onto(current).into_valid()?;

        Ok(UpdateProduct {
            title: valid.title,
            slug: valid.slug,
            description: valid.description,
            quantity: valid.quantity,
            sold: valid.sold,
            price: valid.price,
            price_after_discount: valid.price_after_discount,
            colors: valid.colors,
            image_cover: valid.image_cover,
            images: valid.images,
            category_id: valid.category_id,
            subcategory_ids: valid.subcategory_ids,
            brand_id: valid.brand_id,
            ratings_average: valid.ratings_average,
            ratings_quantity: valid.ratings_quantity,
            updated_at: Local::now().naive_utc(),
        })
    }

    fn merge_onto(self, current: &Product) -> AddProductForm {
        AddProductForm {
            title: Some(self.title.unwrap_or_else(|| current.title.clone())),
            slug: Some(self.slug.unwrap_or_else(|| current.slug.clone())),
            description: Some(
                self.description
                    .unwrap_or_else(|| current.description.clone()),
            ),
            quantity: Some(self.quantity.unwrap_or(current.quantity)),
            sold: Some(self.sold.unwrap_or(current.sold)),
            price: Some(self.price.unwrap_or(current.price)),
            price_after_discount: self
                .price_after_discount
                .unwrap_or(current.price_after_discount),
            colors: self.colors.unwrap_or_else(|| current.colors.clone()),
            image_cover: Some(
                self.image_cover
                    .unwrap_or_else(|| current.image_cover.clone()),
            ),
            images: self.images.unwrap_or_else(|| current.images.clone()),
            category: Some(self.category.unwrap_or(current.category.id)),
            subcategories: self
                .subcategories
                .unwrap_or_else(|| current.subcategory_ids.clone()),
            brand: self.brand.unwrap_or(current.brand_id),
            ratings_average: self.ratings_average.unwrap_or(current.ratings_average),
            ratings_quantity: Some(self.ratings_quantity.unwrap_or(current.ratings_quantity)),
        }
    }
}

/// Keep `null` distinguishable from an absent field.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn rule_violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    let length = title.chars().count();
    if length < TITLE_MIN_LEN {
        return Err(rule_violation("length", "Too short product title"));
    }
    if length > TITLE_MAX_LEN {
        return Err(rule_violation("length", "Too long product title"));
    }
    Ok(())
}

fn validate_ratings_average(value: f64) -> Result<(), ValidationError> {
    if value < RATING_MIN {
        return Err(rule_violation(
            "range",
            "Rating must be above or equal to 1.0",
        ));
    }
    if value > RATING_MAX {
        return Err(rule_violation(
            "range",
            "Rating must be below or equal to 5.0",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::tests::stored_product;

    fn red_shirt() -> AddProductForm {
        AddProductForm {
            title: Some("Red Shirt".to_string()),
            slug: Some("red-shirt".to_string()),
            description: Some("A soft cotton red shirt.!".to_string()),
            quantity: Some(10),
            price: Some(19.99),
            image_cover: Some("shirt.png".to_string()),
            category: Some(4),
            ..AddProductForm::default()
        }
    }

    #[test]
    fn add_product_form_converts_successfully() {
        let form = AddProductForm {
            title: Some("  Red Shirt  ".to_string()),
            slug: Some("Red-SHIRT".to_string()),
            colors: vec!["red".to_string(), "blue".to_string()],
            images: vec!["a.png".to_string(), "b.png".to_string()],
            subcategories: vec![8, 9],
            brand: Some(3),
            ..red_shirt()
        };

        let new_product = form.into_new_product(42).expect("expected success");

        assert_eq!(new_product.hub_id, 42);
        assert_eq!(new_product.title, "Red Shirt");
        assert_eq!(new_product.slug, "red-shirt");
        assert_eq!(new_product.description.chars().count(), 25);
        assert_eq!(new_product.sold, 0);
        assert_eq!(new_product.ratings_quantity, 0);
        assert_eq!(new_product.image_cover, "shirt.png");
        assert_eq!(new_product.images, vec!["a.png", "b.png"]);
        assert_eq!(new_product.colors, vec!["red", "blue"]);
        assert_eq!(new_product.category_id, 4);
        assert_eq!(new_product.subcategory_ids, vec![8, 9]);
        assert_eq!(new_product.brand_id, Some(3));
    }

    #[test]
    fn missing_category_is_reported() {
        let form = AddProductForm {
            category: None,
            ..red_shirt()
        };

        let violations = form.into_new_product(1).expect_err("expected violations");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations.fields(), vec!["category"]);
        assert!(violations.contains_message("Product must belong to main category"));
    }

    #[test]
    fn every_missing_field_is_reported_at_once() {
        let violations = AddProductForm::default()
            .into_new_product(1)
            .expect_err("expected violations");

        assert_eq!(
            violations.fields(),
            vec![
                "title",
                "slug",
                "description",
                "quantity",
                "price",
                "image_cover",
                "category",
            ]
        );
        assert!(violations.iter().all(|violation| violation.rule == "required"));
        assert!(violations.contains_message("Product quantity is required"));
        assert!(violations.contains_message("Product price is required"));
        assert!(violations.contains_message("Product Image cover is required"));
    }

    #[test]
    fn title_length_is_checked_after_trimming() {
        let short = AddProductForm {
            title: Some("  ab   ".to_string()),
            ..red_shirt()
        };
        let long = AddProductForm {
            title: Some("x".repeat(101)),
            ..red_shirt()
        };
        let boundary = AddProductForm {
            title: Some(format!("  {}  ", "x".repeat(100))),
            ..red_shirt()
        };

        let short = short.into_new_product(1).expect_err("too short");
        let long = long.into_new_product(1).expect_err("too long");

        assert_eq!(short.messages(), vec!["Too short product title"]);
        assert_eq!(long.messages(), vec!["Too long product title"]);
        assert!(boundary.into_new_product(1).is_ok());
    }

    #[test]
    fn blank_title_counts_as_missing() {
        let form = AddProductForm {
            title: Some("    ".to_string()),
            ..red_shirt()
        };

        let violations = form.into_new_product(1).expect_err("expected violations");

        assert_eq!(violations.messages(), vec!["Product title is required"]);
    }

    #[test]
    fn short_description_is_reported() {
        let form = AddProductForm {
            description: Some("Too short".to_string()),
            ..red_shirt()
        };

        let violations = form.into_new_product(1).expect_err("expected violations");

        assert_eq!(violations.messages(), vec!["Too short product description"]);
        assert_eq!(violations.iter().next().map(|v| v.rule.as_str()), Some("length"));
    }

    #[test]
    fn title_lower_bound_is_inclusive() {
        let form = AddProductForm {
            title: Some(" abc ".to_string()),
            ..red_shirt()
        };

        let new_product = form.into_new_product(1).expect("expected success");

        assert_eq!(new_product.title, "abc");
    }

    #[test]
    fn description_lower_bound_counts_characters() {
        for description in ["x".repeat(19), "é".repeat(19)] {
            let form = AddProductForm {
                description: Some(description),
                ..red_shirt()
            };
            let violations = form.into_new_product(1).expect_err("19 characters");
            assert_eq!(violations.messages(), vec!["Too short product description"]);
        }

        for description in ["x".repeat(20), "é".repeat(20)] {
            let form = AddProductForm {
                description: Some(description),
                ..red_shirt()
            };
            assert!(form.into_new_product(1).is_ok());
        }
    }

    #[test]
    fn price_upper_bound_is_inclusive() {
        let at_limit = AddProductForm {
            price: Some(2_000_000.0),
            ..red_shirt()
        };
        let over_limit = AddProductForm {
            price: Some(2_000_000.01),
            ..red_shirt()
        };

        assert!(at_limit.into_new_product(1).is_ok());
        let violations = over_limit.into_new_product(1).expect_err("over limit");
        assert_eq!(violations.messages(), vec!["Too long product price"]);
    }

    #[test]
    fn ratings_average_must_be_within_range() {
        let below = AddProductForm {
            ratings_average: Some(0.5),
            ..red_shirt()
        };
        let above = AddProductForm {
            ratings_average: Some(5.5),
            ..red_shirt()
        };

        let below = below.into_new_product(1).expect_err("below range");
        let above = above.into_new_product(1).expect_err("above range");

        assert_eq!(below.messages(), vec!["Rating must be above or equal to 1.0"]);
        assert_eq!(above.messages(), vec!["Rating must be below or equal to 5.0"]);

        for rating in [1.0, 3.7, 5.0] {
            let form = AddProductForm {
                ratings_average: Some(rating),
                ..red_shirt()
            };
            assert!(form.into_new_product(1).is_ok(), "rating {rating} rejected");
        }
    }

    #[test]
    fn unrelated_violations_are_collected_together() {
        let form = AddProductForm {
            title: Some("ab".to_string()),
            description: Some("short".to_string()),
            price: Some(3_000_000.0),
            ratings_average: Some(9.0),
            category: None,
            ..red_shirt()
        };

        let violations = form.into_new_product(1).expect_err("expected violations");

        assert_eq!(
            violations.fields(),
            vec![
                "title",
                "description",
                "price",
                "category",
                "ratings_average"
            ]
        );
    }

    #[test]
    fn deserializes_camel_case_field_names() {
        let form: AddProductForm = serde_json::from_value(serde_json::json!({
            "title": "Red Shirt",
            "slug": "RED-SHIRT",
            "description": "A soft cotton red shirt.!",
            "quantity": 10,
            "price": 19.99,
            "imageCover": "shirt.png",
            "image": ["a.png", "b.png"],
            "category": 4,
            "ratingsAverage": 4.5
        }))
        .expect("valid json");

        let new_product = form.into_new_product(1).expect("expected success");

        assert_eq!(new_product.slug, "red-shirt");
        assert_eq!(new_product.image_cover, "shirt.png");
        assert_eq!(new_product.images, vec!["a.png", "b.png"]);
        assert_eq!(new_product.ratings_average, Some(4.5));
    }

    #[test]
    fn edit_product_form_keeps_stored_values() {
        let mut current = stored_product(1, 1);
        current.brand_id = Some(3);
        current.sold = 4;

        let form = EditProductForm {
            title: Some(" Blue Shirt ".to_string()),
            slug: Some("Blue-Shirt".to_string()),
            ..EditProductForm::default()
        };

        let updates = form.into_update_product(&current).expect("expected success");

        assert_eq!(updates.title, "Blue Shirt");
        assert_eq!(updates.slug, "blue-shirt");
        assert_eq!(updates.description, current.description);
        assert_eq!(updates.image_cover, "shirt.png");
        assert_eq!(updates.images, current.images);
        assert_eq!(updates.category_id, current.category.id);
        assert_eq!(updates.brand_id, Some(3));
        assert_eq!(updates.sold, 4);
    }

    #[test]
    fn edit_product_form_clears_with_explicit_null() {
        let mut current = stored_product(1, 1);
        current.brand_id = Some(3);
        current.price_after_discount = Some(15.0);

        let form: EditProductForm = serde_json::from_value(serde_json::json!({
            "brand": null,
            "priceAfterDiscount": 12.5
        }))
        .expect("valid json");

        let updates = form.into_update_product(&current).expect("expected success");

        assert_eq!(updates.brand_id, None);
        assert_eq!(updates.price_after_discount, Some(12.5));
    }

    #[test]
    fn edit_product_form_reapplies_rules() {
        let current = stored_product(1, 1);
        let form = EditProductForm {
            description: Some("short".to_string()),
            ratings_average: Some(Some(0.0)),
            ..EditProductForm::default()
        };

        let violations = form
            .into_update_product(&current)
            .expect_err("expected violations");

        assert!(violations.contains_message("Too short product description"));
        assert!(violations.contains_message("Rating must be above or equal to 1.0"));
    }
}
