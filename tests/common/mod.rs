//! Helpers for integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_common::db::{DbPool, establish_connection_pool};
use pushkind_common::domain::auth::AuthenticatedUser;
use tempfile::TempDir;

use pushkind_catalog::SERVICE_ACCESS_ROLE;
use pushkind_catalog::domain::brand::NewBrand;
use pushkind_catalog::domain::category::NewCategory;
use pushkind_catalog::domain::product::NewProduct;
use pushkind_catalog::domain::subcategory::NewSubCategory;
use pushkind_catalog::hooks::{AssetUrlDeriver, ProductPipeline};
use pushkind_catalog::repository::{
    BrandWriter, CategoryWriter, DieselRepository, SubCategoryWriter,
};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

pub const BASE_URL: &str = "https://cdn.example.com";

/// Temporary database used in integration tests.
///
/// The database file lives in its own temporary directory, which is removed
/// together with any `-shm`/`-wal` companions when the value is dropped.
pub struct TestDb {
    dir: TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory.");
        let path = dir.path().join(filename);
        let database_url = path.to_str().expect("Temporary path is not UTF-8.");

        let pool =
            establish_connection_pool(database_url).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb { dir, path, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// Category, subcategory and brand rows a product can reference.
pub struct Catalog {
    pub category_id: i32,
    pub subcategory_ids: Vec<i32>,
    pub brand_id: i32,
}

pub fn seed_catalog(repo: &DieselRepository, hub_id: i32) -> Catalog {
    let category = repo
        .create_category(&NewCategory::new(hub_id, "Shirts"))
        .expect("create category");
    let summer = repo
        .create_subcategory(&NewSubCategory::new(hub_id, category.id, "Summer"))
        .expect("create subcategory");
    let cotton = repo
        .create_subcategory(&NewSubCategory::new(hub_id, category.id, "Cotton"))
        .expect("create subcategory");
    let brand = repo
        .create_brand(&NewBrand::new(hub_id, "Acme"))
        .expect("create brand");

    Catalog {
        category_id: category.id,
        subcategory_ids: vec![cotton.id, summer.id],
        brand_id: brand.id,
    }
}

pub fn fixed_datetime() -> NaiveDateTime {
    chrono::DateTime::from_timestamp(1_704_067_200, 0)
        .map(|datetime| datetime.naive_utc())
        .unwrap_or_default()
}

pub fn red_shirt(hub_id: i32, category_id: i32) -> NewProduct {
    NewProduct {
        hub_id,
        title: "Red Shirt".to_string(),
        slug: "red-shirt".to_string(),
        description: "A soft cotton red shirt.!".to_string(),
        quantity: 10,
        sold: 0,
        price: 19.99,
        price_after_discount: None,
        colors: vec!["red".to_string(), "white".to_string()],
        image_cover: "shirt.png".to_string(),
        images: vec!["a.png".to_string(), "b.png".to_string()],
        category_id,
        subcategory_ids: Vec::new(),
        brand_id: None,
        ratings_average: None,
        ratings_quantity: 0,
        updated_at: fixed_datetime(),
    }
}

pub fn pipeline() -> ProductPipeline {
    ProductPipeline::standard(AssetUrlDeriver::new(BASE_URL).expect("valid base url"))
}

pub fn admin(hub_id: i32) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "user".into(),
        email: "user@example.com".into(),
        hub_id,
        name: "User".into(),
        roles: vec![SERVICE_ACCESS_ROLE.to_string()],
        exp: 0,
    }
}
