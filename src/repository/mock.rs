use mockall::mock;

use super::{ProductReader, ProductWriter, ReviewReader};
use crate::domain::{
    product::{NewProduct, Populate, Product, ProductListQuery, UpdateProduct},
    review::{Review, ReviewListQuery},
};
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32, hub_id: i32, populate: Populate) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: &ProductListQuery) -> RepositoryResult<Vec<Product>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, hub_id: i32, updates: &UpdateProduct, populate: Populate) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ReviewReader {}

    impl ReviewReader for ReviewReader {
        fn list_reviews(&self, query: &ReviewListQuery) -> RepositoryResult<Vec<Review>>;
    }
}
