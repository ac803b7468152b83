use pushkind_common::repository::errors::RepositoryError;
use thiserror::Error;

use crate::domain::product::{NewProduct, Populate, Product, ProductListQuery, UpdateProduct};
use crate::domain::review::Review;
use crate::hooks::{HookError, Materialized, ProductPipeline};
use crate::repository::{ProductReader, ProductWriter, ReviewReader};

/// Result type returned by [`ProductCatalog`].
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while accessing products through the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    Repository(RepositoryError),
    #[error(transparent)]
    Hook(#[from] HookError),
}

impl From<RepositoryError> for CatalogError {
    fn from(value: RepositoryError) -> Self {
        Self::Repository(value)
    }
}

/// Product access with the lifecycle pipeline applied.
///
/// Every read plans its relations through the read hooks and every record
/// coming back from the repository is materialized exactly once, so callers
/// never see stored filenames and never have to run a hook themselves.
pub struct ProductCatalog<'a, R: ?Sized> {
    repo: &'a R,
    pipeline: &'a ProductPipeline,
}

impl<'a, R: ?Sized> ProductCatalog<'a, R> {
    pub fn new(repo: &'a R, pipeline: &'a ProductPipeline) -> Self {
        Self { repo, pipeline }
    }

    fn plan_read(&self, mut populate: Populate) -> CatalogResult<Populate> {
        self.pipeline.before_read(&mut populate)?;
        Ok(populate)
    }
}

impl<R> ProductCatalog<'_, R>
where
    R: ProductReader + ?Sized,
{
    /// Fetch a single product of the hub.
    pub fn find_one(&self, product_id: i32, hub_id: i32) -> CatalogResult<Option<Product>> {
        let populate = self.plan_read(Populate::none())?;

        match self.repo.get_product_by_id(product_id, hub_id, populate)? {
            Some(product) => Ok(Some(
                self.pipeline
                    .materialize(Materialized::Read(populate), product)?,
            )),
            None => Ok(None),
        }
    }

    /// Fetch every product matching `query`.
    pub fn find_many(&self, query: ProductListQuery) -> CatalogResult<Vec<Product>> {
        let populate = self.plan_read(query.populate)?;
        let query = query.populate(populate);

        let products = self.repo.list_products(&query)?;

        Ok(self
            .pipeline
            .materialize_all(Materialized::Read(populate), products)?)
    }
}

impl<R> ProductCatalog<'_, R>
where
    R: ProductWriter + ?Sized,
{
    /// Persist a validated product and return it materialized.
    pub fn create(&self, new_product: &NewProduct) -> CatalogResult<Product> {
        let created = self.repo.create_product(new_product)?;

        Ok(self.pipeline.materialize(Materialized::Saved, created)?)
    }

    /// Replace a product and return the updated record, read-style.
    pub fn update(
        &self,
        product_id: i32,
        hub_id: i32,
        updates: &UpdateProduct,
    ) -> CatalogResult<Product> {
        let populate = self.plan_read(Populate::none())?;

        let updated = self
            .repo
            .update_product(product_id, hub_id, updates, populate)?;

        Ok(self
            .pipeline
            .materialize(Materialized::Read(populate), updated)?)
    }

    pub fn delete(&self, product_id: i32, hub_id: i32) -> CatalogResult<()> {
        Ok(self.repo.delete_product(product_id, hub_id)?)
    }
}

impl<R> ProductCatalog<'_, R>
where
    R: ReviewReader + ?Sized,
{
    /// Resolve the reverse relation: reviews whose `product_id` is `product`'s.
    pub fn reviews(&self, product: &Product) -> CatalogResult<Vec<Review>> {
        Ok(self.repo.list_reviews(&product.reviews_query())?)
    }
}

#[cfg(test)]
mod tests {
    use pushkind_common::repository::errors::RepositoryResult;

    use super::*;
    use crate::domain::product::ProductCategory;
    use crate::domain::review::ReviewListQuery;
    use crate::hooks::AssetUrlDeriver;
    use crate::hooks::tests::{fixed_datetime, stored_product};
    use crate::repository::mock::{MockProductReader, MockProductWriter, MockReviewReader};

    fn pipeline() -> ProductPipeline {
        ProductPipeline::standard(
            AssetUrlDeriver::new("https://cdn.example.com").expect("valid base url"),
        )
    }

    fn with_category_name(mut product: Product, name: &str) -> Product {
        product.category.name = Some(name.to_string());
        product
    }

    struct FakeRepo {
        reader: MockProductReader,
        writer: MockProductWriter,
        reviews: MockReviewReader,
    }

    impl FakeRepo {
        fn new() -> Self {
            Self {
                reader: MockProductReader::new(),
                writer: MockProductWriter::new(),
                reviews: MockReviewReader::new(),
            }
        }
    }

    impl ProductReader for FakeRepo {
        fn get_product_by_id(
            &self,
            id: i32,
            hub_id: i32,
            populate: Populate,
        ) -> RepositoryResult<Option<Product>> {
            self.reader.get_product_by_id(id, hub_id, populate)
        }

        fn list_products(&self, query: &ProductListQuery) -> RepositoryResult<Vec<Product>> {
            self.reader.list_products(query)
        }
    }

    impl ProductWriter for FakeRepo {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
            self.writer.create_product(new_product)
        }

        fn update_product(
            &self,
            product_id: i32,
            hub_id: i32,
            updates: &UpdateProduct,
            populate: Populate,
        ) -> RepositoryResult<Product> {
            self.writer
                .update_product(product_id, hub_id, updates, populate)
        }

        fn delete_product(&self, product_id: i32, hub_id: i32) -> RepositoryResult<()> {
            self.writer.delete_product(product_id, hub_id)
        }
    }

    impl ReviewReader for FakeRepo {
        fn list_reviews(&self, query: &ReviewListQuery) -> RepositoryResult<Vec<Review>> {
            self.reviews.list_reviews(query)
        }
    }

    #[test]
    fn find_one_populates_category_and_derives_urls() {
        let mut repo = FakeRepo::new();
        repo.reader
            .expect_get_product_by_id()
            .times(1)
            .withf(|id, hub_id, populate| *id == 1 && *hub_id == 2 && populate.category)
            .returning(|id, hub_id, _| {
                Ok(Some(with_category_name(stored_product(id, hub_id), "Shirts")))
            });
        let pipeline = pipeline();

        let product = ProductCatalog::new(&repo, &pipeline)
            .find_one(1, 2)
            .expect("find")
            .expect("product exists");

        assert_eq!(product.category.name.as_deref(), Some("Shirts"));
        assert_eq!(
            product.image_cover,
            "https://cdn.example.com/products/-cover-shirt.png"
        );
    }

    #[test]
    fn find_one_returns_none_for_missing_product() {
        let mut repo = FakeRepo::new();
        repo.reader
            .expect_get_product_by_id()
            .returning(|_, _, _| Ok(None));
        let pipeline = pipeline();

        let result = ProductCatalog::new(&repo, &pipeline).find_one(1, 2);

        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn find_many_plans_population_for_the_whole_query() {
        let mut repo = FakeRepo::new();
        repo.reader
            .expect_list_products()
            .times(1)
            .withf(|query| query.populate.category && query.category_id == Some(4))
            .returning(|query| {
                Ok(vec![
                    with_category_name(stored_product(1, query.hub_id), "Shirts"),
                    with_category_name(stored_product(2, query.hub_id), "Shirts"),
                ])
            });
        let pipeline = pipeline();

        let products = ProductCatalog::new(&repo, &pipeline)
            .find_many(ProductListQuery::new(3).category(4))
            .expect("list");

        assert_eq!(products.len(), 2);
        for product in products {
            assert_eq!(product.category.name.as_deref(), Some("Shirts"));
            assert_eq!(
                product.images,
                vec![
                    "https://cdn.example.com/products/a.png".to_string(),
                    "https://cdn.example.com/products/b.png".to_string(),
                ]
            );
        }
    }

    #[test]
    fn dangling_category_fails_the_read() {
        let mut repo = FakeRepo::new();
        repo.reader
            .expect_get_product_by_id()
            .returning(|id, hub_id, _| Ok(Some(stored_product(id, hub_id))));
        let pipeline = pipeline();

        let result = ProductCatalog::new(&repo, &pipeline).find_one(7, 1);

        assert!(matches!(
            result,
            Err(CatalogError::Hook(HookError::RelationshipResolution {
                product_id: 7,
                category_id: 4
            }))
        ));
    }

    #[test]
    fn create_derives_urls_without_populating() {
        let mut repo = FakeRepo::new();
        repo.writer
            .expect_create_product()
            .times(1)
            .returning(|new_product| {
                let mut product = stored_product(11, new_product.hub_id);
                product.category = ProductCategory::unresolved(new_product.category_id);
                Ok(product)
            });
        let pipeline = pipeline();

        let new_product = NewProduct {
            hub_id: 1,
            title: "Red Shirt".to_string(),
            slug: "red-shirt".to_string(),
            description: "A soft cotton red shirt.".to_string(),
            quantity: 10,
            sold: 0,
            price: 19.99,
            price_after_discount: None,
            colors: Vec::new(),
            image_cover: "shirt.png".to_string(),
            images: Vec::new(),
            category_id: 4,
            subcategory_ids: Vec::new(),
            brand_id: None,
            ratings_average: None,
            ratings_quantity: 0,
            updated_at: fixed_datetime(),
        };

        let product = ProductCatalog::new(&repo, &pipeline)
            .create(&new_product)
            .expect("create");

        assert_eq!(product.id, 11);
        assert!(product.category.name.is_none());
        assert_eq!(
            product.image_cover,
            "https://cdn.example.com/products/-cover-shirt.png"
        );
    }

    #[test]
    fn repository_errors_are_passed_through() {
        let mut repo = FakeRepo::new();
        repo.writer
            .expect_delete_product()
            .returning(|_, _| Err(RepositoryError::NotFound));
        let pipeline = pipeline();

        let result = ProductCatalog::new(&repo, &pipeline).delete(1, 1);

        assert!(matches!(
            result,
            Err(CatalogError::Repository(RepositoryError::NotFound))
        ));
    }

    #[test]
    fn reviews_are_looked_up_by_back_reference() {
        let mut repo = FakeRepo::new();
        repo.reviews
            .expect_list_reviews()
            .times(1)
            .withf(|query| *query == ReviewListQuery::new(2).product(1))
            .returning(|_| {
                Ok(vec![Review {
                    id: 3,
                    hub_id: 2,
                    product_id: 1,
                    title: Some("Great".to_string()),
                    ratings: 4.5,
                    created_at: fixed_datetime(),
                    updated_at: fixed_datetime(),
                }])
            });
        let pipeline = pipeline();

        let reviews = ProductCatalog::new(&repo, &pipeline)
            .reviews(&stored_product(1, 2))
            .expect("reviews");

        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].product_id, 1);
    }
}
