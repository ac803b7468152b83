//! Lifecycle hooks applied to products by the persistence-access layer.
//!
//! A [`ProductPipeline`] is built once at startup and handed to
//! [`crate::repository::catalog::ProductCatalog`], which runs the read hooks
//! before every read-style query and the materialize hooks on every record it
//! hands back.

use std::fmt;

use thiserror::Error;

use crate::domain::product::{Populate, Product};

pub mod assets;
pub mod category;

pub use assets::AssetUrlDeriver;
pub use category::PopulateCategory;

/// Result type returned by lifecycle hooks.
pub type HookResult<T> = Result<T, HookError>;

/// Errors raised by lifecycle hooks. A failing hook aborts the operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HookError {
    /// A setting required by a hook is unset or blank.
    #[error("missing configuration value `{0}`")]
    MissingConfiguration(&'static str),
    /// The category referenced by a product could not be resolved.
    #[error("product {product_id} references category {category_id} which does not exist")]
    RelationshipResolution { product_id: i32, category_id: i32 },
}

/// Lifecycle point at which a product record was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialized {
    /// Loaded by a read-style operation that ran with the given plan.
    Read(Populate),
    /// Returned right after being persisted for the first time.
    Saved,
}

/// Runs before a read-style operation executes and may widen what it loads.
pub trait ReadHook: Send + Sync {
    fn before_read(&self, populate: &mut Populate) -> HookResult<()>;
}

/// Runs once on every record produced from storage or by a save.
pub trait MaterializeHook: Send + Sync {
    fn after_materialize(&self, event: Materialized, product: &mut Product) -> HookResult<()>;
}

/// Ordered set of lifecycle hooks for products.
#[derive(Default)]
pub struct ProductPipeline {
    read_hooks: Vec<Box<dyn ReadHook>>,
    materialize_hooks: Vec<Box<dyn MaterializeHook>>,
}

impl ProductPipeline {
    /// Pipeline without any hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Category population on every read followed by asset URL derivation.
    pub fn standard(assets: AssetUrlDeriver) -> Self {
        Self::new()
            .with_read_hook(PopulateCategory)
            .with_materialize_hook(PopulateCategory)
            .with_materialize_hook(assets)
    }

    pub fn with_read_hook(mut self, hook: impl ReadHook + 'static) -> Self {
        self.read_hooks.push(Box::new(hook));
        self
    }

    pub fn with_materialize_hook(mut self, hook: impl MaterializeHook + 'static) -> Self {
        self.materialize_hooks.push(Box::new(hook));
        self
    }

    /// Run every read hook against the plan of the upcoming read.
    pub fn before_read(&self, populate: &mut Populate) -> HookResult<()> {
        for hook in &self.read_hooks {
            hook.before_read(populate)?;
        }
        Ok(())
    }

    /// Run every materialize hook, in registration order, on one record.
    pub fn materialize(&self, event: Materialized, mut product: Product) -> HookResult<Product> {
        for hook in &self.materialize_hooks {
            if let Err(err) = hook.after_materialize(event, &mut product) {
                log::warn!("Lifecycle hook failed for product {}: {err}", product.id);
                return Err(err);
            }
        }
        Ok(product)
    }

    /// Materialize every record of a result set.
    pub fn materialize_all(
        &self,
        event: Materialized,
        products: Vec<Product>,
    ) -> HookResult<Vec<Product>> {
        products
            .into_iter()
            .map(|product| self.materialize(event, product))
            .collect()
    }
}

impl fmt::Debug for ProductPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductPipeline")
            .field("read_hooks", &self.read_hooks.len())
            .field("materialize_hooks", &self.materialize_hooks.len())
            .finish()
    }
}
