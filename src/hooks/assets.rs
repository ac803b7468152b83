use std::env;

use crate::domain::product::Product;
use crate::hooks::{HookError, HookResult, Materialized, MaterializeHook};

/// Environment variable holding the public base address of product assets.
pub const BASE_URL_ENV: &str = "BASE_URL";

/// Rewrites stored image filenames into public URLs.
///
/// The transform is not idempotent: running it on a record that already
/// carries URLs prefixes them again. The catalog only hands it records that
/// were just read from or written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUrlDeriver {
    base_url: String,
}

impl AssetUrlDeriver {
    /// Build a deriver for `base_url`. A trailing `/` is dropped.
    pub fn new(base_url: impl Into<String>) -> HookResult<Self> {
        let base_url = base_url.into();
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(HookError::MissingConfiguration(BASE_URL_ENV));
        }

        Ok(Self {
            base_url: base_url.to_string(),
        })
    }

    /// Build a deriver from the `BASE_URL` environment variable.
    pub fn from_env() -> HookResult<Self> {
        let base_url =
            env::var(BASE_URL_ENV).map_err(|_| HookError::MissingConfiguration(BASE_URL_ENV))?;
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cover_url(&self, file_name: &str) -> String {
        format!("{}/products/-cover-{file_name}", self.base_url)
    }

    pub fn image_url(&self, file_name: &str) -> String {
        format!("{}/products/{file_name}", self.base_url)
    }

    /// Rewrite the cover and gallery filenames of `product` in place.
    ///
    /// An empty cover is left as is; gallery order and length are preserved.
    pub fn derive(&self, product: &mut Product) {
        if !product.image_cover.is_empty() {
            product.image_cover = self.cover_url(&product.image_cover);
        }

        product.images = product
            .images
            .iter()
            .map(|file_name| self.image_url(file_name))
            .collect();
    }
}

impl MaterializeHook for AssetUrlDeriver {
    fn after_materialize(&self, _event: Materialized, product: &mut Product) -> HookResult<()> {
        self.derive(product);
        Ok(())
    }
}
