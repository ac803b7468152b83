use crate::domain::product::{Populate, Product};
use crate::hooks::{HookError, HookResult, MaterializeHook, Materialized, ReadHook};

/// Attaches the main category's display name to every read.
///
/// Before the read it asks the repository for the name; afterwards it fails
/// the read when the referenced category is gone.
#[derive(Debug, Clone, Copy, Default)]
pub struct PopulateCategory;

impl ReadHook for PopulateCategory {
    fn before_read(&self, populate: &mut Populate) -> HookResult<()> {
        populate.category = true;
        Ok(())
    }
}

impl MaterializeHook for PopulateCategory {
    fn after_materialize(&self, event: Materialized, product: &mut Product) -> HookResult<()> {
        if let Materialized::Read(populate) = event
            && populate.category
            && !product.category.is_populated()
        {
            return Err(HookError::RelationshipResolution {
                product_id: product.id,
                category_id: product.category.id,
            });
        }
        Ok(())
    }
}
