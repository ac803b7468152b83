use diesel::dsl::{exists, select};
use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::subcategory::{
    NewSubCategory as DomainNewSubCategory, SubCategory as DomainSubCategory,
};
use crate::models::subcategory::{NewSubCategory as DbNewSubCategory, SubCategory as DbSubCategory};
use crate::repository::{DieselRepository, SubCategoryWriter};

impl SubCategoryWriter for DieselRepository {
    fn create_subcategory(
        &self,
        new_subcategory: &DomainNewSubCategory,
    ) -> RepositoryResult<DomainSubCategory> {
        use crate::schema::{categories, subcategories};

        let mut conn = self.conn()?;

        let parent_exists = select(exists(
            categories::table
                .filter(categories::id.eq(new_subcategory.category_id))
                .filter(categories::hub_id.eq(new_subcategory.hub_id)),
        ))
        .get_result::<bool>(&mut conn)?;

        if !parent_exists {
            return Err(RepositoryError::NotFound);
        }

        let insertable = DbNewSubCategory::from(new_subcategory);

        let created = diesel::insert_into(subcategories::table)
            .values(&insertable)
            .get_result::<DbSubCategory>(&mut conn)?;

        Ok(created.into())
    }
}
