use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::brand::{Brand as DomainBrand, NewBrand as DomainNewBrand};
use crate::models::brand::{Brand as DbBrand, NewBrand as DbNewBrand};
use crate::repository::{BrandWriter, DieselRepository};

impl BrandWriter for DieselRepository {
    fn create_brand(&self, new_brand: &DomainNewBrand) -> RepositoryResult<DomainBrand> {
        use crate::schema::brands;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(brands::table)
            .values(&DbNewBrand::from(new_brand))
            .get_result::<DbBrand>(&mut conn)?;

        Ok(created.into())
    }
}
