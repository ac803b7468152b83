use diesel::dsl::{exists, select};
use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::review::{
    NewReview as DomainNewReview, Review as DomainReview, ReviewListQuery,
};
use crate::models::review::{NewReview as DbNewReview, Review as DbReview};
use crate::repository::{DieselRepository, ReviewReader, ReviewWriter};

impl ReviewReader for DieselRepository {
    fn list_reviews(&self, query: &ReviewListQuery) -> RepositoryResult<Vec<DomainReview>> {
        use crate::schema::reviews;

        let mut conn = self.conn()?;

        let mut items = reviews::table
            .filter(reviews::hub_id.eq(query.hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(product_id) = query.product_id {
            items = items.filter(reviews::product_id.eq(product_id));
        }

        let rows = items.order(reviews::id.asc()).load::<DbReview>(&mut conn)?;

        Ok(rows.into_iter().map(DomainReview::from).collect())
    }
}

impl ReviewWriter for DieselRepository {
    fn create_review(&self, new_review: &DomainNewReview) -> RepositoryResult<DomainReview> {
        use crate::schema::{products, reviews};

        let mut conn = self.conn()?;

        let product_exists = select(exists(
            products::table
                .filter(products::id.eq(new_review.product_id))
                .filter(products::hub_id.eq(new_review.hub_id)),
        ))
        .get_result::<bool>(&mut conn)?;

        if !product_exists {
            return Err(RepositoryError::NotFound);
        }

        let created = diesel::insert_into(reviews::table)
            .values(&DbNewReview::from(new_review))
            .get_result::<DbReview>(&mut conn)?;

        Ok(created.into())
    }
}
