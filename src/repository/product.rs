use std::collections::HashMap;

use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::product::{
        NewProduct as DomainNewProduct, Populate, Product as DomainProduct, ProductListQuery,
        UpdateProduct as DomainUpdateProduct,
    },
    models::product::{
        NewProduct as DbNewProduct, NewProductColor, NewProductImage, NewProductSubCategory,
        Product as DbProduct, ProductColor, ProductImage, ProductSubCategory,
        UpdateProduct as DbUpdateProduct,
    },
    repository::{DieselRepository, ProductReader, ProductWriter},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(
        &self,
        id: i32,
        hub_id: i32,
        populate: Populate,
    ) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .filter(products::hub_id.eq(hub_id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        match product {
            Some(db_product) => Ok(hydrate_products(&mut conn, vec![db_product], populate)?.pop()),
            None => Ok(None),
        }
    }

    fn list_products(&self, query: &ProductListQuery) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let mut items = products::table
            .filter(products::hub_id.eq(query.hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = query.category_id {
            items = items.filter(products::category_id.eq(category_id));
        }

        if let Some(brand_id) = query.brand_id {
            items = items.filter(products::brand_id.eq(brand_id));
        }

        items = items.order((products::created_at.desc(), products::id.desc()));

        let db_products = items.load::<DbProduct>(&mut conn)?;

        if db_products.is_empty() {
            return Ok(Vec::new());
        }

        hydrate_products(&mut conn, db_products, query.populate)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            ensure_references(
                conn,
                new_product.hub_id,
                new_product.category_id,
                new_product.brand_id,
                &new_product.subcategory_ids,
            )?;

            let db_new = DbNewProduct::from(new_product);
            let created = diesel::insert_into(products::table)
                .values(&db_new)
                .get_result::<DbProduct>(conn)?;

            replace_product_children(
                conn,
                created.id,
                &new_product.colors,
                &new_product.images,
                &new_product.subcategory_ids,
            )?;

            hydrate_products(conn, vec![created], Populate::none())?
                .pop()
                .ok_or(RepositoryError::NotFound)
        })
    }

    fn update_product(
        &self,
        product_id: i32,
        hub_id: i32,
        updates: &DomainUpdateProduct,
        populate: Populate,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            ensure_references(
                conn,
                hub_id,
                updates.category_id,
                updates.brand_id,
                &updates.subcategory_ids,
            )?;

            let db_updates = DbUpdateProduct::from(updates);
            let target = products::table
                .filter(products::id.eq(product_id))
                .filter(products::hub_id.eq(hub_id));

            let updated = diesel::update(target)
                .set(&db_updates)
                .get_result::<DbProduct>(conn)?;

            replace_product_children(
                conn,
                updated.id,
                &updates.colors,
                &updates.images,
                &updates.subcategory_ids,
            )?;

            hydrate_products(conn, vec![updated], populate)?
                .pop()
                .ok_or(RepositoryError::NotFound)
        })
    }

    fn delete_product(&self, product_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::{product_colors, product_images, product_subcategories, products};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let target = products::table
                .filter(products::id.eq(product_id))
                .filter(products::hub_id.eq(hub_id));

            let owned = select(exists(target.clone())).get_result::<bool>(conn)?;
            if !owned {
                return Err(RepositoryError::NotFound);
            }

            diesel::delete(product_colors::table.filter(product_colors::product_id.eq(product_id)))
                .execute(conn)?;
            diesel::delete(product_images::table.filter(product_images::product_id.eq(product_id)))
                .execute(conn)?;
            diesel::delete(
                product_subcategories::table
                    .filter(product_subcategories::product_id.eq(product_id)),
            )
            .execute(conn)?;

            diesel::delete(target).execute(conn)?;

            Ok(())
        })
    }
}

/// Turn stored rows into domain products, loading the owned collections and,
/// when requested, the category display names.
fn hydrate_products(
    conn: &mut SqliteConnection,
    db_products: Vec<DbProduct>,
    populate: Populate,
) -> RepositoryResult<Vec<DomainProduct>> {
    let product_ids: Vec<i32> = db_products.iter().map(|product| product.id).collect();

    let mut colors = load_colors_for_products(conn, &product_ids)?;
    let mut images = load_images_for_products(conn, &product_ids)?;
    let mut subcategories = load_subcategories_for_products(conn, &product_ids)?;

    let category_names = if populate.category {
        let category_ids: Vec<i32> = db_products
            .iter()
            .map(|product| product.category_id)
            .collect();
        load_category_names(conn, &category_ids)?
    } else {
        HashMap::new()
    };

    let mut domain_products = Vec::with_capacity(db_products.len());
    for db_product in db_products {
        let mut domain: DomainProduct = db_product.into();
        domain.colors = colors.remove(&domain.id).unwrap_or_default();
        domain.images = images.remove(&domain.id).unwrap_or_default();
        domain.subcategory_ids = subcategories.remove(&domain.id).unwrap_or_default();
        domain.category.name = category_names.get(&domain.category.id).cloned();
        domain_products.push(domain);
    }

    Ok(domain_products)
}

fn load_colors_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<String>>> {
    use crate::schema::product_colors;

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_colors::table
        .filter(product_colors::product_id.eq_any(product_ids))
        .order((product_colors::product_id.asc(), product_colors::position.asc()))
        .load::<ProductColor>(conn)?;

    let mut map: HashMap<i32, Vec<String>> = HashMap::new();
    for row in rows {
        map.entry(row.product_id).or_default().push(row.label);
    }

    Ok(map)
}

fn load_images_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<String>>> {
    use crate::schema::product_images;

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_images::table
        .filter(product_images::product_id.eq_any(product_ids))
        .order((product_images::product_id.asc(), product_images::position.asc()))
        .load::<ProductImage>(conn)?;

    let mut map: HashMap<i32, Vec<String>> = HashMap::new();
    for row in rows {
        map.entry(row.product_id).or_default().push(row.file_name);
    }

    Ok(map)
}

fn load_subcategories_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<i32>>> {
    use crate::schema::product_subcategories;

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_subcategories::table
        .filter(product_subcategories::product_id.eq_any(product_ids))
        .order((
            product_subcategories::product_id.asc(),
            product_subcategories::position.asc(),
        ))
        .load::<ProductSubCategory>(conn)?;

    let mut map: HashMap<i32, Vec<i32>> = HashMap::new();
    for row in rows {
        map.entry(row.product_id)
            .or_default()
            .push(row.subcategory_id);
    }

    Ok(map)
}

/// Only the name column is selected; the rest of the category stays behind.
fn load_category_names(
    conn: &mut SqliteConnection,
    category_ids: &[i32],
) -> RepositoryResult<HashMap<i32, String>> {
    use crate::schema::categories;

    if category_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = categories::table
        .filter(categories::id.eq_any(category_ids))
        .select((categories::id, categories::name))
        .load::<(i32, String)>(conn)?;

    Ok(rows.into_iter().collect())
}

fn replace_product_children(
    conn: &mut SqliteConnection,
    product_id: i32,
    colors: &[String],
    images: &[String],
    subcategory_ids: &[i32],
) -> RepositoryResult<()> {
    use crate::schema::{product_colors, product_images, product_subcategories};

    diesel::delete(product_colors::table.filter(product_colors::product_id.eq(product_id)))
        .execute(conn)?;
    let color_rows: Vec<NewProductColor> = colors
        .iter()
        .enumerate()
        .map(|(position, label)| NewProductColor {
            product_id,
            position: position as i32,
            label: label.as_str(),
        })
        .collect();
    if !color_rows.is_empty() {
        diesel::insert_into(product_colors::table)
            .values(&color_rows)
            .execute(conn)?;
    }

    diesel::delete(product_images::table.filter(product_images::product_id.eq(product_id)))
        .execute(conn)?;
    let image_rows: Vec<NewProductImage> = images
        .iter()
        .enumerate()
        .map(|(position, file_name)| NewProductImage {
            product_id,
            position: position as i32,
            file_name: file_name.as_str(),
        })
        .collect();
    if !image_rows.is_empty() {
        diesel::insert_into(product_images::table)
            .values(&image_rows)
            .execute(conn)?;
    }

    diesel::delete(
        product_subcategories::table.filter(product_subcategories::product_id.eq(product_id)),
    )
    .execute(conn)?;
    let subcategory_rows: Vec<NewProductSubCategory> = subcategory_ids
        .iter()
        .enumerate()
        .map(|(position, subcategory_id)| NewProductSubCategory {
            product_id,
            subcategory_id: *subcategory_id,
            position: position as i32,
        })
        .collect();
    if !subcategory_rows.is_empty() {
        diesel::insert_into(product_subcategories::table)
            .values(&subcategory_rows)
            .execute(conn)?;
    }

    Ok(())
}

/// Referenced rows must exist in the same hub before a product points at them.
fn ensure_references(
    conn: &mut SqliteConnection,
    hub_id: i32,
    category_id: i32,
    brand_id: Option<i32>,
    subcategory_ids: &[i32],
) -> RepositoryResult<()> {
    use crate::schema::{brands, categories, subcategories};

    let category_exists = select(exists(
        categories::table
            .filter(categories::id.eq(category_id))
            .filter(categories::hub_id.eq(hub_id)),
    ))
    .get_result::<bool>(conn)?;

    if !category_exists {
        return Err(RepositoryError::NotFound);
    }

    if let Some(brand_id) = brand_id {
        let brand_exists = select(exists(
            brands::table
                .filter(brands::id.eq(brand_id))
                .filter(brands::hub_id.eq(hub_id)),
        ))
        .get_result::<bool>(conn)?;

        if !brand_exists {
            return Err(RepositoryError::NotFound);
        }
    }

    if !subcategory_ids.is_empty() {
        let mut unique_ids = subcategory_ids.to_vec();
        unique_ids.sort_unstable();
        unique_ids.dedup();

        let found = subcategories::table
            .filter(subcategories::hub_id.eq(hub_id))
            .filter(subcategories::id.eq_any(unique_ids.as_slice()))
            .count()
            .get_result::<i64>(conn)?;

        if found as usize != unique_ids.len() {
            return Err(RepositoryError::NotFound);
        }
    }

    Ok(())
}
