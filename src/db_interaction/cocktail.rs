use async_trait::async_trait;
use chrono::Utc;
use diesel::{Connection, ExpressionMethods, OptionalExtension, PgTextExpressionMethods, QueryDsl, QueryResult, RunQueryDsl, SelectableHelper};

use crate::{
    domain::{Cocktail, CocktailDetail, Material, NewCocktail, Page},
    models::{CocktailRow, MaterialQuantityRow, NewCocktailMaterialRow, NewCocktailRow, NewMaterialRow},
    schema::{cocktail_materials, cocktails, materials},
    telemetry::spawn_blocking_with_tracing,
    utils::{get_pooled_connection, DbConnection, DbPool}
};

use super::{contains_pattern, CocktailRepository, StoreError};

pub struct PgCocktailRepository{
    pool: DbPool
}

impl PgCocktailRepository {
    pub fn new(pool: DbPool) -> Self {
        PgCocktailRepository{ pool }
    }
}

#[async_trait]
impl CocktailRepository for PgCocktailRepository {
    #[tracing::instrument(
        "Getting cocktails from db",
        skip(self)
    )]
    async fn list(&self, page: Page, keyword: &str) -> Result<Vec<Cocktail>, StoreError> {
        let mut conn = get_pooled_connection(&self.pool).await?;
        let keyword = keyword.to_string();

        let rows = spawn_blocking_with_tracing(move || {
            let mut query = cocktails::table
                .select(CocktailRow::as_select())
                .order(cocktails::id.asc())
                .into_boxed();

            if !keyword.is_empty() {
                query = query.filter(cocktails::name.ilike(contains_pattern(&keyword)));
            }

            query
                .limit(page.limit)
                .offset(page.offset)
                .load::<CocktailRow>(&mut conn)
        })
        .await??;

        Ok(rows.into_iter().map(Cocktail::from).collect())
    }

    #[tracing::instrument(
        "Getting cocktail detail from db",
        skip(self)
    )]
    async fn get_detail(&self, cocktail_id: i64) -> Result<Option<CocktailDetail>, StoreError> {
        let mut conn = get_pooled_connection(&self.pool).await?;

        let detail = spawn_blocking_with_tracing(move || {
            get_cocktail_detail(&mut conn, cocktail_id)
        })
        .await??;

        Ok(detail)
    }

    #[tracing::instrument(
        "Getting cocktails by ids from db",
        skip(self)
    )]
    async fn list_by_ids(&self, cocktail_ids: Vec<i64>) -> Result<Vec<Cocktail>, StoreError> {
        // An empty id set never matches; skip the round trip
        if cocktail_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = get_pooled_connection(&self.pool).await?;

        let rows = spawn_blocking_with_tracing(move || {
            cocktails::table
                .filter(cocktails::id.eq_any(cocktail_ids))
                .order(cocktails::id.asc())
                .select(CocktailRow::as_select())
                .load::<CocktailRow>(&mut conn)
        })
        .await??;

        Ok(rows.into_iter().map(Cocktail::from).collect())
    }

    #[tracing::instrument(
        "Creating cocktail along with its materials",
        skip(self, cocktail),
        fields(cocktail_name = %cocktail.name, materials = cocktail.materials.len())
    )]
    async fn create(&self, cocktail: NewCocktail) -> Result<CocktailDetail, StoreError> {
        let mut conn = get_pooled_connection(&self.pool).await?;

        let detail = spawn_blocking_with_tracing(move || {
            conn.transaction::<CocktailDetail, StoreError, _>(|conn| {
                insert_cocktail_with_materials(conn, &cocktail).map_err(|e| {
                    tracing::error!(error = ?e, "Rolling back cocktail creation");
                    StoreError::from(e)
                })
            })
        })
        .await??;

        Ok(detail)
    }
}

fn get_cocktail_detail(conn: &mut DbConnection, cocktail_id: i64) -> QueryResult<Option<CocktailDetail>> {
    let cocktail = cocktails::table
        .find(cocktail_id)
        .select(CocktailRow::as_select())
        .first::<CocktailRow>(conn)
        .optional()?;

    let Some(cocktail) = cocktail else {
        return Ok(None);
    };

    let materials = get_materials_with_quantity(conn, cocktail_id)?;

    Ok(Some(CocktailDetail::from_cocktail(cocktail.into(), materials)))
}

fn get_materials_with_quantity(conn: &mut DbConnection, cocktail_id: i64) -> QueryResult<Vec<Material>> {
    let rows = cocktail_materials::table
        .inner_join(materials::table)
        .filter(cocktail_materials::cocktail_id.eq(cocktail_id))
        .order(cocktail_materials::id.asc())
        .select((
            materials::id,
            materials::name,
            cocktail_materials::quantity,
            cocktail_materials::unit
        ))
        .load::<MaterialQuantityRow>(conn)?;

    Ok(rows.into_iter().map(Material::from).collect())
}

fn insert_cocktail_with_materials(conn: &mut DbConnection, cocktail: &NewCocktail) -> QueryResult<CocktailDetail> {
    let now = Utc::now().timestamp();

    let row = diesel::insert_into(cocktails::table)
        .values(NewCocktailRow{
            name: cocktail.name.as_ref(),
            image_url: cocktail.image_url.as_deref(),
            created_at: now,
            updated_at: now
        })
        .returning(CocktailRow::as_returning())
        .get_result::<CocktailRow>(conn)?;

    let mut materials = Vec::with_capacity(cocktail.materials.len());

    for material in cocktail.materials.iter() {
        let material_id = find_or_create_material(conn, material.name.as_ref(), now)?;

        diesel::insert_into(cocktail_materials::table)
            .values(NewCocktailMaterialRow{
                cocktail_id: row.id,
                material_id,
                quantity: material.quantity.quantity,
                unit: &material.quantity.unit
            })
            .execute(conn)?;

        materials.push(Material{
            id: material_id,
            name: material.name.inner(),
            quantity: Some(material.quantity.clone())
        });
    }

    Ok(CocktailDetail::from_cocktail(row.into(), materials))
}

// Not race free: two concurrent creations may both insert the same name
fn find_or_create_material(conn: &mut DbConnection, name: &str, now: i64) -> QueryResult<i64> {
    let existing = materials::table
        .filter(materials::name.eq(name))
        .order(materials::id.asc())
        .select(materials::id)
        .first::<i64>(conn)
        .optional()?;

    if let Some(material_id) = existing {
        return Ok(material_id);
    }

    diesel::insert_into(materials::table)
        .values(NewMaterialRow{ name, created_at: now, updated_at: now })
        .returning(materials::id)
        .get_result::<i64>(conn)
}
