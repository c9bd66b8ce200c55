use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{NewShopItemCategory, OrgId, ShopItemCategory, ShopItemCategoryUpdate};
use crate::validation::Validated;

const ENTITY: &str = "Shop item category";
const COLUMNS: &str = "id, name, organization_id, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShopItemCategoryRepository: Send + Sync {
    async fn create_shop_item_category(
        &self,
        payload: Validated<NewShopItemCategory>,
    ) -> AppResult<ShopItemCategory>;

    async fn get_shop_item_category_by_id(
        &self,
        org: &OrgId,
        id: Uuid,
    ) -> AppResult<ShopItemCategory>;

    async fn get_all_shop_item_categories_in_organization(
        &self,
        org: &OrgId,
    ) -> AppResult<Vec<ShopItemCategory>>;

    async fn update_shop_item_category(
        &self,
        org: &OrgId,
        payload: Validated<ShopItemCategoryUpdate>,
    ) -> AppResult<ShopItemCategory>;

    async fn delete_shop_item_category(&self, org: &OrgId, id: Uuid) -> AppResult<()>;
}

pub struct PgShopItemCategoryRepository {
    pool: PgPool,
}

impl PgShopItemCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShopItemCategoryRepository for PgShopItemCategoryRepository {
    async fn create_shop_item_category(
        &self,
        payload: Validated<NewShopItemCategory>,
    ) -> AppResult<ShopItemCategory> {
        let sql = format!(
            "INSERT INTO shop_item_categories (name, organization_id) VALUES ($1, $2) \
             RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, ShopItemCategory>(&sql)
            .bind(&payload.name)
            .bind(&payload.organization_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, ENTITY))
    }

    async fn get_shop_item_category_by_id(
        &self,
        org: &OrgId,
        id: Uuid,
    ) -> AppResult<ShopItemCategory> {
        let sql = format!(
            "SELECT {} FROM shop_item_categories WHERE id = $1 AND organization_id = $2",
            COLUMNS
        );
        sqlx::query_as::<_, ShopItemCategory>(&sql)
            .bind(id)
            .bind(org.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY))
    }

    async fn get_all_shop_item_categories_in_organization(
        &self,
        org: &OrgId,
    ) -> AppResult<Vec<ShopItemCategory>> {
        let sql = format!(
            "SELECT {} FROM shop_item_categories WHERE organization_id = $1 ORDER BY name ASC",
            COLUMNS
        );
        let categories = sqlx::query_as::<_, ShopItemCategory>(&sql)
            .bind(org.as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    async fn update_shop_item_category(
        &self,
        org: &OrgId,
        payload: Validated<ShopItemCategoryUpdate>,
    ) -> AppResult<ShopItemCategory> {
        let sql = format!(
            "UPDATE shop_item_categories SET name = COALESCE($3, name), updated_at = NOW() \
             WHERE id = $1 AND organization_id = $2 \
             RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, ShopItemCategory>(&sql)
            .bind(payload.id)
            .bind(org.as_str())
            .bind(payload.name.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, ENTITY))?
            .ok_or_else(|| AppError::not_found(ENTITY))
    }

    async fn delete_shop_item_category(&self, org: &OrgId, id: Uuid) -> AppResult<()> {
        let rows_affected = sqlx::query(
            "DELETE FROM shop_item_categories WHERE id = $1 AND organization_id = $2",
        )
        .bind(id)
        .bind(org.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, ENTITY))?
        .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::not_found(ENTITY));
        }
        Ok(())
    }
}
