use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{NewShopItem, OrgId, ShopItem, ShopItemUpdate};
use crate::validation::Validated;

const ENTITY: &str = "Shop item";
const COLUMNS: &str =
    "id, name, description, image_url, category_id, organization_id, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShopItemRepository: Send + Sync {
    async fn create_shop_item(&self, payload: Validated<NewShopItem>) -> AppResult<ShopItem>;

    async fn get_shop_item_by_id(&self, org: &OrgId, id: Uuid) -> AppResult<ShopItem>;

    async fn get_all_shop_items_in_organization(&self, org: &OrgId) -> AppResult<Vec<ShopItem>>;

    async fn get_shop_items_by_category(
        &self,
        org: &OrgId,
        category_id: Uuid,
    ) -> AppResult<Vec<ShopItem>>;

    async fn update_shop_item(
        &self,
        org: &OrgId,
        payload: Validated<ShopItemUpdate>,
    ) -> AppResult<ShopItem>;

    async fn delete_shop_item(&self, org: &OrgId, id: Uuid) -> AppResult<()>;
}

pub struct PgShopItemRepository {
    pool: PgPool,
}

impl PgShopItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShopItemRepository for PgShopItemRepository {
    async fn create_shop_item(&self, payload: Validated<NewShopItem>) -> AppResult<ShopItem> {
        // The category must belong to the same organization as the item.
        let sql = format!(
            "INSERT INTO shop_items (name, description, image_url, category_id, organization_id) \
             SELECT $1, $2, $3, c.id, c.organization_id FROM shop_item_categories c \
             WHERE c.id = $4 AND c.organization_id = $5 \
             RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, ShopItem>(&sql)
            .bind(&payload.name)
            .bind(&payload.description)
            .bind(payload.image_url.as_deref())
            .bind(payload.category_id)
            .bind(&payload.organization_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, ENTITY))?
            .ok_or_else(|| AppError::not_found("Shop item category"))
    }

    async fn get_shop_item_by_id(&self, org: &OrgId, id: Uuid) -> AppResult<ShopItem> {
        let sql = format!(
            "SELECT {} FROM shop_items WHERE id = $1 AND organization_id = $2",
            COLUMNS
        );
        sqlx::query_as::<_, ShopItem>(&sql)
            .bind(id)
            .bind(org.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY))
    }

    async fn get_all_shop_items_in_organization(&self, org: &OrgId) -> AppResult<Vec<ShopItem>> {
        let sql = format!(
            "SELECT {} FROM shop_items WHERE organization_id = $1 ORDER BY name ASC",
            COLUMNS
        );
        let items = sqlx::query_as::<_, ShopItem>(&sql)
            .bind(org.as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn get_shop_items_by_category(
        &self,
        org: &OrgId,
        category_id: Uuid,
    ) -> AppResult<Vec<ShopItem>> {
        let sql = format!(
            "SELECT {} FROM shop_items WHERE organization_id = $1 AND category_id = $2 \
             ORDER BY name ASC",
            COLUMNS
        );
        let items = sqlx::query_as::<_, ShopItem>(&sql)
            .bind(org.as_str())
            .bind(category_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn update_shop_item(
        &self,
        org: &OrgId,
        payload: Validated<ShopItemUpdate>,
    ) -> AppResult<ShopItem> {
        let sql = format!(
            "UPDATE shop_items SET \
             name = COALESCE($3, name), \
             description = COALESCE($4, description), \
             image_url = CASE WHEN $5::text IS NULL THEN image_url ELSE NULLIF($5, '') END, \
             category_id = COALESCE($6, category_id), \
             updated_at = NOW() \
             WHERE id = $1 AND organization_id = $2 \
             AND ($6::uuid IS NULL OR EXISTS ( \
                 SELECT 1 FROM shop_item_categories c WHERE c.id = $6 AND c.organization_id = $2)) \
             RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, ShopItem>(&sql)
            .bind(payload.id)
            .bind(org.as_str())
            .bind(payload.name.as_deref())
            .bind(payload.description.as_deref())
            .bind(payload.image_url.as_deref())
            .bind(payload.category_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, ENTITY))?
            .ok_or_else(|| AppError::not_found(ENTITY))
    }

    async fn delete_shop_item(&self, org: &OrgId, id: Uuid) -> AppResult<()> {
        let rows_affected =
            sqlx::query("DELETE FROM shop_items WHERE id = $1 AND organization_id = $2")
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
