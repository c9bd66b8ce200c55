use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::middleware::{AuthContext, Check, Permission};
use crate::models::{
    NewShopItem, NewShopItemCategory, ShopItem as ShopItemModel,
    ShopItemCategory as ShopItemCategoryModel, ShopItemCategoryUpdate, ShopItemUpdate,
};
use crate::proto::common::{Empty, IdReq};
use crate::proto::shop::shop_item_category_service_server::ShopItemCategoryService;
use crate::proto::shop::shop_item_service_server::ShopItemService;
use crate::proto::shop::{
    CreateShopItemCategoryReq, CreateShopItemReq, ListShopItemCategoriesRes, ListShopItemsReq,
    ListShopItemsRes, ShopItem, ShopItemCategory, ShopItemCategoryRes, ShopItemRes,
    UpdateShopItemCategoryReq, UpdateShopItemReq,
};
use crate::repository::{ShopItemCategoryRepository, ShopItemRepository};
use crate::validation::{parse_optional_uuid, parse_uuid, Validate};

use super::timestamp;

const MANAGE_SHOP: Check = Check::Permission(Permission::ManageShop);

pub struct ShopItemCategoryServiceImpl {
    categories: Arc<dyn ShopItemCategoryRepository>,
}

impl ShopItemCategoryServiceImpl {
    pub fn new(categories: Arc<dyn ShopItemCategoryRepository>) -> Self {
        Self { categories }
    }

    fn model_to_proto(model: &ShopItemCategoryModel) -> ShopItemCategory {
        ShopItemCategory {
            id: model.id.to_string(),
            name: model.name.clone(),
            organization_id: model.organization_id.clone(),
            created_at: timestamp(&model.created_at),
            updated_at: timestamp(&model.updated_at),
        }
    }
}

#[tonic::async_trait]
impl ShopItemCategoryService for ShopItemCategoryServiceImpl {
    async fn create_shop_item_category(
        &self,
        request: Request<CreateShopItemCategoryReq>,
    ) -> Result<Response<ShopItemCategoryRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        ctx.require(MANAGE_SHOP)?;
        let req = request.into_inner();

        let payload = NewShopItemCategory {
            name: req.name,
            organization_id: ctx.org_id.to_string(),
        }
        .validated()?;

        let category = self.categories.create_shop_item_category(payload).await?;
        tracing::info!(
            "Created shop item category {} in {}",
            category.id,
            category.organization_id
        );

        Ok(Response::new(ShopItemCategoryRes {
            category: Some(Self::model_to_proto(&category)),
        }))
    }

    async fn get_shop_item_category(
        &self,
        request: Request<IdReq>,
    ) -> Result<Response<ShopItemCategoryRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let id = parse_uuid("id", &request.get_ref().id)?;

        let category = self
            .categories
            .get_shop_item_category_by_id(&ctx.org_id, id)
            .await?;

        Ok(Response::new(ShopItemCategoryRes {
            category: Some(Self::model_to_proto(&category)),
        }))
    }

    async fn list_shop_item_categories(
        &self,
        request: Request<Empty>,
    ) -> Result<Response<ListShopItemCategoriesRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;

        let categories = self
            .categories
            .get_all_shop_item_categories_in_organization(&ctx.org_id)
            .await?;

        Ok(Response::new(ListShopItemCategoriesRes {
            categories: categories.iter().map(Self::model_to_proto).collect(),
        }))
    }

    async fn update_shop_item_category(
        &self,
        request: Request<UpdateShopItemCategoryReq>,
    ) -> Result<Response<ShopItemCategoryRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        ctx.require(MANAGE_SHOP)?;
        let req = request.into_inner();

        let payload = ShopItemCategoryUpdate {
            id: parse_uuid("id", &req.id)?,
            name: req.name,
        }
        .validated()?;

        let category = self
            .categories
            .update_shop_item_category(&ctx.org_id, payload)
            .await?;
        tracing::info!("Updated shop item category {}", category.id);

        Ok(Response::new(ShopItemCategoryRes {
            category: Some(Self::model_to_proto(&category)),
        }))
    }

    async fn delete_shop_item_category(
        &self,
        request: Request<IdReq>,
    ) -> Result<Response<Empty>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        ctx.require(MANAGE_SHOP)?;
        let id = parse_uuid("id", &request.get_ref().id)?;

        self.categories
            .delete_shop_item_category(&ctx.org_id, id)
            .await?;
        tracing::info!("Deleted shop item category {} in {}", id, ctx.org_id);

        Ok(Response::new(Empty {}))
    }
}

pub struct ShopItemServiceImpl {
    items: Arc<dyn ShopItemRepository>,
    categories: Arc<dyn ShopItemCategoryRepository>,
}

impl ShopItemServiceImpl {
    pub fn new(
        items: Arc<dyn ShopItemRepository>,
        categories: Arc<dyn ShopItemCategoryRepository>,
    ) -> Self {
        Self { items, categories }
    }

    fn model_to_proto(model: &ShopItemModel) -> ShopItem {
        ShopItem {
            id: model.id.to_string(),
            name: model.name.clone(),
            description: model.description.clone(),
            image_url: model.image_url.clone(),
            category_id: model.category_id.to_string(),
            organization_id: model.organization_id.clone(),
            created_at: timestamp(&model.created_at),
            updated_at: timestamp(&model.updated_at),
        }
    }
}

#[tonic::async_trait]
impl ShopItemService for ShopItemServiceImpl {
    async fn create_shop_item(
        &self,
        request: Request<CreateShopItemReq>,
    ) -> Result<Response<ShopItemRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        ctx.require(MANAGE_SHOP)?;
        let req = request.into_inner();

        let payload = NewShopItem {
            name: req.name,
            description: req.description,
            image_url: req.image_url.filter(|u| !u.is_empty()),
            category_id: parse_uuid("category_id", &req.category_id)?,
            organization_id: ctx.org_id.to_string(),
        }
        .validated()?;

        let item = self.items.create_shop_item(payload).await?;
        tracing::info!(
            "Created shop item {} in category {}",
            item.id,
            item.category_id
        );

        Ok(Response::new(ShopItemRes {
            item: Some(Self::model_to_proto(&item)),
        }))
    }

    async fn get_shop_item(
        &self,
        request: Request<IdReq>,
    ) -> Result<Response<ShopItemRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let id = parse_uuid("id", &request.get_ref().id)?;

        let item = self.items.get_shop_item_by_id(&ctx.org_id, id).await?;

        Ok(Response::new(ShopItemRes {
            item: Some(Self::model_to_proto(&item)),
        }))
    }

    async fn list_shop_items(
        &self,
        request: Request<ListShopItemsReq>,
    ) -> Result<Response<ListShopItemsRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let category_id = parse_optional_uuid(
            "category_id",
            request.get_ref().category_id.as_deref().filter(|c| !c.is_empty()),
        )?;

        let items = match category_id {
            Some(category_id) => {
                // An unknown category is an error rather than an empty list.
                self.categories
                    .get_shop_item_category_by_id(&ctx.org_id, category_id)
                    .await?;
                self.items
                    .get_shop_items_by_category(&ctx.org_id, category_id)
                    .await?
            }
            None => {
                self.items
                    .get_all_shop_items_in_organization(&ctx.org_id)
                    .await?
            }
        };

        Ok(Response::new(ListShopItemsRes {
            items: items.iter().map(Self::model_to_proto).collect(),
        }))
    }

    async fn update_shop_item(
        &self,
        request: Request<UpdateShopItemReq>,
    ) -> Result<Response<ShopItemRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        ctx.require(MANAGE_SHOP)?;
        let req = request.into_inner();

        let payload = ShopItemUpdate {
            id: parse_uuid("id", &req.id)?,
            name: req.name,
            description: req.description,
            image_url: req.image_url,
            category_id: parse_optional_uuid("category_id", req.category_id.as_deref())?,
        }
        .validated()?;

        let item = self.items.update_shop_item(&ctx.org_id, payload).await?;
        tracing::info!("Updated shop item {}", item.id);

        Ok(Response::new(ShopItemRes {
            item: Some(Self::model_to_proto(&item)),
        }))
    }

    async fn delete_shop_item(&self, request: Request<IdReq>) -> Result<Response<Empty>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        ctx.require(MANAGE_SHOP)?;
        let id = parse_uuid("id", &request.get_ref().id)?;

        self.items.delete_shop_item(&ctx.org_id, id).await?;
        tracing::info!("Deleted shop item {} in {}", id, ctx.org_id);

        Ok(Response::new(Empty {}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::middleware::context::test_support::*;
    use crate::repository::{MockShopItemCategoryRepository, MockShopItemRepository};
    use chrono::Utc;
    use tonic::Code;
    use uuid::Uuid;

    fn category(name: &str) -> ShopItemCategoryModel {
        ShopItemCategoryModel {
            id: Uuid::new_v4(),
            name: name.to_string(),
            organization_id: ORG.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn item(category_id: Uuid) -> ShopItemModel {
        ShopItemModel {
            id: Uuid::new_v4(),
            name: "ThinkPad X1".to_string(),
            description: "14 inch developer laptop".to_string(),
            image_url: None,
            category_id,
            organization_id: ORG.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn shop_manager<T>(message: T) -> Request<T> {
        request(message, session(USER, Some("org:support"), &["org:shop:manage"]))
    }

    #[tokio::test]
    async fn test_create_category_uses_caller_org() {
        let mut repo = MockShopItemCategoryRepository::new();
        repo.expect_create_shop_item_category()
            .withf(|p| p.name == "Laptops" && p.organization_id == ORG)
            .times(1)
            .returning(|p| Ok(category(&p.name)));
        let service = ShopItemCategoryServiceImpl::new(Arc::new(repo));

        let res = service
            .create_shop_item_category(shop_manager(CreateShopItemCategoryReq {
                name: "Laptops".to_string(),
            }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(res.category.unwrap().name, "Laptops");
    }

    #[tokio::test]
    async fn test_create_category_with_empty_name_never_reaches_storage() {
        let mut repo = MockShopItemCategoryRepository::new();
        repo.expect_create_shop_item_category().never();
        let service = ShopItemCategoryServiceImpl::new(Arc::new(repo));

        let status = service
            .create_shop_item_category(shop_manager(CreateShopItemCategoryReq {
                name: String::new(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "name: Name must be at least 1 character long");
    }

    #[tokio::test]
    async fn test_member_cannot_create_category() {
        let mut repo = MockShopItemCategoryRepository::new();
        repo.expect_create_shop_item_category().never();
        let service = ShopItemCategoryServiceImpl::new(Arc::new(repo));

        let status = service
            .create_shop_item_category(member_request(CreateShopItemCategoryReq {
                name: "Laptops".to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn test_member_can_list_categories() {
        let mut repo = MockShopItemCategoryRepository::new();
        repo.expect_get_all_shop_item_categories_in_organization()
            .withf(|org| org.as_str() == ORG)
            .returning(|_| Ok(vec![category("Laptops"), category("Monitors")]));
        let service = ShopItemCategoryServiceImpl::new(Arc::new(repo));

        let res = service
            .list_shop_item_categories(member_request(Empty {}))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(res.categories.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_category_in_use_is_failed_precondition() {
        let mut repo = MockShopItemCategoryRepository::new();
        repo.expect_delete_shop_item_category().returning(|_, _| {
            Err(AppError::Conflict(
                "Shop item category is still referenced".to_string(),
            ))
        });
        let service = ShopItemCategoryServiceImpl::new(Arc::new(repo));

        let status = service
            .delete_shop_item_category(admin_request(IdReq {
                id: Uuid::new_v4().to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::FailedPrecondition);
    }

    #[tokio::test]
    async fn test_list_items_by_unknown_category_is_not_found() {
        let mut categories = MockShopItemCategoryRepository::new();
        categories
            .expect_get_shop_item_category_by_id()
            .returning(|_, _| Err(AppError::not_found("Shop item category")));
        let mut items = MockShopItemRepository::new();
        items.expect_get_shop_items_by_category().never();
        let service = ShopItemServiceImpl::new(Arc::new(items), Arc::new(categories));

        let status = service
            .list_shop_items(member_request(ListShopItemsReq {
                category_id: Some(Uuid::new_v4().to_string()),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn test_list_items_by_category() {
        let cat = category("Laptops");
        let cat_id = cat.id;
        let mut categories = MockShopItemCategoryRepository::new();
        categories
            .expect_get_shop_item_category_by_id()
            .returning(move |_, _| Ok(cat.clone()));
        let mut items = MockShopItemRepository::new();
        items
            .expect_get_shop_items_by_category()
            .withf(move |_, id| *id == cat_id)
            .returning(|_, id| Ok(vec![item(id)]));
        let service = ShopItemServiceImpl::new(Arc::new(items), Arc::new(categories));

        let res = service
            .list_shop_items(member_request(ListShopItemsReq {
                category_id: Some(cat_id.to_string()),
            }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(res.items.len(), 1);
        assert_eq!(res.items[0].category_id, cat_id.to_string());
    }

    #[tokio::test]
    async fn test_create_item_rejects_malformed_category_id() {
        let mut items = MockShopItemRepository::new();
        items.expect_create_shop_item().never();
        let service = ShopItemServiceImpl::new(
            Arc::new(items),
            Arc::new(MockShopItemCategoryRepository::new()),
        );

        let status = service
            .create_shop_item(admin_request(CreateShopItemReq {
                name: "Dock".to_string(),
                description: String::new(),
                image_url: None,
                category_id: "laptops".to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "category_id: category_id must be a valid UUID");
    }
}
