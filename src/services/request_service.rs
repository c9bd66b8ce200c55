use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::error::{AppError, AppResult};
use crate::middleware::{AuthContext, Check, Permission};
use crate::models::{
    CloseRequest, EquipmentRequest as RequestModel, ItemInRequest as ItemInRequestModel,
    ItemInRequestStatus, ItemInRequestUpdate, NewItemInRequest, NewRequest, OrgId, RequestLine,
    RequestStatus, RequestUpdate,
};
use crate::proto::common::{Empty, IdReq};
use crate::proto::requests::request_service_server::RequestService;
use crate::proto::requests::{
    AddItemToRequestReq, CloseRequestReq, CreateRequestReq, EquipmentRequest, ItemInRequest,
    ItemInRequestRes, ListRequestsReq, ListRequestsRes, RequestRes, UpdateItemInRequestReq,
    UpdateRequestReq,
};
use crate::repository::{ItemInRequestRepository, RequestRepository, ShopItemRepository};
use crate::validation::{parse_optional_enum, parse_uuid, Validate, ValidationErrors};

use super::timestamp;

const MANAGE_REQUESTS: Check = Check::Permission(Permission::ManageRequests);

pub struct RequestServiceImpl {
    requests: Arc<dyn RequestRepository>,
    items: Arc<dyn ItemInRequestRepository>,
    shop_items: Arc<dyn ShopItemRepository>,
}

impl RequestServiceImpl {
    pub fn new(
        requests: Arc<dyn RequestRepository>,
        items: Arc<dyn ItemInRequestRepository>,
        shop_items: Arc<dyn ShopItemRepository>,
    ) -> Self {
        Self {
            requests,
            items,
            shop_items,
        }
    }

    fn item_to_proto(model: &ItemInRequestModel) -> ItemInRequest {
        ItemInRequest {
            id: model.id.to_string(),
            request_id: model.request_id.to_string(),
            shop_item_id: model.shop_item_id.to_string(),
            quantity: model.quantity,
            status: model.status.to_string(),
            organization_id: model.organization_id.clone(),
            created_at: timestamp(&model.created_at),
            updated_at: timestamp(&model.updated_at),
        }
    }

    fn model_to_proto(model: &RequestModel, items: &[ItemInRequestModel]) -> EquipmentRequest {
        EquipmentRequest {
            id: model.id.to_string(),
            owner_id: model.owner_id.clone(),
            status: model.status.to_string(),
            message: model.message.clone(),
            organization_id: model.organization_id.clone(),
            created_at: timestamp(&model.created_at),
            updated_at: timestamp(&model.updated_at),
            items: items.iter().map(Self::item_to_proto).collect(),
        }
    }

    async fn with_items(&self, org: &OrgId, request: &RequestModel) -> AppResult<EquipmentRequest> {
        let items = self.items.get_items_in_request(org, request.id).await?;
        Ok(Self::model_to_proto(request, &items))
    }

    async fn list_with_items(
        &self,
        org: &OrgId,
        requests: &[RequestModel],
    ) -> AppResult<Vec<EquipmentRequest>> {
        let mut out = Vec::with_capacity(requests.len());
        for request in requests {
            out.push(self.with_items(org, request).await?);
        }
        Ok(out)
    }

    /// Loads a line item together with the request it belongs to.
    async fn item_with_request(
        &self,
        org: &OrgId,
        id: uuid::Uuid,
    ) -> AppResult<(ItemInRequestModel, RequestModel)> {
        let item = self.items.get_item_in_request_by_id(org, id).await?;
        let request = self.requests.get_request_by_id(org, item.request_id).await?;
        Ok((item, request))
    }
}

/// Managers may change any line. Owners only touch pending lines of their
/// own open requests.
fn require_line_editable(
    ctx: &AuthContext,
    item: &ItemInRequestModel,
    parent: &RequestModel,
) -> AppResult<()> {
    if ctx.has(MANAGE_REQUESTS) {
        return Ok(());
    }
    ctx.require_owner_or(&parent.owner_id, MANAGE_REQUESTS)?;
    if parent.status != RequestStatus::Open || item.status != ItemInRequestStatus::Pending {
        return Err(AppError::Conflict(
            "Only pending items of open requests can be changed".to_string(),
        ));
    }
    Ok(())
}

fn parse_lines(req: &CreateRequestReq) -> Result<Vec<RequestLine>, ValidationErrors> {
    if req.items.is_empty() {
        return Err(ValidationErrors::single(
            "items",
            "Request must contain at least one item",
        ));
    }
    let mut errors = ValidationErrors::default();
    let mut lines = Vec::with_capacity(req.items.len());
    for item in &req.items {
        let line = parse_uuid("shop_item_id", &item.shop_item_id).and_then(|shop_item_id| {
            let line = RequestLine {
                shop_item_id,
                quantity: item.quantity,
            };
            line.validate().map(|_| line)
        });
        match line {
            Ok(line) => lines.push(line),
            Err(e) => errors.merge(e),
        }
    }
    if errors.is_empty() {
        Ok(lines)
    } else {
        Err(errors)
    }
}

#[tonic::async_trait]
impl RequestService for RequestServiceImpl {
    async fn create_request(
        &self,
        request: Request<CreateRequestReq>,
    ) -> Result<Response<RequestRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let req = request.into_inner();

        let lines = parse_lines(&req)?;
        let payload = NewRequest {
            owner_id: ctx.user_id.to_string(),
            message: req.message.filter(|m| !m.is_empty()),
            organization_id: ctx.org_id.to_string(),
        }
        .validated()?;

        for line in &lines {
            self.shop_items
                .get_shop_item_by_id(&ctx.org_id, line.shop_item_id)
                .await?;
        }

        let created = self.requests.create_request(payload).await?;

        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            let payload = NewItemInRequest::for_request(created.id, line, ctx.org_id.as_str())
                .validated()?;
            match self.items.create_item_in_request(payload).await {
                Ok(item) => items.push(item),
                Err(e) => {
                    // Don't leave a request behind with only part of its lines.
                    if let Err(cleanup) = self.requests.delete_request(&ctx.org_id, created.id).await {
                        tracing::error!(
                            "Failed to roll back request {}: {}",
                            created.id,
                            cleanup
                        );
                    }
                    return Err(e.into());
                }
            }
        }

        tracing::info!(
            "Created request {} with {} item(s) for {}",
            created.id,
            items.len(),
            created.owner_id
        );

        Ok(Response::new(RequestRes {
            request: Some(Self::model_to_proto(&created, &items)),
        }))
    }

    async fn get_request(&self, request: Request<IdReq>) -> Result<Response<RequestRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let id = parse_uuid("id", &request.get_ref().id)?;

        let found = self.requests.get_request_by_id(&ctx.org_id, id).await?;
        ctx.require_owner_or(&found.owner_id, MANAGE_REQUESTS)?;

        Ok(Response::new(RequestRes {
            request: Some(self.with_items(&ctx.org_id, &found).await?),
        }))
    }

    async fn list_my_requests(
        &self,
        request: Request<Empty>,
    ) -> Result<Response<ListRequestsRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;

        let found = self
            .requests
            .get_requests_by_owner(&ctx.org_id, &ctx.user_id)
            .await?;

        Ok(Response::new(ListRequestsRes {
            requests: self.list_with_items(&ctx.org_id, &found).await?,
        }))
    }

    async fn list_requests(
        &self,
        request: Request<ListRequestsReq>,
    ) -> Result<Response<ListRequestsRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        ctx.require(MANAGE_REQUESTS)?;
        let status = parse_optional_enum::<RequestStatus>(
            "status",
            request.get_ref().status.as_deref().filter(|s| !s.is_empty()),
        )?;

        let found = self
            .requests
            .get_all_requests_in_organization(&ctx.org_id, status)
            .await?;

        Ok(Response::new(ListRequestsRes {
            requests: self.list_with_items(&ctx.org_id, &found).await?,
        }))
    }

    async fn update_request(
        &self,
        request: Request<UpdateRequestReq>,
    ) -> Result<Response<RequestRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        ctx.require(MANAGE_REQUESTS)?;
        let req = request.into_inner();

        let payload = RequestUpdate {
            id: parse_uuid("id", &req.id)?,
            status: parse_optional_enum("status", req.status.as_deref())?,
            message: req.message,
        }
        .validated()?;

        let updated = self.requests.update_request(&ctx.org_id, payload).await?;
        tracing::info!("Updated request {} (status {})", updated.id, updated.status);

        Ok(Response::new(RequestRes {
            request: Some(self.with_items(&ctx.org_id, &updated).await?),
        }))
    }

    async fn close_request(
        &self,
        request: Request<CloseRequestReq>,
    ) -> Result<Response<RequestRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let req = request.into_inner();

        let close = CloseRequest {
            id: parse_uuid("id", &req.id)?,
            status: req.status,
        }
        .validated()?;

        let found = self.requests.get_request_by_id(&ctx.org_id, close.id).await?;
        ctx.require_owner_or(&found.owner_id, MANAGE_REQUESTS)?;

        let updated = self
            .requests
            .update_request(&ctx.org_id, close.as_update().validated()?)
            .await?;
        tracing::info!("Closed request {}", updated.id);

        Ok(Response::new(RequestRes {
            request: Some(self.with_items(&ctx.org_id, &updated).await?),
        }))
    }

    async fn delete_request(&self, request: Request<IdReq>) -> Result<Response<Empty>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let id = parse_uuid("id", &request.get_ref().id)?;

        ctx.require(MANAGE_REQUESTS)?;

        self.requests.delete_request(&ctx.org_id, id).await?;
        tracing::info!("Deleted request {} in {}", id, ctx.org_id);

        Ok(Response::new(Empty {}))
    }

    async fn add_item_to_request(
        &self,
        request: Request<AddItemToRequestReq>,
    ) -> Result<Response<ItemInRequestRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let req = request.into_inner();

        let request_id = parse_uuid("request_id", &req.request_id)?;
        let line = RequestLine {
            shop_item_id: parse_uuid("shop_item_id", &req.shop_item_id)?,
            quantity: req.quantity,
        };
        let payload = NewItemInRequest::for_request(request_id, &line, ctx.org_id.as_str())
            .validated()?;

        let parent = self.requests.get_request_by_id(&ctx.org_id, request_id).await?;
        ctx.require_owner_or(&parent.owner_id, MANAGE_REQUESTS)?;
        if parent.status != RequestStatus::Open && !ctx.has(MANAGE_REQUESTS) {
            return Err(AppError::Conflict(
                "Items can only be added to open requests".to_string(),
            )
            .into());
        }
        self.shop_items
            .get_shop_item_by_id(&ctx.org_id, line.shop_item_id)
            .await?;

        let item = self.items.create_item_in_request(payload).await?;
        tracing::info!("Added item {} to request {}", item.id, request_id);

        Ok(Response::new(ItemInRequestRes {
            item: Some(Self::item_to_proto(&item)),
        }))
    }

    async fn update_item_in_request(
        &self,
        request: Request<UpdateItemInRequestReq>,
    ) -> Result<Response<ItemInRequestRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let req = request.into_inner();

        let payload = ItemInRequestUpdate {
            id: parse_uuid("id", &req.id)?,
            quantity: req.quantity,
            status: parse_optional_enum::<ItemInRequestStatus>("status", req.status.as_deref())?,
        }
        .validated()?;

        let (item, parent) = self.item_with_request(&ctx.org_id, payload.id).await?;
        if payload.status.is_some() {
            // Approving or declining a line is a manager decision.
            ctx.require(MANAGE_REQUESTS)?;
        } else {
            require_line_editable(&ctx, &item, &parent)?;
        }

        let item = self
            .items
            .update_item_in_request(&ctx.org_id, payload)
            .await?;
        tracing::info!("Updated item {} (status {})", item.id, item.status);

        Ok(Response::new(ItemInRequestRes {
            item: Some(Self::item_to_proto(&item)),
        }))
    }

    async fn remove_item_from_request(
        &self,
        request: Request<IdReq>,
    ) -> Result<Response<Empty>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let id = parse_uuid("id", &request.get_ref().id)?;

        let (item, parent) = self.item_with_request(&ctx.org_id, id).await?;
        require_line_editable(&ctx, &item, &parent)?;

        self.items.delete_item_in_request(&ctx.org_id, item.id).await?;
        tracing::info!("Removed item {} from request {}", item.id, parent.id);

        Ok(Response::new(Empty {}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::context::test_support::*;
    use crate::models::ShopItem;
    use crate::proto::requests::RequestLine as RequestLineProto;
    use crate::repository::{
        MockItemInRequestRepository, MockRequestRepository, MockShopItemRepository,
    };
    use chrono::Utc;
    use tonic::Code;
    use uuid::Uuid;

    fn equipment_request(owner: &str, status: RequestStatus) -> RequestModel {
        RequestModel {
            id: Uuid::new_v4(),
            owner_id: owner.to_string(),
            status,
            message: Some("New starter kit".to_string()),
            organization_id: ORG.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn line_item(request_id: Uuid, shop_item_id: Uuid, quantity: i32) -> ItemInRequestModel {
        ItemInRequestModel {
            id: Uuid::new_v4(),
            request_id,
            shop_item_id,
            quantity,
            status: ItemInRequestStatus::Pending,
            organization_id: ORG.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn shop_item(id: Uuid) -> ShopItem {
        ShopItem {
            id,
            name: "USB-C dock".to_string(),
            description: String::new(),
            image_url: None,
            category_id: Uuid::new_v4(),
            organization_id: ORG.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(
        requests: MockRequestRepository,
        items: MockItemInRequestRepository,
        shop_items: MockShopItemRepository,
    ) -> RequestServiceImpl {
        RequestServiceImpl::new(Arc::new(requests), Arc::new(items), Arc::new(shop_items))
    }

    #[tokio::test]
    async fn test_create_request_without_items_is_rejected() {
        let mut requests = MockRequestRepository::new();
        requests.expect_create_request().never();
        let service = service(
            requests,
            MockItemInRequestRepository::new(),
            MockShopItemRepository::new(),
        );

        let status = service
            .create_request(member_request(CreateRequestReq {
                message: None,
                items: vec![],
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "items: Request must contain at least one item");
    }

    #[tokio::test]
    async fn test_create_request_with_lines() {
        let shop_item_id = Uuid::new_v4();
        let mut shop_items = MockShopItemRepository::new();
        shop_items
            .expect_get_shop_item_by_id()
            .returning(|_, id| Ok(shop_item(id)));
        let mut requests = MockRequestRepository::new();
        requests
            .expect_create_request()
            .withf(|p| p.owner_id == USER && p.organization_id == ORG)
            .returning(|p| Ok(equipment_request(&p.owner_id, RequestStatus::Open)));
        let mut items = MockItemInRequestRepository::new();
        items
            .expect_create_item_in_request()
            .times(1)
            .returning(|p| Ok(line_item(p.request_id, p.shop_item_id, p.quantity)));
        let service = service(requests, items, shop_items);

        let res = service
            .create_request(member_request(CreateRequestReq {
                message: Some("New starter kit".to_string()),
                items: vec![RequestLineProto {
                    shop_item_id: shop_item_id.to_string(),
                    quantity: 2,
                }],
            }))
            .await
            .unwrap()
            .into_inner()
            .request
            .unwrap();

        assert_eq!(res.status, "Open");
        assert_eq!(res.items.len(), 1);
        assert_eq!(res.items[0].quantity, 2);
        assert_eq!(res.items[0].status, "Pending");
    }

    #[tokio::test]
    async fn test_create_request_with_unknown_shop_item() {
        let mut shop_items = MockShopItemRepository::new();
        shop_items
            .expect_get_shop_item_by_id()
            .returning(|_, _| Err(AppError::not_found("Shop item")));
        let mut requests = MockRequestRepository::new();
        requests.expect_create_request().never();
        let service = service(requests, MockItemInRequestRepository::new(), shop_items);

        let status = service
            .create_request(member_request(CreateRequestReq {
                message: None,
                items: vec![RequestLineProto {
                    shop_item_id: Uuid::new_v4().to_string(),
                    quantity: 1,
                }],
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(status.message(), "Shop item not found");
    }

    #[tokio::test]
    async fn test_close_request_rejects_other_status() {
        let mut requests = MockRequestRepository::new();
        requests.expect_update_request().never();
        let service = service(
            requests,
            MockItemInRequestRepository::new(),
            MockShopItemRepository::new(),
        );

        let status = service
            .close_request(member_request(CloseRequestReq {
                id: Uuid::new_v4().to_string(),
                status: "Accepted".to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "status: Status must be Closed");
    }

    #[tokio::test]
    async fn test_owner_closes_own_request() {
        let mut requests = MockRequestRepository::new();
        requests
            .expect_get_request_by_id()
            .returning(|_, _| Ok(equipment_request(USER, RequestStatus::Open)));
        requests
            .expect_update_request()
            .withf(|_, p| p.status == Some(RequestStatus::Closed))
            .returning(|_, _| Ok(equipment_request(USER, RequestStatus::Closed)));
        let mut items = MockItemInRequestRepository::new();
        items.expect_get_items_in_request().returning(|_, _| Ok(vec![]));
        let service = service(requests, items, MockShopItemRepository::new());

        let res = service
            .close_request(member_request(CloseRequestReq {
                id: Uuid::new_v4().to_string(),
                status: "Closed".to_string(),
            }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(res.request.unwrap().status, "Closed");
    }

    #[tokio::test]
    async fn test_member_cannot_approve_line_item() {
        let mut items = MockItemInRequestRepository::new();
        items
            .expect_get_item_in_request_by_id()
            .returning(|_, id| {
                let mut item = line_item(Uuid::new_v4(), Uuid::new_v4(), 1);
                item.id = id;
                Ok(item)
            });
        items.expect_update_item_in_request().never();
        let mut requests = MockRequestRepository::new();
        requests
            .expect_get_request_by_id()
            .returning(|_, _| Ok(equipment_request(USER, RequestStatus::Open)));
        let service = service(requests, items, MockShopItemRepository::new());

        let status = service
            .update_item_in_request(member_request(UpdateItemInRequestReq {
                id: Uuid::new_v4().to_string(),
                quantity: None,
                status: Some("Approved".to_string()),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn test_owner_cannot_add_to_closed_request() {
        let mut requests = MockRequestRepository::new();
        requests
            .expect_get_request_by_id()
            .returning(|_, _| Ok(equipment_request(USER, RequestStatus::Closed)));
        let mut items = MockItemInRequestRepository::new();
        items.expect_create_item_in_request().never();
        let service = service(requests, items, MockShopItemRepository::new());

        let status = service
            .add_item_to_request(member_request(AddItemToRequestReq {
                request_id: Uuid::new_v4().to_string(),
                shop_item_id: Uuid::new_v4().to_string(),
                quantity: 1,
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::FailedPrecondition);
    }

    fn approved_line_in_accepted_request() -> (MockRequestRepository, MockItemInRequestRepository) {
        let mut items = MockItemInRequestRepository::new();
        items
            .expect_get_item_in_request_by_id()
            .returning(|_, id| {
                let mut item = line_item(Uuid::new_v4(), Uuid::new_v4(), 1);
                item.id = id;
                item.status = ItemInRequestStatus::Approved;
                Ok(item)
            });
        items.expect_update_item_in_request().never();
        items.expect_delete_item_in_request().never();
        let mut requests = MockRequestRepository::new();
        requests
            .expect_get_request_by_id()
            .returning(|_, _| Ok(equipment_request(USER, RequestStatus::Accepted)));
        (requests, items)
    }

    #[tokio::test]
    async fn test_owner_cannot_change_quantity_of_approved_line() {
        let (requests, items) = approved_line_in_accepted_request();
        let service = service(requests, items, MockShopItemRepository::new());

        let status = service
            .update_item_in_request(member_request(UpdateItemInRequestReq {
                id: Uuid::new_v4().to_string(),
                quantity: Some(50),
                status: None,
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::FailedPrecondition);
    }

    #[tokio::test]
    async fn test_owner_cannot_remove_approved_line() {
        let (requests, items) = approved_line_in_accepted_request();
        let service = service(requests, items, MockShopItemRepository::new());

        let status = service
            .remove_item_from_request(member_request(IdReq {
                id: Uuid::new_v4().to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::FailedPrecondition);
    }

    #[tokio::test]
    async fn test_owner_changes_quantity_of_pending_line() {
        let mut items = MockItemInRequestRepository::new();
        items
            .expect_get_item_in_request_by_id()
            .returning(|_, id| {
                let mut item = line_item(Uuid::new_v4(), Uuid::new_v4(), 1);
                item.id = id;
                Ok(item)
            });
        items
            .expect_update_item_in_request()
            .withf(|_, p| p.quantity == Some(3) && p.status.is_none())
            .returning(|_, p| Ok(line_item(Uuid::new_v4(), Uuid::new_v4(), p.quantity.unwrap_or(1))));
        let mut requests = MockRequestRepository::new();
        requests
            .expect_get_request_by_id()
            .returning(|_, _| Ok(equipment_request(USER, RequestStatus::Open)));
        let service = service(requests, items, MockShopItemRepository::new());

        let res = service
            .update_item_in_request(member_request(UpdateItemInRequestReq {
                id: Uuid::new_v4().to_string(),
                quantity: Some(3),
                status: None,
            }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(res.item.unwrap().quantity, 3);
    }

    #[tokio::test]
    async fn test_owner_cannot_delete_own_request() {
        let mut requests = MockRequestRepository::new();
        requests.expect_delete_request().never();
        let service = service(
            requests,
            MockItemInRequestRepository::new(),
            MockShopItemRepository::new(),
        );

        let status = service
            .delete_request(member_request(IdReq {
                id: Uuid::new_v4().to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn test_manager_deletes_request() {
        let mut requests = MockRequestRepository::new();
        requests
            .expect_delete_request()
            .times(1)
            .returning(|_, _| Ok(()));
        let service = service(
            requests,
            MockItemInRequestRepository::new(),
            MockShopItemRepository::new(),
        );

        service
            .delete_request(admin_request(IdReq {
                id: Uuid::new_v4().to_string(),
            }))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_list_requests_with_bad_status_filter() {
        let service = service(
            MockRequestRepository::new(),
            MockItemInRequestRepository::new(),
            MockShopItemRepository::new(),
        );

        let status = service
            .list_requests(admin_request(ListRequestsReq {
                status: Some("Pending".to_string()),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(
            status.message(),
            "status: Status must be one of: Open, Accepted, Declined, Closed"
        );
    }
}
