use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::middleware::{AuthContext, Check, Permission};
use crate::models::{Inventory as InventoryModel, InventoryUpdate, NewInventory, UserId};
use crate::proto::common::{Empty, IdReq};
use crate::proto::inventory::inventory_service_server::InventoryService;
use crate::proto::inventory::{
    CreateInventoryReq, Inventory, InventoryRes, ListInventoryReq, ListInventoryRes,
    UpdateInventoryReq,
};
use crate::repository::InventoryRepository;
use crate::validation::{parse_optional_uuid, parse_uuid, Validate, ValidationErrors};

use super::timestamp;

const MANAGE_INVENTORY: Check = Check::Permission(Permission::ManageInventory);

pub struct InventoryServiceImpl {
    inventory: Arc<dyn InventoryRepository>,
}

impl InventoryServiceImpl {
    pub fn new(inventory: Arc<dyn InventoryRepository>) -> Self {
        Self { inventory }
    }

    fn model_to_proto(model: &InventoryModel) -> Inventory {
        Inventory {
            id: model.id.to_string(),
            shop_item_id: model.shop_item_id.to_string(),
            owner_id: model.owner_id.clone(),
            serial_number: model.serial_number.clone(),
            notes: model.notes.clone(),
            organization_id: model.organization_id.clone(),
            created_at: timestamp(&model.created_at),
            updated_at: timestamp(&model.updated_at),
        }
    }

    fn list_res(records: &[InventoryModel]) -> ListInventoryRes {
        ListInventoryRes {
            inventory: records.iter().map(Self::model_to_proto).collect(),
        }
    }
}

#[tonic::async_trait]
impl InventoryService for InventoryServiceImpl {
    async fn create_inventory(
        &self,
        request: Request<CreateInventoryReq>,
    ) -> Result<Response<InventoryRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        ctx.require(MANAGE_INVENTORY)?;
        let req = request.into_inner();

        let payload = NewInventory {
            shop_item_id: parse_uuid("shop_item_id", &req.shop_item_id)?,
            owner_id: req.owner_id,
            serial_number: req.serial_number.filter(|s| !s.is_empty()),
            notes: req.notes.filter(|n| !n.is_empty()),
            organization_id: ctx.org_id.to_string(),
        }
        .validated()?;

        let record = self.inventory.create_inventory(payload).await?;
        tracing::info!(
            "Assigned inventory {} (shop item {}) to {}",
            record.id,
            record.shop_item_id,
            record.owner_id
        );

        Ok(Response::new(InventoryRes {
            inventory: Some(Self::model_to_proto(&record)),
        }))
    }

    async fn get_inventory(
        &self,
        request: Request<IdReq>,
    ) -> Result<Response<InventoryRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let id = parse_uuid("id", &request.get_ref().id)?;

        let record = self.inventory.get_inventory_by_id(&ctx.org_id, id).await?;
        ctx.require_owner_or(&record.owner_id, MANAGE_INVENTORY)?;

        Ok(Response::new(InventoryRes {
            inventory: Some(Self::model_to_proto(&record)),
        }))
    }

    async fn list_my_inventory(
        &self,
        request: Request<Empty>,
    ) -> Result<Response<ListInventoryRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;

        let records = self
            .inventory
            .get_inventory_by_owner(&ctx.org_id, &ctx.user_id)
            .await?;

        Ok(Response::new(Self::list_res(&records)))
    }

    async fn list_inventory(
        &self,
        request: Request<ListInventoryReq>,
    ) -> Result<Response<ListInventoryRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        ctx.require(MANAGE_INVENTORY)?;

        let owner = match request.into_inner().owner_id.filter(|o| !o.is_empty()) {
            Some(owner) => Some(UserId::parse(owner).map_err(|e| {
                ValidationErrors::single("owner_id", format!("Owner ID {}", e))
            })?),
            None => None,
        };

        let records = match owner {
            Some(owner) => {
                self.inventory
                    .get_inventory_by_owner(&ctx.org_id, &owner)
                    .await?
            }
            None => {
                self.inventory
                    .get_all_inventory_in_organization(&ctx.org_id)
                    .await?
            }
        };

        Ok(Response::new(Self::list_res(&records)))
    }

    async fn update_inventory(
        &self,
        request: Request<UpdateInventoryReq>,
    ) -> Result<Response<InventoryRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        ctx.require(MANAGE_INVENTORY)?;
        let req = request.into_inner();

        let payload = InventoryUpdate {
            id: parse_uuid("id", &req.id)?,
            shop_item_id: parse_optional_uuid("shop_item_id", req.shop_item_id.as_deref())?,
            owner_id: req.owner_id,
            serial_number: req.serial_number,
            notes: req.notes,
        }
        .validated()?;

        let record = self.inventory.update_inventory(&ctx.org_id, payload).await?;
        tracing::info!("Updated inventory {}", record.id);

        Ok(Response::new(InventoryRes {
            inventory: Some(Self::model_to_proto(&record)),
        }))
    }

    async fn delete_inventory(&self, request: Request<IdReq>) -> Result<Response<Empty>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        ctx.require(MANAGE_INVENTORY)?;
        let id = parse_uuid("id", &request.get_ref().id)?;

        self.inventory.delete_inventory(&ctx.org_id, id).await?;
        tracing::info!("Deleted inventory {} in {}", id, ctx.org_id);

        Ok(Response::new(Empty {}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::context::test_support::*;
    use crate::repository::MockInventoryRepository;
    use chrono::Utc;
    use tonic::Code;
    use uuid::Uuid;

    fn record(owner: &str) -> InventoryModel {
        InventoryModel {
            id: Uuid::new_v4(),
            shop_item_id: Uuid::new_v4(),
            owner_id: owner.to_string(),
            serial_number: Some("SN-0042".to_string()),
            notes: None,
            organization_id: ORG.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_owner_can_read_own_inventory() {
        let mut repo = MockInventoryRepository::new();
        repo.expect_get_inventory_by_id()
            .returning(|_, _| Ok(record(USER)));
        let service = InventoryServiceImpl::new(Arc::new(repo));

        let res = service
            .get_inventory(member_request(IdReq {
                id: Uuid::new_v4().to_string(),
            }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(res.inventory.unwrap().owner_id, USER);
    }

    #[tokio::test]
    async fn test_member_cannot_read_someone_elses_inventory() {
        let mut repo = MockInventoryRepository::new();
        repo.expect_get_inventory_by_id()
            .returning(|_, _| Ok(record(OTHER_USER)));
        let service = InventoryServiceImpl::new(Arc::new(repo));

        let status = service
            .get_inventory(member_request(IdReq {
                id: Uuid::new_v4().to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn test_list_my_inventory_uses_caller() {
        let mut repo = MockInventoryRepository::new();
        repo.expect_get_inventory_by_owner()
            .withf(|org, owner| org.as_str() == ORG && owner.as_str() == USER)
            .times(1)
            .returning(|_, _| Ok(vec![record(USER)]));
        let service = InventoryServiceImpl::new(Arc::new(repo));

        let res = service
            .list_my_inventory(member_request(Empty {}))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(res.inventory.len(), 1);
    }

    #[tokio::test]
    async fn test_list_inventory_rejects_malformed_owner_filter() {
        let service = InventoryServiceImpl::new(Arc::new(MockInventoryRepository::new()));

        let status = service
            .list_inventory(admin_request(ListInventoryReq {
                owner_id: Some("user_123".to_string()),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(
            status.message(),
            "owner_id: Owner ID must be exactly 32 characters long"
        );
    }

    #[tokio::test]
    async fn test_create_requires_inventory_permission() {
        let mut repo = MockInventoryRepository::new();
        repo.expect_create_inventory().never();
        let service = InventoryServiceImpl::new(Arc::new(repo));

        let status = service
            .create_inventory(member_request(CreateInventoryReq {
                shop_item_id: Uuid::new_v4().to_string(),
                owner_id: USER.to_string(),
                serial_number: None,
                notes: None,
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn test_inventory_manager_creates_for_another_user() {
        let mut repo = MockInventoryRepository::new();
        repo.expect_create_inventory()
            .withf(|p| p.owner_id == OTHER_USER && p.organization_id == ORG)
            .returning(|p| Ok(record(&p.owner_id)));
        let service = InventoryServiceImpl::new(Arc::new(repo));

        let res = service
            .create_inventory(request(
                CreateInventoryReq {
                    shop_item_id: Uuid::new_v4().to_string(),
                    owner_id: OTHER_USER.to_string(),
                    serial_number: Some("SN-0042".to_string()),
                    notes: None,
                },
                session(USER, Some("org:support"), &["org:inventory:manage"]),
            ))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(res.inventory.unwrap().owner_id, OTHER_USER);
    }
}
