use std::sync::Arc;

use tonic::{Request, Response, Status};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::{AuthContext, Check, Permission};
use crate::models::{
    screenshot_storage_key, too_many_screenshots, CloseTicket, NewTicket, NewTicketConversation,
    NewTicketScreenshot, OrgId, ScreenshotUpload as UploadModel, Ticket as TicketModel,
    TicketConversation as ConversationModel, TicketPriority, TicketScreenshot as ScreenshotModel,
    TicketStatus, TicketUpdate, MAX_SCREENSHOTS_PER_TICKET,
};
use crate::proto::common::{Empty, IdReq};
use crate::proto::tickets::ticket_service_server::TicketService;
use crate::proto::tickets::{
    AddConversationReq, CloseTicketReq, ConversationRes, CreateTicketReq, CreateTicketRes,
    ListConversationsRes, ListScreenshotsRes, ListTicketsReq, ListTicketsRes, ScreenshotChunk,
    ScreenshotRes, ScreenshotUpload, Ticket, TicketConversation, TicketDetailRes, TicketRef,
    TicketRes, TicketScreenshot, UpdateTicketReq, UploadScreenshotReq,
};
use crate::repository::{
    TicketConversationRepository, TicketRepository, TicketScreenshotRepository,
};
use crate::storage::StorageBackend;
use crate::validation::{parse_optional_enum, parse_uuid, Validate, Validated, ValidationErrors};

use super::timestamp;

const MANAGE_TICKETS: Check = Check::Permission(Permission::ManageTickets);
const CHUNK_SIZE: usize = 64 * 1024;

fn upload_from_proto(upload: ScreenshotUpload) -> Result<Validated<UploadModel>, ValidationErrors> {
    UploadModel {
        content_type: upload.content_type,
        data: upload.data,
    }
    .validated()
}

pub struct TicketServiceImpl {
    tickets: Arc<dyn TicketRepository>,
    conversations: Arc<dyn TicketConversationRepository>,
    screenshots: Arc<dyn TicketScreenshotRepository>,
    storage: Option<Arc<dyn StorageBackend>>,
}

impl TicketServiceImpl {
    pub fn new(
        tickets: Arc<dyn TicketRepository>,
        conversations: Arc<dyn TicketConversationRepository>,
        screenshots: Arc<dyn TicketScreenshotRepository>,
        storage: Option<Arc<dyn StorageBackend>>,
    ) -> Self {
        Self {
            tickets,
            conversations,
            screenshots,
            storage,
        }
    }

    fn ticket_to_proto(model: &TicketModel) -> Ticket {
        Ticket {
            id: model.id.to_string(),
            title: model.title.clone(),
            description: model.description.clone(),
            status: model.status.to_string(),
            priority: model.priority.to_string(),
            owner_id: model.owner_id.clone(),
            organization_id: model.organization_id.clone(),
            created_at: timestamp(&model.created_at),
            updated_at: timestamp(&model.updated_at),
        }
    }

    fn conversation_to_proto(model: &ConversationModel) -> TicketConversation {
        TicketConversation {
            id: model.id.to_string(),
            ticket_id: model.ticket_id.to_string(),
            author_id: model.author_id.clone(),
            message: model.message.clone(),
            organization_id: model.organization_id.clone(),
            created_at: timestamp(&model.created_at),
        }
    }

    fn screenshot_to_proto(model: &ScreenshotModel) -> TicketScreenshot {
        TicketScreenshot {
            id: model.id.to_string(),
            ticket_id: model.ticket_id.to_string(),
            content_type: model.content_type.clone(),
            size_bytes: model.size_bytes,
            organization_id: model.organization_id.clone(),
            created_at: timestamp(&model.created_at),
        }
    }

    fn storage(&self) -> AppResult<&Arc<dyn StorageBackend>> {
        self.storage.as_ref().ok_or(AppError::StorageUnavailable)
    }

    /// Fetches a ticket the caller may see: its owner or a ticket manager.
    async fn visible_ticket(&self, ctx: &AuthContext, id: Uuid) -> AppResult<TicketModel> {
        let ticket = self.tickets.get_ticket_by_id(&ctx.org_id, id).await?;
        ctx.require_owner_or(&ticket.owner_id, MANAGE_TICKETS)?;
        Ok(ticket)
    }

    /// Writes the bytes to storage, then the metadata row. The object is
    /// removed again when the row cannot be written.
    async fn store_screenshot(
        &self,
        org: &OrgId,
        ticket_id: Uuid,
        upload: Validated<UploadModel>,
    ) -> AppResult<ScreenshotModel> {
        let storage = self.storage()?;
        let id = Uuid::new_v4();
        let key = screenshot_storage_key(org.as_str(), ticket_id, id);

        storage
            .upload(&key, &upload.data, &upload.content_type)
            .await?;

        let payload = NewTicketScreenshot {
            id,
            ticket_id,
            storage_key: key.clone(),
            content_type: upload.content_type.clone(),
            size_bytes: upload.data.len() as i64,
            organization_id: org.to_string(),
        }
        .validated()?;

        match self.screenshots.create_ticket_screenshot(payload).await {
            Ok(screenshot) => Ok(screenshot),
            Err(e) => {
                if let Err(cleanup) = storage.delete(&key).await {
                    tracing::warn!("Failed to remove orphaned object {}: {}", key, cleanup);
                }
                Err(e)
            }
        }
    }

    /// Removes stored objects for the given screenshots. Failures are logged
    /// and do not stop the caller.
    async fn remove_objects(&self, screenshots: &[ScreenshotModel]) {
        let Some(storage) = self.storage.as_ref() else {
            if !screenshots.is_empty() {
                tracing::warn!(
                    "Storage not configured, leaving {} screenshot object(s) behind",
                    screenshots.len()
                );
            }
            return;
        };
        for screenshot in screenshots {
            if let Err(e) = storage.delete(&screenshot.storage_key).await {
                tracing::warn!(
                    "Failed to delete screenshot object {}: {}",
                    screenshot.storage_key,
                    e
                );
            }
        }
    }
}

#[tonic::async_trait]
impl TicketService for TicketServiceImpl {
    async fn create_ticket(
        &self,
        request: Request<CreateTicketReq>,
    ) -> Result<Response<CreateTicketRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let req = request.into_inner();

        let priority = parse_optional_enum::<TicketPriority>(
            "priority",
            req.priority.as_deref().filter(|p| !p.is_empty()),
        )?
        .unwrap_or_default();
        let payload = NewTicket {
            title: req.title,
            description: req.description,
            priority,
            owner_id: ctx.user_id.to_string(),
            organization_id: ctx.org_id.to_string(),
        }
        .validated()?;

        if req.screenshots.len() as i64 > MAX_SCREENSHOTS_PER_TICKET {
            return Err(too_many_screenshots().into());
        }
        let mut errors = ValidationErrors::default();
        let mut uploads = Vec::with_capacity(req.screenshots.len());
        for upload in req.screenshots {
            match upload_from_proto(upload) {
                Ok(upload) => uploads.push(upload),
                Err(e) => errors.merge(e),
            }
        }
        if !errors.is_empty() {
            return Err(errors.into());
        }
        if !uploads.is_empty() {
            self.storage()?;
        }

        let ticket = self.tickets.create_ticket(payload).await?;

        let mut screenshots = Vec::with_capacity(uploads.len());
        for upload in uploads {
            match self.store_screenshot(&ctx.org_id, ticket.id, upload).await {
                Ok(screenshot) => screenshots.push(screenshot),
                Err(e) => {
                    self.remove_objects(&screenshots).await;
                    if let Err(cleanup) = self.tickets.delete_ticket(&ctx.org_id, ticket.id).await {
                        tracing::error!("Failed to roll back ticket {}: {}", ticket.id, cleanup);
                    }
                    return Err(e.into());
                }
            }
        }

        tracing::info!(
            "Created ticket {} ({} screenshot(s)) for {}",
            ticket.id,
            screenshots.len(),
            ticket.owner_id
        );

        Ok(Response::new(CreateTicketRes {
            ticket: Some(Self::ticket_to_proto(&ticket)),
            screenshots: screenshots.iter().map(Self::screenshot_to_proto).collect(),
        }))
    }

    async fn get_ticket(
        &self,
        request: Request<IdReq>,
    ) -> Result<Response<TicketDetailRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let id = parse_uuid("id", &request.get_ref().id)?;

        let ticket = self.visible_ticket(&ctx, id).await?;
        let conversations = self
            .conversations
            .get_conversations_for_ticket(&ctx.org_id, ticket.id)
            .await?;
        let screenshots = self
            .screenshots
            .get_screenshots_for_ticket(&ctx.org_id, ticket.id)
            .await?;

        Ok(Response::new(TicketDetailRes {
            ticket: Some(Self::ticket_to_proto(&ticket)),
            conversations: conversations
                .iter()
                .map(Self::conversation_to_proto)
                .collect(),
            screenshots: screenshots.iter().map(Self::screenshot_to_proto).collect(),
        }))
    }

    async fn list_my_tickets(
        &self,
        request: Request<Empty>,
    ) -> Result<Response<ListTicketsRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;

        let tickets = self
            .tickets
            .get_tickets_by_owner(&ctx.org_id, &ctx.user_id)
            .await?;

        Ok(Response::new(ListTicketsRes {
            tickets: tickets.iter().map(Self::ticket_to_proto).collect(),
        }))
    }

    async fn list_tickets(
        &self,
        request: Request<ListTicketsReq>,
    ) -> Result<Response<ListTicketsRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        ctx.require(MANAGE_TICKETS)?;
        let status = parse_optional_enum::<TicketStatus>(
            "status",
            request.get_ref().status.as_deref().filter(|s| !s.is_empty()),
        )?;

        let tickets = self
            .tickets
            .get_all_tickets_in_organization(&ctx.org_id, status)
            .await?;

        Ok(Response::new(ListTicketsRes {
            tickets: tickets.iter().map(Self::ticket_to_proto).collect(),
        }))
    }

    async fn update_ticket(
        &self,
        request: Request<UpdateTicketReq>,
    ) -> Result<Response<TicketRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        ctx.require(MANAGE_TICKETS)?;
        let req = request.into_inner();

        let payload = TicketUpdate {
            id: parse_uuid("id", &req.id)?,
            title: req.title,
            description: req.description,
            status: parse_optional_enum("status", req.status.as_deref())?,
            priority: parse_optional_enum("priority", req.priority.as_deref())?,
        }
        .validated()?;

        let ticket = self.tickets.update_ticket(&ctx.org_id, payload).await?;
        tracing::info!("Updated ticket {} (status {})", ticket.id, ticket.status);

        Ok(Response::new(TicketRes {
            ticket: Some(Self::ticket_to_proto(&ticket)),
        }))
    }

    async fn close_ticket(
        &self,
        request: Request<CloseTicketReq>,
    ) -> Result<Response<TicketRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let req = request.into_inner();

        let close = CloseTicket {
            id: parse_uuid("id", &req.id)?,
            status: req.status,
        }
        .validated()?;

        self.visible_ticket(&ctx, close.id).await?;
        let ticket = self
            .tickets
            .update_ticket(&ctx.org_id, close.as_update().validated()?)
            .await?;
        tracing::info!("Closed ticket {}", ticket.id);

        Ok(Response::new(TicketRes {
            ticket: Some(Self::ticket_to_proto(&ticket)),
        }))
    }

    async fn delete_ticket(&self, request: Request<IdReq>) -> Result<Response<Empty>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let id = parse_uuid("id", &request.get_ref().id)?;

        ctx.require(MANAGE_TICKETS)?;

        let ticket = self.tickets.get_ticket_by_id(&ctx.org_id, id).await?;
        let screenshots = self
            .screenshots
            .get_screenshots_for_ticket(&ctx.org_id, ticket.id)
            .await?;

        // Rows cascade with the ticket. Objects go only once the rows are gone.
        self.tickets.delete_ticket(&ctx.org_id, ticket.id).await?;
        self.remove_objects(&screenshots).await;
        tracing::info!("Deleted ticket {} in {}", ticket.id, ctx.org_id);

        Ok(Response::new(Empty {}))
    }

    async fn add_conversation(
        &self,
        request: Request<AddConversationReq>,
    ) -> Result<Response<ConversationRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let req = request.into_inner();

        let payload = NewTicketConversation {
            ticket_id: parse_uuid("ticket_id", &req.ticket_id)?,
            author_id: ctx.user_id.to_string(),
            message: req.message,
            organization_id: ctx.org_id.to_string(),
        }
        .validated()?;

        self.visible_ticket(&ctx, payload.ticket_id).await?;
        let conversation = self
            .conversations
            .create_ticket_conversation(payload)
            .await?;
        tracing::info!(
            "Added conversation {} to ticket {}",
            conversation.id,
            conversation.ticket_id
        );

        Ok(Response::new(ConversationRes {
            conversation: Some(Self::conversation_to_proto(&conversation)),
        }))
    }

    async fn list_conversations(
        &self,
        request: Request<TicketRef>,
    ) -> Result<Response<ListConversationsRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let ticket_id = parse_uuid("ticket_id", &request.get_ref().ticket_id)?;

        self.visible_ticket(&ctx, ticket_id).await?;
        let conversations = self
            .conversations
            .get_conversations_for_ticket(&ctx.org_id, ticket_id)
            .await?;

        Ok(Response::new(ListConversationsRes {
            conversations: conversations
                .iter()
                .map(Self::conversation_to_proto)
                .collect(),
        }))
    }

    async fn delete_conversation(
        &self,
        request: Request<IdReq>,
    ) -> Result<Response<Empty>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let id = parse_uuid("id", &request.get_ref().id)?;

        let conversation = self
            .conversations
            .get_ticket_conversation_by_id(&ctx.org_id, id)
            .await?;
        ctx.require_owner_or(&conversation.author_id, MANAGE_TICKETS)?;

        self.conversations
            .delete_ticket_conversation(&ctx.org_id, id)
            .await?;
        tracing::info!("Deleted conversation {} in {}", id, ctx.org_id);

        Ok(Response::new(Empty {}))
    }

    async fn upload_screenshot(
        &self,
        request: Request<UploadScreenshotReq>,
    ) -> Result<Response<ScreenshotRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let req = request.into_inner();

        let ticket_id = parse_uuid("ticket_id", &req.ticket_id)?;
        let upload = req
            .screenshot
            .ok_or_else(|| ValidationErrors::single("screenshot", "screenshot is required"))?;
        let upload = upload_from_proto(upload)?;

        self.visible_ticket(&ctx, ticket_id).await?;
        self.storage()?;
        let count = self
            .screenshots
            .count_screenshots_for_ticket(&ctx.org_id, ticket_id)
            .await?;
        if count >= MAX_SCREENSHOTS_PER_TICKET {
            return Err(too_many_screenshots().into());
        }

        let screenshot = self
            .store_screenshot(&ctx.org_id, ticket_id, upload)
            .await?;
        tracing::info!(
            "Stored screenshot {} for ticket {} ({} bytes)",
            screenshot.id,
            ticket_id,
            screenshot.size_bytes
        );

        Ok(Response::new(ScreenshotRes {
            screenshot: Some(Self::screenshot_to_proto(&screenshot)),
        }))
    }

    async fn list_screenshots(
        &self,
        request: Request<TicketRef>,
    ) -> Result<Response<ListScreenshotsRes>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let ticket_id = parse_uuid("ticket_id", &request.get_ref().ticket_id)?;

        self.visible_ticket(&ctx, ticket_id).await?;
        let screenshots = self
            .screenshots
            .get_screenshots_for_ticket(&ctx.org_id, ticket_id)
            .await?;

        Ok(Response::new(ListScreenshotsRes {
            screenshots: screenshots.iter().map(Self::screenshot_to_proto).collect(),
        }))
    }

    type DownloadScreenshotStream =
        tokio_stream::wrappers::ReceiverStream<Result<ScreenshotChunk, Status>>;

    async fn download_screenshot(
        &self,
        request: Request<IdReq>,
    ) -> Result<Response<Self::DownloadScreenshotStream>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let id = parse_uuid("id", &request.get_ref().id)?;

        let screenshot = self
            .screenshots
            .get_ticket_screenshot_by_id(&ctx.org_id, id)
            .await?;
        self.visible_ticket(&ctx, screenshot.ticket_id).await?;

        let data = self.storage()?.download(&screenshot.storage_key).await?;
        let content_type = screenshot.content_type;

        let (tx, rx) = tokio::sync::mpsc::channel(4);
        tokio::spawn(async move {
            for chunk in data.chunks(CHUNK_SIZE) {
                let chunk = ScreenshotChunk {
                    data: chunk.to_vec(),
                    content_type: content_type.clone(),
                };
                if tx.send(Ok(chunk)).await.is_err() {
                    break;
                }
            }
        });

        Ok(Response::new(tokio_stream::wrappers::ReceiverStream::new(
            rx,
        )))
    }

    async fn delete_screenshot(&self, request: Request<IdReq>) -> Result<Response<Empty>, Status> {
        let ctx = AuthContext::from_request(&request)?;
        let id = parse_uuid("id", &request.get_ref().id)?;

        let screenshot = self
            .screenshots
            .get_ticket_screenshot_by_id(&ctx.org_id, id)
            .await?;
        self.visible_ticket(&ctx, screenshot.ticket_id).await?;

        let storage = self.storage()?;
        self.screenshots
            .delete_ticket_screenshot(&ctx.org_id, id)
            .await?;
        if let Err(e) = storage.delete(&screenshot.storage_key).await {
            tracing::warn!(
                "Failed to delete screenshot object {}: {}",
                screenshot.storage_key,
                e
            );
        }
        tracing::info!("Deleted screenshot {} from ticket {}", id, screenshot.ticket_id);

        Ok(Response::new(Empty {}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::context::test_support::*;
    use crate::repository::{
        MockTicketConversationRepository, MockTicketRepository, MockTicketScreenshotRepository,
    };
    use crate::storage::MockStorageBackend;
    use chrono::Utc;
    use tokio_stream::StreamExt;
    use tonic::Code;

    fn ticket(owner: &str) -> TicketModel {
        TicketModel {
            id: Uuid::new_v4(),
            title: "Laptop will not boot".to_string(),
            description: "Black screen after the latest update".to_string(),
            status: TicketStatus::Open,
            priority: TicketPriority::High,
            owner_id: owner.to_string(),
            organization_id: ORG.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn screenshot(ticket_id: Uuid, size: i64) -> ScreenshotModel {
        let id = Uuid::new_v4();
        ScreenshotModel {
            id,
            ticket_id,
            storage_key: screenshot_storage_key(ORG, ticket_id, id),
            content_type: "image/png".to_string(),
            size_bytes: size,
            organization_id: ORG.to_string(),
            created_at: Utc::now(),
        }
    }

    fn png(size: usize) -> ScreenshotUpload {
        ScreenshotUpload {
            content_type: "image/png".to_string(),
            data: vec![7u8; size],
        }
    }

    struct Mocks {
        tickets: MockTicketRepository,
        conversations: MockTicketConversationRepository,
        screenshots: MockTicketScreenshotRepository,
        storage: Option<MockStorageBackend>,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                tickets: MockTicketRepository::new(),
                conversations: MockTicketConversationRepository::new(),
                screenshots: MockTicketScreenshotRepository::new(),
                storage: Some(MockStorageBackend::new()),
            }
        }

        fn build(self) -> TicketServiceImpl {
            TicketServiceImpl::new(
                Arc::new(self.tickets),
                Arc::new(self.conversations),
                Arc::new(self.screenshots),
                self.storage
                    .map(|s| Arc::new(s) as Arc<dyn StorageBackend>),
            )
        }
    }

    fn create_req(screenshots: Vec<ScreenshotUpload>) -> CreateTicketReq {
        CreateTicketReq {
            title: "Laptop will not boot".to_string(),
            description: "Black screen after the latest update".to_string(),
            priority: None,
            screenshots,
        }
    }

    #[tokio::test]
    async fn test_create_ticket_defaults_to_medium_priority() {
        let mut mocks = Mocks::new();
        mocks
            .tickets
            .expect_create_ticket()
            .withf(|p| p.priority == TicketPriority::Medium && p.owner_id == USER)
            .returning(|p| {
                let mut t = ticket(&p.owner_id);
                t.priority = p.priority;
                Ok(t)
            });
        let service = mocks.build();

        let res = service
            .create_ticket(member_request(create_req(vec![])))
            .await
            .unwrap()
            .into_inner();

        let ticket = res.ticket.unwrap();
        assert_eq!(ticket.priority, "Medium");
        assert_eq!(ticket.status, "Open");
        assert!(res.screenshots.is_empty());
    }

    #[tokio::test]
    async fn test_create_ticket_stores_inline_screenshots() {
        let mut mocks = Mocks::new();
        mocks
            .tickets
            .expect_create_ticket()
            .returning(|p| Ok(ticket(&p.owner_id)));
        if let Some(storage) = mocks.storage.as_mut() {
            storage
                .expect_upload()
                .withf(|key, _, content_type| key.starts_with(ORG) && content_type == "image/png")
                .times(2)
                .returning(|key, _, _| Ok(key.to_string()));
        }
        mocks
            .screenshots
            .expect_create_ticket_screenshot()
            .times(2)
            .returning(|p| Ok(screenshot(p.ticket_id, p.size_bytes)));
        let service = mocks.build();

        let res = service
            .create_ticket(member_request(create_req(vec![png(10), png(20)])))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(res.screenshots.len(), 2);
        assert_eq!(res.screenshots[1].size_bytes, 20);
    }

    #[tokio::test]
    async fn test_create_ticket_with_five_screenshots_is_rejected() {
        let mut mocks = Mocks::new();
        mocks.tickets.expect_create_ticket().never();
        let service = mocks.build();

        let status = service
            .create_ticket(member_request(create_req(vec![png(1); 5])))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(
            status.message(),
            "screenshots: A ticket can have at most 4 screenshots"
        );
    }

    #[tokio::test]
    async fn test_create_ticket_rejects_gif() {
        let mut mocks = Mocks::new();
        mocks.tickets.expect_create_ticket().never();
        let service = mocks.build();

        let gif = ScreenshotUpload {
            content_type: "image/gif".to_string(),
            data: vec![1u8; 16],
        };
        let status = service
            .create_ticket(member_request(create_req(vec![gif])))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(
            status.message(),
            "content_type: Only .jpg and .png files are accepted"
        );
    }

    #[tokio::test]
    async fn test_screenshots_without_storage_are_unavailable() {
        let mut mocks = Mocks::new();
        mocks.storage = None;
        mocks.tickets.expect_create_ticket().never();
        let service = mocks.build();

        let status = service
            .create_ticket(member_request(create_req(vec![png(10)])))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::Unavailable);
    }

    #[tokio::test]
    async fn test_failed_metadata_write_removes_object_and_ticket() {
        let mut mocks = Mocks::new();
        mocks
            .tickets
            .expect_create_ticket()
            .returning(|p| Ok(ticket(&p.owner_id)));
        mocks
            .tickets
            .expect_delete_ticket()
            .times(1)
            .returning(|_, _| Ok(()));
        if let Some(storage) = mocks.storage.as_mut() {
            storage
                .expect_upload()
                .returning(|key, _, _| Ok(key.to_string()));
            storage.expect_delete().times(1).returning(|_| Ok(()));
        }
        mocks
            .screenshots
            .expect_create_ticket_screenshot()
            .returning(|_| Err(AppError::Internal("insert failed".to_string())));
        let service = mocks.build();

        let status = service
            .create_ticket(member_request(create_req(vec![png(10)])))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::Internal);
    }

    #[tokio::test]
    async fn test_upload_fifth_screenshot_is_rejected() {
        let mut mocks = Mocks::new();
        mocks
            .tickets
            .expect_get_ticket_by_id()
            .returning(|_, _| Ok(ticket(USER)));
        mocks
            .screenshots
            .expect_count_screenshots_for_ticket()
            .returning(|_, _| Ok(4));
        mocks.screenshots.expect_create_ticket_screenshot().never();
        let service = mocks.build();

        let status = service
            .upload_screenshot(member_request(UploadScreenshotReq {
                ticket_id: Uuid::new_v4().to_string(),
                screenshot: Some(png(10)),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(
            status.message(),
            "screenshots: A ticket can have at most 4 screenshots"
        );
    }

    #[tokio::test]
    async fn test_close_ticket_rejects_in_progress() {
        let mut mocks = Mocks::new();
        mocks.tickets.expect_update_ticket().never();
        let service = mocks.build();

        let status = service
            .close_ticket(member_request(CloseTicketReq {
                id: Uuid::new_v4().to_string(),
                status: "InProgress".to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "status: Status must be Closed");
    }

    #[tokio::test]
    async fn test_member_cannot_view_another_users_ticket() {
        let mut mocks = Mocks::new();
        mocks
            .tickets
            .expect_get_ticket_by_id()
            .returning(|_, _| Ok(ticket(OTHER_USER)));
        mocks.conversations.expect_get_conversations_for_ticket().never();
        let service = mocks.build();

        let status = service
            .get_ticket(member_request(IdReq {
                id: Uuid::new_v4().to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(status.message(), "Not found");
    }

    #[tokio::test]
    async fn test_support_lists_open_tickets() {
        let mut mocks = Mocks::new();
        mocks
            .tickets
            .expect_get_all_tickets_in_organization()
            .withf(|org, status| org.as_str() == ORG && *status == Some(TicketStatus::Open))
            .returning(|_, _| Ok(vec![ticket(USER), ticket(OTHER_USER)]));
        let service = mocks.build();

        let res = service
            .list_tickets(request(
                ListTicketsReq {
                    status: Some("Open".to_string()),
                },
                session(USER, Some("org:support"), &["org:tickets:manage"]),
            ))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(res.tickets.len(), 2);
    }

    #[tokio::test]
    async fn test_download_streams_in_chunks() {
        let mut mocks = Mocks::new();
        let shot = screenshot(Uuid::new_v4(), (CHUNK_SIZE + 10) as i64);
        let ticket_id = shot.ticket_id;
        mocks
            .screenshots
            .expect_get_ticket_screenshot_by_id()
            .returning(move |_, _| Ok(shot.clone()));
        mocks
            .tickets
            .expect_get_ticket_by_id()
            .withf(move |_, id| *id == ticket_id)
            .returning(|_, _| Ok(ticket(USER)));
        if let Some(storage) = mocks.storage.as_mut() {
            storage
                .expect_download()
                .returning(|_| Ok(vec![1u8; CHUNK_SIZE + 10]));
        }
        let service = mocks.build();

        let stream = service
            .download_screenshot(member_request(IdReq {
                id: Uuid::new_v4().to_string(),
            }))
            .await
            .unwrap()
            .into_inner();
        let chunks: Vec<_> = stream.collect().await;

        assert_eq!(chunks.len(), 2);
        let first = chunks[0].as_ref().unwrap();
        assert_eq!(first.data.len(), CHUNK_SIZE);
        assert_eq!(first.content_type, "image/png");
        assert_eq!(chunks[1].as_ref().unwrap().data.len(), 10);
    }

    #[tokio::test]
    async fn test_delete_ticket_removes_stored_objects() {
        let mut mocks = Mocks::new();
        mocks
            .tickets
            .expect_get_ticket_by_id()
            .returning(|_, _| Ok(ticket(USER)));
        mocks
            .screenshots
            .expect_get_screenshots_for_ticket()
            .returning(|_, ticket_id| Ok(vec![screenshot(ticket_id, 5), screenshot(ticket_id, 6)]));
        if let Some(storage) = mocks.storage.as_mut() {
            storage.expect_delete().times(2).returning(|_| Ok(()));
        }
        mocks
            .tickets
            .expect_delete_ticket()
            .times(1)
            .returning(|_, _| Ok(()));
        let service = mocks.build();

        service
            .delete_ticket(admin_request(IdReq {
                id: Uuid::new_v4().to_string(),
            }))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_owner_cannot_delete_own_ticket() {
        let mut mocks = Mocks::new();
        mocks.tickets.expect_delete_ticket().never();
        if let Some(storage) = mocks.storage.as_mut() {
            storage.expect_delete().never();
        }
        let service = mocks.build();

        let status = service
            .delete_ticket(member_request(IdReq {
                id: Uuid::new_v4().to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn test_failed_ticket_delete_keeps_stored_objects() {
        let mut mocks = Mocks::new();
        mocks
            .tickets
            .expect_get_ticket_by_id()
            .returning(|_, _| Ok(ticket(USER)));
        mocks
            .screenshots
            .expect_get_screenshots_for_ticket()
            .returning(|_, ticket_id| Ok(vec![screenshot(ticket_id, 5)]));
        mocks
            .tickets
            .expect_delete_ticket()
            .returning(|_, _| Err(AppError::Database(sqlx::Error::PoolTimedOut)));
        if let Some(storage) = mocks.storage.as_mut() {
            storage.expect_delete().never();
        }
        let service = mocks.build();

        let status = service
            .delete_ticket(admin_request(IdReq {
                id: Uuid::new_v4().to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::Internal);
    }

    #[tokio::test]
    async fn test_failed_screenshot_row_delete_keeps_object() {
        let mut mocks = Mocks::new();
        let shot = screenshot(Uuid::new_v4(), 5);
        mocks
            .screenshots
            .expect_get_ticket_screenshot_by_id()
            .returning(move |_, _| Ok(shot.clone()));
        mocks
            .tickets
            .expect_get_ticket_by_id()
            .returning(|_, _| Ok(ticket(USER)));
        mocks
            .screenshots
            .expect_delete_ticket_screenshot()
            .returning(|_, _| Err(AppError::Database(sqlx::Error::PoolTimedOut)));
        if let Some(storage) = mocks.storage.as_mut() {
            storage.expect_delete().never();
        }
        let service = mocks.build();

        let status = service
            .delete_screenshot(member_request(IdReq {
                id: Uuid::new_v4().to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::Internal);
    }

    #[tokio::test]
    async fn test_delete_screenshot_survives_storage_failure() {
        let mut mocks = Mocks::new();
        let shot = screenshot(Uuid::new_v4(), 5);
        mocks
            .screenshots
            .expect_get_ticket_screenshot_by_id()
            .returning(move |_, _| Ok(shot.clone()));
        mocks
            .tickets
            .expect_get_ticket_by_id()
            .returning(|_, _| Ok(ticket(USER)));
        mocks
            .screenshots
            .expect_delete_ticket_screenshot()
            .times(1)
            .returning(|_, _| Ok(()));
        if let Some(storage) = mocks.storage.as_mut() {
            storage
                .expect_delete()
                .times(1)
                .returning(|_| Err(AppError::Storage("bucket offline".to_string())));
        }
        let service = mocks.build();

        service
            .delete_screenshot(member_request(IdReq {
                id: Uuid::new_v4().to_string(),
            }))
            .await
            .unwrap();
    }
}
