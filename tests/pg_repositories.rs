//! Repository tests against a real Postgres. Run with
//! `DATABASE_URL=postgres://... cargo test -- --ignored`.

use self_service_portal::error::AppError;
use self_service_portal::models::{
    NewItemInRequest, NewRequest, NewShopItem, NewShopItemCategory, NewTicket,
    NewTicketConversation, NewTicketScreenshot, OrgId, RequestLine, ShopItemCategoryUpdate,
    ShopItemUpdate, TicketPriority, UserId, MAX_SCREENSHOTS_PER_TICKET,
};
use self_service_portal::validation::Validated;
use self_service_portal::repository::*;
use self_service_portal::validation::Validate;
use sqlx::PgPool;
use uuid::Uuid;

const ORG: &str = "org_2abcdefghijklmnopqrstuvwxyz";
const OTHER_ORG: &str = "org_2zyxwvutsrqponmlkjihgfedcba";
const USER: &str = "user_2abcdefghijklmnopqrstuvwxyz";

fn org(id: &str) -> OrgId {
    OrgId::parse(id).unwrap()
}

async fn seed_category(pool: &PgPool, organization_id: &str, name: &str) -> Uuid {
    let payload = NewShopItemCategory {
        name: name.to_string(),
        organization_id: organization_id.to_string(),
    }
    .validated()
    .unwrap();
    PgShopItemCategoryRepository::new(pool.clone())
        .create_shop_item_category(payload)
        .await
        .unwrap()
        .id
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_created_category_is_listed_for_its_organization(pool: PgPool) {
    let repo = PgShopItemCategoryRepository::new(pool.clone());
    seed_category(&pool, ORG, "Laptops").await;

    let listed = repo
        .get_all_shop_item_categories_in_organization(&org(ORG))
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Laptops");
    assert_eq!(listed[0].organization_id, ORG);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_queries_never_cross_organizations(pool: PgPool) {
    let repo = PgShopItemCategoryRepository::new(pool.clone());
    let ours = seed_category(&pool, ORG, "Laptops").await;
    let theirs = seed_category(&pool, OTHER_ORG, "Monitors").await;

    let listed = repo
        .get_all_shop_item_categories_in_organization(&org(ORG))
        .await
        .unwrap();
    assert!(listed.iter().all(|c| c.organization_id == ORG));
    assert!(listed.iter().any(|c| c.id == ours));

    let err = repo
        .get_shop_item_category_by_id(&org(ORG), theirs)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let update = ShopItemCategoryUpdate {
        id: theirs,
        name: Some("Hijacked".to_string()),
    }
    .validated()
    .unwrap();
    assert!(matches!(
        repo.update_shop_item_category(&org(ORG), update).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        repo.delete_shop_item_category(&org(ORG), theirs).await,
        Err(AppError::NotFound(_))
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_shop_item_cannot_reference_foreign_category(pool: PgPool) {
    let theirs = seed_category(&pool, OTHER_ORG, "Monitors").await;
    let payload = NewShopItem {
        name: "27 inch display".to_string(),
        description: String::new(),
        image_url: None,
        category_id: theirs,
        organization_id: ORG.to_string(),
    }
    .validated()
    .unwrap();

    let err = PgShopItemRepository::new(pool)
        .create_shop_item(payload)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_category_with_items_cannot_be_deleted(pool: PgPool) {
    let category = seed_category(&pool, ORG, "Laptops").await;
    let payload = NewShopItem {
        name: "ThinkPad X1".to_string(),
        description: String::new(),
        image_url: None,
        category_id: category,
        organization_id: ORG.to_string(),
    }
    .validated()
    .unwrap();
    PgShopItemRepository::new(pool.clone())
        .create_shop_item(payload)
        .await
        .unwrap();

    let err = PgShopItemCategoryRepository::new(pool)
        .delete_shop_item_category(&org(ORG), category)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_deleting_request_removes_its_items(pool: PgPool) {
    let category = seed_category(&pool, ORG, "Docks").await;
    let shop_item = PgShopItemRepository::new(pool.clone())
        .create_shop_item(
            NewShopItem {
                name: "USB-C dock".to_string(),
                description: String::new(),
                image_url: None,
                category_id: category,
                organization_id: ORG.to_string(),
            }
            .validated()
            .unwrap(),
        )
        .await
        .unwrap();

    let requests = PgRequestRepository::new(pool.clone());
    let items = PgItemInRequestRepository::new(pool.clone());
    let request = requests
        .create_request(
            NewRequest {
                owner_id: USER.to_string(),
                message: None,
                organization_id: ORG.to_string(),
            }
            .validated()
            .unwrap(),
        )
        .await
        .unwrap();
    let line = RequestLine {
        shop_item_id: shop_item.id,
        quantity: 2,
    };
    let item = items
        .create_item_in_request(
            NewItemInRequest::for_request(request.id, &line, ORG)
                .validated()
                .unwrap(),
        )
        .await
        .unwrap();

    requests.delete_request(&org(ORG), request.id).await.unwrap();

    assert!(matches!(
        items.get_item_in_request_by_id(&org(ORG), item.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_tickets_by_owner_and_conversations(pool: PgPool) {
    let tickets = PgTicketRepository::new(pool.clone());
    let conversations = PgTicketConversationRepository::new(pool.clone());

    let ticket = tickets
        .create_ticket(
            NewTicket {
                title: "Printer jammed".to_string(),
                description: "Third floor printer".to_string(),
                priority: TicketPriority::Low,
                owner_id: USER.to_string(),
                organization_id: ORG.to_string(),
            }
            .validated()
            .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(ticket.status.as_str(), "Open");

    conversations
        .create_ticket_conversation(
            NewTicketConversation {
                ticket_id: ticket.id,
                author_id: USER.to_string(),
                message: "Still jammed this morning".to_string(),
                organization_id: ORG.to_string(),
            }
            .validated()
            .unwrap(),
        )
        .await
        .unwrap();

    let user = UserId::parse(USER).unwrap();
    let mine = tickets.get_tickets_by_owner(&org(ORG), &user).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert!(tickets
        .get_tickets_by_owner(&org(OTHER_ORG), &user)
        .await
        .unwrap()
        .is_empty());

    let thread = conversations
        .get_conversations_for_ticket(&org(ORG), ticket.id)
        .await
        .unwrap();
    assert_eq!(thread.len(), 1);
}

async fn seed_ticket(pool: &PgPool) -> Uuid {
    PgTicketRepository::new(pool.clone())
        .create_ticket(
            NewTicket {
                title: "Webcam flickers".to_string(),
                description: "Only in video calls".to_string(),
                priority: TicketPriority::Medium,
                owner_id: USER.to_string(),
                organization_id: ORG.to_string(),
            }
            .validated()
            .unwrap(),
        )
        .await
        .unwrap()
        .id
}

fn screenshot_row(ticket_id: Uuid) -> Validated<NewTicketScreenshot> {
    let id = Uuid::new_v4();
    NewTicketScreenshot {
        id,
        ticket_id,
        storage_key: format!("{}/tickets/{}/{}", ORG, ticket_id, id),
        content_type: "image/png".to_string(),
        size_bytes: 128,
        organization_id: ORG.to_string(),
    }
    .validated()
    .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_screenshot_rows_are_capped_per_ticket(pool: PgPool) {
    let ticket = seed_ticket(&pool).await;
    let repo = PgTicketScreenshotRepository::new(pool);

    for _ in 0..MAX_SCREENSHOTS_PER_TICKET {
        repo.create_ticket_screenshot(screenshot_row(ticket))
            .await
            .unwrap();
    }

    let err = repo
        .create_ticket_screenshot(screenshot_row(ticket))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(
        repo.count_screenshots_for_ticket(&org(ORG), ticket)
            .await
            .unwrap(),
        MAX_SCREENSHOTS_PER_TICKET
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_concurrent_screenshot_inserts_respect_cap(pool: PgPool) {
    let ticket = seed_ticket(&pool).await;
    let repo = PgTicketScreenshotRepository::new(pool);
    for _ in 0..MAX_SCREENSHOTS_PER_TICKET - 1 {
        repo.create_ticket_screenshot(screenshot_row(ticket))
            .await
            .unwrap();
    }

    let (first, second) = tokio::join!(
        repo.create_ticket_screenshot(screenshot_row(ticket)),
        repo.create_ticket_screenshot(screenshot_row(ticket)),
    );

    assert_eq!(
        [first.is_ok(), second.is_ok()]
            .iter()
            .filter(|ok| **ok)
            .count(),
        1
    );
    assert_eq!(
        repo.count_screenshots_for_ticket(&org(ORG), ticket)
            .await
            .unwrap(),
        MAX_SCREENSHOTS_PER_TICKET
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_screenshot_for_foreign_ticket_is_not_found(pool: PgPool) {
    let ticket = seed_ticket(&pool).await;
    let mut row = screenshot_row(ticket).into_inner();
    row.organization_id = OTHER_ORG.to_string();

    let err = PgTicketScreenshotRepository::new(pool)
        .create_ticket_screenshot(row.validated().unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_empty_image_url_clears_the_field(pool: PgPool) {
    let category = seed_category(&pool, ORG, "Docks").await;
    let repo = PgShopItemRepository::new(pool);
    let item = repo
        .create_shop_item(
            NewShopItem {
                name: "USB-C dock".to_string(),
                description: String::new(),
                image_url: Some("https://cdn.example.com/dock.png".to_string()),
                category_id: category,
                organization_id: ORG.to_string(),
            }
            .validated()
            .unwrap(),
        )
        .await
        .unwrap();

    let untouched = repo
        .update_shop_item(
            &org(ORG),
            ShopItemUpdate {
                id: item.id,
                name: Some("USB-C dock v2".to_string()),
                description: None,
                image_url: None,
                category_id: None,
            }
            .validated()
            .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        untouched.image_url.as_deref(),
        Some("https://cdn.example.com/dock.png")
    );

    let cleared = repo
        .update_shop_item(
            &org(ORG),
            ShopItemUpdate {
                id: item.id,
                name: None,
                description: None,
                image_url: Some(String::new()),
                category_id: None,
            }
            .validated()
            .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(cleared.image_url, None);
    assert_eq!(cleared.name, "USB-C dock v2");
}
