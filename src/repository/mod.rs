//! One repository per entity.
//!
//! Each trait is a thin CRUD facade. Every read, update and delete takes
//! the caller's organization, and rows of other organizations behave as if
//! they did not exist. Create and update only accept payloads that passed
//! their schema.

pub mod inventory;
pub mod item_in_request;
pub mod request;
pub mod shop_item;
pub mod shop_item_category;
pub mod ticket;
pub mod ticket_conversation;
pub mod ticket_screenshot;

pub use inventory::{InventoryRepository, PgInventoryRepository};
pub use item_in_request::{ItemInRequestRepository, PgItemInRequestRepository};
pub use request::{PgRequestRepository, RequestRepository};
pub use shop_item::{PgShopItemRepository, ShopItemRepository};
pub use shop_item_category::{PgShopItemCategoryRepository, ShopItemCategoryRepository};
pub use ticket::{PgTicketRepository, TicketRepository};
pub use ticket_conversation::{PgTicketConversationRepository, TicketConversationRepository};
pub use ticket_screenshot::{PgTicketScreenshotRepository, TicketScreenshotRepository};

#[cfg(test)]
pub use inventory::MockInventoryRepository;
#[cfg(test)]
pub use item_in_request::MockItemInRequestRepository;
#[cfg(test)]
pub use request::MockRequestRepository;
#[cfg(test)]
pub use shop_item::MockShopItemRepository;
#[cfg(test)]
pub use shop_item_category::MockShopItemCategoryRepository;
#[cfg(test)]
pub use ticket::MockTicketRepository;
#[cfg(test)]
pub use ticket_conversation::MockTicketConversationRepository;
#[cfg(test)]
pub use ticket_screenshot::MockTicketScreenshotRepository;
