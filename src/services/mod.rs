pub mod dashboard_service;
pub mod health_service;
pub mod inventory_service;
pub mod request_service;
pub mod shop_service;
pub mod ticket_service;

pub use dashboard_service::DashboardServiceImpl;
pub use health_service::HealthServiceImpl;
pub use inventory_service::InventoryServiceImpl;
pub use request_service::RequestServiceImpl;
pub use shop_service::{ShopItemCategoryServiceImpl, ShopItemServiceImpl};
pub use ticket_service::TicketServiceImpl;

use chrono::{DateTime, SecondsFormat, Utc};

/// Wire format for timestamps.
pub(crate) fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
