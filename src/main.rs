use std::net::SocketAddr;
use std::sync::Arc;

use self_service_portal::config::Config;
use self_service_portal::db::{create_pool, run_migrations};
use self_service_portal::middleware::{AuthLayer, JwtVerifier};
use self_service_portal::proto::dashboard::dashboard_service_server::DashboardServiceServer;
use self_service_portal::proto::health::health_server::HealthServer;
use self_service_portal::proto::inventory::inventory_service_server::InventoryServiceServer;
use self_service_portal::proto::requests::request_service_server::RequestServiceServer;
use self_service_portal::proto::shop::shop_item_category_service_server::ShopItemCategoryServiceServer;
use self_service_portal::proto::shop::shop_item_service_server::ShopItemServiceServer;
use self_service_portal::proto::tickets::ticket_service_server::TicketServiceServer;
use self_service_portal::repository::{
    PgInventoryRepository, PgItemInRequestRepository, PgRequestRepository,
    PgShopItemCategoryRepository, PgShopItemRepository, PgTicketConversationRepository,
    PgTicketRepository, PgTicketScreenshotRepository,
};
use self_service_portal::services::{
    DashboardServiceImpl, HealthServiceImpl, InventoryServiceImpl, RequestServiceImpl,
    ShopItemCategoryServiceImpl, ShopItemServiceImpl, TicketServiceImpl,
};
use self_service_portal::storage::{R2Backend, StorageBackend};

use tonic::transport::Server;
use tonic_reflection::server::Builder as ReflectionBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Include file descriptor for gRPC reflection
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("portal_descriptor");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "self_service_portal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting self-service portal gRPC server...");
    tracing::info!("Connecting to database...");

    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection established");

    if config.run_migrations {
        run_migrations(&pool).await?;
        tracing::info!("Migrations applied");
    }

    let verifier = JwtVerifier::from_config(&config)?;

    // Screenshot storage is optional; without it screenshot calls are unavailable
    let storage: Option<Arc<dyn StorageBackend>> = match &config.r2 {
        Some(r2) => match R2Backend::new(r2) {
            Ok(backend) => {
                tracing::info!("R2 storage enabled: bucket={}", r2.bucket);
                Some(Arc::new(backend))
            }
            Err(e) => {
                tracing::error!("Failed to create R2 client: {}", e);
                None
            }
        },
        None => {
            tracing::info!("R2 storage disabled, screenshot uploads are unavailable");
            None
        }
    };

    let categories = Arc::new(PgShopItemCategoryRepository::new(pool.clone()));
    let shop_items = Arc::new(PgShopItemRepository::new(pool.clone()));
    let inventory = Arc::new(PgInventoryRepository::new(pool.clone()));
    let requests = Arc::new(PgRequestRepository::new(pool.clone()));
    let items_in_request = Arc::new(PgItemInRequestRepository::new(pool.clone()));
    let tickets = Arc::new(PgTicketRepository::new(pool.clone()));
    let conversations = Arc::new(PgTicketConversationRepository::new(pool.clone()));
    let screenshots = Arc::new(PgTicketScreenshotRepository::new(pool.clone()));

    let category_service = ShopItemCategoryServiceImpl::new(categories.clone());
    let shop_item_service = ShopItemServiceImpl::new(shop_items.clone(), categories);
    let inventory_service = InventoryServiceImpl::new(inventory);
    let request_service =
        RequestServiceImpl::new(requests.clone(), items_in_request, shop_items);
    let ticket_service =
        TicketServiceImpl::new(tickets.clone(), conversations, screenshots, storage);
    let dashboard_service = DashboardServiceImpl::new(tickets, requests);
    let health_service = HealthServiceImpl::new(pool);

    // CORS layer for gRPC-Web
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods(Any)
        .expose_headers(Any);

    let reflection_service = ReflectionBuilder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    let addr: SocketAddr = config.server_addr().parse()?;
    tracing::info!("Listening on {}", addr);

    Server::builder()
        .accept_http1(true) // Required for gRPC-Web
        .layer(TraceLayer::new_for_grpc())
        .layer(cors)
        .layer(tonic_web::GrpcWebLayer::new())
        .layer(AuthLayer::new(verifier))
        .add_service(reflection_service)
        .add_service(ShopItemCategoryServiceServer::new(category_service))
        .add_service(ShopItemServiceServer::new(shop_item_service))
        .add_service(InventoryServiceServer::new(inventory_service))
        .add_service(RequestServiceServer::new(request_service))
        .add_service(TicketServiceServer::new(ticket_service))
        .add_service(DashboardServiceServer::new(dashboard_service))
        .add_service(HealthServer::new(health_service))
        .serve(addr)
        .await?;

    Ok(())
}
