// Generated by build.rs from proto/*.proto

pub mod common {
    include!("portal.common.rs");
}

pub mod shop {
    include!("portal.shop.rs");
}

pub mod inventory {
    include!("portal.inventory.rs");
}

pub mod requests {
    include!("portal.requests.rs");
}

pub mod tickets {
    include!("portal.tickets.rs");
}

pub mod dashboard {
    include!("portal.dashboard.rs");
}

pub mod health {
    include!("grpc.health.v1.rs");
}
