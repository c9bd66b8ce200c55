pub mod auth;
pub mod context;

pub use auth::{AuthLayer, Claims, JwtVerifier, Session};
pub use context::{AuthContext, Check, Permission, Role};
