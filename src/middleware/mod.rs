pub mod auth;
pub mod guards;
pub mod response;

pub use auth::{resolve_identity, Identity};
pub use guards::{require_admin, require_login};
pub use response::{ApiResponse, ApiResult};
