pub mod auth;
pub mod role_gate;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use role_gate::{reputation_gate, AllowedRoles, Gate, KARMA_PENALTY, KARMA_REWARD};
