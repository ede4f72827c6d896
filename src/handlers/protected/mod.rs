// handlers/protected/mod.rs - Protected handlers (login required)
//
// Security Level: verified token (require_login)
// Route Prefix: /users
//
// Updates additionally pass through the per-field policy in crate::policy.

pub mod users;
