// handlers/elevated/mod.rs - Elevated handlers (admin required)
//
// Security Level: verified token with the admin claim (require_admin)
// Route Prefix: /users

pub mod users;
