// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition. These endpoints never look at the resolved identity.
//
// Security Level: None
// Route Prefix: /auth/*

pub mod auth;
