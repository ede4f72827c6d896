// handlers/mod.rs - 3-Tier Handler Architecture
//
// Public (no identity needed) → Protected (login required) → Elevated (admin required)
//
// Identity resolution runs for every request; each tier's router adds its guard.
pub mod public;    // Tier 1: /auth/*
pub mod protected; // Tier 2: /users, /users/:username (GET, PATCH)
pub mod elevated;  // Tier 3: /users/:username (DELETE)
