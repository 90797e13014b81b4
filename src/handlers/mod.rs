// handlers/mod.rs - Handlers grouped by access tier
//
// Public (no auth) → Protected (bearer token required)
pub mod public;    // /api/v1/auth/*
pub mod protected; // /api/v1/jobs/*
