// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition endpoints. Input here is untrusted and carries no user
// context.
pub mod auth;
