// handlers/public/auth/mod.rs - Registration and login
use serde::Deserialize;

pub mod login;    // POST /api/v1/auth/login
pub mod register; // POST /api/v1/auth/register

pub use login::login_post;
pub use register::register_post;

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}
