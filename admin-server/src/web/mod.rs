//! Web layer for the admin dashboard.
//!
//! Server-rendered pages plus the JSON endpoints the editor and withdrawal
//! pages call from the browser.

pub mod auth;
mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
