//! Telegram bot handler tree configuration
//!
//! The same schema is used in production and by tests, which drive the
//! handlers' building blocks directly.

mod admin;
mod callbacks;
mod claims;
mod lookup;
mod schema;
mod types;

pub use admin::{draft_from_message, handle_info, handle_mail_confirm};
pub use callbacks::CallbackAction;
pub use claims::handle_contact;
pub use lookup::handle_activate;
pub use schema::schema;
pub use types::{sender_id, user_id, AccessConfig, HandlerDeps, HandlerError};
