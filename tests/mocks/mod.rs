//! Test doubles

pub mod recording_sink;
pub mod telegram_api;

#[allow(unused_imports)]
pub use recording_sink::{Delivery, RecordingSink};
#[allow(unused_imports)]
pub use telegram_api::{callback, contact_message, text_message, ApiCall, TelegramMock};
