//! Telegram Bot API stand-in served by wiremock

#![allow(dead_code)]

use serde_json::{json, Value};
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, Message};
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const BOT_ID: u64 = 987654321;

/// A mock API server plus a `Bot` pointed at it.
pub struct TelegramMock {
    pub server: MockServer,
    pub bot: Bot,
}

/// One recorded API call.
#[derive(Debug, Clone)]
pub struct ApiCall {
    /// Bot API method, e.g. `sendMessage`
    pub method: String,
    pub body: Value,
}

impl TelegramMock {
    /// Starts the server and answers every message-returning call with a
    /// plain text message.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let bot = Bot::new("12345:TEST_TOKEN").set_api_url(server.uri().parse().expect("mock server url"));

        let message = json!({
            "ok": true,
            "result": {
                "message_id": 500,
                "from": { "id": BOT_ID, "is_bot": true, "first_name": "PrizeBot" },
                "chat": { "id": 1, "type": "private", "first_name": "Test" },
                "date": 1735992000,
                "text": "ok"
            }
        });
        Mock::given(method("POST"))
            .and(path_regex("(?i)/bot[^/]+/(sendMessage|editMessageText)$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(message))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": true })))
            .mount(&server)
            .await;

        Self { server, bot }
    }

    /// Calls received so far, oldest first.
    pub async fn calls(&self) -> Vec<ApiCall> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|request| ApiCall {
                method: lower_camel(request.url.path().rsplit('/').next().unwrap_or_default()),
                body: serde_json::from_slice(&request.body).unwrap_or(Value::Null),
            })
            .collect()
    }

    pub async fn calls_to(&self, api_method: &str) -> Vec<ApiCall> {
        self.calls()
            .await
            .into_iter()
            .filter(|call| call.method == api_method)
            .collect()
    }
}

/// Teloxide sends PascalCase method names (`SendMessage`); the Bot API
/// treats them case-insensitively, so normalise to the documented camelCase.
fn lower_camel(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn user_json(id: i64) -> Value {
    json!({ "id": id, "is_bot": false, "first_name": "Test", "language_code": "ru" })
}

fn private_chat_json(id: i64) -> Value {
    json!({ "id": id, "type": "private", "first_name": "Test" })
}

fn group_chat_json(id: i64) -> Value {
    json!({ "id": id, "type": "group", "title": "Staff" })
}

/// Text message from `sender` in their private chat.
pub fn text_message(message_id: i32, sender: i64, text: &str) -> Message {
    serde_json::from_value(json!({
        "message_id": message_id,
        "date": 1735992000,
        "chat": private_chat_json(sender),
        "from": user_json(sender),
        "text": text
    }))
    .expect("text message json")
}

/// Contact card for `owner` shared by `sender`.
pub fn contact_message(sender: i64, owner: i64, phone: &str) -> Message {
    serde_json::from_value(json!({
        "message_id": 2,
        "date": 1735992000,
        "chat": private_chat_json(sender),
        "from": user_json(sender),
        "contact": { "phone_number": phone, "first_name": "Test", "user_id": owner }
    }))
    .expect("contact message json")
}

/// Button press by `presser` on bot message `message_id`.
///
/// A negative `chat_id` is a group chat, anything else a private chat.
pub fn callback(data: &str, presser: i64, chat_id: i64, message_id: i32) -> CallbackQuery {
    let chat = if chat_id < 0 { group_chat_json(chat_id) } else { private_chat_json(chat_id) };
    serde_json::from_value(json!({
        "id": "callback_1",
        "from": user_json(presser),
        "message": {
            "message_id": message_id,
            "date": 1735992000,
            "chat": chat,
            "from": { "id": BOT_ID, "is_bot": true, "first_name": "PrizeBot" },
            "text": "lookup result"
        },
        "chat_instance": "instance_1",
        "data": data
    }))
    .expect("callback json")
}
