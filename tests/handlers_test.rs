//! Handlers against a mocked Bot API: what actually goes over the wire

mod common;
mod mocks;

use std::time::Duration;

use common::TestStore;
use mocks::{callback, contact_message, text_message, TelegramMock};
use pretty_assertions::assert_eq;
use prizebot::broadcast::Draft;
use prizebot::core::session::MailingState;
use prizebot::redemption::{start_claim, StartOutcome};
use prizebot::storage::{prizes, users};
use prizebot::telegram::copy;
use prizebot::telegram::handlers::{
    handle_activate, handle_contact, handle_info, handle_mail_confirm, AccessConfig, CallbackAction, HandlerDeps,
};

const ADMIN: i64 = 100;
const DEVELOPER: i64 = 200;
const ADMIN_CHAT: i64 = -300;

fn deps(store: &TestStore) -> HandlerDeps {
    let access = AccessConfig { admin_id: ADMIN, developer_id: DEVELOPER, admin_chat_id: ADMIN_CHAT };
    let mut deps = HandlerDeps::new(store.pool.clone(), access, None);
    deps.send_delay = Duration::from_millis(1);
    deps
}

fn open_claim(store: &TestStore, deps: &HandlerDeps, claimant: i64, code: &str) {
    let outcome = start_claim(&store.conn(), &deps.claims, claimant, code).unwrap();
    assert!(matches!(outcome, StartOutcome::AwaitingPhone { .. }), "{:?}", outcome);
}

#[tokio::test]
async fn bound_prize_reply_removes_the_phone_keyboard() {
    let store = TestStore::new().with_prize("HND001", "Термокружка");
    let deps = deps(&store);
    let telegram = TelegramMock::start().await;
    open_claim(&store, &deps, 42, "HND001");

    handle_contact(telegram.bot.clone(), contact_message(42, 42, "7 999 123-45-67"), deps.clone())
        .await
        .unwrap();

    let sent = telegram.calls_to("sendMessage").await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].body["chat_id"], 42);
    assert_eq!(sent[0].body["text"], "Приз 'Термокружка' получен! Ваш код - HND001.");
    assert_eq!(sent[0].body["reply_markup"]["remove_keyboard"], true);

    let user = users::get_user(&store.conn(), 42).unwrap().unwrap();
    assert_eq!(user.phone.as_deref(), Some("+79991234567"));
}

#[tokio::test]
async fn failed_claim_reply_also_removes_the_keyboard() {
    let store = TestStore::new();
    let deps = deps(&store);
    let telegram = TelegramMock::start().await;
    open_claim(&store, &deps, 43, "NOSUCH");

    handle_contact(telegram.bot.clone(), contact_message(43, 43, "+70000000043"), deps.clone())
        .await
        .unwrap();

    let sent = telegram.calls_to("sendMessage").await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].body["text"], copy::PRIZE_CODE_UNKNOWN);
    assert_eq!(sent[0].body["reply_markup"]["remove_keyboard"], true);
}

#[tokio::test]
async fn foreign_contact_keeps_the_phone_keyboard() {
    let store = TestStore::new().with_prize("HND002", "Кепка");
    let deps = deps(&store);
    let telegram = TelegramMock::start().await;
    open_claim(&store, &deps, 44, "HND002");

    handle_contact(telegram.bot.clone(), contact_message(44, 99, "+70000000099"), deps.clone())
        .await
        .unwrap();

    let sent = telegram.calls_to("sendMessage").await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].body["text"], copy::OWN_PHONE_REQUIRED);
    assert!(sent[0].body.get("reply_markup").is_none(), "{}", sent[0].body);
    assert_eq!(deps.claims.pending_code(44).as_deref(), Some("HND002"));
}

#[tokio::test]
async fn only_the_first_info_chunk_replies_to_the_command() {
    let ids: Vec<i64> = (1..=200).collect();
    let store = TestStore::new().with_users(&ids);
    let deps = deps(&store);
    let telegram = TelegramMock::start().await;

    handle_info(telegram.bot.clone(), text_message(7, ADMIN, "/info"), deps.clone())
        .await
        .unwrap();

    let sent = telegram.calls_to("sendMessage").await;
    assert!(sent.len() >= 2, "expected several chunks, got {}", sent.len());
    assert_eq!(sent[0].body["reply_parameters"]["message_id"], 7);
    for call in &sent[1..] {
        assert!(call.body.get("reply_parameters").is_none(), "{}", call.body);
    }

    let listed: usize = sent
        .iter()
        .map(|call| call.body["text"].as_str().unwrap_or_default().lines().count())
        .sum();
    assert_eq!(listed, ids.len());
}

#[tokio::test]
async fn activation_edits_the_lookup_message_in_place() {
    let store = TestStore::new().with_prize("HND003", "Футболка");
    prizes::bind_claimant(&store.conn(), 45, "HND003").unwrap();
    let deps = deps(&store);
    let telegram = TelegramMock::start().await;

    let press = callback(&CallbackAction::Activate("HND003".into()).data(), ADMIN, ADMIN_CHAT, 42);
    handle_activate(telegram.bot.clone(), press, deps.clone(), "HND003".into())
        .await
        .unwrap();

    assert!(telegram.calls_to("sendMessage").await.is_empty());
    let edits = telegram.calls_to("editMessageText").await;
    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].body["chat_id"], ADMIN_CHAT);
    assert_eq!(edits[0].body["message_id"], 42);
    let text = edits[0].body["text"].as_str().unwrap_or_default();
    assert!(text.starts_with("🎁 Приз: Футболка\n✅ Активирован: "), "{}", text);

    assert!(prizes::get_prize_by_code(&store.conn(), "HND003").unwrap().is_activated());
}

#[tokio::test]
async fn activation_outside_the_admin_chat_is_ignored() {
    let store = TestStore::new().with_prize("HND004", "Футболка");
    prizes::bind_claimant(&store.conn(), 46, "HND004").unwrap();
    let deps = deps(&store);
    let telegram = TelegramMock::start().await;

    let press = callback(&CallbackAction::Activate("HND004".into()).data(), 46, 46, 42);
    handle_activate(telegram.bot.clone(), press, deps.clone(), "HND004".into())
        .await
        .unwrap();

    assert!(telegram.calls().await.is_empty());
    assert!(!prizes::get_prize_by_code(&store.conn(), "HND004").unwrap().is_activated());
}

#[tokio::test]
async fn second_mailing_waits_for_the_running_one() {
    let store = TestStore::new();
    let deps = deps(&store);
    let telegram = TelegramMock::start().await;

    deps.mailing.start_composing(DEVELOPER);
    assert!(deps.mailing.submit_draft(DEVELOPER, Draft::text("Вторая рассылка")));

    // The admin's mailing is still going out
    let running = deps.mailing_gate.try_start().unwrap();

    let press = callback(&CallbackAction::MailConfirm.data(), DEVELOPER, DEVELOPER, 10);
    handle_mail_confirm(telegram.bot.clone(), press.clone(), deps.clone())
        .await
        .unwrap();

    let sent = telegram.calls_to("sendMessage").await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].body["text"], copy::MAIL_BUSY);
    assert_eq!(
        deps.mailing.state(DEVELOPER),
        MailingState::ConfirmPending { draft: Draft::text("Вторая рассылка") }
    );

    drop(running);
    handle_mail_confirm(telegram.bot.clone(), press, deps.clone()).await.unwrap();
    assert_eq!(deps.mailing.state(DEVELOPER), MailingState::Idle);

    for _ in 0..200 {
        if !deps.mailing_gate.is_running() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(!deps.mailing_gate.is_running());

    let texts: Vec<String> = telegram
        .calls_to("sendMessage")
        .await
        .iter()
        .map(|call| call.body["text"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(texts[1], copy::MAIL_STARTED);
    assert_eq!(texts.len(), 3, "{:?}", texts);
}

#[tokio::test]
async fn stale_confirm_during_a_mailing_is_silent() {
    let store = TestStore::new();
    let deps = deps(&store);
    let telegram = TelegramMock::start().await;
    let _running = deps.mailing_gate.try_start().unwrap();

    let press = callback(&CallbackAction::MailConfirm.data(), ADMIN, ADMIN, 10);
    handle_mail_confirm(telegram.bot.clone(), press, deps.clone()).await.unwrap();

    assert!(telegram.calls().await.is_empty());
}
