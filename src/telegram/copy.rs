//! User-facing texts

use crate::broadcast::BroadcastSummary;
use crate::storage::Prize;

pub const PHONE_PROMPT: &str = "Поделитесь номером телефона для получения приза";
pub const SHARE_PHONE_BUTTON: &str = "Поделиться номером телефона";
pub const OWN_PHONE_REQUIRED: &str = "Пожалуйста, отправьте свой номер телефона";
pub const PHONE_REUSED: &str = "Этот номер телефона уже использовался для получения приза";
pub const PHONE_SAVE_FAILED: &str = "Ошибка при сохранении номера телефона";
pub const PRIZE_ALREADY_CLAIMED: &str = "Этот код уже использован другим пользователем";
pub const PRIZE_CODE_UNKNOWN: &str = "Приз с таким кодом не найден";
pub const PRIZE_BIND_FAILED: &str = "Ошибка при получении приза";

pub const CODE_NOT_FOUND: &str = "Код не найден ❌";
pub const CODE_NOT_BOUND: &str = "Код не привязан к телеграм айди ❌";
pub const LOOKUP_FAILED: &str = "⚠️ Ошибка при поиске кода";
pub const ACTIVATE_BUTTON: &str = "Использовать";
pub const ACTIVATION_FAILED: &str = "⚠️ Не удалось активировать код";

pub const INFO_FAILED: &str = "Ошибка при получении информации ❌";
pub const INFO_EMPTY: &str = "Пользователей пока нет";

pub const MAIL_PROMPT: &str = "Отправьте сообщение для рассылки (текст, фото, видео, аудио или голосовое):";
pub const MAIL_UNSUPPORTED: &str = "Этот тип сообщения нельзя разослать. Отправьте текст, фото, видео, аудио или голосовое.";
pub const MAIL_CONFIRM_PROMPT: &str = "Отправить это сообщение всем пользователям?";
pub const MAIL_CONFIRM_BUTTON: &str = "Да";
pub const MAIL_CANCEL_BUTTON: &str = "Нет";
pub const MAIL_STARTED: &str = "Рассылка началась…";
pub const MAIL_CANCELLED: &str = "Рассылка отменена.";
pub const MAIL_BUSY: &str = "Предыдущая рассылка ещё идёт. Нажмите «Да» ещё раз, когда она закончится.";

/// Shown to the claimant once the prize is bound.
pub fn prize_bound(prize: &Prize, code: &str) -> String {
    format!("Приз '{}' получен! Ваш код - {}.", prize.prize, code)
}

/// Shown on a repeat `/start` to a user who already holds a prize.
pub fn existing_prize(prize: &Prize) -> String {
    let status = if prize.is_activated() { "Использован" } else { "Еще не использован" };
    format!("Ваш приз: {}\n❗Статус: {}", prize.prize, status)
}

/// Prize card for the admin chat, used both for lookups and after activation.
pub fn prize_status(prize: &Prize) -> String {
    match prize.activated_at_local() {
        Some(at) => format!(
            "🎁 Приз: {}\n✅ Активирован: {} (МСК)",
            prize.prize,
            at.format("%d.%m.%Y %H:%M")
        ),
        None => format!("🎁 Приз: {}\n❗ Код не активирован", prize.prize),
    }
}

pub fn mailing_finished(summary: &BroadcastSummary) -> String {
    format!(
        "Рассылка завершена. Доставлено: {}, ошибок: {}.",
        summary.sent, summary.failed
    )
}

pub fn mailing_failed(err: &dyn std::fmt::Display) -> String {
    format!("Ошибка рассылки: {}", err)
}
