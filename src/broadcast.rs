//! Mailing to every known user
//!
//! A single linear pass over the user list: one outbound unit per
//! recipient, failures logged and skipped, a fixed pause after every send.

use async_trait::async_trait;
use std::time::Duration;

use crate::storage::{get_connection, users, DbPool, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
    Audio,
    Voice,
}

/// A single media file already uploaded to Telegram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAttachment {
    pub kind: MediaKind,
    pub file_id: String,
}

/// Content an administrator composed for a mailing.
///
/// For media drafts `text` is the caption.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    pub media: Option<MediaAttachment>,
}

impl Draft {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), media: None }
    }

    pub fn with_media(kind: MediaKind, file_id: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            text: caption.into(),
            media: Some(MediaAttachment { kind, file_id: file_id.into() }),
        }
    }

    /// The message every recipient gets.
    ///
    /// Voice messages carry no caption; an empty caption is omitted.
    pub fn outbound_unit(&self) -> OutboundUnit {
        let caption = (!self.text.is_empty()).then(|| self.text.clone());
        match &self.media {
            None => OutboundUnit::Text(self.text.clone()),
            Some(media) => {
                let file_id = media.file_id.clone();
                match media.kind {
                    MediaKind::Photo => OutboundUnit::Photo { file_id, caption },
                    MediaKind::Video => OutboundUnit::Video { file_id, caption },
                    MediaKind::Audio => OutboundUnit::Audio { file_id, caption },
                    MediaKind::Voice => OutboundUnit::Voice { file_id },
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundUnit {
    Text(String),
    Photo { file_id: String, caption: Option<String> },
    Video { file_id: String, caption: Option<String> },
    Audio { file_id: String, caption: Option<String> },
    Voice { file_id: String },
}

/// Delivers one outbound unit to one chat.
#[async_trait]
pub trait BroadcastSink: Send + Sync {
    async fn deliver(&self, recipient: i64, unit: &OutboundUnit) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastSummary {
    pub sent: usize,
    pub failed: usize,
}

impl BroadcastSummary {
    pub fn total(&self) -> usize {
        self.sent + self.failed
    }
}

/// Sends `draft` to each of `recipients` in order, pausing `delay` after every attempt.
pub async fn deliver_to<S>(sink: &S, recipients: &[i64], draft: &Draft, delay: Duration) -> BroadcastSummary
where
    S: BroadcastSink + ?Sized,
{
    let unit = draft.outbound_unit();
    let mut summary = BroadcastSummary::default();

    for &recipient in recipients {
        match sink.deliver(recipient, &unit).await {
            Ok(()) => summary.sent += 1,
            Err(e) => {
                summary.failed += 1;
                log::warn!("Mailing to {} failed: {}", recipient, e);
            }
        }
        tokio::time::sleep(delay).await;
    }

    summary
}

/// Sends `draft` to every user in the store.
///
/// Fails only if the recipient list cannot be loaded; individual delivery
/// failures are counted in the summary.
pub async fn run_broadcast<S>(pool: &DbPool, sink: &S, draft: &Draft, delay: Duration) -> Result<BroadcastSummary, StoreError>
where
    S: BroadcastSink + ?Sized,
{
    let recipients = {
        let conn = get_connection(pool)?;
        users::list_user_ids(&conn)?
    };

    log::info!("Mailing started: {} recipients", recipients.len());
    let summary = deliver_to(sink, &recipients, draft, delay).await;
    log::info!("Mailing finished: {} sent, {} failed", summary.sent, summary.failed);

    Ok(summary)
}
