//! Mailing delivery through the Bot API

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{FileId, InputFile};

use crate::broadcast::{BroadcastSink, OutboundUnit};

fn file(file_id: &str) -> InputFile {
    InputFile::file_id(FileId(file_id.to_string()))
}

#[async_trait]
impl BroadcastSink for Bot {
    async fn deliver(&self, recipient: i64, unit: &OutboundUnit) -> anyhow::Result<()> {
        let chat_id = ChatId(recipient);

        match unit {
            OutboundUnit::Text(text) => {
                self.send_message(chat_id, text.as_str()).await?;
            }
            OutboundUnit::Photo { file_id, caption } => {
                let mut request = self.send_photo(chat_id, file(file_id));
                if let Some(caption) = caption {
                    request = request.caption(caption.as_str());
                }
                request.await?;
            }
            OutboundUnit::Video { file_id, caption } => {
                let mut request = self.send_video(chat_id, file(file_id));
                if let Some(caption) = caption {
                    request = request.caption(caption.as_str());
                }
                request.await?;
            }
            OutboundUnit::Audio { file_id, caption } => {
                let mut request = self.send_audio(chat_id, file(file_id));
                if let Some(caption) = caption {
                    request = request.caption(caption.as_str());
                }
                request.await?;
            }
            OutboundUnit::Voice { file_id } => {
                self.send_voice(chat_id, file(file_id)).await?;
            }
        }

        Ok(())
    }
}
