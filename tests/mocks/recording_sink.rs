//! Broadcast sink that records every delivery instead of calling Telegram

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Instant;

use async_trait::async_trait;
use prizebot::broadcast::{BroadcastSink, OutboundUnit};

#[derive(Debug, Clone)]
pub struct Delivery {
    pub recipient: i64,
    pub unit: OutboundUnit,
    pub at: Instant,
}

/// Records deliveries; recipients in `blocked` fail like users who blocked the bot.
#[derive(Default)]
pub struct RecordingSink {
    blocked: HashSet<i64>,
    deliveries: Mutex<Vec<Delivery>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocking(ids: &[i64]) -> Self {
        Self {
            blocked: ids.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }

    pub fn recipients(&self) -> Vec<i64> {
        self.deliveries().iter().map(|d| d.recipient).collect()
    }
}

#[async_trait]
impl BroadcastSink for RecordingSink {
    async fn deliver(&self, recipient: i64, unit: &OutboundUnit) -> anyhow::Result<()> {
        self.deliveries.lock().unwrap().push(Delivery {
            recipient,
            unit: unit.clone(),
            at: Instant::now(),
        });
        if self.blocked.contains(&recipient) {
            anyhow::bail!("Forbidden: bot was blocked by the user");
        }
        Ok(())
    }
}
