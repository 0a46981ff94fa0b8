use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::screens::ScreenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A toast shown after a screen operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub screen: ScreenKind,
    pub level: NoticeLevel,
    pub message: String,
    /// Position in the order notices were raised, across every screen
    /// sharing the same [`NoticeSequence`].
    pub seq: u64,
}

impl Notice {
    pub fn success(screen: ScreenKind, message: impl Into<String>) -> Self {
        Self {
            screen,
            level: NoticeLevel::Success,
            message: message.into(),
            seq: 0,
        }
    }

    pub fn error(screen: ScreenKind, message: impl Into<String>) -> Self {
        Self {
            screen,
            level: NoticeLevel::Error,
            message: message.into(),
            seq: 0,
        }
    }
}

/// Shared counter that stamps notices as they are queued.
#[derive(Debug, Clone, Default)]
pub struct NoticeSequence(Arc<AtomicU64>);

impl NoticeSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stamp(&self, mut notice: Notice) -> Notice {
        notice.seq = self.0.fetch_add(1, Ordering::Relaxed);
        notice
    }
}
