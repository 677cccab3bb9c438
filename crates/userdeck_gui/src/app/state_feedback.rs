//! UI-facing feedback helpers for the status line and notice toasts.

use super::{
    Notice, NoticeKind, StatusMessage, UserDeckApp, ERROR_NOTICE_TTL, NOTICE_LIMIT, NOTICE_TTL,
    STATUS_TTL,
};
use std::time::Instant;
use tracing::warn;

impl UserDeckApp {
    /// Sets the status line and mirrors it into the notice queue.
    pub(super) fn set_status(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.status = Some(StatusMessage {
            text: text.clone(),
            expires_at: Instant::now() + STATUS_TTL,
        });
        self.push_notice(text, NoticeKind::Info);
    }

    /// Surfaces a failure that no open overlay can show.
    pub(super) fn notify_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        warn!("{}", text);
        self.status = Some(StatusMessage {
            text: text.clone(),
            expires_at: Instant::now() + STATUS_TTL,
        });
        self.push_notice(text, NoticeKind::Error);
    }

    fn push_notice(&mut self, text: String, kind: NoticeKind) {
        let now = Instant::now();
        let ttl = match kind {
            NoticeKind::Info => NOTICE_TTL,
            NoticeKind::Error => ERROR_NOTICE_TTL,
        };
        if let Some(last) = self.notices.back_mut() {
            if last.text == text && last.kind == kind {
                last.expires_at = now + ttl;
                return;
            }
        }
        self.next_notice_id += 1;
        self.notices.push_back(Notice {
            id: self.next_notice_id,
            text,
            kind,
            expires_at: now + ttl,
        });
        while self.notices.len() > NOTICE_LIMIT {
            self.notices.pop_front();
        }
    }

    pub(super) fn dismiss_notice(&mut self, id: u64) {
        self.notices.retain(|notice| notice.id != id);
    }

    /// Drops the status line and notices whose time is up.
    pub(super) fn prune_feedback(&mut self, now: Instant) {
        if self
            .status
            .as_ref()
            .is_some_and(|status| now >= status.expires_at)
        {
            self.status = None;
        }
        self.notices.retain(|notice| now < notice.expires_at);
    }
}
