//! Single-slot status message with delayed auto-hide.
//!
//! Every [`NotificationSurface::show`] bumps a generation counter and hands
//! back a [`HideTicket`] stamped with it. A ticket only hides the slot while
//! its generation is still current, so a timer left over from an older
//! message can never hide a newer one.

use std::sync::Arc;
use std::time::Duration;

use futures::lock::Mutex;

#[cfg(feature = "no-wasm")]
use crate::interface::Timer;
use crate::model::Severity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideTicket {
    generation: u64,
    delay: Duration,
}

impl HideTicket {
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[derive(Debug)]
pub struct NotificationSurface {
    current: Option<Notification>,
    visible: bool,
    generation: u64,
    ttl: Duration,
}

impl NotificationSurface {
    pub fn new(ttl: Duration) -> Self {
        Self {
            current: None,
            visible: false,
            generation: 0,
            ttl,
        }
    }

    /// Overwrites the slot and makes it visible.
    pub fn show(&mut self, text: impl Into<String>, severity: Severity) -> HideTicket {
        self.generation += 1;
        self.current = Some(Notification {
            text: text.into(),
            severity,
        });
        self.visible = true;

        HideTicket {
            generation: self.generation,
            delay: self.ttl,
        }
    }

    /// Hides the slot if `ticket` belongs to the message currently shown.
    pub fn expire(&mut self, ticket: HideTicket) -> bool {
        if ticket.generation != self.generation || !self.visible {
            return false;
        }
        self.visible = false;
        true
    }

    pub fn hide(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }

    pub fn visible(&self) -> Option<&Notification> {
        self.current.as_ref().filter(|_| self.visible)
    }

    /// Last message shown, visible or not.
    pub fn last(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Class list for the message element, e.g. `"error"` or `"success hidden"`.
    pub fn class_name(&self) -> String {
        match (&self.current, self.visible) {
            (Some(n), true) => n.severity.css_class().to_string(),
            (Some(n), false) => format!("{} hidden", n.severity.css_class()),
            (None, _) => "hidden".to_string(),
        }
    }
}

/// Handle on the notification slot shared between handlers and hide timers.
#[derive(Clone)]
pub struct SharedNotifications {
    inner: Arc<Mutex<NotificationSurface>>,
}

impl SharedNotifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(NotificationSurface::new(ttl))),
        }
    }

    pub async fn show(&self, text: impl Into<String>, severity: Severity) -> HideTicket {
        self.inner.lock().await.show(text, severity)
    }

    pub async fn expire(&self, ticket: HideTicket) -> bool {
        self.inner.lock().await.expire(ticket)
    }

    pub async fn visible(&self) -> Option<Notification> {
        self.inner.lock().await.visible().cloned()
    }

    pub async fn last(&self) -> Option<Notification> {
        self.inner.lock().await.last().cloned()
    }

    pub async fn class_name(&self) -> String {
        self.inner.lock().await.class_name()
    }
}

/// Hides notifications from a spawned tokio task.
#[cfg(feature = "no-wasm")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[cfg(feature = "no-wasm")]
impl Timer for TokioTimer {
    fn schedule_hide(&self, notifications: SharedNotifications, ticket: HideTicket) {
        tokio::spawn(async move {
            tokio::time::sleep(ticket.delay()).await;
            if !notifications.expire(ticket).await {
                log::debug!("stale hide timer ignored");
            }
        });
    }
}
