use std::sync::{Mutex, PoisonError};

use strum::{AsRefStr, Display};

use crate::DeliveryError;

#[derive(Display, AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Variant {
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Success,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Destructive,
        }
    }

    pub fn delivered() -> Self {
        Self::success(
            "Message sent successfully!",
            "Thank you for reaching out. I'll get back to you soon.",
        )
    }

    /// Failure copy never includes the error detail, only a way forward.
    pub fn failed(error: &DeliveryError, fallback_email: Option<&str>) -> Self {
        let retry = match fallback_email {
            Some(email) => format!("Please try again or contact me directly at {email}."),
            None => "Please try again or contact me directly via email.".to_owned(),
        };

        match error {
            DeliveryError::Timeout(_) => Self::destructive(
                "Message timed out",
                format!("The email service did not respond in time. {retry}"),
            ),
            _ => Self::destructive("Failed to send message", retry),
        }
    }
}

/// Transient, fire-and-forget surface for submission outcomes.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Buffers notifications until the next response drains them.
#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: Mutex<Vec<Notification>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, notification: Notification) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
