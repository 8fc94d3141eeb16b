#![allow(dead_code)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use folio_contact::{
    ContactForm, ContactSubmission, Controller, ControllerSettings, Delivery, DeliveryError,
    EmailVariables, Notification, Notifier, SubmissionStatus,
};
use tokio::sync::broadcast;

pub enum Reply {
    Ok,
    Network,
    Quota,
}

/// Delivery collaborator that answers after `delay` and counts its calls.
pub struct FakeDelivery {
    reply: Reply,
    delay: Duration,
    calls: AtomicUsize,
    received: Mutex<Vec<EmailVariables>>,
}

impl FakeDelivery {
    pub fn new(reply: Reply) -> Arc<Self> {
        Self::with_delay(reply, Duration::from_millis(100))
    }

    pub fn with_delay(reply: Reply, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            reply,
            delay,
            calls: AtomicUsize::new(0),
            received: Mutex::new(vec![]),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<EmailVariables> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Delivery for FakeDelivery {
    async fn deliver(&self, variables: &EmailVariables) -> Result<(), DeliveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(variables.clone());

        tokio::time::sleep(self.delay).await;

        match self.reply {
            Reply::Ok => Ok(()),
            Reply::Network => Err(DeliveryError::Network("connection reset".to_owned())),
            Reply::Quota => Err(DeliveryError::Quota("limit reached".to_owned())),
        }
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

pub fn controller(
    delivery: Arc<FakeDelivery>,
    settings: ControllerSettings,
) -> (Controller, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = Controller::new(delivery, notifier.clone(), settings);

    (controller, notifier)
}

pub fn ada() -> ContactSubmission {
    ContactForm::new("Ada Lovelace", "ada@example.com", "Hello")
        .into_submission()
        .unwrap()
}

/// Statuses already broadcast, prefixed with the starting status.
pub fn history(
    start: SubmissionStatus,
    rx: &mut broadcast::Receiver<SubmissionStatus>,
) -> Vec<SubmissionStatus> {
    let mut statuses = vec![start];
    while let Ok(status) = rx.try_recv() {
        statuses.push(status);
    }

    statuses
}
