//! Contact submission controller.
//!
//! ```text
//! Idle --submit()--> Submitting --resolve(ok)--> Submitted --confirmation--> Idle
//! Submitting --resolve(err)--> Idle
//! ```

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use strum::{AsRefStr, Display};
use tokio::{sync::broadcast, task::JoinHandle};

use crate::{ContactForm, ContactSubmission, Delivery, DeliveryError, Notification, Notifier};

#[derive(Display, AsRefStr, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Submitted,
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    /// The collaborator accepted the message.
    Sent,
    /// The collaborator rejected the message or did not answer in time.
    Failed(DeliveryError),
    /// Another submission was already in flight; nothing was sent.
    Busy,
}

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    /// How long `Submitted` is shown before returning to `Idle`.
    pub confirmation: Duration,
    pub delivery_timeout: Duration,
    /// Address offered in failure notifications.
    pub fallback_email: Option<String>,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            confirmation: Duration::from_secs(2),
            delivery_timeout: Duration::from_secs(15),
            fallback_email: None,
        }
    }
}

#[derive(Default)]
struct State {
    status: SubmissionStatus,
    form: ContactForm,
    reset: Option<JoinHandle<()>>,
}

struct Shared {
    state: Mutex<State>,
    transitions: broadcast::Sender<SubmissionStatus>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, state: &mut State, status: SubmissionStatus) {
        state.status = status;
        // no subscriber is fine
        let _ = self.transitions.send(status);
    }
}

/// Puts the controller back to `Idle` when a submission is abandoned before
/// the collaborator resolves.
struct InFlight<'a> {
    shared: &'a Shared,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let mut state = self.shared.lock();
        if state.status == SubmissionStatus::Submitting {
            tracing::debug!("Contact submission abandoned before delivery resolved");
            self.shared.transition(&mut state, SubmissionStatus::Idle);
        }
    }
}

/// Owns one visitor's form fields and submission status.
pub struct Controller {
    shared: Arc<Shared>,
    delivery: Arc<dyn Delivery>,
    notifier: Arc<dyn Notifier>,
    settings: ControllerSettings,
}

impl Controller {
    pub fn new(
        delivery: Arc<dyn Delivery>,
        notifier: Arc<dyn Notifier>,
        settings: ControllerSettings,
    ) -> Self {
        let (transitions, _) = broadcast::channel(16);

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State::default()),
                transitions,
            }),
            delivery,
            notifier,
            settings,
        }
    }

    pub fn status(&self) -> SubmissionStatus {
        self.shared.lock().status
    }

    pub fn is_submitting(&self) -> bool {
        self.status() == SubmissionStatus::Submitting
    }

    pub fn form(&self) -> ContactForm {
        self.shared.lock().form.clone()
    }

    /// Record what the visitor typed. Ignored while a submission is in flight.
    pub fn update_form(&self, form: ContactForm) {
        let mut state = self.shared.lock();
        if state.status != SubmissionStatus::Submitting {
            state.form = form;
        }
    }

    /// Every status transition, in order.
    pub fn subscribe(&self) -> broadcast::Receiver<SubmissionStatus> {
        self.shared.transitions.subscribe()
    }

    /// Hand `submission` to the delivery collaborator, once.
    pub async fn submit(&self, submission: ContactSubmission) -> SubmissionOutcome {
        // Fields are captured before the first await point.
        let variables = {
            let mut state = self.shared.lock();
            if state.status == SubmissionStatus::Submitting {
                tracing::debug!("Contact submission rejected, another one is in flight");
                return SubmissionOutcome::Busy;
            }

            if let Some(reset) = state.reset.take() {
                reset.abort();
            }

            state.form = submission.form();
            self.shared
                .transition(&mut state, SubmissionStatus::Submitting);

            submission.variables()
        };

        let mut in_flight = InFlight {
            shared: &self.shared,
            armed: true,
        };

        let timeout = self.settings.delivery_timeout;
        let result = match tokio::time::timeout(timeout, self.delivery.deliver(&variables)).await
        {
            Ok(result) => result,
            Err(_) => Err(DeliveryError::Timeout(timeout)),
        };

        in_flight.armed = false;

        match result {
            Ok(()) => {
                {
                    let mut state = self.shared.lock();
                    state.form = ContactForm::default();
                    self.shared
                        .transition(&mut state, SubmissionStatus::Submitted);
                    state.reset = Some(self.schedule_reset());
                }

                self.notifier.notify(Notification::delivered());

                SubmissionOutcome::Sent
            }
            Err(err) => {
                {
                    let mut state = self.shared.lock();
                    self.shared.transition(&mut state, SubmissionStatus::Idle);
                }

                tracing::warn!(error = %err, "Contact message delivery failed");

                self.notifier.notify(Notification::failed(
                    &err,
                    self.settings.fallback_email.as_deref(),
                ));

                SubmissionOutcome::Failed(err)
            }
        }
    }

    fn schedule_reset(&self) -> JoinHandle<()> {
        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        let delay = self.settings.confirmation;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let Some(shared) = shared.upgrade() else {
                return;
            };

            let mut state = shared.lock();
            if state.status == SubmissionStatus::Submitted {
                state.reset = None;
                shared.transition(&mut state, SubmissionStatus::Idle);
            }
        })
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        if let Some(reset) = self.shared.lock().reset.take() {
            reset.abort();
        }
    }
}
