use super::SuccessModal;
use crate::{
    domain::{SubscriberEmail, SubscriptionRequest},
    subscriber_store::{ErrorKind, SubscriberStore},
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::Span;

pub const SUCCESS_MESSAGE: &str =
    "Thank you for subscribing! You will receive our latest updates soon.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight.
    Ignored,
    Subscribed,
    Failed(FailureReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureReason {
    NotConfigured,
    InvalidEmail,
    Store(ErrorKind),
}

impl FailureReason {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotConfigured => "Subscription service is not available.",
            Self::InvalidEmail => "Please enter a valid email address.",
            Self::Store(ErrorKind::Duplicate) => "This email is already subscribed.",
            Self::Store(ErrorKind::Unavailable) => {
                "Subscription service is temporarily unavailable."
            }
            Self::Store(ErrorKind::Unknown) => "Failed to subscribe. Please try again.",
        }
    }
}

/// Newsletter signup form. Holds the typed email, the busy flag guarding
/// against concurrent submissions and the last error shown to the user.
pub struct SubscriptionForm {
    store: Option<Arc<dyn SubscriberStore>>,
    state: Mutex<FormState>,
    notice: SuccessModal,
}

#[derive(Default)]
struct FormState {
    email: String,
    busy: bool,
    error: Option<String>,
}

impl SubscriptionForm {
    pub fn new(store: Option<Arc<dyn SubscriberStore>>) -> Self {
        Self::with_notice(store, SuccessModal::default())
    }

    pub fn with_notice(store: Option<Arc<dyn SubscriberStore>>, notice: SuccessModal) -> Self {
        Self {
            store,
            state: Mutex::new(FormState::default()),
            notice,
        }
    }

    pub fn set_email(&self, email: impl Into<String>) {
        let mut state = self.lock();
        if !state.busy {
            state.email = email.into();
        }
    }

    pub fn email(&self) -> String {
        self.lock().email.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.lock().busy
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn notice(&self) -> &SuccessModal {
        &self.notice
    }

    #[tracing::instrument(
        name = "Submitting newsletter form",
        skip(self),
        fields(subscriber_email = tracing::field::Empty)
    )]
    pub async fn submit(&self) -> SubmitOutcome {
        let (store, email) = {
            let mut state = self.lock();
            if state.busy {
                tracing::info!("Submission already in flight. Ignoring.");
                return SubmitOutcome::Ignored;
            }

            let Some(store) = self.store.clone() else {
                tracing::error!("Subscriber store is not configured");
                return Self::fail(&mut state, FailureReason::NotConfigured);
            };

            let email = match SubscriberEmail::parse(state.email.trim().to_string()) {
                Ok(email) => email,
                Err(e) => {
                    tracing::warn!(error.message = %e, "Rejected malformed email");
                    return Self::fail(&mut state, FailureReason::InvalidEmail);
                }
            };

            state.busy = true;
            state.error = None;
            (store, email)
        };

        Span::current().record("subscriber_email", tracing::field::display(&email));

        let result = store.insert(&SubscriptionRequest::new(email)).await;

        let mut state = self.lock();
        state.busy = false;
        match result {
            Ok(()) => {
                state.email.clear();
                drop(state);
                tracing::info!("New subscriber has been saved");
                self.notice.show(SUCCESS_MESSAGE);
                SubmitOutcome::Subscribed
            }
            Err(e) => {
                tracing::error!(
                    error_cause_chain = ?e,
                    error.message = %e,
                    "Failed to save new subscriber"
                );
                Self::fail(&mut state, FailureReason::Store(e.kind()))
            }
        }
    }

    fn fail(state: &mut FormState, reason: FailureReason) -> SubmitOutcome {
        state.error = Some(reason.user_message().to_string());
        SubmitOutcome::Failed(reason)
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
