use super::SubscriberEmail;
use time::OffsetDateTime;

/// One submission of the newsletter form, sent once to the subscriber store.
#[derive(Clone, Debug)]
pub struct SubscriptionRequest {
    pub email: SubscriberEmail,
    pub submitted_at: OffsetDateTime,
}

impl SubscriptionRequest {
    pub fn new(email: SubscriberEmail) -> Self {
        Self::submitted_at(email, OffsetDateTime::now_utc())
    }

    pub fn submitted_at(email: SubscriberEmail, submitted_at: OffsetDateTime) -> Self {
        Self {
            email,
            submitted_at,
        }
    }
}
