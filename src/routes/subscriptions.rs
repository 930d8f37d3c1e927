use super::home::LandingPage;
use crate::{
    app_state::AppState,
    form::{FailureReason, SubmitOutcome, SubscriptionForm},
    subscriber_store::ErrorKind,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Form, Router,
};
use serde::Deserialize;

pub fn router() -> Router<AppState> {
    Router::new().route("/subscriptions", post(subscribe))
}

#[tracing::instrument(
    name = "Adding a new subscriber",
    skip(app_state, form),
    fields(subscriber_email = %form.email)
)]
async fn subscribe(
    State(app_state): State<AppState>,
    Form(form): Form<FormData>,
) -> Result<LandingPage<'static>, SubscribeError> {
    let subscription = SubscriptionForm::new(Some(app_state.subscriber_store.clone()));
    subscription.set_email(form.email);

    let outcome = subscription.submit().await;
    let page = LandingPage::with_form(app_state.brand, &subscription);

    match outcome {
        SubmitOutcome::Subscribed | SubmitOutcome::Ignored => Ok(page),
        SubmitOutcome::Failed(reason) => Err(SubscribeError { reason, page }),
    }
}

#[derive(Deserialize)]
struct FormData {
    email: String,
}

#[derive(Debug, thiserror::Error)]
#[error("{}", .reason.user_message())]
struct SubscribeError {
    reason: FailureReason,
    page: LandingPage<'static>,
}

impl SubscribeError {
    fn status(&self) -> StatusCode {
        match self.reason {
            FailureReason::InvalidEmail => StatusCode::UNPROCESSABLE_ENTITY,
            FailureReason::Store(ErrorKind::Duplicate) => StatusCode::CONFLICT,
            FailureReason::NotConfigured | FailureReason::Store(ErrorKind::Unavailable) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            FailureReason::Store(ErrorKind::Unknown) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SubscribeError {
    fn into_response(self) -> Response {
        tracing::warn!(reason = ?self.reason, "{self}");

        (self.status(), self.page).into_response()
    }
}
