use crate::{
    app_state::AppState,
    domain::Brand,
    form::{SubscriptionForm, AUTO_CLOSE_AFTER},
};
use askama_axum::Template;
use axum::{extract::State, routing::get, Router};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home))
}

#[tracing::instrument(name = "Render landing page", skip(app_state))]
async fn home(State(app_state): State<AppState>) -> LandingPage<'static> {
    LandingPage::new(app_state.brand)
}

#[derive(Debug, Template)]
#[template(path = "web/landing.html")]
pub(crate) struct LandingPage<'a> {
    brand: &'a str,
    pitch: &'a str,
    email_label: &'a str,
    email_placeholder: &'a str,
    submit_label: &'a str,
    action: &'a str,
    email: String,
    error: Option<String>,
    notice: Option<String>,
    auto_close_ms: u128,
}

impl LandingPage<'static> {
    pub(crate) fn new(brand: Brand) -> Self {
        Self {
            brand: brand.display_name(),
            pitch: brand.pitch(),
            email_label: "Email",
            email_placeholder: "Enter your email",
            submit_label: "Subscribe",
            action: "/subscriptions",
            email: String::new(),
            error: None,
            notice: None,
            auto_close_ms: AUTO_CLOSE_AFTER.as_millis(),
        }
    }

    /// Renders the page with the state a submitted form ended up in.
    pub(crate) fn with_form(brand: Brand, form: &SubscriptionForm) -> Self {
        let notice = form.notice();

        Self {
            email: form.email(),
            error: form.error(),
            notice: notice.message(),
            auto_close_ms: notice.auto_close_after().as_millis(),
            ..Self::new(brand)
        }
    }
}
