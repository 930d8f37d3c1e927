use crate::{domain::Brand, subscriber_store::SubscriberStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub subscriber_store: Arc<dyn SubscriberStore>,
    pub brand: Brand,
}
