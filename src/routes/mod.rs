pub mod health_check;
pub mod home;
pub mod subscriptions;
