pub mod app_state;
pub mod configuration;
pub mod domain;
pub mod form;
pub mod routes;
pub mod startup;
pub mod subscriber_store;
pub mod telemetry;
