mod brand;
mod subscriber_email;
mod subscription_request;

pub use brand::Brand;
pub use subscriber_email::SubscriberEmail;
pub use subscription_request::SubscriptionRequest;
