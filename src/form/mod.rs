mod subscription_form;
mod success_modal;

pub use subscription_form::{FailureReason, SubmitOutcome, SubscriptionForm, SUCCESS_MESSAGE};
pub use success_modal::{ModalState, SuccessModal, AUTO_CLOSE_AFTER};
