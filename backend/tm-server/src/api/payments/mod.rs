pub mod callback;
pub mod callback_response;
pub mod next_payment_request;
pub mod next_payment_response;
pub mod payment_flow;
pub mod payments;
