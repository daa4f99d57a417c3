pub mod bid_amount;
pub mod custom_id;
pub mod installment;
pub mod moderation_status;
pub mod negotiation_status;
pub mod payment_status;
pub mod payment_tranche;
pub mod procurement_method;
pub mod project;
pub mod proposal;
pub mod proposal_status;
pub mod tender_duration;
