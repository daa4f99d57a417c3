mod custom_id;
mod installment;
mod moderation_status;
mod project;
mod tender_duration;
