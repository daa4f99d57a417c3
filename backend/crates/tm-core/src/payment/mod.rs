pub mod calculator;
pub mod payment_instruction;
pub mod tranche_plan;
