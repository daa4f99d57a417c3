use crate::{NextPaymentDto, PaymentPlanDto};

use tm_core::{Installment, PaymentInstruction, TranchePlan};

#[test]
fn test_plan_dto_copies_the_split() {
    let dto = PaymentPlanDto::from(TranchePlan::new(90_000_000, 3));

    assert_eq!(dto.bid_amount, 90_000_000);
    assert_eq!(dto.phases, 3);
    assert_eq!(dto.termin_amount, 30_000_000);
    assert_eq!(dto.first_payment_amount, 60_000_000);
    assert_eq!(dto.remaining_amount, 30_000_000);
}

#[test]
fn test_create_instruction_is_flattened() {
    let dto = NextPaymentDto::from(PaymentInstruction::CreateInvoice {
        installment: Installment::Unit(3),
        amount: 30_000_000,
        remaining_amount: 0,
    });

    assert_eq!(dto.kind, "create_invoice");
    assert_eq!(dto.installment.as_deref(), Some("Termin 3"));
    assert_eq!(dto.installment_number, Some(3));
    assert_eq!(dto.amount, Some(30_000_000));
    assert_eq!(dto.remaining_amount, Some(0));
}

#[test]
fn test_reuse_instruction_keeps_the_link() {
    let dto = NextPaymentDto::from(PaymentInstruction::ReuseExistingInvoice {
        installment: Installment::First,
        invoice_id: None,
        invoice_url: "https://pay.test/inv-9".to_string(),
    });

    assert_eq!(dto.kind, "reuse_existing_invoice");
    assert_eq!(dto.installment.as_deref(), Some("Termin 1 & 2"));
    assert_eq!(dto.invoice_url.as_deref(), Some("https://pay.test/inv-9"));
    assert_eq!(dto.amount, None);
}

#[test]
fn test_settled_instructions_carry_no_amounts() {
    let dto = NextPaymentDto::from(PaymentInstruction::AllSettled);

    assert_eq!(dto.kind, "all_settled");
    assert_eq!(dto.installment, None);
    assert_eq!(dto.amount, None);
}
