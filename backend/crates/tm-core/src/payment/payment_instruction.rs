use crate::Installment;

/// What the caller should do next to collect money for a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentInstruction {
    /// "Termin 1 & 2" is paid but the project flags do not say so yet.
    /// Write the flags back and advance the project; no invoice needed.
    AlreadySettled,
    /// An invoice already exists for this installment; send the payer there
    /// instead of creating a duplicate.
    ReuseExistingInvoice {
        installment: Installment,
        invoice_id: Option<String>,
        invoice_url: String,
    },
    /// An invoice id is stored without a link. Ask the gateway whether it is
    /// paid; if not (or the gateway cannot answer), create a fresh invoice
    /// for `amount`.
    CheckInvoiceStatus {
        installment: Installment,
        invoice_id: String,
        amount: i64,
    },
    CreateInvoice {
        installment: Installment,
        amount: i64,
        remaining_amount: i64,
    },
    /// Every installment is paid.
    AllSettled,
}

impl PaymentInstruction {
    pub fn installment(&self) -> Option<&Installment> {
        match self {
            Self::ReuseExistingInvoice { installment, .. }
            | Self::CheckInvoiceStatus { installment, .. }
            | Self::CreateInvoice { installment, .. } => Some(installment),
            Self::AlreadySettled | Self::AllSettled => None,
        }
    }
}
