use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "installment")]
pub enum ProjectAction {
    EditAndDelete,
    WaitForReview,
    ReviseAndResubmit,
    ViewDetails,
    ViewOffers,
    /// Pay the given installment number (1 = "Termin 1 & 2").
    PayInstallment(u32),
    MonitorProgress,
    Resubmit,
    ViewResult,
}
