use crate::Installment;

/// Phase units covered by the first invoice.
pub const FIRST_TRANCHE_UNITS: u32 = 2;

/// Split of an accepted bid into sequential installments.
///
/// `termin = round(bid / phases)`. The first invoice covers two units and is
/// capped at the bid; the last unit absorbs rounding so the installments add
/// up to the bid exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranchePlan {
    bid_amount: i64,
    phases: u32,
    termin_amount: i64,
}

impl TranchePlan {
    pub fn new(bid_amount: i64, phases: u32) -> Self {
        let phases = phases.max(1);
        let divisor = i64::from(phases);
        // Half-up rounding on the remainder; never forms `2 * bid`.
        let termin_amount =
            bid_amount / divisor + i64::from((bid_amount % divisor) * 2 >= divisor);

        Self {
            bid_amount,
            phases,
            termin_amount,
        }
    }

    pub fn bid_amount(&self) -> i64 {
        self.bid_amount
    }

    pub fn phases(&self) -> u32 {
        self.phases
    }

    pub fn termin_amount(&self) -> i64 {
        self.termin_amount
    }

    pub fn first_payment_amount(&self) -> i64 {
        self.termin_amount
            .saturating_mul(i64::from(FIRST_TRANCHE_UNITS))
            .min(self.bid_amount)
    }

    /// Balance left after the first invoice.
    pub fn remaining_amount(&self) -> i64 {
        self.bid_amount - self.first_payment_amount()
    }

    /// Units invoiced individually after the first tranche, in order.
    pub fn later_units(&self) -> impl Iterator<Item = u32> {
        (FIRST_TRANCHE_UNITS + 1)..=self.phases
    }

    pub fn amount_for(&self, installment: &Installment) -> i64 {
        match installment {
            Installment::First => self.first_payment_amount(),
            Installment::Unit(n) if self.covers_unit(*n) => {
                let before = self.billed_before_unit(*n);
                let left = (self.bid_amount - before).max(0);
                if *n == self.phases {
                    left
                } else {
                    self.termin_amount.min(left)
                }
            }
            _ => 0,
        }
    }

    /// Balance still to invoice once `installment` is paid.
    pub fn remaining_after(&self, installment: &Installment) -> i64 {
        match installment {
            Installment::First => self.remaining_amount(),
            Installment::Unit(n) if self.covers_unit(*n) => {
                (self.bid_amount - self.billed_before_unit(*n) - self.amount_for(installment))
                    .max(0)
            }
            _ => self.bid_amount,
        }
    }

    fn covers_unit(&self, n: u32) -> bool {
        n > FIRST_TRANCHE_UNITS && n <= self.phases
    }

    fn billed_before_unit(&self, n: u32) -> i64 {
        let earlier_units = i64::from(n - FIRST_TRANCHE_UNITS - 1);
        self.first_payment_amount()
            .saturating_add(self.termin_amount.saturating_mul(earlier_units))
            .min(self.bid_amount)
    }
}
