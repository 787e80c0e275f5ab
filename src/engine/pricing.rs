//! Premium and final cost calculation.

use std::num::NonZeroU32;

use crate::Amount;
use crate::amount::Rate;
use crate::model::{Coverage, Payment};
use crate::rates::RateConfiguration;

/// Number of equal monthly payments on the Monthly and Down Pay plans.
pub const INSTALLMENTS: u32 = 8;

/// Premium before tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PremiumResult {
    /// Includes `extra_costs`.
    pub total_premium: Amount,
    /// Part of the premium due to optional coverages.
    pub extra_costs: Amount,
}

/// Amounts owed once tax, fees and any down payment are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostResult {
    pub tax: Amount,
    pub total_cost: Amount,
    /// Zero when paid in full.
    pub monthly_payment: Amount,
}

/// Compute the premium for `num_cars` cars:
/// - the first car pays the basic premium
/// - every additional car pays the basic premium less the discount
/// - each enabled coverage costs its per-car rate times `num_cars`
pub fn calculate_premium(
    num_cars: NonZeroU32,
    coverage: Coverage,
    rates: &RateConfiguration,
) -> PremiumResult {
    let num_cars = num_cars.get();
    let basic = rates.basic_premium;
    let additional = Amount::from_whole(i64::from(num_cars - 1));
    let mut total_premium = basic + basic * additional * (Amount::ONE - rates.discount);

    let mut extra_costs = Amount::ZERO;
    for (enabled, per_car) in [
        (coverage.liability, rates.extra_liability),
        (coverage.glass, rates.glass_coverage),
        (coverage.loaner, rates.loaner_car),
    ] {
        if enabled {
            extra_costs += per_car * num_cars;
        }
    }

    total_premium += extra_costs;
    PremiumResult {
        total_premium,
        extra_costs,
    }
}

/// Compute tax, total cost and monthly payment:
/// - Full: premium plus tax, nothing monthly
/// - Monthly: adds the processing fee, split over [`INSTALLMENTS`]
/// - Down Pay: adds the processing fee and subtracts the down payment before
///   splitting the remaining balance
pub fn calculate_final_cost(
    total_premium: Amount,
    tax_rate: Rate,
    payment: Payment,
    rates: &RateConfiguration,
) -> CostResult {
    let tax = total_premium * tax_rate;
    let mut total_cost = total_premium + tax;

    let monthly_payment = match payment {
        Payment::Full => Amount::ZERO,
        Payment::Monthly => {
            total_cost += rates.processing_fee;
            total_cost / INSTALLMENTS
        }
        Payment::DownPay { down_payment } => {
            total_cost += rates.processing_fee;
            total_cost -= down_payment;
            total_cost / INSTALLMENTS
        }
    };

    CostResult {
        tax,
        total_cost,
        monthly_payment,
    }
}
