//! Quote engine.
//!
//! The engine owns the rate configuration for the lifetime of the process.
//! It prices customers and records their policies, advancing the policy
//! sequence counter only when a policy is durably stored.

use tracing::info;

use crate::model::{CustomerRecord, PolicyNumber};
use crate::policy::PolicyRecorder;
use crate::rates::RateConfiguration;
use crate::validate::MAX_CARS;

mod pricing;
pub use pricing::{CostResult, INSTALLMENTS, PremiumResult, calculate_final_cost, calculate_premium};

mod error;
pub use error::{CustomerError, EngineError};

/// Everything computed for one customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub premium: PremiumResult,
    pub cost: CostResult,
}

/// The quoting engine.
pub struct Engine {
    rates: RateConfiguration,
    recorder: PolicyRecorder,
}

/// Public API
impl Engine {
    pub fn new(rates: RateConfiguration, recorder: PolicyRecorder) -> Self {
        Self { rates, recorder }
    }

    /// Current rates, including the number the next policy will get.
    pub fn rates(&self) -> &RateConfiguration {
        &self.rates
    }

    /// Price a customer against the current rates
    pub fn quote(&self, customer: &CustomerRecord) -> Result<Quote, EngineError> {
        Self::check_customer(customer)?;

        let premium = calculate_premium(customer.num_cars, customer.coverage, &self.rates);
        let cost = calculate_final_cost(
            premium.total_premium,
            self.rates.hst,
            customer.payment,
            &self.rates,
        );

        info!(
            customer = %customer.full_name(),
            cars = customer.num_cars.get(),
            premium = %premium.total_premium,
            total = %cost.total_cost,
            "quote computed"
        );

        Ok(Quote { premium, cost })
    }

    /// Store the policy for a quoted customer and return its number
    pub fn record(
        &mut self,
        customer: &CustomerRecord,
        quote: &Quote,
    ) -> Result<PolicyNumber, EngineError> {
        let result =
            self.recorder
                .record_policy(customer, quote.premium.total_premium, &mut self.rates);
        match &result {
            Ok(policy) => info!(
                policy = %policy,
                customer = %customer.full_name(),
                claims = customer.claims.len(),
                "policy recorded"
            ),
            Err(e) => info!(
                customer = %customer.full_name(),
                reason = %e,
                "policy skipped"
            ),
        }
        Ok(result?)
    }
}

/// Private API
impl Engine {
    /// Re-check the limits the console enforces on input
    fn check_customer(customer: &CustomerRecord) -> Result<(), CustomerError> {
        if customer.num_cars.get() > MAX_CARS {
            return Err(CustomerError::TooManyCars(customer.num_cars.get()));
        }
        if let Some(down_payment) = customer.payment.down_payment()
            && down_payment.is_negative()
        {
            return Err(CustomerError::NegativeDownPayment(down_payment));
        }
        if let Some(claim) = customer.claims.iter().find(|c| c.amount.is_negative()) {
            return Err(CustomerError::NegativeClaimAmount(
                claim.number.clone(),
                claim.amount,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::Amount;
    use crate::model::{ClaimRecord, Coverage, Payment, Province};
    use crate::policy::RecordError;
    use crate::rates::tests::sample_rates;
    use chrono::NaiveDate;
    use std::num::NonZeroU32;

    pub(crate) fn customer(num_cars: u32, payment: Payment) -> CustomerRecord {
        CustomerRecord {
            first_name: "John".to_string(),
            last_name: "O'Brien".to_string(),
            address: "12 Water Street".to_string(),
            city: "St Johns".to_string(),
            province: Province::NL,
            postal_code: "A1C 5H2".to_string(),
            phone: "7095551234".to_string(),
            num_cars: NonZeroU32::new(num_cars).unwrap(),
            coverage: Coverage {
                liability: true,
                glass: false,
                loaner: false,
            },
            payment,
            claims: vec![ClaimRecord {
                number: "12345".to_string(),
                date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                amount: Amount::from_whole(500),
            }],
        }
    }

    fn engine_in(dir: &std::path::Path) -> Engine {
        Engine::new(sample_rates(), PolicyRecorder::new(dir))
    }

    // Quote

    #[test]
    fn quote_example_customer() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_in(dir.path());

        let quote = engine.quote(&customer(3, Payment::Full)).unwrap();
        assert_eq!(quote.premium.total_premium, Amount::from_whole(1550));
        assert_eq!(quote.premium.extra_costs, Amount::from_whole(150));
        assert_eq!(quote.cost.total_cost, "1782.5".parse().unwrap());
        assert_eq!(quote.cost.monthly_payment, Amount::ZERO);
    }

    #[test]
    fn quote_rejects_negative_down_payment() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_in(dir.path());
        let payment = Payment::DownPay {
            down_payment: Amount::from_whole(-1),
        };

        let result = engine.quote(&customer(1, payment));
        assert!(matches!(
            result,
            Err(EngineError::Customer(CustomerError::NegativeDownPayment(_)))
        ));
    }

    #[test]
    fn quote_rejects_fleet_over_limit() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_in(dir.path());

        assert!(engine.quote(&customer(MAX_CARS, Payment::Full)).is_ok());
        let result = engine.quote(&customer(u32::MAX, Payment::Full));
        assert!(matches!(
            result,
            Err(EngineError::Customer(CustomerError::TooManyCars(u32::MAX)))
        ));
    }

    #[test]
    fn quote_rejects_negative_claim() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_in(dir.path());
        let mut record = customer(1, Payment::Monthly);
        record.claims[0].amount = Amount::from_whole(-5);

        let result = engine.quote(&record);
        assert!(matches!(
            result,
            Err(EngineError::Customer(CustomerError::NegativeClaimAmount(ref n, _))) if n == "12345"
        ));
    }

    #[test]
    fn quote_does_not_touch_counter() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_in(dir.path());
        engine.quote(&customer(2, Payment::Monthly)).unwrap();
        assert_eq!(engine.rates().next_policy_number, 1);
    }

    // Record

    #[test]
    fn record_assigns_sequential_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(dir.path());
        let record = customer(1, Payment::Full);
        let quote = engine.quote(&record).unwrap();

        assert_eq!(engine.record(&record, &quote).unwrap(), 1);
        assert_eq!(engine.record(&record, &quote).unwrap(), 2);
        assert_eq!(engine.rates().next_policy_number, 3);
        assert!(dir.path().join("Policy_1.txt").exists());
        assert!(dir.path().join("Policy_2.txt").exists());
    }

    #[test]
    fn failed_record_keeps_counter() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(&dir.path().join("missing"));
        let record = customer(1, Payment::Full);
        let quote = engine.quote(&record).unwrap();

        let result = engine.record(&record, &quote);
        assert!(matches!(
            result,
            Err(EngineError::Record(RecordError::Write { .. }))
        ));
        assert_eq!(engine.rates().next_policy_number, 1);
    }
}
