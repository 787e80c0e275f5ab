//! Core domain types for the quoting tool.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::Amount;

/// Sequential policy identifier.
pub type PolicyNumber = u32;

/// Canadian province or territory code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Province {
    NL,
    ON,
    BC,
    AB,
    MB,
    NB,
    NS,
    NT,
    NU,
    PE,
    QC,
    SK,
    YT,
}

impl Province {
    pub const ALL: [Province; 13] = [
        Province::NL,
        Province::ON,
        Province::BC,
        Province::AB,
        Province::MB,
        Province::NB,
        Province::NS,
        Province::NT,
        Province::NU,
        Province::PE,
        Province::QC,
        Province::SK,
        Province::YT,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Province::NL => "NL",
            Province::ON => "ON",
            Province::BC => "BC",
            Province::AB => "AB",
            Province::MB => "MB",
            Province::NB => "NB",
            Province::NS => "NS",
            Province::NT => "NT",
            Province::NU => "NU",
            Province::PE => "PE",
            Province::QC => "QC",
            Province::SK => "SK",
            Province::YT => "YT",
        }
    }
}

impl FromStr for Province {
    type Err = ();

    /// Case-insensitive province code lookup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Province::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// How the customer settles the policy, as chosen at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Full,
    Monthly,
    DownPay,
}

impl PaymentMethod {
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Full => "Full",
            PaymentMethod::Monthly => "Monthly",
            PaymentMethod::DownPay => "Down Pay",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ();

    /// Exact, case-sensitive match on the prompt labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Full" => Ok(PaymentMethod::Full),
            "Monthly" => Ok(PaymentMethod::Monthly),
            "Down Pay" => Ok(PaymentMethod::DownPay),
            _ => Err(()),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payment method together with its data. A down payment only exists for
/// [`PaymentMethod::DownPay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payment {
    Full,
    Monthly,
    DownPay { down_payment: Amount },
}

impl Payment {
    pub fn method(&self) -> PaymentMethod {
        match self {
            Payment::Full => PaymentMethod::Full,
            Payment::Monthly => PaymentMethod::Monthly,
            Payment::DownPay { .. } => PaymentMethod::DownPay,
        }
    }

    pub fn down_payment(&self) -> Option<Amount> {
        match self {
            Payment::DownPay { down_payment } => Some(*down_payment),
            _ => None,
        }
    }
}

/// Optional coverages, each charged per insured car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Coverage {
    /// Extra liability up to $1,000,000.
    pub liability: bool,
    pub glass: bool,
    pub loaner: bool,
}

/// A previous claim attached to a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRecord {
    /// 5-digit claim identifier, kept as text to preserve leading zeros.
    pub number: String,
    pub date: NaiveDate,
    pub amount: Amount,
}

/// Everything collected about one customer at the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub province: Province,
    pub postal_code: String,
    pub phone: String,
    pub num_cars: NonZeroU32,
    pub coverage: Coverage,
    pub payment: Payment,
    /// In order of entry.
    pub claims: Vec<ClaimRecord>,
}

impl CustomerRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn province_parses_case_insensitively() {
        assert_eq!("nl".parse(), Ok(Province::NL));
        assert_eq!("On".parse(), Ok(Province::ON));
        assert_eq!("YT".parse(), Ok(Province::YT));
        assert!("XX".parse::<Province>().is_err());
        assert!("".parse::<Province>().is_err());
    }

    #[test]
    fn province_codes_are_distinct() {
        for p in Province::ALL {
            assert_eq!(p.code().parse(), Ok(p));
            assert_eq!(p.to_string(), p.code());
        }
    }

    #[test]
    fn payment_method_is_case_sensitive() {
        assert_eq!("Full".parse(), Ok(PaymentMethod::Full));
        assert_eq!("Monthly".parse(), Ok(PaymentMethod::Monthly));
        assert_eq!("Down Pay".parse(), Ok(PaymentMethod::DownPay));
        assert!("full".parse::<PaymentMethod>().is_err());
        assert!("DownPay".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn down_payment_only_on_down_pay() {
        let down = Payment::DownPay {
            down_payment: Amount::from_whole(100),
        };
        assert_eq!(down.down_payment(), Some(Amount::from_whole(100)));
        assert_eq!(down.method(), PaymentMethod::DownPay);
        assert_eq!(Payment::Full.down_payment(), None);
        assert_eq!(Payment::Monthly.down_payment(), None);
    }

    #[test]
    fn coverage_default_is_none() {
        let coverage = Coverage::default();
        assert!(!coverage.liability && !coverage.glass && !coverage.loaner);
    }
}
