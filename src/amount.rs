use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Fixed-point decimal with 4 decimal places, stored as a scaled integer.
///
/// Used both for currency values and for rates (`0.15` is stored as `1500`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Amount(i64);

/// A multiplicative rate such as a discount or a tax rate.
pub type Rate = Amount;

/// Errors that can occur when parsing a decimal string into an [`Amount`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountParseError {
    #[error("empty amount")]
    Empty,
    #[error("'{0}' is not a decimal number")]
    Invalid(String),
    #[error("'{0}' has more than 4 decimal places")]
    TooPrecise(String),
    #[error("'{0}' is out of range")]
    Overflow(String),
}

impl Amount {
    const SCALE: i64 = 10_000;
    const DECIMALS: usize = 4;

    pub const ZERO: Amount = Amount(0);
    pub const ONE: Amount = Amount(Self::SCALE);

    pub fn from_scaled(value: i64) -> Self {
        Amount(value)
    }

    pub fn from_whole(value: i64) -> Self {
        Amount(value * Self::SCALE)
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Value in whole cents, rounded half away from zero.
    pub fn cents(self) -> i64 {
        div_round(self.0 as i128, (Self::SCALE / 100) as i128) as i64
    }
}

/// Integer division rounding half away from zero. `d` must be positive.
fn div_round(n: i128, d: i128) -> i128 {
    let q = n / d;
    let r = n % d;
    if 2 * r.abs() >= d { q + n.signum() } else { q }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountParseError::Empty);
        }

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(frac) {
            return Err(AmountParseError::Invalid(s.to_string()));
        }
        if digits.ends_with('.') {
            return Err(AmountParseError::Invalid(s.to_string()));
        }
        if frac.len() > Self::DECIMALS {
            return Err(AmountParseError::TooPrecise(s.to_string()));
        }

        let overflow = || AmountParseError::Overflow(s.to_string());
        let whole: i64 = whole.parse().map_err(|_| overflow())?;
        let frac_scaled = format!("{frac:0<width$}", width = Self::DECIMALS)
            .parse::<i64>()
            .map_err(|_| overflow())?;

        let scaled = whole
            .checked_mul(Self::SCALE)
            .and_then(|w| w.checked_add(frac_scaled))
            .ok_or_else(overflow)?;

        Ok(Amount(if negative { -scaled } else { scaled }))
    }
}

impl fmt::Display for Amount {
    /// Shortest exact representation: `500`, `0.1`, `1782.5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / Self::SCALE as u64;
        let frac = abs % Self::SCALE as u64;
        if frac == 0 {
            return write!(f, "{sign}{whole}");
        }
        let frac = format!("{frac:04}");
        write!(f, "{sign}{whole}.{}", frac.trim_end_matches('0'))
    }
}

impl std::ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0 - rhs.0)
    }
}

impl std::ops::SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// Fixed-point product, rounded half away from zero to 4 decimal places.
impl std::ops::Mul for Amount {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let product = self.0 as i128 * rhs.0 as i128;
        Amount(div_round(product, Self::SCALE as i128) as i64)
    }
}

impl std::ops::Mul<u32> for Amount {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Amount(self.0 * rhs as i64)
    }
}

/// Splits an amount into `rhs` parts, rounded half away from zero.
impl std::ops::Div<u32> for Amount {
    type Output = Self;

    fn div(self, rhs: u32) -> Self::Output {
        Amount(div_round(self.0 as i128, rhs as i128) as i64)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}
