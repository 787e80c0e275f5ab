//! Predicates over raw console input.
//!
//! Every validator reports `false` for malformed input rather than failing.
//! The `parse_*` helpers pair a validator with the conversion the console
//! applies once the input is accepted.

use std::num::NonZeroU32;
use std::sync::LazyLock;

use chrono::{Local, NaiveDate};
use regex::Regex;

use crate::Amount;
use crate::model::{PaymentMethod, Province};

/// Input format of claim dates.
pub const CLAIM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest fleet a single policy covers.
pub const MAX_CARS: u32 = 999;

static NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z'-]+$").unwrap());
static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());
static POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][0-9][A-Za-z] [0-9][A-Za-z][0-9]$").unwrap());
static CITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z ]+$").unwrap());
static MONEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]{1,2})?$").unwrap());
static CLAIM_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{5}$").unwrap());

/// Letters, apostrophes and hyphens only.
pub fn validate_name(name: &str) -> bool {
    NAME.is_match(name)
}

/// Exactly 10 digits.
pub fn validate_phone_number(phone: &str) -> bool {
    PHONE.is_match(phone)
}

/// Canadian format `A1A 1A1`, letters in either case, one mandatory space.
pub fn validate_postal_code(postal_code: &str) -> bool {
    POSTAL_CODE.is_match(postal_code)
}

/// Letters and spaces only.
pub fn validate_city(city: &str) -> bool {
    CITY.is_match(city)
}

pub fn validate_province(province: &str) -> bool {
    parse_province(province).is_some()
}

/// Digits only, at least one car.
pub fn validate_num_cars(num_cars: &str) -> bool {
    parse_num_cars(num_cars).is_some()
}

pub fn validate_yn_input(value: &str) -> bool {
    parse_yn(value).is_some()
}

/// Non-negative amount with at most two decimal places, no separators.
pub fn validate_down_payment(amount: &str) -> bool {
    MONEY.is_match(amount)
}

pub fn validate_claim_number(claim_number: &str) -> bool {
    CLAIM_NUMBER.is_match(claim_number)
}

/// `YYYY-MM-DD`, not after today's local date.
pub fn validate_claim_date(claim_date: &str) -> bool {
    parse_claim_date(claim_date, Local::now().date_naive()).is_some()
}

pub fn validate_claim_amount(amount: &str) -> bool {
    MONEY.is_match(amount)
}

/// One of `Full`, `Monthly`, `Down Pay`, case-sensitive.
pub fn validate_payment_method(payment_method: &str) -> bool {
    parse_payment_method(payment_method).is_some()
}

pub fn parse_province(province: &str) -> Option<Province> {
    province.parse().ok()
}

pub fn parse_num_cars(num_cars: &str) -> Option<NonZeroU32> {
    if num_cars.is_empty() || !num_cars.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    num_cars
        .parse::<NonZeroU32>()
        .ok()
        .filter(|n| n.get() <= MAX_CARS)
}

/// `Y` or `N` in either case.
pub fn parse_yn(value: &str) -> Option<bool> {
    match value.to_uppercase().as_str() {
        "Y" => Some(true),
        "N" => Some(false),
        _ => None,
    }
}

/// Down payment or claim amount.
pub fn parse_money(amount: &str) -> Option<Amount> {
    if !MONEY.is_match(amount) {
        return None;
    }
    amount.parse().ok()
}

/// Parses a claim date, rejecting dates after `today`.
pub fn parse_claim_date(claim_date: &str, today: NaiveDate) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(claim_date, CLAIM_DATE_FORMAT).ok()?;
    (date <= today).then_some(date)
}

pub fn parse_payment_method(payment_method: &str) -> Option<PaymentMethod> {
    payment_method.parse().ok()
}
