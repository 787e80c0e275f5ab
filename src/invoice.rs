//! Printable invoice for a recorded policy.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate};

use crate::engine::Quote;
use crate::format::{format_currency, format_percent, format_yes_no};
use crate::model::{CustomerRecord, Payment, PolicyNumber};
use crate::rates::RateConfiguration;
use crate::validate::CLAIM_DATE_FORMAT;

pub const COMPANY_NAME: &str = "One Stop Insurance Company";

/// Long date form, e.g. `Friday, October 16, 2026`.
pub const DATE_FORMAT: &str = "%A, %B %d, %Y";

const WIDTH: usize = 70;

/// First day of the month following `invoice_date`.
pub fn first_payment_date(invoice_date: NaiveDate) -> NaiveDate {
    invoice_date
        .with_day(1)
        .and_then(|d| d.checked_add_months(Months::new(1)))
        .unwrap_or(invoice_date)
}

/// Initials of the customer followed by the policy number, e.g. `JO1944`.
pub fn customer_id(customer: &CustomerRecord, policy: PolicyNumber) -> String {
    format!(
        "{}{}{policy}",
        initial(&customer.first_name),
        initial(&customer.last_name)
    )
}

fn initial(name: &str) -> String {
    name.chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_default()
}

/// Invoice rendered through [`fmt::Display`].
pub struct Invoice<'a> {
    pub customer: &'a CustomerRecord,
    pub quote: &'a Quote,
    pub rates: &'a RateConfiguration,
    pub policy: PolicyNumber,
    pub invoice_date: NaiveDate,
}

impl Invoice<'_> {
    fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
        let rule = "-".repeat(WIDTH);
        writeln!(f, "\n{rule}")?;
        writeln!(f, "{title:^WIDTH$}")?;
        writeln!(f, "{rule}")
    }

    fn row(f: &mut fmt::Formatter<'_>, label: &str, value: &str) -> fmt::Result {
        writeln!(f, "{label:<35} {value:>30}")
    }
}

impl fmt::Display for Invoice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let customer = self.customer;
        let premium = &self.quote.premium;
        let cost = &self.quote.cost;
        let invoice_date = self.invoice_date.format(DATE_FORMAT).to_string();
        let first_payment = first_payment_date(self.invoice_date)
            .format(DATE_FORMAT)
            .to_string();
        let rule = "-".repeat(WIDTH);

        Self::heading(f, "Invoice")?;
        writeln!(f, "\n{COMPANY_NAME:<45}{invoice_date:>20}")?;

        let name = format!("{}. {}", initial(&customer.first_name), customer.last_name);
        let id = customer_id(customer, self.policy);
        writeln!(f, "\n{name:<45}Customer ID: {id:>8}")?;
        writeln!(f, "{:<45}Policy Number: {:>6}", "", self.policy)?;
        writeln!(f, "\t{}", customer.address)?;
        writeln!(
            f,
            "\t{}, {}, {}",
            customer.city, customer.province, customer.postal_code
        )?;
        writeln!(f, "\tPhone: {}", customer.phone)?;

        Self::heading(f, "Policy Details")?;
        Self::row(f, "Number of Cars Insured:", &customer.num_cars.to_string())?;
        Self::row(f, "Liability Coverage:", format_yes_no(customer.coverage.liability))?;
        Self::row(f, "Glass Coverage:", format_yes_no(customer.coverage.glass))?;
        Self::row(f, "Loaner Car:", format_yes_no(customer.coverage.loaner))?;
        Self::row(f, "Payment Method:", customer.payment.method().label())?;
        if let Payment::DownPay { down_payment } = customer.payment {
            Self::row(f, "Down Payment:", &format_currency(down_payment))?;
        }

        Self::heading(f, "Charges")?;
        Self::row(f, "Basic Premium:", &format_currency(self.rates.basic_premium))?;
        Self::row(f, "Total Extra Costs:", &format_currency(premium.extra_costs))?;
        Self::row(f, "Total Premium:", &format_currency(premium.total_premium))?;
        let hst_label = format!("HST ({}):", format_percent(self.rates.hst));
        Self::row(f, &hst_label, &format_currency(cost.tax))?;
        Self::row(f, "Total Cost:", &format_currency(cost.total_cost))?;
        if customer.payment != Payment::Full {
            Self::row(f, "Monthly Payment:", &format_currency(cost.monthly_payment))?;
        }

        Self::heading(f, "Previous Claims")?;
        writeln!(f, "{:<20} {:<15} {:>15}", "Claim #", "Claim Date", "Amount")?;
        writeln!(f, "{rule}")?;
        for claim in &customer.claims {
            writeln!(
                f,
                "{:<20} {:<15} {:>15}",
                claim.number,
                claim.date.format(CLAIM_DATE_FORMAT).to_string(),
                format_currency(claim.amount)
            )?;
        }
        writeln!(f, "{rule}")?;

        Self::heading(f, "Payment Dates")?;
        Self::row(f, "Invoice Date:", &invoice_date)?;
        Self::row(f, "First Payment Date:", &first_payment)?;
        writeln!(f, "{rule}")
    }
}
