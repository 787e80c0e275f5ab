//! Line-oriented operator console.
//!
//! Each field is prompted until it validates; invalid input prints the
//! field's fixed error message and asks again. End of input surfaces as
//! [`io::ErrorKind::UnexpectedEof`].

use std::io::{self, BufRead, Write};

use chrono::{Local, NaiveDate};

use crate::format::{format_title_case, format_upper_case};
use crate::model::{ClaimRecord, Coverage, CustomerRecord, Payment, PaymentMethod};
use crate::validate::{
    parse_claim_date, parse_money, parse_num_cars, parse_payment_method, parse_province,
    parse_yn, validate_city, validate_claim_number, validate_name, validate_phone_number,
    validate_postal_code,
};

const YN_ERROR: &str = "Invalid input. Enter Y or N.";

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Print `prompt` and read one line without its line ending.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Prompt until `parse` accepts the input.
    pub fn ask<T>(
        &mut self,
        prompt: &str,
        error: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> io::Result<T> {
        loop {
            let line = self.read_line(prompt)?;
            match parse(&line) {
                Some(value) => return Ok(value),
                None => self.say(error)?,
            }
        }
    }

    pub fn ask_yn(&mut self, prompt: &str) -> io::Result<bool> {
        self.ask(prompt, YN_ERROR, parse_yn)
    }

    /// Collect one customer, including any previous claims.
    pub fn collect_customer(&mut self) -> io::Result<CustomerRecord> {
        let first_name = self.ask(
            "Enter the customer's first name: ",
            "Invalid name. Examples: John, Mary-Anne, O'Brien",
            |s| validate_name(s).then(|| format_title_case(s)),
        )?;
        let last_name = self.ask(
            "Enter the customer's last name: ",
            "Invalid name. Examples: Doe, Smith, O'Connor",
            |s| validate_name(s).then(|| format_title_case(s)),
        )?;
        let address = self.read_line("Enter the customer's address: ")?;
        let city = self.ask(
            "Enter the customer's city: ",
            "Invalid city name. Example: Toronto",
            |s| validate_city(s).then(|| format_title_case(s)),
        )?;
        let province = self.ask(
            "Enter the customer's province (e.g., NL, ON): ",
            "Invalid province. Example: NL",
            parse_province,
        )?;
        let postal_code = self.ask(
            "Enter the customer's postal code: ",
            "Invalid postal code. Example: A1A 1A1",
            |s| validate_postal_code(s).then(|| format_upper_case(s)),
        )?;
        let phone = self.ask(
            "Enter the customer's phone number: ",
            "Invalid phone number. Example: 1234567890",
            |s| validate_phone_number(s).then(|| s.to_string()),
        )?;
        let num_cars = self.ask(
            "Enter the number of cars being insured: ",
            "Invalid number of cars. Example: 2",
            parse_num_cars,
        )?;

        let coverage = Coverage {
            liability: self.ask_yn("Extra liability up to $1,000,000 (Y/N): ")?,
            glass: self.ask_yn("Optional glass coverage (Y/N): ")?,
            loaner: self.ask_yn("Optional loaner car (Y/N): ")?,
        };

        let method = self.ask(
            "Payment method (Full, Monthly, Down Pay): ",
            "Invalid input. Enter Full, Monthly, or Down Pay.",
            parse_payment_method,
        )?;
        let payment = match method {
            PaymentMethod::Full => Payment::Full,
            PaymentMethod::Monthly => Payment::Monthly,
            PaymentMethod::DownPay => Payment::DownPay {
                down_payment: self.ask(
                    "Enter the amount of the down payment: ",
                    "Invalid amount. Example: 1000.00",
                    parse_money,
                )?,
            },
        };

        let mut claims = Vec::new();
        while self.ask_yn("Do you want to add a previous claim? (Y/N): ")? {
            claims.push(self.collect_claim(Local::now().date_naive())?);
        }

        Ok(CustomerRecord {
            first_name,
            last_name,
            address,
            city,
            province,
            postal_code,
            phone,
            num_cars,
            coverage,
            payment,
            claims,
        })
    }

    /// Collect one claim dated no later than `today`.
    pub fn collect_claim(&mut self, today: NaiveDate) -> io::Result<ClaimRecord> {
        let number = self.ask(
            "Enter claim number: ",
            "Invalid claim number. Example: 12345",
            |s| validate_claim_number(s).then(|| s.to_string()),
        )?;
        let date = self.ask(
            "Enter claim date (YYYY-MM-DD): ",
            "Invalid date format or date is in the future. Example: 2023-01-01",
            |s| parse_claim_date(s, today),
        )?;
        let amount = self.ask(
            "Enter claim amount: ",
            "Invalid amount. Example: 500.00",
            parse_money,
        )?;
        Ok(ClaimRecord {
            number,
            date,
            amount,
        })
    }

    /// Anything but `Y` ends the session.
    pub fn ask_another(&mut self) -> io::Result<bool> {
        let answer = self.read_line("Do you want to enter another customer? (Y/N): ")?;
        Ok(answer.eq_ignore_ascii_case("y"))
    }
}
