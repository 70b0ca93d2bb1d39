//! # Domain Records
//!
//! The four record kinds the business runs on:
//!
//! ```text
//! Agency ──owns──► Vehicle ◄──rents── Rental ──for──► Customer
//! ```
//!
//! Records are plain data. Status changes on `Vehicle` and `Rental` are made
//! by the lifecycle engine in `rental.rs`, never by callers directly.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::listing::Searchable;

pub type Timestamp = DateTime<Utc>;

/// Amount of money in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub u64);

impl Money {
    pub fn from_cents(cents: u64) -> Self {
        Money(cents)
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    /// Parses `"123"`, `"123.4"` or `"123.45"` (a comma also works as separator).
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim().replace(',', ".");
        let (whole, frac) = match input.split_once('.') {
            Some((w, f)) => (w, f),
            None => (input.as_str(), ""),
        };
        if whole.is_empty() || frac.len() > 2 {
            return None;
        }
        let whole: u64 = whole.parse().ok()?;
        let frac: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().ok()? * 10,
            _ => frac.parse().ok()?,
        };
        whole.checked_mul(100)?.checked_add(frac).map(Money)
    }

    pub fn times(self, units: u64) -> Self {
        Money(self.0.saturating_mul(units))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agency {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl Searchable for Agency {
    fn search_key(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    Available,
    Rented,
    Unavailable,
}

impl VehicleStatus {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Rented => "rented",
            VehicleStatus::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    /// Unique business key, compared case-insensitively.
    pub plate: String,
    pub model: String,
    pub brand: String,
    pub agency_id: Uuid,
    pub daily_rate: Money,
    pub status: VehicleStatus,
}

impl Vehicle {
    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }
}

impl Searchable for Vehicle {
    fn search_key(&self) -> String {
        format!("{} {} {}", self.plate, self.brand, self.model)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerKind {
    Individual,
    LegalEntity,
}

impl CustomerKind {
    pub const ALL: [CustomerKind; 2] = [CustomerKind::Individual, CustomerKind::LegalEntity];

    pub fn label(&self) -> &'static str {
        match self {
            CustomerKind::Individual => "Individual",
            CustomerKind::LegalEntity => "Legal entity",
        }
    }

    /// Name of the identity document this kind of customer carries.
    pub fn document_label(&self) -> &'static str {
        match self {
            CustomerKind::Individual => "CPF",
            CustomerKind::LegalEntity => "CNPJ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub kind: CustomerKind,
    pub name: String,
    pub phone: String,
    pub document: String,
}

impl Searchable for Customer {
    fn search_key(&self) -> String {
        format!("{} {}", self.name, self.document)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RentalStatus {
    Open,
    Closed,
}

/// A vehicle booking.
///
/// Only [`Rental::open`] constructs one, always in `Open` state. `end` and
/// `charge` are set together by [`Rental::close`], which is the single
/// `Open -> Closed` transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rental {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub customer_id: Uuid,
    pub agency_id: Uuid,
    pub start: Timestamp,
    end: Option<Timestamp>,
    status: RentalStatus,
    charge: Option<Money>,
}

impl Rental {
    pub(crate) fn open(vehicle_id: Uuid, customer_id: Uuid, agency_id: Uuid, start: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id,
            customer_id,
            agency_id,
            start,
            end: None,
            status: RentalStatus::Open,
            charge: None,
        }
    }

    pub(crate) fn close(&mut self, end: Timestamp, charge: Money) {
        debug_assert_eq!(self.status, RentalStatus::Open);
        self.end = Some(end);
        self.charge = Some(charge);
        self.status = RentalStatus::Closed;
    }

    pub fn status(&self) -> RentalStatus {
        self.status
    }

    pub fn is_open(&self) -> bool {
        self.status == RentalStatus::Open
    }

    pub fn end(&self) -> Option<Timestamp> {
        self.end
    }

    pub fn charge(&self) -> Option<Money> {
        self.charge
    }

    /// `end`/`charge` are both unset while open and both set once closed.
    pub fn is_consistent(&self) -> bool {
        match self.status {
            RentalStatus::Open => self.end.is_none() && self.charge.is_none(),
            RentalStatus::Closed => self.end.is_some() && self.charge.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_parse_and_display() {
        assert_eq!(Money::parse("120"), Some(Money(12000)));
        assert_eq!(Money::parse("99.5"), Some(Money(9950)));
        assert_eq!(Money::parse("99,05"), Some(Money(9905)));
        assert_eq!(Money::parse("1.234"), None);
        assert_eq!(Money::parse("abc"), None);
        assert_eq!(Money::parse(""), None);
        assert_eq!(Money(12345).to_string(), "123.45");
        assert_eq!(Money(7).to_string(), "0.07");
    }

    #[test]
    fn test_rental_open_then_close_sets_terminal_fields_together() {
        let mut rental = Rental::open(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Utc::now());
        assert!(rental.is_open());
        assert!(rental.is_consistent());
        assert_eq!(rental.end(), None);

        rental.close(rental.start, Money(100));
        assert_eq!(rental.status(), RentalStatus::Closed);
        assert!(rental.is_consistent());
        assert_eq!(rental.charge(), Some(Money(100)));
    }

    #[test]
    fn test_status_serializes_screaming_case() {
        let json = serde_json::to_string(&VehicleStatus::Unavailable).unwrap();
        assert_eq!(json, "\"UNAVAILABLE\"");
        let kind: CustomerKind = serde_json::from_str("\"LEGAL_ENTITY\"").unwrap();
        assert_eq!(kind.document_label(), "CNPJ");
    }
}
