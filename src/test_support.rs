//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use crate::core::billing::BillingPolicy;
use crate::core::model::{
    Agency, Customer, CustomerKind, Money, Timestamp, Vehicle, VehicleStatus,
};
use crate::core::rental::RentalEngine;
use crate::core::store::{MemoryStore, RecordStore, WriteBatch};

pub fn agency(name: &str) -> Agency {
    Agency {
        id: Uuid::new_v4(),
        name: name.to_string(),
        address: format!("{name} Street, 100"),
        phone: "555-0100".to_string(),
    }
}

pub fn customer(name: &str) -> Customer {
    Customer {
        id: Uuid::new_v4(),
        kind: CustomerKind::Individual,
        name: name.to_string(),
        phone: "555-0199".to_string(),
        document: "123.456.789-00".to_string(),
    }
}

pub fn vehicle(agency: &Agency, plate: &str, daily_rate_cents: u64) -> Vehicle {
    Vehicle {
        id: Uuid::new_v4(),
        plate: plate.to_string(),
        model: "Onix".to_string(),
        brand: "Chevrolet".to_string(),
        agency_id: agency.id,
        daily_rate: Money(daily_rate_cents),
        status: VehicleStatus::Available,
    }
}

/// A fixed, readable point in time for rental tests.
pub fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap()
}

/// One agency, one customer, one available vehicle (rate 50.00/day).
pub struct Fixture {
    pub engine: RentalEngine<MemoryStore>,
    pub agency: Agency,
    pub customer: Customer,
    pub vehicle: Vehicle,
}

pub fn fixture() -> Fixture {
    let agency = agency("Downtown");
    let customer = customer("Ana");
    let vehicle = vehicle(&agency, "ABC1D23", 5000);
    let mut store = MemoryStore::new();
    store
        .commit(
            WriteBatch::new()
                .agency(agency.clone())
                .customer(customer.clone())
                .vehicle(vehicle.clone()),
        )
        .unwrap();
    Fixture {
        engine: RentalEngine::new(store, BillingPolicy::default()),
        agency,
        customer,
        vehicle,
    }
}

/// A test `App` over the fixture records, with the clock frozen at `t0()`.
pub fn test_app() -> crate::core::state::App {
    let Fixture { engine, .. } = fixture();
    let store: Box<dyn RecordStore> = Box::new(engine.store().clone());
    crate::core::state::App::new(store, BillingPolicy::default(), 2).with_clock(t0)
}
