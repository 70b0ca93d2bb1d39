//! # Rental Lifecycle & Availability
//!
//! The only place where rentals are created or closed, and the only place
//! where a vehicle moves into or out of `Rented`.
//!
//! ```text
//!            open_rental                 close_rental
//!   (none) ─────────────► OPEN ─────────────────────► CLOSED
//!   vehicle: AVAILABLE → RENTED       vehicle: RENTED → AVAILABLE
//! ```
//!
//! Each operation reads current state, validates it, and commits every
//! changed record in a single [`WriteBatch`], so the store never sees a
//! rental without the matching vehicle status.

use std::cmp::Ordering;

use log::{info, warn};
use uuid::Uuid;

use crate::core::billing::BillingPolicy;
use crate::core::catalog::Catalog;
use crate::core::error::{RecordKind, RentalError};
use crate::core::listing::Searchable;
use crate::core::model::{Money, Rental, RentalStatus, Timestamp, Vehicle, VehicleStatus};
use crate::core::store::{RecordStore, WriteBatch};

/// A rental joined with the names an operator recognizes it by.
#[derive(Debug, Clone, PartialEq)]
pub struct RentalDetails {
    pub rental: Rental,
    pub plate: String,
    pub vehicle: String,
    pub customer: String,
    pub agency: String,
}

impl Searchable for RentalDetails {
    fn search_key(&self) -> String {
        format!("{} {} {}", self.plate, self.vehicle, self.customer)
    }
}

pub struct RentalEngine<S> {
    store: S,
    policy: BillingPolicy,
}

impl<S: RecordStore> RentalEngine<S> {
    pub fn new(store: S, policy: BillingPolicy) -> Self {
        Self { store, policy }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> &BillingPolicy {
        &self.policy
    }

    /// Record administration over the same store.
    pub fn catalog(&mut self) -> Catalog<'_, S> {
        Catalog::new(&mut self.store)
    }

    /// Rent `vehicle_id` to `customer_id` from `agency_id`, starting at `start`.
    pub fn open_rental(
        &mut self,
        vehicle_id: Uuid,
        customer_id: Uuid,
        agency_id: Uuid,
        start: Timestamp,
    ) -> Result<Rental, RentalError> {
        let mut vehicle = self
            .store
            .vehicle(vehicle_id)
            .ok_or(RentalError::not_found(RecordKind::Vehicle, vehicle_id))?;
        self.store
            .customer(customer_id)
            .ok_or(RentalError::not_found(RecordKind::Customer, customer_id))?;
        self.store
            .agency(agency_id)
            .ok_or(RentalError::not_found(RecordKind::Agency, agency_id))?;

        if vehicle.agency_id != agency_id {
            warn!(
                "Rejected rental: vehicle {} belongs to agency {}, not {}",
                vehicle.plate, vehicle.agency_id, agency_id
            );
            return Err(RentalError::InvalidAgencyAssignment {
                plate: vehicle.plate,
                agency_id,
            });
        }
        if vehicle.status != VehicleStatus::Available {
            warn!(
                "Rejected rental: vehicle {} is {}",
                vehicle.plate, vehicle.status
            );
            return Err(RentalError::VehicleUnavailable {
                plate: vehicle.plate,
                status: vehicle.status,
            });
        }
        assert!(
            self.open_rental_for(vehicle_id).is_none(),
            "available vehicle {} already has an open rental",
            vehicle.plate
        );

        let rental = Rental::open(vehicle_id, customer_id, agency_id, start);
        vehicle.status = VehicleStatus::Rented;
        self.store
            .commit(WriteBatch::new().rental(rental.clone()).vehicle(vehicle.clone()))?;

        info!(
            "Opened rental {} for vehicle {} (customer {})",
            rental.id, vehicle.plate, customer_id
        );
        Ok(rental)
    }

    /// Close an open rental at `end` and return the vehicle to its agency.
    pub fn close_rental(&mut self, rental_id: Uuid, end: Timestamp) -> Result<Rental, RentalError> {
        let mut rental = self
            .store
            .rental(rental_id)
            .ok_or(RentalError::not_found(RecordKind::Rental, rental_id))?;
        if rental.status() == RentalStatus::Closed {
            return Err(RentalError::AlreadyClosed(rental_id));
        }
        if end < rental.start {
            return Err(RentalError::InvalidTimeRange {
                start: rental.start,
                end,
            });
        }
        let mut vehicle = self
            .store
            .vehicle(rental.vehicle_id)
            .ok_or(RentalError::not_found(RecordKind::Vehicle, rental.vehicle_id))?;
        assert_eq!(
            vehicle.status,
            VehicleStatus::Rented,
            "vehicle {} has an open rental but is not rented",
            vehicle.plate
        );

        let charge = self.quote(&rental, &vehicle, end);
        rental.close(end, charge);
        vehicle.status = VehicleStatus::Available;
        self.store
            .commit(WriteBatch::new().rental(rental.clone()).vehicle(vehicle.clone()))?;

        info!(
            "Closed rental {} for vehicle {}: charge {}",
            rental.id, vehicle.plate, charge
        );
        Ok(rental)
    }

    /// What closing `rental` at `end` would charge.
    pub fn quote(&self, rental: &Rental, vehicle: &Vehicle, end: Timestamp) -> Money {
        self.policy.charge(rental.start, end, vehicle.daily_rate)
    }

    pub fn list_open_rentals(&self) -> Vec<Rental> {
        self.rentals_with(RentalStatus::Open)
    }

    pub fn list_closed_rentals(&self) -> Vec<Rental> {
        self.rentals_with(RentalStatus::Closed)
    }

    /// Rentals with `status`, stably sorted by `compare`.
    pub fn list_rentals_by<F>(&self, status: RentalStatus, compare: F) -> Vec<Rental>
    where
        F: FnMut(&Rental, &Rental) -> Ordering,
    {
        let mut rentals = self.rentals_with(status);
        rentals.sort_by(compare);
        rentals
    }

    /// Vehicles that can be rented right now, optionally from one agency.
    pub fn find_available_vehicles(&self, agency_id: Option<Uuid>) -> Vec<Vehicle> {
        self.store
            .vehicles()
            .into_iter()
            .filter(Vehicle::is_available)
            .filter(|v| agency_id.is_none_or(|id| v.agency_id == id))
            .collect()
    }

    /// The open rental holding `vehicle_id`, if any.
    pub fn open_rental_for(&self, vehicle_id: Uuid) -> Option<Rental> {
        let mut open = self
            .store
            .rentals()
            .into_iter()
            .filter(|r| r.is_open() && r.vehicle_id == vehicle_id);
        let first = open.next();
        assert!(
            open.next().is_none(),
            "vehicle {vehicle_id} has more than one open rental"
        );
        first
    }

    /// Join rentals with their vehicle, customer and agency names.
    pub fn describe(&self, rentals: Vec<Rental>) -> Vec<RentalDetails> {
        let unknown = || "?".to_string();
        rentals
            .into_iter()
            .map(|rental| {
                let vehicle = self.store.vehicle(rental.vehicle_id);
                RentalDetails {
                    plate: vehicle.as_ref().map(|v| v.plate.clone()).unwrap_or_else(unknown),
                    vehicle: vehicle
                        .map(|v| format!("{} {}", v.brand, v.model))
                        .unwrap_or_else(unknown),
                    customer: self
                        .store
                        .customer(rental.customer_id)
                        .map(|c| c.name)
                        .unwrap_or_else(unknown),
                    agency: self
                        .store
                        .agency(rental.agency_id)
                        .map(|a| a.name)
                        .unwrap_or_else(unknown),
                    rental,
                }
            })
            .collect()
    }

    fn rentals_with(&self, status: RentalStatus) -> Vec<Rental> {
        self.store
            .rentals()
            .into_iter()
            .filter(|r| r.status() == status)
            .collect()
    }
}
