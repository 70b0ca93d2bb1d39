//! # Catalog
//!
//! Administration of agencies, customers and vehicles: creation, lookups,
//! deletion and the maintenance flag that takes a vehicle out of the rentable fleet.
//!
//! The catalog never moves a vehicle into or out of `Rented`; that edge is
//! owned by [`RentalEngine`](crate::core::rental::RentalEngine).

use log::info;
use uuid::Uuid;

use crate::core::error::{RecordKind, RentalError};
use crate::core::model::{Agency, Customer, CustomerKind, Money, Vehicle, VehicleStatus};
use crate::core::store::{RecordStore, WriteBatch};

pub struct Catalog<'a, S> {
    store: &'a mut S,
}

/// Trimmed `value`, or `MissingField(field)` if it is blank.
fn required(value: &str, field: &'static str) -> Result<String, RentalError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(RentalError::MissingField(field));
    }
    Ok(value.to_string())
}

impl<'a, S: RecordStore> Catalog<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    pub fn create_agency(
        &mut self,
        name: &str,
        address: &str,
        phone: &str,
    ) -> Result<Agency, RentalError> {
        let agency = Agency {
            id: Uuid::new_v4(),
            name: required(name, "name")?,
            address: required(address, "address")?,
            phone: required(phone, "phone")?,
        };
        self.store.commit(WriteBatch::new().agency(agency.clone()))?;
        info!("Created agency {} ({})", agency.name, agency.id);
        Ok(agency)
    }

    pub fn create_customer(
        &mut self,
        kind: CustomerKind,
        name: &str,
        phone: &str,
        document: &str,
    ) -> Result<Customer, RentalError> {
        let customer = Customer {
            id: Uuid::new_v4(),
            kind,
            document: required(document, kind.document_label())?,
            name: required(name, "name")?,
            phone: required(phone, "phone")?,
        };
        self.store
            .commit(WriteBatch::new().customer(customer.clone()))?;
        info!("Created customer {} ({})", customer.name, customer.id);
        Ok(customer)
    }

    /// Register a vehicle with `agency_id`. New vehicles start available.
    pub fn create_vehicle(
        &mut self,
        plate: &str,
        model: &str,
        brand: &str,
        agency_id: Uuid,
        daily_rate: Money,
    ) -> Result<Vehicle, RentalError> {
        let plate = required(plate, "plate")?.to_uppercase();
        if self.find_vehicle_by_plate(&plate).is_some() {
            return Err(RentalError::DuplicatePlate(plate));
        }
        self.store
            .agency(agency_id)
            .ok_or(RentalError::not_found(RecordKind::Agency, agency_id))?;

        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            plate,
            model: required(model, "model")?,
            brand: required(brand, "brand")?,
            agency_id,
            daily_rate,
            status: VehicleStatus::Available,
        };
        self.store.commit(WriteBatch::new().vehicle(vehicle.clone()))?;
        info!("Registered vehicle {} ({})", vehicle.plate, vehicle.id);
        Ok(vehicle)
    }

    /// Take an available vehicle out of service.
    pub fn set_vehicle_unavailable(&mut self, id: Uuid) -> Result<Vehicle, RentalError> {
        self.set_service_status(id, VehicleStatus::Unavailable)
    }

    /// Return an out-of-service vehicle to the fleet.
    pub fn set_vehicle_available(&mut self, id: Uuid) -> Result<Vehicle, RentalError> {
        self.set_service_status(id, VehicleStatus::Available)
    }

    fn set_service_status(&mut self, id: Uuid, status: VehicleStatus) -> Result<Vehicle, RentalError> {
        let mut vehicle = self.rentable_vehicle(id)?;
        if vehicle.status == status {
            return Ok(vehicle);
        }
        vehicle.status = status;
        self.store.commit(WriteBatch::new().vehicle(vehicle.clone()))?;
        info!("Vehicle {} is now {}", vehicle.plate, status);
        Ok(vehicle)
    }

    /// Remove a vehicle that has never been rented. Vehicles with rental
    /// history stay, so closed rentals keep pointing at a real record.
    pub fn delete_vehicle(&mut self, id: Uuid) -> Result<Vehicle, RentalError> {
        let vehicle = self.rentable_vehicle(id)?;
        if self.store.rentals().iter().any(|r| r.vehicle_id == id) {
            return Err(RentalError::VehicleHasRentals(vehicle.plate));
        }
        self.store.commit(WriteBatch::new().remove_vehicle(id))?;
        info!("Deleted vehicle {} ({})", vehicle.plate, vehicle.id);
        Ok(vehicle)
    }

    /// The vehicle with `id`, as long as it is not rented.
    fn rentable_vehicle(&self, id: Uuid) -> Result<Vehicle, RentalError> {
        let vehicle = self
            .store
            .vehicle(id)
            .ok_or(RentalError::not_found(RecordKind::Vehicle, id))?;
        if vehicle.status == VehicleStatus::Rented {
            return Err(RentalError::VehicleInUse(vehicle.plate));
        }
        Ok(vehicle)
    }

    pub fn find_vehicle_by_plate(&self, plate: &str) -> Option<Vehicle> {
        let plate = plate.trim();
        self.store
            .vehicles()
            .into_iter()
            .find(|v| v.plate.eq_ignore_ascii_case(plate))
    }

    pub fn find_vehicles_by_agency(&self, agency_id: Uuid) -> Vec<Vehicle> {
        self.store
            .vehicles()
            .into_iter()
            .filter(|v| v.agency_id == agency_id)
            .collect()
    }
}
