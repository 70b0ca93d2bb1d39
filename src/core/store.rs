//! # Record Store
//!
//! The persistence seam between the engines and wherever records live.
//!
//! Engines read through lookups and listings, and write through
//! [`RecordStore::commit`], which applies a [`WriteBatch`] as one unit:
//! either every write lands or none does.
//!
//! Two implementations:
//! - [`MemoryStore`]: Vec-backed, listings keep insertion order.
//! - [`JsonStore`]: a `MemoryStore` mirrored to a single JSON file. Every
//!   commit rewrites the file atomically (`.tmp` + `rename()`), and rolls the
//!   in-memory state back if the write fails.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::model::{Agency, Customer, Rental, Vehicle, VehicleStatus};

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Serialize(serde_json::Error),
    /// The persisted data breaks a record invariant.
    Corrupt(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
            StoreError::Serialize(e) => write!(f, "serialization error: {e}"),
            StoreError::Corrupt(msg) => write!(f, "corrupt data: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Serialize(e) => Some(e),
            StoreError::Corrupt(_) => None,
        }
    }
}

// ============================================================================
// Contract
// ============================================================================

/// A group of record writes applied together.
///
/// Records whose id already exists replace the stored copy in place;
/// new ids are appended.
#[derive(Debug, Default, Clone)]
pub struct WriteBatch {
    pub agencies: Vec<Agency>,
    pub customers: Vec<Customer>,
    pub vehicles: Vec<Vehicle>,
    pub rentals: Vec<Rental>,
    pub removed_vehicles: Vec<Uuid>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn agency(mut self, agency: Agency) -> Self {
        self.agencies.push(agency);
        self
    }

    pub fn customer(mut self, customer: Customer) -> Self {
        self.customers.push(customer);
        self
    }

    pub fn vehicle(mut self, vehicle: Vehicle) -> Self {
        self.vehicles.push(vehicle);
        self
    }

    pub fn rental(mut self, rental: Rental) -> Self {
        self.rentals.push(rental);
        self
    }

    pub fn remove_vehicle(mut self, id: Uuid) -> Self {
        self.removed_vehicles.push(id);
        self
    }

    pub fn len(&self) -> usize {
        self.agencies.len()
            + self.customers.len()
            + self.vehicles.len()
            + self.rentals.len()
            + self.removed_vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read/write access to the business records.
///
/// Lookups signal absence with `None`. Listings return records in the order
/// they were first stored.
pub trait RecordStore {
    fn agency(&self, id: Uuid) -> Option<Agency>;
    fn customer(&self, id: Uuid) -> Option<Customer>;
    fn vehicle(&self, id: Uuid) -> Option<Vehicle>;
    fn rental(&self, id: Uuid) -> Option<Rental>;

    fn agencies(&self) -> Vec<Agency>;
    fn customers(&self) -> Vec<Customer>;
    fn vehicles(&self) -> Vec<Vehicle>;
    fn rentals(&self) -> Vec<Rental>;

    /// Apply every write in `batch`, or none of them.
    fn commit(&mut self, batch: WriteBatch) -> Result<(), StoreError>;
}

/// Lets the engine run over any boxed store.
impl RecordStore for Box<dyn RecordStore> {
    fn agency(&self, id: Uuid) -> Option<Agency> {
        (**self).agency(id)
    }

    fn customer(&self, id: Uuid) -> Option<Customer> {
        (**self).customer(id)
    }

    fn vehicle(&self, id: Uuid) -> Option<Vehicle> {
        (**self).vehicle(id)
    }

    fn rental(&self, id: Uuid) -> Option<Rental> {
        (**self).rental(id)
    }

    fn agencies(&self) -> Vec<Agency> {
        (**self).agencies()
    }

    fn customers(&self) -> Vec<Customer> {
        (**self).customers()
    }

    fn vehicles(&self) -> Vec<Vehicle> {
        (**self).vehicles()
    }

    fn rentals(&self) -> Vec<Rental> {
        (**self).rentals()
    }

    fn commit(&mut self, batch: WriteBatch) -> Result<(), StoreError> {
        (**self).commit(batch)
    }
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    agencies: Vec<Agency>,
    #[serde(default)]
    customers: Vec<Customer>,
    #[serde(default)]
    vehicles: Vec<Vehicle>,
    #[serde(default)]
    rentals: Vec<Rental>,
}

/// Insert or replace by id, keeping the original position on replace.
fn upsert<T>(records: &mut Vec<T>, record: T, id_of: impl Fn(&T) -> Uuid) {
    let id = id_of(&record);
    match records.iter_mut().find(|r| id_of(r) == id) {
        Some(slot) => *slot = record,
        None => records.push(record),
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.agencies.is_empty()
            && self.customers.is_empty()
            && self.vehicles.is_empty()
            && self.rentals.is_empty()
    }

    fn apply(&mut self, batch: WriteBatch) {
        for agency in batch.agencies {
            upsert(&mut self.agencies, agency, |a| a.id);
        }
        for customer in batch.customers {
            upsert(&mut self.customers, customer, |c| c.id);
        }
        for vehicle in batch.vehicles {
            upsert(&mut self.vehicles, vehicle, |v| v.id);
        }
        for rental in batch.rentals {
            upsert(&mut self.rentals, rental, |r| r.id);
        }
        if !batch.removed_vehicles.is_empty() {
            self.vehicles
                .retain(|v| !batch.removed_vehicles.contains(&v.id));
        }
    }

    /// Check the cross-record invariants of a loaded snapshot.
    ///
    /// - every rental has `end`/`charge` consistent with its status
    /// - a vehicle has at most one open rental, and is RENTED iff it has one
    /// - plates are unique
    pub fn validate(&self) -> Result<(), StoreError> {
        let mut open_vehicles = HashSet::new();
        for rental in &self.rentals {
            if !rental.is_consistent() {
                return Err(StoreError::Corrupt(format!(
                    "rental {} has end/charge inconsistent with its status",
                    rental.id
                )));
            }
            if rental.is_open() && !open_vehicles.insert(rental.vehicle_id) {
                return Err(StoreError::Corrupt(format!(
                    "vehicle {} has more than one open rental",
                    rental.vehicle_id
                )));
            }
        }

        let mut plates = HashSet::new();
        for vehicle in &self.vehicles {
            if !plates.insert(vehicle.plate.to_lowercase()) {
                return Err(StoreError::Corrupt(format!(
                    "plate {} is used by more than one vehicle",
                    vehicle.plate
                )));
            }
            let rented = vehicle.status == VehicleStatus::Rented;
            if rented != open_vehicles.contains(&vehicle.id) {
                return Err(StoreError::Corrupt(format!(
                    "vehicle {} status {} disagrees with its rentals",
                    vehicle.plate, vehicle.status
                )));
            }
        }
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn agency(&self, id: Uuid) -> Option<Agency> {
        self.agencies.iter().find(|a| a.id == id).cloned()
    }

    fn customer(&self, id: Uuid) -> Option<Customer> {
        self.customers.iter().find(|c| c.id == id).cloned()
    }

    fn vehicle(&self, id: Uuid) -> Option<Vehicle> {
        self.vehicles.iter().find(|v| v.id == id).cloned()
    }

    fn rental(&self, id: Uuid) -> Option<Rental> {
        self.rentals.iter().find(|r| r.id == id).cloned()
    }

    fn agencies(&self) -> Vec<Agency> {
        self.agencies.clone()
    }

    fn customers(&self) -> Vec<Customer> {
        self.customers.clone()
    }

    fn vehicles(&self) -> Vec<Vehicle> {
        self.vehicles.clone()
    }

    fn rentals(&self) -> Vec<Rental> {
        self.rentals.clone()
    }

    fn commit(&mut self, batch: WriteBatch) -> Result<(), StoreError> {
        debug!("Applying batch of {} writes in memory", batch.len());
        self.apply(batch);
        Ok(())
    }
}

// ============================================================================
// JSON file store
// ============================================================================

#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    records: MemoryStore,
}

impl JsonStore {
    /// Open the store at `path`. A missing file starts an empty store; the
    /// file is created on the first commit.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = if path.exists() {
            let json = fs::read_to_string(&path).map_err(StoreError::Io)?;
            let records: MemoryStore =
                serde_json::from_str(&json).map_err(StoreError::Serialize)?;
            records.validate()?;
            info!(
                "Loaded {} agencies, {} vehicles, {} customers, {} rentals from {}",
                records.agencies.len(),
                records.vehicles.len(),
                records.customers.len(),
                records.rentals.len(),
                path.display()
            );
            records
        } else {
            info!("No data file at {}, starting empty", path.display());
            MemoryStore::new()
        };
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(StoreError::Io)?;
    }
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data).map_err(StoreError::Serialize)?;
    fs::write(&tmp_path, json).map_err(StoreError::Io)?;
    fs::rename(&tmp_path, path).map_err(StoreError::Io)?;
    Ok(())
}

impl RecordStore for JsonStore {
    fn agency(&self, id: Uuid) -> Option<Agency> {
        self.records.agency(id)
    }

    fn customer(&self, id: Uuid) -> Option<Customer> {
        self.records.customer(id)
    }

    fn vehicle(&self, id: Uuid) -> Option<Vehicle> {
        self.records.vehicle(id)
    }

    fn rental(&self, id: Uuid) -> Option<Rental> {
        self.records.rental(id)
    }

    fn agencies(&self) -> Vec<Agency> {
        self.records.agencies()
    }

    fn customers(&self) -> Vec<Customer> {
        self.records.customers()
    }

    fn vehicles(&self) -> Vec<Vehicle> {
        self.records.vehicles()
    }

    fn rentals(&self) -> Vec<Rental> {
        self.records.rentals()
    }

    fn commit(&mut self, batch: WriteBatch) -> Result<(), StoreError> {
        let snapshot = self.records.clone();
        self.records.apply(batch);
        if let Err(e) = atomic_write_json(&self.path, &self.records) {
            warn!("Failed to persist {}: {}", self.path.display(), e);
            self.records = snapshot;
            return Err(e);
        }
        debug!("Persisted records to {}", self.path.display());
        Ok(())
    }
}
