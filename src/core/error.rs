use std::fmt;

use uuid::Uuid;

use crate::core::model::{Timestamp, VehicleStatus};
use crate::core::store::StoreError;

/// Which kind of record a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Agency,
    Vehicle,
    Customer,
    Rental,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Agency => "agency",
            RecordKind::Vehicle => "vehicle",
            RecordKind::Customer => "customer",
            RecordKind::Rental => "rental",
        };
        f.write_str(name)
    }
}

/// Errors returned by the rental engine and the catalog.
///
/// All of these are expected conditions: the screen that triggered the
/// operation shows the message and lets the operator try again.
#[derive(Debug)]
pub enum RentalError {
    /// A referenced record does not exist.
    NotFound { kind: RecordKind, id: Uuid },
    /// The vehicle cannot be rented in its current status.
    VehicleUnavailable { plate: String, status: VehicleStatus },
    /// The vehicle is not part of the agency's fleet.
    InvalidAgencyAssignment { plate: String, agency_id: Uuid },
    /// The rental was already closed.
    AlreadyClosed(Uuid),
    /// The end timestamp is before the rental start.
    InvalidTimeRange { start: Timestamp, end: Timestamp },
    /// Another vehicle already uses this plate.
    DuplicatePlate(String),
    /// The vehicle is rented and cannot be changed administratively.
    VehicleInUse(String),
    /// The vehicle appears in rental history and cannot be deleted.
    VehicleHasRentals(String),
    /// A required field was left blank.
    MissingField(&'static str),
    /// The persistence collaborator failed to write.
    Store(StoreError),
}

impl RentalError {
    pub fn not_found(kind: RecordKind, id: Uuid) -> Self {
        RentalError::NotFound { kind, id }
    }
}

impl fmt::Display for RentalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RentalError::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            RentalError::VehicleUnavailable { plate, status } => {
                write!(f, "vehicle {plate} is {status} and cannot be rented")
            }
            RentalError::InvalidAgencyAssignment { plate, agency_id } => {
                write!(f, "vehicle {plate} does not belong to agency {agency_id}")
            }
            RentalError::AlreadyClosed(id) => write!(f, "rental {id} is already closed"),
            RentalError::InvalidTimeRange { start, end } => write!(
                f,
                "end {} is before start {}",
                end.format("%Y-%m-%d %H:%M"),
                start.format("%Y-%m-%d %H:%M")
            ),
            RentalError::DuplicatePlate(plate) => write!(f, "plate {plate} is already registered"),
            RentalError::VehicleInUse(plate) => write!(f, "vehicle {plate} is currently rented"),
            RentalError::VehicleHasRentals(plate) => {
                write!(f, "vehicle {plate} has rental history and cannot be deleted")
            }
            RentalError::MissingField(field) => write!(f, "{field} is required"),
            RentalError::Store(e) => write!(f, "storage error: {e}"),
        }
    }
}

impl std::error::Error for RentalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RentalError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for RentalError {
    fn from(e: StoreError) -> Self {
        RentalError::Store(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_single_line() {
        let errors = [
            RentalError::not_found(RecordKind::Vehicle, Uuid::nil()),
            RentalError::VehicleUnavailable {
                plate: "ABC1D23".into(),
                status: VehicleStatus::Rented,
            },
            RentalError::AlreadyClosed(Uuid::nil()),
            RentalError::MissingField("name"),
            RentalError::Store(StoreError::Corrupt("bad".into())),
        ];
        for e in errors {
            assert!(!e.to_string().contains('\n'), "{e}");
        }
    }

    #[test]
    fn test_not_found_names_the_record_kind() {
        let e = RentalError::not_found(RecordKind::Customer, Uuid::nil());
        assert!(e.to_string().starts_with("customer not found"));
    }
}
