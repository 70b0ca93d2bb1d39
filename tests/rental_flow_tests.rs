use chrono::{DateTime, Duration, TimeZone, Utc};
use rentdesk::core::billing::BillingPolicy;
use rentdesk::core::error::RentalError;
use rentdesk::core::flow::{FlowController, FlowStatus, Screen, Transition};
use rentdesk::core::listing::{ListError, ListView, Select};
use rentdesk::core::model::{Agency, CustomerKind, Money, RentalStatus, VehicleStatus};
use rentdesk::core::rental::RentalEngine;
use rentdesk::core::store::{JsonStore, MemoryStore, RecordStore};
use uuid::Uuid;

// ============================================================================
// Helper Functions
// ============================================================================

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap()
}

struct Desk<S> {
    engine: RentalEngine<S>,
    agency: Uuid,
    vehicle: Uuid,
    customer: Uuid,
    second_customer: Uuid,
}

/// One agency with one vehicle at 50.00/day and two customers.
fn desk<S: RecordStore>(store: S) -> Desk<S> {
    let mut engine = RentalEngine::new(store, BillingPolicy::default());
    let mut catalog = engine.catalog();
    let agency = catalog
        .create_agency("Downtown", "1 Main St", "555-0100")
        .unwrap();
    let vehicle = catalog
        .create_vehicle("abc1d23", "Onix", "Chevrolet", agency.id, Money::from_cents(5000))
        .unwrap();
    let customer = catalog
        .create_customer(CustomerKind::Individual, "Ana", "555-0111", "123.456.789-00")
        .unwrap();
    let second_customer = catalog
        .create_customer(CustomerKind::LegalEntity, "Acme", "555-0122", "12.345.678/0001-90")
        .unwrap();
    Desk {
        engine,
        agency: agency.id,
        vehicle: vehicle.id,
        customer: customer.id,
        second_customer: second_customer.id,
    }
}

fn open_count<S: RecordStore>(engine: &RentalEngine<S>, vehicle: Uuid) -> usize {
    engine
        .list_open_rentals()
        .iter()
        .filter(|r| r.vehicle_id == vehicle)
        .count()
}

// ============================================================================
// Rental Lifecycle
// ============================================================================

#[test]
fn test_rent_refuse_and_return_scenario() {
    let Desk {
        mut engine,
        agency,
        vehicle,
        customer,
        second_customer,
    } = desk(MemoryStore::new());

    let rental = engine.open_rental(vehicle, customer, agency, t0()).unwrap();
    assert_eq!(
        engine.store().vehicle(vehicle).unwrap().status,
        VehicleStatus::Rented
    );

    let err = engine
        .open_rental(vehicle, second_customer, agency, t0() + Duration::hours(1))
        .unwrap_err();
    assert!(matches!(err, RentalError::VehicleUnavailable { .. }));
    assert_eq!(open_count(&engine, vehicle), 1);

    let closed = engine
        .close_rental(rental.id, t0() + Duration::days(3))
        .unwrap();
    assert_eq!(closed.status(), RentalStatus::Closed);
    assert_eq!(closed.charge(), Some(Money::from_cents(15_000)));
    assert_eq!(
        engine.store().vehicle(vehicle).unwrap().status,
        VehicleStatus::Available
    );
    assert_eq!(open_count(&engine, vehicle), 0);
}

#[test]
fn test_second_close_fails_and_keeps_record() {
    let Desk {
        mut engine,
        agency,
        vehicle,
        customer,
        ..
    } = desk(MemoryStore::new());
    let rental = engine.open_rental(vehicle, customer, agency, t0()).unwrap();
    let closed = engine
        .close_rental(rental.id, t0() + Duration::days(1))
        .unwrap();

    let err = engine
        .close_rental(rental.id, t0() + Duration::days(9))
        .unwrap_err();
    assert!(matches!(err, RentalError::AlreadyClosed(id) if id == rental.id));
    assert_eq!(engine.store().rental(rental.id).unwrap(), closed);
}

#[test]
fn test_vehicle_can_be_rented_again_after_return() {
    let Desk {
        mut engine,
        agency,
        vehicle,
        customer,
        second_customer,
    } = desk(MemoryStore::new());
    let first = engine.open_rental(vehicle, customer, agency, t0()).unwrap();
    engine
        .close_rental(first.id, t0() + Duration::days(1))
        .unwrap();
    engine
        .open_rental(vehicle, second_customer, agency, t0() + Duration::days(2))
        .unwrap();

    assert_eq!(open_count(&engine, vehicle), 1);
    assert_eq!(engine.list_closed_rentals().len(), 1);
    assert!(engine.find_available_vehicles(Some(agency)).is_empty());
}

#[test]
fn test_charge_never_decreases_with_later_return() {
    let Desk {
        mut engine,
        agency,
        vehicle,
        customer,
        ..
    } = desk(MemoryStore::new());
    let rental = engine.open_rental(vehicle, customer, agency, t0()).unwrap();
    let car = engine.store().vehicle(vehicle).unwrap();

    let mut previous = Money::default();
    for hours in 0..(24 * 6) {
        let charge = engine.quote(&rental, &car, t0() + Duration::hours(hours));
        assert!(charge >= previous, "charge dropped at {hours}h");
        previous = charge;
    }
    assert_eq!(previous, Money::from_cents(30_000));
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_json_store_keeps_rentals_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("rentdesk.json");

    let (rental_id, vehicle) = {
        let Desk {
            mut engine,
            agency,
            vehicle,
            customer,
            ..
        } = desk(JsonStore::open(&path).unwrap());
        let rental = engine.open_rental(vehicle, customer, agency, t0()).unwrap();
        (rental.id, vehicle)
    };

    let mut engine = RentalEngine::new(JsonStore::open(&path).unwrap(), BillingPolicy::default());
    assert_eq!(
        engine.store().vehicle(vehicle).unwrap().status,
        VehicleStatus::Rented
    );
    let closed = engine
        .close_rental(rental_id, t0() + Duration::days(2))
        .unwrap();
    assert_eq!(closed.charge(), Some(Money::from_cents(10_000)));

    let reopened = JsonStore::open(&path).unwrap();
    assert_eq!(
        reopened.rental(rental_id).unwrap().status(),
        RentalStatus::Closed
    );
    assert_eq!(
        reopened.vehicle(vehicle).unwrap().status,
        VehicleStatus::Available
    );
}

// ============================================================================
// Lists
// ============================================================================

fn five_agencies() -> Vec<Agency> {
    ["Centro", "Aeroporto", "Rodoviária", "Centro Sul", "Praia"]
        .into_iter()
        .map(|name| Agency {
            id: Uuid::new_v4(),
            name: name.to_string(),
            address: "-".to_string(),
            phone: "-".to_string(),
        })
        .collect()
}

fn page_names(list: &ListView<Agency, Select>) -> Vec<String> {
    list.current_page()
        .iter()
        .map(|(_, a)| a.name.clone())
        .collect()
}

#[test]
fn test_five_agencies_in_pages_of_two() {
    let mut list: ListView<Agency, Select> = ListView::new(five_agencies(), 2);
    list.previous_page();
    assert_eq!(page_names(&list), ["Centro", "Aeroporto"]);
    list.next_page();
    assert_eq!(page_names(&list), ["Rodoviária", "Centro Sul"]);
    list.next_page();
    assert_eq!(page_names(&list), ["Praia"]);
    list.next_page();
    assert_eq!(list.page_index(), 2);
}

#[test]
fn test_impossible_filter_keeps_everything_selectable() {
    let mut list: ListView<Agency, Select> = ListView::new(five_agencies(), 2);
    assert!(matches!(
        list.apply_filter("zz-impossible-zz"),
        Err(ListError::NoMatches(_))
    ));
    assert_eq!(list.len(), 5);
    assert_eq!(list.select_by_ordinal(5).unwrap().name, "Praia");
}

// ============================================================================
// Navigation
// ============================================================================

/// Records the order screens ran in and follows a scripted transition.
struct Step {
    name: &'static str,
    next: Option<Transition<Vec<&'static str>>>,
}

impl Screen<Vec<&'static str>> for Step {
    fn name(&self) -> &str {
        self.name
    }

    fn run(&mut self, visited: &mut Vec<&'static str>) -> Transition<Vec<&'static str>> {
        visited.push(self.name);
        self.next.take().unwrap_or(Transition::Back)
    }
}

fn step(name: &'static str, next: Transition<Vec<&'static str>>) -> Box<Step> {
    Box::new(Step {
        name,
        next: Some(next),
    })
}

#[test]
fn test_menu_drill_down_and_back_out() {
    let rentals = step("rentals", Transition::Push(step("new-rental", Transition::Back)));
    let mut flow = FlowController::new(step("main", Transition::Push(rentals)));
    let mut visited = Vec::new();

    flow.run(&mut visited);

    assert_eq!(visited, ["main", "rentals", "new-rental", "rentals", "main"]);
    assert_eq!(flow.status(), FlowStatus::Finished);
    assert_eq!(flow.depth(), 0);
}
