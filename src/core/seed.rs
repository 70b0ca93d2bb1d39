//! Demo records for trying the application on an empty store.

use log::info;

use crate::core::error::RentalError;
use crate::core::model::{CustomerKind, Money};
use crate::core::rental::RentalEngine;
use crate::core::store::RecordStore;

const AGENCIES: &[(&str, &str, &str)] = &[
    ("Centro", "Av. Central, 100", "(11) 3000-0001"),
    ("Aeroporto", "Rod. do Aeroporto, km 3", "(11) 3000-0002"),
    ("Rodoviária", "Praça da Estação, 12", "(11) 3000-0003"),
    ("Zona Sul", "Rua das Palmeiras, 845", "(11) 3000-0004"),
    ("Litoral", "Av. Beira Mar, 2020", "(13) 3000-0005"),
];

/// (agency index, plate, model, brand, daily rate)
const VEHICLES: &[(usize, &str, &str, &str, &str)] = &[
    (0, "ABC1D23", "Onix", "Chevrolet", "119.90"),
    (0, "BRA2E19", "HB20", "Hyundai", "124.90"),
    (0, "QWE4R56", "Compass", "Jeep", "289.00"),
    (1, "RTY7U89", "Corolla", "Toyota", "249.90"),
    (1, "FGH1J23", "Kwid", "Renault", "99.90"),
    (2, "JKL4M56", "Argo", "Fiat", "109.90"),
    (3, "ZXC7V89", "T-Cross", "Volkswagen", "199.90"),
    (4, "MNB3V21", "Strada", "Fiat", "159.90"),
];

const CUSTOMERS: &[(CustomerKind, &str, &str, &str)] = &[
    (CustomerKind::Individual, "Ana Souza", "(11) 98888-1111", "123.456.789-09"),
    (CustomerKind::Individual, "Bruno Lima", "(11) 97777-2222", "987.654.321-00"),
    (CustomerKind::LegalEntity, "Transportes Rápidos Ltda", "(11) 3555-3333", "12.345.678/0001-90"),
];

/// Insert the demo records. Does nothing if the store already has data.
pub fn seed_demo_data<S: RecordStore>(engine: &mut RentalEngine<S>) -> Result<bool, RentalError> {
    let store = engine.store();
    if !store.agencies().is_empty() || !store.vehicles().is_empty() || !store.customers().is_empty() {
        info!("Store already has records, skipping demo data");
        return Ok(false);
    }

    let mut catalog = engine.catalog();
    let mut agency_ids = Vec::with_capacity(AGENCIES.len());
    for (name, address, phone) in AGENCIES {
        agency_ids.push(catalog.create_agency(name, address, phone)?.id);
    }
    for &(agency, plate, model, brand, rate) in VEHICLES {
        let rate = Money::parse(rate).unwrap_or_default();
        catalog.create_vehicle(plate, model, brand, agency_ids[agency], rate)?;
    }
    for &(kind, name, phone, document) in CUSTOMERS {
        catalog.create_customer(kind, name, phone, document)?;
    }

    info!(
        "Seeded {} agencies, {} vehicles, {} customers",
        AGENCIES.len(),
        VEHICLES.len(),
        CUSTOMERS.len()
    );
    Ok(true)
}
