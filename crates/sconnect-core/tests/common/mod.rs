//! Shared helpers for integration tests: an `AppCore` over a fresh
//! in-memory database plus a cast of actors.

#![allow(dead_code)]

use chrono::{Duration, NaiveDate, Utc};

use sconnect_core::domain::{Actor, Order, Role, ServiceRef};
use sconnect_core::services::AppCore;
use sconnect_db::{CoreFactory, setup_test_database};

pub const CUSTOMER: Actor = Actor::new(1, Role::Customer);
pub const OTHER_CUSTOMER: Actor = Actor::new(2, Role::Customer);
pub const TECH: Actor = Actor::new(10, Role::Technician);
pub const OTHER_TECH: Actor = Actor::new(11, Role::Technician);
pub const ADMIN: Actor = Actor::new(99, Role::Admin);

pub async fn core() -> AppCore {
    let pool = setup_test_database().await.expect("in-memory database");
    CoreFactory::build_app_core(pool)
}

pub fn service_ref() -> ServiceRef {
    ServiceRef {
        id: 1,
        name: "Plumbing Repair".to_string(),
        price: 80.0,
    }
}

pub fn tomorrow() -> NaiveDate {
    Utc::now().date_naive() + Duration::days(1)
}

/// Place an order for `customer` with valid defaults.
pub async fn place_order(core: &AppCore, customer: Actor) -> Order {
    core.orders()
        .create(customer.id, service_ref(), tomorrow(), "card", None)
        .await
        .expect("order created")
}

/// Place an order and bind `TECH` as its active technician.
pub async fn assigned_order(core: &AppCore) -> Order {
    let order = place_order(core, CUSTOMER).await;
    core.assignments()
        .assign(&order.id, TECH.id, ADMIN)
        .await
        .expect("technician assigned");
    core.orders().get(&order.id).await.expect("order readable")
}
