//! Row mapping helpers for `SQLite` queries.
//!
//! Mappers return a plain `String` error; each repository wraps it into its
//! own `Database` variant.

use chrono::NaiveDate;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use sconnect_core::domain::{
    Assignment, Order, OrderStatus, PaymentMethod, Role, ServiceRef, ThreadMessage,
    TransitionEvent,
};

/// Shared SELECT column list for order queries.
pub const ORDER_SELECT_COLUMNS: &str = "id, customer_id, service_id, service_name, price, \
     requested_date, payment_method, notes, status, created_at, updated_at";

fn get<'r, T>(row: &'r SqliteRow, column: &str) -> Result<T, String>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column).map_err(|e| e.to_string())
}

/// Parse a database row into an [`Order`].
pub fn row_to_order(row: &SqliteRow) -> Result<Order, String> {
    let status_str: String = get(row, "status")?;
    let status = OrderStatus::parse(&status_str)
        .ok_or_else(|| format!("invalid order status: {status_str}"))?;

    let payment_str: String = get(row, "payment_method")?;
    let payment_method = PaymentMethod::parse(&payment_str)
        .ok_or_else(|| format!("invalid payment method: {payment_str}"))?;

    Ok(Order {
        id: get(row, "id")?,
        customer_id: get(row, "customer_id")?,
        service: ServiceRef {
            id: get(row, "service_id")?,
            name: get(row, "service_name")?,
            price: get(row, "price")?,
        },
        requested_date: get::<NaiveDate>(row, "requested_date")?,
        payment_method,
        notes: get(row, "notes")?,
        status,
        created_at: get(row, "created_at")?,
        updated_at: get(row, "updated_at")?,
    })
}

/// Parse a database row into an [`Assignment`].
pub fn row_to_assignment(row: &SqliteRow) -> Result<Assignment, String> {
    Ok(Assignment {
        id: get(row, "id")?,
        order_id: get(row, "order_id")?,
        technician_id: get(row, "technician_id")?,
        assigned_by: get(row, "assigned_by")?,
        assigned_at: get(row, "assigned_at")?,
        superseded_at: get(row, "superseded_at")?,
    })
}

/// Parse a database row into a [`ThreadMessage`].
pub fn row_to_message(row: &SqliteRow) -> Result<ThreadMessage, String> {
    let role_str: String = get(row, "sender_role")?;
    let sender_role =
        Role::parse(&role_str).ok_or_else(|| format!("invalid sender role: {role_str}"))?;

    Ok(ThreadMessage {
        id: get(row, "id")?,
        order_id: get(row, "order_id")?,
        sender_id: get(row, "sender_id")?,
        sender_role,
        body: get(row, "body")?,
        sent_at: get(row, "sent_at")?,
    })
}

/// Parse a database row into a [`TransitionEvent`].
pub fn row_to_transition(row: &SqliteRow) -> Result<TransitionEvent, String> {
    let from_str: String = get(row, "from_status")?;
    let from = OrderStatus::parse(&from_str)
        .ok_or_else(|| format!("invalid order status: {from_str}"))?;
    let to_str: String = get(row, "to_status")?;
    let to =
        OrderStatus::parse(&to_str).ok_or_else(|| format!("invalid order status: {to_str}"))?;

    Ok(TransitionEvent {
        id: get(row, "id")?,
        order_id: get(row, "order_id")?,
        from,
        to,
        actor_id: get(row, "actor_id")?,
        occurred_at: get(row, "occurred_at")?,
    })
}
