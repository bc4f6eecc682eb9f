//! Order domain types.
//!
//! An order is a customer's request for a catalog service. The service
//! catalog itself lives outside the core; an order carries an opaque
//! [`ServiceRef`] snapshot taken at booking time so that later catalog edits
//! do not rewrite history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::status::OrderStatus;

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Wallet,
}

impl PaymentMethod {
    /// Parse a payment method from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cash" => Some(Self::Cash),
            "card" => Some(Self::Card),
            "wallet" => Some(Self::Wallet),
            _ => None,
        }
    }

    /// Convert payment method to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Wallet => "wallet",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of the catalog service an order was placed against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRef {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

/// A service order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer_id: i64,
    pub service: ServiceRef,
    pub requested_date: NaiveDate,
    pub payment_method: PaymentMethod,
    /// Free-text special instructions from the customer.
    pub notes: Option<String>,
    pub status: OrderStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new order. Status always starts at `Pending`.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub id: String,
    pub customer_id: i64,
    pub service: ServiceRef,
    pub requested_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}
