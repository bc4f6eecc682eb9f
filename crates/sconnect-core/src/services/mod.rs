//! Core services - thin orchestrators over the port traits.
//!
//! Services hold the business rules that span ports (validation, permission
//! checks, event emission) and delegate every atomic write to a single
//! repository method.

mod app_core;
mod assignment_service;
mod notification_service;
mod order_service;
mod thread_service;

pub use app_core::AppCore;
pub use assignment_service::AssignmentService;
pub use notification_service::NotificationService;
pub use order_service::OrderService;
pub use thread_service::ThreadService;
