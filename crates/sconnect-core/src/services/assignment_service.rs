//! Assignment service - binds technicians to orders.

use std::sync::Arc;

use crate::domain::actor::{Actor, Role};
use crate::domain::assignment::Assignment;
use crate::events::OrderEvent;
use crate::ports::{AssignmentRepository, CoreError, OrderEventEmitter};

/// Service for technician assignment operations.
///
/// Assignment is an admin action (an auto-picking scheduler would act under
/// an admin identity). The repository enforces the single-active-assignment
/// invariant and the `Pending -> Assigned` bump transactionally; this layer
/// adds the role gate and event emission.
pub struct AssignmentService {
    assignments: Arc<dyn AssignmentRepository>,
    events: Arc<dyn OrderEventEmitter>,
}

impl AssignmentService {
    /// Create a new assignment service.
    pub fn new(
        assignments: Arc<dyn AssignmentRepository>,
        events: Arc<dyn OrderEventEmitter>,
    ) -> Self {
        Self {
            assignments,
            events,
        }
    }

    /// Assign a technician to an order, superseding any prior assignment.
    ///
    /// Fails with a conflict if the order is already `Completed` or
    /// `Cancelled`. Calling this on an already-assigned order reassigns it;
    /// the prior binding is retained as superseded.
    pub async fn assign(
        &self,
        order_id: &str,
        technician_id: i64,
        by: Actor,
    ) -> Result<Assignment, CoreError> {
        if by.role != Role::Admin {
            return Err(CoreError::Permission(format!(
                "role {} may not assign technicians",
                by.role
            )));
        }

        let assignment = self
            .assignments
            .assign(order_id, technician_id, by.id)
            .await?;

        tracing::info!(order_id, technician_id, assigned_by = by.id, "technician assigned");
        self.events.emit(OrderEvent::TechnicianAssigned {
            order_id: order_id.to_string(),
            technician_id,
        });
        Ok(assignment)
    }

    /// The active assignment for an order, if any.
    pub async fn active_assignment(
        &self,
        order_id: &str,
    ) -> Result<Option<Assignment>, CoreError> {
        self.assignments
            .active_assignment(order_id)
            .await
            .map_err(CoreError::from)
    }

    /// All assignments ever made for an order, newest first.
    pub async fn assignment_history(
        &self,
        order_id: &str,
    ) -> Result<Vec<Assignment>, CoreError> {
        self.assignments
            .assignment_history(order_id)
            .await
            .map_err(CoreError::from)
    }
}
