//! `AppCore` - the primary application facade.
//!
//! This is the composition root for core services. Adapters receive an
//! `AppCore` instance and use it to access all functionality.

use std::sync::Arc;

use crate::ports::{NoopEmitter, OrderEventEmitter, Repos};

use super::{AssignmentService, NotificationService, OrderService, ThreadService};

/// The core application facade.
///
/// `AppCore` provides access to all core services. It's constructed at the
/// adapter's composition root with concrete repository implementations.
///
/// # Example
///
/// ```ignore
/// let pool = setup_database(&db_path).await?;
/// let core = CoreFactory::build_app_core(pool);
///
/// let order = core.orders().get(&order_id).await?;
/// ```
pub struct AppCore {
    orders: OrderService,
    assignments: AssignmentService,
    thread: ThreadService,
    notifications: NotificationService,
}

impl AppCore {
    /// Create a new `AppCore` with the given repositories and no event
    /// listener.
    pub fn new(repos: Repos) -> Self {
        Self::with_events(repos, Arc::new(NoopEmitter::new()))
    }

    /// Create a new `AppCore` that emits lifecycle events through `events`.
    pub fn with_events(repos: Repos, events: Arc<dyn OrderEventEmitter>) -> Self {
        Self {
            orders: OrderService::new(
                repos.orders.clone(),
                repos.assignments.clone(),
                events.clone(),
            ),
            assignments: AssignmentService::new(repos.assignments.clone(), events.clone()),
            thread: ThreadService::new(
                repos.orders.clone(),
                repos.assignments.clone(),
                repos.thread.clone(),
                events,
            ),
            notifications: NotificationService::new(repos.orders, repos.thread),
        }
    }

    /// Access the order service.
    pub const fn orders(&self) -> &OrderService {
        &self.orders
    }

    /// Access the assignment service.
    pub const fn assignments(&self) -> &AssignmentService {
        &self.assignments
    }

    /// Access the thread service.
    pub const fn thread(&self) -> &ThreadService {
        &self.thread
    }

    /// Access the notification service.
    pub const fn notifications(&self) -> &NotificationService {
        &self.notifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Actor, Assignment, NewOrder, NewThreadMessage, Order, OrderStatus, PaymentMethod,
        ReadCursor, Role, ServiceRef, ThreadMessage, TransitionEvent,
    };
    use crate::events::OrderEvent;
    use crate::ports::{
        AssignmentError, AssignmentRepository, CoreError, OrderRepository, OrderStoreError,
        ThreadError, ThreadRepository,
    };
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use std::sync::Mutex;

    fn sample_order(status: OrderStatus) -> Order {
        Order {
            id: "order-1".to_string(),
            customer_id: 1,
            service: ServiceRef {
                id: 10,
                name: "Plumbing Repair".to_string(),
                price: 80.0,
            },
            requested_date: Utc::now().date_naive(),
            payment_method: PaymentMethod::Card,
            notes: None,
            status,
            created_at: "2025-06-01 10:00:00".to_string(),
            updated_at: "2025-06-01 10:00:00".to_string(),
        }
    }

    /// In-memory order repo holding at most one order.
    struct MockOrderRepo {
        order: Option<Order>,
    }

    #[async_trait]
    impl OrderRepository for MockOrderRepo {
        async fn insert(&self, order: NewOrder) -> Result<Order, OrderStoreError> {
            Ok(Order {
                id: order.id,
                customer_id: order.customer_id,
                service: order.service,
                requested_date: order.requested_date,
                payment_method: order.payment_method,
                notes: order.notes,
                status: OrderStatus::Pending,
                created_at: "2025-06-01 10:00:00".to_string(),
                updated_at: "2025-06-01 10:00:00".to_string(),
            })
        }

        async fn get(&self, order_id: &str) -> Result<Option<Order>, OrderStoreError> {
            Ok(self.order.clone().filter(|o| o.id == order_id))
        }

        async fn list_for(&self, _actor: Actor) -> Result<Vec<Order>, OrderStoreError> {
            Ok(self.order.clone().into_iter().collect())
        }

        async fn apply_transition(
            &self,
            order_id: &str,
            _from: OrderStatus,
            to: OrderStatus,
            _actor_id: i64,
        ) -> Result<Order, OrderStoreError> {
            let mut order = self
                .order
                .clone()
                .filter(|o| o.id == order_id)
                .ok_or_else(|| OrderStoreError::OrderNotFound(order_id.to_string()))?;
            order.status = to;
            Ok(order)
        }

        async fn transition_history(
            &self,
            _order_id: &str,
        ) -> Result<Vec<TransitionEvent>, OrderStoreError> {
            Ok(Vec::new())
        }
    }

    struct MockAssignmentRepo {
        active: Option<Assignment>,
    }

    #[async_trait]
    impl AssignmentRepository for MockAssignmentRepo {
        async fn assign(
            &self,
            order_id: &str,
            technician_id: i64,
            assigned_by: i64,
        ) -> Result<Assignment, AssignmentError> {
            Ok(Assignment {
                id: 1,
                order_id: order_id.to_string(),
                technician_id,
                assigned_by,
                assigned_at: "2025-06-01 10:00:00".to_string(),
                superseded_at: None,
            })
        }

        async fn active_assignment(
            &self,
            _order_id: &str,
        ) -> Result<Option<Assignment>, AssignmentError> {
            Ok(self.active.clone())
        }

        async fn assignment_history(
            &self,
            _order_id: &str,
        ) -> Result<Vec<Assignment>, AssignmentError> {
            Ok(self.active.clone().into_iter().collect())
        }
    }

    struct MockThreadRepo;

    #[async_trait]
    impl ThreadRepository for MockThreadRepo {
        async fn append_message(
            &self,
            msg: NewThreadMessage,
        ) -> Result<ThreadMessage, ThreadError> {
            Ok(ThreadMessage {
                id: 1,
                order_id: msg.order_id,
                sender_id: msg.sender_id,
                sender_role: msg.sender_role,
                body: msg.body,
                sent_at: "2025-06-01 10:00:00".to_string(),
            })
        }

        async fn list_messages(&self, _order_id: &str) -> Result<Vec<ThreadMessage>, ThreadError> {
            Ok(Vec::new())
        }

        async fn mark_read(&self, _order_id: &str, _actor_id: i64) -> Result<(), ThreadError> {
            Ok(())
        }

        async fn read_cursor(
            &self,
            _order_id: &str,
            _actor_id: i64,
        ) -> Result<Option<ReadCursor>, ThreadError> {
            Ok(None)
        }

        async fn unread_count(&self, _order_id: &str, _actor_id: i64) -> Result<i64, ThreadError> {
            Ok(0)
        }
    }

    /// Emitter that records every event it is handed.
    #[derive(Clone, Default)]
    struct RecordingEmitter {
        events: Arc<Mutex<Vec<OrderEvent>>>,
    }

    impl RecordingEmitter {
        fn recorded(&self) -> Vec<OrderEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl OrderEventEmitter for RecordingEmitter {
        fn emit(&self, event: OrderEvent) {
            self.events.lock().unwrap().push(event);
        }

        fn clone_box(&self) -> Box<dyn OrderEventEmitter> {
            Box::new(self.clone())
        }
    }

    fn core_with(order: Option<Order>, active: Option<Assignment>) -> AppCore {
        AppCore::new(Repos::new(
            Arc::new(MockOrderRepo { order }),
            Arc::new(MockAssignmentRepo { active }),
            Arc::new(MockThreadRepo),
        ))
    }

    fn core_recording(order: Option<Order>) -> (AppCore, RecordingEmitter) {
        let emitter = RecordingEmitter::default();
        let core = AppCore::with_events(
            Repos::new(
                Arc::new(MockOrderRepo { order }),
                Arc::new(MockAssignmentRepo { active: None }),
                Arc::new(MockThreadRepo),
            ),
            Arc::new(emitter.clone()),
        );
        (core, emitter)
    }

    fn service_ref() -> ServiceRef {
        ServiceRef {
            id: 10,
            name: "Plumbing Repair".to_string(),
            price: 80.0,
        }
    }

    #[tokio::test]
    async fn create_rejects_unknown_payment_method() {
        let core = core_with(None, None);
        let err = core
            .orders()
            .create(1, service_ref(), Utc::now().date_naive(), "bank_transfer", None)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_past_date() {
        let core = core_with(None, None);
        let yesterday = Utc::now().date_naive() - Duration::days(1);
        let err = core
            .orders()
            .create(1, service_ref(), yesterday, "card", None)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn create_accepts_today() {
        let core = core_with(None, None);
        let order = core
            .orders()
            .create(1, service_ref(), Utc::now().date_naive(), "cash", None)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_method, PaymentMethod::Cash);
    }

    #[tokio::test]
    async fn customer_cannot_complete_work() {
        let core = core_with(Some(sample_order(OrderStatus::InProgress)), None);
        let err = core
            .orders()
            .update_status("order-1", OrderStatus::Completed, Actor::new(1, Role::Customer))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Permission(_)));
    }

    #[tokio::test]
    async fn technician_needs_the_active_assignment() {
        // Order is Assigned but to nobody in the mock; a stray technician
        // passes the role gate yet fails ownership.
        let core = core_with(Some(sample_order(OrderStatus::Assigned)), None);
        let err = core
            .orders()
            .update_status("order-1", OrderStatus::InProgress, Actor::new(5, Role::Technician))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Permission(_)));
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let core = core_with(None, None);
        let err = core
            .orders()
            .update_status("missing", OrderStatus::Cancelled, Actor::new(1, Role::Customer))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn non_admin_cannot_assign() {
        let core = core_with(Some(sample_order(OrderStatus::Pending)), None);
        for role in [Role::Customer, Role::Technician] {
            let err = core
                .assignments()
                .assign("order-1", 2, Actor::new(3, role))
                .await
                .unwrap_err();
            assert!(matches!(err, CoreError::Permission(_)));
        }
    }

    #[tokio::test]
    async fn empty_message_body_is_rejected() {
        let core = core_with(Some(sample_order(OrderStatus::Assigned)), None);
        let err = core
            .thread()
            .post_message("order-1", Actor::new(1, Role::Customer), "   ")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn create_emits_order_created() {
        let (core, emitter) = core_recording(None);
        let order = core
            .orders()
            .create(7, service_ref(), Utc::now().date_naive(), "card", None)
            .await
            .unwrap();

        let events = emitter.recorded();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            OrderEvent::OrderCreated { order_id, customer_id: 7 } if *order_id == order.id
        ));
    }

    #[tokio::test]
    async fn status_change_emits_the_applied_edge() {
        let (core, emitter) = core_recording(Some(sample_order(OrderStatus::InProgress)));
        core.orders()
            .update_status("order-1", OrderStatus::Completed, Actor::new(99, Role::Admin))
            .await
            .unwrap();

        let events = emitter.recorded();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            OrderEvent::StatusChanged {
                order_id,
                from: OrderStatus::InProgress,
                to: OrderStatus::Completed,
            } if order_id == "order-1"
        ));
    }

    #[tokio::test]
    async fn assign_emits_technician_assigned() {
        let (core, emitter) = core_recording(Some(sample_order(OrderStatus::Pending)));
        core.assignments()
            .assign("order-1", 42, Actor::new(99, Role::Admin))
            .await
            .unwrap();

        let events = emitter.recorded();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            OrderEvent::TechnicianAssigned { order_id, technician_id: 42 }
                if order_id == "order-1"
        ));
    }

    #[tokio::test]
    async fn post_message_emits_message_posted() {
        let (core, emitter) = core_recording(Some(sample_order(OrderStatus::Assigned)));
        core.thread()
            .post_message("order-1", Actor::new(1, Role::Customer), "hello")
            .await
            .unwrap();

        let events = emitter.recorded();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            OrderEvent::MessagePosted { order_id, sender_id: 1 } if order_id == "order-1"
        ));
    }

    #[tokio::test]
    async fn failed_operations_emit_nothing() {
        let (core, emitter) = core_recording(Some(sample_order(OrderStatus::InProgress)));

        core.orders()
            .create(1, service_ref(), Utc::now().date_naive(), "bank_transfer", None)
            .await
            .unwrap_err();
        core.orders()
            .update_status("order-1", OrderStatus::Completed, Actor::new(1, Role::Customer))
            .await
            .unwrap_err();
        core.assignments()
            .assign("order-1", 42, Actor::new(1, Role::Customer))
            .await
            .unwrap_err();
        core.thread()
            .post_message("order-1", Actor::new(1, Role::Customer), "  ")
            .await
            .unwrap_err();

        assert!(emitter.recorded().is_empty());
    }
}
