//! # Order Service
//!
//! The operations staff and customers call. It ties the stores, the assignment core, and the
//! state machines together:
//!
//! - [`OrderService::submit_order`] validates the cart, takes the restaurant's assignment gate,
//!   computes the workload, assigns every item, and creates the order in one store request.
//! - [`OrderService::advance_cook_status`] and [`OrderService::advance_waiter_status`] send one
//!   item step to the order actor, which applies it and the automatic promotion atomically.
//! - [`OrderService::set_order_status`] reads the order, applies the explicit status and the
//!   promotion, and writes it back conditionally. A conflicting concurrent write makes the
//!   attempt re-read and start over, bounded by the [`RetryPolicy`].
//!
//! Every status change is handed to the [`NotificationPublisher`] after it is stored. The
//! publisher bounds each delivery, so a stuck sink cannot hold up the caller.

use crate::assignment::{assign, AssignmentGates, StaffLoad, WorkloadIndex};
use crate::clients::{OrderClient, RestaurantClient, StaffClient};
use crate::model::{
    AssignedLineItem, CartItem, CookStatus, CustomerInfo, LineItemKey, Order, OrderDraft, OrderId,
    OrderStatus, RestaurantId, Role, Staff, StaffCreate, StaffId, WaiterStatus,
};
use crate::notify::NotificationPublisher;
use crate::order_actor::entity::validate_draft;
use crate::order_actor::{OrderAction, OrderError};
use crate::retry::RetryPolicy;
use crate::session::{Principal, Session};
use crate::state_machine::item::{self, ItemStatus};
use crate::state_machine::order::{self as order_machine, StatusChange};
use chrono::Utc;
use resource_actor::Subscription;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// One unit of pending work on a staff member's queue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkItem {
    pub order_id: OrderId,
    pub table_number: u32,
    pub key: LineItemKey,
    pub name: String,
    pub quantity: u32,
    pub role: Role,
    pub cook_status: CookStatus,
    pub waiter_status: WaiterStatus,
    pub status: ItemStatus,
}

#[derive(Clone)]
pub struct OrderService {
    restaurants: RestaurantClient,
    staff: StaffClient,
    orders: OrderClient,
    workload: WorkloadIndex,
    gates: AssignmentGates,
    retry: RetryPolicy,
    notifications: NotificationPublisher,
}

impl OrderService {
    pub fn new(
        restaurants: RestaurantClient,
        staff: StaffClient,
        orders: OrderClient,
        retry: RetryPolicy,
        notifications: NotificationPublisher,
    ) -> Self {
        let workload = WorkloadIndex::new(restaurants.clone(), staff.clone(), orders.clone());
        Self {
            restaurants,
            staff,
            orders,
            workload,
            gates: AssignmentGates::new(),
            retry,
            notifications,
        }
    }

    pub fn orders(&self) -> &OrderClient {
        &self.orders
    }

    // --- Checkout ---

    /// Places an order with every item assigned to the least busy cook and waiter.
    ///
    /// Fails with `ValidationError` before touching any store if the cart is malformed, and
    /// with `NotFound` for an unknown restaurant. No order exists unless this returns `Ok`.
    #[instrument(skip(self, customer, cart, notes), fields(items = cart.len()))]
    pub async fn submit_order(
        &self,
        restaurant_id: RestaurantId,
        customer: CustomerInfo,
        table_number: u32,
        cart: Vec<CartItem>,
        notes: Option<String>,
    ) -> Result<Order, OrderError> {
        let draft = OrderDraft {
            restaurant_id,
            customer,
            table_number,
            ordered_at: Utc::now(),
            items: cart.iter().cloned().map(AssignedLineItem::unassigned).collect(),
            notes,
        };
        validate_draft(&draft)?;

        let _gate = self.gates.enter(restaurant_id).await;
        let draft = &draft;
        let cart = &cart;
        let record = self
            .retry
            .run("submit_order", move |_| async move {
                let load = self.workload.compute_load(restaurant_id).await?;
                let mut assigned = draft.clone();
                assigned.items = assign(cart, &load.cook_load, &load.waiter_load);
                self.orders.place(assigned).await
            })
            .await?;

        let order = record.into_inner();
        info!(order_id = %order.id, total = %order.total, "Order submitted");
        Ok(order)
    }

    // --- Staff actions ---

    /// Moves the cook track of one item a single step forward.
    #[instrument(skip(self))]
    pub async fn advance_cook_status(
        &self,
        session: &Session,
        order_id: OrderId,
        key: LineItemKey,
        next: CookStatus,
    ) -> Result<Order, OrderError> {
        let action = OrderAction::AdvanceCook {
            session: *session,
            key,
            next,
        };
        self.advance_item(order_id, action).await
    }

    /// Moves the waiter track of one item a single step forward.
    #[instrument(skip(self))]
    pub async fn advance_waiter_status(
        &self,
        session: &Session,
        order_id: OrderId,
        key: LineItemKey,
        next: WaiterStatus,
    ) -> Result<Order, OrderError> {
        let action = OrderAction::AdvanceWaiter {
            session: *session,
            key,
            next,
        };
        self.advance_item(order_id, action).await
    }

    /// Item steps are applied by the actor against the current record, so steps on different
    /// items of one order never conflict and need no retry.
    async fn advance_item(
        &self,
        order_id: OrderId,
        action: OrderAction,
    ) -> Result<Order, OrderError> {
        let outcome = self.orders.advance(order_id, action).await?;
        debug!(%order_id, "Item advanced");
        if let Some(change) = outcome.change {
            self.announce(&outcome.order, change).await;
        }
        Ok(outcome.order)
    }

    /// Explicit coarse status signal. Forward only; `Completed` needs every item done.
    #[instrument(skip(self))]
    pub async fn set_order_status(
        &self,
        session: &Session,
        order_id: OrderId,
        next: OrderStatus,
    ) -> Result<Order, OrderError> {
        self.update_order(order_id, "set_order_status", |order| {
            session.check_restaurant(order.restaurant_id)?;
            order_machine::set_status(order, next)?;
            Ok(())
        })
        .await
    }

    /// Promotes the order to the status its items imply, if it lags behind.
    #[instrument(skip(self))]
    pub async fn reconcile_order(&self, order_id: OrderId) -> Result<Order, OrderError> {
        self.update_order(order_id, "reconcile_order", |_| Ok(())).await
    }

    /// Read, mutate, promote, conditionally write; retried from the read on conflict.
    async fn update_order<F>(
        &self,
        order_id: OrderId,
        operation: &'static str,
        mutate: F,
    ) -> Result<Order, OrderError>
    where
        F: Fn(&mut Order) -> Result<(), OrderError>,
    {
        let mutate = &mutate;
        let (order, change) = self
            .retry
            .run(operation, move |attempt| async move {
                let current = self.orders.fetch(order_id).await?;
                let version = current.version;
                let mut order = current.into_inner();
                let before = order.revision();

                mutate(&mut order)?;
                order_machine::reconcile(&mut order);

                let after = order.revision();
                if after == before {
                    return Ok((order, None));
                }
                let change = (after.status != before.status).then_some(StatusChange {
                    from: before.status,
                    to: after.status,
                });
                let saved = self.orders.revise(order_id, version, after).await?;
                debug!(%order_id, version = saved.version, attempt, "Order revised");
                Ok((saved.into_inner(), change))
            })
            .await?;

        if let Some(change) = change {
            self.announce(&order, change).await;
        }
        Ok(order)
    }

    async fn announce(&self, order: &Order, change: StatusChange) {
        info!(order_id = %order.id, from = %change.from, to = %change.to, "Order status changed");
        self.notifications.status_changed(order, change).await;
    }

    // --- Queries ---

    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: OrderId) -> Result<Order, OrderError> {
        Ok(self.orders.fetch(order_id).await?.into_inner())
    }

    /// Orders of the session's restaurant that are not completed.
    #[instrument(skip(self))]
    pub async fn open_orders(&self, session: &Session) -> Result<Vec<Order>, OrderError> {
        self.orders.open_orders(session.restaurant_id).await
    }

    /// Items assigned to the session's cook or waiter whose track is not finished, oldest
    /// order first.
    #[instrument(skip(self))]
    pub async fn work_queue(&self, session: &Session) -> Result<Vec<WorkItem>, OrderError> {
        let Principal::Staff { staff_id, role } = session.principal else {
            return Err(OrderError::ValidationError(
                "work queues belong to cooks and waiters".to_string(),
            ));
        };

        let orders = self.orders.assigned_to(staff_id).await?;
        let queue = orders
            .iter()
            .filter(|order| order.restaurant_id == session.restaurant_id)
            .flat_map(|order| {
                order.items.iter().filter_map(move |line| {
                    let pending = match role {
                        Role::Cook => {
                            line.assigned_cook_id == Some(staff_id)
                                && line.cook_status != CookStatus::Completed
                        }
                        Role::Waiter => {
                            line.assigned_waiter_id == Some(staff_id)
                                && line.waiter_status != WaiterStatus::Served
                        }
                    };
                    pending.then(|| WorkItem {
                        order_id: order.id,
                        table_number: order.table_number,
                        key: line.key,
                        name: line.name.clone(),
                        quantity: line.quantity,
                        role,
                        cook_status: line.cook_status,
                        waiter_status: line.waiter_status,
                        status: item::item_status(line.cook_status, line.waiter_status),
                    })
                })
            })
            .collect();
        Ok(queue)
    }

    /// Current open item count per active cook and waiter.
    pub async fn compute_load(&self, restaurant_id: RestaurantId) -> Result<StaffLoad, OrderError> {
        self.workload.compute_load(restaurant_id).await
    }

    // --- Staff management ---

    #[instrument(skip(self))]
    pub async fn hire_staff(
        &self,
        session: &Session,
        name: String,
        role: Role,
    ) -> Result<Staff, OrderError> {
        session.require_manager()?;
        let staff = self
            .staff
            .hire(StaffCreate {
                restaurant_id: session.restaurant_id,
                name,
                role,
            })
            .await?;
        info!(staff_id = %staff.id, %role, "Staff hired");
        Ok(staff)
    }

    /// Takes a staff member out of assignment. Their existing items stay assigned.
    #[instrument(skip(self))]
    pub async fn deactivate_staff(
        &self,
        session: &Session,
        staff_id: StaffId,
    ) -> Result<bool, OrderError> {
        self.managed_staff(session, staff_id).await?;
        Ok(self.staff.deactivate(staff_id).await?)
    }

    #[instrument(skip(self))]
    pub async fn reactivate_staff(
        &self,
        session: &Session,
        staff_id: StaffId,
    ) -> Result<bool, OrderError> {
        self.managed_staff(session, staff_id).await?;
        Ok(self.staff.reactivate(staff_id).await?)
    }

    async fn managed_staff(&self, session: &Session, staff_id: StaffId) -> Result<Staff, OrderError> {
        session.require_manager()?;
        let staff = self.staff.find(staff_id).await?;
        session.check_restaurant(staff.restaurant_id)?;
        Ok(staff)
    }

    // --- Change feeds ---

    /// Change feed for one order. Call `unsubscribe` on the result when done.
    #[instrument(skip(self))]
    pub async fn watch_order(&self, order_id: OrderId) -> Result<Subscription<Order>, OrderError> {
        self.orders.fetch(order_id).await?;
        self.orders.watch_order(order_id).await
    }

    /// Change feed for every order of a restaurant.
    #[instrument(skip(self))]
    pub async fn watch_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Subscription<Order>, OrderError> {
        self.restaurants.ensure_exists(restaurant_id).await?;
        self.orders.watch_restaurant(restaurant_id).await
    }
}
