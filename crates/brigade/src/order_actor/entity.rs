//! [`ActorEntity`] implementation for [`Order`].
//!
//! The entity enforces what must hold no matter who writes the record: a well-formed draft at
//! creation, an immutable total, and revisions that never move a track or the status
//! backwards. Staff steps arrive as an [`OrderAction`], which applies the one-step rule for
//! a single item and promotes the order status in the same commit.

use super::{OrderAction, OrderActionResult, OrderError};
use crate::clients::RestaurantClient;
use crate::model::{
    AssignedLineItem, CookStatus, LineItem, LineItemKey, Order, OrderDraft, OrderFilter, OrderId,
    OrderRevision, OrderStatus, Role, WaiterStatus,
};
use crate::session::Session;
use crate::state_machine::item;
use crate::state_machine::order as order_machine;
use crate::state_machine::TransitionError;
use async_trait::async_trait;
use resource_actor::ActorEntity;
use rust_decimal::Decimal;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderDraft;
    type Update = OrderRevision;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Filter = OrderFilter;
    type Context = RestaurantClient;
    type Error = OrderError;

    fn from_create_params(id: OrderId, draft: OrderDraft) -> Result<Self, Self::Error> {
        validate_draft(&draft)?;

        let mut total = Decimal::ZERO;
        let mut items = Vec::with_capacity(draft.items.len());
        for (index, assigned) in draft.items.into_iter().enumerate() {
            let item = line_item(LineItemKey(index), assigned);
            let line_total = item
                .unit_price
                .checked_mul(Decimal::from(item.quantity))
                .ok_or_else(|| {
                    OrderError::ValidationError(format!("{}: line total overflows", item.key))
                })?;
            total = total
                .checked_add(line_total)
                .ok_or_else(|| OrderError::ValidationError("order total overflows".to_string()))?;
            items.push(item);
        }

        Ok(Self {
            id,
            restaurant_id: draft.restaurant_id,
            customer: draft.customer,
            table_number: draft.table_number,
            ordered_at: draft.ordered_at,
            items,
            total,
            status: OrderStatus::Pending,
            notes: draft
                .notes
                .map(|notes| notes.trim().to_string())
                .filter(|notes| !notes.is_empty()),
        })
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        filter.accepts(self)
    }

    /// Rejects orders for restaurants that do not exist.
    async fn on_create(&mut self, restaurants: &RestaurantClient) -> Result<(), Self::Error> {
        restaurants.ensure_exists(self.restaurant_id).await?;
        Ok(())
    }

    /// Applies a revision, refusing any regression.
    async fn on_update(
        &mut self,
        revision: OrderRevision,
        _ctx: &RestaurantClient,
    ) -> Result<(), Self::Error> {
        if revision.items.len() != self.items.len() {
            return Err(OrderError::ValidationError(format!(
                "revision has {} items, order has {}",
                revision.items.len(),
                self.items.len()
            )));
        }
        if revision.status < self.status {
            return Err(TransitionError::Order {
                from: self.status,
                to: revision.status,
            }
            .into());
        }

        for (item, progress) in self.items.iter_mut().zip(revision.items) {
            if progress.cook < item.cook_status {
                return Err(TransitionError::Cook {
                    from: item.cook_status,
                    to: progress.cook,
                }
                .into());
            }
            if progress.waiter < item.waiter_status {
                return Err(TransitionError::Waiter {
                    from: item.waiter_status,
                    to: progress.waiter,
                }
                .into());
            }
            item.cook_status = progress.cook;
            item.waiter_status = progress.waiter;
        }

        if revision.status == OrderStatus::Completed && !self.all_items_done() {
            let outstanding = self.items.iter().filter(|item| !item.is_done()).count();
            return Err(TransitionError::ItemsOutstanding {
                outstanding,
                total: self.items.len(),
            }
            .into());
        }
        self.status = revision.status;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &RestaurantClient,
    ) -> Result<OrderActionResult, Self::Error> {
        match action {
            OrderAction::AdvanceCook { session, key, next } => {
                let line = self.line_for(&session, key, Role::Cook)?;
                item::advance_cook(line, next)?;
            }
            OrderAction::AdvanceWaiter { session, key, next } => {
                let line = self.line_for(&session, key, Role::Waiter)?;
                item::advance_waiter(line, next)?;
            }
        }
        let change = order_machine::reconcile(self);
        Ok(OrderActionResult {
            order: self.clone(),
            change,
        })
    }
}

impl Order {
    /// The item `session` wants to move on the `role` track, if it is allowed to.
    fn line_for(
        &mut self,
        session: &Session,
        key: LineItemKey,
        role: Role,
    ) -> Result<&mut LineItem, OrderError> {
        session.check_restaurant(self.restaurant_id)?;
        let order_id = self.id;
        let line = self
            .items
            .get_mut(key.0)
            .ok_or_else(|| OrderError::NotFound(format!("{key} of {order_id}")))?;
        session.check_item(line, role)?;
        Ok(line)
    }
}

/// Checks a draft before any ID is spent on it.
pub fn validate_draft(draft: &OrderDraft) -> Result<(), OrderError> {
    if draft.items.is_empty() {
        return Err(OrderError::ValidationError("cart is empty".to_string()));
    }
    if draft.customer.name.trim().is_empty() {
        return Err(OrderError::ValidationError(
            "customer name is required".to_string(),
        ));
    }
    if draft.table_number == 0 {
        return Err(OrderError::ValidationError(
            "table number must be at least 1".to_string(),
        ));
    }
    for (index, assigned) in draft.items.iter().enumerate() {
        let item = &assigned.item;
        if item.quantity == 0 {
            return Err(OrderError::ValidationError(format!(
                "{}: quantity must be positive",
                LineItemKey(index)
            )));
        }
        if item.unit_price.is_sign_negative() {
            return Err(OrderError::ValidationError(format!(
                "{}: unit price must not be negative",
                LineItemKey(index)
            )));
        }
    }
    Ok(())
}

fn line_item(key: LineItemKey, assigned: AssignedLineItem) -> LineItem {
    LineItem {
        key,
        dish_id: assigned.item.dish_id,
        name: assigned.item.name,
        quantity: assigned.item.quantity,
        unit_price: assigned.item.unit_price,
        assigned_cook_id: assigned.assigned_cook_id,
        assigned_waiter_id: assigned.assigned_waiter_id,
        cook_status: CookStatus::Pending,
        waiter_status: WaiterStatus::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CartItem, CustomerInfo, DishId, ItemProgress, RestaurantId, StaffId};
    use chrono::Utc;

    fn mk_draft(items: Vec<CartItem>) -> OrderDraft {
        OrderDraft {
            restaurant_id: RestaurantId(1),
            customer: CustomerInfo::named("Grace"),
            table_number: 3,
            ordered_at: Utc::now(),
            items: items
                .into_iter()
                .map(|item| AssignedLineItem {
                    item,
                    assigned_cook_id: Some(StaffId(1)),
                    assigned_waiter_id: None,
                })
                .collect(),
            notes: Some("  no onions ".to_string()),
        }
    }

    fn soup() -> CartItem {
        CartItem::new(DishId(1), "Soup", 2, Decimal::new(450, 2))
    }

    fn bread() -> CartItem {
        CartItem::new(DishId(2), "Bread", 3, Decimal::new(125, 2))
    }

    #[test]
    fn total_is_sum_of_line_totals() {
        let order = Order::from_create_params(OrderId(1), mk_draft(vec![soup(), bread()])).unwrap();
        // 2 * 4.50 + 3 * 1.25
        assert_eq!(order.total, Decimal::new(1275, 2));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items[1].key, LineItemKey(1));
        assert_eq!(order.items[0].assigned_cook_id, Some(StaffId(1)));
        assert_eq!(order.notes.as_deref(), Some("no onions"));
    }

    #[test]
    fn rejects_malformed_drafts() {
        let empty = Order::from_create_params(OrderId(1), mk_draft(vec![])).unwrap_err();
        assert_eq!(empty, OrderError::ValidationError("cart is empty".into()));

        let mut zero_qty = soup();
        zero_qty.quantity = 0;
        assert!(matches!(
            Order::from_create_params(OrderId(1), mk_draft(vec![zero_qty])),
            Err(OrderError::ValidationError(_))
        ));

        let mut negative = soup();
        negative.unit_price = Decimal::new(-1, 0);
        assert!(matches!(
            Order::from_create_params(OrderId(1), mk_draft(vec![negative])),
            Err(OrderError::ValidationError(_))
        ));

        let mut nameless = mk_draft(vec![soup()]);
        nameless.customer.name = "   ".into();
        assert!(validate_draft(&nameless).is_err());

        let mut no_table = mk_draft(vec![soup()]);
        no_table.table_number = 0;
        assert!(validate_draft(&no_table).is_err());
    }

    #[tokio::test]
    async fn revision_cannot_regress_a_track() {
        let mut order = Order::from_create_params(OrderId(1), mk_draft(vec![soup()])).unwrap();
        order.items[0].cook_status = CookStatus::Preparing;

        let (client, _receiver) = resource_actor::mock::create_mock_client(1);
        let restaurants = RestaurantClient::new(client);
        let revision = OrderRevision {
            items: vec![ItemProgress {
                cook: CookStatus::Pending,
                waiter: WaiterStatus::Pending,
            }],
            status: OrderStatus::Preparing,
        };
        let err = order.on_update(revision, &restaurants).await.unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition(TransitionError::Cook {
                from: CookStatus::Preparing,
                to: CookStatus::Pending
            })
        );
    }

    #[tokio::test]
    async fn advance_action_promotes_in_the_same_step() {
        let mut order = Order::from_create_params(OrderId(1), mk_draft(vec![soup(), bread()]))
            .unwrap();
        let (client, _receiver) = resource_actor::mock::create_mock_client(1);
        let restaurants = RestaurantClient::new(client);
        let cook = Session {
            restaurant_id: RestaurantId(1),
            principal: crate::session::Principal::Staff {
                staff_id: StaffId(1),
                role: Role::Cook,
            },
        };

        let result = order
            .handle_action(
                OrderAction::AdvanceCook {
                    session: cook,
                    key: LineItemKey(1),
                    next: CookStatus::Preparing,
                },
                &restaurants,
            )
            .await
            .unwrap();
        assert_eq!(result.order.items[1].cook_status, CookStatus::Preparing);
        assert_eq!(result.order.status, OrderStatus::Preparing);
        assert_eq!(
            result.change,
            Some(order_machine::StatusChange {
                from: OrderStatus::Pending,
                to: OrderStatus::Preparing
            })
        );
        assert_eq!(order, result.order);

        // The cook is not the waiter of any item, and cannot skip a step.
        let err = order
            .handle_action(
                OrderAction::AdvanceWaiter {
                    session: cook,
                    key: LineItemKey(0),
                    next: WaiterStatus::Accepted,
                },
                &restaurants,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::ValidationError(_)));
        let err = order
            .handle_action(
                OrderAction::AdvanceCook {
                    session: cook,
                    key: LineItemKey(0),
                    next: CookStatus::Completed,
                },
                &restaurants,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition(_)));
        let err = order
            .handle_action(
                OrderAction::AdvanceCook {
                    session: Session::manager(RestaurantId(1)),
                    key: LineItemKey(5),
                    next: CookStatus::Preparing,
                },
                &restaurants,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::NotFound(_)));
    }

    #[tokio::test]
    async fn revision_cannot_complete_with_open_items() {
        let mut order = Order::from_create_params(OrderId(1), mk_draft(vec![soup(), bread()]))
            .unwrap();
        let (client, _receiver) = resource_actor::mock::create_mock_client(1);
        let restaurants = RestaurantClient::new(client);

        let mut revision = order.revision();
        revision.items[0] = ItemProgress {
            cook: CookStatus::Completed,
            waiter: WaiterStatus::Served,
        };
        revision.status = OrderStatus::Completed;

        let err = order.on_update(revision, &restaurants).await.unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition(TransitionError::ItemsOutstanding {
                outstanding: 1,
                total: 2
            })
        );
    }
}
