//! Greedy least-loaded assignment.
//!
//! Items are handed out in cart order. Each item goes to the cook with the lowest count in a
//! working copy of the cook loads (lowest staff ID on ties), whose count is then bumped so the
//! next item sees it; waiters are picked the same way, independently. With loads within one of
//! each other beforehand, every role stays within one afterwards.
//!
//! The planner never fails. A role with nobody on shift leaves that side unassigned.

use super::workload::LoadMap;
use crate::model::{AssignedLineItem, CartItem, StaffId};

pub fn assign(
    items: &[CartItem],
    cook_load: &LoadMap,
    waiter_load: &LoadMap,
) -> Vec<AssignedLineItem> {
    let mut cooks = cook_load.clone();
    let mut waiters = waiter_load.clone();

    items
        .iter()
        .map(|item| AssignedLineItem {
            item: item.clone(),
            assigned_cook_id: take_least_loaded(&mut cooks),
            assigned_waiter_id: take_least_loaded(&mut waiters),
        })
        .collect()
}

/// Picks the first member with the minimal count and bumps it.
fn take_least_loaded(load: &mut LoadMap) -> Option<StaffId> {
    let (id, count) = load.iter_mut().min_by_key(|(_, count)| **count)?;
    *count += 1;
    Some(*id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DishId;
    use rust_decimal::Decimal;

    fn cart(n: u32) -> Vec<CartItem> {
        (0..n)
            .map(|i| CartItem::new(DishId(i), format!("dish {i}"), 1, Decimal::new(500, 2)))
            .collect()
    }

    fn loads(entries: &[(u32, u32)]) -> LoadMap {
        entries.iter().map(|(id, n)| (StaffId(*id), *n)).collect()
    }

    fn apply(initial: &LoadMap, assigned: &[AssignedLineItem], cooks: bool) -> LoadMap {
        let mut after = initial.clone();
        for item in assigned {
            let id = if cooks {
                item.assigned_cook_id
            } else {
                item.assigned_waiter_id
            };
            *after.get_mut(&id.unwrap()).unwrap() += 1;
        }
        after
    }

    #[test]
    fn two_cooks_one_waiter_scenario() {
        let cook_load = loads(&[(1, 0), (2, 1)]);
        let waiter_load = loads(&[(10, 0)]);

        let assigned = assign(&cart(2), &cook_load, &waiter_load);

        // Item 1 goes to the idle cook. Both cooks then sit at 1 and the lower ID wins.
        assert_eq!(assigned[0].assigned_cook_id, Some(StaffId(1)));
        assert_eq!(assigned[1].assigned_cook_id, Some(StaffId(1)));
        assert!(assigned
            .iter()
            .all(|item| item.assigned_waiter_id == Some(StaffId(10))));

        let cooks_after = apply(&cook_load, &assigned, true);
        assert_eq!(cooks_after[&StaffId(1)], 2);
        assert_eq!(cooks_after[&StaffId(2)], 1);
        let waiters_after = apply(&waiter_load, &assigned, false);
        assert_eq!(waiters_after[&StaffId(10)], 2);
    }

    #[test]
    fn keeps_balanced_loads_within_one() {
        let starts = [
            loads(&[(1, 0), (2, 0), (3, 0)]),
            loads(&[(1, 1), (2, 0), (3, 1)]),
            loads(&[(4, 2), (7, 3), (9, 3), (12, 2)]),
            loads(&[(1, 5)]),
        ];
        for start in &starts {
            for n in 0..12 {
                let assigned = assign(&cart(n), start, &LoadMap::new());
                let after = apply(start, &assigned, true);
                let max = after.values().max().unwrap();
                let min = after.values().min().unwrap();
                assert!(max - min <= 1, "start {start:?}, {n} items: {after:?}");
            }
        }
    }

    #[test]
    fn same_inputs_same_assignment() {
        let cook_load = loads(&[(3, 2), (1, 1), (2, 1)]);
        let waiter_load = loads(&[(8, 0), (5, 0)]);
        let items = cart(7);

        let first = assign(&items, &cook_load, &waiter_load);
        for _ in 0..5 {
            assert_eq!(assign(&items, &cook_load, &waiter_load), first);
        }
    }

    #[test]
    fn no_staff_leaves_role_unassigned() {
        let assigned = assign(&cart(3), &LoadMap::new(), &loads(&[(10, 0)]));
        assert_eq!(assigned.len(), 3);
        assert!(assigned.iter().all(|item| item.assigned_cook_id.is_none()));
        assert!(assigned.iter().all(|item| item.assigned_waiter_id.is_some()));
    }

    #[test]
    fn input_loads_are_not_modified() {
        let cook_load = loads(&[(1, 0)]);
        assign(&cart(4), &cook_load, &LoadMap::new());
        assert_eq!(cook_load[&StaffId(1)], 0);
    }

    #[test]
    fn preserves_item_order() {
        let items = cart(3);
        let assigned = assign(&items, &loads(&[(1, 0)]), &LoadMap::new());
        let names: Vec<_> = assigned.iter().map(|a| a.item.name.as_str()).collect();
        assert_eq!(names, vec!["dish 0", "dish 1", "dish 2"]);
    }
}
