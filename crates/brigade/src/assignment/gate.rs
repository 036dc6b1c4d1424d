//! Per-restaurant assignment lock.
//!
//! Submission reads the workload, plans, and creates the order. Holding the restaurant's gate
//! across all three keeps a second submission from planning against a snapshot that does not
//! yet include the first order. Restaurants never wait on each other.

use crate::model::RestaurantId;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Clone, Default)]
pub struct AssignmentGates {
    gates: Arc<DashMap<RestaurantId, Arc<Mutex<()>>>>,
}

impl AssignmentGates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for the restaurant's gate. Assignment stays exclusive until the guard drops.
    pub async fn enter(&self, restaurant_id: RestaurantId) -> OwnedMutexGuard<()> {
        // Clone the Arc out so no map shard lock is held across the await.
        let gate = self.gates.entry(restaurant_id).or_default().clone();
        gate.lock_owned().await
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}
