//! Type-safe wrappers around [`ResourceClient`](resource_actor::ResourceClient).

pub mod order_client;
pub mod restaurant_client;
pub mod staff_client;

pub use order_client::*;
pub use restaurant_client::*;
pub use staff_client::*;
