//! Pure data structures (DTOs) implementing the [`ActorEntity`](resource_actor::ActorEntity) trait.

pub mod order;
pub mod restaurant;
pub mod staff;
pub mod status;

pub use order::*;
pub use restaurant::*;
pub use staff::*;
pub use status::*;
