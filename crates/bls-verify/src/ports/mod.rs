//! Trait boundaries between the domain and the outside world.

pub mod inbound;
pub mod outbound;
