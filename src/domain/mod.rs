//! Value objects shared by the client and its executors.

pub mod amount;
pub mod currency;
pub mod parameters;
pub mod ports;
pub mod response;
