//! Executors implementing the [`GatewayExecutor`](crate::domain::ports::GatewayExecutor) port.

pub mod process;
pub mod scripted;
