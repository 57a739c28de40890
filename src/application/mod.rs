//! Application layer exposing the gateway operations.
//!
//! `GatewayClient` turns a payment intent into a call to one of the vendor
//! binaries and the binary's output into a `Response` or an error.

pub mod client;
