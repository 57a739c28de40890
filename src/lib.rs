//! Client for the SIPS/Atos payment gateway binaries.
//!
//! The vendor ships two executables: a request binary that produces the
//! payment form for a checkout, and a response binary that decodes the data
//! posted back after payment. [`GatewayClient`] builds their parameters,
//! runs them and parses their `!`-delimited output.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;

pub use application::client::{API_VERSION, GatewayClient};
pub use config::ClientConfig;
pub use domain::parameters::RequestParameters;
pub use domain::response::Response;
pub use error::{GatewayError, Result};
