use super::parameters::RequestParameters;
use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Runs a gateway binary and returns the line it printed.
#[async_trait]
pub trait GatewayExecutor: Send + Sync {
    async fn invoke(&self, binary: &Path, params: &RequestParameters) -> Result<String>;
}

pub type GatewayExecutorBox = Box<dyn GatewayExecutor>;
