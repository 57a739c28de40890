use crate::domain::parameters::RequestParameters;
use crate::domain::ports::GatewayExecutor;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// A recorded call to [`ScriptedExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub binary: PathBuf,
    pub params: RequestParameters,
}

/// An executor that answers with canned output instead of spawning processes.
///
/// Outputs are returned in the order they were queued; once the queue is
/// drained every call gets an empty line. Clones share the same queue and
/// call log, so a handle kept by a test sees calls made through a boxed copy.
#[derive(Debug, Default, Clone)]
pub struct ScriptedExecutor {
    outputs: Arc<Mutex<VecDeque<String>>>,
    invocations: Arc<Mutex<Vec<Invocation>>>,
}

impl ScriptedExecutor {
    pub fn new<I, S>(outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            outputs: Arc::new(Mutex::new(outputs.into_iter().map(Into::into).collect())),
            invocations: Arc::default(),
        }
    }

    pub async fn push_output(&self, output: impl Into<String>) {
        self.outputs.lock().await.push_back(output.into());
    }

    pub async fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().await.clone()
    }
}

#[async_trait]
impl GatewayExecutor for ScriptedExecutor {
    async fn invoke(&self, binary: &Path, params: &RequestParameters) -> Result<String> {
        self.invocations.lock().await.push(Invocation {
            binary: binary.to_path_buf(),
            params: params.clone(),
        });
        Ok(self.outputs.lock().await.pop_front().unwrap_or_default())
    }
}
