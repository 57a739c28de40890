use crate::domain::parameters::RequestParameters;
use crate::domain::ports::GatewayExecutor;
use crate::error::{GatewayError, Result};
use crate::interfaces::shell::command_line;
use async_trait::async_trait;
use std::borrow::Cow;
use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;

/// Runs the vendor binaries as child processes.
///
/// Each `name=value` parameter becomes one argument, so no shell is involved
/// and values never need unquoting. Without a timeout the call waits for the
/// binary for as long as it runs; with one, the child is killed once the
/// limit expires.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor {
    timeout: Option<Duration>,
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    async fn run(&self, binary: &Path, params: &RequestParameters) -> Result<Output> {
        let child = Command::new(binary)
            .args(params.to_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| GatewayError::Spawn {
                path: binary.to_path_buf(),
                source,
            })?;

        match self.timeout {
            // Dropping the pending future kills the child.
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| GatewayError::Timeout(limit))?
                .map_err(GatewayError::from),
            None => Ok(child.wait_with_output().await?),
        }
    }
}

/// Decodes the binary's stdout, replacing bytes that are not UTF-8.
///
/// Vendor binaries may print Latin-1 text; a replacement is logged so a
/// garbled field can be traced back to its source.
fn decode_output<'a>(binary: &Path, stdout: &'a [u8]) -> Cow<'a, str> {
    let decoded = String::from_utf8_lossy(stdout);
    if let Cow::Owned(_) = decoded {
        tracing::warn!(
            binary = %binary.display(),
            "Gateway output is not valid UTF-8, invalid bytes were replaced"
        );
    }
    decoded
}

/// Last non-blank line of the binary's output, without trailing whitespace.
fn last_line(stdout: &str) -> Option<&str> {
    stdout
        .lines()
        .rev()
        .map(str::trim_end)
        .find(|line| !line.is_empty())
}

#[async_trait]
impl GatewayExecutor for ProcessExecutor {
    async fn invoke(&self, binary: &Path, params: &RequestParameters) -> Result<String> {
        tracing::debug!(command = %command_line(binary, params), "Invoking gateway binary");

        let output = self.run(binary, params).await?;
        let stdout = decode_output(binary, &output.stdout);
        let line = last_line(&stdout);

        if !output.status.success() {
            let code = output
                .status
                .code()
                .map_or_else(|| "a signal".to_string(), |c| c.to_string());
            let stderr = String::from_utf8_lossy(&output.stderr);

            if line.is_none() {
                tracing::warn!(
                    binary = %binary.display(),
                    %code,
                    stderr = %stderr.trim(),
                    "Gateway binary failed"
                );
                return Err(GatewayError::ProcessFailed { code });
            }
            tracing::warn!(
                binary = %binary.display(),
                %code,
                "Gateway binary exited with a failure status, parsing its output anyway"
            );
        }

        Ok(line.unwrap_or_default().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_line() {
        assert_eq!(last_line("!0!!form!\n"), Some("!0!!form!"));
        assert_eq!(last_line("banner\n!0!x!  \n\n"), Some("!0!x!"));
        assert_eq!(last_line("\n \n"), None);
        assert_eq!(last_line(""), None);
    }

    #[test]
    fn test_decode_output_replaces_invalid_bytes() {
        let binary = Path::new("/opt/sips/response");
        assert!(matches!(decode_output(binary, b"!0!caf\xc3\xa9!"), Cow::Borrowed("!0!caf\u{e9}!")));

        let decoded = decode_output(binary, b"!-1!caf\xe9!");
        assert!(matches!(decoded, Cow::Owned(_)));
        assert_eq!(decoded, "!-1!caf\u{fffd}!");
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let executor = ProcessExecutor::new();
        let result = executor
            .invoke(
                Path::new("/nonexistent/sips/request"),
                &RequestParameters::new(),
            )
            .await;

        assert!(matches!(result, Err(GatewayError::Spawn { .. })));
    }
}
