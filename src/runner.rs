//! Subprocess plumbing for the external model runner.
//!
//! Two operations exist against the runner binary (ollama by default):
//! listing installed models (`<bin> list`) and a single prompt/response
//! round-trip (`<bin> run <model>` with the prompt on stdin). Both are
//! plain child-process invocations; the round-trip optionally enforces an
//! injectable timeout, killing the child when it fires.

use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;

/// Errors from the runner subprocess seam
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to start '{bin}': {message}")]
    Spawn { bin: String, message: String },

    #[error("'{bin}' exited with code {code}{}", format_stderr(.stderr))]
    Exit {
        bin: String,
        code: i32,
        stderr: String,
    },

    #[error("'{bin}' timed out after {}s", .timeout.as_secs())]
    Timeout { bin: String, timeout: Duration },

    #[error("i/o error talking to '{bin}': {source}")]
    Io {
        bin: String,
        #[source]
        source: std::io::Error,
    },
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// Handle on the external model runner binary
#[derive(Debug, Clone)]
pub struct Runner {
    bin: String,
    timeout: Option<Duration>,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_RUNNER_BIN)
    }
}

impl Runner {
    pub fn new(bin: impl Into<String>) -> Self {
        Self {
            bin: bin.into(),
            timeout: None,
        }
    }

    /// Set a per-request timeout for prompt round-trips
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The binary this runner shells out to
    pub fn bin(&self) -> &str {
        &self.bin
    }

    /// List installed models via `<bin> list`.
    ///
    /// Returns the first whitespace-delimited token of every non-empty
    /// stdout line, in output order.
    pub async fn list_models(&self) -> Result<Vec<String>, RunnerError> {
        tracing::debug!(bin = %self.bin, "listing installed models");

        let output = Command::new(&self.bin)
            .arg("list")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(RunnerError::Exit {
                bin: self.bin.clone(),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let models = parse_model_list(&stdout);
        tracing::debug!(count = models.len(), "models found");
        Ok(models)
    }

    /// Run one prompt/response round-trip via `<bin> run <model>`.
    ///
    /// The full prompt is written to the child's stdin, then stdout and
    /// stderr are read to EOF. Returns raw stdout on exit code 0; the
    /// caller decides how to treat empty output.
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String, RunnerError> {
        tracing::debug!(bin = %self.bin, model, "dispatching prompt to runner");

        let mut child = Command::new(&self.bin)
            .arg("run")
            .arg(model)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // stdin/stdout/stderr are piped above, so take() cannot fail
        let mut stdin = child.stdin.take().ok_or_else(|| RunnerError::Io {
            bin: self.bin.clone(),
            source: std::io::Error::other("child stdin not captured"),
        })?;
        let mut stdout = child.stdout.take().ok_or_else(|| RunnerError::Io {
            bin: self.bin.clone(),
            source: std::io::Error::other("child stdout not captured"),
        })?;
        let mut stderr = child.stderr.take().ok_or_else(|| RunnerError::Io {
            bin: self.bin.clone(),
            source: std::io::Error::other("child stderr not captured"),
        })?;

        let round_trip = async {
            // Write the whole prompt, then close stdin so the runner sees EOF
            stdin
                .write_all(prompt.as_bytes())
                .await
                .map_err(|e| self.io_error(e))?;
            drop(stdin);

            let mut out = String::new();
            let mut err = String::new();
            let (out_res, err_res) = tokio::join!(
                stdout.read_to_string(&mut out),
                stderr.read_to_string(&mut err)
            );
            out_res.map_err(|e| self.io_error(e))?;
            err_res.map_err(|e| self.io_error(e))?;

            let status = child.wait().await.map_err(|e| self.io_error(e))?;
            Ok::<_, RunnerError>((status, out, err))
        };

        let (status, out, err) = match self.timeout {
            Some(timeout) => {
                let result = tokio::time::timeout(timeout, round_trip).await;
                match result {
                    Ok(result) => result?,
                    Err(_) => {
                        tracing::warn!(bin = %self.bin, model, "runner timed out, killing child");
                        let _ = child.kill().await;
                        return Err(RunnerError::Timeout {
                            bin: self.bin.clone(),
                            timeout,
                        });
                    }
                }
            }
            None => round_trip.await?,
        };

        if !status.success() {
            return Err(RunnerError::Exit {
                bin: self.bin.clone(),
                code: status.code().unwrap_or(-1),
                stderr: err,
            });
        }

        Ok(out)
    }

    fn spawn_error(&self, source: std::io::Error) -> RunnerError {
        let mut message = source.to_string();
        if source.kind() == std::io::ErrorKind::NotFound && which::which(&self.bin).is_err() {
            message = format!("'{}' is not installed or not on PATH", self.bin);
        }
        RunnerError::Spawn {
            bin: self.bin.clone(),
            message,
        }
    }

    fn io_error(&self, source: std::io::Error) -> RunnerError {
        RunnerError::Io {
            bin: self.bin.clone(),
            source,
        }
    }
}

/// Parse `<bin> list` output into model identifiers.
///
/// Each non-empty line contributes its first whitespace-delimited token,
/// in order.
pub fn parse_model_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(|token| token.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_model_list_first_token_per_line() {
        let output = "llama3:latest  365c0bd3c000  4.7 GB  2 weeks ago\n\
                      mistral:7b     61e88e884507  4.1 GB  5 days ago\n\
                      phi3:mini      4f2222927938  2.2 GB  3 hours ago\n";
        let models = parse_model_list(output);
        assert_eq!(models, vec!["llama3:latest", "mistral:7b", "phi3:mini"]);
    }

    #[test]
    fn test_parse_model_list_skips_blank_lines() {
        let output = "llama3:latest  abc  1 GB\n\n   \nmistral:7b  def  2 GB\n";
        let models = parse_model_list(output);
        assert_eq!(models, vec!["llama3:latest", "mistral:7b"]);
    }

    #[test]
    fn test_parse_model_list_empty() {
        assert!(parse_model_list("").is_empty());
        assert!(parse_model_list("\n\n").is_empty());
    }

    #[test]
    fn test_parse_model_list_preserves_order() {
        let output = "b\na\nc\n";
        assert_eq!(parse_model_list(output), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_exit_error_message_includes_stderr() {
        let err = RunnerError::Exit {
            bin: "ollama".to_string(),
            code: 1,
            stderr: "could not connect to server\n".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("exited with code 1"));
        assert!(message.contains("could not connect to server"));
    }

    #[test]
    fn test_exit_error_message_without_stderr() {
        let err = RunnerError::Exit {
            bin: "ollama".to_string(),
            code: 2,
            stderr: "  \n".to_string(),
        };
        assert_eq!(err.to_string(), "'ollama' exited with code 2");
    }
}
