//! Subprocess-backed converter.
//!
//! Launches the configured executable, waits for it under a timeout and
//! checks both the exit status and the output file before reporting
//! success.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;

use docpdf_core::config::ConverterConfig;

use crate::converter::DocumentConverter;
use crate::error::{ConversionError, MAX_STDERR_CHARS};
use crate::models::{ConversionJob, ConversionReport};

/// Runs the external converter as a child process.
#[derive(Debug, Clone)]
pub struct ProcessConverter {
    /// Executable to launch.
    command: String,
    /// Leading arguments, before the conversion arguments.
    args_prefix: Vec<String>,
    /// Working directory for the child.
    working_dir: Option<PathBuf>,
    /// Extra environment variables.
    env_vars: HashMap<String, String>,
    /// Bound on a single run.
    timeout: Duration,
}

impl ProcessConverter {
    /// Create a converter from configuration.
    pub fn new(config: &ConverterConfig) -> Self {
        Self {
            command: config.command.clone(),
            args_prefix: config.args_prefix.clone(),
            working_dir: config.working_dir.as_ref().map(PathBuf::from),
            env_vars: config.env.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    /// The configured executable.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Full argument vector for a job, prefix included.
    pub fn args_for(&self, job: &ConversionJob) -> Vec<String> {
        let mut args = self.args_prefix.clone();
        args.extend(job.to_args());
        args
    }

    fn build_command(&self, job: &ConversionJob) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.args(self.args_for(job))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }
}

#[async_trait]
impl DocumentConverter for ProcessConverter {
    fn name(&self) -> &str {
        &self.command
    }

    async fn convert(&self, job: &ConversionJob) -> Result<ConversionReport, ConversionError> {
        let start = Instant::now();

        tracing::info!(
            command = %self.command,
            input = %job.input_path.display(),
            output = %job.output_path.display(),
            page_size = %job.options.page_size,
            orientation = %job.options.orientation,
            preserve_formatting = job.options.preserve_formatting,
            optimize = job.options.optimize_pdf,
            "Launching converter"
        );

        let child = self
            .build_command(job)
            .spawn()
            .map_err(|source| {
                tracing::error!(command = %self.command, error = %source, "Failed to launch converter");
                ConversionError::LaunchFailed {
                    command: self.command.clone(),
                    source,
                }
            })?;

        // The child is killed when this future is dropped (timeout or cancelled request).
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::error!(
                    command = %self.command,
                    timeout_seconds = self.timeout.as_secs(),
                    "Converter timed out"
                );
                return Err(ConversionError::Timeout {
                    timeout_seconds: self.timeout.as_secs(),
                });
            }
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            let code = output.status.code();
            tracing::error!(
                command = %self.command,
                exit_code = ?code,
                duration_ms,
                stderr = %stderr.chars().take(500).collect::<String>(),
                "Converter exited with failure"
            );
            return Err(ConversionError::ProcessExecutionFailed {
                code,
                stderr: stderr.chars().take(MAX_STDERR_CHARS).collect(),
            });
        }

        let output_size = verify_output(&job.output_path).await?;

        tracing::info!(
            command = %self.command,
            duration_ms,
            output_size,
            "Converter finished"
        );

        Ok(ConversionReport {
            output_path: job.output_path.clone(),
            output_size,
            duration_ms,
            stdout,
        })
    }
}

/// Check that a converter left a non-empty file at `path`; returns its size.
pub async fn verify_output(path: &Path) -> Result<u64, ConversionError> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(m) if m.is_file() => m,
        Ok(_) => {
            return Err(ConversionError::NoOutputProduced {
                path: path.to_path_buf(),
            });
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(
                output = %path.display(),
                "Converter reported success but output file not found"
            );
            return Err(ConversionError::NoOutputProduced {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(ConversionError::Io(e)),
    };

    if metadata.len() == 0 {
        tracing::warn!(output = %path.display(), "Converter produced an empty output file");
        return Err(ConversionError::OutputEmpty {
            path: path.to_path_buf(),
        });
    }

    Ok(metadata.len())
}
