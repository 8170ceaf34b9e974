use std::path::Path;
use std::process::Stdio;

use glm_core::BuildVariable;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::RunError;

/// Abstraction over script execution for testability.
///
/// Production code uses [`ShellExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait ScriptExecutor: Send + Sync {
    /// Run `script` to completion with `env` added to the inherited
    /// environment.
    async fn run(&self, script: &Path, env: &[BuildVariable]) -> Result<(), RunError>;
}

/// Runs scripts with `/bin/sh`, forwarding their stdout line by line.
pub struct ShellExecutor;

impl ScriptExecutor for ShellExecutor {
    async fn run(&self, script: &Path, env: &[BuildVariable]) -> Result<(), RunError> {
        let mut child = tokio::process::Command::new("/bin/sh")
            .arg(script)
            .envs(env.iter().map(|v| (v.key.as_str(), v.value.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| RunError::Spawn {
                script: script.to_path_buf(),
                source: e,
            })?;

        let drain = child.stdout.take().map(|mut stdout| {
            tokio::spawn(async move {
                let forwarded = forward_lines(&mut stdout, tokio::io::stdout()).await;
                if forwarded.is_err() {
                    // Keep reading so the child never writes into a closed pipe.
                    if let Err(e) = tokio::io::copy(&mut stdout, &mut tokio::io::sink()).await {
                        tracing::debug!(error = %e, "discarding script output failed");
                    }
                }
                forwarded
            })
        });

        let status = child.wait().await.map_err(|e| RunError::Wait {
            script: script.to_path_buf(),
            source: e,
        })?;

        // The pipe closes when the child exits; joining here flushes every
        // remaining line before we report.
        if let Some(drain) = drain {
            match drain.await {
                Ok(Ok(lines)) => tracing::debug!(lines, "script output forwarded"),
                Ok(Err(e)) => tracing::warn!(error = %e, "stopped forwarding script output"),
                Err(e) => tracing::warn!(error = %e, "script output task failed"),
            }
        }

        if status.success() {
            tracing::info!(script = %script.display(), "script finished");
            Ok(())
        } else {
            Err(RunError::Failed {
                script: script.to_path_buf(),
                status,
            })
        }
    }
}

/// Copy `reader` to `writer` one line at a time, flushing after each line.
/// Bytes are forwarded unchanged, so output that is not UTF-8 passes
/// through. Returns the number of lines copied.
pub async fn forward_lines<R, W>(reader: R, mut writer: W) -> std::io::Result<usize>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();
    let mut count = 0;
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        writer.write_all(&line).await?;
        writer.flush().await?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn forward_lines_copies_every_line() {
        let input: &[u8] = b"step 1\nstep 2\nno trailing newline";
        let mut out = Vec::new();

        let count = forward_lines(input, &mut out).await.unwrap();

        assert_eq!(count, 3);
        assert_eq!(out, input);
    }

    #[tokio::test]
    async fn forward_lines_handles_empty_input() {
        let input: &[u8] = b"";
        let mut out = Vec::new();

        assert_eq!(forward_lines(input, &mut out).await.unwrap(), 0);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn forward_lines_passes_invalid_utf8_through() {
        let input: &[u8] = b"progress \xff\xfe 50%\nstep 2\n";
        let mut out = Vec::new();

        let count = forward_lines(input, &mut out).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(out, input);
    }

    #[tokio::test]
    async fn forward_lines_keeps_crlf_endings() {
        let input: &[u8] = b"windows\r\nline\r\n";
        let mut out = Vec::new();

        assert_eq!(forward_lines(input, &mut out).await.unwrap(), 2);
        assert_eq!(out, input);
    }

    #[tokio::test]
    async fn forward_lines_copies_lines_longer_than_a_pipe_buffer() {
        let mut input = vec![b'x'; 256 * 1024];
        input.push(b'\n');
        input.extend_from_slice(b"after\n");
        let mut out = Vec::new();

        let count = forward_lines(input.as_slice(), &mut out).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(out, input);
    }
}
