//! Audio container conversion via an external ffmpeg binary.

use crate::error::VoiceError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Timeout for one transcoding run. Voice messages are short; anything
/// beyond this indicates a wedged process.
const TRANSCODE_TIMEOUT: Duration = Duration::from_secs(60);

/// Converts one audio container to another; the target format is inferred
/// from the output path's extension.
#[async_trait]
pub trait AudioTranscoder: Send + Sync {
    async fn transcode(&self, input: &Path, output: &Path) -> Result<(), VoiceError>;
}

/// [`AudioTranscoder`] backed by the ffmpeg CLI.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    binary: PathBuf,
}

impl FfmpegTranscoder {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for FfmpegTranscoder {
    /// Uses `ffmpeg` from `PATH`.
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

#[async_trait]
impl AudioTranscoder for FfmpegTranscoder {
    async fn transcode(&self, input: &Path, output: &Path) -> Result<(), VoiceError> {
        let mut command = Command::new(&self.binary);
        command
            .arg("-y") // overwrite a stale output from an aborted earlier run
            .arg("-i")
            .arg(input)
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let child = command
            .spawn()
            .map_err(|e| VoiceError::Codec(format!("failed to spawn ffmpeg: {e}")))?;

        let result = tokio::time::timeout(TRANSCODE_TIMEOUT, child.wait_with_output())
            .await
            .map_err(|_| {
                VoiceError::Codec(format!(
                    "ffmpeg timed out after {} seconds",
                    TRANSCODE_TIMEOUT.as_secs()
                ))
            })?
            .map_err(|e| VoiceError::Codec(format!("failed to wait for ffmpeg: {e}")))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(VoiceError::Codec(format!("ffmpeg failed: {stderr}")));
        }

        debug!(
            input = %input.display(),
            output = %output.display(),
            "transcoded audio"
        );
        Ok(())
    }
}
