//! FFmpeg command construction and execution.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{MediaError, MediaResult};

/// Check that ffmpeg is available in PATH.
pub fn check_ffmpeg() -> MediaResult<()> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;
    Ok(())
}

/// Check that ffprobe is available in PATH.
pub fn check_ffprobe() -> MediaResult<()> {
    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;
    Ok(())
}

/// Check that yt-dlp is available in PATH.
pub fn check_ytdlp() -> MediaResult<()> {
    which::which("yt-dlp").map_err(|_| MediaError::YtDlpNotFound)?;
    Ok(())
}

/// Builder for FFmpeg command invocations.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    input: PathBuf,
    output: PathBuf,
    input_args: Vec<String>,
    output_args: Vec<String>,
    log_level: String,
}

impl FfmpegCommand {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            input_args: Vec::new(),
            output_args: Vec::new(),
            log_level: "error".to_string(),
        }
    }

    /// Add an argument that applies to the input.
    pub fn input_arg(mut self, arg: impl Into<String>) -> Self {
        self.input_args.push(arg.into());
        self
    }

    /// Add an argument that applies to the output.
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Strip the video stream.
    pub fn no_video(self) -> Self {
        self.output_arg("-vn")
    }

    /// Set the output audio codec.
    pub fn audio_codec(self, codec: impl Into<String>) -> Self {
        self.output_arg("-acodec").output_arg(codec)
    }

    /// Set the output sample rate in Hz.
    pub fn sample_rate(self, hz: u32) -> Self {
        self.output_arg("-ar").output_arg(hz.to_string())
    }

    /// Set the output channel count.
    pub fn channels(self, count: u32) -> Self {
        self.output_arg("-ac").output_arg(count.to_string())
    }

    /// Force the output container format.
    pub fn format(self, fmt: impl Into<String>) -> Self {
        self.output_arg("-f").output_arg(fmt)
    }

    /// Build the full argument list for the ffmpeg binary.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(),
            "-v".to_string(),
            self.log_level.clone(),
        ];
        args.extend(self.input_args.iter().cloned());
        args.push("-i".to_string());
        args.push(self.input.to_string_lossy().to_string());
        args.extend(self.output_args.iter().cloned());
        args.push(self.output.to_string_lossy().to_string());
        args
    }
}

/// Runs FFmpeg commands with an optional wall-clock timeout. A timed-out
/// process is killed and reported as [`MediaError::Timeout`].
#[derive(Debug, Clone, Default)]
pub struct FfmpegRunner {
    timeout: Option<Duration>,
}

impl FfmpegRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Run the command to completion, discarding its output streams except
    /// for stderr, which is captured for error reporting.
    pub async fn run(&self, cmd: &FfmpegCommand) -> MediaResult<()> {
        check_ffmpeg()?;

        let args = cmd.build_args();
        debug!("Running FFmpeg: ffmpeg {}", args.join(" "));

        let mut child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        // Drain stderr while waiting so the pipe cannot fill up
        let stderr_pipe = child.stderr.take();
        let stderr_task = tokio::spawn(async move {
            let mut buf = String::new();
            if let Some(mut pipe) = stderr_pipe {
                let _ = pipe.read_to_string(&mut buf).await;
            }
            buf
        });

        let status = match self.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, child.wait()).await {
                Ok(result) => result?,
                Err(_) => {
                    warn!(
                        timeout_secs = timeout.as_secs(),
                        "FFmpeg timed out, killing process"
                    );
                    let _ = child.kill().await;
                    return Err(MediaError::Timeout(timeout.as_secs()));
                }
            },
            None => child.wait().await?,
        };

        let stderr = stderr_task.await.unwrap_or_default();

        if status.success() {
            Ok(())
        } else {
            Err(MediaError::ffmpeg_failed(
                "FFmpeg exited with non-zero status",
                last_stderr_line(&stderr),
                status.code(),
            ))
        }
    }
}

/// Extract the last non-empty stderr line, which is where FFmpeg puts the
/// actual failure reason.
fn last_stderr_line(stderr: &str) -> Option<String> {
    stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args_basic() {
        let cmd = FfmpegCommand::new("/tmp/in.mp4", "/tmp/out.wav");
        let args = cmd.build_args();
        assert_eq!(
            args,
            vec!["-y", "-v", "error", "-i", "/tmp/in.mp4", "/tmp/out.wav"]
        );
    }

    #[test]
    fn test_build_args_audio_extraction() {
        let cmd = FfmpegCommand::new("/tmp/in.mp4", "/tmp/out.wav")
            .no_video()
            .audio_codec("pcm_s16le")
            .sample_rate(16_000)
            .channels(1);
        let args = cmd.build_args();
        assert_eq!(
            args,
            vec![
                "-y",
                "-v",
                "error",
                "-i",
                "/tmp/in.mp4",
                "-vn",
                "-acodec",
                "pcm_s16le",
                "-ar",
                "16000",
                "-ac",
                "1",
                "/tmp/out.wav"
            ]
        );
    }

    #[test]
    fn test_build_args_input_args_precede_input() {
        let cmd = FfmpegCommand::new("/tmp/in.wav", "/tmp/out.raw")
            .input_arg("-ss")
            .input_arg("5")
            .format("f32le");
        let args = cmd.build_args();
        let i_pos = args.iter().position(|a| a == "-i");
        let ss_pos = args.iter().position(|a| a == "-ss");
        assert!(ss_pos < i_pos);
        assert_eq!(args.last().map(String::as_str), Some("/tmp/out.raw"));
    }

    #[test]
    fn test_last_stderr_line() {
        let stderr = "header noise\nsome progress\n/tmp/x.mp4: Invalid data found\n\n";
        assert_eq!(
            last_stderr_line(stderr).as_deref(),
            Some("/tmp/x.mp4: Invalid data found")
        );
        assert_eq!(last_stderr_line("\n  \n"), None);
        assert_eq!(last_stderr_line(""), None);
    }
}
