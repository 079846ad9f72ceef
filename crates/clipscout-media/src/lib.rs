//! Media acquisition for ClipScout.
//!
//! Resolves a job's media source (upload, YouTube link, direct link) into an
//! analysis-ready audio track: a 16 kHz mono WAV on disk plus the decoded
//! f32 samples. Wraps the external tools the pipeline shells out to
//! (ffmpeg, ffprobe, yt-dlp).

pub mod acquire;
pub mod command;
pub mod download;
pub mod error;
pub mod extract;
pub mod probe;

pub use acquire::acquire_audio_track;
pub use command::{check_ffmpeg, check_ffprobe, check_ytdlp, FfmpegCommand, FfmpegRunner};
pub use download::normalize_direct_url;
pub use error::{MediaError, MediaResult};
pub use extract::{decode_f32le, AudioTrack, TARGET_SAMPLE_RATE};
pub use probe::probe_duration;
