//! Track attribute extraction
//!
//! Orchestrates one analyzer run end to end:
//!
//! 1. Create a unique temp root for the analyzer's output files
//! 2. Invoke the external extractor binary with the audio path and temp root
//! 3. Parse the `<root>_statistics.json` document it writes
//! 4. Delete both output files (best-effort)
//! 5. Round the tempo and normalize the key spelling
//!
//! The analyzer is a black box; only the subset of its statistics document
//! consumed here is modeled.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};
use crate::key::normalize_key;
use crate::process;

/// Command name of the Essentia freesound extractor.
pub const ANALYZER_COMMAND: &str = "essentia_streaming_extractor_freesound";

/// Suffixes the analyzer appends to the temp root for its two output files.
/// Dictated by the analyzer's own output contract.
const STATS_SUFFIX: &str = "_statistics.json";
const FRAMES_SUFFIX: &str = "_frames.json";

/// Analyzer statistics document (consumed subset).
///
/// The real document carries dozens of feature sections; everything beyond
/// the tempo and key fields is ignored. Every field is optional, so an
/// incomplete document degrades to lenient defaults rather than failing.
#[derive(Debug, Deserialize)]
struct AnalyzerStats {
    rhythm: Option<RhythmStats>,
    tonal: Option<TonalStats>,
}

#[derive(Debug, Deserialize)]
struct RhythmStats {
    bpm: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TonalStats {
    /// Raw key letter, e.g. "C", "F#"
    key_key: Option<String>,
    /// Raw scale name, e.g. "major", "minor"
    key_scale: Option<String>,
}

/// Extracted track attributes, the tool's single output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackAttributes {
    /// Tempo in beats per minute, rounded to one decimal place
    pub bpm: f64,
    /// Canonical key name ("Am", "Db", ...), or `None` when the analyzer's
    /// key/scale spelling is absent or unrecognized
    pub key: Option<String>,
}

/// Locate the analyzer binary.
///
/// Prefers a copy shipped next to the current executable, falling back to
/// `PATH` resolution of the bare command name.
fn analyzer_path() -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let bundled = dir.join(ANALYZER_COMMAND);
            if bundled.exists() {
                return bundled;
            }
        }
    }
    PathBuf::from(ANALYZER_COMMAND)
}

/// Extract BPM and key from an audio file.
///
/// Runs the bundled analyzer (see [`ANALYZER_COMMAND`]) against the file
/// and post-processes its statistics output. Fatal on analyzer failure or
/// unparsable output; there is no partial result and no retry.
pub fn extract(audio_path: &Path) -> Result<TrackAttributes> {
    extract_with(&analyzer_path(), audio_path)
}

/// Run a specific analyzer binary against one audio file.
///
/// Separated from [`extract`] so tests can substitute a stand-in analyzer.
pub fn extract_with(analyzer: &Path, audio_path: &Path) -> Result<TrackAttributes> {
    // Fresh directory per invocation; uniqueness of the temp root is the
    // only thing guarding concurrent runs against collision
    let temp_dir = tempfile::Builder::new()
        .prefix("trackprobe-")
        .tempdir()
        .map_err(ExtractError::TempDir)?;
    let root = temp_dir.path().join("analysis");
    let stats_path = path_with_suffix(&root, STATS_SUFFIX);
    let frames_path = path_with_suffix(&root, FRAMES_SUFFIX);

    let args = [audio_path.as_os_str(), root.as_os_str()];
    let output = process::run(analyzer, &args).map_err(|source| ExtractError::AnalyzerLaunch {
        command: process::render_command(analyzer, &args),
        source,
    })?;

    if !output.ok() {
        return Err(ExtractError::AnalyzerFailed {
            command: output.command,
            code: output.exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
        });
    }

    log::debug!("analyzer finished, reading {:?}", stats_path);

    let contents = std::fs::read_to_string(&stats_path).map_err(|source| {
        ExtractError::StatsUnreadable {
            path: stats_path.clone(),
            source,
        }
    })?;
    let stats: AnalyzerStats = serde_json::from_str(&contents).map_err(|source| {
        ExtractError::StatsInvalid {
            path: stats_path.clone(),
            source,
        }
    })?;

    remove_quietly(&stats_path);
    remove_quietly(&frames_path);

    Ok(attributes_from_stats(stats))
}

/// Append a suffix to a path without treating it as an extension.
///
/// `<root>` -> `<root>_statistics.json`, matching how the analyzer derives
/// its output file names from the temp root argument.
fn path_with_suffix(root: &Path, suffix: &str) -> PathBuf {
    let mut name = root.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Best-effort temp file removal.
///
/// The frames file in particular may never have been written. Not-found and
/// permission errors are expected and discarded; anything else is logged
/// but still never aborts the run.
fn remove_quietly(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        match e.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                log::debug!("leaving temp file {:?}: {}", path, e);
            }
            _ => log::warn!("failed to remove temp file {:?}: {}", path, e),
        }
    }
}

/// Compute the final attributes from a parsed analyzer document.
///
/// Absent fields fall back leniently: a missing tempo reports 0.0, and a
/// missing key/scale pair looks up the empty spelling and reports `None`.
fn attributes_from_stats(stats: AnalyzerStats) -> TrackAttributes {
    let bpm = stats.rhythm.and_then(|r| r.bpm).unwrap_or(0.0);
    let (key_key, key_scale) = match stats.tonal {
        Some(tonal) => (
            tonal.key_key.unwrap_or_default(),
            tonal.key_scale.unwrap_or_default(),
        ),
        None => (String::new(), String::new()),
    };

    TrackAttributes {
        bpm: round_to_tenth(bpm),
        key: normalize_key(&key_key, &key_scale).map(str::to_string),
    }
}

/// Round to one decimal place, halves away from zero.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
