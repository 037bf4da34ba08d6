//! Trackprobe - extract BPM and musical key from an audio file
//!
//! The signal processing itself is delegated to an external Essentia
//! extractor binary invoked as a subprocess. This crate owns the thin
//! pipeline around it:
//!
//! 1. **Process runner** (`process`): one blocking child-process
//!    invocation with stdin detached and both output streams captured.
//! 2. **Extraction orchestrator** (`extract`): temp-file plumbing for the
//!    analyzer's output contract, JSON parsing, and cleanup.
//! 3. **Key normalizer** (`key`): a static table collapsing the
//!    analyzer's historical key/scale spellings into 24 canonical forms.

pub mod error;
pub mod extract;
pub mod key;
pub mod process;

// Re-exports for convenient access
pub use error::{ExtractError, Result};
pub use extract::{extract, extract_with, TrackAttributes, ANALYZER_COMMAND};
pub use key::normalize_key;
