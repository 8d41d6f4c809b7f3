//! # Sloka Core
//!
//! Phonetic transliteration and speech-playback sequencing for Sanskrit verses.
//!
//! ## Features
//!
//! - Devanagari and IAST to plain-ASCII phonetic text a generic synthesizer can read
//! - Deterministic voice selection per rendering mode and phase
//! - A pure phase/repeat state machine with cancellable delays
//! - A tokio player driving any [`SpeechEngine`], plus a simulated engine
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sloka_core::{
//!     PlaybackRequest, RenderingMode, SimulatedSpeechEngine, StaticVoiceCatalog, VersePlayer,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sloka_core::SlokaError> {
//!     let player = VersePlayer::spawn(
//!         Arc::new(StaticVoiceCatalog::new()),
//!         SimulatedSpeechEngine::new(),
//!     );
//!     let request = PlaybackRequest::new(
//!         "कर्मण्येवाधिकारस्ते",
//!         "karmaṇy-evādhikāras te",
//!         "You have a right to perform your duty",
//!         RenderingMode::Both,
//!     )
//!     .with_repeats(2)?;
//!
//!     player.start(request)?;
//!     let status = player.wait_until_idle().await?;
//!     println!("{:?}", status.last_outcome);
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod playback;
pub mod transliteration;
pub mod verse;
pub mod voice_manager;
pub mod voice_selector;

// Re-export main types for convenience
pub use config::{PlaybackPreferences, SlokaConfig, REPEAT_COUNT_RANGE};
pub use error::{SlokaError, SlokaResult};
pub use playback::{
    EndReason, EngineEvent, EngineEventSink, Phase, PlaybackEffect, PlaybackEvent,
    PlaybackOrchestrator, PlaybackRequest, PlaybackState, PlaybackStatus, RenderingMode,
    SessionOutcome, SimulatedSpeechEngine, SpeakRequest, SpeechEngine, SpeechRate, VersePlayer,
};
pub use transliteration::{clean_iast, devanagari_to_phonetic, romanize, syllabify};
pub use verse::{Verse, VerseText};
pub use voice_manager::{StaticVoiceCatalog, VoiceCatalog, VoiceDescriptor, VoiceQuality};
pub use voice_selector::{VoiceCategory, VoiceSelector};

/// Version information for the sloka-core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
