//! Playback sequencing: the orchestrator state machine, the speech engine
//! seam and the tokio driver that connects them.

/// Speech engine trait and the simulated engine
pub mod engine;
/// Orchestrator inputs, outputs and status
pub mod events;
/// Phase/repeat state machine
pub mod orchestrator;
/// Actor task driving the orchestrator
pub mod player;
/// Modes, phases, rates, timing and requests
pub mod types;

pub use engine::{EngineEventSink, SimulatedSpeechEngine, SpeechEngine, DEFAULT_CHAR_DURATION};
pub use events::{
    EndReason, EngineEvent, PlaybackEffect, PlaybackEvent, PlaybackState, PlaybackStatus,
    SessionOutcome,
};
pub use orchestrator::PlaybackOrchestrator;
pub use player::VersePlayer;
pub use types::{
    DelayTicket, Phase, PlaybackRequest, RenderingMode, SessionId, SpeakRequest, SpeechRate,
    UtteranceId, INTER_PHASE_DELAY, INTER_REPEAT_DELAY, POST_UTTERANCE_DELAY,
    PRE_UTTERANCE_DELAY,
};
