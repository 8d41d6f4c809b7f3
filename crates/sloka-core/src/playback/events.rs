//! Inputs, outputs and observable state of the orchestrator.

use super::types::{
    DelayTicket, Phase, PlaybackRequest, RenderingMode, SessionId, SpeakRequest, UtteranceId,
};
use serde::Serialize;
use std::time::Duration;

/// Lifecycle callback from the speech engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EngineEvent {
    /// The engine began speaking the utterance
    Started(UtteranceId),
    /// The engine finished the utterance, including its post delay
    Finished(UtteranceId),
    /// The engine abandoned the utterance
    Cancelled(UtteranceId),
}

impl EngineEvent {
    /// Utterance the event refers to
    #[must_use]
    pub const fn utterance(self) -> UtteranceId {
        match self {
            Self::Started(id) | Self::Finished(id) | Self::Cancelled(id) => id,
        }
    }
}

/// Everything that can drive the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// Caller asks to play a verse
    Start(PlaybackRequest),
    /// Caller asks to abort playback
    Stop,
    /// Caller asks to pause the engine
    Pause,
    /// Caller asks to resume the engine
    Resume,
    /// Engine lifecycle callback
    Engine(EngineEvent),
    /// A scheduled delay ran out
    DelayElapsed(DelayTicket),
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    /// All repeats were spoken
    Completed,
    /// The caller stopped playback
    Stopped,
    /// The engine cancelled the outstanding utterance
    Cancelled,
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Stopped => write!(f, "stopped"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Summary of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionOutcome {
    /// Session that ended
    pub session: SessionId,
    /// How it ended
    pub reason: EndReason,
    /// Full cycles spoken before the end
    pub completed_repeats: u32,
    /// Cycles requested
    pub total_repeats: u32,
}

/// Work the orchestrator asks its driver to carry out, in order
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEffect {
    /// Hand an utterance to the engine
    Speak(SpeakRequest),
    /// Abort the engine immediately
    StopSpeaking,
    /// Pause the engine
    PauseSpeaking,
    /// Resume the engine
    ContinueSpeaking,
    /// Start a timer that reports back with [`PlaybackEvent::DelayElapsed`]
    ScheduleDelay {
        /// Ticket to report back
        ticket: DelayTicket,
        /// How long to wait
        delay: Duration,
    },
    /// Drop a timer scheduled earlier
    CancelDelay(DelayTicket),
    /// The session is over
    SessionEnded(SessionOutcome),
}

/// Coarse orchestrator state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PlaybackState {
    /// No session
    #[default]
    Idle,
    /// One utterance is outstanding
    Speaking {
        /// Phase being spoken
        phase: Phase,
    },
    /// A delay is pending before the next utterance
    Waiting {
        /// Phase that will be spoken when the delay runs out
        next_phase: Phase,
    },
}

impl PlaybackState {
    /// Whether no session is active
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Speaking { phase } => write!(f, "Speaking ({phase})"),
            Self::Waiting { next_phase } => write!(f, "Waiting (next: {next_phase})"),
        }
    }
}

/// Snapshot for UI feedback
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlaybackStatus {
    /// Current state
    pub state: PlaybackState,
    /// Mode of the active session
    pub mode: Option<RenderingMode>,
    /// Set once the engine reports the first start of the session
    pub is_speaking: bool,
    /// Full cycles finished so far in the active session
    pub completed_repeats: u32,
    /// Cycles requested for the active session
    pub total_repeats: u32,
    /// How the most recent session ended
    pub last_outcome: Option<SessionOutcome>,
}
