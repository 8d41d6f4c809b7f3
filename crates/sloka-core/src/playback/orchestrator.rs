//! Phase and repeat sequencing for one verse at a time.
//!
//! [`PlaybackOrchestrator`] never talks to an engine or a clock itself. It
//! consumes [`PlaybackEvent`]s and returns the [`PlaybackEffect`]s a driver
//! must carry out, which keeps every transition testable synchronously.
//!
//! Engine events and delay tickets carry identifiers. Anything that does not
//! match what the current session is waiting for is stale and dropped.

use super::events::{
    EndReason, EngineEvent, PlaybackEffect, PlaybackEvent, PlaybackState, PlaybackStatus,
    SessionOutcome,
};
use super::types::{
    DelayTicket, Phase, PlaybackRequest, RenderingMode, SessionId, SpeakRequest, SpeechRate,
    UtteranceId, INTER_PHASE_DELAY, INTER_REPEAT_DELAY, POST_UTTERANCE_DELAY,
    PRE_UTTERANCE_DELAY,
};
use crate::verse::VerseText;
use crate::voice_manager::VoiceCatalog;
use crate::voice_selector::VoiceSelector;
use std::sync::Arc;
use tracing::{debug, info};

const PITCH: f32 = 1.0;
const VOLUME: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Utterance(UtteranceId),
    Delay(DelayTicket),
}

#[derive(Debug)]
struct PlaybackSession {
    id: SessionId,
    texts: VerseText,
    mode: RenderingMode,
    rate: SpeechRate,
    total_repeats: u32,
    completed_repeats: u32,
    current_phase: Phase,
    pending: Pending,
    is_speaking: bool,
}

/// Single-session playback state machine
#[derive(Debug)]
pub struct PlaybackOrchestrator {
    catalog: Arc<dyn VoiceCatalog>,
    session: Option<PlaybackSession>,
    last_outcome: Option<SessionOutcome>,
    next_session: u64,
    next_utterance: u64,
    next_ticket: u64,
}

impl PlaybackOrchestrator {
    /// Create an idle orchestrator choosing voices from `catalog`
    #[must_use]
    pub fn new(catalog: Arc<dyn VoiceCatalog>) -> Self {
        Self {
            catalog,
            session: None,
            last_outcome: None,
            next_session: 1,
            next_utterance: 1,
            next_ticket: 1,
        }
    }

    /// Feed one event through the state machine
    pub fn handle(&mut self, event: PlaybackEvent) -> Vec<PlaybackEffect> {
        match event {
            PlaybackEvent::Start(request) => self.on_start(request),
            PlaybackEvent::Stop => self.on_stop(),
            PlaybackEvent::Pause => vec![PlaybackEffect::PauseSpeaking],
            PlaybackEvent::Resume => vec![PlaybackEffect::ContinueSpeaking],
            PlaybackEvent::Engine(engine_event) => self.on_engine(engine_event),
            PlaybackEvent::DelayElapsed(ticket) => self.on_delay_elapsed(ticket),
        }
    }

    /// Shorthand for [`PlaybackEvent::Start`]
    pub fn start(&mut self, request: PlaybackRequest) -> Vec<PlaybackEffect> {
        self.handle(PlaybackEvent::Start(request))
    }

    /// Shorthand for [`PlaybackEvent::Stop`]
    pub fn stop(&mut self) -> Vec<PlaybackEffect> {
        self.handle(PlaybackEvent::Stop)
    }

    /// Shorthand for [`PlaybackEvent::Pause`]
    pub fn pause(&mut self) -> Vec<PlaybackEffect> {
        self.handle(PlaybackEvent::Pause)
    }

    /// Shorthand for [`PlaybackEvent::Resume`]
    pub fn resume(&mut self) -> Vec<PlaybackEffect> {
        self.handle(PlaybackEvent::Resume)
    }

    /// Whether a session is active
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Current coarse state
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        match &self.session {
            None => PlaybackState::Idle,
            Some(session) => match session.pending {
                Pending::Utterance(_) => PlaybackState::Speaking {
                    phase: session.current_phase,
                },
                Pending::Delay(_) => PlaybackState::Waiting {
                    next_phase: session.current_phase,
                },
            },
        }
    }

    /// Snapshot for UI feedback
    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        let mut status = PlaybackStatus {
            state: self.state(),
            last_outcome: self.last_outcome,
            ..PlaybackStatus::default()
        };
        if let Some(session) = &self.session {
            status.mode = Some(session.mode);
            status.is_speaking = session.is_speaking;
            status.completed_repeats = session.completed_repeats;
            status.total_repeats = session.total_repeats;
        }
        status
    }

    fn on_start(&mut self, request: PlaybackRequest) -> Vec<PlaybackEffect> {
        if let Some(active) = &self.session {
            debug!(session = %active.id, "Start ignored, a session is already active");
            return Vec::new();
        }

        let id = SessionId(self.next_session);
        self.next_session += 1;
        let mode = request.mode();
        let texts = VerseText::prepare(
            request.devanagari(),
            request.transliteration(),
            request.english(),
        );
        let mut session = PlaybackSession {
            id,
            texts,
            mode,
            rate: SpeechRate::from_slow_speed(request.slow_speed()),
            total_repeats: request.repeats(),
            completed_repeats: 0,
            current_phase: mode.entry_phase(),
            pending: Pending::Utterance(UtteranceId(0)),
            is_speaking: false,
        };
        info!(
            session = %id,
            mode = mode.as_str(),
            repeats = request.repeats(),
            slow = request.slow_speed(),
            "Starting playback session"
        );

        let speak = self.speak_current(&mut session);
        self.session = Some(session);
        vec![speak]
    }

    fn on_stop(&mut self) -> Vec<PlaybackEffect> {
        let mut effects = vec![PlaybackEffect::StopSpeaking];
        if let Some(session) = self.session.take() {
            if let Pending::Delay(ticket) = session.pending {
                effects.push(PlaybackEffect::CancelDelay(ticket));
            }
            effects.push(self.end(&session, EndReason::Stopped));
        }
        effects
    }

    fn on_engine(&mut self, event: EngineEvent) -> Vec<PlaybackEffect> {
        let outstanding = self
            .session
            .as_ref()
            .and_then(|session| match session.pending {
                Pending::Utterance(id) => Some(id),
                Pending::Delay(_) => None,
            });
        if outstanding != Some(event.utterance()) {
            debug!(?event, "Ignoring stale engine event");
            return Vec::new();
        }

        match event {
            EngineEvent::Started(_) => {
                if let Some(session) = self.session.as_mut() {
                    session.is_speaking = true;
                }
                Vec::new()
            }
            EngineEvent::Finished(_) => self.on_finished(),
            EngineEvent::Cancelled(_) => match self.session.take() {
                Some(session) => vec![self.end(&session, EndReason::Cancelled)],
                None => Vec::new(),
            },
        }
    }

    fn on_finished(&mut self) -> Vec<PlaybackEffect> {
        let Some(mut session) = self.session.take() else {
            return Vec::new();
        };

        let delay = if session.mode == RenderingMode::Both
            && session.current_phase == Phase::Devanagari
        {
            session.current_phase = Phase::English;
            INTER_PHASE_DELAY
        } else if session.completed_repeats + 1 < session.total_repeats {
            session.completed_repeats += 1;
            session.current_phase = session.mode.entry_phase();
            INTER_REPEAT_DELAY
        } else {
            session.completed_repeats = session.total_repeats;
            return vec![self.end(&session, EndReason::Completed)];
        };

        let ticket = DelayTicket {
            session: session.id,
            sequence: self.next_ticket,
        };
        self.next_ticket += 1;
        session.pending = Pending::Delay(ticket);
        debug!(
            session = %session.id,
            next_phase = %session.current_phase,
            completed = session.completed_repeats,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "Scheduling next utterance"
        );
        self.session = Some(session);
        vec![PlaybackEffect::ScheduleDelay { ticket, delay }]
    }

    fn on_delay_elapsed(&mut self, ticket: DelayTicket) -> Vec<PlaybackEffect> {
        let Some(mut session) = self.session.take() else {
            debug!(?ticket, "Ignoring delay with no active session");
            return Vec::new();
        };
        if session.pending != Pending::Delay(ticket) {
            debug!(?ticket, "Ignoring stale delay");
            self.session = Some(session);
            return Vec::new();
        }

        let speak = self.speak_current(&mut session);
        self.session = Some(session);
        vec![speak]
    }

    fn speak_current(&mut self, session: &mut PlaybackSession) -> PlaybackEffect {
        let id = UtteranceId(self.next_utterance);
        self.next_utterance += 1;
        session.pending = Pending::Utterance(id);

        let phase = session.current_phase;
        let voice = VoiceSelector::select(self.catalog.as_ref(), session.mode, phase);
        debug!(
            session = %session.id,
            utterance = %id,
            phase = %phase,
            voice = voice.as_ref().map_or("default", |v| v.id.as_str()),
            "Speaking"
        );

        PlaybackEffect::Speak(SpeakRequest {
            id,
            session: session.id,
            phase,
            text: session.texts.text_for(phase).to_owned(),
            voice,
            rate: session.rate,
            pitch: PITCH,
            volume: VOLUME,
            pre_delay: PRE_UTTERANCE_DELAY,
            post_delay: POST_UTTERANCE_DELAY,
        })
    }

    fn end(&mut self, session: &PlaybackSession, reason: EndReason) -> PlaybackEffect {
        let outcome = SessionOutcome {
            session: session.id,
            reason,
            completed_repeats: session.completed_repeats,
            total_repeats: session.total_repeats,
        };
        info!(
            session = %session.id,
            reason = %reason,
            completed = session.completed_repeats,
            total = session.total_repeats,
            "Playback session ended"
        );
        self.last_outcome = Some(outcome);
        PlaybackEffect::SessionEnded(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice_manager::{StaticVoiceCatalog, VoiceDescriptor, VoiceQuality};

    const DEVANAGARI: &str = "धर्मक्षेत्रे कुरुक्षेत्रे";
    const IAST: &str = "dharma-kṣetre kuru-kṣetre";
    const ENGLISH: &str = "On the field of dharma";

    fn orchestrator() -> PlaybackOrchestrator {
        let catalog = StaticVoiceCatalog::with_voices(vec![
            VoiceDescriptor::new("hi.voice", "hi-IN", VoiceQuality::Enhanced),
            VoiceDescriptor::new("us.voice", "en-US", VoiceQuality::Enhanced),
        ]);
        PlaybackOrchestrator::new(Arc::new(catalog))
    }

    fn request(mode: RenderingMode, repeats: u32) -> PlaybackRequest {
        PlaybackRequest::new(DEVANAGARI, IAST, ENGLISH, mode)
            .with_repeats(repeats)
            .expect("repeats are valid")
    }

    fn single_speak(effects: &[PlaybackEffect]) -> SpeakRequest {
        match effects {
            [PlaybackEffect::Speak(speak)] => speak.clone(),
            other => panic!("expected a single Speak, got {other:?}"),
        }
    }

    fn single_delay(effects: &[PlaybackEffect]) -> (DelayTicket, std::time::Duration) {
        match effects {
            [PlaybackEffect::ScheduleDelay { ticket, delay }] => (*ticket, *delay),
            other => panic!("expected a single ScheduleDelay, got {other:?}"),
        }
    }

    /// Drive a session to its end, acknowledging every request immediately.
    fn run_to_end(
        orch: &mut PlaybackOrchestrator,
        request: PlaybackRequest,
    ) -> (Vec<Phase>, SessionOutcome) {
        let mut phases = Vec::new();
        let mut effects = orch.start(request);
        loop {
            match effects.as_slice() {
                [PlaybackEffect::Speak(speak)] => {
                    phases.push(speak.phase);
                    orch.handle(PlaybackEvent::Engine(EngineEvent::Started(speak.id)));
                    effects = orch.handle(PlaybackEvent::Engine(EngineEvent::Finished(speak.id)));
                }
                [PlaybackEffect::ScheduleDelay { ticket, .. }] => {
                    effects = orch.handle(PlaybackEvent::DelayElapsed(*ticket));
                }
                [PlaybackEffect::SessionEnded(outcome)] => return (phases, *outcome),
                other => panic!("unexpected effects {other:?}"),
            }
        }
    }

    #[test]
    fn test_both_mode_two_repeats_sequence() {
        let mut orch = orchestrator();
        let first = single_speak(&orch.start(request(RenderingMode::Both, 2)));
        assert_eq!(first.phase, Phase::Devanagari);
        assert_eq!(first.text, DEVANAGARI);
        assert_eq!(first.voice.as_ref().map(|v| v.id.as_str()), Some("hi.voice"));

        // Devanagari -> English is a phase switch, not a repeat
        let (ticket, delay) =
            single_delay(&orch.handle(PlaybackEvent::Engine(EngineEvent::Finished(first.id))));
        assert_eq!(delay, INTER_PHASE_DELAY);
        assert_eq!(orch.status().completed_repeats, 0);
        assert_eq!(orch.state(), PlaybackState::Waiting { next_phase: Phase::English });

        let second = single_speak(&orch.handle(PlaybackEvent::DelayElapsed(ticket)));
        assert_eq!(second.phase, Phase::English);
        assert_eq!(second.text, ENGLISH);
        assert_eq!(second.voice.as_ref().map(|v| v.id.as_str()), Some("us.voice"));

        // English closes the first cycle
        let (ticket, delay) =
            single_delay(&orch.handle(PlaybackEvent::Engine(EngineEvent::Finished(second.id))));
        assert_eq!(delay, INTER_REPEAT_DELAY);
        assert_eq!(orch.status().completed_repeats, 1);

        let third = single_speak(&orch.handle(PlaybackEvent::DelayElapsed(ticket)));
        assert_eq!(third.phase, Phase::Devanagari);
        let (ticket, _) =
            single_delay(&orch.handle(PlaybackEvent::Engine(EngineEvent::Finished(third.id))));
        assert_eq!(orch.status().completed_repeats, 1);

        let fourth = single_speak(&orch.handle(PlaybackEvent::DelayElapsed(ticket)));
        assert_eq!(fourth.phase, Phase::English);
        let effects = orch.handle(PlaybackEvent::Engine(EngineEvent::Finished(fourth.id)));
        assert_eq!(
            effects,
            vec![PlaybackEffect::SessionEnded(SessionOutcome {
                session: fourth.session,
                reason: EndReason::Completed,
                completed_repeats: 2,
                total_repeats: 2,
            })]
        );
        assert_eq!(orch.state(), PlaybackState::Idle);
        assert!(!orch.is_active());
    }

    #[test]
    fn test_single_phase_modes_repeat_without_switching() {
        for mode in [
            RenderingMode::RomanizedPhonetic,
            RenderingMode::Transliteration,
            RenderingMode::Devanagari,
            RenderingMode::English,
        ] {
            let mut orch = orchestrator();
            let (phases, outcome) = run_to_end(&mut orch, request(mode, 3));
            assert_eq!(phases, vec![mode.entry_phase(); 3], "{mode}");
            assert_eq!(outcome.reason, EndReason::Completed);
            assert_eq!(outcome.completed_repeats, 3);
        }
    }

    #[test]
    fn test_romanized_mode_payload_and_voice() {
        let mut orch = orchestrator();
        let speak = single_speak(&orch.start(request(RenderingMode::RomanizedPhonetic, 1)));
        assert_eq!(speak.phase, Phase::Romanized);
        assert!(speak.text.is_ascii());
        assert!(speak.text.contains("kshetre"));
        assert_eq!(speak.voice.map(|v| v.id), Some("us.voice".to_string()));
    }

    #[test]
    fn test_transliteration_payload_is_cleaned() {
        let mut orch = orchestrator();
        let speak = single_speak(&orch.start(request(RenderingMode::Transliteration, 1)));
        assert_eq!(speak.text, "dharma, kshetre kuru, kshetre");
        // no en-IN voice in the catalog
        assert_eq!(speak.voice, None);
    }

    #[test]
    fn test_speak_request_timing_and_rate() {
        let mut orch = orchestrator();
        let slow = request(RenderingMode::English, 1).with_slow_speed(true);
        let speak = single_speak(&orch.start(slow));
        assert_eq!(speak.rate, SpeechRate::Slow);
        assert_eq!(speak.pre_delay, PRE_UTTERANCE_DELAY);
        assert_eq!(speak.post_delay, POST_UTTERANCE_DELAY);
        assert!((speak.pitch - 1.0).abs() < f32::EPSILON);
        assert!((speak.volume - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_start_while_active_is_ignored() {
        let mut orch = orchestrator();
        let first = single_speak(&orch.start(request(RenderingMode::English, 1)));
        assert!(orch.start(request(RenderingMode::Devanagari, 3)).is_empty());
        assert_eq!(orch.status().mode, Some(RenderingMode::English));
        assert_eq!(orch.state(), PlaybackState::Speaking { phase: first.phase });
    }

    #[test]
    fn test_stop_before_start() {
        let mut orch = orchestrator();
        assert_eq!(orch.stop(), vec![PlaybackEffect::StopSpeaking]);
        assert_eq!(orch.state(), PlaybackState::Idle);
        assert_eq!(orch.status().last_outcome, None);
    }

    #[test]
    fn test_stop_mid_phase_drops_late_finish() {
        let mut orch = orchestrator();
        let speak = single_speak(&orch.start(request(RenderingMode::Both, 2)));
        let effects = orch.stop();
        assert_eq!(effects[0], PlaybackEffect::StopSpeaking);
        assert!(matches!(
            effects[1],
            PlaybackEffect::SessionEnded(SessionOutcome { reason: EndReason::Stopped, .. })
        ));
        assert_eq!(effects.len(), 2);

        assert!(orch.handle(PlaybackEvent::Engine(EngineEvent::Finished(speak.id))).is_empty());
        assert!(orch.handle(PlaybackEvent::Engine(EngineEvent::Cancelled(speak.id))).is_empty());
        assert_eq!(orch.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_stop_mid_delay_cancels_timer() {
        let mut orch = orchestrator();
        let speak = single_speak(&orch.start(request(RenderingMode::English, 2)));
        let (ticket, _) =
            single_delay(&orch.handle(PlaybackEvent::Engine(EngineEvent::Finished(speak.id))));

        let effects = orch.stop();
        assert_eq!(effects[0], PlaybackEffect::StopSpeaking);
        assert_eq!(effects[1], PlaybackEffect::CancelDelay(ticket));
        assert!(matches!(
            effects[2],
            PlaybackEffect::SessionEnded(SessionOutcome {
                reason: EndReason::Stopped,
                completed_repeats: 1,
                ..
            })
        ));

        // the timer fired anyway
        assert!(orch.handle(PlaybackEvent::DelayElapsed(ticket)).is_empty());
        assert_eq!(orch.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_old_ticket_cannot_drive_new_session() {
        let mut orch = orchestrator();
        let speak = single_speak(&orch.start(request(RenderingMode::English, 2)));
        let (old_ticket, _) =
            single_delay(&orch.handle(PlaybackEvent::Engine(EngineEvent::Finished(speak.id))));
        orch.stop();

        let fresh = single_speak(&orch.start(request(RenderingMode::English, 2)));
        assert!(orch.handle(PlaybackEvent::DelayElapsed(old_ticket)).is_empty());
        assert_eq!(orch.state(), PlaybackState::Speaking { phase: fresh.phase });
    }

    #[test]
    fn test_engine_cancel_ends_session() {
        let mut orch = orchestrator();
        let speak = single_speak(&orch.start(request(RenderingMode::Devanagari, 2)));
        let effects = orch.handle(PlaybackEvent::Engine(EngineEvent::Cancelled(speak.id)));
        assert!(matches!(
            effects.as_slice(),
            [PlaybackEffect::SessionEnded(SessionOutcome { reason: EndReason::Cancelled, .. })]
        ));
        assert_eq!(orch.state(), PlaybackState::Idle);
        assert_eq!(
            orch.status().last_outcome.map(|outcome| outcome.reason),
            Some(EndReason::Cancelled)
        );
    }

    #[test]
    fn test_started_sets_speaking_flag_only() {
        let mut orch = orchestrator();
        let speak = single_speak(&orch.start(request(RenderingMode::English, 1)));
        assert!(!orch.status().is_speaking);
        assert!(orch.handle(PlaybackEvent::Engine(EngineEvent::Started(speak.id))).is_empty());
        let status = orch.status();
        assert!(status.is_speaking);
        assert_eq!(status.state, PlaybackState::Speaking { phase: Phase::English });
        assert_eq!(status.completed_repeats, 0);
    }

    #[test]
    fn test_mismatched_utterance_is_stale() {
        let mut orch = orchestrator();
        let speak = single_speak(&orch.start(request(RenderingMode::English, 1)));
        let bogus = UtteranceId(speak.id.0 + 100);
        assert!(orch.handle(PlaybackEvent::Engine(EngineEvent::Finished(bogus))).is_empty());
        assert!(orch.is_active());
    }

    #[test]
    fn test_finish_during_delay_is_stale() {
        let mut orch = orchestrator();
        let speak = single_speak(&orch.start(request(RenderingMode::English, 2)));
        single_delay(&orch.handle(PlaybackEvent::Engine(EngineEvent::Finished(speak.id))));
        assert!(orch.handle(PlaybackEvent::Engine(EngineEvent::Finished(speak.id))).is_empty());
        assert_eq!(orch.status().completed_repeats, 1);
    }

    #[test]
    fn test_pause_resume_forwarded_without_state_change() {
        let mut orch = orchestrator();
        assert_eq!(orch.pause(), vec![PlaybackEffect::PauseSpeaking]);
        assert_eq!(orch.resume(), vec![PlaybackEffect::ContinueSpeaking]);

        single_speak(&orch.start(request(RenderingMode::English, 1)));
        let before = orch.status();
        orch.pause();
        orch.resume();
        assert_eq!(orch.status(), before);
    }

    #[test]
    fn test_identifiers_are_unique_across_sessions() {
        let mut orch = orchestrator();
        let (_, first) = run_to_end(&mut orch, request(RenderingMode::English, 1));
        let (_, second) = run_to_end(&mut orch, request(RenderingMode::English, 1));
        assert_ne!(first.session, second.session);
    }
}
