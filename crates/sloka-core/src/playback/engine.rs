//! Speech engine seam and a simulated engine.

use super::events::EngineEvent;
use super::types::{SpeakRequest, UtteranceId};
use crate::error::{SlokaError, SlokaResult};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Where an engine reports utterance lifecycle events
#[derive(Debug, Clone)]
pub struct EngineEventSink {
    sender: mpsc::UnboundedSender<EngineEvent>,
}

impl EngineEventSink {
    /// Wrap a channel sender
    #[must_use]
    pub fn new(sender: mpsc::UnboundedSender<EngineEvent>) -> Self {
        Self { sender }
    }

    /// Report an event. Delivery to a closed player is silently dropped.
    pub fn emit(&self, event: EngineEvent) {
        if self.sender.send(event).is_err() {
            trace!(?event, "Engine event dropped, receiver closed");
        }
    }

    /// Report that speech began
    pub fn started(&self, id: UtteranceId) {
        self.emit(EngineEvent::Started(id));
    }

    /// Report that speech ended normally
    pub fn finished(&self, id: UtteranceId) {
        self.emit(EngineEvent::Finished(id));
    }

    /// Report that speech was abandoned
    pub fn cancelled(&self, id: UtteranceId) {
        self.emit(EngineEvent::Cancelled(id));
    }
}

/// A synthesizer the player hands utterances to.
///
/// Calls arrive from a single task. `speak` must return promptly and report
/// progress through the attached [`EngineEventSink`].
pub trait SpeechEngine: Send + std::fmt::Debug {
    /// Install the sink for lifecycle events
    fn attach(&mut self, sink: EngineEventSink);

    /// Begin speaking an utterance
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot accept the request
    fn speak(&mut self, request: SpeakRequest) -> SlokaResult<()>;

    /// Abort the current utterance immediately
    fn stop_speaking(&mut self);

    /// Pause the current utterance
    fn pause_speaking(&mut self);

    /// Resume a paused utterance
    fn continue_speaking(&mut self);
}

/// Granularity at which simulated speech makes progress
const TICK: Duration = Duration::from_millis(50);

/// Default time the simulated engine spends per character
pub const DEFAULT_CHAR_DURATION: Duration = Duration::from_millis(40);

/// Engine that "speaks" by sleeping, for tests, demos and silent hosts
#[derive(Debug)]
pub struct SimulatedSpeechEngine {
    sink: Option<EngineEventSink>,
    char_duration: Duration,
    paused: Arc<AtomicBool>,
    current: Option<(UtteranceId, JoinHandle<()>)>,
    transcript: Arc<Mutex<Vec<SpeakRequest>>>,
}

impl Default for SimulatedSpeechEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedSpeechEngine {
    /// Create an engine with [`DEFAULT_CHAR_DURATION`]
    #[must_use]
    pub fn new() -> Self {
        Self {
            sink: None,
            char_duration: DEFAULT_CHAR_DURATION,
            paused: Arc::new(AtomicBool::new(false)),
            current: None,
            transcript: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the time spent per character at normal rate
    #[must_use]
    pub fn with_char_duration(mut self, char_duration: Duration) -> Self {
        self.char_duration = char_duration;
        self
    }

    /// Shared handle to every request received so far
    #[must_use]
    pub fn transcript(&self) -> Arc<Mutex<Vec<SpeakRequest>>> {
        Arc::clone(&self.transcript)
    }

    /// Whether speech is currently paused
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Time spent speaking `request`, excluding its pre and post delays
    ///
    /// # Errors
    ///
    /// Returns an error if the duration does not fit in a `Duration`
    #[allow(clippy::cast_precision_loss)]
    pub fn speech_duration(&self, request: &SpeakRequest) -> SlokaResult<Duration> {
        let characters = request.text.chars().count() as f64;
        let seconds = self.char_duration.as_secs_f64()
            * characters
            * f64::from(request.rate.duration_scale());
        Duration::try_from_secs_f64(seconds).map_err(|err| {
            SlokaError::speech_engine(format!("Cannot simulate {}: {err}", request.id))
        })
    }

    fn is_busy(&self) -> bool {
        self.current
            .as_ref()
            .map_or(false, |(_, handle)| !handle.is_finished())
    }
}

impl SpeechEngine for SimulatedSpeechEngine {
    fn attach(&mut self, sink: EngineEventSink) {
        self.sink = Some(sink);
    }

    fn speak(&mut self, request: SpeakRequest) -> SlokaResult<()> {
        let sink = self
            .sink
            .clone()
            .ok_or_else(|| SlokaError::speech_engine("No event sink attached"))?;
        if self.is_busy() {
            return Err(SlokaError::speech_engine(format!(
                "Already speaking, cannot accept {}",
                request.id
            )));
        }

        let id = request.id;
        let duration = self.speech_duration(&request)?;
        let (pre_delay, post_delay) = (request.pre_delay, request.post_delay);
        let paused = Arc::clone(&self.paused);
        debug!(utterance = %id, phase = %request.phase, ?duration, "Simulating speech");
        self.transcript.lock().push(request);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(pre_delay).await;
            sink.started(id);

            let mut remaining = duration;
            while !remaining.is_zero() {
                tokio::time::sleep(TICK).await;
                if !paused.load(Ordering::SeqCst) {
                    remaining = remaining.saturating_sub(TICK);
                }
            }

            tokio::time::sleep(post_delay).await;
            sink.finished(id);
        });
        self.current = Some((id, handle));
        Ok(())
    }

    fn stop_speaking(&mut self) {
        self.paused.store(false, Ordering::SeqCst);
        if let Some((id, handle)) = self.current.take() {
            if !handle.is_finished() {
                handle.abort();
                if let Some(sink) = &self.sink {
                    sink.cancelled(id);
                }
            }
        }
    }

    fn pause_speaking(&mut self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    fn continue_speaking(&mut self) {
        self.paused.store(false, Ordering::SeqCst);
    }
}

impl Drop for SimulatedSpeechEngine {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.current.take() {
            handle.abort();
        }
    }
}
