//! Tokio driver that runs the orchestrator against a real engine and clock.

use super::engine::{EngineEventSink, SpeechEngine};
use super::events::{EngineEvent, PlaybackEffect, PlaybackEvent, PlaybackStatus};
use super::orchestrator::PlaybackOrchestrator;
use super::types::{DelayTicket, PlaybackRequest};
use crate::error::{SlokaError, SlokaResult};
use crate::voice_manager::VoiceCatalog;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug)]
enum PlayerMessage {
    Event(PlaybackEvent),
    Sync(oneshot::Sender<()>),
    Shutdown,
}

/// Handle to a running playback task.
///
/// All calls are serialised through one channel, so the orchestrator sees a
/// single ordered event stream. Dropping the handle aborts the task.
#[derive(Debug)]
pub struct VersePlayer {
    sender: mpsc::UnboundedSender<PlayerMessage>,
    status: watch::Receiver<PlaybackStatus>,
    task: Option<JoinHandle<()>>,
}

impl VersePlayer {
    /// Spawn the playback task on the current tokio runtime
    pub fn spawn<E>(catalog: Arc<dyn VoiceCatalog>, mut engine: E) -> Self
    where
        E: SpeechEngine + 'static,
    {
        let (sender, messages) = mpsc::unbounded_channel();
        let (engine_sender, engine_events) = mpsc::unbounded_channel();
        let (timer_sender, timers) = mpsc::unbounded_channel();
        let (status_sender, status) = watch::channel(PlaybackStatus::default());

        engine.attach(EngineEventSink::new(engine_sender));
        let actor = PlayerActor {
            orchestrator: PlaybackOrchestrator::new(catalog),
            engine: Box::new(engine),
            messages,
            engine_events,
            timers,
            timer_sender,
            pending_delay: None,
            status: status_sender,
        };
        let task = tokio::spawn(actor.run());
        debug!("Verse player started");

        Self {
            sender,
            status,
            task: Some(task),
        }
    }

    /// Begin a session; ignored while another session is active
    ///
    /// # Errors
    ///
    /// Returns an error if the playback task has exited
    pub fn start(&self, request: PlaybackRequest) -> SlokaResult<()> {
        self.send(PlaybackEvent::Start(request))
    }

    /// Abort the active session, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the playback task has exited
    pub fn stop(&self) -> SlokaResult<()> {
        self.send(PlaybackEvent::Stop)
    }

    /// Pause the engine
    ///
    /// # Errors
    ///
    /// Returns an error if the playback task has exited
    pub fn pause(&self) -> SlokaResult<()> {
        self.send(PlaybackEvent::Pause)
    }

    /// Resume the engine
    ///
    /// # Errors
    ///
    /// Returns an error if the playback task has exited
    pub fn resume(&self) -> SlokaResult<()> {
        self.send(PlaybackEvent::Resume)
    }

    /// Latest published status
    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        *self.status.borrow()
    }

    /// Receiver that observes every status change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PlaybackStatus> {
        self.status.clone()
    }

    /// Wait until everything sent so far is processed and no session is active
    ///
    /// # Errors
    ///
    /// Returns an error if the playback task exits while waiting
    pub async fn wait_until_idle(&self) -> SlokaResult<PlaybackStatus> {
        let (reply, barrier) = oneshot::channel();
        self.sender
            .send(PlayerMessage::Sync(reply))
            .map_err(|_| SlokaError::player_closed("Playback task exited while waiting for idle"))?;
        barrier
            .await
            .map_err(|_| SlokaError::player_closed("Playback task exited while waiting for idle"))?;

        let mut status = self.status.clone();
        let idle = status
            .wait_for(|status| status.state.is_idle())
            .await
            .map_err(|_| SlokaError::player_closed("Playback task exited while waiting for idle"))?;
        Ok(*idle)
    }

    /// Stop playback and wait for the task to exit
    ///
    /// # Errors
    ///
    /// Returns an error if the task panicked
    pub async fn shutdown(mut self) -> SlokaResult<()> {
        // a closed channel means the task is already on its way out
        let _ = self.sender.send(PlayerMessage::Shutdown);
        if let Some(task) = self.task.take() {
            task.await
                .map_err(|err| SlokaError::player_closed(format!("Playback task failed: {err}")))?;
        }
        Ok(())
    }

    fn send(&self, event: PlaybackEvent) -> SlokaResult<()> {
        self.sender
            .send(PlayerMessage::Event(event))
            .map_err(|_| SlokaError::player_closed("Playback task has exited"))
    }
}

impl Drop for VersePlayer {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

struct PlayerActor {
    orchestrator: PlaybackOrchestrator,
    engine: Box<dyn SpeechEngine>,
    messages: mpsc::UnboundedReceiver<PlayerMessage>,
    engine_events: mpsc::UnboundedReceiver<EngineEvent>,
    timers: mpsc::UnboundedReceiver<DelayTicket>,
    timer_sender: mpsc::UnboundedSender<DelayTicket>,
    pending_delay: Option<(DelayTicket, JoinHandle<()>)>,
    status: watch::Sender<PlaybackStatus>,
}

impl PlayerActor {
    async fn run(mut self) {
        loop {
            tokio::select! {
                message = self.messages.recv() => match message {
                    Some(PlayerMessage::Event(event)) => self.dispatch(event),
                    Some(PlayerMessage::Sync(reply)) => {
                        let _ = reply.send(());
                    }
                    Some(PlayerMessage::Shutdown) | None => break,
                },
                Some(event) = self.engine_events.recv() => {
                    self.dispatch(PlaybackEvent::Engine(event));
                }
                Some(ticket) = self.timers.recv() => {
                    let pending = self.pending_delay.as_ref().map(|(pending, _)| *pending);
                    if pending == Some(ticket) {
                        self.pending_delay = None;
                    }
                    self.dispatch(PlaybackEvent::DelayElapsed(ticket));
                }
            }
        }

        self.dispatch(PlaybackEvent::Stop);
        info!("Verse player stopped");
    }

    fn dispatch(&mut self, event: PlaybackEvent) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            for effect in self.orchestrator.handle(event) {
                if let Some(followup) = self.apply(effect) {
                    queue.push_back(followup);
                }
            }
        }
        self.status.send_replace(self.orchestrator.status());
    }

    fn apply(&mut self, effect: PlaybackEffect) -> Option<PlaybackEvent> {
        match effect {
            PlaybackEffect::Speak(request) => {
                let id = request.id;
                if let Err(err) = self.engine.speak(request) {
                    warn!(utterance = %id, error = %err, "Engine refused utterance");
                    return Some(PlaybackEvent::Engine(EngineEvent::Cancelled(id)));
                }
            }
            PlaybackEffect::StopSpeaking => self.engine.stop_speaking(),
            PlaybackEffect::PauseSpeaking => self.engine.pause_speaking(),
            PlaybackEffect::ContinueSpeaking => self.engine.continue_speaking(),
            PlaybackEffect::ScheduleDelay { ticket, delay } => {
                let timers = self.timer_sender.clone();
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = timers.send(ticket);
                });
                if let Some((_, previous)) = self.pending_delay.replace((ticket, handle)) {
                    previous.abort();
                }
            }
            PlaybackEffect::CancelDelay(ticket) => {
                if let Some((pending, handle)) = self.pending_delay.take() {
                    if pending == ticket {
                        handle.abort();
                    } else {
                        self.pending_delay = Some((pending, handle));
                    }
                }
            }
            PlaybackEffect::SessionEnded(outcome) => {
                debug!(
                    session = %outcome.session,
                    reason = %outcome.reason,
                    "Session outcome published"
                );
            }
        }
        None
    }
}
