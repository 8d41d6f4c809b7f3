//! Subcommand handlers.

use anyhow::{Context, Result};
use sloka_core::{
    clean_iast, devanagari_to_phonetic, romanize, EngineEventSink, PlaybackRequest,
    RenderingMode, SimulatedSpeechEngine, SlokaConfig, SlokaResult, SpeakRequest, SpeechEngine,
    Verse, VersePlayer, VoiceSelector,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub fn phonetic(text: &str, no_syllabify: bool) {
    if no_syllabify {
        println!("{}", devanagari_to_phonetic(text));
    } else {
        println!("{}", romanize(text));
    }
}

pub fn iast(text: &str) {
    println!("{}", clean_iast(text));
}

pub fn voices(config: &SlokaConfig) {
    let catalog = config.catalog();
    println!("{} configured voice(s)", config.voices.len());
    for mode in RenderingMode::ALL {
        for &phase in mode.phases() {
            let category = VoiceSelector::category_for(mode, phase);
            let chosen = VoiceSelector::select(&catalog, mode, phase).map_or_else(
                || "(engine default)".to_string(),
                |voice| format!("{} [{}, {}]", voice.id, voice.language, voice.quality),
            );
            println!(
                "{:<24} {:<16} {:<15} {chosen}",
                mode.to_string(),
                phase.to_string(),
                category.to_string()
            );
        }
    }
}

pub struct PlayOptions {
    pub mode: Option<RenderingMode>,
    pub repeats: Option<u32>,
    pub slow: bool,
    pub char_ms: u64,
}

pub async fn play(config: &SlokaConfig, verse_path: &Path, options: PlayOptions) -> Result<()> {
    let contents = std::fs::read_to_string(verse_path)
        .with_context(|| format!("Failed to read verse file {}", verse_path.display()))?;
    let verse: Verse = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid verse JSON in {}", verse_path.display()))?;

    let mut preferences = config.playback;
    if let Some(mode) = options.mode {
        preferences.mode = mode;
    }
    if let Some(repeats) = options.repeats {
        preferences.repeat_count = repeats;
    }
    preferences.slow_speed |= options.slow;
    let request: PlaybackRequest = preferences
        .request_for(&verse)
        .context("Invalid playback options")?;

    println!(
        "{} | {} | {} repeat(s){}",
        verse.reference(),
        request.mode(),
        request.repeats(),
        if request.slow_speed() { " | slow" } else { "" }
    );

    let engine = PrintingEngine {
        inner: SimulatedSpeechEngine::new()
            .with_char_duration(Duration::from_millis(options.char_ms)),
    };
    let player = VersePlayer::spawn(Arc::new(config.catalog()), engine);
    player.start(request)?;

    let status = tokio::select! {
        status = player.wait_until_idle() => status?,
        _ = tokio::signal::ctrl_c() => {
            player.stop()?;
            player.wait_until_idle().await?
        }
    };
    if let Some(outcome) = status.last_outcome {
        println!(
            "Session {}: {}/{} repeat(s)",
            outcome.reason, outcome.completed_repeats, outcome.total_repeats
        );
    }
    player.shutdown().await?;
    Ok(())
}

/// Simulated engine that echoes every utterance to stdout
#[derive(Debug)]
struct PrintingEngine {
    inner: SimulatedSpeechEngine,
}

impl SpeechEngine for PrintingEngine {
    fn attach(&mut self, sink: EngineEventSink) {
        self.inner.attach(sink);
    }

    fn speak(&mut self, request: SpeakRequest) -> SlokaResult<()> {
        let voice = request
            .voice
            .as_ref()
            .map_or("default", |voice| voice.id.as_str());
        println!(
            "[{}] {:<15} voice={} rate={}\n    {}",
            request.id,
            request.phase.to_string(),
            voice,
            request.rate.value(),
            request.text
        );
        self.inner.speak(request)
    }

    fn stop_speaking(&mut self) {
        self.inner.stop_speaking();
    }

    fn pause_speaking(&mut self) {
        self.inner.pause_speaking();
    }

    fn continue_speaking(&mut self) {
        self.inner.continue_speaking();
    }
}
