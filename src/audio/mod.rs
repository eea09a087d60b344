//! Background music playback.
//!
//! One looping track, started by an explicit user action and never stopped
//! programmatically. Start is fire-and-forget: playback runs on its own
//! thread, failures are logged and the experience continues silent.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub struct MusicPlayer {
    path: Option<PathBuf>,
    started: bool,
}

impl MusicPlayer {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            started: false,
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Start looping playback. Subsequent calls are no-ops.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        let Some(path) = self.path.clone() else {
            tracing::info!("no music track configured, staying silent");
            return;
        };

        let spawn = std::thread::Builder::new()
            .name("music".into())
            .spawn(move || {
                if let Err(e) = play_looping(&path) {
                    tracing::warn!(
                        error = %e,
                        path = %path.display(),
                        "music playback failed"
                    );
                }
            });
        if let Err(e) = spawn {
            tracing::warn!(error = %e, "failed to spawn music thread");
        }
    }
}

fn play_looping(path: &Path) -> Result<()> {
    let (_stream, handle) =
        rodio::OutputStream::try_default().context("no audio output device")?;
    let sink = rodio::Sink::try_new(&handle).context("failed to open audio sink")?;
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let source = rodio::Decoder::new_looped(BufReader::new(file)).context("decode audio")?;
    sink.append(source);
    // Looping source: this parks the thread for the life of the process.
    sink.sleep_until_end();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_without_a_track_is_a_silent_no_op() {
        let mut player = MusicPlayer::new(None);
        assert!(!player.is_started());
        player.start();
        assert!(player.is_started());
        // Idempotent.
        player.start();
        assert!(player.is_started());
    }
}
