use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::timeline::TextStep;
use crate::util::paths::config_path;

/// One intro line and how long it stays on screen.
#[derive(Debug, Clone, Deserialize)]
pub struct IntroLine {
    pub text: String,
    pub display_ms: u64,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Who the greeting is for
    pub recipient: String,
    /// The yes/no question shown in the Confirm scene
    pub question: String,
    /// Intro lines with per-line display durations
    pub intro: Vec<IntroLine>,
    /// The closing letter, rendered as markdown in the Message scene
    pub letter: String,
    /// Remote endpoint the reply is POSTed to
    pub endpoint_url: String,
    /// Looping music track started from the MusicPlay scene
    pub music_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recipient: "Purva".to_string(),
            question: "Do you wanna see what I made??".to_string(),
            intro: vec![
                IntroLine {
                    text: "It's your special Day 💝".to_string(),
                    display_ms: 4000,
                },
                IntroLine {
                    // Longer read time for the longer line.
                    text: "I have made something special for someone who is special to me"
                        .to_string(),
                    display_ms: 6500,
                },
            ],
            letter: DEFAULT_LETTER.to_string(),
            endpoint_url: "https://formspree.io/f/xeelzdel".to_string(),
            music_path: None,
        }
    }
}

const DEFAULT_LETTER: &str = "\
On this beautiful day I just want you to know how special you are to me.

Maybe you don't realize it yourself, but little by little you have become \
the most important part of my world. Your smile makes everything lighter, \
and being around you feels like home.

I don't know what the future holds, but I know this much: if I ever get \
the chance, I want to walk that road with you — not just for a while, but \
for always. ❤️

*Forever yours...* 💝";

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
struct TomlConfig {
    recipient: Option<String>,
    question: Option<String>,
    intro: Option<Vec<IntroLine>>,
    letter: Option<String>,
    endpoint_url: Option<String>,
    music_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration, layering the TOML file (if present) over the
    /// defaults. A missing file is normal; a malformed file is logged and
    /// ignored.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
        let mut config = Self::default();

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(_) => return config,
        };
        let parsed: TomlConfig = match toml::from_str(&contents) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "ignoring malformed config file"
                );
                return config;
            }
        };

        config.apply(parsed);
        config
    }

    fn apply(&mut self, toml: TomlConfig) {
        if let Some(recipient) = toml.recipient {
            self.recipient = recipient;
        }
        if let Some(question) = toml.question {
            self.question = question;
        }
        if let Some(intro) = toml.intro {
            self.intro = intro;
        }
        if let Some(letter) = toml.letter {
            self.letter = letter;
        }
        if let Some(endpoint_url) = toml.endpoint_url {
            self.endpoint_url = endpoint_url;
        }
        if let Some(music_path) = toml.music_path {
            self.music_path = Some(music_path);
        }
    }

    /// The intro lines as sequencer steps, sentinel appended.
    pub fn intro_steps(&self) -> Vec<TextStep> {
        self.intro
            .iter()
            .map(|line| TextStep::new(line.text.clone(), line.display_ms))
            .chain(std::iter::once(TextStep::sentinel()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_include_the_outlier_duration() {
        let config = Config::default();
        assert_eq!(config.intro.len(), 2);
        assert_eq!(config.intro[0].display_ms, 4000);
        assert_eq!(config.intro[1].display_ms, 6500);
    }

    #[test]
    fn intro_steps_end_with_the_sentinel() {
        let steps = Config::default().intro_steps();
        assert_eq!(steps.len(), 3);
        assert!(steps.last().unwrap().text.is_empty());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "recipient = \"Asha\"").unwrap();
        writeln!(file, "endpoint_url = \"https://example.test/reply\"").unwrap();

        let config = Config::load(Some(&path));
        assert_eq!(config.recipient, "Asha");
        assert_eq!(config.endpoint_url, "https://example.test/reply");
        // Untouched keys keep their defaults.
        assert_eq!(config.intro.len(), 2);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "recipient = [not toml").unwrap();

        let config = Config::load(Some(&path));
        assert_eq!(config.recipient, "Purva");
    }
}
