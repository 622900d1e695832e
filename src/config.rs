/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to defaults if the file is missing or incomplete.
/// Game rules are fixed; only pacing, output and diagnostics are tunable.

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::sprite::ClipMode;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub speed: SpeedConfig,
    pub render: RenderConfig,
    pub general: GeneralConfig,
    pub clip: ClipMode,
}

#[derive(Clone, Debug)]
pub struct SpeedConfig {
    pub tick_ms: u64,      // input wait per tick, doubles as frame delay
    pub min_tick_ms: u64,
    pub tick_step_ms: u64, // change per '+' / '-'
}

#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub color: bool,
}

#[derive(Clone, Debug)]
pub struct GeneralConfig {
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    render: TomlRender,
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    sprite: TomlSprite,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_tick")]
    tick_ms: u64,
    #[serde(default = "default_min_tick")]
    min_tick_ms: u64,
    #[serde(default = "default_tick_step")]
    tick_step_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlRender {
    #[serde(default = "default_color")]
    color: bool,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    log_file: Option<String>,
    #[serde(default = "default_log_level")]
    log_level: String,
}

#[derive(Deserialize, Debug, Default)]
struct TomlSprite {
    #[serde(default)]
    legacy_clip: bool,
}

// ── Defaults ──

fn default_tick() -> u64 { 100 }
fn default_min_tick() -> u64 { 50 }
fn default_tick_step() -> u64 { 20 }
fn default_color() -> bool { true }
fn default_log_level() -> String { "info".into() }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed {
            tick_ms: default_tick(),
            min_tick_ms: default_min_tick(),
            tick_step_ms: default_tick_step(),
        }
    }
}

impl Default for TomlRender {
    fn default() -> Self {
        TomlRender { color: default_color() }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            seed: None,
            log_file: None,
            log_level: default_log_level(),
        }
    }
}

// ── Loading ──

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from(TomlConfig::default())
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(cfg: TomlConfig) -> Self {
        let min_tick_ms = cfg.speed.min_tick_ms.max(1);
        GameConfig {
            speed: SpeedConfig {
                tick_ms: cfg.speed.tick_ms.max(min_tick_ms),
                min_tick_ms,
                tick_step_ms: cfg.speed.tick_step_ms,
            },
            render: RenderConfig { color: cfg.render.color },
            general: GeneralConfig {
                seed: cfg.general.seed,
                log_file: cfg.general.log_file.map(PathBuf::from),
                log_level: cfg.general.log_level,
            },
            clip: if cfg.sprite.legacy_clip { ClipMode::Legacy } else { ClipMode::Strict },
        }
    }
}

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        GameConfig::from(load_toml(&candidate_dirs()))
    }

    #[cfg(test)]
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(GameConfig::from)
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
/// Runs before the terminal is taken over, so warnings go to stderr.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.speed.tick_ms, 100);
        assert_eq!(cfg.speed.min_tick_ms, 50);
        assert_eq!(cfg.speed.tick_step_ms, 20);
        assert!(cfg.render.color);
        assert_eq!(cfg.general.seed, None);
        assert_eq!(cfg.general.log_file, None);
        assert_eq!(cfg.general.log_level, "info");
        assert_eq!(cfg.clip, ClipMode::Strict);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = GameConfig::parse(
            "[general]\nseed = 42\nlog_file = \"run.log\"\n\n[sprite]\nlegacy_clip = true\n",
        )
        .unwrap();
        assert_eq!(cfg.general.seed, Some(42));
        assert_eq!(cfg.general.log_file, Some(PathBuf::from("run.log")));
        assert_eq!(cfg.clip, ClipMode::Legacy);
        assert_eq!(cfg.speed.tick_ms, 100);
        assert!(cfg.render.color);
    }

    #[test]
    fn tick_never_below_minimum() {
        let cfg = GameConfig::parse("[speed]\ntick_ms = 10\nmin_tick_ms = 40\n").unwrap();
        assert_eq!(cfg.speed.tick_ms, 40);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(GameConfig::parse("[speed]\ntick_ms = \"fast\"\n").is_err());
    }
}
