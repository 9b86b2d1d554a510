/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory, the CWD or the data
/// directories. A missing file means defaults; so does any missing key.
/// A file that exists but cannot be read or parsed is reported as a
/// `ConfigError` and the caller decides whether to carry on with defaults.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::spring::SpringCurve;

const APP_DIR: &str = "syncone";
const FILE_NAME: &str = "config.toml";

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub timing: TimingConfig,
    pub display: DisplayConfig,
    pub log: LogConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimingConfig {
    pub frame_ms: u64,
    pub counter_duration_secs: f64,
    pub counter_bounce: f64,
}

impl TimingConfig {
    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }

    pub fn spring(&self) -> SpringCurve {
        let secs = if self.counter_duration_secs.is_finite() {
            self.counter_duration_secs.clamp(0.0, 600.0)
        } else {
            default_counter_duration()
        };
        SpringCurve::new(Duration::from_secs_f64(secs), self.counter_bounce)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayConfig {
    pub mouse: bool,
    /// Cells a metric card must clear inside the body to count as in view.
    pub visibility_margin: u16,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogConfig {
    /// `None` disables logging.
    pub file: Option<PathBuf>,
    pub level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("{} parse error: {source}", path.display())]
    Parse { path: PathBuf, source: toml::de::Error },
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    timing: TomlTiming,
    #[serde(default)]
    display: TomlDisplay,
    #[serde(default)]
    log: TomlLog,
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_frame_ms")]
    frame_ms: u64,
    #[serde(default = "default_counter_duration")]
    counter_duration_secs: f64,
    #[serde(default = "default_counter_bounce")]
    counter_bounce: f64,
}

#[derive(Deserialize, Debug)]
struct TomlDisplay {
    #[serde(default = "default_mouse")]
    mouse: bool,
    #[serde(default = "default_visibility_margin")]
    visibility_margin: u16,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default = "default_log_file")]
    file: String,
    #[serde(default = "default_log_level")]
    level: String,
}

// ── Defaults ──

fn default_frame_ms() -> u64 { 33 }          // ~30 fps
fn default_counter_duration() -> f64 { 2.0 }
fn default_counter_bounce() -> f64 { 0.0 }   // critically damped
fn default_mouse() -> bool { true }
fn default_visibility_margin() -> u16 { 1 }
fn default_log_file() -> String { "syncone.log".into() }
fn default_log_level() -> String { "info".into() }

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming {
            frame_ms: default_frame_ms(),
            counter_duration_secs: default_counter_duration(),
            counter_bounce: default_counter_bounce(),
        }
    }
}

impl Default for TomlDisplay {
    fn default() -> Self {
        TomlDisplay {
            mouse: default_mouse(),
            visibility_margin: default_visibility_margin(),
        }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog {
            file: default_log_file(),
            level: default_log_level(),
        }
    }
}

impl From<TomlConfig> for AppConfig {
    fn from(t: TomlConfig) -> Self {
        let file = t.log.file.trim();
        AppConfig {
            timing: TimingConfig {
                frame_ms: t.timing.frame_ms,
                counter_duration_secs: t.timing.counter_duration_secs,
                counter_bounce: t.timing.counter_bounce,
            },
            display: DisplayConfig {
                mouse: t.display.mouse,
                visibility_margin: t.display.visibility_margin,
            },
            log: LogConfig {
                file: (!file.is_empty()).then(|| PathBuf::from(file)),
                level: t.log.level,
            },
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        TomlConfig::default().into()
    }
}

// ── Loading ──

impl AppConfig {
    /// Load the first `config.toml` found in the candidate directories.
    /// No file at all is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&candidate_dirs())
    }

    pub fn load_from(search_dirs: &[PathBuf]) -> Result<Self, ConfigError> {
        match search_dirs.iter().map(|d| d.join(FILE_NAME)).find(|p| p.exists()) {
            Some(path) => Self::read(&path),
            None => Ok(Self::default()),
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(Self::from)
    }
}

/// Candidate directories to search: exe dir + CWD + data paths (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG data home
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share").join(APP_DIR);
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    // 4. System data directory
    let sys = PathBuf::from("/usr/share").join(APP_DIR);
    if sys.is_dir() && !dirs.iter().any(|d| d == &sys) {
        dirs.push(sys);
    }

    // 5. Fallback
    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}
