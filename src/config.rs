/*
 *  config.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Configuration: YAML file layered under CLI overrides
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::time::Duration;
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::display::layout::{CLASSIC_HEIGHT, CLASSIC_WIDTH, MAX_CANVAS, MIN_CANVAS};
use crate::face::message::MessageKeys;
use crate::face::scheduler::{SchedulerConfig, DEFAULT_REVEAL_DELAY};
use crate::face::state::DEFAULT_STEP_GOAL;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration. Unset fields fall back to the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// General options
    pub log_level: Option<String>, // e.g., "info" | "debug"
    /// canvas geometry
    pub display: Option<DisplayConfig>,
    /// face behaviour
    pub face: Option<FaceConfig>,
    /// inbound message keys
    pub message: Option<MessageConfig>,
    /// write every frame to this PBM file
    pub snapshot: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DisplayConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FaceConfig {
    pub step_goal: Option<u32>,
    pub reveal_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MessageConfig {
    pub temperature_key: Option<u32>,
    pub icon_key: Option<u32>,
}

impl Config {
    /// Canvas size, 144x168 unless configured
    pub fn canvas_size(&self) -> (u32, u32) {
        let display = self.display.as_ref();
        (
            display.and_then(|d| d.width).unwrap_or(CLASSIC_WIDTH),
            display.and_then(|d| d.height).unwrap_or(CLASSIC_HEIGHT),
        )
    }

    pub fn step_goal(&self) -> NonZeroU32 {
        self.face
            .as_ref()
            .and_then(|f| f.step_goal)
            .and_then(NonZeroU32::new)
            .unwrap_or(DEFAULT_STEP_GOAL)
    }

    pub fn reveal_delay(&self) -> Duration {
        self.face
            .as_ref()
            .and_then(|f| f.reveal_delay_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REVEAL_DELAY)
    }

    pub fn message_keys(&self) -> MessageKeys {
        let defaults = MessageKeys::default();
        let message = self.message.as_ref();
        MessageKeys {
            temperature: message.and_then(|m| m.temperature_key).unwrap_or(defaults.temperature),
            icon: message.and_then(|m| m.icon_key).unwrap_or(defaults.icon),
        }
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            reveal_delay: self.reveal_delay(),
            message_keys: self.message_keys(),
        }
    }

    /// Effective log filter
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "dialface", about = "Analog watch face renderer", version)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// shorthand for --log-level debug
    #[arg(long, action = ArgAction::SetTrue)]
    pub debug: bool,
    #[arg(long)]
    pub width: Option<u32>,
    #[arg(long)]
    pub height: Option<u32>,
    #[arg(long)]
    pub step_goal: Option<u32>,
    #[arg(long)]
    pub reveal_delay_ms: Option<u64>,
    /// write each frame to this PBM file
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub snapshot: Option<PathBuf>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<Config, ConfigError> {
    let cli = Cli::parse();
    let cfg = load_from(&cli)?;

    if cli.dump_config {
        // Pretty YAML of effective config (nice for debugging)
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok(cfg)
}

/// Everything `load` does short of parsing argv
pub fn load_from(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;
    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/dialface/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/dialface/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/dialface.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    let p = PathBuf::from("dialface.yaml");
    if p.exists() { return Some(p) }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    let cfg: Config = serde_yaml::from_str(s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    // top-level
    if src.log_level.is_some()      { dst.log_level = src.log_level; }
    if src.snapshot.is_some()       { dst.snapshot = src.snapshot; }
    // display
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => {
            if s.width.is_some()    { d.width = s.width; }
            if s.height.is_some()   { d.height = s.height; }
        }
        _ => {}
    }
    // face
    match (&mut dst.face, src.face) {
        (None, Some(c)) => dst.face = Some(c),
        (Some(d), Some(s)) => {
            if s.step_goal.is_some()        { d.step_goal = s.step_goal; }
            if s.reveal_delay_ms.is_some()  { d.reveal_delay_ms = s.reveal_delay_ms; }
        }
        _ => {}
    }
    // message
    match (&mut dst.message, src.message) {
        (None, Some(c)) => dst.message = Some(c),
        (Some(d), Some(s)) => {
            if s.temperature_key.is_some()  { d.temperature_key = s.temperature_key; }
            if s.icon_key.is_some()         { d.icon_key = s.icon_key; }
        }
        _ => {}
    }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()      { cfg.log_level = cli.log_level.clone(); }
    if cli.debug                    { cfg.log_level = Some("debug".into()); }
    if cli.snapshot.is_some()       { cfg.snapshot = cli.snapshot.clone(); }

    if cli.width.is_some() || cli.height.is_some() {
        let display = cfg.display.get_or_insert_with(DisplayConfig::default);
        if cli.width.is_some()      { display.width = cli.width; }
        if cli.height.is_some()     { display.height = cli.height; }
    }
    if cli.step_goal.is_some() || cli.reveal_delay_ms.is_some() {
        let face = cfg.face.get_or_insert_with(FaceConfig::default);
        if cli.step_goal.is_some()        { face.step_goal = cli.step_goal; }
        if cli.reveal_delay_ms.is_some()  { face.reveal_delay_ms = cli.reveal_delay_ms; }
    }
}

/// Put any invariants here (required fields, ranges, etc.)
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(level) = cfg.log_level.as_deref() {
        if level.parse::<log::LevelFilter>().is_err() {
            return Err(ConfigError::Validation(format!("unknown log_level {level:?}")));
        }
    }
    let (w, h) = cfg.canvas_size();
    if w < MIN_CANVAS || h < MIN_CANVAS {
        return Err(ConfigError::Validation(format!(
            "display width/height must be at least {MIN_CANVAS}, got {w}x{h}"
        )));
    }
    if w > MAX_CANVAS || h > MAX_CANVAS {
        return Err(ConfigError::Validation(format!(
            "display width/height must be at most {MAX_CANVAS}, got {w}x{h}"
        )));
    }
    if let Some(face) = cfg.face.as_ref() {
        if face.step_goal == Some(0) {
            return Err(ConfigError::Validation("face step_goal must be > 0".into()));
        }
        if face.reveal_delay_ms == Some(0) {
            return Err(ConfigError::Validation("face reveal_delay_ms must be > 0".into()));
        }
    }
    let keys = cfg.message_keys();
    if keys.temperature == keys.icon {
        return Err(ConfigError::Validation(format!(
            "message temperature_key and icon_key must differ (both {})",
            keys.temperature
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Config {
        parse_yaml(s).unwrap()
    }

    #[test]
    fn defaults_match_the_classic_face() {
        let cfg = Config::default();
        assert_eq!(cfg.canvas_size(), (144, 168));
        assert_eq!(cfg.step_goal().get(), 100);
        assert_eq!(cfg.reveal_delay(), Duration::from_millis(5000));
        assert_eq!(cfg.message_keys(), MessageKeys { temperature: 0, icon: 1 });
        assert_eq!(cfg.log_level(), "info");
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn yaml_then_cli_precedence() {
        let mut cfg = Config::default();
        merge(
            &mut cfg,
            yaml("display:\n  width: 180\n  height: 180\nface:\n  step_goal: 8000\n"),
        );
        let cli = Cli {
            height: Some(200),
            reveal_delay_ms: Some(2500),
            debug: true,
            ..Default::default()
        };
        apply_cli_overrides(&mut cfg, &cli);

        assert_eq!(cfg.canvas_size(), (180, 200));
        assert_eq!(cfg.step_goal().get(), 8000);
        assert_eq!(cfg.reveal_delay(), Duration::from_millis(2500));
        assert_eq!(cfg.log_level(), "debug");
    }

    #[test]
    fn later_yaml_only_overrides_what_it_sets() {
        let mut cfg = yaml("message:\n  temperature_key: 5\n  icon_key: 6\n");
        merge(&mut cfg, yaml("message:\n  icon_key: 7\n"));
        assert_eq!(cfg.message_keys(), MessageKeys { temperature: 5, icon: 7 });
    }

    #[test]
    fn validation_rejects_bad_values() {
        for bad in [
            "display:\n  width: 32\n",
            "display:\n  height: 4096\n",
            "face:\n  step_goal: 0\n",
            "face:\n  reveal_delay_ms: 0\n",
            "message:\n  temperature_key: 3\n  icon_key: 3\n",
            "log_level: chatty\n",
        ] {
            assert!(
                matches!(validate(&yaml(bad)), Err(ConfigError::Validation(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn oversized_canvas_from_cli_is_rejected() {
        let mut cfg = Config::default();
        let cli = Cli {
            width: Some(65536),
            height: Some(65536),
            ..Default::default()
        };
        apply_cli_overrides(&mut cfg, &cli);
        assert!(matches!(validate(&cfg), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let cli = Cli {
            config: Some(PathBuf::from("/nonexistent/dialface.yaml")),
            ..Default::default()
        };
        assert!(matches!(load_from(&cli), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn unknown_yaml_is_rejected_by_type() {
        assert!(parse_yaml("display:\n  width: wide\n").is_err());
    }
}
