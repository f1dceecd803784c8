//! Local state under ~/.aura: committed events and CLI configuration.

use anyhow::{Context, Result};
use aura_core::CalendarEvent;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub fn aura_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".aura"))
}

pub fn ensure_aura_home() -> Result<PathBuf> {
    let dir = aura_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiSection {
                base_url: aura_client::DEFAULT_BASE_URL.to_string(),
            },
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_aura_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let cfg = Config::default();
    let s = toml::to_string_pretty(&cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    println!("Wrote {}", p.display());
    Ok(())
}

/// Committed calendar events, as persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EventsFile {
    pub updated_at_utc: Option<String>,
    pub events: Vec<CalendarEvent>,
}

pub fn events_path() -> Result<PathBuf> {
    Ok(ensure_aura_home()?.join("events.json"))
}

pub fn read_events() -> Result<Vec<CalendarEvent>> {
    read_events_from(&events_path()?)
}

pub fn write_events(events: &[CalendarEvent]) -> Result<()> {
    write_events_to(&events_path()?, events)
}

fn read_events_from(path: &Path) -> Result<Vec<CalendarEvent>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let file: EventsFile = serde_json::from_str(&s).context("parse events.json")?;
    Ok(file.events)
}

fn write_events_to(path: &Path, events: &[CalendarEvent]) -> Result<()> {
    let file = EventsFile {
        updated_at_utc: Some(chrono::Utc::now().to_rfc3339()),
        events: events.to_vec(),
    };
    let json = serde_json::to_string_pretty(&file)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
