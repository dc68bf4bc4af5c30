use std::{fs, io, path::Path};

use anyhow::Context;
use serde::Deserialize;
use shared::domain::RotationId;

pub const SETTINGS_FILE: &str = "rota.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub rotation_id: RotationId,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:3000".into(),
            rotation_id: RotationId(1),
        }
    }
}

impl Settings {
    /// Command-line flags win over everything else.
    pub fn with_overrides(mut self, api_url: Option<String>, rotation_id: Option<i64>) -> Self {
        if let Some(v) = api_url {
            self.api_url = v;
        }
        if let Some(v) = rotation_id {
            self.rotation_id = RotationId(v);
        }
        self
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
    rotation_id: Option<i64>,
}

pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub(crate) fn load_settings_from(
    file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(file) {
        Ok(raw) => {
            let file_cfg: FileSettings = toml::from_str(&raw)
                .with_context(|| format!("failed to parse settings file '{}'", file.display()))?;
            if let Some(v) = file_cfg.api_url {
                settings.api_url = v;
            }
            if let Some(v) = file_cfg.rotation_id {
                settings.rotation_id = RotationId(v);
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", file.display()));
        }
    }

    if let Some(v) = env("ROTA_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }

    for name in ["ROTA_ROTATION_ID", "APP__ROTATION_ID"] {
        if let Some(v) = env(name) {
            match v.trim().parse::<i64>() {
                Ok(parsed) => settings.rotation_id = RotationId(parsed),
                Err(err) => {
                    tracing::warn!(variable = name, value = %v, "ignoring rotation id: {err}")
                }
            }
        }
    }

    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
