use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use stackcalc::Sweep;

pub const DEFAULT_VARIABLE: &str = "M";
pub const DEFAULT_MIN: f64 = -10.0;
pub const DEFAULT_MAX: f64 = 10.0;
pub const DEFAULT_STEPS: usize = 200;

/// Words accepted in place of the keypad symbols.
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("*", "×"),
    ("/", "÷"),
    ("sqrt", "√"),
    ("sin", "Sin"),
    ("cos", "Cos"),
    ("neg", "±"),
    ("pi", "π"),
];

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub default: Option<Profile>,
    pub profiles: Option<HashMap<String, Profile>>,
    pub aliases: Option<HashMap<String, String>>,
}

/// Sweep defaults for `plot`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Profile {
    pub variable: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub steps: Option<usize>,
}

impl Profile {
    /// Merge another profile into this one (other takes priority for set fields).
    pub fn merge(&mut self, other: &Profile) {
        if other.variable.is_some() {
            self.variable = other.variable.clone();
        }
        if other.min.is_some() {
            self.min = other.min;
        }
        if other.max.is_some() {
            self.max = other.max;
        }
        if other.steps.is_some() {
            self.steps = other.steps;
        }
    }

    /// Build a sweep from this profile, with command-line values taking priority.
    pub fn sweep(&self, overrides: &Profile) -> Sweep {
        let mut p = self.clone();
        p.merge(overrides);
        Sweep::new(
            p.variable.as_deref().unwrap_or(DEFAULT_VARIABLE),
            p.min.unwrap_or(DEFAULT_MIN),
            p.max.unwrap_or(DEFAULT_MAX),
            p.steps.unwrap_or(DEFAULT_STEPS),
        )
    }
}

/// Resolved configuration: the active profile plus the alias table.
#[derive(Debug, Clone)]
pub struct Settings {
    pub profile: Profile,
    pub aliases: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            aliases: default_aliases(),
        }
    }
}

pub fn default_aliases() -> HashMap<String, String> {
    DEFAULT_ALIASES
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Walk up from the current directory looking for `.stackcalc/config.toml`.
pub fn find_project_config() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join(".stackcalc").join("config.toml");
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Global config path: `~/.config/stackcalc/config.toml`.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("stackcalc").join("config.toml"))
}

fn load_file(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            tracing::warn!("ignoring {}: {e}", path.display());
            None
        }
    }
}

/// Resolve settings by name, merging global defaults → project defaults → named profile.
pub fn load_config(profile_name: &str) -> Settings {
    let paths: Vec<PathBuf> = global_config_path()
        .into_iter()
        .chain(find_project_config())
        .collect();
    load_from(&paths, profile_name)
}

/// Merge the given config files in order; later files take priority.
pub fn load_from(paths: &[PathBuf], profile_name: &str) -> Settings {
    let mut settings = Settings::default();

    for path in paths {
        let Some(cfg) = load_file(path) else {
            continue;
        };
        tracing::debug!("loaded config {}", path.display());
        if let Some(default) = &cfg.default {
            settings.profile.merge(default);
        }
        if profile_name != "default" {
            if let Some(named) = cfg.profiles.as_ref().and_then(|p| p.get(profile_name)) {
                settings.profile.merge(named);
            }
        }
        if let Some(aliases) = cfg.aliases {
            settings.aliases.extend(aliases);
        }
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults_without_files() {
        let settings = load_from(&[], "default");
        assert_eq!(settings.profile, Profile::default());
        assert_eq!(settings.aliases.get("sqrt").map(String::as_str), Some("√"));
        let sweep = settings.profile.sweep(&Profile::default());
        assert_eq!(sweep, Sweep::new("M", DEFAULT_MIN, DEFAULT_MAX, DEFAULT_STEPS));
    }

    #[test]
    fn project_overrides_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = write(dir.path(), "global.toml", "[default]\nmin = -1.0\nmax = 1.0\n");
        let project = write(dir.path(), "project.toml", "[default]\nmax = 5.0\nsteps = 10\n");
        let settings = load_from(&[global, project], "default");
        assert_eq!(settings.profile.min, Some(-1.0));
        assert_eq!(settings.profile.max, Some(5.0));
        assert_eq!(settings.profile.steps, Some(10));
    }

    #[test]
    fn named_profile_and_aliases() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "config.toml",
            "[default]\nvariable = \"M\"\n\n[profiles.trig]\nvariable = \"t\"\nmin = 0.0\n\n[aliases]\nroot = \"√\"\n",
        );
        let settings = load_from(&[path.clone()], "trig");
        assert_eq!(settings.profile.variable.as_deref(), Some("t"));
        assert_eq!(settings.profile.min, Some(0.0));
        assert_eq!(settings.aliases.get("root").map(String::as_str), Some("√"));

        let plain = load_from(&[path], "default");
        assert_eq!(plain.profile.variable.as_deref(), Some("M"));
    }

    #[test]
    fn malformed_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write(dir.path(), "bad.toml", "[default\nmin = ");
        let settings = load_from(&[bad], "default");
        assert_eq!(settings.profile, Profile::default());
    }

    #[test]
    fn overrides_win() {
        let profile = Profile {
            variable: Some("t".into()),
            min: Some(0.0),
            max: Some(1.0),
            steps: Some(4),
        };
        let overrides = Profile {
            steps: Some(8),
            ..Profile::default()
        };
        assert_eq!(profile.sweep(&overrides), Sweep::new("t", 0.0, 1.0, 8));
    }
}
