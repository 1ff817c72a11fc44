use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use clap::ArgMatches;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::regenerate::RevealPolicy;
use crate::TimerResult;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    pub notify: bool,
    pub quiet: bool,
    pub explain: bool,
    pub verbose: bool,
    pub tombstone_path: Option<PathBuf>,
    pub reveal_on_resume: RevealPolicy,
}

/// What the configuration file may contain; every key is optional.
#[derive(Debug, Serialize, Deserialize, Default)]
struct RawConfig {
    tombstone_path: Option<PathBuf>,
    notify: Option<bool>,
    quiet: Option<bool>,
    reveal_on_resume: Option<String>,
}


fn convert_raw_config(raw_config: RawConfig) -> TimerResult<Config> {
    let reveal_on_resume = match raw_config.reveal_on_resume {
        Some(s) => RevealPolicy::from_str(&s)?,
        None => RevealPolicy::default(),
    };

    Ok(Config {
        tombstone_path: raw_config
            .tombstone_path
            .as_deref()
            .map(substitute_env_variable),
        notify: raw_config.notify.unwrap_or_default(),
        quiet: raw_config.quiet.unwrap_or_default(),
        reveal_on_resume,
        ..Default::default()
    })
}

pub fn load_config_from_matches(matches: &ArgMatches) -> TimerResult<Config> {
    let mut conf = Config::default();

    if let Some(config_paths) = matches.values_of("config") {
        for config_path in config_paths {
            conf = load_config(config_path)?;
        }
    }

    conf.notify |= matches.is_present("notify");
    conf.quiet |= matches.is_present("quiet");
    conf.explain |= matches.is_present("explain");
    conf.verbose |= matches.is_present("verbose");

    if let Some(p) = matches.value_of("tombstone") {
        conf.tombstone_path = Some(substitute_env_variable(Path::new(p)));
    }

    Ok(conf)
}

fn load_config(path: &str) -> TimerResult<Config> {
    let config_str =
        fs::read_to_string(path).with_context(|| format!("Could not read config {}", path))?;
    let raw_config: RawConfig =
        toml::from_str(&config_str).with_context(|| format!("Malformed config {}", path))?;

    convert_raw_config(raw_config)
}

/// Replace $VAR in path, when the full component is such a var.
fn substitute_env_variable(path: &Path) -> PathBuf {
    let mut new_path = PathBuf::new();
    for part in path.iter() {
        if let Some(var) = part.to_str().and_then(|s| s.strip_prefix('$')) {
            if let Ok(r) = env::var(var) {
                new_path.push(r);
                continue;
            }
        }
        new_path.push(part);
    }

    new_path
}
