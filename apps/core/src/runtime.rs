use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::action_executor::SystemShell;
use crate::config::{self, ConfigError};
use crate::core_service::{CoreService, ServiceError};
use crate::logging;
use crate::plugin_sdk::Query;
use crate::transport::handle_json;

#[derive(Debug)]
pub enum RuntimeError {
    Config(ConfigError),
    Service(ServiceError),
    Io(std::io::Error),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Service(error) => write!(f, "service error: {error}"),
            Self::Io(error) => write!(f, "io error: {error}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<ConfigError> for RuntimeError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ServiceError> for RuntimeError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Search,
    Json,
    ListProfiles,
    Stdio,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuntimeOptions {
    pub mode: RunMode,
    pub config_path: Option<PathBuf>,
    pub profiles_root: Option<PathBuf>,
    pub terms: Vec<String>,
}

pub fn usage() -> &'static str {
    "usage: places-search [--config PATH] [--profiles-root PATH] \
     [--list-profiles | --stdio | --json] [-h] [TERM...]"
}

/// Options come first; the first non-option argument (or anything after
/// `--`) starts the search text, so a leading `-h` stays part of the query.
pub fn parse_cli_args(args: &[String]) -> Result<RuntimeOptions, String> {
    let mut options = RuntimeOptions::default();
    let mut index = 0;

    while index < args.len() {
        let arg = args[index].as_str();
        match arg {
            "--config" | "--profiles-root" => {
                let value = args
                    .get(index + 1)
                    .filter(|v| !v.trim().is_empty())
                    .ok_or_else(|| format!("{arg} requires a path. {}", usage()))?;
                if arg == "--config" {
                    options.config_path = Some(PathBuf::from(value));
                } else {
                    options.profiles_root = Some(PathBuf::from(value));
                }
                index += 2;
            }
            "--json" => {
                set_mode(&mut options, RunMode::Json)?;
                index += 1;
            }
            "--list-profiles" => {
                set_mode(&mut options, RunMode::ListProfiles)?;
                index += 1;
            }
            "--stdio" => {
                set_mode(&mut options, RunMode::Stdio)?;
                index += 1;
            }
            "--" => {
                index += 1;
                break;
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown option '{other}'. {}", usage()));
            }
            _ => break,
        }
    }

    options.terms = args[index..].to_vec();
    let takes_terms = matches!(options.mode, RunMode::Search | RunMode::Json);
    if !takes_terms && !options.terms.is_empty() {
        return Err(format!("search terms are not accepted in this mode. {}", usage()));
    }
    Ok(options)
}

fn set_mode(options: &mut RuntimeOptions, mode: RunMode) -> Result<(), String> {
    if options.mode != RunMode::Search && options.mode != mode {
        return Err(format!("conflicting mode flags. {}", usage()));
    }
    options.mode = mode;
    Ok(())
}

fn startup_line(mode: RunMode, service: &CoreService) -> String {
    format!(
        "[places-search] startup mode={mode:?} profiles_root={} config_path={}",
        service.config().profiles_root.display(),
        service.config().config_path.display(),
    )
}

pub fn run_with_options(options: RuntimeOptions) -> Result<(), RuntimeError> {
    if let Err(error) = logging::init() {
        eprintln!("[places-search] logging disabled: {error}");
    }

    let mut cfg = config::load(options.config_path.as_deref())?;
    if let Some(root) = options.profiles_root {
        cfg.profiles_root = root;
    }
    let service = CoreService::new(cfg)?;
    // stdout carries results and the JSON protocol, so status goes to stderr.
    let startup = startup_line(options.mode, &service);
    eprintln!("{startup}");
    logging::info(&startup);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match options.mode {
        RunMode::ListProfiles => {
            for profile in service.list_profiles()? {
                writeln!(
                    out,
                    "{}\t{}\t{} bytes",
                    profile.profile_name,
                    profile.places_path.display(),
                    profile.db_size
                )?;
            }
        }
        RunMode::Stdio => {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                writeln!(out, "{}", handle_json(&service, &SystemShell, &line))?;
                out.flush()?;
            }
        }
        RunMode::Search | RunMode::Json => {
            let query = Query::from_text(&options.terms.join(" "));
            let results = service.search(&query.remainder, &query.action_parameters)?;
            if options.mode == RunMode::Json {
                let encoded = serde_json::to_string_pretty(&results)
                    .map_err(|e| RuntimeError::Io(std::io::Error::other(e)))?;
                writeln!(out, "{encoded}")?;
            } else {
                for item in results {
                    writeln!(out, "{}\t{}", item.title, item.subtitle)?;
                }
            }
        }
    }
    Ok(())
}
