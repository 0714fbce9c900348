use std::path::PathBuf;

use crate::action_executor::{LaunchError, ShellRunner};
use crate::config::{validate, Config};
use crate::contract::{CoreRequest, CoreResponse, OpenResponse, QueryResponse};
use crate::logging;
use crate::places_store::{self, StoreError};
use crate::presenter::{present, ResultItem};
use crate::profile::{self, ProfileError, ProfileLocation};
use crate::query_builder::build_query;
use crate::query_dsl::{classify, SearchRequest};

#[derive(Debug)]
pub enum ServiceError {
    Config(String),
    ProfileNotFound(PathBuf),
    ProfileUnreadable { root: PathBuf, message: String },
    StoreUnavailable { path: PathBuf, message: String },
    Query(String),
    Launch(LaunchError),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::ProfileNotFound(root) => write!(
                f,
                "profile not found: no places store under {}",
                root.display()
            ),
            Self::ProfileUnreadable { root, message } => write!(
                f,
                "profile not found: cannot read {}: {message}",
                root.display()
            ),
            Self::StoreUnavailable { path, message } => write!(
                f,
                "store unavailable at {}: {message}",
                path.display()
            ),
            Self::Query(error) => write!(f, "query error: {error}"),
            Self::Launch(error) => write!(f, "launch error: {error}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Unavailable { path, message } => Self::StoreUnavailable { path, message },
            StoreError::Query(message) => Self::Query(message),
        }
    }
}

impl From<ProfileError> for ServiceError {
    fn from(value: ProfileError) -> Self {
        match value {
            ProfileError::NotFound { root } => Self::ProfileNotFound(root),
            ProfileError::Io { root, message } => Self::ProfileUnreadable { root, message },
        }
    }
}

impl From<LaunchError> for ServiceError {
    fn from(value: LaunchError) -> Self {
        Self::Launch(value)
    }
}

/// Runs the classify → build → fetch → normalize → present pipeline. Holds
/// only configuration; every call resolves the profile and opens its own
/// connection.
pub struct CoreService {
    config: Config,
}

impl CoreService {
    pub fn new(config: Config) -> Result<Self, ServiceError> {
        validate(&config).map_err(ServiceError::Config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Host-facing query. Errors are logged and turned into an empty result.
    pub fn query(&self, raw_remainder: &str, action_parameters: &[String]) -> Vec<ResultItem> {
        match self.search(raw_remainder, action_parameters) {
            Ok(items) => items,
            Err(error) => {
                logging::warn(&format!("places search failed: {error}"));
                Vec::new()
            }
        }
    }

    pub fn search(
        &self,
        raw_remainder: &str,
        action_parameters: &[String],
    ) -> Result<Vec<ResultItem>, ServiceError> {
        let request = classify(raw_remainder, action_parameters);
        self.search_request(&request)
    }

    pub fn search_request(&self, request: &SearchRequest) -> Result<Vec<ResultItem>, ServiceError> {
        let places_path = self.places_path()?;
        self.search_at(request, &places_path)
    }

    /// Same as [`CoreService::search_request`] against an explicit store path.
    pub fn search_at(
        &self,
        request: &SearchRequest,
        places_path: &std::path::Path,
    ) -> Result<Vec<ResultItem>, ServiceError> {
        let spec = build_query(request);
        let rows = places_store::fetch(&spec, places_path, self.config.busy_timeout_ms)?;
        let places = places_store::normalize_all(rows)?;
        logging::info(&format!(
            "places search template={} rows={}",
            spec.template.id(),
            places.len()
        ));
        Ok(present(places))
    }

    pub fn places_path(&self) -> Result<PathBuf, ServiceError> {
        Ok(profile::resolve_places_path(
            &self.config.profiles_root,
            &self.config.places_file_name,
        )?)
    }

    pub fn list_profiles(&self) -> Result<Vec<ProfileLocation>, ServiceError> {
        Ok(profile::list_profiles(
            &self.config.profiles_root,
            &self.config.places_file_name,
        )?)
    }

    pub fn open(&self, url: &str, shell: &dyn ShellRunner) -> Result<(), ServiceError> {
        shell.shell_run(url).map_err(ServiceError::from)
    }

    pub fn handle_command(
        &self,
        request: CoreRequest,
        shell: &dyn ShellRunner,
    ) -> Result<CoreResponse, ServiceError> {
        match request {
            CoreRequest::Query(payload) => {
                let results = self.search(&payload.remainder, &payload.action_parameters)?;
                Ok(CoreResponse::Query(QueryResponse { results }))
            }
            CoreRequest::Open(payload) => {
                self.open(&payload.url, shell)?;
                Ok(CoreResponse::Open(OpenResponse { opened: true }))
            }
        }
    }
}
