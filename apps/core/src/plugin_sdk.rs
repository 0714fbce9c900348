use std::path::PathBuf;

use crate::config;
use crate::core_service::{CoreService, ServiceError};
use crate::logging;
use crate::presenter::ResultItem;

/// What the host hands a plugin at load time.
#[derive(Debug, Clone, Default)]
pub struct PluginInitContext {
    pub config_path: Option<PathBuf>,
}

/// One search event from the host: the typed text after the plugin keyword
/// and the same text split into parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub remainder: String,
    pub action_parameters: Vec<String>,
}

impl Query {
    /// Splits `remainder` on whitespace the way launcher hosts do.
    pub fn from_text(remainder: &str) -> Self {
        Self {
            remainder: remainder.to_string(),
            action_parameters: remainder.split_whitespace().map(str::to_string).collect(),
        }
    }
}

pub trait Plugin {
    fn init(&mut self, context: &PluginInitContext) -> Result<(), ServiceError>;
    fn query(&self, query: &Query) -> Vec<ResultItem>;
}

#[derive(Default)]
pub struct PlacesPlugin {
    service: Option<CoreService>,
}

impl PlacesPlugin {
    pub fn with_service(service: CoreService) -> Self {
        Self {
            service: Some(service),
        }
    }
}

impl Plugin for PlacesPlugin {
    fn init(&mut self, context: &PluginInitContext) -> Result<(), ServiceError> {
        let cfg = config::load(context.config_path.as_deref())
            .map_err(|e| ServiceError::Config(e.to_string()))?;
        self.service = Some(CoreService::new(cfg)?);
        Ok(())
    }

    fn query(&self, query: &Query) -> Vec<ResultItem> {
        let Some(service) = &self.service else {
            logging::warn("places plugin queried before init");
            return Vec::new();
        };
        service.query(&query.remainder, &query.action_parameters)
    }
}
