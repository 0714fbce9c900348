use serde::{Deserialize, Serialize};

use crate::action_executor::{LaunchError, ShellRunner};
use crate::model::Place;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResultAction {
    OpenUrl { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub title: String,
    pub subtitle: String,
    pub action: ResultAction,
}

impl ResultItem {
    pub fn activate(&self, shell: &dyn ShellRunner) -> Result<(), LaunchError> {
        match &self.action {
            ResultAction::OpenUrl { url } => shell.shell_run(url),
        }
    }
}

impl From<Place> for ResultItem {
    fn from(value: Place) -> Self {
        Self {
            title: value.title,
            subtitle: value.url.clone(),
            action: ResultAction::OpenUrl { url: value.url },
        }
    }
}

pub fn present(places: Vec<Place>) -> Vec<ResultItem> {
    places.into_iter().map(ResultItem::from).collect()
}
