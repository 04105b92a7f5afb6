//! Team notification directory.
//!
//! Maps a team name to the Slack channels that hear about its pipeline
//! successes and failures. Lookups never fail: unknown teams and empty
//! channel lists degrade to empty values with a warning.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GenerationError, GenerationResult};

/// Notification channels for one team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamChannels {
    #[serde(default)]
    pub success: Vec<String>,
    #[serde(default)]
    pub failure: Vec<String>,
}

impl TeamChannels {
    pub fn new<I, J, S, T>(success: I, failure: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            success: success.into_iter().map(Into::into).collect(),
            failure: failure.into_iter().map(Into::into).collect(),
        }
    }
}

/// Non-fatal problems noticed during a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LookupWarning {
    TeamNotFound(String),
    EmptySuccessChannels(String),
    EmptyFailureChannels(String),
}

impl fmt::Display for LookupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupWarning::TeamNotFound(team) => write!(
                f,
                "team '{}' not found in slack channels mapping, channels will be blank",
                team
            ),
            LookupWarning::EmptySuccessChannels(team) => {
                write!(f, "team '{}' has no slack channels for success notification", team)
            }
            LookupWarning::EmptyFailureChannels(team) => {
                write!(f, "team '{}' has no slack channels for failure notification", team)
            }
        }
    }
}

/// Result of looking a team up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamLookup {
    pub team: String,
    pub success: Vec<String>,
    pub failure: Vec<String>,
    pub warnings: Vec<LookupWarning>,
}

impl TeamLookup {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// `(success, failure)` channel lists.
    pub fn into_pair(self) -> (Vec<String>, Vec<String>) {
        (self.success, self.failure)
    }
}

/// Read-only team → channels directory, populated once per process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamDirectory {
    teams: BTreeMap<String, TeamChannels>,
}

impl TeamDirectory {
    /// An empty directory. Every lookup warns.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse `{"team": {"success": [...], "failure": [...]}}`.
    pub fn from_json_str(content: &str) -> GenerationResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| GenerationError::Configuration(format!("invalid team channel mapping: {}", e)))
    }

    /// Load the mapping from a JSON file.
    ///
    /// A file that does not exist yields an empty directory; one that exists
    /// but does not parse is a configuration error.
    pub fn from_json_file(path: &Path) -> GenerationResult<Self> {
        if !path.exists() {
            warn!("Team channel mapping {:?} not found, all teams will get blank channels", path);
            return Ok(Self::empty());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            GenerationError::Configuration(format!("cannot read team mapping {:?}: {}", path, e))
        })?;
        let directory = Self::from_json_str(&content)?;
        debug!("Loaded {} team(s) from {:?}", directory.len(), path);
        Ok(directory)
    }

    /// Add or replace a team. Only used while building the directory.
    pub fn with_team(mut self, team: impl Into<String>, channels: TeamChannels) -> Self {
        self.teams.insert(team.into(), channels);
        self
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.teams.keys().map(String::as_str)
    }

    /// Channels for `team`, plus any warnings. Never fails.
    pub fn lookup(&self, team: &str) -> TeamLookup {
        let mut warnings = Vec::new();

        let (success, failure) = match self.teams.get(team) {
            None => {
                warnings.push(LookupWarning::TeamNotFound(team.to_string()));
                (Vec::new(), Vec::new())
            }
            Some(channels) => {
                if channels.success.is_empty() {
                    warnings.push(LookupWarning::EmptySuccessChannels(team.to_string()));
                }
                if channels.failure.is_empty() {
                    warnings.push(LookupWarning::EmptyFailureChannels(team.to_string()));
                }
                (channels.success.clone(), channels.failure.clone())
            }
        };

        for warning in &warnings {
            warn!("{}", warning);
        }

        TeamLookup {
            team: team.to_string(),
            success,
            failure,
            warnings,
        }
    }
}
