// Copyright (c) 2025 - Cowboy AI, Inc.
//! Kernel configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ConfigError;

/// Environment variable selecting the unknown-command policy
pub const UNKNOWN_COMMANDS_ENV: &str = "CIM_DECIDER_UNKNOWN_COMMANDS";

/// What a table-driven decider does with a command tag it has no handler for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCommandPolicy {
    /// Treat the command as not applicable: no events, no error
    #[default]
    Ignore,

    /// Return `DispatchError::UnhandledCommand`
    Reject,
}

impl FromStr for UnknownCommandPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "reject" => Ok(Self::Reject),
            other => Err(ConfigError::InvalidValue {
                key: UNKNOWN_COMMANDS_ENV.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Decider kernel configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelConfig {
    /// Handling of commands with no registered dispatcher
    #[serde(default)]
    pub unknown_commands: UnknownCommandPolicy,
}

impl KernelConfig {
    /// Create the default configuration (unknown commands are ignored)
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict configuration: unknown commands are rejected
    pub fn strict() -> Self {
        Self {
            unknown_commands: UnknownCommandPolicy::Reject,
        }
    }

    /// Set the unknown-command policy
    pub fn with_unknown_commands(mut self, policy: UnknownCommandPolicy) -> Self {
        self.unknown_commands = policy;
        self
    }

    /// Load configuration from the environment
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(UNKNOWN_COMMANDS_ENV) {
            config.unknown_commands = raw.parse()?;
        }
        Ok(config)
    }
}
