use crate::error::{Result, RoutingError};
use dashmap::DashMap;
use std::env;
use std::sync::Arc;

pub const REJECT_EMPTY_PREFIXES: &str = "MULTIPREFIX_REJECT_EMPTY_PREFIXES";
pub const ALLOW_DUPLICATE_NAMES: &str = "MULTIPREFIX_ALLOW_DUPLICATE_NAMES";

/// Key/value configuration snapshot
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Snapshot of the process environment
    pub fn new() -> Self {
        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    /// Empty configuration, nothing read from the environment
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    /// Reads a boolean flag. Missing keys yield `default`.
    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool> {
        let Some(raw) = self.get(key) else {
            return Ok(default);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(RoutingError::Config {
                key: key.to_string(),
                value: raw,
            }),
        }
    }
}

/// Settings that change how prefixes and route names are validated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoutingConfig {
    /// Reject `""` prefixes instead of treating them as "no prefix segment"
    pub reject_empty_prefixes: bool,
    /// Let several entries in one route table share a route name
    pub allow_duplicate_names: bool,
}

impl RoutingConfig {
    pub fn from_config(config: &ConfigService) -> Result<Self> {
        Ok(Self {
            reject_empty_prefixes: config.get_bool(REJECT_EMPTY_PREFIXES, false)?,
            allow_duplicate_names: config.get_bool(ALLOW_DUPLICATE_NAMES, false)?,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_config(&ConfigService::new())
    }

    pub fn reject_empty_prefixes(mut self, reject: bool) -> Self {
        self.reject_empty_prefixes = reject;
        self
    }

    pub fn allow_duplicate_names(mut self, allow: bool) -> Self {
        self.allow_duplicate_names = allow;
        self
    }
}
