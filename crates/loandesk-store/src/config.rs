//! Per-screen controller configuration.
//!
//! Every screen differs only in which fields are searched, which must be
//! present, which must be unique, and how many rows a page holds, so those
//! are collected here instead of being repeated in each screen.

use std::str::FromStr;

use loandesk_shared::constants::{DEFAULT_ITEMS_PER_PAGE, MAX_ITEMS_PER_PAGE};
use loandesk_shared::ParseError;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How new record ids are suffixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// `{namespace}-{counter}`, counter zero-padded and increasing.
    #[default]
    Sequential,
    /// `{namespace}-{uuid v4}`.
    Uuid,
}

impl FromStr for IdStrategy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" | "seq" => Ok(Self::Sequential),
            "uuid" => Ok(Self::Uuid),
            _ => Err(ParseError::Value {
                name: "id strategy",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    namespace: String,
    search_fields: Vec<String>,
    unique_fields: Vec<String>,
    required_fields: Vec<String>,
    items_per_page: usize,
    id_strategy: IdStrategy,
}

impl ControllerConfig {
    pub fn builder(namespace: impl Into<String>) -> ControllerConfigBuilder {
        ControllerConfigBuilder::new(namespace)
    }

    /// Prefix of every id this controller generates.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    pub fn unique_fields(&self) -> &[String] {
        &self.unique_fields
    }

    pub fn required_fields(&self) -> &[String] {
        &self.required_fields
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn id_strategy(&self) -> IdStrategy {
        self.id_strategy
    }
}

#[derive(Debug, Clone)]
pub struct ControllerConfigBuilder {
    namespace: String,
    search_fields: Vec<String>,
    unique_fields: Vec<String>,
    required_fields: Vec<String>,
    items_per_page: usize,
    id_strategy: IdStrategy,
}

impl ControllerConfigBuilder {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            search_fields: Vec::new(),
            unique_fields: Vec::new(),
            required_fields: Vec::new(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            id_strategy: IdStrategy::default(),
        }
    }

    pub fn search_field(mut self, field: impl Into<String>) -> Self {
        push_unique(&mut self.search_fields, field.into());
        self
    }

    pub fn search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for f in fields {
            push_unique(&mut self.search_fields, f.into());
        }
        self
    }

    /// A unique field is implicitly required as well.
    pub fn unique_field(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        push_unique(&mut self.required_fields, field.clone());
        push_unique(&mut self.unique_fields, field);
        self
    }

    pub fn unique_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for f in fields {
            self = self.unique_field(f);
        }
        self
    }

    pub fn required_field(mut self, field: impl Into<String>) -> Self {
        push_unique(&mut self.required_fields, field.into());
        self
    }

    pub fn required_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for f in fields {
            push_unique(&mut self.required_fields, f.into());
        }
        self
    }

    pub fn items_per_page(mut self, n: usize) -> Self {
        self.items_per_page = n;
        self
    }

    pub fn id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }

    pub fn build(self) -> Result<ControllerConfig, ConfigError> {
        check_items_per_page(self.items_per_page)?;

        let namespace = self.namespace.trim();
        if namespace.is_empty()
            || namespace.chars().any(char::is_whitespace)
            || namespace.contains(loandesk_shared::constants::ID_SEPARATOR)
        {
            return Err(ConfigError::InvalidNamespace(self.namespace));
        }

        Ok(ControllerConfig {
            namespace: namespace.to_string(),
            search_fields: self.search_fields,
            unique_fields: self.unique_fields,
            required_fields: self.required_fields,
            items_per_page: self.items_per_page,
            id_strategy: self.id_strategy,
        })
    }
}

/// Page sizes must be in `1..=MAX_ITEMS_PER_PAGE`.
pub fn check_items_per_page(n: usize) -> Result<(), ConfigError> {
    if n == 0 {
        return Err(ConfigError::ZeroItemsPerPage);
    }
    if n > MAX_ITEMS_PER_PAGE {
        return Err(ConfigError::ItemsPerPageTooLarge {
            value: n,
            max: MAX_ITEMS_PER_PAGE,
        });
    }
    Ok(())
}

fn push_unique(fields: &mut Vec<String>, field: String) {
    if !fields.contains(&field) {
        fields.push(field);
    }
}
