// src/text_analysis/rules.rs
//! Declarative match rules: a label plus a sequence of token patterns

use super::tagger::Pos;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub const IMPROVEMENT_LABEL: &str = "Improvement";

/// Constraints on a single token; every field that is set must hold
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenPattern {
    /// Lowercased token text must equal this (compared lowercase)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<String>,
    /// Exact token text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<Pos>,
}

impl TokenPattern {
    pub fn lower(value: &str) -> Self {
        Self {
            lower: Some(value.to_lowercase()),
            ..Self::default()
        }
    }

    pub fn pos(pos: Pos) -> Self {
        Self {
            pos: Some(pos),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_none() && self.text.is_none() && self.pos.is_none()
    }

    pub fn matches(&self, text: &str, lower: &str, pos: Pos) -> bool {
        self.lower.as_deref().map_or(true, |l| l.to_lowercase() == lower)
            && self.text.as_deref().map_or(true, |t| t == text)
            && self.pos.map_or(true, |p| p == pos)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub label: String,
    pub pattern: Vec<TokenPattern>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    pub rules: Vec<Rule>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::improvement()
    }
}

impl RuleTable {
    /// "improve" followed by an adposition followed by a noun
    pub fn improvement() -> Self {
        Self {
            rules: vec![Rule {
                label: IMPROVEMENT_LABEL.to_string(),
                pattern: vec![
                    TokenPattern::lower("improve"),
                    TokenPattern::pos(Pos::Adp),
                    TokenPattern::pos(Pos::Noun),
                ],
            }],
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: RuleTable = toml::from_str(content).context("Failed to parse rule table")?;
        table.validate()?;
        Ok(table)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule table: {}", path.display()))?;
        let table = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid rule table: {}", path.display()))?;
        info!("Loaded {} rule(s) from {}", table.rules.len(), path.display());
        Ok(table)
    }

    /// Load from a file when one is configured, otherwise use the built-in table
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            anyhow::bail!("Rule table has no rules");
        }
        for rule in &self.rules {
            if rule.label.trim().is_empty() {
                anyhow::bail!("Rule with an empty label");
            }
            if rule.pattern.is_empty() {
                anyhow::bail!("Rule '{}' has an empty pattern", rule.label);
            }
            if let Some(index) = rule.pattern.iter().position(TokenPattern::is_empty) {
                anyhow::bail!(
                    "Rule '{}' has an unconstrained token at position {}",
                    rule.label,
                    index
                );
            }
        }
        Ok(())
    }
}
