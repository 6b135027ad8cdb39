//! Per-category key-path schema.
//!
//! A rule category declares which item-type tokens it owns and whether each
//! token addresses a named (multi-instance) or unique (singleton) item. The
//! schema is static data, loaded once when the category registers.

use std::fmt;

use crate::constants::PATH_SEPARATOR;
use crate::RegistrationError;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleItemKind {
    /// Keyed item, addressed as `<item_type>/<item_name>`
    Named,
    /// Singleton item, addressed as `<item_type>`
    Unique,
}

impl fmt::Display for RuleItemKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            RuleItemKind::Named => f.write_str("named"),
            RuleItemKind::Unique => f.write_str("unique"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleNodePath {
    rule_type: &'static str,
    named_items: Vec<&'static str>,
    unique_items: Vec<&'static str>,
}

impl RuleNodePath {
    pub fn new(
        rule_type: &'static str,
        named_items: &[&'static str],
        unique_items: &[&'static str],
    ) -> Self {
        Self {
            rule_type,
            named_items: named_items.to_vec(),
            unique_items: unique_items.to_vec(),
        }
    }

    pub fn rule_type(&self) -> &'static str {
        self.rule_type
    }

    pub fn named_items(&self) -> &[&'static str] {
        &self.named_items
    }

    pub fn unique_items(&self) -> &[&'static str] {
        &self.unique_items
    }

    /// Declared kind of `item_type`, or `None` if this category does not own it.
    pub fn item_kind(
        &self,
        item_type: &str,
    ) -> Option<RuleItemKind> {
        if self.named_items.contains(&item_type) {
            Some(RuleItemKind::Named)
        } else if self.unique_items.contains(&item_type) {
            Some(RuleItemKind::Unique)
        } else {
            None
        }
    }

    /// Checks that every token is a single non-empty path segment and that no
    /// token is declared twice within the category.
    pub fn validate(&self) -> Result<()> {
        let tokens = std::iter::once(self.rule_type)
            .chain(self.named_items.iter().copied())
            .chain(self.unique_items.iter().copied());
        for token in tokens {
            if token.is_empty() || token.contains(PATH_SEPARATOR) {
                return Err(RegistrationError::InvalidItemType {
                    rule_type: self.rule_type.to_string(),
                    token: token.to_string(),
                }
                .into());
            }
        }

        let mut seen = std::collections::HashSet::new();
        for item_type in self.named_items.iter().chain(self.unique_items.iter()) {
            if !seen.insert(*item_type) {
                return Err(RegistrationError::DuplicateItemType {
                    rule_type: self.rule_type.to_string(),
                    item_type: item_type.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}
