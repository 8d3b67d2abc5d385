use std::collections::BTreeSet;

use super::error::EncodeError;
use super::registry::FieldRegistry;
use super::value::{FieldValue, TransactionValues};

/// A cross-field presence constraint.
///
/// Rules are not symmetrised: declare both directions where both apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyRule {
    /// If `field` is present, every companion must be present.
    RequiredTogether {
        field: &'static str,
        companions: Vec<&'static str>,
    },
    /// If `field` is present, none of the excluded fields may be.
    MutuallyExclusive {
        field: &'static str,
        excluded: Vec<&'static str>,
    },
}

impl DependencyRule {
    pub fn requires(field: &'static str, companions: &[&'static str]) -> Self {
        Self::RequiredTogether {
            field,
            companions: companions.to_vec(),
        }
    }

    pub fn excludes(field: &'static str, excluded: &[&'static str]) -> Self {
        Self::MutuallyExclusive {
            field,
            excluded: excluded.to_vec(),
        }
    }

    fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        let (field, others) = match self {
            Self::RequiredTogether { field, companions } => (field, companions),
            Self::MutuallyExclusive { field, excluded } => (field, excluded),
        };
        std::iter::once(*field).chain(others.iter().copied())
    }
}

/// A convenience input name that expands into a real field.
///
/// Values without an entry in `map` are ignored and the target field is
/// left as the caller supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub name: &'static str,
    pub target: &'static str,
    pub map: Vec<(FieldValue, FieldValue)>,
}

impl Alias {
    /// Alias translating `false`/`true` to two target values.
    pub fn flag(
        name: &'static str,
        target: &'static str,
        when_false: impl Into<FieldValue>,
        when_true: impl Into<FieldValue>,
    ) -> Self {
        Self {
            name,
            target,
            map: vec![
                (FieldValue::Flag(false), when_false.into()),
                (FieldValue::Flag(true), when_true.into()),
            ],
        }
    }

    pub fn translate(&self, value: &FieldValue) -> Option<&FieldValue> {
        self.map
            .iter()
            .find_map(|(from, to)| (from == value).then_some(to))
    }
}

/// Dependency rules and aliases bound to one field registry.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<DependencyRule>,
    aliases: Vec<Alias>,
}

impl RuleSet {
    /// Check every referenced name against `registry` and build the set.
    pub fn new(
        registry: &FieldRegistry,
        rules: Vec<DependencyRule>,
        aliases: Vec<Alias>,
    ) -> Result<Self, EncodeError> {
        for name in rules.iter().flat_map(DependencyRule::names) {
            if !registry.contains(name) {
                return Err(EncodeError::InvalidRegistry(format!(
                    "rule refers to unknown field {name}"
                )));
            }
        }
        for alias in &aliases {
            if !registry.contains(alias.target) {
                return Err(EncodeError::InvalidRegistry(format!(
                    "alias {} targets unknown field {}",
                    alias.name, alias.target
                )));
            }
            if registry.contains(alias.name) {
                return Err(EncodeError::InvalidRegistry(format!(
                    "alias {} shadows a field",
                    alias.name
                )));
            }
        }
        Ok(Self { rules, aliases })
    }

    pub fn rules(&self) -> &[DependencyRule] {
        &self.rules
    }

    pub fn aliases(&self) -> &[Alias] {
        &self.aliases
    }

    pub fn is_alias(&self, name: &str) -> bool {
        self.aliases.iter().any(|a| a.name == name)
    }

    /// Return a copy of `values` with aliases replaced by their targets.
    ///
    /// Alias keys are dropped from the copy whether or not they translated.
    pub fn expand_aliases(&self, values: &TransactionValues) -> TransactionValues {
        let mut expanded = values.clone();
        for alias in &self.aliases {
            let Some(value) = expanded.remove(alias.name) else {
                continue;
            };
            match alias.translate(&value) {
                Some(translated) => {
                    expanded.insert(alias.target, translated.clone());
                }
                None => log::warn!(
                    "alias {}={} has no translation, {} left untouched",
                    alias.name,
                    value,
                    alias.target
                ),
            }
        }
        expanded
    }

    /// Check required fields, then required-together rules, then
    /// mutually-exclusive rules. The first violation is returned.
    pub fn validate(
        &self,
        registry: &FieldRegistry,
        present: &BTreeSet<&str>,
    ) -> Result<(), EncodeError> {
        if let Some(spec) = registry.required().find(|f| !present.contains(f.name)) {
            return Err(EncodeError::MissingRequiredField {
                field: spec.name.to_string(),
            });
        }

        for rule in &self.rules {
            if let DependencyRule::RequiredTogether { field, companions } = rule {
                if !present.contains(field) {
                    continue;
                }
                let missing = names_where(companions, |c| !present.contains(c));
                if !missing.is_empty() {
                    return Err(EncodeError::MissingDependency {
                        field: field.to_string(),
                        missing,
                    });
                }
            }
        }

        for rule in &self.rules {
            if let DependencyRule::MutuallyExclusive { field, excluded } = rule {
                if !present.contains(field) {
                    continue;
                }
                let conflicting = names_where(excluded, |e| present.contains(e));
                if !conflicting.is_empty() {
                    return Err(EncodeError::ConflictingFields {
                        field: field.to_string(),
                        conflicting,
                    });
                }
            }
        }

        Ok(())
    }
}

fn names_where(names: &[&'static str], pred: impl Fn(&str) -> bool) -> Vec<String> {
    names
        .iter()
        .filter(|n| pred(n))
        .map(|n| n.to_string())
        .collect()
}
