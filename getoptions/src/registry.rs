//! Declared options, indexed by every name they answer to.

use std::collections::BTreeMap;

use crate::error::DefinitionError;
use crate::option::{Kind, Opt, OptionDef};

/// What a registered name designates: an option, possibly in its `no-` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub index: usize,
    pub negated: bool,
}

#[derive(Debug, Default)]
pub struct Registry<'a> {
    options: Vec<OptionDef<'a>>,
    names: BTreeMap<String, Target>,
}

impl<'a> Registry<'a> {
    pub fn new() -> Self {
        Registry {
            options: Vec::new(),
            names: BTreeMap::new(),
        }
    }

    /// Add an option. Its canonical name, aliases and (for negatable
    /// booleans) `no-<name>` must not collide with any registered name.
    pub fn register(&mut self, opt: Opt<'a>) -> Result<usize, DefinitionError> {
        let def = opt.into_def();
        let index = self.options.len();

        let mut claimed: Vec<(String, Target)> = Vec::new();
        let plain = Target {
            index,
            negated: false,
        };
        claimed.push((def.name.clone(), plain));
        for alias in &def.aliases {
            claimed.push((alias.clone(), plain));
        }
        if def.kind == Kind::NegatableBoolean {
            claimed.push((
                format!("no-{}", def.name),
                Target {
                    index,
                    negated: true,
                },
            ));
        }

        for (i, (name, _)) in claimed.iter().enumerate() {
            if name.is_empty() {
                return Err(DefinitionError::EmptyName);
            }
            let repeated = claimed[..i].iter().any(|(other, _)| other == name);
            if repeated || self.names.contains_key(name) {
                return Err(DefinitionError::Duplicate(name.clone()));
            }
        }

        log::trace!("registered option '{}' as #{}", def.name, index);
        self.names.extend(claimed);
        self.options.push(def);
        Ok(index)
    }

    pub fn lookup(&self, name: &str) -> Option<Target> {
        self.names.get(name).copied()
    }

    /// Every registered name in sorted order.
    pub fn names(&self) -> impl Iterator<Item = (&str, Target)> {
        self.names.iter().map(|(name, target)| (name.as_str(), *target))
    }

    pub(crate) fn get(&self, index: usize) -> &OptionDef<'a> {
        &self.options[index]
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> &mut OptionDef<'a> {
        &mut self.options[index]
    }

    pub(crate) fn find(&self, canonical: &str) -> Option<&OptionDef<'a>> {
        self.options.iter().find(|o| o.name == canonical)
    }

    pub(crate) fn options(&self) -> impl Iterator<Item = &OptionDef<'a>> {
        self.options.iter()
    }

    pub(crate) fn options_mut(&mut self) -> impl Iterator<Item = &mut OptionDef<'a>> {
        self.options.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
