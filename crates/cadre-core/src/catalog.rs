//! The static skill catalog.
//!
//! The taxonomy ships with the binary as embedded JSON. It is parsed once at
//! startup, held immutable, and injected into the search view — not exposed
//! as a global.

use crate::{Result, skill::Skill};

const BUILTIN: &str = include_str!("../data/skills.json");

/// A fixed, ordered sequence of known skills.
#[derive(Debug, Clone)]
pub struct Catalog {
  skills: Vec<Skill>,
}

impl Catalog {
  pub fn new(skills: Vec<Skill>) -> Self { Self { skills } }

  /// Parse the taxonomy bundled with the binary.
  pub fn builtin() -> Result<Self> {
    let skills: Vec<Skill> = serde_json::from_str(BUILTIN)?;
    Ok(Self { skills })
  }

  pub fn len(&self) -> usize { self.skills.len() }

  pub fn is_empty(&self) -> bool { self.skills.is_empty() }

  /// Skills in catalog order.
  pub fn iter(&self) -> impl Iterator<Item = &Skill> { self.skills.iter() }
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  #[test]
  fn builtin_catalog_parses_and_is_non_empty() {
    let catalog = Catalog::builtin().unwrap();
    assert!(!catalog.is_empty());
  }

  #[test]
  fn builtin_catalog_has_no_duplicate_keys() {
    let catalog = Catalog::builtin().unwrap();
    let keys: HashSet<_> = catalog.iter().map(Skill::key).collect();
    assert_eq!(keys.len(), catalog.len());
  }
}
