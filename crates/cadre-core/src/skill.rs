//! Skill taxonomy types and the client-local selection state.
//!
//! A skill is identified by the `(domain, name_en)` composite key, not by a
//! surrogate id. Two skills are the same iff both fields match exactly;
//! comparison is case-sensitive.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

// ─── Skill ───────────────────────────────────────────────────────────────────

/// One taxonomy entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
  pub domain:  String,
  pub name_en: String,
}

impl Skill {
  pub fn new(domain: impl Into<String>, name_en: impl Into<String>) -> Self {
    Self { domain: domain.into(), name_en: name_en.into() }
  }

  /// Extract the composite identity used for equality and lookup.
  pub fn key(&self) -> SkillKey {
    SkillKey {
      domain:  self.domain.clone(),
      name_en: self.name_en.clone(),
    }
  }
}

/// The derived identity of a [`Skill`]. Owned so it can live in a
/// [`HashSet`] independently of the skill it was extracted from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SkillKey {
  domain:  String,
  name_en: String,
}

// ─── Selection ───────────────────────────────────────────────────────────────

/// Ordered, duplicate-free sequence of selected skills.
///
/// Order is selection order — it is what the pill row renders. Uniqueness is
/// tracked by composite key in a hash set, so a duplicate click is an O(1)
/// no-op rather than a scan. The selection lives only as long as the view;
/// nothing persists it.
#[derive(Debug, Clone, Default)]
pub struct SkillSelection {
  order: Vec<Skill>,
  keys:  HashSet<SkillKey>,
}

impl SkillSelection {
  pub fn new() -> Self { Self::default() }

  /// Append `skill` unless one with the same composite key is already
  /// selected. Returns whether the selection changed.
  pub fn select(&mut self, skill: Skill) -> bool {
    if !self.keys.insert(skill.key()) {
      return false;
    }
    self.order.push(skill);
    true
  }

  /// Remove every selected skill matching `key` — at most one in practice,
  /// since [`select`](Self::select) enforces uniqueness. Returns whether the
  /// selection changed.
  pub fn deselect(&mut self, key: &SkillKey) -> bool {
    if !self.keys.remove(key) {
      return false;
    }
    self.order.retain(|s| s.key() != *key);
    true
  }

  pub fn contains(&self, key: &SkillKey) -> bool { self.keys.contains(key) }

  pub fn len(&self) -> usize { self.order.len() }

  pub fn is_empty(&self) -> bool { self.order.is_empty() }

  /// Selected skills in selection order.
  pub fn iter(&self) -> impl Iterator<Item = &Skill> { self.order.iter() }

  pub fn get(&self, index: usize) -> Option<&Skill> { self.order.get(index) }

  /// Catalog members not currently selected, in catalog order — the
  /// candidate set handed to the search results. A pure function of the
  /// catalog and the current selection, recomputed per call.
  pub fn remaining<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Skill> {
    catalog
      .iter()
      .filter(|s| !self.keys.contains(&s.key()))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn catalog() -> Catalog {
    Catalog::new(vec![
      Skill::new("lang", "python"),
      Skill::new("lang", "go"),
      Skill::new("web", "react"),
    ])
  }

  #[test]
  fn select_is_idempotent() {
    let mut selection = SkillSelection::new();

    assert!(selection.select(Skill::new("lang", "go")));
    assert!(!selection.select(Skill::new("lang", "go")));
    assert_eq!(selection.len(), 1);
  }

  #[test]
  fn select_preserves_selection_order() {
    let mut selection = SkillSelection::new();
    selection.select(Skill::new("web", "react"));
    selection.select(Skill::new("lang", "python"));

    let names: Vec<_> = selection.iter().map(|s| s.name_en.as_str()).collect();
    assert_eq!(names, ["react", "python"]);
  }

  #[test]
  fn composite_key_distinguishes_same_name_across_domains() {
    let mut selection = SkillSelection::new();

    // Same name, different domain: two distinct skills.
    assert!(selection.select(Skill::new("lang", "rust")));
    assert!(selection.select(Skill::new("ops", "rust")));
    assert_eq!(selection.len(), 2);
  }

  #[test]
  fn key_comparison_is_case_sensitive() {
    let mut selection = SkillSelection::new();

    assert!(selection.select(Skill::new("lang", "go")));
    assert!(selection.select(Skill::new("lang", "Go")));
    assert_eq!(selection.len(), 2);
  }

  #[test]
  fn deselect_removes_by_key() {
    let mut selection = SkillSelection::new();
    selection.select(Skill::new("lang", "go"));
    selection.select(Skill::new("web", "react"));

    assert!(selection.deselect(&Skill::new("lang", "go").key()));
    assert!(!selection.deselect(&Skill::new("lang", "go").key()));

    let names: Vec<_> = selection.iter().map(|s| s.name_en.as_str()).collect();
    assert_eq!(names, ["react"]);
  }

  #[test]
  fn deselect_then_select_restores_membership() {
    let mut selection = SkillSelection::new();
    selection.select(Skill::new("lang", "python"));
    selection.select(Skill::new("lang", "go"));

    let key = Skill::new("lang", "python").key();
    selection.deselect(&key);
    selection.select(Skill::new("lang", "python"));

    // Membership restored; order is now selection order, not the original.
    assert!(selection.contains(&key));
    let names: Vec<_> = selection.iter().map(|s| s.name_en.as_str()).collect();
    assert_eq!(names, ["go", "python"]);
  }

  #[test]
  fn remaining_is_catalog_minus_selection() {
    let catalog = catalog();
    let mut selection = SkillSelection::new();
    selection.select(Skill::new("lang", "go"));

    let remaining = selection.remaining(&catalog);
    let names: Vec<_> = remaining.iter().map(|s| s.name_en.as_str()).collect();
    assert_eq!(names, ["python", "react"]);
    assert_eq!(remaining.len() + selection.len(), catalog.len());
  }

  #[test]
  fn remaining_returns_to_full_catalog_after_deselect() {
    let catalog = catalog();
    let mut selection = SkillSelection::new();

    selection.select(Skill::new("lang", "go"));
    selection.deselect(&Skill::new("lang", "go").key());

    assert!(selection.is_empty());
    assert_eq!(selection.remaining(&catalog).len(), catalog.len());
  }

  #[test]
  fn selecting_outside_the_catalog_leaves_remaining_intact() {
    let catalog = catalog();
    let mut selection = SkillSelection::new();
    selection.select(Skill::new("data", "spark"));

    // Nothing in the catalog shares that key, so nothing is excluded.
    assert_eq!(selection.remaining(&catalog).len(), catalog.len());
  }
}
