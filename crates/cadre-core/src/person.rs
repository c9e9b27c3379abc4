//! Person records and the role partition derivation.
//!
//! A person is fetched whole: roles and capabilities are embedded in the
//! record and have no independent lifecycle. Everything the person view
//! shows is derived from one of these records on read.

use std::fmt;

use serde::{Deserialize, Serialize};

// ─── Person ──────────────────────────────────────────────────────────────────

/// A directory entry, as returned by `GET /api/persons/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
  pub id:           String,
  pub given_name:   String,
  pub family_name:  String,
  pub city:         String,
  pub province:     String,
  pub postal_code:  String,
  pub country:      String,
  pub email:        String,
  pub phone:        String,
  pub roles:        Vec<Role>,
  pub capabilities: Vec<Capability>,
}

impl Person {
  /// Display name, given name first.
  pub fn full_name(&self) -> String {
    format!("{} {}", self.given_name, self.family_name)
  }
}

// ─── Role ────────────────────────────────────────────────────────────────────

/// An employment assignment.
///
/// Upstream is expected to keep at most one role active per person, but
/// nothing verifies that; see [`RolePartition::current`] for how duplicates
/// are handled on display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
  pub id:       String,
  pub active:   bool,
  pub title_en: String,
  pub hr_group: String,
  pub hr_level: String,
  pub effort:   Effort,
}

/// Effort indicator for a role. The wire format is not consistent: some
/// records carry a number, others a pre-formatted string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Effort {
  Fraction(f64),
  Label(String),
}

impl fmt::Display for Effort {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Fraction(n) => write!(f, "{n}"),
      Self::Label(s) => f.write_str(s),
    }
  }
}

// ─── Capability ──────────────────────────────────────────────────────────────

/// A validated skill association. The domain is displayed upper-cased; the
/// qualification level is displayed upper-cased when present and renders
/// nothing when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capability {
  pub id:              String,
  pub name_en:         String,
  pub domain:          String,
  pub validated_level: Option<String>,
}

// ─── Role partition ──────────────────────────────────────────────────────────

/// The active/inactive split of a person's roles — computed on read, never
/// stored. Both halves preserve source order, together cover the input, and
/// are disjoint; membership is keyed solely on the `active` flag.
#[derive(Debug, Clone)]
pub struct RolePartition<'a> {
  pub active:   Vec<&'a Role>,
  pub inactive: Vec<&'a Role>,
}

impl<'a> RolePartition<'a> {
  pub fn of(roles: &'a [Role]) -> Self {
    let (active, inactive): (Vec<&Role>, Vec<&Role>) =
      roles.iter().partition(|r| r.active);
    Self { active, inactive }
  }

  /// The role shown as current: the first active role in source order.
  ///
  /// At most one active role per person is expected upstream but not
  /// guaranteed. When several are active, only the first is displayed and
  /// the rest appear nowhere — a deliberate truncation policy, kept here in
  /// one place so it can be revisited.
  pub fn current(&self) -> Option<&'a Role> { self.active.first().copied() }

  /// Roles shown under the "Past" label, in source order.
  pub fn past(&self) -> &[&'a Role] { &self.inactive }
}
