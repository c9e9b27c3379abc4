//! Fetch state for the person view.
//!
//! A request is keyed by the identifier it was issued for, and responses
//! carry that key back. A response whose key no longer matches the in-flight
//! request is stale — the user navigated to a different person before it
//! resolved — and is discarded without touching the state.

use crate::person::Person;

/// The person view's remote query, as a tagged state rather than an implicit
/// data-or-nothing field.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PersonQuery {
  /// No person requested yet.
  #[default]
  Idle,
  /// Request in flight. The view renders a loading indicator and nothing
  /// partial until it settles.
  Pending { id: String },
  Loaded { id: String, person: Person },
  Failed { id: String, error: String },
}

impl PersonQuery {
  /// Begin a fetch for `id`, superseding whatever was shown before.
  pub fn start(&mut self, id: impl Into<String>) {
    *self = Self::Pending { id: id.into() };
  }

  /// Apply a response. Returns `false` — with the state left untouched —
  /// when the response key does not match the in-flight request.
  pub fn resolve(&mut self, id: &str, result: Result<Person, String>) -> bool {
    match self {
      Self::Pending { id: wanted } if wanted.as_str() == id => {
        *self = match result {
          Ok(person) => Self::Loaded { id: id.to_owned(), person },
          Err(error) => Self::Failed { id: id.to_owned(), error },
        };
        true
      }
      _ => false,
    }
  }

  /// The identifier this state belongs to, if any.
  pub fn id(&self) -> Option<&str> {
    match self {
      Self::Idle => None,
      Self::Pending { id }
      | Self::Loaded { id, .. }
      | Self::Failed { id, .. } => Some(id.as_str()),
    }
  }

  pub fn person(&self) -> Option<&Person> {
    match self {
      Self::Loaded { person, .. } => Some(person),
      _ => None,
    }
  }

  pub fn is_pending(&self) -> bool { matches!(self, Self::Pending { .. }) }
}
