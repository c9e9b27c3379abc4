//! Application state machine and event dispatcher.

use std::sync::Arc;

use cadre_core::{
  catalog::Catalog,
  person::Person,
  query::PersonQuery,
  skill::{Skill, SkillKey, SkillSelection},
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::client::ApiClient;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Single-person record: identity, roles, capabilities.
  PersonDetail,
  /// Taxonomy search: selected pills, search box, result pills.
  SkillSearch,
}

/// Which part of the search screen receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
  Results,
  Selected,
}

// ─── Fetch plumbing ───────────────────────────────────────────────────────────

/// A settled person fetch, tagged with the identifier it was issued for so
/// the receiver can recognise stale responses.
#[derive(Debug)]
pub struct PersonResponse {
  pub id:     String,
  pub result: Result<Person, String>,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  // Person view.
  /// Remote query state for the person under view.
  pub query: PersonQuery,
  /// Whether the user is typing a person id.
  pub goto_active: bool,
  /// The id being typed into the goto prompt.
  pub goto_input: String,
  /// Scroll offset within the detail pane.
  pub detail_scroll: usize,

  // Search view.
  /// Current free-text query, updated on every keystroke.
  pub search: String,
  /// Skills picked so far, in selection order.
  pub selection: SkillSelection,
  /// The full taxonomy, loaded once at startup and never mutated.
  pub catalog: Catalog,
  pub focus: SearchFocus,
  /// Cursor position within the *matched* results list.
  pub results_cursor: usize,
  /// Cursor position within the selected-pill row.
  pub selected_cursor: usize,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,

  tx: mpsc::UnboundedSender<PersonResponse>,
  rx: mpsc::UnboundedReceiver<PersonResponse>,
}

impl App {
  pub fn new(client: ApiClient, catalog: Catalog) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();
    Self {
      screen: Screen::SkillSearch,
      query: PersonQuery::default(),
      goto_active: false,
      goto_input: String::new(),
      detail_scroll: 0,
      search: String::new(),
      selection: SkillSelection::new(),
      catalog,
      focus: SearchFocus::Results,
      results_cursor: 0,
      selected_cursor: 0,
      client: Arc::new(client),
      tx,
      rx,
    }
  }

  // ── Person fetch ──────────────────────────────────────────────────────────

  /// Switch to the person view and fetch `id` in the background.
  ///
  /// The response comes back through the channel tagged with `id`; if the
  /// user navigates to another person first, the late response is dropped
  /// by [`PersonQuery::resolve`].
  pub fn open_person(&mut self, id: String) {
    self.query.start(id.clone());
    self.detail_scroll = 0;
    self.screen = Screen::PersonDetail;

    let client = Arc::clone(&self.client);
    let tx = self.tx.clone();
    tokio::spawn(async move {
      let result = client
        .person_by_id(&id)
        .await
        .map_err(|e| format!("{e:#}"));
      // The receiver only disappears on shutdown.
      let _ = tx.send(PersonResponse { id, result });
    });
  }

  /// Apply all settled fetches. Called by the event loop between frames.
  pub fn drain_responses(&mut self) {
    while let Ok(resp) = self.rx.try_recv() {
      self.on_person_response(resp);
    }
  }

  pub fn on_person_response(&mut self, resp: PersonResponse) {
    if !self.query.resolve(&resp.id, resp.result) {
      tracing::debug!(id = %resp.id, "discarding stale person response");
    }
  }

  // ── Derived views ─────────────────────────────────────────────────────────

  /// Result pills currently visible: the remaining (unselected) catalog,
  /// narrowed by the search string. Match semantics belong to the results
  /// collaborator; this only supplies the candidate set and the raw query.
  pub fn visible_results(&self) -> Vec<&Skill> {
    crate::ui::skill_search::matching_skills(
      &self.search,
      self.selection.remaining(&self.catalog),
    )
  }

  // ── Selection ─────────────────────────────────────────────────────────────

  fn select_skill(&mut self, skill: Skill) {
    if self.selection.select(skill) {
      self.trace_selection();
    }
  }

  fn deselect_skill(&mut self, key: &SkillKey) {
    if self.selection.deselect(key) {
      self.trace_selection();
    }
  }

  /// Diagnostic trace of the current selection. Observability only; nothing
  /// reads it back.
  fn trace_selection(&self) {
    let selected: Vec<String> = self
      .selection
      .iter()
      .map(|s| format!("{}/{}", s.domain, s.name_en))
      .collect();
    tracing::debug!(?selected, "selection changed");
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match self.screen {
      Screen::PersonDetail if self.goto_active => self.handle_goto_key(key),
      Screen::PersonDetail => self.handle_detail_key(key),
      Screen::SkillSearch => match self.focus {
        SearchFocus::Results => self.handle_results_key(key),
        SearchFocus::Selected => self.handle_selected_key(key),
      },
    }
  }

  fn handle_goto_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Esc => {
        self.goto_active = false;
        self.goto_input.clear();
      }
      KeyCode::Enter => {
        self.goto_active = false;
        let id = std::mem::take(&mut self.goto_input);
        if !id.is_empty() {
          self.open_person(id);
        }
      }
      KeyCode::Backspace => {
        self.goto_input.pop();
      }
      KeyCode::Char(c) => self.goto_input.push(c),
      _ => {}
    }
    true
  }

  fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      // Quit
      KeyCode::Char('q') => return false,

      // Fetch another person
      KeyCode::Char('g') | KeyCode::Char('/') => {
        self.goto_active = true;
        self.goto_input.clear();
      }

      // Over to the taxonomy
      KeyCode::Char('s') | KeyCode::Tab => self.screen = Screen::SkillSearch,

      // Scroll detail
      KeyCode::Down | KeyCode::Char('j') => {
        let lines = crate::ui::person_detail::body_lines(&self.query).len();
        if self.detail_scroll + 1 < lines {
          self.detail_scroll += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
      }

      _ => {}
    }
    true
  }

  fn handle_results_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      // First Esc clears the query, second leaves the screen.
      KeyCode::Esc => {
        if self.search.is_empty() {
          self.screen = Screen::PersonDetail;
        } else {
          self.search.clear();
          self.results_cursor = 0;
        }
      }

      KeyCode::Tab => {
        if !self.selection.is_empty() {
          self.focus = SearchFocus::Selected;
          self.selected_cursor = 0;
        }
      }

      KeyCode::Down => {
        let len = self.visible_results().len();
        if len > 0 && self.results_cursor + 1 < len {
          self.results_cursor += 1;
        }
      }
      KeyCode::Up => {
        self.results_cursor = self.results_cursor.saturating_sub(1);
      }

      // Select the pill under the cursor.
      KeyCode::Enter => {
        let picked = self
          .visible_results()
          .get(self.results_cursor)
          .map(|s| (*s).clone());
        if let Some(skill) = picked {
          self.select_skill(skill);
          let len = self.visible_results().len();
          self.results_cursor = self.results_cursor.min(len.saturating_sub(1));
        }
      }

      KeyCode::Backspace => {
        self.search.pop();
        self.results_cursor = 0;
      }
      KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
        self.search.push(c);
        self.results_cursor = 0;
      }

      _ => {}
    }
    true
  }

  fn handle_selected_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Esc | KeyCode::Tab => self.focus = SearchFocus::Results,

      KeyCode::Left => {
        self.selected_cursor = self.selected_cursor.saturating_sub(1);
      }
      KeyCode::Right => {
        if self.selected_cursor + 1 < self.selection.len() {
          self.selected_cursor += 1;
        }
      }

      // Remove the pill under the cursor.
      KeyCode::Enter | KeyCode::Delete | KeyCode::Backspace => {
        let key_to_remove = self.selection.get(self.selected_cursor).map(Skill::key);
        if let Some(k) = key_to_remove {
          self.deselect_skill(&k);
        }
        if self.selection.is_empty() {
          self.focus = SearchFocus::Results;
        } else {
          self.selected_cursor =
            self.selected_cursor.min(self.selection.len() - 1);
        }
      }

      _ => {}
    }
    true
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::client::ApiConfig;

  fn app() -> App {
    let client = ApiClient::new(ApiConfig {
      base_url: "http://localhost:0".into(),
      username: String::new(),
      password: String::new(),
    })
    .expect("client");
    App::new(client, Catalog::builtin().expect("catalog"))
  }

  fn press(app: &mut App, code: KeyCode) {
    assert!(app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)));
  }

  fn type_str(app: &mut App, text: &str) {
    for c in text.chars() {
      press(app, KeyCode::Char(c));
    }
  }

  #[test]
  fn typing_updates_search_and_resets_cursor() {
    let mut app = app();
    app.results_cursor = 3;

    type_str(&mut app, "py");

    assert_eq!(app.search, "py");
    assert_eq!(app.results_cursor, 0);
  }

  #[test]
  fn enter_selects_the_result_under_cursor() {
    let mut app = app();
    type_str(&mut app, "python");
    press(&mut app, KeyCode::Enter);

    assert!(app.selection.contains(&Skill::new("lang", "python").key()));

    // The selected skill is no longer offered as a result.
    assert!(
      app
        .visible_results()
        .iter()
        .all(|s| s.name_en != "python")
    );
  }

  #[test]
  fn selecting_twice_keeps_a_single_pill() {
    let mut app = app();
    type_str(&mut app, "python");
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.selection.len(), 1);
  }

  #[test]
  fn tab_moves_focus_to_pills_and_enter_removes() {
    let mut app = app();
    type_str(&mut app, "python");
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Esc); // clear the leftover search text

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus, SearchFocus::Selected);

    press(&mut app, KeyCode::Enter);
    assert!(app.selection.is_empty());
    // Nothing left to focus, so navigation returns to the results.
    assert_eq!(app.focus, SearchFocus::Results);
  }

  #[test]
  fn tab_is_a_no_op_while_nothing_is_selected() {
    let mut app = app();
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus, SearchFocus::Results);
  }

  #[test]
  fn escape_clears_search_before_leaving_the_screen() {
    let mut app = app();
    type_str(&mut app, "rust");

    press(&mut app, KeyCode::Esc);
    assert!(app.search.is_empty());
    assert_eq!(app.screen, Screen::SkillSearch);

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.screen, Screen::PersonDetail);
  }

  #[test]
  fn stale_person_response_is_dropped() {
    let mut app = app();
    app.query.start("p-1");
    app.query.start("p-2"); // user moved on before the first fetch settled

    app.on_person_response(PersonResponse {
      id:     "p-1".into(),
      result: Err("connection refused".into()),
    });

    assert!(app.query.is_pending());
    assert_eq!(app.query.id(), Some("p-2"));
  }

  #[test]
  fn matching_response_settles_the_query() {
    let mut app = app();
    app.query.start("p-2");

    app.on_person_response(PersonResponse {
      id:     "p-2".into(),
      result: Err("404 Not Found".into()),
    });

    assert!(matches!(app.query, PersonQuery::Failed { .. }));
  }

  #[test]
  fn goto_prompt_collects_an_identifier() {
    let mut app = app();
    app.screen = Screen::PersonDetail;

    press(&mut app, KeyCode::Char('g'));
    assert!(app.goto_active);

    type_str(&mut app, "p-17");
    assert_eq!(app.goto_input, "p-17");

    press(&mut app, KeyCode::Esc);
    assert!(!app.goto_active);
    assert!(app.goto_input.is_empty());
  }
}
