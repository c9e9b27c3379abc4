//! Taxonomy search pane — selected pills, search box, result pills.

use cadre_core::skill::Skill;
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::{App, SearchFocus};

// ─── Matching ─────────────────────────────────────────────────────────────────

/// Narrow `candidates` to those matching `search`.
///
/// This widget owns the match semantics (fuzzy, against name and domain);
/// the caller only supplies the candidate set and the raw query. An empty
/// query matches everything, in the order given.
pub fn matching_skills<'a>(
  search: &str,
  candidates: Vec<&'a Skill>,
) -> Vec<&'a Skill> {
  if search.is_empty() {
    return candidates;
  }
  let matcher = SkimMatcherV2::default();
  candidates
    .into_iter()
    .filter(|s| {
      matcher.fuzzy_match(&s.name_en, search).is_some()
        || matcher.fuzzy_match(&s.domain, search).is_some()
    })
    .collect()
}

// ─── Draw ─────────────────────────────────────────────────────────────────────

/// Render the taxonomy search pane into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(4), // selected pills
      Constraint::Length(3), // search box
      Constraint::Min(0),    // results
    ])
    .split(area);

  draw_selected(f, rows[0], app);
  draw_search_box(f, rows[1], app);
  draw_results(f, rows[2], app);
}

// ─── Selected pills ───────────────────────────────────────────────────────────

fn draw_selected(f: &mut Frame, area: Rect, app: &App) {
  let focused = app.focus == SearchFocus::Selected;

  let block = Block::default()
    .title(format!(" Searching for ({}) ", app.selection.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(if focused {
      Color::Cyan
    } else {
      Color::DarkGray
    }));

  let inner = block.inner(area);
  f.render_widget(block, area);

  if app.selection.is_empty() {
    f.render_widget(
      Paragraph::new("Nothing selected. Enter on a skill below to add it.")
        .style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let mut spans: Vec<Span> = Vec::new();
  for (i, skill) in app.selection.iter().enumerate() {
    let style = if focused && i == app.selected_cursor {
      Style::default()
        .bg(Color::Cyan)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().bg(Color::Blue).fg(Color::White)
    };
    spans.push(Span::styled(
      format!(" {} ({}) ", skill.name_en, skill.domain.to_uppercase()),
      style,
    ));
    spans.push(Span::raw(" "));
  }

  f.render_widget(
    Paragraph::new(Line::from(spans)).wrap(Wrap { trim: false }),
    inner,
  );
}

// ─── Search box ───────────────────────────────────────────────────────────────

fn draw_search_box(f: &mut Frame, area: Rect, app: &App) {
  let focused = app.focus == SearchFocus::Results;

  let block = Block::default()
    .title(" Search ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(if focused {
      Color::Cyan
    } else {
      Color::DarkGray
    }));

  let inner = block.inner(area);
  f.render_widget(block, area);

  let text = if focused {
    format!("{}_", app.search)
  } else {
    app.search.clone()
  };
  f.render_widget(
    Paragraph::new(text).style(Style::default().fg(Color::Yellow)),
    inner,
  );
}

// ─── Results ──────────────────────────────────────────────────────────────────

fn draw_results(f: &mut Frame, area: Rect, app: &App) {
  let remaining = app.selection.remaining(&app.catalog);
  let total = remaining.len();
  let visible = matching_skills(&app.search, remaining);

  let title = if app.search.is_empty() {
    format!(" Skills ({total}) ")
  } else {
    format!(" Skills ({}/{total}) ", visible.len())
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let inner = block.inner(area);
  f.render_widget(block, area);

  let items: Vec<ListItem> = visible
    .iter()
    .map(|skill| {
      ListItem::new(Line::from(vec![
        Span::raw(skill.name_en.clone()),
        Span::styled(
          format!("  ({})", skill.domain.to_uppercase()),
          Style::default().fg(Color::DarkGray),
        ),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(if visible.is_empty() {
    None
  } else {
    Some(app.results_cursor)
  });

  f.render_stateful_widget(
    List::new(items)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol(""),
    inner,
    &mut state,
  );
}
