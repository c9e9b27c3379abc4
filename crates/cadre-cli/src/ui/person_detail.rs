//! Person detail pane.
//!
//! Renders one fetched person: identity and contact lines, the role split
//! (current role first, inactive ones under a "Past" label), and the
//! capability list. Loading and failure states take over the whole pane —
//! nothing partial is shown while a fetch is in flight.

use cadre_core::{
  person::{Capability, Person, Role, RolePartition},
  query::PersonQuery,
};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

// ─── Public entry ─────────────────────────────────────────────────────────────

/// Render the person pane into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let title = match app.query.person() {
    Some(p) => format!(" {} ", p.full_name()),
    None => " Person ".to_string(),
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let mut inner = block.inner(area);
  f.render_widget(block, area);

  // Goto prompt on the bottom line of the pane.
  if app.goto_active && inner.height > 1 {
    let prompt_area = Rect {
      x:      inner.x,
      y:      inner.y + inner.height - 1,
      width:  inner.width,
      height: 1,
    };
    inner.height = inner.height.saturating_sub(1);

    f.render_widget(
      Paragraph::new(format!("id: {}_", app.goto_input))
        .style(Style::default().fg(Color::Yellow)),
      prompt_area,
    );
  }

  let para = Paragraph::new(body_lines(&app.query))
    .scroll((app.detail_scroll as u16, 0));
  f.render_widget(para, inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

/// Body lines for the current query state. Also used by the scroll handler
/// to clamp the offset.
pub fn body_lines(query: &PersonQuery) -> Vec<Line<'static>> {
  let dim = Style::default().fg(Color::DarkGray);
  match query {
    PersonQuery::Idle => vec![Line::from(Span::styled(
      "Press g and enter a person id.",
      dim,
    ))],
    PersonQuery::Pending { .. } => {
      vec![Line::from(Span::styled("Loading person…", dim))]
    }
    PersonQuery::Failed { error, .. } => vec![Line::from(Span::styled(
      format!("Error: {error}"),
      Style::default().fg(Color::Red),
    ))],
    PersonQuery::Loaded { person, .. } => person_lines(person),
  }
}

fn person_lines(person: &Person) -> Vec<Line<'static>> {
  let mut lines = Vec::new();

  lines.push(Line::from(Span::styled(
    person.full_name(),
    Style::default().add_modifier(Modifier::BOLD),
  )));
  lines.push(Line::from(format!(
    "{}, {} {}, {}",
    person.city, person.province, person.postal_code, person.country
  )));
  lines.push(Line::from(person.email.clone()));
  lines.push(Line::from(person.phone.clone()));

  lines.push(Line::from(""));
  lines.push(section_header("Role"));

  let split = RolePartition::of(&person.roles);
  if let Some(role) = split.current() {
    lines.push(role_line(role));
  }
  if !split.past().is_empty() {
    lines.push(Line::from(Span::styled(
      "Past",
      Style::default().add_modifier(Modifier::ITALIC),
    )));
    for role in split.past() {
      lines.push(role_line(role));
    }
  }

  lines.push(Line::from(""));
  lines.push(section_header("Capabilities"));
  for capability in &person.capabilities {
    lines.push(capability_line(capability));
  }

  lines
}

fn section_header(label: &str) -> Line<'static> {
  Line::from(Span::styled(
    label.to_string(),
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  ))
}

fn role_line(role: &Role) -> Line<'static> {
  Line::from(format!(
    "{} {}-{} Effort: {}",
    role.title_en, role.hr_group, role.hr_level, role.effort
  ))
}

fn capability_line(capability: &Capability) -> Line<'static> {
  let mut text = format!(
    "{} ({})",
    capability.name_en,
    capability.domain.to_uppercase()
  );
  if let Some(level) = &capability.validated_level {
    text.push(' ');
    text.push_str(&level.to_uppercase());
  }
  Line::from(text)
}

#[cfg(test)]
mod tests {
  use cadre_core::person::Effort;

  use super::*;

  fn role(id: &str, active: bool, title: &str) -> Role {
    Role {
      id: id.into(),
      active,
      title_en: title.into(),
      hr_group: "EC".into(),
      hr_level: "04".into(),
      effort: Effort::Fraction(1.0),
    }
  }

  fn person(roles: Vec<Role>, capabilities: Vec<Capability>) -> Person {
    Person {
      id: "p-1".into(),
      given_name: "Alice".into(),
      family_name: "Liddell".into(),
      city: "Ottawa".into(),
      province: "ON".into(),
      postal_code: "K1A 0A9".into(),
      country: "Canada".into(),
      email: "alice@example.com".into(),
      phone: "+1 613 555 0100".into(),
      roles,
      capabilities,
    }
  }

  fn rendered(query: &PersonQuery) -> Vec<String> {
    body_lines(query)
      .iter()
      .map(|line| {
        line
          .spans
          .iter()
          .map(|s| s.content.as_ref())
          .collect::<String>()
      })
      .collect()
  }

  #[test]
  fn second_active_role_is_not_rendered_anywhere() {
    let query = PersonQuery::Loaded {
      id:     "p-1".into(),
      person: person(
        vec![
          role("1", true, "Analyst"),
          role("2", false, "Clerk"),
          role("3", true, "Director"),
        ],
        Vec::new(),
      ),
    };

    let lines = rendered(&query);
    assert!(lines.iter().any(|l| l.starts_with("Analyst")));
    assert!(lines.iter().any(|l| l.starts_with("Clerk")));
    assert!(!lines.iter().any(|l| l.contains("Director")));

    // The past label appears once, before the inactive role.
    let past = lines.iter().position(|l| l == "Past").unwrap();
    let clerk = lines.iter().position(|l| l.starts_with("Clerk")).unwrap();
    assert!(past < clerk);
  }

  #[test]
  fn empty_role_list_renders_headings_only() {
    let query = PersonQuery::Loaded {
      id:     "p-1".into(),
      person: person(Vec::new(), Vec::new()),
    };

    let lines = rendered(&query);
    assert!(lines.contains(&"Role".to_string()));
    assert!(lines.contains(&"Capabilities".to_string()));
    assert!(!lines.iter().any(|l| l == "Past"));
  }

  #[test]
  fn capability_level_is_uppercased_only_when_present() {
    let query = PersonQuery::Loaded {
      id:     "p-1".into(),
      person: person(
        Vec::new(),
        vec![
          Capability {
            id:              "c-1".into(),
            name_en:         "python".into(),
            domain:          "lang".into(),
            validated_level: Some("advanced".into()),
          },
          Capability {
            id:              "c-2".into(),
            name_en:         "go".into(),
            domain:          "lang".into(),
            validated_level: None,
          },
        ],
      ),
    };

    let lines = rendered(&query);
    assert!(lines.contains(&"python (LANG) ADVANCED".to_string()));
    assert!(lines.contains(&"go (LANG)".to_string()));
  }

  #[test]
  fn pending_state_renders_a_loading_line() {
    let query = PersonQuery::Pending { id: "p-1".into() };
    assert_eq!(rendered(&query), ["Loading person…"]);
  }

  #[test]
  fn failed_state_renders_the_error() {
    let query = PersonQuery::Failed {
      id:    "p-1".into(),
      error: "404 Not Found".into(),
    };
    assert_eq!(rendered(&query), ["Error: 404 Not Found"]);
  }
}
