use super::*;

const DELETE_TITLE: &str = "Delete comment";

const DELETE_TEXT: &str = "Are you sure you want to delete this comment? This will remove the comment and can't be undone.";

const DELETE_KEYS: &str = "y yes, delete • n no, cancel";

pub(crate) struct DeleteDialog;

impl DeleteDialog {
  pub(crate) fn draw(frame: &mut Frame, pending: &PendingDeletion, author: Option<&str>) {
    let area = centered_area(frame.area(), 52, 9);

    frame.render_widget(Clear, area);

    let subject = author.map_or_else(
      || format!("Comment {}", pending.comment_id),
      |author| format!("Comment by {author}"),
    );

    let text = vec![
      Line::from(Span::styled(
        subject,
        Style::default().add_modifier(Modifier::BOLD),
      )),
      Line::from(""),
      Line::from(DELETE_TEXT),
      Line::from(""),
      Line::from(Span::styled(DELETE_KEYS, Style::default().fg(Color::Red))),
    ];

    let dialog = Paragraph::new(text)
      .block(
        Block::default()
          .title(DELETE_TITLE)
          .borders(Borders::ALL)
          .border_style(Style::default().fg(Color::Red)),
      )
      .wrap(Wrap { trim: true });

    frame.render_widget(dialog, area);
  }

  pub(crate) fn handle_key(key: KeyEvent) -> Command {
    match key.code {
      KeyCode::Char('y' | 'Y') | KeyCode::Enter => Command::ConfirmDelete,
      KeyCode::Char('n' | 'N') | KeyCode::Esc => Command::CancelDelete,
      _ => Command::None,
    }
  }
}
