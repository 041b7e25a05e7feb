use super::*;

pub(crate) struct App<S> {
  state: State<S>,
}

impl<S: Storage> App<S> {
  fn comment_list_item(
    entry: &CommentEntry,
    available_width: u16,
    current_user: &str,
  ) -> ListItem<'static> {
    let depth_indent = "  ".repeat(entry.depth);
    let indent = format!("{BASE_INDENT}{depth_indent}");

    let toggle = entry.has_children().then_some(if entry.expanded {
      "[-]"
    } else {
      "[+]"
    });

    let mut header = vec![Span::raw(indent.clone())];

    if let Some(symbol) = toggle {
      header.push(Span::raw(symbol));
      header.push(Span::raw(" "));
    }

    let author_color = if entry.is_own(current_user) {
      Color::Yellow
    } else {
      Color::White
    };

    header.push(Span::styled(
      entry.header(current_user),
      Style::default().fg(author_color),
    ));

    let mut lines = vec![Line::from(header)];

    if !entry.body().is_empty() {
      let prefix_width = indent.chars().count();
      let wrap_width =
        (available_width as usize).saturating_sub(prefix_width).max(1);

      for line in wrap_text(entry.body(), wrap_width) {
        lines.push(Line::from(vec![
          Span::raw(indent.clone()),
          Span::styled(line, Style::default().fg(Color::DarkGray)),
        ]));
      }
    }

    lines.push(Line::from(Span::raw(indent)));

    ListItem::new(lines)
  }

  fn compose_widget(&self) -> Paragraph<'static> {
    let composing = self.state.mode() == Mode::Compose;

    let replying_to = self
      .state
      .reply_target()
      .map(|comment| comment.author.as_str());

    let title = ComposeInput::title(replying_to);

    let submit = format!(" enter {} ", ComposeInput::submit_label(replying_to));

    let buffer = &self.state.compose().buffer;

    let content = if buffer.is_empty() && !composing {
      Span::styled(
        COMPOSE_PLACEHOLDER,
        Style::default().fg(Color::DarkGray),
      )
    } else {
      Span::raw(buffer.clone())
    };

    let border = if composing { Color::Cyan } else { Color::DarkGray };

    Paragraph::new(Line::from(vec![Span::raw(BASE_INDENT), content])).block(
      Block::default()
        .title(title)
        .title_bottom(Line::from(submit).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border)),
    )
  }

  pub(crate) fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
      ])
      .split(frame.area());

    self.state.set_list_height(layout[1].height as usize);

    let count = self.state.forest().len();

    let title = Line::from(vec![
      Span::styled(
        "COMMENTS",
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      ),
      Span::styled(
        format!(" {count}"),
        Style::default().fg(Color::DarkGray),
      ),
    ]);

    frame.render_widget(Paragraph::new(title), layout[0]);

    let view = self.state.view();

    let (visible, selected_pos) = view.visible_with_selection();

    let list_items: Vec<ListItem> = if visible.is_empty() {
      vec![ListItem::new(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::raw("No comments yet. Press c to write one."),
      ]))]
    } else {
      visible
        .iter()
        .map(|&idx| {
          Self::comment_list_item(
            &view.entries[idx],
            layout[1].width,
            &self.state.current_user().name,
          )
        })
        .collect()
    };

    let offset = view.offset.min(selected_pos.unwrap_or(0));

    let mut list_state = ListState::default()
      .with_selected(selected_pos)
      .with_offset(offset);

    let list = List::new(list_items)
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("");

    frame.render_stateful_widget(list, layout[1], &mut list_state);

    self.state.view_mut().offset = list_state.offset();

    frame.render_widget(self.compose_widget(), layout[2]);

    if self.state.mode() == Mode::Compose && self.state.pending_deletion().is_none()
    {
      let typed = self.state.compose().buffer.chars().count();

      let x = layout[2]
        .x
        .saturating_add(1)
        .saturating_add(u16::try_from(BASE_INDENT.len() + typed).unwrap_or(u16::MAX))
        .min(layout[2].right().saturating_sub(2));

      frame.set_cursor_position((x, layout[2].y.saturating_add(1)));
    }

    let status = Paragraph::new(self.state.message().to_string())
      .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, layout[3]);

    if let Some(pending) = self.state.pending_deletion() {
      let author = self
        .state
        .forest()
        .find(&pending.comment_id)
        .map(|comment| comment.author.clone());

      DeleteDialog::draw(frame, pending, author.as_deref());
    }

    self.state.help().draw(frame);
  }

  fn execute_effect(&mut self, effect: Effect) {
    match effect {
      Effect::OpenUrl { url } => match webbrowser::open(&url) {
        Ok(()) => {
          self.state.set_transient_message(format!(
            "Opened in browser: {}",
            truncate(&url, 80)
          ));
        }
        Err(error) => {
          warn!(%error, %url, "could not open link");
          self
            .state
            .set_transient_message(format!("Could not open link: {error}"));
        }
      },
    }
  }

  pub(crate) fn new(state: State<S>) -> Self {
    Self { state }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    loop {
      self.state.update_transient_message();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(200))? {
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        continue;
      };

      if key.kind != KeyEventKind::Press {
        continue;
      }

      let command = self.state.handle_key(key);

      match self.state.dispatch_command(command) {
        Ok(dispatch) => {
          for effect in dispatch.effects {
            self.execute_effect(effect);
          }

          if dispatch.should_exit {
            break;
          }
        }
        Err(error) => {
          warn!("{error:#}");
          self.state.clear_pending_effects();
          self.state.set_transient_message(format!("error: {error:#}"));
        }
      }
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use {super::*, ratatui::backend::TestBackend};

  fn app_as(name: &str) -> App<MemoryStorage> {
    App::new(State::new(
      CommentStore::open(Persistence::new(MemoryStorage::default())),
      CurrentUser {
        avatar_url: String::new(),
        name: name.to_string(),
      },
    ))
  }

  fn render(app: &mut App<MemoryStorage>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();

    terminal.draw(|frame| app.draw(frame)).unwrap();

    terminal
      .backend()
      .buffer()
      .content()
      .iter()
      .map(|cell| cell.symbol())
      .collect()
  }

  #[test]
  fn renders_comments_and_compose_box() {
    let mut app = app_as("John");

    let screen = render(&mut app);

    assert!(screen.contains("COMMENTS 3"));
    assert!(screen.contains("Alice · 3 reposts"));
    assert!(screen.contains("[-] Charlie · 2 reposts"));
    assert!(screen.contains("Add Comment"));
    assert!(screen.contains(COMPOSE_PLACEHOLDER));
  }

  #[test]
  fn renders_reply_target_and_delete_dialog() {
    let mut app = app_as("Alice");

    app.state.view_mut().select_id("2");
    app
      .state
      .dispatch_command(Command::ReplyToSelected)
      .unwrap();

    assert!(render(&mut app).contains("Reply to @Charlie"));

    app.state.dispatch_command(Command::CancelCompose).unwrap();
    app.state.view_mut().select_id("3");
    app.state.dispatch_command(Command::RequestDelete).unwrap();

    let screen = render(&mut app);

    assert!(screen.contains("Delete comment"));
    assert!(screen.contains("Comment by Alice"));
  }

  #[test]
  fn own_comments_are_marked() {
    let mut app = app_as("Alice");

    assert!(render(&mut app).contains("Alice (you) · 3 reposts"));
  }
}
