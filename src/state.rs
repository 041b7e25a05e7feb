use super::*;

pub(crate) struct State<S> {
  compose: ComposeInput,
  deletion: DeletionFlow,
  help: HelpView,
  list_height: usize,
  message: String,
  mode: Mode,
  pending_effects: Vec<Effect>,
  reply_to: Option<Rc<Comment>>,
  store: CommentStore<S>,
  transient_message: Option<TransientMessage>,
  user: CurrentUser,
  view: CommentView,
}

impl<S: Storage> State<S> {
  fn adjust_repost_count(&mut self, delta: i64) -> Result {
    let Some(entry) = self.view.selected_entry() else {
      return Ok(());
    };

    let (id, count) = (entry.id.clone(), entry.repost_count.saturating_add(delta));

    self.on_repost_count_change(&id, count)
  }

  fn apply<F>(&mut self, mutate: F) -> Result<bool>
  where
    F: FnOnce(&mut CommentStore<S>) -> Result<bool, StorageError>,
  {
    let result = mutate(&mut self.store);

    self.view = self.view.refreshed(self.store.forest());

    result.context("could not save comments")
  }

  fn cancel_compose(&mut self) {
    self.on_cancel_reply();
    self.mode = Mode::Browse;
    self.restore_status();
  }

  pub(crate) fn cancel_delete(&mut self) {
    self.deletion.cancel();
    self.restore_status();
  }

  pub(crate) fn clear_pending_effects(&mut self) {
    self.pending_effects.clear();
  }

  pub(crate) fn compose(&self) -> &ComposeInput {
    &self.compose
  }

  pub(crate) fn confirm_delete(&mut self) -> Result {
    let Some(pending) = self.deletion.confirm() else {
      return Ok(());
    };

    self.restore_status();

    let removed = self.apply(|store| {
      store.remove_comment(&pending.comment_id, pending.parent_id.as_deref())
    })?;

    if removed {
      info!(comment = %pending.comment_id, "deleted comment");
      self.set_transient_message("Comment deleted".into());
    }

    Ok(())
  }

  pub(crate) fn current_user(&self) -> &CurrentUser {
    &self.user
  }

  pub(crate) fn dispatch_command(
    &mut self,
    command: Command,
  ) -> Result<CommandDispatch> {
    debug_assert!(
      self.pending_effects.is_empty(),
      "command dispatch should start without pending effects"
    );

    let mut should_exit = false;

    match command {
      Command::Quit => {
        should_exit = true;
      }
      Command::ShowHelp => self.help.show(&mut self.message),
      Command::HideHelp => self.help.hide(&mut self.message),
      Command::SelectNext => self.view.select_next(),
      Command::SelectPrevious => self.view.select_previous(),
      Command::SelectFirst => self.view.select_index_at(0),
      Command::SelectLast => self.view.select_index_at(usize::MAX),
      Command::PageDown => self.view.page_down(self.list_height),
      Command::PageUp => self.view.page_up(self.list_height),
      Command::CollapseSelected => self.view.collapse_selected(),
      Command::ExpandSelected => self.view.expand_selected(),
      Command::ToggleSelected => self.view.toggle_selected(),
      Command::StartCompose => self.start_compose(),
      Command::CancelCompose => self.cancel_compose(),
      Command::SubmitCompose => self.submit_compose()?,
      Command::ReplyToSelected => self.reply_to_selected(),
      Command::RequestDelete => self.request_delete_selected(),
      Command::ConfirmDelete => self.confirm_delete()?,
      Command::CancelDelete => self.cancel_delete(),
      Command::IncrementRepost => self.adjust_repost_count(1)?,
      Command::DecrementRepost => self.adjust_repost_count(-1)?,
      Command::OpenAvatar => self.open_avatar(),
      Command::None => {}
    }

    Ok(CommandDispatch {
      effects: std::mem::take(&mut self.pending_effects),
      should_exit,
    })
  }

  pub(crate) fn forest(&self) -> &Forest {
    self.store.forest()
  }

  pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Command {
    if self.help.is_visible() {
      HelpView::handle_key(key)
    } else if self.deletion.pending().is_some() {
      DeleteDialog::handle_key(key)
    } else {
      self.mode.handle_key(key, &mut self.compose)
    }
  }

  pub(crate) fn help(&self) -> &HelpView {
    &self.help
  }

  pub(crate) fn message(&self) -> &str {
    &self.message
  }

  pub(crate) fn mode(&self) -> Mode {
    self.mode
  }

  pub(crate) fn new(store: CommentStore<S>, user: CurrentUser) -> Self {
    let view = CommentView::new(store.forest());

    Self {
      compose: ComposeInput::default(),
      deletion: DeletionFlow::default(),
      help: HelpView::new(),
      list_height: 0,
      message: BROWSE_STATUS.into(),
      mode: Mode::Browse,
      pending_effects: Vec::new(),
      reply_to: None,
      store,
      transient_message: None,
      user,
      view,
    }
  }

  pub(crate) fn on_cancel_reply(&mut self) {
    self.reply_to = None;
  }

  pub(crate) fn on_delete(&mut self, comment_id: String, parent_id: Option<String>) {
    self.deletion.request(comment_id, parent_id);
    self.restore_status();
  }

  pub(crate) fn on_reply(&mut self, comment: Rc<Comment>) {
    self.reply_to = Some(comment);
    self.mode = Mode::Compose;
    self.restore_status();
  }

  pub(crate) fn on_repost_count_change(
    &mut self,
    comment_id: &str,
    count: i64,
  ) -> Result {
    self.apply(|store| store.set_repost_count(comment_id, count))?;
    Ok(())
  }

  pub(crate) fn on_submit_comment(&mut self, text: &str) -> Result<Option<String>> {
    if text.trim().is_empty() {
      return Ok(None);
    }

    let id = self.store.next_id();

    let reply_to = self.reply_to.take();

    let text = match &reply_to {
      Some(target) => format!("@{} {text}", target.author),
      None => text.to_string(),
    };

    let comment = Comment::new(
      id.clone(),
      self.user.name.clone(),
      self.user.avatar_url.clone(),
      text,
    );

    let added = match reply_to {
      Some(target) => {
        let parent_id = self
          .store
          .forest()
          .reply_parent_id(&target.id)
          .unwrap_or_else(|| target.id.clone());

        self.apply(|store| store.add_reply(&parent_id, comment))?
      }
      None => self.apply(|store| store.add_root_comment(comment))?,
    };

    if !added {
      return Ok(None);
    }

    info!(comment = %id, "added comment");

    self.view.select_id(&id);

    Ok(Some(id))
  }

  fn open_avatar(&mut self) {
    if let Some(entry) = self.view.selected_entry()
      && !entry.avatar_url.is_empty()
    {
      self.pending_effects.push(Effect::OpenUrl {
        url: entry.avatar_url.clone(),
      });
    }
  }

  pub(crate) fn pending_deletion(&self) -> Option<&PendingDeletion> {
    self.deletion.pending()
  }

  pub(crate) fn reply_target(&self) -> Option<&Comment> {
    self.reply_to.as_deref()
  }

  fn reply_to_selected(&mut self) {
    let Some(entry) = self.view.selected_entry() else {
      return;
    };

    if entry.is_own(&self.user.name) {
      self.set_transient_message("You can't reply to your own comment".into());
      return;
    }

    if let Some(comment) = self.store.forest().find(&entry.id) {
      self.on_reply(comment);
    }
  }

  fn request_delete_selected(&mut self) {
    let Some(selected) = self.view.selected else {
      return;
    };

    let Some(entry) = self.view.entries.get(selected) else {
      return;
    };

    if !entry.is_own(&self.user.name) {
      self.set_transient_message("You can only delete your own comments".into());
      return;
    }

    let comment_id = entry.id.clone();
    let parent_id = self.view.parent_id(selected).map(str::to_string);

    self.on_delete(comment_id, parent_id);
  }

  fn restore_status(&mut self) {
    if self.help.is_visible() {
      return;
    }

    self.transient_message = None;

    self.message = if self.deletion.pending().is_some() {
      DELETE_STATUS.into()
    } else {
      match self.mode {
        Mode::Browse => BROWSE_STATUS.into(),
        Mode::Compose => COMPOSE_STATUS.into(),
      }
    };
  }

  pub(crate) fn set_list_height(&mut self, height: usize) {
    self.list_height = height;
  }

  pub(crate) fn set_transient_message(&mut self, message: String) {
    let previous = self.transient_message.as_ref().map_or_else(
      || self.message.clone(),
      |transient| transient.previous().to_string(),
    );

    self.transient_message =
      Some(TransientMessage::new(message.clone(), previous));

    self.message = message;
  }

  fn start_compose(&mut self) {
    self.mode = Mode::Compose;
    self.restore_status();
  }

  fn submit_compose(&mut self) -> Result {
    if !self.compose.can_submit() {
      return Ok(());
    }

    let text = self.compose.take();

    self.mode = Mode::Browse;
    self.restore_status();

    self.on_submit_comment(&text)?;

    Ok(())
  }

  pub(crate) fn update_transient_message(&mut self) {
    if let Some(transient) = self.transient_message.clone() {
      if self.message != transient.text() {
        self.transient_message = None;
      } else if transient.is_expired() {
        self.message = transient.previous().to_string();
        self.transient_message = None;
      }
    }
  }

  pub(crate) fn view(&self) -> &CommentView {
    &self.view
  }

  pub(crate) fn view_mut(&mut self) -> &mut CommentView {
    &mut self.view
  }
}
