use super::*;

#[derive(Debug, Default)]
pub(crate) struct CommentView {
  pub(crate) entries: Vec<CommentEntry>,
  pub(crate) offset: usize,
  pub(crate) selected: Option<usize>,
}

impl CommentView {
  pub(crate) fn collapse_selected(&mut self) {
    if let Some(selected) = self.selected
      && let Some(entry) = self.entries.get_mut(selected)
    {
      if entry.expanded && !entry.children.is_empty() {
        entry.expanded = false;
      } else if let Some(parent) = entry.parent {
        self.selected = Some(parent);
      }
    }

    self.ensure_selection_visible();
  }

  pub(crate) fn ensure_selection_visible(&mut self) {
    let mut current = self.selected;

    while let Some(idx) = current {
      if self.is_visible(idx) {
        self.selected = Some(idx);
        return;
      }

      current = self.entries.get(idx).and_then(|entry| entry.parent);
    }

    self.selected = self.visible_indexes().first().copied();
  }

  pub(crate) fn expand_selected(&mut self) {
    if let Some(selected) = self.selected
      && let Some(entry) = self.entries.get_mut(selected)
    {
      if entry.children.is_empty() {
        return;
      }

      if entry.expanded {
        if let Some(child) = entry.children.first().copied() {
          self.selected = Some(child);
        }
      } else {
        entry.expanded = true;
      }
    }

    self.ensure_selection_visible();
  }

  pub(crate) fn is_visible(&self, idx: usize) -> bool {
    let mut current = Some(idx);

    while let Some(i) = current {
      if let Some(parent) = self.entries.get(i).and_then(|entry| entry.parent) {
        if let Some(parent_entry) = self.entries.get(parent)
          && !parent_entry.expanded
        {
          return false;
        }

        current = Some(parent);
      } else {
        break;
      }
    }

    true
  }

  pub(crate) fn move_by(&mut self, delta: isize) {
    let (visible, selected_pos) = self.visible_with_selection();

    if visible.is_empty() {
      self.selected = None;
      return;
    }

    let current = selected_pos.unwrap_or(0);
    let max_index = visible.len().saturating_sub(1);

    let target = if delta >= 0 {
      let delta_usize = usize::try_from(delta).unwrap_or(usize::MAX);
      current.saturating_add(delta_usize).min(max_index)
    } else {
      let magnitude = delta
        .checked_abs()
        .and_then(|value| usize::try_from(value).ok())
        .unwrap_or(usize::MAX);

      current.saturating_sub(magnitude)
    };

    self.selected = Some(visible[target]);
  }

  pub(crate) fn new(forest: &Forest) -> Self {
    Self::with_collapsed(forest, &HashSet::new())
  }

  pub(crate) fn page_down(&mut self, amount: usize) {
    let step = amount.saturating_sub(1).max(1);
    let delta = isize::try_from(step).unwrap_or(isize::MAX);
    self.move_by(delta);
  }

  pub(crate) fn page_up(&mut self, amount: usize) {
    let step = amount.saturating_sub(1).max(1);
    let delta = isize::try_from(step).unwrap_or(isize::MAX);
    self.move_by(-delta);
  }

  pub(crate) fn parent_id(&self, idx: usize) -> Option<&str> {
    self
      .entries
      .get(idx)
      .and_then(|entry| entry.parent)
      .and_then(|parent| self.entries.get(parent))
      .map(|parent| parent.id.as_str())
  }

  fn push_comment(
    entries: &mut Vec<CommentEntry>,
    comment: &Comment,
    parent: Option<usize>,
    depth: usize,
    collapsed: &HashSet<&str>,
  ) -> usize {
    let idx = entries.len();

    entries.push(CommentEntry {
      author: comment.author.clone(),
      avatar_url: comment.avatar_url.clone(),
      body: comment.text.clone(),
      children: Vec::new(),
      depth,
      expanded: !collapsed.contains(comment.id.as_str()),
      id: comment.id.clone(),
      parent,
      repost_count: comment.repost_count,
    });

    let child_indices = comment
      .replies
      .iter()
      .map(|reply| {
        Self::push_comment(
          entries,
          reply,
          Some(idx),
          depth.saturating_add(1),
          collapsed,
        )
      })
      .collect();

    if let Some(entry) = entries.get_mut(idx) {
      entry.children = child_indices;
    }

    idx
  }

  pub(crate) fn refreshed(&self, forest: &Forest) -> Self {
    let collapsed = self
      .entries
      .iter()
      .filter(|entry| !entry.expanded)
      .map(|entry| entry.id.as_str())
      .collect::<HashSet<_>>();

    let mut view = Self::with_collapsed(forest, &collapsed);

    view.offset = self.offset;

    let selected_id = self.selected_entry().map(|entry| entry.id.as_str());

    match selected_id.and_then(|id| view.position(id)) {
      Some(idx) => view.selected = Some(idx),
      None => {
        view.selected = self
          .selected
          .filter(|_| !view.entries.is_empty())
          .map(|idx| idx.min(view.entries.len().saturating_sub(1)));
      }
    }

    view.ensure_selection_visible();

    view
  }

  fn position(&self, id: &str) -> Option<usize> {
    self.entries.iter().position(|entry| entry.id == id)
  }

  pub(crate) fn select_id(&mut self, id: &str) {
    if let Some(idx) = self.position(id) {
      self.selected = Some(idx);
      self.ensure_selection_visible();
    }
  }

  pub(crate) fn select_index_at(&mut self, pos: usize) {
    let (visible, _) = self.visible_with_selection();

    if visible.is_empty() {
      self.selected = None;
      return;
    }

    let index = pos.min(visible.len().saturating_sub(1));

    self.selected = Some(visible[index]);
  }

  pub(crate) fn select_next(&mut self) {
    self.move_by(1);
  }

  pub(crate) fn select_previous(&mut self) {
    self.move_by(-1);
  }

  pub(crate) fn selected_entry(&self) -> Option<&CommentEntry> {
    self.selected.and_then(|idx| self.entries.get(idx))
  }

  pub(crate) fn toggle_selected(&mut self) {
    if let Some(selected) = self.selected
      && let Some(entry) = self.entries.get_mut(selected)
    {
      if entry.children.is_empty() {
        return;
      }

      entry.expanded = !entry.expanded;
    }

    self.ensure_selection_visible();
  }

  pub(crate) fn visible_indexes(&self) -> Vec<usize> {
    (0..self.entries.len())
      .filter(|&idx| self.is_visible(idx))
      .collect()
  }

  pub(crate) fn visible_with_selection(&self) -> (Vec<usize>, Option<usize>) {
    let visible = self.visible_indexes();

    let selected_pos = self
      .selected
      .and_then(|selected| visible.iter().position(|&idx| idx == selected));

    (visible, selected_pos)
  }

  fn with_collapsed(forest: &Forest, collapsed: &HashSet<&str>) -> Self {
    let mut entries = Vec::new();

    for root in forest.roots() {
      Self::push_comment(&mut entries, root, None, 0, collapsed);
    }

    let selected = (!entries.is_empty()).then_some(0);

    Self {
      entries,
      offset: 0,
      selected,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn make_view() -> CommentView {
    CommentView::new(&seed_forest())
  }

  #[test]
  fn flattens_in_display_order_with_depth() {
    let view = make_view();

    let rows = view
      .entries
      .iter()
      .map(|entry| (entry.id.as_str(), entry.depth))
      .collect::<Vec<_>>();

    assert_eq!(rows, [("1", 0), ("2", 0), ("3", 1)]);
    assert_eq!(view.selected, Some(0));
    assert_eq!(view.parent_id(2), Some("2"));
    assert_eq!(view.parent_id(1), None);
  }

  #[test]
  fn empty_forest_has_no_selection() {
    let view = CommentView::new(&Forest::default());

    assert!(view.selected.is_none());
    assert!(view.selected_entry().is_none());
  }

  #[test]
  fn toggle_selected_collapses_and_expands_comments() {
    let mut view = make_view();
    view.select_id("2");

    view.toggle_selected();
    assert!(!view.entries[1].expanded);
    assert_eq!(view.visible_indexes(), vec![0, 1]);

    view.toggle_selected();
    assert!(view.entries[1].expanded);
  }

  #[test]
  fn collapse_selected_moves_to_parent_when_child_selected() {
    let mut view = make_view();
    view.select_index_at(2);
    assert_eq!(view.selected, Some(2));
    view.collapse_selected();
    assert_eq!(view.selected, Some(1));
  }

  #[test]
  fn expand_selected_moves_into_first_child() {
    let mut view = make_view();
    view.select_id("2");
    view.expand_selected();
    assert_eq!(view.selected, Some(2));
  }

  #[test]
  fn ensure_selection_visible_promotes_hidden_selection() {
    let mut view = make_view();
    view.select_index_at(2);
    view.entries[1].expanded = false;
    view.ensure_selection_visible();
    assert_eq!(view.selected, Some(1));
  }

  #[test]
  fn movement_is_clamped() {
    let mut view = make_view();

    view.select_previous();
    assert_eq!(view.selected, Some(0));

    view.page_down(10);
    assert_eq!(view.selected, Some(2));

    view.select_next();
    assert_eq!(view.selected, Some(2));
  }

  #[test]
  fn refreshed_keeps_selection_and_collapsed_state() {
    let mut view = make_view();
    view.select_id("2");
    view.toggle_selected();

    let forest = seed_forest().with_repost_count("2", 9);
    let view = view.refreshed(&forest);

    assert_eq!(view.selected_entry().map(|e| e.id.as_str()), Some("2"));
    assert_eq!(view.selected_entry().map(|e| e.repost_count), Some(9));
    assert!(!view.entries[1].expanded);
  }

  #[test]
  fn refreshed_after_removal_keeps_the_row() {
    let mut view = make_view();
    view.select_id("3");

    let view = view.refreshed(&seed_forest().without("3", Some("2")));

    assert_eq!(view.selected_entry().map(|e| e.id.as_str()), Some("2"));
  }
}
