use super::*;

#[derive(Debug)]
pub(crate) struct CommentEntry {
  pub(crate) author: String,
  pub(crate) avatar_url: String,
  pub(crate) body: String,
  pub(crate) children: Vec<usize>,
  pub(crate) depth: usize,
  pub(crate) expanded: bool,
  pub(crate) id: String,
  pub(crate) parent: Option<usize>,
  pub(crate) repost_count: i64,
}

impl CommentEntry {
  pub(crate) fn body(&self) -> &str {
    self.body.as_str()
  }

  pub(crate) fn has_children(&self) -> bool {
    !self.children.is_empty()
  }

  pub(crate) fn header(&self, current_user: &str) -> String {
    let reposts = format_reposts(self.repost_count);

    if self.is_own(current_user) {
      format!("{} (you) · {reposts}", self.author)
    } else {
      format!("{} · {reposts}", self.author)
    }
  }

  pub(crate) fn is_own(&self, current_user: &str) -> bool {
    self.author == current_user
  }
}
