#[derive(Debug, Default)]
pub(crate) struct ComposeInput {
  pub(crate) buffer: String,
}

impl ComposeInput {
  pub(crate) fn can_submit(&self) -> bool {
    !self.buffer.trim().is_empty()
  }

  pub(crate) fn pop(&mut self) {
    self.buffer.pop();
  }

  pub(crate) fn push(&mut self, ch: char) {
    self.buffer.push(ch);
  }

  pub(crate) fn submit_label(replying_to: Option<&str>) -> &'static str {
    if replying_to.is_some() { "Reply" } else { "Send" }
  }

  pub(crate) fn take(&mut self) -> String {
    std::mem::take(&mut self.buffer)
  }

  pub(crate) fn title(replying_to: Option<&str>) -> String {
    match replying_to {
      Some(author) => format!("Reply to @{author}"),
      None => "Add Comment".to_string(),
    }
  }
}
