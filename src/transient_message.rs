use super::*;

const TRANSIENT_MESSAGE_DURATION: Duration = Duration::from_secs(3);

#[derive(Clone)]
pub(crate) struct TransientMessage {
  expires_at: Instant,
  previous: String,
  text: String,
}

impl TransientMessage {
  pub(crate) fn is_expired(&self) -> bool {
    Instant::now() >= self.expires_at
  }

  pub(crate) fn new(text: String, previous: String) -> Self {
    Self {
      expires_at: Instant::now() + TRANSIENT_MESSAGE_DURATION,
      previous,
      text,
    }
  }

  pub(crate) fn previous(&self) -> &str {
    &self.previous
  }

  pub(crate) fn text(&self) -> &str {
    &self.text
  }
}
