#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PendingDeletion {
  pub(crate) comment_id: String,
  pub(crate) parent_id: Option<String>,
}

#[derive(Debug, Default, Eq, PartialEq)]
pub(crate) enum DeletionFlow {
  #[default]
  Idle,
  PendingConfirm(PendingDeletion),
}

impl DeletionFlow {
  pub(crate) fn cancel(&mut self) {
    *self = Self::Idle;
  }

  pub(crate) fn confirm(&mut self) -> Option<PendingDeletion> {
    match std::mem::take(self) {
      Self::Idle => None,
      Self::PendingConfirm(pending) => Some(pending),
    }
  }

  pub(crate) fn pending(&self) -> Option<&PendingDeletion> {
    match self {
      Self::Idle => None,
      Self::PendingConfirm(pending) => Some(pending),
    }
  }

  pub(crate) fn request(&mut self, comment_id: String, parent_id: Option<String>) {
    *self = Self::PendingConfirm(PendingDeletion {
      comment_id,
      parent_id,
    });
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn confirm_yields_pending_and_returns_to_idle() {
    let mut flow = DeletionFlow::default();

    flow.request("3".into(), Some("2".into()));

    assert_eq!(
      flow.confirm(),
      Some(PendingDeletion {
        comment_id: "3".into(),
        parent_id: Some("2".into()),
      })
    );
    assert_eq!(flow, DeletionFlow::Idle);
    assert_eq!(flow.confirm(), None);
  }

  #[test]
  fn cancel_discards_pending() {
    let mut flow = DeletionFlow::default();

    flow.request("1".into(), None);
    flow.cancel();

    assert!(flow.pending().is_none());
  }

  #[test]
  fn last_request_wins() {
    let mut flow = DeletionFlow::default();

    flow.request("1".into(), None);
    flow.request("3".into(), Some("2".into()));

    assert_eq!(flow.pending().map(|p| p.comment_id.as_str()), Some("3"));
  }
}
