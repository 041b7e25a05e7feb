use super::*;

#[derive(Debug)]
pub(crate) struct CommentStore<S> {
  forest: Forest,
  last_id: u64,
  persistence: Persistence<S>,
}

impl<S: Storage> CommentStore<S> {
  pub(crate) fn add_reply(
    &mut self,
    parent_id: &str,
    reply: Comment,
  ) -> Result<bool, StorageError> {
    self.commit(self.forest.with_reply(parent_id, reply))
  }

  pub(crate) fn add_root_comment(
    &mut self,
    comment: Comment,
  ) -> Result<bool, StorageError> {
    self.commit(self.forest.with_root(comment))
  }

  fn commit(&mut self, forest: Forest) -> Result<bool, StorageError> {
    if forest == self.forest {
      return Ok(false);
    }

    self.forest = forest;

    self.persistence.save(&self.forest)?;

    Ok(true)
  }

  pub(crate) fn forest(&self) -> &Forest {
    &self.forest
  }

  pub(crate) fn next_id(&mut self) -> String {
    let now = SystemTime::now()
      .duration_since(UNIX_EPOCH)
      .map_or(0, |elapsed| {
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
      });

    let start = now.max(self.last_id.saturating_add(1));

    let candidate = (start..=u64::MAX)
      .chain(1..start)
      .find(|id| !self.forest.contains(&id.to_string()))
      .unwrap_or(start);

    self.last_id = candidate;

    candidate.to_string()
  }

  pub(crate) fn open(persistence: Persistence<S>) -> Self {
    let forest = match persistence.load() {
      Ok(Some(forest)) => {
        info!(comments = forest.len(), "restored stored comments");
        forest
      }
      Ok(None) => {
        info!("no stored comments, starting from seed data");
        seed_forest()
      }
      Err(error) => {
        warn!(%error, "could not load stored comments, starting from seed data");
        seed_forest()
      }
    };

    Self {
      forest,
      last_id: 0,
      persistence,
    }
  }

  pub(crate) fn remove_comment(
    &mut self,
    comment_id: &str,
    parent_id: Option<&str>,
  ) -> Result<bool, StorageError> {
    self.commit(self.forest.without(comment_id, parent_id))
  }

  pub(crate) fn set_repost_count(
    &mut self,
    comment_id: &str,
    count: i64,
  ) -> Result<bool, StorageError> {
    self.commit(self.forest.with_repost_count(comment_id, count))
  }

  #[cfg(test)]
  pub(crate) fn storage(&self) -> &S {
    self.persistence.storage()
  }
}
