use super::*;

pub(crate) const STORAGE_KEY: &str = "comments_data";

#[derive(Debug)]
pub(crate) struct Persistence<S> {
  storage: S,
}

impl<S: Storage> Persistence<S> {
  pub(crate) fn load(&self) -> Result<Option<Forest>, StorageError> {
    let Some(blob) = self.storage.read(STORAGE_KEY)? else {
      return Ok(None);
    };

    let forest =
      serde_json::from_str::<Forest>(&blob).map_err(StorageError::Corrupt)?;

    debug!(comments = forest.len(), "loaded comments from storage");

    Ok(Some(forest))
  }

  pub(crate) fn new(storage: S) -> Self {
    Self { storage }
  }

  pub(crate) fn save(&mut self, forest: &Forest) -> Result<(), StorageError> {
    let blob = serde_json::to_string(forest).map_err(StorageError::Encode)?;

    self.storage.write(STORAGE_KEY, &blob)?;

    debug!(comments = forest.len(), "saved comments to storage");

    Ok(())
  }

  #[cfg(test)]
  pub(crate) fn storage(&self) -> &S {
    &self.storage
  }
}
