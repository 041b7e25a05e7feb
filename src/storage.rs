use super::*;

#[cfg(test)]
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub(crate) enum StorageError {
  #[error("stored comments are not valid: {0}")]
  Corrupt(#[source] serde_json::Error),
  #[error("could not encode comments: {0}")]
  Encode(#[source] serde_json::Error),
  #[error("I/O error at `{}`", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

pub(crate) trait Storage {
  fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

  fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug)]
pub(crate) struct FileStorage {
  dir: PathBuf,
}

impl FileStorage {
  pub(crate) fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  fn path(&self, key: &str) -> PathBuf {
    self.dir.join(format!("{key}.json"))
  }
}

impl Storage for FileStorage {
  fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
    let path = self.path(key);

    match fs::read_to_string(&path) {
      Ok(data) if data.trim().is_empty() => Ok(None),
      Ok(data) => Ok(Some(data)),
      Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(source) => Err(StorageError::Io { path, source }),
    }
  }

  fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
    let path = self.path(key);

    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).map_err(|source| StorageError::Io {
        path: parent.to_path_buf(),
        source,
      })?;
    }

    fs::write(&path, value).map_err(|source| StorageError::Io { path, source })
  }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryStorage {
  pub(crate) entries: HashMap<String, String>,
  pub(crate) writes: usize,
}

#[cfg(test)]
impl Storage for MemoryStorage {
  fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
    Ok(self.entries.get(key).cloned())
  }

  fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
    self.writes += 1;
    self.entries.insert(key.to_string(), value.to_string());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_reads_as_none() {
    let dir = tempfile::tempdir().unwrap();

    let storage = FileStorage::new(dir.path());

    assert_eq!(storage.read("comments_data").unwrap(), None);
  }

  #[test]
  fn write_creates_directories_and_overwrites() {
    let dir = tempfile::tempdir().unwrap();

    let mut storage = FileStorage::new(dir.path().join("nested").join("data"));

    storage.write("key", "first").unwrap();
    storage.write("key", "second").unwrap();

    assert_eq!(storage.read("key").unwrap().as_deref(), Some("second"));
    assert!(dir.path().join("nested/data/key.json").exists());
  }

  #[test]
  fn blank_file_reads_as_none() {
    let dir = tempfile::tempdir().unwrap();

    fs::write(dir.path().join("key.json"), "  \n").unwrap();

    assert_eq!(FileStorage::new(dir.path()).read("key").unwrap(), None);
  }

  #[test]
  fn unreadable_path_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();

    fs::create_dir(dir.path().join("key.json")).unwrap();

    let error = FileStorage::new(dir.path()).read("key").unwrap_err();

    assert!(matches!(error, StorageError::Io { .. }));
  }
}
