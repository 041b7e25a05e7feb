use super::*;

const DEFAULT_AVATAR_URL: &str = "https://i.pravatar.cc/50?img=4";
const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_USER: &str = "CurrentUser";

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CurrentUser {
  pub(crate) avatar_url: String,
  pub(crate) name: String,
}

#[derive(Clone, Debug)]
pub(crate) struct Config {
  pub(crate) data_dir: PathBuf,
  pub(crate) log_filter: String,
  pub(crate) user: CurrentUser,
}

impl Config {
  pub(crate) fn from_env() -> Result<Self> {
    Self::from_lookup(|name| env::var(name).ok())
  }

  fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let data_dir = if let Some(dir) = lookup("THREADS_DATA_DIR") {
      PathBuf::from(dir)
    } else {
      let base_dir = if let Some(dir) = lookup("XDG_DATA_HOME") {
        PathBuf::from(dir)
      } else if let Some(home) = lookup("HOME") {
        PathBuf::from(home).join(".local").join("share")
      } else {
        env::current_dir()
          .context("could not determine the current directory")?
          .join(".local")
          .join("share")
      };

      base_dir.join("threads")
    };

    let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    Ok(Self {
      data_dir,
      log_filter: lookup("RUST_LOG")
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
      user: CurrentUser {
        avatar_url: non_blank("THREADS_AVATAR_URL")
          .unwrap_or_else(|| DEFAULT_AVATAR_URL.to_string()),
        name: non_blank("THREADS_USER")
          .unwrap_or_else(|| DEFAULT_USER.to_string()),
      },
    })
  }

  pub(crate) fn log_path(&self) -> PathBuf {
    self.data_dir.join("threads.log")
  }
}
