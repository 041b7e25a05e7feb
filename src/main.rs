use {
  anyhow::Context,
  app::App,
  command::Command,
  command_dispatch::CommandDispatch,
  comment::Comment,
  comment_entry::CommentEntry,
  comment_view::CommentView,
  compose_input::ComposeInput,
  config::{Config, CurrentUser},
  crossterm::{
    event as crossterm_event,
    event::{
      Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  delete_dialog::DeleteDialog,
  deletion::{DeletionFlow, PendingDeletion},
  effect::Effect,
  forest::Forest,
  help_view::HelpView,
  mode::Mode,
  persistence::Persistence,
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
      Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap,
    },
  },
  seed::seed_forest,
  serde::{Deserialize, Deserializer, Serialize},
  state::State,
  std::{
    backtrace::BacktraceStatus,
    collections::HashSet,
    env, fs,
    io::{self, IsTerminal, Stdout},
    path::PathBuf,
    process,
    rc::Rc,
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
  },
  storage::{FileStorage, Storage, StorageError},
  store::CommentStore,
  tracing::{debug, info, warn},
  tracing_appender::non_blocking::WorkerGuard,
  tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
  },
  transient_message::TransientMessage,
  utils::{
    centered_area, deserialize_null_as_default, format_reposts, truncate,
    wrap_text,
  },
};

#[cfg(test)]
use {
  persistence::STORAGE_KEY,
  storage::MemoryStorage,
};

mod app;
mod command;
mod command_dispatch;
mod comment;
mod comment_entry;
mod comment_view;
mod compose_input;
mod config;
mod delete_dialog;
mod deletion;
mod effect;
mod forest;
mod help_view;
mod mode;
mod persistence;
mod seed;
mod state;
mod storage;
mod store;
mod transient_message;
mod utils;

const BROWSE_STATUS: &str = "↑/k up • ↓/j down • c comment • r reply • d delete • +/- repost • q quit • ? help";

const COMPOSE_STATUS: &str = "type your comment • enter send • esc cancel";

const DELETE_STATUS: &str = "y delete • n keep";

const HELP_TITLE: &str = "Help";
const HELP_STATUS: &str = "Press ? or esc to close help";

const COMPOSE_PLACEHOLDER: &str = "Press c to add a comment";

const BASE_INDENT: &str = " ";

const HELP_TEXT: &str = "\
Navigation:
  ↑ / k   move selection up
  ↓ / j   move selection down
  pg↓     page down
  pg↑     page up
  ctrl+d  page down
  ctrl+u  page up
  home    jump to first comment
  end     jump to last comment
  ← / h   collapse or go to parent
  → / l   expand or go to first reply
  enter   toggle collapse or expand

Comments:
  c       write a new comment
  r       reply to the selected comment
  d       delete the selected comment
  + / -   change the repost count
  o       open the author's avatar in your browser

Compose:
  enter   send the comment
  esc     stop composing and drop the reply target

  q       quit
  ?       toggle this help
";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_logging(config: &Config) -> Result<WorkerGuard> {
  fs::create_dir_all(&config.data_dir).with_context(|| {
    format!(
      "could not create data directory `{}`",
      config.data_dir.display()
    )
  })?;

  let log_path = config.log_path();

  let file = fs::OpenOptions::new()
    .create(true)
    .append(true)
    .open(&log_path)
    .with_context(|| format!("could not open log file `{}`", log_path.display()))?;

  let (writer, guard) = tracing_appender::non_blocking(file);

  let filter = EnvFilter::try_new(&config.log_filter)
    .unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer().with_writer(writer).with_ansi(false))
    .try_init()?;

  Ok(guard)
}

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  terminal.show_cursor()?;

  Ok(())
}

fn run() -> Result {
  let config = Config::from_env().context("could not read configuration")?;

  let _guard =
    initialize_logging(&config).context("could not initialize logging")?;

  info!(
    data_dir = %config.data_dir.display(),
    user = %config.user.name,
    "starting threads"
  );

  let store =
    CommentStore::open(Persistence::new(FileStorage::new(&config.data_dir)));

  let mut terminal = initialize_terminal()?;

  let mut app = App::new(State::new(store, config.user));

  let result = app.run(&mut terminal);

  restore_terminal(&mut terminal)?;

  result
}

fn main() {
  if let Err(error) = run() {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
