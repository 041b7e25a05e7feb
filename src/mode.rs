use super::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Mode {
  #[default]
  Browse,
  Compose,
}

impl Mode {
  pub(crate) fn handle_key(
    self,
    key: KeyEvent,
    compose: &mut ComposeInput,
  ) -> Command {
    let modifiers = key.modifiers;

    match self {
      Mode::Browse => match key.code {
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Command::Quit,
        KeyCode::Char('?') => Command::ShowHelp,
        KeyCode::Down | KeyCode::Char('j') => Command::SelectNext,
        KeyCode::Up | KeyCode::Char('k') => Command::SelectPrevious,
        KeyCode::PageDown => Command::PageDown,
        KeyCode::PageUp => Command::PageUp,
        KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
          Command::PageDown
        }
        KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
          Command::PageUp
        }
        KeyCode::Home => Command::SelectFirst,
        KeyCode::End => Command::SelectLast,
        KeyCode::Left | KeyCode::Char('h') => Command::CollapseSelected,
        KeyCode::Right | KeyCode::Char('l') => Command::ExpandSelected,
        KeyCode::Enter | KeyCode::Char(' ') => Command::ToggleSelected,
        KeyCode::Char('c' | 'i') => Command::StartCompose,
        KeyCode::Char('r') => Command::ReplyToSelected,
        KeyCode::Char('d') => Command::RequestDelete,
        KeyCode::Char('+' | '=') => Command::IncrementRepost,
        KeyCode::Char('-') => Command::DecrementRepost,
        KeyCode::Char('o' | 'O') => Command::OpenAvatar,
        _ => Command::None,
      },
      Mode::Compose => match key.code {
        KeyCode::Esc => Command::CancelCompose,
        KeyCode::Enter => Command::SubmitCompose,
        KeyCode::Backspace => {
          compose.pop();
          Command::None
        }
        KeyCode::Char(ch) => {
          if modifiers.contains(KeyModifiers::CONTROL)
            || modifiers.contains(KeyModifiers::ALT)
            || modifiers.contains(KeyModifiers::SUPER)
          {
            return Command::None;
          }

          compose.push(ch);

          Command::None
        }
        _ => Command::None,
      },
    }
  }
}
