#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
  CancelCompose,
  CancelDelete,
  CollapseSelected,
  ConfirmDelete,
  DecrementRepost,
  ExpandSelected,
  HideHelp,
  IncrementRepost,
  None,
  OpenAvatar,
  PageDown,
  PageUp,
  Quit,
  ReplyToSelected,
  RequestDelete,
  SelectFirst,
  SelectLast,
  SelectNext,
  SelectPrevious,
  ShowHelp,
  StartCompose,
  SubmitCompose,
  ToggleSelected,
}
