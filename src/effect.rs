#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
  OpenUrl { url: String },
}
