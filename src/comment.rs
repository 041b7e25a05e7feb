use super::*;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Comment {
  #[serde(rename = "username", alias = "author")]
  pub(crate) author: String,
  pub(crate) avatar_url: String,
  pub(crate) id: String,
  #[serde(default, deserialize_with = "deserialize_null_as_default")]
  pub(crate) replies: Vec<Rc<Comment>>,
  pub(crate) repost_count: i64,
  pub(crate) text: String,
}

impl Comment {
  pub(crate) fn has_reply(&self, id: &str) -> bool {
    self.replies.iter().any(|reply| reply.id == id)
  }

  pub(crate) fn new(
    id: String,
    author: String,
    avatar_url: String,
    text: String,
  ) -> Self {
    Self {
      author,
      avatar_url,
      id,
      replies: Vec::new(),
      repost_count: 0,
      text,
    }
  }

  pub(crate) fn with_replies(&self, replies: Vec<Rc<Comment>>) -> Self {
    Self {
      author: self.author.clone(),
      avatar_url: self.avatar_url.clone(),
      id: self.id.clone(),
      replies,
      repost_count: self.repost_count,
      text: self.text.clone(),
    }
  }
}
