use super::*;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct Forest {
  roots: Vec<Rc<Comment>>,
}

impl Forest {
  pub(crate) fn ancestor_path(&self, target_id: &str) -> Option<Vec<Rc<Comment>>> {
    let mut stack = self
      .roots
      .iter()
      .rev()
      .map(|root| (0, root))
      .collect::<Vec<(usize, &Rc<Comment>)>>();

    let mut path = Vec::new();

    while let Some((depth, node)) = stack.pop() {
      path.truncate(depth);
      path.push(Rc::clone(node));

      if node.id == target_id {
        return Some(path);
      }

      stack.extend(node.replies.iter().rev().map(|reply| (depth + 1, reply)));
    }

    None
  }

  pub(crate) fn contains(&self, id: &str) -> bool {
    self.ancestor_path(id).is_some()
  }

  pub(crate) fn find(&self, id: &str) -> Option<Rc<Comment>> {
    self.ancestor_path(id).and_then(|mut path| path.pop())
  }

  pub(crate) fn len(&self) -> usize {
    let mut count = 0;
    let mut stack = self.roots.iter().collect::<Vec<_>>();

    while let Some(node) = stack.pop() {
      count += 1;
      stack.extend(node.replies.iter());
    }

    count
  }

  pub(crate) fn new(roots: Vec<Comment>) -> Self {
    Self {
      roots: roots.into_iter().map(Rc::new).collect(),
    }
  }

  pub(crate) fn reply_parent_id(&self, target_id: &str) -> Option<String> {
    let path = self.ancestor_path(target_id)?;

    path
      .get(path.len().saturating_sub(2))
      .map(|parent| parent.id.clone())
  }

  fn rewritten<F>(&self, edit: F) -> Self
  where
    F: Fn(&Comment) -> Option<Comment>,
  {
    rewrite_first(&self.roots, &edit)
      .map_or_else(|| self.clone(), |roots| Self { roots })
  }

  pub(crate) fn roots(&self) -> &[Rc<Comment>] {
    &self.roots
  }

  pub(crate) fn with_reply(&self, parent_id: &str, reply: Comment) -> Self {
    let reply = Rc::new(reply);

    self.rewritten(|node| {
      (node.id == parent_id).then(|| {
        let mut replies = node.replies.clone();
        replies.push(Rc::clone(&reply));
        node.with_replies(replies)
      })
    })
  }

  pub(crate) fn with_repost_count(&self, comment_id: &str, count: i64) -> Self {
    self.rewritten(|node| {
      (node.id == comment_id).then(|| Comment {
        repost_count: count,
        ..node.clone()
      })
    })
  }

  pub(crate) fn with_root(&self, comment: Comment) -> Self {
    let mut roots = self.roots.clone();
    roots.push(Rc::new(comment));
    Self { roots }
  }

  // Removes one level only: the roots, or the direct replies of `parent_id`.
  pub(crate) fn without(&self, comment_id: &str, parent_id: Option<&str>) -> Self {
    let Some(parent_id) = parent_id else {
      if !self.roots.iter().any(|root| root.id == comment_id) {
        return self.clone();
      }

      return Self {
        roots: self
          .roots
          .iter()
          .filter(|root| root.id != comment_id)
          .cloned()
          .collect(),
      };
    };

    self.rewritten(|node| {
      (node.id == parent_id && node.has_reply(comment_id)).then(|| {
        node.with_replies(
          node
            .replies
            .iter()
            .filter(|reply| reply.id != comment_id)
            .cloned()
            .collect(),
        )
      })
    })
  }
}

// `None` when nothing matched.
fn rewrite_first<F>(nodes: &[Rc<Comment>], edit: &F) -> Option<Vec<Rc<Comment>>>
where
  F: Fn(&Comment) -> Option<Comment>,
{
  for (index, node) in nodes.iter().enumerate() {
    let replacement = if let Some(edited) = edit(node) {
      edited
    } else if let Some(replies) = rewrite_first(&node.replies, edit) {
      node.with_replies(replies)
    } else {
      continue;
    };

    let mut rewritten = nodes.to_vec();
    rewritten[index] = Rc::new(replacement);
    return Some(rewritten);
  }

  None
}

#[cfg(test)]
mod tests {
  use super::*;

  fn comment(id: &str, author: &str, count: i64, replies: Vec<Comment>) -> Comment {
    Comment {
      author: author.to_string(),
      avatar_url: format!("https://example.com/{author}.png"),
      id: id.to_string(),
      replies: replies.into_iter().map(Rc::new).collect(),
      repost_count: count,
      text: format!("comment {id}"),
    }
  }

  fn scenario() -> Forest {
    Forest::new(vec![
      comment("1", "Alice", 3, Vec::new()),
      comment("2", "Bob", 2, vec![comment("3", "Carol", 1, Vec::new())]),
    ])
  }

  fn deep() -> Forest {
    Forest::new(vec![
      comment("a", "Alice", 0, Vec::new()),
      comment(
        "b",
        "Bob",
        0,
        vec![
          comment("c", "Carol", 0, Vec::new()),
          comment(
            "d",
            "Dave",
            0,
            vec![comment("e", "Eve", 0, vec![comment("f", "Frank", 0, Vec::new())])],
          ),
        ],
      ),
    ])
  }

  fn ids(path: &[Rc<Comment>]) -> Vec<&str> {
    path.iter().map(|node| node.id.as_str()).collect()
  }

  #[test]
  fn ancestor_path_runs_from_root_to_target() {
    let forest = deep();

    for id in ["a", "b", "c", "d", "e", "f"] {
      let path = forest.ancestor_path(id).unwrap();
      assert_eq!(path.last().unwrap().id, id);
      assert!(forest.roots().iter().any(|root| Rc::ptr_eq(root, &path[0])));
    }

    assert_eq!(ids(&forest.ancestor_path("f").unwrap()), ["b", "d", "e", "f"]);
    assert_eq!(ids(&forest.ancestor_path("c").unwrap()), ["b", "c"]);
    assert_eq!(ids(&forest.ancestor_path("a").unwrap()), ["a"]);
  }

  #[test]
  fn ancestor_path_is_none_for_unknown_id() {
    assert!(deep().ancestor_path("zzz").is_none());
    assert!(Forest::default().ancestor_path("1").is_none());
  }

  #[test]
  fn mutations_with_unknown_ids_are_no_ops() {
    let forest = scenario();

    assert_eq!(forest.with_reply("404", comment("9", "Zed", 0, Vec::new())), forest);
    assert_eq!(forest.without("404", None), forest);
    assert_eq!(forest.without("404", Some("2")), forest);
    assert_eq!(forest.without("3", Some("404")), forest);
    assert_eq!(forest.with_repost_count("404", 10), forest);
  }

  #[test]
  fn set_repost_count_touches_only_the_target() {
    let forest = scenario();

    let updated = forest.with_repost_count("1", 4);

    assert_eq!(updated.roots()[0].repost_count, 4);
    assert_eq!(updated.roots()[1], forest.roots()[1]);
    assert!(Rc::ptr_eq(&updated.roots()[1], &forest.roots()[1]));
  }

  #[test]
  fn set_repost_count_reaches_nested_comments() {
    let updated = deep().with_repost_count("f", -3);

    assert_eq!(updated.find("f").unwrap().repost_count, -3);
    assert_eq!(updated.find("e").unwrap().repost_count, 0);
  }

  #[test]
  fn set_repost_count_is_idempotent() {
    let forest = deep();

    let once = forest.with_repost_count("e", 7);
    let twice = once.with_repost_count("e", 7);

    assert_eq!(once, twice);
  }

  #[test]
  fn remove_with_parent_only_touches_that_parent() {
    let forest = scenario();

    let updated = forest.without("3", Some("2"));

    assert!(updated.roots()[1].replies.is_empty());
    assert_eq!(updated.roots()[1].repost_count, 2);
    assert_eq!(updated.roots()[1].text, "comment 2");
    assert!(Rc::ptr_eq(&updated.roots()[0], &forest.roots()[0]));
  }

  #[test]
  fn remove_without_parent_only_looks_at_roots() {
    let forest = scenario();

    assert_eq!(forest.without("3", None), forest);

    let updated = forest.without("1", None);
    assert_eq!(ids(updated.roots()), ["2"]);
  }

  #[test]
  fn remove_does_not_search_below_the_named_parent() {
    let forest = deep();

    assert_eq!(forest.without("f", Some("d")), forest);

    let updated = forest.without("f", Some("e"));
    assert!(updated.find("f").is_none());
    assert!(updated.find("e").unwrap().replies.is_empty());
  }

  #[test]
  fn add_root_appends_in_order() {
    let forest = scenario();

    let updated = forest.with_root(comment("4", "Dave", 0, Vec::new()));

    assert_eq!(ids(updated.roots()), ["1", "2", "4"]);
    assert!(Rc::ptr_eq(&updated.roots()[0], &forest.roots()[0]));
    assert_eq!(forest.roots().len(), 2);
  }

  #[test]
  fn add_reply_appends_to_parent_at_any_depth() {
    let forest = deep();

    let updated = forest.with_reply("e", comment("g", "Gus", 0, Vec::new()));

    let e = updated.find("e").unwrap();
    assert_eq!(ids(&e.replies), ["f", "g"]);
    assert!(Rc::ptr_eq(&updated.roots()[0], &forest.roots()[0]));
    assert!(Rc::ptr_eq(
      &updated.roots()[1].replies[0],
      &forest.roots()[1].replies[0]
    ));
    assert!(forest.find("g").is_none());
  }

  #[test]
  fn reply_parent_is_the_target_parent_or_the_root_itself() {
    let forest = deep();

    assert_eq!(forest.reply_parent_id("a").as_deref(), Some("a"));
    assert_eq!(forest.reply_parent_id("b").as_deref(), Some("b"));
    assert_eq!(forest.reply_parent_id("c").as_deref(), Some("b"));
    assert_eq!(forest.reply_parent_id("e").as_deref(), Some("d"));
    assert_eq!(forest.reply_parent_id("f").as_deref(), Some("e"));
    assert_eq!(forest.reply_parent_id("404"), None);
  }

  #[test]
  fn len_counts_every_comment() {
    assert_eq!(deep().len(), 6);
    assert_eq!(Forest::default().len(), 0);
    assert!(deep().contains("f"));
  }
}
