use super::*;

const ALICE_AVATAR: &str = "https://i.pravatar.cc/50?img=1";
const CHARLIE_AVATAR: &str = "https://i.pravatar.cc/50?img=3";

pub(crate) fn seed_forest() -> Forest {
  let reply = Comment {
    repost_count: 1,
    ..Comment::new(
      "3".into(),
      "Alice".into(),
      ALICE_AVATAR.into(),
      "@Charlie Start with the fundamentals of HTML, CSS and JS before picking up a framework. It is tempting to skip ahead, but a solid base pays off.".into(),
    )
  };

  Forest::new(vec![
    Comment {
      repost_count: 3,
      ..Comment::new(
        "1".into(),
        "Alice".into(),
        ALICE_AVATAR.into(),
        "Impressive work! The drag interaction could be smoother, but the layout holds up really well across breakpoints.".into(),
      )
    },
    Comment {
      replies: vec![Rc::new(reply)],
      repost_count: 2,
      ..Comment::new(
        "2".into(),
        "Charlie".into(),
        CHARLIE_AVATAR.into(),
        "This project looks great! How long have you been coding? I am still new and thinking about learning a frontend framework soon. Any tips on where to start?".into(),
      )
    },
  ])
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn seed_has_two_roots_and_one_reply() {
    let forest = seed_forest();

    assert_eq!(forest.roots().len(), 2);
    assert_eq!(forest.len(), 3);
    assert_eq!(forest.ancestor_path("3").unwrap()[0].id, "2");
    assert_eq!(forest.find("1").unwrap().repost_count, 3);
  }
}
