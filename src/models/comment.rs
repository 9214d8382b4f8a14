//! Comments and the two-level comment tree.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::vote::{nullable_vote, VoteValue};

/// A comment on a post. Top-level comments carry their replies; replies
/// never carry replies of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    #[serde(default)]
    pub post_id: Option<i64>,
    #[serde(default)]
    pub parent_comment_id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub username: String,
    #[serde(alias = "content")]
    pub text: String,
    #[serde(default, alias = "netVotes")]
    pub votes: i64,
    #[serde(default, deserialize_with = "nullable_vote")]
    pub user_vote: VoteValue,
    #[serde(default)]
    pub replies: Vec<Comment>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub is_owned_by_current_user: bool,
}

impl Comment {
    /// Set the ownership flag on this comment and its replies.
    pub fn mark_ownership(&mut self, user_id: i64, username: &str) {
        self.is_owned_by_current_user = match self.user_id {
            Some(owner) => owner == user_id,
            None => self.username == username,
        };
        for reply in &mut self.replies {
            reply.mark_ownership(user_id, username);
        }
    }
}

/// Arrange comments into a two-level tree.
///
/// Input may be flat (replies identified by `parent_comment_id`), already
/// nested, or a mix. Replies to replies are attached to their top-level
/// ancestor. Replies whose parent is unknown become top-level. Input order
/// is preserved at both levels.
pub fn build_comment_tree(comments: Vec<Comment>) -> Vec<Comment> {
    let mut flat = Vec::new();
    for c in comments {
        flatten_into(c, None, &mut flat);
    }

    let parents: HashMap<i64, Option<i64>> =
        flat.iter().map(|c| (c.id, c.parent_comment_id)).collect();

    let bound = parents.len() + 1;
    let root_of = |id: i64| -> i64 {
        let mut current = id;
        // Bounded walk; a malformed cycle must not hang.
        for _ in 0..bound {
            match parents.get(&current).copied().flatten() {
                Some(parent) if parents.contains_key(&parent) => current = parent,
                _ => break,
            }
        }
        current
    };

    let mut roots: Vec<Comment> = Vec::new();
    let mut root_index: HashMap<i64, usize> = HashMap::new();
    let mut pending: Vec<(i64, Comment)> = Vec::new();

    for mut c in flat {
        let root = root_of(c.id);
        if root == c.id {
            c.parent_comment_id = None;
            root_index.insert(c.id, roots.len());
            roots.push(c);
        } else {
            pending.push((root, c));
        }
    }

    for (root, mut reply) in pending {
        match root_index.get(&root) {
            Some(&idx) => {
                reply.parent_comment_id = Some(root);
                roots[idx].replies.push(reply);
            }
            None => {
                root_index.insert(reply.id, roots.len());
                reply.parent_comment_id = None;
                roots.push(reply);
            }
        }
    }

    roots
}

fn flatten_into(mut comment: Comment, parent: Option<i64>, out: &mut Vec<Comment>) {
    if comment.parent_comment_id.is_none() {
        comment.parent_comment_id = parent;
    }
    let replies = std::mem::take(&mut comment.replies);
    let id = comment.id;
    out.push(comment);
    for reply in replies {
        flatten_into(reply, Some(id), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: i64, parent: Option<i64>) -> Comment {
        Comment {
            id,
            post_id: Some(1),
            parent_comment_id: parent,
            user_id: None,
            username: format!("user{}", id),
            text: format!("comment {}", id),
            votes: 0,
            user_vote: VoteValue::None,
            replies: Vec::new(),
            created_at: None,
            is_owned_by_current_user: false,
        }
    }

    #[test]
    fn test_flat_list_becomes_two_levels() {
        let tree = build_comment_tree(vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, None),
            comment(4, Some(1)),
        ]);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].id, 1);
        let reply_ids: Vec<i64> = tree[0].replies.iter().map(|c| c.id).collect();
        assert_eq!(reply_ids, vec![2, 4]);
        assert!(tree[1].replies.is_empty());
    }

    #[test]
    fn test_reply_to_reply_attaches_to_top_level() {
        let tree = build_comment_tree(vec![comment(1, None), comment(2, Some(1)), comment(3, Some(2))]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].replies.len(), 2);
        assert!(tree[0].replies.iter().all(|r| r.replies.is_empty()));
        assert!(tree[0].replies.iter().all(|r| r.parent_comment_id == Some(1)));
    }

    #[test]
    fn test_already_nested_input_is_flattened_to_depth_two() {
        let mut top = comment(1, None);
        let mut reply = comment(2, None);
        reply.replies.push(comment(3, None));
        top.replies.push(reply);

        let tree = build_comment_tree(vec![top]);
        assert_eq!(tree.len(), 1);
        let ids: Vec<i64> = tree[0].replies.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_orphan_reply_becomes_top_level() {
        let tree = build_comment_tree(vec![comment(5, Some(99))]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, 5);
        assert_eq!(tree[0].parent_comment_id, None);
    }

    #[test]
    fn test_cycle_terminates() {
        let tree = build_comment_tree(vec![comment(1, Some(2)), comment(2, Some(1))]);
        let total: usize = tree.iter().map(|c| 1 + c.replies.len()).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_mark_ownership_recurses() {
        let mut top = comment(1, None);
        top.user_id = Some(7);
        let mut reply = comment(2, Some(1));
        reply.user_id = Some(8);
        top.replies.push(reply);

        top.mark_ownership(8, "user8");
        assert!(!top.is_owned_by_current_user);
        assert!(top.replies[0].is_owned_by_current_user);
    }
}
