//! Client-side assembly of comment reply trees.

use inkpress_types::CommentWithAuthor;
use std::collections::{HashMap, HashSet};

/// Build the reply tree from a flat, creation-ordered comment list.
///
/// Children attach to their parent via `parent_id`; a reply whose parent is
/// not in the list (deleted or unapproved) surfaces as a root. Input order
/// is preserved at every level.
pub fn thread_comments(flat: Vec<CommentWithAuthor>) -> Vec<CommentWithAuthor> {
    let known: HashSet<String> = flat.iter().map(|c| c.comment.id.clone()).collect();

    let mut roots: Vec<CommentWithAuthor> = Vec::new();
    // parent id -> replies, in input order
    let mut children: HashMap<String, Vec<CommentWithAuthor>> = HashMap::new();

    for comment in flat {
        let parent = comment
            .comment
            .parent_id
            .clone()
            .filter(|parent| known.contains(parent.as_str()));
        match parent {
            Some(parent) => children.entry(parent).or_default().push(comment),
            None => roots.push(comment),
        }
    }

    fn attach(
        node: &mut CommentWithAuthor,
        children: &mut HashMap<String, Vec<CommentWithAuthor>>,
    ) {
        if let Some(mut replies) = children.remove(&node.comment.id) {
            for reply in &mut replies {
                attach(reply, children);
            }
            node.replies = replies;
        }
    }

    for root in &mut roots {
        attach(root, &mut children);
    }

    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpress_types::{Comment, Profile, SubscriptionTier, UserRole};

    fn author() -> Profile {
        Profile {
            id: "user-1".to_string(),
            username: "ada".to_string(),
            email: None,
            full_name: None,
            bio: None,
            avatar_url: None,
            role: UserRole::Subscriber,
            subscription_tier: SubscriptionTier::Free,
            subscription_expires_at: None,
            stripe_customer_id: None,
            social_links: Default::default(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    fn comment(id: &str, parent_id: Option<&str>) -> CommentWithAuthor {
        CommentWithAuthor {
            comment: Comment {
                id: id.to_string(),
                post_id: "post-1".to_string(),
                author_id: "user-1".to_string(),
                parent_id: parent_id.map(str::to_string),
                content: format!("comment {id}"),
                is_approved: true,
                created_at: "2024-03-01T00:00:00Z".to_string(),
                updated_at: "2024-03-01T00:00:00Z".to_string(),
            },
            author: author(),
            replies: Vec::new(),
        }
    }

    #[test]
    fn test_flat_list_stays_flat() {
        let threaded = thread_comments(vec![comment("a", None), comment("b", None)]);
        assert_eq!(threaded.len(), 2);
        assert!(threaded.iter().all(|c| c.replies.is_empty()));
    }

    #[test]
    fn test_replies_attach_to_parent() {
        let threaded = thread_comments(vec![
            comment("a", None),
            comment("b", Some("a")),
            comment("c", Some("a")),
            comment("d", Some("b")),
        ]);

        assert_eq!(threaded.len(), 1);
        let root = &threaded[0];
        assert_eq!(root.comment.id, "a");
        assert_eq!(root.replies.len(), 2);
        assert_eq!(root.replies[0].comment.id, "b");
        assert_eq!(root.replies[0].replies[0].comment.id, "d");
        assert_eq!(root.replies[1].comment.id, "c");
    }

    #[test]
    fn test_orphan_reply_surfaces_as_root() {
        // parent was deleted or is unapproved, so it is absent from the list
        let threaded = thread_comments(vec![comment("a", None), comment("b", Some("gone"))]);
        assert_eq!(threaded.len(), 2);
        assert_eq!(threaded[1].comment.id, "b");
    }

    #[test]
    fn test_order_preserved_among_roots() {
        let threaded = thread_comments(vec![
            comment("a", None),
            comment("b", None),
            comment("c", None),
        ]);
        let ids: Vec<&str> = threaded.iter().map(|c| c.comment.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
