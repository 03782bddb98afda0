//! Rebuilds the reply tree of an article from its flat comment rows.

use std::collections::HashMap;

use crate::{
    config::OrphanPolicy,
    models::comment::{Comment, CommentNode},
};

/// Nests `comments` under their parents.
///
/// Roots and every reply list keep the relative order of the input. A reply
/// whose parent is not in the input is handled according to `orphans`.
/// Comments caught in a parent cycle are unreachable from any root and are
/// left out.
pub fn assemble(comments: Vec<Comment>, orphans: OrphanPolicy) -> Vec<CommentNode> {
    let n = comments.len();
    let index: HashMap<i64, usize> = comments
        .iter()
        .enumerate()
        .map(|(pos, c)| (c.id, pos))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut roots: Vec<usize> = Vec::new();

    for (pos, comment) in comments.iter().enumerate() {
        match comment.parent_id {
            None => roots.push(pos),
            Some(parent_id) => match index.get(&parent_id) {
                Some(&parent) => children[parent].push(pos),
                None => {
                    tracing::debug!(
                        comment_id = comment.id,
                        parent_id,
                        ?orphans,
                        "reply references a missing parent"
                    );
                    if orphans == OrphanPolicy::Promote {
                        roots.push(pos);
                    }
                }
            },
        }
    }

    // Pre-order walk with an explicit stack; parents always precede their
    // replies in `order`.
    let mut order = Vec::with_capacity(n);
    let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
    while let Some(pos) = stack.pop() {
        order.push(pos);
        stack.extend(children[pos].iter().rev());
    }

    // Build nodes back to front so every reply exists before its parent
    // takes ownership of it.
    let mut rows: Vec<Option<Comment>> = comments.into_iter().map(Some).collect();
    let mut built: Vec<Option<CommentNode>> = (0..n).map(|_| None).collect();
    for &pos in order.iter().rev() {
        let Some(comment) = rows[pos].take() else {
            continue;
        };
        let mut node = CommentNode::new(comment);
        node.replies = children[pos]
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[pos] = Some(node);
    }

    roots
        .into_iter()
        .filter_map(|pos| built[pos].take())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn comment(id: i64, parent_id: Option<i64>) -> Comment {
        let base = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        Comment {
            id,
            article_id: 42,
            user_id: 1,
            content: format!("comment {}", id),
            parent_id,
            root_id: None,
            username: "alice".to_string(),
            avatar: None,
            reply_to_user_id: None,
            reply_to_username: None,
            created_at: base + Duration::seconds(id),
            updated_at: base + Duration::seconds(id),
        }
    }

    fn ids(nodes: &[CommentNode]) -> Vec<i64> {
        nodes.iter().map(|n| n.comment.id).collect()
    }

    #[test]
    fn empty_input_gives_empty_forest() {
        assert!(assemble(Vec::new(), OrphanPolicy::Promote).is_empty());
    }

    #[test]
    fn nests_replies_under_their_parents() {
        let rows = vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, Some(2)),
            comment(4, None),
        ];

        let forest = assemble(rows, OrphanPolicy::Promote);

        assert_eq!(ids(&forest), vec![1, 4]);
        assert_eq!(ids(&forest[0].replies), vec![2]);
        assert_eq!(ids(&forest[0].replies[0].replies), vec![3]);
        assert!(forest[0].replies[0].replies[0].replies.is_empty());
        assert!(forest[1].replies.is_empty());
    }

    #[test]
    fn keeps_input_order_among_siblings() {
        let rows = vec![
            comment(10, None),
            comment(11, Some(10)),
            comment(12, None),
            comment(13, Some(10)),
            comment(14, Some(10)),
        ];

        let forest = assemble(rows, OrphanPolicy::Promote);

        assert_eq!(ids(&forest), vec![10, 12]);
        assert_eq!(ids(&forest[0].replies), vec![11, 13, 14]);
    }

    #[test]
    fn reply_listed_before_its_parent_is_still_attached() {
        let rows = vec![comment(5, Some(6)), comment(6, None)];

        let forest = assemble(rows, OrphanPolicy::Drop);

        assert_eq!(ids(&forest), vec![6]);
        assert_eq!(ids(&forest[0].replies), vec![5]);
    }

    #[test]
    fn flattening_the_forest_recovers_every_id_once() {
        let rows = vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, None),
            comment(4, Some(2)),
            comment(5, Some(3)),
            comment(6, Some(1)),
            comment(7, Some(4)),
            comment(8, None),
        ];

        let forest = assemble(rows, OrphanPolicy::Promote);
        let mut flat: Vec<i64> = forest.iter().flat_map(|n| n.flatten_ids()).collect();

        assert_eq!(flat, vec![1, 2, 4, 7, 6, 3, 5, 8]);
        flat.sort();
        assert_eq!(flat, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn promote_policy_lifts_orphans_to_top_level() {
        let rows = vec![comment(1, None), comment(2, Some(99)), comment(3, Some(2))];

        let forest = assemble(rows, OrphanPolicy::Promote);

        assert_eq!(ids(&forest), vec![1, 2]);
        assert_eq!(ids(&forest[1].replies), vec![3]);
    }

    #[test]
    fn drop_policy_hides_orphans_and_their_replies() {
        let rows = vec![comment(1, None), comment(2, Some(99)), comment(3, Some(2))];

        let forest = assemble(rows, OrphanPolicy::Drop);

        assert_eq!(ids(&forest), vec![1]);
        assert!(forest[0].replies.is_empty());
    }

    #[test]
    fn cyclic_rows_are_left_out_without_looping() {
        let rows = vec![
            comment(1, None),
            comment(2, Some(3)),
            comment(3, Some(2)),
            comment(4, Some(4)),
        ];

        let forest = assemble(rows, OrphanPolicy::Promote);

        assert_eq!(ids(&forest), vec![1]);
        assert!(forest[0].replies.is_empty());
    }
}
