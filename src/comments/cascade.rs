//! Removal of a comment together with every reply beneath it.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::{
    models::comment::Comment,
    store::{CommentStore, StoreResult},
};

/// Ids of `target` and all of its transitive replies found in `snapshot`.
///
/// The target comes first, followed by replies level by level. Each id
/// appears once even if the rows contain cross-links or cycles.
pub fn collect_subtree(target: i64, snapshot: &[Comment]) -> Vec<i64> {
    let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
    for comment in snapshot {
        if let Some(parent_id) = comment.parent_id {
            children.entry(parent_id).or_default().push(comment.id);
        }
    }

    let mut collected = vec![target];
    let mut seen = HashSet::from([target]);
    let mut frontier = VecDeque::from([target]);

    while let Some(id) = frontier.pop_front() {
        let Some(replies) = children.get(&id) else {
            continue;
        };
        for &reply in replies {
            if seen.insert(reply) {
                collected.push(reply);
                frontier.push_back(reply);
            }
        }
    }

    collected
}

/// Deletes `target` and its whole reply subtree in one store operation.
///
/// The subtree is computed from a snapshot of the article's comments; the
/// store then removes the full id set atomically, so a failure leaves every
/// row in place.
///
/// The returned ids are the whole computed subtree. Rows that a concurrent
/// delete already removed are still listed, since they are gone either way.
pub async fn delete_thread<S>(store: &S, target: &Comment) -> StoreResult<Vec<i64>>
where
    S: CommentStore + ?Sized,
{
    let snapshot = store.list_comments(target.article_id).await?;
    let ids = collect_subtree(target.id, &snapshot);

    let removed = store.delete_comments(&ids).await?;
    if removed != ids.len() as u64 {
        tracing::warn!(
            comment_id = target.id,
            expected = ids.len(),
            removed,
            "some comments were already gone"
        );
    }

    Ok(ids)
}
