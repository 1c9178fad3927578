//! Threaded review rendering.
//!
//! Reviews are stored flat with an optional parent edge. A movie's reviews are
//! indexed by parent id and rendered depth-first, roots first, siblings in
//! ascending id order.

use std::collections::{BTreeMap, HashMap, HashSet};

use marquee_model::{Review, ReviewId, ReviewNode};
use tracing::warn;

pub const DEFAULT_MAX_REVIEW_DEPTH: usize = 32;

/// Children index over one movie's reviews.
#[derive(Debug)]
pub struct ReviewTree<'a> {
    reviews: HashMap<ReviewId, &'a Review>,
    children: BTreeMap<Option<ReviewId>, Vec<ReviewId>>,
}

impl<'a> ReviewTree<'a> {
    pub fn new(reviews: &'a [Review]) -> Self {
        let mut sorted: Vec<&Review> = reviews.iter().collect();
        sorted.sort_by_key(|review| review.id);

        let by_id: HashMap<ReviewId, &Review> =
            sorted.iter().map(|review| (review.id, *review)).collect();

        let mut children: BTreeMap<Option<ReviewId>, Vec<ReviewId>> = BTreeMap::new();
        for review in &sorted {
            // Parents outside this movie's set were deleted; the reply becomes a root.
            let parent = review
                .parent
                .filter(|parent| *parent != review.id && by_id.contains_key(parent));
            children.entry(parent).or_default().push(review.id);
        }

        Self {
            reviews: by_id,
            children,
        }
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn roots(&self) -> &[ReviewId] {
        self.children_of(None)
    }

    fn children_of(&self, parent: Option<ReviewId>) -> &[ReviewId] {
        self.children
            .get(&parent)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Render every root thread. Nodes deeper than `max_depth` are cut off.
    pub fn render(&self, max_depth: usize) -> Vec<ReviewNode> {
        let max_depth = max_depth.max(1);
        let mut visited = HashSet::with_capacity(self.reviews.len());

        let threads: Vec<ReviewNode> = self
            .roots()
            .iter()
            .filter_map(|id| self.render_node(*id, 1, max_depth, &mut visited))
            .collect();

        let skipped = self.reviews.len() - visited.len();
        if skipped > 0 {
            warn!(
                skipped,
                total = self.reviews.len(),
                "some reviews were not reachable within the depth limit or form a parent cycle"
            );
        }
        threads
    }

    fn render_node(
        &self,
        id: ReviewId,
        depth: usize,
        max_depth: usize,
        visited: &mut HashSet<ReviewId>,
    ) -> Option<ReviewNode> {
        if !visited.insert(id) {
            warn!(review_id = %id, "review reached twice while rendering, skipping");
            return None;
        }
        let review = self.reviews.get(&id)?;

        let replies = self.children_of(Some(id));
        let children = if depth >= max_depth {
            if !replies.is_empty() {
                warn!(
                    review_id = %id,
                    max_depth,
                    dropped = replies.len(),
                    "review thread exceeds maximum depth, truncating"
                );
            }
            Vec::new()
        } else {
            replies
                .iter()
                .filter_map(|child| self.render_node(*child, depth + 1, max_depth, visited))
                .collect()
        };

        Some(ReviewNode {
            children,
            ..ReviewNode::leaf(review)
        })
    }
}

/// Render a movie's flat review list as nested threads.
pub fn render_review_threads(reviews: &[Review], max_depth: usize) -> Vec<ReviewNode> {
    ReviewTree::new(reviews).render(max_depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use marquee_model::MovieId;

    fn review(id: i64, parent: Option<i64>, name: &str) -> Review {
        Review {
            id: ReviewId(id),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            text: format!("text of {name}"),
            movie: MovieId(1),
            parent: parent.map(ReviewId),
            created_at: Utc::now(),
        }
    }

    fn names(nodes: &[ReviewNode]) -> Vec<&str> {
        nodes.iter().map(|node| node.name.as_str()).collect()
    }

    #[test]
    fn renders_nested_threads_in_id_order() {
        // Deliberately shuffled input.
        let reviews = vec![
            review(4, Some(2), "C1a"),
            review(3, Some(1), "C2"),
            review(1, None, "R"),
            review(2, Some(1), "C1"),
        ];

        let threads = render_review_threads(&reviews, DEFAULT_MAX_REVIEW_DEPTH);

        assert_eq!(names(&threads), vec!["R"]);
        let root = &threads[0];
        assert_eq!(names(&root.children), vec!["C1", "C2"]);
        assert_eq!(names(&root.children[0].children), vec!["C1a"]);
        assert!(root.children[0].children[0].is_leaf());
        assert!(root.children[1].is_leaf());
    }

    #[test]
    fn renders_expected_json_shape() {
        let reviews = vec![
            review(1, None, "R"),
            review(2, Some(1), "C1"),
            review(3, Some(1), "C2"),
            review(4, Some(2), "C1a"),
        ];
        let json = serde_json::to_value(render_review_threads(&reviews, 32)).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "name": "R", "text": "text of R",
                "children": [
                    {"name": "C1", "text": "text of C1", "children": [
                        {"name": "C1a", "text": "text of C1a", "children": []}
                    ]},
                    {"name": "C2", "text": "text of C2", "children": []}
                ]
            }])
        );
    }

    #[test]
    fn only_roots_are_top_level_and_each_review_appears_once() {
        let reviews = vec![
            review(1, None, "A"),
            review(2, None, "B"),
            review(3, Some(2), "B1"),
            review(4, Some(3), "B1a"),
        ];
        let threads = render_review_threads(&reviews, 32);
        assert_eq!(names(&threads), vec!["A", "B"]);
        let total: usize = threads.iter().map(ReviewNode::len).sum();
        assert_eq!(total, reviews.len());
    }

    #[test]
    fn orphaned_and_self_referencing_reviews_become_roots() {
        let reviews = vec![
            review(5, Some(99), "orphan"),
            review(6, Some(6), "selfie"),
        ];
        let threads = render_review_threads(&reviews, 32);
        assert_eq!(names(&threads), vec!["orphan", "selfie"]);
    }

    #[test]
    fn cycles_are_never_rendered_twice() {
        let reviews = vec![
            review(1, None, "R"),
            review(2, Some(3), "X"),
            review(3, Some(2), "Y"),
        ];
        let threads = render_review_threads(&reviews, 32);
        assert_eq!(names(&threads), vec!["R"]);
        assert!(threads[0].is_leaf());
    }

    #[test]
    fn depth_limit_truncates_deep_threads() {
        let reviews: Vec<Review> = (1..=5)
            .map(|id| review(id, (id > 1).then(|| id - 1), &format!("r{id}")))
            .collect();
        let threads = render_review_threads(&reviews, 3);
        assert_eq!(threads[0].len(), 3);
        let deepest = &threads[0].children[0].children[0];
        assert_eq!(deepest.name, "r3");
        assert!(deepest.is_leaf());
    }

    #[test]
    fn empty_input_renders_nothing() {
        let tree = ReviewTree::new(&[]);
        assert!(tree.is_empty());
        assert!(tree.render(32).is_empty());
    }
}
