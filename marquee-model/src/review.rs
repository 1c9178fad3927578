use chrono::{DateTime, Utc};

use crate::ids::{MovieId, ReviewId};

/// A stored review. `parent == None` marks a root review; any other value
/// points at an earlier review of the same movie.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Review {
    pub id: ReviewId,
    pub name: String,
    pub email: String,
    pub text: String,
    pub movie: MovieId,
    pub parent: Option<ReviewId>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Rendered review thread: `{name, text, children}`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReviewNode {
    pub name: String,
    pub text: String,
    pub children: Vec<ReviewNode>,
}

impl ReviewNode {
    pub fn leaf(review: &Review) -> Self {
        Self {
            name: review.name.clone(),
            text: review.text.clone(),
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(ReviewNode::len).sum::<usize>()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
