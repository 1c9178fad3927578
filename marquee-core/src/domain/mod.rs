pub mod reviews;

pub use reviews::{DEFAULT_MAX_REVIEW_DEPTH, ReviewTree, render_review_threads};
