//! Post module - threaded posts, likes and feeds.
//!
//! Like counts, reply counts and the viewer's like flag are derived when a
//! post is read, never stored as independent counters.

mod feed;
mod post;

pub use feed::FeedType;
pub use post::{NewPost, Post};
