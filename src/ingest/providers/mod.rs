// src/ingest/providers/mod.rs
pub mod feed;
pub mod listing;

pub use feed::FeedAdapter;
pub use listing::ListingAdapter;
