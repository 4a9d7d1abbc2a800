pub mod aggregation;
mod stats_feed;

pub use stats_feed::StatsFeed;
