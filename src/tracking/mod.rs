//! The `tracking` module decides what the tracker listens to: it parses the
//! configured vessel identifiers and derives the broker topics for them.

pub mod topic;
pub mod vessel;

pub use topic::{QualityLevel, SubscriptionMode, TopicSet, derive_topics, subscription_topics};
pub use vessel::{Mmsi, parse_identifiers};
