//! Subscription topic derivation
//!
//! Vessel locations are published under `vessels/<mmsi>/locations`. A client
//! either subscribes to one such topic per tracked vessel or to the
//! `vessels/#` wildcard which covers every vessel.

use std::collections::HashMap;

use crate::tracking::vessel::Mmsi;

pub const WILDCARD_TOPIC: &str = "vessels/#";

/// Delivery guarantee requested for a subscription.
///
/// Only the weakest tier is ever requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum QualityLevel {
    #[default]
    AtMostOnce = 0,
}

impl From<QualityLevel> for rumqttc::QoS {
    fn from(level: QualityLevel) -> Self {
        match level {
            QualityLevel::AtMostOnce => rumqttc::QoS::AtMostOnce,
        }
    }
}

/// Topic name to quality level. Iteration order carries no meaning.
pub type TopicSet = HashMap<String, QualityLevel>;

/// Which topics a tracker subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SubscriptionMode {
    /// One topic per configured vessel.
    #[default]
    PerVessel,
    /// Every vessel, through `vessels/#`.
    Wildcard,
}

impl std::str::FromStr for SubscriptionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "per-vessel" | "per_vessel" | "pervessel" => Ok(SubscriptionMode::PerVessel),
            "wildcard" | "all" => Ok(SubscriptionMode::Wildcard),
            other => Err(format!("unknown subscription mode '{other}'")),
        }
    }
}

pub fn location_topic(mmsi: Mmsi) -> String {
    format!("vessels/{mmsi}/locations")
}

/// Maps every vessel to its location topic at the lowest quality level.
/// Duplicate identifiers collapse into a single topic.
pub fn derive_topics(ids: &[Mmsi]) -> TopicSet {
    ids.iter()
        .map(|&mmsi| (location_topic(mmsi), QualityLevel::AtMostOnce))
        .collect()
}

pub fn subscription_topics(mode: SubscriptionMode, ids: &[Mmsi]) -> TopicSet {
    match mode {
        SubscriptionMode::PerVessel => derive_topics(ids),
        SubscriptionMode::Wildcard => {
            TopicSet::from([(WILDCARD_TOPIC.to_string(), QualityLevel::AtMostOnce)])
        }
    }
}
