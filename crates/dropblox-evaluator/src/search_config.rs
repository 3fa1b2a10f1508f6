use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board_evaluator::HeuristicWeights;

/// Tuning of the beam search.
///
/// Every field has a default, so a partial JSON document such as `{"depth": 3}` is a
/// valid configuration. `time_budget` is given in (fractional) seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of plies; each ply drops one piece.
    pub depth: usize,
    /// Number of candidates kept after each ply.
    pub beam_width: usize,
    pub weights: HeuristicWeights,
    /// Stop after the first ply that ends past this budget.
    #[serde(with = "duration_secs")]
    pub time_budget: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 5,
            beam_width: 50,
            weights: HeuristicWeights::default(),
            time_budget: None,
        }
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub(super) fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(duration) => serializer.serialize_some(&duration.as_secs_f64()),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<f64>::deserialize(deserializer)?
            .map(|secs| Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom))
            .transpose()
    }
}
