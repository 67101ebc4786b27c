//! Statistical summaries for named player metrics.

use serde::{Deserialize, Serialize};

/// Summary of one metric across a population (or a single player's matches).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub avg: f64,
    pub std: f64,
    pub percentile1: f64,
    pub percentile5: f64,
    pub percentile10: f64,
    pub percentile25: f64,
    pub percentile50: f64,
    pub percentile75: f64,
    pub percentile90: f64,
    pub percentile95: f64,
    pub percentile99: f64,
}

impl MetricSample {
    /// The nine `(percentile, value)` points, percentile ascending.
    pub fn points(&self) -> [(f64, f64); 9] {
        [
            (1.0, self.percentile1),
            (5.0, self.percentile5),
            (10.0, self.percentile10),
            (25.0, self.percentile25),
            (50.0, self.percentile50),
            (75.0, self.percentile75),
            (90.0, self.percentile90),
            (95.0, self.percentile95),
            (99.0, self.percentile99),
        ]
    }
}

/// A player's standing on one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPercentile {
    pub metric: String,
    pub value: f64,
    pub lower_is_better: bool,

    /// Interpolated percentile; may fall outside 0..100 when extrapolated
    pub percentile: f64,
}
