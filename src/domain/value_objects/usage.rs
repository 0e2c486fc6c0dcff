use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One metered invocation of a model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageSample {
    pub processing_time_ms: f64,
    pub token_count: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageStats {
    pub total_usage: u64,
    /// Keyed by UTC date, `YYYY-MM-DD`.
    pub usage_by_day: BTreeMap<String, u64>,
    pub usage_by_user: BTreeMap<Uuid, u64>,
    pub average_processing_time: f64,
    pub average_token_count: f64,
    pub average_cost: f64,
    pub last_used: Option<DateTime<Utc>>,
}

impl UsageStats {
    pub fn record(&mut self, user_id: Uuid, sample: UsageSample, now: DateTime<Utc>) {
        self.total_usage += 1;
        let n = self.total_usage as f64;

        *self
            .usage_by_day
            .entry(now.format("%Y-%m-%d").to_string())
            .or_insert(0) += 1;
        *self.usage_by_user.entry(user_id).or_insert(0) += 1;

        self.average_processing_time =
            running_mean(self.average_processing_time, n, sample.processing_time_ms);
        self.average_token_count = running_mean(self.average_token_count, n, sample.token_count);
        self.average_cost = running_mean(self.average_cost, n, sample.cost);
        self.last_used = Some(now);
    }
}

/// `n` is the sample count including `sample`.
fn running_mean(previous: f64, n: f64, sample: f64) -> f64 {
    (previous * (n - 1.0) + sample) / n
}
