// SPDX-License-Identifier: MIT
// Copyright 2026 The pulse-games Authors

//! Reduce a Google Fitness aggregate to average vitals.

use crate::models::vitals::{AggregateResponse, DataPoint, DataSourceKind, VitalsSummary};

/// Running sums for one aggregate response.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct VitalsAccumulator {
    pub heart_rate_sum: f64,
    pub heart_rate_count: u32,
    pub systolic_sum: f64,
    pub diastolic_sum: f64,
    /// One per blood-pressure point, not per value component.
    pub bp_count: u32,
    /// Points dropped because a required value component was missing.
    pub skipped_points: u32,
}

impl VitalsAccumulator {
    /// Fold one point of a dataset of the given kind.
    pub fn add_point(&mut self, kind: DataSourceKind, point: &DataPoint) {
        match kind {
            DataSourceKind::HeartRate => match point.component(0) {
                Some(bpm) => {
                    self.heart_rate_sum += bpm;
                    self.heart_rate_count += 1;
                }
                None => self.skipped_points += 1,
            },
            DataSourceKind::BloodPressure => match (point.component(0), point.component(1)) {
                (Some(systolic), Some(diastolic)) => {
                    self.systolic_sum += systolic;
                    self.diastolic_sum += diastolic;
                    self.bp_count += 1;
                }
                _ => self.skipped_points += 1,
            },
            DataSourceKind::Other => {}
        }
    }

    pub fn summary(&self) -> VitalsSummary {
        VitalsSummary {
            heart_rate: average(self.heart_rate_sum, self.heart_rate_count),
            systolic: average(self.systolic_sum, self.bp_count),
            diastolic: average(self.diastolic_sum, self.bp_count),
        }
    }
}

fn average(sum: f64, count: u32) -> Option<f64> {
    (count > 0).then(|| sum / f64::from(count))
}

/// Walk every bucket, dataset and point of `response` and accumulate vitals.
pub fn accumulate(response: &AggregateResponse) -> VitalsAccumulator {
    let mut acc = VitalsAccumulator::default();

    for bucket in &response.bucket {
        for dataset in &bucket.dataset {
            for point in &dataset.point {
                acc.add_point(dataset.kind, point);
            }
        }
    }

    acc
}

/// Reduce `response` to averages.
pub fn summarize(response: &AggregateResponse) -> VitalsSummary {
    let acc = accumulate(response);

    if acc.skipped_points > 0 {
        tracing::warn!(
            skipped = acc.skipped_points,
            "Skipped fitness points with missing values"
        );
    }

    tracing::debug!(
        heart_rate_points = acc.heart_rate_count,
        blood_pressure_points = acc.bp_count,
        "Vitals aggregated"
    );

    acc.summary()
}
