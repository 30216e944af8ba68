// SPDX-License-Identifier: MIT
// Copyright 2026 The pulse-games Authors

//! Google Fitness aggregate response types and the vitals summary.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Data type requested for heart-rate samples.
pub const HEART_RATE_DATA_TYPE: &str = "com.google.heart_rate.bpm";
/// Data type requested for blood-pressure samples.
pub const BLOOD_PRESSURE_DATA_TYPE: &str = "com.google.blood_pressure";

/// Kind of biometric carried by a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DataSourceKind {
    HeartRate,
    BloodPressure,
    #[default]
    Other,
}

impl DataSourceKind {
    /// Classify a data source ID such as
    /// `derived:com.google.heart_rate.summary:com.google.android.gms:aggregated`.
    ///
    /// Only the data-type segment is inspected, and it must be exactly one of
    /// the known data types or a `.`-suffixed variant of one.
    pub fn from_data_source_id(id: &str) -> Self {
        id.split(':')
            .find_map(Self::from_data_type)
            .unwrap_or(DataSourceKind::Other)
    }

    fn from_data_type(segment: &str) -> Option<Self> {
        const HEART_RATE: &str = "com.google.heart_rate";
        const BLOOD_PRESSURE: &str = "com.google.blood_pressure";

        let matches = |family: &str| {
            segment == family
                || segment
                    .strip_prefix(family)
                    .is_some_and(|rest| rest.starts_with('.'))
        };

        if matches(HEART_RATE) {
            Some(DataSourceKind::HeartRate)
        } else if matches(BLOOD_PRESSURE) {
            Some(DataSourceKind::BloodPressure)
        } else {
            None
        }
    }
}

/// Response body of `users/me/dataset:aggregate`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AggregateResponse {
    #[serde(default)]
    pub bucket: Vec<Bucket>,
}

/// One time bucket of the aggregate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    #[serde(default)]
    pub start_time_millis: Option<String>,
    #[serde(default)]
    pub end_time_millis: Option<String>,
    #[serde(default)]
    pub dataset: Vec<Dataset>,
}

/// Samples from one data source inside a bucket.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Classified from `dataSourceId` while parsing.
    #[serde(rename = "dataSourceId", default, deserialize_with = "deserialize_kind")]
    pub kind: DataSourceKind,
    #[serde(default)]
    pub point: Vec<DataPoint>,
}

fn deserialize_kind<'de, D>(deserializer: D) -> Result<DataSourceKind, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<String>::deserialize(deserializer)?;
    Ok(id
        .as_deref()
        .map_or(DataSourceKind::Other, DataSourceKind::from_data_source_id))
}

/// A single sample.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    #[serde(default)]
    pub data_type_name: Option<String>,
    #[serde(default)]
    pub value: Vec<PointValue>,
}

impl DataPoint {
    /// Numeric value of the `index`-th component, if present.
    pub fn component(&self, index: usize) -> Option<f64> {
        self.value.get(index).and_then(PointValue::as_f64)
    }
}

/// One value component of a sample.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointValue {
    #[serde(default)]
    pub fp_val: Option<f64>,
    #[serde(default)]
    pub int_val: Option<i64>,
}

impl PointValue {
    pub fn as_f64(&self) -> Option<f64> {
        self.fp_val.or(self.int_val.map(|v| v as f64))
    }
}

/// Averages reduced from one aggregate response.
///
/// Each field is `None` when no usable samples of that kind were returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct VitalsSummary {
    pub heart_rate: Option<f64>,
    pub systolic: Option<f64>,
    pub diastolic: Option<f64>,
}

/// Format an average for the client redirect: two decimals, or `null`.
pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "null".to_string(),
    }
}

/// Time range covered by an aggregate request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitnessWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl FitnessWindow {
    /// The `length` ending at `end`.
    pub fn trailing(end: DateTime<Utc>, length: Duration) -> Self {
        Self {
            start: end
                .checked_sub_signed(length)
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            end,
        }
    }

    pub fn start_millis(&self) -> i64 {
        self.start.timestamp_millis()
    }

    pub fn end_millis(&self) -> i64 {
        self.end.timestamp_millis()
    }

    pub fn duration_millis(&self) -> i64 {
        (self.end - self.start).num_milliseconds()
    }
}
