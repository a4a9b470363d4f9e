//! Chart payloads shown next to admin agent replies.

pub mod export;
pub mod scale;
pub mod synth;

use serde::{Deserialize, Serialize};
use serde_json::Number;

pub use export::{export_filename, export_json, write_export, ExportError};
pub use scale::bar_heights;
pub use synth::chart_for_agent;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
    Cohort,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub title: String,
    pub data: ChartData,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartData {
    Cohort(CohortData),
    Series(SeriesData),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CohortData {
    pub cohorts: Vec<Cohort>,
    #[serde(rename = "timeLabels")]
    pub time_labels: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cohort {
    pub month: String,
    pub signups: u32,
    /// Percentage of the cohort still active, one entry per elapsed month.
    pub retention: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<Number>,
    #[serde(rename = "borderColor", default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(rename = "backgroundColor")]
    pub background_color: Colors,
}

impl Dataset {
    pub fn values(&self) -> Vec<f64> {
        self.data.iter().filter_map(Number::as_f64).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Colors {
    Single(String),
    PerBar(Vec<String>),
}

impl ChartPayload {
    pub fn cohort_data(&self) -> Option<&CohortData> {
        match &self.data {
            ChartData::Cohort(data) => Some(data),
            ChartData::Series(_) => None,
        }
    }

    pub fn series_data(&self) -> Option<&SeriesData> {
        match &self.data {
            ChartData::Series(data) => Some(data),
            ChartData::Cohort(_) => None,
        }
    }
}
