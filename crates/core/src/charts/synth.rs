use serde_json::Number;

use super::{ChartData, ChartPayload, ChartType, Cohort, CohortData, Colors, Dataset, SeriesData};
use crate::domain::agent::AgentId;

const COHORT_MONTHS: [(&str, u32, &[u32]); 10] = [
    ("Jan 2025", 24, &[100, 83, 75, 71, 63, 58, 54, 51, 48, 45, 42, 39, 36]),
    ("Feb 2025", 27, &[100, 81, 74, 70, 61, 56, 52, 49, 46, 43, 40, 37]),
    ("Mar 2025", 33, &[100, 85, 79, 73, 67, 62, 58, 55, 52, 49, 46]),
    ("Apr 2025", 30, &[100, 87, 80, 76, 69, 64, 60, 57, 54, 51]),
    ("May 2025", 34, &[100, 85, 79, 74, 68, 63, 59, 56, 53]),
    ("Jun 2025", 28, &[100, 82, 75, 71, 67, 62, 58, 55]),
    ("Jul 2025", 34, &[100, 84, 79, 74, 69, 64, 60]),
    ("Aug 2025", 26, &[100, 85, 77, 72, 67, 62]),
    ("Sep 2025", 31, &[100, 81, 76, 71, 66]),
    ("Oct 2025", 29, &[100, 83, 78, 73]),
];

const RETENTION_MONTHS: usize = 13;

/// Chart shown with a reply from `agent`. Pure: the same inputs always give the same payload.
///
/// Only the customer experience chart looks at the query: asking about cohorts or Q3 widens
/// the retention table to every 2025 cohort. The legacy admin dashboard never reached this
/// variant and always drew the six-cohort table, so "Show cohort chart" differs from it.
pub fn chart_for_agent(agent: &AgentId, query: &str) -> ChartPayload {
    match agent {
        AgentId::CustomerExperience => {
            let lowered = query.to_lowercase();
            if lowered.contains("cohort") || lowered.contains("q3") {
                cohort_chart("Q3 2025 Subscription Cohort Analysis", COHORT_MONTHS.len())
            } else {
                cohort_chart("Customer Retention Analysis", 6)
            }
        }
        AgentId::FinancialReports => line_chart(
            "Revenue Growth Analysis",
            &["Jan", "Feb", "Mar", "Apr", "May", "Jun"],
            "Revenue ($)",
            integers(&[180_000, 190_000, 210_000, 230_000, 250_000, 280_000]),
            "rgb(16, 185, 129)",
            "rgba(16, 185, 129, 0.1)",
        ),
        AgentId::ProductAnalytics => bar_chart(
            "Product Performance Metrics",
            &["Whey Protein", "Creatine", "Pre-Workout", "BCAA", "Fat Burner"],
            "Sales Volume",
            &[1200, 800, 600, 400, 350],
            &["#10b981", "#3b82f6", "#f59e0b", "#ef4444", "#8b5cf6"],
        ),
        AgentId::SalesOptimizer => bar_chart(
            "Sales Optimization Insights",
            &["Q1 Sales", "Q2 Sales", "Q3 Forecast", "Q4 Target"],
            "Revenue ($)",
            &[450_000, 520_000, 580_000, 650_000],
            &["#10b981", "#22c55e", "#84cc16", "#eab308"],
        ),
        AgentId::ReviewSynthesis => bar_chart(
            "Customer Sentiment Analysis",
            &["5 Stars", "4 Stars", "3 Stars", "2 Stars", "1 Star"],
            "Review Count",
            &[3200, 1800, 400, 150, 50],
            &["#10b981", "#22c55e", "#fbbf24", "#f59e0b", "#ef4444"],
        ),
        AgentId::LandingPageGenerator => line_chart(
            "Landing Page Performance",
            &["Week 1", "Week 2", "Week 3", "Week 4"],
            "Conversion Rate (%)",
            decimals(&[2.1, 2.8, 3.2, 3.9]),
            "rgb(168, 85, 247)",
            "rgba(168, 85, 247, 0.1)",
        ),
        _ => bar_chart(
            "Business Intelligence Overview",
            &["Customers", "Revenue", "Products", "Growth"],
            "Performance Metrics",
            &[28_547, 2_400_000, 8, 34],
            &["#3b82f6", "#10b981", "#f59e0b", "#8b5cf6"],
        ),
    }
}

fn cohort_chart(title: &str, months: usize) -> ChartPayload {
    let cohorts = COHORT_MONTHS
        .iter()
        .take(months)
        .map(|(month, signups, retention)| Cohort {
            month: month.to_string(),
            signups: *signups,
            retention: retention.to_vec(),
        })
        .collect();
    let time_labels = (0..RETENTION_MONTHS).map(|month| month.to_string()).collect();

    ChartPayload {
        chart_type: ChartType::Cohort,
        title: title.to_string(),
        data: ChartData::Cohort(CohortData { cohorts, time_labels }),
    }
}

fn line_chart(
    title: &str,
    labels: &[&str],
    label: &str,
    data: Vec<Number>,
    border: &str,
    fill: &str,
) -> ChartPayload {
    series_chart(
        ChartType::Line,
        title,
        labels,
        Dataset {
            label: label.to_string(),
            data,
            border_color: Some(border.to_string()),
            background_color: Colors::Single(fill.to_string()),
        },
    )
}

fn bar_chart(
    title: &str,
    labels: &[&str],
    label: &str,
    values: &[u64],
    colors: &[&str],
) -> ChartPayload {
    series_chart(
        ChartType::Bar,
        title,
        labels,
        Dataset {
            label: label.to_string(),
            data: integers(values),
            border_color: None,
            background_color: Colors::PerBar(strings(colors)),
        },
    )
}

fn series_chart(
    chart_type: ChartType,
    title: &str,
    labels: &[&str],
    dataset: Dataset,
) -> ChartPayload {
    ChartPayload {
        chart_type,
        title: title.to_string(),
        data: ChartData::Series(SeriesData { labels: strings(labels), datasets: vec![dataset] }),
    }
}

fn integers(values: &[u64]) -> Vec<Number> {
    values.iter().map(|value| Number::from(*value)).collect()
}

fn decimals(values: &[f64]) -> Vec<Number> {
    values.iter().filter_map(|value| Number::from_f64(*value)).collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
