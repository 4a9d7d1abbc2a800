use serde::{Deserialize, Serialize};

use crate::features::stats::models::{AgeBracket, Distribution, Distributions};
use crate::shared::constants::CHART_DATASET_LABEL;

// ============================================================================
// Palettes
// ============================================================================

pub const STATUS_PALETTE: &[&str] = &["#1f77b4", "#ff7f0e"];
pub const BREED_COLOR: &str = "#2ca02c";
pub const AGE_PALETTE: &[&str] = &["#d62728", "#9467bd", "#8c564b", "#e377c2"];
pub const GENDER_PALETTE: &[&str] = &["#17becf", "#bcbd22", "#7f7f7f"];
pub const STERILIZED_PALETTE: &[&str] = &["#ff9896", "#98df8a", "#c5b0d5"];

// ============================================================================
// Chart DTOs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    /// Bars laid out along the y axis
    HorizontalBar,
}

/// One color for every bar, or one color per slice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartColor {
    Single(String),
    Palette(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<usize>,
    pub background_color: ChartColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

impl ChartData {
    pub fn from_distribution(distribution: &Distribution, color: ChartColor) -> Self {
        Self {
            labels: distribution.labels(),
            datasets: vec![ChartDataset {
                label: CHART_DATASET_LABEL.to_string(),
                data: distribution.counts(),
                background_color: color,
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    pub data: ChartData,
}

fn palette(colors: &[&str]) -> ChartColor {
    ChartColor::Palette(colors.iter().map(|c| c.to_string()).collect())
}

/// Age chart labels use the legend text instead of the bracket name
fn age_legend_distribution(distribution: &Distribution) -> Distribution {
    let mut legend = Distribution::new();
    for (name, count) in distribution.iter() {
        let label = AgeBracket::from_name(name).map_or(name, |b| b.legend());
        legend.add(label, count);
    }
    legend
}

/// The admin dashboard's five charts, in display order
pub fn dashboard_charts(distributions: &Distributions) -> Vec<Chart> {
    vec![
        Chart {
            title: "Cats by Status".to_string(),
            kind: ChartKind::Pie,
            data: ChartData::from_distribution(&distributions.status, palette(STATUS_PALETTE)),
        },
        Chart {
            title: "Cats by Breed".to_string(),
            kind: ChartKind::HorizontalBar,
            data: ChartData::from_distribution(
                &distributions.breed,
                ChartColor::Single(BREED_COLOR.to_string()),
            ),
        },
        Chart {
            title: "Cats by Age Group".to_string(),
            kind: ChartKind::Pie,
            data: ChartData::from_distribution(
                &age_legend_distribution(&distributions.age_bracket),
                palette(AGE_PALETTE),
            ),
        },
        Chart {
            title: "Gender Distribution".to_string(),
            kind: ChartKind::Pie,
            data: ChartData::from_distribution(&distributions.gender, palette(GENDER_PALETTE)),
        },
        Chart {
            title: "Sterilization Status".to_string(),
            kind: ChartKind::Pie,
            data: ChartData::from_distribution(
                &distributions.sterilized,
                palette(STERILIZED_PALETTE),
            ),
        },
    ]
}
