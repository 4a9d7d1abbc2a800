mod chart_dto;

pub use chart_dto::{dashboard_charts, Chart, ChartColor, ChartData, ChartDataset, ChartKind};
