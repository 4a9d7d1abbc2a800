use std::fmt::Write;

use crate::core::config::ApiConfig;
use crate::features::access::View;
use crate::features::animals::models::AnimalRecord;
use crate::features::stats::dtos::{Chart, ChartColor, ChartKind};
use crate::features::stats::models::{AgeBracket, Distribution, Distributions};

const BAR_WIDTH: usize = 30;

/// Prompt label for an add-form field
pub fn field_label(field: &str) -> &str {
    match field {
        "name" => "Name",
        "age_days" => "Age (Days)",
        "gender" => "Gender (Male/Female/Unknown)",
        "sterilized" => "Sterilized (Yes/No/Unknown)",
        "primary_breed" => "Primary Breed",
        "primary_color" => "Primary Color",
        "intake_type" => "Intake Type",
        "intake_condition" => "Intake Condition",
        "status" => "Status (Available/Adopted)",
        other => other,
    }
}

pub fn help(view: View) -> String {
    let mut out = String::from(
        "Commands:\n\
         \x20 list            show the current view\n\
         \x20 show <id>       details for one cat\n\
         \x20 adopt <id>      how to adopt a cat\n\
         \x20 user            switch to the user view\n\
         \x20 admin           switch to the admin view\n\
         \x20 refresh         reload cats from the server\n\
         \x20 quit            leave\n",
    );
    if view == View::Admin {
        out.push_str(
            "Admin commands:\n\
             \x20 add             fill in and submit a new cat\n\
             \x20 delete <id>     delete a cat\n\
             \x20 stats           grouped counts\n\
             \x20 charts          chart datasets\n",
        );
    }
    out
}

fn age_text(age_days: Option<u32>) -> String {
    match age_days {
        Some(days) => format!("{} days", days),
        None => "unknown".to_string(),
    }
}

fn chance_text(chance: Option<u8>) -> String {
    chance.map_or_else(|| "-".to_string(), |c| format!("{}%", c))
}

/// Card-style listing of adoptable cats
pub fn user_view(records: &[AnimalRecord], api: &ApiConfig) -> String {
    let mut out = String::from("Available Cats for Adoption\n");
    let adoptable: Vec<_> = records.iter().filter(|r| r.is_available()).collect();
    if adoptable.is_empty() {
        out.push_str("  (none right now)\n");
        return out;
    }
    for record in adoptable {
        out.push('\n');
        out.push_str(&record_card(record, api));
    }
    out
}

/// Full details for one record, images as URLs
pub fn record_card(record: &AnimalRecord, api: &ApiConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", record.id, record.name);
    let _ = writeln!(out, "  Breed: {}", record.primary_breed);
    let _ = writeln!(out, "  Age: {}", age_text(record.age_days));
    let _ = writeln!(out, "  Gender: {}", record.gender.as_str());
    let _ = writeln!(out, "  Sterilized: {}", record.sterilized.as_str());
    let _ = writeln!(out, "  Color: {}", record.primary_color);
    let _ = writeln!(out, "  Intake Type: {}", record.intake_type);
    let _ = writeln!(out, "  Intake Condition: {}", record.intake_condition);
    let _ = writeln!(out, "  Status: {}", record.status);
    let _ = writeln!(
        out,
        "  Adoption Chance: {}",
        chance_text(record.adoption_chance)
    );
    if record.images.is_empty() {
        let _ = writeln!(out, "  Images: (none)");
    } else {
        let _ = writeln!(out, "  Images:");
        for image in &record.images {
            let _ = writeln!(out, "    {}", api.image_url(image));
        }
    }
    out
}

/// Management table listing every record
pub fn admin_table(records: &[AnimalRecord]) -> String {
    let headers = ["ID", "Name", "Breed", "Age (Days)", "Status"];
    let rows: Vec<[String; 5]> = records
        .iter()
        .map(|r| {
            [
                r.id.to_string(),
                r.name.clone(),
                r.primary_breed.clone(),
                r.age_days.map_or_else(|| "?".to_string(), |d| d.to_string()),
                r.status.to_string(),
            ]
        })
        .collect();

    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::from("Manage Cats\n");
    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let _ = writeln!(out, "{}", line(headers.to_vec()));
    for row in &rows {
        let _ = writeln!(out, "{}", line(row.iter().map(String::as_str).collect()));
    }
    if rows.is_empty() {
        out.push_str("(no cats)\n");
    }
    out
}

fn distribution_block(out: &mut String, title: &str, distribution: &Distribution) {
    let _ = writeln!(out, "{} (total {})", title, distribution.total());
    if distribution.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return;
    }
    let width = distribution
        .iter()
        .map(|(label, _)| display_label(label).chars().count())
        .max()
        .unwrap_or(0);
    for (label, count) in distribution.iter() {
        let _ = writeln!(
            out,
            "  {:<width$}  {}",
            display_label(label),
            count,
            width = width
        );
    }
}

fn display_label(label: &str) -> &str {
    if label.is_empty() {
        "(blank)"
    } else {
        label
    }
}

/// Grouped counts for all five categories
pub fn distributions(distributions: &Distributions) -> String {
    let mut out = String::new();
    distribution_block(&mut out, "Status", &distributions.status);
    distribution_block(&mut out, "Breed", &distributions.breed);

    let mut ages = Distribution::new();
    for (name, count) in distributions.age_bracket.iter() {
        let label = AgeBracket::from_name(name).map_or(name, |b| b.legend());
        ages.add(label, count);
    }
    distribution_block(&mut out, "Age Group", &ages);

    distribution_block(&mut out, "Gender", &distributions.gender);
    distribution_block(&mut out, "Sterilized", &distributions.sterilized);
    out
}

/// Text rendering of chart datasets, one bar per label
pub fn charts(charts: &[Chart]) -> String {
    let mut out = String::new();
    for chart in charts {
        let kind = match chart.kind {
            ChartKind::Pie => "pie",
            ChartKind::HorizontalBar => "bar",
        };
        let _ = writeln!(out, "{} [{}]", chart.title, kind);

        let Some(dataset) = chart.data.datasets.first() else {
            let _ = writeln!(out, "  (no data)");
            continue;
        };
        if dataset.data.is_empty() {
            let _ = writeln!(out, "  (no data)");
            continue;
        }

        let max = dataset.data.iter().copied().max().unwrap_or(0).max(1);
        let label_width = chart
            .data
            .labels
            .iter()
            .map(|l| display_label(l).chars().count())
            .max()
            .unwrap_or(0);

        for (index, (label, count)) in chart.data.labels.iter().zip(&dataset.data).enumerate() {
            let color = match &dataset.background_color {
                ChartColor::Single(color) => Some(color.as_str()),
                ChartColor::Palette(colors) => colors.get(index).map(String::as_str),
            };
            let bar = "#".repeat(count * BAR_WIDTH / max);
            let _ = writeln!(
                out,
                "  {:<width$}  {:>4}  {:<bar_width$}  {}",
                display_label(label),
                count,
                bar,
                color.unwrap_or(""),
                width = label_width,
                bar_width = BAR_WIDTH
            );
        }
        out.push('\n');
    }
    out
}
