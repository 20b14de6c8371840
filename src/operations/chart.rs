//! Pie chart of contributors grouped by one profile attribute

use crate::config::PipelineConfig;
use crate::error::ContribError;
use crate::system::System;
use anyhow::Result;
use image::{ImageFormat, RgbImage};
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::Palette;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Cursor;
use tracing::{error, info};

/// Where to look up valid attribute names
pub const USER_ATTRIBUTES_DOCS_URL: &str = "https://docs.github.com/en/rest/users/users?apiVersion=2022-11-28#update-the-authenticated-user";

/// Chart image size in pixels
pub const CHART_SIZE: (u32, u32) = (1024, 768);

/// One slice of the chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub label: String,
    pub count: usize,
    /// Share of the dataset total, 0.0 to 100.0
    pub percent: f64,
}

/// Occurrence count per distinct attribute value, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartDataset {
    entries: Vec<(String, usize)>,
}

impl ChartDataset {
    /// Count the non-empty values of `attribute` across `profiles`
    #[must_use]
    pub fn from_profiles(profiles: &[Value], attribute: &str) -> Self {
        let mut entries: Vec<(String, usize)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for label in profiles
            .iter()
            .filter_map(|profile| attribute_label(profile.get(attribute)?))
        {
            match positions.get(&label) {
                Some(&index) => entries[index].1 += 1,
                None => {
                    positions.insert(label.clone(), entries.len());
                    entries.push((label, 1));
                }
            }
        }

        Self { entries }
    }

    /// Number of profiles that carried the attribute
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(label, count)` pairs in first-seen order
    #[must_use]
    pub fn counts(&self) -> &[(String, usize)] {
        &self.entries
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss, reason = "contributor counts are small")]
    pub fn slices(&self) -> Vec<ChartSlice> {
        let total = self.total() as f64;
        self.entries
            .iter()
            .map(|(label, count)| ChartSlice {
                label: label.clone(),
                count: *count,
                percent: if total > 0.0 {
                    *count as f64 * 100.0 / total
                } else {
                    0.0
                },
            })
            .collect()
    }
}

/// Label for an attribute value, `None` when the value counts as empty
///
/// `null`, `false`, `0`, `""`, `[]` and `{}` are empty. Strings are used
/// as-is, everything else as its JSON text.
fn attribute_label(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_i64() == Some(0) => None,
        Value::Number(number) if number.is_f64() && number.as_f64().is_some_and(|value| value.abs() < f64::EPSILON) => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(fields) if fields.is_empty() => None,
        other => Some(other.to_string()),
    }
}

/// Turns a dataset into an encoded image
pub trait PieRenderer {
    /// Render `dataset` under `title`, returning PNG bytes
    fn render(&self, dataset: &ChartDataset, title: &str) -> Result<Vec<u8>>;
}

/// Draws the chart with `plotters` and encodes it as PNG
#[derive(Debug, Clone, Copy)]
pub struct PlottersRenderer {
    pub size: (u32, u32),
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self { size: CHART_SIZE }
    }
}

impl PieRenderer for PlottersRenderer {
    fn render(&self, dataset: &ChartDataset, title: &str) -> Result<Vec<u8>> {
        let (width, height) = self.size;
        let mut buffer = vec![0_u8; width as usize * height as usize * 3];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, self.size).into_drawing_area();
            root.fill(&WHITE).map_err(render_error)?;
            let area = root
                .titled(title, ("sans-serif", 28).into_font().color(&BLACK))
                .map_err(render_error)?;

            let (area_width, area_height) = area.dim_in_pixel();
            let center = (
                i32::try_from(area_width / 2)?,
                i32::try_from(area_height / 2)?,
            );
            let radius = f64::from(area_width.min(area_height)) * 0.35;

            let slices = dataset.slices();
            let sizes: Vec<f64> = slices.iter().map(|slice| slice.percent).collect();
            let labels: Vec<&str> = slices.iter().map(|slice| slice.label.as_str()).collect();
            let colors: Vec<RGBColor> = (0..slices.len()).map(slice_color).collect();

            let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
            // 12 o'clock, matching the usual pie layout
            pie.start_angle(-90.0);
            pie.label_style(("sans-serif", 16).into_font().color(&BLACK));
            pie.percentages(("sans-serif", 14).into_font().color(&WHITE));

            area.draw(&pie).map_err(render_error)?;
            root.present().map_err(render_error)?;
        }

        let image = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| ContribError::render("Chart buffer does not match the image size"))?;
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| ContribError::render(format!("Failed to encode chart as PNG: {e}")))?;

        Ok(png)
    }
}

fn slice_color(index: usize) -> RGBColor {
    let colors = <Palette99 as Palette>::COLORS;
    let (red, green, blue) = colors[index % colors.len()];
    RGBColor(red, green, blue)
}

fn render_error<E: std::fmt::Display>(err: E) -> ContribError {
    ContribError::render(format!("Failed to draw chart: {err}"))
}

/// Outcome of a successful chart run
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSummary {
    pub dataset: ChartDataset,
    pub image_bytes: usize,
}

/// Build the dataset from the user-data file and write the chart image
///
/// # Errors
///
/// Returns an error if:
/// - The user-data file is missing or is not a JSON array
/// - No profile carries a non-empty value for the configured attribute
/// - The chart cannot be rendered or written
pub fn draw_pie_chart(
    system: &dyn System,
    renderer: &dyn PieRenderer,
    config: &PipelineConfig,
) -> Result<ChartSummary> {
    info!("Begin drawing pie chart");
    let files = config.output_files();
    let attribute = config.chart_attribute.as_str();

    if !system.exists(&files.users) {
        return Err(ContribError::data(format!(
            "File [{}] not found. Please check the file path.",
            files.users.display()
        ))
        .into());
    }
    let content = system.read_to_string(&files.users).map_err(|e| {
        ContribError::data(format!("Unable to read [{}]: {e}", files.users.display()))
    })?;
    let profiles: Vec<Value> = serde_json::from_str(&content).map_err(|e| {
        ContribError::data(format!(
            "Parsing error in the JSON file [{}]: {e}. Check for formatting issues.",
            files.users.display()
        ))
    })?;

    let dataset = ChartDataset::from_profiles(&profiles, attribute);
    info!("Size: {} and '{}'s found", dataset.total(), attribute);

    if dataset.is_empty() {
        error!(
            "'{attribute}' count is '0' and cannot draw a pie chart. Please retry with a different parameter from {USER_ATTRIBUTES_DOCS_URL} by setting 'USER_CHART_BASED_ON' env property."
        );
        return Err(ContribError::no_chart_data(format!(
            "no user profile has a non-empty '{attribute}'"
        ))
        .into());
    }

    for slice in dataset.slices() {
        info!(
            "'{}' {}: {} ({:.1}%)",
            attribute, slice.label, slice.count, slice.percent
        );
    }

    let png = renderer.render(&dataset, &config.chart_title())?;
    system.write(&files.chart, &png).map_err(|e| {
        ContribError::filesystem(format!(
            "Unable to write chart to [{}]: {e}",
            files.chart.display()
        ))
    })?;
    info!("Pie chart saved to [{}]", files.chart.display());
    info!("End drawing pie chart");

    Ok(ChartSummary {
        image_bytes: png.len(),
        dataset,
    })
}
