//! Chart specification types
//!
//! Renderer-agnostic descriptions of the dashboard's charts: data bindings,
//! axis labels, colors and titles. Every option that the page used to pass
//! as a loose mapping is a named, typed field here.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::dataset::Condition;

/// An opaque RGB color, written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How numbers appear in hover labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverFormat {
    /// Thousands separators (`1,234,567`)
    #[default]
    Thousands,
    /// Plain digits
    Raw,
}

impl HoverFormat {
    /// d3-format specifier
    pub fn d3(&self) -> &'static str {
        match self {
            HoverFormat::Thousands => ",",
            HoverFormat::Raw => "",
        }
    }

    /// Hover-template placeholder for `field`, e.g. `%{y:,}`
    pub fn placeholder(&self, field: &str) -> String {
        match self {
            HoverFormat::Thousands => format!("%{{{}:,}}", field),
            HoverFormat::Raw => format!("%{{{}}}", field),
        }
    }
}

/// Visual theme of a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    #[default]
    PlotlyDark,
}

/// Continuous color scales available to the bubble map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScale {
    #[default]
    Oryel,
}

impl ColorScale {
    /// Evenly spaced color stops, low to high
    pub fn colors(&self) -> &'static [&'static str] {
        match self {
            ColorScale::Oryel => &[
                "rgb(236, 218, 154)",
                "rgb(239, 196, 126)",
                "rgb(243, 173, 106)",
                "rgb(247, 148, 93)",
                "rgb(249, 123, 87)",
                "rgb(246, 99, 86)",
                "rgb(238, 77, 90)",
            ],
        }
    }
}

/// How bubble map locations are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationMode {
    #[default]
    CountryNames,
}

impl LocationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationMode::CountryNames => "country names",
        }
    }
}

/// Binding of one case column to its color and hover format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnStyle {
    pub condition: Condition,
    pub color: Rgb,
    pub format: HoverFormat,
}

impl ColumnStyle {
    pub fn new(condition: Condition) -> Self {
        Self {
            condition,
            color: condition.color(),
            format: HoverFormat::Thousands,
        }
    }

    /// Confirmed, deaths and recovered in their fixed colors
    pub fn standard() -> [ColumnStyle; 3] {
        Condition::ALL.map(ColumnStyle::new)
    }
}

/// A hover-only column of the bubble map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HoverField {
    pub condition: Condition,
    pub format: HoverFormat,
}

/// Options for [`super::bubble_map`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleMapOptions {
    pub title: String,
    pub template: Template,
    pub size_column: Condition,
    pub color_column: Condition,
    /// Largest bubble diameter in pixels
    pub size_max: u32,
    pub color_scale: ColorScale,
    pub location_mode: LocationMode,
    pub hover_fields: Vec<HoverField>,
}

impl Default for BubbleMapOptions {
    fn default() -> Self {
        let hover = |condition: Condition| HoverField {
            condition,
            format: HoverFormat::Thousands,
        };
        Self {
            title: "Confirmed Case by Country".to_string(),
            template: Template::PlotlyDark,
            size_column: Condition::Confirmed,
            color_column: Condition::Confirmed,
            size_max: 40,
            color_scale: ColorScale::Oryel,
            location_mode: LocationMode::CountryNames,
            hover_fields: vec![
                hover(Condition::Confirmed),
                hover(Condition::Recovered),
                hover(Condition::Deaths),
            ],
        }
    }
}

/// Options for [`super::bar_chart`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarOptions {
    pub title: String,
    pub template: Template,
    pub x_label: String,
    pub y_label: String,
    pub hover_format: HoverFormat,
}

impl BarOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            template: Template::PlotlyDark,
            x_label: "Condition".to_string(),
            y_label: "Count".to_string(),
            hover_format: HoverFormat::Thousands,
        }
    }
}

/// Options for [`super::line_chart`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineOptions {
    pub title: String,
    pub template: Template,
    pub x_label: String,
    pub y_label: String,
    pub range_slider: bool,
}

impl LineOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            template: Template::PlotlyDark,
            x_label: "Date".to_string(),
            y_label: "Cases".to_string(),
            range_slider: true,
        }
    }
}

/// One hover column of the bubble map, in location order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoverColumn {
    pub label: String,
    pub format: HoverFormat,
    pub values: Vec<u64>,
}

/// Geographic bubble map, bubble area and color by value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleMap {
    pub title: String,
    pub template: Template,
    pub location_mode: LocationMode,
    pub locations: Vec<String>,
    pub sizes: Vec<u64>,
    pub size_max: u32,
    pub color_label: String,
    pub color_values: Vec<u64>,
    pub color_scale: ColorScale,
    pub hover: Vec<HoverColumn>,
}

/// A single bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bar {
    pub category: String,
    pub value: u64,
    pub color: Rgb,
}

/// Categorical bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub template: Template,
    pub x_label: String,
    pub y_label: String,
    pub hover_format: HoverFormat,
    pub bars: Vec<Bar>,
}

impl BarChart {
    /// Value of the bar labelled `category`
    pub fn value_of(&self, category: &str) -> Option<u64> {
        self.bars
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.value)
    }
}

/// One line of a multi-series chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineSeries {
    pub name: String,
    pub color: Rgb,
    pub format: HoverFormat,
    pub values: Vec<u64>,
}

/// Multi-series line chart over dates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: String,
    pub template: Template,
    pub x_label: String,
    pub y_label: String,
    pub range_slider: bool,
    pub dates: Vec<NaiveDate>,
    pub series: Vec<LineSeries>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_serializes_as_hex_string() {
        let json = serde_json::to_string(&Rgb::new(0x1d, 0xd1, 0xa1)).unwrap();
        assert_eq!(json, "\"#1dd1a1\"");
    }

    #[test]
    fn test_hover_placeholders() {
        assert_eq!(HoverFormat::Thousands.placeholder("y"), "%{y:,}");
        assert_eq!(HoverFormat::Raw.placeholder("y"), "%{y}");
    }

    #[test]
    fn test_standard_columns_use_fixed_colors() {
        let columns = ColumnStyle::standard();
        assert_eq!(columns[0].color.to_string(), "#54a0ff");
        assert_eq!(columns[1].color.to_string(), "#ee5253");
        assert_eq!(columns[2].color.to_string(), "#1dd1a1");
    }
}
