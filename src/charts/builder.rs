//! Chart builders
//!
//! Pure functions from a table and typed options to a chart spec.
//! Same input always yields the same spec; empty input yields an empty but
//! valid chart.

use super::spec::{
    Bar, BarChart, BarOptions, BubbleMap, BubbleMapOptions, ColumnStyle, HoverColumn, LineChart,
    LineOptions, LineSeries,
};
use crate::dataset::{Condition, CountrySnapshot, Dataset, Series, TotalsSummary};

/// Bubble map with one bubble per country
pub fn bubble_map(snapshots: &[CountrySnapshot], options: &BubbleMapOptions) -> BubbleMap {
    let column = |condition: Condition| {
        snapshots
            .iter()
            .map(|s| s.count(condition))
            .collect::<Vec<_>>()
    };

    BubbleMap {
        title: options.title.clone(),
        template: options.template,
        location_mode: options.location_mode,
        locations: snapshots.iter().map(|s| s.country.clone()).collect(),
        sizes: column(options.size_column),
        size_max: options.size_max,
        color_label: options.color_column.label().to_string(),
        color_values: column(options.color_column),
        color_scale: options.color_scale,
        hover: options
            .hover_fields
            .iter()
            .map(|field| HoverColumn {
                label: field.condition.label().to_string(),
                format: field.format,
                values: column(field.condition),
            })
            .collect(),
    }
}

/// Bar chart with one bar per column, in column order
pub fn bar_chart(totals: &TotalsSummary, columns: &[ColumnStyle], options: &BarOptions) -> BarChart {
    BarChart {
        title: options.title.clone(),
        template: options.template,
        x_label: options.x_label.clone(),
        y_label: options.y_label.clone(),
        hover_format: options.hover_format,
        bars: columns
            .iter()
            .map(|column| Bar {
                category: column.condition.label().to_string(),
                value: totals.get(column.condition),
                color: column.color,
            })
            .collect(),
    }
}

/// Line chart with one line per column against the series dates
pub fn line_chart(series: &Series, columns: &[ColumnStyle], options: &LineOptions) -> LineChart {
    LineChart {
        title: options.title.clone(),
        template: options.template,
        x_label: options.x_label.clone(),
        y_label: options.y_label.clone(),
        range_slider: options.range_slider,
        dates: series.dates(),
        series: columns
            .iter()
            .map(|column| LineSeries {
                name: column.condition.label().to_string(),
                color: column.color,
                format: column.format,
                values: series.values(column.condition),
            })
            .collect(),
    }
}

/// The charts that never change after startup
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub bubble_map: BubbleMap,
    pub totals: BarChart,
}

impl Overview {
    pub fn build(dataset: &Dataset) -> Self {
        Self {
            bubble_map: bubble_map(dataset.snapshots(), &BubbleMapOptions::default()),
            totals: bar_chart(
                &dataset.snapshot_totals(),
                &ColumnStyle::standard(),
                &BarOptions::titled("Total Global Cases"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::spec::HoverFormat;
    use crate::dataset::provider::tests::sample_dataset;
    use crate::dataset::DatasetProvider;

    #[test]
    fn test_bar_chart_follows_columns() {
        let totals = TotalsSummary {
            confirmed: 100,
            deaths: 5,
            recovered: 40,
        };
        let chart = bar_chart(&totals, &ColumnStyle::standard(), &BarOptions::titled("Totals"));

        assert_eq!(chart.title, "Totals");
        assert_eq!(chart.x_label, "Condition");
        assert_eq!(chart.y_label, "Count");
        let categories: Vec<_> = chart.bars.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(categories, vec!["Confirmed", "Deaths", "Recovered"]);
        assert_eq!(chart.value_of("Deaths"), Some(5));
        assert_eq!(chart.bars[2].color, Condition::Recovered.color());
    }

    #[test]
    fn test_line_chart_columns() {
        let dataset = sample_dataset();
        let series = dataset.country_series("Italy").unwrap();
        let chart = line_chart(series, &ColumnStyle::standard(), &LineOptions::titled("Italy"));

        assert!(chart.range_slider);
        assert_eq!(chart.dates.len(), 3);
        assert_eq!(chart.series.len(), 3);
        assert_eq!(chart.series[0].values, vec![1_694, 2_036, 2_502]);
        assert_eq!(chart.series[1].color.to_string(), "#ee5253");
        assert_eq!(chart.series[2].format, HoverFormat::Thousands);
    }

    #[test]
    fn test_line_chart_of_empty_series() {
        let series = Series::new("Nowhere", Vec::new());
        let chart = line_chart(&series, &ColumnStyle::standard(), &LineOptions::titled("Empty"));

        assert!(chart.dates.is_empty());
        assert_eq!(chart.series.len(), 3);
        assert!(chart.series.iter().all(|s| s.values.is_empty()));
    }

    #[test]
    fn test_bubble_map_from_snapshots() {
        let dataset = sample_dataset();
        let map = bubble_map(dataset.snapshots(), &BubbleMapOptions::default());

        assert_eq!(map.title, "Confirmed Case by Country");
        assert_eq!(map.locations, vec!["Iceland", "Italy", "Spain"]);
        assert_eq!(map.sizes, vec![16, 2_502, 165]);
        assert_eq!(map.color_values, map.sizes);
        assert_eq!(map.size_max, 40);
        let hover: Vec<_> = map.hover.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(hover, vec!["Confirmed", "Recovered", "Deaths"]);
    }

    #[test]
    fn test_bubble_map_of_nothing() {
        let map = bubble_map(&[], &BubbleMapOptions::default());
        assert!(map.locations.is_empty());
        assert!(map.hover.iter().all(|h| h.values.is_empty()));
    }

    #[test]
    fn test_overview_uses_latest_snapshot_totals() {
        let dataset = sample_dataset();
        let overview = Overview::build(&dataset);

        assert_eq!(overview.totals.title, "Total Global Cases");
        assert_eq!(overview.totals.value_of("Confirmed"), Some(2_502 + 165 + 16));
        assert_eq!(overview.bubble_map.locations.len(), 3);
    }

    #[test]
    fn test_builders_are_deterministic() {
        let dataset = sample_dataset();
        let a = Overview::build(&dataset);
        let b = Overview::build(&dataset);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a.bubble_map).unwrap(),
            serde_json::to_string(&b.bubble_map).unwrap()
        );
    }
}
