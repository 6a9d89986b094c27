//! Layout Root
//!
//! Static composition of the dashboard page. Built once at startup from the
//! loaded dataset and the initial (global) selection charts.

use super::node::{Element, Graph, Node};
use super::table::render_data_table;
use crate::charts::{Overview, PlotlyFigure};
use crate::dataset::{Dataset, DatasetProvider, GLOBAL_LABEL};
use crate::selection::ChartPair;

pub const PAGE_TITLE: &str = "COVID-19 Dashboard";

pub const BUBBLE_MAP_ID: &str = "bubble-map";
pub const GLOBAL_TOTALS_ID: &str = "global-totals";
pub const TIME_SERIES_ID: &str = "country-time-series";
pub const SELECTION_TOTALS_ID: &str = "country-totals";
pub const DROPDOWN_ID: &str = "country-dropdown";
pub const ERROR_ID: &str = "selection-error";

/// Country dropdown with the implicit global option first
pub fn country_dropdown(countries: &[String]) -> Node {
    let global = Element::new("option")
        .attr("value", "")
        .attr("selected", "selected")
        .child(GLOBAL_LABEL);

    Element::new("select")
        .id(DROPDOWN_ID)
        .attr("name", "country")
        .child(global)
        .children(
            countries
                .iter()
                .map(|c| Element::new("option").attr("value", c.as_str()).child(c.as_str())),
        )
        .into()
}

/// Assemble the full page tree
pub fn build_page(dataset: &Dataset, overview: &Overview, initial: &ChartPair) -> Node {
    let header = Element::new("header")
        .class("main-title")
        .child(Element::new("h1").child(PAGE_TITLE));

    let map_and_table = Element::new("div")
        .class("container-1")
        .child(Element::new("div").child(Graph::new(
            BUBBLE_MAP_ID,
            overview.bubble_map.to_figure(),
        )))
        .child(
            Element::new("div")
                .class("table-wrapper")
                .child(render_data_table(&dataset.country_table())),
        );

    let global_totals = Element::new("div")
        .class("container-2")
        .child(Element::new("div").child(Graph::new(GLOBAL_TOTALS_ID, overview.totals.to_figure())));

    let controls = Element::new("div")
        .class("selection-controls")
        .child(
            Element::new("label")
                .attr("for", DROPDOWN_ID)
                .child("Select a country"),
        )
        .child(country_dropdown(dataset.list_countries()))
        .child(Element::new("span").id(ERROR_ID).class("selection-error"));

    let selection = Element::new("div")
        .class("container-3")
        .child(controls)
        .child(Element::new("div").child(Graph::new(
            TIME_SERIES_ID,
            initial.time_series.to_figure(),
        )))
        .child(Element::new("div").child(Graph::new(
            SELECTION_TOTALS_ID,
            initial.totals.to_figure(),
        )));

    Element::new("div")
        .style("min-height", "100vh")
        .style("background-color", "rgb(38, 50, 56)")
        .style("color", "white")
        .style("font-family", "Open Sans, sans-serif")
        .child(header)
        .child(map_and_table)
        .child(global_totals)
        .child(selection)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::provider::tests::sample_dataset;
    use crate::layout::render_document;
    use crate::selection::{Selection, SelectionHandler};
    use std::sync::Arc;

    fn page() -> Node {
        let dataset = Arc::new(sample_dataset());
        let overview = Overview::build(&dataset);
        let initial = SelectionHandler::new(Arc::clone(&dataset))
            .handle_selection(&Selection::Global)
            .unwrap();
        build_page(&dataset, &overview, &initial)
    }

    #[test]
    fn test_page_contains_all_regions() {
        let page = page();
        for id in [
            BUBBLE_MAP_ID,
            GLOBAL_TOTALS_ID,
            TIME_SERIES_ID,
            SELECTION_TOTALS_ID,
            DROPDOWN_ID,
            ERROR_ID,
        ] {
            assert!(page.find_by_id(id).is_some(), "missing {}", id);
        }
        assert!(page.text_content().contains("COVID-19 Dashboard"));
    }

    #[test]
    fn test_dropdown_lists_global_then_countries() {
        let page = page();
        let dropdown = page.find_by_id(DROPDOWN_ID).unwrap();
        let labels: Vec<String> = dropdown.children().iter().map(Node::text_content).collect();
        assert_eq!(labels, vec!["Global", "Iceland", "Italy", "Spain"]);

        let first = dropdown.children()[0].as_element().unwrap();
        assert_eq!(first.attr_value("value"), Some(""));
    }

    #[test]
    fn test_initial_charts_are_global() {
        let page = page();
        match page.find_by_id(TIME_SERIES_ID) {
            Some(Node::Graph(graph)) => {
                assert_eq!(graph.figure["layout"]["title"]["text"], "Global Cases Graph");
            }
            other => panic!("unexpected node: {:?}", other),
        }
        match page.find_by_id(SELECTION_TOTALS_ID) {
            Some(Node::Graph(graph)) => {
                assert_eq!(graph.figure["layout"]["title"]["text"], "Total Global Cases");
            }
            other => panic!("unexpected node: {:?}", other),
        }
    }

    #[test]
    fn test_page_renders_country_table() {
        let html = render_document(PAGE_TITLE, &page());
        assert!(html.contains("<th>Country Region</th>"));
        assert!(html.contains("<td>Italy</td><td>2502</td>"));
        assert!(html.contains("<option value=\"Spain\">Spain</option>"));
    }
}
