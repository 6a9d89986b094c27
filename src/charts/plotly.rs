//! Plotly figure export
//!
//! Converts chart specs into Plotly.js figure JSON (`{"data": [...], "layout": {...}}`).
//! Object keys serialize in sorted order, so the same spec always produces
//! byte-identical output.

use serde_json::{json, Map, Value};

use super::spec::{BarChart, BubbleMap, LineChart, Template};

const TRANSPARENT: &str = "rgba(0,0,0,0)";

/// A chart that can be handed to Plotly.js
pub trait PlotlyFigure {
    fn to_figure(&self) -> Value;

    /// Compact JSON text of the figure
    fn to_figure_string(&self) -> String {
        self.to_figure().to_string()
    }
}

/// Layout keys shared by every chart: title, theme colors, transparent backgrounds
fn base_layout(title: &str, template: Template) -> Map<String, Value> {
    let mut layout = Map::new();
    layout.insert("title".into(), json!({ "text": title }));
    layout.insert("paper_bgcolor".into(), json!(TRANSPARENT));
    layout.insert("plot_bgcolor".into(), json!(TRANSPARENT));

    match template {
        Template::PlotlyDark => {
            layout.insert("font".into(), json!({ "color": "#f2f5fa" }));
            layout.insert(
                "hoverlabel".into(),
                json!({ "font": { "family": "Open Sans, sans-serif" } }),
            );
        }
    }
    layout
}

fn dark_axis(title: &str) -> Value {
    json!({
        "title": { "text": title },
        "gridcolor": "#283442",
        "linecolor": "#506784",
        "zerolinecolor": "#283442",
    })
}

impl PlotlyFigure for BarChart {
    fn to_figure(&self) -> Value {
        let hovertemplate = format!(
            "{}=%{{x}}<br>{}={}<extra></extra>",
            self.x_label,
            self.y_label,
            self.hover_format.placeholder("y")
        );

        let trace = json!({
            "type": "bar",
            "x": self.bars.iter().map(|b| b.category.as_str()).collect::<Vec<_>>(),
            "y": self.bars.iter().map(|b| b.value).collect::<Vec<_>>(),
            "marker": {
                "color": self.bars.iter().map(|b| b.color.to_string()).collect::<Vec<_>>(),
            },
            "hovertemplate": hovertemplate,
            "showlegend": false,
        });

        let mut layout = base_layout(&self.title, self.template);
        layout.insert("xaxis".into(), dark_axis(&self.x_label));
        let mut yaxis = dark_axis(&self.y_label);
        yaxis["tickformat"] = json!(self.hover_format.d3());
        layout.insert("yaxis".into(), yaxis);

        json!({ "data": [trace], "layout": layout })
    }
}

impl PlotlyFigure for LineChart {
    fn to_figure(&self) -> Value {
        let dates: Vec<String> = self
            .dates
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect();

        let traces: Vec<Value> = self
            .series
            .iter()
            .map(|s| {
                json!({
                    "type": "scatter",
                    "mode": "lines",
                    "name": s.name,
                    "x": dates,
                    "y": s.values,
                    "line": { "color": s.color.to_string() },
                    "hovertemplate": format!(
                        "%{{x}}<br>{}={}<extra></extra>",
                        s.name,
                        s.format.placeholder("y")
                    ),
                })
            })
            .collect();

        let mut xaxis = dark_axis(&self.x_label);
        xaxis["type"] = json!("date");
        xaxis["rangeslider"] = json!({ "visible": self.range_slider });

        let mut layout = base_layout(&self.title, self.template);
        layout.insert("xaxis".into(), xaxis);
        layout.insert("yaxis".into(), dark_axis(&self.y_label));
        layout.insert("hovermode".into(), json!("x unified"));
        layout.insert("legend".into(), json!({ "title": { "text": "Condition" } }));

        json!({ "data": traces, "layout": layout })
    }
}

impl BubbleMap {
    /// Plotly `sizeref` for area-scaled markers, so the largest value is
    /// drawn `size_max` pixels wide
    pub fn size_ref(&self) -> f64 {
        let max = self.sizes.iter().copied().max().unwrap_or(0);
        if max == 0 || self.size_max == 0 {
            return 1.0;
        }
        2.0 * max as f64 / (self.size_max as f64).powi(2)
    }
}

impl PlotlyFigure for BubbleMap {
    fn to_figure(&self) -> Value {
        let customdata: Vec<Vec<u64>> = (0..self.locations.len())
            .map(|row| {
                self.hover
                    .iter()
                    .map(|col| col.values.get(row).copied().unwrap_or(0))
                    .collect()
            })
            .collect();

        let mut hovertemplate = String::from("<b>%{hovertext}</b><br><br>");
        for (idx, col) in self.hover.iter().enumerate() {
            if idx > 0 {
                hovertemplate.push_str("<br>");
            }
            hovertemplate.push_str(&format!(
                "{}={}",
                col.label,
                col.format.placeholder(&format!("customdata[{}]", idx))
            ));
        }
        hovertemplate.push_str("<extra></extra>");

        let steps = self.color_scale.colors();
        let last = steps.len().saturating_sub(1).max(1) as f64;
        let colorscale: Vec<Value> = steps
            .iter()
            .enumerate()
            .map(|(i, color)| json!([i as f64 / last, color]))
            .collect();

        let trace = json!({
            "type": "scattergeo",
            "locations": self.locations,
            "locationmode": self.location_mode.as_str(),
            "hovertext": self.locations,
            "customdata": customdata,
            "hovertemplate": hovertemplate,
            "marker": {
                "size": self.sizes,
                "sizemode": "area",
                "sizeref": self.size_ref(),
                "color": self.color_values,
                "coloraxis": "coloraxis",
            },
            "showlegend": false,
        });

        let mut layout = base_layout(&self.title, self.template);
        layout.insert("margin".into(), json!({ "l": 0, "r": 0, "t": 50, "b": 0 }));
        layout.insert(
            "coloraxis".into(),
            json!({
                "colorscale": colorscale,
                "colorbar": {
                    "title": { "text": self.color_label },
                    "xanchor": "left",
                    "x": 0,
                },
            }),
        );
        layout.insert(
            "geo".into(),
            json!({
                "bgcolor": TRANSPARENT,
                "landcolor": "rgba(0,0,0,0.4)",
                "lakecolor": TRANSPARENT,
                "showframe": false,
                "projection": { "type": "natural earth" },
            }),
        );

        json!({ "data": [trace], "layout": layout })
    }
}
