//! HTML rendering
//!
//! Serializes the page tree to an HTML document. Text and attribute values
//! are escaped; graph figures are embedded as JSON script blocks and drawn by
//! Plotly.js on load.

use std::fmt::Write as _;

use super::node::{Element, Graph, Node};
use super::page::{DROPDOWN_ID, ERROR_ID, SELECTION_TOTALS_ID, TIME_SERIES_ID};

/// External stylesheets linked from the page head
pub const STYLESHEETS: [&str; 2] = [
    "https://cdn.jsdelivr.net/npm/reset-css@5.0.1/reset.min.css",
    "https://fonts.googleapis.com/css2?family=Open+Sans&display=swap",
];

/// Plotly.js bundle used to draw figures
pub const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

const PAGE_CSS: &str = r#"
.main-title { padding: 24px 32px; }
.main-title h1 { font-size: 2rem; font-weight: 600; }
.container-1, .container-2, .container-3 { display: grid; gap: 24px; padding: 0 32px 32px; }
.container-1 { grid-template-columns: 3fr 2fr; }
.container-3 { grid-template-columns: 1fr 1fr; }
.selection-controls { grid-column: 1 / -1; display: flex; align-items: center; gap: 12px; }
.selection-controls select { min-width: 240px; padding: 6px; }
.selection-error { color: #ee5253; }
.table-wrapper { max-height: 500px; overflow-y: auto; }
table { width: 100%; border-collapse: collapse; }
.table-head__row th { text-align: left; padding: 8px; border-bottom: 1px solid #506784; }
.table-body__row td { padding: 6px 8px; border-bottom: 1px solid #283442; }
"#;

/// Client glue: draw embedded figures, then swap both selection charts
/// together once a selection request succeeds. A failed request leaves the
/// previous charts in place and shows the error message.
fn page_script() -> String {
    format!(
        r#"
(function () {{
  function embedded(id) {{
    var el = document.getElementById(id + "-figure");
    return el ? JSON.parse(el.textContent) : null;
  }}
  document.querySelectorAll(".graph").forEach(function (el) {{
    var fig = embedded(el.id);
    if (fig) {{ Plotly.newPlot(el, fig.data, fig.layout, {{ responsive: true }}); }}
  }});
  var dropdown = document.getElementById("{dropdown}");
  var notice = document.getElementById("{error}");
  dropdown.addEventListener("change", function () {{
    var value = dropdown.value;
    var url = "/api/v1/selection" + (value ? "?country=" + encodeURIComponent(value) : "");
    fetch(url)
      .then(function (resp) {{
        return resp.json().then(function (body) {{ return {{ ok: resp.ok, body: body }}; }});
      }})
      .then(function (result) {{
        if (!result.ok) {{
          notice.textContent = result.body.error ? result.body.error.message : "Selection failed";
          return;
        }}
        notice.textContent = "";
        var ts = result.body.time_series, totals = result.body.totals;
        Plotly.react("{time_series}", ts.data, ts.layout);
        Plotly.react("{totals}", totals.data, totals.layout);
      }})
      .catch(function (err) {{ notice.textContent = String(err); }});
  }});
}})();
"#,
        dropdown = DROPDOWN_ID,
        error = ERROR_ID,
        time_series = TIME_SERIES_ID,
        totals = SELECTION_TOTALS_ID,
    )
}

/// Render a complete HTML document around `body`
pub fn render_document(title: &str, body: &Node) -> String {
    let mut out = String::with_capacity(64 * 1024);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(out, "<title>{}</title>", html_escape::encode_text(title));
    for href in STYLESHEETS {
        let _ = writeln!(
            out,
            "<link rel=\"stylesheet\" href=\"{}\">",
            html_escape::encode_double_quoted_attribute(href)
        );
    }
    let _ = writeln!(out, "<style>{}</style>", PAGE_CSS);
    let _ = writeln!(out, "<script src=\"{}\"></script>", PLOTLY_JS);
    out.push_str("</head>\n<body>\n");
    render_node(body, &mut out);
    let _ = writeln!(out, "\n<script>{}</script>", page_script());
    out.push_str("</body>\n</html>\n");
    out
}

/// Render a single node (and its subtree) as an HTML fragment
pub fn render_fragment(node: &Node) -> String {
    let mut out = String::new();
    render_node(node, &mut out);
    out
}

fn render_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&html_escape::encode_text(text)),
        Node::Element(el) => render_element(el, out),
        Node::Graph(graph) => render_graph(graph, out),
    }
}

fn render_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(el.tag);
    for (name, value) in &el.attrs {
        let _ = write!(
            out,
            " {}=\"{}\"",
            name,
            html_escape::encode_double_quoted_attribute(value)
        );
    }
    if !el.style.is_empty() {
        let css: Vec<String> = el
            .style
            .iter()
            .map(|(property, value)| format!("{}: {}", property, value))
            .collect();
        let _ = write!(
            out,
            " style=\"{}\"",
            html_escape::encode_double_quoted_attribute(&css.join("; "))
        );
    }
    out.push('>');

    for child in &el.children {
        render_node(child, out);
    }

    let _ = write!(out, "</{}>", el.tag);
}

fn render_graph(graph: &Graph, out: &mut String) {
    let id = html_escape::encode_double_quoted_attribute(&graph.id);
    let _ = write!(out, "<div id=\"{}\" class=\"graph\"></div>", id);
    // "</" would end the script element early
    let json = graph.figure.to_string().replace("</", "<\\/");
    let _ = write!(
        out,
        "<script type=\"application/json\" id=\"{}-figure\">{}</script>",
        id, json
    );
}
