//! Page tree
//!
//! A minimal element tree the page is assembled from. Attribute and style
//! order is preserved, so rendering the same tree twice yields the same HTML.

use serde_json::Value;

/// A node of the page tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// A chart region with its initial Plotly figure
    Graph(Graph),
}

impl Node {
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(el) => el.children.as_slice(),
            _ => &[],
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(s) => s.clone(),
            Node::Graph(_) => String::new(),
            Node::Element(el) => el.children.iter().map(Node::text_content).collect(),
        }
    }

    /// Depth-first search for the first node matching `pred`
    pub fn find(&self, pred: &dyn Fn(&Node) -> bool) -> Option<&Node> {
        if pred(self) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(pred))
    }

    /// Depth-first search by `id` attribute (elements) or graph id
    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        self.find(&|node| match node {
            Node::Element(el) => el.attr_value("id") == Some(id),
            Node::Graph(graph) => graph.id == id,
            Node::Text(_) => false,
        })
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<Graph> for Node {
    fn from(graph: Graph) -> Self {
        Node::Graph(graph)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Text(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Text(s)
    }
}

/// An HTML element with ordered attributes, inline style and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(String, String)>,
    pub style: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            style: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder method: set an attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Builder method: add an inline style declaration
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.push((property.into(), value.into()));
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<N: Into<Node>>(mut self, children: impl IntoIterator<Item = N>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Value of the first attribute named `name`
    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A chart region; the figure is drawn client-side
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    pub id: String,
    pub figure: Value,
}

impl Graph {
    pub fn new(id: impl Into<String>, figure: Value) -> Self {
        Self {
            id: id.into(),
            figure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_preserves_order() {
        let el = Element::new("div")
            .class("container-1")
            .id("root")
            .style("min-height", "100vh")
            .style("color", "white")
            .child("hello")
            .child(Element::new("span").child(" world"));

        assert_eq!(el.attr_value("class"), Some("container-1"));
        assert_eq!(el.attr_value("id"), Some("root"));
        assert_eq!(el.style[0].0, "min-height");
        assert_eq!(el.style[1].0, "color");

        let node = Node::from(el);
        assert_eq!(node.text_content(), "hello world");
    }

    #[test]
    fn test_find_by_id() {
        let tree: Node = Element::new("main")
            .child(Element::new("div").id("a").child("first"))
            .child(Graph::new("chart", json!({ "data": [] })))
            .into();

        assert_eq!(tree.find_by_id("a").unwrap().text_content(), "first");
        assert!(matches!(tree.find_by_id("chart"), Some(Node::Graph(_))));
        assert!(tree.find_by_id("missing").is_none());
    }
}
