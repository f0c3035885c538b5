use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Nodes one pixel wide or tall (or smaller) produce no geometry.
    pub fn is_drawable(&self) -> bool {
        self.width > 1.0 && self.height > 1.0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub class: Option<String>,
    pub inner_html: String,
    pub bounds: LayoutRect,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>, bounds: LayoutRect) -> Self {
        Self {
            tag: tag.into(),
            bounds,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_inner_html(mut self, html: impl Into<String>) -> Self {
        self.inner_html = html.into();
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Opening-tag style label, e.g. `<div id="main" class="wide">`.
    pub fn label(&self) -> String {
        let mut label = format!("<{}", self.tag);
        if let Some(id) = self.id.as_deref().filter(|id| !id.is_empty()) {
            label.push_str(&format!(" id=\"{id}\""));
        }
        if let Some(class) = self.class.as_deref().filter(|class| !class.is_empty()) {
            label.push_str(&format!(" class=\"{class}\""));
        }
        label.push('>');
        label
    }

    pub fn traverse(&self) -> Traversal<'_> {
        Traversal {
            stack: vec![(self, 0)],
        }
    }

    pub fn descendant_count(&self) -> usize {
        self.traverse().count().saturating_sub(1)
    }
}

/// Pre-order depth-first walk over an element tree. The root is yielded at
/// depth 0 and children in document order.
pub struct Traversal<'a> {
    stack: Vec<(&'a Element, u32)>,
}

impl<'a> Iterator for Traversal<'a> {
    type Item = (&'a Element, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let (element, depth) = self.stack.pop()?;
        for child in element.children.iter().rev() {
            self.stack.push((child, depth + 1));
        }
        Some((element, depth))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
        }
    }
}

/// Snapshot of a laid-out page: the viewport it was captured at and its
/// element tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub viewport: Viewport,
    pub root: Element,
}

impl Document {
    pub fn new(viewport: Viewport, root: Element) -> Self {
        Self { viewport, root }
    }

    pub fn nodes(&self) -> Traversal<'_> {
        self.root.traverse()
    }
}

/// Metadata kept for every node that produced geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub label: String,
    pub tag: String,
    pub inner_html: String,
    pub depth: u32,
    pub bounds: LayoutRect,
}

impl NodeInfo {
    pub fn from_element(element: &Element, depth: u32) -> Self {
        Self {
            label: element.label(),
            tag: element.tag.clone(),
            inner_html: element.inner_html.clone(),
            depth,
            bounds: element.bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Element {
        Element::new("html", LayoutRect::new(0.0, 0.0, 800.0, 600.0))
            .with_child(
                Element::new("body", LayoutRect::new(0.0, 0.0, 800.0, 600.0))
                    .with_child(Element::new("h1", LayoutRect::new(10.0, 10.0, 300.0, 40.0)))
                    .with_child(Element::new("p", LayoutRect::new(10.0, 60.0, 300.0, 80.0))),
            )
            .with_child(Element::new("footer", LayoutRect::new(0.0, 560.0, 800.0, 40.0)))
    }

    #[test]
    fn traversal_is_preorder_with_depths() {
        let tree = sample_tree();
        let visited: Vec<(&str, u32)> = tree
            .traverse()
            .map(|(element, depth)| (element.tag.as_str(), depth))
            .collect();
        assert_eq!(
            visited,
            vec![
                ("html", 0),
                ("body", 1),
                ("h1", 2),
                ("p", 2),
                ("footer", 1)
            ]
        );
        assert_eq!(tree.descendant_count(), 4);
    }

    #[test]
    fn drawable_boundary_excludes_one_pixel() {
        assert!(!LayoutRect::new(0.0, 0.0, 1.0, 50.0).is_drawable());
        assert!(!LayoutRect::new(0.0, 0.0, 50.0, 1.0).is_drawable());
        assert!(LayoutRect::new(0.0, 0.0, 1.5, 1.5).is_drawable());
    }

    #[test]
    fn label_includes_id_and_class() {
        let element = Element::new("div", LayoutRect::default())
            .with_id("main")
            .with_class("wide");
        assert_eq!(element.label(), "<div id=\"main\" class=\"wide\">");
        assert_eq!(Element::new("span", LayoutRect::default()).label(), "<span>");
    }

    #[test]
    fn document_deserializes_with_defaults() {
        let json = r#"{
            "viewport": { "width": 640, "height": 480 },
            "root": {
                "tag": "body",
                "bounds": { "x": 0, "y": 0, "width": 640, "height": 480 },
                "children": [ { "tag": "div", "inner_html": "hi" } ]
            }
        }"#;
        let document: Document = serde_json::from_str(json).expect("document");
        assert_eq!(document.viewport.width, 640.0);
        assert_eq!(document.nodes().count(), 2);
        assert_eq!(document.root.children[0].inner_html, "hi");
        assert_eq!(document.root.children[0].bounds, LayoutRect::default());
    }
}
