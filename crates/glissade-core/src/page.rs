//! Arena-based page model: the markup contract the engine reads.
//!
//! The host mirrors the relevant part of its document into a [`Page`]: the
//! scroll container, the content layer, an optional header, and every
//! element carrying one of the tracked classes, together with the layout
//! numbers the engine needs (offset from the offset parent, box height,
//! vertical margins). Elements live in a flat `Vec` and are addressed by
//! [`ElementId`].

use glissade_types::backend::ElementId;
use serde::{Deserialize, Serialize};

pub const CONTAINER_CLASS: &str = "smooth-scroll-container";
pub const CONTENT_CLASS: &str = "smooth-scroll-content";
pub const WAYPOINT_CLASS: &str = "waypoint";
pub const PARALLAX_VERTICAL_CLASS: &str = "js-parallax";
pub const PARALLAX_HORIZONTAL_CLASS: &str = "js-parallax-h";
pub const PARALLAX_ZOOM_CLASS: &str = "js-parallax-z";
pub const LINK_CLASS: &str = "smooth-scroll-link";
pub const HEADER_TAG: &str = "header";

/// An element attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// A single element and its layout box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Element {
    pub tag: String,
    /// The `id` attribute, used for anchor resolution.
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<Attribute>,
    /// Distance from the top of `offset_parent` (or the content origin).
    pub offset_top: f64,
    /// Border-box height.
    pub height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub offset_parent: Option<ElementId>,
}

impl Default for Element {
    fn default() -> Self {
        Self::new("div")
    }
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
            offset_top: 0.0,
            height: 0.0,
            margin_top: 0.0,
            margin_bottom: 0.0,
            offset_parent: None,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Place the element `offset_top` pixels below its offset parent.
    pub fn at(mut self, offset_top: f64, height: f64) -> Self {
        self.offset_top = offset_top;
        self.height = height;
        self
    }

    pub fn with_margins(mut self, top: f64, bottom: f64) -> Self {
        self.margin_top = top;
        self.margin_bottom = bottom;
        self
    }

    pub fn inside(mut self, parent: ElementId) -> Self {
        self.offset_parent = Some(parent);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Human-readable label for log messages: the class list, or the tag.
    pub fn label(&self) -> String {
        if self.classes.is_empty() {
            self.tag.clone()
        } else {
            self.classes.join(" ")
        }
    }
}

/// The host page as seen by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    pub elements: Vec<Element>,
    /// Client height of the scroll container.
    pub container_height: f64,
    /// Client height of the document (the native viewport).
    pub viewport_height: f64,
    /// Scroll height of the content layer.
    pub content_height: f64,
    /// URL fragment on load, including the leading `#`.
    pub hash: Option<String>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element and return its handle.
    pub fn push(&mut self, element: Element) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    pub fn get_attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id).and_then(|el| el.get_attribute(name))
    }

    /// All elements carrying `class`, in document order.
    pub fn query(&self, class: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.has_class(class))
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    /// First element carrying `class`.
    pub fn first(&self, class: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|el| el.has_class(class))
            .map(ElementId)
    }

    pub fn container(&self) -> Option<ElementId> {
        self.first(CONTAINER_CLASS)
    }

    pub fn content(&self) -> Option<ElementId> {
        self.first(CONTENT_CLASS)
    }

    pub fn header(&self) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|el| el.tag == HEADER_TAG)
            .map(ElementId)
    }

    /// Element whose `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|el| el.id.as_deref() == Some(id))
            .map(ElementId)
    }

    /// Record new container and content sizes (after a host layout pass).
    pub fn set_sizes(&mut self, container_height: f64, content_height: f64) {
        self.container_height = container_height;
        self.content_height = content_height;
    }
}
