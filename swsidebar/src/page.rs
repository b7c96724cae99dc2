//! Retained model of the host page the sidebar attaches to.
//!
//! Elements live in an arena owned by [`Page`] and are addressed by
//! [`ElementId`]. The host renders the page and reports what it drew (for
//! example the on-screen width of an element) back into it.

use crate::listeners::{EventKind, ListenerTable, Target};
use indexmap::{IndexMap, IndexSet};
use std::cell::RefCell;
use std::rc::Rc;

pub type PageHandle = Rc<RefCell<Page>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: &'static str,
    id: Option<String>,
    classes: IndexSet<String>,
    style: IndexMap<String, String>,
    attrs: IndexMap<String, String>,
    text: String,
    inner_html: String,
    checked: bool,
    rendered_width: Option<f32>,
    children: Vec<ElementId>,
}

impl Element {
    pub fn tag(&self) -> &str {
        self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_owned());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.shift_remove(class);
    }

    /// Flips `class` and returns whether it is present afterwards.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.classes.shift_remove(class) {
            false
        } else {
            self.classes.insert(class.to_owned());
            true
        }
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        self.style.insert(property.to_owned(), value.into());
    }

    pub fn has_inline_style(&self) -> bool {
        !self.style.is_empty()
    }

    /// Drops every inline style declaration.
    pub fn remove_style_attribute(&mut self) {
        self.style.clear();
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    pub fn set_inner_html(&mut self, html: impl Into<String>) {
        self.inner_html = html.into();
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

/// Markup to be inserted into the page.
#[derive(Debug, Clone)]
pub struct Node {
    tag: &'static str,
    id: Option<String>,
    classes: Vec<String>,
    style: Vec<(String, String)>,
    attrs: Vec<(String, String)>,
    text: String,
    inner_html: String,
    children: Vec<Node>,
}

impl Node {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            id: None,
            classes: vec![],
            style: vec![],
            attrs: vec![],
            text: String::new(),
            inner_html: String::new(),
            children: vec![],
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_owned());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_owned());
        self
    }

    pub fn style(mut self, property: &str, value: &str) -> Self {
        self.style.push((property.to_owned(), value.to_owned()));
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_owned();
        self
    }

    pub fn html(mut self, html: &str) -> Self {
        self.inner_html = html.to_owned();
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }
}

pub struct Page {
    elements: Vec<Element>,
    ids: IndexMap<String, ElementId>,
    root_style: IndexMap<String, String>,
    listeners: Rc<RefCell<ListenerTable>>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    const BODY: ElementId = ElementId(0);

    pub fn new() -> Self {
        Self {
            elements: vec![Element {
                tag: "body",
                ..Default::default()
            }],
            ids: IndexMap::new(),
            root_style: IndexMap::new(),
            listeners: Rc::new(RefCell::new(ListenerTable::default())),
        }
    }

    pub fn into_handle(self) -> PageHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn body(&self) -> ElementId {
        Self::BODY
    }

    /// Appends an empty `<div id="..">` to the body.
    pub fn add_container(&mut self, id: &str) -> ElementId {
        self.insert(Self::BODY, Node::new("div").id(id))
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.ids.get(id).copied()
    }

    /// Elements replaced out of the tree stay addressable but are no longer
    /// reachable from the body or by id.
    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    /// Replaces the children of `parent` with `nodes`.
    pub fn set_children(&mut self, parent: ElementId, nodes: Vec<Node>) {
        let old = std::mem::take(&mut self.elements[parent.0].children);
        for child in old {
            self.detach(child);
        }
        for node in nodes {
            self.insert(parent, node);
        }
    }

    fn insert(&mut self, parent: ElementId, node: Node) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            tag: node.tag,
            id: node.id.clone(),
            classes: node.classes.into_iter().collect(),
            style: node.style.into_iter().collect(),
            attrs: node.attrs.into_iter().collect(),
            text: node.text,
            inner_html: node.inner_html,
            ..Default::default()
        });
        if let Some(key) = node.id {
            self.ids.insert(key, id);
        }
        self.elements[parent.0].children.push(id);
        for child in node.children {
            self.insert(id, child);
        }
        id
    }

    fn detach(&mut self, id: ElementId) {
        if let Some(key) = self.elements[id.0].id.clone() {
            if self.ids.get(&key) == Some(&id) {
                self.ids.shift_remove(&key);
            }
        }
        let children = self.elements[id.0].children.clone();
        for child in children {
            self.detach(child);
        }
    }

    /// Sets a custom property on the document root.
    pub fn set_property(&mut self, name: &str, value: impl Into<String>) {
        self.root_style.insert(name.to_owned(), value.into());
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.root_style.get(name).map(String::as_str)
    }

    pub fn set_rendered_width(&mut self, id: ElementId, width: f32) {
        self.elements[id.0].rendered_width = Some(width);
    }

    /// Width the element was last drawn with, else its inline `width`.
    pub fn computed_width(&self, id: ElementId) -> Option<f32> {
        let element = self.element(id);
        element
            .rendered_width
            .or_else(|| element.style("width").and_then(parse_px))
            .map(f32::trunc)
    }

    pub fn listeners(&self) -> &Rc<RefCell<ListenerTable>> {
        &self.listeners
    }

    pub fn listener_count(&self, target: Target, kind: EventKind) -> usize {
        self.listeners.borrow().count(target, kind)
    }
}

pub fn px(value: f32) -> String {
    format!("{value}px")
}

/// Parses a pixel length such as `"300px"`, dropping any fraction.
pub fn parse_px(value: &str) -> Option<f32> {
    let value = value.trim();
    value
        .strip_suffix("px")
        .unwrap_or(value)
        .trim()
        .parse::<f32>()
        .ok()
        .map(f32::trunc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_container() {
        let mut page = Page::new();
        let side = page.add_container("side");
        assert_eq!(page.get_element_by_id("side"), Some(side));
        assert_eq!(page.element(page.body()).children(), &[side]);
        assert!(page.get_element_by_id("main").is_none());
    }

    #[test]
    fn test_set_children_replaces_subtree() {
        let mut page = Page::new();
        let side = page.add_container("side");
        page.set_children(
            side,
            vec![Node::new("div")
                .id("panel")
                .child(Node::new("button").id("btn").text("x"))],
        );
        let btn = page.get_element_by_id("btn").unwrap();
        assert_eq!(page.element(btn).text(), "x");
        assert_eq!(page.element(btn).tag(), "button");

        page.set_children(side, vec![Node::new("p").id("other")]);
        assert!(page.get_element_by_id("panel").is_none());
        assert!(page.get_element_by_id("btn").is_none());
        assert!(page.get_element_by_id("other").is_some());
        assert_eq!(page.element(side).children().len(), 1);
    }

    #[test]
    fn test_class_list() {
        let mut element = Element::default();
        element.add_class("open");
        element.add_class("open");
        assert!(element.has_class("open"));
        assert_eq!(element.classes().count(), 1);
        assert!(!element.toggle_class("open"));
        assert!(element.toggle_class("open"));
        element.remove_class("open");
        assert!(!element.has_class("open"));
    }

    #[test]
    fn test_computed_width() {
        let mut page = Page::new();
        let side = page.add_container("side");
        assert_eq!(page.computed_width(side), None);

        page.element_mut(side).set_style("width", "280px");
        assert_eq!(page.computed_width(side), Some(280.0));

        page.set_rendered_width(side, 312.7);
        assert_eq!(page.computed_width(side), Some(312.0));
    }

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("300px"), Some(300.0));
        assert_eq!(parse_px(" 250.9px "), Some(250.0));
        assert_eq!(parse_px("42"), Some(42.0));
        assert_eq!(parse_px("auto"), None);
        assert_eq!(px(300.0), "300px");
    }
}
