// SPDX-License-Identifier: MIT OR Apache-2.0
//! Retained element tree the menu engine renders into.
//!
//! The engine never talks to a real document. It builds and mutates this
//! tree, and a host renderer mirrors it by draining [ElementTree::take_mutations]
//! and reading element state. Hosts feed layout back with [ElementTree::set_rect].

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use vello::kurbo::Rect;
use vello::peniko::Color;

/// Identifier of an element. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// The raw numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A style property value.
#[derive(Debug, Clone, Copy)]
pub enum StyleValue {
    /// A color property.
    Color(Color),
    /// A length in pixels.
    Px(f64),
}

impl StyleValue {
    /// The color, if this is a color value.
    pub fn as_color(&self) -> Option<Color> {
        match self {
            StyleValue::Color(color) => Some(*color),
            StyleValue::Px(_) => None,
        }
    }

    /// The length, if this is a pixel value.
    pub fn as_px(&self) -> Option<f64> {
        match self {
            StyleValue::Px(px) => Some(*px),
            StyleValue::Color(_) => None,
        }
    }
}

/// A structural change the host renderer has to replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// `child` was appended to `parent`.
    Attached {
        /// The new parent.
        parent: ElementId,
        /// The appended element.
        child: ElementId,
    },
    /// `child` was taken out of `parent`.
    Detached {
        /// The former parent.
        parent: ElementId,
        /// The removed element.
        child: ElementId,
    },
}

#[derive(Debug, Clone)]
struct Element {
    tag: &'static str,
    classes: IndexSet<String>,
    text: Option<String>,
    attributes: IndexMap<String, String>,
    style: IndexMap<&'static str, StyleValue>,
    rect: Rect,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: IndexSet::new(),
            text: None,
            attributes: IndexMap::new(),
            style: IndexMap::new(),
            rect: Rect::ZERO,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Arena of elements rooted at a document body.
///
/// Every operation on an unknown or removed id is a no-op, so teardown paths
/// may run more than once.
#[derive(Debug)]
pub struct ElementTree {
    elements: HashMap<ElementId, Element>,
    next_id: u64,
    root: ElementId,
    focused: Option<ElementId>,
    mutations: Vec<Mutation>,
}

impl ElementTree {
    /// Create a tree containing only the root `body` element.
    pub fn new() -> Self {
        let root = ElementId(0);
        let mut elements = HashMap::new();
        elements.insert(root, Element::new("body"));
        Self {
            elements,
            next_id: 1,
            root,
            focused: None,
            mutations: Vec::new(),
        }
    }

    /// The root element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Create a detached element.
    pub fn create(&mut self, tag: &'static str) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(id, Element::new(tag));
        id
    }

    /// Create a detached element carrying one class.
    pub fn create_with_class(&mut self, tag: &'static str, class: &str) -> ElementId {
        let id = self.create(tag);
        self.add_class(id, class);
        id
    }

    /// Whether the id refers to a live element.
    pub fn exists(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Tag name of an element.
    pub fn tag(&self, id: ElementId) -> Option<&'static str> {
        self.elements.get(&id).map(|el| el.tag)
    }

    /// Append `child` to `parent`, detaching it from its previous parent first.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if parent == child || !self.exists(parent) || !self.exists(child) {
            return;
        }
        if self.contains(child, parent) {
            log::warn!("Refusing to append {:?} into its own descendant {:?}", child, parent);
            return;
        }
        self.detach(child);
        if let Some(el) = self.elements.get_mut(&parent) {
            el.children.push(child);
        }
        if let Some(el) = self.elements.get_mut(&child) {
            el.parent = Some(parent);
        }
        self.mutations.push(Mutation::Attached { parent, child });
    }

    /// Take an element out of its parent. Returns false when it had no parent.
    pub fn detach(&mut self, id: ElementId) -> bool {
        let Some(parent) = self.elements.get_mut(&id).and_then(|el| el.parent.take()) else {
            return false;
        };
        if let Some(el) = self.elements.get_mut(&parent) {
            el.children.retain(|c| *c != id);
        }
        self.mutations.push(Mutation::Detached { parent, child: id });
        if self.focused.is_some_and(|f| f == id || self.contains(id, f)) {
            self.focused = None;
        }
        true
    }

    /// Detach an element and free it together with its descendants.
    ///
    /// Returns false if the element was already gone.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if id == self.root || !self.exists(id) {
            return false;
        }
        self.detach(id);
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(el) = self.elements.remove(&current) {
                stack.extend(el.children);
            }
            if self.focused == Some(current) {
                self.focused = None;
            }
        }
        true
    }

    /// Parent of an element.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(&id).and_then(|el| el.parent)
    }

    /// Children of an element, in order.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(&id)
            .map(|el| el.children.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether the element is reachable from the root.
    pub fn is_connected(&self, id: ElementId) -> bool {
        self.exists(id) && self.contains(self.root, id)
    }

    /// Add a class.
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.classes.insert(class.to_string());
        }
    }

    /// Remove a class.
    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.classes.shift_remove(class);
        }
    }

    /// Add or remove a class.
    pub fn toggle_class(&mut self, id: ElementId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    /// Whether an element has a class.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements
            .get(&id)
            .is_some_and(|el| el.classes.contains(class))
    }

    /// Replace the text content.
    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.text = Some(text.into());
        }
    }

    /// Text content.
    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.elements.get(&id).and_then(|el| el.text.as_deref())
    }

    /// Set an attribute.
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.attributes.insert(name.to_string(), value.into());
        }
    }

    /// Read an attribute.
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements
            .get(&id)
            .and_then(|el| el.attributes.get(name))
            .map(String::as_str)
    }

    /// Set a style property.
    pub fn set_style(&mut self, id: ElementId, property: &'static str, value: StyleValue) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.style.insert(property, value);
        }
    }

    /// Read a style property.
    pub fn style(&self, id: ElementId, property: &str) -> Option<StyleValue> {
        self.elements
            .get(&id)
            .and_then(|el| el.style.get(property))
            .copied()
    }

    /// Record the laid-out bounding box of an element.
    pub fn set_rect(&mut self, id: ElementId, rect: Rect) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.rect = rect;
        }
    }

    /// Bounding box last reported by the host.
    pub fn rect(&self, id: ElementId) -> Rect {
        self.elements.get(&id).map(|el| el.rect).unwrap_or(Rect::ZERO)
    }

    /// Move focus to an element.
    pub fn focus(&mut self, id: ElementId) {
        if self.is_connected(id) {
            self.focused = Some(id);
        } else {
            log::trace!("Ignoring focus on disconnected element {:?}", id);
        }
    }

    /// Clear focus.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// The currently focused element.
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Whether focus is on `ancestor` or inside it.
    pub fn has_focus_within(&self, ancestor: ElementId) -> bool {
        self.focused.is_some_and(|f| self.contains(ancestor, f))
    }

    /// Descendants of `ancestor` (excluding itself) carrying `class`, in tree order.
    pub fn find_by_class(&self, ancestor: ElementId, class: &str) -> Vec<ElementId> {
        let mut found = Vec::new();
        let mut stack: Vec<ElementId> = self.children(ancestor).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if self.has_class(id, class) {
                found.push(id);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
        found
    }

    /// Drain the structural mutations recorded since the last call.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.mutations)
    }

    /// Number of live elements, the root included.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false: the root element cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}
