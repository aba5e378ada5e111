//! Ordered element storage.
//!
//! [`ElementStore`] keeps elements keyed by id together with the order in
//! which each id was first added. That order is the paint order: later
//! elements are drawn on top, and it never changes when an element is
//! updated.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::element_bounds;
use crate::{Element, ElementId, ElementPatch, SketchError, SketchResult};

/// Elements of one page, in paint order.
///
/// Serializes as a plain ordered list of elements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Element>", into = "Vec<Element>")]
pub struct ElementStore {
    /// All elements, indexed by ID.
    elements: HashMap<ElementId, Element>,
    /// IDs in first-insertion order.
    order: Vec<ElementId>,
}

impl ElementStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element.
    ///
    /// If an element with the same id is already stored its contents are
    /// replaced and it keeps its original paint position.
    pub fn add(&mut self, element: Element) -> ElementId {
        let id = element.id.clone();
        if self.elements.insert(id.clone(), element).is_some() {
            tracing::debug!("Replaced existing element {id}");
        } else {
            self.order.push(id.clone());
        }
        id
    }

    /// Get an element by ID.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Get a mutable reference to an element by ID.
    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    /// Merge `patch` into the element with the given id.
    ///
    /// Returns `false` without creating anything when the id is not stored;
    /// new elements only enter the store through [`ElementStore::add`].
    pub fn update(&mut self, id: &ElementId, patch: ElementPatch) -> bool {
        match self.elements.get_mut(id) {
            Some(element) => {
                patch.apply(element);
                true
            }
            None => {
                tracing::trace!("Update of missing element {id} ignored");
                false
            }
        }
    }

    /// Remove an element, returning it if it was stored.
    pub fn remove(&mut self, id: &ElementId) -> Option<Element> {
        let removed = self.elements.remove(id);
        if removed.is_some() {
            self.order.retain(|eid| eid != id);
        } else {
            tracing::trace!("Remove of missing element {id} ignored");
        }
        removed
    }

    /// Remove every element matching the predicate. Returns how many were removed.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Element) -> bool,
    {
        let before = self.order.len();
        let elements = &mut self.elements;
        self.order.retain(|id| {
            let doomed = elements.get(id).is_some_and(&mut predicate);
            if doomed {
                elements.remove(id);
            }
            !doomed
        });
        before - self.order.len()
    }

    /// All elements in paint order.
    pub fn all(&self) -> impl Iterator<Item = &Element> {
        self.order.iter().filter_map(|id| self.elements.get(id))
    }

    /// Element ids in paint order.
    #[must_use]
    pub fn ids(&self) -> &[ElementId] {
        &self.order
    }

    /// Mutable references to all elements, in no particular order.
    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements.values_mut()
    }

    /// Replace the whole contents, keeping the given order.
    ///
    /// A repeated id keeps its first position and the last value given for it.
    pub fn replace_all(&mut self, elements: impl IntoIterator<Item = Element>) {
        self.elements.clear();
        self.order.clear();
        for element in elements {
            if self.elements.contains_key(&element.id) {
                tracing::warn!("Duplicate element id {} in replacement set", element.id);
            }
            self.add(element);
        }
    }

    /// Topmost element whose normalized bounds contain the point.
    #[must_use]
    pub fn element_at(&self, x: f32, y: f32) -> Option<&Element> {
        self.order
            .iter()
            .rev()
            .filter_map(|id| self.elements.get(id))
            .find(|e| !e.is_selection() && element_bounds(e).contains_point(x, y))
    }

    /// Currently selected elements, in paint order.
    pub fn selected(&self) -> impl Iterator<Item = &Element> {
        self.all().filter(|e| e.selected)
    }

    /// Number of stored elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Serialize the elements to a JSON list.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> SketchResult<String> {
        serde_json::to_string(self).map_err(SketchError::Serialization)
    }

    /// Deserialize a store from a JSON list.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> SketchResult<Self> {
        serde_json::from_str(json).map_err(SketchError::Serialization)
    }
}

impl From<Vec<Element>> for ElementStore {
    fn from(elements: Vec<Element>) -> Self {
        let mut store = Self::new();
        store.replace_all(elements);
        store
    }
}

impl From<ElementStore> for Vec<Element> {
    fn from(mut store: ElementStore) -> Self {
        store
            .order
            .iter()
            .filter_map(|id| store.elements.remove(id))
            .collect()
    }
}

impl FromIterator<Element> for ElementStore {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        let mut store = Self::new();
        store.replace_all(iter);
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GenericKind, Point};

    fn rect(id: &str) -> Element {
        Element::generic(GenericKind::Rectangle, 0.0, 0.0).with_id(id)
    }

    fn ids(store: &ElementStore) -> Vec<&str> {
        store.all().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_store_add_get_remove() {
        let mut store = ElementStore::new();
        assert!(store.is_empty());

        let id = store.add(rect("a"));
        assert_eq!(store.len(), 1);
        assert!(store.get(&id).is_some());

        assert!(store.remove(&id).is_some());
        assert!(store.is_empty());
        assert!(store.remove(&id).is_none());
    }

    #[test]
    fn test_order_survives_interleaved_mutation() {
        let mut store = ElementStore::new();
        for id in ["a", "b", "c", "d"] {
            store.add(rect(id));
        }
        assert!(store.update(&"a".into(), ElementPatch::size(5.0, 5.0)));
        store.remove(&"b".into());
        store.add(rect("e"));
        assert!(store.update(&"c".into(), ElementPatch::selected(true)));

        assert_eq!(ids(&store), vec!["a", "c", "d", "e"]);
        assert_eq!(store.get(&"a".into()).map(|e| e.width), Some(5.0));
    }

    #[test]
    fn test_update_missing_is_noop() {
        let mut store = ElementStore::new();
        assert!(!store.update(&"ghost".into(), ElementPatch::size(1.0, 1.0)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_readd_keeps_position() {
        let mut store = ElementStore::new();
        store.add(rect("a"));
        store.add(rect("b"));
        store.add(rect("a").with_size(9.0, 9.0));
        assert_eq!(ids(&store), vec!["a", "b"]);
        assert_eq!(store.get(&"a".into()).map(|e| e.width), Some(9.0));
    }

    #[test]
    fn test_remove_where() {
        let mut store = ElementStore::new();
        store.add(rect("a"));
        store.add(Element::generic(GenericKind::Selection, 0.0, 0.0).with_id("s"));
        store.add(rect("b"));
        assert_eq!(store.remove_where(Element::is_selection), 1);
        assert_eq!(ids(&store), vec!["a", "b"]);
    }

    #[test]
    fn test_element_at_prefers_topmost() {
        let mut store = ElementStore::new();
        store.add(rect("under").with_size(50.0, 50.0));
        store.add(rect("over").with_size(-20.0, -20.0).with_id("over"));
        store.add(
            Element::linear(0.0, 0.0, [Point::new(10.0, 10.0), Point::new(40.0, 40.0)])
                .with_id("line"),
        );

        assert_eq!(store.element_at(20.0, 20.0).map(|e| e.id.as_str()), Some("line"));
        assert_eq!(store.element_at(45.0, 45.0).map(|e| e.id.as_str()), Some("under"));
        assert_eq!(store.element_at(-10.0, -10.0).map(|e| e.id.as_str()), Some("over"));
        assert!(store.element_at(100.0, 100.0).is_none());
    }

    #[test]
    fn test_json_roundtrip_keeps_order_and_fields() {
        let mut store = ElementStore::new();
        store.add(rect("z").with_size(-3.0, 4.5).with_selected(true));
        store.add(Element::text(1.0, 2.0, "one\ntwo").with_id("t").with_size(80.0, 40.0));
        store.add(
            Element::linear(0.0, 0.0, [Point::new(0.0, 0.0), Point::new(-1.0, 2.0)]).with_id("l"),
        );

        let json = store.to_json().expect("serialize");
        let restored = ElementStore::from_json(&json).expect("deserialize");

        assert_eq!(ids(&restored), vec!["z", "t", "l"]);
        let original: Vec<_> = store.all().cloned().collect();
        let loaded: Vec<_> = restored.all().cloned().collect();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_replace_all_with_duplicates() {
        let mut store = ElementStore::new();
        store.add(rect("old"));
        store.replace_all(vec![rect("a"), rect("b"), rect("a").with_size(2.0, 2.0)]);
        assert_eq!(ids(&store), vec!["a", "b"]);
        assert_eq!(store.get(&"a".into()).map(|e| e.width), Some(2.0));
    }
}
