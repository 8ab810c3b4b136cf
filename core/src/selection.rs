//! The element-set wrapper.
//!
//! A [`Selection`] owns an already-resolved list of concrete elements and
//! exposes the convenience surface over them: content, style, class,
//! attribute, geometry, traversal, and event helpers. Lookup happens once
//! at construction; every operation after that is a direct pass-through to
//! the host element APIs.

use wasm_bindgen::JsCast;
use web_sys::{
    CssStyleDeclaration, Document, Element, Event, HtmlCollection, HtmlElement, HtmlInputElement,
    Node, NodeList, Window,
};

use crate::event::{EventBinding, OnceListener, listen_once};
use crate::{Error, StylePatch};

/// Returns the host window.
///
/// # Errors
///
/// Returns [`Error::DomUnavailable`] outside of a browser.
pub fn window() -> Result<Window, Error> {
    web_sys::window().ok_or(Error::DomUnavailable)
}

/// Returns the host document.
///
/// # Errors
///
/// Returns [`Error::DomUnavailable`] outside of a browser.
pub fn document() -> Result<Document, Error> {
    window()?.document().ok_or(Error::DomUnavailable)
}

/// Returns the computed style declaration for an element.
///
/// # Errors
///
/// Returns an error when the DOM is unavailable or the host refuses to
/// compute a style for the element.
pub fn computed_style(element: &Element) -> Result<CssStyleDeclaration, Error> {
    window()?
        .get_computed_style(element)?
        .ok_or(Error::DomUnavailable)
}

/// Selects all elements matching a CSS selector.
///
/// # Errors
///
/// Returns an error when the DOM is unavailable or the selector is invalid.
pub fn select(selector: &str) -> Result<Selection, Error> {
    let list = document()?.query_selector_all(selector)?;
    Ok(Selection::from_node_list(&list))
}

/// Document-relative or offset-parent-relative coordinates of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Distance from the top edge, in pixels.
    pub top: f64,
    /// Distance from the left edge, in pixels.
    pub left: f64,
}

/// An owned set of matched elements.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    elements: Vec<Element>,
}

fn same_node(a: &Node, b: &Node) -> bool {
    a.is_same_node(Some(b))
}

fn inline_style(element: &Element) -> Option<CssStyleDeclaration> {
    element.dyn_ref::<HtmlElement>().map(HtmlElement::style)
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Wraps a single element.
    #[must_use]
    pub fn from_element(element: Element) -> Self {
        Self {
            elements: vec![element],
        }
    }

    /// Wraps an already-resolved list of elements.
    #[must_use]
    pub fn from_elements(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Collects the element nodes out of a node list.
    #[must_use]
    pub fn from_node_list(list: &NodeList) -> Self {
        let elements = (0..list.length())
            .filter_map(|index| list.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect();
        Self { elements }
    }

    fn from_collection(collection: &HtmlCollection) -> Vec<Element> {
        (0..collection.length())
            .filter_map(|index| collection.item(index))
            .collect()
    }

    /// Creates a new element from an HTML fragment and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMarkup`] when the fragment does not describe
    /// an element.
    pub fn create(markup: &str) -> Result<Self, Error> {
        let trimmed = markup.trim();
        if !trimmed.starts_with('<') || !trimmed.ends_with('>') {
            return Err(Error::InvalidMarkup(markup.to_owned()));
        }
        let container = document()?.create_element("div")?;
        container.set_inner_html(trimmed);
        let element = container
            .first_element_child()
            .ok_or_else(|| Error::InvalidMarkup(markup.to_owned()))?;
        Ok(Self::from_element(element))
    }

    /// The matched elements, in document order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The first matched element, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Element> {
        self.elements.first()
    }

    /// Number of matched elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the selection matched nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Invokes a callback for every matched element.
    pub fn each(&self, mut callback: impl FnMut(usize, &Element)) -> &Self {
        for (index, element) in self.elements.iter().enumerate() {
            callback(index, element);
        }
        self
    }

    // ------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------

    /// Inner HTML of the first matched element.
    #[must_use]
    pub fn html(&self) -> Option<String> {
        self.first().map(Element::inner_html)
    }

    /// Replaces the inner HTML of every matched element.
    pub fn set_html(&self, html: &str) -> &Self {
        self.each(|_, element| element.set_inner_html(html))
    }

    /// Inserts HTML at the end of every matched element.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the fragment.
    pub fn append(&self, html: &str) -> Result<&Self, Error> {
        self.insert_adjacent("beforeend", html)
    }

    /// Inserts HTML at the beginning of every matched element.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the fragment.
    pub fn prepend(&self, html: &str) -> Result<&Self, Error> {
        self.insert_adjacent("afterbegin", html)
    }

    /// Inserts HTML before every matched element.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the fragment.
    pub fn before(&self, html: &str) -> Result<&Self, Error> {
        self.insert_adjacent("beforebegin", html)
    }

    /// Inserts HTML after every matched element.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the fragment.
    pub fn after(&self, html: &str) -> Result<&Self, Error> {
        self.insert_adjacent("afterend", html)
    }

    fn insert_adjacent(&self, position: &str, html: &str) -> Result<&Self, Error> {
        for element in &self.elements {
            element.insert_adjacent_html(position, html)?;
        }
        Ok(self)
    }

    /// Detaches every matched element from the document.
    pub fn remove(self) {
        for element in &self.elements {
            element.remove();
        }
    }

    /// Form value of the first matched element.
    #[must_use]
    pub fn value(&self) -> Option<String> {
        self.first()?
            .dyn_ref::<HtmlInputElement>()
            .map(HtmlInputElement::value)
    }

    /// Sets the form value of every matched input element.
    pub fn set_value(&self, value: &str) -> &Self {
        self.each(|_, element| {
            if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
                input.set_value(value);
            }
        })
    }

    // ------------------------------------------------------------------
    // Style
    // ------------------------------------------------------------------

    /// Computed value of a CSS property on the first matched element.
    #[must_use]
    pub fn css(&self, property: &str) -> Option<String> {
        let element = self.first()?;
        computed_style(element)
            .ok()?
            .get_property_value(property)
            .ok()
    }

    /// Sets an inline-style property on every matched element.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the property write.
    pub fn set_css(&self, property: &str, value: &str) -> Result<&Self, Error> {
        self.apply(&StylePatch::new().with(property, value))
    }

    /// Applies a style patch atomically to every matched element.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects a property write.
    pub fn apply(&self, patch: &StylePatch) -> Result<&Self, Error> {
        for element in &self.elements {
            if let Some(style) = inline_style(element) {
                patch.apply_to(&style)?;
            }
        }
        Ok(self)
    }

    /// Hides every matched element.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the property write.
    pub fn hide(&self) -> Result<&Self, Error> {
        self.set_css("display", "none")
    }

    /// Clears the inline display override, letting elements show again.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the property write.
    pub fn show(&self) -> Result<&Self, Error> {
        self.set_css("display", "")
    }

    /// Toggles visibility based on the inline display value.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects a property write.
    pub fn toggle(&self) -> Result<&Self, Error> {
        for element in &self.elements {
            if let Some(style) = inline_style(element) {
                let current = style.get_property_value("display").unwrap_or_default();
                let next = if current == "none" { "" } else { "none" };
                StylePatch::new().with("display", next).apply_to(&style)?;
            }
        }
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Classes and attributes
    // ------------------------------------------------------------------

    /// Whether the first matched element carries the class.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.first()
            .is_some_and(|element| element.class_list().contains(class))
    }

    /// Adds a class to every matched element.
    ///
    /// # Errors
    ///
    /// Returns an error if the class name is rejected by the host.
    pub fn add_class(&self, class: &str) -> Result<&Self, Error> {
        for element in &self.elements {
            element.class_list().add_1(class)?;
        }
        Ok(self)
    }

    /// Removes a class from every matched element.
    ///
    /// # Errors
    ///
    /// Returns an error if the class name is rejected by the host.
    pub fn remove_class(&self, class: &str) -> Result<&Self, Error> {
        for element in &self.elements {
            element.class_list().remove_1(class)?;
        }
        Ok(self)
    }

    /// Toggles a class on every matched element.
    ///
    /// # Errors
    ///
    /// Returns an error if the class name is rejected by the host.
    pub fn toggle_class(&self, class: &str) -> Result<&Self, Error> {
        for element in &self.elements {
            element.class_list().toggle(class)?;
        }
        Ok(self)
    }

    /// Attribute value on the first matched element.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<String> {
        self.first()?.get_attribute(name)
    }

    /// Sets an attribute on every matched element.
    ///
    /// # Errors
    ///
    /// Returns an error if the attribute name is rejected by the host.
    pub fn set_attr(&self, name: &str, value: &str) -> Result<&Self, Error> {
        for element in &self.elements {
            element.set_attribute(name, value)?;
        }
        Ok(self)
    }

    /// Removes an attribute from every matched element.
    ///
    /// # Errors
    ///
    /// Returns an error if the attribute name is rejected by the host.
    pub fn remove_attr(&self, name: &str) -> Result<&Self, Error> {
        for element in &self.elements {
            element.remove_attribute(name)?;
        }
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// Rendered width of the first matched element, in pixels.
    #[must_use]
    pub fn width(&self) -> Option<f64> {
        self.first()?
            .dyn_ref::<HtmlElement>()
            .map(|element| f64::from(element.offset_width()))
    }

    /// Sets the width of every matched element, in pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the property write.
    pub fn set_width(&self, pixels: f64) -> Result<&Self, Error> {
        self.set_css("width", &format!("{pixels}px"))
    }

    /// Rendered height of the first matched element, in pixels.
    #[must_use]
    pub fn height(&self) -> Option<f64> {
        self.first()?
            .dyn_ref::<HtmlElement>()
            .map(|element| f64::from(element.offset_height()))
    }

    /// Sets the height of every matched element, in pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the property write.
    pub fn set_height(&self, pixels: f64) -> Result<&Self, Error> {
        self.set_css("height", &format!("{pixels}px"))
    }

    /// Document-relative coordinates of the first matched element.
    #[must_use]
    pub fn offset(&self) -> Option<Point> {
        let element = self.first()?;
        let rect = element.get_bounding_client_rect();
        let window = window().ok()?;
        let scroll_x = window.scroll_x().ok()?;
        let scroll_y = window.scroll_y().ok()?;
        Some(Point {
            top: rect.top() + scroll_y,
            left: rect.left() + scroll_x,
        })
    }

    /// Offset-parent-relative coordinates of the first matched element.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        let element = self.first()?.dyn_ref::<HtmlElement>()?;
        Some(Point {
            top: f64::from(element.offset_top()),
            left: f64::from(element.offset_left()),
        })
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// Parents of the matched elements.
    #[must_use]
    pub fn parent(&self) -> Self {
        let parents = self
            .elements
            .iter()
            .filter_map(|element| element.parent_element())
            .collect();
        Self { elements: parents }
    }

    /// Children of the matched elements.
    #[must_use]
    pub fn children(&self) -> Self {
        let children = self
            .elements
            .iter()
            .flat_map(|element| Self::from_collection(&element.children()))
            .collect();
        Self { elements: children }
    }

    /// Siblings of the matched elements.
    #[must_use]
    pub fn siblings(&self) -> Self {
        let siblings = self
            .elements
            .iter()
            .flat_map(|element| {
                let all = element
                    .parent_element()
                    .map(|parent| Self::from_collection(&parent.children()))
                    .unwrap_or_default();
                all.into_iter()
                    .filter(|candidate| !same_node(candidate, element))
                    .collect::<Vec<_>>()
            })
            .collect();
        Self { elements: siblings }
    }

    /// Descendants of the matched elements that match a selector.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector is invalid.
    pub fn find(&self, selector: &str) -> Result<Self, Error> {
        let mut found = Vec::new();
        for element in &self.elements {
            let list = element.query_selector_all(selector)?;
            found.extend(Self::from_node_list(&list).elements);
        }
        Ok(Self { elements: found })
    }

    /// Closest ancestors (or the elements themselves) matching a selector.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector is invalid.
    pub fn closest(&self, selector: &str) -> Result<Self, Error> {
        let mut found = Vec::new();
        for element in &self.elements {
            if let Some(matched) = element.closest(selector)? {
                found.push(matched);
            }
        }
        Ok(Self { elements: found })
    }

    /// Deep copies of the matched elements, detached from the document.
    ///
    /// # Errors
    ///
    /// Returns an error if a node refuses to be cloned.
    pub fn clone_nodes(&self) -> Result<Self, Error> {
        let mut clones = Vec::with_capacity(self.elements.len());
        for element in &self.elements {
            let node = element.clone_node_with_deep(true)?;
            if let Ok(clone) = node.dyn_into::<Element>() {
                clones.push(clone);
            }
        }
        Ok(Self { elements: clones })
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Attaches an event handler to every matched element.
    ///
    /// The returned bindings detach their listeners when dropped; call
    /// [`EventBinding::forget`] on each to keep a listener for the lifetime
    /// of the page.
    ///
    /// # Errors
    ///
    /// Returns an error if a listener cannot be registered.
    pub fn on(
        &self,
        event: &str,
        handler: impl FnMut(Event) + Clone + 'static,
    ) -> Result<Vec<EventBinding>, Error> {
        self.elements
            .iter()
            .map(|element| EventBinding::attach(element.as_ref(), event, handler.clone()))
            .collect()
    }

    /// Attaches a one-shot handler to the first matched element.
    ///
    /// The host removes the listener after its single delivery; the
    /// returned handle can cancel it earlier. Returns `None` for an empty
    /// selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be registered.
    pub fn once(
        &self,
        event: &str,
        handler: impl FnOnce(Event) + 'static,
    ) -> Result<Option<OnceListener>, Error> {
        match self.first() {
            Some(element) => Ok(Some(listen_once(element.as_ref(), event, handler)?)),
            None => Ok(None),
        }
    }

    /// Attaches a delegated handler to every matched element.
    ///
    /// One listener per matched ancestor inspects each event's origin and
    /// invokes the handler only when the origin (or one of its ancestors up
    /// to the matched element) matches the selector. The matching descendant
    /// is passed alongside the event.
    ///
    /// # Errors
    ///
    /// Returns an error if a listener cannot be registered.
    pub fn delegate(
        &self,
        event: &str,
        selector: &str,
        handler: impl FnMut(Event, Element) + Clone + 'static,
    ) -> Result<Vec<EventBinding>, Error> {
        self.elements
            .iter()
            .map(|root| {
                let scope = root.clone();
                let selector = selector.to_owned();
                let mut handler = handler.clone();
                EventBinding::attach(root.as_ref(), event, move |event: Event| {
                    let Some(origin) = event
                        .target()
                        .and_then(|target| target.dyn_into::<Element>().ok())
                    else {
                        return;
                    };
                    if let Ok(Some(matched)) = origin.closest(&selector) {
                        if scope.contains(Some(matched.as_ref())) {
                            handler(event, matched);
                        }
                    }
                })
            })
            .collect()
    }
}
