//! Inline-style patches.
//!
//! Animations and transitions never poke style properties one at a time.
//! They build a [`StylePatch`] — an ordered set of property/value pairs —
//! and apply it in a single pass per frame. Concurrent tasks targeting the
//! same property still race last-write-wins on the element, but each write
//! is now a value that can be inspected and tested.

/// An ordered set of inline-style property assignments.
///
/// An empty value marks the property for removal from the inline style,
/// letting the stylesheet value show through again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylePatch {
    entries: Vec<(String, String)>,
}

impl StylePatch {
    /// Creates an empty patch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Assigns a property. A later assignment to the same property replaces
    /// the earlier value without changing its position in the patch.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == property) {
            entry.1 = value;
        } else {
            self.entries.push((property, value));
        }
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Marks a property for removal from the inline style.
    pub fn clear(&mut self, property: impl Into<String>) {
        self.set(property, "");
    }

    /// Returns the value assigned to a property, if any.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Folds another patch into this one; the other patch's assignments win.
    pub fn merge(&mut self, other: &Self) {
        for (property, value) in &other.entries {
            self.set(property.clone(), value.clone());
        }
    }

    /// Iterates the assignments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(property, value)| (property.as_str(), value.as_str()))
    }

    /// Number of assignments in the patch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the patch contains no assignments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies every assignment to an inline-style declaration in insertion
    /// order. Empty values remove the property instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects a property write.
    #[cfg(target_arch = "wasm32")]
    pub fn apply_to(&self, style: &web_sys::CssStyleDeclaration) -> Result<(), crate::Error> {
        for (property, value) in self.iter() {
            if value.is_empty() {
                style.remove_property(property)?;
            } else {
                style.set_property(property, value)?;
            }
        }
        Ok(())
    }
}

impl<P: Into<String>, V: Into<String>> FromIterator<(P, V)> for StylePatch {
    fn from_iter<I: IntoIterator<Item = (P, V)>>(iter: I) -> Self {
        let mut patch = Self::new();
        for (property, value) in iter {
            patch.set(property, value);
        }
        patch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_keeps_insertion_order() {
        let patch = StylePatch::new()
            .with("height", "10px")
            .with("overflow", "hidden")
            .with("opacity", "0.5");
        let order: Vec<&str> = patch.iter().map(|(name, _)| name).collect();
        assert_eq!(order, ["height", "overflow", "opacity"]);
    }

    #[test]
    fn later_assignment_replaces_in_place() {
        let patch = StylePatch::new()
            .with("height", "10px")
            .with("overflow", "hidden")
            .with("height", "0px");
        assert_eq!(patch.get("height"), Some("0px"));
        assert_eq!(patch.len(), 2);
        let order: Vec<&str> = patch.iter().map(|(name, _)| name).collect();
        assert_eq!(order, ["height", "overflow"]);
    }

    #[test]
    fn clear_marks_for_removal() {
        let mut patch = StylePatch::new().with("transition", "height 200ms");
        patch.clear("transition");
        assert_eq!(patch.get("transition"), Some(""));
    }

    #[test]
    fn merge_lets_the_other_patch_win() {
        let mut base = StylePatch::new()
            .with("height", "10px")
            .with("opacity", "1");
        let over = StylePatch::new().with("height", "0px").with("margin", "0");
        base.merge(&over);
        assert_eq!(base.get("height"), Some("0px"));
        assert_eq!(base.get("opacity"), Some("1"));
        assert_eq!(base.get("margin"), Some("0"));
        assert_eq!(base.len(), 3);
    }

    #[test]
    fn collects_from_pairs() {
        let patch: StylePatch = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        assert_eq!(patch.len(), 2);
        assert_eq!(patch.get("a"), Some("3"));
    }
}
