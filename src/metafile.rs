// Copyright 2024 the strokepipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal metafile document, the destination of the meta stage.

use alloc::string::String;
use alloc::vec::Vec;

use arrayvec::ArrayString;

use crate::Polyline;

/// Maximum length, in bytes, of a [`Descriptor`].
pub const DESCRIPTOR_LEN: usize = 40;

/// A short fixed-capacity identifier: entity, element or level.
pub type Descriptor = ArrayString<DESCRIPTOR_LEN>;

/// Make a descriptor from `s`, truncating to [`DESCRIPTOR_LEN`] bytes on a
/// character boundary.
pub fn descriptor(s: &str) -> Descriptor {
    let mut end = s.len().min(DESCRIPTOR_LEN);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    let mut d = Descriptor::new();
    d.push_str(&s[..end]);
    d
}

/// A polyline with its category, value and label.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Curve {
    /// Sub-element category.
    pub subelement: String,
    /// Attribute value.
    pub value: String,
    /// Label text.
    pub label: String,
    /// The points.
    pub line: Polyline,
}

impl Curve {
    /// An empty curve with the given attributes.
    pub fn new(
        subelement: impl Into<String>,
        value: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Curve {
            subelement: subelement.into(),
            value: value.into(),
            label: label.into(),
            line: Polyline::new(),
        }
    }
}

/// One committed curve.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetaItem {
    /// Entity the curve belongs to.
    pub entity: Descriptor,
    /// Element the curve belongs to.
    pub element: Descriptor,
    /// Level the curve belongs to.
    pub level: Descriptor,
    /// The curve itself.
    pub curve: Curve,
}

/// An ordered collection of committed curves.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metafile {
    items: Vec<MetaItem>,
}

impl Metafile {
    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item.
    pub fn add_item(&mut self, item: MetaItem) {
        self.items.push(item);
    }

    /// The items, in commit order.
    pub fn items(&self) -> &[MetaItem] {
        &self.items
    }

    /// The number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Is the document empty?
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_truncates_on_char_boundary() {
        assert_eq!(descriptor("surface").as_str(), "surface");
        let long = "x".repeat(60);
        assert_eq!(descriptor(&long).len(), DESCRIPTOR_LEN);
        // 39 ASCII bytes then a two-byte character straddling the limit.
        let straddle = alloc::format!("{}é", "a".repeat(39));
        assert_eq!(descriptor(&straddle).as_str(), "a".repeat(39));
    }

    #[test]
    fn items_in_order() {
        let mut doc = Metafile::new();
        assert!(doc.is_empty());
        for label in ["a", "b"] {
            doc.add_item(MetaItem {
                entity: descriptor("e"),
                element: descriptor("f"),
                level: descriptor("l"),
                curve: Curve::new("", "", label),
            });
        }
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.items()[1].curve.label, "b");
    }
}
