// Copyright 2024 the strokepipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Commit each stroke to a metafile as a tagged curve.

use alloc::string::String;

use crate::metafile::descriptor;
use crate::{Curve, Descriptor, MetaItem, Metafile, Point, Stage, StageContext};

/// Meta parameters: how committed curves are tagged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetaParams {
    /// Entity descriptor.
    pub entity: String,
    /// Element descriptor.
    pub element: String,
    /// Level descriptor.
    pub level: String,
    /// Sub-element category of each curve.
    pub subelement: String,
    /// Attribute value of each curve.
    pub value: String,
    /// Label of each curve.
    pub label: String,
}

impl MetaParams {
    /// Tag curves with the given entity, element and level.
    pub fn new(
        entity: impl Into<String>,
        element: impl Into<String>,
        level: impl Into<String>,
    ) -> Self {
        MetaParams {
            entity: entity.into(),
            element: element.into(),
            level: level.into(),
            ..Default::default()
        }
    }

    /// Builder method for the curve attributes.
    #[must_use]
    pub fn with_curve(
        mut self,
        subelement: impl Into<String>,
        value: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.subelement = subelement.into();
        self.value = value.into();
        self.label = label.into();
        self
    }
}

/// The meta stage. Owns its destination document while enabled.
#[derive(Clone, Debug)]
pub struct Meta {
    document: Metafile,
    entity: Descriptor,
    element: Descriptor,
    level: Descriptor,
    curve: Curve,
}

impl Meta {
    /// A meta stage committing into `document`.
    ///
    /// Descriptors longer than [`DESCRIPTOR_LEN`](crate::DESCRIPTOR_LEN)
    /// bytes are truncated.
    pub fn new(document: Metafile, params: MetaParams) -> Self {
        Meta {
            document,
            entity: descriptor(&params.entity),
            element: descriptor(&params.element),
            level: descriptor(&params.level),
            curve: Curve::new(params.subelement, params.value, params.label),
        }
    }

    /// The destination document.
    pub fn document(&self) -> &Metafile {
        &self.document
    }

    /// Give up the destination document; any stroke in progress is dropped.
    pub fn into_document(self) -> Metafile {
        self.document
    }
}

impl Stage for Meta {
    fn put(&mut self, point: Point, cx: &mut StageContext<'_>) {
        self.curve.line.push(point);
        cx.emit(point);
    }

    fn flush(&mut self, cx: &mut StageContext<'_>) {
        if !self.curve.line.is_empty() {
            self.document.add_item(MetaItem {
                entity: self.entity,
                element: self.element,
                level: self.level,
                curve: self.curve.clone(),
            });
        }
        self.curve.line.clear();
        cx.flush();
    }
}
