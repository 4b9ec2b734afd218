/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Nodes whose layers are positioned relative to scrolling ancestors rather than scrolled
//! themselves. The tree only records the constraints committed by layout; computing layer
//! positions from them is left to the compositor.

use parking_lot::RwLock;
use scrolling_tree_traits::{
    FixedPositionConstraints, ScrollingNodeId, ScrollingStateNodeProperties,
    StickyPositionConstraints,
};

use crate::node::{ScrollingTreeNode, ScrollingTreeNodeBase};

/// A `position: fixed` layer.
#[derive(Debug)]
pub struct FixedNode {
    base: ScrollingTreeNodeBase,
    constraints: RwLock<Option<FixedPositionConstraints>>,
}

impl FixedNode {
    pub fn new(base: ScrollingTreeNodeBase) -> Self {
        Self {
            base,
            constraints: RwLock::new(None),
        }
    }

    pub fn constraints(&self) -> Option<FixedPositionConstraints> {
        self.constraints.read().clone()
    }
}

impl ScrollingTreeNode for FixedNode {
    fn base(&self) -> &ScrollingTreeNodeBase {
        &self.base
    }

    fn commit_state(&self, properties: &ScrollingStateNodeProperties) {
        if let ScrollingStateNodeProperties::Fixed(constraints) = properties {
            *self.constraints.write() = Some(constraints.clone());
        }
    }
}

/// A `position: sticky` layer.
#[derive(Debug)]
pub struct StickyNode {
    base: ScrollingTreeNodeBase,
    constraints: RwLock<Option<StickyPositionConstraints>>,
}

impl StickyNode {
    pub fn new(base: ScrollingTreeNodeBase) -> Self {
        Self {
            base,
            constraints: RwLock::new(None),
        }
    }

    pub fn constraints(&self) -> Option<StickyPositionConstraints> {
        self.constraints.read().clone()
    }
}

impl ScrollingTreeNode for StickyNode {
    fn base(&self) -> &ScrollingTreeNodeBase {
        &self.base
    }

    fn commit_state(&self, properties: &ScrollingStateNodeProperties) {
        if let ScrollingStateNodeProperties::Sticky(constraints) = properties {
            *self.constraints.write() = Some(constraints.clone());
        }
    }
}

/// A positioned layer whose containing block is outside some overflow-scrolling nodes it
/// is nested in, so it must not move with them.
#[derive(Debug)]
pub struct PositionedNode {
    base: ScrollingTreeNodeBase,
    related_overflow_scrolling_nodes: RwLock<Vec<ScrollingNodeId>>,
}

impl PositionedNode {
    pub fn new(base: ScrollingTreeNodeBase) -> Self {
        Self {
            base,
            related_overflow_scrolling_nodes: RwLock::new(Vec::new()),
        }
    }

    pub fn related_overflow_scrolling_nodes(&self) -> Vec<ScrollingNodeId> {
        self.related_overflow_scrolling_nodes.read().clone()
    }
}

impl ScrollingTreeNode for PositionedNode {
    fn base(&self) -> &ScrollingTreeNodeBase {
        &self.base
    }

    fn commit_state(&self, properties: &ScrollingStateNodeProperties) {
        if let ScrollingStateNodeProperties::Positioned {
            related_overflow_scrolling_nodes,
        } = properties
        {
            *self.related_overflow_scrolling_nodes.write() =
                related_overflow_scrolling_nodes.clone();
        }
    }
}
