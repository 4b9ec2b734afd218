/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use parking_lot::RwLock;
use scrolling_tree_traits::{ScrollingNodeId, ScrollingStateNodeProperties};

use crate::node::{ScrollingTreeNode, ScrollingTreeNodeBase};

/// Stands in for an overflow-scrolling node in a part of the hierarchy where content is
/// moved by that node's scrolling without being its descendant in the layer tree.
#[derive(Debug)]
pub struct OverflowScrollProxyNode {
    base: ScrollingTreeNodeBase,
    overflow_scrolling_node: RwLock<Option<ScrollingNodeId>>,
}

impl OverflowScrollProxyNode {
    pub fn new(base: ScrollingTreeNodeBase) -> Self {
        Self {
            base,
            overflow_scrolling_node: RwLock::new(None),
        }
    }

    /// The overflow-scrolling node this proxy follows.
    pub fn overflow_scrolling_node(&self) -> Option<ScrollingNodeId> {
        *self.overflow_scrolling_node.read()
    }
}

impl ScrollingTreeNode for OverflowScrollProxyNode {
    fn base(&self) -> &ScrollingTreeNodeBase {
        &self.base
    }

    fn commit_state(&self, properties: &ScrollingStateNodeProperties) {
        if let ScrollingStateNodeProperties::OverflowScrollProxy {
            overflow_scrolling_node,
        } = properties
        {
            *self.overflow_scrolling_node.write() = Some(*overflow_scrolling_node);
        }
    }
}
