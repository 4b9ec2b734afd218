/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use scrolling_tree_traits::ScrollingStateNodeProperties;

use crate::node::{ScrollingTreeNode, ScrollingTreeNodeBase};

/// The boundary between a frame and the subframe document it hosts. Its only job is to
/// connect the subframe's scrolling nodes to the hosting document's hierarchy.
#[derive(Debug)]
pub struct FrameHostingNode {
    base: ScrollingTreeNodeBase,
}

impl FrameHostingNode {
    pub fn new(base: ScrollingTreeNodeBase) -> Self {
        Self { base }
    }
}

impl ScrollingTreeNode for FrameHostingNode {
    fn base(&self) -> &ScrollingTreeNodeBase {
        &self.base
    }

    fn commit_state(&self, _properties: &ScrollingStateNodeProperties) {}
}
