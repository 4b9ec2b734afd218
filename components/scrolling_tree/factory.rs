/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::sync::{Arc, Weak};

use log::error;
use scrolling_tree_traits::{ScrollingNodeId, ScrollingNodeType};

use crate::node::{ScrollingTreeNodeBase, ScrollingTreeNodeRef};
use crate::nodes::{
    FixedNode, FrameHostingNode, OverflowScrollProxyNode, PositionedNode, StickyNode,
};
use crate::platform::{PlatformInputModel, PlatformScrollingNodeProvider};
use crate::tree::RemoteScrollingTree;

/// Builds the concrete node for a node type. The factory neither deduplicates ids nor
/// registers what it builds; both are the tree's job.
#[derive(Clone)]
pub struct ScrollingNodeFactory {
    platform: Arc<dyn PlatformScrollingNodeProvider>,
}

impl ScrollingNodeFactory {
    pub fn new(platform: Arc<dyn PlatformScrollingNodeProvider>) -> Self {
        Self { platform }
    }

    pub fn input_model(&self) -> PlatformInputModel {
        self.platform.input_model()
    }

    pub fn create_node(
        &self,
        node_type: ScrollingNodeType,
        node_id: ScrollingNodeId,
        scrolling_tree: Weak<RemoteScrollingTree>,
    ) -> ScrollingTreeNodeRef {
        let base = ScrollingTreeNodeBase::new(node_id, node_type, scrolling_tree);
        match node_type {
            ScrollingNodeType::MainFrame | ScrollingNodeType::Subframe => {
                self.platform.create_frame_scrolling_node(base)
            },
            ScrollingNodeType::FrameHosting => Arc::new(FrameHostingNode::new(base)),
            ScrollingNodeType::Overflow => self.platform.create_overflow_scrolling_node(base),
            ScrollingNodeType::OverflowProxy => Arc::new(OverflowScrollProxyNode::new(base)),
            ScrollingNodeType::Fixed => Arc::new(FixedNode::new(base)),
            ScrollingNodeType::Sticky => Arc::new(StickyNode::new(base)),
            ScrollingNodeType::Positioned => Arc::new(PositionedNode::new(base)),
        }
    }

    /// The node type a wire tag stands for. Tags that name no node type resolve to
    /// `Fixed`, which never scrolls or forwards anything.
    pub fn node_type_for_tag(tag: u8) -> ScrollingNodeType {
        ScrollingNodeType::try_from(tag).unwrap_or(ScrollingNodeType::Fixed)
    }

    /// Like [`Self::node_type_for_tag`], but an unknown tag is reported: it means the two
    /// processes disagree about the protocol. Debug builds assert; other builds log and
    /// carry on with the fallback rather than fail on the input path.
    pub fn resolve_node_type_tag(&self, tag: u8, node_id: ScrollingNodeId) -> ScrollingNodeType {
        if let Err(unknown) = ScrollingNodeType::try_from(tag) {
            debug_assert!(false, "{unknown} for node {node_id}");
            error!("{unknown} for node {node_id}, creating a fixed node instead");
        }
        Self::node_type_for_tag(tag)
    }

    /// Like [`Self::create_node`], for a type tag straight off the wire.
    pub fn create_node_for_tag(
        &self,
        tag: u8,
        node_id: ScrollingNodeId,
        scrolling_tree: Weak<RemoteScrollingTree>,
    ) -> ScrollingTreeNodeRef {
        let node_type = self.resolve_node_type_tag(tag, node_id);
        self.create_node(node_type, node_id, scrolling_tree)
    }
}
