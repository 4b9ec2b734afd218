/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Scrolling nodes for the direct-touch input model. These are driven by the platform's
//! own gesture recognizers, so besides scroll positions they report the lifecycle of the
//! user's pan and scroll gestures.

use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;
use scrolling_tree_traits::ScrollingStateNodeProperties;

use crate::node::{
    ScrollableArea, ScrollingTreeFrameScrollingNode, ScrollingTreeNode, ScrollingTreeNodeBase,
    ScrollingTreeScrollingNode,
};
use crate::nodes::FrameScrollingNodeState;
use crate::platform::PlatformInputModel;

/// Tracks whether a user scroll gesture is in progress on one node and reports gesture
/// boundaries to the tree.
#[derive(Debug, Default)]
pub struct TouchScrollingDelegate {
    user_scroll_in_progress: AtomicBool,
}

impl TouchScrollingDelegate {
    pub fn user_scroll_in_progress(&self) -> bool {
        self.user_scroll_in_progress.load(Ordering::SeqCst)
    }

    /// A pan gesture was recognized on `node` but has not moved it yet.
    pub fn pan_gesture_will_begin(&self, node: &dyn ScrollingTreeNode) {
        if let Some(tree) = node.base().scrolling_tree() {
            tree.scrolling_tree_node_will_start_pan_gesture(node.id());
        }
    }

    pub fn scroll_will_start(&self, node: &dyn ScrollingTreeNode) {
        if self.user_scroll_in_progress.swap(true, Ordering::SeqCst) {
            debug!("Node {} started a scroll while already scrolling", node.id());
            return;
        }
        if let Some(tree) = node.base().scrolling_tree() {
            tree.scrolling_tree_node_will_start_scroll(node.id());
        }
    }

    /// Ends the current scroll gesture. Only the first call after
    /// [`Self::scroll_will_start`] reports anything.
    pub fn scroll_did_end(&self, node: &dyn ScrollingTreeNode) {
        if !self.user_scroll_in_progress.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(tree) = node.base().scrolling_tree() {
            tree.scrolling_tree_node_did_end_scroll(node.id());
        }
    }
}

#[derive(Debug)]
pub struct TouchFrameScrollingNode {
    base: ScrollingTreeNodeBase,
    frame: FrameScrollingNodeState,
    delegate: TouchScrollingDelegate,
}

impl TouchFrameScrollingNode {
    pub fn new(base: ScrollingTreeNodeBase) -> Self {
        Self {
            base,
            frame: FrameScrollingNodeState::default(),
            delegate: TouchScrollingDelegate::default(),
        }
    }
}

impl ScrollingTreeNode for TouchFrameScrollingNode {
    fn base(&self) -> &ScrollingTreeNodeBase {
        &self.base
    }

    fn commit_state(&self, properties: &ScrollingStateNodeProperties) {
        self.frame.commit(properties);
    }

    fn input_model(&self) -> Option<PlatformInputModel> {
        Some(PlatformInputModel::DirectTouch)
    }

    fn as_scrolling_node(&self) -> Option<&dyn ScrollingTreeScrollingNode> {
        Some(self)
    }

    fn as_frame_scrolling_node(&self) -> Option<&dyn ScrollingTreeFrameScrollingNode> {
        Some(self)
    }
}

impl ScrollingTreeScrollingNode for TouchFrameScrollingNode {
    fn scrollable_area(&self) -> &ScrollableArea {
        self.frame.scrollable_area()
    }

    fn did_change_scroll_position(&self) {
        self.frame.update_layout_viewport();
    }

    fn touch_delegate(&self) -> Option<&TouchScrollingDelegate> {
        Some(&self.delegate)
    }
}

impl ScrollingTreeFrameScrollingNode for TouchFrameScrollingNode {
    fn frame_state(&self) -> &FrameScrollingNodeState {
        &self.frame
    }
}

#[derive(Debug)]
pub struct TouchOverflowScrollingNode {
    base: ScrollingTreeNodeBase,
    scrollable_area: ScrollableArea,
    delegate: TouchScrollingDelegate,
}

impl TouchOverflowScrollingNode {
    pub fn new(base: ScrollingTreeNodeBase) -> Self {
        Self {
            base,
            scrollable_area: ScrollableArea::default(),
            delegate: TouchScrollingDelegate::default(),
        }
    }
}

impl ScrollingTreeNode for TouchOverflowScrollingNode {
    fn base(&self) -> &ScrollingTreeNodeBase {
        &self.base
    }

    fn commit_state(&self, properties: &ScrollingStateNodeProperties) {
        if let ScrollingStateNodeProperties::OverflowScrolling { scrollable_area } = properties {
            self.scrollable_area.commit(scrollable_area);
        }
    }

    fn input_model(&self) -> Option<PlatformInputModel> {
        Some(PlatformInputModel::DirectTouch)
    }

    fn as_scrolling_node(&self) -> Option<&dyn ScrollingTreeScrollingNode> {
        Some(self)
    }
}

impl ScrollingTreeScrollingNode for TouchOverflowScrollingNode {
    fn scrollable_area(&self) -> &ScrollableArea {
        &self.scrollable_area
    }

    fn touch_delegate(&self) -> Option<&TouchScrollingDelegate> {
        Some(&self.delegate)
    }
}
