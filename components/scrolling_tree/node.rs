/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The node traits of the scrolling tree.
//!
//! Nodes are shared between the tree, which is their only long-term owner, and whatever
//! call stack is currently handling an event for them. All of their mutable state therefore
//! lives behind locks that are never held while calling out of the node.

use std::fmt;
use std::sync::{Arc, Weak};

use log::debug;
use parking_lot::RwLock;
use scrolling_tree_traits::{
    LayoutPoint, LayoutRect, LayoutVector2D, PlatformMouseEvent, RequestedScrollData,
    ScrollClamping, ScrollPositionUpdatePolicy, ScrollableAreaParameters, ScrollingNodeId,
    ScrollingNodeType, ScrollingStateNodeProperties, SnapPointIndex,
};

use crate::nodes::{FrameScrollingNodeState, TouchScrollingDelegate};
use crate::platform::PlatformInputModel;
use crate::tree::RemoteScrollingTree;

pub type ScrollingTreeNodeRef = Arc<dyn ScrollingTreeNode>;

/// Data common to all nodes.
#[derive(Debug)]
pub struct ScrollingTreeNodeBase {
    id: ScrollingNodeId,
    node_type: ScrollingNodeType,
    parent: RwLock<Option<ScrollingNodeId>>,
    children: RwLock<Vec<ScrollingNodeId>>,
    scrolling_tree: Weak<RemoteScrollingTree>,
}

impl ScrollingTreeNodeBase {
    pub fn new(
        id: ScrollingNodeId,
        node_type: ScrollingNodeType,
        scrolling_tree: Weak<RemoteScrollingTree>,
    ) -> Self {
        Self {
            id,
            node_type,
            parent: RwLock::new(None),
            children: RwLock::new(Vec::new()),
            scrolling_tree,
        }
    }

    pub fn id(&self) -> ScrollingNodeId {
        self.id
    }

    pub fn node_type(&self) -> ScrollingNodeType {
        self.node_type
    }

    pub fn parent(&self) -> Option<ScrollingNodeId> {
        *self.parent.read()
    }

    pub fn children(&self) -> Vec<ScrollingNodeId> {
        self.children.read().clone()
    }

    /// The tree this node reports to, unless that tree has already been dropped.
    pub fn scrolling_tree(&self) -> Option<Arc<RemoteScrollingTree>> {
        self.scrolling_tree.upgrade()
    }

    pub(crate) fn set_parent(&self, parent: Option<ScrollingNodeId>) {
        *self.parent.write() = parent;
    }

    pub(crate) fn append_child(&self, child: ScrollingNodeId) {
        let mut children = self.children.write();
        if !children.contains(&child) {
            children.push(child);
        }
    }

    pub(crate) fn remove_child(&self, child: ScrollingNodeId) {
        self.children.write().retain(|id| *id != child);
    }

    pub(crate) fn take_children(&self) -> Vec<ScrollingNodeId> {
        std::mem::take(&mut *self.children.write())
    }

    pub(crate) fn set_children(&self, children: Vec<ScrollingNodeId>) {
        *self.children.write() = children;
    }
}

/// A node of the scrolling tree. Capabilities beyond the common ones are reached through
/// the `as_*` accessors.
pub trait ScrollingTreeNode: fmt::Debug + Send + Sync {
    fn base(&self) -> &ScrollingTreeNodeBase;

    /// Apply state committed by the content process. Callers only pass properties for which
    /// [`ScrollingStateNodeProperties::applies_to`] holds. This never notifies the
    /// coordinator, since it runs with the structural lock held.
    fn commit_state(&self, properties: &ScrollingStateNodeProperties);

    fn id(&self) -> ScrollingNodeId {
        self.base().id()
    }

    fn node_type(&self) -> ScrollingNodeType {
        self.base().node_type()
    }

    /// The platform input model this node was specialized for, if it is platform specific.
    fn input_model(&self) -> Option<PlatformInputModel> {
        None
    }

    fn as_scrolling_node(&self) -> Option<&dyn ScrollingTreeScrollingNode> {
        None
    }

    fn as_frame_scrolling_node(&self) -> Option<&dyn ScrollingTreeFrameScrollingNode> {
        None
    }

    /// Pointer motion routed to this node by the tree. Returns true if the node's state
    /// changed in response.
    fn handle_mouse_event(&self, _event: &PlatformMouseEvent) -> bool {
        false
    }
}

#[derive(Clone, Debug, Default)]
struct ScrollableAreaState {
    parameters: ScrollableAreaParameters,
    scroll_position: LayoutPoint,
    horizontal_snap_index: Option<SnapPointIndex>,
    vertical_snap_index: Option<SnapPointIndex>,
}

impl ScrollableAreaState {
    fn clamp(&self, position: LayoutPoint) -> LayoutPoint {
        let max = self.parameters.max_scroll_position();
        LayoutPoint::new(
            position.x.max(0.).min(max.x),
            position.y.max(0.).min(max.y),
        )
    }
}

/// The scroll range and position of a scrolling node.
#[derive(Debug, Default)]
pub struct ScrollableArea {
    state: RwLock<ScrollableAreaState>,
}

impl ScrollableArea {
    pub fn parameters(&self) -> ScrollableAreaParameters {
        self.state.read().parameters.clone()
    }

    pub fn current_scroll_position(&self) -> LayoutPoint {
        self.state.read().scroll_position
    }

    pub fn max_scroll_position(&self) -> LayoutPoint {
        self.state.read().parameters.max_scroll_position()
    }

    pub fn current_snap_point_indices(&self) -> (Option<SnapPointIndex>, Option<SnapPointIndex>) {
        let state = self.state.read();
        (state.horizontal_snap_index, state.vertical_snap_index)
    }

    /// Install new geometry. The current position is pulled back into the new range.
    pub(crate) fn commit(&self, parameters: &ScrollableAreaParameters) {
        let mut state = self.state.write();
        state.parameters = parameters.clone();
        state.scroll_position = state.clamp(state.scroll_position);
    }

    /// Returns whether the position actually changed.
    pub(crate) fn set_scroll_position(
        &self,
        position: LayoutPoint,
        clamping: ScrollClamping,
    ) -> bool {
        let mut state = self.state.write();
        let position = match clamping {
            ScrollClamping::Clamped => state.clamp(position),
            ScrollClamping::Unclamped => position,
        };
        if state.scroll_position == position {
            return false;
        }
        state.scroll_position = position;
        true
    }

    pub(crate) fn set_snap_point_indices(
        &self,
        horizontal: Option<SnapPointIndex>,
        vertical: Option<SnapPointIndex>,
    ) -> bool {
        let mut state = self.state.write();
        if state.horizontal_snap_index == horizontal && state.vertical_snap_index == vertical {
            return false;
        }
        state.horizontal_snap_index = horizontal;
        state.vertical_snap_index = vertical;
        true
    }
}

/// A node that owns a scroll position: frame-scrolling and overflow-scrolling nodes.
///
/// The provided methods are the sources of the tree's outgoing notifications. Each of them
/// updates the node first and only then reports to the tree, with no lock held.
pub trait ScrollingTreeScrollingNode: ScrollingTreeNode {
    fn scrollable_area(&self) -> &ScrollableArea;

    /// Called after the scroll position changed and before the tree is told about it.
    fn did_change_scroll_position(&self) {}

    /// Touch gesture bookkeeping, present on nodes built for the direct-touch model.
    fn touch_delegate(&self) -> Option<&TouchScrollingDelegate> {
        None
    }

    fn current_scroll_position(&self) -> LayoutPoint {
        self.scrollable_area().current_scroll_position()
    }

    /// Scroll to `position`, clamped to the scrollable range. Returns whether the node
    /// moved; the tree is only notified if it did.
    fn scroll_to(&self, position: LayoutPoint, policy: ScrollPositionUpdatePolicy) -> bool {
        if !self
            .scrollable_area()
            .set_scroll_position(position, ScrollClamping::Clamped)
        {
            return false;
        }
        self.did_change_scroll_position();
        match self.base().scrolling_tree() {
            Some(tree) => tree.scrolling_tree_node_did_scroll(self, policy),
            None => debug!("Node {} scrolled after its tree went away", self.id()),
        }
        true
    }

    fn scroll_by(&self, delta: LayoutVector2D, policy: ScrollPositionUpdatePolicy) -> bool {
        self.scroll_to(self.current_scroll_position() + delta, policy)
    }

    fn stop_animated_scroll(&self) {
        if let Some(tree) = self.base().scrolling_tree() {
            tree.scrolling_tree_node_did_stop_animated_scroll(self);
        }
    }

    /// Ask the coordinator to perform a scroll on this node's behalf. The node does not move
    /// until the coordinator acts on the request.
    fn request_scroll(&self, request: &RequestedScrollData) -> bool {
        match self.base().scrolling_tree() {
            Some(tree) => tree.scrolling_tree_node_requests_scroll(self.id(), request),
            None => false,
        }
    }

    fn set_current_snap_point_indices(
        &self,
        horizontal: Option<SnapPointIndex>,
        vertical: Option<SnapPointIndex>,
    ) {
        if !self
            .scrollable_area()
            .set_snap_point_indices(horizontal, vertical)
        {
            return;
        }
        if let Some(tree) = self.base().scrolling_tree() {
            tree.current_snap_point_indices_did_change(self.id(), horizontal, vertical);
        }
    }
}

/// A node scrolling a whole document, which additionally tracks a layout viewport.
pub trait ScrollingTreeFrameScrollingNode: ScrollingTreeScrollingNode {
    fn frame_state(&self) -> &FrameScrollingNodeState;

    fn layout_viewport(&self) -> LayoutRect {
        self.frame_state().layout_viewport()
    }
}
