/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Structural updates sent from the content process to the UI-process scrolling tree.

use serde::{Deserialize, Serialize};

use crate::{
    LayoutPoint, LayoutRect, LayoutSize, LayoutVector2D, ScrollingNodeId, ScrollingNodeType,
    UnknownScrollingNodeType,
};

/// The geometry of a scrollable area as of the last layout.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ScrollableAreaParameters {
    pub scroll_container_size: LayoutSize,
    pub contents_size: LayoutSize,
    pub horizontal_snap_offsets: Vec<f32>,
    pub vertical_snap_offsets: Vec<f32>,
}

impl ScrollableAreaParameters {
    pub fn new(scroll_container_size: LayoutSize, contents_size: LayoutSize) -> Self {
        Self {
            scroll_container_size,
            contents_size,
            ..Default::default()
        }
    }

    /// The largest scroll position this area can reach. Never negative.
    pub fn max_scroll_position(&self) -> LayoutPoint {
        LayoutPoint::new(
            (self.contents_size.width - self.scroll_container_size.width).max(0.),
            (self.contents_size.height - self.scroll_container_size.height).max(0.),
        )
    }

    pub fn scrolls_horizontally(&self) -> bool {
        self.contents_size.width > self.scroll_container_size.width
    }

    pub fn scrolls_vertically(&self) -> bool {
        self.contents_size.height > self.scroll_container_size.height
    }
}

/// Where a `position: fixed` layer was placed relative to its viewport at the last layout.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct FixedPositionConstraints {
    pub viewport_rect_at_last_layout: LayoutRect,
    pub layer_position_at_last_layout: LayoutPoint,
}

/// Where a `position: sticky` layer was placed relative to its constraining rect at the last
/// layout.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct StickyPositionConstraints {
    pub constraining_rect_at_last_layout: LayoutRect,
    pub sticky_offset_at_last_layout: LayoutVector2D,
    pub layer_position_at_last_layout: LayoutPoint,
}

/// The per-type state of a node. Each variant is only meaningful for some node types; see
/// [`ScrollingStateNodeProperties::applies_to`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum ScrollingStateNodeProperties {
    FrameScrolling {
        scrollable_area: ScrollableAreaParameters,
        layout_viewport: LayoutRect,
        min_layout_viewport_origin: LayoutPoint,
        max_layout_viewport_origin: LayoutPoint,
    },
    OverflowScrolling {
        scrollable_area: ScrollableAreaParameters,
    },
    FrameHosting,
    OverflowScrollProxy {
        overflow_scrolling_node: ScrollingNodeId,
    },
    Fixed(FixedPositionConstraints),
    Sticky(StickyPositionConstraints),
    Positioned {
        related_overflow_scrolling_nodes: Vec<ScrollingNodeId>,
    },
}

impl ScrollingStateNodeProperties {
    /// Frame-scrolling properties whose layout viewport starts at the origin and covers the
    /// scroll container, free to move anywhere in the scrollable range.
    pub fn frame_scrolling(scrollable_area: ScrollableAreaParameters) -> Self {
        let max_layout_viewport_origin = scrollable_area.max_scroll_position();
        Self::FrameScrolling {
            layout_viewport: LayoutRect::new(
                LayoutPoint::zero(),
                scrollable_area.scroll_container_size,
            ),
            min_layout_viewport_origin: LayoutPoint::zero(),
            max_layout_viewport_origin,
            scrollable_area,
        }
    }

    pub fn overflow_scrolling(scrollable_area: ScrollableAreaParameters) -> Self {
        Self::OverflowScrolling { scrollable_area }
    }

    pub fn applies_to(&self, node_type: ScrollingNodeType) -> bool {
        match self {
            Self::FrameScrolling { .. } => node_type.is_frame_scrolling(),
            Self::OverflowScrolling { .. } => node_type == ScrollingNodeType::Overflow,
            Self::FrameHosting => node_type == ScrollingNodeType::FrameHosting,
            Self::OverflowScrollProxy { .. } => node_type == ScrollingNodeType::OverflowProxy,
            Self::Fixed(..) => node_type == ScrollingNodeType::Fixed,
            Self::Sticky(..) => node_type == ScrollingNodeType::Sticky,
            Self::Positioned { .. } => node_type == ScrollingNodeType::Positioned,
        }
    }
}

/// The committed state of one node. `properties` is `None` when only the node's place in
/// the hierarchy changed.
///
/// The node type is kept as its raw tag so that an update from a content process with a
/// different idea of the node types still decodes; the tree resolves it when committing.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ScrollingStateNode {
    pub id: ScrollingNodeId,
    pub node_type_tag: u8,
    pub parent: Option<ScrollingNodeId>,
    pub properties: Option<ScrollingStateNodeProperties>,
}

impl ScrollingStateNode {
    pub fn new(id: ScrollingNodeId, node_type: ScrollingNodeType) -> Self {
        Self::with_node_type_tag(id, node_type.tag())
    }

    pub fn with_node_type_tag(id: ScrollingNodeId, node_type_tag: u8) -> Self {
        Self {
            id,
            node_type_tag,
            parent: None,
            properties: None,
        }
    }

    pub fn node_type(&self) -> Result<ScrollingNodeType, UnknownScrollingNodeType> {
        ScrollingNodeType::try_from(self.node_type_tag)
    }

    pub fn with_parent(mut self, parent: ScrollingNodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_properties(mut self, properties: ScrollingStateNodeProperties) -> Self {
        self.properties = Some(properties);
        self
    }
}

/// A batch of structural changes. Removals are applied first, then `nodes` in order, so a
/// parent must appear before its children.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ScrollingTreeUpdate {
    pub root_node: Option<ScrollingNodeId>,
    pub nodes: Vec<ScrollingStateNode>,
    pub removed_nodes: Vec<ScrollingNodeId>,
}

impl ScrollingTreeUpdate {
    pub fn with_root(mut self, root_node: ScrollingNodeId) -> Self {
        self.root_node = Some(root_node);
        self
    }

    pub fn with_node(mut self, node: ScrollingStateNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_removed_node(mut self, node_id: ScrollingNodeId) -> Self {
        self.removed_nodes.push(node_id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.root_node.is_none() && self.nodes.is_empty() && self.removed_nodes.is_empty()
    }
}
