/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

#![deny(unsafe_code)]

//! The interface to the `scrolling_tree` crate.
//!
//! These types are shared between the UI-process scrolling tree, the coordinator that owns
//! it, and the content process that produces structural updates for it. Anything that has
//! to cross the process boundary is `Serialize`/`Deserialize`.

mod update;

use std::fmt;

use euclid::{Point2D, Rect, Size2D, Vector2D};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

pub use crate::update::{
    FixedPositionConstraints, ScrollableAreaParameters, ScrollingStateNode,
    ScrollingStateNodeProperties, ScrollingTreeUpdate, StickyPositionConstraints,
};

/// A unit for coordinates in the coordinate space of a scrolled document, before any
/// scroll offset or device scale has been applied.
#[derive(Clone, Copy, Debug)]
pub enum LayoutPixel {}

pub type LayoutPoint = Point2D<f32, LayoutPixel>;
pub type LayoutSize = Size2D<f32, LayoutPixel>;
pub type LayoutRect = Rect<f32, LayoutPixel>;
pub type LayoutVector2D = Vector2D<f32, LayoutPixel>;

/// Identifies one scrollable or position-affected region of a document. Ids are allocated
/// by the content process and are unique within one scrolling tree.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ScrollingNodeId(pub u64);

impl fmt::Display for ScrollingNodeId {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

/// The role a node plays in the scrolling tree. A node never changes its type; a type
/// change in the content process replaces the node. Serialized as its [tag](Self::tag).
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, IntoStaticStr, Ord, PartialEq, PartialOrd, Serialize,
)]
#[repr(u8)]
#[serde(into = "u8", try_from = "u8")]
pub enum ScrollingNodeType {
    MainFrame = 0,
    Subframe = 1,
    FrameHosting = 2,
    Overflow = 3,
    OverflowProxy = 4,
    Fixed = 5,
    Sticky = 6,
    Positioned = 7,
}

impl ScrollingNodeType {
    pub const ALL: [ScrollingNodeType; 8] = [
        ScrollingNodeType::MainFrame,
        ScrollingNodeType::Subframe,
        ScrollingNodeType::FrameHosting,
        ScrollingNodeType::Overflow,
        ScrollingNodeType::OverflowProxy,
        ScrollingNodeType::Fixed,
        ScrollingNodeType::Sticky,
        ScrollingNodeType::Positioned,
    ];

    /// Whether this node scrolls a whole frame and therefore has a layout viewport.
    pub fn is_frame_scrolling(self) -> bool {
        matches!(self, Self::MainFrame | Self::Subframe)
    }

    /// Whether nodes of this type own a scroll position.
    pub fn is_scrolling(self) -> bool {
        self.is_frame_scrolling() || self == Self::Overflow
    }

    /// The tag used for this type on the wire.
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        self.into()
    }
}

impl From<ScrollingNodeType> for u8 {
    fn from(node_type: ScrollingNodeType) -> u8 {
        node_type.tag()
    }
}

impl TryFrom<u8> for ScrollingNodeType {
    type Error = UnknownScrollingNodeType;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|node_type| node_type.tag() == tag)
            .ok_or(UnknownScrollingNodeType(tag))
    }
}

/// A wire tag that does not name any [`ScrollingNodeType`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UnknownScrollingNodeType(pub u8);

impl fmt::Display for UnknownScrollingNodeType {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "unknown scrolling node type tag {}", self.0)
    }
}

impl std::error::Error for UnknownScrollingNodeType {}

/// How the coordinator should move the scrolled layer after a node reports a new position.
#[derive(Clone, Copy, Debug, Deserialize, Eq, IntoStaticStr, PartialEq, Serialize)]
pub enum ScrollPositionUpdatePolicy {
    /// Move the layer to exactly the reported position.
    Set,
    /// Move the layer, but the position is not final (for instance mid-animation).
    SetApproximate,
    /// The layer was already moved; only synchronize the recorded position.
    Sync,
}

/// The index of the active snap point along one axis.
pub type SnapPointIndex = u32;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub enum ScrollRequestType {
    /// Scroll to an absolute position.
    PositionUpdate(LayoutPoint),
    /// Scroll by a relative amount.
    DeltaUpdate(LayoutVector2D),
    /// Stop any animated scroll in progress.
    CancelAnimatedScroll,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ScrollType {
    User,
    Programmatic,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ScrollClamping {
    Clamped,
    Unclamped,
}

/// A scroll that a node would like to perform. The tree never applies these itself; the
/// coordinator decides whether and how to honor them.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct RequestedScrollData {
    pub request_type: ScrollRequestType,
    pub scroll_type: ScrollType,
    pub clamping: ScrollClamping,
    pub animated: bool,
}

impl RequestedScrollData {
    pub fn position_update(position: LayoutPoint, scroll_type: ScrollType) -> Self {
        Self {
            request_type: ScrollRequestType::PositionUpdate(position),
            scroll_type,
            clamping: ScrollClamping::Clamped,
            animated: false,
        }
    }

    pub fn delta_update(delta: LayoutVector2D, scroll_type: ScrollType) -> Self {
        Self {
            request_type: ScrollRequestType::DeltaUpdate(delta),
            scroll_type,
            clamping: ScrollClamping::Clamped,
            animated: false,
        }
    }

    pub fn cancel_animated_scroll() -> Self {
        Self {
            request_type: ScrollRequestType::CancelAnimatedScroll,
            scroll_type: ScrollType::Programmatic,
            clamping: ScrollClamping::Clamped,
            animated: false,
        }
    }

    pub fn animated(mut self) -> Self {
        self.animated = true;
        self
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, IntoStaticStr, PartialEq, Serialize)]
pub enum MouseEventType {
    Move,
    Down,
    Up,
    Entered,
    Exited,
}

/// A decoded pointer event. `point` is relative to the scroll container of the root node.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct PlatformMouseEvent {
    pub event_type: MouseEventType,
    pub point: LayoutPoint,
}

impl PlatformMouseEvent {
    pub fn new(event_type: MouseEventType, point: LayoutPoint) -> Self {
        Self { event_type, point }
    }
}

/// The phase of a trackpad or momentum wheel gesture.
#[derive(Clone, Copy, Debug, Deserialize, Eq, IntoStaticStr, PartialEq, Serialize)]
pub enum WheelEventPhase {
    None,
    MayBegin,
    Began,
    Changed,
    Stationary,
    Ended,
    Cancelled,
}

/// What the scrolling tree did with an input event handed to it by the compositor loop.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEventResult {
    /// The event was delivered to the root node.
    Dispatched,
    /// The tree has no root node yet (or any more); the event was dropped.
    NoRootNode,
    /// The tree does not handle this kind of event yet; the caller keeps ownership of it.
    NotYetHandled,
}

/// The owner of a scrolling tree. Every notification originating in the tree ends up here.
///
/// Implementations may call back into the tree, including structural operations, from any
/// of these methods: the tree never holds its structural lock while calling them.
pub trait ScrollingCoordinator: Send + Sync {
    /// A node's scroll position changed. `layout_viewport_origin` is only present for
    /// frame-scrolling nodes.
    fn node_did_scroll(
        &self,
        node_id: ScrollingNodeId,
        scroll_position: LayoutPoint,
        layout_viewport_origin: Option<LayoutPoint>,
        policy: ScrollPositionUpdatePolicy,
    );

    fn node_did_stop_animated_scroll(&self, node_id: ScrollingNodeId);

    /// Returns whether the coordinator accepted the request.
    fn node_requests_scroll(&self, node_id: ScrollingNodeId, request: &RequestedScrollData)
    -> bool;

    fn current_snap_point_indices_did_change(
        &self,
        node_id: ScrollingNodeId,
        horizontal: Option<SnapPointIndex>,
        vertical: Option<SnapPointIndex>,
    );

    /// Whether this coordinator wants the touch gesture lifecycle notifications below.
    fn supports_gesture_lifecycle_events(&self) -> bool {
        false
    }

    fn node_will_start_pan_gesture(&self, _node_id: ScrollingNodeId) {}

    fn node_will_start_scroll(&self, _node_id: ScrollingNodeId) {}

    fn node_did_end_scroll(&self, _node_id: ScrollingNodeId) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_type_tags_round_trip() {
        for node_type in ScrollingNodeType::ALL {
            assert_eq!(ScrollingNodeType::try_from(node_type.tag()), Ok(node_type));
        }
        assert_eq!(
            ScrollingNodeType::try_from(42),
            Err(UnknownScrollingNodeType(42))
        );
    }

    #[test]
    fn node_types_are_encoded_as_their_tag() {
        assert_eq!(serde_json::to_string(&ScrollingNodeType::Fixed).unwrap(), "5");
        assert_eq!(
            serde_json::from_str::<ScrollingNodeType>("6").unwrap(),
            ScrollingNodeType::Sticky
        );
        let error = serde_json::from_str::<ScrollingNodeType>("200").unwrap_err();
        assert!(error.to_string().contains("unknown scrolling node type tag 200"));
        assert!(serde_json::from_str::<ScrollingNodeType>("\"Fixed\"").is_err());
    }

    #[test]
    fn only_frames_and_overflow_scroll() {
        let scrolling: Vec<_> = ScrollingNodeType::ALL
            .into_iter()
            .filter(|node_type| node_type.is_scrolling())
            .collect();
        assert_eq!(
            scrolling,
            vec![
                ScrollingNodeType::MainFrame,
                ScrollingNodeType::Subframe,
                ScrollingNodeType::Overflow
            ]
        );
        assert!(!ScrollingNodeType::Overflow.is_frame_scrolling());
        assert_eq!(ScrollingNodeType::OverflowProxy.name(), "OverflowProxy");
    }

    #[test]
    fn requested_scroll_survives_ipc_encoding() {
        let request = RequestedScrollData::delta_update(
            LayoutVector2D::new(0., 120.),
            ScrollType::User,
        )
        .animated();
        let encoded = serde_json::to_string(&request).unwrap();
        let decoded: RequestedScrollData = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, request);
        assert!(decoded.animated);
    }
}
