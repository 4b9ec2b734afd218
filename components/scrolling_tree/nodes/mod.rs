/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The concrete node variants. Frame-scrolling and overflow-scrolling nodes come in one
//! flavor per [`crate::PlatformInputModel`]; every other role has a single implementation.

mod frame_hosting;
mod frame_scrolling;
mod overflow_scroll_proxy;
mod pointer;
mod positioning;
mod touch;

pub use frame_hosting::FrameHostingNode;
pub use frame_scrolling::FrameScrollingNodeState;
pub use overflow_scroll_proxy::OverflowScrollProxyNode;
pub use pointer::{PointerFrameScrollingNode, PointerOverflowScrollingNode, ScrollbarHoverState};
pub use positioning::{FixedNode, PositionedNode, StickyNode};
pub use touch::{TouchFrameScrollingNode, TouchOverflowScrollingNode, TouchScrollingDelegate};
