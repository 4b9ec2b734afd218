/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Platform specializations of the scrolling roles that need input-model specific glue.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::node::{ScrollingTreeNodeBase, ScrollingTreeNodeRef};
use crate::nodes::{
    PointerFrameScrollingNode, PointerOverflowScrollingNode, TouchFrameScrollingNode,
    TouchOverflowScrollingNode,
};

/// How the user drives scrolling on the platform hosting the tree.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformInputModel {
    /// A mouse or trackpad: wheel events with phases, pointer hover over scrollbars.
    IndirectPointer,
    /// A touch screen: scrolling is driven by pan gestures.
    DirectTouch,
}

impl PlatformInputModel {
    /// The input model of the platform this build targets.
    pub fn platform_default() -> Self {
        if cfg!(any(target_os = "ios", target_os = "android")) {
            Self::DirectTouch
        } else {
            Self::IndirectPointer
        }
    }

    pub fn node_provider(self) -> Arc<dyn PlatformScrollingNodeProvider> {
        match self {
            Self::IndirectPointer => Arc::new(IndirectPointerNodeProvider),
            Self::DirectTouch => Arc::new(DirectTouchNodeProvider),
        }
    }
}

/// Constructors for the frame-scrolling and overflow-scrolling roles. The node factory
/// delegates those two roles to whichever provider it was built with.
pub trait PlatformScrollingNodeProvider: Send + Sync {
    fn input_model(&self) -> PlatformInputModel;

    /// Builds a `MainFrame` or `Subframe` node; `base` already carries the type.
    fn create_frame_scrolling_node(&self, base: ScrollingTreeNodeBase) -> ScrollingTreeNodeRef;

    fn create_overflow_scrolling_node(&self, base: ScrollingTreeNodeBase) -> ScrollingTreeNodeRef;
}

pub struct IndirectPointerNodeProvider;

impl PlatformScrollingNodeProvider for IndirectPointerNodeProvider {
    fn input_model(&self) -> PlatformInputModel {
        PlatformInputModel::IndirectPointer
    }

    fn create_frame_scrolling_node(&self, base: ScrollingTreeNodeBase) -> ScrollingTreeNodeRef {
        Arc::new(PointerFrameScrollingNode::new(base))
    }

    fn create_overflow_scrolling_node(&self, base: ScrollingTreeNodeBase) -> ScrollingTreeNodeRef {
        Arc::new(PointerOverflowScrollingNode::new(base))
    }
}

pub struct DirectTouchNodeProvider;

impl PlatformScrollingNodeProvider for DirectTouchNodeProvider {
    fn input_model(&self) -> PlatformInputModel {
        PlatformInputModel::DirectTouch
    }

    fn create_frame_scrolling_node(&self, base: ScrollingTreeNodeBase) -> ScrollingTreeNodeRef {
        Arc::new(TouchFrameScrollingNode::new(base))
    }

    fn create_overflow_scrolling_node(&self, base: ScrollingTreeNodeBase) -> ScrollingTreeNodeRef {
        Arc::new(TouchOverflowScrollingNode::new(base))
    }
}
