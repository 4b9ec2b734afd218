/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The UI-process side of asynchronous scrolling.
//!
//! A [`RemoteScrollingTree`] mirrors the scrollable regions of a document living in a
//! content process. Layout commits [`ScrollingTreeUpdate`]s describing that hierarchy, and
//! the compositor's input handling drives the resulting nodes directly. Whatever the nodes
//! decide is reported to a [`ScrollingCoordinator`], which relays it back to content.
//!
//! [`ScrollingTreeUpdate`]: scrolling_tree_traits::ScrollingTreeUpdate
//! [`ScrollingCoordinator`]: scrolling_tree_traits::ScrollingCoordinator

#![deny(unsafe_code)]

mod factory;
mod node;
pub mod nodes;
mod platform;
mod prefs;
mod proxy;
mod tree;

pub use factory::ScrollingNodeFactory;
pub use node::{
    ScrollableArea, ScrollingTreeFrameScrollingNode, ScrollingTreeNode, ScrollingTreeNodeBase,
    ScrollingTreeNodeRef, ScrollingTreeScrollingNode,
};
pub use platform::{
    DirectTouchNodeProvider, IndirectPointerNodeProvider, PlatformInputModel,
    PlatformScrollingNodeProvider,
};
pub use prefs::Preferences;
pub use proxy::{ScrollingCoordinatorProxy, ScrollingTreeMessage};
pub use tree::{RemoteScrollingTree, ScrollingTreeLifecycle};
