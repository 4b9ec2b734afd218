/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::fmt::Write;
use std::sync::{Arc, Weak};

use log::{debug, warn};
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use scrolling_tree_traits::{
    InputEventResult, LayoutPoint, PlatformMouseEvent, RequestedScrollData,
    ScrollPositionUpdatePolicy, ScrollingCoordinator, ScrollingNodeId, ScrollingStateNode,
    ScrollingTreeUpdate, SnapPointIndex, WheelEventPhase,
};
use strum::IntoStaticStr;

use crate::factory::ScrollingNodeFactory;
use crate::node::{ScrollingTreeNodeRef, ScrollingTreeScrollingNode};
use crate::platform::{PlatformInputModel, PlatformScrollingNodeProvider};
use crate::prefs::Preferences;

#[derive(Clone, Copy, Debug, Eq, IntoStaticStr, PartialEq)]
pub enum ScrollingTreeLifecycle {
    /// No nodes have been committed, or the last update removed all of them.
    Empty,
    Populated,
    /// The tree has been torn down and ignores further updates.
    Invalidated,
}

/// Everything guarded by the structural lock.
struct ScrollingTreeState {
    nodes: FxHashMap<ScrollingNodeId, ScrollingTreeNodeRef>,
    root_node_id: Option<ScrollingNodeId>,
    lifecycle: ScrollingTreeLifecycle,
}

impl ScrollingTreeState {
    /// Remove `node_id` and everything below it. Detached nodes are collected in
    /// `removed_nodes` so that they are dropped once the lock is released.
    fn remove_subtree(
        &mut self,
        node_id: ScrollingNodeId,
        removed_nodes: &mut Vec<ScrollingTreeNodeRef>,
    ) {
        let Some(node) = self.nodes.get(&node_id) else {
            debug!("Removing unknown scrolling node {node_id}");
            return;
        };
        if let Some(parent) = node.base().parent().and_then(|id| self.nodes.get(&id)) {
            parent.base().remove_child(node_id);
        }

        let mut pending = vec![node_id];
        while let Some(node_id) = pending.pop() {
            // A node already gone means the hierarchy looped back on itself.
            let Some(node) = self.nodes.remove(&node_id) else {
                continue;
            };
            if self.root_node_id == Some(node_id) {
                self.root_node_id = None;
            }
            pending.extend(node.base().take_children());
            removed_nodes.push(node);
        }
    }

    /// Detach `node` from its current parent and attach it to `new_parent`, if that node
    /// exists.
    fn reparent(&self, node: &ScrollingTreeNodeRef, new_parent: Option<ScrollingNodeId>) {
        let node_id = node.id();
        let old_parent = node.base().parent();
        if old_parent == new_parent {
            return;
        }
        if let Some(parent) = old_parent.and_then(|id| self.nodes.get(&id)) {
            parent.base().remove_child(node_id);
        }
        node.base().set_parent(None);

        let Some(parent_id) = new_parent else {
            return;
        };
        if parent_id == node_id {
            warn!("Scrolling node {node_id} cannot be its own parent");
            return;
        }
        match self.nodes.get(&parent_id) {
            Some(parent) => {
                parent.base().append_child(node_id);
                node.base().set_parent(Some(parent_id));
            },
            None => warn!("Scrolling node {node_id} has unknown parent {parent_id}, detaching it"),
        }
    }
}

/// The UI-side mirror of a content document's scrolling hierarchy.
///
/// Structural changes happen under a single lock that is only ever held for bookkeeping.
/// Nodes are handed out as `Arc`s and report back through a weak reference, so every call
/// into a node's event handling or into the coordinator happens with the lock released.
pub struct RemoteScrollingTree {
    coordinator: Arc<dyn ScrollingCoordinator>,
    node_factory: ScrollingNodeFactory,
    dump_scrolling_tree: bool,
    tree_lock: Mutex<ScrollingTreeState>,
    weak_self: Weak<RemoteScrollingTree>,
}

impl RemoteScrollingTree {
    pub fn new(coordinator: Arc<dyn ScrollingCoordinator>, preferences: &Preferences) -> Arc<Self> {
        Self::new_with_node_provider(
            coordinator,
            preferences.input_model.node_provider(),
            preferences,
        )
    }

    pub fn new_with_node_provider(
        coordinator: Arc<dyn ScrollingCoordinator>,
        node_provider: Arc<dyn PlatformScrollingNodeProvider>,
        preferences: &Preferences,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak_self| Self {
            coordinator,
            node_factory: ScrollingNodeFactory::new(node_provider),
            dump_scrolling_tree: preferences.dump_scrolling_tree,
            tree_lock: Mutex::new(ScrollingTreeState {
                nodes: FxHashMap::default(),
                root_node_id: None,
                lifecycle: ScrollingTreeLifecycle::Empty,
            }),
            weak_self: weak_self.clone(),
        })
    }

    pub fn input_model(&self) -> PlatformInputModel {
        self.node_factory.input_model()
    }

    pub fn lifecycle(&self) -> ScrollingTreeLifecycle {
        self.tree_lock.lock().lifecycle
    }

    /// Apply a structural update from the content process. Returns false if the update
    /// was ignored because the tree has been invalidated.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "RemoteScrollingTree::commit_tree_state",
            skip_all,
            level = "trace",
        )
    )]
    pub fn commit_tree_state(&self, update: ScrollingTreeUpdate) -> bool {
        let mut removed_nodes = Vec::new();
        {
            let mut state = self.tree_lock.lock();
            if state.lifecycle == ScrollingTreeLifecycle::Invalidated {
                warn!("Ignoring scrolling tree update after invalidation");
                return false;
            }

            for node_id in update.removed_nodes {
                state.remove_subtree(node_id, &mut removed_nodes);
            }
            for state_node in update.nodes {
                self.commit_node(&mut state, state_node, &mut removed_nodes);
            }
            if let Some(root_node_id) = update.root_node {
                if state.nodes.contains_key(&root_node_id) {
                    state.root_node_id = Some(root_node_id);
                } else {
                    warn!("Ignoring unknown scrolling tree root {root_node_id}");
                }
            }

            state.lifecycle = if state.nodes.is_empty() {
                ScrollingTreeLifecycle::Empty
            } else {
                ScrollingTreeLifecycle::Populated
            };
        }
        drop(removed_nodes);

        if self.dump_scrolling_tree {
            debug!("{}", self.describe());
        }
        true
    }

    fn commit_node(
        &self,
        state: &mut ScrollingTreeState,
        state_node: ScrollingStateNode,
        removed_nodes: &mut Vec<ScrollingTreeNodeRef>,
    ) {
        let node_id = state_node.id;
        let node_type = self
            .node_factory
            .resolve_node_type_tag(state_node.node_type_tag, node_id);
        let node = match state.nodes.get(&node_id).cloned() {
            Some(node) if node.node_type() == node_type => node,
            Some(old_node) => {
                debug!(
                    "Scrolling node {node_id} changed type from {} to {}",
                    old_node.node_type().name(),
                    node_type.name()
                );
                let node = self
                    .node_factory
                    .create_node(node_type, node_id, self.weak_self.clone());
                node.base().set_parent(old_node.base().parent());
                node.base().set_children(old_node.base().take_children());
                state.nodes.insert(node_id, node.clone());
                removed_nodes.push(old_node);
                node
            },
            None => {
                let node = self
                    .node_factory
                    .create_node(node_type, node_id, self.weak_self.clone());
                state.nodes.insert(node_id, node.clone());
                node
            },
        };

        state.reparent(&node, state_node.parent);

        if let Some(properties) = &state_node.properties {
            if properties.applies_to(node_type) {
                node.commit_state(properties);
            } else {
                warn!(
                    "Ignoring mismatched properties for {} node {node_id}",
                    node_type.name()
                );
            }
        }
    }

    /// Drop every node and stop accepting updates. Safe to call more than once and from
    /// any thread.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "RemoteScrollingTree::invalidate", skip_all, level = "trace")
    )]
    pub fn invalidate(&self) {
        let nodes = {
            let mut state = self.tree_lock.lock();
            state.lifecycle = ScrollingTreeLifecycle::Invalidated;
            state.root_node_id = None;
            std::mem::take(&mut state.nodes)
        };
        if !nodes.is_empty() {
            debug!("Invalidated scrolling tree with {} nodes", nodes.len());
        }
    }

    pub fn root_node(&self) -> Option<ScrollingTreeNodeRef> {
        let state = self.tree_lock.lock();
        state
            .root_node_id
            .and_then(|root_node_id| state.nodes.get(&root_node_id).cloned())
    }

    pub fn node_for_id(&self, node_id: ScrollingNodeId) -> Option<ScrollingTreeNodeRef> {
        self.tree_lock.lock().nodes.get(&node_id).cloned()
    }

    /// A snapshot of all nodes, ordered by id.
    pub fn nodes(&self) -> Vec<ScrollingTreeNodeRef> {
        let mut nodes: Vec<_> = self.tree_lock.lock().nodes.values().cloned().collect();
        nodes.sort_by_key(|node| node.id());
        nodes
    }

    pub fn node_count(&self) -> usize {
        self.tree_lock.lock().nodes.len()
    }

    /// Scroll a node on behalf of the input side. Returns whether the node moved.
    pub fn scroll_node_to(
        &self,
        node_id: ScrollingNodeId,
        position: LayoutPoint,
        policy: ScrollPositionUpdatePolicy,
    ) -> bool {
        let Some(node) = self.node_for_id(node_id) else {
            debug!("Cannot scroll unknown node {node_id}");
            return false;
        };
        match node.as_scrolling_node() {
            Some(scrolling_node) => scrolling_node.scroll_to(position, policy),
            None => {
                debug!("Cannot scroll {} node {node_id}", node.node_type().name());
                false
            },
        }
    }

    pub fn scrolling_tree_node_did_scroll<N>(&self, node: &N, policy: ScrollPositionUpdatePolicy)
    where
        N: ScrollingTreeScrollingNode + ?Sized,
    {
        let layout_viewport_origin = node
            .as_frame_scrolling_node()
            .map(|frame_node| frame_node.layout_viewport().origin);
        self.coordinator.node_did_scroll(
            node.id(),
            node.current_scroll_position(),
            layout_viewport_origin,
            policy,
        );
    }

    pub fn scrolling_tree_node_did_stop_animated_scroll<N>(&self, node: &N)
    where
        N: ScrollingTreeScrollingNode + ?Sized,
    {
        self.coordinator.node_did_stop_animated_scroll(node.id());
    }

    /// Returns whether the coordinator accepted the request.
    pub fn scrolling_tree_node_requests_scroll(
        &self,
        node_id: ScrollingNodeId,
        request: &RequestedScrollData,
    ) -> bool {
        self.coordinator.node_requests_scroll(node_id, request)
    }

    pub fn current_snap_point_indices_did_change(
        &self,
        node_id: ScrollingNodeId,
        horizontal: Option<SnapPointIndex>,
        vertical: Option<SnapPointIndex>,
    ) {
        self.coordinator
            .current_snap_point_indices_did_change(node_id, horizontal, vertical);
    }

    pub fn scrolling_tree_node_will_start_pan_gesture(&self, node_id: ScrollingNodeId) {
        if self.forwards_gesture_lifecycle_events("pan gesture start", node_id) {
            self.coordinator.node_will_start_pan_gesture(node_id);
        }
    }

    pub fn scrolling_tree_node_will_start_scroll(&self, node_id: ScrollingNodeId) {
        if self.forwards_gesture_lifecycle_events("scroll start", node_id) {
            self.coordinator.node_will_start_scroll(node_id);
        }
    }

    pub fn scrolling_tree_node_did_end_scroll(&self, node_id: ScrollingNodeId) {
        if self.forwards_gesture_lifecycle_events("scroll end", node_id) {
            self.coordinator.node_did_end_scroll(node_id);
        }
    }

    fn forwards_gesture_lifecycle_events(&self, event: &str, node_id: ScrollingNodeId) -> bool {
        let supported = self.coordinator.supports_gesture_lifecycle_events();
        if !supported {
            debug!("Dropping {event} for node {node_id}");
        }
        supported
    }

    /// Wheel phase transitions are not acted on yet; the caller has to handle the event
    /// itself.
    pub fn handle_wheel_event_phase(
        &self,
        node_id: ScrollingNodeId,
        phase: WheelEventPhase,
    ) -> InputEventResult {
        debug!("Unhandled wheel event phase {phase:?} for node {node_id}");
        InputEventResult::NotYetHandled
    }

    pub fn handle_mouse_event(&self, event: &PlatformMouseEvent) -> InputEventResult {
        let Some(root_node) = self.root_node() else {
            return InputEventResult::NoRootNode;
        };
        root_node.handle_mouse_event(event);
        InputEventResult::Dispatched
    }

    /// An indented dump of the tree, for debugging.
    pub fn describe(&self) -> String {
        let (nodes, root_node_id, lifecycle) = {
            let state = self.tree_lock.lock();
            (state.nodes.clone(), state.root_node_id, state.lifecycle)
        };

        let mut output = String::new();
        let lifecycle: &'static str = lifecycle.into();
        let _ = writeln!(
            output,
            "RemoteScrollingTree ({lifecycle}, {} nodes)",
            nodes.len()
        );

        let mut visited = FxHashSet::default();
        let mut detached: Vec<_> = nodes
            .values()
            .filter(|node| {
                Some(node.id()) != root_node_id &&
                    node.base()
                        .parent()
                        .is_none_or(|parent| !nodes.contains_key(&parent))
            })
            .map(|node| node.id())
            .collect();
        detached.sort();

        for node_id in root_node_id.into_iter().chain(detached) {
            describe_subtree(&nodes, node_id, &mut visited, &mut output);
        }
        output
    }
}

fn describe_subtree(
    nodes: &FxHashMap<ScrollingNodeId, ScrollingTreeNodeRef>,
    node_id: ScrollingNodeId,
    visited: &mut FxHashSet<ScrollingNodeId>,
    output: &mut String,
) {
    let mut pending = vec![(node_id, 1)];
    while let Some((node_id, depth)) = pending.pop() {
        if !visited.insert(node_id) {
            continue;
        }
        let Some(node) = nodes.get(&node_id) else {
            continue;
        };
        let _ = write!(
            output,
            "{:indent$}{} {node_id}",
            "",
            node.node_type().name(),
            indent = depth * 2
        );
        if let Some(scrolling_node) = node.as_scrolling_node() {
            let position = scrolling_node.current_scroll_position();
            let _ = write!(output, " scroll position ({}, {})", position.x, position.y);
        }
        if let Some(frame_node) = node.as_frame_scrolling_node() {
            let origin = frame_node.layout_viewport().origin;
            let _ = write!(output, " layout viewport ({}, {})", origin.x, origin.y);
        }
        output.push('\n');
        pending.extend(
            node.base()
                .children()
                .into_iter()
                .rev()
                .map(|child| (child, depth + 1)),
        );
    }
}
