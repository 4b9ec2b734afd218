/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Structural updates racing with input handling.

#[allow(dead_code)]
mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use common::{
    OVERFLOW, ROOT, RecordingCoordinator, STICKY, initial_update, new_tree, overflow_properties,
};
use scrolling_tree::{PlatformInputModel, ScrollingTreeLifecycle, ScrollingTreeMessage};
use scrolling_tree_traits::{
    LayoutPoint, MouseEventType, PlatformMouseEvent, ScrollPositionUpdatePolicy,
    ScrollingNodeType, ScrollingStateNode, ScrollingTreeUpdate,
};

const ITERATIONS: usize = 500;

fn add_overflow() -> ScrollingTreeUpdate {
    ScrollingTreeUpdate::default().with_node(
        ScrollingStateNode::new(OVERFLOW, ScrollingNodeType::Overflow)
            .with_parent(ROOT)
            .with_properties(overflow_properties()),
    )
}

#[test]
fn test_structural_updates_race_with_input() {
    for input_model in [PlatformInputModel::IndirectPointer, PlatformInputModel::DirectTouch] {
        let coordinator = RecordingCoordinator::new(true);
        let tree = new_tree(&coordinator, input_model);
        tree.commit_tree_state(initial_update());
        let done = AtomicBool::new(false);

        thread::scope(|scope| {
            scope.spawn(|| {
                for iteration in 0..ITERATIONS {
                    let update = if iteration % 2 == 0 {
                        ScrollingTreeUpdate::default().with_removed_node(OVERFLOW)
                    } else {
                        add_overflow()
                    };
                    assert!(tree.commit_tree_state(update));
                }
                done.store(true, Ordering::SeqCst);
            });

            scope.spawn(|| {
                let mut offset = 0.;
                while !done.load(Ordering::SeqCst) {
                    offset = (offset + 7.) % 800.;

                    let root = tree.root_node().expect("the root is never removed");
                    assert_eq!(root.id(), ROOT);
                    assert_eq!(root.node_type(), ScrollingNodeType::MainFrame);
                    root.handle_mouse_event(&PlatformMouseEvent::new(
                        MouseEventType::Move,
                        LayoutPoint::new(790., offset),
                    ));

                    if let Some(overflow) = tree.node_for_id(OVERFLOW) {
                        assert_eq!(overflow.node_type(), ScrollingNodeType::Overflow);
                        let scrolling_node = overflow.as_scrolling_node().unwrap();
                        scrolling_node.scroll_to(
                            LayoutPoint::new(0., offset),
                            ScrollPositionUpdatePolicy::Set,
                        );
                        assert!(scrolling_node.current_scroll_position().y <= 800.);
                    }
                    tree.scroll_node_to(
                        ROOT,
                        LayoutPoint::new(0., offset),
                        ScrollPositionUpdatePolicy::Sync,
                    );
                }
            });
        });

        // The last iteration re-added the overflow node, without its old sticky child.
        assert_eq!(tree.node_count(), 3);
        assert!(tree.node_for_id(OVERFLOW).is_some());
        assert!(tree.node_for_id(STICKY).is_none());

        for message in coordinator.take_messages() {
            assert!(matches!(message, ScrollingTreeMessage::NodeDidScroll { .. }));
        }
    }
}

#[test]
fn test_invalidation_races_with_input() {
    let coordinator = RecordingCoordinator::new(false);
    let tree = new_tree(&coordinator, PlatformInputModel::IndirectPointer);
    tree.commit_tree_state(initial_update());

    thread::scope(|scope| {
        scope.spawn(|| {
            for iteration in 0..ITERATIONS {
                let _ = tree.scroll_node_to(
                    OVERFLOW,
                    LayoutPoint::new(0., (iteration % 800) as f32),
                    ScrollPositionUpdatePolicy::Set,
                );
                let _ = tree.root_node();
            }
        });
        scope.spawn(|| {
            for _ in 0..10 {
                tree.invalidate();
            }
        });
        scope.spawn(|| {
            for _ in 0..ITERATIONS {
                tree.commit_tree_state(add_overflow());
            }
        });
    });

    assert_eq!(tree.lifecycle(), ScrollingTreeLifecycle::Invalidated);
    assert!(tree.root_node().is_none());
    assert_eq!(tree.node_count(), 0);
}
