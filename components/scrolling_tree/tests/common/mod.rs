/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use scrolling_tree::{PlatformInputModel, Preferences, RemoteScrollingTree, ScrollingTreeMessage};
use scrolling_tree_traits::{
    FixedPositionConstraints, LayoutPoint, LayoutRect, LayoutSize, RequestedScrollData,
    ScrollPositionUpdatePolicy, ScrollableAreaParameters, ScrollingCoordinator, ScrollingNodeId,
    ScrollingNodeType, ScrollingStateNode, ScrollingStateNodeProperties, ScrollingTreeUpdate,
    SnapPointIndex, StickyPositionConstraints,
};

pub const ROOT: ScrollingNodeId = ScrollingNodeId(1);
pub const OVERFLOW: ScrollingNodeId = ScrollingNodeId(2);
pub const FIXED: ScrollingNodeId = ScrollingNodeId(3);
pub const STICKY: ScrollingNodeId = ScrollingNodeId(4);

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

type NotificationCallback = Arc<dyn Fn() + Send + Sync>;

/// A coordinator that records everything it is told as the message the channel proxy would
/// have sent for it.
pub struct RecordingCoordinator {
    messages: Mutex<Vec<ScrollingTreeMessage>>,
    accept_scroll_requests: AtomicBool,
    supports_gesture_lifecycle_events: bool,
    on_notification: Mutex<Option<NotificationCallback>>,
}

impl RecordingCoordinator {
    pub fn new(supports_gesture_lifecycle_events: bool) -> Arc<Self> {
        Arc::new(Self {
            messages: Mutex::new(Vec::new()),
            accept_scroll_requests: AtomicBool::new(true),
            supports_gesture_lifecycle_events,
            on_notification: Mutex::new(None),
        })
    }

    pub fn set_accept_scroll_requests(&self, accept: bool) {
        self.accept_scroll_requests.store(accept, Ordering::SeqCst);
    }

    /// Run `callback` after every recorded notification, on the notifying thread.
    pub fn set_on_notification(&self, callback: impl Fn() + Send + Sync + 'static) {
        *self.on_notification.lock() = Some(Arc::new(callback));
    }

    pub fn take_messages(&self) -> Vec<ScrollingTreeMessage> {
        std::mem::take(&mut *self.messages.lock())
    }

    fn record(&self, message: ScrollingTreeMessage) {
        self.messages.lock().push(message);
        let callback = self.on_notification.lock().clone();
        if let Some(callback) = callback {
            callback();
        }
    }
}

impl ScrollingCoordinator for RecordingCoordinator {
    fn node_did_scroll(
        &self,
        node_id: ScrollingNodeId,
        scroll_position: LayoutPoint,
        layout_viewport_origin: Option<LayoutPoint>,
        policy: ScrollPositionUpdatePolicy,
    ) {
        self.record(ScrollingTreeMessage::NodeDidScroll {
            node_id,
            scroll_position,
            layout_viewport_origin,
            policy,
        });
    }

    fn node_did_stop_animated_scroll(&self, node_id: ScrollingNodeId) {
        self.record(ScrollingTreeMessage::NodeDidStopAnimatedScroll(node_id));
    }

    fn node_requests_scroll(
        &self,
        node_id: ScrollingNodeId,
        request: &RequestedScrollData,
    ) -> bool {
        self.record(ScrollingTreeMessage::NodeRequestsScroll(node_id, *request));
        self.accept_scroll_requests.load(Ordering::SeqCst)
    }

    fn current_snap_point_indices_did_change(
        &self,
        node_id: ScrollingNodeId,
        horizontal: Option<SnapPointIndex>,
        vertical: Option<SnapPointIndex>,
    ) {
        self.record(ScrollingTreeMessage::CurrentSnapPointIndicesDidChange {
            node_id,
            horizontal,
            vertical,
        });
    }

    fn supports_gesture_lifecycle_events(&self) -> bool {
        self.supports_gesture_lifecycle_events
    }

    fn node_will_start_pan_gesture(&self, node_id: ScrollingNodeId) {
        self.record(ScrollingTreeMessage::NodeWillStartPanGesture(node_id));
    }

    fn node_will_start_scroll(&self, node_id: ScrollingNodeId) {
        self.record(ScrollingTreeMessage::NodeWillStartScroll(node_id));
    }

    fn node_did_end_scroll(&self, node_id: ScrollingNodeId) {
        self.record(ScrollingTreeMessage::NodeDidEndScroll(node_id));
    }
}

pub fn new_tree(
    coordinator: &Arc<RecordingCoordinator>,
    input_model: PlatformInputModel,
) -> Arc<RemoteScrollingTree> {
    init_logger();
    let preferences = Preferences {
        input_model,
        dump_scrolling_tree: true,
    };
    RemoteScrollingTree::new(coordinator.clone(), &preferences)
}

/// An 800x600 main frame over a 3000px tall document.
pub fn main_frame_properties() -> ScrollingStateNodeProperties {
    ScrollingStateNodeProperties::frame_scrolling(ScrollableAreaParameters::new(
        LayoutSize::new(800., 600.),
        LayoutSize::new(800., 3000.),
    ))
}

/// A 200x200 overflow box over 1000px of content.
pub fn overflow_properties() -> ScrollingStateNodeProperties {
    ScrollingStateNodeProperties::overflow_scrolling(ScrollableAreaParameters::new(
        LayoutSize::new(200., 200.),
        LayoutSize::new(200., 1000.),
    ))
}

/// A main frame containing an overflow box and a fixed layer, with a sticky layer inside
/// the overflow box.
pub fn initial_update() -> ScrollingTreeUpdate {
    ScrollingTreeUpdate::default()
        .with_root(ROOT)
        .with_node(
            ScrollingStateNode::new(ROOT, ScrollingNodeType::MainFrame)
                .with_properties(main_frame_properties()),
        )
        .with_node(
            ScrollingStateNode::new(OVERFLOW, ScrollingNodeType::Overflow)
                .with_parent(ROOT)
                .with_properties(overflow_properties()),
        )
        .with_node(
            ScrollingStateNode::new(FIXED, ScrollingNodeType::Fixed)
                .with_parent(ROOT)
                .with_properties(ScrollingStateNodeProperties::Fixed(
                    FixedPositionConstraints {
                        viewport_rect_at_last_layout: LayoutRect::new(
                            LayoutPoint::zero(),
                            LayoutSize::new(800., 600.),
                        ),
                        layer_position_at_last_layout: LayoutPoint::new(10., 10.),
                    },
                )),
        )
        .with_node(
            ScrollingStateNode::new(STICKY, ScrollingNodeType::Sticky)
                .with_parent(OVERFLOW)
                .with_properties(ScrollingStateNodeProperties::Sticky(
                    StickyPositionConstraints::default(),
                )),
        )
}
