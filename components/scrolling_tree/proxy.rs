/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::fmt::{Debug, Error, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{Receiver, SendError, Sender, unbounded};
use log::warn;
use scrolling_tree_traits::{
    LayoutPoint, RequestedScrollData, ScrollPositionUpdatePolicy, ScrollingCoordinator,
    ScrollingNodeId, SnapPointIndex,
};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// A notification from the scrolling tree, as sent by [`ScrollingCoordinatorProxy`].
#[derive(Clone, Deserialize, IntoStaticStr, PartialEq, Serialize)]
pub enum ScrollingTreeMessage {
    NodeDidScroll {
        node_id: ScrollingNodeId,
        scroll_position: LayoutPoint,
        layout_viewport_origin: Option<LayoutPoint>,
        policy: ScrollPositionUpdatePolicy,
    },
    NodeDidStopAnimatedScroll(ScrollingNodeId),
    NodeRequestsScroll(ScrollingNodeId, RequestedScrollData),
    CurrentSnapPointIndicesDidChange {
        node_id: ScrollingNodeId,
        horizontal: Option<SnapPointIndex>,
        vertical: Option<SnapPointIndex>,
    },
    NodeWillStartPanGesture(ScrollingNodeId),
    NodeWillStartScroll(ScrollingNodeId),
    NodeDidEndScroll(ScrollingNodeId),
}

impl Debug for ScrollingTreeMessage {
    fn fmt(&self, formatter: &mut Formatter) -> Result<(), Error> {
        let string: &'static str = self.into();
        write!(formatter, "{string}")
    }
}

/// A [`ScrollingCoordinator`] that forwards every notification over a channel, for hosts
/// where the code talking to the content process runs on another thread.
pub struct ScrollingCoordinatorProxy {
    sender: Sender<ScrollingTreeMessage>,
    supports_gesture_lifecycle_events: bool,
    disconnected: AtomicBool,
}

impl ScrollingCoordinatorProxy {
    pub fn new(supports_gesture_lifecycle_events: bool) -> (Self, Receiver<ScrollingTreeMessage>) {
        let (sender, receiver) = unbounded();
        let proxy = Self {
            sender,
            supports_gesture_lifecycle_events,
            disconnected: AtomicBool::new(false),
        };
        (proxy, receiver)
    }

    pub fn disconnected(&self) -> bool {
        self.disconnected.load(Ordering::SeqCst)
    }

    /// Returns whether the message was delivered.
    fn send(&self, message: ScrollingTreeMessage) -> bool {
        let message_type: &'static str = (&message).into();
        if self.try_send(message).is_err() {
            warn!("Lost connection to scrolling coordinator, dropping {message_type}");
            return false;
        }
        true
    }

    fn try_send(
        &self,
        message: ScrollingTreeMessage,
    ) -> Result<(), SendError<ScrollingTreeMessage>> {
        if self.disconnected() {
            return Err(SendError(message));
        }
        if let Err(error) = self.sender.send(message) {
            self.disconnected.store(true, Ordering::SeqCst);
            return Err(error);
        }
        Ok(())
    }
}

impl ScrollingCoordinator for ScrollingCoordinatorProxy {
    fn node_did_scroll(
        &self,
        node_id: ScrollingNodeId,
        scroll_position: LayoutPoint,
        layout_viewport_origin: Option<LayoutPoint>,
        policy: ScrollPositionUpdatePolicy,
    ) {
        self.send(ScrollingTreeMessage::NodeDidScroll {
            node_id,
            scroll_position,
            layout_viewport_origin,
            policy,
        });
    }

    fn node_did_stop_animated_scroll(&self, node_id: ScrollingNodeId) {
        self.send(ScrollingTreeMessage::NodeDidStopAnimatedScroll(node_id));
    }

    /// Returns whether the request reached the channel. Whether the coordinator on the
    /// other end accepts it is not known here.
    fn node_requests_scroll(
        &self,
        node_id: ScrollingNodeId,
        request: &RequestedScrollData,
    ) -> bool {
        self.send(ScrollingTreeMessage::NodeRequestsScroll(node_id, *request))
    }

    fn current_snap_point_indices_did_change(
        &self,
        node_id: ScrollingNodeId,
        horizontal: Option<SnapPointIndex>,
        vertical: Option<SnapPointIndex>,
    ) {
        self.send(ScrollingTreeMessage::CurrentSnapPointIndicesDidChange {
            node_id,
            horizontal,
            vertical,
        });
    }

    fn supports_gesture_lifecycle_events(&self) -> bool {
        self.supports_gesture_lifecycle_events
    }

    fn node_will_start_pan_gesture(&self, node_id: ScrollingNodeId) {
        self.send(ScrollingTreeMessage::NodeWillStartPanGesture(node_id));
    }

    fn node_will_start_scroll(&self, node_id: ScrollingNodeId) {
        self.send(ScrollingTreeMessage::NodeWillStartScroll(node_id));
    }

    fn node_did_end_scroll(&self, node_id: ScrollingNodeId) {
        self.send(ScrollingTreeMessage::NodeDidEndScroll(node_id));
    }
}

#[cfg(test)]
mod tests {
    use scrolling_tree_traits::ScrollType;

    use super::*;

    #[test]
    fn notifications_become_messages() {
        let (proxy, receiver) = ScrollingCoordinatorProxy::new(true);
        proxy.node_did_stop_animated_scroll(ScrollingNodeId(4));
        proxy.current_snap_point_indices_did_change(ScrollingNodeId(4), Some(1), None);
        proxy.node_did_end_scroll(ScrollingNodeId(4));

        let messages: Vec<_> = receiver.try_iter().collect();
        assert_eq!(
            messages,
            vec![
                ScrollingTreeMessage::NodeDidStopAnimatedScroll(ScrollingNodeId(4)),
                ScrollingTreeMessage::CurrentSnapPointIndicesDidChange {
                    node_id: ScrollingNodeId(4),
                    horizontal: Some(1),
                    vertical: None,
                },
                ScrollingTreeMessage::NodeDidEndScroll(ScrollingNodeId(4)),
            ]
        );
        assert_eq!(format!("{:?}", messages[0]), "NodeDidStopAnimatedScroll");
    }

    #[test]
    fn scroll_requests_fail_once_the_receiver_is_gone() {
        let (proxy, receiver) = ScrollingCoordinatorProxy::new(false);
        let request =
            RequestedScrollData::position_update(LayoutPoint::new(0., 10.), ScrollType::User);
        assert!(proxy.node_requests_scroll(ScrollingNodeId(1), &request));
        assert!(!proxy.disconnected());

        drop(receiver);
        assert!(!proxy.node_requests_scroll(ScrollingNodeId(1), &request));
        assert!(proxy.disconnected());
        assert!(!proxy.supports_gesture_lifecycle_events());
    }

    #[test]
    fn delivered_scroll_requests_are_left_to_the_receiver() {
        let (proxy, receiver) = ScrollingCoordinatorProxy::new(false);
        let request = RequestedScrollData::position_update(
            LayoutPoint::new(0., -50.),
            ScrollType::Programmatic,
        );

        // The receiver decides whether to accept the request.
        assert!(proxy.node_requests_scroll(ScrollingNodeId(2), &request));
        assert_eq!(
            receiver.try_recv().unwrap(),
            ScrollingTreeMessage::NodeRequestsScroll(ScrollingNodeId(2), request)
        );
    }
}
