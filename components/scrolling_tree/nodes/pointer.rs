/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Scrolling nodes for the indirect-pointer (mouse and trackpad) input model.

use log::debug;
use parking_lot::RwLock;
use scrolling_tree_traits::{
    MouseEventType, PlatformMouseEvent, ScrollableAreaParameters, ScrollingStateNodeProperties,
};

use crate::node::{
    ScrollableArea, ScrollingTreeFrameScrollingNode, ScrollingTreeNode, ScrollingTreeNodeBase,
    ScrollingTreeScrollingNode,
};
use crate::nodes::FrameScrollingNodeState;
use crate::platform::PlatformInputModel;

/// Width of the strip along the trailing edges of a scroll container that counts as being
/// over a scrollbar.
const SCROLLBAR_THICKNESS: f32 = 15.0;

/// Which overlay scrollbars the pointer is currently over.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ScrollbarHoverState {
    pub mouse_is_over_horizontal_scrollbar: bool,
    pub mouse_is_over_vertical_scrollbar: bool,
}

impl ScrollbarHoverState {
    fn for_event(parameters: &ScrollableAreaParameters, event: &PlatformMouseEvent) -> Self {
        if event.event_type == MouseEventType::Exited {
            return Self::default();
        }

        let size = parameters.scroll_container_size;
        let point = event.point;
        if point.x < 0. || point.y < 0. || point.x >= size.width || point.y >= size.height {
            return Self::default();
        }

        Self {
            mouse_is_over_horizontal_scrollbar: parameters.scrolls_horizontally() &&
                point.y >= size.height - SCROLLBAR_THICKNESS,
            mouse_is_over_vertical_scrollbar: parameters.scrolls_vertically() &&
                point.x >= size.width - SCROLLBAR_THICKNESS,
        }
    }
}

#[derive(Debug, Default)]
struct ScrollbarHoverTracker(RwLock<ScrollbarHoverState>);

impl ScrollbarHoverTracker {
    fn get(&self) -> ScrollbarHoverState {
        *self.0.read()
    }

    fn update(&self, area: &ScrollableArea, event: &PlatformMouseEvent) -> bool {
        let new_state = ScrollbarHoverState::for_event(&area.parameters(), event);
        let old_state = std::mem::replace(&mut *self.0.write(), new_state);
        old_state != new_state
    }
}

#[derive(Debug)]
pub struct PointerFrameScrollingNode {
    base: ScrollingTreeNodeBase,
    frame: FrameScrollingNodeState,
    scrollbar_hover: ScrollbarHoverTracker,
}

impl PointerFrameScrollingNode {
    pub fn new(base: ScrollingTreeNodeBase) -> Self {
        Self {
            base,
            frame: FrameScrollingNodeState::default(),
            scrollbar_hover: ScrollbarHoverTracker::default(),
        }
    }

    pub fn scrollbar_hover_state(&self) -> ScrollbarHoverState {
        self.scrollbar_hover.get()
    }
}

impl ScrollingTreeNode for PointerFrameScrollingNode {
    fn base(&self) -> &ScrollingTreeNodeBase {
        &self.base
    }

    fn commit_state(&self, properties: &ScrollingStateNodeProperties) {
        self.frame.commit(properties);
    }

    fn input_model(&self) -> Option<PlatformInputModel> {
        Some(PlatformInputModel::IndirectPointer)
    }

    fn as_scrolling_node(&self) -> Option<&dyn ScrollingTreeScrollingNode> {
        Some(self)
    }

    fn as_frame_scrolling_node(&self) -> Option<&dyn ScrollingTreeFrameScrollingNode> {
        Some(self)
    }

    fn handle_mouse_event(&self, event: &PlatformMouseEvent) -> bool {
        let changed = self
            .scrollbar_hover
            .update(self.frame.scrollable_area(), event);
        if changed {
            debug!(
                "Scrollbar hover for node {} is now {:?}",
                self.base.id(),
                self.scrollbar_hover.get()
            );
        }
        changed
    }
}

impl ScrollingTreeScrollingNode for PointerFrameScrollingNode {
    fn scrollable_area(&self) -> &ScrollableArea {
        self.frame.scrollable_area()
    }

    fn did_change_scroll_position(&self) {
        self.frame.update_layout_viewport();
    }
}

impl ScrollingTreeFrameScrollingNode for PointerFrameScrollingNode {
    fn frame_state(&self) -> &FrameScrollingNodeState {
        &self.frame
    }
}

#[derive(Debug)]
pub struct PointerOverflowScrollingNode {
    base: ScrollingTreeNodeBase,
    scrollable_area: ScrollableArea,
    scrollbar_hover: ScrollbarHoverTracker,
}

impl PointerOverflowScrollingNode {
    pub fn new(base: ScrollingTreeNodeBase) -> Self {
        Self {
            base,
            scrollable_area: ScrollableArea::default(),
            scrollbar_hover: ScrollbarHoverTracker::default(),
        }
    }

    pub fn scrollbar_hover_state(&self) -> ScrollbarHoverState {
        self.scrollbar_hover.get()
    }
}

impl ScrollingTreeNode for PointerOverflowScrollingNode {
    fn base(&self) -> &ScrollingTreeNodeBase {
        &self.base
    }

    fn commit_state(&self, properties: &ScrollingStateNodeProperties) {
        if let ScrollingStateNodeProperties::OverflowScrolling { scrollable_area } = properties {
            self.scrollable_area.commit(scrollable_area);
        }
    }

    fn input_model(&self) -> Option<PlatformInputModel> {
        Some(PlatformInputModel::IndirectPointer)
    }

    fn as_scrolling_node(&self) -> Option<&dyn ScrollingTreeScrollingNode> {
        Some(self)
    }

    fn handle_mouse_event(&self, event: &PlatformMouseEvent) -> bool {
        self.scrollbar_hover.update(&self.scrollable_area, event)
    }
}

impl ScrollingTreeScrollingNode for PointerOverflowScrollingNode {
    fn scrollable_area(&self) -> &ScrollableArea {
        &self.scrollable_area
    }
}

#[cfg(test)]
mod tests {
    use scrolling_tree_traits::{LayoutPoint, LayoutSize};

    use super::*;

    fn event(event_type: MouseEventType, x: f32, y: f32) -> PlatformMouseEvent {
        PlatformMouseEvent::new(event_type, LayoutPoint::new(x, y))
    }

    #[test]
    fn hovering_the_trailing_edge_hits_the_vertical_scrollbar() {
        let parameters = ScrollableAreaParameters::new(
            LayoutSize::new(800., 600.),
            LayoutSize::new(800., 2000.),
        );

        let state = ScrollbarHoverState::for_event(
            &parameters,
            &event(MouseEventType::Move, 795., 10.),
        );
        assert!(state.mouse_is_over_vertical_scrollbar);
        assert!(!state.mouse_is_over_horizontal_scrollbar);

        // No horizontal overflow, so no horizontal scrollbar to hover.
        let state = ScrollbarHoverState::for_event(
            &parameters,
            &event(MouseEventType::Move, 10., 595.),
        );
        assert_eq!(state, ScrollbarHoverState::default());

        let state = ScrollbarHoverState::for_event(
            &parameters,
            &event(MouseEventType::Exited, 795., 10.),
        );
        assert_eq!(state, ScrollbarHoverState::default());
    }

    #[test]
    fn points_outside_the_container_hover_nothing() {
        let parameters =
            ScrollableAreaParameters::new(LayoutSize::new(100., 100.), LayoutSize::new(500., 500.));
        let state = ScrollbarHoverState::for_event(
            &parameters,
            &event(MouseEventType::Move, 120., 99.),
        );
        assert_eq!(state, ScrollbarHoverState::default());
    }
}
