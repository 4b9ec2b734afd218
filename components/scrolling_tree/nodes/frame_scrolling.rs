/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use parking_lot::RwLock;
use scrolling_tree_traits::{LayoutPoint, LayoutRect, ScrollingStateNodeProperties};

use crate::node::ScrollableArea;

#[derive(Clone, Copy, Debug, Default)]
struct LayoutViewport {
    rect: LayoutRect,
    min_origin: LayoutPoint,
    max_origin: LayoutPoint,
}

impl LayoutViewport {
    fn clamp_origin(&self, origin: LayoutPoint) -> LayoutPoint {
        LayoutPoint::new(
            origin.x.max(self.min_origin.x).min(self.max_origin.x),
            origin.y.max(self.min_origin.y).min(self.max_origin.y),
        )
    }
}

/// The state shared by both platform flavors of frame-scrolling node: a scrollable area
/// plus the layout viewport that fixed-position content is laid out against.
#[derive(Debug, Default)]
pub struct FrameScrollingNodeState {
    scrollable_area: ScrollableArea,
    layout_viewport: RwLock<LayoutViewport>,
}

impl FrameScrollingNodeState {
    pub fn scrollable_area(&self) -> &ScrollableArea {
        &self.scrollable_area
    }

    pub fn layout_viewport(&self) -> LayoutRect {
        self.layout_viewport.read().rect
    }

    pub(crate) fn commit(&self, properties: &ScrollingStateNodeProperties) {
        let ScrollingStateNodeProperties::FrameScrolling {
            scrollable_area,
            layout_viewport,
            min_layout_viewport_origin,
            max_layout_viewport_origin,
        } = properties
        else {
            return;
        };

        self.scrollable_area.commit(scrollable_area);
        *self.layout_viewport.write() = LayoutViewport {
            rect: *layout_viewport,
            min_origin: *min_layout_viewport_origin,
            max_origin: *max_layout_viewport_origin,
        };
    }

    /// Move the layout viewport just enough to contain the visual viewport at the current
    /// scroll position, without leaving the committed origin range.
    pub(crate) fn update_layout_viewport(&self) {
        let scroll_position = self.scrollable_area.current_scroll_position();
        let visual_size = self.scrollable_area.parameters().scroll_container_size;

        let mut viewport = self.layout_viewport.write();
        let mut origin = viewport.rect.origin;
        let size = viewport.rect.size;

        if scroll_position.x < origin.x {
            origin.x = scroll_position.x;
        } else if scroll_position.x + visual_size.width > origin.x + size.width {
            origin.x = scroll_position.x + visual_size.width - size.width;
        }
        if scroll_position.y < origin.y {
            origin.y = scroll_position.y;
        } else if scroll_position.y + visual_size.height > origin.y + size.height {
            origin.y = scroll_position.y + visual_size.height - size.height;
        }

        viewport.rect.origin = viewport.clamp_origin(origin);
    }
}

#[cfg(test)]
mod tests {
    use scrolling_tree_traits::{LayoutSize, ScrollClamping, ScrollableAreaParameters};

    use super::*;

    fn frame_state(max_layout_viewport_origin: LayoutPoint) -> FrameScrollingNodeState {
        let state = FrameScrollingNodeState::default();
        let area = ScrollableAreaParameters::new(
            LayoutSize::new(800., 600.),
            LayoutSize::new(800., 3000.),
        );
        state.commit(&ScrollingStateNodeProperties::FrameScrolling {
            layout_viewport: LayoutRect::new(LayoutPoint::zero(), LayoutSize::new(800., 600.)),
            min_layout_viewport_origin: LayoutPoint::zero(),
            max_layout_viewport_origin,
            scrollable_area: area,
        });
        state
    }

    #[test]
    fn layout_viewport_follows_scroll_position() {
        let state = frame_state(LayoutPoint::new(0., 2400.));
        state
            .scrollable_area()
            .set_scroll_position(LayoutPoint::new(0., 500.), ScrollClamping::Clamped);
        state.update_layout_viewport();
        assert_eq!(state.layout_viewport().origin, LayoutPoint::new(0., 500.));

        state
            .scrollable_area()
            .set_scroll_position(LayoutPoint::new(0., 100.), ScrollClamping::Clamped);
        state.update_layout_viewport();
        assert_eq!(state.layout_viewport().origin, LayoutPoint::new(0., 100.));
    }

    #[test]
    fn layout_viewport_stays_within_its_origin_range() {
        let state = frame_state(LayoutPoint::new(0., 1000.));
        state
            .scrollable_area()
            .set_scroll_position(LayoutPoint::new(0., 2400.), ScrollClamping::Clamped);
        state.update_layout_viewport();
        assert_eq!(state.layout_viewport().origin, LayoutPoint::new(0., 1000.));
        assert_eq!(
            state.scrollable_area().current_scroll_position(),
            LayoutPoint::new(0., 2400.)
        );
    }
}
