// src/map/popover.rs

//! Map popover: hover preview, click-to-pin, and overflow-aware placement.

use crate::domain::Listing;
use crate::map::geometry::{MapPoint, Point, Size};
use tracing::warn;

/// Gap between the marker centre and the popover's near edge.
pub const POPOVER_OFFSET: f64 = 7.0;
/// Extra room reserved for the pointer arrow.
pub const POPOVER_ARROW_MARGIN: f64 = 20.0;
/// Minimum distance kept from the container's top and bottom edges.
pub const POPOVER_PADDING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopoverSide {
    Left,
    Right,
}

impl PopoverSide {
    pub fn css_class(self) -> &'static str {
        match self {
            PopoverSide::Left => "popover-left",
            PopoverSide::Right => "popover-right",
        }
    }
}

/// Position of the popover's top-left corner inside the map container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopoverPlacement {
    pub left: f64,
    pub top: f64,
    pub side: PopoverSide,
}

/// Places a popover of size `popover` next to a marker centred at `center`.
///
/// Prefers the right side, falls back to the left, and keeps the right
/// side (accepting overflow) when neither fits. Vertically centred on the
/// marker, clamped inside the container's padding.
pub fn place_popover(center: Point, popover: Size, container: Size) -> PopoverPlacement {
    let space_needed = popover.width + POPOVER_OFFSET + POPOVER_ARROW_MARGIN;

    let (left, side) = if center.x + space_needed <= container.width {
        (center.x + POPOVER_OFFSET, PopoverSide::Right)
    } else if center.x - space_needed >= 0.0 {
        (
            center.x - popover.width - POPOVER_OFFSET - POPOVER_ARROW_MARGIN,
            PopoverSide::Left,
        )
    } else {
        warn!("Popover might overflow container horizontally.");
        (center.x + POPOVER_OFFSET, PopoverSide::Right)
    };

    let mut top = center.y - popover.height / 2.0;
    if top < POPOVER_PADDING {
        top = POPOVER_PADDING;
    } else if top + popover.height > container.height - POPOVER_PADDING {
        top = container.height - popover.height - POPOVER_PADDING;
    }

    PopoverPlacement { left, top, side }
}

/// Measures the box a popover for `listing` would occupy, without it
/// taking part in layout.
pub trait PopoverMeasure {
    fn measure(&self, listing: &Listing) -> Size;
}

/// Size estimate from the popover's line count.
#[derive(Debug, Clone, Copy)]
pub struct EstimatedMeasure {
    pub width: f64,
    pub line_height: f64,
    pub padding: f64,
}

impl Default for EstimatedMeasure {
    fn default() -> Self {
        Self {
            width: 220.0,
            line_height: 18.0,
            padding: 12.0,
        }
    }
}

impl PopoverMeasure for EstimatedMeasure {
    fn measure(&self, listing: &Listing) -> Size {
        // title, price, floor, style, link
        let mut lines = 5.0;
        if listing.shows_updated_badge() {
            lines += 1.0;
        }
        Size::new(self.width, lines * self.line_height + 2.0 * self.padding)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PopoverMode {
    #[default]
    Idle,
    /// Transient, follows the pointer.
    Preview(String),
    /// Sticky until clicked again, replaced, or the background is clicked.
    Pinned(String),
}

/// The single popover of the map. Identifies listings by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Popover {
    mode: PopoverMode,
    placement: Option<PopoverPlacement>,
}

impl Popover {
    #[cfg(test)]
    pub fn mode(&self) -> &PopoverMode {
        &self.mode
    }

    pub fn pinned(&self) -> Option<&str> {
        match &self.mode {
            PopoverMode::Pinned(name) => Some(name),
            _ => None,
        }
    }

    /// Listing whose content is on display, if any.
    pub fn shown(&self) -> Option<&str> {
        match &self.mode {
            PopoverMode::Idle => None,
            PopoverMode::Preview(name) | PopoverMode::Pinned(name) => Some(name),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.shown().is_some() && self.placement.is_some()
    }

    pub fn placement(&self) -> Option<PopoverPlacement> {
        self.placement
    }

    pub fn set_placement(&mut self, placement: Option<PopoverPlacement>) {
        self.placement = placement;
    }

    /// Pointer entered a marker. Suppressed while another listing is pinned.
    pub fn pointer_enter(&mut self, name: &str) {
        if self.pinned().is_none() {
            self.mode = PopoverMode::Preview(name.to_string());
        }
    }

    /// Pointer left the marker of `name`. Only a preview of that listing
    /// is hidden; a pinned popover stays.
    pub fn pointer_leave(&mut self, name: &str) {
        if matches!(&self.mode, PopoverMode::Preview(shown) if shown == name) {
            self.hide();
        }
    }

    /// Click on a marker: toggles the pin for that listing, moving the pin
    /// if another listing held it.
    pub fn click(&mut self, name: &str) {
        if self.pinned() == Some(name) {
            self.hide();
        } else {
            self.mode = PopoverMode::Pinned(name.to_string());
        }
    }

    /// Click on the map outside any marker.
    pub fn background_click(&mut self) {
        if self.pinned().is_some() {
            self.hide();
        }
    }

    /// Drops the popover unless its listing is still plotted.
    pub fn retain_plotted(&mut self, points: &[MapPoint]) {
        let still_plotted = self
            .shown()
            .map(|name| points.iter().any(|p| p.name == name))
            .unwrap_or(true);
        if !still_plotted {
            self.hide();
        }
    }

    pub fn hide(&mut self) {
        self.mode = PopoverMode::Idle;
        self.placement = None;
    }
}
