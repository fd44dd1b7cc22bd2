// src/map/mod.rs

pub mod geometry;
pub mod popover;

pub use geometry::{layout_points, MapPoint, MapViewport, Size};
pub use popover::{place_popover, EstimatedMeasure, Popover, PopoverMeasure};

use crate::domain::Listing;
use tracing::info;

/// Everything the map layer shows. Points are rebuilt from the current
/// filtered list and viewport on every layout pass, never cached across
/// filter changes or resizes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapState {
    pub visible: bool,
    pub image_failed: bool,
    pub viewport: Option<MapViewport>,
    pub points: Vec<MapPoint>,
    pub popover: Popover,
}

impl MapState {
    /// Re-plots the filtered listings and reconciles the popover with the
    /// new set of points.
    pub fn relayout(&mut self, filtered: &[Listing], measure: &dyn PopoverMeasure) {
        self.points.clear();

        let viewport = match self.viewport {
            Some(v) if self.visible && !self.image_failed && !v.image.is_empty() => v,
            _ => {
                self.popover.hide();
                return;
            }
        };
        if filtered.is_empty() {
            self.popover.hide();
            return;
        }

        self.points = layout_points(filtered, viewport.image);
        info!("Rendered {} points.", self.points.len());

        self.popover.retain_plotted(&self.points);
        self.reposition(filtered, measure);
    }

    /// Places the popover against the marker of the listing it shows.
    pub fn reposition(&mut self, filtered: &[Listing], measure: &dyn PopoverMeasure) {
        let placement = self.popover.shown().and_then(|name| {
            let viewport = self.viewport?;
            let point = self.points.iter().find(|p| p.name == name)?;
            let listing = filtered.iter().find(|l| l.name == name)?;
            Some(place_popover(
                point.center_in(&viewport),
                measure.measure(listing),
                viewport.container,
            ))
        });

        match placement {
            Some(placement) => self.popover.set_placement(Some(placement)),
            None => self.popover.hide(),
        }
    }

    pub fn is_plotted(&self, name: &str) -> bool {
        self.points.iter().any(|p| p.name == name)
    }

    pub fn pointer_enter(&mut self, name: &str, filtered: &[Listing], measure: &dyn PopoverMeasure) {
        if !self.is_plotted(name) {
            return;
        }
        self.popover.pointer_enter(name);
        self.reposition(filtered, measure);
    }

    pub fn pointer_leave(&mut self, name: &str) {
        self.popover.pointer_leave(name);
    }

    pub fn click_point(&mut self, name: &str, filtered: &[Listing], measure: &dyn PopoverMeasure) {
        if !self.is_plotted(name) {
            return;
        }
        self.popover.click(name);
        self.reposition(filtered, measure);
    }

    pub fn click_background(&mut self) {
        self.popover.background_click();
    }

    /// Shows or hides the map. Hiding drops the pin.
    pub fn toggle(&mut self, filtered: &[Listing], measure: &dyn PopoverMeasure) {
        self.visible = !self.visible;
        self.relayout(filtered, measure);
    }

    pub fn image_failed(&mut self) {
        self.image_failed = true;
        self.points.clear();
        self.popover.hide();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::MapCoordinates;
    use crate::map::popover::PopoverMode;

    fn at(name: &str, x: f64, y: f64) -> Listing {
        Listing {
            name: name.to_string(),
            coordinates: Some(MapCoordinates {
                x_percent: x,
                y_percent: y,
            }),
            ..Listing::default()
        }
    }

    fn shown_map() -> MapState {
        MapState {
            visible: true,
            viewport: Some(MapViewport::filling(Size::new(400.0, 300.0))),
            ..MapState::default()
        }
    }

    #[test]
    fn hidden_map_plots_nothing_and_drops_the_pin() {
        let listings = vec![at("A", 10.0, 10.0)];
        let measure = EstimatedMeasure::default();
        let mut map = shown_map();
        map.relayout(&listings, &measure);
        map.click_point("A", &listings, &measure);
        assert_eq!(map.popover.pinned(), Some("A"));

        map.toggle(&listings, &measure);
        assert!(!map.visible);
        assert!(map.points.is_empty());
        assert_eq!(map.popover.pinned(), None);
    }

    #[test]
    fn pinned_popover_follows_its_marker_on_resize() {
        let listings = vec![at("A", 10.0, 50.0)];
        let measure = EstimatedMeasure::default();
        let mut map = shown_map();
        map.relayout(&listings, &measure);
        map.click_point("A", &listings, &measure);
        let before = map.popover.placement().unwrap();

        map.viewport = Some(MapViewport::filling(Size::new(800.0, 600.0)));
        map.relayout(&listings, &measure);
        let after = map.popover.placement().unwrap();

        assert_eq!(map.popover.pinned(), Some("A"));
        assert_eq!(before.left, 40.0 + popover::POPOVER_OFFSET);
        assert_eq!(after.left, 80.0 + popover::POPOVER_OFFSET);
    }

    #[test]
    fn hover_on_unplotted_listing_is_ignored() {
        let listings = vec![at("A", 10.0, 10.0)];
        let measure = EstimatedMeasure::default();
        let mut map = shown_map();
        map.relayout(&listings, &measure);

        map.pointer_enter("ghost", &listings, &measure);
        assert_eq!(map.popover.mode(), &PopoverMode::Idle);
    }

    #[test]
    fn failed_image_hides_everything() {
        let listings = vec![at("A", 10.0, 10.0)];
        let measure = EstimatedMeasure::default();
        let mut map = shown_map();
        map.relayout(&listings, &measure);
        map.image_failed();

        map.relayout(&listings, &measure);
        assert!(map.points.is_empty());
    }
}
