// src/map/geometry.rs

use crate::domain::Listing;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Zero or negative in either dimension (not laid out yet).
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Current rendered geometry of the map: the image's box, where that box
/// sits inside the map container, and the container's own size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MapViewport {
    pub image: Size,
    pub image_origin: Point,
    pub container: Size,
}

impl MapViewport {
    /// Image filling the container from its top-left corner.
    pub fn filling(image: Size) -> Self {
        Self {
            image,
            image_origin: Point::default(),
            container: image,
        }
    }
}

/// A plotted listing. `left`/`top` are pixel offsets into the rendered
/// image; markers are drawn centred on that spot.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub name: String,
    pub left: f64,
    pub top: f64,
}

impl MapPoint {
    /// Marker centre relative to the map container.
    pub fn center_in(&self, viewport: &MapViewport) -> Point {
        Point::new(
            viewport.image_origin.x + self.left,
            viewport.image_origin.y + self.top,
        )
    }
}

/// Converts percentage coordinates against the image's current rendered
/// size. Listings without coordinates are skipped.
pub fn layout_points(listings: &[Listing], image: Size) -> Vec<MapPoint> {
    if image.is_empty() {
        return Vec::new();
    }

    listings
        .iter()
        .enumerate()
        .filter_map(|(index, listing)| match listing.coordinates {
            Some(coords) => Some(MapPoint {
                name: listing.name.clone(),
                left: coords.x_percent / 100.0 * image.width,
                top: coords.y_percent / 100.0 * image.height,
            }),
            None => {
                if listing.name.is_empty() {
                    debug!("Apartment (index {index}) missing coordinates.");
                } else {
                    debug!("Apartment {} missing coordinates.", listing.name);
                }
                None
            }
        })
        .collect()
}
