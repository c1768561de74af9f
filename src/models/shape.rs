// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Parking spot shape data structures.
//!
//! This module defines the core data structures for representing
//! polygonal spot regions and the loaded collection of them.

/// A 2D point in source-frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box in source-frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// A closed polygonal region, ordered so consecutive points form the
/// outline and the last point joins back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
}

/// Minimum vertex count for a polygon to be drawable and croppable.
pub const MIN_POLYGON_POINTS: usize = 3;

impl Polygon {
    /// Create a polygon from an ordered point list. Returns `None` when
    /// fewer than [`MIN_POLYGON_POINTS`] points are given.
    pub fn new(points: Vec<Point>) -> Option<Self> {
        if points.len() < MIN_POLYGON_POINTS {
            None
        } else {
            Some(Self { points })
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Bounding box over all vertices, unclamped.
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for p in &self.points {
            bbox.min_x = bbox.min_x.min(p.x);
            bbox.min_y = bbox.min_y.min(p.y);
            bbox.max_x = bbox.max_x.max(p.x);
            bbox.max_y = bbox.max_y.max(p.y);
        }
        bbox
    }
}

/// The loaded shape collection. Replaced wholesale on a successful load,
/// never mutated incrementally; insertion order is display order.
#[derive(Debug, Default)]
pub struct ShapeSet {
    polygons: Vec<Polygon>,
}

impl ShapeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire collection with a freshly parsed one.
    pub fn replace(&mut self, polygons: Vec<Polygon>) {
        self.polygons = polygons;
    }

    pub fn clear(&mut self) {
        self.polygons.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Polygon> {
        self.polygons.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(vec![
            Point::new(10.0, 10.0),
            Point::new(90.0, 10.0),
            Point::new(90.0, 90.0),
            Point::new(10.0, 90.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_polygon_rejects_degenerate() {
        assert!(Polygon::new(vec![]).is_none());
        assert!(Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).is_none());
        assert!(Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ])
        .is_some());
    }

    #[test]
    fn test_bounding_box() {
        let bbox = square().bounding_box();
        assert_eq!(bbox.min_x, 10.0);
        assert_eq!(bbox.min_y, 10.0);
        assert_eq!(bbox.max_x, 90.0);
        assert_eq!(bbox.max_y, 90.0);
    }

    #[test]
    fn test_shape_set_replace_and_clear() {
        let mut set = ShapeSet::new();
        set.replace(vec![square()]);
        assert_eq!(set.len(), 1);
        set.replace(vec![square(), square()]);
        assert_eq!(set.len(), 2);
        set.clear();
        assert!(set.is_empty());
    }
}
