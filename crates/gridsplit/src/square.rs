use crate::Point;

/// An axis-aligned window around a cell: 4 corners stored `[SW, SE, NE, NW]`.
///
/// Invariant: `corners[2] - corners[0] == size` on both axes; `SquareTilter` only ever
/// moves corners along the internal edges, so the square stays a rectangle throughout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    pub corners: [Point; 4],
}

impl Square {
    #[must_use]
    pub fn new(sw: Point, se: Point, ne: Point, nw: Point) -> Self {
        Self {
            corners: [sw, se, ne, nw],
        }
    }

    #[must_use]
    pub fn from_bounds(min: Point, max: Point) -> Self {
        Self::new(
            min,
            Point::new(max.x(), min.y()),
            max,
            Point::new(min.x(), max.y()),
        )
    }

    #[must_use]
    pub fn sw(&self) -> Point {
        self.corners[0]
    }

    #[must_use]
    pub fn ne(&self) -> Point {
        self.corners[2]
    }

    /// Containment test used throughout the fast path and the clipper hand-off.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        let sw = self.sw();
        let ne = self.ne();
        sw.x() <= p.x() && p.x() <= ne.x() && sw.y() <= p.y() && p.y() <= ne.y()
    }

    /// Convert to a closed `geo::Polygon<f64>` for use as a clip window.
    #[must_use]
    pub fn to_geo_polygon(&self) -> geo::Polygon<f64> {
        let coords: Vec<geo::Coord<f64>> = self
            .corners
            .iter()
            .chain(std::iter::once(&self.corners[0]))
            .map(|p| geo::Coord {
                x: p.x() as f64,
                y: p.y() as f64,
            })
            .collect();
        geo::Polygon::new(geo::LineString::new(coords), vec![])
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_square_contains() {
        let sq = Square::from_bounds(Point::new(0, 0), Point::new(10, 10));
        assert!(sq.contains(Point::new(5, 5)));
        assert!(sq.contains(Point::new(0, 0)));
        assert!(sq.contains(Point::new(10, 10)));
        assert!(!sq.contains(Point::new(11, 5)));
        assert!(!sq.contains(Point::new(5, -1)));
    }

    #[test]
    fn test_square_corner_order() {
        let sq = Square::from_bounds(Point::new(0, 0), Point::new(10, 20));
        assert_eq!(sq.corners[0], Point::new(0, 0)); // SW
        assert_eq!(sq.corners[1], Point::new(10, 0)); // SE
        assert_eq!(sq.corners[2], Point::new(10, 20)); // NE
        assert_eq!(sq.corners[3], Point::new(0, 20)); // NW
    }

    #[test]
    fn test_square_to_geo_polygon_is_closed() {
        let sq = Square::from_bounds(Point::new(0, 0), Point::new(10, 10));
        let poly = sq.to_geo_polygon();
        assert_eq!(poly.exterior().0.first(), poly.exterior().0.last());
        assert_eq!(poly.exterior().0.len(), 5);
    }
}
