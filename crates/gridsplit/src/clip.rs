use geo::algorithm::bool_ops::BooleanOps;

use crate::error::ClipperError;
use crate::point::Point;
use crate::polyline::Polyline;
use crate::square::Square;

fn to_coord(p: Point) -> geo::Coord<f64> {
    geo::Coord {
        x: p.x() as f64,
        y: p.y() as f64,
    }
}

fn from_coord_rounded(c: geo::Coord<f64>) -> Point {
    Point::new(c.x.round() as i64, c.y.round() as i64)
}

fn polyline_to_line_string(p: &Polyline) -> geo::LineString<f64> {
    geo::LineString::new(p.points().iter().copied().map(to_coord).collect())
}

fn line_string_to_polyline(ls: &geo::LineString<f64>) -> Polyline {
    Polyline::new(ls.0.iter().copied().map(from_coord_rounded).collect())
}

fn polyline_to_polygon(p: &Polyline) -> Result<geo::Polygon<f64>, ClipperError> {
    let mut points = p.points().to_vec();
    if points.len() < 3 {
        return Err(ClipperError::InvalidSubjectPolygon(format!(
            "closed path needs at least 3 points, got {}",
            points.len()
        )));
    }
    if points.first() != points.last() {
        points.push(points[0]);
    }
    Ok(geo::Polygon::new(
        geo::LineString::new(points.into_iter().map(to_coord).collect()),
        vec![],
    ))
}

/// Drives the external clipper (`geo`'s boolean ops) over the deferred buckets a cell
/// accumulated during the fast path, and over closed paths unconditionally.
pub struct ClipApplier;

impl ClipApplier {
    /// Clips open segments against `window`, returning the polyline fragments that fall inside.
    #[must_use]
    pub fn clip_open(window: &Square, segments: &[(Point, Point)]) -> Vec<Polyline> {
        if segments.is_empty() {
            return Vec::new();
        }

        let lines: Vec<geo::LineString<f64>> = segments
            .iter()
            .map(|(a, b)| geo::LineString::new(vec![to_coord(*a), to_coord(*b)]))
            .collect();
        let subject = geo::MultiLineString::new(lines);

        let clip_polygon = window.to_geo_polygon();
        let clipped: geo::MultiLineString<f64> = clip_polygon.clip(&subject, false);

        clipped
            .0
            .iter()
            .filter(|ls| ls.0.len() >= 2)
            .map(line_string_to_polyline)
            .collect()
    }

    /// Clips a closed path against `window`, returning the resulting sub-polygon boundaries.
    pub fn clip_closed(window: &Square, path: &Polyline) -> Result<Vec<Polyline>, ClipperError> {
        let subject = polyline_to_polygon(path)?;
        let clip_polygon = window.to_geo_polygon();

        let result = clip_polygon.intersection(&subject);
        Ok(result
            .0
            .iter()
            .map(|poly| line_string_to_polyline(poly.exterior()))
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clip_open_trims_crossing_segment() {
        // window [-10,110]x[-10,110], spec scenario #3 (half of it)
        let window = Square::from_bounds(Point::new(-10, -10), Point::new(110, 110));
        let result = ClipApplier::clip_open(&window, &[(Point::new(20, 50), Point::new(180, 50))]);

        assert_eq!(result.len(), 1);
        let pts = result[0].points();
        assert_eq!(pts[0], Point::new(20, 50));
        assert_eq!(pts[pts.len() - 1], Point::new(110, 50));
    }

    #[test]
    fn test_clip_open_empty_segments_returns_empty() {
        let window = Square::from_bounds(Point::new(0, 0), Point::new(10, 10));
        assert!(ClipApplier::clip_open(&window, &[]).is_empty());
    }

    #[test]
    fn test_clip_closed_square_against_window() {
        // spec scenario #6
        let window = Square::from_bounds(Point::new(-10, -10), Point::new(110, 110));
        let square = Polyline::new(vec![
            Point::new(50, 40),
            Point::new(150, 40),
            Point::new(150, 60),
            Point::new(50, 60),
        ]);
        let result = ClipApplier::clip_closed(&window, &square).unwrap();
        assert_eq!(result.len(), 1);

        let xs: Vec<i64> = result[0].points().iter().map(Point::x).collect();
        assert!(xs.iter().all(|&x| x <= 110));
    }

    #[test]
    fn test_clip_closed_rejects_degenerate_path() {
        let window = Square::from_bounds(Point::new(0, 0), Point::new(10, 10));
        let degenerate = Polyline::new(vec![Point::new(0, 0), Point::new(1, 1)]);
        assert!(ClipApplier::clip_closed(&window, &degenerate).is_err());
    }
}
