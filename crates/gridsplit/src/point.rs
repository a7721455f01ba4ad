/// A 2D point in the integer coordinate space shared with the clipper.
///
/// All splitter geometry lives in this fixed-point space; only `Config::zmin`
/// and `wall_angle_deg` are floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct Point {
    data: [i64; 2],
}

impl Point {
    pub const ZERO: Point = Point { data: [0, 0] };

    #[must_use]
    #[inline]
    pub fn new(x: i64, y: i64) -> Self {
        Self { data: [x, y] }
    }

    #[must_use]
    #[inline]
    pub fn x(&self) -> i64 {
        self.data[0]
    }

    #[must_use]
    #[inline]
    pub fn y(&self) -> i64 {
        self.data[1]
    }

    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = (self.x() - other.x()) as f64;
        let dy = (self.y() - other.y()) as f64;
        dx.hypot(dy)
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (i64, i64) {
    fn from(p: Point) -> Self {
        (p.x(), p.y())
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x() + rhs.x(), self.y() + rhs.y())
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x() - rhs.x(), self.y() - rhs.y())
    }
}
