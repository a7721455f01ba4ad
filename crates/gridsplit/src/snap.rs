use crate::grid::{Grid, SnapSpec};
use crate::point::Point;

/// Maps path vertices to integer cell coordinates.
pub struct Snapper;

impl Snapper {
    /// Snaps a single point, without clamping.
    #[must_use]
    pub fn snap_point(snap: SnapSpec, p: Point) -> (i64, i64) {
        let cx = ((p.x() as f64 - snap.shift_x) / snap.gridstep_x).round() as i64;
        let cy = ((p.y() as f64 - snap.shift_y) / snap.gridstep_y).round() as i64;
        (cx, cy)
    }

    /// Snaps every vertex of `path`, clamping each axis into `[0, numx-1] x [0, numy-1]`.
    ///
    /// A clamp never fails the call; it emits one `log::warn!` per clamped axis.
    #[must_use]
    pub fn snap_path(grid: &Grid, path: &[Point]) -> Vec<(usize, usize)> {
        let snap = grid.snap();
        let max_x = grid.numx() as i64 - 1;
        let max_y = grid.numy() as i64 - 1;

        path.iter()
            .map(|p| {
                let (cx, cy) = Self::snap_point(snap, *p);
                let clamped_x = cx.clamp(0, max_x);
                let clamped_y = cy.clamp(0, max_y);

                if clamped_x != cx {
                    log::warn!(
                        "snapped point {:?} clamped on X: {} -> {}",
                        p,
                        cx,
                        clamped_x
                    );
                }
                if clamped_y != cy {
                    log::warn!(
                        "snapped point {:?} clamped on Y: {} -> {}",
                        p,
                        cy,
                        clamped_y
                    );
                }

                (clamped_x as usize, clamped_y as usize)
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Config;
    use crate::grid::GridBuilder;

    fn two_cell_grid() -> Grid {
        let config = Config {
            use_origin: false,
            origin: Point::ZERO,
            displacement: Point::new(100, 100),
            margin: 10,
            min: Point::new(0, 0),
            max: Point::new(200, 100),
            zmin: 0.0,
            wall_angle_deg: 90.0,
            apply_motion_planning: false,
        };
        GridBuilder::build(&config).unwrap()
    }

    #[test]
    fn test_snap_interior_points() {
        let grid = two_cell_grid();
        let snapped = Snapper::snap_path(&grid, &[Point::new(20, 50), Point::new(180, 50)]);
        assert_eq!(snapped, vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn test_snap_clamps_out_of_range() {
        let grid = two_cell_grid();
        let snapped = Snapper::snap_path(&grid, &[Point::new(-500, 50)]);
        assert_eq!(snapped, vec![(0, 0)]);

        let snapped = Snapper::snap_path(&grid, &[Point::new(500, 50)]);
        assert_eq!(snapped, vec![(1, 0)]);
    }
}
