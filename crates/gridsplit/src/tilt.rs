use crate::error::LayerGeometryError;
use crate::grid::Grid;
use crate::point::Point;
use crate::square::Square;

/// Produces per-cell "actual squares" for a given Z by shrinking internal edges proportionally
/// to `(z - zmin)*sin(angle)`.
pub struct SquareTilter;

impl SquareTilter {
    /// Recomputes `cell.actual_square` for every cell in `grid` at the given layer.
    ///
    /// `scaling` converts the tilt shift (in the same units as `z`/`zmin`) into grid
    /// coordinate units.
    pub fn apply(
        grid: &mut Grid,
        z: f64,
        zmin: f64,
        scaling: f64,
        displacement: (i64, i64),
    ) -> Result<(), LayerGeometryError> {
        if grid.justone {
            for cell in grid.cells_mut() {
                cell.actual_square = cell.original_square;
            }
            return Ok(());
        }

        if z < zmin && !grid.angle90 {
            return Err(LayerGeometryError::ZBelowZMin { z, zmin });
        }

        let shift = if grid.angle90 {
            0
        } else {
            (grid.sinangle * (z - zmin) / scaling).trunc() as i64
        };

        if shift >= displacement.0 {
            return Err(LayerGeometryError::ShiftExceedsDisplacementX {
                shift,
                displacement_x: displacement.0,
            });
        }
        if shift >= displacement.1 {
            return Err(LayerGeometryError::ShiftExceedsDisplacementY {
                shift,
                displacement_y: displacement.1,
            });
        }

        let numx = grid.numx();
        let numy = grid.numy();

        for x in 0..numx {
            for y in 0..numy {
                let cell = grid.cell_mut(x, y);
                cell.actual_square = tilt_square(cell.original_square, x, y, numx, numy, shift);
            }
        }

        Ok(())
    }
}

fn tilt_square(square: Square, x: usize, y: usize, numx: usize, numy: usize, shift: i64) -> Square {
    let not_first_x = x > 0;
    let not_last_x = x < numx - 1;
    let not_first_y = y > 0;
    let not_last_y = y < numy - 1;

    // corner order: [SW, SE, NE, NW].
    let x_rule = [not_first_x, not_last_x, not_last_x, not_first_x];
    let y_rule = [not_first_y, not_first_y, not_last_y, not_last_y];

    let mut corners = square.corners;
    for i in 0..4 {
        let mut p = corners[i];
        if x_rule[i] {
            p = Point::new(p.x() - shift, p.y());
        }
        if y_rule[i] {
            p = Point::new(p.x(), p.y() - shift);
        }
        corners[i] = p;
    }

    Square::new(corners[0], corners[1], corners[2], corners[3])
}
