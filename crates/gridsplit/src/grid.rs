use crate::config::Config;
use crate::error::ConfigError;
use crate::motion::MotionPlanningState;
use crate::point::Point;
use crate::polyline::Polyline;
use crate::square::Square;

/// Maps a world point to the integer cell indices that own it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapSpec {
    pub gridstep_x: f64,
    pub gridstep_y: f64,
    pub shift_x: f64,
    pub shift_y: f64,
}

/// One grid cell: its static window, its per-layer tilted window, and its accumulated output.
#[derive(Debug, Clone)]
pub struct Cell {
    /// The window at `z == zmin`; never mutated after `setup()`.
    pub original_square: Square,

    /// The window for the layer currently being processed; rewritten every `process_paths` call.
    pub actual_square: Square,

    /// Output polylines/polygons produced for the current layer.
    pub paths: Vec<Polyline>,

    /// Opaque continuity state handed to the motion planner across layers.
    pub motion_planning_state: MotionPlanningState,
}

impl Cell {
    fn new(original_square: Square) -> Self {
        Self {
            original_square,
            actual_square: original_square,
            paths: Vec::new(),
            motion_planning_state: MotionPlanningState::default(),
        }
    }
}

/// The populated checkerboard grid plus the derived flags used throughout the splitter.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    numx: usize,
    numy: usize,
    original_size: (f64, f64),
    snap: SnapSpec,
    pub singlex: bool,
    pub singley: bool,
    pub justone: bool,
    pub angle90: bool,
    pub sinangle: f64,
}

impl Grid {
    #[must_use]
    pub fn numx(&self) -> usize {
        self.numx
    }

    #[must_use]
    pub fn numy(&self) -> usize {
        self.numy
    }

    #[must_use]
    pub fn original_size(&self) -> (f64, f64) {
        self.original_size
    }

    #[must_use]
    pub fn snap(&self) -> SnapSpec {
        self.snap
    }

    /// Row-major, X-outer indexing: `idx(x,y) = x*numy + y`.
    #[must_use]
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        x * self.numy + y
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    #[must_use]
    pub fn cell_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        let idx = self.index(x, y);
        &mut self.cells[idx]
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}

/// Computes grid dimensions, per-cell base squares, and snap parameters from configuration.
pub struct GridBuilder;

impl GridBuilder {
    pub fn build(config: &Config) -> Result<Grid, ConfigError> {
        if config.displacement_x() <= 0 {
            return Err(ConfigError::NonPositiveDisplacementX(config.displacement_x()));
        }
        if config.displacement_y() <= 0 {
            return Err(ConfigError::NonPositiveDisplacementY(config.displacement_y()));
        }

        let (numx, numy, squares, original_size, snap) = if config.use_origin {
            Self::build_origin_mode(config)
        } else {
            Self::build_even_mode(config)
        };

        if numx == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if numy == 0 {
            return Err(ConfigError::ZeroRows);
        }

        let cells = squares.into_iter().map(Cell::new).collect();

        let singlex = numx == 1;
        let singley = numy == 1;
        let justone = singlex && singley;
        let angle90 = justone || (config.wall_angle_deg - 90.0).abs() < 1e-6;
        let sinangle = (config.wall_angle_deg * std::f64::consts::PI / 180.0).sin();

        Ok(Grid {
            cells,
            numx,
            numy,
            original_size,
            snap,
            singlex,
            singley,
            justone,
            angle90,
            sinangle,
        })
    }

    /// Origin mode: every cell corner is computed in exact integer arithmetic from
    /// `config.displacement`, so cell boundaries reproduce bit-for-bit regardless of
    /// how large or oddly-sized the grid's coordinates are.
    fn build_origin_mode(config: &Config) -> (usize, usize, Vec<Square>, (f64, f64), SnapSpec) {
        let disp = config.displacement;
        let origin = config.origin;
        let min = config.min;
        let max = config.max;
        let margin = config.margin;

        let sqminx = floor_div(min.x() - origin.x(), disp.x());
        let sqmaxx = ceil_div(max.x() - origin.x(), disp.x());
        let sqminy = floor_div(min.y() - origin.y(), disp.y());
        let sqmaxy = ceil_div(max.y() - origin.y(), disp.y());

        let numx = (sqmaxx - sqminx).max(0) as usize;
        let numy = (sqmaxy - sqminy).max(0) as usize;

        let mut squares = Vec::with_capacity(numx * numy);
        for x in 0..numx {
            for y in 0..numy {
                let base_x = origin.x() + (x as i64 + sqminx) * disp.x();
                let base_y = origin.y() + (y as i64 + sqminy) * disp.y();
                let min_pt = Point::new(base_x - margin, base_y - margin);
                let max_pt = Point::new(base_x + disp.x() + margin, base_y + disp.y() + margin);
                squares.push(Square::from_bounds(min_pt, max_pt));
            }
        }

        let origin_x = origin.x() as f64;
        let origin_y = origin.y() as f64;
        let disp_x = disp.x() as f64;
        let disp_y = disp.y() as f64;

        // NOTE: the source uses `displacement.X/2` for both axes' shift, which is almost
        // certainly a copy-paste bug for the Y axis — kept verbatim, see DESIGN.md.
        let snap = SnapSpec {
            gridstep_x: disp_x,
            gridstep_y: disp_y,
            shift_x: origin_x + disp_x / 2.0 + sqminx as f64 * disp_x,
            shift_y: origin_y + disp_x / 2.0 + sqminy as f64 * disp_y,
        };

        let margin_f = margin as f64;
        let original_size = (disp_x + 2.0 * margin_f, disp_y + 2.0 * margin_f);

        (numx, numy, squares, original_size, snap)
    }

    /// Even mode: `numx`/`numy` come from the requested `config.displacement`, but the actual
    /// per-axis step is re-derived as `size/num` so the grid divides the bounding box evenly.
    /// That derived step is inherently floating-point.
    fn build_even_mode(config: &Config) -> (usize, usize, Vec<Square>, (f64, f64), SnapSpec) {
        let min = config.min;
        let max = config.max;
        let disp = config.displacement;

        let size_x = (max.x() - min.x()) as f64;
        let size_y = (max.y() - min.y()) as f64;

        let numx = (size_x / disp.x() as f64).ceil().max(0.0) as usize;
        let numy = (size_y / disp.y() as f64).ceil().max(0.0) as usize;

        let disp_x = if numx > 0 { size_x / numx as f64 } else { 0.0 };
        let disp_y = if numy > 0 { size_y / numy as f64 } else { 0.0 };

        let min_x = min.x() as f64;
        let min_y = min.y() as f64;
        let margin = config.margin as f64;

        let mut squares = Vec::with_capacity(numx * numy);
        for x in 0..numx {
            for y in 0..numy {
                let base_x = min_x + x as f64 * disp_x;
                let base_y = min_y + y as f64 * disp_y;
                let min_pt = Point::new(
                    round_to_i64(base_x - margin),
                    round_to_i64(base_y - margin),
                );
                let max_pt = Point::new(
                    round_to_i64(base_x + disp_x + margin),
                    round_to_i64(base_y + disp_y + margin),
                );
                squares.push(Square::from_bounds(min_pt, max_pt));
            }
        }

        let snap = SnapSpec {
            gridstep_x: disp_x,
            gridstep_y: disp_y,
            shift_x: min_x + disp_x / 2.0,
            shift_y: min_y + disp_y / 2.0,
        };

        let original_size = (disp_x + 2.0 * margin, disp_y + 2.0 * margin);

        (numx, numy, squares, original_size, snap)
    }
}

fn round_to_i64(v: f64) -> i64 {
    v.round() as i64
}

/// Floor division for signed integers with a strictly positive divisor.
fn floor_div(a: i64, b: i64) -> i64 {
    a.div_euclid(b)
}

/// Ceiling division for signed integers with a strictly positive divisor.
fn ceil_div(a: i64, b: i64) -> i64 {
    -(-a).div_euclid(b)
}
