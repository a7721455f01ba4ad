use crate::clip::ClipApplier;
use crate::config::Config;
use crate::distributor::{DeferredBuckets, OpenSegmentDistributor, PerCellState};
use crate::error::Result;
use crate::grid::{Grid, GridBuilder};
use crate::motion::{MotionPlanner, NoopPlanner};
use crate::point::Point;
use crate::polyline::Polyline;
use crate::snap::Snapper;
use crate::tilt::SquareTilter;

/// Orchestrates grid construction, per-layer tilt correction, fast-path distribution, clipping,
/// and the motion-planning hand-off.
pub struct PathSplitter {
    config: Config,
    grid: Option<Grid>,
    states: Vec<PerCellState>,
    deferred: DeferredBuckets,
    planner: Box<dyn MotionPlanner>,
}

impl PathSplitter {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_planner(config, Box::new(NoopPlanner))
    }

    #[must_use]
    pub fn with_planner(config: Config, planner: Box<dyn MotionPlanner>) -> Self {
        Self {
            config,
            grid: None,
            states: Vec::new(),
            deferred: Vec::new(),
            planner,
        }
    }

    #[must_use]
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// Builds the grid from `config`. Idempotent: a second call is a no-op.
    pub fn setup(&mut self) -> Result<()> {
        if self.grid.is_some() {
            return Ok(());
        }
        let grid = GridBuilder::build(&self.config)?;
        self.states = vec![PerCellState::default(); grid.numx() * grid.numy()];
        self.deferred = vec![Vec::new(); grid.numx() * grid.numy()];
        self.grid = Some(grid);
        Ok(())
    }

    /// Splits `paths` across the grid for layer `z`, scaled by `scaling`.
    ///
    /// `paths_closed[i]` says whether `paths[i]` is a closed polygon. On `justone`, every path
    /// is assigned verbatim to cell (0,0).
    pub fn process_paths(
        &mut self,
        paths: &[Polyline],
        paths_closed: &[bool],
        z: f64,
        scaling: f64,
    ) -> Result<()> {
        self.setup()?;
        debug_assert_eq!(paths.len(), paths_closed.len());

        let grid = self.grid.as_mut().expect("setup() populated the grid");
        for cell in grid.cells_mut() {
            cell.paths.clear();
        }

        if grid.justone {
            let cell = grid.cell_mut(0, 0);
            cell.actual_square = cell.original_square;
            cell.paths.extend(paths.iter().cloned());
            return self.run_motion_planning();
        }

        SquareTilter::apply(
            grid,
            z,
            self.config.zmin,
            scaling,
            (self.config.displacement.x(), self.config.displacement.y()),
        )?;

        for b in self.deferred.iter_mut() {
            b.clear();
        }

        for (path, &closed) in paths.iter().zip(paths_closed.iter()) {
            if closed {
                Self::clip_closed_path(grid, path)?;
            } else {
                let snapped = Snapper::snap_path(grid, path.points());
                OpenSegmentDistributor::distribute(
                    grid,
                    &mut self.states,
                    &mut self.deferred,
                    path.points(),
                    &snapped,
                );
            }
        }

        Self::drain_deferred_buckets(grid, &mut self.deferred);

        self.run_motion_planning()
    }

    fn clip_closed_path(grid: &mut Grid, path: &Polyline) -> Result<()> {
        let numx = grid.numx();
        let numy = grid.numy();
        for x in 0..numx {
            for y in 0..numy {
                let window = grid.cell(x, y).actual_square;
                let fragments = ClipApplier::clip_closed(&window, path)?;
                grid.cell_mut(x, y).paths.extend(fragments);
            }
        }
        Ok(())
    }

    fn drain_deferred_buckets(grid: &mut Grid, deferred: &mut DeferredBuckets) {
        let numx = grid.numx();
        let numy = grid.numy();
        for x in 0..numx {
            for y in 0..numy {
                let idx = grid.index(x, y);
                if deferred[idx].is_empty() {
                    continue;
                }
                let window = grid.cell(x, y).actual_square;
                let fragments = ClipApplier::clip_open(&window, &deferred[idx]);
                grid.cell_mut(x, y).paths.extend(fragments);
                deferred[idx].clear();
            }
        }
    }

    fn run_motion_planning(&mut self) -> Result<()> {
        if !self.config.apply_motion_planning {
            return Ok(());
        }
        let grid = self.grid.as_mut().expect("setup() populated the grid");
        for cell in grid.cells_mut() {
            if cell.paths.is_empty() {
                continue;
            }
            self.planner
                .plan(&mut cell.motion_planning_state, false, &mut cell.paths);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::SplitError;
    use crate::error::{ConfigError, LayerGeometryError};

    fn config(min: Point, max: Point, displacement: Point, margin: i64, wall_angle_deg: f64) -> Config {
        Config {
            use_origin: false,
            origin: Point::ZERO,
            displacement,
            margin,
            min,
            max,
            zmin: 0.0,
            wall_angle_deg,
            apply_motion_planning: false,
        }
    }

    #[test]
    fn test_scenario_single_cell() {
        let mut splitter = PathSplitter::new(config(
            Point::new(0, 0),
            Point::new(100, 100),
            Point::new(100, 100),
            5,
            90.0,
        ));
        let path = Polyline::new(vec![Point::new(10, 10), Point::new(90, 90)]);
        splitter.process_paths(&[path.clone()], &[false], 0.0, 1.0).unwrap();

        let grid = splitter.grid().unwrap();
        assert_eq!(grid.numx(), 1);
        assert_eq!(grid.numy(), 1);
        assert_eq!(grid.cell(0, 0).paths, vec![path]);
    }

    #[test]
    fn test_scenario_overlap_strip_no_clip() {
        let mut splitter = PathSplitter::new(config(
            Point::new(0, 0),
            Point::new(200, 100),
            Point::new(100, 100),
            10,
            90.0,
        ));
        let path = Polyline::new(vec![Point::new(50, 50), Point::new(150, 50)]);
        splitter.process_paths(&[path.clone()], &[false], 0.0, 1.0).unwrap();

        let grid = splitter.grid().unwrap();
        assert_eq!(grid.cell(0, 0).paths, vec![path.clone()]);
        assert_eq!(grid.cell(1, 0).paths, vec![path]);
    }

    #[test]
    fn test_scenario_clearly_crossing_invokes_clipper() {
        let mut splitter = PathSplitter::new(config(
            Point::new(0, 0),
            Point::new(200, 100),
            Point::new(100, 100),
            10,
            90.0,
        ));
        let path = Polyline::new(vec![Point::new(20, 50), Point::new(180, 50)]);
        splitter.process_paths(&[path], &[false], 0.0, 1.0).unwrap();

        let grid = splitter.grid().unwrap();
        assert_eq!(grid.cell(0, 0).paths.len(), 1);
        assert_eq!(grid.cell(0, 0).paths[0].points()[0], Point::new(20, 50));
        assert_eq!(
            *grid.cell(0, 0).paths[0].points().last().unwrap(),
            Point::new(110, 50)
        );
        assert_eq!(grid.cell(1, 0).paths.len(), 1);
        assert_eq!(grid.cell(1, 0).paths[0].points()[0], Point::new(90, 50));
        assert_eq!(
            *grid.cell(1, 0).paths[0].points().last().unwrap(),
            Point::new(180, 50)
        );
    }

    #[test]
    fn test_scenario_tilt_exceeds_displacement_errors() {
        let mut splitter = PathSplitter::new(config(
            Point::new(0, 0),
            Point::new(200, 100),
            Point::new(100, 100),
            10,
            80.0,
        ));
        let path = Polyline::new(vec![Point::new(50, 50), Point::new(150, 50)]);
        let err = splitter
            .process_paths(&[path], &[false], 200.0, 1.0)
            .unwrap_err();
        assert!(matches!(
            err,
            SplitError::LayerGeometry(LayerGeometryError::ShiftExceedsDisplacementX { .. })
        ));
    }

    #[test]
    fn test_scenario_closed_path_across_boundary() {
        let mut splitter = PathSplitter::new(config(
            Point::new(0, 0),
            Point::new(200, 100),
            Point::new(100, 100),
            10,
            90.0,
        ));
        let square = Polyline::new(vec![
            Point::new(50, 40),
            Point::new(150, 40),
            Point::new(150, 60),
            Point::new(50, 60),
        ]);
        splitter.process_paths(&[square], &[true], 0.0, 1.0).unwrap();

        let grid = splitter.grid().unwrap();
        assert_eq!(grid.cell(0, 0).paths.len(), 1);
        assert_eq!(grid.cell(1, 0).paths.len(), 1);
    }

    #[test]
    fn test_setup_is_idempotent() {
        let mut splitter = PathSplitter::new(config(
            Point::new(0, 0),
            Point::new(100, 100),
            Point::new(100, 100),
            5,
            90.0,
        ));
        splitter.setup().unwrap();
        splitter.setup().unwrap();
        assert_eq!(splitter.grid().unwrap().numx(), 1);
    }

    #[test]
    fn test_zero_columns_propagates_config_error() {
        let mut splitter = PathSplitter::new(config(
            Point::new(0, 0),
            Point::new(0, 100),
            Point::new(100, 100),
            5,
            90.0,
        ));
        let err = splitter.setup().unwrap_err();
        assert!(matches!(err, SplitError::Config(ConfigError::ZeroColumns)));
    }
}
