use crate::point::Point;
use crate::polyline::Polyline;

/// Continuity state carried for one cell across layers.
///
/// Opaque to the splitter: only a concrete [`MotionPlanner`] interprets it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionPlanningState {
    last_point: Option<Point>,
    first_use: bool,
}

impl Default for MotionPlanningState {
    fn default() -> Self {
        Self {
            last_point: None,
            first_use: true,
        }
    }
}

impl MotionPlanningState {
    #[must_use]
    pub fn last_point(&self) -> Option<Point> {
        self.last_point
    }

    #[must_use]
    pub fn first_use(&self) -> bool {
        self.first_use
    }

    pub fn set_last_point(&mut self, p: Point) {
        self.last_point = Some(p);
        self.first_use = false;
    }
}

/// Reorders a cell's output paths to minimize travel, carrying continuity state between layers.
/// Choosing a concrete policy is explicitly out of scope; this crate only defines
/// the hand-off boundary and [`NoopPlanner`] for callers that don't need one.
pub trait MotionPlanner {
    fn plan(&mut self, state: &mut MotionPlanningState, closed: bool, paths: &mut Vec<Polyline>);
}

/// A planner that leaves `paths` untouched but still threads `state.last_point` through, so a
/// real planner can be swapped in later without changing the hand-off call site.
#[derive(Debug, Default)]
pub struct NoopPlanner;

impl MotionPlanner for NoopPlanner {
    fn plan(&mut self, state: &mut MotionPlanningState, _closed: bool, paths: &mut Vec<Polyline>) {
        if let Some(last) = paths.last().and_then(|p| p.points().last().copied()) {
            state.set_last_point(last);
        }
    }
}
