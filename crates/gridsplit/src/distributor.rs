use crate::grid::Grid;
use crate::point::Point;
use crate::polyline::Polyline;

/// Scratch state for one cell, reused across paths within a single `process_paths` call.
/// Distinct from [`crate::Cell`]'s persistent data so the splitter stays
/// reentrant across layers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerCellState {
    no_lines: bool,
    create_new: bool,
    previous_point_is_inside: bool,
    current_point_is_inside: bool,
    point_added: bool,
}

impl PerCellState {
    fn reset(&mut self) {
        *self = Self {
            no_lines: true,
            ..Default::default()
        };
    }
}

/// Per-cell buckets of segments that crossed a boundary and must go through the clipper.
pub type DeferredBuckets = Vec<Vec<(Point, Point)>>;

/// The containment state machine that assigns open-path segments directly to cells when both
/// endpoints stay inside the same window(s), falling back to the clipper only for segments that
/// cross a boundary. This is the hard 35% of the splitter.
pub struct OpenSegmentDistributor;

impl OpenSegmentDistributor {
    /// Distributes one open path across `grid`'s cells.
    ///
    /// `states` is reset internally at the start of the call; it must be sized `numx*numy`.
    /// `deferred` accumulates across the whole `process_paths` call and is sized `numx*numy`.
    pub fn distribute(
        grid: &mut Grid,
        states: &mut [PerCellState],
        deferred: &mut DeferredBuckets,
        path: &[Point],
        snapped: &[(usize, usize)],
    ) {
        debug_assert_eq!(path.len(), snapped.len());
        if path.is_empty() {
            return;
        }

        for s in states.iter_mut() {
            s.reset();
        }

        let numx = grid.numx();
        let numy = grid.numy();

        let mut idx = 0usize;
        let mut previous: Option<(Point, (usize, usize))> = None;

        // Path-level, not per-vertex: true until some cell commits an append, and reset to
        // true only here and inside `reset_line_keeping`. Re-initializing it on every vertex
        // would let an already-active cell silently re-prime instead of forcing a boundary
        // reset when a new cell joins mid-path.
        let mut no_segment_already_added = true;

        while idx < path.len() {
            let current = path[idx];
            let (cx, cy) = snapped[idx];

            let (minx, maxx, miny, maxy) = candidate_range(previous.map(|p| p.1), (cx, cy), numx, numy);

            let mut crossed = false;

            'scan: for gx in minx..=maxx {
                for gy in miny..=maxy {
                    let cell_idx = grid.index(gx, gy);
                    let inside = grid.cell(gx, gy).actual_square.contains(current);
                    states[cell_idx].current_point_is_inside = inside;

                    if inside {
                        if states[cell_idx].no_lines {
                            if no_segment_already_added {
                                states[cell_idx].no_lines = false;
                                states[cell_idx].create_new = true;
                            } else {
                                reset_line_keeping(
                                    (minx, maxx, miny, maxy),
                                    previous.expect("a prior append implies a previous point").0,
                                    current,
                                    numy,
                                    states,
                                    deferred,
                                    &mut no_segment_already_added,
                                );
                                crossed = true;
                                break 'scan;
                            }
                        } else if states[cell_idx].previous_point_is_inside {
                            let prev_point = previous
                                .expect("cell already started implies a previous point")
                                .0;
                            if states[cell_idx].create_new {
                                grid.cell_mut(gx, gy)
                                    .paths
                                    .push(Polyline::new(vec![prev_point, current]));
                                states[cell_idx].create_new = false;
                            } else {
                                grid.cell_mut(gx, gy)
                                    .paths
                                    .last_mut()
                                    .expect("cell started implies an open polyline exists")
                                    .points_mut()
                                    .push(current);
                            }
                            states[cell_idx].point_added = true;
                            no_segment_already_added = false;
                        } else {
                            reset_line_keeping(
                                (minx, maxx, miny, maxy),
                                previous.expect("cell started implies a previous point").0,
                                current,
                                numy,
                                states,
                                deferred,
                                &mut no_segment_already_added,
                            );
                            crossed = true;
                            break 'scan;
                        }
                    } else if states[cell_idx].previous_point_is_inside {
                        reset_line_keeping(
                            (minx, maxx, miny, maxy),
                            previous.expect("previous_point_is_inside implies a previous point").0,
                            current,
                            numy,
                            states,
                            deferred,
                            &mut no_segment_already_added,
                        );
                        crossed = true;
                        break 'scan;
                    }
                }
            }

            if crossed {
                // re-process `current` as the start of a fresh line.
                previous = None;
                continue;
            }

            for gx in minx..=maxx {
                for gy in miny..=maxy {
                    let cell_idx = grid.index(gx, gy);
                    states[cell_idx].previous_point_is_inside = states[cell_idx].current_point_is_inside;
                    states[cell_idx].point_added = false;
                }
            }

            previous = Some((current, (cx, cy)));
            idx += 1;
        }
    }
}

fn candidate_range(
    previous: Option<(usize, usize)>,
    current: (usize, usize),
    numx: usize,
    numy: usize,
) -> (usize, usize, usize, usize) {
    let (cx, cy) = current;
    let (lo_x, hi_x) = match previous {
        Some((px, _)) => (cx.min(px), cx.max(px)),
        None => (cx, cx),
    };
    let (lo_y, hi_y) = match previous {
        Some((_, py)) => (cy.min(py), cy.max(py)),
        None => (cy, cy),
    };

    let clamp = |v: i64, max: usize| v.clamp(0, max as i64 - 1) as usize;
    (
        clamp(lo_x as i64 - 2, numx),
        clamp(hi_x as i64 + 2, numx),
        clamp(lo_y as i64 - 2, numy),
        clamp(hi_y as i64 + 2, numy),
    )
}

/// The segment `[previous, current]` crossed a boundary: defer it in every cell of `range` that
/// didn't already commit an append this step, then reset every cell's scratch state so the next
/// iteration re-examines `current` as the start of a fresh line. Also resets the path-level
/// `no_segment_already_added` flag, since a fresh line is starting.
fn reset_line_keeping(
    range: (usize, usize, usize, usize),
    previous: Point,
    current: Point,
    numy: usize,
    states: &mut [PerCellState],
    deferred: &mut DeferredBuckets,
    no_segment_already_added: &mut bool,
) {
    let (minx, maxx, miny, maxy) = range;
    for gx in minx..=maxx {
        for gy in miny..=maxy {
            let idx = gx * numy + gy;
            if !states[idx].point_added {
                deferred[idx].push((previous, current));
            }
        }
    }

    for s in states.iter_mut() {
        s.reset();
    }
    *no_segment_already_added = true;
}
