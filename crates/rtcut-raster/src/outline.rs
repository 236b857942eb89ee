//! Rectilinear outline of a stack of rectangle rows.
//!
//! Every row of the stack holds x-sorted, non-overlapping spans sharing the
//! row's y-extent, and row `i + 1` sits directly above row `i`. The outline of
//! the union is assembled from two kinds of edges:
//!
//! - horizontal edges, found at every row boundary by sweeping the merged
//!   boundary events of the rows on either side: wherever exactly one of the
//!   two rows is covered, the boundary is part of the outline;
//! - vertical edges, two per maximal run of coverage inside a row.

use rtcut_math::{Point2D, Segment2D};

use crate::slab::{slab_y_range, BoundaryEvent, RectangleBoundaryKind, Slab};

/// Insert the span edges of row `row` into a sorted boundary list.
///
/// A `row` past the end of `slabs` adds nothing.
pub fn add_slab_boundaries(boundaries: &mut Vec<BoundaryEvent>, slabs: &[Slab], row: usize) {
    let Some(slab) = slabs.get(row) else {
        return;
    };
    for rect in slab {
        insert_sorted(boundaries, BoundaryEvent::start(rect.xmin));
        insert_sorted(boundaries, BoundaryEvent::end(rect.xmax));
    }
}

fn insert_sorted(boundaries: &mut Vec<BoundaryEvent>, event: BoundaryEvent) {
    let at = boundaries.partition_point(|e| e.sorts_before_or_with(&event));
    boundaries.insert(at, event);
}

/// Emit the horizontal segments at height `y` described by a sorted boundary list.
///
/// The sweep tracks how many spans cover the current position and draws
/// only where exactly one does. Fed a single row, this reproduces the row's
/// spans; fed two merged rows, it yields the parts covered by one row but
/// not the other. Zero-length pieces are never emitted.
pub fn process_boundary_list(segments: &mut Vec<Segment2D>, boundaries: &[BoundaryEvent], y: f64) {
    let mut depth: usize = 0;
    let mut start = 0.0;

    let emit = |segments: &mut Vec<Segment2D>, from: f64, to: f64| {
        if from != to {
            segments.push((Point2D::new(from, y), Point2D::new(to, y)));
        }
    };

    for event in boundaries {
        match event.kind {
            RectangleBoundaryKind::Start => {
                depth += 1;
                match depth {
                    1 => start = event.position,
                    // a second span begins: the lone run stops here
                    2 => emit(segments, start, event.position),
                    _ => {}
                }
            }
            RectangleBoundaryKind::End => {
                depth = depth.saturating_sub(1);
                match depth {
                    0 => emit(segments, start, event.position),
                    // back to a single covering span
                    1 => start = event.position,
                    _ => {}
                }
            }
        }
    }
}

/// Build the outline of the union of every span in `slabs`.
///
/// Appends all horizontal edges first (top of row 0, each row boundary,
/// bottom of the last row), then all vertical edges, both groups ordered by
/// row and then left to right. `total_rectangle_count` only sizes the output
/// buffer.
pub fn convert_list_of_slabs_to_segments(
    segments: &mut Vec<Segment2D>,
    slabs: &[Slab],
    total_rectangle_count: usize,
) {
    let Some(last) = slabs.len().checked_sub(1) else {
        return;
    };
    if total_rectangle_count > 0 {
        // worst case, but common
        segments.reserve(4 * total_rectangle_count);
    }

    // Horizontal: N rows give N + 1 boundaries.
    if let Some((ymin, _)) = slab_y_range(&slabs[0]) {
        let mut boundaries = Vec::new();
        add_slab_boundaries(&mut boundaries, slabs, 0);
        process_boundary_list(segments, &boundaries, ymin);
    }

    for row in 0..last {
        let y = match (slab_y_range(&slabs[row]), slab_y_range(&slabs[row + 1])) {
            (Some((_, ymax)), _) => ymax,
            (None, Some((ymin, _))) => ymin,
            (None, None) => continue,
        };
        let mut boundaries = Vec::new();
        add_slab_boundaries(&mut boundaries, slabs, row);
        add_slab_boundaries(&mut boundaries, slabs, row + 1);
        process_boundary_list(segments, &boundaries, y);
    }

    if let Some((_, ymax)) = slab_y_range(&slabs[last]) {
        let mut boundaries = Vec::new();
        add_slab_boundaries(&mut boundaries, slabs, last);
        process_boundary_list(segments, &boundaries, ymax);
    }

    // Vertical: one pair per maximal run of coverage.
    for row in 0..slabs.len() {
        let Some((ymin, ymax)) = slab_y_range(&slabs[row]) else {
            continue;
        };
        let mut boundaries = Vec::new();
        add_slab_boundaries(&mut boundaries, slabs, row);

        let mut depth: usize = 0;
        let mut run_start = 0.0;
        for event in &boundaries {
            match event.kind {
                RectangleBoundaryKind::Start => {
                    depth += 1;
                    if depth == 1 {
                        run_start = event.position;
                    }
                }
                RectangleBoundaryKind::End => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 && run_start != event.position {
                        segments.push((
                            Point2D::new(run_start, ymin),
                            Point2D::new(run_start, ymax),
                        ));
                        segments.push((
                            Point2D::new(event.position, ymin),
                            Point2D::new(event.position, ymax),
                        ));
                    }
                }
            }
        }
    }
}

/// Convenience wrapper returning the outline of `slabs` as a new vector.
pub fn slabs_to_segments(slabs: &[Slab]) -> Vec<Segment2D> {
    let total = slabs.iter().map(Vec::len).sum();
    let mut segments = Vec::new();
    convert_list_of_slabs_to_segments(&mut segments, slabs, total);
    segments
}
