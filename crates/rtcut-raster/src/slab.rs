//! Row-indexed rectangle stacks and their boundary events.

use serde::{Deserialize, Serialize};

/// One covered x-interval on one row of a slab stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangleSpan {
    /// Left edge.
    pub xmin: f64,
    /// Right edge.
    pub xmax: f64,
    /// Bottom of the row.
    pub ymin: f64,
    /// Top of the row.
    pub ymax: f64,
}

impl RectangleSpan {
    /// Create a span, normalizing the corner order.
    pub fn new(x1: f64, x2: f64, y1: f64, y2: f64) -> Self {
        Self {
            xmin: x1.min(x2),
            xmax: x1.max(x2),
            ymin: y1.min(y2),
            ymax: y1.max(y2),
        }
    }

    /// Width of the span.
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Do the x-ranges of two spans overlap or abut?
    pub fn touches_x(&self, other: &RectangleSpan) -> bool {
        self.xmin <= other.xmax && other.xmin <= self.xmax
    }
}

/// The spans of a single row, sorted by `xmin` and non-overlapping.
pub type Slab = Vec<RectangleSpan>;

/// Which edge of a span a boundary event marks.
///
/// `Start` orders before `End`, so at equal positions a span that begins is
/// seen before one that ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RectangleBoundaryKind {
    /// Left edge of a span.
    Start,
    /// Right edge of a span.
    End,
}

/// A span edge at a given x position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryEvent {
    /// X position of the edge.
    pub position: f64,
    /// Edge kind.
    pub kind: RectangleBoundaryKind,
}

impl BoundaryEvent {
    /// A span's left edge.
    pub fn start(position: f64) -> Self {
        Self {
            position,
            kind: RectangleBoundaryKind::Start,
        }
    }

    /// A span's right edge.
    pub fn end(position: f64) -> Self {
        Self {
            position,
            kind: RectangleBoundaryKind::End,
        }
    }

    /// Sweep order: by position, then `Start` before `End`.
    pub fn sorts_before_or_with(&self, other: &BoundaryEvent) -> bool {
        self.position < other.position
            || (self.position == other.position && self.kind <= other.kind)
    }
}

/// The `(ymin, ymax)` extent of a row, taken from its first span.
pub fn slab_y_range(slab: &[RectangleSpan]) -> Option<(f64, f64)> {
    slab.first().map(|r| (r.ymin, r.ymax))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_normalizes_corners() {
        let r = RectangleSpan::new(5.0, 2.0, 3.0, 1.0);
        assert_eq!(r.xmin, 2.0);
        assert_eq!(r.xmax, 5.0);
        assert_eq!(r.ymin, 1.0);
        assert_eq!(r.ymax, 3.0);
        assert_eq!(r.width(), 3.0);
    }

    #[test]
    fn test_touches_x() {
        let a = RectangleSpan::new(0.0, 10.0, 0.0, 1.0);
        assert!(a.touches_x(&RectangleSpan::new(10.0, 20.0, 1.0, 2.0)));
        assert!(a.touches_x(&RectangleSpan::new(2.0, 3.0, 1.0, 2.0)));
        assert!(!a.touches_x(&RectangleSpan::new(10.5, 20.0, 1.0, 2.0)));
    }

    #[test]
    fn test_event_order() {
        let s = BoundaryEvent::start(4.0);
        let e = BoundaryEvent::end(4.0);
        assert!(s.sorts_before_or_with(&e));
        assert!(!e.sorts_before_or_with(&s));
        assert!(BoundaryEvent::end(3.0).sorts_before_or_with(&s));
        assert!(RectangleBoundaryKind::Start < RectangleBoundaryKind::End);
    }

    #[test]
    fn test_span_serde() {
        let r = RectangleSpan::new(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"xmin":1.0,"xmax":2.0,"ymin":3.0,"ymax":4.0}"#);
    }
}
