//! Ray / outline intersection

use kurbo::{BezPath, Line, ParamCurve, Point};

/// Crossings closer than this are the same crossing reported by two
/// adjoining segments
const CROSSING_TOLERANCE: f64 = 1e-6;

/// X coordinates where the horizontal segment `(x_start, y)..(x_end, y)`
/// crosses any of `paths`, sorted ascending with shared endpoints merged.
pub fn horizontal_crossings(paths: &[BezPath], y: f64, x_start: f64, x_end: f64) -> Vec<f64> {
    let ray = Line::new(Point::new(x_start, y), Point::new(x_end, y));
    let (low, high) = if x_start <= x_end {
        (x_start, x_end)
    } else {
        (x_end, x_start)
    };

    let mut xs: Vec<f64> = paths
        .iter()
        .flat_map(|path| path.segments())
        .flat_map(|segment| {
            segment
                .intersect_line(ray)
                .into_iter()
                .map(move |hit| segment.eval(hit.segment_t))
        })
        // kurbo intersects the infinite line; keep the ray's extent only
        .filter(|point| point.x >= low - CROSSING_TOLERANCE && point.x <= high + CROSSING_TOLERANCE)
        .map(|point| point.x)
        .collect();

    xs.sort_by(f64::total_cmp);
    xs.dedup_by(|a, b| (*a - *b).abs() < CROSSING_TOLERANCE);
    xs
}
