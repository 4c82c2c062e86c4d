//! UFO contour to kurbo path conversion

use kurbo::{BezPath, Point};
use norad::{Contour, ContourPoint, PointType};

pub fn contours_to_bezpaths(contours: &[Contour]) -> Vec<BezPath> {
    contours.iter().map(contour_to_bezpath).collect()
}

/// Convert one UFO contour into a path.
///
/// Closed contours are walked from their first on-curve point and wrap back
/// to it. A contour starting with a `move` point is open.
pub fn contour_to_bezpath(contour: &Contour) -> BezPath {
    let points = &contour.points;
    let mut path = BezPath::new();
    if points.is_empty() {
        return path;
    }

    let closed = points[0].typ != PointType::Move;
    let Some(start) = points.iter().position(|p| p.typ != PointType::OffCurve) else {
        // All off-curve: a TrueType-style closed quadratic loop
        let implied = midpoint(to_point(&points[points.len() - 1]), to_point(&points[0]));
        let controls: Vec<Point> = points.iter().map(to_point).collect();
        path.move_to(implied);
        push_qcurve(&mut path, &controls, implied);
        path.close_path();
        return path;
    };

    path.move_to(to_point(&points[start]));
    let mut pending_offcurves: Vec<Point> = Vec::new();
    let steps = if closed { points.len() } else { points.len() - 1 };

    for step in 1..=steps {
        let point = &points[(start + step) % points.len()];
        let pt = to_point(point);
        match point.typ {
            PointType::OffCurve => {
                pending_offcurves.push(pt);
                continue;
            }
            PointType::Move | PointType::Line => {
                path.line_to(pt);
            }
            PointType::Curve => match pending_offcurves.len() {
                0 => path.line_to(pt),
                1 => path.quad_to(pending_offcurves[0], pt),
                n => path.curve_to(pending_offcurves[n - 2], pending_offcurves[n - 1], pt),
            },
            PointType::QCurve => push_qcurve(&mut path, &pending_offcurves, pt),
        }
        pending_offcurves.clear();
    }

    if closed {
        path.close_path();
    }
    path
}

/// Quadratic run with implied on-curve points between consecutive controls
fn push_qcurve(path: &mut BezPath, controls: &[Point], end: Point) {
    if controls.is_empty() {
        path.line_to(end);
        return;
    }
    for (i, &cp) in controls.iter().enumerate() {
        let segment_end = match controls.get(i + 1) {
            Some(&next_cp) => midpoint(cp, next_cp),
            None => end,
        };
        path.quad_to(cp, segment_end);
    }
}

fn to_point(point: &ContourPoint) -> Point {
    Point::new(point.x, point.y)
}

fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, Shape};

    fn point(x: f64, y: f64, typ: PointType) -> ContourPoint {
        ContourPoint::new(x, y, typ, false, None, None)
    }

    #[test]
    fn closed_line_contour() {
        let contour = Contour::new(
            vec![
                point(0.0, 0.0, PointType::Line),
                point(100.0, 0.0, PointType::Line),
                point(100.0, 100.0, PointType::Line),
                point(0.0, 100.0, PointType::Line),
            ],
            None,
        );
        let path = contour_to_bezpath(&contour);
        let elements = path.elements();
        assert_eq!(elements.len(), 6); // move, 4 lines, close
        assert_eq!(elements[0], PathEl::MoveTo(Point::new(0.0, 0.0)));
        assert_eq!(elements[5], PathEl::ClosePath);
        assert_eq!(path.area().abs(), 10_000.0);
    }

    #[test]
    fn starts_at_first_on_curve_point() {
        let contour = Contour::new(
            vec![
                point(0.0, 50.0, PointType::OffCurve),
                point(50.0, 100.0, PointType::Curve),
                point(100.0, 50.0, PointType::OffCurve),
                point(50.0, 0.0, PointType::QCurve),
            ],
            None,
        );
        let path = contour_to_bezpath(&contour);
        assert_eq!(path.elements()[0], PathEl::MoveTo(Point::new(50.0, 100.0)));
        assert!(matches!(path.elements()[1], PathEl::QuadTo(..)));
        assert!(matches!(path.elements()[2], PathEl::QuadTo(..)));
    }

    #[test]
    fn open_contour_is_not_closed() {
        let contour = Contour::new(
            vec![
                point(0.0, 0.0, PointType::Move),
                point(100.0, 0.0, PointType::Line),
            ],
            None,
        );
        let path = contour_to_bezpath(&contour);
        assert_eq!(path.elements().len(), 2);
        assert!(!path.elements().contains(&PathEl::ClosePath));
    }

    #[test]
    fn all_off_curve_contour_uses_implied_points() {
        let contour = Contour::new(
            vec![
                point(0.0, 0.0, PointType::OffCurve),
                point(100.0, 0.0, PointType::OffCurve),
                point(100.0, 100.0, PointType::OffCurve),
                point(0.0, 100.0, PointType::OffCurve),
            ],
            None,
        );
        let path = contour_to_bezpath(&contour);
        assert_eq!(path.elements()[0], PathEl::MoveTo(Point::new(0.0, 50.0)));
        assert_eq!(path.elements().len(), 6);
    }

    #[test]
    fn empty_contour_is_empty_path() {
        let contour = Contour::new(Vec::new(), None);
        assert!(contour_to_bezpath(&contour).elements().is_empty());
    }
}
