#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn point_distance_is_euclidean() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(3.0, 4.0);
    assert_eq!(a.distance_to(b), 5.0);
    assert_eq!(b.distance_to(a), 5.0);
}

#[test]
fn rect_contains_interior_point() {
    let r = Rect { x: 10.0, y: 10.0, width: 20.0, height: 10.0 };
    assert!(r.contains(Point::new(15.0, 15.0)));
}

#[test]
fn rect_contains_all_four_edges() {
    let r = Rect { x: 10.0, y: 10.0, width: 20.0, height: 10.0 };
    assert!(r.contains(Point::new(10.0, 15.0)));
    assert!(r.contains(Point::new(30.0, 15.0)));
    assert!(r.contains(Point::new(20.0, 10.0)));
    assert!(r.contains(Point::new(20.0, 20.0)));
    assert!(r.contains(Point::new(30.0, 20.0)));
}

#[test]
fn rect_excludes_points_just_outside() {
    let r = Rect { x: 10.0, y: 10.0, width: 20.0, height: 10.0 };
    assert!(!r.contains(Point::new(9.9, 15.0)));
    assert!(!r.contains(Point::new(30.1, 15.0)));
    assert!(!r.contains(Point::new(20.0, 9.9)));
    assert!(!r.contains(Point::new(20.0, 20.1)));
}

#[test]
fn rect_center() {
    let r = Rect { x: 0.0, y: 0.0, width: 180.0, height: 140.0 };
    assert_eq!(r.center(), Point::new(90.0, 70.0));
}

#[test]
fn segment_midpoint() {
    let s = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    assert_eq!(s.midpoint(), Point::new(5.0, 0.0));
}
