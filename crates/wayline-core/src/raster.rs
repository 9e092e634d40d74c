//! Line rasterisation on the tile grid.

use crate::geom::Point;

/// Bresenham line from `a` to `b`, both endpoints included.
pub fn line(a: Point, b: Point) -> Vec<Point> {
    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };
    let mut err = dx + dy;
    let mut p = a;
    let mut out = Vec::with_capacity((dx - dy) as usize + 1);
    loop {
        out.push(p);
        if p == b {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            p.x += sx;
        }
        if e2 <= dx {
            err += dx;
            p.y += sy;
        }
    }
    out
}

/// 4-connected staircase from `a` to `b`, both endpoints included.
///
/// Each step moves along the axis with the larger remaining distance
/// (x on ties), so the walk hugs the straight line.
pub fn walk_4(a: Point, b: Point) -> Vec<Point> {
    let mut out = Vec::with_capacity(a.manhattan(b) as usize + 1);
    let mut p = a;
    out.push(p);
    while p != b {
        let rx = b.x - p.x;
        let ry = b.y - p.y;
        if rx.abs() >= ry.abs() {
            p.x += rx.signum();
        } else {
            p.y += ry.signum();
        }
        out.push(p);
    }
    out
}
