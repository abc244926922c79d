//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in screen space (pixels, y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Two triangles covering a rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    vec![
        Vertex::new(l, t, color),
        Vertex::new(rt, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, t, color),
        Vertex::new(rt, b, color),
    ]
}

/// Rectangle outline of the given thickness (drawn inside the bounds)
pub fn rect_outline(r: &Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(r.size.x / 2.0).min(r.size.y / 2.0);
    let mut vertices = Vec::with_capacity(24);
    // Top, bottom, left, right bars
    vertices.extend(rect(&Rect::new(r.left(), r.top(), r.size.x, t), color));
    vertices.extend(rect(&Rect::new(r.left(), r.bottom() - t, r.size.x, t), color));
    vertices.extend(rect(&Rect::new(r.left(), r.top() + t, t, r.size.y - 2.0 * t), color));
    vertices.extend(rect(
        &Rect::new(r.right() - t, r.top() + t, t, r.size.y - 2.0 * t),
        color,
    ));
    vertices
}

/// Ship silhouette: a nose triangle over a hull, inside the ship's bounds
pub fn ship(r: &Rect, hull: [f32; 4], cockpit: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(12);
    let c = r.center();
    let hull_top = r.top() + r.size.y * 0.45;

    // Nose
    vertices.push(Vertex::new(c.x, r.top(), hull));
    vertices.push(Vertex::new(r.right(), hull_top, hull));
    vertices.push(Vertex::new(r.left(), hull_top, hull));

    // Hull
    vertices.extend(rect(
        &Rect::new(r.left(), hull_top, r.size.x, r.bottom() - hull_top),
        hull,
    ));

    // Cockpit
    let w = r.size.x * 0.12;
    vertices.push(Vertex::new(c.x, r.top() + r.size.y * 0.2, cockpit));
    vertices.push(Vertex::new(c.x + w, hull_top, cockpit));
    vertices.push(Vertex::new(c.x - w, hull_top, cockpit));

    vertices
}

/// Filled polygon approximating a rock inscribed in the meteor's box.
///
/// `seed` jitters the radius per vertex so meteors don't all look alike;
/// every vertex stays inside the bounding box.
pub fn meteor(r: &Rect, color: [f32; 4], seed: u32, segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let center = r.center();
    let half = r.size / 2.0;

    let radius_at = |i: u32| -> f32 {
        let h = (seed ^ i.wrapping_mul(2654435761)).wrapping_mul(2246822519);
        0.75 + (h % 1000) as f32 / 1000.0 * 0.25
    };
    let point = |i: u32| -> Vec2 {
        let theta = (i % segments) as f32 / segments as f32 * 2.0 * PI;
        let k = radius_at(i % segments);
        center + Vec2::new(theta.cos() * half.x * k, theta.sin() * half.y * k)
    };

    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    for i in 0..segments {
        let p1 = point(i);
        let p2 = point(i + 1);
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inside(r: &Rect, v: &Vertex) -> bool {
        let eps = 1e-3;
        v.position[0] >= r.left() - eps
            && v.position[0] <= r.right() + eps
            && v.position[1] >= r.top() - eps
            && v.position[1] <= r.bottom() + eps
    }

    #[test]
    fn test_rect_is_two_triangles() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        let v = rect(&r, [1.0; 4]);
        assert_eq!(v.len(), 6);
        assert!(v.iter().all(|v| inside(&r, v)));
    }

    #[test]
    fn test_outline_stays_inside() {
        let r = Rect::new(0.0, 0.0, 66.0, 46.0);
        let v = rect_outline(&r, 3.0, [1.0; 4]);
        assert_eq!(v.len(), 24);
        assert!(v.iter().all(|v| inside(&r, v)));
    }

    #[test]
    fn test_ship_stays_inside() {
        let r = Rect::new(295.0, 430.0, 50.0, 30.0);
        let v = ship(&r, [1.0; 4], [0.5; 4]);
        assert_eq!(v.len() % 3, 0);
        assert!(v.iter().all(|v| inside(&r, v)));
    }

    #[test]
    fn test_meteor_stays_inside() {
        let r = Rect::new(100.0, -30.0, 30.0, 30.0);
        for seed in [0, 1, 17, 9999] {
            let v = meteor(&r, [1.0; 4], seed, 9);
            assert_eq!(v.len(), 27);
            assert!(v.iter().all(|v| inside(&r, v)));
        }
    }
}
