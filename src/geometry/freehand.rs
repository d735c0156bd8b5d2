//! Pressure-style ink outlines for freehand strokes.
//!
//! Pointer samples carry no pressure, so pressure is simulated from how
//! far apart consecutive samples are: fast strokes thin out, slow strokes
//! swell. The outline is two rails offset on either side of the smoothed
//! centre line plus round caps, and every rail is smoothed with quadratic
//! curves through the midpoints of consecutive samples.

use std::f32::consts::PI;

use egui::{Color32, Mesh, Pos2, Vec2};

/// Segments sampled per quadratic curve.
const CURVE_STEPS: usize = 4;
/// Segments sampled per round cap.
const CAP_STEPS: usize = 8;
/// How quickly simulated pressure follows the pointer speed.
const RATE_OF_PRESSURE_CHANGE: f32 = 0.275;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InkOptions {
    /// Diameter of the stroke at half pressure.
    pub size: f32,
    /// How much pressure affects the width, `0.0..=1.0`.
    pub thinning: f32,
    /// How far each sample is pulled toward the previous one, `0.0..=1.0`.
    pub streamline: f32,
}

impl Default for InkOptions {
    fn default() -> Self {
        Self {
            size: 8.0,
            thinning: 0.5,
            streamline: 0.5,
        }
    }
}

/// Both sides of a stroke plus the radii of its end caps.
#[derive(Debug, Clone, PartialEq)]
pub struct InkOutline {
    pub centre: Vec<Pos2>,
    pub left: Vec<Pos2>,
    pub right: Vec<Pos2>,
    pub start_radius: f32,
    pub end_radius: f32,
}

impl InkOutline {
    pub fn new(points: &[Pos2], options: &InkOptions) -> Option<Self> {
        let centre = streamline(points, options.streamline);
        if centre.is_empty() {
            return None;
        }
        let radii = simulated_radii(&centre, options);

        let mut left = Vec::with_capacity(centre.len());
        let mut right = Vec::with_capacity(centre.len());
        let mut last_direction = Vec2::X;
        for i in 0..centre.len() {
            let prev = centre[i.saturating_sub(1)];
            let next = centre[(i + 1).min(centre.len() - 1)];
            let direction = (next - prev).normalized();
            if direction.x.is_finite() && direction != Vec2::ZERO {
                last_direction = direction;
            }
            let normal = last_direction.rot90();
            left.push(centre[i] + normal * radii[i]);
            right.push(centre[i] - normal * radii[i]);
        }

        Some(Self {
            start_radius: radii[0],
            end_radius: radii[radii.len() - 1],
            centre,
            left,
            right,
        })
    }

    /// The whole outline as one closed loop, smoothed through midpoints.
    ///
    /// Order: left rail forward, end cap, right rail backward, start cap.
    pub fn closed_loop(&self) -> Vec<Pos2> {
        let first = self.centre[0];
        let last = self.centre[self.centre.len() - 1];

        let mut raw = self.left.clone();
        raw.extend(cap(last, self.left[self.left.len() - 1], self.end_radius));
        raw.extend(self.right.iter().rev().copied());
        raw.extend(cap(first, self.right[0], self.start_radius));

        smooth_closed(&raw)
    }

    /// Triangles filling the outline: a band between the smoothed rails
    /// and a fan for each cap.
    pub fn to_mesh(&self, color: Color32) -> Mesh {
        let mut mesh = Mesh::default();
        let left = smooth_open(&self.left);
        let right = smooth_open(&self.right);

        for i in 0..left.len().min(right.len()).saturating_sub(1) {
            let base = mesh.vertices.len() as u32;
            mesh.colored_vertex(left[i], color);
            mesh.colored_vertex(left[i + 1], color);
            mesh.colored_vertex(right[i + 1], color);
            mesh.colored_vertex(right[i], color);
            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base, base + 2, base + 3);
        }

        let first = self.centre[0];
        let last = self.centre[self.centre.len() - 1];
        fan(&mut mesh, last, self.end_radius, color);
        fan(&mut mesh, first, self.start_radius, color);
        mesh
    }
}

/// Smoothed closed outline for a freehand stroke; empty when there are no samples.
pub fn freehand_outline(points: &[Pos2], options: &InkOptions) -> Vec<Pos2> {
    InkOutline::new(points, options)
        .map(|outline| outline.closed_loop())
        .unwrap_or_default()
}

fn streamline(points: &[Pos2], streamline: f32) -> Vec<Pos2> {
    let t = 0.15 + (1.0 - streamline) * 0.85;
    let mut out: Vec<Pos2> = Vec::with_capacity(points.len());
    for point in points {
        let next = match out.last() {
            Some(prev) => prev.lerp(*point, t),
            None => *point,
        };
        out.push(next);
    }
    out
}

fn simulated_radii(centre: &[Pos2], options: &InkOptions) -> Vec<f32> {
    let mut pressure = 0.5_f32;
    let mut prev = centre[0];
    centre
        .iter()
        .map(|point| {
            let distance = point.distance(prev);
            let acceleration = (distance / options.size).min(1.0);
            let target = (1.0 - acceleration).min(1.0);
            let step = (target - pressure) * acceleration * RATE_OF_PRESSURE_CHANGE;
            pressure = (pressure + step).min(1.0);
            prev = *point;
            (options.size * (0.5 - options.thinning * (0.5 - pressure))).max(0.5)
        })
        .collect()
}

/// Half-circle around `centre` starting just after `from`, turning clockwise
/// in screen space (forward past the tip for the end cap).
fn cap(centre: Pos2, from: Pos2, radius: f32) -> Vec<Pos2> {
    let start = (from - centre).angle();
    (1..CAP_STEPS)
        .map(|k| {
            let angle = start - PI * k as f32 / CAP_STEPS as f32;
            centre + Vec2::angled(angle) * radius
        })
        .collect()
}

fn fan(mesh: &mut Mesh, centre: Pos2, radius: f32, color: Color32) {
    let base = mesh.vertices.len() as u32;
    mesh.colored_vertex(centre, color);
    let steps = CAP_STEPS * 2;
    for k in 0..=steps {
        let angle = 2.0 * PI * k as f32 / steps as f32;
        mesh.colored_vertex(centre + Vec2::angled(angle) * radius, color);
    }
    for k in 0..steps as u32 {
        mesh.add_triangle(base, base + 1 + k, base + 2 + k);
    }
}

fn quad_point(p0: Pos2, control: Pos2, p1: Pos2, t: f32) -> Pos2 {
    let u = 1.0 - t;
    Pos2::new(
        u * u * p0.x + 2.0 * u * t * control.x + t * t * p1.x,
        u * u * p0.y + 2.0 * u * t * control.y + t * t * p1.y,
    )
}

fn sample_quad(out: &mut Vec<Pos2>, p0: Pos2, control: Pos2, p1: Pos2) {
    for step in 1..=CURVE_STEPS {
        out.push(quad_point(p0, control, p1, step as f32 / CURVE_STEPS as f32));
    }
}

/// Closed path through the midpoints of consecutive points, each sample
/// acting as the control point of a quadratic curve.
pub fn smooth_closed(points: &[Pos2]) -> Vec<Pos2> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut out = vec![points[0]];
    let mut cursor = points[0];
    for (i, control) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        let mid = control.lerp(next, 0.5);
        sample_quad(&mut out, cursor, *control, mid);
        cursor = mid;
    }
    out
}

/// Open variant of [`smooth_closed`]; keeps both end points in place.
pub fn smooth_open(points: &[Pos2]) -> Vec<Pos2> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut out = vec![points[0]];
    let mut cursor = points[0];
    for i in 1..points.len() - 1 {
        let mid = points[i].lerp(points[i + 1], 0.5);
        sample_quad(&mut out, cursor, points[i], mid);
        cursor = mid;
    }
    sample_quad(&mut out, cursor, cursor, points[points.len() - 1]);
    out
}
