//! Plot context: everything one surface figure needs, computed once up front.
//!
//! The UI layer only projects and paints what lives here; it never reaches
//! back into the grids.

use eframe::egui::Color32;

use crate::color::{ColorMap, MARKER_COLOR};
use crate::data::model::{AnnotationPoint, SurfaceGrids, ANNOTATION_POINTS};

/// Figure title.
pub const TITLE: &str = "fx, fy, fyx not 0";
/// Labels of the X, Y and Z axes.
pub const AXIS_LABELS: [&str; 3] = ["X", "Y", "Z"];
/// Half-extents of the normalised plot box (4:4:3 aspect).
pub const BOX_HALF_EXTENTS: [f32; 3] = [1.0, 1.0, 0.75];

// ---------------------------------------------------------------------------
// Styles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SurfaceStyle {
    pub color_map: ColorMap,
    /// Solid, unfeathered faces when `false`.
    pub antialiased: bool,
    pub alpha: f32,
    pub zorder: i32,
    /// Upper bound on faces drawn along each grid axis.
    pub max_faces: usize,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            color_map: ColorMap::coolwarm(),
            antialiased: false,
            alpha: 0.6,
            zorder: 0,
            max_faces: 50,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MarkerStyle {
    pub color: Color32,
    /// Dot radius in points.
    pub radius: f32,
    pub zorder: i32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: MARKER_COLOR,
            radius: 2.5,
            zorder: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// One filled polygon of the surface, in data coordinates.
#[derive(Debug, Clone)]
pub struct Face {
    /// Perimeter samples of the grid patch, in order.
    pub vertices: Vec<[f64; 3]>,
    /// Every grid sample inside the patch, row-major.
    pub fill: Vec<[f64; 3]>,
    /// Indices into `fill`, two disjoint triangles per grid cell.
    pub triangles: Vec<[u32; 3]>,
    /// Mean Z over `vertices`; drives the colour.
    pub mean_z: f64,
    pub color: Color32,
}

/// Axis-aligned data bounds used to normalise into the plot box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Bounds {
    fn from_points(points: impl Iterator<Item = [f64; 3]>) -> Self {
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        for p in points {
            for axis in 0..3 {
                if p[axis].is_finite() {
                    min[axis] = min[axis].min(p[axis]);
                    max[axis] = max[axis].max(p[axis]);
                }
            }
        }
        for axis in 0..3 {
            if !min[axis].is_finite() || !max[axis].is_finite() {
                min[axis] = -1.0;
                max[axis] = 1.0;
            }
            if (max[axis] - min[axis]).abs() < 1e-12 {
                min[axis] -= 0.5;
                max[axis] += 0.5;
            }
        }
        Self { min, max }
    }

    /// Map a data point into the plot box.
    pub fn to_box(&self, p: [f64; 3]) -> [f32; 3] {
        let mut out = [0.0_f32; 3];
        for axis in 0..3 {
            let t = (p[axis] - self.min[axis]) / (self.max[axis] - self.min[axis]);
            out[axis] = ((t * 2.0 - 1.0) as f32) * BOX_HALF_EXTENTS[axis];
        }
        out
    }
}

// ---------------------------------------------------------------------------
// PlotContext
// ---------------------------------------------------------------------------

/// The explicit figure/axes object handed to every render step.
#[derive(Debug, Clone)]
pub struct PlotContext {
    pub grids: SurfaceGrids,
    pub annotations: &'static [AnnotationPoint],
    pub surface_style: SurfaceStyle,
    pub marker_style: MarkerStyle,
    pub title: &'static str,
    pub axis_labels: [&'static str; 3],
    faces: Vec<Face>,
    bounds: Bounds,
}

impl PlotContext {
    pub fn new(grids: SurfaceGrids) -> Self {
        Self::with_styles(grids, SurfaceStyle::default(), MarkerStyle::default())
    }

    pub fn with_styles(
        grids: SurfaceGrids,
        surface_style: SurfaceStyle,
        marker_style: MarkerStyle,
    ) -> Self {
        let faces = build_faces(&grids, &surface_style);
        let annotations: &'static [AnnotationPoint] = &ANNOTATION_POINTS;

        let grid_points = grids
            .x
            .iter()
            .zip(grids.y.iter())
            .zip(grids.z.iter())
            .map(|((&x, &y), &z)| [x, y, z]);
        let marker_points = annotations.iter().map(|p| [p.x, p.y, p.z]);
        let bounds = Bounds::from_points(grid_points.chain(marker_points));

        log::info!(
            "Built {} surface faces over bounds {:?}..{:?}",
            faces.len(),
            bounds.min,
            bounds.max
        );

        Self {
            grids,
            annotations,
            surface_style,
            marker_style,
            title: TITLE,
            axis_labels: AXIS_LABELS,
            faces,
            bounds,
        }
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// Grid indices a strided surface samples: every `stride`-th index below the
/// last, then the last.
pub fn sample_indices(len: usize, stride: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let mut idx: Vec<usize> = (0..len - 1).step_by(stride.max(1)).collect();
    idx.push(len - 1);
    idx
}

/// Stride that keeps at most `max_faces` faces along an axis of `len` samples.
pub fn stride_for(len: usize, max_faces: usize) -> usize {
    len.div_ceil(max_faces.max(1)).max(1)
}

/// Perimeter of the patch `[r0, r1] × [c0, c1]`, walked top, right, bottom,
/// left without repeating corners.
fn patch_perimeter(r0: usize, r1: usize, c0: usize, c1: usize) -> Vec<(usize, usize)> {
    let mut out = Vec::with_capacity(2 * ((r1 - r0) + (c1 - c0)));
    out.extend((c0..c1).map(|c| (r0, c)));
    out.extend((r0..r1).map(|r| (r, c1)));
    out.extend((c0 + 1..=c1).rev().map(|c| (r1, c)));
    out.extend((r0 + 1..=r1).rev().map(|r| (r, c0)));
    out
}

/// Samples of the patch `[r0, r1] × [c0, c1]` in row-major order, and the
/// triangles covering each unit cell once.
fn patch_cells(
    r0: usize,
    r1: usize,
    c0: usize,
    c1: usize,
) -> (Vec<(usize, usize)>, Vec<[u32; 3]>) {
    let width = c1 - c0 + 1;
    let samples = (r0..=r1)
        .flat_map(|r| (c0..=c1).map(move |c| (r, c)))
        .collect();

    let mut triangles = Vec::with_capacity(2 * (r1 - r0) * (c1 - c0));
    for r in 0..r1 - r0 {
        for c in 0..c1 - c0 {
            let a = (r * width + c) as u32;
            let b = a + 1;
            let d = a + width as u32;
            triangles.push([a, b, d + 1]);
            triangles.push([a, d + 1, d]);
        }
    }
    (samples, triangles)
}

fn build_faces(grids: &SurfaceGrids, style: &SurfaceStyle) -> Vec<Face> {
    let (rows, cols) = grids.shape();
    let row_idx = sample_indices(rows, stride_for(rows, style.max_faces));
    let col_idx = sample_indices(cols, stride_for(cols, style.max_faces));

    let mut faces = Vec::with_capacity(row_idx.len().saturating_sub(1) * col_idx.len());
    let point = |(r, c): (usize, usize)| [grids.x[[r, c]], grids.y[[r, c]], grids.z[[r, c]]];
    for rs in row_idx.windows(2) {
        for cs in col_idx.windows(2) {
            let (cells, triangles) = patch_cells(rs[0], rs[1], cs[0], cs[1]);
            let fill: Vec<[f64; 3]> = cells.into_iter().map(point).collect();
            if fill.iter().flatten().any(|v| !v.is_finite()) {
                continue;
            }
            let vertices: Vec<[f64; 3]> = patch_perimeter(rs[0], rs[1], cs[0], cs[1])
                .into_iter()
                .map(point)
                .collect();
            let mean_z = vertices.iter().map(|v| v[2]).sum::<f64>() / vertices.len() as f64;
            faces.push(Face {
                vertices,
                fill,
                triangles,
                mean_z,
                color: Color32::TRANSPARENT,
            });
        }
    }

    // normalise over the face means, not the raw grid
    let (lo, hi) = faces
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), f| {
            (lo.min(f.mean_z), hi.max(f.mean_z))
        });
    for face in &mut faces {
        face.color = style.color_map.color_for(face.mean_z, lo, hi, style.alpha);
    }
    faces
}

// ---------------------------------------------------------------------------
// Axis ticks
// ---------------------------------------------------------------------------

/// Round tick positions inside `[min, max]`, about four intervals apart.
pub fn nice_ticks(min: f64, max: f64) -> Vec<f64> {
    let range = max - min;
    if !(range.is_finite() && range > 0.0) {
        return vec![min];
    }
    let raw = range / 4.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Compact tick label.
pub fn format_tick(value: f64) -> String {
    let abs = value.abs();
    if abs != 0.0 && !(0.01..1e4).contains(&abs) {
        return format!("{value:.1e}");
    }
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{InputTable, GRID_COLS, GRID_LEN};
    use approx::assert_relative_eq;

    fn plane_grids() -> SurfaceGrids {
        let rows = (0..GRID_LEN)
            .map(|i| {
                let r = (i / GRID_COLS) as f64;
                let c = (i % GRID_COLS) as f64;
                [c, r, r]
            })
            .collect();
        SurfaceGrids::from_table(&InputTable::new(rows)).unwrap()
    }

    #[test]
    fn test_strides_follow_face_cap() {
        assert_eq!(stride_for(81, 50), 2);
        assert_eq!(stride_for(44, 50), 1);

        let rows = sample_indices(81, 2);
        assert_eq!(rows.len(), 41);
        assert_eq!(rows[39], 78);
        assert_eq!(rows[40], 80);
        assert_eq!(sample_indices(44, 1).len(), 44);
    }

    #[test]
    fn test_face_count_and_perimeter() {
        let ctx = PlotContext::new(plane_grids());
        assert_eq!(ctx.faces().len(), 40 * 43);

        // 2-row by 1-column patch keeps its middle edge samples
        let face = &ctx.faces()[0];
        assert_eq!(face.vertices.len(), 6);
        assert_eq!(face.vertices[0], [0.0, 0.0, 0.0]);
        assert_eq!(face.vertices[1], [1.0, 0.0, 0.0]);
        assert_eq!(face.vertices[3], [1.0, 2.0, 2.0]);
        assert_relative_eq!(face.mean_z, 1.0);
    }

    #[test]
    fn test_face_triangles_tile_patch_once() {
        let ctx = PlotContext::new(plane_grids());
        for face in ctx.faces() {
            assert_eq!(face.fill.len(), 6);
            assert_eq!(face.triangles.len(), 4);

            // same winding and total area equal to the 1 × 2 patch means the
            // triangles cover it without overlap
            let mut total = 0.0;
            for &[a, b, c] in &face.triangles {
                let [a, b, c] = [a, b, c].map(|i| face.fill[i as usize]);
                let signed =
                    0.5 * ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1]));
                assert!(signed > 0.0);
                total += signed;
            }
            assert_relative_eq!(total, 2.0);
        }
    }

    #[test]
    fn test_face_colors_span_colormap() {
        let ctx = PlotContext::new(plane_grids());
        let faces = ctx.faces();
        let lowest = faces.first().unwrap();
        let highest = faces.last().unwrap();

        // premultiplied alpha 0.6
        assert_eq!(lowest.color.a(), 153);
        assert_eq!(
            highest.color,
            Color32::from_rgba_unmultiplied(180, 4, 38, 153)
        );
        assert_eq!(
            lowest.color,
            Color32::from_rgba_unmultiplied(59, 76, 192, 153)
        );
    }

    #[test]
    fn test_styles_match_figure_defaults() {
        let ctx = PlotContext::new(plane_grids());
        assert!(!ctx.surface_style.antialiased);
        assert_relative_eq!(ctx.surface_style.alpha, 0.6);
        assert!(ctx.marker_style.zorder > ctx.surface_style.zorder);
        assert_eq!(ctx.marker_style.color, MARKER_COLOR);
        assert_eq!(ctx.title, "fx, fy, fyx not 0");
        assert_eq!(ctx.axis_labels, ["X", "Y", "Z"]);
    }

    #[test]
    fn test_annotations_do_not_depend_on_input() {
        let ctx = PlotContext::new(plane_grids());
        assert_eq!(ctx.annotations, &ANNOTATION_POINTS[..]);
    }

    #[test]
    fn test_bounds_include_markers() {
        let ctx = PlotContext::new(plane_grids());
        let b = ctx.bounds();
        assert_eq!(b.min, [-2.5, -4.5, 0.0]);
        assert_eq!(b.max, [43.0, 80.0, 80.0]);

        let lo = b.to_box(b.min);
        let hi = b.to_box(b.max);
        assert_eq!(lo, [-1.0, -1.0, -0.75]);
        assert_eq!(hi, [1.0, 1.0, 0.75]);
    }

    #[test]
    fn test_nice_ticks() {
        assert_eq!(nice_ticks(0.0, 10.0), vec![0.0, 2.5, 5.0, 7.5, 10.0]);
        assert_eq!(nice_ticks(-4.7, 3.4), vec![-2.5, 0.0, 2.5]);
        assert_eq!(nice_ticks(1.0, 1.0), vec![1.0]);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(2.5), "2.5");
        assert_eq!(format_tick(-4.0), "-4");
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(12345.0), "1.2e4");
    }
}
