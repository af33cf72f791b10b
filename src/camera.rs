//! Orbit camera and 3-D → screen projection for the surface view.

use eframe::egui::{Pos2, Rect, Response};
use nalgebra::{Matrix4, Perspective3, Point3, Vector3, Vector4};

/// Degrees of rotation per dragged point.
const DEG_PER_POINT: f32 = 0.4;
/// Elevation limit; the view would flip over the pole past this.
const MAX_ELEVATION: f32 = 89.0;
const MIN_DISTANCE: f32 = 4.0;
const MAX_DISTANCE: f32 = 40.0;

/// Camera orbiting the origin of the normalised plot box, z up.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Angle above the xy plane, degrees.
    pub elevation: f32,
    /// Angle around the z axis measured from +x, degrees.
    pub azimuth: f32,
    /// Distance from eye to origin.
    pub distance: f32,
    /// Vertical field of view, radians.
    pub fov: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            elevation: 30.0,
            azimuth: -60.0,
            distance: 10.0,
            fov: 0.42,
        }
    }
}

impl OrbitCamera {
    /// Apply drag (orbit), scroll (zoom) and double-click (reset) from a response.
    pub fn handle_input(&mut self, response: &Response) {
        if response.double_clicked() {
            self.reset();
            return;
        }
        if response.dragged() {
            let delta = response.drag_delta();
            self.orbit(delta.x, delta.y);
        }
        if response.hovered() {
            let scroll = response.ctx.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.zoom(scroll);
            }
        }
    }

    /// Rotate by a screen-space drag of `(dx, dy)` points.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.azimuth = wrap_degrees(self.azimuth - dx * DEG_PER_POINT);
        self.elevation =
            (self.elevation + dy * DEG_PER_POINT).clamp(-MAX_ELEVATION, MAX_ELEVATION);
    }

    /// Move towards (positive `scroll`) or away from the origin.
    pub fn zoom(&mut self, scroll: f32) {
        let factor = (-scroll * 0.002).exp();
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Eye position in box space.
    pub fn eye(&self) -> Point3<f32> {
        let (el, az) = (self.elevation.to_radians(), self.azimuth.to_radians());
        Point3::new(
            self.distance * el.cos() * az.cos(),
            self.distance * el.cos() * az.sin(),
            self.distance * el.sin(),
        )
    }

    /// Combined view-projection matrix for a viewport of the given aspect.
    pub fn view_projection(&self, aspect: f32) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(&self.eye(), &Point3::origin(), &Vector3::z());
        // keep the box inside narrow viewports too
        let fovy = if aspect >= 1.0 {
            self.fov
        } else {
            2.0 * ((self.fov * 0.5).tan() / aspect).atan()
        };
        let projection = Perspective3::new(aspect, fovy, 0.1, 100.0);
        projection.as_matrix() * view
    }

    /// Projector bound to a screen rect.
    pub fn projector(&self, rect: Rect) -> Projector {
        let aspect = (rect.width() / rect.height().max(1.0)).max(1e-3);
        Projector {
            view_projection: self.view_projection(aspect),
            rect,
        }
    }
}

fn wrap_degrees(deg: f32) -> f32 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

/// Maps box-space points to screen positions for one frame.
#[derive(Debug, Clone)]
pub struct Projector {
    view_projection: Matrix4<f32>,
    rect: Rect,
}

impl Projector {
    /// Screen position and view depth of `p`. `None` when behind the eye.
    ///
    /// Larger depth means farther from the eye.
    pub fn project(&self, p: [f32; 3]) -> Option<(Pos2, f32)> {
        let clip = self.view_projection * Vector4::new(p[0], p[1], p[2], 1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let screen = Pos2::new(
            self.rect.left() + (ndc_x * 0.5 + 0.5) * self.rect.width(),
            self.rect.top() + (-ndc_y * 0.5 + 0.5) * self.rect.height(),
        );
        Some((screen, clip.w))
    }
}
