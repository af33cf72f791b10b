use eframe::egui::{self, Align2, Color32, FontId, Mesh, Painter, Pos2, Rect, Sense, Shape, Stroke, Ui};

use crate::camera::Projector;
use crate::scene::{format_tick, nice_ticks, Face, PlotContext, BOX_HALF_EXTENTS};
use crate::state::AppState;

/// Space kept above the box for the title.
const TITLE_MARGIN: f32 = 32.0;
/// How far outside the box tick labels sit, in box units.
const TICK_OFFSET: f32 = 0.12;
const LABEL_OFFSET: f32 = 0.32;

// ---------------------------------------------------------------------------
// Surface plot (central panel)
// ---------------------------------------------------------------------------

/// Render the surface, markers, axes and title in the central panel.
pub fn surface_plot(ui: &mut Ui, state: &mut AppState) {
    let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
    state.camera.handle_input(&response);

    let painter = ui.painter_at(rect);
    let text_color = ui.visuals().text_color();

    let plot_rect = Rect::from_min_max(rect.min + egui::vec2(0.0, TITLE_MARGIN), rect.max);
    let projector = state.camera.projector(plot_rect);
    let plot = &state.plot;

    draw_box(&painter, &projector, text_color.gamma_multiply(0.35));

    // Layers paint in z-order: lower first.
    let mut layers = [
        (plot.surface_style.zorder, Layer::Surface),
        (plot.marker_style.zorder, Layer::Markers),
    ];
    layers.sort_by_key(|(z, _)| *z);
    for (_, layer) in layers {
        match layer {
            Layer::Surface => draw_surface(&painter, &projector, plot),
            Layer::Markers => draw_markers(&painter, &projector, plot),
        }
    }

    draw_axis_labels(&painter, &projector, plot, text_color);

    painter.text(
        rect.center_top() + egui::vec2(0.0, 8.0),
        Align2::CENTER_TOP,
        plot.title,
        FontId::proportional(16.0),
        text_color,
    );
}

#[derive(Debug, Clone, Copy)]
enum Layer {
    Surface,
    Markers,
}

// ---------------------------------------------------------------------------
// Layers
// ---------------------------------------------------------------------------

/// Faces sorted far to near and filled as one mesh.
fn draw_surface(painter: &Painter, projector: &Projector, plot: &PlotContext) {
    let bounds = plot.bounds();
    let project = |v: &[f64; 3]| projector.project(bounds.to_box(*v));

    let mut projected: Vec<(f32, &Face, Vec<Pos2>)> = plot
        .faces()
        .iter()
        .filter_map(|face| {
            let mut depth = 0.0;
            for v in &face.vertices {
                depth += project(v)?.1;
            }
            let fill = face
                .fill
                .iter()
                .map(|v| project(v).map(|(pos, _)| pos))
                .collect::<Option<Vec<_>>>()?;
            Some((depth / face.vertices.len() as f32, face, fill))
        })
        .collect();
    projected.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut mesh = Mesh::default();
    for (_, face, fill) in &projected {
        let base = mesh.vertices.len() as u32;
        for p in fill {
            mesh.colored_vertex(*p, face.color);
        }
        for [a, b, c] in &face.triangles {
            mesh.add_triangle(base + a, base + b, base + c);
        }
    }
    painter.add(Shape::mesh(mesh));

    if plot.surface_style.antialiased {
        for (_, face, _) in projected {
            let outline: Option<Vec<Pos2>> = face
                .vertices
                .iter()
                .map(|v| project(v).map(|(pos, _)| pos))
                .collect();
            if let Some(outline) = outline {
                painter.add(Shape::closed_line(outline, Stroke::new(0.5, face.color)));
            }
        }
    }
}

fn draw_markers(painter: &Painter, projector: &Projector, plot: &PlotContext) {
    let bounds = plot.bounds();
    let style = plot.marker_style;
    for p in plot.annotations {
        if let Some((pos, _)) = projector.project(bounds.to_box([p.x, p.y, p.z])) {
            painter.circle_filled(pos, style.radius, style.color);
        }
    }
}

// ---------------------------------------------------------------------------
// Axes
// ---------------------------------------------------------------------------

fn draw_box(painter: &Painter, projector: &Projector, color: Color32) {
    let [ex, ey, ez] = BOX_HALF_EXTENTS;
    let corners = [
        [-ex, -ey, -ez],
        [ex, -ey, -ez],
        [ex, ey, -ez],
        [-ex, ey, -ez],
        [-ex, -ey, ez],
        [ex, -ey, ez],
        [ex, ey, ez],
        [-ex, ey, ez],
    ];
    let edges = [
        (0, 1), (1, 2), (2, 3), (3, 0), // floor
        (4, 5), (5, 6), (6, 7), (7, 4), // ceiling
        (0, 4), (1, 5), (2, 6), (3, 7), // uprights
    ];
    let stroke = Stroke::new(1.0, color);
    for (a, b) in edges {
        if let (Some((pa, _)), Some((pb, _))) =
            (projector.project(corners[a]), projector.project(corners[b]))
        {
            painter.line_segment([pa, pb], stroke);
        }
    }
}

/// Tick values along the three floor/left edges plus the "X", "Y", "Z" labels.
fn draw_axis_labels(painter: &Painter, projector: &Projector, plot: &PlotContext, color: Color32) {
    let bounds = plot.bounds();
    let [ex, ey, ez] = BOX_HALF_EXTENTS;
    let tick_font = FontId::proportional(10.0);
    let label_font = FontId::proportional(13.0);
    let dim = color.gamma_multiply(0.7);

    for axis in 0..3 {
        // Edge each axis is read along, in box units; the running coordinate is
        // filled in per tick.
        let anchor = |t: f32, offset: f32| -> [f32; 3] {
            match axis {
                0 => [t, -ey - offset, -ez],
                1 => [ex + offset, t, -ez],
                _ => [-ex - offset, -ey, t],
            }
        };

        for value in nice_ticks(bounds.min[axis], bounds.max[axis]) {
            let mut data = bounds.min;
            data[axis] = value;
            let t = bounds.to_box(data)[axis];
            if let Some((pos, _)) = projector.project(anchor(t, TICK_OFFSET)) {
                painter.text(pos, Align2::CENTER_CENTER, format_tick(value), tick_font.clone(), dim);
            }
        }

        if let Some((pos, _)) = projector.project(anchor(0.0, LABEL_OFFSET)) {
            painter.text(
                pos,
                Align2::CENTER_CENTER,
                plot.axis_labels[axis],
                label_font.clone(),
                color,
            );
        }
    }
}
