use std::cell::Cell;
use std::rc::Rc;

use eframe::egui;
use log::info;
use proof_guides::{
    DimensionSpec, GuideOptions, Length, PaperCatalog, PrintSpecs, Rect, RenderInfo, StrokeStyle,
    StrokeSurface, Unit, compute_guide_rects, draw_guides, resolve_trim_dimensions,
};
use proof_viewport::{
    CursorIcon, InputSurface, Point, ToolMode, TransformState, ViewportController,
};

/// Surface handle shared between the controller and the frame loop.
/// The controller writes cursor requests into it; the view publishes
/// the canvas size and applies the cursor once per frame.
#[derive(Clone, Default)]
pub struct SharedSurface {
    inner: Rc<SurfaceCells>,
}

#[derive(Default)]
struct SurfaceCells {
    cursor: Cell<CursorIcon>,
    size: Cell<(f32, f32)>,
}

impl InputSurface for SharedSurface {
    fn set_cursor(&mut self, cursor: CursorIcon) {
        self.inner.cursor.set(cursor);
    }

    fn viewer_size(&self) -> (f32, f32) {
        self.inner.size.get()
    }
}

#[derive(PartialEq, Clone, Copy)]
enum SizeMode {
    Standard,
    Custom,
    Legacy,
}

pub struct ProofState {
    controller: ViewportController<SharedSurface>,
    surface: SharedSurface,
    transform: Rc<Cell<TransformState>>,
    tool: Rc<Cell<ToolMode>>,

    guide_options: GuideOptions,
    size_mode: SizeMode,
    standard_key: String,
    custom_width: f32,
    custom_height: f32,
    custom_unit: Unit,
    legacy_text: String,
    bleed_in: f32,
    safety_in: f32,

    /// Placed annotation pins, in document units so they track the view
    comments: Vec<Point>,
}

impl ProofState {
    pub fn new() -> Self {
        let surface = SharedSurface::default();
        let transform = Rc::new(Cell::new(TransformState::default()));
        let tool = Rc::new(Cell::new(ToolMode::Pan));

        let transform_sink = Rc::clone(&transform);
        let tool_source = Rc::clone(&tool);
        let controller = ViewportController::new(
            surface.clone(),
            Box::new(move |t| transform_sink.set(t)),
            Box::new(move || tool_source.get()),
        );

        Self {
            controller,
            surface,
            transform,
            tool,
            guide_options: GuideOptions::default(),
            size_mode: SizeMode::Standard,
            standard_key: "US_Letter".to_string(),
            custom_width: 5.0,
            custom_height: 7.0,
            custom_unit: Unit::In,
            legacy_text: "5x7".to_string(),
            bleed_in: 0.125,
            safety_in: 0.125,
            comments: Vec::new(),
        }
    }

    fn dimension_spec(&self) -> DimensionSpec {
        match self.size_mode {
            SizeMode::Standard => DimensionSpec::Standard(self.standard_key.clone()),
            SizeMode::Custom => DimensionSpec::Custom {
                width: self.custom_width,
                height: self.custom_height,
                unit: self.custom_unit,
            },
            SizeMode::Legacy => DimensionSpec::Legacy(self.legacy_text.clone()),
        }
    }
}

pub fn show_proof(ui: &mut egui::Ui, state: &mut ProofState, catalog: &PaperCatalog) {
    show_toolbar(ui, state, catalog);
    ui.separator();
    show_canvas(ui, state, catalog);

    // Apply the cursor the controller asked for during this frame
    let cursor = state.surface.inner.cursor.get();
    ui.ctx().output_mut(|o| o.cursor_icon = egui_cursor(cursor));
}

fn show_toolbar(ui: &mut egui::Ui, state: &mut ProofState, catalog: &PaperCatalog) {
    ui.horizontal_wrapped(|ui| {
        if ui.button("➕ Zoom in").clicked() {
            state.controller.zoom_in();
        }
        if ui.button("➖ Zoom out").clicked() {
            state.controller.zoom_out();
        }
        if ui.button("Reset view").clicked() {
            state.controller.reset_transform();
        }
        ui.label(format!("{:.0}%", state.transform.get().zoom * 100.0));
        ui.separator();

        let mut tool = state.tool.get();
        ui.selectable_value(&mut tool, ToolMode::Pan, "✋ Pan");
        ui.selectable_value(&mut tool, ToolMode::Comment, "💬 Comment");
        if tool != state.tool.get() {
            state.tool.set(tool);
            state.controller.refresh_cursor();
        }
        if !state.comments.is_empty() && ui.button("Clear comments").clicked() {
            info!("Cleared {} comments", state.comments.len());
            state.comments.clear();
        }
        ui.separator();

        ui.checkbox(&mut state.guide_options.trim, "Trim");
        ui.checkbox(&mut state.guide_options.bleed, "Bleed");
        ui.checkbox(&mut state.guide_options.safety, "Safety");
    });

    ui.horizontal_wrapped(|ui| {
        ui.selectable_value(&mut state.size_mode, SizeMode::Standard, "Standard");
        ui.selectable_value(&mut state.size_mode, SizeMode::Custom, "Custom");
        ui.selectable_value(&mut state.size_mode, SizeMode::Legacy, "WxH");
        match state.size_mode {
            SizeMode::Standard => {
                egui::ComboBox::from_id_salt("standard-size")
                    .selected_text(&state.standard_key)
                    .show_ui(ui, |ui| {
                        for (key, entry) in catalog.iter() {
                            ui.selectable_value(&mut state.standard_key, key.clone(), &entry.name);
                        }
                    });
            }
            SizeMode::Custom => {
                ui.add(
                    egui::DragValue::new(&mut state.custom_width)
                        .speed(0.1)
                        .range(0.1..=100.0),
                );
                ui.label("×");
                ui.add(
                    egui::DragValue::new(&mut state.custom_height)
                        .speed(0.1)
                        .range(0.1..=100.0),
                );
                egui::ComboBox::from_id_salt("custom-unit")
                    .selected_text(match state.custom_unit {
                        Unit::In => "in",
                        Unit::Mm => "mm",
                    })
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut state.custom_unit, Unit::In, "in");
                        ui.selectable_value(&mut state.custom_unit, Unit::Mm, "mm");
                    });
            }
            SizeMode::Legacy => {
                ui.add(egui::TextEdit::singleline(&mut state.legacy_text).desired_width(80.0));
                ui.label("inches, e.g. 5x7");
            }
        }
        ui.separator();

        ui.label("Bleed (in):");
        ui.add(
            egui::DragValue::new(&mut state.bleed_in)
                .speed(0.005)
                .range(0.0..=1.0),
        );
        ui.label("Safety (in):");
        ui.add(
            egui::DragValue::new(&mut state.safety_in)
                .speed(0.005)
                .range(0.0..=1.0),
        );
    });
}

fn show_canvas(ui: &mut egui::Ui, state: &mut ProofState, catalog: &PaperCatalog) {
    let (canvas, response) =
        ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
    state
        .surface
        .inner
        .size
        .set((canvas.width(), canvas.height()));

    let rel = |pos: egui::Pos2| Point::new(pos.x - canvas.min.x, pos.y - canvas.min.y);

    // Feed raw input through the gesture controller
    let scroll = ui.input(|i| i.raw_scroll_delta.y);
    if scroll != 0.0 && response.hovered() {
        if let Some(pos) = response.hover_pos() {
            // egui reports wheel-up as positive; the controller expects
            // the browser convention of negative-up
            state.controller.wheel(rel(pos), -scroll);
        }
    }

    let (pressed, released, latest) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.latest_pos(),
        )
    });
    if let Some(pos) = latest {
        let p = rel(pos);
        if pressed && response.hovered() {
            state.controller.pointer_down(p);
        }
        state.controller.pointer_move(p);
        if released {
            if let Some(click) = state.controller.pointer_up(p) {
                let t = state.transform.get();
                let doc = Point::new(click.x / t.zoom - t.pan.x, click.y / t.zoom - t.pan.y);
                info!("Comment pin placed at ({:.0}, {:.0})", doc.x, doc.y);
                state.comments.push(doc);
            }
        }
    }

    let painter = ui.painter_at(canvas);
    painter.rect_filled(
        canvas,
        egui::CornerRadius::ZERO,
        ui.visuals().extreme_bg_color,
    );

    let specs = PrintSpecs {
        dimensions: state.dimension_spec(),
        bleed: Some(Length::inches(state.bleed_in)),
        safety: Some(Length::inches(state.safety_in)),
    };
    let Some(trim) = resolve_trim_dimensions(&specs.dimensions, catalog) else {
        painter.text(
            canvas.center(),
            egui::Align2::CENTER_CENTER,
            "Paper size not understood",
            egui::FontId::proportional(16.0),
            ui.visuals().warn_fg_color,
        );
        return;
    };

    // Page footprint in document units: fit to 70% of the canvas at
    // zoom 1, centered. Screen position comes from the transform.
    let t = state.transform.get();
    let fit = (canvas.width() * 0.7 / trim.width).min(canvas.height() * 0.7 / trim.height);
    let page_width = trim.width * fit;
    let page_height = trim.height * fit;
    let doc_origin = Point::new(
        (canvas.width() - page_width) / 2.0,
        (canvas.height() - page_height) / 2.0,
    );
    let to_screen = |p: Point| {
        canvas.min + egui::vec2((p.x + t.pan.x) * t.zoom, (p.y + t.pan.y) * t.zoom)
    };

    let page_rect = egui::Rect::from_min_size(
        to_screen(doc_origin),
        egui::vec2(page_width * t.zoom, page_height * t.zoom),
    );
    painter.rect_filled(page_rect, egui::CornerRadius::ZERO, egui::Color32::WHITE);

    // Placeholder artwork so panning and guides have something to frame
    painter.line_segment(
        [page_rect.left_top(), page_rect.right_bottom()],
        egui::Stroke::new(1.0, egui::Color32::from_gray(210)),
    );
    painter.line_segment(
        [page_rect.right_top(), page_rect.left_bottom()],
        egui::Stroke::new(1.0, egui::Color32::from_gray(210)),
    );

    let render = RenderInfo {
        x: page_rect.min.x,
        y: page_rect.min.y,
        width: page_rect.width(),
        height: page_rect.height(),
    };
    let guides = compute_guide_rects(&specs, catalog, &render, &state.guide_options);
    let mut guide_surface = PainterSurface { painter: &painter };
    draw_guides(&mut guide_surface, &guides);

    for comment in &state.comments {
        let pos = to_screen(*comment);
        painter.circle_filled(pos, 5.0, egui::Color32::from_rgb(220, 60, 60));
        painter.circle_stroke(pos, 5.0, egui::Stroke::new(1.0, egui::Color32::WHITE));
    }
}

/// Guide drawing target backed by the frame's painter. The painter
/// works in logical screen points and the guide rectangles are already
/// in that space, so the scale factor is one.
struct PainterSurface<'a> {
    painter: &'a egui::Painter,
}

impl StrokeSurface for PainterSurface<'_> {
    fn scale_factor(&self) -> f32 {
        1.0
    }

    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle) {
        let target = egui::Rect::from_min_size(
            egui::pos2(rect.x, rect.y),
            egui::vec2(rect.width, rect.height),
        );
        let stroke = egui::Stroke::new(
            style.width,
            egui::Color32::from_rgb(style.color.r, style.color.g, style.color.b),
        );
        match style.dash {
            None => {
                self.painter.rect_stroke(
                    target,
                    egui::CornerRadius::ZERO,
                    stroke,
                    egui::StrokeKind::Middle,
                );
            }
            Some([dash, gap]) => {
                let corners = [
                    target.left_top(),
                    target.right_top(),
                    target.right_bottom(),
                    target.left_bottom(),
                    target.left_top(),
                ];
                self.painter
                    .extend(egui::Shape::dashed_line(&corners, stroke, dash, gap));
            }
        }
    }
}

fn egui_cursor(cursor: CursorIcon) -> egui::CursorIcon {
    match cursor {
        CursorIcon::Default => egui::CursorIcon::Default,
        CursorIcon::Grab => egui::CursorIcon::Grab,
        CursorIcon::Grabbing => egui::CursorIcon::Grabbing,
        CursorIcon::Crosshair => egui::CursorIcon::Crosshair,
    }
}
