use eframe::egui;
use log::{info, warn};
use proof_guides::{
    AlternateRotation, GridOptions, ImpositionType, SequenceSettings, SheetOrientation, SheetSize,
    compute_imposition_layout, in_to_pt, maximize_n_up, page_sequence_for_sheet,
    resolve_sheet_orientation,
};

pub struct ImposeState {
    sheet_index: usize,
    orientation: Option<SheetOrientation>,
    rows: usize,
    columns: usize,
    gutter_in: f32,
    alternate: AlternateRotation,
    imposition_type: ImpositionType,
    duplex: bool,
    page_width_in: f32,
    page_height_in: f32,
    num_pages: usize,
    preview_sheet: usize,
    show_back: bool,
}

impl Default for ImposeState {
    fn default() -> Self {
        Self {
            sheet_index: 0,
            orientation: None,
            rows: 2,
            columns: 2,
            gutter_in: 0.125,
            alternate: AlternateRotation::None,
            imposition_type: ImpositionType::Stack,
            duplex: true,
            page_width_in: 3.5,
            page_height_in: 5.0,
            num_pages: 12,
            preview_sheet: 0,
            show_back: false,
        }
    }
}

pub fn show_impose(ui: &mut egui::Ui, state: &mut ImposeState, sheets: &[SheetSize]) {
    show_settings(ui, state, sheets);
    ui.separator();
    show_preview(ui, state, sheets);
}

fn show_settings(ui: &mut egui::Ui, state: &mut ImposeState, sheets: &[SheetSize]) {
    ui.horizontal_wrapped(|ui| {
        egui::ComboBox::from_label("Sheet")
            .selected_text(&sheets[state.sheet_index.min(sheets.len() - 1)].name)
            .show_ui(ui, |ui| {
                for (i, sheet) in sheets.iter().enumerate() {
                    ui.selectable_value(&mut state.sheet_index, i, &sheet.name);
                }
            });
        egui::ComboBox::from_label("Orientation")
            .selected_text(orientation_label(state.orientation))
            .show_ui(ui, |ui| {
                for choice in [
                    None,
                    Some(SheetOrientation::Portrait),
                    Some(SheetOrientation::Landscape),
                ] {
                    ui.selectable_value(&mut state.orientation, choice, orientation_label(choice));
                }
            });
        ui.label("Grid:");
        ui.add(egui::DragValue::new(&mut state.rows).range(1..=8));
        ui.label("×");
        ui.add(egui::DragValue::new(&mut state.columns).range(1..=8));
        ui.label("Gutter (in):");
        ui.add(
            egui::DragValue::new(&mut state.gutter_in)
                .speed(0.005)
                .range(0.0..=2.0),
        );
        egui::ComboBox::from_label("Rotation")
            .selected_text(alternate_label(state.alternate))
            .show_ui(ui, |ui| {
                for choice in [
                    AlternateRotation::None,
                    AlternateRotation::AltCol,
                    AlternateRotation::AltRow,
                ] {
                    ui.selectable_value(&mut state.alternate, choice, alternate_label(choice));
                }
            });
    });

    ui.horizontal_wrapped(|ui| {
        egui::ComboBox::from_label("Mode")
            .selected_text(type_label(state.imposition_type))
            .show_ui(ui, |ui| {
                for choice in [
                    ImpositionType::Stack,
                    ImpositionType::Repeat,
                    ImpositionType::CollateCut,
                    ImpositionType::Booklet,
                ] {
                    ui.selectable_value(&mut state.imposition_type, choice, type_label(choice));
                }
            });
        ui.checkbox(&mut state.duplex, "Duplex");
        ui.label("Page (in):");
        ui.add(
            egui::DragValue::new(&mut state.page_width_in)
                .speed(0.05)
                .range(0.5..=30.0),
        );
        ui.label("×");
        ui.add(
            egui::DragValue::new(&mut state.page_height_in)
                .speed(0.05)
                .range(0.5..=30.0),
        );
        ui.label("Pages:");
        ui.add(egui::DragValue::new(&mut state.num_pages).range(1..=999));
        ui.separator();
        ui.label("Sheet:");
        ui.add(egui::DragValue::new(&mut state.preview_sheet).range(0..=99));
        if state.duplex || state.imposition_type == ImpositionType::Booklet {
            ui.checkbox(&mut state.show_back, "Back face");
        }
        ui.separator();
        if ui.button("Best fit").clicked() {
            best_fit(state, sheets);
        }
    });
}

/// Fill the grid settings from the n-up search over the whole catalog
fn best_fit(state: &mut ImposeState, sheets: &[SheetSize]) {
    let doc_w = in_to_pt(state.page_width_in);
    let doc_h = in_to_pt(state.page_height_in);
    let Some(layout) = maximize_n_up(doc_w, doc_h, sheets) else {
        warn!("No sheet fits a {}x{} in page", state.page_width_in, state.page_height_in);
        return;
    };

    if let Some(i) = sheets.iter().position(|s| s.name == layout.sheet_name) {
        state.sheet_index = i;
    }
    state.orientation = Some(layout.sheet_orientation);
    state.columns = layout.columns;
    state.rows = layout.rows;
    if layout.doc_rotated {
        std::mem::swap(&mut state.page_width_in, &mut state.page_height_in);
    }
    info!(
        "Best fit: {}-up on {} {:?}{}",
        layout.count,
        layout.sheet_name,
        layout.sheet_orientation,
        if layout.doc_rotated { ", page rotated" } else { "" }
    );
}

fn show_preview(ui: &mut egui::Ui, state: &mut ImposeState, sheets: &[SheetSize]) {
    let sheet = &sheets[state.sheet_index.min(sheets.len() - 1)];
    let page_w = in_to_pt(state.page_width_in);
    let page_h = in_to_pt(state.page_height_in);

    // Booklet spreads are always two-up, whatever the grid says
    let (columns, rows) = if state.imposition_type == ImpositionType::Booklet {
        (2, 1)
    } else {
        (state.columns, state.rows)
    };
    let options = GridOptions {
        rows,
        columns,
        gutter_x_pt: in_to_pt(state.gutter_in),
        gutter_y_pt: in_to_pt(state.gutter_in),
        alternate_rotation: state.alternate,
        orientation: state.orientation,
    };

    let placements = compute_imposition_layout(page_w, page_h, sheet, &options);
    let (canvas, _) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
    let painter = ui.painter_at(canvas);
    if placements.is_empty() {
        painter.text(
            canvas.center(),
            egui::Align2::CENTER_CENTER,
            "Grid does not fit this sheet",
            egui::FontId::proportional(16.0),
            ui.visuals().warn_fg_color,
        );
        return;
    }

    let orientation = resolve_sheet_orientation(sheet, page_w, page_h, &options);
    let (sheet_w, sheet_h) = sheet.dimensions_pt(orientation);
    let scale = (canvas.width() * 0.9 / sheet_w).min(canvas.height() * 0.9 / sheet_h);
    let origin = canvas.center() - egui::vec2(sheet_w, sheet_h) * scale / 2.0;
    let to_screen =
        |x: f32, y: f32| egui::pos2(origin.x + x * scale, origin.y + y * scale);

    let sheet_rect =
        egui::Rect::from_min_size(to_screen(0.0, 0.0), egui::vec2(sheet_w, sheet_h) * scale);
    painter.rect_filled(sheet_rect, egui::CornerRadius::ZERO, egui::Color32::WHITE);
    painter.rect_stroke(
        sheet_rect,
        egui::CornerRadius::ZERO,
        egui::Stroke::new(1.0, egui::Color32::DARK_GRAY),
        egui::StrokeKind::Outside,
    );

    let settings = SequenceSettings {
        imposition_type: state.imposition_type,
        columns,
        rows,
        duplex: state.duplex,
    };
    let sequence = page_sequence_for_sheet(state.preview_sheet, state.num_pages, &settings);
    let face = if state.show_back {
        &sequence.back
    } else {
        &sequence.front
    };

    for (i, placement) in placements.iter().enumerate() {
        // A rotated placement's origin is its far corner; undo the
        // translation to get the cell's bounding box
        let min_x = placement.x - if placement.rotated { page_w } else { 0.0 };
        let min_y = placement.y - if placement.rotated { page_h } else { 0.0 };
        let cell = egui::Rect::from_min_size(
            to_screen(min_x, min_y),
            egui::vec2(page_w, page_h) * scale,
        );

        let fill = if placement.rotated {
            egui::Color32::from_rgb(224, 232, 248)
        } else {
            egui::Color32::from_gray(240)
        };
        painter.rect_filled(cell, egui::CornerRadius::ZERO, fill);
        painter.rect_stroke(
            cell,
            egui::CornerRadius::ZERO,
            egui::Stroke::new(1.0, egui::Color32::GRAY),
            egui::StrokeKind::Inside,
        );

        let label = match face.get(i).copied().flatten() {
            Some(page) => format!(
                "{}{}",
                page + 1,
                if placement.rotated { " ↻" } else { "" }
            ),
            None => "—".to_string(),
        };
        painter.text(
            cell.center(),
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(14.0),
            egui::Color32::DARK_GRAY,
        );
    }
}

fn orientation_label(orientation: Option<SheetOrientation>) -> &'static str {
    match orientation {
        None => "Auto",
        Some(SheetOrientation::Portrait) => "Portrait",
        Some(SheetOrientation::Landscape) => "Landscape",
    }
}

fn alternate_label(alternate: AlternateRotation) -> &'static str {
    match alternate {
        AlternateRotation::None => "None",
        AlternateRotation::AltCol => "Alternate columns",
        AlternateRotation::AltRow => "Alternate rows",
    }
}

fn type_label(imposition_type: ImpositionType) -> &'static str {
    match imposition_type {
        ImpositionType::Stack => "Stack",
        ImpositionType::Repeat => "Repeat",
        ImpositionType::CollateCut => "Collate & cut",
        ImpositionType::Booklet => "Booklet",
    }
}
