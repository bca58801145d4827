//! Imposition layout
//!
//! Arranges document pages onto a press sheet: grid placement with
//! gutters and alternating 180° rotation, per-sheet source-page
//! sequencing for the supported imposition types, and the n-up search
//! that picks the sheet/orientation fitting the most copies.

use log::warn;

use crate::sheet::{SheetOrientation, SheetSize};
use crate::units::in_to_pt;

/// Which grid lines alternate 180° rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum AlternateRotation {
    #[default]
    None,
    /// Odd columns rotated (work-and-turn style nesting)
    AltCol,
    /// Odd rows rotated
    AltRow,
}

/// How source pages fill sheet slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ImpositionType {
    /// Sequential fill, cycling through input pages in order
    #[default]
    Stack,
    /// One input page repeated in every slot
    Repeat,
    /// Sequential fill ordered for cut-and-collate finishing
    CollateCut,
    /// Saddle-stitch signature pairing (first/last, second/second-last)
    Booklet,
}

/// Per-page placement on a press sheet. Derived, never persisted.
///
/// `x`/`y` are in points with the origin at the sheet's top-left.
/// A rotated placement's origin is translated by one full page
/// width/height so the rotated page occupies the same bounding cell
/// (the rotation pivots around the cell's far corner).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpositionPlacement {
    pub row: usize,
    pub column: usize,
    pub x: f32,
    pub y: f32,
    pub rotated: bool,
}

/// Grid parameters for a layout computation
#[derive(Debug, Clone, PartialEq)]
pub struct GridOptions {
    pub rows: usize,
    pub columns: usize,
    /// Horizontal gap between cells, points
    pub gutter_x_pt: f32,
    /// Vertical gap between cells, points
    pub gutter_y_pt: f32,
    pub alternate_rotation: AlternateRotation,
    /// Forced sheet orientation; `None` selects automatically
    pub orientation: Option<SheetOrientation>,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            rows: 1,
            columns: 1,
            gutter_x_pt: 0.0,
            gutter_y_pt: 0.0,
            alternate_rotation: AlternateRotation::None,
            orientation: None,
        }
    }
}

/// Compute page placements for a grid on a press sheet.
///
/// Cells are enumerated row-major. The grid block is centered on the
/// sheet; that centering offset is the global margin. Non-positive page
/// or sheet dimensions and empty grids short-circuit to an empty list
/// with a warning, never an error. The result always holds exactly
/// `rows * columns` placements otherwise; which slots carry content is
/// decided separately by [`page_sequence_for_sheet`].
pub fn compute_imposition_layout(
    page_width_pt: f32,
    page_height_pt: f32,
    sheet: &SheetSize,
    options: &GridOptions,
) -> Vec<ImpositionPlacement> {
    if page_width_pt <= 0.0 || page_height_pt <= 0.0 {
        warn!("Imposition skipped: non-positive page size {page_width_pt}x{page_height_pt}");
        return Vec::new();
    }
    if sheet.long_side_inches <= 0.0 || sheet.short_side_inches <= 0.0 {
        warn!("Imposition skipped: non-positive sheet size for {:?}", sheet.name);
        return Vec::new();
    }
    if options.rows == 0 || options.columns == 0 {
        warn!("Imposition skipped: empty grid");
        return Vec::new();
    }

    let total_width =
        options.columns as f32 * page_width_pt + (options.columns - 1) as f32 * options.gutter_x_pt;
    let total_height =
        options.rows as f32 * page_height_pt + (options.rows - 1) as f32 * options.gutter_y_pt;

    let orientation = resolve_sheet_orientation(sheet, page_width_pt, page_height_pt, options);
    let (sheet_width, sheet_height) = sheet.dimensions_pt(orientation);

    let margin_x = (sheet_width - total_width) / 2.0;
    let margin_y = (sheet_height - total_height) / 2.0;

    let mut placements = Vec::with_capacity(options.rows * options.columns);
    for r in 0..options.rows {
        for c in 0..options.columns {
            let rotated = match options.alternate_rotation {
                AlternateRotation::AltCol => c % 2 != 0,
                AlternateRotation::AltRow => r % 2 != 0,
                AlternateRotation::None => false,
            };

            let mut x = margin_x + c as f32 * (page_width_pt + options.gutter_x_pt);
            let mut y = margin_y + r as f32 * (page_height_pt + options.gutter_y_pt);
            if rotated {
                x += page_width_pt;
                y += page_height_pt;
            }

            placements.push(ImpositionPlacement {
                row: r,
                column: c,
                x,
                y,
                rotated,
            });
        }
    }
    placements
}

/// Pick the sheet orientation a layout will use. An explicit request in
/// `options` wins; otherwise the grid goes on whichever orientation it
/// fits with the least wasted sheet area, ties going to portrait.
pub fn resolve_sheet_orientation(
    sheet: &SheetSize,
    page_width_pt: f32,
    page_height_pt: f32,
    options: &GridOptions,
) -> SheetOrientation {
    if let Some(orientation) = options.orientation {
        return orientation;
    }
    if options.rows == 0 || options.columns == 0 {
        return SheetOrientation::Portrait;
    }

    let total_width =
        options.columns as f32 * page_width_pt + (options.columns - 1) as f32 * options.gutter_x_pt;
    let total_height =
        options.rows as f32 * page_height_pt + (options.rows - 1) as f32 * options.gutter_y_pt;
    let page_area = page_width_pt * page_height_pt;
    let waste_for = |orientation| {
        let (w, h) = sheet.dimensions_pt(orientation);
        if total_width <= w && total_height <= h {
            w * h - page_area
        } else {
            f32::INFINITY
        }
    };

    if waste_for(SheetOrientation::Landscape) < waste_for(SheetOrientation::Portrait) {
        SheetOrientation::Landscape
    } else {
        SheetOrientation::Portrait
    }
}

// =============================================================================
// N-up search
// =============================================================================

/// Best n-up layout found for a document across the sheet catalog
#[derive(Debug, Clone, PartialEq)]
pub struct NUpLayout {
    pub columns: usize,
    pub rows: usize,
    pub sheet_name: String,
    pub sheet_orientation: SheetOrientation,
    /// Whether the document is rotated 90° within its cells
    pub doc_rotated: bool,
    pub count: usize,
}

struct CandidateLayout {
    count: usize,
    waste: f32,
    doc_rotated: bool,
    columns: usize,
    rows: usize,
}

/// How many copies of a `doc_w x doc_h` page fit a `sheet_w x sheet_h`
/// sheet, trying the document both upright and rotated 90°.
fn fit_copies(doc_w: f32, doc_h: f32, sheet_w: f32, sheet_h: f32) -> CandidateLayout {
    let grid = |w: f32, h: f32| {
        let cols = (sheet_w / w).floor() as usize;
        let rows = (sheet_h / h).floor() as usize;
        let count = cols * rows;
        let waste = sheet_w * sheet_h - count as f32 * w * h;
        (cols, rows, count, waste)
    };

    let (cols1, rows1, count1, waste1) = grid(doc_w, doc_h);
    let (cols2, rows2, count2, waste2) = grid(doc_h, doc_w);

    if count2 > count1 || (count2 == count1 && waste2 < waste1) {
        CandidateLayout {
            count: count2,
            waste: waste2,
            doc_rotated: true,
            columns: cols2,
            rows: rows2,
        }
    } else {
        CandidateLayout {
            count: count1,
            waste: waste1,
            doc_rotated: false,
            columns: cols1,
            rows: rows1,
        }
    }
}

/// Search every sheet in both orientations for the layout fitting the
/// most copies of the document; ties are broken by least wasted area.
/// Returns `None` when the document fits no sheet at all.
pub fn maximize_n_up(doc_width_pt: f32, doc_height_pt: f32, sheets: &[SheetSize]) -> Option<NUpLayout> {
    if doc_width_pt <= 0.0 || doc_height_pt <= 0.0 {
        warn!("N-up search skipped: non-positive document size");
        return None;
    }

    let mut best: Option<(NUpLayout, f32)> = None;
    for sheet in sheets {
        let long = in_to_pt(sheet.long_side_inches);
        let short = in_to_pt(sheet.short_side_inches);

        for (orientation, w, h) in [
            (SheetOrientation::Portrait, short, long),
            (SheetOrientation::Landscape, long, short),
        ] {
            let candidate = fit_copies(doc_width_pt, doc_height_pt, w, h);
            let better = match &best {
                None => candidate.count > 0,
                Some((current, current_waste)) => {
                    candidate.count > current.count
                        || (candidate.count == current.count && candidate.waste < *current_waste)
                }
            };
            if better {
                best = Some((
                    NUpLayout {
                        columns: candidate.columns,
                        rows: candidate.rows,
                        sheet_name: sheet.name.clone(),
                        sheet_orientation: orientation,
                        doc_rotated: candidate.doc_rotated,
                        count: candidate.count,
                    },
                    candidate.waste,
                ));
            }
        }
    }
    best.map(|(layout, _)| layout)
}

// =============================================================================
// Page sequencing
// =============================================================================

/// Sequencing parameters for a sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceSettings {
    pub imposition_type: ImpositionType,
    pub columns: usize,
    pub rows: usize,
    pub duplex: bool,
}

/// Source pages for one physical sheet, front and back faces.
///
/// Each entry corresponds to a grid slot in row-major order; `None`
/// marks a blank slot (fewer input pages than slots, or booklet
/// padding). Blank slots draw nothing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetPages {
    pub front: Vec<Option<usize>>,
    pub back: Vec<Option<usize>>,
}

/// Booklet page indices for one sheet: for N pages (padded to a
/// multiple of 4), sheet k holds pages N-2k and 2k+1 on the front and
/// 2k+2 and N-1-2k on the back, in visual left-to-right order.
/// Indices here are 0-based; signed so a sheet index past the last
/// signature resolves to blanks instead of wrapping.
fn booklet_pairs(sheet_index: usize, padded_page_count: usize) -> ([i64; 2], [i64; 2]) {
    let k = sheet_index as i64;
    let padded = padded_page_count as i64;
    let front_right = k * 2;
    let front_left = padded - k * 2 - 1;
    let back_left = k * 2 + 1;
    let back_right = padded - k * 2 - 2;
    ([front_left, front_right], [back_left, back_right])
}

/// Compute which source page (0-based) fills each slot of a sheet.
///
/// Booklet sequencing uses a fixed two-up spread per face regardless of
/// the configured grid. For duplex stack/collate with more than one
/// column, the back face is work-and-turn: each row's slots are
/// reversed so fronts and backs line up after the sheet is turned.
pub fn page_sequence_for_sheet(
    sheet_index: usize,
    num_input_pages: usize,
    settings: &SequenceSettings,
) -> SheetPages {
    let slots = settings.columns * settings.rows;
    if slots == 0 {
        warn!("Page sequencing skipped: empty grid");
        return SheetPages::default();
    }

    let present = |idx: usize| if idx < num_input_pages { Some(idx) } else { None };

    if settings.imposition_type == ImpositionType::Booklet {
        let padded = num_input_pages.div_ceil(4) * 4;
        let (front, back) = booklet_pairs(sheet_index, padded);
        let present_signed = |idx: i64| {
            if idx >= 0 { present(idx as usize) } else { None }
        };
        return SheetPages {
            front: front.iter().map(|&i| present_signed(i)).collect(),
            back: back.iter().map(|&i| present_signed(i)).collect(),
        };
    }

    let faces = if settings.duplex { 2 } else { 1 };
    let mut front = Vec::with_capacity(slots);
    let mut back = Vec::with_capacity(slots);

    match settings.imposition_type {
        ImpositionType::Stack => {
            let base = sheet_index * slots * faces;
            for i in 0..slots {
                let front_idx = base + i * faces;
                front.push(present(front_idx));
                if settings.duplex {
                    back.push(present(front_idx + 1));
                }
            }
        }
        ImpositionType::Repeat => {
            let master_front = sheet_index * faces;
            for _ in 0..slots {
                front.push(present(master_front));
                if settings.duplex {
                    back.push(present(master_front + 1));
                }
            }
        }
        ImpositionType::CollateCut => {
            // Each slot holds its own stack of pages; after cutting, the
            // slot stacks are piled in order to restore the sequence.
            let pages_per_stack = num_input_pages.div_ceil(slots).max(1);
            let sheets_for_mode = if settings.duplex {
                pages_per_stack.div_ceil(2)
            } else {
                pages_per_stack
            };
            let slots_per_column = sheets_for_mode * faces;

            let front_base = sheet_index * faces;
            for slot in 0..slots {
                front.push(present(front_base + slot * slots_per_column));
            }
            if settings.duplex {
                let back_base = front_base + 1;
                for slot in 0..slots {
                    back.push(present(back_base + slot * slots_per_column));
                }
            }
        }
        ImpositionType::Booklet => unreachable!("handled above"),
    }

    // Work-and-turn: the sheet flips on its vertical axis, so back-face
    // columns read right-to-left.
    if settings.duplex
        && matches!(
            settings.imposition_type,
            ImpositionType::Stack | ImpositionType::CollateCut
        )
        && settings.columns > 1
    {
        let mut turned = Vec::with_capacity(slots);
        for row in 0..settings.rows {
            let row_slice = &back[row * settings.columns..(row + 1) * settings.columns];
            turned.extend(row_slice.iter().rev().copied());
        }
        back = turned;
    }

    SheetPages { front, back }
}
