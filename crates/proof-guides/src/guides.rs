//! Trim/bleed/safety guide geometry
//!
//! Pure functions from a document's print specs and the rendered page's
//! on-canvas bounding box to drawable overlay rectangles. The rendered
//! page is the trim boundary by construction; bleed expands outward,
//! safety shrinks inward, both scaled from points to canvas pixels by
//! the ratio of rendered width to trim width.

use log::warn;

use crate::dimensions::{PaperCatalog, resolve_trim_dimensions};
use crate::render::{Color, StrokeStyle, StrokeSurface};
use crate::specs::{GuideOptions, PrintSpecs, Rect, RenderInfo};
use crate::units::in_to_pt;

/// Shop default for bleed and safety when a project stores neither
/// (1/8 inch). Explicit zeros suppress the guide.
pub const DEFAULT_GUIDE_INSET_IN: f32 = 0.125;

/// Which boundary a guide marks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideKind {
    Trim,
    Bleed,
    Safety,
}

/// A guide rectangle ready to stroke, in canvas pixels
#[derive(Debug, Clone, PartialEq)]
pub struct GuideRect {
    pub kind: GuideKind,
    pub rect: Rect,
    pub style: StrokeStyle,
}

/// Fixed visual identity per guide kind: trim is a solid thin line,
/// bleed and safety are dashed, each with a distinct color.
pub fn guide_style(kind: GuideKind) -> StrokeStyle {
    match kind {
        GuideKind::Trim => StrokeStyle {
            color: Color::CYAN,
            width: 1.0,
            dash: None,
        },
        GuideKind::Bleed => StrokeStyle {
            color: Color::MAGENTA,
            width: 1.0,
            dash: Some([5.0, 5.0]),
        },
        GuideKind::Safety => StrokeStyle {
            color: Color::YELLOW,
            width: 1.0,
            dash: Some([5.0, 5.0]),
        },
    }
}

/// Compute the guide rectangles for one rendered page.
///
/// Returns an empty list when the dimension spec is unresolvable. The
/// trim rectangle is the render bounding box verbatim. Bleed and safety
/// offsets are converted from points to canvas pixels using the scale
/// `render.width / trim_width_pt`; when the trim width is not positive
/// no bleed/safety rectangles are produced. A safety inset larger than
/// half the trim box yields an inverted rectangle, emitted as computed.
pub fn compute_guide_rects(
    specs: &PrintSpecs,
    catalog: &PaperCatalog,
    render: &RenderInfo,
    options: &GuideOptions,
) -> Vec<GuideRect> {
    let Some(trim) = resolve_trim_dimensions(&specs.dimensions, catalog) else {
        return Vec::new();
    };

    let trim_rect = render.rect();
    let mut rects = Vec::new();

    if options.trim {
        rects.push(GuideRect {
            kind: GuideKind::Trim,
            rect: trim_rect,
            style: guide_style(GuideKind::Trim),
        });
    }

    if trim.width <= 0.0 {
        return rects;
    }
    let scale = render.width / trim.width;

    let bleed_pt = specs
        .bleed
        .map(|l| l.to_points())
        .unwrap_or_else(|| in_to_pt(DEFAULT_GUIDE_INSET_IN))
        .max(0.0);
    if options.bleed && bleed_pt > 0.0 {
        rects.push(GuideRect {
            kind: GuideKind::Bleed,
            rect: trim_rect.expand(bleed_pt * scale),
            style: guide_style(GuideKind::Bleed),
        });
    }

    let safety_pt = specs
        .safety
        .map(|l| l.to_points())
        .unwrap_or_else(|| in_to_pt(DEFAULT_GUIDE_INSET_IN))
        .max(0.0);
    if options.safety && safety_pt > 0.0 {
        rects.push(GuideRect {
            kind: GuideKind::Safety,
            rect: trim_rect.expand(-safety_pt * scale),
            style: guide_style(GuideKind::Safety),
        });
    }

    rects
}

/// Stroke guide rectangles onto a surface.
///
/// Line width and dash lengths are divided by the surface's current
/// scale factor so on-screen thickness stays constant regardless of
/// canvas zoom.
pub fn draw_guides(surface: &mut dyn StrokeSurface, rects: &[GuideRect]) {
    let scale = surface.scale_factor();
    if scale <= 0.0 {
        warn!("Refusing to draw guides on a surface with scale {scale}");
        return;
    }

    for guide in rects {
        let mut style = guide.style.clone();
        style.width /= scale;
        if let Some(dash) = &mut style.dash {
            dash[0] /= scale;
            dash[1] /= scale;
        }
        surface.stroke_rect(guide.rect, &style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::DimensionSpec;
    use crate::units::Length;

    fn letter_specs() -> PrintSpecs {
        PrintSpecs {
            dimensions: DimensionSpec::Custom {
                width: 8.5,
                height: 11.0,
                unit: crate::units::Unit::In,
            },
            bleed: Some(Length::inches(0.125)),
            safety: Some(Length::inches(0.125)),
        }
    }

    fn half_scale_render() -> RenderInfo {
        // Letter trim is 612x792pt; rendered at width 306 => scale 0.5
        RenderInfo {
            x: 0.0,
            y: 0.0,
            width: 306.0,
            height: 396.0,
        }
    }

    #[test]
    fn test_trim_is_render_box_verbatim() {
        let catalog = PaperCatalog::builtin();
        let rects = compute_guide_rects(
            &letter_specs(),
            &catalog,
            &half_scale_render(),
            &GuideOptions::default(),
        );
        assert_eq!(rects[0].kind, GuideKind::Trim);
        assert_eq!(rects[0].rect, Rect::new(0.0, 0.0, 306.0, 396.0));
    }

    #[test]
    fn test_bleed_rect_at_half_scale() {
        let catalog = PaperCatalog::builtin();
        let rects = compute_guide_rects(
            &letter_specs(),
            &catalog,
            &half_scale_render(),
            &GuideOptions::default(),
        );
        // 0.125in bleed = 9pt, on screen 9 * 0.5 = 4.5px per side
        let bleed = rects.iter().find(|g| g.kind == GuideKind::Bleed).unwrap();
        assert_eq!(bleed.rect, Rect::new(-4.5, -4.5, 315.0, 405.0));
    }

    #[test]
    fn test_safety_rect_at_half_scale() {
        let catalog = PaperCatalog::builtin();
        let rects = compute_guide_rects(
            &letter_specs(),
            &catalog,
            &half_scale_render(),
            &GuideOptions::default(),
        );
        let safety = rects.iter().find(|g| g.kind == GuideKind::Safety).unwrap();
        assert_eq!(safety.rect, Rect::new(4.5, 4.5, 297.0, 387.0));
    }

    #[test]
    fn test_unresolvable_spec_draws_nothing() {
        let catalog = PaperCatalog::builtin();
        let specs = PrintSpecs::new(DimensionSpec::Legacy("abcxdef".to_string()));
        let rects = compute_guide_rects(
            &specs,
            &catalog,
            &half_scale_render(),
            &GuideOptions::default(),
        );
        assert!(rects.is_empty());
    }

    #[test]
    fn test_zero_trim_width_yields_trim_only() {
        let catalog = PaperCatalog::builtin();
        let specs = PrintSpecs::new(DimensionSpec::Custom {
            width: 0.0,
            height: 11.0,
            unit: crate::units::Unit::In,
        });
        let rects = compute_guide_rects(
            &specs,
            &catalog,
            &half_scale_render(),
            &GuideOptions::default(),
        );
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].kind, GuideKind::Trim);
    }

    #[test]
    fn test_zero_bleed_suppresses_guide() {
        let catalog = PaperCatalog::builtin();
        let mut specs = letter_specs();
        specs.bleed = Some(Length::inches(0.0));
        let rects = compute_guide_rects(
            &specs,
            &catalog,
            &half_scale_render(),
            &GuideOptions::default(),
        );
        assert!(rects.iter().all(|g| g.kind != GuideKind::Bleed));
    }

    #[test]
    fn test_oversized_safety_inset_emitted_inverted() {
        // Inset beyond half the trim box is reproduced, not clamped
        let catalog = PaperCatalog::builtin();
        let mut specs = letter_specs();
        specs.safety = Some(Length::inches(5.0)); // 360pt > 306pt/2 at scale 0.5
        let rects = compute_guide_rects(
            &specs,
            &catalog,
            &half_scale_render(),
            &GuideOptions::default(),
        );
        let safety = rects.iter().find(|g| g.kind == GuideKind::Safety).unwrap();
        assert!(safety.rect.width < 0.0);
    }

    #[test]
    fn test_options_filter_guides() {
        let catalog = PaperCatalog::builtin();
        let options = GuideOptions {
            trim: false,
            bleed: true,
            safety: false,
        };
        let rects =
            compute_guide_rects(&letter_specs(), &catalog, &half_scale_render(), &options);
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].kind, GuideKind::Bleed);
    }

    struct RecordingSurface {
        scale: f32,
        strokes: Vec<(Rect, StrokeStyle)>,
    }

    impl StrokeSurface for RecordingSurface {
        fn scale_factor(&self) -> f32 {
            self.scale
        }
        fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle) {
            self.strokes.push((rect, style.clone()));
        }
    }

    #[test]
    fn test_draw_guides_descales_stroke() {
        let catalog = PaperCatalog::builtin();
        let rects = compute_guide_rects(
            &letter_specs(),
            &catalog,
            &half_scale_render(),
            &GuideOptions::default(),
        );

        let mut surface = RecordingSurface {
            scale: 2.0,
            strokes: Vec::new(),
        };
        draw_guides(&mut surface, &rects);

        assert_eq!(surface.strokes.len(), 3);
        for (_, style) in &surface.strokes {
            assert_eq!(style.width, 0.5);
            if let Some(dash) = style.dash {
                assert_eq!(dash, [2.5, 2.5]);
            }
        }
    }

    #[test]
    fn test_draw_guides_zero_scale_is_noop() {
        let mut surface = RecordingSurface {
            scale: 0.0,
            strokes: Vec::new(),
        };
        let rects = vec![GuideRect {
            kind: GuideKind::Trim,
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            style: guide_style(GuideKind::Trim),
        }];
        draw_guides(&mut surface, &rects);
        assert!(surface.strokes.is_empty());
    }
}
