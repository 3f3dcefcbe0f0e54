// Copyright 2025 the Pagefields Authors
// SPDX-License-Identifier: Apache-2.0

//! Paint helper methods for PageCanvasWidget

use super::PageCanvasWidget;
use crate::editing::RasterState;
use crate::editing::hit_test::ResizeHandle;
use crate::model::{Alignment, Caption, Field, FontFamily};
use crate::theme;
use kurbo::{Affine, Rect, Stroke};
use masonry::core::{BrushIndex, StyleProperty, render_text};
use masonry::kurbo::Size;
use masonry::util::fill_color;
use masonry::vello::Scene;
use masonry::vello::peniko::{Brush, Color, Fill, ImageBrush};
use parley::{FontContext, FontStack, GenericFamily, LayoutContext};

thread_local! {
    static FONT_CX: std::cell::RefCell<FontContext> =
        std::cell::RefCell::new(FontContext::default());
    static LAYOUT_CX: std::cell::RefCell<
        LayoutContext<BrushIndex>,
    > = std::cell::RefCell::new(LayoutContext::new());
}

/// Font size of the page placeholder label
const PLACEHOLDER_LABEL_SIZE: f32 = 16.0;

/// Inset of field captions from the field edge, in pixels
const CAPTION_INSET: f64 = 2.0;

impl PageCanvasWidget {
    // ============================================================================
    // PAINT HELPER METHODS
    // ============================================================================

    pub(super) fn paint_background(&self, scene: &mut Scene, canvas_size: Size) {
        let bg_rect = canvas_size.to_rect();
        fill_color(scene, &bg_rect, theme::canvas::BACKGROUND);
    }

    /// Paint every page intersecting the viewport, with its fields
    pub(super) fn paint_pages(&self, scene: &mut Scene) {
        let transform = self.content_transform();
        let visible = Rect::from_origin_size((0.0, self.scroll), self.size);

        for (page, page_rect) in self.session.surface.page_rects() {
            if page_rect.intersect(visible).is_zero_area() {
                continue;
            }
            self.paint_page_raster(scene, transform, page, page_rect);

            let page_transform = transform * Affine::translate(page_rect.origin().to_vec2());
            for field in self.session.paint_order(page) {
                let selected = self.session.selected.as_ref() == Some(&field.id);
                self.paint_field(scene, page_transform, field, selected);
            }
        }
    }

    fn paint_page_raster(&self, scene: &mut Scene, transform: Affine, page: usize, rect: Rect) {
        match self.images.state(page) {
            Some(RasterState::Ready(raster)) => {
                scene.fill(
                    Fill::NonZero,
                    transform,
                    &Brush::Solid(theme::page::PAPER),
                    None,
                    &rect,
                );
                let brush = ImageBrush::new(raster.image.clone());
                let image_transform = transform
                    * Affine::translate(rect.origin().to_vec2())
                    * Affine::scale_non_uniform(
                        rect.width() / raster.width as f64,
                        rect.height() / raster.height as f64,
                    );
                scene.draw_image(&brush, image_transform);
            }
            state => {
                let label = match state {
                    Some(RasterState::Failed) => format!("Page {} unavailable", page + 1),
                    _ => format!("Loading page {}…", page + 1),
                };
                scene.fill(
                    Fill::NonZero,
                    transform,
                    &Brush::Solid(theme::page::PLACEHOLDER),
                    None,
                    &rect,
                );
                let center = rect.center();
                paint_label(
                    scene,
                    transform,
                    &label,
                    PLACEHOLDER_LABEL_SIZE,
                    FontFamily::Helvetica,
                    theme::page::PLACEHOLDER_TEXT,
                    Rect::new(rect.x0, center.y - 12.0, rect.x1, center.y + 12.0),
                    Alignment::Center,
                );
            }
        }

        scene.stroke(
            &Stroke::new(1.0),
            transform,
            &Brush::Solid(theme::page::OUTLINE),
            None,
            &rect,
        );
    }

    /// Paint one field; `transform` maps page-local pixels to the widget
    fn paint_field(&self, scene: &mut Scene, transform: Affine, field: &Field, selected: bool) {
        let scale = self.session.scale;
        let rect = scale.rect_to_pixels(field.geometry.rect());
        let caption = field.caption(&self.session.catalog);

        let (fill, stroke) = match caption {
            Caption::Variable(_) => (theme::field::VARIABLE_FILL, theme::field::VARIABLE_STROKE),
            Caption::Text(_) => (theme::field::TEXT_FILL, theme::field::TEXT_STROKE),
            Caption::Empty => (theme::field::EMPTY_FILL, theme::field::EMPTY_STROKE),
        };
        scene.fill(Fill::NonZero, transform, &Brush::Solid(fill), None, &rect);

        let (text, color) = match caption {
            Caption::Variable(text) | Caption::Text(text) => {
                let [r, g, b] = field.rgb();
                (text, Color::from_rgb8(r, g, b))
            }
            Caption::Empty => ("Empty field".to_string(), theme::field::EMPTY_TEXT),
        };

        // Captions never spill outside their field
        scene.push_clip_layer(transform, &rect);
        paint_label(
            scene,
            transform,
            &text,
            scale.to_pixels(field.font_size) as f32,
            field.font_family,
            color,
            rect.inset(-CAPTION_INSET),
            field.alignment,
        );
        scene.pop_layer();

        if selected {
            scene.stroke(
                &Stroke::new(theme::field::SELECTED_STROKE_WIDTH),
                transform,
                &Brush::Solid(theme::field::SELECTED_STROKE),
                None,
                &rect,
            );
            paint_handles(scene, transform, rect);
        } else {
            scene.stroke(
                &Stroke::new(theme::field::STROKE_WIDTH),
                transform,
                &Brush::Solid(stroke),
                None,
                &rect,
            );
        }
    }
}

/// Square resize handles on the selected field's edges
fn paint_handles(scene: &mut Scene, transform: Affine, rect: Rect) {
    let half = theme::handle::SIZE / 2.0;
    for handle in ResizeHandle::ALL {
        let center = handle.position(rect);
        let square = Rect::new(
            center.x - half,
            center.y - half,
            center.x + half,
            center.y + half,
        );
        scene.fill(
            Fill::NonZero,
            transform,
            &Brush::Solid(theme::handle::INNER),
            None,
            &square,
        );
        scene.stroke(
            &Stroke::new(1.0),
            transform,
            &Brush::Solid(theme::handle::OUTER),
            None,
            &square,
        );
    }
}

fn generic_family(family: FontFamily) -> GenericFamily {
    match family {
        FontFamily::Helvetica => GenericFamily::SansSerif,
        FontFamily::TimesRoman => GenericFamily::Serif,
        FontFamily::Courier => GenericFamily::Monospace,
    }
}

/// Lay out a single line of text and paint it inside `bounds`,
/// vertically centered and horizontally aligned
#[allow(clippy::too_many_arguments)]
fn paint_label(
    scene: &mut Scene,
    transform: Affine,
    text: &str,
    font_size: f32,
    family: FontFamily,
    color: Color,
    bounds: Rect,
    alignment: Alignment,
) {
    if text.is_empty() {
        return;
    }

    FONT_CX.with(|font_cell| {
        LAYOUT_CX.with(|layout_cell| {
            let mut font_cx = font_cell.borrow_mut();
            let mut layout_cx = layout_cell.borrow_mut();

            let mut builder = layout_cx.ranged_builder(&mut font_cx, text, 1.0, false);
            builder.push_default(StyleProperty::FontSize(font_size));
            builder.push_default(StyleProperty::FontStack(FontStack::Single(
                parley::FontFamily::Generic(generic_family(family)),
            )));
            builder.push_default(StyleProperty::Brush(BrushIndex(0)));
            let mut layout = builder.build(text);
            layout.break_all_lines(None);

            let text_width = layout.width() as f64;
            let text_height = layout.height() as f64;
            let x = match alignment {
                Alignment::Left => bounds.x0,
                Alignment::Center => (bounds.x0 + bounds.x1 - text_width) / 2.0,
                Alignment::Right => bounds.x1 - text_width,
            };
            let y = (bounds.y0 + bounds.y1 - text_height) / 2.0;

            let brushes = vec![Brush::Solid(color)];
            render_text(
                scene,
                transform * Affine::translate((x, y)),
                &layout,
                &brushes,
                false,
            );
        });
    });
}
