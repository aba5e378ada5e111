//! The render pass.
//!
//! Clears the surface and draws every element in paint order, followed
//! by its highlight when selected. Drawing the same store twice produces
//! the same calls.

use sketchpad_core::{normalized_bounds, normalized_line_bounds, Bounds, Element, Shape};

use crate::{DrawingCapability, RenderResult, RendererConfig};

/// Draw `elements` onto `surface`. Returns the number of elements drawn.
///
/// # Errors
///
/// Returns the first error reported by the surface.
pub fn render_elements<'a, I>(
    surface: &mut dyn DrawingCapability,
    config: &RendererConfig,
    elements: I,
) -> RenderResult<usize>
where
    I: IntoIterator<Item = &'a Element>,
{
    surface.clear(&config.background_color)?;

    let mut line_height = None;
    let mut drawn = 0;
    for element in elements {
        draw_element(surface, config, element, &mut line_height)?;
        if element.selected {
            draw_highlight(surface, config, element)?;
        }
        drawn += 1;
    }
    Ok(drawn)
}

fn draw_element(
    surface: &mut dyn DrawingCapability,
    config: &RendererConfig,
    element: &Element,
    line_height: &mut Option<f32>,
) -> RenderResult<()> {
    let styles = &config.styles;
    let Element {
        x,
        y,
        width,
        height,
        ..
    } = *element;

    match &element.shape {
        Shape::Rectangle => surface.rectangle(x, y, width, height, &styles.rectangle),
        Shape::Selection => surface.rectangle(x, y, width, height, &styles.selection),
        Shape::Ellipse => surface.ellipse(
            x + width / 2.0,
            y + height / 2.0,
            width,
            height,
            &styles.ellipse,
        ),
        Shape::Linear { points: [a, b] } => surface.line(a.x, a.y, b.x, b.y, &styles.line),
        Shape::Text { text } => {
            let lh = match *line_height {
                Some(lh) => lh,
                None => {
                    let lh = surface.measure_text(&config.reference_glyph, &config.font)?
                        * config.line_height_factor;
                    *line_height = Some(lh);
                    lh
                }
            };
            draw_text_lines(surface, &config.font, text, x, y, lh)
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn draw_text_lines(
    surface: &mut dyn DrawingCapability,
    font: &str,
    text: &str,
    x: f32,
    y: f32,
    line_height: f32,
) -> RenderResult<()> {
    for (i, line) in text.split('\n').enumerate() {
        surface.text(line, x, y + i as f32 * line_height, font)?;
    }
    Ok(())
}

/// Outline drawn around a selected element.
#[must_use]
pub fn highlight_bounds(config: &RendererConfig, element: &Element) -> Bounds {
    match &element.shape {
        Shape::Text { .. } => {
            let halo = &config.text_halo;
            Bounds {
                x1: element.x - halo.left,
                y1: element.y - halo.top,
                x2: element.x - halo.left + element.width + halo.extra_width,
                y2: element.y - halo.top + element.height + halo.extra_height,
            }
        }
        Shape::Linear { points } => normalized_line_bounds(points).padded(config.highlight_padding),
        Shape::Rectangle | Shape::Ellipse | Shape::Selection => {
            normalized_bounds(element).padded(config.highlight_padding)
        }
    }
}

fn draw_highlight(
    surface: &mut dyn DrawingCapability,
    config: &RendererConfig,
    element: &Element,
) -> RenderResult<()> {
    let b = highlight_bounds(config, element);
    tracing::trace!("Highlight {} at {:?}", element.id, b);
    surface.rectangle(b.x1, b.y1, b.width(), b.height(), &config.styles.highlight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DrawCommand, RecordingBackend};
    use sketchpad_core::{GenericKind, Point};

    fn record(config: &RendererConfig, elements: &[Element]) -> Vec<DrawCommand> {
        let mut backend = RecordingBackend::new();
        let log = backend.log();
        render_elements(&mut backend, config, elements).expect("render");
        let commands = log.borrow().clone();
        commands
    }

    #[test]
    fn test_clear_comes_first() {
        let config = RendererConfig::default();
        let commands = record(&config, &[]);
        assert_eq!(
            commands,
            vec![DrawCommand::Clear {
                background: "#ffffff".to_string()
            }]
        );
    }

    #[test]
    fn test_ellipse_is_centred_in_box() {
        let config = RendererConfig::default();
        let ellipse = Element::generic(GenericKind::Ellipse, 10.0, 20.0).with_size(30.0, -40.0);
        let commands = record(&config, &[ellipse]);
        assert_eq!(
            commands[1],
            DrawCommand::Ellipse {
                cx: 25.0,
                cy: 0.0,
                width: 30.0,
                height: -40.0,
                style: config.styles.ellipse.clone(),
            }
        );
    }

    #[test]
    fn test_text_lines_use_measured_line_height() {
        let config = RendererConfig::default();
        let text = Element::text(5.0, 50.0, "one\ntwo\n");
        let commands = record(&config, &[text]);
        // Reference glyph is 10px wide in the recorder, so lines are 12px apart.
        let lines: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, y, font, .. } => Some((text.as_str(), *y, font.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 3);
        for ((text, y, font), (want_text, want_y)) in
            lines.into_iter().zip([("one", 50.0), ("two", 62.0), ("", 74.0)])
        {
            assert_eq!(text, want_text);
            assert_eq!(font, "16px serif");
            assert!((y - want_y).abs() < 1e-4, "{text:?} at {y}, expected {want_y}");
        }
    }

    #[test]
    fn test_highlight_bounds_per_kind() {
        let config = RendererConfig::default();

        let rect = Element::generic(GenericKind::Rectangle, 100.0, 100.0).with_size(-50.0, -50.0);
        let b = highlight_bounds(&config, &rect);
        assert_eq!((b.x1, b.y1, b.x2, b.y2), (40.0, 40.0, 110.0, 110.0));

        let line = Element::linear(0.0, 0.0, [Point::new(20.0, 0.0), Point::new(0.0, 20.0)]);
        let b = highlight_bounds(&config, &line);
        assert_eq!((b.x1, b.y1, b.x2, b.y2), (-10.0, -10.0, 30.0, 30.0));

        let text = Element::text(50.0, 50.0, "hi").with_size(40.0, 20.0);
        let b = highlight_bounds(&config, &text);
        assert_eq!((b.x1, b.y1, b.width(), b.height()), (40.0, 30.0, 60.0, 40.0));
    }

    #[test]
    fn test_selected_element_gets_outline_after_shape() {
        let config = RendererConfig::default();
        let rect = Element::generic(GenericKind::Rectangle, 0.0, 0.0)
            .with_size(10.0, 10.0)
            .with_selected(true);
        let commands = record(&config, &[rect]);
        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[2],
            DrawCommand::Rectangle {
                x: -10.0,
                y: -10.0,
                width: 30.0,
                height: 30.0,
                style: config.styles.highlight.clone(),
            }
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let config = RendererConfig::default();
        let elements = vec![
            Element::generic(GenericKind::Rectangle, 1.0, 2.0).with_size(3.0, 4.0),
            Element::dot(7.0, 7.0),
            Element::text(0.0, 0.0, "a\nb").with_selected(true),
        ];
        assert_eq!(record(&config, &elements), record(&config, &elements));
    }
}
