//! Color swatch legends.

use crate::geom::ScreenRect;
use crate::render::{Canvas, Color, HAlign, MatrixScope, StyleScope, Surface, VAlign};
use crate::text::TextMeasurer;

const TEXT_SIZE: f32 = 14.0;
const SWATCH_WIDTH: f32 = 20.0;
const OFFSET: f32 = 10.0;

/// Legend layout options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendOptions {
    /// Lay entries out left to right instead of top to bottom.
    pub horizontal: bool,
    /// Draw a frame around the legend.
    pub frame: bool,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            horizontal: true,
            frame: true,
        }
    }
}

/// Size of a legend with `entries`.
pub fn legend_size<M, S>(measurer: &M, entries: &[(S, Color)], options: LegendOptions) -> (f32, f32)
where
    M: TextMeasurer + ?Sized,
    S: AsRef<str>,
{
    let text_height = measurer.line_height(TEXT_SIZE);
    let widths = entries
        .iter()
        .map(|(label, _)| measurer.text_width(label.as_ref(), TEXT_SIZE));
    if options.horizontal {
        let labels: f32 = widths.sum();
        let count = entries.len() as f32;
        (
            labels + count * SWATCH_WIDTH + count * OFFSET * 2.0,
            text_height,
        )
    } else {
        let widest = widths.fold(0.0, f32::max);
        (
            widest + SWATCH_WIDTH + OFFSET * 2.0,
            entries.len() as f32 * text_height,
        )
    }
}

/// Draw a legend with its top-left corner at `(x, y)` and return its bounds.
pub fn legend<S: AsRef<str>>(
    canvas: &mut dyn Canvas,
    entries: &[(S, Color)],
    x: f32,
    y: f32,
    options: LegendOptions,
) -> ScreenRect {
    let mut canvas = StyleScope::new(canvas);
    canvas.stroke_weight(1.0);
    canvas.text_size(TEXT_SIZE);
    canvas.text_align(HAlign::Left, VAlign::Top);
    let (width, height) = legend_size(&*canvas, entries, options);
    let text_height = canvas.ascent() + canvas.descent();

    canvas.fill(Color::BLACK);
    canvas.stroke(Color::WHITE);
    if options.frame {
        canvas.rect(x, y, width - 1.0, height - 1.0);
    }
    canvas.fill(Color::WHITE);

    let mut canvas = MatrixScope::new(&mut *canvas);
    canvas.translate(x, y);
    let mut cursor = 0.0;
    for (label, color) in entries {
        let label = label.as_ref();
        {
            let mut swatch = StyleScope::new(&mut *canvas);
            swatch.no_stroke();
            swatch.fill(*color);
            swatch.rect(cursor + OFFSET * 0.5, 5.0, SWATCH_WIDTH, text_height - 10.0);
        }
        canvas.text(label, cursor + OFFSET * 1.5 + SWATCH_WIDTH, 0.0);
        if options.horizontal {
            cursor += SWATCH_WIDTH + OFFSET * 2.0 + canvas.measure(label);
        } else {
            canvas.translate(0.0, text_height);
        }
    }
    ScreenRect::from_origin_size(x, y, width, height)
}

/// Draw a legend into a new surface sized to fit it.
pub fn legend_to_image<S: AsRef<str>>(
    host: &dyn Canvas,
    entries: &[(S, Color)],
    options: LegendOptions,
) -> Surface {
    let (width, height) = legend_size(host, entries, options);
    let mut surface = host.create_surface(width, height);
    surface.begin_draw();
    legend(&mut surface, entries, 0.0, 0.0, options);
    surface.end_draw();
    surface
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderCommand;
    use crate::text::MonospaceMetrics;

    #[test]
    fn horizontal_size_sums_entries() {
        let metrics = MonospaceMetrics::default();
        let entries = [("ab", Color::WHITE), ("abcd", Color::BLACK)];
        // labels 14 + 28, swatches 40, offsets 40
        assert_eq!(
            legend_size(&metrics, &entries, LegendOptions::default()),
            (122.0, 14.0)
        );
        let vertical = LegendOptions {
            horizontal: false,
            frame: true,
        };
        assert_eq!(legend_size(&metrics, &entries, vertical), (68.0, 28.0));
    }

    #[test]
    fn swatches_use_entry_colors() {
        let mut surface = Surface::headless(400.0, 100.0);
        let red = Color::rgb8(255, 0, 0);
        let bounds = legend(
            &mut surface,
            &[("first", red), ("second", Color::WHITE)],
            10.0,
            20.0,
            LegendOptions::default(),
        );
        assert_eq!(bounds.min.x, 10.0);
        let swatch = surface.commands().commands().iter().find_map(|command| match command {
            RenderCommand::Rect { rect, style } if style.fill == Some(red) => Some(*rect),
            _ => None,
        });
        assert_eq!(swatch, Some(ScreenRect::from_origin_size(15.0, 25.0, 20.0, 4.0)));
        let texts: Vec<_> = surface.commands().texts().collect();
        assert_eq!(texts[0].0.x, 45.0);
        // second entry starts after swatch, offsets and "first" (35px)
        assert_eq!(texts[1].0.x, 45.0 + 20.0 + 20.0 + 35.0);
        assert_eq!(surface.style().fill, Some(Color::WHITE));
    }

    #[test]
    fn vertical_entries_stack() {
        let mut surface = Surface::headless(400.0, 100.0);
        let options = LegendOptions {
            horizontal: false,
            frame: false,
        };
        legend(&mut surface, &[("a", Color::WHITE), ("b", Color::WHITE)], 0.0, 0.0, options);
        let ys: Vec<f32> = surface.commands().texts().map(|(p, _)| p.y).collect();
        assert_eq!(ys, vec![0.0, 14.0]);
    }

    #[test]
    fn image_is_sized_to_legend() {
        let host = Surface::headless(400.0, 100.0);
        let image = legend_to_image(&host, &[("ab", Color::WHITE)], LegendOptions::default());
        assert!(image.has_size(54.0, 14.0));
        assert!(!image.is_drawing());
    }
}
