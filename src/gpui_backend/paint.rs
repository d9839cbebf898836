use gpui::{
    App, BorderStyle, Bounds, Corners, Edges, PathBuilder, Pixels, Point, SharedString, TextRun,
    Window, font, point, px, quad,
};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{Color, HAlign, RenderCommand, ShapeStyle, Surface, TextStyle, VAlign};

/// Paint every command recorded in `surface` inside `bounds`.
pub(crate) fn paint_surface(
    surface: &Surface,
    bounds: Bounds<Pixels>,
    fallback_font: &SharedString,
    window: &mut Window,
    cx: &mut App,
) {
    let origin = bounds.origin;
    for command in surface.commands().commands() {
        match command {
            RenderCommand::Background(color) => {
                paint_box(window, bounds, 0.0, Some(*color), None, 0.0);
            }
            RenderCommand::Rect { rect, style } => {
                paint_shape(window, to_bounds(origin, *rect), 0.0, *style);
            }
            RenderCommand::Line {
                start,
                end,
                color,
                width,
            } => {
                let mut builder = PathBuilder::stroke(px(width.max(0.5)));
                builder.move_to(to_point(origin, *start));
                builder.line_to(to_point(origin, *end));
                if let Ok(path) = builder.build() {
                    window.paint_path(path, to_rgba(*color));
                }
            }
            RenderCommand::Circle {
                center,
                diameter,
                style,
            } => {
                let rect = ScreenRect::from_center_size(center.x, center.y, *diameter, *diameter);
                paint_shape(window, to_bounds(origin, rect), diameter * 0.5, *style);
            }
            RenderCommand::Triangle { points, style } => {
                paint_triangle(window, origin, points, *style);
            }
            RenderCommand::Text {
                position,
                text,
                style,
            } => {
                let family = style
                    .font
                    .and_then(|id| surface.font(id))
                    .map(|(name, _)| SharedString::from(name.to_string()))
                    .unwrap_or_else(|| fallback_font.clone());
                paint_text(window, cx, origin, *position, text, style, family);
            }
        }
    }
}

fn paint_shape(window: &mut Window, bounds: Bounds<Pixels>, radius: f32, style: ShapeStyle) {
    paint_box(
        window,
        bounds,
        radius,
        style.fill,
        style.stroke,
        style.stroke_width,
    );
}

fn paint_box(
    window: &mut Window,
    bounds: Bounds<Pixels>,
    radius: f32,
    fill: Option<Color>,
    stroke: Option<Color>,
    stroke_width: f32,
) {
    let border = if stroke.is_some() { stroke_width } else { 0.0 };
    window.paint_quad(quad(
        bounds,
        Corners::all(px(radius)),
        to_rgba(fill.unwrap_or(Color::TRANSPARENT)),
        Edges::all(px(border)),
        to_rgba(stroke.unwrap_or(Color::TRANSPARENT)),
        BorderStyle::default(),
    ));
}

fn paint_triangle(
    window: &mut Window,
    origin: Point<Pixels>,
    points: &[ScreenPoint; 3],
    style: ShapeStyle,
) {
    let trace = |builder: &mut PathBuilder| {
        builder.move_to(to_point(origin, points[0]));
        builder.line_to(to_point(origin, points[1]));
        builder.line_to(to_point(origin, points[2]));
        builder.line_to(to_point(origin, points[0]));
    };
    if let Some(fill) = style.fill {
        let mut builder = PathBuilder::fill();
        trace(&mut builder);
        if let Ok(path) = builder.build() {
            window.paint_path(path, to_rgba(fill));
        }
    }
    if let Some(stroke) = style.stroke {
        let mut builder = PathBuilder::stroke(px(style.stroke_width.max(0.5)));
        trace(&mut builder);
        if let Ok(path) = builder.build() {
            window.paint_path(path, to_rgba(stroke));
        }
    }
}

fn paint_text(
    window: &mut Window,
    cx: &mut App,
    origin: Point<Pixels>,
    position: ScreenPoint,
    text: &str,
    style: &TextStyle,
    family: SharedString,
) {
    if text.is_empty() {
        return;
    }
    let run = |len: usize| TextRun {
        len,
        font: font(family.clone()),
        color: to_hsla(style.color),
        background_color: None,
        underline: None,
        strikethrough: None,
    };

    if style.rotation.abs() > f32::EPSILON {
        // Glyphs stay upright and advance along the rotated baseline.
        let (sin, cos) = style.rotation.sin_cos();
        let total = window
            .text_system()
            .shape_line(text.to_string().into(), px(style.size), &[run(text.len())], None);
        let mut advance = -align_offset(f32::from(total.width), style.h_align);
        for ch in text.chars() {
            let glyph = ch.to_string();
            let shaped = window.text_system().shape_line(
                glyph.clone().into(),
                px(style.size),
                &[run(glyph.len())],
                None,
            );
            let width = f32::from(shaped.width);
            let at = ScreenPoint::new(
                position.x + cos * (advance + width * 0.5) - width * 0.5,
                position.y + sin * (advance + width * 0.5),
            );
            let top = at.y - v_offset(&shaped, style.v_align);
            let line_height = shaped.ascent + shaped.descent;
            let _ = shaped.paint(to_point(origin, ScreenPoint::new(at.x, top)), line_height, window, cx);
            advance += width;
        }
        return;
    }

    let shaped = window
        .text_system()
        .shape_line(text.to_string().into(), px(style.size), &[run(text.len())], None);
    let width = f32::from(shaped.width);
    let x = position.x - align_offset(width, style.h_align);
    let y = position.y - v_offset(&shaped, style.v_align);
    let line_height = shaped.ascent + shaped.descent;
    let _ = shaped.paint(to_point(origin, ScreenPoint::new(x, y)), line_height, window, cx);
}

fn align_offset(width: f32, align: HAlign) -> f32 {
    match align {
        HAlign::Left => 0.0,
        HAlign::Center => width * 0.5,
        HAlign::Right => width,
    }
}

/// Distance from the top of the line box to the anchor.
fn v_offset(shaped: &gpui::ShapedLine, align: VAlign) -> f32 {
    let ascent = f32::from(shaped.ascent);
    let descent = f32::from(shaped.descent);
    match align {
        VAlign::Top => 0.0,
        VAlign::Center => (ascent + descent) * 0.5,
        VAlign::Baseline => ascent,
        VAlign::Bottom => ascent + descent,
    }
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}

fn to_point(origin: Point<Pixels>, p: ScreenPoint) -> Point<Pixels> {
    point(origin.x + px(p.x), origin.y + px(p.y))
}

fn to_bounds(origin: Point<Pixels>, rect: ScreenRect) -> Bounds<Pixels> {
    Bounds::from_corners(to_point(origin, rect.min), to_point(origin, rect.max))
}
