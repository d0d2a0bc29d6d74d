//! The VMP Villa emblem drawn in the top-right of the header band.

use crate::document::{Align, DrawOp, Font, Page, Paint, TextRun};
use crate::geometry::{Color, Point, Rect};

/// Emblem bounding box edge.
pub const EMBLEM_SIZE_MM: f32 = 30.0;

/// Draws the emblem with its bounding box's top-left corner at `origin`.
///
/// Two pink rings, a roof line over a small filled block, and the
/// "VMP / VILLA / you feel comfortable" lettering centred beneath.
pub fn draw_emblem(page: &mut Page, origin: Point) {
    let half = EMBLEM_SIZE_MM / 2.0;
    let center = Point::new(origin.x + half, origin.y + half);
    let at = |dx: f32, dy: f32| Point::new(origin.x + dx, origin.y + dy);

    page.push(DrawOp::Circle { center, radius: half, width: 0.8, color: Color::BRAND_PINK });
    page.push(DrawOp::Circle { center, radius: 13.0, width: 0.5, color: Color::BRAND_PINK });

    page.push(DrawOp::Line { from: at(8.0, 10.0), to: at(15.0, 5.0), width: 0.8, color: Color::BRAND_PINK });
    page.push(DrawOp::Line { from: at(15.0, 5.0), to: at(22.0, 10.0), width: 0.8, color: Color::BRAND_PINK });
    page.push(DrawOp::Rect {
        rect: Rect::new(origin.x + 10.0, origin.y + 12.0, 10.0, 4.0),
        paint: Paint::Fill(Color::BRAND_PINK),
    });

    for (text, font, size, dy) in [
        ("VMP", Font::Bold, 10.0, 21.0),
        ("VILLA", Font::Bold, 7.0, 26.0),
        ("you feel comfortable", Font::Regular, 4.0, 29.0),
    ] {
        page.push(DrawOp::Text(TextRun {
            text: text.to_string(),
            x: center.x,
            y: origin.y + dy,
            font,
            size,
            color: Color::BRAND_PINK,
            align: Align::Center,
        }));
    }
}
