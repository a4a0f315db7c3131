//! Leaderboard PNG.
//!
//! Two ranked columns on a dark 1100×400 canvas, drawn with the embedded
//! 8×8 bitmap font scaled up. Anything that falls off the canvas is clipped.
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use dexboard_core::{Podium, RosterEntry, split_columns};
use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::persist::ensure_parent_dir;

pub const WIDTH: u32 = 1100;
pub const HEIGHT: u32 = 400;

const BACKGROUND: Rgba<u8> = Rgba([0x1e, 0x1e, 0x1e, 0xff]);
const TEXT: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);
const HEADER_ROW: Rgba<u8> = Rgba([0x44, 0x44, 0x44, 0xff]);
const PLAIN_ROW: Rgba<u8> = Rgba([0x33, 0x33, 0x33, 0xff]);
const SEPARATOR: Rgba<u8> = Rgba([0x88, 0x88, 0x88, 0xff]);
const FOOTER: Rgba<u8> = Rgba([0xaa, 0xaa, 0xaa, 0xff]);
const GOLD: Rgba<u8> = Rgba([0xb8, 0x86, 0x0b, 0xff]);
const SILVER: Rgba<u8> = Rgba([0xa9, 0xa9, 0xa9, 0xff]);
const BRONZE: Rgba<u8> = Rgba([0x8b, 0x5a, 0x2b, 0xff]);

const START_X: i64 = 50;
const START_Y: i64 = 50;
const ROW_HEIGHT: i64 = 50;
const COLUMN_STRIDE: i64 = WIDTH as i64 / 2 - 50;
const ROW_WIDTH: i64 = COLUMN_STRIDE - 50;
const NAME_X: i64 = 20;
const CAUGHT_X: i64 = 250;
const SHINY_X: i64 = 370;
const CELL_PADDING: i64 = 10;

const GLYPH: i64 = 8;

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    scale: i64,
    bold: bool,
    color: Rgba<u8>,
}

impl TextStyle {
    const TITLE: Self = Self {
        scale: 3,
        bold: true,
        color: TEXT,
    };
    const HEADER: Self = Self {
        scale: 2,
        bold: true,
        color: TEXT,
    };
    const ROW: Self = Self {
        scale: 2,
        bold: false,
        color: TEXT,
    };
    const FOOTER: Self = Self {
        scale: 2,
        bold: false,
        color: FOOTER,
    };

    const fn height(self) -> i64 {
        GLYPH * self.scale
    }
}

const fn podium_color(podium: Option<Podium>) -> Rgba<u8> {
    match podium {
        Some(Podium::Gold) => GOLD,
        Some(Podium::Silver) => SILVER,
        Some(Podium::Bronze) => BRONZE,
        None => PLAIN_ROW,
    }
}

/// Footer time: UTC shifted by the server's offset, `dd/mm/yyyy hh:mm`.
#[must_use]
pub fn footer_timestamp(now: DateTime<Utc>, utc_offset_hours: i32) -> String {
    (now + Duration::hours(i64::from(utc_offset_hours)))
        .format("%d/%m/%Y %H:%M")
        .to_string()
}

/// Draw the leaderboard for entries already ranked best first.
#[must_use]
pub fn render_leaderboard(ranked: &[RosterEntry], timestamp: &str) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);

    draw_text(
        &mut canvas,
        i64::from(WIDTH / 2) - 100,
        30 - TextStyle::TITLE.height(),
        "Classement",
        TextStyle::TITLE,
        None,
    );

    let (left, right) = split_columns(ranked);
    draw_column(&mut canvas, left, START_X, true);
    draw_column(&mut canvas, right, START_X + COLUMN_STRIDE, false);

    draw_text(
        &mut canvas,
        i64::from(WIDTH / 2) - 120,
        i64::from(HEIGHT) - 30 - TextStyle::FOOTER.height(),
        &format!("Dernière mise à jour : {timestamp}"),
        TextStyle::FOOTER,
        None,
    );

    canvas
}

fn draw_column(canvas: &mut RgbaImage, players: &[RosterEntry], x: i64, leading: bool) {
    fill_rect(canvas, x, START_Y, ROW_WIDTH, ROW_HEIGHT, HEADER_ROW);
    let header_y = text_top(START_Y, TextStyle::HEADER);
    draw_text(canvas, x + NAME_X, header_y, "Joueur", TextStyle::HEADER, None);
    draw_text(canvas, x + CAUGHT_X, header_y, "Capturé", TextStyle::HEADER, None);
    draw_text(canvas, x + SHINY_X, header_y, "Shiny", TextStyle::HEADER, None);

    for (index, player) in players.iter().enumerate() {
        let y = START_Y + ROW_HEIGHT * (index as i64 + 1);
        let fill = podium_color(Podium::for_row(index, leading));
        fill_rect(canvas, x, y, ROW_WIDTH, ROW_HEIGHT, fill);

        let text_y = text_top(y, TextStyle::ROW);
        draw_text(
            canvas,
            x + NAME_X,
            text_y,
            &player.username,
            TextStyle::ROW,
            Some(CAUGHT_X - NAME_X - CELL_PADDING),
        );
        draw_text(
            canvas,
            x + CAUGHT_X,
            text_y,
            &player.caught.to_string(),
            TextStyle::ROW,
            Some(SHINY_X - CAUGHT_X - CELL_PADDING),
        );
        draw_text(
            canvas,
            x + SHINY_X,
            text_y,
            &player.shiny.to_string(),
            TextStyle::ROW,
            Some(ROW_WIDTH - SHINY_X),
        );

        fill_rect(canvas, x, y + ROW_HEIGHT - 1, ROW_WIDTH, 1, SEPARATOR);
    }
}

const fn text_top(row_y: i64, style: TextStyle) -> i64 {
    row_y + (ROW_HEIGHT - style.height()) / 2
}

fn put(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y))
        && x < canvas.width()
        && y < canvas.height()
    {
        canvas.put_pixel(x, y, color);
    }
}

fn fill_rect(canvas: &mut RgbaImage, x: i64, y: i64, width: i64, height: i64, color: Rgba<u8>) {
    for py in y..y + height {
        for px in x..x + width {
            put(canvas, px, py, color);
        }
    }
}

fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// Draw `text` with its top-left corner at `(x, y)`.
///
/// Glyphs that would cross `max_width` are dropped whole.
fn draw_text(
    canvas: &mut RgbaImage,
    x: i64,
    y: i64,
    text: &str,
    style: TextStyle,
    max_width: Option<i64>,
) {
    let advance = GLYPH * style.scale;
    let mut pen_x = x;
    for c in text.chars() {
        if max_width.is_some_and(|max| pen_x + advance - x > max) {
            break;
        }
        draw_glyph(canvas, pen_x, y, glyph(c), style);
        pen_x += advance;
    }
}

fn draw_glyph(canvas: &mut RgbaImage, x: i64, y: i64, rows: [u8; 8], style: TextStyle) {
    let emboldening = i64::from(style.bold);
    for (row, &bits) in rows.iter().enumerate() {
        for col in 0..GLYPH {
            if bits & (1_u8 << col) == 0 {
                continue;
            }
            let px = x + col * style.scale;
            let py = y + row as i64 * style.scale;
            fill_rect(
                canvas,
                px,
                py,
                style.scale + emboldening,
                style.scale,
                style.color,
            );
        }
    }
}

/// Encode the image as PNG at `path`, replacing any previous file.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_png(canvas: &RgbaImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    canvas
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))
}
