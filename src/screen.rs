// Copyright (c) 2026 matrixdeck contributors

use rand::Rng;

use crate::cell::Cell;
use crate::console::{Console, SIGNAL_STRENGTH};
use crate::frame::Frame;
use crate::grid::{RainGrid, ROWS};
use crate::palette::Palette;

pub const TITLE: &str = "MATRIX INTERFACE v1.0";

/// Each grid cell is drawn two terminal cells wide to come out roughly
/// square.
const CELL_WIDTH: u16 = 2;
const BLOCK: char = '█';

const TITLE_ROW: u16 = 1;
const GRID_TOP: u16 = 3;

/// Paints the whole interface into the frame: title, rain grid, console
/// box and status bar. Every region is repainted in full each pass; the
/// frame dedups unchanged cells, so only real movement reaches the
/// terminal.
pub fn draw<R: Rng>(frame: &mut Frame, grid: &RainGrid<R>, console: &Console, palette: &Palette) {
    let blank = Cell::blank_with_bg(palette.bg);

    draw_centered(
        frame,
        TITLE_ROW,
        TITLE,
        Cell::styled(' ', palette.accent, palette.bg).bold(),
    );
    draw_grid(frame, grid, palette, blank);
    draw_console(frame, console, palette, blank);
    draw_status_bar(frame, console, palette, blank);
}

fn draw_text(frame: &mut Frame, x: u16, y: u16, text: &str, style: Cell) {
    for (i, ch) in text.chars().enumerate() {
        frame.set(x + i as u16, y, Cell { ch, ..style });
    }
}

fn draw_centered(frame: &mut Frame, y: u16, text: &str, style: Cell) {
    let len = text.chars().count() as u16;
    let x = (frame.width.saturating_sub(len)) / 2;
    draw_text(frame, x, y, text, style);
}

fn draw_grid<R: Rng>(frame: &mut Frame, grid: &RainGrid<R>, palette: &Palette, blank: Cell) {
    let grid_w = grid.columns() as u16 * CELL_WIDTH;
    let left = (frame.width.saturating_sub(grid_w)) / 2;

    for row in 0..ROWS {
        let y = GRID_TOP + row as u16;
        for col in 0..grid.columns() {
            let cell = match grid.cell(row, col) {
                Some(stop) => Cell::styled(BLOCK, palette.trail[stop as usize], palette.bg),
                None => blank,
            };
            let x = left + col as u16 * CELL_WIDTH;
            for dx in 0..CELL_WIDTH {
                frame.set(x + dx, y, cell);
            }
        }
    }
}

fn draw_console(frame: &mut Frame, console: &Console, palette: &Palette, blank: Cell) {
    let top = GRID_TOP + ROWS as u16 + 1;
    let box_w = frame.width.saturating_sub(4).clamp(24, 64);
    let left = (frame.width.saturating_sub(box_w)) / 2;
    let border = Cell::styled(' ', palette.accent, palette.bg);

    let horiz: String = std::iter::once('+')
        .chain(std::iter::repeat('-').take(box_w.saturating_sub(2) as usize))
        .chain(std::iter::once('+'))
        .collect();
    draw_text(frame, left, top, &horiz, border);

    let interior = box_w.saturating_sub(4) as usize;
    let mut lines = console.messages();
    for i in 0..crate::console::LOG_CAPACITY {
        let y = top + 1 + i as u16;
        let text = lines.next().unwrap_or("");
        frame.set(left, y, Cell { ch: '|', ..border });
        frame.set(left + 1, y, blank);
        for (j, ch) in pad_clip(text, interior).chars().enumerate() {
            frame.set(
                left + 2 + j as u16,
                y,
                Cell {
                    ch,
                    ..Cell::styled(' ', palette.accent, palette.bg)
                },
            );
        }
        frame.set(left + box_w - 2, y, blank);
        frame.set(left + box_w - 1, y, Cell { ch: '|', ..border });
    }
    draw_text(
        frame,
        left,
        top + 1 + crate::console::LOG_CAPACITY as u16,
        &horiz,
        border,
    );
}

fn draw_status_bar(frame: &mut Frame, console: &Console, palette: &Palette, blank: Cell) {
    let y = frame.height.saturating_sub(1);
    frame.fill_row(y, blank);

    let style = Cell::styled(' ', palette.accent, palette.bg);
    let left = format!("STATUS: {}", console.status());
    let mid = format!("ACTIVE NODES: {}", console.active_nodes());
    let right = format!("SIGNAL STRENGTH: {}", SIGNAL_STRENGTH);

    draw_text(frame, 1, y, &left, style);
    let mid_x = (frame.width.saturating_sub(mid.chars().count() as u16)) / 2;
    draw_text(frame, mid_x, y, &mid, style);
    let right_x = frame
        .width
        .saturating_sub(right.chars().count() as u16 + 1);
    draw_text(frame, right_x, y, &right, style);
}

/// Pads with spaces to exactly `width` chars, clipping longer text, so a
/// repaint fully overwrites whatever was there before.
fn pad_clip(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    while out.chars().count() < width {
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::palette::build_palette;
    use crate::runtime::ColorMode;

    fn render(width: u16, height: u16) -> Frame {
        let grid = RainGrid::with_rng(1000, StdRng::seed_from_u64(1));
        let console = Console::new();
        let palette = build_palette(grid.scheme_index(), ColorMode::TrueColor, true);
        let mut frame = Frame::new(width, height, palette.bg);
        draw(&mut frame, &grid, &console, &palette);
        frame
    }

    fn row_text(frame: &Frame, y: u16) -> String {
        (0..frame.width)
            .map(|x| frame.get(x, y).map(|c| c.ch).unwrap_or(' '))
            .collect()
    }

    #[test]
    fn title_and_boot_message_are_painted() {
        let frame = render(80, 30);
        assert!(row_text(&frame, TITLE_ROW).contains(TITLE));
        let console_rows: String = (0..frame.height).map(|y| row_text(&frame, y)).collect();
        assert!(console_rows.contains("> MATRIX SIMULATION INITIALIZED"));
    }

    #[test]
    fn status_bar_sits_on_the_last_row() {
        let frame = render(80, 30);
        let bar = row_text(&frame, 29);
        assert!(bar.contains("STATUS: SYSTEM IDLE"));
        assert!(bar.contains("ACTIVE NODES:"));
        assert!(bar.contains("SIGNAL STRENGTH:"));
    }

    #[test]
    fn drawing_into_a_tiny_frame_does_not_panic() {
        let frame = render(10, 4);
        assert_eq!(frame.width, 10);
    }

    #[test]
    fn pad_clip_is_exact_width() {
        assert_eq!(pad_clip("abc", 5), "abc  ");
        assert_eq!(pad_clip("abcdefgh", 5), "abcde");
    }
}
