//! GameView: draws a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure; no terminal I/O happens here, so every frame can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Per-frame presentation state that is not part of the game itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInfo {
    /// Rows being cleared are drawn hidden on this phase of the flash
    pub flash_hidden: bool,
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_WIDTH: u16 = 12;

pub struct GameView {
    /// Terminal columns per board cell
    cell_w: u16,
    /// Terminal rows per board cell
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Terminal glyphs are roughly twice as tall as wide.
        Self::new(2, 1)
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Draw into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        info: FrameInfo,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_w = BOARD_WIDTH as u16 * self.cell_w;
        let board_h = BOARD_HEIGHT as u16 * self.cell_h;
        let panel_w = PANEL_MIN_WIDTH + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(board_w + 2 + panel_w) / 2,
            y: viewport.height.saturating_sub(board_h + 2) / 2,
            w: board_w + 2,
            h: board_h + 2,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            board_w,
            board_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG),
        );
        self.draw_border(fb, frame);
        self.draw_settled(fb, frame, snap, info);

        if let Some(active) = snap.active {
            let ghost = CellStyle::new(Rgb::new(140, 140, 140), PLAY_BG).dim();
            for (x, y) in active.landing_cells() {
                self.fill_board_cell(fb, frame, x, y, '░', ghost);
            }
            for (x, y) in active.cells {
                self.fill_board_cell(fb, frame, x, y, '█', piece_style(active.color));
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over {
            self.draw_overlay_text(fb, frame, "GAME OVER");
        }
    }

    /// Allocating convenience wrapper around [`GameView::render_into`]
    pub fn render(&self, snap: &GameSnapshot, info: FrameInfo, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, info, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: Frame) {
        let style = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let right = f.x + f.w - 1;
        let bottom = f.y + f.h - 1;

        for x in f.x + 1..right {
            fb.put_char(x, f.y, '─', style);
            fb.put_char(x, bottom, '─', style);
        }
        for y in f.y + 1..bottom {
            fb.put_char(f.x, y, '│', style);
            fb.put_char(right, y, '│', style);
        }
        fb.put_char(f.x, f.y, '┌', style);
        fb.put_char(right, f.y, '┐', style);
        fb.put_char(f.x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
    }

    fn draw_settled(&self, fb: &mut FrameBuffer, f: Frame, snap: &GameSnapshot, info: FrameInfo) {
        let grid = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        for (y, row) in snap.board.iter().enumerate() {
            let hidden = info.flash_hidden && snap.clearing_rows.contains(&y);
            for (x, cell) in row.iter().enumerate() {
                let (x, y) = (x as i8, y as i8);
                match cell {
                    Some(color) if !hidden => {
                        self.fill_board_cell(fb, f, x, y, '█', piece_style(*color));
                    }
                    _ => self.fill_board_cell(fb, f, x, y, '·', grid),
                }
            }
        }
    }

    fn fill_board_cell(&self, fb: &mut FrameBuffer, f: Frame, x: i8, y: i8, ch: char, style: CellStyle) {
        if !(0..BOARD_WIDTH as i8).contains(&x) || !(0..BOARD_HEIGHT as i8).contains(&y) {
            return;
        }
        let px = f.x + 1 + x as u16 * self.cell_w;
        let py = f.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, f: Frame) {
        let x = f.x.saturating_add(f.w).saturating_add(2);
        if x >= viewport.width || viewport.width - x < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let mut y = f.y;

        for (name, n) in [
            ("SCORE", snap.score),
            ("HIGHSCORE", snap.highscore),
            ("LEVEL", snap.level),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y + 1, n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(x, y, "ROWS", label);
        let end = fb.put_u32(x, y + 1, snap.rows_cleared_this_level, value);
        fb.put_str(end, y + 1, "/10", value.dim());
        y = y.saturating_add(3);

        fb.put_str(x, y, "TIME", label);
        let end = fb.put_u32_2(x, y + 1, snap.elapsed_secs / 60, value);
        fb.put_char(end, y + 1, ':', value);
        fb.put_u32_2(end + 1, y + 1, snap.elapsed_secs % 60, value);
        y = y.saturating_add(3);

        fb.put_str(x, y, "HOLD", label);
        match snap.hold {
            Some(kind) => fb.put_str(x, y + 1, kind.as_str(), piece_style(kind.color())),
            None => fb.put_str(x, y + 1, "-", value),
        };
        y = y.saturating_add(3);

        fb.put_str(x, y, "NEXT", label);
        for (i, kind) in snap.upcoming.iter().enumerate() {
            let row = y.saturating_add(1 + i as u16);
            if row >= viewport.height {
                break;
            }
            let style = if i == 0 {
                piece_style(kind.color())
            } else {
                piece_style(kind.color()).dim()
            };
            fb.put_str(x, row, next_label(*kind), style);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, f: Frame, text: &str) {
        let text_w = text.chars().count() as u16;
        let x = f.x.saturating_add(f.w.saturating_sub(text_w) / 2);
        let y = f.y.saturating_add(f.h / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, y, text, style);
    }
}

pub fn color_rgb(color: Color) -> Rgb {
    match color {
        Color::Cyan => Rgb::new(80, 220, 220),
        Color::Yellow => Rgb::new(240, 220, 80),
        Color::Magenta => Rgb::new(200, 120, 220),
        Color::Green => Rgb::new(100, 220, 120),
        Color::Red => Rgb::new(220, 80, 80),
        Color::Blue => Rgb::new(80, 120, 220),
        Color::Orange => Rgb::new(255, 165, 0),
    }
}

fn piece_style(color: Color) -> CellStyle {
    CellStyle::new(color_rgb(color), PLAY_BG).bold()
}

fn next_label(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::I => "I ████",
        PieceKind::O => "O ██",
        PieceKind::T => "T ▀█▀",
        PieceKind::S => "S ▄█▀",
        PieceKind::Z => "Z ▀█▄",
        PieceKind::J => "J █▄▄",
        PieceKind::L => "L ▄▄█",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActiveSnapshot;

    const VP: Viewport = Viewport {
        width: 60,
        height: 24,
    };

    fn count_char(fb: &FrameBuffer, ch: char) -> usize {
        fb.cells().iter().filter(|c| c.ch == ch).count()
    }

    fn contains_text(fb: &FrameBuffer, text: &str) -> bool {
        (0..fb.height()).any(|y| {
            let row: String = (0..fb.width())
                .map(|x| fb.get(x, y).map(|c| c.ch).unwrap_or(' '))
                .collect();
            row.contains(text)
        })
    }

    #[test]
    fn empty_board_draws_grid_and_border() {
        let snap = GameSnapshot::default();
        let fb = GameView::default().render(&snap, FrameInfo::default(), VP);
        assert_eq!(count_char(&fb, '·'), 200 * 2);
        assert_eq!(count_char(&fb, '┌'), 1);
        assert!(contains_text(&fb, "SCORE"));
        assert!(contains_text(&fb, "HIGHSCORE"));
        assert!(contains_text(&fb, "00:00"));
    }

    #[test]
    fn active_piece_and_landing_preview_are_drawn() {
        let mut snap = GameSnapshot::default();
        snap.active = Some(ActiveSnapshot {
            kind: PieceKind::O,
            cells: [(4, 0), (5, 0), (4, 1), (5, 1)],
            color: Color::Yellow,
            drop_distance: 18,
        });
        let fb = GameView::new(1, 1).render(&snap, FrameInfo::default(), VP);
        assert_eq!(count_char(&fb, '░'), 4);
        assert!(count_char(&fb, '█') >= 4);
    }

    #[test]
    fn clearing_rows_flash() {
        let mut snap = GameSnapshot::default();
        snap.board[19] = [Some(Color::Red); 10];
        snap.clearing_rows.push(19);
        let view = GameView::new(1, 1);

        let shown = view.render(&snap, FrameInfo { flash_hidden: false }, VP);
        let hidden = view.render(&snap, FrameInfo { flash_hidden: true }, VP);
        assert_eq!(count_char(&shown, '·'), 190);
        assert_eq!(count_char(&hidden, '·'), 200);
    }

    #[test]
    fn game_over_overlay() {
        let mut snap = GameSnapshot::default();
        snap.game_over = true;
        snap.elapsed_secs = 125;
        snap.hold = Some(PieceKind::T);
        let fb = GameView::default().render(&snap, FrameInfo::default(), VP);
        assert!(contains_text(&fb, "GAME OVER"));
        assert!(contains_text(&fb, "02:05"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let snap = GameSnapshot::default();
        let fb = GameView::default().render(&snap, FrameInfo::default(), Viewport::new(5, 3));
        assert_eq!((fb.width(), fb.height()), (5, 3));
    }
}
