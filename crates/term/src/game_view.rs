//! GameView: maps an engine [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::Shape;
use crate::engine::GameSnapshot;
use crate::fb::{BorderChars, CellStyle, FrameBuffer, Rgb};
use crate::types::PieceKind;

/// Terminal viewport dimensions.
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

/// Characters used to draw the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub block: char,
    pub ghost: char,
    pub empty: char,
    pub border: BorderChars,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            block: '■',
            ghost: '⧄',
            empty: ' ',
            border: BorderChars::default(),
        }
    }
}

const PLAY_BG: Rgb = Rgb::new(20, 20, 28);

const HELP_LINES: [&str; 12] = [
    "PAUSED",
    "",
    "←/→ h/l a/d   move",
    "↑ x k w       rotate cw",
    "z y           rotate ccw",
    "↓ j s         soft drop",
    "space         hard drop",
    "c             hold",
    "esc p         pause",
    "q             quit",
    "",
    "enter / esc to resume",
];

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    glyphs: Glyphs,
}

impl Default for GameView {
    fn default() -> Self {
        // Two terminal columns per board cell.
        Self {
            cell_w: 2,
            glyphs: Glyphs::default(),
        }
    }
}

/// Where the playfield frame landed on screen
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn with_glyphs(mut self, glyphs: Glyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Only the visible rows are drawn; the hidden spawn buffer is skipped.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let visible = snap.visible_height() as u16;
        let board_px_w = (snap.width as u16).saturating_mul(self.cell_w);
        let frame_w = board_px_w.saturating_add(2);
        let frame_h = visible.saturating_add(2);
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
            w: frame_w,
            h: frame_h,
        };

        let border = CellStyle::fg(Rgb::new(200, 200, 200));
        fb.draw_box(frame.x, frame.y, frame.w, frame.h, self.glyphs.border, border);

        let empty = CellStyle::fg(Rgb::new(90, 90, 100)).on(PLAY_BG).dim();
        let locked = CellStyle::fg(Rgb::new(170, 170, 180)).on(PLAY_BG);
        for row in snap.hidden_rows..snap.height {
            for col in 0..snap.width {
                let (ch, style) = if snap.cell(row, col) {
                    (self.glyphs.block, locked)
                } else {
                    (self.glyphs.empty, empty)
                };
                self.draw_cell(fb, frame, snap, row as i32, col as i32, ch, style);
            }
        }

        if let Some(active) = snap.active {
            let ghost = CellStyle::fg(Rgb::new(140, 140, 140)).on(PLAY_BG).dim();
            for (row, col) in snap.ghost_cells() {
                self.draw_cell(fb, frame, snap, row, col, self.glyphs.ghost, ghost);
            }

            let style = CellStyle::fg(piece_color(active.kind)).on(PLAY_BG).bold();
            for &(row, col) in active.cells() {
                self.draw_cell(fb, frame, snap, row, col, self.glyphs.block, style);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over {
            self.draw_game_over(fb, snap, frame);
        } else if snap.paused {
            self.draw_help(fb, viewport);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Draw one board cell given absolute board coordinates; hidden rows and
    /// out-of-range cells are skipped.
    #[allow(clippy::too_many_arguments)]
    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        snap: &GameSnapshot,
        row: i32,
        col: i32,
        ch: char,
        style: CellStyle,
    ) {
        let hidden = snap.hidden_rows as i32;
        if row < hidden || row >= snap.height as i32 || col < 0 || col >= snap.width as i32 {
            return;
        }
        let px = frame
            .x
            .saturating_add(1)
            .saturating_add((col as u16).saturating_mul(self.cell_w));
        let py = frame.y.saturating_add(1).saturating_add((row - hidden) as u16);
        if px >= fb.width() || py >= fb.height() {
            return;
        }
        fb.put_char(px, py, ch, style);
        fb.fill_rect(px + 1, py, self.cell_w - 1, 1, ' ', style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));
        let dim = value.dim();

        let mut y = frame.y;
        let stat = |fb: &mut FrameBuffer, y: &mut u16, name: &str, n: u64| {
            let x = fb.put_str(panel_x, *y, name, label);
            fb.put_u64(x + 1, *y, n, value);
            *y = y.saturating_add(1);
        };
        stat(fb, &mut y, "SCORE", snap.score);
        stat(fb, &mut y, "LEVEL", snap.level as u64);
        stat(fb, &mut y, "LINES", snap.lines as u64);
        stat(fb, &mut y, "COMBO", snap.combo as u64);
        if let Some(at) = snap.next_level_at {
            let x = fb.put_str(panel_x, y, "next at", dim);
            fb.put_u64(x + 1, y, at, dim);
        }
        y = y.saturating_add(1);
        if let Some(kind) = clear_label(snap) {
            fb.put_str(panel_x, y, kind, CellStyle::fg(Rgb::new(255, 200, 80)).bold());
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "HOLD", label);
        y = y.saturating_add(1);
        match snap.hold {
            Some(kind) => {
                let style = if snap.can_hold {
                    CellStyle::fg(piece_color(kind))
                } else {
                    CellStyle::fg(piece_color(kind)).dim()
                };
                y = self.draw_mini(fb, panel_x, y, kind, style);
            }
            // Keep NEXT from jumping once something is held.
            None => y = y.saturating_add(2),
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        for &kind in &snap.next {
            if y >= viewport.height {
                break;
            }
            y = self.draw_mini(fb, panel_x, y, kind, CellStyle::fg(piece_color(kind)));
            y = y.saturating_add(1);
        }
    }

    /// Draw the canonical shape of `kind`; returns the row below it.
    fn draw_mini(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, style: CellStyle) -> u16 {
        let shape = Shape::canonical(kind);
        for (r, c) in shape.cells() {
            let px = x.saturating_add((c as u16).saturating_mul(self.cell_w));
            fb.put_char(px, y.saturating_add(r as u16), self.glyphs.block, style);
        }
        y.saturating_add(shape.height() as u16)
    }

    fn draw_help(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let text_w = HELP_LINES
            .iter()
            .map(|l| l.chars().count() as u16)
            .max()
            .unwrap_or(0);
        let box_w = text_w + 4;
        let box_h = HELP_LINES.len() as u16 + 2;
        let x = viewport.width.saturating_sub(box_w) / 2;
        let y = viewport.height.saturating_sub(box_h) / 2;

        let style = CellStyle::fg(Rgb::new(255, 255, 255));
        fb.fill_rect(x, y, box_w, box_h, ' ', style);
        fb.draw_box(x, y, box_w, box_h, self.glyphs.border, style);
        for (i, line) in HELP_LINES.iter().enumerate() {
            let line_style = if i == 0 { style.bold() } else { style };
            fb.put_str(x + 2, y + 1 + i as u16, line, line_style);
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: Frame) {
        let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let center = |text_w: u16| frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);

        fb.put_str(center(9), mid_y.saturating_sub(1), "GAME OVER", style);

        let digits = snap.score.checked_ilog10().unwrap_or(0) as u16 + 1;
        let x = fb.put_str(center(6 + digits), mid_y, "score ", style.dim());
        fb.put_u64(x, mid_y, snap.score, style);

        fb.put_str(center(9), mid_y.saturating_add(1), "r / q", style.dim());
    }
}

fn clear_label(snap: &GameSnapshot) -> Option<&'static str> {
    use crate::types::ClearKind;
    match snap.last_clear {
        ClearKind::None | ClearKind::Normal => None,
        ClearKind::TSpin => Some("T-SPIN"),
        ClearKind::Tetris => Some("TETRIS"),
        ClearKind::BackToBack => Some("BACK-TO-BACK"),
    }
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ActiveSnapshot;

    fn empty_snapshot() -> GameSnapshot {
        GameSnapshot {
            height: 24,
            width: 10,
            hidden_rows: 4,
            board: vec![false; 240],
            ..GameSnapshot::default()
        }
    }

    fn count(fb: &FrameBuffer, ch: char) -> usize {
        fb.cells().iter().filter(|c| c.ch == ch).count()
    }

    #[test]
    fn hidden_rows_are_not_drawn() {
        let mut snap = empty_snapshot();
        // Row 3 is hidden, row 4 is the first visible row.
        snap.board[3 * 10] = true;
        let fb = GameView::default().render(&snap, Viewport::new(40, 24));
        assert_eq!(count(&fb, '■'), 0);

        snap.board[4 * 10] = true;
        let fb = GameView::default().render(&snap, Viewport::new(40, 24));
        assert_eq!(count(&fb, '■'), 1);
    }

    #[test]
    fn frame_matches_visible_board() {
        let snap = empty_snapshot();
        let fb = GameView::default().render(&snap, Viewport::new(22, 22));
        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('┌'));
        assert_eq!(fb.get(21, 0).map(|c| c.ch), Some('┐'));
        assert_eq!(fb.get(0, 21).map(|c| c.ch), Some('└'));
        assert_eq!(fb.get(21, 21).map(|c| c.ch), Some('┘'));
    }

    #[test]
    fn active_and_ghost_use_their_glyphs() {
        let mut snap = empty_snapshot();
        snap.active = Some(ActiveSnapshot {
            kind: PieceKind::O,
            rotation: crate::types::Rotation::North,
            row: 4,
            col: 3,
            cells: [(4, 3), (4, 4), (5, 3), (5, 4)],
            len: 4,
        });
        snap.ghost_row = Some(22);

        let glyphs = Glyphs {
            block: '#',
            ghost: '+',
            ..Glyphs::default()
        };
        let view = GameView::default().with_glyphs(glyphs);
        // Narrow viewport: no side panel mini shapes.
        let fb = view.render(&snap, Viewport::new(22, 22));
        assert_eq!(count(&fb, '#'), 4);
        assert_eq!(count(&fb, '+'), 4);
    }

    #[test]
    fn help_overlay_only_while_paused() {
        let mut snap = empty_snapshot();
        let view = GameView::default();
        let has_help = |fb: &FrameBuffer| {
            (0..fb.height()).any(|y| {
                let row: String = (0..fb.width()).filter_map(|x| fb.get(x, y)).map(|c| c.ch).collect();
                row.contains("hard drop")
            })
        };

        assert!(!has_help(&view.render(&snap, Viewport::new(60, 24))));
        snap.paused = true;
        assert!(has_help(&view.render(&snap, Viewport::new(60, 24))));
    }

    #[test]
    fn very_wide_board_clips_instead_of_overflowing() {
        let (height, width) = (6, 40_000);
        let mut snap = GameSnapshot {
            height,
            width,
            hidden_rows: 2,
            board: vec![false; height * width],
            ..GameSnapshot::default()
        };
        snap.board[(height - 1) * width] = true;
        snap.board[height * width - 1] = true;
        let far = width as i32 - 2;
        snap.active = Some(ActiveSnapshot {
            kind: PieceKind::O,
            rotation: crate::types::Rotation::North,
            row: 2,
            col: far,
            cells: [(2, far), (2, far + 1), (3, far), (3, far + 1)],
            len: 4,
        });
        snap.ghost_row = Some(4);

        let fb = GameView::default().render(&snap, Viewport::new(80, 24));
        // Only the leftmost filled cell lands on screen.
        assert_eq!(count(&fb, '■'), 1);
        assert_eq!(fb.get(0, 9).map(|c| c.ch), Some('┌'));
        assert_eq!(fb.get(1, 13).map(|c| c.ch), Some('■'));
    }

    #[test]
    fn side_panel_shows_hold_and_next() {
        let mut snap = empty_snapshot();
        snap.hold = Some(PieceKind::I);
        snap.next = vec![PieceKind::T, PieceKind::O];
        snap.score = 1234;

        let fb = GameView::default().render(&snap, Viewport::new(60, 30));
        // I (4) + T (4) + O (4) mini shapes.
        assert_eq!(count(&fb, '■'), 12);

        let text: String = fb.cells().iter().map(|c| c.ch).collect();
        assert!(text.contains("SCORE 1234"));
        assert!(text.contains("NEXT"));
    }
}
