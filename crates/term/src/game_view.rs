//! GameView: maps a [`SessionSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Hint, SessionSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Position, TileKind, LOW_TIME_WARNING_SECS};

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

/// Front-end state drawn on top of the session: the engine knows nothing
/// about any of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overlay {
    pub cursor: Option<Position>,
    pub hint: Option<Hint>,
    pub time_left_ms: u32,
    /// One-line status under the side panel (e.g. "NO MOVES")
    pub message: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(70, 70, 110);
const PICK_BG: Rgb = Rgb::new(120, 100, 30);
const HINT_BG: Rgb = Rgb::new(40, 90, 60);

/// A lightweight terminal renderer for the match-3 board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Outer size of the framed board for an `n` x `n` grid.
    pub fn frame_size(&self, n: u8) -> (u16, u16) {
        (
            (n as u16) * self.cell_w + 2,
            (n as u16) * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        overlay: &Overlay,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size(snap.size);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        fb.draw_box(start_x, start_y, frame_w, frame_h, border);

        for row in 0..snap.size {
            for col in 0..snap.size {
                let pos = Position::new(row, col);
                let bg = cell_background(snap, overlay, pos);
                match snap.cell(pos) {
                    Some(kind) => self.draw_tile(fb, start_x, start_y, pos, kind, bg),
                    None => self.draw_cleared(fb, start_x, start_y, pos, bg),
                }
            }
        }

        self.draw_side_panel(fb, snap, overlay, viewport, start_x, start_y, frame_w);

        if snap.expired {
            self.draw_time_up(fb, snap, start_x, start_y, frame_w, frame_h);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &SessionSnapshot,
        overlay: &Overlay,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }

    /// Top-left terminal cell of board position `pos`
    pub fn cell_origin(&self, start_x: u16, start_y: u16, pos: Position) -> (u16, u16) {
        (
            start_x + 1 + (pos.col as u16) * self.cell_w,
            start_y + 1 + (pos.row as u16) * self.cell_h,
        )
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        pos: Position,
        kind: TileKind,
        bg: Rgb,
    ) {
        let (px, py) = self.cell_origin(start_x, start_y, pos);
        let style = CellStyle::new(tile_color(kind), bg).bold();
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px, py, kind.letter(), style);
    }

    fn draw_cleared(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        pos: Position,
        bg: Rgb,
    ) {
        let (px, py) = self.cell_origin(start_x, start_y, pos);
        let style = CellStyle::new(Rgb::new(255, 230, 120), bg);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px, py, '*', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        overlay: &Overlay,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let dim = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        let secs = overlay.time_left_ms.div_ceil(1000);
        let time_style = if secs <= LOW_TIME_WARNING_SECS {
            CellStyle::new(Rgb::new(240, 80, 80), Rgb::new(0, 0, 0)).bold()
        } else {
            value
        };
        fb.put_str(panel_x, y, "TIME", label);
        let end = fb.put_u32(panel_x, y + 1, secs, time_style);
        fb.put_char(end, y + 1, 's', time_style);
        y += 3;

        fb.put_str(panel_x, y, "CHAIN", label);
        let end = fb.put_str(panel_x, y + 1, "x", value);
        let end = fb.put_u32(end, y + 1, snap.chain, value);
        let end = fb.put_str(end + 1, y + 1, "best x", dim);
        fb.put_u32(end, y + 1, snap.best_chain, dim);
        y += 3;

        fb.put_str(panel_x, y, "SEED", label);
        match snap.seed {
            Some(seed) => fb.put_u32(panel_x, y + 1, seed, value),
            None => fb.put_str(panel_x, y + 1, "-", value),
        };
        y += 3;

        if let Some(message) = overlay.message {
            let warn = CellStyle::new(Rgb::new(240, 200, 80), Rgb::new(0, 0, 0)).bold();
            fb.put_str(panel_x, y, message, warn);
        }
    }

    fn draw_time_up(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
    ) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let mid_y = start_y.saturating_add(frame_h / 2).saturating_sub(1);

        let text = " TIME UP ";
        let x = start_x.saturating_add(frame_w.saturating_sub(text.len() as u16) / 2);
        fb.put_str(x, mid_y, text, style);

        // " SCORE <n> " centred under it
        let digits = digit_count(snap.score);
        let w = 8 + digits;
        let x = start_x.saturating_add(frame_w.saturating_sub(w) / 2);
        let end = fb.put_str(x, mid_y + 1, " SCORE ", style);
        let end = fb.put_u32(end, mid_y + 1, snap.score, style);
        fb.put_char(end, mid_y + 1, ' ', style);

        let hint = " r: again ";
        let x = start_x.saturating_add(frame_w.saturating_sub(hint.len() as u16) / 2);
        fb.put_str(x, mid_y + 2, hint, style.dim());
    }
}

fn cell_background(snap: &SessionSnapshot, overlay: &Overlay, pos: Position) -> Rgb {
    if snap.first_pick == Some(pos) {
        PICK_BG
    } else if overlay.cursor == Some(pos) {
        CURSOR_BG
    } else if overlay.hint.is_some_and(|hint| hint.contains(pos)) {
        HINT_BG
    } else {
        BOARD_BG
    }
}

fn tile_color(kind: TileKind) -> Rgb {
    match kind {
        TileKind::Leaf => Rgb::new(100, 220, 120),
        TileKind::Bolt => Rgb::new(240, 220, 80),
        TileKind::Shield => Rgb::new(80, 140, 230),
        TileKind::Atom => Rgb::new(200, 120, 220),
        TileKind::Link => Rgb::new(150, 150, 160),
        TileKind::Orb => Rgb::new(230, 90, 90),
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
