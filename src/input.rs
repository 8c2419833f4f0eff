//! Terminal input: keys and mouse clicks become taps in world coordinates.
//!
//! The game only understands taps. Keys are shortcuts: the flap key taps
//! low on the screen, the retry and leaderboard keys tap the centre of
//! their button once the run is over, and the music key toggles sound
//! without tapping at all.

use crate::core::constants::{LEADERS_BUTTON, RETRY_BUTTON};
use crate::core::{Bounds, GameState, Point, Viewport};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use ratatui::layout::Rect;

/// Terminal columns per row that cover the same distance on screen.
const CELL_ASPECT: f32 = 2.0;

/// Maps between terminal cells and world points for one play area.
///
/// World y grows upward; terminal rows grow downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub area: Rect,
    pub viewport: Viewport,
}

impl Projection {
    /// Largest area inside `outer` with the viewport's aspect ratio, centred.
    pub fn fit(outer: Rect, viewport: Viewport) -> Self {
        let aspect = viewport.width / viewport.height * CELL_ASPECT;
        let mut rows = outer.height as f32;
        let mut cols = (rows * aspect).round();
        if cols > outer.width as f32 {
            cols = outer.width as f32;
            rows = (cols / aspect).round();
        }
        let (cols, rows) = (cols.max(1.0) as u16, rows.max(1.0) as u16);
        let cols = cols.min(outer.width);
        let rows = rows.min(outer.height);

        let area = Rect {
            x: outer.x + (outer.width - cols) / 2,
            y: outer.y + (outer.height - rows) / 2,
            width: cols,
            height: rows,
        };
        Self { area, viewport }
    }

    /// World points per column and per row.
    fn scale(&self) -> (f32, f32) {
        (
            self.viewport.width / self.area.width.max(1) as f32,
            self.viewport.height / self.area.height.max(1) as f32,
        )
    }

    /// World point at the centre of a terminal cell, if the cell is inside.
    pub fn to_world(&self, col: u16, row: u16) -> Option<Point> {
        let a = self.area;
        if col < a.x || row < a.y || col >= a.x + a.width || row >= a.y + a.height {
            return None;
        }
        let (sx, sy) = self.scale();
        let x = (col - a.x) as f32 * sx + sx / 2.0;
        let y = self.viewport.height - ((row - a.y) as f32 * sy + sy / 2.0);
        Some(Point::new(x, y))
    }

    /// Terminal cell containing a world point, if it is on screen.
    pub fn to_cell(&self, p: Point) -> Option<(u16, u16)> {
        if p.x < 0.0 || p.y < 0.0 || p.x >= self.viewport.width || p.y > self.viewport.height {
            return None;
        }
        let (sx, sy) = self.scale();
        let col = ((p.x / sx) as u16).min(self.area.width.saturating_sub(1));
        let row = (((self.viewport.height - p.y) / sy) as u16)
            .min(self.area.height.saturating_sub(1));
        Some((self.area.x + col, self.area.y + row))
    }

    /// Cells covered by a world rectangle, clipped to the play area.
    pub fn to_rect(&self, b: Bounds) -> Option<Rect> {
        let (sx, sy) = self.scale();
        let left = (b.x / sx).floor().max(0.0);
        let right = (b.right() / sx).ceil().min(self.area.width as f32);
        let top_row = ((self.viewport.height - b.top()) / sy).floor().max(0.0);
        let bottom_row = ((self.viewport.height - b.y) / sy).ceil().min(self.area.height as f32);
        if right <= left || bottom_row <= top_row {
            return None;
        }
        Some(Rect {
            x: self.area.x + left as u16,
            y: self.area.y + top_row as u16,
            width: (right - left) as u16,
            height: (bottom_row - top_row) as u16,
        })
    }
}

/// What one terminal event means to the game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    Tap(Point),
    ToggleMusic,
    Quit,
    Ignore,
}

/// Spot tapped by the flap key: low on screen, clear of every button.
pub fn flap_point(viewport: Viewport) -> Point {
    viewport.at(0.5, 0.1)
}

/// Map a key press. Button shortcuts only act while their button is shown.
pub fn map_key(key: KeyEvent, viewport: Viewport, state: GameState) -> InputAction {
    if key.kind != KeyEventKind::Press {
        return InputAction::Ignore;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputAction::Quit;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
            InputAction::Tap(flap_point(viewport))
        }
        KeyCode::Char('m') | KeyCode::Char('M') => InputAction::ToggleMusic,
        KeyCode::Char('r') | KeyCode::Char('R') if state == GameState::GameOver => {
            InputAction::Tap(viewport.region(RETRY_BUTTON).center())
        }
        KeyCode::Char('l') | KeyCode::Char('L') if state == GameState::GameOver => {
            InputAction::Tap(viewport.region(LEADERS_BUTTON).center())
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputAction::Quit,
        _ => InputAction::Ignore,
    }
}

/// Map any terminal event. Left clicks inside the play area tap there.
pub fn map_event(event: &Event, projection: &Projection, state: GameState) -> InputAction {
    match event {
        Event::Key(key) => map_key(*key, projection.viewport, state),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => projection
                .to_world(mouse.column, mouse.row)
                .map_or(InputAction::Ignore, InputAction::Tap),
            _ => InputAction::Ignore,
        },
        _ => InputAction::Ignore,
    }
}

/// Whether an event dismisses a modal: any key press or click.
pub fn dismisses_modal(event: &Event) -> bool {
    match event {
        Event::Key(key) => key.kind == KeyEventKind::Press,
        Event::Mouse(mouse) => matches!(mouse.kind, MouseEventKind::Down(_)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{MUSIC_BUTTON, TUTORIAL_TAP_LIMIT, VIEW_HEIGHT, VIEW_WIDTH};
    use crossterm::event::{KeyEventState, MouseEvent};

    fn view() -> Viewport {
        Viewport::new(VIEW_WIDTH, VIEW_HEIGHT)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::empty(),
        })
    }

    fn projection() -> Projection {
        Projection::fit(Rect::new(0, 0, 100, 30), view())
    }

    #[test]
    fn test_fit_keeps_aspect_and_centres() {
        let p = projection();
        assert_eq!(p.area.height, 30);
        assert_eq!(p.area.width, 40);
        assert_eq!(p.area.x, 30);

        // Narrow terminal: width limits
        let p = Projection::fit(Rect::new(0, 0, 20, 40), view());
        assert_eq!(p.area.width, 20);
        assert_eq!(p.area.height, 15);
        assert_eq!(p.area.y, 12);
    }

    #[test]
    fn test_world_and_cell_agree() {
        let p = projection();
        for (col, row) in [(30, 0), (45, 10), (69, 29)] {
            let world = p.to_world(col, row).unwrap();
            assert_eq!(p.to_cell(world), Some((col, row)));
        }
        assert!(p.to_world(10, 10).is_none());
        assert!(p.to_cell(Point::new(-1.0, 10.0)).is_none());
    }

    #[test]
    fn test_top_row_is_high_in_world() {
        let p = projection();
        let top = p.to_world(40, 0).unwrap();
        let bottom = p.to_world(40, 29).unwrap();
        assert!(top.y > bottom.y);
        assert!(top.y > VIEW_HEIGHT * 0.95);
    }

    #[test]
    fn test_to_rect_covers_bounds() {
        let p = projection();
        let r = p.to_rect(Bounds::new(0.0, 0.0, VIEW_WIDTH, VIEW_HEIGHT)).unwrap();
        assert_eq!(r, p.area);
        assert!(p.to_rect(Bounds::new(-100.0, 0.0, 50.0, 50.0)).is_none());
    }

    #[test]
    fn test_flap_key_taps_inside_start_zone() {
        let flap = map_key(key(KeyCode::Char(' ')), view(), GameState::Tutorial);
        let InputAction::Tap(point) = flap else {
            panic!("expected tap");
        };
        assert!(point.y < VIEW_HEIGHT * TUTORIAL_TAP_LIMIT);
        assert!(!view().region(MUSIC_BUTTON).contains(point));
        assert!(!view().region(RETRY_BUTTON).contains(point));
        assert!(!view().region(LEADERS_BUTTON).contains(point));
    }

    #[test]
    fn test_button_keys_tap_buttons_after_game_over() {
        let cases = [
            (KeyCode::Char('r'), RETRY_BUTTON),
            (KeyCode::Char('l'), LEADERS_BUTTON),
        ];
        for (code, region) in cases {
            let InputAction::Tap(point) = map_key(key(code), view(), GameState::GameOver) else {
                panic!("expected tap for {:?}", code);
            };
            assert!(view().region(region).contains(point));
        }
    }

    #[test]
    fn test_button_keys_ignored_while_buttons_hidden() {
        for state in [GameState::Tutorial, GameState::Play] {
            for code in [KeyCode::Char('r'), KeyCode::Char('L')] {
                assert_eq!(map_key(key(code), view(), state), InputAction::Ignore);
            }
        }
    }

    #[test]
    fn test_music_key_never_taps() {
        for state in GameState::ALL {
            assert_eq!(
                map_key(key(KeyCode::Char('m')), view(), state),
                InputAction::ToggleMusic
            );
        }
    }

    #[test]
    fn test_quit_keys() {
        let play = GameState::Play;
        assert_eq!(map_key(key(KeyCode::Char('q')), view(), play), InputAction::Quit);
        assert_eq!(map_key(key(KeyCode::Esc), view(), play), InputAction::Quit);
        let mut ctrl_c = key(KeyCode::Char('c'));
        ctrl_c.modifiers = KeyModifiers::CONTROL;
        assert_eq!(map_key(ctrl_c, view(), play), InputAction::Quit);
        assert_eq!(map_key(key(KeyCode::Char('x')), view(), play), InputAction::Ignore);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut release = key(KeyCode::Char(' '));
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release, view(), GameState::Play), InputAction::Ignore);
        assert!(!dismisses_modal(&Event::Key(release)));
    }

    #[test]
    fn test_click_maps_to_world() {
        let p = projection();
        let play = GameState::Play;
        assert!(matches!(map_event(&click(50, 20), &p, play), InputAction::Tap(_)));
        assert_eq!(map_event(&click(5, 20), &p, play), InputAction::Ignore);
        assert!(dismisses_modal(&click(5, 20)));
    }
}
