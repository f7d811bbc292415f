//! Move and resize for a window without OS decorations.
//!
//! The app feeds pointer press/move/release into [`WindowInteraction`] and
//! applies the [`WindowEffect`]s it returns. Positions come in two flavours:
//! `local` is relative to the window's client area and decides edge hits,
//! `screen` is absolute and drives the gesture deltas (the window moves
//! under the pointer while dragging, so local deltas would be useless).

use crate::config::MoveStrategy;
use egui::{Pos2, Rect, Vec2};

/// Window rectangle in screen points.
pub type WindowGeometry = Rect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionState {
    Idle,
    Dragging {
        anchor: Pos2,
        frame_at_press: WindowGeometry,
    },
    Resizing {
        anchor: Pos2,
        geometry_at_press: WindowGeometry,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorShape {
    Arrow,
    ResizeDiagonal,
    ResizeHorizontal,
    ResizeVertical,
}

impl CursorShape {
    pub fn icon(self) -> egui::CursorIcon {
        match self {
            CursorShape::Arrow => egui::CursorIcon::Default,
            CursorShape::ResizeDiagonal => egui::CursorIcon::ResizeNwSe,
            CursorShape::ResizeHorizontal => egui::CursorIcon::ResizeHorizontal,
            CursorShape::ResizeVertical => egui::CursorIcon::ResizeVertical,
        }
    }
}

/// What the window should do in response to a pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEffect {
    /// Put the outer frame's top-left corner here.
    MoveTo(Pos2),
    /// Set the client area to this size.
    ResizeTo(Vec2),
    /// Let the compositor run the move gesture.
    BeginSystemMove,
    /// Let the compositor run a resize from the bottom-right corner.
    BeginSystemResize,
}

/// Where the pointer sits relative to the resize band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EdgeHit {
    right: bool,
    bottom: bool,
}

impl EdgeHit {
    fn cursor(self) -> CursorShape {
        match (self.right, self.bottom) {
            (true, true) => CursorShape::ResizeDiagonal,
            (true, false) => CursorShape::ResizeHorizontal,
            (false, true) => CursorShape::ResizeVertical,
            (false, false) => CursorShape::Arrow,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WindowInteraction {
    state: InteractionState,
    cursor: CursorShape,
    edge_margin: f32,
    min_size: Vec2,
    strategy: MoveStrategy,
}

impl WindowInteraction {
    /// `strategy` should already be resolved; `Auto` behaves as `Manual`.
    pub fn new(edge_margin: f32, min_size: Vec2, strategy: MoveStrategy) -> Self {
        Self {
            state: InteractionState::Idle,
            cursor: CursorShape::Arrow,
            edge_margin,
            min_size,
            strategy,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != InteractionState::Idle
    }

    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    pub fn min_size(&self) -> Vec2 {
        self.min_size
    }

    fn edge_hit(&self, local: Pos2, window_size: Vec2) -> EdgeHit {
        EdgeHit {
            right: local.x >= window_size.x - self.edge_margin,
            bottom: local.y >= window_size.y - self.edge_margin,
        }
    }

    fn compositor_driven(&self) -> bool {
        self.strategy == MoveStrategy::Compositor
    }

    /// Start a gesture. Non-primary buttons are ignored and leave the state
    /// alone. Returns an effect only for the compositor strategy, which hands
    /// the whole gesture over at press time.
    pub fn press(
        &mut self,
        button: egui::PointerButton,
        local: Pos2,
        screen: Pos2,
        frame: WindowGeometry,
        client: WindowGeometry,
    ) -> Option<WindowEffect> {
        if button != egui::PointerButton::Primary {
            return None;
        }

        let hit = self.edge_hit(local, client.size());
        if hit.right && hit.bottom {
            self.state = InteractionState::Resizing {
                anchor: screen,
                geometry_at_press: client,
            };
            self.cursor = CursorShape::ResizeDiagonal;
            log::trace!("resize gesture from {:?}", screen);
            self.compositor_driven().then_some(WindowEffect::BeginSystemResize)
        } else {
            self.state = InteractionState::Dragging {
                anchor: screen,
                frame_at_press: frame,
            };
            log::trace!("drag gesture from {:?}", screen);
            self.compositor_driven().then_some(WindowEffect::BeginSystemMove)
        }
    }

    /// Continue a gesture, or update hover feedback when idle.
    pub fn pointer_moved(&mut self, local: Pos2, screen: Pos2, window_size: Vec2) -> Option<WindowEffect> {
        match self.state {
            InteractionState::Resizing { anchor, geometry_at_press } => {
                if self.compositor_driven() {
                    return None;
                }
                let delta = screen - anchor;
                let size = (geometry_at_press.size() + delta).max(self.min_size);
                Some(WindowEffect::ResizeTo(size))
            }
            InteractionState::Dragging { anchor, frame_at_press } => {
                if self.compositor_driven() {
                    return None;
                }
                let delta = screen - anchor;
                Some(WindowEffect::MoveTo(frame_at_press.min + delta))
            }
            InteractionState::Idle => {
                self.cursor = self.edge_hit(local, window_size).cursor();
                None
            }
        }
    }

    /// End whatever gesture is running.
    pub fn release(&mut self) {
        self.state = InteractionState::Idle;
        self.cursor = CursorShape::Arrow;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2, PointerButton};

    const MARGIN: f32 = 8.0;

    fn controller() -> WindowInteraction {
        WindowInteraction::new(MARGIN, vec2(300.0, 200.0), MoveStrategy::Manual)
    }

    /// A 900x550 window whose client area sits at (100, 50) and whose frame
    /// is the same rectangle (no decorations).
    fn window() -> (Rect, Rect) {
        let r = Rect::from_min_size(pos2(100.0, 50.0), vec2(900.0, 550.0));
        (r, r)
    }

    fn press_at(c: &mut WindowInteraction, local: Pos2) -> Option<WindowEffect> {
        let (frame, client) = window();
        c.press(PointerButton::Primary, local, client.min + local.to_vec2(), frame, client)
    }

    #[test]
    fn press_in_corner_starts_resize() {
        let mut c = controller();
        press_at(&mut c, pos2(895.0, 545.0));
        assert!(matches!(c.state(), InteractionState::Resizing { .. }));
        assert_eq!(c.cursor(), CursorShape::ResizeDiagonal);
    }

    #[test]
    fn press_on_one_edge_only_starts_drag() {
        let mut c = controller();
        press_at(&mut c, pos2(895.0, 100.0));
        assert!(matches!(c.state(), InteractionState::Dragging { .. }));

        let mut c = controller();
        press_at(&mut c, pos2(20.0, 545.0));
        assert!(matches!(c.state(), InteractionState::Dragging { .. }));
    }

    #[test]
    fn secondary_press_is_ignored() {
        let mut c = controller();
        let (frame, client) = window();
        let effect = c.press(PointerButton::Secondary, pos2(10.0, 10.0), pos2(110.0, 60.0), frame, client);
        assert_eq!(effect, None);
        assert_eq!(c.state(), InteractionState::Idle);
    }

    #[test]
    fn drag_translates_frame_by_pointer_delta() {
        let mut c = controller();
        press_at(&mut c, pos2(40.0, 10.0)); // screen (140, 60)
        let effect = c.pointer_moved(pos2(0.0, 0.0), pos2(90.0, 260.0), vec2(900.0, 550.0));
        assert_eq!(effect, Some(WindowEffect::MoveTo(pos2(50.0, 250.0))));
    }

    #[test]
    fn drag_has_no_bounds() {
        let mut c = controller();
        press_at(&mut c, pos2(40.0, 10.0));
        let effect = c.pointer_moved(pos2(0.0, 0.0), pos2(-2000.0, -900.0), vec2(900.0, 550.0));
        assert_eq!(effect, Some(WindowEffect::MoveTo(pos2(-2040.0, -910.0))));
    }

    #[test]
    fn resize_grows_from_bottom_right() {
        let mut c = controller();
        press_at(&mut c, pos2(896.0, 546.0)); // screen (996, 596)
        let effect = c.pointer_moved(pos2(0.0, 0.0), pos2(1046.0, 586.0), vec2(900.0, 550.0));
        assert_eq!(effect, Some(WindowEffect::ResizeTo(vec2(950.0, 540.0))));
    }

    #[test]
    fn resize_never_goes_below_minimum() {
        for delta in [-100.0, -600.0, -5000.0, -1.0e9] {
            let mut c = controller();
            press_at(&mut c, pos2(896.0, 546.0));
            let screen = pos2(996.0 + delta, 596.0 + delta);
            match c.pointer_moved(pos2(0.0, 0.0), screen, vec2(900.0, 550.0)) {
                Some(WindowEffect::ResizeTo(size)) => {
                    assert!(size.x >= 300.0, "width {} for delta {}", size.x, delta);
                    assert!(size.y >= 200.0, "height {} for delta {}", size.y, delta);
                }
                other => panic!("expected resize, got {:?}", other),
            }
        }
    }

    #[test]
    fn release_always_returns_to_idle() {
        let mut c = controller();
        c.release();
        assert_eq!(c.state(), InteractionState::Idle);

        press_at(&mut c, pos2(40.0, 10.0));
        for i in 0..5 {
            let step = i as f32 * 13.0;
            c.pointer_moved(pos2(0.0, 0.0), pos2(step, -step), vec2(900.0, 550.0));
        }
        c.release();
        assert_eq!(c.state(), InteractionState::Idle);
        assert_eq!(c.cursor(), CursorShape::Arrow);

        press_at(&mut c, pos2(899.0, 549.0));
        c.pointer_moved(pos2(0.0, 0.0), pos2(0.0, 0.0), vec2(900.0, 550.0));
        c.release();
        assert_eq!(c.state(), InteractionState::Idle);
        assert_eq!(c.cursor(), CursorShape::Arrow);
    }

    #[test]
    fn idle_hover_sets_cursor_feedback() {
        let mut c = controller();
        let size = vec2(900.0, 550.0);
        let cases = [
            (pos2(895.0, 545.0), CursorShape::ResizeDiagonal),
            (pos2(895.0, 100.0), CursorShape::ResizeHorizontal),
            (pos2(100.0, 545.0), CursorShape::ResizeVertical),
            (pos2(100.0, 100.0), CursorShape::Arrow),
        ];
        for (local, expected) in cases {
            assert_eq!(c.pointer_moved(local, local, size), None);
            assert_eq!(c.cursor(), expected, "at {:?}", local);
            assert_eq!(c.state(), InteractionState::Idle);
        }
    }

    #[test]
    fn compositor_strategy_hands_over_at_press() {
        let mut c = WindowInteraction::new(MARGIN, vec2(300.0, 200.0), MoveStrategy::Compositor);
        assert_eq!(press_at(&mut c, pos2(40.0, 10.0)), Some(WindowEffect::BeginSystemMove));
        assert_eq!(c.pointer_moved(pos2(0.0, 0.0), pos2(500.0, 500.0), vec2(900.0, 550.0)), None);
        c.release();

        assert_eq!(press_at(&mut c, pos2(899.0, 549.0)), Some(WindowEffect::BeginSystemResize));
        assert!(matches!(c.state(), InteractionState::Resizing { .. }));
    }
}
