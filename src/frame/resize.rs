use bitflags::bitflags;

use super::{events::PointerEvent, FrameBounds};
use crate::cursor::{Cursor, CursorKind, RESIZE_ALL, RESIZE_NS, RESIZE_WE};

/// Hit width of each border, in frame-local units.
pub const BORDER_MARGIN: i32 = 5;

/// Floor applied on grab so the frame can shrink below its previous minimum.
pub const GRAB_MIN_SIZE: (i32, i32) = (30, 30);

bitflags! {
    pub struct Edges: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const TOP = 1 << 2;
        const BOTTOM = 1 << 3;
    }
}

impl Edges {
    pub fn horizontal(&self) -> bool {
        self.intersects(Edges::LEFT | Edges::RIGHT)
    }

    pub fn vertical(&self) -> bool {
        self.intersects(Edges::TOP | Edges::BOTTOM)
    }

    fn is_corner(&self) -> bool {
        self.horizontal() && self.vertical()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResizeState {
    Idle,
    Resizing { edges: Edges },
}

// Last pointer-move seen by this border. A repeated coordinate whose first
// delivery was consumed is dropped without re-running the hit test.
#[derive(Debug, Clone, Copy)]
struct MoveRecord {
    x: i32,
    y: i32,
    consumed: bool,
}

pub struct ResizableBorder {
    pub enabled: bool,
    pub resize_edges: Edges,
    state: ResizeState,
    saved_cursor: CursorKind,
    last_move: Option<MoveRecord>,
}

impl ResizableBorder {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            resize_edges: Edges::all(),
            state: ResizeState::Idle,
            saved_cursor: CursorKind::default(),
            last_move: None,
        }
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.state, ResizeState::Resizing { .. })
    }

    pub fn grabbed_edges(&self) -> Option<Edges> {
        match self.state {
            ResizeState::Resizing { edges } => Some(edges),
            ResizeState::Idle => None,
        }
    }

    fn hit_test(&self, bounds: &FrameBounds, x: i32, y: i32) -> Edges {
        let mut hit = Edges::empty();
        if x < BORDER_MARGIN {
            hit |= Edges::LEFT;
        }
        if x > bounds.width - BORDER_MARGIN {
            hit |= Edges::RIGHT;
        }
        if y < BORDER_MARGIN {
            hit |= Edges::TOP;
        }
        if y - bounds.title_bar_height > bounds.height - BORDER_MARGIN {
            hit |= Edges::BOTTOM;
        }
        hit & self.resize_edges
    }

    pub fn on_pointer_enter(&mut self, cursor: &Cursor) {
        if self.enabled && self.state == ResizeState::Idle {
            self.saved_cursor = cursor.kind().clone();
        }
    }

    pub fn on_pointer_exit(&mut self, cursor: &mut Cursor) {
        if self.enabled && self.state == ResizeState::Idle {
            cursor.set(self.saved_cursor.clone());
        }
    }

    pub fn on_pointer_move(
        &mut self,
        bounds: &FrameBounds,
        cursor: &mut Cursor,
        event: &mut PointerEvent,
    ) {
        if !self.enabled {
            return;
        }

        match self.last_move {
            Some(rec) if rec.x == event.x && rec.y == event.y => {
                if rec.consumed {
                    return;
                }
            }
            _ => {
                self.last_move = Some(MoveRecord {
                    x: event.x,
                    y: event.y,
                    consumed: false,
                });
            }
        }

        let hit = self.hit_test(bounds, event.x, event.y);
        let glyph = if hit.is_corner() {
            RESIZE_ALL
        } else if hit.horizontal() {
            RESIZE_WE
        } else if hit.vertical() {
            RESIZE_NS
        } else {
            cursor.set(self.saved_cursor.clone());
            return;
        };

        cursor.set(CursorKind::Native(glyph));
        event.consume();
        if let Some(rec) = self.last_move.as_mut() {
            rec.consumed = true;
        }
    }

    pub fn on_pointer_press(&mut self, bounds: &mut FrameBounds, event: &mut PointerEvent) {
        if !self.enabled {
            return;
        }

        let edges = self.hit_test(bounds, event.x, event.y);
        if edges.is_empty() {
            self.state = ResizeState::Idle;
            return;
        }

        self.state = ResizeState::Resizing { edges };
        bounds.min_size = GRAB_MIN_SIZE;
        event.consume();
    }

    pub fn on_pointer_drag(&mut self, bounds: &mut FrameBounds, event: &PointerEvent) {
        if !self.enabled {
            return;
        }
        let edges = match self.state {
            ResizeState::Resizing { edges } => edges,
            ResizeState::Idle => return,
        };

        let (diff_x, diff_y) = (event.x, event.y);

        if edges.contains(Edges::LEFT) {
            bounds.x += diff_x;
            bounds.width -= diff_x;
        } else if edges.contains(Edges::RIGHT) {
            // The pointer rides the moving edge, so the frame-relative
            // coordinate is the new width.
            bounds.width = diff_x;
        }

        if edges.contains(Edges::TOP) {
            bounds.y += diff_y;
            bounds.height -= diff_y;
        } else if edges.contains(Edges::BOTTOM) {
            bounds.height = diff_y - bounds.title_bar_height;
        }
    }

    pub fn on_pointer_release(
        &mut self,
        bounds: &mut FrameBounds,
        cursor: &mut Cursor,
        event: &mut PointerEvent,
    ) {
        match self.state {
            ResizeState::Resizing { .. } => {}
            ResizeState::Idle => return,
        }

        bounds.min_size = (bounds.width, bounds.height);
        bounds.adapt_layout();
        event.consume();
        self.state = ResizeState::Idle;

        // The pointer can end up outside the frame when the grabbed edge was
        // pushed past the opposite one; restore the cursor right away instead
        // of waiting for an exit that will never be delivered.
        if event.x <= 0
            || event.x >= bounds.width
            || event.y <= 0
            || event.y >= bounds.height + bounds.title_bar_height
        {
            self.on_pointer_exit(cursor);
        }
    }
}

#[cfg(test)]
mod tests {
    use winit::window::CursorIcon;

    use super::*;

    fn bounds(width: i32, height: i32, title_bar_height: i32) -> FrameBounds {
        let mut bounds = FrameBounds::new(40, 40, width, height);
        bounds.title_bar_height = title_bar_height;
        bounds
    }

    fn hovering(cursor: &mut Cursor, icon: CursorIcon) -> ResizableBorder {
        cursor.set(CursorKind::Native(icon));
        let mut border = ResizableBorder::new(true);
        border.on_pointer_enter(cursor);
        border
    }

    #[test]
    fn corners_select_the_diagonal_glyph() {
        let bounds = bounds(100, 80, 0);
        let mut cursor = Cursor::default();
        let mut border = ResizableBorder::new(true);

        for (x, y) in [(2, 2), (97, 2), (2, 78), (97, 78)] {
            let mut event = PointerEvent::new(x, y);
            border.on_pointer_move(&bounds, &mut cursor, &mut event);

            assert_eq!(cursor.kind(), &CursorKind::Native(RESIZE_ALL));
            assert!(event.is_consumed());
        }
    }

    #[test]
    fn lone_edges_select_axis_glyphs() {
        let bounds = bounds(100, 80, 16);
        let mut cursor = Cursor::default();
        let mut border = ResizableBorder::new(true);

        let mut event = PointerEvent::new(2, 40);
        border.on_pointer_move(&bounds, &mut cursor, &mut event);
        assert_eq!(cursor.kind(), &CursorKind::Native(RESIZE_WE));

        let mut event = PointerEvent::new(50, 2);
        border.on_pointer_move(&bounds, &mut cursor, &mut event);
        assert_eq!(cursor.kind(), &CursorKind::Native(RESIZE_NS));

        // bottom margin sits below content height plus the title bar
        let mut event = PointerEvent::new(50, 93);
        border.on_pointer_move(&bounds, &mut cursor, &mut event);
        assert_eq!(cursor.kind(), &CursorKind::Native(RESIZE_NS));
    }

    #[test]
    fn interior_moves_restore_the_snapshot_unconsumed() {
        let bounds = bounds(100, 80, 0);
        let mut cursor = Cursor::default();
        let mut border = hovering(&mut cursor, CursorIcon::Hand);

        cursor.set(CursorKind::Native(RESIZE_WE));
        let mut event = PointerEvent::new(50, 40);
        border.on_pointer_move(&bounds, &mut cursor, &mut event);

        assert_eq!(cursor.kind(), &CursorKind::Native(CursorIcon::Hand));
        assert!(!event.is_consumed());
    }

    #[test]
    fn disabled_edges_do_not_hit() {
        let bounds = bounds(100, 80, 0);
        let mut cursor = Cursor::default();
        let mut border = hovering(&mut cursor, CursorIcon::Hand);
        border.resize_edges.remove(Edges::LEFT);

        let mut event = PointerEvent::new(2, 40);
        border.on_pointer_move(&bounds, &mut cursor, &mut event);

        assert_eq!(cursor.kind(), &CursorKind::Native(CursorIcon::Hand));
        assert!(!event.is_consumed());
    }

    #[test]
    fn repeated_consumed_coordinate_is_dropped() {
        let bounds = bounds(100, 80, 0);
        let mut cursor = Cursor::default();
        let mut border = ResizableBorder::new(true);

        let mut event = PointerEvent::new(2, 40);
        border.on_pointer_move(&bounds, &mut cursor, &mut event);
        assert!(event.is_consumed());

        // a second delivery at the same coordinate must not act
        cursor.set(CursorKind::Native(CursorIcon::Hand));
        let mut event = PointerEvent::new(2, 40);
        border.on_pointer_move(&bounds, &mut cursor, &mut event);
        assert_eq!(cursor.kind(), &CursorKind::Native(CursorIcon::Hand));
        assert!(!event.is_consumed());

        // a fresh coordinate overwrites the record and acts again
        let mut event = PointerEvent::new(3, 40);
        border.on_pointer_move(&bounds, &mut cursor, &mut event);
        assert_eq!(cursor.kind(), &CursorKind::Native(RESIZE_WE));
    }

    #[test]
    fn press_on_a_border_starts_a_session() {
        let mut bounds = bounds(100, 80, 0);
        bounds.min_size = (60, 60);
        let mut border = ResizableBorder::new(true);

        let mut event = PointerEvent::new(2, 2);
        border.on_pointer_press(&mut bounds, &mut event);

        assert!(border.is_resizing());
        assert_eq!(border.grabbed_edges(), Some(Edges::LEFT | Edges::TOP));
        assert_eq!(bounds.min_size, GRAB_MIN_SIZE);
        assert!(event.is_consumed());
    }

    #[test]
    fn interior_press_stays_idle() {
        let mut bounds = bounds(100, 80, 0);
        bounds.min_size = (60, 60);
        let mut border = ResizableBorder::new(true);

        let mut event = PointerEvent::new(50, 40);
        border.on_pointer_press(&mut bounds, &mut event);

        assert!(!border.is_resizing());
        assert_eq!(bounds.min_size, (60, 60));
        assert!(!event.is_consumed());
    }

    #[test]
    fn left_drag_moves_the_origin_and_shrinks_width() {
        let mut bounds = bounds(100, 80, 0);
        let mut border = ResizableBorder::new(true);

        let mut event = PointerEvent::new(2, 40);
        border.on_pointer_press(&mut bounds, &mut event);
        border.on_pointer_drag(&mut bounds, &PointerEvent::new(-10, 40));

        assert_eq!((bounds.x, bounds.width), (30, 110));
        assert_eq!((bounds.y, bounds.height), (40, 80));
    }

    #[test]
    fn right_drag_assigns_the_raw_coordinate() {
        let mut bounds = bounds(100, 80, 0);
        let mut border = ResizableBorder::new(true);

        let mut event = PointerEvent::new(97, 40);
        border.on_pointer_press(&mut bounds, &mut event);
        border.on_pointer_drag(&mut bounds, &PointerEvent::new(120, 40));

        assert_eq!((bounds.x, bounds.width), (40, 120));
    }

    #[test]
    fn bottom_drag_subtracts_the_title_bar() {
        let mut bounds = bounds(100, 80, 16);
        let mut border = ResizableBorder::new(true);

        let mut event = PointerEvent::new(50, 93);
        border.on_pointer_press(&mut bounds, &mut event);
        border.on_pointer_drag(&mut bounds, &PointerEvent::new(50, 100));

        assert_eq!(bounds.height, 84);
    }

    #[test]
    fn release_locks_min_size_and_adapts_once() {
        let mut bounds = bounds(100, 80, 0);
        let mut cursor = Cursor::default();
        let mut border = ResizableBorder::new(true);

        let mut event = PointerEvent::new(2, 40);
        border.on_pointer_press(&mut bounds, &mut event);
        border.on_pointer_drag(&mut bounds, &PointerEvent::new(-10, 40));

        let mut event = PointerEvent::new(3, 40);
        border.on_pointer_release(&mut bounds, &mut cursor, &mut event);

        assert!(!border.is_resizing());
        assert_eq!(bounds.min_size, (110, 80));
        assert_eq!(bounds.layout_epoch(), 1);
        assert!(event.is_consumed());
    }

    #[test]
    fn release_outside_the_frame_restores_the_cursor() {
        let mut bounds = bounds(100, 80, 0);
        let mut cursor = Cursor::default();
        let mut border = hovering(&mut cursor, CursorIcon::Hand);

        let mut event = PointerEvent::new(2, 40);
        border.on_pointer_press(&mut bounds, &mut event);
        cursor.set(CursorKind::Native(RESIZE_WE));

        let mut event = PointerEvent::new(-3, 40);
        border.on_pointer_release(&mut bounds, &mut cursor, &mut event);

        assert_eq!(cursor.kind(), &CursorKind::Native(CursorIcon::Hand));
    }

    #[test]
    fn hover_feedback_is_inert_during_a_session() {
        let mut bounds = bounds(100, 80, 0);
        let mut cursor = Cursor::default();
        let mut border = hovering(&mut cursor, CursorIcon::Hand);

        let mut event = PointerEvent::new(2, 40);
        border.on_pointer_press(&mut bounds, &mut event);

        cursor.set(CursorKind::Native(RESIZE_WE));
        border.on_pointer_exit(&mut cursor);
        assert_eq!(cursor.kind(), &CursorKind::Native(RESIZE_WE));

        // a snapshot taken mid-session must not clobber the idle one
        border.on_pointer_enter(&cursor);
        let mut event = PointerEvent::new(50, 40);
        border.on_pointer_release(&mut bounds, &mut cursor, &mut event);
        border.on_pointer_exit(&mut cursor);
        assert_eq!(cursor.kind(), &CursorKind::Native(CursorIcon::Hand));
    }

    #[test]
    fn enter_exit_round_trips_the_cursor() {
        let mut cursor = Cursor::default();
        cursor.set(CursorKind::Image(bevy_asset::Handle::default()));
        let before = cursor.kind().clone();

        let mut border = ResizableBorder::new(true);
        border.on_pointer_enter(&cursor);
        cursor.set(CursorKind::Native(RESIZE_NS));
        border.on_pointer_exit(&mut cursor);

        assert_eq!(cursor.kind(), &before);
    }
}
