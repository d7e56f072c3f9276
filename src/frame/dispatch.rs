use bevy_ecs::{
    event::{EventReader, EventWriter},
    prelude::Resource,
    system::ResMut,
};
use bevy_log::debug;

use super::{
    events::{FrameCreated, FrameResized, PointerEntered, PointerEvent, PointerLeft},
    Frame, FrameId, Frames,
};
use crate::{
    cursor::Cursor,
    input::{ButtonState, CursorMoved, MouseButton, MouseButtonInput},
};

enum UiEvent {
    Resized(FrameId, (i32, i32)),
    Entered(FrameId),
    Left(FrameId),
}

/// Routes engine pointer input to frames: tracks the hovered and captured
/// frame, converts to frame-local coordinates and invokes the border
/// handlers on the topmost frame under the pointer.
#[derive(Default, Resource)]
pub struct PointerDispatch {
    hovered: Option<FrameId>,
    captured: Option<FrameId>,
    position: (i32, i32),
    pending: Vec<UiEvent>,
}

impl PointerDispatch {
    pub fn on_cursor_moved(
        &mut self,
        position: (i32, i32),
        frames: &mut Frames,
        cursor: &mut Cursor,
    ) {
        self.position = position;

        // While a button capture is live, motion is the capturing frame's
        // drag; enter/exit of other frames is not re-evaluated.
        if let Some(id) = self.captured {
            self.deliver_drag(id, frames);
            return;
        }

        let hit = frames.topmost_at(position.0, position.1);
        if hit != self.hovered {
            if let Some(old) = self.hovered {
                if let Some(frame) = frames.get_mut(old) {
                    frame.resize.on_pointer_exit(cursor);
                    self.pending.push(UiEvent::Left(old));
                }
            }
            if let Some(new) = hit {
                if let Some(frame) = frames.get_mut(new) {
                    frame.resize.on_pointer_enter(cursor);
                    self.pending.push(UiEvent::Entered(new));
                }
            }
            self.hovered = hit;
        }

        if let Some(id) = self.hovered {
            if let Some(frame) = frames.get_mut(id) {
                let mut event =
                    PointerEvent::new(position.0 - frame.bounds.x, position.1 - frame.bounds.y);
                let Frame { bounds, resize, .. } = frame;
                resize.on_pointer_move(bounds, cursor, &mut event);
            }
        }
    }

    pub fn on_button_pressed(&mut self, frames: &mut Frames) {
        let id = match frames.topmost_at(self.position.0, self.position.1) {
            Some(id) => id,
            None => return,
        };

        frames.raise(id);
        self.captured = Some(id);

        if let Some(frame) = frames.get_mut(id) {
            let mut event = PointerEvent::new(
                self.position.0 - frame.bounds.x,
                self.position.1 - frame.bounds.y,
            );
            let Frame { bounds, resize, .. } = frame;
            resize.on_pointer_press(bounds, &mut event);
            if resize.is_resizing() {
                debug!("frame {:?} grabbed on {:?}", id, resize.grabbed_edges());
            }
        }
    }

    pub fn on_button_released(&mut self, frames: &mut Frames, cursor: &mut Cursor) {
        let id = match self.captured.take() {
            Some(id) => id,
            None => return,
        };

        if let Some(frame) = frames.get_mut(id) {
            if !frame.resize.is_resizing() {
                return;
            }
            let mut event = PointerEvent::new(
                self.position.0 - frame.bounds.x,
                self.position.1 - frame.bounds.y,
            );
            let Frame { bounds, resize, .. } = frame;
            let size_before = (bounds.width, bounds.height);
            resize.on_pointer_release(bounds, cursor, &mut event);

            let size = (bounds.width, bounds.height);
            if size != size_before {
                self.pending.push(UiEvent::Resized(id, size));
            }
            debug!("frame {:?} released at {}x{}", id, size.0, size.1);
        }
    }

    fn deliver_drag(&mut self, id: FrameId, frames: &mut Frames) {
        if let Some(frame) = frames.get_mut(id) {
            if !frame.resize.is_resizing() {
                return;
            }
            let event = PointerEvent::new(
                self.position.0 - frame.bounds.x,
                self.position.1 - frame.bounds.y,
            );
            let Frame { bounds, resize, .. } = frame;
            let size_before = (bounds.width, bounds.height);
            resize.on_pointer_drag(bounds, &event);

            let size = (bounds.width, bounds.height);
            if size != size_before {
                self.pending.push(UiEvent::Resized(id, size));
            }
        }
    }
}

pub fn dispatch_pointer_input(
    mut dispatch: ResMut<PointerDispatch>,
    mut frames: ResMut<Frames>,
    mut cursor: ResMut<Cursor>,
    mut cursor_moved: EventReader<CursorMoved>,
    mut mouse_button: EventReader<MouseButtonInput>,
    mut frame_created: EventWriter<FrameCreated>,
    mut frame_resized: EventWriter<FrameResized>,
    mut pointer_entered: EventWriter<PointerEntered>,
    mut pointer_left: EventWriter<PointerLeft>,
) {
    for id in frames.drain_created() {
        frame_created.send(FrameCreated { id });
    }

    for ev in cursor_moved.iter() {
        dispatch.on_cursor_moved(ev.position, &mut frames, &mut cursor);
    }

    for ev in mouse_button.iter() {
        if ev.button != MouseButton::Left {
            continue;
        }
        match ev.state {
            ButtonState::Pressed => dispatch.on_button_pressed(&mut frames),
            ButtonState::Released => dispatch.on_button_released(&mut frames, &mut cursor),
        }
    }

    for ev in dispatch.pending.drain(..) {
        match ev {
            UiEvent::Resized(id, new_size) => frame_resized.send(FrameResized { id, new_size }),
            UiEvent::Entered(id) => pointer_entered.send(PointerEntered { id }),
            UiEvent::Left(id) => pointer_left.send(PointerLeft { id }),
        }
    }
}
