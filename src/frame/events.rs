use super::FrameId;

/// A pointer event in frame-local coordinates. Handlers mark it consumed to
/// stop it from falling through to whatever sits below.
#[derive(Debug)]
pub struct PointerEvent {
    pub x: i32,
    pub y: i32,
    consumed: bool,
}

impl PointerEvent {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            consumed: false,
        }
    }

    pub fn consume(&mut self) {
        self.consumed = true;
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

pub struct FrameCreated {
    pub id: FrameId,
}

pub struct FrameResized {
    pub id: FrameId,
    pub new_size: (i32, i32),
}

pub struct PointerEntered {
    pub id: FrameId,
}

pub struct PointerLeft {
    pub id: FrameId,
}
