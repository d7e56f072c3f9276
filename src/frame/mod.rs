use std::collections::HashMap;

use bevy_app::{CoreStage, Plugin};
use bevy_ecs::prelude::Resource;

use self::{
    dispatch::{dispatch_pointer_input, PointerDispatch},
    events::{FrameCreated, FrameResized, PointerEntered, PointerLeft},
    resize::ResizableBorder,
};
use crate::input::{CursorMoved, MouseButtonInput};

pub mod dispatch;
pub mod events;
pub mod resize;

pub struct SashFramePlugin;
impl Plugin for SashFramePlugin {
    fn build(&self, app: &mut bevy_app::App) {
        app.init_resource::<Frames>()
            .init_resource::<PointerDispatch>()
            .add_event::<MouseButtonInput>()
            .add_event::<CursorMoved>()
            .add_event::<FrameCreated>()
            .add_event::<FrameResized>()
            .add_event::<PointerEntered>()
            .add_event::<PointerLeft>()
            .add_system_to_stage(CoreStage::PreUpdate, dispatch_pointer_input);
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct FrameId(pub usize);

/// Outer geometry of a frame. `height` is the content height; the title bar
/// strip sits above it inside the same outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub min_size: (i32, i32),
    pub title_bar_height: i32,
    layout_epoch: u64,
}

impl FrameBounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            min_size: (0, 0),
            title_bar_height: 0,
            layout_epoch: 0,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && x < self.x + self.width
            && y >= self.y
            && y < self.y + self.height + self.title_bar_height
    }

    /// Clamp to the minimum size and bump the layout epoch so the host
    /// re-flows content once per adaptation.
    pub fn adapt_layout(&mut self) {
        if self.width < self.min_size.0 {
            self.width = self.min_size.0;
        }
        if self.height < self.min_size.1 {
            self.height = self.min_size.1;
        }
        self.layout_epoch += 1;
    }

    pub fn layout_epoch(&self) -> u64 {
        self.layout_epoch
    }
}

#[derive(Clone)]
pub struct FrameDescriptor {
    pub title: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub min_size: (i32, i32),
    pub title_bar_height: i32,
    pub resizable: bool,
}

impl Default for FrameDescriptor {
    fn default() -> Self {
        Self {
            title: String::new(),
            x: 0,
            y: 0,
            width: 320,
            height: 240,
            min_size: (30, 30),
            title_bar_height: 0,
            resizable: true,
        }
    }
}

pub struct Frame {
    pub id: FrameId,
    pub title: String,
    pub bounds: FrameBounds,
    pub resize: ResizableBorder,
}

impl Frame {
    pub fn new(id: FrameId, desc: &FrameDescriptor) -> Self {
        let mut bounds = FrameBounds::new(desc.x, desc.y, desc.width, desc.height);
        bounds.min_size = desc.min_size;
        bounds.title_bar_height = desc.title_bar_height;

        Self {
            id,
            title: desc.title.clone(),
            bounds,
            resize: ResizableBorder::new(desc.resizable),
        }
    }
}

#[derive(Resource)]
pub struct Frames {
    map: HashMap<FrameId, Frame>,
    // back-to-front, last entry is topmost
    order: Vec<FrameId>,
    next_id: usize,
    created: Vec<FrameId>,
}

impl Default for Frames {
    fn default() -> Self {
        Self {
            map: Default::default(),
            order: Vec::new(),
            next_id: 1,
            created: Vec::new(),
        }
    }
}

impl Frames {
    pub fn create(&mut self, desc: &FrameDescriptor) -> FrameId {
        let id = FrameId(self.next_id);
        self.next_id += 1;

        self.map.insert(id, Frame::new(id, desc));
        self.order.push(id);
        self.created.push(id);
        id
    }

    pub(crate) fn drain_created(&mut self) -> Vec<FrameId> {
        std::mem::take(&mut self.created)
    }

    pub fn get(&self, id: FrameId) -> Option<&Frame> {
        self.map.get(&id)
    }

    pub fn get_mut(&mut self, id: FrameId) -> Option<&mut Frame> {
        self.map.get_mut(&id)
    }

    pub fn remove(&mut self, id: FrameId) -> Option<Frame> {
        self.order.retain(|f| *f != id);
        self.map.remove(&id)
    }

    pub fn topmost_at(&self, x: i32, y: i32) -> Option<FrameId> {
        self.order
            .iter()
            .rev()
            .copied()
            .find(|id| self.map.get(id).map_or(false, |f| f.bounds.contains(x, y)))
    }

    pub fn raise(&mut self, id: FrameId) {
        if let Some(pos) = self.order.iter().position(|f| *f == id) {
            let id = self.order.remove(pos);
            self.order.push(id);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.order.iter().filter_map(|id| self.map.get(id))
    }
}
