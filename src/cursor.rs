use bevy_app::{CoreStage, Plugin};
use bevy_asset::Handle;
use bevy_ecs::{
    prelude::Resource,
    system::{NonSend, ResMut},
};
use bevy_log::trace;
use winit::window::CursorIcon;

use crate::asset::{CursorAnimation, Image};

// All four diagonal grabs share the one glyph.
pub const RESIZE_ALL: CursorIcon = CursorIcon::Move;
pub const RESIZE_WE: CursorIcon = CursorIcon::EwResize;
pub const RESIZE_NS: CursorIcon = CursorIcon::NsResize;

#[derive(Debug, Clone, PartialEq)]
pub enum CursorKind {
    Native(CursorIcon),
    Image(Handle<Image>),
    Animation(Handle<CursorAnimation>),
}

impl Default for CursorKind {
    fn default() -> Self {
        CursorKind::Native(CursorIcon::Default)
    }
}

/// The engine's single global cursor. Native kinds are pushed to winit in
/// PostUpdate; image and animation kinds are drawn by the host renderer.
#[derive(Default, Resource)]
pub struct Cursor {
    kind: CursorKind,
    pending_native: Option<CursorIcon>,
}

impl Cursor {
    pub fn kind(&self) -> &CursorKind {
        &self.kind
    }

    pub fn set(&mut self, kind: CursorKind) {
        if let CursorKind::Native(icon) = kind {
            self.pending_native = Some(icon);
        }
        self.kind = kind;
    }

    pub fn take_pending_native(&mut self) -> Option<CursorIcon> {
        self.pending_native.take()
    }
}

pub struct SashCursorPlugin;
impl Plugin for SashCursorPlugin {
    fn build(&self, app: &mut bevy_app::App) {
        app.init_resource::<Cursor>()
            .add_system_to_stage(CoreStage::PostUpdate, apply_native_cursor);
    }
}

pub fn apply_native_cursor(
    mut cursor: ResMut<Cursor>,
    winit_window: Option<NonSend<winit::window::Window>>,
) {
    if let Some(icon) = cursor.take_pending_native() {
        trace!("native cursor -> {:?}", icon);
        if let Some(window) = winit_window {
            window.set_cursor_icon(icon);
        }
    }
}
