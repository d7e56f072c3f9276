use bevy_app::{PluginGroup, PluginGroupBuilder};

use crate::{asset::SashAssetPlugin, cursor::SashCursorPlugin, frame::SashFramePlugin};

pub mod asset;
pub mod cursor;
pub mod frame;
pub mod input;

/// Everything the frame layer needs on top of a host app: cursor payload
/// assets, the global cursor, and the frame store with pointer dispatch.
pub struct SashComplete;

impl PluginGroup for SashComplete {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(SashAssetPlugin)
            .add(SashCursorPlugin)
            .add(SashFramePlugin)
    }
}
