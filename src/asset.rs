use anyhow::*;
use bevy_app::Plugin;
use bevy_asset::{AddAsset, AssetLoader, Handle, LoadedAsset};
use bevy_reflect::TypeUuid;
use image::DynamicImage;

pub struct SashAssetPlugin;
impl Plugin for SashAssetPlugin {
    fn build(&self, app: &mut bevy_app::App) {
        app.add_asset::<Image>()
            .add_asset::<CursorAnimation>()
            .add_asset_loader(ImageLoader);
    }
}

#[derive(TypeUuid)]
#[uuid = "7A1E8CF4-3D5B-4F21-9C0D-55E1A0C8B37F"]
pub struct Image(pub DynamicImage);

pub struct ImageLoader;
impl AssetLoader for ImageLoader {
    fn load<'a>(
        &'a self,
        bytes: &'a [u8],
        load_context: &'a mut bevy_asset::LoadContext,
    ) -> bevy_asset::BoxedFuture<'a, Result<(), Error>> {
        Box::pin(async {
            let img = image::load_from_memory(bytes)?;
            load_context.set_default_asset(LoadedAsset::new(Image(img)));

            Ok(())
        })
    }

    fn extensions(&self) -> &[&str] {
        &["png", "jpg", "jpeg"]
    }
}

/// Frame sequence for an animated cursor. Frames all share one duration.
#[derive(TypeUuid)]
#[uuid = "0C3F6B7D-92E4-4A8C-B1F5-2D94700A6E51"]
pub struct CursorAnimation {
    pub frames: Vec<Handle<Image>>,
    pub frame_duration_ms: u32,
}

impl CursorAnimation {
    pub fn frame_at(&self, elapsed_ms: u32) -> Option<&Handle<Image>> {
        if self.frames.is_empty() {
            return None;
        }
        if self.frame_duration_ms == 0 {
            return self.frames.first();
        }
        let ind = (elapsed_ms / self.frame_duration_ms) as usize % self.frames.len();
        self.frames.get(ind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_frame_lookup_wraps() {
        let anim = CursorAnimation {
            frames: vec![Handle::default(), Handle::default(), Handle::default()],
            frame_duration_ms: 100,
        };

        assert_eq!(anim.frame_at(0), Some(&anim.frames[0]));
        assert_eq!(anim.frame_at(150), Some(&anim.frames[1]));
        assert_eq!(anim.frame_at(320), Some(&anim.frames[0]));
    }

    #[test]
    fn animation_with_zero_duration_holds_first_frame() {
        let anim = CursorAnimation {
            frames: vec![Handle::default(), Handle::default()],
            frame_duration_ms: 0,
        };

        assert_eq!(anim.frame_at(5000), Some(&anim.frames[0]));
    }

    #[test]
    fn empty_animation_has_no_frame() {
        let anim = CursorAnimation {
            frames: Vec::new(),
            frame_duration_ms: 100,
        };

        assert!(anim.frame_at(0).is_none());
    }
}
