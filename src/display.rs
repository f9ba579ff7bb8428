use crate::game_logic::{CANVAS_H, CANVAS_W};
use crate::render::FrameSurface;
use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

/// Shows the software-rendered frame on screen, one texel per track unit.
pub struct DisplayPlugin;

impl Plugin for DisplayPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(FrameSurface::new(CANVAS_W, CANVAS_H))
            .add_systems(Startup, setup_frame_image)
            .add_systems(PostUpdate, upload_frame);
    }
}

#[derive(Resource)]
pub struct FrameImage(pub Handle<Image>);

fn setup_frame_image(mut commands: Commands, mut images: ResMut<Assets<Image>>, surface: Res<FrameSurface>) {
    if !surface.is_attached() {
        warn!("Frame surface has no pixels, every frame will be skipped");
    }
    let image = Image::new_fill(
        Extent3d {
            width: CANVAS_W,
            height: CANVAS_H,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[0, 0, 0, 255],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    let handle = images.add(image);

    commands.spawn(Camera2d);
    commands.spawn((
        Sprite::from_image(handle.clone()),
        Transform::from_xyz(0., 0., 0.),
    ));
    commands.insert_resource(FrameImage(handle));
}

/// Copy the latest frame into the GPU image, only when something new was drawn.
fn upload_frame(
    mut surface: ResMut<FrameSurface>,
    frame: Option<Res<FrameImage>>,
    mut images: ResMut<Assets<Image>>,
) {
    if !surface.take_dirty() {
        return;
    }
    let (Some(frame), Some(pixels)) = (frame, surface.data()) else {
        return;
    };
    if let Some(image) = images.get_mut(&frame.0) {
        image.data = Some(pixels.to_vec());
    }
}
