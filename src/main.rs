use bevy_app::App;
use bevy_log::{Level, LogPlugin};

use sash::{
    frame::{FrameDescriptor, Frames},
    input::{ButtonState, CursorMoved, MouseButton, MouseButtonInput},
    SashComplete,
};

// Headless smoke run: create a frame, grab its left border and pull it
// outward, then print the resulting geometry.
fn main() {
    let mut app = App::new();
    app.add_plugin(LogPlugin {
        level: Level::DEBUG,
        ..Default::default()
    })
    .add_plugins(SashComplete);

    let id = {
        let mut frames = app.world.get_resource_mut::<Frames>().unwrap();
        frames.create(&FrameDescriptor {
            title: "demo".to_string(),
            x: 80,
            y: 60,
            width: 320,
            height: 240,
            title_bar_height: 24,
            ..Default::default()
        })
    };

    app.world.send_event(CursorMoved { position: (82, 150) });
    app.update();

    app.world.send_event(MouseButtonInput {
        button: MouseButton::Left,
        state: ButtonState::Pressed,
    });
    app.update();

    app.world.send_event(CursorMoved { position: (50, 150) });
    app.world.send_event(MouseButtonInput {
        button: MouseButton::Left,
        state: ButtonState::Released,
    });
    app.update();

    let frames = app.world.get_resource::<Frames>().unwrap();
    let frame = frames.get(id).unwrap();
    println!(
        "frame '{}' now at ({}, {}) size {}x{}",
        frame.title, frame.bounds.x, frame.bounds.y, frame.bounds.width, frame.bounds.height
    );
}
