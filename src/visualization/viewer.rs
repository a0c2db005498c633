use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::window::{PrimaryWindow, WindowResized};

use crate::simulation::generator::Progress;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec2;

/// Texture the output buffer is copied into every frame
#[derive(Resource)]
struct Canvas(Handle<Image>);

#[derive(Component)]
struct CanvasSprite;

const MAGNET_SIZE: f32 = 16.0; // screen pixels

pub fn run_viewer(scenario: Scenario) {
    let (w, h) = scenario.surface;
    info!(
        "run_viewer: {} magnets, {}x{} grid",
        scenario.magnets.len(),
        scenario.generator.buffer().width(),
        scenario.generator.buffer().height()
    );

    App::new()
        .insert_resource(scenario)
        .add_plugins(
            DefaultPlugins
                .set(ImagePlugin::default_nearest())
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "magpend - G: generate/stop, click: preview, shift-click: magnet".into(),
                        resolution: (w as f32, h as f32).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_systems(Startup, setup_canvas_system)
        .add_systems(
            Update,
            (
                input_system,
                resize_system,
                sweep_system,
                preview_system,
                sync_canvas_system,
                draw_overlay_system,
            )
                .chain(),
        )
        .run();
}

fn grid_image(width: usize, height: usize) -> Image {
    Image::new_fill(
        Extent3d {
            width: width as u32,
            height: height as u32,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[0, 0, 0, 0],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}

fn setup_canvas_system(mut commands: Commands, scenario: Res<Scenario>, mut images: ResMut<Assets<Image>>) {
    commands.spawn(Camera2dBundle::default());

    let buf = scenario.generator.buffer();
    let handle = images.add(grid_image(buf.width(), buf.height()));
    let (w, h) = scenario.surface;

    commands.spawn((
        SpriteBundle {
            texture: handle.clone(),
            sprite: Sprite {
                custom_size: Some(Vec2::new(w as f32, h as f32)),
                ..default()
            },
            ..default()
        },
        CanvasSprite,
    ));
    commands.insert_resource(Canvas(handle));
}

fn input_system(
    mut scenario: ResMut<Scenario>,
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    if keys.just_pressed(KeyCode::KeyG) {
        if scenario.toggle_generation() {
            info!("generating");
        } else {
            info!("stopping");
        }
    }
    if keys.just_pressed(KeyCode::KeyH) {
        scenario.parameters.hide_magnets = !scenario.parameters.hide_magnets;
    }
    for (key, factor) in [(KeyCode::BracketLeft, 0.5), (KeyCode::BracketRight, 2.0)] {
        if keys.just_pressed(key) {
            let resolution = scenario.parameters.resolution * factor;
            if let Err(e) = scenario.set_resolution(resolution) {
                warn!("{}", e);
            }
        }
    }

    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.get_single() else { return };
    let Some(cursor) = window.cursor_position() else { return };
    let pos = NVec2::new(
        (cursor.x / window.width()) as f64,
        (cursor.y / window.height()) as f64,
    );

    if keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight) {
        scenario.toggle_magnet(pos);
    } else {
        scenario.place_preview(pos);
    }
}

fn resize_system(
    mut scenario: ResMut<Scenario>,
    mut events: EventReader<WindowResized>,
    mut sprites: Query<&mut Sprite, With<CanvasSprite>>,
) {
    for e in events.read() {
        if let Err(err) = scenario.resize_surface(e.width as f64, e.height as f64) {
            warn!("{}", err);
            continue;
        }
        for mut sprite in &mut sprites {
            sprite.custom_size = Some(Vec2::new(e.width, e.height));
        }
    }
}

fn sweep_system(mut scenario: ResMut<Scenario>) {
    if scenario.tick() == Progress::Done {
        info!("sweep complete");
    }
}

fn preview_system(mut scenario: ResMut<Scenario>) {
    scenario.step_preview();
}

fn sync_canvas_system(scenario: Res<Scenario>, canvas: Res<Canvas>, mut images: ResMut<Assets<Image>>) {
    let Some(image) = images.get_mut(&canvas.0) else { return };
    let buf = scenario.generator.buffer();

    let size = image.texture_descriptor.size;
    if size.width as usize != buf.width() || size.height as usize != buf.height() {
        *image = grid_image(buf.width(), buf.height());
    }
    image.data.copy_from_slice(buf.as_bytes());
}

fn draw_overlay_system(scenario: Res<Scenario>, windows: Query<&Window, With<PrimaryWindow>>, mut gizmos: Gizmos) {
    let Ok(window) = windows.get_single() else { return };
    let size = Vec2::new(window.width(), window.height());
    // plane is y-down, world is y-up around the window center
    let to_world = |x: &NVec2| Vec2::new((x.x as f32 - 0.5) * size.x, (0.5 - x.y as f32) * size.y);

    if !scenario.parameters.hide_magnets {
        for m in scenario.magnets.snapshot() {
            gizmos.circle_2d(to_world(&m.x), MAGNET_SIZE, Color::rgb_u8(m.color.r, m.color.g, m.color.b));
        }
    }

    gizmos.circle_2d(to_world(&scenario.preview.x), MAGNET_SIZE * 0.75, Color::rgb_u8(0xdd, 0xfb, 0xff));
}
