//! Shader effects demo
//!
//! Draws a background into a CPU canvas, runs the selected effect over it
//! and overlays a label naming the effect.
//!
//! - **Escape**: quit
//! - **Left / Right**: previous / next effect
//! - **Mouse**: effect parameter

mod config;
mod effects;
mod error;
mod state;

use std::time::Instant;

use rust_media::graphics::colors;
use rust_media::prelude::*;

use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::state::{Action, DemoState};

const CONFIG_PATH: &str = "shader_app.toml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting shader effects demo");

    match run() {
        Ok(()) => {
            log::info!("Shader effects demo finished");
            Ok(())
        }
        Err(e) => {
            log::error!("Shader effects demo failed: {e}");
            Err(e.into())
        }
    }
}

fn run() -> Result<(), DemoError> {
    let config = DemoConfig::load_or_default(CONFIG_PATH)?;
    let context = Context::new();

    let font = Font::from_file(&context, &config.font_path)?;
    let background = match &config.background_path {
        Some(path) => Texture::from_file(&context, path, None)?,
        None => gradient(&context, config.window.width, config.window.height)?,
    };

    let mut window = Window::new(&context, &config.window)?;
    let mut state = DemoState::new(effects::all())?;

    let mut label = Text::new(state.label(), &font, config.label_size);
    label.set_position(Vector2f::new(10.0, 10.0));

    let size = window.size();
    let mut canvas = Canvas::new(size.x.max(1), size.y.max(1));
    let mut cursor = Vector2f::new(0.5, 0.5);
    let start = Instant::now();

    while window.is_open() {
        while let Some(event) = window.poll_event() {
            match event {
                Event::Closed => window.close(),
                Event::KeyPressed { code } => match state.handle_key(code) {
                    Action::Close => window.close(),
                    Action::EffectChanged => label.set_string(state.label()),
                    Action::Continue => {}
                },
                Event::MouseMoved { x, y } => {
                    let size = canvas.size();
                    cursor = Vector2f::new(x as f32 / size.x as f32, y as f32 / size.y as f32);
                }
                Event::Resized { width, height } if width > 0 && height > 0 => {
                    canvas = Canvas::new(width, height);
                }
                _ => {}
            }
        }
        if !window.is_open() {
            break;
        }

        state.current_mut().update(start.elapsed().as_secs_f32(), cursor);

        canvas.clear(colors::BLACK);
        canvas.draw_texture(&background, Vector2f::zeros(), colors::WHITE);
        canvas.apply(state.current());
        canvas.draw_text(&label);
        window.display(&canvas);
    }

    Ok(())
}

/// Diagonal color gradient used when no background image is configured
fn gradient(context: &Context, width: u32, height: u32) -> Result<Texture, DemoError> {
    let (width, height) = (width.max(1), height.max(1));
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let u = x as f32 / width as f32;
            let v = y as f32 / height as f32;
            let stripe = if (x / 32 + y / 32) % 2 == 0 { 1.0 } else { 0.8 };
            pixels.extend_from_slice(&[
                (255.0 * u * stripe) as u8,
                (255.0 * v * stripe) as u8,
                (255.0 * (1.0 - u) * stripe) as u8,
                255,
            ]);
        }
    }

    let mut texture = Texture::new(context, width, height)?;
    texture.update(&pixels, width, height, 0, 0)?;
    Ok(texture)
}
