//! The demo's pixel effects
//!
//! Every effect reads the mouse position as its main parameter: the
//! horizontal position for the strength, the vertical one where a second
//! knob helps.

use rand::Rng;
use rust_media::foundation::math::Vector2f;
use rust_media::graphics::{Color, Effect, FragmentInput};

/// Every effect, in presentation order
pub fn all() -> Vec<Box<dyn Effect>> {
    vec![
        Box::new(Pixelate::default()),
        Box::new(Wave::default()),
        Box::new(Storm::new(&mut rand::thread_rng())),
        Box::new(Edge::default()),
    ]
}

/// Snaps pixels to square blocks; larger towards the right of the window
#[derive(Debug, Default)]
pub struct Pixelate {
    block: f32,
}

impl Pixelate {
    const MAX_BLOCK: f32 = 24.0;
}

impl Effect for Pixelate {
    fn name(&self) -> &str {
        "Pixelate"
    }

    fn update(&mut self, _time: f32, cursor: Vector2f) {
        self.block = 1.0 + cursor.x.clamp(0.0, 1.0) * (Self::MAX_BLOCK - 1.0);
    }

    fn fragment(&self, input: &FragmentInput<'_>) -> Color {
        let block = self.block.max(1.0);
        let x = ((input.x as f32 / block).floor() + 0.5) * block;
        let y = ((input.y as f32 / block).floor() + 0.5) * block;
        input.texel(x as i64, y as i64)
    }
}

/// Sine displacement travelling across the image
#[derive(Debug, Default)]
pub struct Wave {
    time: f32,
    amplitude: f32,
}

impl Effect for Wave {
    fn name(&self) -> &str {
        "Wave"
    }

    fn update(&mut self, time: f32, cursor: Vector2f) {
        self.time = time;
        self.amplitude = cursor.x.clamp(0.0, 1.0) * 0.02;
    }

    fn fragment(&self, input: &FragmentInput<'_>) -> Color {
        let uv = input.uv();
        let offset = Vector2f::new(
            (uv.y * 25.0 + self.time * 3.0).sin() * self.amplitude,
            (uv.x * 20.0 + self.time * 2.0).cos() * self.amplitude,
        );
        input.sample(uv + offset)
    }
}

/// Pixels flee the cursor while random streaks flicker
#[derive(Debug)]
pub struct Storm {
    time: f32,
    cursor: Vector2f,
    radius: f32,
    // Per-row phase so streaks do not blink in unison
    phases: Vec<f32>,
}

impl Storm {
    const ROWS: usize = 256;

    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            time: 0.0,
            cursor: Vector2f::new(0.5, 0.5),
            radius: 0.2,
            phases: (0..Self::ROWS)
                .map(|_| rng.gen_range(0.0..std::f32::consts::TAU))
                .collect(),
        }
    }

    fn blink(&self, row: f32) -> f32 {
        let index = ((row * Self::ROWS as f32) as usize).min(Self::ROWS - 1);
        let wave = (self.time * 8.0 + self.phases[index]).sin();
        if wave > 0.97 {
            1.6
        } else {
            1.0
        }
    }
}

impl Effect for Storm {
    fn name(&self) -> &str {
        "Storm"
    }

    fn update(&mut self, time: f32, cursor: Vector2f) {
        self.time = time;
        self.cursor = cursor;
        self.radius = 0.1 + cursor.y.clamp(0.0, 1.0) * 0.3;
    }

    fn fragment(&self, input: &FragmentInput<'_>) -> Color {
        let uv = input.uv();
        let away = uv - self.cursor;
        let distance = away.norm();

        let sample_at = if distance < self.radius && distance > f32::EPSILON {
            // Pull samples from closer to the cursor, pushing the image outwards
            let push = (1.0 - distance / self.radius) * self.radius * 0.5;
            uv - away / distance * push
        } else {
            uv
        };

        let mut color = input.sample(sample_at);
        let gain = self.blink(uv.y);
        for channel in &mut color.0[..3] {
            *channel = (f32::from(*channel) * gain).min(255.0) as u8;
        }
        color
    }
}

/// Sobel outlines over the original colors
#[derive(Debug)]
pub struct Edge {
    threshold: f32,
}

impl Default for Edge {
    fn default() -> Self {
        Self { threshold: 0.3 }
    }
}

fn luminance(color: Color) -> f32 {
    (0.299 * f32::from(color[0]) + 0.587 * f32::from(color[1]) + 0.114 * f32::from(color[2])) / 255.0
}

impl Effect for Edge {
    fn name(&self) -> &str {
        "Edge"
    }

    fn update(&mut self, _time: f32, cursor: Vector2f) {
        self.threshold = 0.05 + cursor.x.clamp(0.0, 1.0) * 0.9;
    }

    fn fragment(&self, input: &FragmentInput<'_>) -> Color {
        let (x, y) = (i64::from(input.x), i64::from(input.y));
        let at = |dx: i64, dy: i64| luminance(input.texel(x + dx, y + dy));

        let gx = -at(-1, -1) - 2.0 * at(-1, 0) - at(-1, 1) + at(1, -1) + 2.0 * at(1, 0) + at(1, 1);
        let gy = -at(-1, -1) - 2.0 * at(0, -1) - at(1, -1) + at(-1, 1) + 2.0 * at(0, 1) + at(1, 1);

        let mut color = input.current();
        if gx.hypot(gy) > self.threshold {
            color.0 = [0, 0, 0, color[3]];
        }
        color
    }
}
