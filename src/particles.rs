use rand::Rng;
use raylib::prelude::*;

use crate::constants::{PARALLAX_DIVISOR, PARTICLE_COUNT};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Heart,
    Star,
    Sparkle,
    Crown,
    Gem,
}

const SHAPES: [Shape; 5] = [Shape::Heart, Shape::Star, Shape::Sparkle, Shape::Crown, Shape::Gem];

/// One floating decoration. Positions are relative to the window (0..1).
#[derive(Debug, Clone)]
pub struct Particle {
    anchor: Vector2,
    delay: f32,
    period: f32,
    size: f32,
    shape: Shape,
}

impl Particle {
    /// Vertical float offset in pixels at time `t` (seconds since start).
    fn float_offset(&self, t: f32) -> f32 {
        let t = (t - self.delay).max(0.0);
        let phase = (t / self.period) * std::f32::consts::TAU;
        -phase.sin() * 20.0
    }

    /// Pulsing opacity in [0.35, 0.65].
    fn opacity(&self, t: f32) -> f32 {
        let phase = (t / (self.period * 0.25)) * std::f32::consts::TAU;
        0.5 + 0.15 * phase.sin()
    }
}

pub struct Particles {
    particles: Vec<Particle>,
    time: f32,
    parallax: Vector2,
}

impl Particles {
    pub fn new() -> Self {
        let mut rng = rand::rng();
        let particles = (0..PARTICLE_COUNT)
            .map(|i| Particle {
                anchor: Vector2::new(rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)),
                delay: rng.random_range(0.0..8.0),
                period: rng.random_range(8.0..12.0),
                size: rng.random_range(12.0..28.0),
                shape: SHAPES[i % SHAPES.len()],
            })
            .collect();
        Self { particles, time: 0.0, parallax: Vector2::new(0.0, 0.0) }
    }

    pub fn update(&mut self, dt: f32, mouse: Vector2) {
        self.time += dt;
        self.parallax = Vector2::new(mouse.x / PARALLAX_DIVISOR, mouse.y / PARALLAX_DIVISOR);
    }

    pub fn draw(&self, d: &mut impl RaylibDraw, width: f32, height: f32) {
        for p in &self.particles {
            let center = Vector2::new(
                p.anchor.x * width + self.parallax.x,
                p.anchor.y * height + self.parallax.y + p.float_offset(self.time),
            );
            let color = Color::new(249, 168, 212, (p.opacity(self.time) * 255.0) as u8);
            draw_shape(d, p.shape, center, p.size, color);
        }
    }
}

fn draw_shape(d: &mut impl RaylibDraw, shape: Shape, c: Vector2, size: f32, color: Color) {
    let r = size * 0.5;
    match shape {
        Shape::Heart => draw_heart(d, c, size, color),
        Shape::Star => d.draw_poly(c, 5, r, -90.0, color),
        Shape::Sparkle => {
            d.draw_line_ex(Vector2::new(c.x - r, c.y), Vector2::new(c.x + r, c.y), 2.0, color);
            d.draw_line_ex(Vector2::new(c.x, c.y - r), Vector2::new(c.x, c.y + r), 2.0, color);
        }
        Shape::Crown => {
            let base = Rectangle::new(c.x - r, c.y, size, r * 0.6);
            d.draw_rectangle_rec(base, color);
            for i in 0..3 {
                let x = c.x - r + r * i as f32;
                d.draw_triangle(
                    Vector2::new(x, c.y),
                    Vector2::new(x + r, c.y),
                    Vector2::new(x + r * 0.5, c.y - r),
                    color,
                );
            }
        }
        Shape::Gem => d.draw_poly(c, 4, r, 0.0, color),
    }
}

/// Two circles and a triangle.
pub fn draw_heart(d: &mut impl RaylibDraw, c: Vector2, size: f32, color: Color) {
    let r = size * 0.27;
    d.draw_circle_v(Vector2::new(c.x - r, c.y - r * 0.5), r, color);
    d.draw_circle_v(Vector2::new(c.x + r, c.y - r * 0.5), r, color);
    // counter-clockwise winding, raylib culls the other one
    d.draw_triangle(
        Vector2::new(c.x - 2.0 * r, c.y - r * 0.3),
        Vector2::new(c.x, c.y + size * 0.5),
        Vector2::new(c.x + 2.0 * r, c.y - r * 0.3),
        color,
    );
}
