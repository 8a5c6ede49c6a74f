use raylib::prelude::*;
use crate::constants::*;

pub struct Slide {
    image: Texture2D,

    alpha: f32,
    animation_timer: f32,
    pub is_animating: bool,
}

impl Slide {
    pub fn new(image: Texture2D) -> Self {
        Self {
            image,
            alpha: 1.0,
            animation_timer: 0.0,
            is_animating: false,
        }
    }

    pub fn start_fade_in(&mut self) {
        self.alpha = 0.0;
        self.animation_timer = 0.0;
        self.is_animating = true;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.is_animating {
            return;
        }
        self.animation_timer += dt;
        let t = (self.animation_timer / FADE_DURATION).min(1.0);
        self.alpha = 1.0 - (1.0 - t).powi(3); // easeOutCubic

        if self.animation_timer >= FADE_DURATION {
            self.is_animating = false;
            self.alpha = 1.0;
        }
    }

    /// Largest rectangle with the image's aspect ratio that fits in `bounds`, centered.
    pub fn fit(&self, bounds: Rectangle) -> Rectangle {
        fit_rect(self.image.width() as f32, self.image.height() as f32, bounds)
    }

    /// Draws the image scaled to fit `bounds`, with the current fade applied.
    pub fn draw(&self, d: &mut impl RaylibDraw, bounds: Rectangle) {
        self.draw_with_alpha(d, bounds, self.alpha);
    }

    /// Draws without the fade; used by the gallery and viewer.
    pub fn draw_still(&self, d: &mut impl RaylibDraw, bounds: Rectangle) {
        self.draw_with_alpha(d, bounds, 1.0);
    }

    fn draw_with_alpha(&self, d: &mut impl RaylibDraw, bounds: Rectangle, alpha: f32) {
        let tex_width = self.image.width() as f32;
        let tex_height = self.image.height() as f32;
        let dest = self.fit(bounds);
        let tint = Color::new(255, 255, 255, (alpha.clamp(0.0, 1.0) * 255.0) as u8);

        d.draw_texture_pro(
            &self.image,
            Rectangle::new(0.0, 0.0, tex_width, tex_height),
            dest,
            Vector2::new(0.0, 0.0),
            0.0,
            tint,
        );
    }
}

fn fit_rect(width: f32, height: f32, bounds: Rectangle) -> Rectangle {
    if width <= 0.0 || height <= 0.0 {
        return bounds;
    }
    let scale = (bounds.width / width).min(bounds.height / height);
    let w = width * scale;
    let h = height * scale;
    Rectangle::new(
        bounds.x + (bounds.width - w) * 0.5,
        bounds.y + (bounds.height - h) * 0.5,
        w,
        h,
    )
}
