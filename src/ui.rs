use raylib::prelude::*;

use crate::audio::{AudioBackend, Interaction};
use crate::content::{Greeting, BADGES};
use crate::page::{Action, Page};
use crate::particles::{draw_heart, Particles};
use crate::slide::Slide;

const BACKGROUND: Color = Color::new(253, 242, 248, 255);
const PINK: Color = Color::new(236, 72, 153, 255);
const PURPLE: Color = Color::new(147, 51, 234, 255);
const INK: Color = Color::new(55, 65, 81, 255);
const CARD: Color = Color::new(255, 255, 255, 235);
const GOLD: Color = Color::new(234, 179, 8, 255);

const SCROLL_STEP: f32 = 48.0;
const MARGIN: f32 = 24.0;
const TEXT_SIZE: i32 = 20;
const LINE_HEIGHT: f32 = 28.0;

/// Width of `text` in pixels at `size`.
pub type Measure<'a> = &'a dyn Fn(&str, i32) -> i32;

/// View-only state that the page component does not care about.
#[derive(Debug, Default)]
pub struct View {
    scroll: f32,
    touching: bool,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_by(&mut self, wheel: f32, content_height: f32, screen_height: f32) {
        let max = (content_height - screen_height).max(0.0);
        self.scroll = (self.scroll - wheel * SCROLL_STEP).clamp(0.0, max);
    }

    /// True only on the frame a touch begins, not while a finger stays down.
    pub fn touch_began(&mut self, touching: bool) -> bool {
        let began = touching && !self.touching;
        self.touching = touching;
        began
    }
}

/// Screen rectangles for the current frame. Everything except the prompt is
/// shifted by the scroll offset.
#[derive(Debug, Clone)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub content_height: f32,
    pub title_y: f32,
    pub frame: Rectangle,
    pub prev: Rectangle,
    pub next: Rectangle,
    pub dots: Vec<Rectangle>,
    pub autoplay_button: Rectangle,
    pub music_button: Rectangle,
    pub gallery_title_y: f32,
    pub thumbs: Vec<Rectangle>,
    pub headline_y: f32,
    pub tribute: Vec<String>,
    pub tribute_y: f32,
    pub badges: Vec<Rectangle>,
    pub message_button: Rectangle,
    pub letter_card: Option<Rectangle>,
    pub prompt: Rectangle,
    pub prompt_close: Rectangle,
}

impl Layout {
    pub fn compute(
        width: f32,
        height: f32,
        view: &View,
        slide_count: usize,
        greeting: &Greeting,
        show_message: bool,
        measure: Measure,
    ) -> Self {
        let top = -view.scroll;
        let column = (width - 2.0 * MARGIN).min(960.0);
        let left = (width - column) * 0.5;

        let title_y = top + 36.0;

        let frame = Rectangle::new(left, top + 110.0, column, (height * 0.55).clamp(240.0, 520.0));
        let arrow = 48.0;
        let arrow_y = frame.y + (frame.height - arrow) * 0.5;
        let prev = Rectangle::new(frame.x + 12.0, arrow_y, arrow, arrow);
        let next = Rectangle::new(frame.x + frame.width - 12.0 - arrow, arrow_y, arrow, arrow);

        let dot = 14.0;
        let dot_gap = 10.0;
        let dots_y = frame.y + frame.height + 20.0;
        let dots_width = slide_count as f32 * (dot + dot_gap) - dot_gap;
        let dots_x = left + (column - dots_width) * 0.5;
        let dots = (0..slide_count)
            .map(|i| Rectangle::new(dots_x + i as f32 * (dot + dot_gap), dots_y, dot, dot))
            .collect::<Vec<_>>();

        let button_w = 200.0;
        let button_h = 44.0;
        let buttons_y = dots_y + dot + 20.0;
        let center = left + column * 0.5;
        let autoplay_button = Rectangle::new(center - button_w - 8.0, buttons_y, button_w, button_h);
        let music_button = Rectangle::new(center + 8.0, buttons_y, button_w, button_h);

        let gallery_title_y = buttons_y + button_h + 48.0;
        let columns = ((column / 180.0).floor() as usize).clamp(2, 6);
        let cell = column / columns as f32;
        let thumbs_y = gallery_title_y + 48.0;
        let thumbs = (0..slide_count)
            .map(|i| {
                let (row, col) = (i / columns, i % columns);
                Rectangle::new(
                    left + col as f32 * cell + 6.0,
                    thumbs_y + row as f32 * cell + 6.0,
                    cell - 12.0,
                    cell - 12.0,
                )
            })
            .collect::<Vec<_>>();
        let rows = slide_count.div_ceil(columns);

        let headline_y = thumbs_y + rows as f32 * cell + 48.0;
        let tribute_y = headline_y + 56.0;
        let tribute = wrap(greeting.tribute(), column - 40.0, TEXT_SIZE, measure);

        let badges_y = tribute_y + tribute.len() as f32 * LINE_HEIGHT + 24.0;
        let badge_h = 36.0;
        let widths: Vec<f32> =
            BADGES.iter().map(|&b| measure(b, 18) as f32 + 32.0).collect();
        let badges = flow(&widths, left, column, badges_y, badge_h, 10.0);
        let badges_bottom = badges.last().map_or(badges_y, |b| b.y + b.height);

        let message_button =
            Rectangle::new(center - 170.0, badges_bottom + 28.0, 340.0, 52.0);
        let mut bottom = message_button.y + message_button.height;
        let letter_card = show_message.then(|| {
            let card = Rectangle::new(
                left + 20.0,
                bottom + 24.0,
                column - 40.0,
                80.0 + greeting.letter().len() as f32 * LINE_HEIGHT,
            );
            bottom = card.y + card.height;
            card
        });

        let content_height = bottom + view.scroll + 60.0;

        let prompt = Rectangle::new(width * 0.5 - 210.0, height - 84.0, 420.0, 56.0);
        let prompt_close = Rectangle::new(prompt.x + prompt.width - 36.0, prompt.y + 14.0, 28.0, 28.0);

        Self {
            width,
            height,
            content_height,
            title_y,
            frame,
            prev,
            next,
            dots,
            autoplay_button,
            music_button,
            gallery_title_y,
            thumbs,
            headline_y,
            tribute,
            tribute_y,
            badges,
            message_button,
            letter_card,
            prompt,
            prompt_close,
        }
    }

    /// Maps a click to an action. Overlays take the click before the page.
    pub fn hit(&self, point: Vector2, lightbox_open: bool, prompt_visible: bool) -> Option<Action> {
        if lightbox_open {
            return Some(Action::ClosePhoto);
        }
        if prompt_visible {
            if contains(self.prompt_close, point) {
                return Some(Action::DismissPrompt);
            }
            if contains(self.prompt, point) {
                return Some(Action::ToggleMusic);
            }
        }
        if contains(self.prev, point) {
            return Some(Action::Previous);
        }
        if contains(self.next, point) {
            return Some(Action::Next);
        }
        if let Some(i) = self.dots.iter().position(|r| contains(*r, point)) {
            return Some(Action::JumpTo(i));
        }
        if contains(self.autoplay_button, point) {
            return Some(Action::ToggleAutoplay);
        }
        if contains(self.music_button, point) {
            return Some(Action::ToggleMusic);
        }
        if let Some(i) = self.thumbs.iter().position(|r| contains(*r, point)) {
            return Some(Action::OpenPhoto(i));
        }
        if contains(self.message_button, point) {
            return Some(Action::ToggleMessage);
        }
        None
    }
}

fn contains(r: Rectangle, p: Vector2) -> bool {
    p.x >= r.x && p.x < r.x + r.width && p.y >= r.y && p.y < r.y + r.height
}

/// Lays boxes of the given widths out left to right, wrapping and centering each row.
fn flow(widths: &[f32], left: f32, column: f32, y: f32, h: f32, gap: f32) -> Vec<Rectangle> {
    let mut rows: Vec<Vec<f32>> = Vec::new();
    let mut used = 0.0;
    for &w in widths {
        match rows.last_mut() {
            Some(row) if used + gap + w <= column => {
                row.push(w);
                used += gap + w;
            }
            _ => {
                rows.push(vec![w]);
                used = w;
            }
        }
    }

    let mut out = Vec::with_capacity(widths.len());
    for (r, row) in rows.iter().enumerate() {
        let total: f32 = row.iter().sum::<f32>() + gap * row.len().saturating_sub(1) as f32;
        let mut x = left + (column - total) * 0.5;
        for &w in row {
            out.push(Rectangle::new(x, y + r as f32 * (h + gap), w, h));
            x += w + gap;
        }
    }
    out
}

/// Greedy word wrap.
pub fn wrap(text: &str, max_width: f32, size: i32, measure: Measure) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() { word.to_string() } else { format!("{line} {word}") };
        if !line.is_empty() && measure(&candidate, size) as f32 > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// One frame of input: the raw interactions (for the music latch), the
/// actions they map to, and the wheel movement.
pub struct Input {
    pub interactions: Vec<Interaction>,
    pub actions: Vec<Action>,
    pub wheel: f32,
    pub mouse: Vector2,
}

pub fn poll_input(
    rl: &mut RaylibHandle,
    view: &mut View,
    layout: &Layout,
    lightbox_open: bool,
    prompt_visible: bool,
) -> Input {
    let mut interactions = Vec::new();
    let mut actions = Vec::new();
    let mouse = rl.get_mouse_position();

    if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
        interactions.push(Interaction::Pointer);
        actions.extend(layout.hit(mouse, lightbox_open, prompt_visible));
    }
    if view.touch_began(rl.get_touch_point_count() > 0) {
        interactions.push(Interaction::Touch);
    }

    let wheel = rl.get_mouse_wheel_move();
    if wheel != 0.0 {
        interactions.push(Interaction::Scroll);
    }

    if rl.get_key_pressed().is_some() {
        interactions.push(Interaction::Key);
    }
    let keys = [
        (KeyboardKey::KEY_LEFT, Action::Previous),
        (KeyboardKey::KEY_RIGHT, Action::Next),
        (KeyboardKey::KEY_SPACE, Action::ToggleAutoplay),
        (KeyboardKey::KEY_M, Action::ToggleMusic),
        (KeyboardKey::KEY_ENTER, Action::ToggleMessage),
        (KeyboardKey::KEY_ESCAPE, Action::ClosePhoto),
    ];
    for (key, action) in keys {
        if rl.is_key_pressed(key) {
            actions.push(action);
        }
    }

    Input { interactions, actions, wheel, mouse }
}

// --- Drawing ---

fn text_centered(d: &mut impl RaylibDraw, text: &str, cx: f32, y: f32, size: i32, color: Color) {
    let w = measure_text(text, size);
    d.draw_text(text, cx as i32 - w / 2, y as i32, size, color);
}

fn button(d: &mut impl RaylibDraw, r: Rectangle, label: &str, fill: Color) {
    d.draw_rectangle_rounded(r, 0.5, 8, fill);
    text_centered(d, label, r.x + r.width * 0.5, r.y + (r.height - 20.0) * 0.5, 20, Color::WHITE);
}

pub fn draw_loading(d: &mut impl RaylibDraw, greeting: &Greeting, width: f32, height: f32, time: f32) {
    d.clear_background(BACKGROUND);
    let c = Vector2::new(width * 0.5, height * 0.5 - 40.0);
    d.draw_ring(c, 44.0, 52.0, time * 360.0, time * 360.0 + 270.0, 36, PINK);
    draw_heart(d, c, 28.0, PURPLE);
    text_centered(d, &greeting.loading(), c.x, c.y + 80.0, 24, PURPLE);
}

pub fn draw_page<B: AudioBackend>(
    d: &mut impl RaylibDraw,
    page: &Page<B>,
    slides: &[Slide],
    greeting: &Greeting,
    particles: &Particles,
    layout: &Layout,
) {
    d.clear_background(BACKGROUND);
    particles.draw(d, layout.width, layout.height);

    let center = layout.frame.x + layout.frame.width * 0.5;
    text_centered(d, &greeting.title(), center, layout.title_y, 40, PINK);

    // Slideshow
    let carousel = page.carousel();
    let index = carousel.index();
    let frame = layout.frame;
    d.draw_rectangle_rounded(frame, 0.04, 8, Color::new(30, 20, 40, 255));
    if let Some(slide) = slides.get(index) {
        slide.draw(d, Rectangle::new(frame.x + 8.0, frame.y + 8.0, frame.width - 16.0, frame.height - 16.0));
    }
    let strip = Rectangle::new(frame.x, frame.y + frame.height - 76.0, frame.width, 76.0);
    d.draw_rectangle_rec(strip, Color::new(0, 0, 0, 140));
    text_centered(d, greeting.caption(index), center, strip.y + 12.0, 24, Color::WHITE);
    text_centered(d, greeting.quote(index), center, strip.y + 44.0, 18, Color::new(251, 207, 232, 255));
    text_centered(d, &format!("{} / {}", index + 1, carousel.len()), frame.x + frame.width - 48.0, frame.y + 12.0, 18, Color::WHITE);

    for (r, label) in [(layout.prev, "<"), (layout.next, ">")] {
        d.draw_circle_v(Vector2::new(r.x + r.width * 0.5, r.y + r.height * 0.5), r.width * 0.5, Color::new(255, 255, 255, 200));
        text_centered(d, label, r.x + r.width * 0.5, r.y + 12.0, 24, PINK);
    }

    for (i, r) in layout.dots.iter().enumerate() {
        let color = if i == index { PINK } else { Color::new(249, 168, 212, 255) };
        d.draw_circle_v(Vector2::new(r.x + r.width * 0.5, r.y + r.height * 0.5), r.width * 0.5, color);
    }

    let autoplay_label = if carousel.is_autoplaying() { "Pause slideshow" } else { "Play slideshow" };
    button(d, layout.autoplay_button, autoplay_label, PURPLE);
    let audio = page.audio();
    let music_label = match (audio.playing, audio.muted) {
        (false, _) => "Play music",
        (true, false) => "Mute music",
        (true, true) => "Unmute music",
    };
    button(d, layout.music_button, music_label, PINK);

    // Gallery
    text_centered(d, "Our Precious Memories", center, layout.gallery_title_y, 32, PURPLE);
    for (slide, r) in slides.iter().zip(&layout.thumbs) {
        d.draw_rectangle_rounded(*r, 0.08, 8, CARD);
        slide.draw_still(d, Rectangle::new(r.x + 6.0, r.y + 6.0, r.width - 12.0, r.height - 12.0));
    }

    // Message
    text_centered(d, &greeting.headline(), center, layout.headline_y, 32, PINK);
    for (i, line) in layout.tribute.iter().enumerate() {
        text_centered(d, line, center, layout.tribute_y + i as f32 * LINE_HEIGHT, TEXT_SIZE, INK);
    }
    for (r, label) in layout.badges.iter().zip(BADGES) {
        d.draw_rectangle_rounded(*r, 0.5, 8, GOLD);
        text_centered(d, label, r.x + r.width * 0.5, r.y + 9.0, 18, Color::WHITE);
    }
    let message_label = if page.is_message_visible() { "Hide My Heart's Message" } else { "Show My Heart's Message" };
    button(d, layout.message_button, message_label, PURPLE);
    if let Some(card) = layout.letter_card {
        d.draw_rectangle_rounded(card, 0.06, 8, CARD);
        d.draw_rectangle_lines_ex(card, 2.0, Color::new(249, 168, 212, 255));
        draw_heart(d, Vector2::new(card.x + card.width * 0.5, card.y + 32.0), 28.0, PINK);
        for (i, line) in greeting.letter().iter().enumerate() {
            text_centered(d, line, card.x + card.width * 0.5, card.y + 64.0 + i as f32 * LINE_HEIGHT, TEXT_SIZE, INK);
        }
    }

    // Overlays
    if page.is_prompt_visible() {
        let p = layout.prompt;
        d.draw_rectangle_rounded(p, 0.5, 8, PINK);
        text_centered(d, "Click here to play our song", p.x + (p.width - 36.0) * 0.5, p.y + 18.0, 20, Color::WHITE);
        text_centered(d, "x", layout.prompt_close.x + 14.0, layout.prompt_close.y + 4.0, 20, Color::WHITE);
    }

    if let Some(slide) = page.lightbox().and_then(|i| slides.get(i)) {
        d.draw_rectangle(0, 0, layout.width as i32, layout.height as i32, Color::new(0, 0, 0, 230));
        slide.draw_still(d, Rectangle::new(MARGIN, MARGIN, layout.width - 2.0 * MARGIN, layout.height - 2.0 * MARGIN));
    }
}
