use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use raylib::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod audio;
mod carousel;
mod config;
mod constants;
mod content;
mod error;
mod page;
mod particles;
mod slide;
mod state;
mod texture_loader;
mod timer;
mod ui;

use crate::audio::raylib_backend::{load_music, open_device, RaylibMusic};
use crate::audio::AudioController;
use crate::config::Args;
use crate::constants::*;
use crate::content::Greeting;
use crate::page::Page;
use crate::particles::Particles;
use crate::slide::Slide;
use crate::state::PageState;
use crate::texture_loader::{load_sorted_image_paths, load_texture_with_exif_rotation};
use crate::ui::{Layout, View};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "birthday_slideshow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    info!(image_dir = ?args.image_dir, recipient = %args.recipient, "starting birthday slideshow");

    let image_paths = load_sorted_image_paths(&args.image_dir)
        .with_context(|| format!("loading images from {:?}", args.image_dir))?;

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title("Happy Birthday")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);
    rl.set_exit_key(None); // Escape closes the photo viewer instead

    // --- Load Slides ---
    let mut slides: Vec<Slide> = Vec::new();
    for path in &image_paths {
        match load_texture_with_exif_rotation(&mut rl, &thread, path) {
            Ok(texture) => slides.push(Slide::new(texture)),
            Err(e) => warn!("skipping image: {e}"),
        }
    }
    if slides.is_empty() {
        anyhow::bail!("none of the {} images in {:?} could be loaded", image_paths.len(), args.image_dir);
    }
    info!(count = slides.len(), "slides loaded");

    // --- Music (optional, the page runs silent without it) ---
    let device = open_device()
        .inspect_err(|e| warn!("running without music: {e}"))
        .ok();
    let music = match (device.as_ref(), args.music_path()) {
        (Some(device), Some(path)) => load_music(device, &path)
            .inspect_err(|e| warn!("running without music: {e}"))
            .ok(),
        (Some(_), None) => {
            info!("no music track found");
            None
        }
        (None, _) => None,
    };
    let backend = RaylibMusic::new(music, args.autoplay_policy);

    let greeting = Greeting::new(args.recipient.as_str(), args.age);
    let mut page = Page::mount(slides.len(), !args.paused, AudioController::new(backend, args.volume));
    let mut particles = Particles::new();
    let mut view = View::new();
    let mut shown_index = page.carousel().index();
    let mut clock = 0.0;
    let measure = |text: &str, size: i32| measure_text(text, size);

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        clock += dt;
        let width = rl.get_screen_width() as f32;
        let height = rl.get_screen_height() as f32;

        let layout = Layout::compute(width, height, &view, slides.len(), &greeting, page.is_message_visible(), &measure);
        let input = ui::poll_input(&mut rl, &mut view, &layout, page.lightbox().is_some(), page.is_prompt_visible());

        // Actions first so a click on the music button is not also taken as
        // the unlocking interaction that would start playback a second time.
        for action in input.actions {
            page.apply(action);
        }
        for interaction in input.interactions {
            page.interact(interaction);
        }
        if input.wheel != 0.0 && page.lightbox().is_none() {
            view.scroll_by(input.wheel, layout.content_height, height);
        }

        page.update(Duration::from_secs_f32(dt));
        particles.update(dt, input.mouse);

        let index = page.carousel().index();
        if index != shown_index {
            slides[index].start_fade_in();
            shown_index = index;
        }
        for slide in slides.iter_mut() {
            slide.update(dt);
        }

        let mut d = rl.begin_drawing(&thread);
        match page.state() {
            PageState::Loading => ui::draw_loading(&mut d, &greeting, width, height, clock),
            PageState::Showing | PageState::Closed => {
                // Recompute so toggles made this frame show up immediately
                let layout = Layout::compute(width, height, &view, slides.len(), &greeting, page.is_message_visible(), &measure);
                ui::draw_page(&mut d, &page, &slides, &greeting, &particles, &layout);
            }
        }
    }

    page.teardown();
    Ok(())
}
