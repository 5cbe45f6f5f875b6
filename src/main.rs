//! STARFOLIO: a particle-planet portfolio
//!
//! An entry screen, a scene of point-cloud planets for skills and site
//! sections, and a camera that flies between them:
//! - Click a planet (or a nav item) to fly there
//! - Drag to orbit, scroll to zoom
//! - Content panels open when the camera arrives

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod camera;
mod config;
mod content;
mod entry;
mod interaction;
mod math;
mod navigation;
mod panels;
mod picker;
mod ray;
mod render;
mod scene;
mod scheduler;
mod tween;
mod typewriter;
mod ui;

use app::Experience;
use config::{SiteConfig, SITE_CONFIG_PATH};
use interaction::CursorStyle;
use macroquad::miniquad::window::set_mouse_cursor;
use macroquad::miniquad::CursorIcon;
use macroquad::prelude::*;
use ui::{MouseState, PointerGesture, UiAction, UiContext};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("STARFOLIO v{}", VERSION),
        window_width: 1280,
        window_height: 800,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Route `RUST_LOG`-filtered tracing output to stderr (native only)
#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(target_arch = "wasm32")]
extern "C" {
    fn starfolio_open_url(ptr: *const u8, len: usize);
}

fn open_url(url: &str) {
    tracing::info!(url, "opening link");
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = webbrowser::open(url) {
            tracing::warn!(url, error = %e, "failed to open browser");
        }
    }
    #[cfg(target_arch = "wasm32")]
    {
        unsafe { starfolio_open_url(url.as_ptr(), url.len()) }
    }
}

fn handle_action(exp: &mut Experience, action: UiAction, now: f64) {
    match action {
        UiAction::Enter => exp.enter(now),
        UiAction::Navigate(target) => exp.navigate_to(target, now),
        UiAction::ClosePanels => exp.close_panels(),
        UiAction::OpenUrl(url) => open_url(&url),
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    init_logging();

    #[cfg(not(target_arch = "wasm32"))]
    let config = SiteConfig::load_or_default(SITE_CONFIG_PATH);
    #[cfg(target_arch = "wasm32")]
    let config = SiteConfig::load_or_default(SITE_CONFIG_PATH).await;

    let mut size = (screen_width(), screen_height());
    let mut exp = Experience::new(config, size.0, size.1);
    exp.set_dpi_scale(screen_dpi_scale());

    let mut ctx = UiContext::new();
    let mut gesture: Option<PointerGesture> = None;
    let mut cursor = CursorStyle::Default;

    loop {
        let now = get_time();
        let dt = get_frame_time();

        let current = (screen_width(), screen_height());
        if current != size {
            size = current;
            exp.set_dpi_scale(screen_dpi_scale());
            exp.resize(size.0, size.1, now);
        }

        exp.update(now, dt);
        render::draw_scene(&exp);

        let (mx, my) = mouse_position();
        ctx.begin_frame(MouseState {
            x: mx,
            y: my,
            left_down: is_mouse_button_down(MouseButton::Left),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            left_released: is_mouse_button_released(MouseButton::Left),
            scroll: mouse_wheel().1,
        });

        if let Some(action) = ui::draw_overlay(&mut ctx, &exp, now) {
            handle_action(&mut exp, action, now);
        } else if exp.interface_visible {
            // Scene input: only where the overlay didn't take the pointer
            if ctx.mouse.left_pressed && !ctx.captured {
                gesture = Some(PointerGesture::press(mx, my));
            }
            if let Some(g) = gesture.as_mut() {
                if let Some((dx, dy)) = g.move_to(mx, my) {
                    exp.orbit_drag(dx, dy);
                }
            }
            if ctx.mouse.left_released {
                if let Some(g) = gesture.take() {
                    if g.release() {
                        exp.pointer_clicked(mx, my, now);
                    }
                }
            }
            if ctx.captured {
                exp.pointer_left(now);
            } else {
                exp.pointer_moved(mx, my, now);
                if ctx.mouse.scroll != 0.0 {
                    exp.zoom(ctx.mouse.scroll.signum());
                }
            }
        }

        if is_key_pressed(KeyCode::Escape) {
            exp.close_panels();
        }

        let wanted = if ctx.hot { CursorStyle::Pointer } else { exp.cursor() };
        if wanted != cursor {
            cursor = wanted;
            set_mouse_cursor(match cursor {
                CursorStyle::Pointer => CursorIcon::Pointer,
                CursorStyle::Default => CursorIcon::Default,
            });
        }

        next_frame().await
    }
}
