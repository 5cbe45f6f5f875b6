//! Overlay: splash screen, nav bar, content panels, skills list
//!
//! Immediate mode. Everything is redrawn from `Experience` each frame and
//! the one thing the visitor clicked comes back as a `UiAction`.

use macroquad::prelude::*;
use super::{faded, text_width, wrap_text, Rect, UiContext};
use super::theme::*;
use crate::app::Experience;
use crate::navigation::NavigationTarget;
use crate::panels::Panel;

/// What the visitor asked for this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Enter,
    Navigate(NavigationTarget),
    ClosePanels,
    OpenUrl(String),
}

/// Nav-bar entries: (label, nav id)
pub const NAV_ITEMS: [(&str, &str); 5] = [
    ("HOME", "home"),
    ("ABOUT", "about"),
    ("PROJECTS", "projects"),
    ("CONTACT", "contact"),
    ("SKILLS", "skills"),
];

/// Draw the whole overlay for the current state
pub fn draw_overlay(ctx: &mut UiContext, exp: &Experience, time: f64) -> Option<UiAction> {
    let screen = Rect::screen(exp.viewport.width, exp.viewport.height);
    let mut action = None;

    if exp.interface_visible {
        let alpha = exp.stage.interface_opacity;
        action = action.or(draw_nav_bar(ctx, exp, screen.slice_top(NAV_HEIGHT), alpha));
        let body = screen.remaining_after_top(NAV_HEIGHT);
        for panel in exp.panels.visible_panels() {
            let panel_action = match panel {
                Panel::Home => {
                    draw_home(exp, body, alpha, time);
                    None
                }
                Panel::SkillsList => draw_skills_list(ctx, exp, body, alpha),
                Panel::About | Panel::Projects | Panel::Contact | Panel::Video => {
                    draw_content_panel(ctx, exp, panel, body, alpha)
                }
            };
            action = action.or(panel_action);
        }
    }

    if exp.entry.screen_visible {
        action = action.or(draw_entry_screen(ctx, exp, screen));
    }
    action
}

/// Flat text button; returns true when clicked
fn text_button(ctx: &mut UiContext, rect: Rect, label: &str, font_size: f32, highlighted: bool, alpha: f32) -> bool {
    let clicked = ctx.button(&rect);
    if ctx.mouse.inside(&rect) {
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, faded(BUTTON_HOVER, alpha));
    }
    let color = if highlighted { ACCENT } else { TEXT_COLOR };
    let text_x = (rect.center_x() - text_width(label, font_size) * 0.5).round();
    let text_y = (rect.y + rect.h * 0.5 + font_size * 0.35).round();
    draw_text(label, text_x, text_y, font_size, faded(color, alpha));
    if highlighted {
        draw_rectangle(rect.x + 8.0, rect.bottom() - 2.0, rect.w - 16.0, 2.0, faded(ACCENT, alpha));
    }
    clicked
}

fn draw_entry_screen(ctx: &mut UiContext, exp: &Experience, screen: Rect) -> Option<UiAction> {
    let alpha = exp.stage.entry_opacity;
    let portfolio = &exp.portfolio;
    draw_rectangle(screen.x, screen.y, screen.w, screen.h, faded(BLACK, alpha));
    ctx.occupy(&screen);

    let center_y = screen.h * 0.45;
    let title_x = screen.center_x() - text_width(&portfolio.title, FONT_SIZE_TITLE) * 0.5;
    draw_text(&portfolio.title, title_x.round(), center_y.round(), FONT_SIZE_TITLE, faded(ACCENT, alpha));

    let subtitle_x = screen.center_x() - text_width(&portfolio.subtitle, FONT_SIZE_CONTENT) * 0.5;
    draw_text(&portfolio.subtitle, subtitle_x.round(), (center_y + 40.0).round(), FONT_SIZE_CONTENT, faded(TEXT_DIM, alpha));

    let label = &exp.entry.label;
    let button_w = text_width(label, FONT_SIZE_HEADER) + 48.0;
    let button = Rect { y: center_y + 80.0, ..screen.centered(button_w, 56.0) };
    let trigger_alpha = alpha * exp.entry.trigger_opacity;
    draw_rectangle_lines(button.x, button.y, button.w, button.h, 2.0, faded(ACCENT, trigger_alpha));
    let clicked = text_button(ctx, button, label, FONT_SIZE_HEADER, false, trigger_alpha);

    clicked.then_some(UiAction::Enter)
}

fn draw_nav_bar(ctx: &mut UiContext, exp: &Experience, rect: Rect, alpha: f32) -> Option<UiAction> {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, faded(NAV_BG, alpha));
    ctx.occupy(&rect);
    draw_text(&exp.portfolio.title, rect.x + 20.0, (rect.y + rect.h * 0.5 + 8.0).round(), FONT_SIZE_HEADER, faded(ACCENT, alpha));

    let mut action = None;
    let mut x = rect.right() - 12.0;
    for (label, id) in NAV_ITEMS.iter().rev() {
        let w = text_width(label, FONT_SIZE_SMALL) + 28.0;
        x -= w;
        let item = Rect::new(x, rect.y, w, rect.h);
        let active = exp.active_nav == Some(*id);
        if text_button(ctx, item, label, FONT_SIZE_SMALL, active, alpha) {
            action = NavigationTarget::parse(id).map(UiAction::Navigate);
        }
    }
    action
}

fn draw_home(exp: &Experience, body: Rect, alpha: f32, time: f64) {
    let portfolio = &exp.portfolio;
    let center_y = body.y + body.h * 0.72;

    let tagline = format!("{}{}", portfolio.tagline_prefix, exp.typewriter.text());
    let caret_on = (time * 2.0) as i64 % 2 == 0;
    let width = text_width(&tagline, FONT_SIZE_HEADER);
    let x = (body.center_x() - width * 0.5).round();
    draw_text(&tagline, x, center_y.round(), FONT_SIZE_HEADER, faded(TEXT_COLOR, alpha));
    if caret_on {
        draw_text("|", x + width, center_y.round(), FONT_SIZE_HEADER, faded(ACCENT, alpha));
    }

    let subtitle_x = body.center_x() - text_width(&portfolio.subtitle, FONT_SIZE_SMALL) * 0.5;
    draw_text(&portfolio.subtitle, subtitle_x.round(), (center_y + 32.0).round(), FONT_SIZE_SMALL, faded(TEXT_DIM, alpha));
}

/// Card frame with title and close button. Returns the content area and whether close was clicked.
fn draw_card(ctx: &mut UiContext, rect: Rect, title: &str, alpha: f32) -> (Rect, bool) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, faded(PANEL_BG, alpha));
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, faded(PANEL_BORDER, alpha));
    ctx.occupy(&rect);

    let inner = rect.pad(PANEL_PADDING);
    draw_text(title, inner.x, (inner.y + FONT_SIZE_HEADER * 0.8).round(), FONT_SIZE_HEADER, faded(ACCENT, alpha));
    let close = rect.top_right_square(CLOSE_SIZE, 12.0);
    let closed = text_button(ctx, close, "X", FONT_SIZE_SMALL, false, alpha);

    (inner.remaining_after_top(FONT_SIZE_HEADER + 16.0), closed)
}

/// Draw wrapped paragraphs from `y`, returning the y below them
fn draw_paragraphs(text: &str, x: f32, y: f32, width: f32, color: Color, alpha: f32) -> f32 {
    let mut y = y;
    for line in wrap_text(text, FONT_SIZE_CONTENT, width) {
        draw_text(&line, x.round(), (y + FONT_SIZE_CONTENT).round(), FONT_SIZE_CONTENT, faded(color, alpha));
        y += LINE_HEIGHT;
    }
    y
}

fn card_rect(body: Rect, panel: Panel, height: f32) -> Rect {
    let w = PANEL_WIDTH.min(body.w - 32.0).max(0.0);
    let h = height.min(body.h - 32.0).max(0.0);
    match panel {
        // Video and the skills list sit on the left, sections on the right
        Panel::Video | Panel::SkillsList => Rect::new(body.x + 16.0, body.y + 16.0, w, h),
        _ => Rect::new(body.right() - w - 16.0, body.y + 16.0, w, h),
    }
}

fn draw_content_panel(ctx: &mut UiContext, exp: &Experience, panel: Panel, body: Rect, alpha: f32) -> Option<UiAction> {
    let portfolio = &exp.portfolio;
    let (title, text) = match panel {
        Panel::Video => (portfolio.video.title.as_str(), portfolio.video.body.as_str()),
        _ => match portfolio.section(panel.id()) {
            Some(section) => (section.title.as_str(), section.body.as_str()),
            None => return None,
        },
    };

    let rect = card_rect(body, panel, body.h * 0.75);
    let (content, closed) = draw_card(ctx, rect, title, alpha);
    let mut action = closed.then_some(UiAction::ClosePanels);

    let mut y = draw_paragraphs(text, content.x, content.y, content.w, TEXT_COLOR, alpha);

    match panel {
        Panel::Projects => {
            for project in &portfolio.projects {
                y += 8.0;
                draw_text(&project.title, content.x, (y + FONT_SIZE_CONTENT).round(), FONT_SIZE_CONTENT, faded(ACCENT, alpha));
                y += LINE_HEIGHT;
                y = draw_paragraphs(&project.summary, content.x, y, content.w, TEXT_DIM, alpha);
                if let Some(url) = &project.url {
                    let open = Rect::new(content.x, y, 72.0, LINE_HEIGHT + 4.0);
                    if text_button(ctx, open, "OPEN", FONT_SIZE_SMALL, false, alpha) {
                        action = Some(UiAction::OpenUrl(url.clone()));
                    }
                    y += LINE_HEIGHT + 8.0;
                }
            }
        }
        Panel::Contact => {
            y += 8.0;
            for link in &portfolio.contact_links {
                let row = Rect::new(content.x, y, content.w, LINE_HEIGHT + 8.0);
                if text_button(ctx, row, &link.label, FONT_SIZE_CONTENT, false, alpha) {
                    action = Some(UiAction::OpenUrl(link.url.clone()));
                }
                y += LINE_HEIGHT + 12.0;
            }
        }
        Panel::Video => {
            if let Some(url) = &portfolio.video.url {
                let open = Rect::new(content.x, y + 8.0, 96.0, LINE_HEIGHT + 4.0);
                if text_button(ctx, open, "WATCH", FONT_SIZE_SMALL, false, alpha) {
                    action = Some(UiAction::OpenUrl(url.clone()));
                }
            }
        }
        _ => {}
    }
    action
}

fn draw_skills_list(ctx: &mut UiContext, exp: &Experience, body: Rect, alpha: f32) -> Option<UiAction> {
    let portfolio = &exp.portfolio;
    let row_step = LINE_HEIGHT + FONT_SIZE_SMALL + 16.0;
    let height = PANEL_PADDING * 2.0 + FONT_SIZE_HEADER + 16.0 + portfolio.skills.len() as f32 * row_step;
    let rect = card_rect(body, Panel::SkillsList, height);
    let (content, closed) = draw_card(ctx, rect, &portfolio.skills_title, alpha);
    let mut action = closed.then_some(UiAction::ClosePanels);

    let mut y = content.y;
    for skill in &portfolio.skills {
        let row = Rect::new(content.x, y, content.w, LINE_HEIGHT + 8.0);
        let [r, g, b] = skill.color;
        draw_circle(row.x + 8.0, row.y + row.h * 0.5, 5.0, faded(Color::from_rgba(r, g, b, 255), alpha));
        if text_button(ctx, Rect::new(row.x + 20.0, row.y, row.w - 20.0, row.h), &skill.name, FONT_SIZE_CONTENT, false, alpha) {
            action = Some(UiAction::Navigate(NavigationTarget::Skill(skill.name.clone())));
        }
        let blurb_y = (row.bottom() + FONT_SIZE_SMALL * 0.5).round();
        draw_text(&skill.blurb, row.x + 24.0, blurb_y, FONT_SIZE_SMALL, faded(TEXT_DIM, alpha));
        y += row_step;
    }
    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_items_parse() {
        for (_, id) in NAV_ITEMS {
            let target = NavigationTarget::parse(id).unwrap();
            assert_eq!(target.nav_id(), id);
        }
    }

    #[test]
    fn test_card_sides() {
        let body = Rect::new(0.0, 48.0, 1280.0, 672.0);
        assert_eq!(card_rect(body, Panel::Video, 300.0).x, 16.0);
        assert_eq!(card_rect(body, Panel::About, 300.0).right(), 1264.0);
        // Narrow screens shrink the card
        let narrow = Rect::new(0.0, 48.0, 360.0, 600.0);
        assert_eq!(card_rect(narrow, Panel::About, 300.0).w, 328.0);
    }
}
