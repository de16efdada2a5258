//! Draws a composed frame with macroquad.

use std::collections::HashMap;
use std::iter;
use std::path::Path;

use crate::ui_text::bar_lines;
use app::bar_layout::BarLayout;
use macroquad::prelude::*;
use possession_core::bar::BarModel;
use possession_core::board::Actor;
use possession_core::compose::{CENTER_BUTTON_ASSET, CONTROL_ASSETS, RenderPlan};
use possession_core::grid::{Point, Rect as ViewRect};
use possession_core::motion::{Facing, sprite_image};
use possession_core::tiles::all_tables;

const BAR_BACKGROUND: Color = Color { r: 0.08, g: 0.05, b: 0.1, a: 0.9 };
const BUTTON_BORDER: Color = Color { r: 0.6, g: 0.6, b: 0.6, a: 1.0 };
const TEXT_SIZE: f32 = 18.0;
const TEXT_PAD_X: f32 = 8.0;
const TEXT_BASELINE: f32 = 26.0;

const FACINGS: [Facing; 5] =
    [Facing::Idle, Facing::WalkUp, Facing::WalkDown, Facing::WalkLeft, Facing::WalkRight];

/// Every asset stem the renderer may be asked for.
pub fn asset_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = all_tables().iter().flat_map(|table| table.assets()).collect();
    for actor in [Actor::Priest, Actor::Monster] {
        names.extend(FACINGS.iter().map(|facing| sprite_image(actor, *facing)));
    }
    names.extend(CONTROL_ASSETS);
    names.sort_unstable();
    names.dedup();
    names
}

/// Flat colour used when an asset file is missing.
pub fn placeholder_color(asset: &str) -> Color {
    let prefix = asset.split('-').next().unwrap_or(asset);
    match prefix {
        "wall" => Color { r: 0.25, g: 0.22, b: 0.2, a: 1.0 },
        "floor" => Color { r: 0.45, g: 0.42, b: 0.36, a: 1.0 },
        "fog" => Color { r: 0.0, g: 0.0, b: 0.0, a: 0.7 },
        "decor" => Color { r: 0.3, g: 0.1, b: 0.1, a: 1.0 },
        "shrine" => match asset {
            "shrine-blessed" => GOLD,
            "shrine-desecrated" => MAROON,
            _ => LIGHTGRAY,
        },
        "highlight" => Color { r: 0.2, g: 0.9, b: 0.3, a: 0.35 },
        "pounce" | "echo" if asset.ends_with("marker") => Color { r: 0.9, g: 0.1, b: 0.1, a: 0.5 },
        "priest" => SKYBLUE,
        "monster" => PURPLE,
        _ => DARKGRAY,
    }
}

pub struct TextureCache {
    textures: HashMap<&'static str, Texture2D>,
}

impl TextureCache {
    pub async fn load(dir: &Path) -> Self {
        let mut textures = HashMap::new();
        for name in asset_names() {
            let path = dir.join(format!("{name}.png"));
            match load_texture(&path.to_string_lossy()).await {
                Ok(texture) => {
                    texture.set_filter(FilterMode::Nearest);
                    textures.insert(name, texture);
                }
                Err(e) => log::debug!("no texture for {name}: {e}"),
            }
        }
        log::info!("loaded {} textures from {}", textures.len(), dir.display());
        Self { textures }
    }

    fn draw(&self, asset: &str, rect: ViewRect) {
        match self.textures.get(asset) {
            Some(texture) => draw_texture_ex(
                texture,
                rect.x,
                rect.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(rect.width, rect.height)),
                    ..Default::default()
                },
            ),
            None => draw_rectangle(rect.x, rect.y, rect.width, rect.height, placeholder_color(asset)),
        }
    }
}

/// Map-space rectangle moved into screen space.
pub fn on_screen(rect: ViewRect, offset: Point) -> ViewRect {
    rect.translated(Point::new(-offset.x, -offset.y))
}

pub fn draw_frame(plan: &RenderPlan, bar_layout: &BarLayout, textures: &TextureCache) {
    clear_background(BLACK);
    let size = plan.tile.as_f32();

    for layer in &plan.layers {
        for tile in &layer.tiles {
            let rect = ViewRect::new(tile.origin.x, tile.origin.y, size, size);
            textures.draw(tile.image.asset, on_screen(rect, plan.offset));
        }
    }
    for sprite in iter::once(&plan.sprite).chain(plan.opponent.as_ref()) {
        textures.draw(sprite.image, on_screen(sprite.bounds, plan.offset));
    }
    for button in plan.controls.iter().chain(&plan.target_picker) {
        let rect = on_screen(button.rect, plan.offset);
        textures.draw(button.image, rect);
        draw_rectangle_lines(rect.x, rect.y, rect.width, rect.height, 1.0, BUTTON_BORDER);
    }

    let center = plan.center_button;
    textures.draw(CENTER_BUTTON_ASSET, center);
    draw_rectangle_lines(center.x, center.y, center.width, center.height, 1.0, BUTTON_BORDER);

    draw_bar(plan, bar_layout);
}

fn draw_bar(plan: &RenderPlan, layout: &BarLayout) {
    let frame = plan.bar_frame;
    draw_rectangle(frame.x, frame.y, frame.width, frame.height, BAR_BACKGROUND);

    let lines = bar_lines(&plan.bar);
    if let BarModel::EndTurn = plan.bar {
        let button = layout.end_turn;
        draw_rectangle_lines(button.x, button.y, button.width, button.height, 2.0, BUTTON_BORDER);
        for line in &lines {
            draw_text(line, button.x + TEXT_PAD_X, button.y + button.height / 2.0, TEXT_SIZE, WHITE);
        }
        return;
    }

    for (section, line) in layout.sections.iter().zip(&lines) {
        draw_text(line, section.x + TEXT_PAD_X, section.y + TEXT_BASELINE, TEXT_SIZE, WHITE);
    }
    if plan.bar.has_menu_button() {
        let menu = layout.menu;
        draw_rectangle_lines(menu.x, menu.y, menu.width, menu.height, 1.0, BUTTON_BORDER);
        draw_text("=", menu.x + 14.0, menu.y + TEXT_BASELINE, TEXT_SIZE, WHITE);
    }
}

#[cfg(test)]
mod tests;
