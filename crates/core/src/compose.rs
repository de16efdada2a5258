//! Draw plan for one frame, read off a `ViewState`.
//! This module exists so renderers only iterate a list; all placement math lives here.
//! It does not own textures or any platform drawing call.

use crate::bar::{BarModel, bar_frame};
use crate::board::Actor;
use crate::command::{Direction, FocusTarget};
use crate::config::ScreenSize;
use crate::controls::ControlAction;
use crate::engine::ViewState;
use crate::grid::{BOARD_COLUMNS, CellIndex, Point, Rect, TileSize, cell_to_pixel};
use crate::motion::{Facing, sprite_image};
use crate::props::ZoomLevel;
use crate::tiles::{self, TileImage, TileLayer, TileTable};

/// Screen margin of the center-camera button.
const CENTER_BUTTON_MARGIN: f32 = 5.0;

pub const CENTER_BUTTON_ASSET: &str = "center-camera";
/// Every button graphic a plan can reference, for preloading.
pub const CONTROL_ASSETS: [&str; 9] = [
    "echo-north",
    "echo-west",
    "echo-burst",
    "echo-east",
    "echo-south",
    "focus",
    "target-priest",
    "target-shrine",
    CENTER_BUTTON_ASSET,
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileDraw {
    pub cell: CellIndex,
    pub origin: Point,
    pub image: TileImage,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayerPlan {
    pub layer: TileLayer,
    pub tiles: Vec<TileDraw>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteDraw {
    pub image: &'static str,
    pub origin: Point,
    pub scale: f32,
    /// Map-space bounds used for tap detection.
    pub bounds: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonDraw {
    pub action: ControlAction,
    pub image: &'static str,
    pub rect: Rect,
}

/// Everything drawn for one frame, back to front. Map-space items are drawn
/// shifted by `-offset`; `center_button` and `bar_frame` are screen-space.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPlan {
    pub offset: Point,
    pub tile: TileSize,
    pub board_pixels: f32,
    pub layers: Vec<LayerPlan>,
    pub sprite: SpriteDraw,
    pub opponent: Option<SpriteDraw>,
    pub controls: Vec<ButtonDraw>,
    pub target_picker: Vec<ButtonDraw>,
    pub center_button: Rect,
    pub bar: BarModel,
    pub bar_frame: Rect,
}

impl RenderPlan {
    /// Resolves a screen tap to a button or the acting sprite. Returns `None`
    /// when the tap belongs to the map gesture router.
    pub fn control_at(&self, screen: Point) -> Option<ControlAction> {
        if self.center_button.contains(screen) {
            return Some(ControlAction::CenterCamera);
        }
        if self.bar_frame.contains(screen) {
            return None;
        }
        let map = screen + self.offset;
        self.controls
            .iter()
            .chain(&self.target_picker)
            .find(|button| button.rect.contains(map))
            .map(|button| button.action)
            .or_else(|| self.sprite.bounds.contains(map).then_some(ControlAction::SpriteTapped))
    }
}

pub fn compose(state: &ViewState, now_ms: u64) -> RenderPlan {
    let props = state.props();
    let tile = props.tile_size;
    let level = state.level();
    let actor = props.actor();
    let screen = state.config().screen;
    let offset = state.viewport().offset(now_ms);
    let window = Rect::new(offset.x, offset.y, screen.width, screen.height);
    let layers = state.layers();
    let panel = state.panel();

    let mut plan_layers = vec![
        layer_tiles(&tiles::TERRAIN, &layers.terrain, tile, &window),
        layer_tiles(&tiles::DECORATION, &layers.decoration, tile, &window),
        layer_tiles(&tiles::CACHE, &layers.cache, tile, &window),
        layer_tiles(&tiles::BLESSED_CACHE, &layers.blessed_cache, tile, &window),
        layer_tiles(&tiles::DESECRATED_CACHE, &layers.desecrated_cache, tile, &window),
    ];
    if panel.show_highlighted {
        plan_layers.push(layer_tiles(&tiles::HIGHLIGHT, &layers.highlight, tile, &window));
    }
    if actor == Actor::Priest {
        plan_layers.push(layer_tiles(&tiles::FOG, &layers.fog, tile, &window));
    }
    if props.feedback_pending() {
        let table = match actor {
            Actor::Priest => &tiles::POUNCE_MARKER,
            Actor::Monster => &tiles::ECHO_MARKER,
        };
        plan_layers.push(layer_tiles(table, &layers.feedback, tile, &window));
    }
    plan_layers.retain(|layer| !layer.tiles.is_empty());

    let scale = props.zoom.sprite_scale(tile);
    let sprite_origin = state.sprite().position(now_ms);
    let sprite = SpriteDraw {
        image: state.sprite().image(),
        origin: sprite_origin,
        scale,
        bounds: sprite_bounds(sprite_origin, tile),
    };
    let opponent = props.opponent_visible.then(|| {
        let origin = opponent_anchor(actor.opponent(), props.opponent_cell(), tile, level);
        SpriteDraw {
            image: sprite_image(actor.opponent(), Facing::Idle),
            origin,
            scale,
            bounds: sprite_bounds(origin, tile),
        }
    });

    let player = cell_to_pixel(props.acting_cell(), tile).to_point();
    let controls = if panel.controls_visible && level == ZoomLevel::In {
        match actor {
            Actor::Priest => priest_controls(player, tile, level),
            Actor::Monster => monster_controls(player, tile, level),
        }
    } else {
        Vec::new()
    };
    let target_picker = if panel.target_picker_visible {
        target_picker(player, tile, level)
    } else {
        Vec::new()
    };

    RenderPlan {
        offset,
        tile,
        board_pixels: tile.board_pixels(),
        layers: plan_layers,
        sprite,
        opponent,
        controls,
        target_picker,
        center_button: center_button(screen, props.zoom.zoomed_in),
        bar: BarModel::from_props(props),
        bar_frame: bar_frame(screen),
    }
}

/// Resolves one layer's codes to tile draws, skipping cells outside `window`.
pub fn layer_tiles(table: &TileTable, codes: &[u8], tile: TileSize, window: &Rect) -> LayerPlan {
    let size = tile.as_f32();
    let tiles = CellIndex::all()
        .zip(codes)
        .filter(|(_, code)| **code != 0)
        .filter_map(|(cell, code)| {
            let origin = cell_to_pixel(cell, tile).to_point();
            if !Rect::new(origin.x, origin.y, size, size).intersects(window) {
                return None;
            }
            table.select(*code).map(|image| TileDraw { cell, origin, image })
        })
        .collect();
    LayerPlan { layer: table.layer, tiles }
}

fn sprite_bounds(origin: Point, tile: TileSize) -> Rect {
    let size = tile.as_f32();
    Rect::new(origin.x, origin.y, size, size * 2.0)
}

/// Where the opponent's idle sprite is drawn when it is visible.
pub fn opponent_anchor(opponent: Actor, cell: CellIndex, tile: TileSize, level: ZoomLevel) -> Point {
    let origin = cell_to_pixel(cell, tile).to_point();
    let size = tile.as_f32();
    match (level, opponent) {
        (ZoomLevel::In, _) => Point::new(origin.x, origin.y - 3.75 * size),
        (ZoomLevel::Out, Actor::Monster) => Point::new(origin.x - 0.5 * size, origin.y - 7.75 * size),
        (ZoomLevel::Out, Actor::Priest) => Point::new(origin.x - 0.8 * size, origin.y - 7.75 * size),
    }
}

/// Top-left of the priest's 3x3 echo pad. It flips to the left of the sprite
/// in the last five columns.
pub fn priest_controls_origin(player: Point, tile: TileSize, level: ZoomLevel) -> Point {
    let size = tile.as_f32();
    let x = if player.x < (BOARD_COLUMNS - 5) as f32 * size {
        player.x + size
    } else {
        player.x - 3.0 * size
    };
    let rows_up = match level {
        ZoomLevel::In => 5.0,
        ZoomLevel::Out => 8.0,
    };
    Point::new(x, player.y - rows_up * size)
}

/// Top-left of the monster's one-row strip, shared by the focus button and the target picker.
pub fn monster_controls_origin(player: Point, tile: TileSize, level: ZoomLevel) -> Point {
    let size = tile.as_f32();
    let rows_up = match level {
        ZoomLevel::In => 4.0,
        ZoomLevel::Out => 6.0,
    };
    Point::new(player.x - size, player.y - rows_up * size)
}

fn button(action: ControlAction, image: &'static str, x: f32, y: f32, size: f32) -> ButtonDraw {
    ButtonDraw { action, image, rect: Rect::new(x, y, size, size) }
}

fn priest_controls(player: Point, tile: TileSize, level: ZoomLevel) -> Vec<ButtonDraw> {
    let size = tile.as_f32();
    let Point { x, y } = priest_controls_origin(player, tile, level);
    let echo = |direction| ControlAction::Echo(direction);
    vec![
        button(echo(Direction::North), "echo-north", x + size, y, size),
        button(echo(Direction::West), "echo-west", x, y + size, size),
        button(echo(Direction::Radius), "echo-burst", x + size, y + size, size),
        button(echo(Direction::East), "echo-east", x + 2.0 * size, y + size, size),
        button(echo(Direction::South), "echo-south", x + size, y + 2.0 * size, size),
    ]
}

fn monster_controls(player: Point, tile: TileSize, level: ZoomLevel) -> Vec<ButtonDraw> {
    let Point { x, y } = monster_controls_origin(player, tile, level);
    vec![button(ControlAction::PickTarget, "focus", x, y, tile.as_f32())]
}

fn target_picker(player: Point, tile: TileSize, level: ZoomLevel) -> Vec<ButtonDraw> {
    let size = tile.as_f32();
    let Point { x, y } = monster_controls_origin(player, tile, level);
    vec![
        button(ControlAction::TargetPicked(FocusTarget::Human), "target-priest", x, y, size),
        button(ControlAction::TargetPicked(FocusTarget::Shrine), "target-shrine", x + 2.0 * size, y, size),
    ]
}

fn center_button(screen: ScreenSize, zoomed_in: TileSize) -> Rect {
    let size = zoomed_in.as_f32();
    Rect::new(screen.width - CENTER_BUTTON_MARGIN - size, CENTER_BUTTON_MARGIN, size, size)
}
