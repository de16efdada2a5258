//! Flexbox layout of the bottom bar's sections and buttons.

use possession_core::bar::{BAR_SECTION_HEIGHT, BarModel};
use possession_core::command::BarItem;
use possession_core::grid::{Point, Rect};
use taffy::prelude::{
    AvailableSpace, Display, FlexDirection, NodeId, Size, Style, auto, length, percent,
};
use taffy::{TaffyResult, TaffyTree};

const BUTTON_MARGIN: f32 = 5.0;

pub struct BarLayoutNodes {
    root: NodeId,
    info: NodeId,
    sections: [NodeId; 3],
    menu: NodeId,
    end_turn_root: NodeId,
    end_turn: NodeId,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarLayout {
    /// Label and shrine count, heartbeat, sanity level; top to bottom.
    pub sections: [Rect; 3],
    pub menu: Rect,
    pub end_turn: Rect,
}

impl BarLayout {
    pub fn item_at(&self, point: Point, bar: &BarModel) -> Option<BarItem> {
        match bar {
            BarModel::EndTurn => self.end_turn.contains(point).then_some(BarItem::EndTurn),
            _ if bar.has_menu_button() && self.menu.contains(point) => Some(BarItem::Menu),
            _ => None,
        }
    }
}

pub fn setup_bar_layout(taffy: &mut TaffyTree<()>) -> TaffyResult<BarLayoutNodes> {
    let section = || Style {
        size: Size { width: auto(), height: length(BAR_SECTION_HEIGHT) },
        flex_shrink: 0.0,
        ..Default::default()
    };
    let sections =
        [taffy.new_leaf(section())?, taffy.new_leaf(section())?, taffy.new_leaf(section())?];
    let info = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            flex_grow: 1.0,
            ..Default::default()
        },
        &sections,
    )?;
    let menu = taffy.new_leaf(Style {
        size: Size { width: length(BAR_SECTION_HEIGHT), height: length(BAR_SECTION_HEIGHT) },
        flex_shrink: 0.0,
        ..Default::default()
    })?;
    let root = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            size: Size { width: percent(1.0), height: percent(1.0) },
            ..Default::default()
        },
        &[info, menu],
    )?;

    let end_turn = taffy.new_leaf(Style {
        flex_grow: 1.0,
        margin: taffy::Rect {
            left: length(BUTTON_MARGIN),
            right: length(BUTTON_MARGIN),
            top: length(BUTTON_MARGIN),
            bottom: length(BUTTON_MARGIN),
        },
        ..Default::default()
    })?;
    let end_turn_root = taffy.new_with_children(
        Style {
            display: Display::Flex,
            size: Size { width: percent(1.0), height: percent(1.0) },
            ..Default::default()
        },
        &[end_turn],
    )?;

    Ok(BarLayoutNodes { root, info, sections, menu, end_turn_root, end_turn })
}

pub fn compute_bar_layout(
    taffy: &mut TaffyTree<()>,
    nodes: &BarLayoutNodes,
    frame: Rect,
) -> TaffyResult<BarLayout> {
    let available_size = Size {
        width: AvailableSpace::Definite(frame.width),
        height: AvailableSpace::Definite(frame.height),
    };
    taffy.compute_layout(nodes.root, available_size)?;
    taffy.compute_layout(nodes.end_turn_root, available_size)?;

    let l_root = taffy.layout(nodes.root)?;
    let l_info = taffy.layout(nodes.info)?;
    let mut sections = [frame; 3];
    for (rect, node) in sections.iter_mut().zip(nodes.sections) {
        *rect = placed(frame, taffy.layout(node)?, &[l_root, l_info]);
    }
    let l_end_root = taffy.layout(nodes.end_turn_root)?;

    Ok(BarLayout {
        sections,
        menu: placed(frame, taffy.layout(nodes.menu)?, &[l_root]),
        end_turn: placed(frame, taffy.layout(nodes.end_turn)?, &[l_end_root]),
    })
}

/// One-shot layout for a fixed frame.
pub fn layout_bar(frame: Rect) -> TaffyResult<BarLayout> {
    let mut taffy = TaffyTree::new();
    let nodes = setup_bar_layout(&mut taffy)?;
    compute_bar_layout(&mut taffy, &nodes, frame)
}

fn placed(frame: Rect, layout: &taffy::Layout, parents: &[&taffy::Layout]) -> Rect {
    let mut x = frame.x + layout.location.x;
    let mut y = frame.y + layout.location.y;
    for parent in parents {
        x += parent.location.x;
        y += parent.location.y;
    }

    Rect::new(x, y, layout.size.width, layout.size.height)
}
