//! Bottom bar content derived from props.

use crate::board::Actor;
use crate::config::ScreenSize;
use crate::grid::Rect;
use crate::props::ViewProps;

pub const BAR_SECTION_HEIGHT: f32 = 40.0;
pub const BAR_HEIGHT: f32 = BAR_SECTION_HEIGHT * 3.0;
pub const BAR_INSET: f32 = 5.0;

#[derive(Clone, Debug, PartialEq)]
pub enum BarModel {
    Playing {
        label: &'static str,
        shrines: u32,
        shrines_to_win: u32,
        heart_beat_ticks_per_frame: u32,
        sanity_level: u32,
    },
    EndTurn,
    WaitingForOpponent,
}

impl BarModel {
    pub fn from_props(props: &ViewProps) -> Self {
        if !props.bar_active {
            return BarModel::WaitingForOpponent;
        }
        if props.out_of_moves {
            return BarModel::EndTurn;
        }
        let counters = &props.counters;
        let (label, shrines_to_win) = match props.actor() {
            Actor::Priest => ("Priest", counters.human_shrines_to_win),
            Actor::Monster => ("Evil", counters.monster_shrines_to_win),
        };
        BarModel::Playing {
            label,
            shrines: counters.shrine_amount,
            shrines_to_win,
            heart_beat_ticks_per_frame: counters.heart_beat_timer,
            sanity_level: counters.monster_sanity_level,
        }
    }

    /// The menu button shows everywhere except on the end-turn bar.
    pub fn has_menu_button(&self) -> bool {
        !matches!(self, BarModel::EndTurn)
    }
}

pub fn bar_frame(screen: ScreenSize) -> Rect {
    Rect::new(
        BAR_INSET,
        screen.height - BAR_INSET - BAR_HEIGHT,
        (screen.width - 2.0 * BAR_INSET).max(0.0),
        BAR_HEIGHT,
    )
}
