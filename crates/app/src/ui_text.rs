//! Text shown in the bottom bar.

use possession_core::bar::BarModel;

pub const END_TURN_LABEL: &str = "End Turn";
pub const WAITING_LABEL: &str = "Waiting for opponent";

/// One line per bar section, top to bottom.
pub fn bar_lines(bar: &BarModel) -> Vec<String> {
    match bar {
        BarModel::Playing {
            label,
            shrines,
            shrines_to_win,
            heart_beat_ticks_per_frame,
            sanity_level,
        } => vec![
            format!("{label}  shrines {shrines}/{shrines_to_win}"),
            format!("Heartbeat every {heart_beat_ticks_per_frame} ticks"),
            format!("Possessed priest's sanity level: {sanity_level}"),
        ],
        BarModel::EndTurn => vec![END_TURN_LABEL.to_string()],
        BarModel::WaitingForOpponent => vec![WAITING_LABEL.to_string()],
    }
}
