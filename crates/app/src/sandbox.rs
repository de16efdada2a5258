//! A small stand-in for the rules engine so the view can be played locally.
//! This module exists to answer view commands with fresh props the way a real
//! parent would. It does not try to be the real game: no AI, no win screen.

use std::mem;

use possession_core::board::{Actor, BoardSnapshot};
use possession_core::command::{BarItem, Direction, FocusTarget, ViewHost};
use possession_core::error::ViewResult;
use possession_core::grid::{BOARD_COLUMNS, BOARD_ROWS, CellIndex, TileSize};
use possession_core::props::{Counters, FeedbackFlags, ViewProps, ZoomLevels};

pub const ZOOMED_IN_TILE: u32 = 64;
pub const ZOOMED_OUT_TILE: u32 = 25;
pub const MOVES_PER_TURN: u32 = 3;
pub const SHRINES_TO_WIN: u32 = 3;

const WALL_CODE: u8 = 9;
const FLOOR_CODES: [u8; 4] = [22, 36, 37, 38];
const FULL_FOG_CODE: u8 = 9;
const SIGHT_RADIUS: u32 = 2;
const ECHO_RADIUS: u32 = 5;
const SHRINE_CELLS: [(u32, u32); 5] = [(6, 6), (33, 6), (20, 20), (6, 33), (33, 33)];

pub struct Sandbox {
    board: BoardSnapshot,
    human_cell: CellIndex,
    monster_cell: CellIndex,
    is_human: bool,
    zoom: ZoomLevels,
    tile_size: TileSize,
    moves_made: u32,
    opponent_visible: bool,
    feedback: FeedbackFlags,
    turn_counter: u32,
    blessed: u32,
    desecrated: u32,
    changed: bool,
}

fn chebyshev(a: CellIndex, b: CellIndex) -> u32 {
    a.column().abs_diff(b.column()).max(a.row().abs_diff(b.row()))
}

fn is_border(cell: CellIndex) -> bool {
    cell.column() == 0
        || cell.row() == 0
        || cell.column() == BOARD_COLUMNS - 1
        || cell.row() == BOARD_ROWS - 1
}

fn neighbours(cell: CellIndex) -> impl Iterator<Item = CellIndex> {
    let (column, row) = (cell.column() as i64, cell.row() as i64);
    [(0, -1), (0, 1), (-1, 0), (1, 0)].into_iter().filter_map(move |(dx, dy)| {
        let (c, r) = (column + dx, row + dy);
        if c < 0 || r < 0 {
            return None;
        }
        CellIndex::from_column_row(c as u32, r as u32).ok()
    })
}

impl Sandbox {
    pub fn new() -> ViewResult<Self> {
        let mut board = BoardSnapshot::blank();
        for index in CellIndex::all() {
            let cell = board.cell_mut(index);
            if is_border(index) {
                cell.image_key = WALL_CODE;
            } else {
                cell.image_key = FLOOR_CODES[(index.get() as usize * 7) % FLOOR_CODES.len()];
                if index.get() % 11 == 0 {
                    cell.image_decor_key = (index.get() % 4) as u8 + 1;
                }
            }
            cell.image_fog_key = FULL_FOG_CODE;
        }
        for (column, row) in SHRINE_CELLS {
            board.cell_mut(CellIndex::from_column_row(column, row)?).has_cache = true;
        }

        let zoom = ZoomLevels {
            zoomed_in: TileSize::new(ZOOMED_IN_TILE)?,
            zoomed_out: TileSize::new(ZOOMED_OUT_TILE)?,
        };
        let mut sandbox = Self {
            board,
            human_cell: CellIndex::from_column_row(3, 3)?,
            monster_cell: CellIndex::from_column_row(36, 36)?,
            is_human: true,
            tile_size: zoom.zoomed_in,
            zoom,
            moves_made: 0,
            opponent_visible: false,
            feedback: FeedbackFlags::default(),
            turn_counter: 0,
            blessed: 0,
            desecrated: 0,
            changed: false,
        };
        sandbox.reveal_around(sandbox.human_cell);
        Ok(sandbox)
    }

    pub fn actor(&self) -> Actor {
        Actor::from_is_human(self.is_human)
    }

    pub fn props(&self) -> ViewProps {
        let actor = self.actor();
        let (shrine_amount, opponent) = match actor {
            Actor::Priest => (self.blessed, self.monster_cell),
            Actor::Monster => (self.desecrated, self.human_cell),
        };
        let distance = chebyshev(self.acting_cell(), opponent);
        ViewProps {
            board: self.board.clone(),
            human_cell: self.human_cell,
            monster_cell: self.monster_cell,
            is_human: self.is_human,
            tile_size: self.tile_size,
            zoom: self.zoom,
            game_active: true,
            out_of_moves: self.moves_made >= MOVES_PER_TURN,
            opponent_visible: self.opponent_visible,
            bar_active: true,
            feedback: self.feedback.clone(),
            counters: Counters {
                turn_counter: self.turn_counter,
                shrine_amount,
                shrines_unclaimed: self.unclaimed_shrines(),
                heart_beat_timer: distance.clamp(1, 20),
                human_shrines_to_win: SHRINES_TO_WIN,
                monster_shrines_to_win: SHRINES_TO_WIN,
                monster_sanity_level: 100u32.saturating_sub(self.desecrated * 20),
            },
        }
    }

    /// Returns whether any command changed the props since the last call.
    pub fn take_changed(&mut self) -> bool {
        mem::take(&mut self.changed)
    }

    fn acting_cell(&self) -> CellIndex {
        match self.actor() {
            Actor::Priest => self.human_cell,
            Actor::Monster => self.monster_cell,
        }
    }

    fn unclaimed_shrines(&self) -> u32 {
        self.board.cells().filter(|(_, cell)| cell.has_cache).count() as u32
    }

    fn reveal_around(&mut self, centre: CellIndex) {
        for index in CellIndex::all() {
            let distance = chebyshev(centre, index);
            let cell = self.board.cell_mut(index);
            if distance <= SIGHT_RADIUS {
                cell.is_revealed = true;
                cell.image_fog_key = 0;
            } else if distance == SIGHT_RADIUS + 1 && !cell.is_revealed {
                cell.is_semi_revealed = true;
            }
        }
    }

    fn clear_highlights(&mut self) {
        for index in CellIndex::all() {
            self.board.cell_mut(index).is_highlighted = false;
        }
    }

    fn claim_shrine(&mut self, at: CellIndex) {
        let actor = self.actor();
        let cell = self.board.cell_mut(at);
        if !cell.has_cache {
            return;
        }
        cell.has_cache = false;
        match actor {
            Actor::Priest => {
                cell.has_blessed_cache = true;
                self.blessed += 1;
            }
            Actor::Monster => {
                cell.has_desecrated_cache = true;
                self.desecrated += 1;
            }
        }
        log::info!("{actor:?} claimed the shrine at cell {}", at.get());
    }

    fn echo_hits(&self, direction: Direction) -> bool {
        let (from, to) = (self.human_cell, self.monster_cell);
        let same_column = from.column() == to.column();
        let same_row = from.row() == to.row();
        match direction {
            Direction::North => same_column && to.row() < from.row(),
            Direction::South => same_column && to.row() > from.row(),
            Direction::East => same_row && to.column() > from.column(),
            Direction::West => same_row && to.column() < from.column(),
            Direction::Radius => chebyshev(from, to) <= ECHO_RADIUS,
        }
    }

    fn show_moves(&mut self) {
        let from = self.acting_cell();
        for index in neighbours(from).filter(|cell| !is_border(*cell)) {
            self.board.cell_mut(index).is_highlighted = true;
        }
        self.changed = true;
    }
}

impl ViewHost for Sandbox {
    fn move_to(&mut self, cell: CellIndex) {
        log::debug!("{:?} moves to cell {}", self.actor(), cell.get());
        self.clear_highlights();
        match self.actor() {
            Actor::Priest => {
                self.human_cell = cell;
                self.reveal_around(cell);
            }
            Actor::Monster => {
                self.monster_cell = cell;
                if chebyshev(cell, self.human_cell) <= 1 {
                    self.board.cell_mut(self.human_cell).was_pounced = true;
                    self.feedback.human_feedback = true;
                    self.feedback.highlight_feedback = true;
                    self.feedback.feedback_cell = Some(self.human_cell);
                }
            }
        }
        self.claim_shrine(cell);
        self.moves_made += 1;
        self.changed = true;
    }

    fn increment_turn_counter(&mut self) {
        self.turn_counter += 1;
        self.changed = true;
    }

    fn echolocate(&mut self, direction: Direction) {
        if self.echo_hits(direction) {
            log::info!("echo {direction:?} found the monster");
            self.board.cell_mut(self.monster_cell).was_echoed = true;
            self.feedback.monster_feedback = true;
            self.feedback.highlight_feedback = true;
            self.feedback.feedback_cell = Some(self.monster_cell);
            self.opponent_visible = true;
        }
        self.moves_made += 1;
        self.changed = true;
    }

    fn focus(&mut self, target: FocusTarget) {
        match target {
            FocusTarget::Human => self.opponent_visible = true,
            FocusTarget::Shrine => log::info!("{} shrines left unclaimed", self.unclaimed_shrines()),
        }
        self.moves_made += 1;
        self.changed = true;
    }

    fn alter_zoom(&mut self) {
        self.tile_size = if self.tile_size == self.zoom.zoomed_in {
            self.zoom.zoomed_out
        } else {
            self.zoom.zoomed_in
        };
        self.changed = true;
    }

    fn reset_highlighted(&mut self) {
        self.clear_highlights();
        self.changed = true;
    }

    fn show_human_moves(&mut self) {
        if self.actor() == Actor::Priest {
            self.show_moves();
        }
    }

    fn show_monster_moves(&mut self) {
        if self.actor() == Actor::Monster {
            self.show_moves();
        }
    }

    fn feedback_presented(&mut self) {
        self.feedback.highlight_feedback = false;
        self.feedback.feedback_cell = None;
        self.changed = true;
    }

    fn item_selected(&mut self, item: BarItem) {
        match item {
            BarItem::Menu => log::info!("menu requested"),
            BarItem::EndTurn => {
                self.is_human = !self.is_human;
                log::info!("turn passes to the {:?}", self.actor());
                self.moves_made = 0;
                self.opponent_visible = false;
                self.clear_highlights();
                match self.actor() {
                    Actor::Priest => self.feedback.monster_feedback = false,
                    Actor::Monster => self.feedback.human_feedback = false,
                }
                self.changed = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use possession_core::command::Command;

    fn cell(column: u32, row: u32) -> CellIndex {
        CellIndex::from_column_row(column, row).expect("cell")
    }

    #[test]
    fn starts_as_priest_with_valid_props() {
        let sandbox = Sandbox::new().expect("sandbox");
        let props = sandbox.props();
        assert!(props.validate().is_ok());
        assert_eq!(props.acting_cell(), cell(3, 3));
        assert!(props.board.cell(cell(4, 4)).is_revealed);
        assert!(!props.board.cell(cell(20, 20)).is_revealed);
        assert_eq!(props.counters.shrines_unclaimed, 5);
    }

    #[test]
    fn show_moves_highlights_open_neighbours() {
        let mut sandbox = Sandbox::new().expect("sandbox");
        Command::ShowMoves(Actor::Priest).dispatch(&mut sandbox);
        assert!(sandbox.take_changed());
        let highlighted: Vec<CellIndex> = sandbox
            .props()
            .board
            .cells()
            .filter(|(_, c)| c.is_highlighted)
            .map(|(index, _)| index)
            .collect();
        assert_eq!(highlighted, vec![cell(3, 2), cell(2, 3), cell(4, 3), cell(3, 4)]);
        assert!(!sandbox.take_changed());
    }

    #[test]
    fn moves_run_out_and_end_turn_swaps_actor() {
        let mut sandbox = Sandbox::new().expect("sandbox");
        for step in 4..4 + MOVES_PER_TURN {
            Command::Move(cell(step, 3)).dispatch(&mut sandbox);
        }
        assert!(sandbox.props().out_of_moves);
        Command::ItemSelected(BarItem::EndTurn).dispatch(&mut sandbox);
        let props = sandbox.props();
        assert!(!props.is_human);
        assert!(!props.out_of_moves);
    }

    #[test]
    fn monster_pounce_flags_priest_feedback() {
        let mut sandbox = Sandbox::new().expect("sandbox");
        Command::ItemSelected(BarItem::EndTurn).dispatch(&mut sandbox);
        Command::Move(cell(4, 4)).dispatch(&mut sandbox);
        let feedback = sandbox.props().feedback;
        assert!(feedback.human_feedback);
        assert_eq!(feedback.feedback_cell, Some(cell(3, 3)));
        Command::FeedbackPresented.dispatch(&mut sandbox);
        assert!(!sandbox.props().feedback.highlight_feedback);
    }

    #[test]
    fn alter_zoom_toggles_tile_size() {
        let mut sandbox = Sandbox::new().expect("sandbox");
        Command::AlterZoom.dispatch(&mut sandbox);
        assert_eq!(sandbox.props().tile_size.get(), ZOOMED_OUT_TILE);
        Command::AlterZoom.dispatch(&mut sandbox);
        assert_eq!(sandbox.props().tile_size.get(), ZOOMED_IN_TILE);
    }

    #[test]
    fn walking_onto_a_shrine_blesses_it() {
        let mut sandbox = Sandbox::new().expect("sandbox");
        Command::Move(cell(6, 6)).dispatch(&mut sandbox);
        let props = sandbox.props();
        assert!(props.board.cell(cell(6, 6)).has_blessed_cache);
        assert_eq!(props.counters.shrine_amount, 1);
        assert_eq!(props.counters.shrines_unclaimed, 4);
    }
}
