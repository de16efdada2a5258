pub mod anim;
pub mod bar;
pub mod board;
pub mod command;
pub mod compose;
pub mod config;
pub mod controls;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod grid;
pub mod motion;
pub mod props;
pub mod runtime;
pub mod tiles;
pub mod trace_file;
pub mod viewport;

#[cfg(test)]
mod test_support;

pub use board::{Actor, BoardLayers, BoardSnapshot, Cell};
pub use command::{BarItem, Command, Direction, FocusTarget, ViewHost};
pub use compose::{RenderPlan, compose};
pub use config::{ScreenSize, ViewConfig};
pub use controls::ControlAction;
pub use engine::{Transition, ViewEvent, ViewState};
pub use error::{ViewError, ViewResult};
pub use gesture::{TouchEvent, TouchSample};
pub use grid::{CellIndex, Point, Rect, TileSize};
pub use props::{Counters, FeedbackFlags, ViewProps, ZoomLevel, ZoomLevels};
pub use runtime::{ReplayResult, ViewRuntime, ViewTrace, replay};
