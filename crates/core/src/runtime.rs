//! Thin scheduler over `ViewState::apply` that records every accepted event.
//! This module exists to give hosts one entry point and a replayable trace.
//! It does not own file persistence; see `trace_file`.

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::config::ViewConfig;
use crate::engine::{ViewEvent, ViewState};
use crate::error::ViewResult;
use crate::props::ViewProps;

pub const TRACE_FORMAT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MountRecord {
    pub props: ViewProps,
    pub now_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTrace {
    pub format_version: u32,
    pub config: ViewConfig,
    pub mount: MountRecord,
    pub events: Vec<ViewEvent>,
}

#[derive(Debug)]
pub struct ViewRuntime {
    state: ViewState,
    trace: ViewTrace,
}

impl ViewRuntime {
    pub fn mount(props: ViewProps, config: ViewConfig, now_ms: u64) -> ViewResult<Self> {
        let state = ViewState::mount(props.clone(), config.clone(), now_ms)?;
        let trace = ViewTrace {
            format_version: TRACE_FORMAT_VERSION,
            config,
            mount: MountRecord { props, now_ms },
            events: Vec::new(),
        };
        Ok(Self { state, trace })
    }

    /// Advances animations to the event's time, then applies the event.
    /// A rejected event leaves both the state and the trace unchanged.
    pub fn dispatch(&mut self, event: ViewEvent) -> ViewResult<Vec<Command>> {
        let mut commands = Vec::new();
        let mut state = self.state.clone();
        if !matches!(event, ViewEvent::Tick { .. }) {
            let ticked = state.apply(&ViewEvent::Tick { now_ms: event.now_ms() })?;
            commands.extend(ticked.commands);
            state = ticked.state;
        }
        let applied = state.apply(&event)?;
        commands.extend(applied.commands);
        self.state = applied.state;
        self.trace.events.push(event);
        Ok(commands)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn trace(&self) -> &ViewTrace {
        &self.trace
    }

    pub fn into_trace(self) -> ViewTrace {
        self.trace
    }
}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    pub commands: Vec<Command>,
    pub snapshot_hash: u64,
    pub events_applied: usize,
}

pub fn replay(trace: &ViewTrace) -> ViewResult<ReplayResult> {
    let mut runtime =
        ViewRuntime::mount(trace.mount.props.clone(), trace.config.clone(), trace.mount.now_ms)?;
    let mut commands = Vec::new();
    for event in &trace.events {
        commands.extend(runtime.dispatch(event.clone())?);
    }
    Ok(ReplayResult {
        commands,
        snapshot_hash: runtime.state().snapshot_hash(),
        events_applied: trace.events.len(),
    })
}
