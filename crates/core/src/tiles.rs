//! Static code-to-asset tables for every map layer.
//! This module exists so each layer resolves a cell code with one indexed lookup.
//! It does not own texture loading; assets are named and the renderer resolves them.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileLayer {
    Terrain,
    Fog,
    Decoration,
    Cache,
    BlessedCache,
    DesecratedCache,
    Highlight,
    PounceMarker,
    EchoMarker,
}

/// Handle to one fixed tile graphic, named by its asset stem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileImage {
    pub asset: &'static str,
}

/// Codes start at 1; entry `n - 1` serves code `n`. A `None` entry is a known
/// code that intentionally draws nothing.
pub struct TileTable {
    pub layer: TileLayer,
    entries: &'static [Option<&'static str>],
}

impl TileTable {
    pub const fn new(layer: TileLayer, entries: &'static [Option<&'static str>]) -> Self {
        Self { layer, entries }
    }

    pub fn select(&self, code: u8) -> Option<TileImage> {
        if code == 0 {
            return None;
        }
        match self.entries.get(usize::from(code) - 1) {
            Some(entry) => entry.map(|asset| TileImage { asset }),
            None => {
                log::warn!("no {:?} tile for code {code}; drawing nothing", self.layer);
                None
            }
        }
    }

    /// Every asset the table can produce, for preloading.
    pub fn assets(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().filter_map(|entry| *entry)
    }
}

pub static TERRAIN: TileTable = TileTable::new(
    TileLayer::Terrain,
    &[
        Some("wall-t-nw"),
        Some("wall-t-n"),
        Some("wall-t-ne"),
        Some("wall-t-w"),
        Some("wall-t-e"),
        Some("wall-t-sw"),
        Some("wall-t-s"),
        Some("wall-t-se"),
        Some("wall-t-c"),
        Some("wall-f-nw-2"),
        Some("wall-f-n-1"),
        Some("wall-f-ne-2"),
        Some("wall-f-sw-2"),
        Some("wall-f-s-1"),
        Some("wall-f-se-2"),
        Some("wall-f-n-3"),
        Some("floor-nw"),
        Some("floor-n-1"),
        Some("floor-ne"),
        Some("floor-w-1"),
        Some("floor-e-1"),
        Some("floor-c-1"),
        Some("wall-t-n-s"),
        Some("wall-t-e-w"),
        Some("wall-t-n-s-e"),
        Some("wall-t-n-s-w"),
        Some("wall-t-n-e-w"),
        Some("wall-t-e-s-w"),
        Some("floor-n-2"),
        Some("floor-n-3"),
        Some("floor-w-2"),
        Some("floor-e-2"),
        Some("floor-c-5"),
        Some("floor-c-6"),
        Some("floor-c-7"),
        Some("floor-c-2"),
        Some("floor-c-3"),
        Some("floor-c-4"),
        Some("floor-c-8"),
        Some("floor-c-9"),
        Some("floor-e2n"),
        Some("floor-w2n"),
    ],
);

// Code 9 is full fog; the unrevealed terrain underneath is already blank.
pub static FOG: TileTable = TileTable::new(
    TileLayer::Fog,
    &[
        Some("fog-nw"),
        Some("fog-n"),
        Some("fog-ne"),
        Some("fog-e"),
        Some("fog-se"),
        Some("fog-s"),
        Some("fog-sw"),
        Some("fog-w"),
        None,
    ],
);

pub static DECORATION: TileTable = TileTable::new(
    TileLayer::Decoration,
    &[Some("decor-1"), Some("decor-2"), Some("decor-3"), Some("decor-4")],
);

pub static CACHE: TileTable = TileTable::new(TileLayer::Cache, &[Some("shrine")]);
pub static BLESSED_CACHE: TileTable =
    TileTable::new(TileLayer::BlessedCache, &[Some("shrine-blessed")]);
pub static DESECRATED_CACHE: TileTable =
    TileTable::new(TileLayer::DesecratedCache, &[Some("shrine-desecrated")]);
pub static HIGHLIGHT: TileTable = TileTable::new(TileLayer::Highlight, &[Some("highlight")]);
pub static POUNCE_MARKER: TileTable =
    TileTable::new(TileLayer::PounceMarker, &[Some("pounce-marker")]);
pub static ECHO_MARKER: TileTable = TileTable::new(TileLayer::EchoMarker, &[Some("echo-marker")]);

pub fn all_tables() -> [&'static TileTable; 9] {
    [
        &TERRAIN,
        &FOG,
        &DECORATION,
        &CACHE,
        &BLESSED_CACHE,
        &DESECRATED_CACHE,
        &HIGHLIGHT,
        &POUNCE_MARKER,
        &ECHO_MARKER,
    ]
}
