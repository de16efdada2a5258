//! JSON persistence for recorded view traces.

use std::fs;
use std::io;
use std::path::Path;

use crate::runtime::ViewTrace;

impl ViewTrace {
    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let trace: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewConfig;
    use crate::engine::ViewEvent;
    use crate::runtime::{ViewRuntime, replay};
    use crate::test_support::{cell, priest_props};
    use tempfile::tempdir;

    #[test]
    fn trace_atomic_write_and_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("traces").join("session.json");
        let mut runtime =
            ViewRuntime::mount(priest_props(cell(8, 9)), ViewConfig::default(), 0).expect("mount");
        runtime
            .dispatch(ViewEvent::Props { props: Box::new(priest_props(cell(8, 10))), now_ms: 50 })
            .expect("walk");
        runtime.dispatch(ViewEvent::Tick { now_ms: 5_000 }).expect("tick");

        runtime.trace().write_atomic(&path).expect("write");
        let loaded = ViewTrace::load(&path).expect("load");
        assert_eq!(&loaded, runtime.trace());
        assert!(!path.with_extension("json.tmp").exists());

        let result = replay(&loaded).expect("replay");
        assert_eq!(result.snapshot_hash, runtime.state().snapshot_hash());
    }

    #[test]
    fn malformed_trace_is_invalid_data() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "{\"format_version\": 1}").expect("write");
        let err = ViewTrace::load(&path).expect_err("missing fields");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
