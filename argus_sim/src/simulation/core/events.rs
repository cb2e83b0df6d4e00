// argus_sim/src/simulation/core/events.rs

use bevy::prelude::Event;
use std::path::PathBuf;

/// "Recompute the scan now." Fired by the Space key and by the optional
/// continuous-scan timer; multiple requests in one frame coalesce into a
/// single sweep.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ScanRequested;

/// "Snapshot the current point cloud to disk." A `None` path means the next
/// numbered file in the scan output directory.
#[derive(Event, Debug, Clone, Default)]
pub struct SaveRequested {
    pub path: Option<PathBuf>,
}
