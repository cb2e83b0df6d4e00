// argus_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::scan::{RayOracle, RendererSink};

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::cloud::{PointCloud, PointCloudEntry};
pub use crate::color::{ColorRamp, Rgba};
pub use crate::pattern::RayPattern;
pub use crate::pose::SensorPose;
pub use crate::scan::{OracleError, RayHit, ScanEngine, ScanSummary, UNKNOWN_LABEL};

// --- Persistence ---
pub use crate::io::{save_point_cloud, write_point_cloud, SaveError, SaveOutcome};
