// argus_core/src/cloud.rs

use nalgebra::Point3;

/// One scanned point: where a ray struck, and what it struck.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloudEntry {
    /// Hit position in world space.
    pub position: Point3<f64>,
    /// The surface's label, already resolved (unnameable surfaces carry the
    /// `"Unknown"` sentinel by the time they land here).
    pub label: String,
}

impl PointCloudEntry {
    pub fn new(position: Point3<f64>, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}

/// The hit buffer of the latest scan.
///
/// Entries appear in sweep order (vertical-major slots) and only for rays
/// that hit; misses leave no entry. The buffer belongs to the scan engine,
/// which clears and rebuilds it on every sweep. Scans never merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    points: Vec<PointCloudEntry>,
}

impl PointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn push(&mut self, entry: PointCloudEntry) {
        self.points.push(entry);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PointCloudEntry> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a PointCloudEntry;
    type IntoIter = std::slice::Iter<'a, PointCloudEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
