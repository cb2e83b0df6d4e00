// argus_core/src/io.rs

use crate::cloud::PointCloud;
use crate::pose::SensorPose;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What a save request came to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The file was rewritten with this many points.
    Written { points: usize },
    /// The cloud was empty; no file was created or touched.
    NothingToSave,
}

/// A failed save. Non-fatal: the cloud is untouched and the request can be
/// retried, against the same path or another.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("could not write point cloud to '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Writes `cloud` to `out` in the scan text format.
///
/// Two `#` header lines carry the pose at snapshot time (position as three
/// floats, then `yaw <y> pitch <p>`), followed by one `<x> <y> <z> <label>`
/// line per point in sweep order. Floats use fixed six-decimal form.
/// Consumers key on the four-token shape of the point rows rather than the
/// `#` prefix, so no header line may split into exactly four tokens. Labels
/// are written as-is: a label containing whitespace would break the
/// four-column layout, so producers keep them single tokens.
pub fn write_point_cloud<W: Write>(
    out: &mut W,
    cloud: &PointCloud,
    pose: &SensorPose,
) -> io::Result<()> {
    writeln!(
        out,
        "# position {:.6} {:.6} {:.6}",
        pose.position.x, pose.position.y, pose.position.z
    )?;
    writeln!(
        out,
        "# orientation yaw {:.6} pitch {:.6}",
        pose.yaw,
        pose.pitch()
    )?;

    for entry in cloud.iter() {
        writeln!(
            out,
            "{:.6} {:.6} {:.6} {}",
            entry.position.x, entry.position.y, entry.position.z, entry.label
        )?;
    }
    Ok(())
}

/// Saves `cloud` to `path`, rewriting the file from scratch.
///
/// An empty cloud is reported as [`SaveOutcome::NothingToSave`] and touches
/// no file at all. The file handle is opened, written, flushed, and closed
/// within this call on every path out of it.
pub fn save_point_cloud(
    path: &Path,
    cloud: &PointCloud,
    pose: &SensorPose,
) -> Result<SaveOutcome, SaveError> {
    if cloud.is_empty() {
        return Ok(SaveOutcome::NothingToSave);
    }

    let write_all = |path: &Path| -> io::Result<()> {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        write_point_cloud(&mut out, cloud, pose)?;
        out.flush()
    };

    match write_all(path) {
        Ok(()) => Ok(SaveOutcome::Written {
            points: cloud.len(),
        }),
        Err(source) => Err(SaveError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::PointCloudEntry;
    use approx::assert_abs_diff_eq;
    use nalgebra::Point3;
    use std::path::PathBuf;

    fn sample_cloud() -> PointCloud {
        let mut cloud = PointCloud::new();
        cloud.push(PointCloudEntry::new(
            Point3::new(1.0, 2.5, -3.25),
            "wall_north",
        ));
        cloud.push(PointCloudEntry::new(
            Point3::new(-0.125, 0.0, 10.0),
            "ground",
        ));
        cloud.push(PointCloudEntry::new(
            Point3::new(4.75, 1.5, 0.5),
            "Unknown",
        ));
        cloud
    }

    fn sample_pose() -> SensorPose {
        SensorPose::new(Point3::new(0.5, 1.8, -2.0), 1.25, 0.4)
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("argus_io_{}_{}", std::process::id(), name))
    }

    #[test]
    fn header_then_one_line_per_point() {
        let mut buffer = Vec::new();
        write_point_cloud(&mut buffer, &sample_cloud(), &sample_pose()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("# position "));
        assert!(lines[1].starts_with("# orientation "));
        assert_eq!(lines[2], "1.000000 2.500000 -3.250000 wall_north");
        assert_eq!(lines[3], "-0.125000 0.000000 10.000000 ground");
        assert_eq!(lines[4], "4.750000 1.500000 0.500000 Unknown");
    }

    #[test]
    fn written_text_parses_back() {
        let cloud = sample_cloud();
        let pose = sample_pose();
        let mut buffer = Vec::new();
        write_point_cloud(&mut buffer, &cloud, &pose).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        // Column-count readers take every four-token line as a point, headers
        // included, so exactly the point rows may have that shape.
        let mut parsed = Vec::new();
        for line in text.lines() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 4 {
                continue;
            }
            let x: f64 = fields[0].parse().unwrap();
            let y: f64 = fields[1].parse().unwrap();
            let z: f64 = fields[2].parse().unwrap();
            parsed.push((Point3::new(x, y, z), fields[3].to_string()));
        }

        assert_eq!(parsed.len(), cloud.len());
        for (entry, (position, label)) in cloud.iter().zip(&parsed) {
            assert_abs_diff_eq!(entry.position.x, position.x, epsilon = 1e-6);
            assert_abs_diff_eq!(entry.position.y, position.y, epsilon = 1e-6);
            assert_abs_diff_eq!(entry.position.z, position.z, epsilon = 1e-6);
            assert_eq!(&entry.label, label);
        }
    }

    #[test]
    fn orientation_header_carries_yaw_then_pitch() {
        let mut buffer = Vec::new();
        write_point_cloud(&mut buffer, &PointCloud::new(), &sample_pose()).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let orientation = text
            .lines()
            .find(|l| l.starts_with("# orientation "))
            .unwrap();
        let fields: Vec<&str> = orientation.split_whitespace().collect();
        // "#", "orientation", "yaw", <yaw>, "pitch", <pitch>
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[2], "yaw");
        assert_eq!(fields[4], "pitch");
        let yaw: f64 = fields[3].parse().unwrap();
        let pitch: f64 = fields[5].parse().unwrap();
        assert_abs_diff_eq!(yaw, 1.25, epsilon = 1e-6);
        assert_abs_diff_eq!(pitch, 0.4, epsilon = 1e-6);
    }

    #[test]
    fn saving_an_empty_cloud_touches_no_file() {
        let path = scratch_path("empty.txt");
        let _ = std::fs::remove_file(&path);

        let outcome = save_point_cloud(&path, &PointCloud::new(), &sample_pose()).unwrap();

        assert_eq!(outcome, SaveOutcome::NothingToSave);
        assert!(!path.exists());
    }

    #[test]
    fn empty_save_leaves_an_existing_file_alone() {
        let path = scratch_path("keep.txt");
        std::fs::write(&path, "previous capture\n").unwrap();

        let outcome = save_point_cloud(&path, &PointCloud::new(), &sample_pose()).unwrap();

        assert_eq!(outcome, SaveOutcome::NothingToSave);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "previous capture\n"
        );

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn saving_writes_and_reports_the_point_count() {
        let path = scratch_path("written.txt");
        let cloud = sample_cloud();

        let outcome = save_point_cloud(&path, &cloud, &sample_pose()).unwrap();
        assert_eq!(outcome, SaveOutcome::Written { points: 3 });

        let text = std::fs::read_to_string(&path).unwrap();
        let data_lines = text.lines().filter(|l| !l.starts_with('#')).count();
        assert_eq!(data_lines, 3);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn saving_overwrites_rather_than_appends() {
        let path = scratch_path("overwrite.txt");
        let cloud = sample_cloud();

        save_point_cloud(&path, &cloud, &sample_pose()).unwrap();
        save_point_cloud(&path, &cloud, &sample_pose()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 5);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn unwritable_destination_names_the_path() {
        let path = scratch_path("no_such_dir").join("scan.txt");

        let error = save_point_cloud(&path, &sample_cloud(), &sample_pose()).unwrap_err();
        let SaveError::Io {
            path: reported,
            source: _,
        } = error;
        assert_eq!(reported, path);
    }
}
