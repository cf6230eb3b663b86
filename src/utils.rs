use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;
use crate::constants::{CSV_EXTENSION, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

pub fn setup_logging(verbosity: &str) -> Result<()> {
    let level = match verbosity {
        "silent" => "error",
        "verbose" => "debug",
        _ => "info",
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("cutoff_sift={}", level).parse()?);

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// All `*.csv` files below `directory`, sorted by path so batch order is stable.
pub fn discover_csv_files<P: AsRef<Path>>(directory: P) -> Result<Vec<PathBuf>> {
    let mut csv_files = Vec::new();

    for entry in WalkDir::new(directory).follow_links(false) {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() {
            if let Some(extension) = path.extension() {
                if extension.to_string_lossy().to_lowercase() == CSV_EXTENSION {
                    csv_files.push(path.to_path_buf());
                }
            }
        }
    }

    csv_files.sort();
    Ok(csv_files)
}

pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(42)), "00:00:42");
        assert_eq!(format_duration(Duration::from_secs(3725)), "01:02:05");
    }

    #[test]
    fn test_discover_csv_files_sorted_and_filtered() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("2024");
        fs::create_dir_all(&nested).unwrap();

        fs::write(temp_dir.path().join("round2.csv"), "x").unwrap();
        fs::write(temp_dir.path().join("round1.CSV"), "x").unwrap();
        fs::write(nested.join("round3.csv"), "x").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "x").unwrap();

        let files = discover_csv_files(temp_dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|path| path.strip_prefix(temp_dir.path()).unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names.len(), 3);
        assert!(names[0].starts_with("2024"));
        assert_eq!(names[1], "round1.CSV");
        assert_eq!(names[2], "round2.csv");
    }
}
