use crate::extensions::path_ext::RunFile;
use crate::run_loader::test_run::TestRun;
use futures::stream::FuturesUnordered;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::task::JoinError;
use tokio::{fs, task};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReadDirStream;
use tracing::{debug, info, instrument, warn};

/// Reads every `*.{extension}` file of `directory` as a [`TestRun`], ordered by file name.
/// Files that cannot be read are logged and skipped, only an unreadable directory is an error.
#[instrument]
pub async fn load_test_runs_from(directory: &str, extension: &str) -> Result<Vec<TestRun>, LoaderError> {
    info!("📁 Loading test runs...");
    let paths = run_files(Path::new(directory), extension)
        .await
        .map_err(|e| LoaderError::Directory {
            source: e,
            directory: directory.to_owned(),
        })?;

    let mut loaded = read_runs(paths).await;
    loaded.sort_by(|(left, _), (right, _)| left.cmp(right));

    let mut runs = Vec::with_capacity(loaded.len());
    let mut failed = 0;
    for (path, result) in loaded {
        match result {
            Ok(run) => {
                debug!(test_id = %run.test_case.test_id, "Loaded '{}'", path.display_name());
                runs.push(run);
            }
            Err(e) => {
                warn!("⚠️ Failed to load '{}': {}", path.display_name(), e);
                failed += 1;
            }
        }
    }

    info!("📁 Loading test runs... OK, {} loaded, {} failed", runs.len(), failed);
    Ok(runs)
}

async fn run_files(directory: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut entries = ReadDirStream::new(fs::read_dir(directory).await?);
    let mut paths = Vec::new();

    while let Some(entry) = entries.next().await {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                warn!("⚠️ Skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        if path.is_file() && path.has_run_extension(extension) {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

// Completion order is arbitrary, every result keeps the path it came from.
async fn read_runs(paths: Vec<PathBuf>) -> Vec<(PathBuf, Result<TestRun, RunFileError>)> {
    paths
        .into_iter()
        .map(|path| async move {
            let result = read_run(&path).await;
            (path, result)
        })
        .collect::<FuturesUnordered<_>>()
        .collect()
        .await
}

async fn read_run(path: &Path) -> Result<TestRun, RunFileError> {
    let content = fs::read_to_string(path).await?;
    let run = task::spawn_blocking(move || serde_json::from_str::<TestRun>(&content)).await??;
    Ok(run)
}

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("unable to list '{directory}': {source}")]
    Directory { source: io::Error, directory: String },
}

#[derive(Error, Debug)]
pub enum RunFileError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("not a test run: {0}")]
    Deserialization(#[from] serde_json::Error),
    #[error(transparent)]
    Join(#[from] JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;
    use test_log::test;

    fn resource(name: &str) -> PathBuf {
        PathBuf::from(format!("{}/tests/resources/runs/{}", env!("CARGO_MANIFEST_DIR"), name))
    }

    #[tokio::test]
    async fn run_files_lists_matching_files_in_order() -> io::Result<()> {
        let directory = temp_dir().join("compliance_harness_run_files");
        fs::create_dir_all(directory.join("nested.json")).await?;
        fs::write(directory.join("b.json"), "{}").await?;
        fs::write(directory.join("notes.txt"), "text").await?;
        fs::write(directory.join("a.json"), "{}").await?;

        let paths = run_files(&directory, "json").await?;

        assert_eq!(paths, vec![directory.join("a.json"), directory.join("b.json")]);
        Ok(())
    }

    #[test(tokio::test)]
    async fn read_run_reads_a_recorded_run() -> Result<(), RunFileError> {
        let run = read_run(&resource("device_info_run.json")).await?;

        assert_eq!(run.test_case.test_id, "SBI1010");
        assert!(run.method_request.is_some());
        assert_eq!(run.previous_hash, None);
        Ok(())
    }

    #[test(tokio::test)]
    async fn read_run_rejects_a_run_without_test_case() {
        let result = read_run(&resource("invalid/missing_test_case.json")).await;

        assert!(matches!(result, Err(RunFileError::Deserialization(_))));
    }

    #[test(tokio::test)]
    async fn load_test_runs_from_skips_files_that_fail() -> Result<(), LoaderError> {
        let directory = temp_dir().join("compliance_harness_load_runs");
        let setup = async {
            fs::create_dir_all(&directory).await?;
            fs::write(directory.join("valid.json"), include_str!("../../tests/resources/runs/device_info_run.json")).await?;
            fs::write(directory.join("broken.json"), "{").await
        };
        setup.await.map_err(|e| LoaderError::Directory {
            source: e,
            directory: directory.to_string_lossy().into_owned(),
        })?;

        let runs = load_test_runs_from(directory.to_string_lossy().as_ref(), "json").await?;

        assert_eq!(runs.len(), 1);
        Ok(())
    }

    #[test(tokio::test)]
    async fn load_test_runs_from_fails_for_a_missing_directory() {
        let result = load_test_runs_from("/definitely/not/a/runs/directory", "json").await;

        assert!(matches!(result, Err(LoaderError::Directory { .. })));
    }
}
