mod loader;
mod test_run;

pub use loader::{LoaderError, RunFileError, load_test_runs_from};
pub use test_run::TestRun;
