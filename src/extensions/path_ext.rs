use std::path::Path;

pub trait RunFile {
    /// The file name for log lines, `unknown` when there is none.
    fn display_name(&self) -> &str;

    fn has_run_extension(&self, extension: &str) -> bool;
}

impl RunFile for Path {
    fn display_name(&self) -> &str {
        self.file_name().and_then(|s| s.to_str()).unwrap_or("unknown")
    }

    fn has_run_extension(&self, extension: &str) -> bool {
        self.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case(extension))
    }
}
