//! Run descriptor produced by option resolution

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default sort key column
pub const DEFAULT_KEY_INDEX: i32 = 1;
/// Default number of synthetic records per rank in weak-scale mode
pub const DEFAULT_WEAK_SCALE_LENGTH: i32 = 1_000_000;
/// Default thread count for the threaded local sort
pub const DEFAULT_LOCAL_SORT_THREADS: i32 = 16;

/// Fully resolved parameters for one sort invocation.
///
/// Path fields are empty when the corresponding option was not given; the
/// collaborators that open the files decide whether that is an error. They
/// hold the argv bytes unchanged, so non UTF-8 names survive resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Source HDF5 file (`-f`)
    pub input_path: PathBuf,
    /// Destination file for the sorted records (`-o`)
    pub output_path: PathBuf,
    /// File that receives the generated sort table (`-a`)
    pub attribute_path: PathBuf,
    /// Group path of the target dataset inside the HDF5 container (`-g`)
    pub group_path: OsString,
    /// Column used as the sort key (`-k`)
    pub key_index: i32,
    /// Reorder only the key column, not whole records (`-e`)
    pub sort_key_only: bool,
    /// Per-rank record counts are non-uniform (`-s`)
    pub skew_data: bool,
    pub verbose: bool,
    /// Persist the sorted output; cleared by `-m`
    pub write_result: bool,
    /// Gather results onto fewer ranks before writing; cleared by `-c`
    pub collect_data: bool,
    /// Synthetic benchmarking mode (`-l`)
    pub weak_scale_test: bool,
    /// Records per rank; only meaningful with `weak_scale_test`
    pub weak_scale_length: i32,
    /// Multi-threaded intra-rank sort (`-t`)
    pub local_sort_threaded: bool,
    /// Threads for the local sort; only meaningful with `local_sort_threaded`
    pub local_sort_thread_count: i32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::new(),
            output_path: PathBuf::new(),
            attribute_path: PathBuf::new(),
            group_path: OsString::new(),
            key_index: DEFAULT_KEY_INDEX,
            sort_key_only: false,
            skew_data: false,
            verbose: false,
            write_result: true,
            collect_data: true,
            weak_scale_test: false,
            weak_scale_length: DEFAULT_WEAK_SCALE_LENGTH,
            local_sort_threaded: false,
            local_sort_thread_count: DEFAULT_LOCAL_SORT_THREADS,
        }
    }
}

impl RunConfig {
    /// Create a descriptor holding every default
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable weak-scale mode with the given per-rank length.
    /// The flag and its length are always written together.
    pub fn enable_weak_scale(&mut self, length: i32) {
        self.weak_scale_test = true;
        self.weak_scale_length = length;
    }

    /// Enable the threaded local sort with the given thread count.
    /// The flag and its count are always written together.
    pub fn enable_threaded_local_sort(&mut self, threads: i32) {
        self.local_sort_threaded = true;
        self.local_sort_thread_count = threads;
    }

    /// Per-rank synthetic length, if weak-scale mode is on
    pub fn weak_scale(&self) -> Option<i32> {
        self.weak_scale_test.then_some(self.weak_scale_length)
    }

    /// Local sort thread count, if the threaded local sort is on
    pub fn local_sort_threads(&self) -> Option<i32> {
        self.local_sort_threaded.then_some(self.local_sort_thread_count)
    }

    /// Advisory checks for values that downstream collaborators are likely to
    /// reject. Nothing here fails resolution.
    pub fn sanity_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.key_index < 0 {
            warnings.push(format!("key index {} is negative", self.key_index));
        }

        if let Some(threads) = self.local_sort_threads() {
            if threads <= 0 {
                warnings.push(format!("local sort thread count {threads} is not positive"));
            } else {
                let cpus = num_cpus::get();
                if threads as usize > cpus {
                    warnings.push(format!(
                        "local sort thread count {threads} exceeds the {cpus} logical CPUs available"
                    ));
                }
            }
        }

        match self.weak_scale() {
            Some(length) if length <= 0 => {
                warnings.push(format!("weak-scale length {length} is not positive"));
            }
            Some(_) => {}
            None if self.input_path.as_os_str().is_empty() => {
                warnings.push("no input file given (-f)".to_string());
            }
            None => {}
        }

        if self.write_result && self.output_path.as_os_str().is_empty() {
            warnings.push(
                "results will be written but no output file was given (-o)".to_string(),
            );
        }

        warnings
    }
}

fn or_unset(value: &Path) -> String {
    if value.as_os_str().is_empty() {
        "<unset>".to_string()
    } else {
        value.display().to_string()
    }
}

impl fmt::Display for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "input file:      {}", or_unset(&self.input_path))?;
        writeln!(f, "group path:      {}", or_unset(Path::new(&self.group_path)))?;
        writeln!(f, "output file:     {}", or_unset(&self.output_path))?;
        writeln!(f, "attribute file:  {}", or_unset(&self.attribute_path))?;
        writeln!(f, "key index:       {}", self.key_index)?;
        writeln!(f, "sort key only:   {}", self.sort_key_only)?;
        writeln!(f, "skewed data:     {}", self.skew_data)?;
        writeln!(f, "write result:    {}", self.write_result)?;
        writeln!(f, "collect data:    {}", self.collect_data)?;
        match self.weak_scale() {
            Some(length) => writeln!(f, "weak-scale test: {length} records per rank")?,
            None => writeln!(f, "weak-scale test: off")?,
        }
        match self.local_sort_threads() {
            Some(threads) => write!(f, "local sort:      {threads} threads"),
            None => write!(f, "local sort:      single-threaded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert!(config.input_path.as_os_str().is_empty());
        assert!(config.output_path.as_os_str().is_empty());
        assert!(config.attribute_path.as_os_str().is_empty());
        assert!(config.group_path.is_empty());
        assert_eq!(config.key_index, 1);
        assert!(!config.sort_key_only);
        assert!(!config.skew_data);
        assert!(!config.verbose);
        assert!(config.write_result);
        assert!(config.collect_data);
        assert!(!config.weak_scale_test);
        assert_eq!(config.weak_scale_length, 1_000_000);
        assert!(!config.local_sort_threaded);
        assert_eq!(config.local_sort_thread_count, 16);
    }

    #[test]
    fn test_coupled_parameters() {
        let mut config = RunConfig::new();
        assert_eq!(config.weak_scale(), None);
        assert_eq!(config.local_sort_threads(), None);

        config.enable_weak_scale(500);
        config.enable_threaded_local_sort(4);
        assert_eq!(config.weak_scale(), Some(500));
        assert_eq!(config.local_sort_threads(), Some(4));
    }

    #[test]
    fn test_sanity_warnings() {
        let config = RunConfig {
            input_path: "a.h5".into(),
            output_path: "b.h5".into(),
            ..Default::default()
        };
        assert!(config.sanity_warnings().is_empty());

        let mut config = RunConfig::default();
        config.key_index = -3;
        config.enable_threaded_local_sort(0);
        let warnings = config.sanity_warnings();
        assert!(warnings.iter().any(|w| w.contains("key index -3")));
        assert!(warnings.iter().any(|w| w.contains("thread count 0")));
        assert!(warnings.iter().any(|w| w.contains("-f")));
        assert!(warnings.iter().any(|w| w.contains("-o")));
    }

    #[test]
    fn test_weak_scale_needs_no_input() {
        let mut config = RunConfig {
            write_result: false,
            ..Default::default()
        };
        config.enable_weak_scale(1000);
        assert!(config.sanity_warnings().is_empty());

        config.enable_weak_scale(0);
        assert_eq!(config.sanity_warnings().len(), 1);
    }

    #[test]
    fn test_display_summary() {
        let mut config = RunConfig::default();
        config.input_path = "a.h5".into();
        config.enable_weak_scale(500);
        let text = config.to_string();
        assert!(text.contains("input file:      a.h5"));
        assert!(text.contains("output file:     <unset>"));
        assert!(text.contains("500 records per rank"));
        assert!(text.contains("single-threaded"));
    }
}
