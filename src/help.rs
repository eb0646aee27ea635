//! Usage text printed for `-h`

use std::io::{self, Write};

/// Name the sorter is invoked as
pub const PROGRAM_NAME: &str = "h5group-sorter";

/// Literal invocation shown at the end of the usage text
pub const USAGE_EXAMPLE: &str =
    "./h5group-sorter -f testf.h5p -g /testg -o testg-sorted.h5p -a testf.attribute -k 0";

/// Render the full usage text
pub fn help_text() -> String {
    format!(
        "Usage: {PROGRAM_NAME} [OPTION]
    -h          print this help and exit
    -f <path>   name of the file to sort
    -g <path>   group path within the HDF5 file to the data set
    -o <path>   name of the file to store sorted results
    -a <path>   name of the attribute file to store the sort table
    -k <int>    index of the sort key (default 1)
    -s          the data is in skew shape
    -e          only sort the key
    -v          verbose
    -m          do not write the sorted result
    -c          do not collect data before writing
    -l <int>    weak-scale test with <int> records per rank
    -t <int>    threaded local sort with <int> threads
example: {USAGE_EXAMPLE}
"
    )
}

/// Write the usage text to `out`
pub fn write_help<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(help_text().as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_option() {
        let text = help_text();
        assert!(text.starts_with("Usage: h5group-sorter"));
        for option in [
            "-h", "-f", "-g", "-o", "-a", "-k", "-s", "-e", "-v", "-m", "-c", "-l", "-t",
        ] {
            assert!(text.contains(&format!("    {option} ")), "missing {option}");
        }
        assert!(text.contains(USAGE_EXAMPLE));
    }

    #[test]
    fn test_write_help() {
        let mut buf = Vec::new();
        write_help(&mut buf).expect("writing to a Vec cannot fail");
        assert_eq!(String::from_utf8(buf).expect("help is UTF-8"), help_text());
    }
}
