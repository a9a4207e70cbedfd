use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// The named environment variable.
    Env(String),
    /// The contents of the file at this path.
    File(PathBuf),
}

/// A value found by [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The raw value (file contents are trimmed).
    pub value: String,
    /// Where the value was found.
    pub origin: Origin,
}

/// Find the first non-empty value among the environment variables, then the files, each in the order given.
///
/// A variable that is unset (or not unicode) and a file that is missing or unreadable are simply skipped.
/// Empty values are treated the same as missing ones.
pub fn resolve<E, P>(env_vars: &[E], file_paths: &[P]) -> Option<Resolved>
where
    E: AsRef<str>,
    P: AsRef<Path>,
{
    for name in env_vars {
        let name = name.as_ref();

        if let Ok(value) = env::var(name) {
            if !value.is_empty() {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Resolved from environment variable {name}.");
                }

                return Some(Resolved {
                    value,
                    origin: Origin::Env(name.to_string()),
                });
            }
        }
    }

    for path in file_paths {
        let path = path.as_ref();

        if let Ok(contents) = fs::read_to_string(path) {
            let trimmed = contents.trim();

            if !trimmed.is_empty() {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Resolved from file {}.", path.display());
                }

                return Some(Resolved {
                    value: trimmed.to_string(),
                    origin: Origin::File(path.to_path_buf()),
                });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const NOTHING: [&str; 0] = [];

    fn file_with(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn nothing_configured() {
        assert_eq!(resolve(&NOTHING, &NOTHING), None);
    }

    #[test]
    #[serial]
    fn first_env_wins() {
        // Setup
        env::remove_var("FLAGWORK_SOURCE_A");
        env::set_var("FLAGWORK_SOURCE_B", "second");
        env::set_var("FLAGWORK_SOURCE_C", "third");

        // Execute
        let resolved = resolve(
            &["FLAGWORK_SOURCE_A", "FLAGWORK_SOURCE_B", "FLAGWORK_SOURCE_C"],
            &NOTHING,
        );

        // Verify
        assert_eq!(
            resolved,
            Some(Resolved {
                value: "second".to_string(),
                origin: Origin::Env("FLAGWORK_SOURCE_B".to_string()),
            })
        );
        env::remove_var("FLAGWORK_SOURCE_B");
        env::remove_var("FLAGWORK_SOURCE_C");
    }

    #[test]
    #[serial]
    fn empty_env_skipped() {
        // Setup
        env::set_var("FLAGWORK_SOURCE_EMPTY", "");
        let file = file_with("abc\n");

        // Execute
        let resolved = resolve(&["FLAGWORK_SOURCE_EMPTY"], &[file.path()]).unwrap();

        // Verify
        assert_eq!(resolved.value, "abc");
        assert_eq!(resolved.origin, Origin::File(file.path().to_path_buf()));
        env::remove_var("FLAGWORK_SOURCE_EMPTY");
    }

    #[test]
    #[serial]
    fn env_beats_file() {
        // Setup
        env::set_var("FLAGWORK_SOURCE_FOO", "123");
        let file = file_with("abc");

        // Execute
        let resolved = resolve(&["FLAGWORK_SOURCE_FOO"], &[file.path()]).unwrap();

        // Verify
        assert_eq!(resolved.value, "123");
        env::remove_var("FLAGWORK_SOURCE_FOO");
    }

    #[test]
    fn missing_and_empty_files_skipped() {
        // Setup
        let empty = file_with("  \n");
        let full = file_with(" 42 ");
        let missing = empty.path().with_extension("missing");

        // Execute
        let resolved = resolve(
            &NOTHING,
            &[missing.as_path(), empty.path(), full.path()],
        )
        .unwrap();

        // Verify
        assert_eq!(resolved.value, "42");
        assert_eq!(resolved.origin, Origin::File(full.path().to_path_buf()));
    }
}
