//! Atomic file write operations.
//!
//! Registries and state snapshots are replaced through a temporary sibling
//! file and a rename, so readers never observe a partially written file.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Component, Utf8Path};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Opens the directory containing `path` and returns it with the file name.
///
/// Relative paths without a parent resolve against the current directory.
///
/// # Errors
///
/// Returns [`io::ErrorKind::InvalidInput`] when `path` has no file name, or
/// any error raised while opening the parent directory.
///
/// # Example
///
/// ```no_run
/// use camino::Utf8Path;
/// use rise_data::open_parent_dir;
///
/// let (dir, file_name) = open_parent_dir(Utf8Path::new("state/rise.json"))?;
/// assert_eq!(file_name, "rise.json");
/// # drop(dir);
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn open_parent_dir(path: &Utf8Path) -> io::Result<(Dir, &str)> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "path must name a file")
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Writes contents to a file atomically using a temp file and rename.
///
/// `path` must be a bare file name relative to `dir`. The function writes
/// to a hidden temporary file in the same directory, syncs it, then renames
/// it over the target.
///
/// # Errors
///
/// Returns an I/O error if `path` is not a plain file name or the file
/// cannot be written.
pub fn write_atomic(dir: &Dir, path: &Utf8Path, contents: &str) -> io::Result<()> {
    let mut components = path.components();
    let (Some(Utf8Component::Normal(file_name)), None) = (components.next(), components.next())
    else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("'{path}' must be a plain file name"),
        ));
    };
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{}.tmp.{}.{}.{}",
        file_name,
        std::process::id(),
        suffix,
        counter
    );

    write_to_temp_file(dir, &tmp_name, contents)?;
    if let Err(err) = rename_temp_to_target(dir, &tmp_name, file_name) {
        // Best-effort cleanup; the rename error is the one worth reporting.
        drop(dir.remove_file(&tmp_name));
        return Err(err);
    }
    sync_parent_directory(dir);

    Ok(())
}

fn write_to_temp_file(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;

    let written = file
        .write_all(contents.as_bytes())
        .and_then(|()| file.sync_all());
    if let Err(err) = written {
        drop(file);
        drop(dir.remove_file(tmp_name));
        return Err(err);
    }

    Ok(())
}

#[cfg(windows)]
fn rename_temp_to_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists, so remove it first.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn rename_temp_to_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn sync_parent_directory(parent: &Dir) {
    // Best-effort directory sync; ignore failures.
    if parent.open(".").and_then(|dir| dir.sync_all()).is_err() {
        // Ignore sync failures.
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use camino::Utf8PathBuf;

    use super::*;

    fn scratch_dir() -> (Dir, Utf8PathBuf) {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = Utf8PathBuf::from("target")
            .join("rise-data-tests")
            .join(format!("atomic-{}-{n}", std::process::id()));
        let root = Dir::open_ambient_dir(".", ambient_authority()).expect("open cwd");
        root.create_dir_all(&path).expect("create scratch dir");
        let dir = Dir::open_ambient_dir(&path, ambient_authority()).expect("open scratch dir");
        (dir, path)
    }

    #[test]
    fn write_atomic_replaces_existing_contents() {
        let (dir, path) = scratch_dir();
        let target = Utf8Path::new("state.json");

        write_atomic(&dir, target, "first").expect("first write");
        write_atomic(&dir, target, "second").expect("second write");

        assert_eq!(dir.read_to_string(target).expect("read back"), "second");
        drop(std::fs::remove_dir_all(path));
    }

    #[test]
    fn write_atomic_leaves_no_temp_files() {
        let (dir, path) = scratch_dir();

        write_atomic(&dir, Utf8Path::new("state.json"), "{}").expect("write");

        let names: Vec<String> = dir
            .entries()
            .expect("list entries")
            .filter_map(Result::ok)
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        assert_eq!(names, vec!["state.json".to_owned()]);
        drop(std::fs::remove_dir_all(path));
    }

    #[test]
    fn write_atomic_rejects_nested_paths() {
        let (dir, path) = scratch_dir();

        let err = write_atomic(&dir, Utf8Path::new("nested/state.json"), "{}")
            .expect_err("nested path rejected");

        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        drop(std::fs::remove_dir_all(path));
    }

    #[test]
    fn open_parent_dir_defaults_to_current_directory() {
        let (_dir, file_name) =
            open_parent_dir(Utf8Path::new("Cargo.toml")).expect("open current directory");
        assert_eq!(file_name, "Cargo.toml");
    }
}
