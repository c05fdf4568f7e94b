use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Locates `program` on a `PATH`-style search list, like `which`.
///
/// Only executable files count; a non-executable match is skipped and the search goes on. On
/// Windows the usual executable extensions are tried as well, so the result is always a complete
/// path that can be spawned directly.
#[must_use]
pub fn find_executable(program: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    let search_path = search_path?;
    env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .find_map(|dir| candidates(&dir, program).into_iter().find(|path| is_executable(path)))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata().is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    let base = dir.join(program);
    if cfg!(windows) {
        [".exe", ".cmd", ".bat"]
            .iter()
            .map(|ext| dir.join(format!("{program}{ext}")))
            .chain(std::iter::once(base))
            .collect()
    } else {
        vec![base]
    }
}
