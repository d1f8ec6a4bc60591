// Input/Output: HDF5 container and file helpers

pub mod h5;

use crate::Result;
use h5::Group;
use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

// Re-export main types and functions
pub use h5::{parse_h5, serialize_h5, H5Error};

/// Serialize `root` and write it to `path`
///
/// Missing parent directories are created. The bytes go to a sibling
/// `.tmp` file first and are renamed over `path`, so an existing file is
/// either fully replaced or left untouched.
pub fn write_h5_file(path: &Path, root: &Group) -> Result<()> {
    let bytes = serialize_h5(root)?;

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let tmp = tmp_path(path);
    if let Err(err) = fs::write(&tmp, &bytes).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }

    debug!(path = %path.display(), bytes = bytes.len(), "wrote HDF5 file");
    Ok(())
}

/// Read and parse the HDF5 file at `path`
pub fn read_h5_file(path: &Path) -> Result<Group> {
    let bytes = fs::read(path)?;
    let root = parse_h5(&bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "read HDF5 file");
    Ok(root)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("lut"));
    name.push(".tmp");
    path.with_file_name(name)
}
