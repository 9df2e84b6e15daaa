use std::path::{Path, PathBuf};

use gdal::errors::GdalError;

use crate::{Error, Result};

/// Open a GDAL raster dataset for reading
pub fn open_read_only(path: impl AsRef<Path>) -> Result<gdal::Dataset> {
    let options = gdal::DatasetOptions {
        open_flags: gdal::GdalOpenFlags::GDAL_OF_READONLY | gdal::GdalOpenFlags::GDAL_OF_RASTER,
        ..Default::default()
    };

    open_with_options(path, options)
}

fn open_with_options(path: impl AsRef<Path>, options: gdal::DatasetOptions) -> Result<gdal::Dataset> {
    let path = path.as_ref();
    gdal::Dataset::open_ex(path, options).map_err(|err| match err {
        // Match on the error to give a cleaner error message when the file does not exist
        GdalError::NullPointer { method_name: _, msg: _ } if !path.exists() => Error::InvalidPath(PathBuf::from(path)),
        _ => Error::Runtime(format!(
            "Failed to open raster dataset: {} ({})",
            path.to_string_lossy(),
            err
        )),
    })
}
