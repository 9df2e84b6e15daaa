use std::path::{Path, PathBuf};

use gdal::errors::GdalError;
use gdal::vector::LayerAccess;

use crate::{Error, Extent, Result};

pub const SHAPEFILE_DRIVER: &str = "ESRI Shapefile";

/// Open a shapefile for reading, pinned to the single file shapefile driver.
pub fn open_shapefile(path: impl AsRef<Path>) -> Result<gdal::Dataset> {
    let options = gdal::DatasetOptions {
        open_flags: gdal::GdalOpenFlags::GDAL_OF_READONLY | gdal::GdalOpenFlags::GDAL_OF_VECTOR,
        allowed_drivers: Some(&[SHAPEFILE_DRIVER]),
        ..Default::default()
    };

    open_with_options(path, options)
}

/// Open a vector dataset for reading with any available driver.
pub fn open_read_only(path: impl AsRef<Path>) -> Result<gdal::Dataset> {
    let options = gdal::DatasetOptions {
        open_flags: gdal::GdalOpenFlags::GDAL_OF_READONLY | gdal::GdalOpenFlags::GDAL_OF_VECTOR,
        ..Default::default()
    };

    open_with_options(path, options)
}

fn open_with_options(path: impl AsRef<Path>, options: gdal::DatasetOptions) -> Result<gdal::Dataset> {
    let path = path.as_ref();
    gdal::Dataset::open_ex(path, options).map_err(|err| match err {
        GdalError::NullPointer { method_name: _, msg: _ } if !path.exists() => Error::InvalidPath(PathBuf::from(path)),
        _ => Error::Runtime(format!(
            "Failed to open vector dataset: {} ({})",
            path.to_string_lossy(),
            err
        )),
    })
}

/// Bounding extent of the default layer of the named shapefile.
///
/// Only spatial bounds are read; no assumptions are made about the attribute
/// schema.
pub fn shapefile_extent(path: impl AsRef<Path>) -> Result<Extent> {
    let ds = open_shapefile(path)?;
    let layer = ds.layer(0)?;
    let envelope = layer.get_extent()?;

    Ok(Extent::new(envelope.MinX, envelope.MinY, envelope.MaxX, envelope.MaxY))
}
