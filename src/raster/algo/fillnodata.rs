use std::ffi::c_int;
use std::path::Path;

use crate::raster::io;
use crate::{gdalinterop, Result};

/// Configuration for [`fill_nodata`].
pub struct FillNodataOptions {
    /// 1-based index of the band to interpolate.
    pub band: usize,
    /// Short name of the driver used to create the destination.
    pub driver_name: String,
    pub creation_options: Vec<String>,
    /// Maximum distance (in pixels) to search for valid values to interpolate from.
    pub max_distance: f64,
    pub smoothing_iterations: u32,
}

impl Default for FillNodataOptions {
    fn default() -> Self {
        FillNodataOptions {
            band: 1,
            driver_name: "GTiff".to_string(),
            creation_options: Vec::new(),
            max_distance: 100.0,
            smoothing_iterations: 0,
        }
    }
}

/// Fill nodata holes in one band of `src` by interpolating from surrounding
/// valid pixels, writing the result to `dst`.
///
/// When `dst` is `None` nothing is done and the call silently succeeds; the
/// fill only runs when a destination is provided.
pub fn fill_nodata(src: impl AsRef<Path>, dst: Option<&Path>, options: &FillNodataOptions) -> Result<()> {
    let Some(dst) = dst else {
        return Ok(());
    };

    let src_ds = io::open_read_only(src)?;
    let driver = gdal::DriverManager::get_driver_by_name(&options.driver_name)?;

    gdalinterop::create_output_directory_if_needed(dst)?;
    let dst_path = gdalinterop::path_to_cstring(dst)?;
    let creation_options = gdalinterop::create_string_list(&options.creation_options)?;

    // The interpolation works in place, so the source is first copied to the
    // destination through the requested driver.
    let mut dst_ds = unsafe {
        let handle = gdal_sys::GDALCreateCopy(
            driver.c_driver(),
            dst_path.as_ptr(),
            src_ds.c_dataset(),
            gdalinterop::FALSE,
            creation_options.as_ptr(),
            None,
            std::ptr::null_mut(),
        );

        gdal::Dataset::from_c_dataset(gdalinterop::check_pointer(handle, "GDALCreateCopy")?)
    };

    let band = dst_ds.rasterband(options.band)?;
    gdalinterop::check_rc(unsafe {
        gdal_sys::GDALFillNodata(
            band.c_rasterband(),
            std::ptr::null_mut(),
            options.max_distance,
            gdalinterop::FALSE,
            options.smoothing_iterations as c_int,
            std::ptr::null_mut(),
            None,
            std::ptr::null_mut(),
        )
    })?;

    drop(band);
    dst_ds.flush_cache()?;

    Ok(())
}
