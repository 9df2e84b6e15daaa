//! Rasterization of vector geometry into a gridded raster.

use std::ffi::c_int;
use std::path::Path;

use crate::vector::io;
use crate::{gdalinterop, Error, Extent, RasterDataType, Result};

/// Configuration for [`rasterize`].
///
/// When `extent` is unset it is computed from the source shapefile's own
/// layer extent before delegation.
pub struct RasterizeOptions {
    /// Coordinate system assigned to the output.
    pub output_srs: Option<String>,
    /// Short name of the output driver.
    pub format: String,
    pub output_type: RasterDataType,
    pub extent: Option<Extent>,
    /// Uniform value the output grid is initialized with before burning.
    pub init_value: f64,
    /// Square pixel size, used for both axes.
    pub resolution: f64,
    /// Attribute field whose values are burned into the grid.
    pub attribute: String,
    /// Layer to rasterize; the default layer when unset.
    pub layer: Option<String>,
    /// Nodata sentinel assigned to the output.
    pub nodata: Option<f64>,
}

impl Default for RasterizeOptions {
    fn default() -> Self {
        RasterizeOptions {
            output_srs: None,
            format: "HFA".to_string(),
            output_type: RasterDataType::Float32,
            extent: None,
            init_value: 0.0,
            resolution: 1.0,
            attribute: String::new(),
            layer: None,
            nodata: Some(-9999.0),
        }
    }
}

impl RasterizeOptions {
    /// Render the configuration to gdal_rasterize style argument tokens.
    /// The extent must already be resolved at this point.
    fn to_args(&self, extent: &Extent) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(srs) = &self.output_srs {
            args.extend(["-a_srs".to_string(), srs.clone()]);
        }

        args.extend(["-of".to_string(), self.format.clone()]);
        args.extend(["-ot".to_string(), self.output_type.gdal_name().to_string()]);
        args.extend([
            "-te".to_string(),
            extent.xmin.to_string(),
            extent.ymin.to_string(),
            extent.xmax.to_string(),
            extent.ymax.to_string(),
        ]);
        args.extend(["-init".to_string(), self.init_value.to_string()]);
        args.extend([
            "-tr".to_string(),
            self.resolution.to_string(),
            self.resolution.to_string(),
        ]);
        args.extend(["-a".to_string(), self.attribute.clone()]);

        if let Some(layer) = &self.layer {
            args.extend(["-l".to_string(), layer.clone()]);
        }

        if let Some(nodata) = self.nodata {
            args.extend(["-a_nodata".to_string(), nodata.to_string()]);
        }

        args
    }
}

struct RasterizeOptionsWrapper {
    options: *mut gdal_sys::GDALRasterizeOptions,
}

impl RasterizeOptionsWrapper {
    fn new(opts: &[String]) -> Result<Self> {
        let c_opts = gdalinterop::create_string_list(opts)?;
        let options = unsafe { gdal_sys::GDALRasterizeOptionsNew(c_opts.as_ptr(), std::ptr::null_mut()) };
        if options.is_null() {
            return Err(Error::InvalidArgument("Failed to create rasterize options".to_string()));
        }

        Ok(Self { options })
    }

    fn c_options(&self) -> *mut gdal_sys::GDALRasterizeOptions {
        self.options
    }
}

impl Drop for RasterizeOptionsWrapper {
    fn drop(&mut self) {
        unsafe { gdal_sys::GDALRasterizeOptionsFree(self.c_options()) };
    }
}

/// Burn vector geometry from `shp` into a raster grid written at `dst`.
///
/// Fails when the attribute does not exist on the layer or the bounding box
/// has zero area (reported by the rasterize engine).
pub fn rasterize(dst: impl AsRef<Path>, shp: impl AsRef<Path>, options: &RasterizeOptions) -> Result<()> {
    let shp = shp.as_ref();
    let dst = dst.as_ref();

    let extent = match options.extent {
        Some(extent) => extent,
        None => io::shapefile_extent(shp)?,
    };

    let src_ds = io::open_read_only(shp)?;
    let rasterize_options = RasterizeOptionsWrapper::new(&options.to_args(&extent))?;
    gdalinterop::create_output_directory_if_needed(dst)?;
    let dst_path = gdalinterop::path_to_cstring(dst)?;

    let mut usage_error: c_int = gdalinterop::FALSE;
    let handle = unsafe {
        gdal_sys::GDALRasterize(
            dst_path.as_ptr(),
            std::ptr::null_mut(),
            src_ds.c_dataset(),
            rasterize_options.c_options(),
            &mut usage_error,
        )
    };

    if usage_error == gdalinterop::TRUE {
        return Err(Error::InvalidArgument("Rasterize: invalid arguments".to_string()));
    }

    unsafe {
        gdal::Dataset::from_c_dataset(gdalinterop::check_pointer(handle, "GDALRasterize")?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rasterize_args_contain_the_full_configuration() {
        let options = RasterizeOptions {
            output_srs: Some("+proj=longlat +datum=WGS84 +no_defs".to_string()),
            format: "HFA".to_string(),
            output_type: RasterDataType::Float32,
            resolution: 0.5,
            attribute: "height".to_string(),
            ..Default::default()
        };

        let args = options.to_args(&Extent::new(2.0, 49.5, 4.0, 51.0));
        assert_eq!(
            args,
            vec![
                "-a_srs",
                "+proj=longlat +datum=WGS84 +no_defs",
                "-of",
                "HFA",
                "-ot",
                "Float32",
                "-te",
                "2",
                "49.5",
                "4",
                "51",
                "-init",
                "0",
                "-tr",
                "0.5",
                "0.5",
                "-a",
                "height",
                "-a_nodata",
                "-9999",
            ]
        );
    }

    #[test]
    fn layer_selection_is_only_passed_when_set() {
        let extent = Extent::new(0.0, 0.0, 1.0, 1.0);

        let mut options = RasterizeOptions::default();
        assert!(!options.to_args(&extent).iter().any(|a| a == "-l"));

        options.layer = Some("buildings".to_string());
        let args = options.to_args(&extent);
        let pos = args.iter().position(|a| a == "-l").expect("layer flag");
        assert_eq!(args[pos + 1], "buildings");
    }
}
