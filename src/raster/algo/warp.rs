use std::ffi::c_int;
use std::path::Path;

use crate::raster::io;
use crate::{gdalinterop, Error, Extent, RasterDataType, RasterSize, Result};

/// Resampling method selector, passed opaquely to the warp engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResampleAlgorithm {
    NearestNeighbour,
    Bilinear,
    Cubic,
    CubicSpline,
    Lanczos,
    Average,
    Mode,
    Min,
    Max,
    Med,
    Q1,
    Q3,
    Sum,
}

impl ResampleAlgorithm {
    /// Token understood by the warp utility (`-r`).
    pub fn gdal_name(&self) -> &'static str {
        match self {
            Self::NearestNeighbour => "near",
            Self::Bilinear => "bilinear",
            Self::Cubic => "cubic",
            Self::CubicSpline => "cubicspline",
            Self::Lanczos => "lanczos",
            Self::Average => "average",
            Self::Mode => "mode",
            Self::Min => "min",
            Self::Max => "max",
            Self::Med => "med",
            Self::Q1 => "q1",
            Self::Q3 => "q3",
            Self::Sum => "sum",
        }
    }
}

impl std::str::FromStr for ResampleAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "near" | "nearest" => Ok(Self::NearestNeighbour),
            "bilinear" => Ok(Self::Bilinear),
            "cubic" => Ok(Self::Cubic),
            "cubicspline" => Ok(Self::CubicSpline),
            "lanczos" => Ok(Self::Lanczos),
            "average" => Ok(Self::Average),
            "mode" => Ok(Self::Mode),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "med" => Ok(Self::Med),
            "q1" => Ok(Self::Q1),
            "q3" => Ok(Self::Q3),
            "sum" => Ok(Self::Sum),
            _ => Err(Error::InvalidArgument(format!("Unknown resample algorithm: {s}"))),
        }
    }
}

/// Configuration for [`warp`].
///
/// The target extent is interpreted in `target_extent_srs` when set, which the
/// reprojection use case points at the destination coordinate system.
pub struct WarpOptions {
    pub src_srs: Option<String>,
    pub dst_srs: Option<String>,
    pub target_extent: Option<Extent>,
    pub target_extent_srs: Option<String>,
    pub target_size: Option<RasterSize>,
    pub output_type: Option<RasterDataType>,
    pub resample_algorithm: ResampleAlgorithm,
    pub set_color_interpretation: bool,
    pub additional_options: Vec<String>,
}

impl Default for WarpOptions {
    fn default() -> Self {
        WarpOptions {
            src_srs: None,
            dst_srs: None,
            target_extent: None,
            target_extent_srs: None,
            target_size: None,
            output_type: None,
            resample_algorithm: ResampleAlgorithm::NearestNeighbour,
            set_color_interpretation: true,
            additional_options: Vec::new(),
        }
    }
}

impl WarpOptions {
    /// Render the configuration to gdalwarp style argument tokens.
    fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(srs) = &self.src_srs {
            args.extend(["-s_srs".to_string(), srs.clone()]);
        }

        if let Some(srs) = &self.dst_srs {
            args.extend(["-t_srs".to_string(), srs.clone()]);
        }

        if let Some(extent) = &self.target_extent {
            args.extend([
                "-te".to_string(),
                extent.xmin.to_string(),
                extent.ymin.to_string(),
                extent.xmax.to_string(),
                extent.ymax.to_string(),
            ]);
        }

        if let Some(srs) = &self.target_extent_srs {
            args.extend(["-te_srs".to_string(), srs.clone()]);
        }

        if let Some(size) = &self.target_size {
            args.extend([
                "-ts".to_string(),
                size.cols.count().to_string(),
                size.rows.count().to_string(),
            ]);
        }

        if let Some(output_type) = self.output_type {
            args.extend(["-ot".to_string(), output_type.gdal_name().to_string()]);
        }

        args.extend(["-r".to_string(), self.resample_algorithm.gdal_name().to_string()]);

        if self.set_color_interpretation {
            args.push("-setci".to_string());
        }

        args.extend(self.additional_options.iter().cloned());

        args
    }
}

struct WarpAppOptionsWrapper {
    options: *mut gdal_sys::GDALWarpAppOptions,
}

impl WarpAppOptionsWrapper {
    fn new(opts: &[String]) -> Result<Self> {
        let c_opts = gdalinterop::create_string_list(opts)?;
        let options = unsafe { gdal_sys::GDALWarpAppOptionsNew(c_opts.as_ptr(), std::ptr::null_mut()) };
        if options.is_null() {
            return Err(Error::InvalidArgument("Failed to create warp options".to_string()));
        }

        Ok(Self { options })
    }

    fn c_options(&self) -> *mut gdal_sys::GDALWarpAppOptions {
        self.options
    }
}

impl Drop for WarpAppOptionsWrapper {
    fn drop(&mut self) {
        unsafe { gdal_sys::GDALWarpAppOptionsFree(self.c_options()) };
    }
}

/// Reproject and resample `src` into `dst` according to the provided options.
///
/// The result handle is wrapped and dropped before returning so buffered
/// output is flushed to disk by the time the call completes.
pub fn warp(src: impl AsRef<Path>, dst: impl AsRef<Path>, options: &WarpOptions) -> Result<()> {
    let src_ds = io::open_read_only(src)?;
    let dst = dst.as_ref();

    let warp_options = WarpAppOptionsWrapper::new(&options.to_args())?;
    gdalinterop::create_output_directory_if_needed(dst)?;
    let dst_path = gdalinterop::path_to_cstring(dst)?;

    let mut usage_error: c_int = gdalinterop::FALSE;
    let handle = unsafe {
        gdal_sys::GDALWarp(
            dst_path.as_ptr(),
            std::ptr::null_mut(),
            1,
            &mut src_ds.c_dataset(),
            warp_options.c_options(),
            &mut usage_error,
        )
    };

    if usage_error == gdalinterop::TRUE {
        return Err(Error::InvalidArgument("Warp: invalid arguments".to_string()));
    }

    unsafe {
        gdal::Dataset::from_c_dataset(gdalinterop::check_pointer(handle, "GDALWarp")?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Columns, Rows};

    #[test]
    fn warp_args_contain_the_full_configuration() {
        let options = WarpOptions {
            src_srs: Some("+proj=longlat +datum=WGS84 +no_defs".to_string()),
            dst_srs: Some("EPSG:3857".to_string()),
            target_extent: Some(Extent::new(0.0, 0.0, 1000.0, 2000.0)),
            target_extent_srs: Some("EPSG:3857".to_string()),
            target_size: Some(RasterSize::with_rows_cols(Rows(200), Columns(100))),
            output_type: Some(RasterDataType::Float32),
            resample_algorithm: ResampleAlgorithm::Bilinear,
            ..Default::default()
        };

        let args = options.to_args();
        assert_eq!(
            args,
            vec![
                "-s_srs",
                "+proj=longlat +datum=WGS84 +no_defs",
                "-t_srs",
                "EPSG:3857",
                "-te",
                "0",
                "0",
                "1000",
                "2000",
                "-te_srs",
                "EPSG:3857",
                "-ts",
                "100",
                "200",
                "-ot",
                "Float32",
                "-r",
                "bilinear",
                "-setci",
            ]
        );
    }

    #[test]
    fn default_warp_args_are_minimal() {
        let args = WarpOptions::default().to_args();
        assert_eq!(args, vec!["-r", "near", "-setci"]);
    }

    #[test]
    fn resample_tokens() {
        assert_eq!(ResampleAlgorithm::NearestNeighbour.gdal_name(), "near");
        assert_eq!(ResampleAlgorithm::CubicSpline.gdal_name(), "cubicspline");
        assert_eq!(ResampleAlgorithm::Q3.gdal_name(), "q3");
    }
}
