use std::ffi::c_int;
use std::path::Path;

use crate::raster::io;
use crate::{gdalinterop, Error, RasterDataType, Result};

/// AAIGrid creation option constraining floating point output to 5 significant
/// digits; only meaningful for floating point encodings.
const FLOAT_PRECISION_OPTION: &str = "SIGNIFICANT_DIGITS=5";

/// Configuration for [`translate`].
pub struct TranslateOptions {
    /// Short name of the output driver.
    pub format: String,
    pub output_type: RasterDataType,
    /// Nodata sentinel assigned to the output.
    pub nodata: Option<f64>,
    pub creation_options: Vec<String>,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        TranslateOptions {
            format: "AAIGrid".to_string(),
            output_type: RasterDataType::Float32,
            nodata: Some(-9999.0),
            creation_options: Vec::new(),
        }
    }
}

impl TranslateOptions {
    /// Render the configuration to gdal_translate style argument tokens.
    fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "-of".to_string(),
            self.format.clone(),
            "-ot".to_string(),
            self.output_type.gdal_name().to_string(),
        ];

        for option in &self.creation_options {
            args.extend(["-co".to_string(), option.clone()]);
        }

        if self.output_type == RasterDataType::Float32 {
            args.extend(["-co".to_string(), FLOAT_PRECISION_OPTION.to_string()]);
        }

        if let Some(nodata) = self.nodata {
            args.extend(["-a_nodata".to_string(), nodata.to_string()]);
        }

        args
    }
}

struct TranslateOptionsWrapper {
    options: *mut gdal_sys::GDALTranslateOptions,
}

impl TranslateOptionsWrapper {
    fn new(opts: &[String]) -> Result<Self> {
        let c_opts = gdalinterop::create_string_list(opts)?;
        let options = unsafe { gdal_sys::GDALTranslateOptionsNew(c_opts.as_ptr(), std::ptr::null_mut()) };
        if options.is_null() {
            return Err(Error::InvalidArgument("Failed to create translate options".to_string()));
        }

        Ok(Self { options })
    }

    fn c_options(&self) -> *mut gdal_sys::GDALTranslateOptions {
        self.options
    }
}

impl Drop for TranslateOptionsWrapper {
    fn drop(&mut self) {
        unsafe { gdal_sys::GDALTranslateOptionsFree(self.c_options()) };
    }
}

/// Convert `src` into `dst` in the requested output format and pixel type.
///
/// The result handle is wrapped and dropped before returning so buffered
/// output is flushed to disk by the time the call completes.
pub fn translate(src: impl AsRef<Path>, dst: impl AsRef<Path>, options: &TranslateOptions) -> Result<()> {
    let src_ds = io::open_read_only(src)?;
    let dst = dst.as_ref();

    let translate_options = TranslateOptionsWrapper::new(&options.to_args())?;
    gdalinterop::create_output_directory_if_needed(dst)?;
    let dst_path = gdalinterop::path_to_cstring(dst)?;

    let mut usage_error: c_int = gdalinterop::FALSE;
    let handle = unsafe {
        gdal_sys::GDALTranslate(
            dst_path.as_ptr(),
            src_ds.c_dataset(),
            translate_options.c_options(),
            &mut usage_error,
        )
    };

    if usage_error == gdalinterop::TRUE {
        return Err(Error::InvalidArgument("Translate: invalid arguments".to_string()));
    }

    unsafe {
        gdal::Dataset::from_c_dataset(gdalinterop::check_pointer(handle, "GDALTranslate")?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float32_output_constrains_precision() {
        let args = TranslateOptions::default().to_args();
        assert_eq!(
            args,
            vec!["-of", "AAIGrid", "-ot", "Float32", "-co", "SIGNIFICANT_DIGITS=5", "-a_nodata", "-9999"]
        );
    }

    #[test]
    fn other_output_types_omit_the_precision_option() {
        let options = TranslateOptions {
            format: "GTiff".to_string(),
            output_type: RasterDataType::Int32,
            nodata: Some(0.0),
            creation_options: vec!["COMPRESS=LZW".to_string()],
        };

        let args = options.to_args();
        assert_eq!(
            args,
            vec!["-of", "GTiff", "-ot", "Int32", "-co", "COMPRESS=LZW", "-a_nodata", "0"]
        );
        assert!(!args.iter().any(|a| a.contains("SIGNIFICANT_DIGITS")));
    }
}
