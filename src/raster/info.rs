//! Structured metadata queries backed by the GDAL info utility.
//!
//! The report is requested in JSON form and deserialized into [`RasterInfo`];
//! the individual queries each extract one field from it.

use std::ffi::CStr;
use std::path::Path;

use serde::Deserialize;

use crate::raster::io;
use crate::{gdalinterop, Columns, Error, RasterSize, Result, Rows};

/// Deserialized info report of a raster dataset.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterInfo {
    /// Pixel grid size as (columns, rows).
    pub size: [usize; 2],
    #[serde(default)]
    pub corner_coordinates: Option<CornerCoordinates>,
    #[serde(default)]
    pub coordinate_system: Option<CoordinateSystem>,
}

/// Georeferenced corner positions of the pixel grid, each an (x, y) pair.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerCoordinates {
    pub upper_left: [f64; 2],
    pub lower_left: [f64; 2],
    pub upper_right: [f64; 2],
    pub lower_right: [f64; 2],
    pub center: [f64; 2],
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinateSystem {
    #[serde(default)]
    pub wkt: String,
    #[serde(default)]
    pub proj4: Option<String>,
}

struct InfoOptions {
    options: *mut gdal_sys::GDALInfoOptions,
}

impl InfoOptions {
    fn new(opts: &[String]) -> Result<Self> {
        let c_opts = gdalinterop::create_string_list(opts)?;
        let options = unsafe { gdal_sys::GDALInfoOptionsNew(c_opts.as_ptr(), std::ptr::null_mut()) };
        if options.is_null() {
            return Err(Error::InvalidArgument("Failed to create info options".to_string()));
        }

        Ok(Self { options })
    }

    fn c_options(&self) -> *mut gdal_sys::GDALInfoOptions {
        self.options
    }
}

impl Drop for InfoOptions {
    fn drop(&mut self) {
        unsafe { gdal_sys::GDALInfoOptionsFree(self.c_options()) };
    }
}

fn info_report(path: &Path, report_proj4: bool) -> Result<RasterInfo> {
    let ds = io::open_read_only(path)?;

    let mut args = vec!["-json".to_string()];
    if report_proj4 {
        args.push("-proj4".to_string());
    }

    let opts = InfoOptions::new(&args)?;
    let json = unsafe {
        let raw = gdal_sys::GDALInfo(ds.c_dataset(), opts.c_options());
        gdalinterop::check_pointer(raw.cast(), "GDALInfo")?;
        let json = CStr::from_ptr(raw).to_string_lossy().into_owned();
        gdal_sys::VSIFree(raw.cast());
        json
    };

    parse_report(&json)
}

fn parse_report(json: &str) -> Result<RasterInfo> {
    Ok(serde_json::from_str(json)?)
}

/// Full info report with coordinate system reporting (PROJ4 included) enabled.
pub fn raster_info(path: impl AsRef<Path>) -> Result<RasterInfo> {
    info_report(path.as_ref(), true)
}

/// The georeferenced corner coordinates of the named raster.
pub fn raster_extent(path: impl AsRef<Path>) -> Result<CornerCoordinates> {
    let path = path.as_ref();
    info_report(path, true)?
        .corner_coordinates
        .ok_or_else(|| Error::Runtime(format!("No corner coordinates reported for {}", path.display())))
}

/// PROJ4 representation of the raster's coordinate system, `None` when the
/// dataset carries no coordinate system metadata.
pub fn proj4(path: impl AsRef<Path>) -> Result<Option<String>> {
    Ok(info_report(path.as_ref(), true)?
        .coordinate_system
        .and_then(|cs| cs.proj4))
}

/// Well known text representation of the raster's coordinate system.
///
/// WKT and PROJ4 reporting are independently toggled flags on the info query,
/// so this runs a report without PROJ4 reporting enabled.
pub fn wkt(path: impl AsRef<Path>) -> Result<String> {
    Ok(info_report(path.as_ref(), false)?
        .coordinate_system
        .map(|cs| cs.wkt)
        .unwrap_or_default())
}

/// Pixel grid size (columns, rows) of the named raster.
pub fn raster_size(path: impl AsRef<Path>) -> Result<RasterSize> {
    let [cols, rows] = info_report(path.as_ref(), true)?.size;
    Ok(RasterSize {
        cols: Columns(cols),
        rows: Rows(rows),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trimmed gdalinfo -json -proj4 output for a 4x3 WGS84 raster.
    const REPORT: &str = r#"{
        "description": "test.tif",
        "driverShortName": "GTiff",
        "size": [4, 3],
        "coordinateSystem": {
            "wkt": "GEOGCRS[\"WGS 84\"]",
            "proj4": "+proj=longlat +datum=WGS84 +no_defs"
        },
        "cornerCoordinates": {
            "upperLeft": [2.0, 51.0],
            "lowerLeft": [2.0, 49.5],
            "lowerRight": [4.0, 49.5],
            "upperRight": [4.0, 51.0],
            "center": [3.0, 50.25]
        }
    }"#;

    #[test]
    fn report_fields_are_extracted() {
        let info = parse_report(REPORT).expect("report should parse");
        assert_eq!(info.size, [4, 3]);

        let corners = info.corner_coordinates.expect("corner coordinates");
        assert_eq!(corners.upper_left, [2.0, 51.0]);
        assert_eq!(corners.lower_right, [4.0, 49.5]);
        assert_eq!(corners.center, [3.0, 50.25]);

        let cs = info.coordinate_system.expect("coordinate system");
        assert_eq!(cs.proj4.as_deref(), Some("+proj=longlat +datum=WGS84 +no_defs"));
        assert!(cs.wkt.contains("WGS 84"));
    }

    #[test]
    fn missing_coordinate_system_is_not_an_error() {
        let info = parse_report(r#"{"size": [10, 10]}"#).expect("report should parse");
        assert!(info.coordinate_system.is_none());
        assert!(info.corner_coordinates.is_none());
        assert_eq!(info.size, [10, 10]);
    }
}
