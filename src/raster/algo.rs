//! Raster transform operations, each a thin configuration layer over one GDAL
//! utility entry point.

mod fillnodata;
mod translate;
mod warp;

pub use fillnodata::{fill_nodata, FillNodataOptions};
pub use translate::{translate, TranslateOptions};
pub use warp::{warp, ResampleAlgorithm, WarpOptions};
