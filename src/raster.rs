//! Raster side of the library: dataset opening, metadata queries and the
//! transform operations that delegate to the GDAL utility interfaces.

pub mod algo;
pub mod info;
pub mod io;
