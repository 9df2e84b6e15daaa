#![warn(clippy::unwrap_used)]

pub type Result<T = ()> = std::result::Result<T, Error>;

mod datatype;
mod error;
mod extent;
pub mod gdalinterop;
mod rastersize;
mod runtimeconfiguration;

pub mod raster;
pub mod vector;

#[doc(inline)]
pub use datatype::RasterDataType;
#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use extent::Extent;
#[doc(inline)]
pub use rastersize::{Columns, RasterSize, Rows};
#[doc(inline)]
pub use runtimeconfiguration::RuntimeConfiguration;

pub type Point<T = f64> = geo_types::Point<T>;
