use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::{Env, TimestampPrecision};

use geoproc::raster::{algo, info};
use geoproc::vector;
use geoproc::{Columns, Extent, RasterDataType, RasterSize, Rows, RuntimeConfiguration};

pub type Result<T = ()> = anyhow::Result<T>;

#[derive(Parser, Debug)]
#[clap(name = "geoproc-cli", about = "Convenience front end for common GDAL raster and vector operations")]
struct Opt {
    /// Enable GDAL debug logging
    #[arg(long = "gdal-debug")]
    gdal_debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print grid size, corner coordinates and coordinate system of a raster
    Info {
        input: PathBuf,
    },
    /// Print the bounding extent of a shapefile
    Extent {
        input: PathBuf,
    },
    /// Reproject and resample a raster
    Warp {
        input: PathBuf,
        output: PathBuf,

        /// Source coordinate system definition
        #[arg(long = "s-srs")]
        s_srs: Option<String>,

        /// Destination coordinate system definition
        #[arg(long = "t-srs")]
        t_srs: Option<String>,

        /// Target extent <xmin ymin xmax ymax> in the destination coordinate system
        #[arg(long, num_args = 4, allow_hyphen_values = true)]
        te: Option<Vec<f64>>,

        /// Target size in pixels <columns rows>
        #[arg(long, num_args = 2)]
        ts: Option<Vec<usize>>,

        /// Output pixel type
        #[arg(long)]
        ot: Option<RasterDataType>,

        /// Resampling algorithm
        #[arg(long, default_value = "near")]
        resample: algo::ResampleAlgorithm,
    },
    /// Convert a raster to another format
    Translate {
        input: PathBuf,
        output: PathBuf,

        /// Short name of the output driver
        #[arg(long, default_value = "AAIGrid")]
        format: String,

        /// Output pixel type
        #[arg(long, default_value = "float32")]
        ot: RasterDataType,

        /// Nodata value assigned to the output
        #[arg(long, default_value_t = -9999.0, allow_hyphen_values = true)]
        nodata: f64,

        /// Creation options passed to the output driver
        #[arg(long = "co", num_args = 1)]
        creation_options: Vec<String>,
    },
    /// Burn a shapefile attribute into a raster grid
    Rasterize {
        shapefile: PathBuf,
        output: PathBuf,

        /// Attribute field whose values are burned
        #[arg(long)]
        attribute: String,

        /// Square pixel size in target units
        #[arg(long)]
        resolution: f64,

        /// Coordinate system assigned to the output
        #[arg(long = "a-srs")]
        a_srs: Option<String>,

        /// Short name of the output driver
        #[arg(long, default_value = "HFA")]
        format: String,

        /// Output pixel type
        #[arg(long, default_value = "float32")]
        ot: RasterDataType,

        /// Output bounds <xmin ymin xmax ymax>; derived from the shapefile when omitted
        #[arg(long, num_args = 4, allow_hyphen_values = true)]
        te: Option<Vec<f64>>,

        /// Layer to rasterize; the default layer when omitted
        #[arg(long)]
        layer: Option<String>,
    },
    /// Fill nodata holes in a raster band by interpolation
    Fillnodata {
        input: PathBuf,

        /// Destination file; without it the command does nothing
        #[arg(long)]
        output: Option<PathBuf>,

        /// 1-based band to interpolate
        #[arg(long, default_value_t = 1)]
        band: usize,

        /// Short name of the output driver
        #[arg(long, default_value = "GTiff")]
        driver: String,

        /// Maximum search distance in pixels
        #[arg(long = "max-distance", default_value_t = 100.0)]
        max_distance: f64,

        /// Number of 3x3 smoothing passes over the filled area
        #[arg(long = "smoothing-iterations", default_value_t = 0)]
        smoothing_iterations: u32,

        /// Creation options passed to the output driver
        #[arg(long = "co", num_args = 1)]
        creation_options: Vec<String>,
    },
}

fn run(command: Command) -> Result {
    match command {
        Command::Info { input } => {
            let report = info::raster_info(&input)?;
            let [cols, rows] = report.size;
            println!("Size: {}", RasterSize::with_rows_cols(Rows(rows), Columns(cols)));

            if let Some(corners) = report.corner_coordinates {
                println!("Upper left:  ({}, {})", corners.upper_left[0], corners.upper_left[1]);
                println!("Lower left:  ({}, {})", corners.lower_left[0], corners.lower_left[1]);
                println!("Upper right: ({}, {})", corners.upper_right[0], corners.upper_right[1]);
                println!("Lower right: ({}, {})", corners.lower_right[0], corners.lower_right[1]);
                println!("Center:      ({}, {})", corners.center[0], corners.center[1]);
            }

            if let Some(cs) = report.coordinate_system {
                if let Some(proj4) = cs.proj4 {
                    println!("PROJ4: {}", proj4.trim());
                }
                if !cs.wkt.is_empty() {
                    println!("WKT: {}", cs.wkt);
                }
            }
        }
        Command::Extent { input } => {
            let extent = vector::io::shapefile_extent(&input)?;
            println!(
                "{} {} {} {}",
                extent.xmin, extent.ymin, extent.xmax, extent.ymax
            );
        }
        Command::Warp {
            input,
            output,
            s_srs,
            t_srs,
            te,
            ts,
            ot,
            resample,
        } => {
            let options = algo::WarpOptions {
                src_srs: s_srs,
                target_extent: te.map(|v| Extent::new(v[0], v[1], v[2], v[3])),
                target_extent_srs: t_srs.clone(),
                dst_srs: t_srs,
                target_size: ts.map(|v| RasterSize::with_rows_cols(Rows(v[1]), Columns(v[0]))),
                output_type: ot,
                resample_algorithm: resample,
                ..Default::default()
            };
            algo::warp(&input, &output, &options)?;
            log::info!("Warped {} -> {}", input.display(), output.display());
        }
        Command::Translate {
            input,
            output,
            format,
            ot,
            nodata,
            creation_options,
        } => {
            let options = algo::TranslateOptions {
                format,
                output_type: ot,
                nodata: Some(nodata),
                creation_options,
            };
            algo::translate(&input, &output, &options)?;
            log::info!("Translated {} -> {}", input.display(), output.display());
        }
        Command::Rasterize {
            shapefile,
            output,
            attribute,
            resolution,
            a_srs,
            format,
            ot,
            te,
            layer,
        } => {
            let options = vector::algo::RasterizeOptions {
                output_srs: a_srs,
                format,
                output_type: ot,
                extent: te.map(|v| Extent::new(v[0], v[1], v[2], v[3])),
                resolution,
                attribute,
                layer,
                ..Default::default()
            };
            vector::algo::rasterize(&output, &shapefile, &options)?;
            log::info!("Rasterized {} -> {}", shapefile.display(), output.display());
        }
        Command::Fillnodata {
            input,
            output,
            band,
            driver,
            max_distance,
            smoothing_iterations,
            creation_options,
        } => {
            let options = algo::FillNodataOptions {
                band,
                driver_name: driver,
                creation_options,
                max_distance,
                smoothing_iterations,
            };
            algo::fill_nodata(&input, output.as_deref(), &options)?;
            match output {
                Some(output) => log::info!("Filled {} -> {}", input.display(), output.display()),
                None => log::warn!("No destination given, nothing to do"),
            }
        }
    }

    Ok(())
}

fn main() -> Result {
    let opt = Opt::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let gdal_config = RuntimeConfiguration::builder().debug_logging(opt.gdal_debug).build();
    gdal_config.apply().context("Failed to configure GDAL")?;

    run(opt.command)
}
