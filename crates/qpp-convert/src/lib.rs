//! QRDA III to QPP batch conversion.
//!
//! [`paths`] turns command line patterns into a file set; [`Converter`]
//! takes one file through decode, validation and encoding; [`run_batch`]
//! fans a file set out over a rayon pool, isolating every file's failure
//! from the others.
//!
//! # Example
//!
//! ```ignore
//! use qpp_convert::{BatchOptions, Converter, run_batch};
//! use qpp_encode::QppJsonEncoder;
//! use qpp_model::ConversionConfig;
//! use qpp_validate::load_default_measure_configs;
//!
//! let config = ConversionConfig::default().with_output_dir("out");
//! let measures = load_default_measure_configs()?;
//! let converter = Converter::new(&config, &measures, &QppJsonEncoder);
//! let report = run_batch(&["reports/*.xml"], &converter, BatchOptions::default());
//! std::process::exit(report.exit_code());
//! ```

mod batch;
mod convert;
pub mod naming;
mod outcome;
pub mod paths;

pub use batch::{BatchOptions, BatchReport, convert_files, run_batch};
pub use convert::Converter;
pub use outcome::{ConversionError, FileReport, Outcome};
pub use paths::{PathError, PathResolution, resolve_patterns};
