//! Output encoders.
//!
//! [`QppJsonEncoder`] turns a validated QRDA III tree into a QPP submission;
//! [`ErrorReport`] is written instead when validation finds problems.

mod encoder;
pub mod error;
pub mod qpp;
mod report;

pub use encoder::OutputEncoder;
pub use error::{EncodeError, Result};
pub use qpp::{QppJsonEncoder, Submission};
pub use report::ErrorReport;
