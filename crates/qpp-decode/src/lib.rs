//! QRDA III decoding.
//!
//! Reads XML into a [`RawElement`] tree and turns it into the template-typed
//! [`qpp_model::Node`] tree, dispatching each templated element to the
//! [`NodeDecoder`] bound to its template.
//!
//! # Example
//!
//! ```ignore
//! use qpp_decode::{decode_document, xml};
//! use qpp_model::ConversionConfig;
//!
//! let raw = xml::parse_str(document)?;
//! let root = decode_document(&raw, &ConversionConfig::default());
//! ```

pub mod decoders;
mod decode;
pub mod error;
pub mod raw;
pub mod xml;

pub use decode::{QrdaDecoder, decode_document, decode_file, decode_with, identify};
pub use decoders::{DecoderRegistry, DefaultDecoder, NodeDecoder, default_registry};
pub use error::{DecodeError, Result};
pub use raw::{RawElement, TEMPLATE_ID_ELEMENT};
