use std::io::Write;

use qpp_model::Node;

use crate::error::Result;

/// Serializes a validated tree into an output document.
///
/// Implementations hold no per-file state and are shared by every task of
/// a batch.
pub trait OutputEncoder: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    fn encode(&self, root: &Node, sink: &mut dyn Write) -> Result<()>;
}
