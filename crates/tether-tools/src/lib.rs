//! tether-tools: tool placeholders for tools the remote agent executes itself.

mod error;
pub mod placeholder;
pub mod prebuilt;
pub mod registry;
pub mod traits;

pub use error::ToolError;
pub use placeholder::{custom, prebuilt, CustomToolOptions, PlaceholderTool, HANDLED_REMOTELY};
pub use prebuilt::{PrebuiltTool, PREBUILT_TOOLS};
pub use registry::ToolRegistry;
pub use traits::{Tool, ToolResult};
