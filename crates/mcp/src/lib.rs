//! Agent tool layer over the kanban service.
//!
//! Exposes board operations as named tools with JSON Schema inputs and
//! camelCase arguments, plus read-only `kanban://` resources. Every write made
//! through this layer is attributed to the `mcp-agent` actor. Transport
//! framing is left to the embedding server.

#![forbid(unsafe_code)]

mod args;
mod definitions;
mod dispatch;
pub mod resources;
mod result;
mod tools;

pub use definitions::tool_definitions;
pub use dispatch::tool_names;
pub use resources::{resource_templates, ResourceContents, ResourceDescriptor};
pub use result::{ToolContent, ToolResult};
pub use tools::KanbanTools;
