//! Tool registry for managing available tools

use crate::Tool;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of the tools a server exposes
///
/// Built once at startup and handed to the server; tools are listed in
/// registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    ///
    /// A tool registered under an existing name replaces the earlier one and
    /// keeps its position.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        match self.by_name.get(tool.name()) {
            Some(&position) => {
                tracing::debug!(tool = tool.name(), "replacing registered tool");
                self.tools[position] = tool;
            }
            None => {
                tracing::debug!(tool = tool.name(), "registering tool");
                self.by_name.insert(tool.name().to_string(), self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Builder-style [`ToolRegistry::register`]
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.by_name
            .get(name)
            .map(|&position| self.tools[position].clone())
    }

    /// List all registered tools in registration order
    pub fn list_tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.tools.iter().map(|tool| tool.name()))
            .finish()
    }
}
