//! Read-only view over the tools discovered from a server

use std::collections::HashMap;

use crate::types::{Tool, ToolDeclaration};

/// The discovered, immutable set of tool descriptors for one session
///
/// Order is the order the server listed them in. If the server lists a
/// name twice, the first descriptor wins.
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    tools: Vec<Tool>,
    index: HashMap<String, usize>,
}

impl ToolCatalog {
    pub fn new(tools: Vec<Tool>) -> Self {
        let mut unique = Vec::with_capacity(tools.len());
        let mut index = HashMap::with_capacity(tools.len());
        for tool in tools {
            if index.contains_key(&tool.name) {
                continue;
            }
            index.insert(tool.name.clone(), unique.len());
            unique.push(tool);
        }
        Self { tools: unique, index }
    }

    /// All descriptors, in catalog order
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Look up a descriptor by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Project every descriptor into a function declaration, in catalog order
    pub fn declarations(&self) -> Vec<ToolDeclaration> {
        self.tools.iter().map(ToolDeclaration::from).collect()
    }
}
