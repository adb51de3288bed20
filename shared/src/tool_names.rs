//! Friendly tool names.

use std::collections::HashMap;

use crate::task::ToolInfo;

/// Tool name to friendly name lookup, reloaded on every list load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolNames {
    names: HashMap<String, String>,
}

impl ToolNames {
    /// Build the lookup from `GET /api/tools`. Tools without a display name are skipped.
    pub fn from_tools(tools: impl IntoIterator<Item = ToolInfo>) -> Self {
        let names = tools
            .into_iter()
            .filter_map(|tool| {
                let display = tool.display_name?.trim().to_string();
                (!display.is_empty()).then_some((tool.name, display))
            })
            .collect();
        Self {
            names,
        }
    }

    /// Friendly name for `name`, or `name` itself when unknown.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.names.get(name).map(String::as_str).unwrap_or(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_and_passes_through_unknown() {
        let names = ToolNames::from_tools(vec![
            ToolInfo {
                name: "web_search".to_string(),
                display_name: Some("Web Search".to_string()),
            },
            ToolInfo {
                name: "shell".to_string(),
                display_name: Some(" ".to_string()),
            },
        ]);
        assert_eq!(names, ToolNames::from_tools(vec![ToolInfo {
            name: "web_search".to_string(),
            display_name: Some("Web Search".to_string()),
        }]));
        assert_eq!(names.resolve("web_search"), "Web Search");
        assert_eq!(names.resolve("shell"), "shell");
        assert_eq!(names.resolve("unknown"), "unknown");
    }
}
