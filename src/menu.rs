//! Capability menu: listing layout and ordinal selection.
//!
//! One menu is a snapshot of a single listing round: tools first, then
//! direct resources, then resource templates, each with a 1-based ordinal.
//! Ordinal 0 (or empty input) exits. Snapshots are rebuilt from fresh
//! listings every loop iteration, so ordinals are only stable within one
//! round.

use crate::error::{ExplorerError, Result};
use crate::protocol::{ResourceDef, ResourceTemplateDef, ToolDef};

/// One round's capability snapshot.
pub struct Menu {
    /// Tools, ordinals `1..=tools.len()`
    pub tools: Vec<ToolDef>,
    /// Direct resources, ordinals following the tools
    pub resources: Vec<ResourceDef>,
    /// Resource templates, ordinals following the resources
    pub templates: Vec<ResourceTemplateDef>,
}

/// The capability a valid ordinal maps to.
#[derive(Debug)]
pub enum Selection<'a> {
    /// A tool invocation
    Tool(&'a ToolDef),
    /// A direct resource read
    Resource(&'a ResourceDef),
    /// A templated resource read
    Template(&'a ResourceTemplateDef),
}

/// Outcome of parsing one selection input line.
#[derive(Debug)]
pub enum Choice<'a> {
    /// `0` or empty input
    Exit,
    /// A valid ordinal
    Pick(Selection<'a>),
}

impl Menu {
    /// Build a snapshot from freshly listed capabilities.
    pub fn new(
        tools: Vec<ToolDef>,
        resources: Vec<ResourceDef>,
        templates: Vec<ResourceTemplateDef>,
    ) -> Self {
        Self {
            tools,
            resources,
            templates,
        }
    }

    /// Total number of selectable capabilities.
    pub fn len(&self) -> usize {
        self.tools.len() + self.resources.len() + self.templates.len()
    }

    /// True when the server offers nothing at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Map a 1-based ordinal to its capability.
    ///
    /// Branching is purely by range membership: `[1, tools]` is a tool,
    /// `(tools, tools+resources]` a direct resource, the remainder a
    /// template.
    pub fn select(&self, ordinal: usize) -> Option<Selection<'_>> {
        if ordinal == 0 || ordinal > self.len() {
            return None;
        }
        let index = ordinal - 1;
        if index < self.tools.len() {
            return Some(Selection::Tool(&self.tools[index]));
        }
        let index = index - self.tools.len();
        if index < self.resources.len() {
            return Some(Selection::Resource(&self.resources[index]));
        }
        Some(Selection::Template(&self.templates[index - self.resources.len()]))
    }

    /// Parse one line of selection input.
    ///
    /// Non-numeric and out-of-range input are recoverable errors; the caller
    /// shows them and stays in the listing state.
    pub fn parse_choice(&self, input: &str) -> Result<Choice<'_>> {
        if input.is_empty() || input == "0" {
            return Ok(Choice::Exit);
        }
        let ordinal: usize = input.parse().map_err(|_| {
            ExplorerError::Coerce {
                param_type: "selection".to_string(),
                reason: format!("'{}' is not a number", input),
            }
        })?;
        self.select(ordinal)
            .map(Choice::Pick)
            .ok_or_else(|| ExplorerError::Coerce {
                param_type: "selection".to_string(),
                reason: format!("{} is out of range (1-{})", ordinal, self.len()),
            })
    }

    /// Print the indexed menu: tools, resources, templates, then exit.
    pub fn render(&self) {
        let divider = "=".repeat(60);

        println!("\n{}", divider);
        println!("Available Tools:");
        println!("{}", divider);
        if self.tools.is_empty() {
            println!("\n(No tools available)");
        }
        for (i, tool) in self.tools.iter().enumerate() {
            println!("\n{}. {}", i + 1, tool.name);
            if let Some(description) = &tool.description {
                println!("   {}", description);
            }
        }

        println!("\n{}", divider);
        println!("Available Resources:");
        println!("{}", divider);
        if self.resources.is_empty() {
            println!("\n(No direct resources available)");
        }
        for (i, resource) in self.resources.iter().enumerate() {
            println!("\n{}. {}", self.tools.len() + i + 1, resource.name);
            println!("   URI: {}", resource.uri);
            if let Some(description) = &resource.description {
                println!("   {}", description);
            }
        }

        println!("\n{}", divider);
        println!("Available Resource Templates:");
        println!("{}", divider);
        if self.templates.is_empty() {
            println!("\n(No resource templates available)");
        }
        for (i, template) in self.templates.iter().enumerate() {
            let ordinal = self.tools.len() + self.resources.len() + i + 1;
            println!("\n{}. {}", ordinal, template.name);
            println!("   URI Template: {}", template.uri_template);
            if let Some(description) = &template.description {
                println!("   {}", description);
            }
        }

        println!("\n0. Exit");
        println!("{}", divider);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_menu() -> Menu {
        let tool = |name: &str| ToolDef {
            name: name.to_string(),
            description: None,
            input_schema: serde_json::json!({ "type": "object" }),
        };
        Menu::new(
            vec![tool("search"), tool("store")],
            vec![ResourceDef {
                name: "all-movies".to_string(),
                uri: "movies://all".to_string(),
                description: None,
            }],
            vec![ResourceTemplateDef {
                name: "cast".to_string(),
                uri_template: "movies://{tmdbId}/cast".to_string(),
                description: None,
            }],
        )
    }

    #[test]
    fn ordinals_concatenate_tools_resources_templates() {
        let menu = sample_menu();
        assert_eq!(menu.len(), 4);
        assert!(matches!(menu.select(1), Some(Selection::Tool(t)) if t.name == "search"));
        assert!(matches!(menu.select(2), Some(Selection::Tool(t)) if t.name == "store"));
        assert!(matches!(menu.select(3), Some(Selection::Resource(_))));
        assert!(matches!(menu.select(4), Some(Selection::Template(_))));
        assert!(menu.select(0).is_none());
        assert!(menu.select(5).is_none());
    }

    #[test]
    fn zero_and_empty_input_exit() {
        let menu = sample_menu();
        assert!(matches!(menu.parse_choice("0").unwrap(), Choice::Exit));
        assert!(matches!(menu.parse_choice("").unwrap(), Choice::Exit));
    }

    #[test]
    fn bad_input_is_recoverable() {
        let menu = sample_menu();
        assert!(menu.parse_choice("abc").is_err());
        assert!(menu.parse_choice("5").is_err());
        assert!(menu.parse_choice("-1").is_err());
    }

    #[test]
    fn empty_menu_reports_empty() {
        let menu = Menu::new(Vec::new(), Vec::new(), Vec::new());
        assert!(menu.is_empty());
        assert!(menu.select(1).is_none());
    }
}
