//! Interactive session loop.
//!
//! Alternates between two states: Listing (fresh menu shown, awaiting a
//! selection) and Invoking (one of the tool / resource / template branches
//! running). Capabilities are re-listed every round — the server's offerings
//! are not assumed static. Branch failures are displayed and return to
//! Listing; only listing failures themselves are fatal.

use crate::args::build_arguments;
use crate::client::McpClient;
use crate::error::Result;
use crate::menu::{Choice, Menu, Selection};
use crate::prompt::Prompt;
use crate::protocol::{Content, ResourceDef, ResourceTemplateDef, ToolDef};
use crate::template;

/// One interactive session over an initialized client.
pub struct ExplorerSession<P: Prompt> {
    client: McpClient,
    prompt: P,
}

impl<P: Prompt> ExplorerSession<P> {
    /// Wrap an initialized client and an input source.
    pub fn new(client: McpClient, prompt: P) -> Self {
        Self { client, prompt }
    }

    /// Run the menu loop until the user exits or the input source closes.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let (tools, resources, templates) = self.client.list_capabilities().await?;
            let menu = Menu::new(tools, resources, templates);

            if menu.is_empty() {
                println!("No tools or resources available on the server.");
                return Ok(());
            }

            menu.render();

            let Some(input) = self
                .prompt
                .read_line("\nSelect a tool, resource, or template (enter number): ")?
            else {
                println!("\nGoodbye!");
                return Ok(());
            };

            let selection = match menu.parse_choice(&input) {
                Ok(Choice::Exit) => {
                    println!("\nGoodbye!");
                    return Ok(());
                }
                Ok(Choice::Pick(selection)) => selection,
                Err(err) => {
                    println!("Invalid selection: {}. Please try again.", err);
                    continue;
                }
            };

            let outcome = match selection {
                Selection::Tool(tool) => self.invoke_tool(tool).await,
                Selection::Resource(resource) => self.read_resource(resource).await,
                Selection::Template(tpl) => self.read_template(tpl).await,
            };
            if let Err(err) = outcome {
                println!("\nError executing selection: {}", err);
                println!("Please try again.");
                continue;
            }

            match self
                .prompt
                .read_line("\nPress Enter to continue or 'q' to quit: ")?
            {
                Some(answer) if answer.eq_ignore_ascii_case("q") => {
                    println!("\nGoodbye!");
                    return Ok(());
                }
                Some(_) => {}
                None => {
                    println!("\nGoodbye!");
                    return Ok(());
                }
            }
        }
    }

    /// Tool branch: build arguments, call, render content and error flag.
    ///
    /// A result with `is_error` set is displayed as content plus an error
    /// line — it is a tool-reported failure, not a local one.
    async fn invoke_tool(&mut self, tool: &ToolDef) -> Result<()> {
        println!("\nExecuting tool: {}", tool.name);
        println!("{}", "=".repeat(60));

        let arguments = build_arguments(&tool.input_schema, &mut self.prompt)?;

        println!("\nCalling {} with arguments:", tool.name);
        println!("{}", serde_json::to_string_pretty(&arguments)?);

        let result = self.client.call_tool(&tool.name, arguments).await?;

        println!("\nResult:");
        print_content(&result.content);
        if result.is_error {
            println!("\nTool returned an error");
        }
        println!("{}", "-".repeat(60));
        Ok(())
    }

    /// Direct resource branch.
    async fn read_resource(&mut self, resource: &ResourceDef) -> Result<()> {
        println!("\nReading resource: {}", resource.name);
        println!("{}", "=".repeat(60));
        println!("URI: {}", resource.uri);

        let result = self.client.read_resource(&resource.uri).await?;

        println!("\nResource Contents:");
        print_content(&result.contents);
        println!("{}", "-".repeat(60));
        Ok(())
    }

    /// Templated resource branch: resolve the address first, then read.
    async fn read_template(&mut self, tpl: &ResourceTemplateDef) -> Result<()> {
        println!("\nReading resource template: {}", tpl.name);
        println!("{}", "=".repeat(60));
        println!("URI Template: {}", tpl.uri_template);

        let Some(uri) = template::resolve(&tpl.uri_template, &mut self.prompt)? else {
            // Resolution aborted; no request is issued.
            return Ok(());
        };

        println!("\nConstructed URI: {}", uri);

        let result = self.client.read_resource(&uri).await?;

        println!("\nResource Contents:");
        print_content(&result.contents);
        println!("{}", "-".repeat(60));
        Ok(())
    }
}

fn print_content(items: &[Content]) {
    println!("{}", "-".repeat(60));
    if items.is_empty() {
        println!("(No content returned)");
        return;
    }
    for item in items {
        println!("{}", item);
    }
}
