//! Interactive editing session
//!
//! A small line-editing loop over a `ConfigModel`: load a base config,
//! tweak fields, compare and save without leaving the terminal.

use anyhow::Result;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::document::to_pretty_json;
use crate::fields::DAILY_TWEAKS;
use crate::model::{ConfigModel, Status};

/// What the loop should do after a command
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Interactive editing session
pub struct EditSession {
    model: ConfigModel,
    output_dir: PathBuf,
}

impl EditSession {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            model: ConfigModel::new(),
            output_dir,
        }
    }

    pub fn model(&self) -> &ConfigModel {
        &self.model
    }

    /// Load the base config the session edits
    pub fn load(&mut self, path: &Path) -> Status {
        let (model, status, _) = std::mem::take(&mut self.model).set_base(path);
        self.model = model;
        status
    }

    /// Start the interactive loop
    pub fn run(&mut self, path: &Path) -> Result<()> {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║  Kohya Config Editing Session                                 ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();

        let status = self.load(path);
        println!("{}", status);
        println!();
        println!("Commands:");
        println!("  /set <key> <value>  - Change a daily tweak");
        println!("  /tweaks             - List daily tweaks and their values");
        println!("  /summary            - Show the working config summary");
        println!("  /compare <path>     - Compare the base config with another file");
        println!("  /suggest            - Suggest a filename");
        println!("  /save [name]        - Save the working config");
        println!("  /reset              - Discard edits");
        println!("  /show               - Show the working config JSON");
        println!("  /load <path>        - Load another base config");
        println!("  /exit               - Exit session");
        println!();

        let mut rl = DefaultEditor::new()?;

        loop {
            match rl.readline("kohya> ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(trimmed)?;

                    match self.handle_command(trimmed) {
                        Ok(Flow::Exit) => break,
                        Ok(Flow::Continue) => {}
                        Err(e) => println!("✗ Error: {}", e),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("Interrupted. Use /exit to quit.");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("EOF");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        println!("\nSession ended.");
        Ok(())
    }

    /// Handle one command line
    pub fn handle_command(&mut self, line: &str) -> Result<Flow> {
        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };
        debug!(cmd, "session command");

        match cmd {
            "/set" => {
                let Some((key, value)) = rest.split_once(char::is_whitespace).or_else(|| {
                    (!rest.is_empty()).then_some((rest, ""))
                }) else {
                    println!("Usage: /set <key> <value>");
                    return Ok(Flow::Continue);
                };
                let model = std::mem::take(&mut self.model);
                let (model, status) = model.update_tweaks([(key, value.trim())]);
                self.model = model;
                println!("{}", status);
            }
            "/tweaks" => {
                let values = self.model.tweak_values();
                if values.is_empty() {
                    println!("No configuration loaded.");
                }
                for v in values {
                    println!("  {:<18} {}", v.field.key, v.value);
                }
            }
            "/summary" => println!("\n{}\n", self.model.summary()),
            "/compare" => {
                if rest.is_empty() {
                    println!("Usage: /compare <path>");
                    return Ok(Flow::Continue);
                }
                let model = std::mem::take(&mut self.model);
                let (model, report) = model.compare_with(Path::new(rest));
                self.model = model;
                println!("\n{}\n", report);
            }
            "/suggest" => println!("{}", self.model.suggest_filename()),
            "/save" => {
                let filename = if rest.is_empty() {
                    self.model.suggest_filename()
                } else {
                    rest.to_string()
                };
                println!("{}", self.model.save(&filename, &self.output_dir));
            }
            "/reset" => {
                let (model, status) = std::mem::take(&mut self.model).reset_working();
                self.model = model;
                println!("{}", status);
            }
            "/show" => println!("\n{}\n", to_pretty_json(self.model.working())?),
            "/load" => {
                if rest.is_empty() {
                    println!("Usage: /load <path>");
                    return Ok(Flow::Continue);
                }
                println!("{}", self.load(Path::new(rest)));
            }
            "/exit" | "/quit" => {
                println!("\n👋 Exiting editing session...");
                return Ok(Flow::Exit);
            }
            _ => {
                println!("Unknown command: {}", cmd);
                let keys: Vec<&str> = DAILY_TWEAKS.iter().map(|f| f.key).collect();
                println!("Editable keys: {}", keys.join(", "));
            }
        }
        Ok(Flow::Continue)
    }
}
