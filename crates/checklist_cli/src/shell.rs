//! Interactive `shell` subcommand.
//!
//! # Responsibility
//! - Drive one [`FormatterSession`] from line-oriented commands.
//! - Print user-facing results and errors without ending the session.
//!
//! # Invariants
//! - Command errors are printed and the loop continues.
//! - Only I/O failures on the shell's own streams end the loop with an error.

use crate::format_cmd::parse_row;
use checklist_core::{Clipboard, FormatterDefaults, FormatterSession, ItemType, PasteOutcome};
use clap::Args;
use log::debug;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Line that terminates a multi-line `paste`.
pub const PASTE_TERMINATOR: &str = "END";

const HELP: &str = "\
commands:
  doc TITLE            set document title
  section TITLE        set section title
  paste                paste JSON; finish with a line containing only END
  load PATH            paste JSON from a file
  process              generate items from the pasted JSON
  table                show generated items
  type ROW TYPE        set item type (see `types`)
  mandatory ROW [on|off]
                       set or toggle the mandatory flag
  types                list item types
  json                 print the export JSON
  copy                 copy the export JSON to the clipboard
  save PATH            write the export JSON to a file
  help                 show this help
  quit                 leave the shell";

#[derive(Debug, Args)]
pub struct ShellArgs {
    #[arg(long)]
    pub document_title: Option<String>,

    #[arg(long)]
    pub section_title: Option<String>,
}

impl ShellArgs {
    pub fn into_session(self, defaults: FormatterDefaults) -> FormatterSession {
        let mut session = FormatterSession::new(defaults);
        if let Some(title) = self.document_title {
            session.set_document_title(title);
        }
        if let Some(title) = self.section_title {
            session.set_section_title(title);
        }
        session
    }
}

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    DocumentTitle(String),
    SectionTitle(String),
    Paste,
    Load(PathBuf),
    Process,
    Table,
    SetType { index: usize, kind: ItemType },
    /// `None` toggles.
    Mandatory { index: usize, value: Option<bool> },
    Types,
    Json,
    Copy,
    Save(PathBuf),
    Help,
    Quit,
    Empty,
}

/// Parses one command line. Row numbers are 1-based on input, 0-based in the result.
pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "" => ShellCommand::Empty,
        "doc" | "document" => ShellCommand::DocumentTitle(rest.to_string()),
        "section" => ShellCommand::SectionTitle(rest.to_string()),
        "paste" => ShellCommand::Paste,
        "load" => ShellCommand::Load(required_path(rest, "load")?),
        "process" => ShellCommand::Process,
        "table" => ShellCommand::Table,
        "type" => {
            let (row, kind) = rest
                .split_once(char::is_whitespace)
                .ok_or("usage: type ROW TYPE")?;
            ShellCommand::SetType {
                index: parse_row(row)?,
                kind: kind.parse::<ItemType>().map_err(|err| err.to_string())?,
            }
        }
        "mandatory" => {
            let mut parts = rest.split_whitespace();
            let index = parse_row(parts.next().ok_or("usage: mandatory ROW [on|off]")?)?;
            let value = match parts.next() {
                None => None,
                Some(flag) => Some(parse_flag(flag)?),
            };
            ShellCommand::Mandatory { index, value }
        }
        "types" => ShellCommand::Types,
        "json" => ShellCommand::Json,
        "copy" => ShellCommand::Copy,
        "save" => ShellCommand::Save(required_path(rest, "save")?),
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command `{other}`; try `help`")),
    };
    Ok(command)
}

fn parse_flag(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" | "1" => Ok(true),
        "off" | "no" | "false" | "0" => Ok(false),
        other => Err(format!("`{other}` is not on|off")),
    }
}

fn required_path(rest: &str, verb: &str) -> Result<PathBuf, String> {
    if rest.is_empty() {
        return Err(format!("usage: {verb} PATH"));
    }
    Ok(PathBuf::from(rest))
}

/// Line-oriented session driver.
pub struct Shell<'a, R, W> {
    session: FormatterSession,
    clipboard: &'a mut dyn Clipboard,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(
        session: FormatterSession,
        clipboard: &'a mut dyn Clipboard,
        input: R,
        output: W,
    ) -> Self {
        Self {
            session,
            clipboard,
            input,
            output,
        }
    }

    pub fn session(&self) -> &FormatterSession {
        &self.session
    }

    /// Reads commands until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "checklist shell; type `help` for commands")?;
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };
            match parse_command(&line) {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => self.execute(command)?,
                Err(message) => writeln!(self.output, "error: {message}")?,
            }
        }
        debug!("event=shell_exit module=cli status=ok");
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn read_paste_block(&mut self) -> io::Result<String> {
        let mut block = String::new();
        while let Some(line) = self.read_line()? {
            if line.trim() == PASTE_TERMINATOR {
                break;
            }
            block.push_str(&line);
            block.push('\n');
        }
        Ok(block)
    }

    fn execute(&mut self, command: ShellCommand) -> io::Result<()> {
        match command {
            ShellCommand::Empty | ShellCommand::Quit => {}
            ShellCommand::Help => writeln!(self.output, "{HELP}")?,
            ShellCommand::DocumentTitle(title) => {
                self.session.set_document_title(title);
                writeln!(self.output, "Document title set.")?;
            }
            ShellCommand::SectionTitle(title) => {
                self.session.set_section_title(title);
                writeln!(self.output, "Section title set.")?;
            }
            ShellCommand::Paste => {
                writeln!(self.output, "Paste JSON, then a line with {PASTE_TERMINATOR}:")?;
                let text = self.read_paste_block()?;
                self.paste(text)?;
            }
            ShellCommand::Load(path) => match std::fs::read_to_string(&path) {
                Ok(text) => self.paste(text)?,
                Err(err) => writeln!(
                    self.output,
                    "error: failed to read `{}`: {err}",
                    path.display()
                )?,
            },
            ShellCommand::Process => match self.session.process() {
                Ok(count) => {
                    writeln!(self.output, "Generated {count} item(s).")?;
                    write!(self.output, "{}", self.session.table())?;
                }
                Err(err) => writeln!(self.output, "error: {err}")?,
            },
            ShellCommand::Table => write!(self.output, "{}", self.session.table())?,
            ShellCommand::SetType { index, kind } => match self.session.set_type(index, kind) {
                Ok(()) => writeln!(self.output, "Row {} type set to {kind}.", index + 1)?,
                Err(err) => writeln!(self.output, "error: {err}")?,
            },
            ShellCommand::Mandatory { index, value } => {
                let result = match value {
                    Some(value) => self.session.set_mandatory(index, value).map(|()| value),
                    None => self.session.toggle_mandatory(index),
                };
                match result {
                    Ok(value) => writeln!(
                        self.output,
                        "Row {} mandatory: {}.",
                        index + 1,
                        if value { "on" } else { "off" }
                    )?,
                    Err(err) => writeln!(self.output, "error: {err}")?,
                }
            }
            ShellCommand::Types => {
                for kind in ItemType::ALL {
                    writeln!(self.output, "  {kind}")?;
                }
            }
            ShellCommand::Json => match self.session.export_json() {
                Ok(json) => writeln!(self.output, "{json}")?,
                Err(err) => writeln!(self.output, "error: {err}")?,
            },
            ShellCommand::Copy => match self.session.copy_to(&mut *self.clipboard) {
                Ok(()) => writeln!(self.output, "JSON copied to clipboard!")?,
                Err(err) => writeln!(self.output, "error: {err}")?,
            },
            ShellCommand::Save(path) => self.save(path)?,
        }
        Ok(())
    }

    fn paste(&mut self, text: String) -> io::Result<()> {
        match self.session.paste(text) {
            Ok(PasteOutcome::Cleared) => writeln!(self.output, "Input cleared."),
            Ok(PasteOutcome::Loaded { count }) => {
                writeln!(self.output, "Loaded {count} record(s).")
            }
            Err(err) => writeln!(self.output, "error: {err}"),
        }
    }

    fn save(&mut self, path: PathBuf) -> io::Result<()> {
        if self.session.records().is_empty() {
            return writeln!(
                self.output,
                "error: no data to save; please process some data first"
            );
        }
        let json = match self.session.export_json() {
            Ok(json) => json,
            Err(err) => return writeln!(self.output, "error: {err}"),
        };
        match std::fs::write(&path, format!("{json}\n")) {
            Ok(()) => writeln!(self.output, "Saved to {}.", path.display()),
            Err(err) => writeln!(
                self.output,
                "error: failed to write `{}`: {err}",
                path.display()
            ),
        }
    }
}
