//! Batch `format` subcommand.

use checklist_core::{
    Clipboard, EditError, ExportError, FormatterDefaults, FormatterSession, InputError, ItemType,
    ProcessError, SessionError, DEFAULT_SECTION_TITLE,
};
use clap::Args;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Document title (required, non-blank).
    #[arg(long)]
    pub document_title: String,

    #[arg(long, default_value = DEFAULT_SECTION_TITLE)]
    pub section_title: String,

    /// Input JSON file; reads stdin when omitted or `-`.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Item type override as `ROW=TYPE` (1-based row), repeatable.
    #[arg(long = "type", value_name = "ROW=TYPE", value_parser = parse_type_edit)]
    pub types: Vec<(usize, ItemType)>,

    /// Mark row as mandatory (1-based), repeatable.
    #[arg(long = "mandatory", value_name = "ROW", value_parser = parse_row)]
    pub mandatory: Vec<usize>,

    /// Write JSON here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Also copy the JSON to the system clipboard.
    #[arg(long)]
    pub copy: bool,
}

#[derive(Debug)]
pub enum FormatError {
    Read { path: String, source: io::Error },
    Write { path: String, source: io::Error },
    Session(SessionError),
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => write!(f, "failed to read `{path}`: {source}"),
            Self::Write { path, source } => write!(f, "failed to write `{path}`: {source}"),
            Self::Session(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FormatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Session(err) => Some(err),
        }
    }
}

impl From<SessionError> for FormatError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

impl From<InputError> for FormatError {
    fn from(value: InputError) -> Self {
        Self::Session(value.into())
    }
}

impl From<ProcessError> for FormatError {
    fn from(value: ProcessError) -> Self {
        Self::Session(value.into())
    }
}

impl From<EditError> for FormatError {
    fn from(value: EditError) -> Self {
        Self::Session(value.into())
    }
}

impl From<ExportError> for FormatError {
    fn from(value: ExportError) -> Self {
        Self::Session(value.into())
    }
}

/// Parses a 1-based row number into a 0-based index.
pub(crate) fn parse_row(value: &str) -> Result<usize, String> {
    let row = value
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("`{value}` is not a row number"))?;
    row.checked_sub(1)
        .ok_or_else(|| "rows are numbered from 1".to_string())
}

/// Parses `ROW=TYPE` into a 0-based index and item type.
pub fn parse_type_edit(value: &str) -> Result<(usize, ItemType), String> {
    let (row, kind) = value
        .split_once('=')
        .ok_or_else(|| format!("`{value}` must look like ROW=TYPE"))?;
    let kind = kind.parse::<ItemType>().map_err(|err| err.to_string())?;
    Ok((parse_row(row)?, kind))
}

/// Runs one batch conversion and returns the edited session.
pub fn build_session(args: &FormatArgs, input: &str) -> Result<FormatterSession, FormatError> {
    let mut session = FormatterSession::new(FormatterDefaults::default());
    session.set_document_title(args.document_title.as_str());
    session.set_section_title(args.section_title.as_str());
    session.paste(input)?;
    session.process()?;

    for &(index, kind) in &args.types {
        session.set_type(index, kind)?;
    }
    for &index in &args.mandatory {
        session.set_mandatory(index, true)?;
    }

    info!(
        "event=format_done module=cli status=ok items={} type_edits={} mandatory_edits={}",
        session.records().len(),
        args.types.len(),
        args.mandatory.len()
    );
    Ok(session)
}

/// Runs one batch conversion and returns the export text.
pub fn render(args: &FormatArgs, input: &str) -> Result<String, FormatError> {
    Ok(build_session(args, input)?.export_json()?)
}

pub fn run(args: &FormatArgs, clipboard: &mut dyn Clipboard) -> Result<(), FormatError> {
    let input = read_input(args.input.as_deref())?;
    let session = build_session(args, &input)?;
    let json = session.export_json()?;

    match args.output.as_deref() {
        Some(path) => std::fs::write(path, format!("{json}\n")).map_err(|source| {
            FormatError::Write {
                path: path.display().to_string(),
                source,
            }
        })?,
        None => println!("{json}"),
    }

    if args.copy {
        // Copy failure is reported but the JSON has already been emitted.
        match session.copy_to(clipboard) {
            Ok(()) => eprintln!("JSON copied to clipboard!"),
            Err(err) => eprintln!("warning: failed to copy to clipboard: {err}"),
        }
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String, FormatError> {
    match path {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|source| FormatError::Read {
                path: path.display().to_string(),
                source,
            })
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| FormatError::Read {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_row, parse_type_edit, read_input, render, run, FormatArgs, FormatError};
    use checklist_core::{
        Clipboard, ClipboardError, ItemType, MemoryClipboard, SessionError,
        DEFAULT_SECTION_TITLE,
    };
    use std::io::Write;

    fn args(document_title: &str) -> FormatArgs {
        FormatArgs {
            document_title: document_title.to_string(),
            section_title: DEFAULT_SECTION_TITLE.to_string(),
            input: None,
            types: Vec::new(),
            mandatory: Vec::new(),
            output: None,
            copy: false,
        }
    }

    #[test]
    fn rows_are_one_based() {
        assert_eq!(parse_row("1"), Ok(0));
        assert_eq!(parse_row(" 12 "), Ok(11));
        assert!(parse_row("0").is_err());
        assert!(parse_row("x").is_err());
    }

    #[test]
    fn type_edit_parses_row_and_type() {
        assert_eq!(
            parse_type_edit("2=passfail_decline"),
            Ok((1, ItemType::PassFailDecline))
        );
        assert!(parse_type_edit("2").is_err());
        assert!(parse_type_edit("2=checkbox").is_err());
    }

    #[test]
    fn render_applies_edits() {
        let mut args = args("Safety");
        args.types = vec![(1, ItemType::TextType2)];
        args.mandatory = vec![0];

        let json = render(
            &args,
            r#"[{"line":"1","name":"Extinguisher"},{"line":"2","name":"Notes"}]"#,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let items = &value[0]["children"][0]["children"];

        assert_eq!(value[0]["children"][0]["text"], "Inspection List");
        assert_eq!(items[0]["is_mandatory"], true);
        assert_eq!(items[0]["type"], "number_type2");
        assert_eq!(items[1]["type"], "text_type2");
        assert_eq!(items[1]["is_mandatory"], false);
    }

    #[test]
    fn render_rejects_out_of_range_edit() {
        let mut args = args("Safety");
        args.mandatory = vec![4];
        let err = render(&args, r#"[{"line":"1","name":"a"}]"#).unwrap_err();
        assert!(matches!(err, FormatError::Session(SessionError::Edit(_))));
    }

    #[test]
    fn render_rejects_blank_document_title() {
        let err = render(&args(" "), r#"[{"line":"1","name":"a"}]"#).unwrap_err();
        assert!(matches!(err, FormatError::Session(SessionError::Process(_))));
    }

    #[test]
    fn read_input_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"[{"line":"1","name":"a"}]"#).unwrap();
        let text = read_input(Some(file.path())).unwrap();
        assert!(text.contains("\"line\""));
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable)
        }
    }

    fn write_input(dir: &std::path::Path) -> std::path::PathBuf {
        let input = dir.join("input.json");
        std::fs::write(
            &input,
            r#"[{"line":"1","name":"Extinguisher"},{"line":"2","name":"Exit sign"}]"#,
        )
        .unwrap();
        input
    }

    #[test]
    fn run_writes_output_file_and_copies() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.json");
        let mut args = args("Safety");
        args.input = Some(write_input(dir.path()));
        args.output = Some(output.clone());
        args.mandatory = vec![1];
        args.copy = true;

        let mut clipboard = MemoryClipboard::new();
        run(&args, &mut clipboard).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        let copied: serde_json::Value =
            serde_json::from_str(clipboard.contents().unwrap()).unwrap();

        assert_eq!(written[0]["text"], "Safety");
        assert_eq!(written[0]["children"][0]["children"][1]["is_mandatory"], true);
        assert_eq!(written[0]["id"], copied[0]["id"]);
        assert_eq!(
            written[0]["children"][0]["children"],
            copied[0]["children"][0]["children"]
        );
    }

    #[test]
    fn run_without_copy_leaves_clipboard_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args("Safety");
        args.input = Some(write_input(dir.path()));
        args.output = Some(dir.path().join("out.json"));

        let mut clipboard = MemoryClipboard::new();
        run(&args, &mut clipboard).unwrap();
        assert_eq!(clipboard.contents(), None);
    }

    #[test]
    fn run_succeeds_when_copy_fails() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.json");
        let mut args = args("Safety");
        args.input = Some(write_input(dir.path()));
        args.output = Some(output.clone());
        args.copy = true;

        run(&args, &mut BrokenClipboard).unwrap();
        assert!(std::fs::read_to_string(&output)
            .unwrap()
            .contains("Extinguisher"));
    }

    #[test]
    fn run_reports_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args("Safety");
        args.input = Some(dir.path().join("missing.json"));

        let err = run(&args, &mut MemoryClipboard::new()).unwrap_err();
        assert!(matches!(err, FormatError::Read { .. }));
    }
}
