mod options;
mod terminal;

use anyhow::{Context, Result, bail};
use msgmark_config::Config;
use msgmark_engine::render::collect::attributes_for;
use msgmark_engine::{
    AttributeRange, Construct, EditedText, FormatOptions, Formatter, Highlight, Span, StyleKind,
    TextAttribute, apply_insertion,
};
use std::io::{Read, stdout};
use std::path::{Path, PathBuf};
use std::{env, fs, io, process};

const USAGE: &str = "\
Usage: msgmark [--config <path>] <command>

Commands:
  render <file>                          show the message as it would be displayed
  edit <file> [--no-highlight]           show the message with delimiters highlighted
  plain <file>                           print the render-mode text without styling
  wrap <file> <start> <end> <construct>  insert delimiters around a byte range

Use '-' as <file> to read standard input.
Constructs: bold italic strike code codeblock h1..h6 quote bullet ordered";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Render(PathBuf),
    Edit { file: PathBuf, highlight: bool },
    Plain(PathBuf),
    Wrap {
        file: PathBuf,
        selection: Span,
        construct: Construct,
    },
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    command: Command,
}

fn parse_offset(value: &str, name: &str) -> Result<usize> {
    value
        .parse()
        .with_context(|| format!("{name} must be a byte offset, got {value:?}"))
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut rest = args;
    let mut config = None;
    if let [flag, path, tail @ ..] = rest
        && flag == "--config"
    {
        config = Some(PathBuf::from(path));
        rest = tail;
    }

    let command = match rest {
        [cmd, file] if cmd == "render" => Command::Render(file.into()),
        [cmd, file] if cmd == "plain" => Command::Plain(file.into()),
        [cmd, file] if cmd == "edit" => Command::Edit {
            file: file.into(),
            highlight: true,
        },
        [cmd, file, flag] if cmd == "edit" && flag == "--no-highlight" => Command::Edit {
            file: file.into(),
            highlight: false,
        },
        [cmd, file, start, end, construct] if cmd == "wrap" => Command::Wrap {
            file: file.into(),
            selection: Span::new(parse_offset(start, "start")?, parse_offset(end, "end")?),
            construct: construct.parse()?,
        },
        _ => bail!("unrecognised arguments"),
    };
    Ok(Args { config, command })
}

fn read_input(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read standard input")?;
        return Ok(text);
    }
    fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

/// Attribute ranges for an edit-mode result: content styles plus delimiter colours.
fn edit_attributes(edited: &EditedText, options: &FormatOptions) -> Vec<AttributeRange> {
    let content = edited.styles.iter().flat_map(|style| {
        attributes_for(&style.kind, options)
            .into_iter()
            .map(move |attribute| AttributeRange {
                attribute,
                span: style.span,
            })
    });
    let delimiters = edited.delimiters.iter().filter_map(|d| match d.kind {
        StyleKind::Delimiter { color: Some(c) } => Some(AttributeRange {
            attribute: TextAttribute::Foreground(c),
            span: d.span,
        }),
        _ => None,
    });
    content.chain(delimiters).collect()
}

fn run(args: Args) -> Result<()> {
    let config = Config::load_or_default(args.config.as_deref())?;
    let (options, highlight) = options::from_config(&config)?;
    let formatter = Formatter::new(options);
    let mut out = stdout();

    match args.command {
        Command::Render(file) => {
            let text = read_input(&file)?;
            let rendered = formatter.render(&text, &[]);
            terminal::write_styled(
                &mut out,
                &rendered.text,
                &rendered.attributes,
                &rendered.paragraphs,
            )?;
        }
        Command::Edit { file, highlight: on } => {
            let text = read_input(&file)?;
            let highlight = if on { highlight } else { Highlight::None };
            let edited = formatter.edit(&text, highlight);
            let attributes = edit_attributes(&edited, formatter.options());
            terminal::write_styled(&mut out, &edited.text, &attributes, &[])?;
        }
        Command::Plain(file) => {
            let text = read_input(&file)?;
            println!("{}", formatter.plain_text(&text));
        }
        Command::Wrap {
            file,
            selection,
            construct,
        } => {
            let text = read_input(&file)?;
            let insertion = apply_insertion(&text, selection, construct);
            log::info!(
                "wrapped {}..{} as {construct}, caret at {}",
                selection.start,
                selection.end,
                insertion.caret
            );
            println!("{}", insertion.text);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let argv: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            eprintln!(
                "Settings are read from {} when present.",
                Config::config_path().display()
            );
            process::exit(1);
        }
    };

    run(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use msgmark_engine::Color;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case(&["render", "msg.md"], Command::Render("msg.md".into()))]
    #[case(&["plain", "-"], Command::Plain("-".into()))]
    #[case(&["edit", "msg.md"], Command::Edit { file: "msg.md".into(), highlight: true })]
    #[case(
        &["edit", "msg.md", "--no-highlight"],
        Command::Edit { file: "msg.md".into(), highlight: false }
    )]
    #[case(
        &["wrap", "msg.md", "6", "10", "bold"],
        Command::Wrap {
            file: "msg.md".into(),
            selection: Span::new(6, 10),
            construct: Construct::Bold,
        }
    )]
    fn parses_commands(#[case] argv: &[&str], #[case] expected: Command) {
        let parsed = parse_args(&args(argv)).unwrap();
        assert_eq!(parsed.config, None);
        assert_eq!(parsed.command, expected);
    }

    #[test]
    fn parses_config_flag() {
        let parsed = parse_args(&args(&["--config", "/tmp/c.toml", "plain", "-"])).unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("/tmp/c.toml")));
        assert_eq!(parsed.command, Command::Plain("-".into()));
    }

    #[rstest]
    #[case(&[])]
    #[case(&["render"])]
    #[case(&["edit", "msg.md", "--loud"])]
    #[case(&["wrap", "msg.md", "a", "4", "bold"])]
    #[case(&["wrap", "msg.md", "0", "4", "underline"])]
    fn rejects_bad_arguments(#[case] argv: &[&str]) {
        assert!(parse_args(&args(argv)).is_err());
    }

    #[test]
    fn edit_attributes_colour_delimiters() {
        let formatter = Formatter::default();
        let red = Color::rgb(0xFF, 0, 0);
        let edited = formatter.edit("**hi**", Highlight::Color(red));
        let attributes = edit_attributes(&edited, formatter.options());

        assert!(attributes.contains(&AttributeRange {
            attribute: TextAttribute::Bold,
            span: Span::new(2, 4),
        }));
        let coloured: Vec<Span> = attributes
            .iter()
            .filter(|a| a.attribute == TextAttribute::Foreground(red))
            .map(|a| a.span)
            .collect();
        assert_eq!(coloured, vec![Span::new(0, 2), Span::new(4, 6)]);
    }
}
