//! Tape buffer editing (`papertape edit`).
//!
//! Every edit flag may be given any number of times. Edits are applied to
//! one buffer in the order they appear on the command line, each seeing the
//! result of the ones before it, so
//! `--leader 2 --title "MY TAPE" --leader 5` puts the title between two
//! stretches of leader.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Args, Command, FromArgMatches, value_parser};
use log::info;
use papertape::{NUL, ROWS_PER_INCH, Tape, TitleStyle};

use crate::cli::utils::{read_tape, write_tape};

/// Args for `papertape edit`.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Input tape (default: stdin). Not read when the first edit is `--clear` or `--load`.
    pub input: Option<PathBuf>,
    /// Output file (`-` or omitted for stdout).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    #[command(flatten)]
    pub steps: EditSteps,
}

/// One edit applied to the tape buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum EditStep {
    Clear,
    Load(PathBuf),
    Append(PathBuf),
    Save(PathBuf),
    Hexdump,
    Trim,
    StripNul,
    StripDel,
    PadCrlf,
    SetMsb,
    ClearMsb,
    Mask5,
    Title(String, TitleStyle),
    /// Leader length in inches.
    Leader(f64),
    /// Trailer length in inches.
    Trailer(f64),
}

/// Edits in command-line order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditSteps(pub Vec<EditStep>);

const SWITCHES: [(&str, &str); 9] = [
    ("clear", "Empty the buffer."),
    ("hexdump", "Print a hex dump of the buffer to stderr."),
    ("trim", "Trim NUL leader and trailer."),
    ("strip-nul", "Remove all NUL rows."),
    ("strip-del", "Remove all DEL rows."),
    ("pad-crlf", "Add two DEL rows after each CR LF."),
    ("set-msb", "Set the MSB of every row."),
    ("clear-msb", "Clear the MSB of every row."),
    ("mask5", "Keep only the low five bits of every row."),
];

const TITLES: [(&str, &str, TitleStyle); 4] = [
    (
        "title",
        "Punch a readable title at the start of the buffer.",
        TitleStyle { rotate: false, invert: false },
    ),
    (
        "inv-title",
        "Punch a title readable from the other face of the tape.",
        TitleStyle { rotate: false, invert: true },
    ),
    (
        "rot-title",
        "Punch a title rotated to fit 5-level tape.",
        TitleStyle { rotate: true, invert: false },
    ),
    (
        "rot-inv-title",
        "Punch a rotated title readable from the other face of the tape.",
        TitleStyle { rotate: true, invert: true },
    ),
];

const PATHS: [(&str, &str); 3] = [
    ("load", "Replace the buffer with a tape file."),
    ("append", "Append a tape file to the buffer."),
    ("save", "Write the buffer to a file."),
];

const LENGTHS: [(&str, &str); 2] = [
    ("leader", "Add NUL leader, in inches."),
    ("trailer", "Add NUL trailer, in inches."),
];

fn switch_step(id: &str) -> Option<EditStep> {
    let step = match id {
        "clear" => EditStep::Clear,
        "hexdump" => EditStep::Hexdump,
        "trim" => EditStep::Trim,
        "strip-nul" => EditStep::StripNul,
        "strip-del" => EditStep::StripDel,
        "pad-crlf" => EditStep::PadCrlf,
        "set-msb" => EditStep::SetMsb,
        "clear-msb" => EditStep::ClearMsb,
        "mask5" => EditStep::Mask5,
        _ => return None,
    };
    Some(step)
}

impl Args for EditSteps {
    fn augment_args(cmd: Command) -> Command {
        // A valueless Append records one index per occurrence, which keeps
        // repeated switches ordered against the options.
        let cmd = SWITCHES.iter().fold(cmd, |cmd, &(id, help)| {
            cmd.arg(
                Arg::new(id)
                    .long(id)
                    .help(help)
                    .action(ArgAction::Append)
                    .num_args(0)
                    .default_missing_value("true"),
            )
        });
        let cmd = TITLES.iter().fold(cmd, |cmd, &(id, help, _)| {
            cmd.arg(
                Arg::new(id)
                    .long(id)
                    .help(help)
                    .value_name("TEXT")
                    .action(ArgAction::Append),
            )
        });
        let cmd = PATHS.iter().fold(cmd, |cmd, &(id, help)| {
            cmd.arg(
                Arg::new(id)
                    .long(id)
                    .help(help)
                    .value_name("FILE")
                    .value_parser(value_parser!(PathBuf))
                    .action(ArgAction::Append),
            )
        });
        LENGTHS.iter().fold(cmd, |cmd, &(id, help)| {
            cmd.arg(
                Arg::new(id)
                    .long(id)
                    .help(help)
                    .value_name("INCHES")
                    .value_parser(value_parser!(f64))
                    .action(ArgAction::Append),
            )
        })
    }

    fn augment_args_for_update(cmd: Command) -> Command {
        Self::augment_args(cmd)
    }
}

impl FromArgMatches for EditSteps {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let mut steps: Vec<(usize, EditStep)> = Vec::new();
        for (id, _) in SWITCHES {
            if let (Some(indices), Some(step)) = (matches.indices_of(id), switch_step(id)) {
                steps.extend(indices.map(|index| (index, step.clone())));
            }
        }
        for (id, _, style) in TITLES {
            collect(matches, id, &mut steps, |text: &String| {
                EditStep::Title(text.clone(), style)
            });
        }
        collect(matches, "load", &mut steps, |path: &PathBuf| EditStep::Load(path.clone()));
        collect(matches, "append", &mut steps, |path: &PathBuf| EditStep::Append(path.clone()));
        collect(matches, "save", &mut steps, |path: &PathBuf| EditStep::Save(path.clone()));
        collect(matches, "leader", &mut steps, |inches: &f64| EditStep::Leader(*inches));
        collect(matches, "trailer", &mut steps, |inches: &f64| EditStep::Trailer(*inches));

        steps.sort_by_key(|&(index, _)| index);
        Ok(Self(steps.into_iter().map(|(_, step)| step).collect()))
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        *self = Self::from_arg_matches(matches)?;
        Ok(())
    }
}

fn collect<T, F>(matches: &ArgMatches, id: &str, steps: &mut Vec<(usize, EditStep)>, step: F)
where
    T: Clone + Send + Sync + 'static,
    F: Fn(&T) -> EditStep,
{
    if let (Some(indices), Some(values)) = (matches.indices_of(id), matches.get_many::<T>(id)) {
        steps.extend(indices.zip(values).map(|(index, value)| (index, step(value))));
    }
}

/// Execute `papertape edit`.
pub fn handle(args: EditArgs) -> Result<()> {
    let steps = &args.steps.0;
    let mut tape = match steps.first() {
        Some(EditStep::Clear | EditStep::Load(_)) => Tape::new(),
        _ => read_tape(args.input.as_deref())?,
    };
    apply_edits(steps, &mut tape)?;
    write_tape(args.output.as_deref(), &tape)
}

fn inches_to_rows(inches: f64) -> usize {
    (inches * ROWS_PER_INCH as f64) as usize
}

/// Apply `steps` to `tape` in order.
pub fn apply_edits(steps: &[EditStep], tape: &mut Tape) -> Result<()> {
    for step in steps {
        match step {
            EditStep::Clear => tape.clear(),
            EditStep::Load(path) => {
                tape.clear();
                tape.append_file(path)?;
            }
            EditStep::Append(path) => tape.append_file(path)?,
            EditStep::Save(path) => {
                tape.save(path)?;
                info!("saved {} rows to {}", tape.len(), path.display());
            }
            EditStep::Hexdump => io::stderr()
                .write_all(tape.hexdump().as_bytes())
                .context("failed to write hex dump")?,
            EditStep::Trim => tape.trim(NUL),
            EditStep::StripNul => tape.strip_nul(),
            EditStep::StripDel => tape.strip_del(),
            EditStep::PadCrlf => tape.pad_crlf(),
            EditStep::SetMsb => tape.set_msb(),
            EditStep::ClearMsb => tape.clear_msb(),
            EditStep::Mask5 => tape.mask5(),
            EditStep::Title(text, style) => tape.add_title(text, *style),
            EditStep::Leader(inches) => tape.add_leader(inches_to_rows(*inches), NUL),
            EditStep::Trailer(inches) => tape.add_trailer(inches_to_rows(*inches), NUL),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command as CliCommand};
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> EditArgs {
        let argv = ["papertape", "edit"].iter().chain(args);
        match Cli::try_parse_from(argv).unwrap().command {
            CliCommand::Edit(args) => args,
            other => panic!("parsed {other:?}"),
        }
    }

    #[test]
    fn repeated_edits_keep_command_line_order() {
        let args = parse(&["--leader", "0.2", "--title", "MY TAPE", "--leader", "0.5"]);
        assert_eq!(
            args.steps.0,
            vec![
                EditStep::Leader(0.2),
                EditStep::Title("MY TAPE".into(), TitleStyle::default()),
                EditStep::Leader(0.5),
            ]
        );
    }

    #[test]
    fn switches_interleave_with_options() {
        let args = parse(&["in.tap", "--trim", "--rot-title", "A", "--trim", "-o", "out.tap"]);
        assert_eq!(args.input, Some(PathBuf::from("in.tap")));
        assert_eq!(args.output, Some(PathBuf::from("out.tap")));
        assert_eq!(
            args.steps.0,
            vec![
                EditStep::Trim,
                EditStep::Title("A".into(), TitleStyle { rotate: true, invert: false }),
                EditStep::Trim,
            ]
        );
    }

    #[test]
    fn no_edits_parse_to_empty_pipeline() {
        assert_eq!(parse(&[]).steps, EditSteps::default());
    }

    #[test]
    fn mask_then_set_msb_differs_from_reverse_order() {
        let mut tape = Tape::from_bytes(vec![0x41]);
        apply_edits(&parse(&["--mask5", "--set-msb"]).steps.0, &mut tape).unwrap();
        assert_eq!(tape.as_bytes(), &[0x81]);

        let mut tape = Tape::from_bytes(vec![0x41]);
        apply_edits(&parse(&["--set-msb", "--mask5"]).steps.0, &mut tape).unwrap();
        assert_eq!(tape.as_bytes(), &[0x01]);
    }

    #[test]
    fn leader_title_leader() {
        let mut tape = Tape::from_bytes(b"X".to_vec());
        let steps = parse(&["--leader", "0.2", "--title", "-", "--leader", "0.3"]).steps;
        apply_edits(&steps.0, &mut tape).unwrap();

        let mut expected = vec![NUL; 3];
        expected.extend([NUL, 0x08, 0x08, 0x08, 0x08, 0x08, NUL]);
        expected.extend([NUL, NUL, b'X']);
        assert_eq!(tape.as_bytes(), expected.as_slice());
    }

    #[test]
    fn save_clear_and_append_buffer() {
        let path = std::env::temp_dir().join(format!("papertape-edit-{}.tap", std::process::id()));
        let mut tape = Tape::from_bytes(b"\0\0AB\0".to_vec());
        let steps = vec![
            EditStep::Trim,
            EditStep::Save(path.clone()),
            EditStep::Clear,
            EditStep::Leader(0.1),
            EditStep::Append(path.clone()),
            EditStep::Append(path.clone()),
        ];
        apply_edits(&steps, &mut tape).unwrap();
        assert_eq!(tape.as_bytes(), b"\0ABAB");

        apply_edits(&[EditStep::Load(path.clone())], &mut tape).unwrap();
        assert_eq!(tape.as_bytes(), b"AB");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn fractional_inches_truncate() {
        assert_eq!(inches_to_rows(0.25), 2);
        assert_eq!(inches_to_rows(-1.0), 0);
    }
}
