mod format;

use std::path::PathBuf;

use clap::{builder::ValueParser, value_parser, Arg, ArgAction, Command};

use format::{parse_endianness, parse_word_width};

fn input_arg(id: &'static str, value_name: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .value_name(value_name)
        .help(help)
        .required(true)
        .value_parser(value_parser!(PathBuf))
}

fn endianness_arg(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .value_name("ENDIANNESS")
        .help(help)
        .required(true)
        .value_parser(ValueParser::new(parse_endianness))
}

fn width_arg(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .value_name("WORD_WIDTH")
        .help(help)
        .required(true)
        .value_parser(ValueParser::new(parse_word_width))
}

pub fn build_cli() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about("Combine two mono PCM captures into one stereo file for side-by-side comparison")
        .long_about(
            "Reads two headerless mono PCM files, each with its own word width and byte order, \
             and writes a headerless stereo file of 32-bit signed samples in native byte order. \
             The shorter input is padded with silence. Any existing output file is overwritten.",
        )
        .version(env!("CARGO_PKG_VERSION"))
        .after_help("Example:\n  audiocompare afile l 4 anotherfile b 2 out")
        .arg(input_arg(
            "left_file",
            "LEFT_FILE",
            "PCM input file that forms the left channel",
        ))
        .arg(endianness_arg(
            "left_endianness",
            "Byte order of the left input: l for little, b for big",
        ))
        .arg(width_arg(
            "left_width",
            "Bytes per word in the left input, 1 to 4",
        ))
        .arg(input_arg(
            "right_file",
            "RIGHT_FILE",
            "PCM input file that forms the right channel",
        ))
        .arg(endianness_arg(
            "right_endianness",
            "Byte order of the right input: l for little, b for big",
        ))
        .arg(width_arg(
            "right_width",
            "Bytes per word in the right input, 1 to 4",
        ))
        .arg(
            Arg::new("output_file")
                .value_name("OUTPUT_FILE")
                .help("Stereo output file (any existing file will be overwritten)")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Report what would be written without creating the output")
                .action(ArgAction::SetTrue),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use audiocompare_core::{Endianness, WordWidth};

    #[test]
    fn parses_the_positional_interface() {
        let matches = build_cli()
            .try_get_matches_from([
                "audiocompare",
                "afile",
                "l",
                "4",
                "anotherfile",
                "b",
                "2",
                "out",
            ])
            .unwrap();

        assert_eq!(
            matches.get_one::<PathBuf>("left_file").unwrap(),
            &PathBuf::from("afile")
        );
        assert_eq!(
            matches.get_one::<Endianness>("left_endianness").unwrap(),
            &Endianness::Little
        );
        assert_eq!(
            matches.get_one::<WordWidth>("left_width").unwrap().bytes(),
            4
        );
        assert_eq!(
            matches.get_one::<Endianness>("right_endianness").unwrap(),
            &Endianness::Big
        );
        assert_eq!(
            matches.get_one::<WordWidth>("right_width").unwrap().bytes(),
            2
        );
        assert_eq!(
            matches.get_one::<PathBuf>("output_file").unwrap(),
            &PathBuf::from("out")
        );
        assert!(!matches.get_flag("dry-run"));
    }

    #[test]
    fn rejects_an_invalid_right_channel_on_its_own() {
        let result = build_cli().try_get_matches_from([
            "audiocompare",
            "afile",
            "l",
            "2",
            "anotherfile",
            "l",
            "7",
            "out",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn requires_every_positional_argument() {
        let result =
            build_cli().try_get_matches_from(["audiocompare", "afile", "l", "2", "anotherfile"]);
        assert!(result.is_err());
    }

    #[test]
    fn command_definition_is_consistent() {
        build_cli().debug_assert();
    }
}
