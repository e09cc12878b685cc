use clap::{Arg, ArgAction, ArgMatches, Command, builder::PossibleValuesParser};

use cef_translator::rust_to_c::Slots;

const VALUE: &str = "value";
const OTHER_VALUE: &str = "other-value";
const MISSING: &str = "missing";
const SIZE: &str = "size";

const GET_VALUE_SLOT: &str = "get-value";
const GET_OTHER_VALUE_SLOT: &str = "get-other-value";

/// What the demo client returns and which of its slots are filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub value: i32,
    pub other_value: i32,
    pub slots: Slots,
}

pub fn command() -> Command {
    Command::new("translator_demo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build a translator test client in rust and dispatch to it through the C adapter.")
        .arg(
            Arg::new(VALUE)
                .long(VALUE)
                .default_value("1")
                .allow_negative_numbers(true)
                .help("Value returned by get_value")
                .value_parser(clap::value_parser!(i32)),
        )
        .arg(
            Arg::new(OTHER_VALUE)
                .long(OTHER_VALUE)
                .default_value("2")
                .allow_negative_numbers(true)
                .help("Value returned by get_other_value")
                .value_parser(clap::value_parser!(i32)),
        )
        .arg(
            Arg::new(MISSING)
                .long(MISSING)
                .action(ArgAction::Append)
                .help("Leave a slot unset (may be repeated)")
                .value_parser(PossibleValuesParser::new([GET_VALUE_SLOT, GET_OTHER_VALUE_SLOT])),
        )
        .arg(
            Arg::new(SIZE)
                .long(SIZE)
                .help("Declared struct size in bytes, to mimic an older layout")
                .value_parser(clap::value_parser!(usize)),
        )
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let missing = matches
            .get_many::<String>(MISSING)
            .map(|values| values.map(String::as_str).collect::<Vec<_>>())
            .unwrap_or_default();

        Self {
            value: matches.get_one::<i32>(VALUE).copied().unwrap_or(1),
            other_value: matches.get_one::<i32>(OTHER_VALUE).copied().unwrap_or(2),
            slots: Slots {
                get_value: !missing.contains(&GET_VALUE_SLOT),
                get_other_value: !missing.contains(&GET_OTHER_VALUE_SLOT),
                size: matches.get_one::<usize>(SIZE).copied(),
            },
        }
    }
}

#[cfg(test)]
mod test {
    use cef_translator::rust_to_c::Slots;

    use super::{Config, command};

    fn parse(args: &[&str]) -> Config {
        let matches = command()
            .try_get_matches_from(std::iter::once("translator_demo").chain(args.iter().copied()))
            .unwrap();
        Config::from_matches(&matches)
    }

    #[test]
    fn defaults() {
        assert_eq!(
            parse(&[]),
            Config {
                value: 1,
                other_value: 2,
                slots: Slots::default(),
            }
        );
    }

    #[test]
    fn negative_values_and_missing_slots() {
        let config = parse(&[
            "--value",
            "-5",
            "--other-value",
            "2147483647",
            "--missing",
            "get-other-value",
            "--size",
            "48",
        ]);
        assert_eq!(config.value, -5);
        assert_eq!(config.other_value, i32::MAX);
        assert!(config.slots.get_value);
        assert!(!config.slots.get_other_value);
        assert_eq!(config.slots.size, Some(48));
    }

    #[test]
    fn unknown_slot_is_rejected() {
        assert!(
            command()
                .try_get_matches_from(["translator_demo", "--missing", "release"])
                .is_err()
        );
    }
}
