/*!
 Contains the command line options and the logic to validate them.
*/

use std::path::PathBuf;

use clap::{crate_version, Arg, ArgMatches, Command};

use crate::app::error::RuntimeError;

/// The positional argument holding the archive to decode
pub const OPTION_ARCHIVE_PATH: &str = "keyed-archive";
/// Option to write the output to a file instead of standard output
pub const OPTION_TO_FILE: &str = "to-file";

/// Represents the command line options, validated against the filesystem
#[derive(Debug, PartialEq, Eq)]
pub struct Options {
    /// Path to the keyed archive we want to decode
    pub archive_path: PathBuf,
    /// Where to dump the unarchived content; standard output when absent
    pub to_file: Option<PathBuf>,
}

impl Options {
    pub fn from_args(args: &ArgMatches) -> Result<Self, RuntimeError> {
        let archive_path: PathBuf = args
            .get_one::<String>(OPTION_ARCHIVE_PATH)
            .map(PathBuf::from)
            .ok_or_else(|| {
                RuntimeError::InvalidOptions("No keyed archive path provided!".to_string())
            })?;

        if !archive_path.exists() {
            return Err(RuntimeError::InvalidOptions(format!(
                "Specified keyed archive {archive_path:?} does not exist!"
            )));
        }

        let to_file: Option<PathBuf> = args.get_one::<String>(OPTION_TO_FILE).map(PathBuf::from);

        if let Some(path) = &to_file {
            if !path.exists() {
                return Err(RuntimeError::InvalidOptions(format!(
                    "Specified output file {path:?} does not exist!"
                )));
            }
        }

        Ok(Options {
            archive_path,
            to_file,
        })
    }
}

/// Build the command line argument parser and parse the program's arguments
pub fn from_command_line() -> ArgMatches {
    Command::new("unarchiver")
        .version(crate_version!())
        .about("Unarchive an NSKeyedArchiver file")
        .arg_required_else_help(true)
        .arg(
            Arg::new(OPTION_ARCHIVE_PATH)
                .help("Path to the keyed archive to unarchive")
                .index(1)
                .required(true),
        )
        .arg(
            Arg::new(OPTION_TO_FILE)
                .short('o')
                .long(OPTION_TO_FILE)
                .help("A file to dump unarchived content into")
                .value_name("path")
                .num_args(1),
        )
        .get_matches()
}
