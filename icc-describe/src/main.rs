// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use {
    clap::{Arg, Command},
    icc_describe::{
        resolve_directory, FileReporter, LogReporter, MultiReporter, ProfileError, ProfileUpdater,
    },
    log::LevelFilter,
    std::path::PathBuf,
};

const ABOUT: &str = "\
Update ICC profile descriptions to match filenames.

Every file ending in .icc or .icm under DIRECTORY is examined. Files whose
name contains `._` are macOS resource forks and are ignored.

The description stored in each profile's `desc` tag is replaced by the
profile's filename without its extension. Files are rewritten in place and
no backups are made.

Other tags in the profile are never moved, so the new description has to fit
in the space of the old one. Descriptions that don't fit are truncated and
a warning is printed.

With --log-file, every message of info level and above is also appended to
the given file, prefixed with a timestamp and level.

The process exits with a non-zero code if any profile could not be updated.
";

fn main_impl() -> Result<bool, ProfileError> {
    let app = Command::new("icc-describe")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Update ICC profile descriptions to match filenames")
        .long_about(ABOUT)
        .arg(
            Arg::new("directory")
                .allow_invalid_utf8(true)
                .default_value("./organized-profiles")
                .help("Directory containing ICC profiles"),
        )
        .arg(
            Arg::new("log_file")
                .long("log-file")
                .takes_value(true)
                .allow_invalid_utf8(true)
                .value_name("PATH")
                .help("Also append messages to this file (e.g. update_descriptions.log)"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Suppress output except warnings and errors"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .multiple_occurrences(true)
                .conflicts_with("quiet")
                .help("Increase logging verbosity. Can be specified multiple times."),
        );

    let matches = app.get_matches();

    let log_level = if matches.is_present("quiet") {
        LevelFilter::Warn
    } else {
        match matches.occurrences_of("verbose") {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level.as_str()),
    );

    // Disable log context except at higher log levels.
    if log_level <= LevelFilter::Info {
        builder
            .format_timestamp(None)
            .format_level(false)
            .format_target(false);
    }

    builder.target(env_logger::Target::Stdout).init();

    let directory = PathBuf::from(
        matches
            .value_of_os("directory")
            .expect("directory has a default value"),
    );
    let directory = resolve_directory(&directory)?;

    let mut reporter = MultiReporter::new();
    reporter.add(LogReporter);
    if let Some(path) = matches.value_of_os("log_file") {
        reporter.add(FileReporter::open(path)?);
    }

    let summary = ProfileUpdater::new(&reporter).process_directory(&directory)?;

    Ok(summary.is_success())
}

fn main() {
    let exit_code = match main_impl() {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(err) => {
            eprintln!("Error: {}", err);
            1
        }
    };

    std::process::exit(exit_code)
}
