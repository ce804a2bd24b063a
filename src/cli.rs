use clap::{Arg, ArgAction, ArgMatches, ColorChoice, Command};

use crate::{device::commands::UpdateRate, settings::Settings};

use std::{str::FromStr, time::Duration};

pub struct Cli {
    /// Arguments passed by user
    matches: ArgMatches,
}

impl Cli {
    /// Build new command line interface
    pub fn new() -> Self {
        Self {
            matches: Self::command().get_matches(),
        }
    }

    fn command() -> Command {
        Command::new("nmea2nav")
            .author("Guillaume W. Bres, <guillaume.bressaix@gmail.com>")
            .version(env!("CARGO_PKG_VERSION"))
            .about("NMEA-0183 stream to navigation records")
            .color(ColorChoice::Always)
            .arg_required_else_help(true)
            .next_help_heading("Serial port (Active device, GNSS module)")
            .arg(
                Arg::new("port")
                    .short('p')
                    .long("port")
                    .value_name("PORT")
                    .required_unless_present_any(["file"])
                    .help("Define serial port. Example /dev/ttyUSB0 on Linux"),
            )
            .arg(
                Arg::new("baudrate")
                    .short('b')
                    .long("baud")
                    .required(false)
                    .value_name("Baudrate (u32)")
                    .help("Define serial port baud rate. Communications will not work if your receiver streams at a different data-rate. By default we use 9600"),
            )
            .arg(
                Arg::new("timeout")
                    .long("timeout")
                    .required(false)
                    .value_name("Milliseconds")
                    .help("Bound every read to this timeout. A read timing out simply means no data was received. Default is 5000 ms"),
            )
            .next_help_heading("Receiver configuration")
            .arg(
                Arg::new("configure")
                    .long("configure")
                    .action(ArgAction::SetTrue)
                    .help("Send the startup configuration sequence: GGA and VTG output only, update rate and WAAS"),
            )
            .arg(
                Arg::new("rate")
                    .long("rate")
                    .action(ArgAction::Set)
                    .required(false)
                    .requires("configure")
                    .help("Update rate requested by the startup sequence: 1, 5 or 10 (Hz). Default is 10 Hz"),
            )
            .next_help_heading("File interface (Passive mode)")
            .arg(
                Arg::new("file")
                    .long("file")
                    .short('f')
                    .value_name("FILENAME")
                    .action(ArgAction::Append)
                    .required_unless_present_any(["port"])
                    .help("Load a single file. Use as many as needed.
Each file descriptor is consumed one after the other. Gzip file are supported but they must be terminated with '.gz'"),
            )
            .next_help_heading("Decoding")
            .arg(
                Arg::new("talker")
                    .long("talker")
                    .action(ArgAction::Set)
                    .required(false)
                    .help("Talker identifier of the GGA and VTG sentences to decode. Default is \"GN\" (multi constellation)"),
            )
            .arg(
                Arg::new("frame-capacity")
                    .long("frame-capacity")
                    .action(ArgAction::Set)
                    .required(false)
                    .help("Longest sentence accepted, in bytes. Longer sentences are discarded. Default is 128"),
            )
            .arg(
                Arg::new("read-size")
                    .long("read-size")
                    .action(ArgAction::Set)
                    .required(false)
                    .help("Size of a raw read, in bytes. Default is 512"),
            )
            .next_help_heading("Output")
            .arg(
                Arg::new("json")
                    .long("json")
                    .action(ArgAction::SetTrue)
                    .help("Print every new record as a JSON line, on stdout"),
            )
    }

    /// Returns User serial port specification
    pub fn serial_port(&self) -> Option<&String> {
        self.matches.get_one::<String>("port")
    }

    /// Input file paths
    pub fn filepaths(&self) -> Vec<&String> {
        if let Some(fp) = self.matches.get_many::<String>("file") {
            fp.collect()
        } else {
            Vec::new()
        }
    }

    fn parse<T: FromStr>(&self, key: &str) -> Option<T>
    where
        T::Err: std::fmt::Display,
    {
        let value = self.matches.get_one::<String>(key)?;
        let value = value
            .trim()
            .parse::<T>()
            .unwrap_or_else(|e| panic!("Invalid {} value: {}", key, e));
        Some(value)
    }

    /// Sizes must be strictly positive
    fn parse_size(&self, key: &str) -> Option<usize> {
        let size = self.parse::<usize>(key)?;

        if size == 0 {
            panic!("Invalid {} value: must be strictly positive", key);
        }

        Some(size)
    }

    pub fn settings(&self) -> Settings {
        let defaults = Settings::default();

        Settings {
            talker: if let Some(talker) = self.matches.get_one::<String>("talker") {
                Settings::parse_talker(talker).unwrap_or_else(|e| panic!("{}", e))
            } else {
                defaults.talker
            },
            frame_capacity: self
                .parse_size("frame-capacity")
                .unwrap_or(defaults.frame_capacity),
            read_size: self.parse_size("read-size").unwrap_or(defaults.read_size),
            timeout: self
                .parse::<u64>("timeout")
                .map(Duration::from_millis)
                .unwrap_or(defaults.timeout),
            baud_rate: self.parse::<u32>("baudrate").unwrap_or(defaults.baud_rate),
            configure: self.matches.get_flag("configure"),
            update_rate: self
                .parse::<UpdateRate>("rate")
                .unwrap_or(defaults.update_rate),
            json: self.matches.get_flag("json"),
        }
    }
}
