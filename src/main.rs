#![doc(
    html_logo_url = "https://raw.githubusercontent.com/nav-solutions/.github/master/logos/logo2.jpg"
)]
#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

/*
 * NMEA2NAV is part of the nav-solutions framework.
 * Authors: Guillaume W. Bres <guillaume.bressaix@gmail.com> et al,
 * (cf. https://github.com/nav-solutions/rinex/graphs/contributors)
 * This framework is shipped under Mozilla Public V2 license.
 */

use env_logger::{Builder, Target};

use log::{error, info, warn};

use hifitime::prelude::{Duration, Epoch, TimeScale};

mod cli;
mod device;
mod error;
mod nmea;
mod runtime;
mod settings;
mod store;

use crate::{
    cli::Cli,
    device::{Device, commands::startup_sequence},
    runtime::Runtime,
    store::NavigationRecord,
};

fn report(t: Epoch, record: &NavigationRecord, json: bool) {
    if json {
        match serde_json::to_string(record) {
            Ok(line) => println!("{}", line),
            Err(e) => error!("{} - failed to serialize record: {}", t, e),
        }
    } else {
        info!("{} - {} ({})", t, record, record.time_of_day());
    }
}

pub fn main() {
    let mut builder = Builder::from_default_env();

    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cfg_precision = Duration::from_seconds(1.0);

    let t_utc = Epoch::now()
        .unwrap_or_else(|e| panic!("Failed to determine system time: {}", e))
        .to_time_scale(TimeScale::UTC);

    // cli
    let cli = Cli::new();
    let settings = cli.settings();

    // Input interface
    let mut device = if let Some(serial) = cli.serial_port() {
        // active mode (GNSS module)
        Device::open_serial_port(serial, settings.baud_rate, settings.timeout)
            .unwrap_or_else(|e| panic!("Failed to open {} port: {}", serial, e))
    } else {
        // passive mode (input files)
        let user_files = cli.filepaths();

        assert!(
            !user_files.is_empty(),
            "invalid command line: requires either serial port or at least, one input file"
        );

        let mut device = if user_files[0] == "-" {
            Device::from_reader(std::io::stdin())
        } else {
            Device::open_file(user_files[0])
                .unwrap_or_else(|e| panic!("Failed to open {}: {}", user_files[0], e))
        };

        for fullpath in user_files.iter().skip(1) {
            device
                .stack_file(fullpath)
                .unwrap_or_else(|e| panic!("Failed to open {}: {}", fullpath, e));
        }

        device
    };

    // Device configuration
    if settings.configure {
        if device.interface.is_read_only() {
            warn!("passive mode: receiver configuration skipped");
        } else {
            device
                .configure(&startup_sequence(settings.update_rate))
                .unwrap_or_else(|e| panic!("Failed to configure receiver: {}", e));
        }
    }

    let mut buffer = vec![0; settings.read_size];

    // main task
    let mut rtm = Runtime::new(t_utc, &settings);
    info!("{} - application deployed", t_utc.round(cfg_precision));

    loop {
        if let Ok(now) = Epoch::now() {
            rtm.new_epoch(now);
        }

        match rtm.process_read(&mut device, &mut buffer) {
            Ok(0) => {
                // in standard mode, this is a read timeout,
                // in passive mode, we have consumed all content: we should exit.
                if device.interface.is_read_only() {
                    info!(
                        "{} - consumed all content",
                        rtm.utc_time().round(cfg_precision)
                    );

                    break;
                }
            },
            Ok(_) => {}, // nominal
            Err(e) => {
                error!("{} - I/O error: {}", rtm.utc_time().round(cfg_precision), e);

                if device.interface.is_read_only() {
                    break;
                }
            },
        }

        if rtm.consume_available() {
            report(
                rtm.utc_time().round(cfg_precision),
                &rtm.snapshot(),
                settings.json,
            );
        }
    }

    if rtm.pending_frame() {
        warn!(
            "{} - stream ended within a sentence",
            rtm.utc_time().round(cfg_precision)
        );
    }

    info!(
        "{} - {} (uptime {})",
        rtm.utc_time().round(cfg_precision),
        rtm.stats,
        rtm.uptime.round(cfg_precision),
    );
}
