use log::{debug, info};

pub mod commands;
mod interface;

pub use interface::Interface;

use std::{
    fs::File,
    io::{ErrorKind, Read, Write},
    time::Duration,
};

use crate::error::Error;

/// Pause between two configuration commands
const COMMAND_PAUSE: Duration = Duration::from_millis(300);

pub struct Device {
    pub interface: Interface,
}

impl Device {
    /// Sends the configuration sequence, one command after the other.
    pub fn configure(&mut self, commands: &[&str]) -> std::io::Result<()> {
        for command in commands {
            self.write_all(command.as_bytes())?;
            debug!("sent {}", command.trim_end());
            std::thread::sleep(COMMAND_PAUSE);
        }

        info!("receiver configured");
        Ok(())
    }

    /// Opens a file for passive replay. Gzip files must be terminated by ".gz".
    pub fn open_file(fullpath: &str) -> Result<Self, Error> {
        let handle = File::open(fullpath)?;

        Ok(Self {
            interface: if fullpath.ends_with(".gz") {
                Interface::from_gzip_file_handle(handle)
            } else {
                Interface::from_file_handle(handle)
            },
        })
    }

    /// Stacks another file, consumed once previous content is exhausted.
    pub fn stack_file(&mut self, fullpath: &str) -> Result<(), Error> {
        let handle = File::open(fullpath)?;

        if fullpath.ends_with(".gz") {
            self.interface.stack_gzip_file_handle(handle);
        } else {
            self.interface.stack_file_handle(handle);
        }

        Ok(())
    }

    /// Opens a serial port. Every read is bounded by `timeout`.
    pub fn open_serial_port(port_str: &str, baud: u32, timeout: Duration) -> Result<Self, Error> {
        let port = serialport::new(port_str, baud).timeout(timeout).open()?;

        debug!("{} opened at {} bauds", port_str, baud);

        Ok(Self {
            interface: Interface::from_serial_port(port),
        })
    }

    /// Creates a read only [Device] from any [Read]able
    pub fn from_reader<R: Read + 'static>(reader: R) -> Self {
        Self {
            interface: Interface::from_reader(reader),
        }
    }

    pub fn write_all(&mut self, data: &[u8]) -> std::io::Result<()> {
        self.interface.write_all(data)
    }

    /// Reads internal [Interface], converting timeouts into "No Data Received",
    /// which is most convenient for real-time perpetual hardware application like this one.
    pub fn read_interface(&mut self, output: &mut [u8]) -> std::io::Result<usize> {
        match self.interface.read(output) {
            Ok(b) => Ok(b),
            Err(e) => {
                if e.kind() == ErrorKind::TimedOut {
                    Ok(0)
                } else {
                    Err(e)
                }
            },
        }
    }
}
