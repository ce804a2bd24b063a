use flate2::read::GzDecoder;
use serialport::SerialPort;
use std::fs::File;
use std::io::{Read, Write};

/// [Interface] to the NMEA stream
pub enum Interface {
    /// [Interface::ReadOnly] is dedicated to read only input, mainly File inputs.
    ReadOnly(Box<dyn Read>),

    /// [Interface::Port] is used to connect to a physical port,
    /// and actively operate a GNSS receiver.
    Port(Box<dyn SerialPort>),
}

impl Interface {
    /// Creates a new [SerialPort] interface
    pub fn from_serial_port(port: Box<dyn SerialPort>) -> Self {
        Self::Port(port)
    }

    /// Creates a new Read-Only interface
    pub fn from_file_handle(handle: File) -> Self {
        Self::ReadOnly(Box::new(handle))
    }

    /// Creates a new Read-Only interface, from a gzip compressed file
    pub fn from_gzip_file_handle(handle: File) -> Self {
        Self::ReadOnly(Box::new(GzDecoder::new(handle)))
    }

    /// Creates a new Read-Only interface from any [Read]able
    pub fn from_reader<R: Read + 'static>(reader: R) -> Self {
        Self::ReadOnly(Box::new(reader))
    }

    /// Stacks a [File] to be consumed once current content is exhausted
    pub fn stack_file_handle(&mut self, handle: File) {
        self.stack(Box::new(handle));
    }

    /// Stacks a gzip compressed [File] to be consumed once current content is exhausted
    pub fn stack_gzip_file_handle(&mut self, handle: File) {
        self.stack(Box::new(GzDecoder::new(handle)));
    }

    fn stack(&mut self, next: Box<dyn Read>) {
        if let Self::ReadOnly(r) = self {
            let current = std::mem::replace(r, Box::new(std::io::empty()));
            *r = Box::new(current.chain(next));
        }
    }

    /// True when no hardware is attached
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::ReadOnly(_))
    }
}

impl Read for Interface {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Self::ReadOnly(r) => r.read(buf),
            Self::Port(port) => port.read(buf),
        }
    }
}

impl Write for Interface {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Self::ReadOnly(_) => Ok(0),
            Self::Port(port) => port.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Self::ReadOnly(_) => Ok(()),
            Self::Port(port) => port.flush(),
        }
    }
}
