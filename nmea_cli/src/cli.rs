use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches};
use serialport::{FlowControl as SerialFlowControl, SerialPort};
use std::{
    fs::File,
    io::{self, Read},
    path::PathBuf,
    time::Duration,
};

pub fn command() -> clap::Command {
    clap::Command::new("nmea_cli")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about("Decodes NMEA-0183 sentences from a GNSS receiver or a recorded log")
        .arg(
            Arg::new("port")
                .value_name("port")
                .short('p')
                .long("port")
                .conflicts_with("file")
                .help("Serial port to read from"),
        )
        .arg(
            Arg::new("baud")
                .value_name("baud")
                .short('s')
                .long("baud")
                .required(false)
                .default_value("9600")
                .value_parser(value_parser!(u32))
                .help("Baud rate of the port to open"),
        )
        .arg(
            Arg::new("file")
                .value_name("file")
                .short('f')
                .long("file")
                .value_parser(value_parser!(PathBuf))
                .help("Log file to read; stdin is read when neither port nor file is given"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print every decoded message as one JSON line"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log dropped sentences, repeat for more detail"),
        )
}

/// Where the raw bytes come from
pub enum Source {
    Serial(Box<dyn SerialPort>),
    Reader(Box<dyn io::Read>),
}

impl Source {
    pub fn open(cli: &ArgMatches) -> Result<Self> {
        if let Some(port) = cli.get_one::<String>("port") {
            let baud = cli.get_one::<u32>("baud").cloned().unwrap_or(9600);
            let builder = serialport::new(port, baud)
                .timeout(Duration::from_millis(100))
                .flow_control(SerialFlowControl::None);
            log::info!("{:?}", &builder);
            let port = builder
                .open()
                .with_context(|| format!("Failed to open port: {}", port))?;
            return Ok(Source::Serial(port));
        }

        if let Some(path) = cli.get_one::<PathBuf>("file") {
            let file =
                File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            return Ok(Source::Reader(Box::new(file)));
        }

        Ok(Source::Reader(Box::new(io::stdin().lock())))
    }

    /// Reads the next chunk. `None` marks the end of a file; a serial port
    /// timing out is reported as an empty chunk.
    pub fn read(&mut self, output: &mut [u8]) -> Result<Option<usize>> {
        match self {
            Source::Serial(port) => match port.read(output) {
                Ok(n) => Ok(Some(n)),
                Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(Some(0)),
                Err(e) => Err(e).context("Failed to read serial port"),
            },
            Source::Reader(reader) => match reader.read(output) {
                Ok(0) => Ok(None),
                Ok(n) => Ok(Some(n)),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(Some(0)),
                Err(e) => Err(e).context("Failed to read input"),
            },
        }
    }
}

pub fn log_level(cli: &ArgMatches) -> log::LevelFilter {
    match cli.get_count("verbose") {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}
