use clap::{Parser, ValueEnum};
use env_logger::Env;
use hyperram_cfg_core::HyperRamParams;
use log::*;

use std::{io::Write, path::PathBuf};

use crate::generate::generate;

mod generate;

#[derive(Parser, Debug)]
#[clap(version, about = "Generate HyperRAM configuration instructions.", long_about = None)]
struct Cli {
    /// Set the logging verbosity
    #[clap(short, long, value_enum, default_value_t = LogLevel::Info)]
    verbose: LogLevel,

    /// Size of HyperRAM (decimal or hex)
    #[clap(long = "hyperram_size", value_parser = parse_int)]
    hyperram_size: u64,

    /// Which PHY to use for HyperRAM
    #[clap(long = "hyperram_which_phy", value_parser = parse_int)]
    hyperram_which_phy: u64,

    /// Number of PHYs in use for HyperRAM (1 or 2)
    #[clap(long = "hyperram_phys_in_use", value_parser = parse_int)]
    hyperram_phys_in_use: u64,

    /// Address space to be used
    #[clap(long = "hyperram_address_space", value_parser = parse_int)]
    hyperram_address_space: u64,

    /// Base address for HyperBus configuration (decimal or hex)
    #[clap(long = "hyperbus_cfg_base_addr", value_parser = parse_int)]
    hyperbus_cfg_base_addr: u64,

    /// Base address for memory (decimal or hex)
    #[clap(long = "memory_base_addr", value_parser = parse_int)]
    memory_base_addr: u64,

    /// Number of physical chips (decimal or hex)
    #[clap(long = "hypperam_no_of_chips", value_parser = parse_int)]
    hypperam_no_of_chips: u64,

    /// Initial latency value (decimal or hex)
    #[clap(long = "hyperram_t_latency_access", value_parser = parse_int)]
    hyperram_t_latency_access: u64,

    /// Output file name
    #[clap(long = "output_file", default_value = "hyperram_config.txt")]
    output_file: PathBuf,
}

impl Cli {
    fn params(&self) -> HyperRamParams {
        HyperRamParams {
            hyperram_size: self.hyperram_size,
            which_phy: self.hyperram_which_phy,
            phys_in_use: self.hyperram_phys_in_use,
            address_space: self.hyperram_address_space,
            cfg_base_addr: self.hyperbus_cfg_base_addr,
            memory_base_addr: self.memory_base_addr,
            chip_count: self.hypperam_no_of_chips,
            t_latency_access: self.hyperram_t_latency_access,
        }
    }
}

/// Parses a decimal number, or a hex, octal or binary one with a `0x`, `0o`
/// or `0b` prefix.
fn parse_int(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let digits = s.replace('_', "");

    let (radix, digits) = match digits.get(..2) {
        Some("0x" | "0X") => (16, &digits[2..]),
        Some("0o" | "0O") => (8, &digits[2..]),
        Some("0b" | "0B") => (2, &digits[2..]),
        _ => (10, digits.as_str()),
    };

    u64::from_str_radix(digits, radix).map_err(|err| format!("invalid number '{}': {}", s, err))
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Off => LevelFilter::Off,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default())
        .filter_level(cli.verbose.into())
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            let level = record.level();
            if level == Level::Info {
                writeln!(buf, "{}", record.args())
            } else {
                writeln!(buf, "{}: {}", record.level(), record.args())
            }
        })
        .init();

    generate(&cli.params(), &cli.output_file)
}
