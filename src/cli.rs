//! Command line front end.

use clap::Parser;

use crate::core::{
    BurstKind, ConfigError, ConnectionMode, DEFAULT_BASE_PORT, DEFAULT_REMOTE_ADDR, FrameNumber,
    PowerLevel, Timeslot,
};
use crate::session::SessionConfig;

/// Send random GSM bursts over the TRX DATA interface.
///
/// Useful for fuzzing and conformance testing of transceivers and L1
/// implementations.
#[derive(Debug, Parser)]
#[command(name = "trx-burst-gen", version, about, long_about = None)]
pub struct Cli {
    /// Send bursts to: TRX / L1
    #[arg(short = 'm', long, default_value = "TRX", help_heading = "TRX interface")]
    pub conn_mode: ConnectionMode,

    /// Remote address
    #[arg(short = 'r', long, default_value = DEFAULT_REMOTE_ADDR, help_heading = "TRX interface")]
    pub remote_addr: String,

    /// Base port number
    #[arg(short = 'p', long, default_value_t = DEFAULT_BASE_PORT, help_heading = "TRX interface")]
    pub base_port: u16,

    /// Burst type (NB, FB, SB, AB)
    #[arg(short = 'b', long, help_heading = "Burst generation")]
    pub burst_type: BurstKind,

    /// How many bursts to send
    #[arg(
        short = 'c',
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..),
        help_heading = "Burst generation"
    )]
    pub burst_count: u32,

    /// Starting frame number [default: random]
    #[arg(short = 'f', long, help_heading = "Burst generation")]
    pub frame_number: Option<FrameNumber>,

    /// Timeslot index [default: chosen by the interface]
    #[arg(short = 't', long, help_heading = "Burst generation")]
    pub timeslot: Option<u8>,

    /// Transmit power level, sign is ignored [default: chosen by the interface]
    #[arg(
        short = 'l',
        long,
        allow_negative_numbers = true,
        help_heading = "Burst generation"
    )]
    pub power_level: Option<PowerLevel>,

    /// Normal burst training sequence code
    #[arg(
        short = 's',
        long,
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..8),
        help_heading = "Burst generation"
    )]
    pub tsc: u8,
}

impl Cli {
    /// Validate the arguments into a session configuration.
    pub fn into_config(self) -> Result<SessionConfig, ConfigError> {
        SessionConfig::builder(self.burst_type)
            .mode(self.conn_mode)
            .remote_addr(self.remote_addr)
            .base_port(self.base_port)
            .repeat_count(self.burst_count)
            .frame_number(self.frame_number)
            .timeslot(self.timeslot.map(Timeslot))
            .power_level(self.power_level)
            .training_sequence(self.tsc)
            .build()
    }
}

/// Startup banner.
pub fn banner() -> String {
    format!(
        "{} {}\nLicense: {}\nThis is free software: you are free to change and redistribute it.\nThere is NO WARRANTY, to the extent permitted by law.\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_LICENSE"),
    )
}
