//! g400-config: command-line configuration tool for the Logitech
//! Gaming Mouse G400.

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use g400_config_core::configure::{self, Settings};
use g400_config_core::protocol::{DpiLevel, SampleRate};
use g400_config_core::select;
use g400_config_core::usb::{self, DeviceAddress};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "g400-config",
    version,
    about = "Configure the onboard sample rate and DPI level of a Logitech Gaming Mouse G400",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the BUS.DEV addresses of connected G400 devices.
    List,
    /// Write sample rate and/or DPI level settings to a device.
    Set {
        /// Device to configure, when several G400s are connected.
        #[arg(long, value_name = "BUS.DEV")]
        address: Option<DeviceAddress>,

        /// Sample rate in Hz: 125, 250, 500, or 1000. The Windows
        /// software defaults to 500 Hz.
        #[arg(long, value_name = "RATE")]
        sample_rate: Option<SampleRate>,

        /// DPI level between 1 and 4, corresponding to roughly 400,
        /// 800, 1800, and 3600 DPI. The Windows software defaults to
        /// level 2.
        #[arg(long, value_name = "LEVEL")]
        dpi_level: Option<DpiLevel>,
    },
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::List => {
            let ctx = usb::open_context()?;
            let devices = usb::list_devices(&ctx)?;
            let matching = select::find_matching(&devices);
            if matching.is_empty() {
                println!("none");
            } else {
                for device in matching {
                    println!("{}", device.address());
                }
            }
        }
        Commands::Set {
            address,
            sample_rate,
            dpi_level,
        } => {
            let ctx = usb::open_context()?;
            let devices = usb::list_devices(&ctx)?;
            let device = match address {
                Some(addr) => select::find_by_address(&devices, addr)?,
                None => select::find_sole(&devices)?,
            };
            let settings = Settings {
                sample_rate,
                dpi_level,
            };
            debug!(address = %device.address(), ?settings, "applying settings");
            configure::configure(device, &settings)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            return match err.kind() {
                // --help, --version, and the bare invocation print to
                // stdout and are not failures.
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    print!("{err}");
                    ExitCode::SUCCESS
                }
                _ => {
                    eprint!("{err}");
                    ExitCode::FAILURE
                }
            };
        }
    };

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
