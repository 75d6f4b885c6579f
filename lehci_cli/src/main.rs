use clap::{Args, Parser, Subcommand};
use lehci_core::{
    beacon::{Beacon, BeaconConfig},
    filter::Filter,
    opcode::Opcode,
    Uuid,
};
use tracing_subscriber::prelude::*;

mod parse;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Encode iBeacon advertising data
    Beacon(BeaconArgs),
    /// Build and pack a raw HCI socket filter
    Filter(FilterArgs),
    /// Build the filter used while waiting for a command reply
    RequestFilter(RequestFilterArgs),
}

#[derive(Args)]
struct BeaconArgs {
    /// Proximity UUID; a random one is generated when omitted
    #[arg(long)]
    uuid: Option<Uuid>,
    #[arg(long, value_parser = parse::number::<u16>)]
    major: Option<u16>,
    #[arg(long, value_parser = parse::number::<u16>)]
    minor: Option<u16>,
    /// Calibrated transmit power at 1 meter, in dBm
    #[arg(long, allow_negative_numbers = true)]
    rssi: Option<i8>,
    /// Advertising interval, in 0.625 ms units
    #[arg(long, value_parser = parse::number::<u16>)]
    interval: Option<u16>,
    /// Also print the HCI commands that start advertising
    #[arg(long)]
    commands: bool,
}

#[derive(Args)]
struct FilterArgs {
    /// Packet types to accept (0xFF for vendor packets)
    #[arg(long = "ptype", value_parser = parse::number::<u8>)]
    packet_types: Vec<u8>,
    /// Event codes to accept
    #[arg(long = "event", value_parser = parse::number::<u8>)]
    events: Vec<u8>,
    #[arg(long, value_parser = parse::number::<u16>)]
    opcode: Option<u16>,
    #[arg(long)]
    all_packet_types: bool,
    #[arg(long)]
    all_events: bool,
}

#[derive(Args)]
struct RequestFilterArgs {
    #[arg(long, value_parser = parse::number::<u16>)]
    ogf: u16,
    #[arg(long, value_parser = parse::number::<u16>)]
    ocf: u16,
    /// Extra event code to accept besides the command reply events
    #[arg(long, value_parser = parse::number::<u8>, default_value = "0")]
    event: u8,
}

fn main() -> anyhow::Result<()> {
    let module_filter = tracing_subscriber::filter::Targets::new()
        .with_target("lehci_core", tracing::Level::TRACE)
        .with_target("lehci_cli", tracing::Level::TRACE);
    // Conditionally sets event format between debug/release mode.
    #[cfg(debug_assertions)]
    let event_format = tracing_subscriber::fmt::format();
    #[cfg(not(debug_assertions))]
    let event_format = tracing_subscriber::fmt::format().json();
    let subscriber = tracing_subscriber::registry().with(module_filter).with(
        tracing_subscriber::fmt::Layer::default()
            .with_writer(std::io::stderr)
            .event_format(event_format),
    );
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Cli::parse();
    match args.command {
        Cmd::Beacon(args) => run_beacon(args)?,
        Cmd::Filter(args) => run_filter(args),
        Cmd::RequestFilter(args) => run_request_filter(args),
    }

    Ok(())
}

fn run_beacon(args: BeaconArgs) -> anyhow::Result<()> {
    let beacon = Beacon::with_config(BeaconConfig {
        uuid: args.uuid,
        major: args.major,
        minor: args.minor,
        rssi: args.rssi,
        interval: args.interval,
    });
    tracing::info!(uuid = %beacon.uuid(), major = beacon.major(), minor = beacon.minor(), "encoding beacon");
    let data = beacon.advertising_data()?;
    println!("{}", hex::encode(data.to_bytes()));
    if args.commands {
        for command in beacon.commands()? {
            tracing::debug!(opcode = %command.opcode(), "command packet");
            println!("{}", hex::encode(command.as_bytes()));
        }
    }
    Ok(())
}

fn run_filter(args: FilterArgs) {
    let mut filter = Filter::new();
    if args.all_packet_types {
        filter.set_all_packet_types();
    }
    for t in args.packet_types {
        filter.set_packet_type(t);
    }
    if args.all_events {
        filter.set_all_events();
    }
    for e in args.events {
        filter.set_event(e);
    }
    if let Some(opcode) = args.opcode {
        filter.set_opcode(opcode);
    }
    print_filter(&filter);
}

fn run_request_filter(args: RequestFilterArgs) {
    let opcode = Opcode::new(args.ogf, args.ocf);
    let filter = Filter::for_command_request(opcode, args.event);
    print_filter(&filter);
}

fn print_filter(filter: &Filter) {
    tracing::info!(
        type_mask = filter.type_mask,
        event_mask_lo = filter.event_mask[0],
        event_mask_hi = filter.event_mask[1],
        opcode = filter.opcode,
        "packed filter"
    );
    println!("{}", hex::encode(filter.to_bytes()));
}
