use std::ffi::OsString;
use std::io::{self, BufWriter, Write};
use std::process;

use log::{debug, warn};
use num_bigint::{BigInt, Sign};
use structopt::clap::{AppSettings, ErrorKind};
use structopt::StructOpt;

mod emit;
mod error;
mod table;

use emit::Layout;
use error::Error;
use table::TableParams;

const USAGE: &str = "Usage: generate-dvdb-table <dvdb>";

/// Generates the voltage drop table used to pick FRAM checkpoint thresholds.
///
/// The C source is written to stdout; redirect it into the header that needs it.
#[derive(StructOpt, Debug)]
#[structopt(
    name = "generate-dvdb-table",
    setting = AppSettings::AllowNegativeNumbers
)]
struct Cli {
    /// Volts dropped per byte saved/restored to/from FRAM
    #[structopt(parse(try_from_str = parse_dvdb))]
    dvdb: f64,
    /// Number of table entries
    #[structopt(short = "n", long)]
    entries: Option<usize>,
    /// Bytes covered by each successive entry
    #[structopt(short = "b", long)]
    bytes_per_entry: Option<u32>,
    /// ADC LSBs per volt
    #[structopt(short = "l", long)]
    lsb_per_volt: Option<u32>,
    /// Right shift applied after truncation
    #[structopt(short = "s", long)]
    shift: Option<u32>,
    /// Values per output line
    #[structopt(short = "w", long)]
    per_line: Option<usize>,
    /// C identifier of the generated array
    #[structopt(long, empty_values = false)]
    array_name: Option<String>,
    #[structopt(hidden = true, parse(from_os_str))]
    extra: Vec<OsString>,
}

impl Cli {
    fn params(&self) -> TableParams {
        let defaults = TableParams::new(self.dvdb);
        TableParams {
            entries: self.entries.unwrap_or(defaults.entries),
            bytes_per_entry: self.bytes_per_entry.unwrap_or(defaults.bytes_per_entry),
            lsb_per_volt: self.lsb_per_volt.unwrap_or(defaults.lsb_per_volt),
            shift: self.shift.unwrap_or(defaults.shift),
            ..defaults
        }
    }

    fn layout(&self) -> Layout {
        let defaults = Layout::default();
        Layout {
            array_name: self.array_name.clone().unwrap_or(defaults.array_name),
            per_line: self.per_line.unwrap_or(defaults.per_line),
        }
    }
}

fn parse_dvdb(s: &str) -> Result<f64, Error> {
    s.trim().parse().map_err(|source| Error::Parse {
        input: s.to_string(),
        source,
    })
}

fn main() {
    env_logger::init();

    let args = match Cli::from_iter_safe(std::env::args_os()) {
        Ok(args) => args,
        Err(e) if e.kind == ErrorKind::MissingRequiredArgument => {
            println!("{}", USAGE);
            process::exit(1);
        }
        Err(e) => e.exit(),
    };

    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Cli) -> Result<(), Error> {
    if !args.extra.is_empty() {
        debug!("ignoring {} extra argument(s)", args.extra.len());
    }

    let params = args.params();
    debug!("generating with {:?}", params);

    let vdrop = table::compute(&params)?;

    let overflowing = vdrop
        .entries()
        .iter()
        .filter(|&v| v.sign() == Sign::Minus || *v > BigInt::from(u16::MAX))
        .count();
    if overflowing > 0 {
        warn!("{} entries fall outside the uint16_t range", overflowing);
    }
    debug!(
        "computed {} entries, min {:?}, max {:?}",
        vdrop.len(),
        vdrop.min(),
        vdrop.max()
    );

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    emit::write_c_array(&mut writer, &vdrop, &args.layout())?;
    writer.flush()?;

    Ok(())
}
