use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fxp::{BitPattern, FormatConfig, Fpf};
use fxp_diagram::{DiagramOptions, LabelPlacement, NotationMode};
use tracing_subscriber::EnvFilter;

mod style;

use style::DiagramFile;

/// Fixed-point format inspection and bit-field diagrams
#[derive(Parser)]
#[command(name = "fxp", version)]
struct Cli {
    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show word length, exponents and range of a format
    Info {
        #[command(flatten)]
        format: FormatArgs,
    },
    /// Round values to a format
    Round {
        #[command(flatten)]
        format: FormatArgs,
        /// Saturate rounded values into the format range
        #[arg(long)]
        clamp: bool,
        /// Values to round
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },
    /// Move the binary point of a format by N positions
    Shift {
        #[command(flatten)]
        format: FormatArgs,
        /// Number of positions (positive moves towards the msb side)
        #[arg(allow_negative_numbers = true)]
        n: i32,
    },
    /// Emit the TikZ bit-field diagram of a format
    Diagram(DiagramArgs),
}

/// A format given as notation or as explicit fields.
#[derive(Args, Debug, Default)]
struct FormatArgs {
    /// Notation such as "Q8.12", "uQ4.3" or "(8,-12)"
    #[arg(short, long)]
    format: Option<String>,
    /// Word length in bits
    #[arg(long, allow_negative_numbers = true)]
    wl: Option<i32>,
    /// Exponent of the most significant bit
    #[arg(long, allow_negative_numbers = true)]
    msb: Option<i32>,
    /// Exponent of the least significant bit
    #[arg(long, allow_negative_numbers = true)]
    lsb: Option<i32>,
    /// Unsigned format (with explicit fields only)
    #[arg(long)]
    unsigned: bool,
}

impl FormatArgs {
    fn is_empty(&self) -> bool {
        self.format.is_none() && self.wl.is_none() && self.msb.is_none() && self.lsb.is_none()
    }

    fn config(&self) -> FormatConfig {
        FormatConfig {
            wl: self.wl,
            msb: self.msb,
            lsb: self.lsb,
            signed: self.unsigned.then_some(false),
            notation: self.format.clone(),
        }
    }

    fn resolve(&self) -> Result<Fpf> {
        Fpf::from_config(&self.config()).context("invalid format")
    }
}

#[derive(Args, Debug)]
struct DiagramArgs {
    #[command(flatten)]
    format: FormatArgs,
    /// TOML file with [format] and [diagram] tables
    #[arg(long)]
    style: Option<PathBuf>,
    /// Label placement: left, right, above, below, no
    #[arg(long)]
    label: Option<LabelPlacement>,
    /// Label convention: mlsb or ifwl
    #[arg(long)]
    notation: Option<NotationMode>,
    /// Draw the binary point
    #[arg(long)]
    binary_point: bool,
    /// Numbers instead of names, and numeric cell labels
    #[arg(long)]
    numeric: bool,
    /// Separate integer and fractional regions
    #[arg(long)]
    intfrac: bool,
    /// Annotate each bit with its weight
    #[arg(long)]
    power2: bool,
    /// Draw the implicit bits between the word and the binary point
    #[arg(long)]
    draw_missing: bool,
    /// Horizontal position of the binary point
    #[arg(long, allow_negative_numbers = true)]
    x_shift: Option<i32>,
    /// Vertical position of the cells
    #[arg(long, allow_negative_numbers = true)]
    y_origin: Option<i32>,
    /// Literal word to write in the cells, msb first (e.g. 0110_1000)
    #[arg(long, conflicts_with = "value")]
    bits: Option<BitPattern>,
    /// Value to encode and write in the cells
    #[arg(long, allow_negative_numbers = true)]
    value: Option<f64>,
    /// Wrap the commands in a tikzpicture environment
    #[arg(long)]
    picture: bool,
    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Info { format } => cmd_info(&format),
        Command::Round {
            format,
            clamp,
            values,
        } => cmd_round(&format, clamp, &values),
        Command::Shift { format, n } => cmd_shift(&format, n),
        Command::Diagram(args) => cmd_diagram(&args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_info(format: &FormatArgs) -> Result<()> {
    let fpf = format.resolve()?;
    let (min, max) = fpf.range();
    println!("Format:        {fpf}");
    println!("Word length:   {}", fpf.wl());
    println!("MSB:           {}", fpf.msb());
    println!("LSB:           {}", fpf.lsb());
    println!("Signed:        {}", fpf.signed());
    println!("Range:         [{min}, {max}]");
    println!("Resolution:    {}", fpf.resolution());
    println!("Q notation:    {}", q_notation(&fpf));
    Ok(())
}

/// `sQm.n` / `uQm.n`, or `-` when the format has no Q form.
fn q_notation(fpf: &Fpf) -> String {
    let sign = if fpf.signed() { 's' } else { 'u' };
    match fpf.q_bits() {
        Some((m, n)) => format!("{sign}Q{m}.{n}"),
        None => "-".to_string(),
    }
}

fn cmd_round(format: &FormatArgs, clamp: bool, values: &[f64]) -> Result<()> {
    let fpf = format.resolve()?;
    for &value in values {
        let mut rounded = fpf.round_to_format(value);
        if clamp {
            rounded = fpf.clamp(rounded);
        }
        match fpf.encode(rounded) {
            Some(bits) => println!("{value} -> {rounded}  [{bits}]"),
            None => println!("{value} -> {rounded}  (out of range)"),
        }
    }
    Ok(())
}

fn cmd_shift(format: &FormatArgs, n: i32) -> Result<()> {
    let fpf = format.resolve()?;
    let shifted = fpf.shift(n);
    let (wl, msb, lsb) = shifted.wml();
    println!("{shifted}  (wl={wl}, msb={msb}, lsb={lsb})");
    Ok(())
}

fn cmd_diagram(args: &DiagramArgs) -> Result<()> {
    let file = match &args.style {
        Some(path) => DiagramFile::load(path)?,
        None => DiagramFile::default(),
    };

    // Command-line format takes precedence over the file's [format] table.
    let fpf = match (&file.format, args.format.is_empty()) {
        (Some(config), true) => Fpf::from_config(config).context("invalid [format] table")?,
        (None, true) => anyhow::bail!("no format given; use --format, --wl/--msb/--lsb or --style"),
        (_, false) => args.format.resolve()?,
    };

    let options = diagram_options(args, file.diagram, &fpf)?;
    let markup = if args.picture {
        fxp_diagram::render_picture(&fpf, &options)
    } else {
        fxp_diagram::render(&fpf, &options)
    }
    .with_context(|| format!("rendering {fpf}"))?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &markup).with_context(|| format!("writing {}", path.display()))?;
            println!("wrote {}", path.display());
        }
        None => print!("{markup}"),
    }
    Ok(())
}

/// Apply command-line flags on top of the options read from a file.
fn diagram_options(
    args: &DiagramArgs,
    mut options: DiagramOptions,
    fpf: &Fpf,
) -> Result<DiagramOptions> {
    if let Some(label) = args.label {
        options.label = label;
    }
    if let Some(notation) = args.notation {
        options.notation = notation;
    }
    if let Some(x_shift) = args.x_shift {
        options.x_shift = x_shift;
    }
    if let Some(y_origin) = args.y_origin {
        options.y_origin = y_origin;
    }
    options.binary_point |= args.binary_point;
    options.numeric |= args.numeric;
    options.intfrac |= args.intfrac;
    options.power2 |= args.power2;
    options.draw_missing |= args.draw_missing;

    if let Some(bits) = &args.bits {
        options.bits = Some(bits.clone());
    }
    if let Some(value) = args.value {
        let bits = fpf
            .encode(value)
            .with_context(|| format!("{value} is outside the range of {fpf}"))?;
        options.bits = Some(bits);
    }
    Ok(options)
}
