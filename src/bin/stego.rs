//! # Stego Binary Entry Point
//!
//! Thin CLI over the library's file-level commands.
//!
//! ## Usage
//!
//! ```bash
//! stego encode photo.png "Hello" out.png --mode rgb
//! stego decode out.png --mode rgb
//! stego encode photo.png "Hello" out.png --use-delimiter
//! stego decode out.png --use-delimiter
//! stego capacity photo.png --mode alpha
//! ```
//!
//! Use the same termination flags on both sides: `--use-delimiter` (or
//! `--delimiter STRING`) selects a textual delimiter, otherwise the message
//! ends at the first zero byte. A plain `encode` does not append `~END~`;
//! decoding such an image with `--use-delimiter` prints the message followed
//! by the zero padding. Set `use_delimiter = true` in the config file to make
//! the delimiter the default on both sides.
//!
//! ## Exit codes
//! `0` success, `1` other failure, `2` bad usage, `3` message too long,
//! `4` configuration error, `5` input image unreadable, `6` unsupported output
//! format, `7` character outside the single-byte range.

use clap::{Args as ClapArgs, Parser, Subcommand};
use log::{error, warn, LevelFilter};
use std::path::PathBuf;

use lsb_stego::commands::{capacity_file, decode_file, encode_file};
use lsb_stego::common::StegoConfig;
use lsb_stego::processing::OutputFormat;
use lsb_stego::utils::logging::{init_logger, parse_level};
use lsb_stego::{EmbeddingMode, StegoError};

/// Hide and recover text in image pixel LSBs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file with default settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a MESSAGE into an IMAGE and save as OUTPUT_PATH
    Encode {
        image_path: PathBuf,
        message: String,
        output_path: PathBuf,

        #[command(flatten)]
        options: CodecOptions,

        /// Output format (jpeg, png, bmp, gif, tiff); defaults to the output extension
        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// Decode a message from an IMAGE
    Decode {
        image_path: PathBuf,

        #[command(flatten)]
        options: CodecOptions,
    },

    /// Show how many characters an IMAGE can hold
    Capacity {
        image_path: PathBuf,

        #[command(flatten)]
        options: CodecOptions,
    },
}

#[derive(ClapArgs, Debug)]
struct CodecOptions {
    /// Channels to use: rgb or alpha
    #[arg(long)]
    mode: Option<String>,

    /// Terminate the message with a text delimiter (default "~END~") instead
    /// of a zero byte. Without it encode appends no delimiter, so pass the
    /// same choice to encode and decode.
    #[arg(long)]
    use_delimiter: bool,

    /// Delimiter text (implies --use-delimiter)
    #[arg(long)]
    delimiter: Option<String>,
}

impl CodecOptions {
    /// `--mode` if given, else the config default. A bad value is a
    /// configuration error (exit 4).
    fn mode(&self, config: &StegoConfig) -> Result<EmbeddingMode, StegoError> {
        match &self.mode {
            Some(mode) => mode.parse(),
            None => Ok(config.defaults.mode),
        }
    }
}

fn run(command: Command, config: &StegoConfig) -> anyhow::Result<()> {
    match command {
        Command::Encode {
            image_path,
            message,
            output_path,
            options,
            format,
        } => {
            let policy = config.termination(options.use_delimiter, options.delimiter.as_deref());
            encode_file(
                &image_path,
                &message,
                &output_path,
                options.mode(config)?,
                &policy,
                format.or(config.defaults.format),
            )?;
        }
        Command::Decode {
            image_path,
            options,
        } => {
            let policy = config.termination(options.use_delimiter, options.delimiter.as_deref());
            let message = decode_file(&image_path, options.mode(config)?, &policy)?;
            if message.is_empty() {
                println!("No message found or message is empty.");
            } else {
                println!("Decoded message: {}", message);
            }
        }
        Command::Capacity {
            image_path,
            options,
        } => {
            let policy = config.termination(options.use_delimiter, options.delimiter.as_deref());
            let report = capacity_file(&image_path, options.mode(config)?, &policy)?;
            println!(
                "{}x{} image, {} mode: {} bit slots, up to {} characters",
                report.width, report.height, report.mode, report.bits, report.max_chars
            );
        }
    }

    Ok(())
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<StegoError>()
        .map_or(1, StegoError::exit_code)
}

fn main() {
    let args = Args::parse();

    let config = StegoConfig::load_or_default(args.config.as_deref());

    let configured_level = config
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());
    let (level, bad_level) = if args.quiet {
        (LevelFilter::Error, None)
    } else if args.verbose {
        (LevelFilter::Debug, None)
    } else {
        match parse_level(&configured_level) {
            Ok(level) => (level, None),
            Err(e) => (LevelFilter::Info, Some(e)),
        }
    };

    init_logger(level);
    if let Some(e) = bad_level {
        warn!("{}; using info", e);
    }

    let result = config
        .map_err(anyhow::Error::from)
        .and_then(|config| run(args.command, &config));

    if let Err(err) = result {
        error!("{:#}", err);
        std::process::exit(exit_code(&err));
    }
}
