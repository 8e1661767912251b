//! # Linea CLI
//!
//! Command-line interface for encoding printer commands and sending them
//! over a byte-oriented link.
//!
//! ## Usage
//!
//! ```bash
//! # Show the bytes for a command line
//! linea encode ESC @ Hello LF
//!
//! # Show each token's encoding rule
//! linea encode --explain ESC 27d 1Bh 0x1b 999d
//!
//! # Translate a whole script (no separator bytes between lines)
//! linea encode < receipt.cmd
//!
//! # Show how a command would be split into frames
//! linea frames --chunk-len 4 ESC @ Hello LF
//!
//! # Send to a Bluetooth printer
//! linea send --device /dev/rfcomm0 ESC @ Hello LF ESC d 2d
//!
//! # Stream command lines from stdin, one buffer per line
//! cat receipt.cmd | linea send --profile serial --device /dev/ttyUSB0
//!
//! # List link profiles
//! linea profiles
//! ```
//!
//! Set `RUST_LOG=linea=debug` (or `trace`) for per-frame logging.

use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Read};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use linea::{
    LineaError,
    link::{LinkProfile, LinkSettings, ResolvedLink},
    protocol::{TokenKind, gbk, hex, line, mnemonic},
    queue::FrameQueue,
    transport::{
        FrameSink, MemorySink, SerialTransport,
        pump::{self, DrainStats, PumpOptions},
    },
};

/// Linea - printer command encoder and frame sender
#[derive(Parser, Debug)]
#[command(name = "linea")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a command line and print the bytes as hex
    Encode {
        /// Show one line per token with the rule that encoded it
        #[arg(long)]
        explain: bool,

        /// Command tokens (joined with spaces); reads a script from stdin when omitted
        #[arg(allow_hyphen_values = true)]
        tokens: Vec<String>,
    },

    /// Show how a command line would be split into frames
    Frames {
        /// Link profile supplying the chunk length
        #[arg(long, default_value = "bluetooth")]
        profile: String,

        /// Frame size in bytes (overrides the profile)
        #[arg(long)]
        chunk_len: Option<usize>,

        /// Command tokens (joined with spaces)
        #[arg(required = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },

    /// Encode commands and send them to the printer
    Send {
        /// Printer device path
        #[arg(long)]
        device: Option<String>,

        /// Link profile (bluetooth, serial, usb)
        #[arg(long)]
        profile: Option<String>,

        /// JSON link settings file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Frame size in bytes (overrides profile and settings file)
        #[arg(long)]
        chunk_len: Option<usize>,

        /// Pause after each frame, in milliseconds
        #[arg(long)]
        frame_delay_ms: Option<u64>,

        /// Send each command line as a single frame
        #[arg(long)]
        no_split: bool,

        /// Print the frames instead of opening the device
        #[arg(long)]
        dry_run: bool,

        /// Command tokens; reads lines from stdin when omitted
        #[arg(allow_hyphen_values = true)]
        tokens: Vec<String>,
    },

    /// List link profiles
    Profiles,
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("linea=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<(), LineaError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { explain, tokens } => {
            let script = if tokens.is_empty() {
                let mut input = String::new();
                io::stdin().read_to_string(&mut input)?;
                input
            } else {
                tokens.join(" ")
            };

            if explain {
                for row in script.lines().flat_map(explain_rows) {
                    println!("{}", row);
                }
            } else {
                println!("{}", hex::to_hex_dump(&line::translate_lines(&script)));
            }
        }

        Commands::Frames {
            profile,
            chunk_len,
            tokens,
        } => {
            let link = LinkSettings {
                profile: Some(profile),
                chunk_len,
                ..Default::default()
            }
            .resolve()?;

            let queue = FrameQueue::new();
            queue.enqueue_line(&tokens.join(" "), true, link.chunk_len)?;
            println!(
                "{} frame(s), chunk length {} ({})",
                queue.len(),
                link.chunk_len,
                link.profile.name
            );
            print_frames(&queue.drain());
        }

        Commands::Send {
            device,
            profile,
            config,
            chunk_len,
            frame_delay_ms,
            no_split,
            dry_run,
            tokens,
        } => {
            let file_settings = match config {
                Some(path) => LinkSettings::load(path)?,
                None => LinkSettings::default(),
            };
            let flags = LinkSettings {
                profile,
                device,
                chunk_len,
                sub_package: no_split.then_some(false),
                frame_delay_ms,
                poll_interval_ms: None,
            };
            let link = file_settings.merge(flags).resolve()?;
            debug!(?link, "resolved link settings");

            let stats = if dry_run {
                let mut sink = MemorySink::new();
                let stats = deliver(&link, &mut sink, tokens)?;
                print_frames(&sink.frames);
                stats
            } else {
                let mut transport = SerialTransport::open(&link.device)?;
                deliver(&link, &mut transport, tokens)?
            };

            info!(
                frames = stats.frames,
                bytes = stats.bytes,
                "sent to {}",
                if dry_run { "dry run" } else { link.device.as_str() }
            );
        }

        Commands::Profiles => {
            println!("{:<10} {:<14} {:>8} {:>10}", "KEY", "NAME", "CHUNK", "DELAY");
            for p in LinkProfile::all() {
                println!(
                    "{:<10} {:<14} {:>8} {:>8}ms",
                    p.key, p.name, p.chunk_len, p.frame_delay_ms
                );
            }
        }
    }

    Ok(())
}

/// Enqueue the command from `tokens` (or stdin) and pump it into `sink`.
///
/// With stdin input a reader thread enqueues one buffer per line while this
/// thread writes frames, so piped input starts printing before EOF.
fn deliver<S: FrameSink>(
    link: &ResolvedLink,
    sink: &mut S,
    tokens: Vec<String>,
) -> Result<DrainStats, LineaError> {
    let queue = Arc::new(FrameQueue::new());

    if !tokens.is_empty() {
        queue.enqueue_line(&tokens.join(" "), link.sub_package, link.chunk_len)?;
        return pump::drain_to(&queue, sink, link.frame_delay);
    }

    let stop = Arc::new(AtomicBool::new(false));
    let reader = {
        let queue = Arc::clone(&queue);
        let stop = Arc::clone(&stop);
        let (sub_package, chunk_len) = (link.sub_package, link.chunk_len);
        thread::spawn(move || -> Result<usize, LineaError> {
            let result = enqueue_lines(io::stdin().lock(), &queue, sub_package, chunk_len);
            stop.store(true, Ordering::Release);
            result
        })
    };

    let stats = pump::run(&queue, sink, &PumpOptions::from(link), &stop)?;

    let lines = reader
        .join()
        .map_err(|_| LineaError::Transport("stdin reader thread panicked".to_string()))??;
    debug!(lines, "stdin closed");

    Ok(stats)
}

/// Enqueue every line of `input`, returning the number of lines read.
fn enqueue_lines<R: BufRead>(
    input: R,
    queue: &FrameQueue,
    sub_package: bool,
    chunk_len: usize,
) -> Result<usize, LineaError> {
    let mut count = 0;
    for text in input.lines() {
        queue.enqueue_line(&text?, sub_package, chunk_len)?;
        count += 1;
    }
    Ok(count)
}

/// One formatted row per token of `command`: token, rule, control name, bytes.
fn explain_rows(command: &str) -> Vec<String> {
    line::explain_line(command)
        .into_iter()
        .map(|report| {
            // Name single control bytes however they were written
            let name = match report.bytes.as_slice() {
                [b] => mnemonic::name_of(*b).unwrap_or(""),
                _ => "",
            };
            let mut row = format!(
                "{:<12} {:<8} {:<4} {}",
                report.token,
                report.kind.label(),
                name,
                hex::to_hex_dump(&report.bytes)
            );
            if report.kind == TokenKind::Text && !gbk::is_representable(report.token) {
                row.push_str("  (not in GBK, sent as &#NNNN;)");
            }
            row
        })
        .collect()
}

fn print_frames(frames: &[Vec<u8>]) {
    for (i, frame) in frames.iter().enumerate() {
        println!("{:>4}  {:>5} B  {}", i, frame.len(), hex::to_hex_dump(frame));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_explain_rows_name_control_bytes() {
        let rows = explain_rows("1Bh 0x4000");
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("ESC"), "{}", rows[0]);
        assert!(rows[1].starts_with("0x4000"), "{}", rows[1]);
        assert!(rows[1].ends_with("40"), "{}", rows[1]);
    }

    #[test]
    fn test_explain_rows_flag_unmappable_text() {
        let rows = explain_rows("中文 😀");
        assert!(!rows[0].contains("not in GBK"), "{}", rows[0]);
        assert!(rows[1].contains("not in GBK"), "{}", rows[1]);
    }

    #[test]
    fn test_enqueue_lines_one_buffer_per_line() {
        let queue = FrameQueue::new();
        let input = Cursor::new("ESC @\nHi LF\n");
        let count = enqueue_lines(input, &queue, false, 0).unwrap();
        assert_eq!(count, 2);
        assert_eq!(queue.drain(), vec![vec![0x1B, 0x40], vec![b'H', b'i', 0x0A]]);
    }
}
