//! Command-line driver for the five-stage RV32I pipeline model.
//!
//! This binary provides two subcommands. It performs:
//! 1. **Run:** Load a raw or ELF image, run it to the halt instruction, then print
//!    the register file and pipeline statistics.
//! 2. **Disasm:** Print a raw image word by word with its disassembly.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rvpipe_core::Simulator;
use rvpipe_core::common::error::{SimError, SimResult};
use rvpipe_core::config::Config;
use rvpipe_core::isa::disasm::disassemble;
use rvpipe_core::sim::loader;

#[derive(Parser, Debug)]
#[command(
    name = "rvpipe",
    author,
    version,
    about = "Five-stage pipelined RV32I core model",
    long_about = "Run a program on a cycle-level model of a classic five-stage RV32I pipeline.\n\nPrograms halt by executing `jal x0, 0`.\n\nExamples:\n  rvpipe run prog.bin\n  rvpipe run prog.elf --read-latency 2 --trace\n  rvpipe disasm prog.bin"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a raw binary or ELF executable until it halts.
    Run {
        /// Program image (raw binary loaded at 0, or ELF32 RISC-V).
        file: PathBuf,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Cycle budget before giving up.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Log every tick and every retired instruction.
        #[arg(long)]
        trace: bool,

        /// Wait states of an instruction fetch.
        #[arg(long)]
        fetch_latency: Option<u32>,

        /// Wait states of a data read.
        #[arg(long)]
        read_latency: Option<u32>,

        /// Wait states of a data write.
        #[arg(long)]
        write_latency: Option<u32>,
    },

    /// Disassemble a raw binary.
    Disasm {
        /// Raw program image.
        file: PathBuf,
    },
}

/// Overrides applied on top of the configuration file.
#[derive(Debug, Default)]
struct RunOptions {
    config: Option<PathBuf>,
    max_cycles: Option<u64>,
    trace: bool,
    fetch_latency: Option<u32>,
    read_latency: Option<u32>,
    write_latency: Option<u32>,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            file,
            config,
            max_cycles,
            trace,
            fetch_latency,
            read_latency,
            write_latency,
        } => cmd_run(
            &file,
            RunOptions {
                config,
                max_cycles,
                trace,
                fetch_latency,
                read_latency,
                write_latency,
            },
        ),
        Commands::Disasm { file } => {
            init_logging(false);
            cmd_disasm(&file)
        }
    };

    if let Err(e) = result {
        error!("{e}");
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `--trace`.
fn init_logging(trace: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if trace { "trace" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the effective configuration from the file and the command-line overrides.
fn build_config(opts: &RunOptions) -> SimResult<Config> {
    let mut config = match &opts.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
                path: path.display().to_string(),
                source,
            })?;
            Config::from_json(&text)?
        }
        None => Config::default(),
    };

    if let Some(n) = opts.max_cycles {
        config.general.max_cycles = n;
    }
    if opts.trace {
        config.general.trace_instructions = true;
    }
    if let Some(n) = opts.fetch_latency {
        config.memory.fetch_latency = n;
    }
    if let Some(n) = opts.read_latency {
        config.memory.read_latency = n;
    }
    if let Some(n) = opts.write_latency {
        config.memory.write_latency = n;
    }
    config.validate()?;
    Ok(config)
}

/// Loads the program, runs it to the halt instruction and prints the final state.
fn cmd_run(file: &Path, opts: RunOptions) -> SimResult<()> {
    let config = build_config(&opts)?;
    init_logging(config.general.trace_instructions);

    let image = loader::load_file(file)?;
    let mut sim = Simulator::new(&config);
    let entry = sim.load(&image)?;
    info!(
        "loaded {} ({} bytes, entry {entry:#010x}), memory {} KiB, latency fetch/read/write {}/{}/{}",
        file.display(),
        image.len(),
        config.memory.size_bytes / 1024,
        config.memory.fetch_latency,
        config.memory.read_latency,
        config.memory.write_latency
    );

    let outcome = sim.run();
    println!("{}", sim.cpu.regs);
    println!("PC: {:#010x}", sim.cpu.pc);
    sim.cpu.stats.print();

    let summary = outcome?;
    info!(
        "halted at {:#010x} after {} cycles, {} instructions retired",
        summary.pc, summary.cycles, summary.retired
    );
    Ok(())
}

/// Prints each word of a raw image with its address and disassembly.
fn cmd_disasm(file: &Path) -> SimResult<()> {
    let image = loader::load_file(file)?;
    let words = image.chunks_exact(4);
    let tail = words.remainder().len();

    for (i, chunk) in words.enumerate() {
        let word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        println!("{:08x}:  {word:08x}  {}", i * 4, disassemble(word));
    }
    if tail != 0 {
        println!("({tail} trailing bytes ignored)");
    }
    Ok(())
}
