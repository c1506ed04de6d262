//! swapfault harness CLI — memory pattern checks and injector drives.
//!
//! Two subcommands cover the test-tooling boundary of the resilience
//! harness: `memtest` fills a buffer with a seeded pattern and verifies
//! it back (a stand-in for remote-memory fill/verify runs), and `drive`
//! feeds simulated disk accesses through the injection engine and
//! reports the resulting fault statistics.

use clap::{Parser, Subcommand};
use log::{debug, info};
use snafu::Snafu;
use swapfault_inject::{FaultInjector, InjectError};
use swapfault_rng::Mt32;

/// CLI errors for the harness binary.
#[derive(Debug, Snafu)]
enum CliError {
    #[snafu(display("Fault injection error"), context(false))]
    Inject { source: InjectError },
    #[snafu(display("JSON error"), context(false))]
    Json { source: serde_json::Error },
    #[snafu(display("memory mismatch at byte {offset}"))]
    MemoryMismatch { offset: usize },
    #[snafu(display("{message}"))]
    Other { message: String },
}

#[derive(Parser)]
#[command(name = "swapfault-harness")]
#[command(about = "Drive and verify the swapfault fault-injection engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill a buffer with a seeded pattern and verify it back
    Memtest {
        /// Pattern seed
        #[arg(short, long, default_value_t = 1)]
        seed: u32,

        /// Buffer size in MiB
        #[arg(short = 'm', long, default_value_t = 64)]
        size_mb: usize,
    },

    /// Feed simulated accesses through the injector and report fault counts
    Drive {
        /// Fault rate (mean accesses between faults), decimal text
        #[arg(short, long, default_value = "1000")]
        rate: String,

        /// Number of simulated disks
        #[arg(short, long, default_value_t = 8)]
        disks: usize,

        /// Total accesses to simulate
        #[arg(short, long, default_value_t = 1_000_000)]
        accesses: u64,

        /// Drive a single disk instead of round-robin across all
        #[arg(long)]
        disk: Option<usize>,

        /// Emit the final report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Memtest { seed, size_mb } => cmd_memtest(seed, size_mb),
        Commands::Drive {
            rate,
            disks,
            accesses,
            disk,
            json,
        } => cmd_drive(&rate, disks, accesses, disk, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_memtest(seed: u32, size_mb: usize) -> Result<(), CliError> {
    let size = size_mb * 1024 * 1024;
    info!("seed == {seed}");
    info!("size == {size}");

    let buf = fill_memory(seed, size);
    check_memory(seed, &buf)?;

    println!("memtest ok: {} bytes verified (seed {})", buf.len(), seed);
    Ok(())
}

/// Fill `size` bytes with the seeded 7-bit pattern.
fn fill_memory(seed: u32, size: usize) -> Vec<u8> {
    info!("filling memory ...");
    let mut rng = Mt32::new(seed);
    (0..size).map(|_| (rng.next_u32() % 128) as u8).collect()
}

/// Re-derive the pattern from `seed` and compare byte for byte.
fn check_memory(seed: u32, buf: &[u8]) -> Result<(), CliError> {
    info!("checking memory ...");
    let mut rng = Mt32::new(seed);
    for (offset, &byte) in buf.iter().enumerate() {
        if byte != (rng.next_u32() % 128) as u8 {
            return MemoryMismatchSnafu { offset }.fail();
        }
    }
    Ok(())
}

fn cmd_drive(
    rate: &str,
    disks: usize,
    accesses: u64,
    disk: Option<usize>,
    json: bool,
) -> Result<(), CliError> {
    if disks == 0 {
        return OtherSnafu {
            message: "at least one disk is required".to_string(),
        }
        .fail();
    }

    let injector = FaultInjector::new(disks);
    injector.set_rate_text(rate)?;
    injector.set_enabled(true);

    info!(
        "driving {} accesses across {} disks at rate {}",
        accesses,
        disks,
        injector.rate()
    );

    // The consumption contract of the I/O path: record the access, then
    // ask whether to inject.  A real caller would simulate the failure
    // mode here; the harness just tallies.
    for access in 0..accesses {
        let target = match disk {
            Some(d) => d,
            None => (access % disks as u64) as usize,
        };
        injector.record_access(target)?;
        if injector.should_inject_fault(target)? {
            debug!("fault injected on disk {target} at access {access}");
        }
    }

    let report = injector.report();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("=== Injection Summary ===");
    println!("Rate: {}", injector.rate_text());
    println!("Accesses: {}", accesses);
    println!("Total faults: {}", report.total_faults);
    for d in &report.disks {
        let spacing = if d.fault_count > 0 {
            format!("{:.1}", d.access_count as f64 / d.fault_count as f64)
        } else {
            "-".to_string()
        };
        println!(
            "  disk {:>2}: {:>12} accesses  {:>8} faults  mean spacing {}",
            d.disk, d.access_count, d.fault_count, spacing
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_is_deterministic() {
        let a = fill_memory(1, 4096);
        let b = fill_memory(1, 4096);
        assert_eq!(a, b);
        assert!(a.iter().all(|&byte| byte < 128));
    }

    #[test]
    fn different_seeds_differ() {
        assert_ne!(fill_memory(1, 4096), fill_memory(2, 4096));
    }

    #[test]
    fn check_accepts_matching_pattern() {
        let buf = fill_memory(7, 8192);
        assert!(check_memory(7, &buf).is_ok());
    }

    #[test]
    fn check_reports_first_corrupted_byte() {
        let mut buf = fill_memory(7, 8192);
        buf[4242] ^= 0x40;
        match check_memory(7, &buf) {
            Err(CliError::MemoryMismatch { offset }) => assert_eq!(offset, 4242),
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn check_rejects_wrong_seed() {
        let buf = fill_memory(1, 4096);
        assert!(check_memory(2, &buf).is_err());
    }
}
