//! The `analyze` subcommand: print a file's mastering profile.

use anyhow::Context;
use clap::Args;
use maestro_analysis::ReferenceProfiler;
use maestro_io::read_wav;
use std::path::PathBuf;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Emit the profile as JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let signal = read_wav(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let profile = ReferenceProfiler::new().profile(&signal);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!("Analysis of {}", args.input.display());
    println!(
        "  {} channels, {} Hz, {:.1}s",
        signal.num_channels(),
        signal.sample_rate(),
        signal.duration_secs()
    );
    println!("  Integrated loudness: {:>8.1} LUFS", profile.target_lufs);
    println!("  Peak level:          {:>8.3}", profile.peak_level);
    println!("  Dynamic range:       {:>8.1} dB", profile.dynamic_range_db);
    println!(
        "  Est. compression:    {:>8.1}:1",
        profile.estimated_compression_ratio
    );
    println!(
        "  Spectral centroid:   {:>8.0} Hz",
        profile.spectral_centroid_hz
    );
    println!(
        "  Spectral rolloff:    {:>8.0} Hz",
        profile.spectral_rolloff_hz
    );
    println!(
        "  Low band energy:     {:>8.1} %",
        profile.low_freq_energy_ratio * 100.0
    );
    println!(
        "  High band energy:    {:>8.1} %",
        profile.high_freq_energy_ratio * 100.0
    );
    Ok(())
}
