//! The `master` subcommand: run a WAV file through the mastering chain.

use anyhow::Context;
use clap::Args;
use maestro_analysis::ReferenceProfiler;
use maestro_io::{read_wav, write_wav};
use maestro_mastering::{DEFAULT_TARGET_LUFS, MasteringPipeline, Mode};
use std::path::PathBuf;

#[derive(Args)]
pub struct MasterArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(short, long)]
    output: PathBuf,

    /// Integrated loudness target in LUFS (ignored when a reference is given)
    #[arg(long, default_value_t = DEFAULT_TARGET_LUFS, allow_hyphen_values = true)]
    target_lufs: f32,

    /// Reference WAV file; all mastering targets are derived from it
    #[arg(short, long)]
    reference: Option<PathBuf>,
}

pub fn run(args: MasterArgs) -> anyhow::Result<()> {
    let signal = read_wav(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    println!(
        "Loaded {} ({} ch, {} Hz, {:.1}s)",
        args.input.display(),
        signal.num_channels(),
        signal.sample_rate(),
        signal.duration_secs()
    );

    let mode = match &args.reference {
        Some(path) => {
            let reference = read_wav(path)
                .with_context(|| format!("reading reference {}", path.display()))?;
            let profile = ReferenceProfiler::new().profile(&reference);
            println!(
                "Reference {}: {:.1} LUFS, DR {:.1} dB",
                path.display(),
                profile.target_lufs,
                profile.dynamic_range_db
            );
            Mode::Reference { profile }
        }
        None => Mode::Standard {
            target_lufs: args.target_lufs,
        },
    };

    let result = MasteringPipeline::new()
        .master(&signal, &mode)
        .context("mastering failed")?;

    if result.silent {
        println!("Warning: input is silent; written unchanged");
    } else {
        println!(
            "Mastered in {} mode: {:+.1} dB normalization, ceiling {:.2}",
            result.mode.as_str(),
            result.normalization_gain_db,
            result.config.limiter_ceiling
        );
    }

    write_wav(&args.output, &result.signal)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Wrote {}", args.output.display());
    Ok(())
}
