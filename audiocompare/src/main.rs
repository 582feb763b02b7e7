mod cli;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use audiocompare_core::{
    plan, run_with_progress, ChannelFormat, ChannelInput, ChannelPlan, Config, ConversionPlan,
    Endianness, ProgressEvent, WordWidth,
};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::debug;

use crate::cli::build_cli;

fn channel_input(
    matches: &clap::ArgMatches,
    file: &str,
    endianness: &str,
    width: &str,
) -> ChannelInput {
    let path = matches
        .get_one::<PathBuf>(file)
        .expect("required argument")
        .clone();
    let endianness = *matches
        .get_one::<Endianness>(endianness)
        .expect("required argument");
    let width = *matches
        .get_one::<WordWidth>(width)
        .expect("required argument");
    ChannelInput::new(path, ChannelFormat::new(width, endianness))
}

fn describe_channel(plan: &ChannelPlan, input: &ChannelInput) -> String {
    let mut line = format!(
        "  {}: {} word(s) of {} from {}",
        plan.channel,
        plan.words,
        plan.format,
        input.path.display()
    );
    if plan.trailing_bytes > 0 {
        line.push_str(&format!(
            " ({} trailing byte(s) ignored)",
            plan.trailing_bytes
        ));
    }
    line
}

fn print_plan(config: &Config, plan: &ConversionPlan) {
    println!(
        "Dry run: would write {} frame(s) ({} bytes) to {}:",
        plan.frames,
        plan.output_bytes,
        config.output_path.display()
    );
    println!("{}", describe_channel(&plan.left, &config.left));
    println!("{}", describe_channel(&plan.right, &config.right));
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = build_cli().get_matches();

    let left = channel_input(&matches, "left_file", "left_endianness", "left_width");
    let right = channel_input(&matches, "right_file", "right_endianness", "right_width");
    let output_path = matches
        .get_one::<PathBuf>("output_file")
        .expect("required argument")
        .clone();
    let dry_run = matches.get_flag("dry-run");

    let config = Config::new(left, right, &output_path).with_context(|| {
        format!(
            "failed to create configuration for '{}'",
            output_path.display()
        )
    })?;
    debug!("resolved configuration: {config:?}");

    if dry_run {
        let plan = plan(&config).context("failed to inspect the input files")?;
        print_plan(&config, &plan);
        return Ok(());
    }

    println!(
        "Parsing mono left channel file {} ({} endian with {} byte words) and mono right channel",
        config.left.path.display(),
        config.left.format.endianness,
        config.left.format.width
    );
    println!(
        "file {} ({} endian with {} byte words) and writing stereo output to file {}.",
        config.right.path.display(),
        config.right.format.endianness,
        config.right.format.width,
        config.output_path.display()
    );

    let progress = ProgressBar::new(0);
    progress.set_draw_target(ProgressDrawTarget::stderr());

    let bar_style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} frames",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    let spinner_style = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    let output_display = config.output_path.display().to_string();
    let progress_handle = progress.clone();
    let result = run_with_progress(config, move |event| match event {
        ProgressEvent::Start {
            total_frames: Some(total),
        } => {
            progress_handle.set_style(bar_style.clone());
            progress_handle.set_length(total.max(1));
            progress_handle.enable_steady_tick(Duration::from_millis(100));
        }
        ProgressEvent::Start { total_frames: None } => {
            progress_handle.set_style(spinner_style.clone());
            progress_handle.enable_steady_tick(Duration::from_millis(100));
        }
        ProgressEvent::Advance { frames_written } => {
            progress_handle.set_position(frames_written);
            progress_handle.set_message(format!("{frames_written} frame(s)"));
        }
        ProgressEvent::Finish => {
            progress_handle.set_message(String::from("Completed"));
        }
    })
    .with_context(|| format!("failed to write '{output_display}'"));

    progress.finish_and_clear();

    let summary = result?;
    println!(
        "Done: {} frame(s) written to file {}.",
        summary.frames_written, output_display
    );

    Ok(())
}
