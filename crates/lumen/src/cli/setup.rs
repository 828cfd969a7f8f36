//! Shared setup: path and filter overrides, input validation, task planning.

use clap::Args;
use lumen_core::{Config, FileDiscovery, ImageProcessor, ImageTask};
use std::path::PathBuf;

/// Arguments common to every command that runs the pipeline.
#[derive(Args, Debug, Default, Clone)]
pub struct JobArgs {
    /// Input directory (or single image); defaults to `paths.input_dir`
    pub input: Option<PathBuf>,

    /// Output directory; defaults to `paths.output_dir`
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Brightness multiplier for the final stage; defaults to
    /// `filters.brightness_factor`
    #[arg(long)]
    pub brightness: Option<f64>,
}

/// Everything needed to run the pipeline over a discovered task list.
pub struct Job {
    pub processor: ImageProcessor,
    pub tasks: Vec<ImageTask>,
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Apply CLI overrides, validate the input, and plan tasks.
///
/// Returns `Ok(None)` when the input contains no eligible images.
pub fn prepare(args: &JobArgs, mut config: Config) -> anyhow::Result<Option<Job>> {
    apply_overrides(args, &mut config)?;

    let input = config.input_dir();
    let output = config.output_dir();
    if !input.exists() {
        anyhow::bail!(
            "Input path does not exist: {:?}\n\n  \
             Hint: Check the path or set paths.input_dir in the config.",
            input
        );
    }

    let tasks = FileDiscovery::new(config.processing.clone()).plan_tasks(&input, &output);
    if tasks.is_empty() {
        tracing::warn!("No supported image files found at {:?}", input);
        return Ok(None);
    }
    tracing::info!("Found {} image(s) to process", tasks.len());

    Ok(Some(Job {
        processor: ImageProcessor::new(&config),
        tasks,
        input,
        output,
    }))
}

fn apply_overrides(args: &JobArgs, config: &mut Config) -> anyhow::Result<()> {
    if let Some(input) = &args.input {
        config.paths.input_dir = input.clone();
    }
    if let Some(output) = &args.output {
        config.paths.output_dir = output.clone();
    }
    if let Some(factor) = args.brightness {
        if !factor.is_finite() || factor < 0.0 {
            anyhow::bail!("--brightness must be a finite value >= 0.0 (got {factor})");
        }
        config.filters.brightness_factor = factor;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn overrides_replace_config_values() {
        let args = JobArgs {
            input: Some(PathBuf::from("in")),
            output: Some(PathBuf::from("out")),
            brightness: Some(0.9),
        };
        let mut config = Config::default();
        apply_overrides(&args, &mut config).unwrap();
        assert_eq!(config.paths.input_dir, PathBuf::from("in"));
        assert_eq!(config.paths.output_dir, PathBuf::from("out"));
        assert_eq!(config.filters.brightness_factor, 0.9);
    }

    #[test]
    fn negative_brightness_is_rejected() {
        let args = JobArgs {
            brightness: Some(-1.0),
            ..Default::default()
        };
        assert!(apply_overrides(&args, &mut Config::default()).is_err());
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = JobArgs {
            input: Some(dir.path().join("absent")),
            ..Default::default()
        };
        let err = prepare(&args, Config::default()).err().unwrap();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn empty_input_yields_no_job() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"no images").unwrap();
        let args = JobArgs {
            input: Some(dir.path().to_path_buf()),
            output: Some(dir.path().join("out")),
            brightness: None,
        };
        assert!(prepare(&args, Config::default()).unwrap().is_none());
    }

    #[test]
    fn discovered_tasks_are_mirrored() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        std::fs::create_dir_all(input.join("a")).unwrap();
        RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]))
            .save(input.join("a/x.png"))
            .unwrap();
        let args = JobArgs {
            input: Some(input.clone()),
            output: Some(dir.path().join("out")),
            brightness: None,
        };

        let job = prepare(&args, Config::default()).unwrap().unwrap();
        assert_eq!(job.tasks.len(), 1);
        assert_eq!(job.tasks[0].output, dir.path().join("out/a/x.png"));
        assert_eq!(job.input, input);
    }
}
