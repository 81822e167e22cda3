use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Spot vs planet RV periodogram sweep")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Where to write the heatmap (overrides the workflow file)
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long)]
    sweep_steps: Option<usize>,
    #[arg(long)]
    time_samples: Option<usize>,
    /// Open the rendered image in the system viewer
    #[arg(long, default_value_t = false)]
    show: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::default()
    };
    if let Some(output) = args.output {
        workflow_config.output = output;
    }
    if let Some(steps) = args.sweep_steps {
        workflow_config.sweep_steps = steps;
    }
    if let Some(samples) = args.time_samples {
        workflow_config.time_samples = samples;
    }

    let runner = Runner::new(workflow_config.clone());
    let result = runner.execute()?;
    let sweep = &result.sweep;

    println!(
        "Sweep -> steps {}, frequency bins {}, h/K {:.3}..{:.3}, elapsed {:.2?}",
        sweep.sweep_len(),
        sweep.frequencies.len(),
        sweep.ratios.first().copied().unwrap_or_default(),
        sweep.ratios.last().copied().unwrap_or_default(),
        result.elapsed
    );
    if let (Some(first), Some(last)) = (result.peak_periods.first(), result.peak_periods.last()) {
        println!(
            "Strongest period: {:.2} d at lowest h/K, {:.2} d at highest h/K",
            first, last
        );
    }

    runner.render(&result, &workflow_config.output)?;
    println!("Heatmap written to {}", workflow_config.output.display());

    if args.show {
        open::that(&workflow_config.output)
            .with_context(|| format!("opening {}", workflow_config.output.display()))?;
    }

    Ok(())
}
