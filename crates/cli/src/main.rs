use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tumorscope_core::{
    display, notice, AnalysisOrchestrator, ClientConfig, GeneAnalysisClient, GeneAnalysisOutcome,
    HttpGeneAnalysisClient, HttpPredictionClient, NoticeReceiver, PredictionClient,
    TumorPrediction, UploadSelection, WorkflowError,
};

#[derive(Parser)]
#[command(name = "tumorscope")]
#[command(about = "MRI tumor prediction and gene analysis client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the tumor type shown in an MRI image
    Predict {
        /// MRI image (jpg, png, gif, bmp, tiff or dcm)
        image: PathBuf,
    },
    /// Analyse a DNA sequence for a known tumor type
    Analyze {
        /// Tumor type, e.g. "glioma"
        #[arg(long)]
        tumor_type: String,
        #[command(flatten)]
        sequence: SequenceArgs,
    },
    /// Predict from an MRI image, then analyse a DNA sequence for the predicted type
    Run {
        /// MRI image (jpg, png, gif, bmp, tiff or dcm)
        image: PathBuf,
        #[command(flatten)]
        sequence: SequenceArgs,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct SequenceArgs {
    /// DNA sequence
    #[arg(long)]
    sequence: Option<String>,
    /// File containing the DNA sequence
    #[arg(long)]
    sequence_file: Option<PathBuf>,
}

impl SequenceArgs {
    async fn read(&self) -> anyhow::Result<String> {
        match (&self.sequence, &self.sequence_file) {
            (Some(sequence), _) => Ok(sequence.clone()),
            (None, Some(path)) => read_sequence_file(path).await,
            (None, None) => anyhow::bail!("either --sequence or --sequence-file is required"),
        }
    }
}

/// Read a sequence file, joining its lines. Lines starting with `>` (FASTA headers) are
/// skipped.
async fn read_sequence_file(path: &Path) -> anyhow::Result<String> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read sequence file '{}'", path.display()))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('>'))
        .collect())
}

fn client_config() -> anyhow::Result<ClientConfig> {
    let cfg = ClientConfig::from_env_values(
        std::env::var("TUMORSCOPE_API_URL").ok(),
        std::env::var("TUMORSCOPE_UPLOAD_URL").ok(),
        std::env::var("TUMORSCOPE_ANALYZE_URL").ok(),
        std::env::var("TUMORSCOPE_TIMEOUT_SECS").ok(),
    )?;
    tracing::debug!(
        "upload: {}, analyze: {}",
        cfg.upload_url(),
        cfg.analyze_url()
    );
    Ok(cfg)
}

fn print_notices(rx: &mut NoticeReceiver) {
    for notice in notice::drain(rx) {
        println!("{notice}");
    }
}

fn print_outcome(outcome: &GeneAnalysisOutcome) {
    match outcome {
        GeneAnalysisOutcome::Result(result) => print!("{}", display::render_result(result)),
        GeneAnalysisOutcome::Alert(alert) => print!("{}", display::render_alert(alert)),
    }
}

async fn predict(cfg: &ClientConfig, image: &Path) -> anyhow::Result<()> {
    let selection = UploadSelection::from_path(image).await?;
    let client = HttpPredictionClient::new(cfg)?;
    let receipt = client.predict(&selection).await?;

    println!("{}", receipt.message);
    println!("Predicted tumor type: {}", receipt.prediction);
    Ok(())
}

/// Check the raw `analyze` inputs the same way the workflow does before any request.
fn analysis_input(tumor_type: &str, sequence: &str) -> anyhow::Result<(TumorPrediction, String)> {
    let Some(tumor_type) = TumorPrediction::new(tumor_type) else {
        anyhow::bail!("--tumor-type cannot be empty");
    };
    let Some(sequence) = tumorscope_core::validation::prepare_sequence(sequence) else {
        return Err(WorkflowError::EmptySequence.into());
    };
    Ok((tumor_type, sequence))
}

async fn analyze(cfg: &ClientConfig, tumor_type: &str, sequence: &str) -> anyhow::Result<()> {
    let (tumor_type, sequence) = analysis_input(tumor_type, sequence)?;
    let client = HttpGeneAnalysisClient::new(cfg)?;
    let outcome = client.analyze(tumor_type.as_str(), &sequence).await?;
    print_outcome(&outcome);
    Ok(())
}

async fn run(cfg: &ClientConfig, image: &Path, sequence: String) -> anyhow::Result<()> {
    let (tx, mut rx) = tumorscope_core::notice_channel();
    let orch = AnalysisOrchestrator::new(
        HttpPredictionClient::new(cfg)?,
        HttpGeneAnalysisClient::new(cfg)?,
        tx,
    );

    orch.select_upload(UploadSelection::from_path(image).await?);
    orch.set_sequence(sequence);

    let predicted = orch.upload().await;
    print_notices(&mut rx);
    predicted?;

    let analysed = orch.analyze().await;
    print_notices(&mut rx);
    analysed?;

    print!("{}", orch.with_workflow(display::render_workflow));
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tumorscope_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Predict { image }) => {
            predict(&client_config()?, &image).await?;
        }
        Some(Commands::Analyze {
            tumor_type,
            sequence,
        }) => {
            let sequence = sequence.read().await?;
            analyze(&client_config()?, &tumor_type, &sequence).await?;
        }
        Some(Commands::Run { image, sequence }) => {
            let sequence = sequence.read().await?;
            run(&client_config()?, &image, sequence).await?;
        }
        None => {
            println!("Use 'tumorscope --help' for commands");
        }
    }

    Ok(())
}
