use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use gene_analysis::GeneAnalyzer;

/// Main entry point for the TumorScope reference service
///
/// Serves the gene-analysis REST API with OpenAPI/Swagger documentation.
///
/// # Environment Variables
/// - `TUMORSCOPE_REST_ADDR`: REST server address (default: "0.0.0.0:8000")
/// - `TUMORSCOPE_MIN_SEQUENCE_LEN`: shortest sequence analysed before answering with an
///   alert (default: 20)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the minimum sequence length is not a positive integer,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tumorscope_run=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("TUMORSCOPE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());
    let min_sequence_len = GeneAnalyzer::min_sequence_len_from_env_value(
        std::env::var("TUMORSCOPE_MIN_SEQUENCE_LEN").ok(),
    )?;
    let analyzer = GeneAnalyzer::new(min_sequence_len)?;

    tracing::info!(
        "Gene analysis requires at least {} bases",
        analyzer.min_sequence_len()
    );

    api_rest::serve(&rest_addr, AppState::new(analyzer)).await?;

    Ok(())
}
