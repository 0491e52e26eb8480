use std::io::{self, Write};

use clap::Parser;
use kcost::{
    AnalyzeConfig, Cli, ClusterConfig, Command, KubernetesClient, Result, check_rate_staleness,
    init_logger, run_analyze, run_namespaces,
};
use log::debug;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("kcost: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    init_logger(cli.verbose, cli.quiet);

    // kube pulls in the ring provider, pin one so rustls does not have to guess
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cluster_config = ClusterConfig::from_cli(&cli);
    debug!("Cluster config: {:?}", cluster_config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Analyze(args) => {
            let config = AnalyzeConfig::from_args(args)?;
            check_rate_staleness(&config, &mut io::stderr());

            let client = KubernetesClient::connect(&cluster_config).await?;
            run_analyze(&client, &config, &mut out).await?;
        }
        Command::Namespaces => {
            let client = KubernetesClient::connect(&cluster_config).await?;
            run_namespaces(&client, &mut out).await?;
        }
    }

    out.flush()?;
    Ok(())
}
