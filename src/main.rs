//! audio-tips CLI entry point

use std::process::ExitCode;

use clap::Parser;

use audio_tips::cli::{
    app::{
        load_merged_config, run_catalog, run_generate, run_publish, run_records, EXIT_ERROR,
        EXIT_USAGE_ERROR,
    },
    args::{Cli, Commands, CloudOptions, GenerateOptions, PublishOptions, RecordsOptions},
    config_cmd::handle_config_command,
    logging::init_logging,
    presenter::Presenter,
};
use audio_tips::domain::error::ConfigError;
use audio_tips::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Config { action } => {
            let presenter = Presenter::new();
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                let code = match e {
                    ConfigError::ValidationError { .. } => EXIT_USAGE_ERROR,
                    _ => EXIT_ERROR,
                };
                return ExitCode::from(code);
            }
            ExitCode::SUCCESS
        }
        Commands::Catalog { catalog } => run_catalog(catalog.catalog),
        Commands::Generate {
            catalog,
            output,
            speech,
        } => {
            let config = load_merged_config(output.to_config().merge(speech.to_config())).await;
            run_generate(GenerateOptions::from_config(catalog.catalog, &config)).await
        }
        Commands::Publish {
            catalog,
            output,
            speech,
            cloud,
            storage,
            strict,
        } => {
            let cli_config = output
                .to_config()
                .merge(speech.to_config())
                .merge(cloud.to_config())
                .merge(storage.to_config());
            let config = load_merged_config(cli_config).await;
            run_publish(PublishOptions::from_config(
                catalog.catalog,
                &config,
                strict,
            ))
            .await
        }
        Commands::Records { cloud, search } => {
            let config = load_merged_config(cloud.to_config()).await;
            run_records(RecordsOptions {
                cloud: CloudOptions::from_config(&config),
                search,
            })
            .await
        }
    }
}
