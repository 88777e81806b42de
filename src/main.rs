use clap::Parser;

use network::api::client::HttpApiClient;
use network::cli::{Opts, SubCommand};
use network::feed::controller::FeedController;
use network::logger::configure_logger;
use network::terminal::TerminalPresenter;
use network_config::{parse_config, NETWORK_VERSION};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts: Opts = Opts::parse();

    let (config, config_warnings) = parse_config()?;
    configure_logger(config.log_level);
    log::info!(
        "network v{}; config loaded from {}",
        NETWORK_VERSION,
        config.config_path,
    );
    for warning in config_warnings {
        log::warn!("{}", warning);
    };
    log::info!("server: {}", config.server_url);

    let api = HttpApiClient::from_config(&config)?;
    let presenter = TerminalPresenter::new(opts.html);
    let controller = &mut FeedController::new(api, presenter, config.session());

    let interactive = matches!(opts.subcmd, SubCommand::Browse(_));
    match opts.subcmd {
        SubCommand::Posts(cmd) => cmd.execute(controller).await,
        SubCommand::Profile(cmd) => cmd.execute(controller).await,
        SubCommand::Following(cmd) => cmd.execute(controller).await,
        SubCommand::Post(cmd) => cmd.execute(controller).await,
        SubCommand::Edit(cmd) => cmd.execute(controller).await,
        SubCommand::Follow(cmd) => cmd.execute(controller).await,
        SubCommand::Browse(cmd) => cmd.execute(controller).await?,
    };
    controller.presenter_mut().flush();

    let error_count = controller.presenter().error_count();
    if error_count > 0 && !interactive {
        anyhow::bail!("{} request(s) failed", error_count);
    };
    Ok(())
}
