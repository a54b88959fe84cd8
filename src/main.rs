use cep_temperature::{config, logging, server};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;

    // The trace exporter owns a blocking HTTP client, so it is set up and
    // torn down outside the async runtime.
    let telemetry = logging::init(&config.log_level, &config.log_format, config.otlp.as_ref())?;
    config.print_summary();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(server::run(config));
    drop(runtime);

    telemetry.shutdown();
    result
}
