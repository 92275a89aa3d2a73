use anyhow::{bail, Context, Result};
use phrasebook::{Arg, Config, I18n, LanguageTag};
use tracing::info;

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("phrasebook=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut argv = std::env::args().skip(1);
    let (Some(language), Some(message_id)) = (argv.next(), argv.next()) else {
        bail!("usage: phrasebook <language> <message-id> [args...]");
    };
    let args: Vec<Arg> = argv.map(|arg| Arg::infer(&arg)).collect();

    let language: LanguageTag = language
        .parse()
        .with_context(|| format!("`{}` is not a language tag", language))?;

    let config = Config::from_env()?;
    let mut i18n = I18n::new(config);
    i18n.load()
        .with_context(|| format!("Failed to load translations from {}", i18n.source_path().display()))?;

    info!("Rendering {} for {}", message_id, language);
    println!("{}", i18n.printer(&language).sprintf(&message_id, &args));
    Ok(())
}
