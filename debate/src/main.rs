use clap::Parser;
use indoc::formatdoc;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Run one Llama vs Gemini exchange and print the replies.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// Topic to open the debate with
    topic: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debate=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let exchange = debate::exchange_from_env()?;

    let result = exchange.run(&cli.topic).await?;

    let first = exchange.first().name();
    let second = exchange.second().name();
    println!(
        "{}",
        formatdoc!(
            "
            Topic: {topic}

            [{first}, round 1]
            {first_reply}

            [{second}, round 1]
            {second_reply}

            [{first}, final]
            {first_final}

            [{second}, final]
            {second_final}
            ",
            topic = cli.topic,
            first_reply = result.first_reply,
            second_reply = result.second_reply,
            first_final = result.first_final,
            second_final = result.second_final,
        )
    );

    Ok(())
}
