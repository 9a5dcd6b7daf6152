use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use futures::TryStreamExt;
use pinlink::prelude::*;

#[derive(Parser)]
#[command(name = "pinlink", version, about = "Manage files pinned on a remote pinning service")]
struct Cli {
    /// Bearer token used for every request
    #[arg(long, env = "PINLINK_TOKEN", hide_env_values = true)]
    token: String,

    #[arg(long, env = "PINLINK_API_URL", default_value = pinlink::api::DEFAULT_API_URL)]
    api_url: String,

    #[arg(long, env = "PINLINK_UPLOADS_URL", default_value = pinlink::api::DEFAULT_UPLOADS_URL)]
    uploads_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every file matching the filters, following pages until the listing ends
    List {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        group: Option<String>,

        #[arg(long)]
        cid: Option<String>,

        #[arg(long)]
        mime_type: Option<String>,

        /// Page size requested from the service
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Stream a local file to the service as a new pinned file
    Upload {
        path: PathBuf,

        /// Name to store the file under, defaults to the local file name
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        group: Option<String>,
    },

    Get {
        id: String,
    },

    Rename {
        id: String,
        new_name: String,
    },

    Delete {
        id: String,
    },

    /// Pin a local file through the legacy pinning route
    Pin {
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{EnvFilter, Layer};

    let cli = Cli::parse();

    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let env_filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(non_blocking_writer)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).init();
    tracing::debug!("running {}", full_version());

    let client = PinningClient::builder(cli.token)
        .api_url(cli.api_url)
        .uploads_url(cli.uploads_url)
        .build()?;

    match cli.command {
        Command::List {
            name,
            group,
            cid,
            mime_type,
            limit,
        } => {
            let filters = ListFilesQuery {
                cid,
                group,
                limit,
                mime_type,
                name,
            };

            let mut pages = Box::pin(client.files_matching(filters).into_stream());
            while let Some(page) = pages.try_next().await? {
                for file in page.files() {
                    println!("{}\t{}\t{}\t{}", file.id, file.cid, file.size, file.name);
                }
            }
        }
        Command::Upload { path, name, group } => {
            let name = match name {
                Some(name) => name,
                None => path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .map(str::to_string)
                    .context("local path has no usable file name, pass --name")?,
            };

            let reader = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("unable to open {}", path.display()))?;

            let file = client.upload_reader(reader, &name, group.as_deref()).await?;
            print_json(&file)?;
        }
        Command::Get { id } => print_json(&client.get_file(&id).await?)?,
        Command::Rename { id, new_name } => {
            print_json(&client.rename_file(&id, &new_name).await?)?
        }
        Command::Delete { id } => print_json(&client.delete_file(&id).await?)?,
        Command::Pin { path } => match client.pin_file_legacy(&path).await {
            Some(result) => print_json(&result)?,
            None => anyhow::bail!("pinning {} failed", path.display()),
        },
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
