use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use upload_client::{ImageView, SelectedFile, UploadClient, UploadForm, UploadState};

#[derive(Parser)]
#[command(about = "Upload images to the bucket through presigned URLs")]
struct Cli {
    /// Base URL of the image backend
    #[arg(long, env = "IMAGE_BACKEND_URL", default_value = "http://localhost:8001")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a local image and print its display URL
    Upload {
        /// Image to upload
        path: PathBuf,
        /// Content type to send; guessed from the extension when omitted
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Print a display URL for a stored image, optionally saving it locally
    Show {
        /// Object key
        key: String,
        /// Write the image bytes here
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let client = UploadClient::new(&cli.server)?;
    let mut form = UploadForm::new();

    match cli.command {
        Command::Upload { path, content_type } => {
            let data = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let name = path
                .file_name()
                .and_then(|name| name.to_str())
                .context("Path has no usable file name")?
                .to_string();
            let content_type = content_type.unwrap_or_else(|| guess_content_type(&path));

            let file = SelectedFile::new(name, content_type, data);
            println!("Selected {}", file.preview_label());
            form.select_file(Some(file));

            let state = form.submit(&client).await;
            if let Some(status) = state.status_message() {
                println!("{status}");
            }
            if !matches!(state, UploadState::Succeeded { .. }) {
                bail!("upload did not complete");
            }
        }
        Command::Show { key, output } => {
            form.load_image(&client, &key).await;

            if let Some(output) = output {
                let bytes = form
                    .fetch_image(&client)
                    .await?
                    .context("No image to download")?;
                tokio::fs::write(&output, &bytes)
                    .await
                    .with_context(|| format!("Failed to write {}", output.display()))?;
                println!("Saved {} bytes to {}", bytes.len(), output.display());
            }
        }
    }

    match form.image() {
        ImageView::Loaded { url, .. } => println!("Image URL: {url}"),
        ImageView::Failed { message } => bail!("{message}"),
        ImageView::Empty | ImageView::Loading => {}
    }

    Ok(())
}

fn guess_content_type(path: &Path) -> String {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);

    let mime: mime::Mime = match extension.as_deref() {
        Some("png") => mime::IMAGE_PNG,
        Some("jpg" | "jpeg") => mime::IMAGE_JPEG,
        Some("gif") => mime::IMAGE_GIF,
        Some("bmp") => mime::IMAGE_BMP,
        Some("svg") => mime::IMAGE_SVG,
        // No constant for webp in the mime crate
        Some("webp") => "image/webp"
            .parse()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    };

    mime.to_string()
}
