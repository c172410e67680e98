//! `coffee-dashboard`: terminal front end for the coffee catalogue.

use std::fmt::Write as _;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use cap_std::{ambient_authority, fs::Dir};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use coffee_dashboard::render::{render_detail, render_list};
use coffee_dashboard::{
    CoffeeDetailView, CoffeeListView, DashboardContext, EditOutcome, HttpCoffeeClient, ImageFile,
};

#[derive(Debug, Parser)]
#[command(name = "coffee-dashboard", about = "Browse and edit the coffee catalogue")]
struct Cli {
    /// API root, e.g. `http://localhost:8080/api`.
    #[arg(long, env = "COFFEE_API_URL", default_value = "http://localhost:8080/api")]
    base_url: String,
    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List coffees with the total count and average price.
    List,
    /// Show one coffee.
    Show {
        /// Coffee id.
        id: i32,
        /// Open in edit mode.
        #[arg(long)]
        edit: bool,
    },
    /// Add a coffee from an image URL or a local file.
    Add {
        /// Coffee name.
        #[arg(long)]
        name: String,
        /// Price.
        #[arg(long)]
        price: f64,
        /// Image URL.
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        image: Option<String>,
        /// Local image to upload.
        #[arg(long)]
        file: Option<PathBuf>,
        /// Description.
        #[arg(long)]
        description: Option<String>,
    },
    /// Update name, price, or image.
    Edit {
        /// Coffee id.
        id: i32,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        /// New price.
        #[arg(long)]
        price: Option<f64>,
        /// New image URL.
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a coffee.
    Delete {
        /// Coffee id.
        id: i32,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

fn content_type_for(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => return None,
    };
    Some(mime.to_owned())
}

fn read_image(path: &Path) -> Result<ImageFile> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| eyre!("{} is not a file path", path.display()))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .wrap_err_with(|| format!("cannot open {}", parent.display()))?;
    let bytes = dir
        .read(file_name)
        .wrap_err_with(|| format!("cannot read {}", path.display()))?;
    Ok(ImageFile {
        file_name: file_name.to_owned(),
        content_type: content_type_for(path),
        bytes,
    })
}

async fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let client = HttpCoffeeClient::new(&cli.base_url, Duration::from_secs(cli.timeout_secs))
        .wrap_err("failed to build HTTP client")?;
    let ctx = DashboardContext::new(Arc::new(client));
    let mut text = String::new();

    match cli.command {
        Command::List => {
            let mut list = CoffeeListView::new(ctx);
            list.load().await;
            render_list(&list, &mut text)?;
        }
        Command::Show { id, edit } => {
            let mut page = CoffeeDetailView::new(ctx, id, edit);
            page.load().await;
            render_detail(&page, &mut text)?;
        }
        Command::Add {
            name,
            price,
            image,
            file,
            description,
        } => {
            let mut list = CoffeeListView::new(ctx);
            list.open_add_dialog();
            if let Some(form) = list.add_form_mut() {
                form.name = name;
                form.price = price;
                form.description = description.unwrap_or_default();
                if let Some(url) = image {
                    form.image = url;
                }
            }
            let created = match file {
                Some(path) => list.submit_add_with_image(read_image(&path)?).await,
                None => list.submit_add().await,
            }?;
            if let Some(coffee) = created {
                writeln!(text, "Created coffee {} ({})", coffee.id, coffee.name)?;
            }
            render_list(&list, &mut text)?;
        }
        Command::Edit {
            id,
            name,
            price,
            image,
        } => {
            let mut page = CoffeeDetailView::new(ctx, id, true);
            page.load().await;
            if page.coffee().is_none() {
                bail!("coffee {id} not found");
            }
            let form = page.form_mut();
            if let Some(value) = name {
                form.name = value;
            }
            if let Some(value) = price {
                form.price = value;
            }
            if let Some(value) = image {
                form.image = value;
            }
            if page.submit_edit().await != EditOutcome::Saved {
                writeln!(text, "Coffee was not updated")?;
            }
            render_detail(&page, &mut text)?;
        }
        Command::Delete { id, yes } => {
            let mut list = CoffeeListView::new(ctx);
            list.request_delete(id);
            if yes {
                list.confirm_delete().await?;
            } else {
                list.cancel_delete();
                writeln!(text, "Re-run with --yes to delete coffee {id}")?;
            }
            list.load().await;
            render_list(&list, &mut text)?;
        }
    }

    out.write_all(text.as_bytes())?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    run(cli, &mut std::io::stdout().lock()).await
}
