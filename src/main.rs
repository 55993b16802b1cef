use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docx_from_html_folder::{build_document, docx, text, Config};
use log::info;
use log::LevelFilter::{Debug, Info};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Log per-node decisions (skipped images, text previews).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build one .docx from every page in a folder.
    Docx {
        /// Folder containing the .html pages.
        #[arg(long)]
        html_dir: PathBuf,

        /// Folder images are resolved against, by file name.
        #[arg(long)]
        image_dir: PathBuf,

        /// Output .docx path.
        #[arg(long)]
        out: PathBuf,

        /// Page placed first, without title or page break.
        #[arg(long, default_value = "frmPAVIS.html")]
        first_page: String,

        /// Id of the element whose content is transcribed.
        #[arg(long, default_value = "mainbody")]
        anchor_id: String,
    },
    /// Write a whitespace-normalized .txt beside every .html page.
    Text {
        /// Folder containing the .html pages.
        #[arg(long)]
        html_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::builder()
        .filter_module("docx_from_html_folder", if args.verbose { Debug } else { Info })
        .try_init()?;

    match args.command {
        Command::Docx {
            html_dir,
            image_dir,
            out,
            first_page,
            anchor_id,
        } => {
            let config = Config {
                first_page,
                anchor_id,
                ..Config::new(html_dir, image_dir, out)
            };
            let doc = build_document(&config)
                .with_context(|| format!("convert {}", config.html_dir.display()))?;
            docx::write_docx(&config.out, doc.operations())
                .with_context(|| format!("create {}", config.out.display()))?;
            info!("Documentation created: {}", config.out.display());
        }
        Command::Text { html_dir } => {
            text::extract_folder(&html_dir)
                .with_context(|| format!("extract text from {}", html_dir.display()))?;
        }
    }
    Ok(())
}
