//! smartmark CLI: markup in, XHTML (or the tree dump) out.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use smartmark::{DashStyle, Options};

#[derive(Debug, Parser)]
#[command(name = "smartmark", version, about = "Convert smartmark text to XHTML")]
struct Cli {
    /// Input file; `-` or nothing reads stdin.
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dump the parsed tree instead of rendering.
    #[arg(long, conflicts_with = "document")]
    xml: bool,

    /// Wrap the output in a complete XHTML document.
    #[arg(long)]
    document: bool,

    /// Smart punctuation.
    #[arg(short, long)]
    smart: bool,

    /// No footnotes, link table or metadata.
    #[arg(long)]
    plain: bool,

    /// Recognise wikilinks.
    #[arg(long)]
    wiki_links: bool,

    /// Wikilink URL template; `{0}` is the page name.
    #[arg(long, value_name = "TEMPLATE")]
    wiki_format: Option<String>,

    /// Indented blocks are code, not quotations.
    #[arg(long)]
    technical: bool,

    #[arg(long, value_enum, default_value_t = Dashes::Em2En3)]
    dashes: Dashes,

    /// Keep the spaces around em dashes.
    #[arg(long)]
    tight_dashes: bool,

    /// Omit all class attributes.
    #[arg(long)]
    no_classes: bool,
}

/// Dash policy: which run length becomes which dash.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Dashes {
    /// `--` em dash, `---` en dash.
    Em2En3,
    /// `---` em dash, `--` en dash.
    Em3En2,
    /// `--` em dash, no en dash.
    Em2,
}

impl From<Dashes> for DashStyle {
    fn from(dashes: Dashes) -> Self {
        match dashes {
            Dashes::Em2En3 => DashStyle::DoubleEmdashTripleEndash,
            Dashes::Em3En2 => DashStyle::TripleEmdashDoubleEndash,
            Dashes::Em2 => DashStyle::DoubleEmdashNoEndash,
        }
    }
}

impl Cli {
    fn options(&self) -> Options {
        let mut options = Options {
            plain: self.plain,
            smart_punctuation: self.smart,
            wiki_links: self.wiki_links,
            technical_style: self.technical,
            dash_style: self.dashes.into(),
            spaces_around_dashes: !self.tight_dashes,
            emit_classes: !self.no_classes,
            ..Options::default()
        };
        if let Some(format) = &self.wiki_format {
            options.wiki_link_format = format.clone();
        }
        options
    }

    fn read_input(&self) -> Result<String> {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
            _ => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read stdin")?;
                Ok(buf)
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let input = cli.read_input()?.replace("\r\n", "\n");
    let doc = smartmark::parse_with_options(&input, &cli.options());
    if !doc.diagnostics().is_empty() {
        tracing::info!(count = doc.diagnostics().len(), "metadata entries dropped");
    }

    let rendered = if cli.xml {
        doc.to_xml()
    } else if cli.document {
        doc.to_html_document()
    } else {
        doc.to_html()
    };

    match &cli.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => io::stdout()
            .write_all(rendered.as_bytes())
            .context("failed to write stdout")?,
    }
    Ok(())
}
