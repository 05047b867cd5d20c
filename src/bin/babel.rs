//! `babel`: read pages of the Library of Babel from the command line.

use std::io::{self, IsTerminal as _, Read as _};

use anyhow::Context as _;
use babel_library::{AddressPolicy, Alphabet, Library, LibraryConfig};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

const ENV_LOG: &str = "BABEL_LOG";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    library: LibraryArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print one page of a book.
    Page {
        /// Book number in decimal, or `-` to read it from stdin.
        book: String,
        /// Zero-based page index.
        #[arg(allow_negative_numbers = true)]
        page: i64,
    },
    /// Print every page of a book, in order.
    Book {
        /// Book number in decimal, or `-` to read it from stdin.
        book: String,
    },
    /// Print the number of the book whose page starts with TEXT.
    Locate {
        /// Text to find; every glyph must be in the alphabet.
        text: String,
        /// Page the text should appear on.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        page: i64,
    },
    /// Check that a book's scramble round-trips.
    Verify {
        /// Book number in decimal, or `-` to read it from stdin.
        book: String,
    },
}

#[derive(Args, Debug)]
struct LibraryArgs {
    /// Bytes per book; must be a multiple of 16.
    #[arg(long, global = true)]
    book_size: Option<usize>,

    /// Bytes (glyphs) per page; must divide the book size.
    #[arg(long, global = true)]
    page_size: Option<usize>,

    /// Cipher key as hex (16, 24 or 32 bytes).
    #[arg(long, global = true, env = "BABEL_KEY")]
    key: Option<String>,

    /// Cipher IV as hex (16 bytes).
    #[arg(long, global = true, env = "BABEL_IV")]
    iv: Option<String>,

    /// Glyphs of the alphabet; byte b renders as glyph b mod N.
    #[arg(long, global = true)]
    alphabet: Option<String>,

    /// Reject book numbers wider than a book instead of truncating them.
    #[arg(long, global = true)]
    strict: bool,
}

impl LibraryArgs {
    fn into_config(self) -> anyhow::Result<LibraryConfig> {
        let mut config = LibraryConfig::default();
        if let Some(book_size) = self.book_size {
            config = config.with_book_size(book_size);
        }
        if let Some(page_size) = self.page_size {
            config = config.with_page_size(page_size);
        }
        if let Some(key) = self.key {
            config = config.with_key_hex(&key).context("invalid --key")?;
        }
        if let Some(iv) = self.iv {
            config = config.with_iv_hex(&iv).context("invalid --iv")?;
        }
        if let Some(symbols) = self.alphabet {
            let alphabet = Alphabet::modulo(&symbols).context("invalid --alphabet")?;
            config = config.with_alphabet(alphabet);
        }
        if self.strict {
            config = config.with_address_policy(AddressPolicy::Reject);
        }
        Ok(config)
    }
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(ENV_LOG)
        .from_env_lossy();
    let format = fmt::format()
        .with_level(true)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .compact();
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .event_format(format)
        .init();
}

/// Book numbers can run to millions of digits, so `-` reads one from stdin.
fn read_book(book: String) -> anyhow::Result<String> {
    if book != "-" {
        return Ok(book);
    }
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read book number from stdin")?;
    Ok(input.trim().to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = cli.library.into_config()?;
    let library = Library::new(config).context("invalid library configuration")?;

    match cli.command {
        Commands::Page { book, page } => {
            let book = read_book(book)?;
            println!("{}", library.generate_book_page(&book, page)?);
        }
        Commands::Book { book } => {
            let book = read_book(book)?;
            for (index, text) in library.generate_book(&book)?.iter().enumerate() {
                println!("--- page {} ---", index);
                println!("{}", text);
            }
        }
        Commands::Locate { text, page } => {
            println!("{}", library.locate(&text, page)?);
        }
        Commands::Verify { book } => {
            let book = read_book(book)?;
            anyhow::ensure!(library.verify(&book)?, "scramble round trip failed");
            info!("round trip ok");
        }
    }
    Ok(())
}
