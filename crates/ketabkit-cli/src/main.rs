//! KetabKit CLI - Command-line interface for the ketabonline.com catalog

use clap::{Args, Parser, Subcommand, ValueEnum};
use ketabkit::{
    index_to_markdown, pages_to_markdown, AuthorInfo, BookContents, BookIndexOptions, BookInfo,
    CategoryInfo, FootnoteOptions, IndexItem, IndexMarkdownOptions, KetabClient, KetabError,
    PagesMarkdownOptions, RequestOptions,
};
use std::convert::Infallible;
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Output format for catalog subcommands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Markdown with YAML frontmatter
    #[default]
    Md,
    /// JSON format
    Json,
}

/// KetabKit - browse the ketabonline.com catalog and convert books to Markdown
#[derive(Parser, Debug)]
#[command(name = "ketab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Catalog API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Book archive CDN base URL
    #[arg(long, global = true)]
    cdn_url: Option<String>,

    /// Custom User-Agent
    #[arg(long, global = true)]
    user_agent: Option<String>,
}

/// Paging and search flags shared by list subcommands
#[derive(Args, Debug)]
struct ListArgs {
    /// Search query
    #[arg(long, short)]
    query: Option<String>,

    /// Results per page
    #[arg(long, short)]
    limit: Option<u32>,

    /// Result page
    #[arg(long, short)]
    page: Option<u32>,

    /// Output format
    #[arg(long, short, default_value = "md")]
    output: OutputFormat,
}

impl ListArgs {
    fn request_options(&self) -> RequestOptions {
        let mut options = RequestOptions::new();
        if let Some(ref query) = self.query {
            options = options.query(query);
        }
        if let Some(limit) = self.limit {
            options = options.limit(limit);
        }
        if let Some(page) = self.page {
            options = options.page(page);
        }
        options
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show an author
    Author {
        /// Author ID
        id: u64,

        /// Output format
        #[arg(long, short, default_value = "md")]
        output: OutputFormat,
    },
    /// List or search authors
    Authors(ListArgs),
    /// Show a book
    Book {
        /// Book ID
        id: u64,

        /// Output format
        #[arg(long, short, default_value = "md")]
        output: OutputFormat,
    },
    /// List or search books
    Books(ListArgs),
    /// Show a category
    Category {
        /// Category ID
        id: u64,

        /// Output format
        #[arg(long, short, default_value = "md")]
        output: OutputFormat,
    },
    /// List or search categories
    Categories(ListArgs),
    /// Show the table of contents of a book
    Index {
        /// Book ID
        id: u64,

        /// Fetch nested entries
        #[arg(long)]
        recursive: bool,

        /// Part (volume) number
        #[arg(long, default_value_t = 1)]
        part: u32,

        /// Deepest level to render
        #[arg(long)]
        max_depth: Option<usize>,

        /// Output format
        #[arg(long, short, default_value = "md")]
        output: OutputFormat,
    },
    /// Download the contents of a book as JSON
    Download {
        /// Book ID
        id: u64,

        /// File to write
        output: PathBuf,
    },
    /// Convert the pages of a book to Markdown
    Markdown {
        /// Book ID, or a book JSON file saved by `download`
        book: BookSource,

        /// Leave footnotes out
        #[arg(long)]
        no_footnotes: bool,

        /// Prefix pages with page and part comments
        #[arg(long)]
        page_numbers: bool,
    },
}

/// Where the `markdown` subcommand reads a book from
#[derive(Debug, Clone, PartialEq)]
enum BookSource {
    /// Fetched from the CDN
    Id(u64),
    /// Read from a downloaded JSON file
    File(PathBuf),
}

impl FromStr for BookSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<u64>() {
            Ok(id) => BookSource::Id(id),
            Err(_) => BookSource::File(PathBuf::from(s)),
        })
    }
}

impl BookSource {
    async fn load(&self, client: &KetabClient) -> Result<BookContents, KetabError> {
        match self {
            BookSource::Id(id) => client.get_book_contents(*id).await,
            BookSource::File(path) => load_contents(path).await,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        eprintln!("Usage: ketab book <ID>");
        eprintln!("   or: ketab markdown <ID>");
        eprintln!("   or: ketab --help");
        std::process::exit(1);
    };

    let client = match build_client(cli.api_url, cli.cdn_url, cli.user_agent) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&client, command).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_client(
    api_url: Option<String>,
    cdn_url: Option<String>,
    user_agent: Option<String>,
) -> Result<KetabClient, KetabError> {
    let mut builder = KetabClient::builder();

    if let Some(url) = api_url {
        builder = builder.api_base_url(url);
    }
    if let Some(url) = cdn_url {
        builder = builder.books_cdn_url(url);
    }
    if let Some(ua) = user_agent {
        builder = builder.user_agent(ua);
    }

    builder.build()
}

async fn run(client: &KetabClient, command: Commands) -> Result<(), KetabError> {
    match command {
        Commands::Author { id, output } => {
            let author = client.get_author_info(id).await?;
            print_record(&author, output, format_author_md);
        }
        Commands::Authors(args) => {
            let authors = client.get_authors(&args.request_options()).await?;
            print_list(&authors, args.output, |a| format_list_item(&a.name, a.id));
        }
        Commands::Book { id, output } => {
            let book = client.get_book_info(id).await?;
            print_record(&book, output, format_book_md);
        }
        Commands::Books(args) => {
            let books = client.get_books(&args.request_options()).await?;
            print_list(&books, args.output, |b| format_list_item(&b.title, b.id));
        }
        Commands::Category { id, output } => {
            let category = client.get_category_info(id).await?;
            print_record(&category, output, format_category_md);
        }
        Commands::Categories(args) => {
            let categories = client.get_categories(&args.request_options()).await?;
            print_list(&categories, args.output, |c| format_list_item(&c.name, c.id));
        }
        Commands::Index {
            id,
            recursive,
            part,
            max_depth,
            output,
        } => {
            let options = BookIndexOptions::default().recursive(recursive).part(part);
            let entries = client.get_book_index(id, &options).await?;
            match output {
                OutputFormat::Md => {
                    let items: Vec<IndexItem> = entries.into_iter().map(IndexItem::from).collect();
                    let mut md_options = IndexMarkdownOptions::default();
                    if let Some(depth) = max_depth {
                        md_options = md_options.max_depth(depth);
                    }
                    writeln_safe(&index_to_markdown(&items, &md_options));
                }
                OutputFormat::Json => print_json(&entries),
            }
        }
        Commands::Download { id, output } => {
            let path = client.download_book(id, &output).await?;
            eprintln!("Saved book {} to {}", id, path.display());
        }
        Commands::Markdown {
            book,
            no_footnotes,
            page_numbers,
        } => {
            let contents = book.load(client).await?;
            let options = book_markdown_options(no_footnotes, page_numbers);
            writeln_safe(&pages_to_markdown(&contents.pages, &options));
        }
    }

    Ok(())
}

async fn load_contents(path: &Path) -> Result<BookContents, KetabError> {
    let data = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&data)?)
}

fn print_record<T: Serialize>(record: &T, output: OutputFormat, format_md: fn(&T) -> String) {
    match output {
        OutputFormat::Md => writeln_safe(&format_md(record)),
        OutputFormat::Json => print_json(record),
    }
}

fn print_list<T: Serialize>(items: &[T], output: OutputFormat, format_item: impl Fn(&T) -> String) {
    match output {
        OutputFormat::Md => {
            let lines: Vec<String> = items.iter().map(format_item).collect();
            writeln_safe(&lines.join("\n"));
        }
        OutputFormat::Json => print_json(&items),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error serializing response: {}", e);
        std::process::exit(1);
    });
    writeln_safe(&json);
}

/// One line of a Markdown list
fn format_list_item(name: &str, id: u64) -> String {
    format!("- {} ({})", name, id)
}

/// Format an author as markdown with YAML frontmatter
fn format_author_md(author: &AuthorInfo) -> String {
    let mut output = String::new();

    output.push_str("---\n");
    output.push_str(&format!("id: {}\n", author.id));
    output.push_str(&format!("name: {}\n", author.name));
    if let Some(ref long_name) = author.long_name {
        output.push_str(&format!("long_name: {}\n", long_name));
    }
    if author.books_count > 0 {
        output.push_str(&format!("books_count: {}\n", author.books_count));
    }
    output.push_str("---\n");

    if let Some(ref resume) = author.resume {
        output.push_str(resume);
    }

    output
}

/// Format a book as markdown with YAML frontmatter
fn format_book_md(book: &BookInfo) -> String {
    let mut output = String::new();

    output.push_str("---\n");
    output.push_str(&format!("id: {}\n", book.id));
    output.push_str(&format!("title: {}\n", book.title));
    if !book.authors.is_empty() {
        let names: Vec<&str> = book.authors.iter().map(|a| a.name.as_str()).collect();
        output.push_str(&format!("authors: {}\n", names.join(", ")));
    }
    if !book.categories.is_empty() {
        let names: Vec<&str> = book.categories.iter().map(|c| c.name.as_str()).collect();
        output.push_str(&format!("categories: {}\n", names.join(", ")));
    }
    if let Some(ref publisher) = book.publisher {
        output.push_str(&format!("publisher: {}\n", publisher));
    }
    if let Some(ref year) = book.year {
        output.push_str(&format!("year: {}\n", year));
    }
    if book.pages_count > 0 {
        output.push_str(&format!("pages_count: {}\n", book.pages_count));
    }
    if book.parts_count > 0 {
        output.push_str(&format!("parts_count: {}\n", book.parts_count));
    }
    output.push_str("---\n");
    output.push_str(&book.description);

    output
}

/// Format a category and its children as markdown with YAML frontmatter
fn format_category_md(category: &CategoryInfo) -> String {
    let mut output = String::new();

    output.push_str("---\n");
    output.push_str(&format!("id: {}\n", category.id));
    output.push_str(&format!("name: {}\n", category.name));
    if category.parent != 0 {
        output.push_str(&format!("parent: {}\n", category.parent));
    }
    if category.books_count > 0 {
        output.push_str(&format!("books_count: {}\n", category.books_count));
    }
    output.push_str("---\n");

    let children: Vec<String> = category
        .children
        .iter()
        .map(|c| format_list_item(&c.name, c.id))
        .collect();
    output.push_str(&children.join("\n"));

    output
}

/// Page rendering options for the `markdown` subcommand
fn book_markdown_options(no_footnotes: bool, page_numbers: bool) -> PagesMarkdownOptions {
    PagesMarkdownOptions::default()
        .include_page_numbers(page_numbers)
        .footnotes(FootnoteOptions::default().include_footnotes(!no_footnotes))
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
