//! `catalog` command-line front end.
//!
//! Each invocation opens the store from its data directory, performs one
//! action and exits. Set `RUST_LOG` (or pass `-v`) for store logs on stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use product_catalog::{
    CatalogConfig, CategoryFilter, Product, ProductForm, ProductId, Result, SortKey, SortOrder,
    Store, ViewParams,
};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(about = "Manage a locally stored product catalog")]
#[command(version)]
struct Cli {
    /// TOML config file
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Data directory (overrides the config file)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Product fields as typed by the user.
#[derive(clap::Args, Debug)]
struct FieldArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    taxes: Option<String>,
    #[arg(long)]
    ads: Option<String>,
    #[arg(long)]
    discount: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// Image reference (path, URL or data URL)
    #[arg(long)]
    image: Option<String>,
}

impl FieldArgs {
    fn fill(self, form: &mut ProductForm) {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(taxes) = self.taxes {
            form.taxes = taxes;
        }
        if let Some(ads) = self.ads {
            form.ads = ads;
        }
        if let Some(discount) = self.discount {
            form.discount = discount;
        }
        if let Some(category) = self.category {
            form.category = category;
        }
        if let Some(image) = self.image {
            form.image = Some(image);
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a product
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Update fields of an existing product
    Update {
        id: u64,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete one product
    Delete { id: u64 },
    /// Delete every product
    DeleteAll,
    /// List products
    List {
        /// Match against title or category, ignoring case
        #[arg(long, short = 's', default_value = "")]
        search: String,
        /// Exact category, or "All"
        #[arg(long, default_value = "All")]
        category: String,
        /// Sort by "title" or "total"
        #[arg(long)]
        sort: Option<SortKey>,
        /// Sort order: "asc" or "desc"
        #[arg(long, default_value = "asc")]
        order: SortOrder,
        /// Page number (1-based)
        #[arg(long, short = 'p', default_value_t = 1)]
        page: usize,
    },
    /// List distinct categories
    Categories,
    /// Show one product as JSON
    Show { id: u64 },
    /// Write products.json
    Export {
        /// Output directory
        #[arg(long, short = 'o', default_value = ".")]
        out: PathBuf,
    },
}

fn setup_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn load_config(cli: &Cli) -> Result<CatalogConfig> {
    let mut config = match &cli.config {
        Some(path) => CatalogConfig::load(path)?,
        None => CatalogConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    Ok(config)
}

fn print_product(index: usize, product: &Product) {
    println!(
        "{:>3}  {:<24} {:>10} {:<16} {}",
        index,
        product.title,
        product.total,
        product.category,
        product.id
    );
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli)?;
    debug!(?config, "starting");
    let mut store = Store::open_with_config(&config)?;

    match cli.command {
        Command::Add { fields } => {
            let mut form = ProductForm::new();
            fields.fill(&mut form);
            let id = store.apply(form.submit()?)?;
            println!("created {}", id);
        }
        Command::Update { id, fields } => {
            let Some(product) = store.get_product(ProductId(id)).cloned() else {
                eprintln!("no product with id {}", id);
                return Ok(ExitCode::FAILURE);
            };
            store.set_editing_product(&product);
            let mut form = ProductForm::edit(&product);
            fields.fill(&mut form);
            let id = store.apply(form.submit()?)?;
            println!("updated {}", id);
        }
        Command::Delete { id } => {
            store.delete_product(ProductId(id))?;
            println!("deleted {}", id);
        }
        Command::DeleteAll => {
            let count = store.len();
            store.delete_all_products()?;
            println!("deleted {} products", count);
        }
        Command::List {
            search,
            category,
            sort,
            order,
            page,
        } => {
            let mut params = ViewParams::default()
                .with_search(search)
                .with_category(CategoryFilter::from(category))
                .on_page(page);
            if let Some(key) = sort {
                params = params.sorted_by(key, order);
            }

            let result = store.query(&params);
            if result.total_filtered == 0 {
                println!("No matching products found.");
                return Ok(ExitCode::SUCCESS);
            }
            println!(
                "{:>3}  {:<24} {:>10} {:<16} {}",
                "#", "TITLE", "TOTAL", "CATEGORY", "ID"
            );
            for (i, product) in result.records.iter().enumerate() {
                print_product(result.row_number(i), product);
            }
            println!(
                "page {} of {} ({} products)",
                result.page, result.total_pages, result.total_filtered
            );
        }
        Command::Categories => {
            for category in store.categories() {
                println!("{}", category);
            }
        }
        Command::Show { id } => match store.get_product(ProductId(id)) {
            Some(product) => println!("{}", serde_json::to_string_pretty(product)?),
            None => {
                eprintln!("no product with id {}", id);
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Export { out } => {
            let path = store.export_to(&out)?;
            println!("exported {} products to {}", store.len(), path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
