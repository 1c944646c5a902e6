use clap::{Args, Parser, Subcommand};
use folio::prefs::{Language, Preferences, Theme};
use folio::query::{self, CategoryFilter, Query, SortKey};
use folio::store::{self, Collection, RecordStore};
use folio::submit::{self, HttpTransport};
use folio::types::Record;
use folio::validate::{self, ContactForm};
use folio::{config, output};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Query and validate the content of a portfolio site")]
#[command(long_about = "\
Query and validate the content of a portfolio site

Collections are data files in the content directory:

  content/
  ├── config.toml       # Site config (optional)
  ├── projects.toml     # [[projects]] id, title, category, tech, period, status
  ├── blog.json         # {\"posts\": [...]} id, title, category, tags, date, pdf
  └── gallery.toml      # [[items]] id, title, category, tags, image

Sort keys: date, title, category, views, likes, comments, status, original.
Unknown sort keys keep the authored order.

Run 'folio gen-config' to generate a documented config.toml.
Set RUST_LOG=debug for diagnostics on stderr.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Contact form fields shared by `validate` and `submit`.
#[derive(Args, Clone)]
struct FormArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    subject: String,
    #[arg(long, default_value = "")]
    message: String,
    #[arg(long)]
    phone: Option<String>,
    /// Language for error messages (defaults to the configured language)
    #[arg(long)]
    lang: Option<Language>,
}

impl FormArgs {
    fn form(&self) -> ContactForm {
        ContactForm {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
            phone: self.phone.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Filter, search and sort a collection
    Query {
        /// projects | blog | gallery
        collection: Collection,
        /// Category to keep ("all" keeps every category)
        #[arg(long, default_value = "all")]
        category: String,
        /// Case- and accent-insensitive search term
        #[arg(long, default_value = "")]
        search: String,
        /// Sort key (defaults to query.default_sort from config.toml)
        #[arg(long)]
        sort: Option<String>,
        /// Print matching records as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the categories of a collection with record counts
    Categories {
        collection: Collection,
        #[arg(long)]
        json: bool,
    },
    /// Validate contact form fields without sending anything
    Validate {
        #[command(flatten)]
        form: FormArgs,
        #[arg(long)]
        json: bool,
    },
    /// Validate and send a contact form to the configured endpoint
    Submit {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Load config and every collection, reporting problems
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Show or change visitor preferences
    Prefs {
        #[command(subcommand)]
        action: Option<PrefsAction>,
    },
}

#[derive(Subcommand)]
enum PrefsAction {
    /// Print the current preferences
    Show,
    /// Change theme and/or language
    Set {
        #[arg(long)]
        theme: Option<Theme>,
        #[arg(long)]
        language: Option<Language>,
    },
    /// Switch between light and dark
    ToggleTheme,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Query {
            collection,
            category,
            search,
            sort,
            json,
        } => {
            let site_config = config::load_config(&cli.source)?;
            let store = RecordStore::load(&cli.source)?;
            let q = Query {
                category_filter: CategoryFilter::parse(&category),
                search_term: search,
                sort_key: sort
                    .as_deref()
                    .map(SortKey::parse)
                    .unwrap_or_else(|| site_config.default_sort()),
            };
            match collection {
                Collection::Projects => run_query(collection, store.projects(), &q, json)?,
                Collection::Blog => run_query(collection, store.posts(), &q, json)?,
                Collection::Gallery => run_query(collection, store.gallery(), &q, json)?,
            }
        }
        Command::Categories { collection, json } => {
            let store = RecordStore::load(&cli.source)?;
            let cats = match collection {
                Collection::Projects => store::categories(store.projects()),
                Collection::Blog => store::categories(store.posts()),
                Collection::Gallery => store::categories(store.gallery()),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&cats)?);
            } else {
                output::print_categories(collection, &cats);
            }
        }
        Command::Validate { form, json } => {
            let site_config = config::load_config(&cli.source)?;
            let language = form.lang.unwrap_or(site_config.i18n.default_language);
            let result = validate::validate(&form.form());
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                output::print_validation(&result, language);
            }
        }
        Command::Submit { form } => {
            let site_config = config::load_config(&cli.source)?;
            let language = form.lang.unwrap_or(site_config.i18n.default_language);
            let endpoint = site_config
                .contact
                .endpoint
                .clone()
                .ok_or("contact.endpoint is not set in config.toml")?;
            let transport = HttpTransport::new(endpoint);
            let outcome = submit::submit(
                &form.form(),
                language,
                &transport,
                &site_config.contact.fallback_email,
            );
            output::print_outcome(&outcome, language);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            config::load_config(&cli.source)?;
            let store = RecordStore::load(&cli.source)?;
            output::print_check_output(&store);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Prefs { action } => {
            let site_config = config::load_config(&cli.source)?;
            let path = cli.source.join(&site_config.prefs_file);
            let mut prefs = Preferences::load_or(&path, site_config.i18n.default_language)?;
            match action.unwrap_or(PrefsAction::Show) {
                PrefsAction::Show => {}
                PrefsAction::Set { theme, language } => {
                    prefs.update_and_persist(&path, |p| {
                        if let Some(theme) = theme {
                            p.theme = theme;
                        }
                        if let Some(language) = language {
                            p.language = language;
                        }
                    })?;
                }
                PrefsAction::ToggleTheme => {
                    prefs.update_and_persist(&path, |p| p.theme = p.theme.toggled())?;
                }
            }
            println!("theme = {}", prefs.theme);
            println!("language = {}", prefs.language);
        }
    }

    Ok(())
}

/// Run a query over one collection and print the view.
fn run_query<R: Record + Serialize>(
    collection: Collection,
    records: &[R],
    q: &Query,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let view = query::query(records, q);
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        output::print_query_output(collection, q, &view, records.len());
    }
    Ok(())
}
