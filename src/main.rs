use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use rijks_search::client::CollectionClient;
use rijks_search::config::{self, ApiConfig};
use rijks_search::controller::SearchController;
use rijks_search::debounce::Debouncer;
use rijks_search::model::{ArtworkDetails, FilterField};
use rijks_search::persist::SessionStore;
use rijks_search::session::SearchSession;

/// Navigation key under which the list view's scroll offset is saved.
const LIST_SCROLL_KEY: &str = "list";

/// Search the Rijksmuseum collection from the command line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Rijksmuseum API key
    #[arg(long, env = "RIJKS_API_KEY")]
    api_key: String,

    /// Base URL of the collection API
    #[arg(long, env = "RIJKS_API_URL", default_value = config::DEFAULT_BASE_URL)]
    api_url: String,

    /// Number of artworks requested per page
    #[arg(long, default_value_t = config::DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// Custom state directory (defaults to ~/.rijks-search)
    #[arg(long, env = "RIJKS_SEARCH_STATE_DIR")]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search the collection with a free-text query and facet filters
    Search {
        /// Free-text query
        query: Option<String>,
        /// Restrict to a material, e.g. "canvas"
        #[arg(long)]
        material: Option<String>,
        /// Restrict to a technique, e.g. "etching"
        #[arg(long)]
        technique: Option<String>,
        /// Restrict to an object type, e.g. "painting"
        #[arg(long = "type", value_name = "TYPE")]
        object_type: Option<String>,
    },
    /// Load the next page of results for the current session
    More,
    /// Show the full record of a single artwork
    Details {
        /// Stable object number, e.g. "SK-C-5"
        object_number: String,
    },
    /// Clear all filters and accumulated results
    Reset,
    /// List the facet values available for filtering
    Facets,
    /// Read query lines from stdin and search per line, debounced
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Tracing goes to stderr so result listings stay pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let api_config = ApiConfig::new(args.api_key.as_str()).with_base_url(args.api_url.as_str());
    let store = SessionStore::new(args.state_dir.clone()).context("failed to open session store")?;
    let client = CollectionClient::new(api_config);
    let mut controller = SearchController::new(client, store, args.page_size);

    let mut session = controller.rehydrate();
    // A rehydrated session with filters but no results (e.g. saved mid-reset)
    // is completed here; rehydration itself never fetches.
    if !session.filters.is_empty() && session.artworks.is_empty() {
        controller
            .search(&mut session)
            .await
            .context("failed to restore previous search")?;
    }

    match args.command {
        Commands::Search {
            query,
            material,
            technique,
            object_type,
        } => {
            controller.update_filter(&mut session, FilterField::Query, query.as_deref());
            controller.update_filter(&mut session, FilterField::Material, material.as_deref());
            controller.update_filter(&mut session, FilterField::Technique, technique.as_deref());
            controller.update_filter(&mut session, FilterField::ObjectType, object_type.as_deref());

            controller
                .search(&mut session)
                .await
                .context("search failed")?;
            print_artworks(&session, 0);
            remember_list_position(&controller, &mut session)?;
        }
        Commands::More => {
            let resume_from =
                controller.retrieve_scroll_position(&session, LIST_SCROLL_KEY) as usize;
            let loaded = controller
                .load_more(&mut session)
                .await
                .context("loading more results failed")?;
            if !loaded && session.end_of_results {
                println!("No more results.");
            }
            print_artworks(&session, resume_from.min(session.artworks.len()));
            remember_list_position(&controller, &mut session)?;
        }
        Commands::Details { object_number } => {
            let details = controller
                .fetch_details(&object_number)
                .await
                .with_context(|| format!("failed to fetch details for {object_number}"))?;
            print_details(&details);

            // Remember where this artwork sits in the list so the next
            // listing can resume there, mirroring back-navigation.
            if let Some(index) = session
                .artworks
                .iter()
                .position(|a| a.object_number == object_number)
            {
                controller.store_scroll_position(&mut session, &object_number, index as f64);
                controller.persist(&session)?;
            }
        }
        Commands::Reset => {
            controller
                .reset_filters(&mut session)
                .await
                .context("reset failed")?;
            println!("Filters and results cleared.");
        }
        Commands::Facets => {
            let catalog = controller.catalog();
            print_facet_group("Materials (--material)", &catalog.materials);
            print_facet_group("Techniques (--technique)", &catalog.techniques);
            print_facet_group("Object types (--type)", &catalog.object_types);
        }
        Commands::Interactive => {
            run_interactive(&mut controller, &mut session).await?;
        }
    }

    Ok(())
}

/// Search-as-you-type loop over stdin lines. The debouncer drops bursts so
/// pasted input does not issue a fetch per line; controller correctness does
/// not depend on it.
async fn run_interactive(
    controller: &mut SearchController<CollectionClient>,
    session: &mut SearchSession,
) -> Result<()> {
    let mut debouncer = Debouncer::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Type a query and press enter (empty line clears, Ctrl-D quits).");
    while let Some(line) = lines.next_line().await? {
        if !debouncer.ready() {
            tracing::debug!("debounced input line");
            continue;
        }

        controller.update_filter(session, FilterField::Query, Some(line.as_str()));
        if let Err(err) = controller.search(session).await {
            eprintln!("search failed, previous results kept: {err}");
            continue;
        }
        print_artworks(session, 0);
    }
    Ok(())
}

fn print_artworks(session: &SearchSession, from: usize) {
    if session.artworks.is_empty() {
        println!("No artworks loaded. Try `rijks-search search <query>`.");
        return;
    }
    for (index, artwork) in session.artworks.iter().enumerate().skip(from) {
        println!(
            "{:>4}. [{}] {}",
            index + 1,
            artwork.object_number,
            if artwork.long_title.is_empty() {
                &artwork.title
            } else {
                &artwork.long_title
            }
        );
    }
    if session.end_of_results {
        println!("-- end of results ({} shown) --", session.artworks.len());
    } else {
        println!(
            "-- {} shown, more available via `rijks-search more` --",
            session.artworks.len()
        );
    }
}

/// Save the current list length as the list view's scroll offset so the next
/// `more` only prints what it appended.
fn remember_list_position(
    controller: &SearchController<CollectionClient>,
    session: &mut SearchSession,
) -> Result<()> {
    let offset = session.artworks.len() as f64;
    controller.store_scroll_position(session, LIST_SCROLL_KEY, offset);
    controller.persist(session)?;
    Ok(())
}

fn print_details(details: &ArtworkDetails) {
    println!("{} — {}", details.object_number, details.title);
    if !details.long_title.is_empty() {
        println!("{}", details.long_title);
    }
    if !details.principal_maker.is_empty() {
        println!("Maker:      {}", details.principal_maker);
    }
    if !details.materials.is_empty() {
        println!("Materials:  {}", details.materials.join(", "));
    }
    if !details.techniques.is_empty() {
        println!("Techniques: {}", details.techniques.join(", "));
    }
    if let Some(image) = &details.web_image {
        if !image.url.is_empty() {
            println!("Image:      {} ({}x{})", image.url, image.width, image.height);
        }
    }
}

fn print_facet_group(heading: &str, choices: &[rijks_search::catalog::FacetChoice]) {
    println!("{heading}:");
    for choice in choices {
        match choice.count {
            Some(count) => println!("  {} ({count})", choice.key),
            None => println!("  {}", choice.key),
        }
    }
    println!();
}
