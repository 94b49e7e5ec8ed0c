use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use log::{error, info};

use thenu_cookbook::config::CookbookConfig;
use thenu_cookbook::filter::capitalize;
use thenu_cookbook::offline::CacheManifest;
use thenu_cookbook::session::NavigationState;
use thenu_cookbook::{
    CookbookError, DishImageResolver, FileStore, FilterCriteria, PageSize, PixabayClient,
    RecipeBrowser, RecipeCard, RecipeSearch, SessionStore, Theme,
};

#[derive(Parser, Debug)]
#[command(name = "thenu-cookbook")]
#[command(about = "Find recipes from the ingredients you have", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search the backend with your ingredients and show the first page
    Search {
        /// Ingredients separated by commas, e.g. "milk, sugar, ghee"
        #[arg(short, long)]
        ingredients: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Results per page (5, 10, 20 or 50)
        #[arg(long)]
        page_size: Option<PageSize>,
    },

    /// Browse the results of the last search
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Page to show, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Results per page (5, 10, 20 or 50)
        #[arg(long)]
        page_size: Option<PageSize>,
    },

    /// Show the diet, course and state values present in the last results
    Options,

    /// Find a picture for a dish
    Image {
        /// Dish name
        name: String,

        /// Course used when the dish itself has no picture
        #[arg(short, long)]
        course: Option<String>,
    },

    /// Show or change the theme preference
    Theme {
        /// "light", "dark" or "toggle"
        value: Option<String>,
    },

    /// Show or set whether the intro tour was seen
    Tour {
        #[arg(long)]
        seen: bool,
    },

    /// Forget the last search
    Reset,

    /// Print the offline cache manifest
    Manifest,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Recipe name contains
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    diet: Option<String>,

    #[arg(long)]
    course: Option<String>,

    #[arg(long)]
    state: Option<String>,

    /// Maximum preparation time in minutes
    #[arg(long)]
    prep_time: Option<f64>,

    /// Maximum cooking time in minutes
    #[arg(long)]
    cook_time: Option<f64>,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        FilterCriteria {
            name: args.name,
            diet: args.diet,
            course: args.course,
            state: args.state,
            prep_time: args.prep_time,
            cook_time: args.cook_time,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match CookbookConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: &CookbookConfig) -> Result<(), CookbookError> {
    let mut session = SessionStore::new(FileStore::new(config.session_dir()));

    match command {
        Commands::Search {
            ingredients,
            filters,
            page_size,
        } => {
            let (ingredients, submission) = RecipeSearch::builder()
                .endpoint(config.backend_url.clone())
                .ingredients(ingredients)
                .criteria(filters.into())
                .timeout(config.timeout())
                .submit_and_remember(&mut session)
                .await?;
            println!("{}", submission.message);

            let resolved = session.resolve(Some(NavigationState {
                recipes: submission.recipes,
                ingredients,
            }));
            let browser = RecipeBrowser::with_page_size(
                resolved.recipes,
                page_size.unwrap_or_else(|| config.page_size()),
            );
            print_results(&browser, &resolved.ingredients);
        }

        Commands::List {
            filters,
            page,
            page_size,
        } => {
            let resolved = session.resolve(None);
            let mut browser = RecipeBrowser::with_page_size(
                resolved.recipes,
                page_size.unwrap_or_else(|| config.page_size()),
            );
            browser.set_criteria(filters.into());
            browser.go_to_page(page);
            print_results(&browser, &resolved.ingredients);
        }

        Commands::Options => {
            let browser = RecipeBrowser::new(session.filtered_recipes());
            let options = browser.options();
            print_options("Diets", options.diets.iter().map(|d| capitalize(d)));
            print_options("Courses", options.courses.iter().map(|c| capitalize(c)));
            print_options("States", options.states.iter().cloned());
        }

        Commands::Image { name, course } => {
            let client = PixabayClient::new(config.images.api_key.clone(), Some(config.timeout()))?
                .with_base_url(config.images.base_url.clone());
            let resolver = DishImageResolver::new(Arc::new(client));
            println!("{}", resolver.spawn(name, course).wait().await);
        }

        Commands::Theme { value } => {
            let theme = match value.as_deref() {
                None => Theme::resolve(session.theme(), None),
                Some("toggle") => session.toggle_theme(None)?,
                Some(other) => {
                    let theme: Theme = other.parse()?;
                    session.set_theme(theme)?;
                    theme
                }
            };
            println!("{}", theme);
        }

        Commands::Tour { seen } => {
            if seen {
                session.mark_tour_seen()?;
            }
            println!("{}", if session.tour_seen() { "seen" } else { "not seen" });
        }

        Commands::Reset => {
            session.clear()?;
            info!("Session cleared");
            println!("Cleared the last search");
        }

        Commands::Manifest => {
            let manifest = CacheManifest::new(config.offline.version.clone());
            println!("{}", manifest.cache_name());
            for asset in manifest.core_assets() {
                println!("  {}", asset);
            }
        }
    }

    Ok(())
}

fn print_options(title: &str, values: impl Iterator<Item = String>) {
    let values: Vec<String> = values.collect();
    if values.is_empty() {
        println!("{}: none", title);
    } else {
        println!("{}: {}", title, values.join(", "));
    }
}

fn print_results(browser: &RecipeBrowser, ingredients: &[String]) {
    let selected = if ingredients.is_empty() {
        "Not provided".to_string()
    } else {
        ingredients.join(", ")
    };
    println!("Selected ingredients: {}", selected);

    if browser.is_empty() {
        println!();
        println!("No recipes found");
        println!("Your ingredients and filters didn't return any matches. Try different ingredients or remove some.");
        return;
    }

    println!(
        "Showing {} result(s), page {}/{} ({} per page)",
        browser.total(),
        browser.page(),
        browser.total_pages(),
        browser.page_size()
    );

    for card in browser.current_cards() {
        print_card(&card);
    }
}

fn print_card(card: &RecipeCard) {
    println!();
    println!("{} [{}]", card.name, card.diet_label);
    println!(
        "  {} | {} | Prep: {} | Cook: {}",
        card.course_label, card.state_label, card.prep_label, card.cook_label
    );

    let ingredients: Vec<String> = card
        .ingredients
        .iter()
        .map(|i| {
            if i.is_missing {
                format!("{} (missing)", i.display_name())
            } else {
                i.display_name().into_owned()
            }
        })
        .collect();
    println!("  Ingredients: {}", ingredients.join(", "));

    if let Some(link) = &card.youtube_link {
        println!("  Watch: {}", link);
    }
}
