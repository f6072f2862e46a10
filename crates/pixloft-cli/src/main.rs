//! Command-line client for the gallery's media store.
//!
//! Configuration comes from the STORE_* environment variables (a local
//! .env file is honored).

use anyhow::Context;
use clap::{Parser, Subcommand};
use pixloft_cli::{content_type_for, init_tracing};
use pixloft_core::models::{NewPost, PageCursor, PostPatch};
use pixloft_core::Config;
use pixloft_gallery::{
    GalleryCache, GalleryController, ImageUpload, MediaLibrary, PostsService, Session,
};
use pixloft_store::StoreClient;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "pixloft", about = "Pixloft gallery CLI")]
struct Cli {
    /// Act as this user id instead of the signed-in account
    #[arg(long, global = true)]
    user: Option<String>,

    /// Print machine-readable JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload an image
    Upload {
        /// Path to the image file
        file: std::path::PathBuf,
        /// Display name; defaults to the filename without its extension
        #[arg(long)]
        name: Option<String>,
    },
    /// List uploaded images
    List {
        /// Items per page
        #[arg(long, default_value = "9")]
        limit: usize,
        /// Offset for pagination
        #[arg(long, default_value = "0")]
        offset: usize,
        /// Walk every page instead of fetching a single one
        #[arg(long)]
        all: bool,
    },
    /// Delete an image and its metadata
    Delete {
        /// Store file id
        file_id: String,
    },
    /// Print the public share link for an image
    Url {
        /// Store file id
        file_id: String,
    },
    /// Show the signed-in account
    Whoami,
    /// Text post operations
    Posts {
        #[command(subcommand)]
        sub: PostCommands,
    },
}

#[derive(Subcommand)]
enum PostCommands {
    /// Create a post
    Create {
        /// Post title
        title: String,
        /// Post body
        content: String,
    },
    /// List posts, newest first
    List {
        /// Offset for pagination
        #[arg(long, default_value = "0")]
        offset: usize,
    },
    /// Show a post by its share slug
    Show {
        /// Share slug
        slug: String,
    },
    /// Update a post's title and/or content
    Update {
        /// Post document id
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a post
    Delete {
        /// Post document id
        id: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// The owner id for owner-scoped commands: an explicit --user wins,
/// otherwise the signed-in account.
async fn resolve_owner(store: &StoreClient, user: Option<String>) -> anyhow::Result<String> {
    if let Some(user) = user {
        return Ok(user);
    }
    let mut session = Session::new();
    session.initialize(store).await;
    session.owner_id().map(str::to_string).ok_or_else(|| {
        anyhow::anyhow!("No signed-in account; pass --user <id> or set store credentials")
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config =
        Config::from_env().context("Failed to load configuration; set the STORE_* variables")?;
    let store = StoreClient::new(config.store().clone())?;
    let library = MediaLibrary::from_config(store.clone(), &config);
    let posts = PostsService::from_config(store.clone(), &config);

    match cli.command {
        Commands::Upload { file, name } => {
            let filename = file
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .ok_or_else(|| anyhow::anyhow!("Invalid file path"))?;
            let data = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Read {}", file.display()))?;
            let owner_id = resolve_owner(&store, cli.user).await?;
            let content_type = content_type_for(&filename).to_string();

            let item = library
                .upload_image(ImageUpload {
                    owner_id,
                    filename,
                    content_type,
                    data,
                    display_name: name,
                })
                .await?;

            if cli.json {
                print_json(&item)?;
            } else {
                println!("{}  {}", item.id, item.display_name);
                println!("{}", library.image_url(&item.id));
            }
        }
        Commands::List { limit, offset, all } => {
            let owner_id = resolve_owner(&store, cli.user).await?;
            let items = if all {
                let mut controller = GalleryController::new(owner_id.as_str(), limit);
                while library.load_next_page(&mut controller).await?.is_some() {}
                let items = controller.items().to_vec();
                let mut cache = GalleryCache::open(config.cache_path(), owner_id);
                cache.replace(items.clone());
                if let Err(err) = cache.save() {
                    tracing::warn!(error = %err, "failed to persist gallery cache");
                }
                items
            } else {
                library
                    .list_page(&PageCursor {
                        owner_id,
                        limit,
                        offset,
                    })
                    .await?
            };

            if cli.json {
                print_json(&items)?;
            } else if items.is_empty() {
                println!("No images");
            } else {
                for item in &items {
                    println!(
                        "{}  {}  {}",
                        item.id,
                        item.display_name,
                        library.image_url(&item.id)
                    );
                }
            }
        }
        Commands::Delete { file_id } => {
            library.delete_image(&file_id).await?;
            if cli.json {
                print_json(&serde_json::json!({
                    "success": true,
                    "message": format!("Image {} deleted", file_id)
                }))?;
            } else {
                println!("Deleted {}", file_id);
            }
        }
        Commands::Url { file_id } => {
            let url = library.image_url(&file_id);
            if cli.json {
                print_json(&serde_json::json!({ "url": url }))?;
            } else {
                println!("{}", url);
            }
        }
        Commands::Whoami => {
            let account = store.get_account().await.context("Not signed in")?;
            if cli.json {
                print_json(&account)?;
            } else {
                println!("{}  {} <{}>", account.id, account.name, account.email);
            }
        }
        Commands::Posts { sub } => match sub {
            PostCommands::Create { title, content } => {
                let owner_id = resolve_owner(&store, cli.user).await?;
                let post = posts
                    .create_post(&owner_id, NewPost { title, content })
                    .await?;
                if cli.json {
                    print_json(&post)?;
                } else {
                    println!("{}  {}  {}", post.id, post.slug, post.title);
                }
            }
            PostCommands::List { offset } => {
                let owner_id = resolve_owner(&store, cli.user).await?;
                let page = posts.list_posts(&owner_id, offset).await?;
                if cli.json {
                    print_json(&page)?;
                } else if page.is_empty() {
                    println!("No posts");
                } else {
                    for post in &page {
                        println!(
                            "{}  {}  {}",
                            post.created_at.format("%Y-%m-%d"),
                            post.slug,
                            post.title
                        );
                    }
                }
            }
            PostCommands::Show { slug } => match posts.get_post_by_slug(&slug).await? {
                Some(post) => {
                    if cli.json {
                        print_json(&post)?;
                    } else {
                        println!("{}", post.title);
                        println!(
                            "{}  by {}  {}",
                            post.created_at.format("%Y-%m-%d %H:%M"),
                            post.owner_id,
                            post.slug
                        );
                        println!();
                        println!("{}", post.content);
                    }
                }
                None => anyhow::bail!("No post with slug {}", slug),
            },
            PostCommands::Update { id, title, content } => {
                let post = posts.update_post(&id, PostPatch { title, content }).await?;
                if cli.json {
                    print_json(&post)?;
                } else {
                    println!("Updated {}", post.id);
                }
            }
            PostCommands::Delete { id } => {
                posts.delete_post(&id).await?;
                if cli.json {
                    print_json(&serde_json::json!({
                        "success": true,
                        "message": format!("Post {} deleted", id)
                    }))?;
                } else {
                    println!("Deleted {}", id);
                }
            }
        },
    }

    Ok(())
}
