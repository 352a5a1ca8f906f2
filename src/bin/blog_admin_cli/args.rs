//! Command-line surface for `blog-admin-cli`.

#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use blog_admin::domain::filter::{CategoryFilter, PublishedRule, StatusFilter};
use blog_admin_api_types::Category;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

pub const DEFAULT_AUTH_URL: &str = "https://identitytoolkit.googleapis.com";

#[derive(Parser, Debug)]
#[command(name = "blog-admin-cli", version, about = "Blog administration client", long_about = None)]
pub struct Cli {
    /// Blog API base URL, e.g. <https://blog.example.com>
    #[arg(long, env = "BLOG_ADMIN_API_URL")]
    pub api_url: Option<String>,

    /// Identity provider base URL
    #[arg(long, env = "BLOG_ADMIN_AUTH_URL", default_value = DEFAULT_AUTH_URL)]
    pub auth_url: String,

    /// Identity provider API key (needed for `login`)
    #[arg(long, env = "BLOG_ADMIN_AUTH_API_KEY", hide_env_values = true)]
    pub auth_api_key: Option<String>,

    /// Where the signed-in session is kept (default: ~/.blog-admin/session.json)
    #[arg(long, env = "BLOG_ADMIN_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// How the "Published" status filter is evaluated: `status` or `not-draft`
    #[arg(long, env = "BLOG_ADMIN_PUBLISHED_RULE", default_value = "status")]
    pub published_rule: PublishedRule,

    /// Log level for diagnostics on stderr
    #[arg(long, env = "BLOG_ADMIN_LOG", default_value = "warn")]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        /// Password; read from stdin when omitted
        #[arg(long, env = "BLOG_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Post management (list/get/create/edit/delete)
    Posts(PostsArgs),
    /// Tag vocabulary management
    Tags(TagsArgs),
}

#[derive(Parser, Debug)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub action: PostsCmd,
}

#[derive(Subcommand, Debug)]
pub enum PostsCmd {
    /// List posts, filtered locally
    List {
        /// Category to show, or `All`
        #[arg(long, default_value = "All")]
        category: CategoryFilter,
        /// Status to show, or `All`
        #[arg(long, default_value = "All")]
        status: StatusFilter,
        /// Only posts carrying at least one of these tags
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show one post
    Get {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Create a post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "Workshop")]
        category: Category,
        #[arg(long, conflicts_with = "body_file")]
        body: Option<String>,
        #[arg(long)]
        body_file: Option<PathBuf>,
        #[arg(long)]
        cover_image: Option<String>,
        /// Tag to attach; created in the vocabulary when unknown
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Edit a post; only the given fields change
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long, conflicts_with = "body_file")]
        body: Option<String>,
        #[arg(long)]
        body_file: Option<PathBuf>,
        /// Cover image URL; an empty value removes it
        #[arg(long)]
        cover_image: Option<String>,
        /// Append an image to the body
        #[arg(long = "image")]
        images: Vec<String>,
        #[arg(long = "add-tag")]
        add_tags: Vec<String>,
        #[arg(long = "remove-tag")]
        remove_tags: Vec<String>,
    },
    /// Delete a post
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Parser, Debug)]
pub struct TagsArgs {
    #[command(subcommand)]
    pub action: TagsCmd,
}

#[derive(Subcommand, Debug)]
pub enum TagsCmd {
    /// List the tag vocabulary
    List,
    /// Add a tag to the vocabulary
    Add { name: String },
    /// Delete a tag from the vocabulary
    Delete {
        name: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
