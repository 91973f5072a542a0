use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "cinelog", version, about = "Movie catalog and review client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and persist the session
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account (log in separately afterwards)
    Register {
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the persisted session
    Logout,
    /// Show the current session
    Whoami,
    /// Check backend availability
    Health,
    /// List movies, optionally filtered and sorted
    Movies {
        /// Case-insensitive match on title, director, or genre
        #[arg(long)]
        search: Option<String>,
        /// Exact genre match
        #[arg(long)]
        genre: Option<String>,
        #[arg(long, value_enum, default_value = "title")]
        sort: SortArg,
    },
    /// Show one movie with its reviews
    Movie { id: i64 },
    /// Manage your review of a movie
    #[command(subcommand)]
    Review(ReviewCommands),
    /// Your reviews and statistics
    Profile,
    /// Catalog management (requires the ADMIN role)
    #[command(subcommand)]
    Admin(AdminCommands),
    /// Print the version
    Version,
}

#[derive(Subcommand)]
pub enum ReviewCommands {
    /// Write a new review
    Add {
        movie_id: i64,
        /// Star rating, 1-5
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        comment: String,
    },
    /// Edit your existing review
    Edit {
        movie_id: i64,
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        comment: String,
    },
    /// Delete your review
    Delete {
        movie_id: i64,
        /// Confirm the deletion (required; there is no undo)
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Add a movie to the catalog
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        director: String,
        #[arg(long)]
        genre: String,
        /// ISO date, e.g. 2025-07-11
        #[arg(long)]
        release_date: Option<String>,
        /// Runtime in minutes
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        poster_url: Option<String>,
    },
    /// Update an existing movie (unset options keep their current values)
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        director: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        release_date: Option<String>,
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        poster_url: Option<String>,
    },
    /// Delete a movie from the catalog
    Delete {
        id: i64,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    /// Title ascending
    Title,
    /// Average rating descending
    Rating,
    /// Release date, most recent first
    Year,
}
