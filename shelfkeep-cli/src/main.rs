//! Shelfkeep CLI - Command-line front end for library circulation

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shelfkeep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Catalog data file
    #[arg(long, global = true, env = "SHELFKEEP_DATA", default_value = "library.json")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Loan-state filter for `books`
#[derive(Args)]
#[group(multiple = false)]
struct BookFilter {
    /// Only books that can be borrowed
    #[arg(long)]
    available: bool,

    /// Only books currently on loan
    #[arg(long)]
    on_loan: bool,

    /// Only books past their due date
    #[arg(long)]
    overdue: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a book to the catalog
    AddBook {
        /// Book title
        #[arg(long)]
        title: String,

        /// Book author
        #[arg(long)]
        author: String,

        /// Unique ISBN
        #[arg(long)]
        isbn: String,
    },

    /// Register a new member
    AddMember {
        /// Member name
        #[arg(long)]
        name: String,

        /// Unique member ID
        #[arg(long)]
        id: String,
    },

    /// Delete a book, taking it back first if it is on loan
    RemoveBook {
        /// ISBN of the book
        isbn: String,
    },

    /// Delete a member, taking back every book they hold
    RemoveMember {
        /// Member ID
        id: String,
    },

    /// Lend a book to a member
    Borrow {
        /// ISBN of the book
        isbn: String,

        /// Member ID of the borrower
        member: String,
    },

    /// Take a book back
    Return {
        /// ISBN of the book
        isbn: String,

        /// Member returning the book (checked against the loan record)
        #[arg(long)]
        member: Option<String>,
    },

    /// Search books by title, author or ISBN
    Search {
        /// Search text
        query: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List books in catalog order
    Books {
        #[command(flatten)]
        filter: BookFilter,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List members
    Members {
        /// Filter by name or member ID
        #[arg(long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one book
    ShowBook {
        /// ISBN of the book
        isbn: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one member with their borrow history
    ShowMember {
        /// Member ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display circulation statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fill the catalog with demo books, members and overdue loans
    Seed {
        /// Replace an existing catalog
        #[arg(long)]
        force: bool,
    },
}

impl BookFilter {
    fn selected(&self) -> commands::Listing {
        if self.available {
            commands::Listing::Available
        } else if self.on_loan {
            commands::Listing::OnLoan
        } else if self.overdue {
            commands::Listing::Overdue
        } else {
            commands::Listing::All
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "shelfkeep=debug,shelfkeep_core=debug"
    } else {
        "shelfkeep=info,shelfkeep_core=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut session = commands::Session::open(&cli.data)?;

    match cli.command {
        Commands::AddBook {
            title,
            author,
            isbn,
        } => commands::add_book(&mut session, &title, &author, &isbn),

        Commands::AddMember { name, id } => commands::add_member(&mut session, &name, &id),

        Commands::RemoveBook { isbn } => commands::remove_book(&mut session, &isbn),

        Commands::RemoveMember { id } => commands::remove_member(&mut session, &id),

        Commands::Borrow { isbn, member } => commands::borrow(&mut session, &isbn, &member),

        Commands::Return { isbn, member } => {
            commands::return_book(&mut session, &isbn, member.as_deref())
        }

        Commands::Search { query, json } => commands::search(&session, &query, json),

        Commands::Books { filter, json } => {
            commands::list_books(&session, filter.selected(), json)
        }

        Commands::Members { search, json } => {
            commands::list_members(&session, search.as_deref(), json)
        }

        Commands::ShowBook { isbn, json } => commands::show_book(&session, &isbn, json),

        Commands::ShowMember { id, json } => commands::show_member(&session, &id, json),

        Commands::Stats { json } => commands::stats(&session, json),

        Commands::Seed { force } => commands::seed(&mut session, force),
    }
}
