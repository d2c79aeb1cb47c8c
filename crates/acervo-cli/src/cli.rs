use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "acervo", about = "Bibliography store with retrieval-augmented search")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Set up acervo for the current project (create the database).
    Init,

    /// Ingest a document file into the bibliography.
    Add {
        /// Path to a .txt, .md, or .pdf file; use `-` to read from stdin.
        file: String,
        /// Document title (must be unique).
        #[arg(short, long)]
        title: String,
        /// Document author.
        #[arg(short, long)]
        author: Option<String>,
        /// Short description of the document.
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List all documents in the bibliography.
    List {
        /// Print the listing as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Remove a document and its chunks by id.
    Remove {
        /// The document id to remove.
        id: i64,
    },

    /// Search stored passages by semantic similarity.
    Query {
        /// The text to search for.
        text: String,
    },
}
