use std::io::{Read, Write};

use acervo_lib::db::queries::list_documents;
use acervo_lib::output::ConsoleIO;
use acervo_lib::runtime::Runtime;

/// Run the `acervo list` command.
pub fn run_list<IN, OUT, ERR>(
    json: bool,
    runtime: &Runtime,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    IN: Read,
    OUT: Write,
    ERR: Write,
{
    if !runtime.db.is_ready() {
        anyhow::bail!("acervo is not initialized. Run `acervo init` first.");
    }

    let conn = runtime.db.open()?;
    let documents = list_documents(&conn)?;

    if json {
        writeln!(io.stdout(), "{}", serde_json::to_string_pretty(&documents)?)?;
        return Ok(());
    }

    if documents.is_empty() {
        writeln!(io.stdout(), "The bibliography is empty.")?;
        return Ok(());
    }

    for doc in &documents {
        let author = doc.author.as_deref().unwrap_or("unknown author");
        writeln!(io.stdout(), "{}  {} ({author})", doc.id, doc.title)?;
        if let Some(description) = &doc.description {
            writeln!(io.stdout(), "    {description}")?;
        }
    }
    Ok(())
}
