use std::io::{Read, Write};

use acervo_lib::db::queries::{count_chunks, delete_document};
use acervo_lib::output::ConsoleIO;
use acervo_lib::runtime::Runtime;

/// Run the `acervo remove` command.
pub fn run_remove<IN, OUT, ERR>(
    id: i64,
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
    let chunks = count_chunks(&conn, id)?;
    delete_document(&conn, id)?;

    writeln!(io.stdout(), "Removed document {id} and {chunks} chunk(s).")?;
    Ok(())
}
