use std::io::{Read, Write};

use acervo_lib::output::ConsoleIO;
use acervo_lib::pipeline::ingest::search_matches;
use acervo_lib::runtime::Runtime;
use acervo_lib::scoring;

/// Run the `acervo query` command.
pub fn run_query<IN, OUT, ERR>(
    text: &str,
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
    let mut embedder = runtime.embedder.open()?;

    let matches = search_matches(&conn, embedder.as_mut(), text)?;

    if matches.is_empty() {
        writeln!(io.stdout(), "No matching passages found.")?;
        return Ok(());
    }

    for (i, passage) in matches.iter().enumerate() {
        writeln!(
            io.stdout(),
            "### Passage {} (similarity: {:.4})\n{}\n",
            i + 1,
            passage.similarity,
            passage.content,
        )?;
    }

    let passages: Vec<&str> = matches.iter().map(|m| m.content.as_str()).collect();
    writeln!(
        io.stdout(),
        "Relevancy: {:.2}",
        scoring::relevancy(&passages, text)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use acervo_lib::output::BufferedIO;

    use crate::test_util::{add_text_document, runtime_in_memory, runtime_not_initialized};

    #[test]
    fn try_run_query_with_results() {
        let (_tmp, runtime) = runtime_in_memory("query_results");
        add_text_document(
            &runtime,
            "Guía A",
            "La ludopatía es un trastorno del control de los impulsos.",
        );
        let mut io = BufferedIO::new();

        crate::try_run(
            &["acervo", "query", "¿qué es la ludopatía?"],
            &runtime,
            &mut io,
        )
        .unwrap();

        let stdout = io.stdout_to_string();
        assert!(stdout.contains("### Passage 1 (similarity:"));
        assert!(stdout.contains("ludopatía es un trastorno"));
        assert!(stdout.contains("Relevancy: 1.00"));
        assert_eq!(io.stderr_to_string(), "");
    }

    #[test]
    fn try_run_query_no_results() {
        let (_tmp, runtime) = runtime_in_memory("query_empty");
        let mut io = BufferedIO::new();

        crate::try_run(&["acervo", "query", "cualquier cosa"], &runtime, &mut io).unwrap();

        assert_eq!(io.stdout_to_string(), "No matching passages found.\n");
    }

    #[test]
    fn try_run_query_not_initialized() {
        let (_tmp, runtime) = runtime_not_initialized();
        let mut io = BufferedIO::new();

        let result = crate::try_run(&["acervo", "query", "texto"], &runtime, &mut io);
        assert_eq!(
            result.unwrap_err().to_string(),
            "acervo is not initialized. Run `acervo init` first.",
        );
    }
}
