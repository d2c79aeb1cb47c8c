use std::io::{Read, Write};
use std::path::Path;

use acervo_lib::convert;
use acervo_lib::db::queries::NewDocument;
use acervo_lib::output::ConsoleIO;
use acervo_lib::pipeline::ingest::ingest_document;
use acervo_lib::runtime::Runtime;

/// Run the `acervo add` command.
pub fn run_add<IN, OUT, ERR>(
    file: &str,
    title: &str,
    author: Option<&str>,
    description: Option<&str>,
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

    let text = if file == "-" {
        convert::read_from(io.stdin())?
    } else {
        let path = Path::new(file);
        if !path.exists() {
            anyhow::bail!("Document file not found: {file}");
        }
        convert::read_document(path)?
    };

    let mut conn = runtime.db.open()?;
    let mut embedder = runtime.embedder.open()?;

    let meta = NewDocument {
        title: title.to_string(),
        author: author.map(str::to_string),
        description: description.map(str::to_string),
    };
    let documents = ingest_document(&mut conn, embedder.as_mut(), meta, &text)?;

    writeln!(io.stdout(), "Added \"{title}\".")?;
    writeln!(
        io.stdout(),
        "The bibliography now holds {} document(s).",
        documents.len()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use acervo_lib::db::queries;
    use acervo_lib::error::AcervoError;
    use acervo_lib::output::BufferedIO;

    use crate::test_util::{
        runtime_in_memory, runtime_not_initialized, total_chunks, write_document,
    };

    #[test]
    fn try_run_add_success() {
        let (tmp, runtime) = runtime_in_memory("add_success");
        let path = write_document(tmp.path(), "guia.txt", &"Texto sobre el juego. ".repeat(60));
        let mut io = BufferedIO::new();

        crate::try_run(
            &[
                "acervo",
                "add",
                path.to_str().unwrap(),
                "--title",
                "Guía A",
                "--author",
                "Equipo NoVa",
            ],
            &runtime,
            &mut io,
        )
        .unwrap();

        assert_eq!(
            io.stdout_to_string(),
            "Added \"Guía A\".\nThe bibliography now holds 1 document(s).\n"
        );
        assert_eq!(io.stderr_to_string(), "");

        let conn = runtime.db.open().unwrap();
        let docs = queries::list_documents(&conn).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].author.as_deref(), Some("Equipo NoVa"));
        assert!(queries::count_chunks(&conn, docs[0].id).unwrap() >= 2);
    }

    #[test]
    fn try_run_add_from_stdin() {
        let (_tmp, runtime) = runtime_in_memory("add_stdin");
        let mut io = BufferedIO::with_stdin("La ludopatía es un trastorno.");

        crate::try_run(
            &["acervo", "add", "-", "--title", "Desde stdin"],
            &runtime,
            &mut io,
        )
        .unwrap();

        let conn = runtime.db.open().unwrap();
        let docs = queries::list_documents(&conn).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "Desde stdin");
    }

    #[test]
    fn try_run_add_duplicate_title() {
        let (tmp, runtime) = runtime_in_memory("add_duplicate");
        let path = write_document(tmp.path(), "guia.txt", "Texto sobre el juego responsable.");
        let mut io = BufferedIO::new();

        let args = [
            "acervo",
            "add",
            path.to_str().unwrap(),
            "--title",
            "Guía A",
        ];
        crate::try_run(&args, &runtime, &mut io).unwrap();
        let chunks_before = total_chunks(&runtime);
        let err = crate::try_run(&args, &runtime, &mut io).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AcervoError>(),
            Some(AcervoError::DuplicateTitle(_))
        ));
        assert_eq!(total_chunks(&runtime), chunks_before);
    }

    #[test]
    fn try_run_add_file_not_found() {
        let (_tmp, runtime) = runtime_in_memory("add_not_found");
        let mut io = BufferedIO::new();

        let result = crate::try_run(
            &["acervo", "add", "/nonexistent/guia.txt", "--title", "Guía"],
            &runtime,
            &mut io,
        );

        assert_eq!(
            result.unwrap_err().to_string(),
            "Document file not found: /nonexistent/guia.txt",
        );
    }

    #[test]
    fn try_run_add_not_initialized() {
        let (_tmp, runtime) = runtime_not_initialized();
        let mut io = BufferedIO::new();

        let result = crate::try_run(
            &["acervo", "add", "/tmp/guia.txt", "--title", "Guía"],
            &runtime,
            &mut io,
        );

        assert_eq!(
            result.unwrap_err().to_string(),
            "acervo is not initialized. Run `acervo init` first.",
        );
    }
}
