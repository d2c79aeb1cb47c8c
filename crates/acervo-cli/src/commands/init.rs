use std::io::{Read, Write};

use acervo_lib::context::AcervoContext;
use acervo_lib::output::ConsoleIO;
use acervo_lib::runtime::Runtime;

/// Run the `acervo init` command.
///
/// 1. Create the `.acervo/` directory and initialize the database schema.
/// 2. Verify the embedding backend opens.
/// 3. Append `.acervo/` to `.gitignore` if not present.
pub fn run_init<IN, OUT, ERR>(
    runtime: &Runtime,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    IN: Read,
    OUT: Write,
    ERR: Write,
{
    writeln!(io.stderr(), "Initializing database...")?;
    let _conn = runtime.db.open()?;
    writeln!(
        io.stderr(),
        "  Database created at {}",
        runtime.context.db_path().display()
    )?;

    writeln!(io.stderr(), "Verifying embedding model...")?;
    let _embedder = runtime.embedder.open()?;
    writeln!(io.stderr(), "  Embedding model OK")?;

    update_gitignore(&runtime.context)?;
    writeln!(io.stderr(), "  .gitignore updated")?;

    writeln!(io.stdout(), "acervo initialized.")?;
    Ok(())
}

/// Append `.acervo/` to `.gitignore` if not already present.
fn update_gitignore(ctx: &AcervoContext) -> anyhow::Result<()> {
    let gitignore_path = ctx.gitignore_path();
    let entry = ".acervo/";

    if gitignore_path.exists() {
        let existing = std::fs::read_to_string(&gitignore_path)?;
        if existing.lines().any(|line| line.trim() == entry) {
            return Ok(());
        }
        // Append with newline separator
        let separator = if existing.ends_with('\n') { "" } else { "\n" };
        std::fs::write(&gitignore_path, format!("{existing}{separator}{entry}\n"))?;
    } else {
        std::fs::write(&gitignore_path, format!("{entry}\n"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use acervo_lib::context::AcervoContext;
    use acervo_lib::db::driver::DatabaseDriver;
    use acervo_lib::embedding::driver::EmbedderDriver;
    use acervo_lib::output::BufferedIO;
    use acervo_lib::runtime::Runtime;

    fn file_runtime() -> (tempfile::TempDir, Runtime) {
        let tmp = tempfile::tempdir().unwrap();
        let context = AcervoContext::new(tmp.path().to_path_buf());
        let db = DatabaseDriver::file(context.db_path());
        let runtime = Runtime {
            context,
            db,
            embedder: EmbedderDriver::Hashed,
        };
        (tmp, runtime)
    }

    #[test]
    fn init_creates_db_and_gitignore() {
        let (_tmp, runtime) = file_runtime();
        let mut io = BufferedIO::new();

        crate::try_run(&["acervo", "init"], &runtime, &mut io).unwrap();

        assert!(runtime.context.db_path().exists());
        assert!(runtime.context.gitignore_path().exists());
        let gitignore = std::fs::read_to_string(runtime.context.gitignore_path()).unwrap();
        assert!(gitignore.contains(".acervo/"));
        assert_eq!(io.stdout_to_string(), "acervo initialized.\n");
    }

    #[test]
    fn init_is_idempotent() {
        let (_tmp, runtime) = file_runtime();
        let mut io = BufferedIO::new();

        crate::try_run(&["acervo", "init"], &runtime, &mut io).unwrap();
        crate::try_run(&["acervo", "init"], &runtime, &mut io).unwrap();

        let gitignore = std::fs::read_to_string(runtime.context.gitignore_path()).unwrap();
        assert_eq!(
            gitignore.matches(".acervo/").count(),
            1,
            "gitignore should not have duplicate entries"
        );
    }

    #[test]
    fn init_preserves_existing_gitignore() {
        let (_tmp, runtime) = file_runtime();
        std::fs::write(runtime.context.gitignore_path(), "target/\n").unwrap();
        let mut io = BufferedIO::new();

        crate::try_run(&["acervo", "init"], &runtime, &mut io).unwrap();

        let gitignore = std::fs::read_to_string(runtime.context.gitignore_path()).unwrap();
        assert!(gitignore.contains("target/"));
        assert!(gitignore.contains(".acervo/"));
    }
}
