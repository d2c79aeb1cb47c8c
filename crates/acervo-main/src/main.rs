use std::path::PathBuf;

use acervo_lib::context::AcervoContext;
use acervo_lib::db::driver::DatabaseDriver;
use acervo_lib::embedding::driver::EmbedderDriver;
use acervo_lib::output::StdIO;
use acervo_lib::runtime::Runtime;

fn main() -> anyhow::Result<()> {
    // 1. Resolve project root and optional log directory from the environment
    let cwd = std::env::current_dir()?;
    let log_dir = std::env::var("ACERVO_LOG_DIR").ok().map(PathBuf::from);
    let context = AcervoContext::with_log_dir(cwd, log_dir);

    // 2. Init file logging (no-op if log_dir is None)
    acervo_cli::logging::init_file_logging(&context);

    // 3. Set panic hook (logs to file if available, always prints to stderr)
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("{info}");
        eprintln!("{info}");
    }));

    // 4. Build runtime
    let db = DatabaseDriver::file(context.db_path());
    let embedder = EmbedderDriver::from_env();
    let runtime = Runtime {
        context,
        db,
        embedder,
    };

    // 5. Run CLI
    let args: Vec<String> = std::env::args().collect();
    let args_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let mut io = StdIO::new();

    let result = acervo_cli::try_run(&args_refs, &runtime, &mut io);
    if let Err(ref e) = result {
        tracing::error!(error = format!("{e:?}"), "command failed");
    }
    result
}
