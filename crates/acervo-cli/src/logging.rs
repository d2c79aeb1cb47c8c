use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use sha2::{Digest, Sha256};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use acervo_lib::context::AcervoContext;

/// Initialize file-based JSONL logging if the context has a log directory.
///
/// When `ctx.log_dir()` is `None`, this is a no-op.
/// All errors during initialization are silently ignored so that logging
/// failures never prevent acervo from functioning.
pub fn init_file_logging(ctx: &AcervoContext) {
    let Some(log_dir) = ctx.log_dir() else {
        return;
    };
    let _ = try_init_file_logging(log_dir, ctx.project_root());
}

fn try_init_file_logging(log_dir: &Path, project_root: &Path) -> anyhow::Result<()> {
    let (dirname, digest) = log_subdir_parts(project_root);
    let subdir_name = format!("{dirname}-{digest}");
    let log_subdir = log_dir.join(&subdir_name);
    fs::create_dir_all(&log_subdir)?;

    let today = jiff::Zoned::now().date();
    let filename = format!("{today}.jsonl");
    let file_path = log_subdir.join(&filename);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)?;

    tracing_subscriber::registry()
        .with(fmt::layer().json().with_writer(Mutex::new(file)))
        .init();

    cleanup_old_logs(&log_subdir, today);

    Ok(())
}

/// Compute the subdirectory name parts from a project root path.
///
/// Returns `(dirname, digest)` where:
/// - `dirname` is the basename of the project root
/// - `digest` is the first 8 hex characters of the SHA-256 of the absolute path
pub fn log_subdir_parts(project_root: &Path) -> (String, String) {
    let dirname = project_root.file_name().map_or_else(
        || "unknown".to_string(),
        |n| n.to_string_lossy().into_owned(),
    );

    let mut hasher = Sha256::new();
    hasher.update(project_root.to_string_lossy().as_bytes());
    let hash = hasher.finalize();
    let digest = hash.iter().take(4).fold(String::new(), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    });

    (dirname, digest)
}

/// Delete log files older than 28 days. Errors are silently ignored.
fn cleanup_old_logs(log_subdir: &Path, today: jiff::civil::Date) {
    let Ok(entries) = fs::read_dir(log_subdir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if ext != "jsonl" {
            continue;
        }
        let Ok(file_date) = stem.parse::<jiff::civil::Date>() else {
            continue;
        };
        if let Ok(span) = today.since(file_date)
            && span.get_days() >= 28
        {
            let _ = fs::remove_file(&path);
        }
    }
}
