//! Lexical diagnostics for retrieval quality.
//!
//! Both scores work on keyword overlap after Spanish stopword removal.
//! Substring matching overcounts short common words and misses
//! morphological variants, so treat the output as a rough signal for
//! offline measurement, never as a gate on retrieval results.

/// Common Spanish stopwords excluded from keyword matching.
const SPANISH_STOPWORDS: &[&str] = &[
    "a", "al", "algo", "algunas", "algunos", "ante", "antes", "como", "con", "contra", "cual",
    "cuando", "de", "del", "desde", "donde", "durante", "e", "el", "él", "ella", "ellas", "ellos",
    "en", "entre", "era", "es", "esa", "esas", "ese", "eso", "esos", "esta", "estas", "este",
    "estar", "esto", "estos", "fue", "ha", "han", "hasta", "hay", "la", "las", "le", "les", "lo",
    "los", "más", "me", "mí", "mucho", "muchos", "muy", "nada", "ni", "no", "nos", "nosotros",
    "o", "otra", "otras", "otro", "otros", "para", "pero", "poco", "por", "porque", "que", "qué",
    "quien", "quienes", "se", "ser", "sí", "sin", "sobre", "son", "su", "sus", "también", "tanto",
    "todo", "todos", "un", "una", "uno", "unos", "y", "ya", "yo",
];

/// Lowercased, non-stopword tokens of `text`.
fn keywords(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty() && !SPANISH_STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Fraction of passages that contain at least one non-stopword query token
/// as a case-insensitive substring. Returns a value in `[0, 1]`; an empty
/// passage list or a query with only stopwords scores `0.0`.
pub fn relevancy<S: AsRef<str>>(responses: &[S], query: &str) -> f64 {
    if responses.is_empty() {
        return 0.0;
    }
    let terms = keywords(query);
    if terms.is_empty() {
        return 0.0;
    }

    let hits = responses
        .iter()
        .filter(|r| {
            let lower = r.as_ref().to_lowercase();
            terms.iter().any(|t| lower.contains(t.as_str()))
        })
        .count();

    hits as f64 / responses.len() as f64
}

/// Whether any non-stopword token of the retrieved passage appears as a
/// case-insensitive substring of the model's final answer.
pub fn rag_usage(model_response: &str, rag_response: &str) -> bool {
    let lower = model_response.to_lowercase();
    keywords(rag_response)
        .iter()
        .any(|t| lower.contains(t.as_str()))
}
