/// Spanish filler text of at least `min_chars` characters, built from
/// numbered sentences so chunk boundaries land on unique content.
pub fn sample_text(min_chars: usize) -> String {
    let mut text = String::new();
    let mut i = 0;
    while text.len() < min_chars {
        text.push_str(&format!(
            "Frase número {i} sobre el juego responsable y la prevención de la ludopatía. "
        ));
        i += 1;
    }
    text
}
