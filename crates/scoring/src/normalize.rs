//! Header normalization.

/// Folds the Portuguese accented vowels and `ç` to their base letters.
///
/// Characters outside this table are returned unchanged.
fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        other => other,
    }
}

/// Turns a column title into a stable key.
///
/// Lowercases, folds accents, collapses every run of characters outside
/// `[a-z0-9]` into one `_`, and trims `_` from both ends. Accented letters
/// missing from the fold table count as separators.
///
/// ```
/// use scoring::normalize_header;
///
/// assert_eq!(normalize_header("Nome do Operador"), "nome_do_operador");
/// assert_eq!(normalize_header("Sistema Hidráulico?"), "sistema_hidraulico");
/// ```
pub fn normalize_header(header: &str) -> String {
    let mut key = String::with_capacity(header.len());
    let mut pending_separator = false;

    for c in header.chars().flat_map(char::to_lowercase).map(fold_accent) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !key.is_empty() {
                key.push('_');
            }
            pending_separator = false;
            key.push(c);
        } else {
            pending_separator = true;
        }
    }

    key
}
