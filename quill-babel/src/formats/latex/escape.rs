//! Escaping of running text for LaTeX

/// Escapes characters LaTeX treats specially, then applies the typographic replacements
/// (double spaces, ellipses, `Ms. `).
pub fn escape_latex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\textbackslash{}"),
            '&' | '_' | '%' | '#' | '$' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            '~' => escaped.push_str("\\textasciitilde{}"),
            '^' => escaped.push_str("\\textasciicircum{}"),
            '+' => escaped.push_str("\\texttt{+}"),
            _ => escaped.push(ch),
        }
    }
    escaped
        .replace("  ", "\\quad ")
        .replace(
            "...",
            "\\kern0.23em.\\kern0.23em.\\kern0.23em.\\kern0.23em\\linebreak[0]",
        )
        .replace("Ms. ", "Ms.\\ ")
}
