use arena_core::EngineId;

/// Download name for an export: `{base}_{engine}.{extension}`, where `base` is the
/// original filename without its last extension.
pub fn export_filename(original: &str, engine: EngineId, extension: &str) -> String {
    let base = sanitize_base(strip_extension(original.trim()));
    format!("{base}_{engine}.{extension}")
}

fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if !name[dot + 1..].is_empty() && !name[dot + 1..].contains('/') => {
            &name[..dot]
        }
        _ => name,
    }
}

fn sanitize_base(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]);
    if cleaned.is_empty() {
        return "document".to_string();
    }

    // Collapse runs of underscores left behind by replaced characters.
    let mut compacted = String::with_capacity(cleaned.len());
    for c in cleaned.chars() {
        if c == '_' && compacted.ends_with('_') {
            continue;
        }
        compacted.push(c);
    }
    if compacted.len() > 80 {
        let mut cut = 80;
        while !compacted.is_char_boundary(cut) {
            cut -= 1;
        }
        compacted.truncate(cut);
    }
    compacted
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
