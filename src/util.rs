pub const PERSON_PREFIX: &str = "person:";
pub const PUBLICATION_PREFIX: &str = "pub:";

/// Strips the `person:`/`pub:` namespace from a node id. Colons inside the
/// raw id are kept.
pub fn raw_id(id: &str) -> &str {
    id.strip_prefix(PERSON_PREFIX)
        .or_else(|| id.strip_prefix(PUBLICATION_PREFIX))
        .unwrap_or(id)
}

pub fn selected_person_id(id: &str) -> &str {
    id.strip_prefix(PERSON_PREFIX).unwrap_or(id)
}

pub fn person_node_id(raw: &str) -> String {
    format!("{PERSON_PREFIX}{raw}")
}

pub fn publication_node_id(raw: &str) -> String {
    format!("{PUBLICATION_PREFIX}{raw}")
}

pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

pub fn wrap_label(text: &str, width: usize, max_lines: usize) -> String {
    if max_lines == 0 {
        return String::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let extra = if current.is_empty() { 0 } else { 1 };
        if !current.is_empty() && current.chars().count() + extra + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
            if lines.len() >= max_lines {
                return lines.join("\n");
            }
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() && lines.len() < max_lines {
        lines.push(current);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_id_strips_only_the_namespace() {
        assert_eq!(raw_id("person:7"), "7");
        assert_eq!(raw_id("pub:12"), "12");
        assert_eq!(raw_id("7"), "7");
        assert_eq!(raw_id("person:lab:1"), "lab:1");
        assert_eq!(raw_id("pub:person:x"), "person:x");
        assert_eq!(raw_id("lab:1"), "lab:1");
    }

    #[test]
    fn node_ids_keep_colons_in_raw_ids() {
        assert_eq!(person_node_id("7"), "person:7");
        assert_eq!(person_node_id("lab:1"), "person:lab:1");
        assert_ne!(person_node_id("lab:1"), person_node_id("core:1"));
        assert_eq!(publication_node_id("3"), "pub:3");
        assert_eq!(raw_id(&person_node_id("Team A: Ocean")), "Team A: Ocean");
    }

    #[test]
    fn selected_ids_accept_only_person_namespace() {
        assert_eq!(selected_person_id("person:7"), "7");
        assert_eq!(selected_person_id("7"), "7");
        assert_eq!(selected_person_id("pub:7"), "pub:7");
    }

    #[test]
    fn wrap_label_breaks_at_spaces() {
        let wrapped = wrap_label("Deep learning for coral reef monitoring", 18, 3);
        assert_eq!(wrapped, "Deep learning for\ncoral reef\nmonitoring");
    }

    #[test]
    fn wrap_label_truncates_extra_lines() {
        let wrapped = wrap_label("one two three four five six", 7, 2);
        assert_eq!(wrapped, "one two\nthree");
    }
}
