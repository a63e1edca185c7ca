#[must_use]
pub fn get_suggestions(msg: &str) -> Vec<String> {
    let mut suggestions = Vec::new();
    let msg_lower = msg.to_lowercase();

    if msg_lower.contains("not found at") {
        suggestions
            .push("Point cheatgen at the bundled data with: cheatgen --data-dir <DIR>".to_string());
    }

    if msg_lower.contains("malformed") || msg_lower.contains("missing required field") {
        suggestions.push(
            "Fix the JSON file; it reloads automatically once saved (or press r)".to_string(),
        );
    }

    if msg_lower.contains("clipboard") {
        suggestions.push(
            "Copy the command from the output bar manually; on Linux make sure an X11 or Wayland session is available"
                .to_string(),
        );
    }

    if msg_lower.contains("favorites") {
        suggestions.push("Check that ~/.config/cheatgen is writable".to_string());
    }

    suggestions
}
