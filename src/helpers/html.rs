//! HTML helper functions

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Make serialized JSON safe to embed inside a `<script>` element.
/// `<\/` is still a valid JSON string escape, so the data is unchanged.
pub fn script_safe_json(json: &str) -> String {
    json.replace("</", "<\\/")
}
