use rand::Rng;

/// Random suffix length in bytes (produces 8 hex characters).
const SUFFIX_BYTES: usize = 4;

/// Turns an arbitrary client-supplied name into a filesystem-safe one.
///
/// Every character outside `[A-Za-z0-9_.-]` is replaced with `_`,
/// preserving length and ordering. An absent name, a name that
/// sanitizes to nothing, or a name made only of dots falls back to a
/// generated `unnamed_file_<8 hex>` form; `timestamp_prefix` prepends a
/// coarse UTC timestamp to that fallback for human sortability.
///
/// Never returns an empty string.
pub fn sanitize_file_name(raw: Option<&str>, timestamp_prefix: bool) -> String {
    if let Some(raw) = raw {
        let cleaned: String = raw
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        // "." and ".." are made of allowed characters but are
        // path-meaningful; treat all-dot names as degenerate.
        if !cleaned.is_empty() && !cleaned.chars().all(|c| c == '.') {
            return cleaned;
        }
    }

    generated_name(timestamp_prefix)
}

/// Generates a collision-resistant fallback name.
fn generated_name(timestamp_prefix: bool) -> String {
    let mut bytes = [0u8; SUFFIX_BYTES];
    rand::thread_rng().fill(&mut bytes);
    let suffix = hex::encode(bytes);

    if timestamp_prefix {
        let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S");
        format!("{stamp}_unnamed_file_{suffix}")
    } else {
        format!("unnamed_file_{suffix}")
    }
}
