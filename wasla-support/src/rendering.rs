//! Text rendering for container diagnostics.
//!
//! The container reports failures in terms of service keys; the helpers
//! here turn those keys into something a developer can actually read:
//! shortened type names, arrow-joined dependency chains, and suggestion
//! lists for near-miss lookups.

/// Joins the names of a dependency chain with arrows.
///
/// Used for circular-dependency reports, where the chain starts and ends
/// at the repeated service.
///
/// # Examples
/// ```
/// use wasla_support::rendering::render_chain;
///
/// let chain = ["UserService", "UserRepo", "UserService"];
/// assert_eq!(render_chain(&chain), "UserService -> UserRepo -> UserService");
/// ```
pub fn render_chain(chain: &[impl AsRef<str>]) -> String {
    let mut out = String::new();
    for (i, entry) in chain.iter().enumerate() {
        if i > 0 {
            out.push_str(" -> ");
        }
        out.push_str(entry.as_ref());
    }
    out
}

/// Strips module paths from a fully qualified type name.
///
/// Generic arguments are preserved, with their own paths stripped too.
///
/// # Examples
/// ```
/// use wasla_support::rendering::shorten_type_name;
///
/// assert_eq!(shorten_type_name("my_app::billing::InvoiceService"), "InvoiceService");
/// assert_eq!(
///     shorten_type_name("alloc::sync::Arc<dyn my_app::ports::Clock>"),
///     "Arc<dyn Clock>"
/// );
/// ```
pub fn shorten_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;

    let bytes = full.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b':' if i + 1 < bytes.len() && bytes[i + 1] == b':' => {
                // Path separator: everything since the last delimiter was a
                // module prefix. Drop it and restart the segment.
                segment_start = i + 2;
                i += 2;
            }
            b'<' | b'>' | b',' | b' ' | b'(' | b')' | b'[' | b']' => {
                out.push_str(&full[segment_start..i]);
                out.push(bytes[i] as char);
                segment_start = i + 1;
                i += 1;
            }
            _ => i += 1,
        }
    }
    out.push_str(&full[segment_start..]);
    out
}

/// Picks registered names that look like a misspelling or near miss of
/// `requested`. Returns at most `limit` names, best match first.
pub fn suggest_similar(requested: &str, available: &[&str], limit: usize) -> Vec<String> {
    let wanted = shorten_type_name(requested).to_lowercase();

    let mut ranked: Vec<(usize, &str)> = available
        .iter()
        .filter_map(|&candidate| {
            let short = shorten_type_name(candidate).to_lowercase();
            similarity(&wanted, &short).map(|score| (score, candidate))
        })
        .collect();

    ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(_, name)| name.to_string())
        .collect()
}

/// Scores how alike two lowercased short names are.
///
/// `None` means "not worth suggesting". Substring containment wins over
/// shared prefixes; a prefix shorter than 3 characters is noise.
fn similarity(a: &str, b: &str) -> Option<usize> {
    if a.is_empty() || b.is_empty() {
        return None;
    }
    if a == b {
        return Some(usize::MAX);
    }
    if a.contains(b) || b.contains(a) {
        return Some(1000);
    }

    let prefix = a
        .chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .count();
    if prefix >= 3 { Some(prefix) } else { None }
}
