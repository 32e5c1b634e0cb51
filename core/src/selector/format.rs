use std::collections::BTreeSet;

/// Collapse a set of subcarrier indices into a compact display string:
/// consecutive runs become inclusive `a-b` ranges, isolated indices stay
/// singletons, tokens are joined by `", "`. Order-independent on its input.
pub fn format_ranges<I: IntoIterator<Item = u8>>(indices: I) -> String {
    let sorted: BTreeSet<u8> = indices.into_iter().collect();
    let mut parts: Vec<String> = Vec::new();
    let mut run: Option<(u8, u8)> = None;

    for index in sorted {
        run = match run {
            Some((start, end)) if index == end + 1 => Some((start, index)),
            Some((start, end)) => {
                parts.push(render_run(start, end));
                Some((index, index))
            }
            None => Some((index, index)),
        };
    }
    if let Some((start, end)) = run {
        parts.push(render_run(start, end));
    }

    parts.join(", ")
}

fn render_run(start: u8, end: u8) -> String {
    if start == end {
        format!("{}", start)
    } else {
        format!("{}-{}", start, end)
    }
}
