use crate::span::ByteRange;

/// Replace every range with its text, in one pass.
///
/// Ranges are applied in start order and must not overlap.
pub fn splice(code: &str, patches: &[(ByteRange, String)]) -> String {
    let mut ordered: Vec<&(ByteRange, String)> = patches.iter().collect();
    ordered.sort_by_key(|(range, _)| range.start);

    let removed: usize = ordered.iter().map(|(range, _)| range.len()).sum();
    let added: usize = ordered.iter().map(|(_, text)| text.len()).sum();
    let mut out = String::with_capacity((code.len() + added).saturating_sub(removed));

    let mut current = 0;
    for (range, text) in ordered {
        debug_assert!(
            current <= range.start && range.start <= range.end && range.end <= code.len(),
            "range [{}, {}) is out of bounds or overlaps for code length {}",
            range.start,
            range.end,
            code.len()
        );

        out.push_str(&code[current..range.start]);
        out.push_str(text);
        current = range.end;
    }
    out.push_str(&code[current..]);

    out
}

/// Remove every range from `code`.
pub fn remove_ranges(code: &str, ranges: &[ByteRange]) -> String {
    let patches: Vec<(ByteRange, String)> = ranges.iter().map(|r| (*r, String::new())).collect();
    splice(code, &patches)
}
