use std::collections::HashMap;

/// Makes export header labels usable as column keys.
///
/// Blank labels (typically from a trailing delimiter) become `Unnamed: {n}`
/// and repeated labels get a `.1`, `.2`, ... suffix so every column stays
/// addressable by label.
pub fn normalize_headers<'a, I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::new();

    for (idx, label) in raw.into_iter().enumerate() {
        let label = if label.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            label.to_string()
        };

        let count = seen.entry(label.clone()).or_insert(0);
        let unique = if *count == 0 {
            label
        } else {
            format!("{label}.{count}")
        };
        *count += 1;
        headers.push(unique);
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_headers() {
        let headers = normalize_headers(["品番", "", "品番", "商品名", "品番"]);
        assert_eq!(
            headers,
            vec!["品番", "Unnamed: 1", "品番.1", "商品名", "品番.2"]
        );
    }
}
