//! Bounded combination generation over candidate fragments
//!
//! Enumerates every concatenation of 1..=k fragments drawn from the input,
//! preserving relative order, smaller combinations first and lexicographic
//! index order within a size. Output is deterministic for identical input.

/// All order-preserving combinations of size 1..=k, each concatenated into
/// one selector string.
pub fn combinations(items: &[String], k: usize) -> Vec<String> {
    let mut result = Vec::new();
    let mut picked = Vec::new();

    for size in 1..=k {
        k_combinations(items, size, 0, &mut picked, &mut result);
    }

    result
}

fn k_combinations(
    items: &[String],
    size: usize,
    start: usize,
    picked: &mut Vec<usize>,
    result: &mut Vec<String>,
) {
    if picked.len() == size {
        let mut combined = String::new();
        for &index in picked.iter() {
            combined.push_str(&items[index]);
        }
        result.push(combined);
        return;
    }

    let needed = size - picked.len();
    let mut index = start;
    // Feasibility bound: stop once too few items remain to fill the
    // combination, rather than filtering afterwards
    while index < items.len() && items.len() - index >= needed {
        picked.push(index);
        k_combinations(items, size, index + 1, picked, result);
        picked.pop();
        index += 1;
    }
}
