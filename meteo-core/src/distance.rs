//! Levenshtein edit distance.

/// Minimum number of single-character insertions, deletions or substitutions
/// needed to turn `a` into `b`.
///
/// Works on `char`s, so multi-byte input (e.g. Cyrillic city names) counts one
/// edit per character. Comparison is case-sensitive; callers lowercase first.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // table[i][j] = distance between a[..i] and b[..j]
    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            table[i][j] = if a[i - 1] == b[j - 1] {
                table[i - 1][j - 1]
            } else {
                let substitute = table[i - 1][j - 1] + 1;
                let insert = table[i][j - 1] + 1;
                let delete = table[i - 1][j] + 1;
                substitute.min(insert).min(delete)
            };
        }
    }

    table[a.len()][b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &["", "a", "osh", "bishkek", "Bishkek", "kitten", "sitting", "Москва"];

    #[test]
    fn identical_strings_have_zero_distance() {
        for s in SAMPLES {
            assert_eq!(distance(s, s), 0, "distance({s:?}, {s:?})");
        }
    }

    #[test]
    fn distance_is_symmetric() {
        for a in SAMPLES {
            for b in SAMPLES {
                assert_eq!(distance(a, b), distance(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn empty_side_yields_length_of_other() {
        for s in SAMPLES {
            assert_eq!(distance("", s), s.chars().count());
            assert_eq!(distance(s, ""), s.chars().count());
        }
    }

    #[test]
    fn classic_examples() {
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("bishkk", "bishkek"), 1);
        assert_eq!(distance("flaw", "lawn"), 2);
    }

    #[test]
    fn case_sensitive() {
        assert_eq!(distance("Bishkek", "bishkek"), 1);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(distance("Москва", "Моcква"), 1);
        assert_eq!(distance("", "Ош"), 2);
    }
}
