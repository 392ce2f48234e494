//! Size-balanced two-way splits of a roster

/// One candidate split
///
/// `team_a` always holds `n / 2` players (rounded down), `team_b` the rest,
/// both in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split<'a, T> {
    pub team_a: Vec<&'a T>,
    pub team_b: Vec<&'a T>,
}

/// Lazy walk over every `n / 2`-combination of the input, in lexicographic
/// index order
///
/// For even `n` every unordered split comes up twice, once with each half
/// in `team_a`. [`Partitions::distinct`] stops after the combinations that
/// contain the first item, which visits each unordered split exactly once.
#[derive(Debug, Clone)]
pub struct Partitions<'a, T> {
    items: &'a [T],
    indices: Vec<usize>,
    distinct: bool,
    done: bool,
}

impl<'a, T> Partitions<'a, T> {
    /// Every `n / 2`-subset, with duplicates for even `n`
    pub fn new(items: &'a [T]) -> Self {
        Self::with_mode(items, false)
    }

    /// Every unordered split once
    pub fn distinct(items: &'a [T]) -> Self {
        Self::with_mode(items, true)
    }

    pub fn with_mode(items: &'a [T], distinct: bool) -> Self {
        let k = items.len() / 2;
        Self {
            items,
            indices: (0..k).collect(),
            distinct,
            done: false,
        }
    }

    /// Number of splits this walk yields, `C(n, n / 2)` (halved in distinct
    /// mode for even `n > 0`). Saturates at `u128::MAX`.
    pub fn expected_len(n: usize, distinct: bool) -> u128 {
        let total = binomial(n, n / 2);
        if distinct && n > 0 && n % 2 == 0 {
            total / 2
        } else {
            total
        }
    }

    fn current(&self) -> Split<'a, T> {
        let mut team_a = Vec::with_capacity(self.indices.len());
        let mut team_b = Vec::with_capacity(self.items.len() - self.indices.len());
        let mut chosen = self.indices.iter().peekable();
        for (i, item) in self.items.iter().enumerate() {
            if chosen.peek() == Some(&&i) {
                chosen.next();
                team_a.push(item);
            } else {
                team_b.push(item);
            }
        }
        Split { team_a, team_b }
    }

    fn advance(&mut self) {
        let n = self.items.len();
        let k = self.indices.len();

        // Rightmost index that can still move right
        let Some(pos) = (0..k).rev().find(|&i| self.indices[i] < n - k + i) else {
            self.done = true;
            return;
        };

        self.indices[pos] += 1;
        for i in pos + 1..k {
            self.indices[i] = self.indices[i - 1] + 1;
        }

        if self.distinct && n % 2 == 0 && self.indices.first() != Some(&0) {
            self.done = true;
        }
    }
}

impl<'a, T> Iterator for Partitions<'a, T> {
    type Item = Split<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let split = self.current();
        self.advance();
        Some(split)
    }
}

impl<T> std::iter::FusedIterator for Partitions<'_, T> {}

/// `C(n, k)`, saturating
pub fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        result = match result.checked_mul((n - i) as u128) {
            Some(v) => v / (i as u128 + 1),
            None => return u128::MAX,
        };
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(0, 0), 1);
        assert_eq!(binomial(4, 2), 6);
        assert_eq!(binomial(5, 2), 10);
        assert_eq!(binomial(10, 5), 252);
        assert_eq!(binomial(3, 4), 0);
    }

    #[test]
    fn test_counts_and_sizes() {
        for n in 0..=11usize {
            let items: Vec<usize> = (0..n).collect();
            let splits: Vec<_> = Partitions::new(&items).collect();
            assert_eq!(splits.len() as u128, binomial(n, n / 2), "n = {n}");
            assert_eq!(splits.len() as u128, Partitions::<usize>::expected_len(n, false));

            for split in &splits {
                assert_eq!(split.team_a.len(), n / 2);
                assert_eq!(split.team_b.len(), n - n / 2);
                let mut all: Vec<usize> =
                    split.team_a.iter().chain(split.team_b.iter()).map(|x| **x).collect();
                all.sort_unstable();
                assert_eq!(all, items);
            }
        }
    }

    #[test]
    fn test_empty_and_single() {
        let empty: Vec<u8> = Vec::new();
        let splits: Vec<_> = Partitions::new(&empty).collect();
        assert_eq!(splits.len(), 1);
        assert!(splits[0].team_a.is_empty() && splits[0].team_b.is_empty());

        let single = vec!['x'];
        let splits: Vec<_> = Partitions::new(&single).collect();
        assert_eq!(splits.len(), 1);
        assert!(splits[0].team_a.is_empty());
        assert_eq!(splits[0].team_b, vec![&'x']);
    }

    #[test]
    fn test_even_rosters_visit_each_split_twice() {
        let items: Vec<usize> = (0..6).collect();
        let mut seen: std::collections::HashMap<Vec<usize>, usize> = Default::default();
        for split in Partitions::new(&items) {
            let mut a: Vec<usize> = split.team_a.iter().map(|x| **x).collect();
            let mut b: Vec<usize> = split.team_b.iter().map(|x| **x).collect();
            a.sort_unstable();
            b.sort_unstable();
            let key = if a.first() == Some(&0) { a } else { b };
            *seen.entry(key).or_default() += 1;
        }
        assert_eq!(seen.len(), 10);
        assert!(seen.values().all(|&count| count == 2));
    }

    #[test]
    fn test_distinct_mode() {
        let items: Vec<usize> = (0..6).collect();
        let splits: Vec<_> = Partitions::distinct(&items).collect();
        assert_eq!(splits.len(), 10);
        assert!(splits.iter().all(|s| s.team_a.contains(&&0)));

        let keys: HashSet<Vec<usize>> = splits
            .iter()
            .map(|s| s.team_a.iter().map(|x| **x).collect())
            .collect();
        assert_eq!(keys.len(), 10);

        // Odd rosters have no duplicates to drop
        let odd: Vec<usize> = (0..5).collect();
        assert_eq!(Partitions::distinct(&odd).count(), 10);
        assert_eq!(Partitions::<usize>::expected_len(6, true), 10);
    }

    #[test]
    fn test_lexicographic_walk() {
        let items = ['a', 'b', 'c', 'd'];
        let firsts: Vec<String> = Partitions::new(&items)
            .map(|s| s.team_a.into_iter().collect())
            .collect();
        assert_eq!(firsts, vec!["ab", "ac", "ad", "bc", "bd", "cd"]);
    }
}
