//! Lexicographic k-subset enumeration.

/// Number of k-subsets of an n-set, `None` on overflow.
///
/// # Examples
///
/// ```
/// use u_select::combination::binomial;
///
/// assert_eq!(binomial(11, 8), Some(165));
/// assert_eq!(binomial(3, 5), Some(0));
/// assert_eq!(binomial(4, 0), Some(1));
/// ```
pub fn binomial(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // exact at every step: acc * (n - i) is divisible by (i + 1)
        acc = acc.checked_mul((n - i) as u128)? / (i as u128 + 1);
    }
    Some(acc)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Fresh,
    Running,
    Done,
}

/// Lazy enumeration of all k-subsets of `0..n` as sorted index vectors.
///
/// Subsets come out in lexicographic order, so the sequence is fully
/// determined by the pool order. `k == 0` yields one empty subset and
/// `k > n` yields nothing. Dropping the iterator early has no effect
/// beyond what was already yielded; [`reset`](Combinations::reset)
/// restarts from the first subset.
///
/// # Examples
///
/// ```
/// use u_select::combination::Combinations;
///
/// let all: Vec<Vec<usize>> = Combinations::new(4, 2).collect();
/// assert_eq!(all.len(), 6);
/// assert_eq!(all[0], vec![0, 1]);
/// assert_eq!(all[5], vec![2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    k: usize,
    indices: Vec<usize>,
    cursor: Cursor,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            indices: (0..k).collect(),
            cursor: if k > n { Cursor::Done } else { Cursor::Fresh },
        }
    }

    /// Restarts the enumeration from the first subset.
    pub fn reset(&mut self) {
        *self = Self::new(self.n, self.k);
    }

    /// Total number of subsets of a full pass.
    pub fn total(&self) -> Option<u128> {
        binomial(self.n, self.k)
    }

    pub fn pool_size(&self) -> usize {
        self.n
    }

    pub fn subset_size(&self) -> usize {
        self.k
    }

    fn advance(&mut self) -> bool {
        let (n, k) = (self.n, self.k);
        // rightmost position that can still move right
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] < n - k + i) else {
            return false;
        };
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        true
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        match self.cursor {
            Cursor::Done => None,
            Cursor::Fresh => {
                self.cursor = Cursor::Running;
                Some(self.indices.clone())
            }
            Cursor::Running => {
                if self.advance() {
                    Some(self.indices.clone())
                } else {
                    self.cursor = Cursor::Done;
                    None
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Combinations {}

/// All k-subsets of `items`, each mapped through the index combination.
///
/// Used to enumerate over a restricted part of a pool: pass the indices
/// still available and get back subsets of those indices.
pub fn subsets_of<T: Clone>(items: &[T], k: usize) -> impl Iterator<Item = Vec<T>> + '_ {
    Combinations::new(items.len(), k)
        .map(move |idx| idx.into_iter().map(|i| items[i].clone()).collect())
}
