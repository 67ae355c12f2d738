/// Size of a made poker hand.
pub const HAND_SIZE: usize = 5;

/// Iterator over all C(n, 5) index sets of `n` cards, in lexicographic order.
/// Yields nothing when `n < 5`.
pub struct Combinations5 {
    n: usize,
    indices: [usize; HAND_SIZE],
    done: bool,
}

impl Combinations5 {
    pub fn new(n: usize) -> Self {
        Self { n, indices: [0, 1, 2, 3, 4], done: n < HAND_SIZE }
    }
}

impl Iterator for Combinations5 {
    type Item = [usize; HAND_SIZE];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.indices;

        // Rightmost index that can still move right, then reset everything after it
        let mut i = HAND_SIZE - 1;
        loop {
            if self.indices[i] < self.n - (HAND_SIZE - i) {
                self.indices[i] += 1;
                for j in (i + 1)..HAND_SIZE {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
        }

        Some(result)
    }
}
