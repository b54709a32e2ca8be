/// Dense array of learned weights addressed by a feature index.
///
/// Indices come from [`super::TupleScheme::index`], which guarantees they are
/// below [`super::TABLE_SIZE`] for a valid board; the table itself only
/// exposes plain element access.
#[derive(Clone, PartialEq)]
pub struct WeightTable {
    weights: Box<[f32]>,
}

impl WeightTable {
    /// Zero-initialised table with `len` entries.
    pub fn zeroed(len: usize) -> Self {
        // Allocate on the heap to avoid large stack frames
        Self { weights: vec![0.0f32; len].into_boxed_slice() }
    }

    /// Wrap existing weights.
    pub fn from_vec(weights: Vec<f32>) -> Self {
        Self { weights: weights.into_boxed_slice() }
    }

    #[inline]
    pub fn len(&self) -> usize { self.weights.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.weights.is_empty() }

    #[inline]
    pub fn get(&self, index: usize) -> f32 { self.weights[index] }

    #[inline]
    pub fn set(&mut self, index: usize, value: f32) { self.weights[index] = value; }

    /// `weights[index] += delta`
    #[inline]
    pub fn add(&mut self, index: usize, delta: f32) { self.weights[index] += delta; }

    /// Read-only view of every weight, in index order.
    #[inline]
    pub fn as_slice(&self) -> &[f32] { &self.weights }
}

impl std::fmt::Debug for WeightTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let nonzero = self.weights.iter().filter(|w| **w != 0.0).count();
        write!(f, "WeightTable {{ len: {}, nonzero: {} }}", self.weights.len(), nonzero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_table_reads_zero() {
        let t = WeightTable::zeroed(16);
        assert_eq!(t.len(), 16);
        assert!(t.as_slice().iter().all(|&w| w == 0.0));
    }

    #[test]
    fn set_and_add() {
        let mut t = WeightTable::zeroed(4);
        t.set(2, 1.5);
        t.add(2, 0.25);
        t.add(3, -2.0);
        assert_eq!(t.get(2), 1.75);
        assert_eq!(t.get(3), -2.0);
        assert_eq!(format!("{:?}", t), "WeightTable { len: 4, nonzero: 2 }");
    }
}
