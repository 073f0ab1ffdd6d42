use glam::IVec2;

/// 8 directions, clock face order.
pub const DIR_8: [IVec2; 8] = [
    IVec2::from_array([0, -1]),
    IVec2::from_array([1, -1]),
    IVec2::from_array([1, 0]),
    IVec2::from_array([1, 1]),
    IVec2::from_array([0, 1]),
    IVec2::from_array([-1, 1]),
    IVec2::from_array([-1, 0]),
    IVec2::from_array([-1, -1]),
];

pub trait VecExt: Sized + Default {
    /// Absolute size of vector in taxicab metric.
    fn taxi_len(&self) -> i32;

    /// Absolute size of vector in chessboard metric, the number of king's
    /// moves needed to cover it.
    fn chess_len(&self) -> i32;

    /// Vec points to one of the 8 cells surrounding the origin.
    fn is_adjacent(&self) -> bool {
        self.chess_len() == 1
    }

    /// Squared Euclidean length, for exact integer radius comparisons.
    fn length2(&self) -> i32;
}

impl VecExt for IVec2 {
    fn taxi_len(&self) -> i32 {
        self[0].abs() + self[1].abs()
    }

    fn chess_len(&self) -> i32 {
        self[0].abs().max(self[1].abs())
    }

    fn length2(&self) -> i32 {
        self[0] * self[0] + self[1] * self[1]
    }
}

#[cfg(test)]
mod tests {
    use glam::ivec2;

    use super::*;

    #[test]
    fn metrics() {
        assert_eq!(ivec2(3, -4).taxi_len(), 7);
        assert_eq!(ivec2(3, -4).chess_len(), 4);
        assert_eq!(ivec2(3, -4).length2(), 25);

        for d in DIR_8 {
            assert!(d.is_adjacent());
        }
        assert!(!IVec2::ZERO.is_adjacent());
        assert!(!ivec2(2, 1).is_adjacent());
    }
}
