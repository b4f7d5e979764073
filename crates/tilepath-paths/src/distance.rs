use tilepath_core::Coord;

use crate::traits::Cost;

/// Manhattan (L1) distance between two coordinates.
///
/// On a 4-connected unit-cost grid this is a lower bound of any path cost.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> Cost {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Coord::new(-2, 5);
        let b = Coord::new(3, 1);
        assert_eq!(manhattan(a, b), 9);
        assert_eq!(manhattan(b, a), 9);
        assert_eq!(manhattan(a, a), 0);
    }
}
