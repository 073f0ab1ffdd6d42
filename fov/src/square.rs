use crate::fov::Geometry;

/// Position on a square ring around the origin.
///
/// Ring `n` is the perimeter of the `(2n + 1)`-wide square centered on the
/// origin and has `8n` cells. Positions are measured in cell widths along
/// the ring, running counterclockwise from the corner cell at `(n, n)`, so
/// cell `i` covers the interval `[i - 0.5, i + 0.5)`. Projecting a position
/// to the next ring scales it by `(n + 1) / n`, which keeps the angle from
/// the origin roughly fixed.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SquareRing<V> {
    arc: f32,
    ring: u32,
    phantom: std::marker::PhantomData<V>,
}

impl<V> SquareRing<V> {
    fn at(arc: f32, ring: u32) -> Self {
        SquareRing {
            arc,
            ring,
            phantom: Default::default(),
        }
    }

    /// Cell the position falls in.
    fn cell(self) -> i32 {
        (self.arc + 0.5).floor() as i32
    }

    /// First cell boundary at or past the position.
    fn boundary(self) -> i32 {
        (self.arc + 0.5).ceil() as i32
    }
}

impl<V: From<[i32; 2]> + Copy> Geometry for SquareRing<V> {
    type Vector = V;

    fn unit_circle_endpoints() -> (Self, Self) {
        (SquareRing::at(0.0, 1), SquareRing::at(8.0, 1))
    }

    fn is_below(&self, other: &Self) -> bool {
        self.cell() < other.boundary()
    }

    fn to_v2(&self) -> V {
        let n = self.ring as i32;
        let i = self.cell().rem_euclid(8 * n);
        // Each side of the ring is 2n cells long.
        let (side, k) = (i / (2 * n), i % (2 * n));

        V::from(match side {
            0 => [n, n - k],
            1 => [n - k, -n],
            2 => [-n, k - n],
            _ => [k - n, n],
        })
    }

    fn expand(&self) -> Self {
        let n = self.ring as f32;
        SquareRing::at(self.arc * (n + 1.0) / n, self.ring + 1)
    }

    fn advance(&mut self) {
        // Lower edge of the next cell.
        self.arc = self.cell() as f32 + 0.5;
    }
}
