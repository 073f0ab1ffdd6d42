/// Per-cell state threaded through the field of view scan.
///
/// The scan calls `advance` on the state of the cell that a beam is coming
/// from with the offset of the next cell along the beam. Returning `None`
/// means the offset cell is not seen and the beam ends there. Returning a
/// state marks the cell visible, and adjacent cells with equal states are
/// grouped into a single beam that continues outwards.
///
/// An opaque cell is visible itself, so it should return a state that
/// remembers being opaque and then refuse to advance further from it.
pub trait State: Sized + Eq + Clone {
    type Vector;

    fn advance(&self, offset: Self::Vector) -> Option<Self>;
}

/// Discrete ring geometry that the scan walks outward along.
pub trait Geometry: Copy {
    type Vector: Copy;

    /// Start and end points of the full circle at radius 1.
    fn unit_circle_endpoints() -> (Self, Self);

    /// Whether the cell at this point comes before the end point `other`.
    fn is_below(&self, other: &Self) -> bool;

    /// Offset of the cell at this point from the origin.
    fn to_v2(&self) -> Self::Vector;

    /// Project the point to the next ring outward.
    fn expand(&self) -> Self;

    /// Move to the start of the next cell along the ring.
    fn advance(&mut self);
}

/// Field of view iterator.
///
/// Yields every visible cell outside the origin with the state it was given.
/// Whether the origin itself is part of the view is left to the caller. Cells
/// where beams meet can be yielded more than once.
pub struct Fov<G, T> {
    stack: Vec<Sector<G, T>>,
}

impl<G: Geometry, T: State<Vector = G::Vector>> Fov<G, T> {
    pub fn new(origin: T) -> Self {
        let (begin, end) = G::unit_circle_endpoints();
        Fov {
            stack: vec![Sector::new(begin, end, origin)],
        }
    }
}

/// Arc of a single ring that is being scanned from a known parent state.
struct Sector<G, T> {
    pt: G,
    end: G,
    parent: T,
    group_begin: G,
    /// State of the current run of equal cells, `None` for no run yet.
    group: Option<Option<T>>,
}

impl<G: Geometry, T> Sector<G, T> {
    fn new(begin: G, end: G, parent: T) -> Self {
        Sector {
            pt: begin,
            end,
            parent,
            group_begin: begin,
            group: None,
        }
    }
}

impl<G: Geometry, T: State<Vector = G::Vector>> Iterator for Fov<G, T> {
    type Item = (G::Vector, T);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut sector) = self.stack.pop() {
            if !sector.pt.is_below(&sector.end) {
                // Arc done, the last group continues outwards.
                if let Some(Some(s)) = sector.group {
                    self.stack.push(Sector::new(
                        sector.group_begin.expand(),
                        sector.end.expand(),
                        s,
                    ));
                }
                continue;
            }

            let v = sector.pt.to_v2();
            let state = sector.parent.advance(v);

            match sector.group.take() {
                Some(prev) if prev != state => {
                    // Group ends here, spawn a beam for it if it was visible.
                    if let Some(s) = prev {
                        self.stack.push(Sector::new(
                            sector.group_begin.expand(),
                            sector.pt.expand(),
                            s,
                        ));
                    }
                    sector.group_begin = sector.pt;
                }
                _ => {}
            }
            sector.group = Some(state.clone());
            sector.pt.advance();

            // Keep working on the current arc before the spawned beams.
            self.stack.push(sector);

            if let Some(s) = state {
                return Some((v, s));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::Square;

    use super::*;

    /// Open plane with walls given as a list of points.
    #[derive(Clone, Eq, PartialEq, Debug)]
    struct Plane<'a> {
        walls: &'a [[i32; 2]],
        radius: i32,
        is_wall: bool,
    }

    impl State for Plane<'_> {
        type Vector = [i32; 2];

        fn advance(&self, [x, y]: [i32; 2]) -> Option<Self> {
            if self.is_wall || x * x + y * y >= self.radius * self.radius {
                return None;
            }
            Some(Plane {
                is_wall: self.walls.contains(&[x, y]),
                ..self.clone()
            })
        }
    }

    fn view(walls: &[[i32; 2]], radius: i32) -> HashSet<[i32; 2]> {
        Square::<_, [i32; 2]>::new(Plane {
            walls,
            radius,
            is_wall: false,
        })
        .map(|(v, _)| v)
        .collect()
    }

    #[test]
    fn open_field() {
        let cells = view(&[], 4);
        for x in -5..=5 {
            for y in -5..=5 {
                if (x, y) == (0, 0) {
                    continue;
                }
                assert_eq!(cells.contains(&[x, y]), x * x + y * y < 16);
            }
        }
    }

    #[test]
    fn wall_casts_shadow() {
        let cells = view(&[[1, 0]], 6);
        assert!(cells.contains(&[1, 0]));
        assert!(!cells.contains(&[2, 0]));
        assert!(!cells.contains(&[4, 0]));
        assert!(cells.contains(&[-3, 0]));
    }

    #[test]
    fn enclosed() {
        let ring: Vec<[i32; 2]> = (-1..=1)
            .flat_map(|x| (-1..=1).map(move |y| [x, y]))
            .filter(|&p| p != [0, 0])
            .collect();
        let cells = view(&ring, 8);
        assert_eq!(cells.len(), 8);
        assert!(cells.iter().all(|p| ring.contains(p)));
    }
}
