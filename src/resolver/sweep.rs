use crate::window::Window;

/// Index pairs `(earlier, later)` of windows whose intervals overlap.
///
/// Windows are visited in `start` order while an active list holds every
/// window whose end has not yet been passed; open-ended windows never leave
/// it. Categories and tags are not looked at.
pub(crate) fn overlapping_pairs<T: Ord + Copy, C>(all: &[Window<T, C>]) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..all.len()).collect();
    order.sort_by_key(|&i| all[i].interval().start());

    let mut active: Vec<usize> = Vec::new();
    let mut pairs = Vec::new();
    for i in order {
        let start = all[i].interval().start();
        active.retain(|&j| all[j].interval().end().map_or(true, |end| start <= end));
        pairs.extend(active.iter().map(|&j| (j, i)));
        active.push(i);
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::arc;
    use crate::window::ArcKind;
    use itertools::Itertools;

    fn sorted(pairs: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
        pairs
            .into_iter()
            .map(|(a, b)| (a.min(b), a.max(b)))
            .sorted()
            .collect()
    }

    #[test]
    fn finds_touching_and_open_ended() {
        let arcs = vec![
            arc("a", 10, None, ArcKind::Canon),
            arc("b", 1, Some(5), ArcKind::Canon),
            arc("c", 5, Some(9), ArcKind::Canon),
            arc("d", 6, Some(9), ArcKind::Canon),
            arc("e", 40, Some(41), ArcKind::Canon),
        ];
        assert_eq!(
            sorted(overlapping_pairs(&arcs)),
            vec![(0, 4), (1, 2), (2, 3)]
        );
    }

    #[test]
    fn empty_and_single() {
        assert!(overlapping_pairs::<u32, ArcKind>(&[]).is_empty());
        assert!(overlapping_pairs(&[arc("a", 1, None, ArcKind::Canon)]).is_empty());
    }
}
