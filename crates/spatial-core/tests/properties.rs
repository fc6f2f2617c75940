use proptest::prelude::*;
use serde_json::json;
use spatial_core::{Coord, GridStore, Settings, WALL_COST};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn create_covers_exactly_the_rectangle(rows in 1_usize..12, cols in 1_usize..12) {
        let g = GridStore::create(rows, cols, 0_u8).unwrap();
        prop_assert_eq!(g.len(), rows * cols);
        for j in 0..rows + 2 {
            for i in 0..cols + 2 {
                prop_assert_eq!(g.has(Coord::new(i, j)), i < cols && j < rows, "({}, {})", i, j);
            }
        }
    }

    #[test]
    fn walls_always_override_cost_function(
        w in 1_usize..10,
        h in 1_usize..10,
        base in 0_u32..100_000,
        picks in prop::collection::vec((0_usize..10, 0_usize..10), 0..20),
    ) {
        let walls: Vec<Coord> = picks
            .into_iter()
            .map(|(i, j)| Coord::new(i % w, j % h))
            .collect();
        let settings = Settings::new(w, h)
            .with_cost_function(move |_, c| base.wrapping_add((c.i * 31 + c.j) as u32))
            .with_walls(walls.clone());
        let g = settings.build().unwrap();
        for c in walls {
            prop_assert_eq!(g.get(c).unwrap().cost(), Some(WALL_COST));
        }
    }

    #[test]
    fn duplicate_is_independent(
        w in 1_usize..8,
        h in 1_usize..8,
        at in (0_usize..8, 0_usize..8),
        cost in 2_u32..500,
    ) {
        let original = Settings::new(w, h).build().unwrap();
        let mut copy = original.duplicate();
        prop_assert_eq!(&copy, &original);

        let c = Coord::new(at.0 % w, at.1 % h);
        let cell = copy.get_mut(c).unwrap();
        cell.set_cost(cost);
        cell.push_to("items", json!("marker"));

        prop_assert_eq!(original.get(c).unwrap().cost(), Some(1));
        prop_assert!(original.get(c).unwrap().items().is_empty());
        prop_assert_ne!(&copy, &original);
    }
}
