use delivery_bot::core::config::WorldConfig;
use delivery_bot::core::types::Position;
use delivery_bot::navigation::PathEngine;
use delivery_bot::world::{generate_world, GridMap};
use proptest::prelude::*;
use proptest::sample::Index;

/// A random square grid with roughly a quarter of its cells walled
fn arb_grid() -> impl Strategy<Value = GridMap> {
    (4usize..12).prop_flat_map(|size| {
        prop::collection::vec(prop::bool::weighted(0.25), size * size).prop_map(move |walls| {
            let mut grid = GridMap::new(size);
            for (i, wall) in walls.into_iter().enumerate() {
                if wall {
                    grid.block(Position::new((i % size) as i32, (i / size) as i32));
                }
            }
            grid
        })
    })
}

fn free_cells(grid: &GridMap) -> Vec<Position> {
    let size = grid.size() as i32;
    (0..size)
        .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
        .filter(|&pos| grid.is_free(pos))
        .collect()
}

proptest! {
    #[test]
    fn property_astar_matches_dijkstra(grid in arb_grid(), a in any::<Index>(), b in any::<Index>()) {
        let free = free_cells(&grid);
        prop_assume!(!free.is_empty());
        let start = free[a.index(free.len())];
        let goal = free[b.index(free.len())];
        let engine = PathEngine::new(&grid);

        let astar = engine.distance(start, goal);
        let dijkstra = engine.multi_target_distances(start, &[goal]).get(&goal).copied();
        prop_assert_eq!(astar, dijkstra);
    }

    #[test]
    fn property_multi_target_matches_single_searches(
        grid in arb_grid(),
        a in any::<Index>(),
        picks in prop::collection::vec(any::<Index>(), 1..6),
    ) {
        let free = free_cells(&grid);
        prop_assume!(!free.is_empty());
        let start = free[a.index(free.len())];
        let targets: Vec<Position> = picks.iter().map(|i| free[i.index(free.len())]).collect();
        let engine = PathEngine::new(&grid);

        let all = engine.multi_target_distances(start, &targets);
        for target in &targets {
            prop_assert_eq!(all.get(target).copied(), engine.distance(start, *target));
        }
    }

    #[test]
    fn property_nearest_target_is_the_first_minimum(
        grid in arb_grid(),
        a in any::<Index>(),
        picks in prop::collection::vec(any::<Index>(), 1..6),
    ) {
        let free = free_cells(&grid);
        prop_assume!(!free.is_empty());
        let start = free[a.index(free.len())];
        let targets: Vec<Position> = picks.iter().map(|i| free[i.index(free.len())]).collect();
        let engine = PathEngine::new(&grid);

        let expected = targets
            .iter()
            .filter_map(|&t| engine.distance(start, t).map(|d| (t, d)))
            .min_by_key(|&(_, d)| d);
        prop_assert_eq!(engine.nearest_target(start, &targets), expected);
    }

    #[test]
    fn property_routes_are_walkable(grid in arb_grid(), a in any::<Index>(), b in any::<Index>()) {
        let free = free_cells(&grid);
        prop_assume!(!free.is_empty());
        let start = free[a.index(free.len())];
        let goal = free[b.index(free.len())];
        let engine = PathEngine::new(&grid);

        match engine.shortest_path(start, goal) {
            Some(route) => {
                prop_assert_eq!(route.cost as usize, route.path.len());
                prop_assert_eq!(Some(route.cost), engine.distance(start, goal));
                prop_assert!(route.cost >= start.manhattan(&goal));

                let mut previous = start;
                for &cell in &route.path {
                    prop_assert!(grid.is_free(cell));
                    prop_assert!(previous.is_adjacent(&cell));
                    previous = cell;
                }
                prop_assert_eq!(previous, goal);
            }
            None => {
                prop_assert_eq!(engine.distance(start, goal), None);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn property_generated_layouts_hold_their_invariants(
        seed in any::<u64>(),
        grid_size in 16usize..32,
        total_items in 1usize..6,
    ) {
        let config = WorldConfig {
            grid_size,
            total_items,
            ..WorldConfig::default()
        };

        let layout = generate_world(&config, seed).unwrap();
        let again = generate_world(&config, seed).unwrap();
        prop_assert_eq!(&layout, &again);

        prop_assert_eq!(layout.packages.len(), total_items * 2);
        prop_assert_eq!(layout.goals.len(), total_items);
        prop_assert!(layout.grid.is_free(layout.start));
        prop_assert!(layout.grid.is_free(layout.recharger));

        let mut seen: Vec<Position> = layout.packages.clone();
        seen.extend(&layout.goals);
        seen.push(layout.start);
        seen.push(layout.recharger);
        let count = seen.len();
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), count);
    }
}
