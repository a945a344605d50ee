//! Picking building sites on buildable land.

use tracing::debug;

use crate::{
    core::geometry::site::Site, error::CityError, grid::ValidityGrid, traits::RandomF64Provider,
};

/// One random point inside every buildable cell, in flattened index order.
pub fn candidates<R: RandomF64Provider>(grid: &ValidityGrid, rng: &mut R) -> Vec<Site> {
    let cell_size = grid.cell_size();
    let points = grid
        .valid_indices()
        .map(|index| {
            let (i_idx, j_idx) = grid.unflatten(index);
            let origin = grid.world_position(i_idx, j_idx);
            let x = origin.x + cell_size * rng.gen_f64();
            let y = origin.y + cell_size * rng.gen_f64();
            Site::new(x, y)
        })
        .collect::<Vec<_>>();
    debug!("sampled {} candidate points", points.len());
    points
}

/// Draw `n` sites from the candidates, uniformly and with replacement.
pub fn select<R: RandomF64Provider>(
    candidates: &[Site],
    n: usize,
    rng: &mut R,
) -> Result<Vec<Site>, CityError> {
    if candidates.is_empty() {
        return Err(CityError::EmptyCandidateSet);
    }
    Ok((0..n)
        .map(|_| candidates[rng.gen_index(candidates.len())])
        .collect())
}

#[cfg(test)]
mod tests {
    use crate::road::Road;
    use crate::traits::{MockFlatTerrain, MockSequenceRandom, MockWaterTerrain};

    use super::*;

    #[test]
    fn test_one_candidate_per_valid_cell() {
        let roads = [Road::horizontal(0.0), Road::vertical(10.0)];
        let grid = ValidityGrid::build(1.0, 0.2, &roads, &MockFlatTerrain).unwrap();
        let mut rng = MockSequenceRandom::new(vec![0.25, 0.75, 0.5]);
        let points = candidates(&grid, &mut rng);
        assert_eq!(points.len(), grid.valid_count());
        for point in &points {
            let (i_idx, j_idx) = grid.cell_of(point).unwrap();
            assert!(grid.valid_at(i_idx, j_idx));
        }
    }

    #[test]
    fn test_candidates_follow_index_order() {
        let grid = ValidityGrid::build(2.0, 0.2, &[], &MockFlatTerrain).unwrap();
        let mut rng = MockSequenceRandom::new(vec![0.5]);
        let points = candidates(&grid, &mut rng);
        assert_eq!(points[0], Site::new(-49.0, -49.0));
        assert_eq!(points[1], Site::new(-47.0, -49.0));
        assert_eq!(points[grid.width()], Site::new(-49.0, -47.0));
    }

    #[test]
    fn test_no_candidates_on_water() {
        let grid = ValidityGrid::build(1.0, 0.2, &[], &MockWaterTerrain).unwrap();
        let mut rng = MockSequenceRandom::new(vec![0.5]);
        assert!(candidates(&grid, &mut rng).is_empty());
    }

    #[test]
    fn test_select_with_replacement() {
        let points = vec![Site::new(1.0, 1.0), Site::new(2.0, 2.0)];
        let mut rng = MockSequenceRandom::new(vec![0.1, 0.2, 0.9]);
        let selected = select(&points, 5, &mut rng).unwrap();
        assert_eq!(
            selected,
            vec![points[0], points[0], points[1], points[0], points[0]]
        );
    }

    #[test]
    fn test_select_from_empty() {
        let mut rng = MockSequenceRandom::new(vec![0.5]);
        assert_eq!(select(&[], 3, &mut rng), Err(CityError::EmptyCandidateSet));
        assert_eq!(select(&[], 0, &mut rng), Err(CityError::EmptyCandidateSet));
    }
}
