use crate::Vector;

pub struct OdeSolverSolutionPoint<V: Vector> {
    pub state: V,
    pub t: V::T,
}

/// Reference points of a known solution, kept sorted by time.
pub struct OdeSolverSolution<V: Vector> {
    pub solution_points: Vec<OdeSolverSolutionPoint<V>>,
}

impl<V: Vector> OdeSolverSolution<V> {
    pub fn push(&mut self, state: V, t: V::T) {
        // find the index to insert the new point keeping the times sorted
        let index = self
            .solution_points
            .iter()
            .position(|x| x.t > t)
            .unwrap_or(self.solution_points.len());
        self.solution_points
            .insert(index, OdeSolverSolutionPoint { state, t });
    }

    pub fn len(&self) -> usize {
        self.solution_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solution_points.is_empty()
    }
}

impl<V: Vector> Default for OdeSolverSolution<V> {
    fn default() -> Self {
        Self {
            solution_points: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::DVector;

    use super::OdeSolverSolution;

    #[test]
    fn test_push_keeps_points_sorted() {
        let mut soln = OdeSolverSolution::default();
        soln.push(DVector::from_element(1, 2.0), 2.0);
        soln.push(DVector::from_element(1, 0.0), 0.0);
        soln.push(DVector::from_element(1, 1.0), 1.0);
        let times: Vec<f64> = soln.solution_points.iter().map(|p| p.t).collect();
        assert_eq!(times, vec![0.0, 1.0, 2.0]);
        assert_eq!(soln.len(), 3);
    }
}
