use crate::prelude::{StageError, StageResult};
use ndarray::Array2;

pub struct MatrixHelper;

impl MatrixHelper {
    /// Stack equally long rows into a `[rows][columns]` matrix.
    pub fn stack_rows(rows: &[Vec<f64>]) -> StageResult<Array2<f64>> {
        let columns = rows.first().map(Vec::len).unwrap_or(0);
        let mut flat = Vec::with_capacity(rows.len() * columns);
        for row in rows {
            if row.len() != columns {
                return Err(StageError::ShapeMismatch {
                    expected: columns,
                    found: row.len(),
                });
            }
            flat.extend_from_slice(row);
        }
        Array2::from_shape_vec((rows.len(), columns), flat)
            .map_err(|err| StageError::Internal(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_rows_keeps_row_order() {
        let matrix = MatrixHelper::stack_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(matrix.dim(), (2, 2));
        assert_eq!(matrix[[1, 0]], 3.0);
    }

    #[test]
    fn stack_rows_rejects_ragged_input() {
        let err = MatrixHelper::stack_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            StageError::ShapeMismatch {
                expected: 2,
                found: 1
            }
        );
    }
}
