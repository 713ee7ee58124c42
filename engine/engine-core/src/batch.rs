//! Batch containers exchanged across the simulator contract
//!
//! A batch stores `len` rows of a fixed `width` contiguously in row-major
//! order. States, legality masks, and (through [`Batch::to_f32`]) network
//! inputs all use this layout.

use std::ops::Index;
use std::slice::ChunksExact;

use serde::{Deserialize, Serialize};

use crate::board_game::Cell;
use crate::error::SimulatorError;

/// Fixed-width rows stored contiguously
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch<T> {
    width: usize,
    data: Vec<T>,
}

/// Batch of game states: board cells followed by the current-player marker
pub type StateBatch = Batch<Cell>;

/// Batch of legality masks, one entry per action
pub type MaskBatch = Batch<bool>;

impl<T> Batch<T> {
    /// Wrap flat row-major data.
    ///
    /// Fails when `width` is zero or `data` does not divide into whole rows.
    pub fn new(width: usize, data: Vec<T>) -> Result<Self, SimulatorError> {
        if width == 0 || data.len() % width != 0 {
            return Err(SimulatorError::BatchShape {
                len: data.len(),
                width,
            });
        }
        Ok(Self { width, data })
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.data.len() / self.width
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Values per row
    pub fn width(&self) -> usize {
        self.width
    }

    /// Row `index`, or `None` when out of range
    pub fn get(&self, index: usize) -> Option<&[T]> {
        let start = index.checked_mul(self.width)?;
        self.data.get(start..start + self.width)
    }

    /// Iterate over rows in order
    pub fn rows(&self) -> ChunksExact<'_, T> {
        self.data.chunks_exact(self.width)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Clone> Batch<T> {
    /// `len` rows with every value set to `value`. `width` must be non-zero.
    pub fn filled(len: usize, width: usize, value: T) -> Self {
        debug_assert!(width > 0, "batch width must be non-zero");
        Self {
            width,
            data: vec![value; len * width],
        }
    }

    /// Build a batch from individual rows, each of which must be `width` long.
    pub fn from_rows<I, R>(width: usize, rows: I) -> Result<Self, SimulatorError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[T]>,
    {
        if width == 0 {
            return Err(SimulatorError::BatchShape { len: 0, width });
        }
        let mut data = Vec::new();
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return Err(SimulatorError::StateWidth {
                    expected: width,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { width, data })
    }
}

impl<T: Copy + Into<f32>> Batch<T> {
    /// Flat `f32` copy of the batch, suitable as neural network input.
    pub fn to_f32(&self) -> Vec<f32> {
        self.data.iter().map(|&value| value.into()).collect()
    }
}

impl<T> Index<usize> for Batch<T> {
    type Output = [T];

    fn index(&self, index: usize) -> &[T] {
        &self.data[index * self.width..(index + 1) * self.width]
    }
}

/// Auxiliary per-instance record returned by `step_bulk`.
///
/// Currently empty; reserved for per-instance diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {}

/// Output of `reset_bulk`
#[derive(Debug, Clone, PartialEq)]
pub struct ResetOutput {
    pub states: StateBatch,
    pub masks: MaskBatch,
}

/// Output of `step_bulk`, one entry per input state
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutput {
    pub states: StateBatch,
    pub masks: MaskBatch,
    /// Reward for the player who just moved: +1 win, -1 loss, 0 otherwise
    pub rewards: Vec<f32>,
    pub terminals: Vec<bool>,
    pub infos: Vec<StepInfo>,
}

impl StepOutput {
    /// Number of states in the step
    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    /// Whether every instance of the batch has finished
    pub fn all_terminal(&self) -> bool {
        self.terminals.iter().all(|&done| done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_ragged_data() {
        let err = Batch::new(3, vec![0i8; 7]).unwrap_err();
        assert_eq!(err, SimulatorError::BatchShape { len: 7, width: 3 });

        let err = Batch::<i8>::new(0, vec![]).unwrap_err();
        assert_eq!(err, SimulatorError::BatchShape { len: 0, width: 0 });
    }

    #[test]
    fn test_rows_and_indexing() {
        let batch = Batch::new(2, vec![1i8, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.width(), 2);
        assert_eq!(&batch[1], &[3, 4]);
        assert_eq!(batch.get(2), Some(&[5i8, 6][..]));
        assert_eq!(batch.get(3), None);

        let rows: Vec<&[i8]> = batch.rows().collect();
        assert_eq!(rows, vec![&[1, 2][..], &[3, 4][..], &[5, 6][..]]);
    }

    #[test]
    fn test_from_rows_checks_width() {
        let batch = Batch::from_rows(3, [[1i8, 0, -1], [0, 0, 1]]).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.as_slice(), &[1, 0, -1, 0, 0, 1]);

        let err = Batch::from_rows(3, [vec![1i8, 0], vec![0, 0, 1]]).unwrap_err();
        assert_eq!(
            err,
            SimulatorError::StateWidth {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_filled_and_empty() {
        let masks = Batch::filled(4, 7, true);
        assert_eq!(masks.len(), 4);
        assert!(masks.as_slice().iter().all(|&legal| legal));

        let empty = Batch::filled(0, 9, false);
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
    }

    #[test]
    fn test_to_f32() {
        let states = Batch::new(3, vec![1i8, -1, 0]).unwrap();
        assert_eq!(states.to_f32(), vec![1.0, -1.0, 0.0]);

        let masks = Batch::new(2, vec![true, false]).unwrap();
        assert_eq!(masks.to_f32(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_step_info_is_empty_record() {
        let json = serde_json::to_string(&StepInfo::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
