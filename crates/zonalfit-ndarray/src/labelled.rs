//! N-dimensional arrays addressed by string labels.

use std::collections::HashMap;

use zonalfit_matrix::Scalar;

use crate::array::NdArray;
use crate::error::{NdArrayError, Result};

/// An [`NdArray`] whose positions along every axis are named by strings.
///
/// Labels are assigned positions in registration order. With
/// `add_labels_on_the_fly` enabled, [`set`](Self::set) registers unknown
/// labels instead of failing, up to the axis extent.
///
/// # Example
/// ```
/// use zonalfit_ndarray::LabelledArray;
///
/// let mut a = LabelledArray::<f64>::with_labels(vec![
///     vec!["work".into(), "school".into()],
///     vec!["auto".into(), "transit".into(), "walk".into()],
/// ])
/// .unwrap();
/// a.set(&["school", "walk"], 12.0).unwrap();
/// assert_eq!(a.get(&["school", "walk"]).unwrap(), 12.0);
/// assert!(a.get(&["shop", "walk"]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct LabelledArray<T: Scalar = f64> {
    array: NdArray<T>,
    labels: Vec<Vec<String>>,
    positions: Vec<HashMap<String, usize>>,
    add_labels_on_the_fly: bool,
}

impl<T: Scalar> LabelledArray<T> {
    /// Zero array of the given shape with no labels registered yet.
    pub fn new(shape: &[usize]) -> Result<Self> {
        let array = NdArray::zeros(shape)?;
        let rank = array.rank();
        Ok(Self {
            array,
            labels: vec![Vec::new(); rank],
            positions: vec![HashMap::new(); rank],
            add_labels_on_the_fly: false,
        })
    }

    /// Zero array shaped by the label lists, one list per axis.
    pub fn with_labels(labels: Vec<Vec<String>>) -> Result<Self> {
        let shape: Vec<usize> = labels.iter().map(Vec::len).collect();
        let mut out = Self::new(&shape)?;
        out.set_labels(labels)?;
        Ok(out)
    }

    /// Wrap an existing array and label its axes.
    pub fn from_array(array: NdArray<T>, labels: Vec<Vec<String>>) -> Result<Self> {
        let rank = array.rank();
        let mut out = Self {
            array,
            labels: vec![Vec::new(); rank],
            positions: vec![HashMap::new(); rank],
            add_labels_on_the_fly: false,
        };
        out.set_labels(labels)?;
        Ok(out)
    }

    /// Replace every axis's labels.
    pub fn set_labels(&mut self, labels: Vec<Vec<String>>) -> Result<()> {
        if labels.len() != self.array.rank() {
            return Err(NdArrayError::RankMismatch {
                expected: self.array.rank(),
                actual: labels.len(),
            });
        }
        for axis in 0..self.array.rank() {
            self.labels[axis].clear();
            self.positions[axis].clear();
        }
        for (axis, axis_labels) in labels.into_iter().enumerate() {
            for label in axis_labels {
                if self.positions[axis].contains_key(&label) {
                    return Err(NdArrayError::DuplicateLabel { axis, label });
                }
                self.push_label(axis, label)?;
            }
        }
        Ok(())
    }

    pub fn set_add_labels_on_the_fly(&mut self, enabled: bool) {
        self.add_labels_on_the_fly = enabled;
    }

    pub fn adds_labels_on_the_fly(&self) -> bool {
        self.add_labels_on_the_fly
    }

    fn push_label(&mut self, axis: usize, label: String) -> Result<usize> {
        let extent = self.array.shape()[axis];
        let position = self.labels[axis].len();
        if position >= extent {
            log::error!("too many labels for axis {axis} (extent {extent})");
            return Err(NdArrayError::TooManyLabels { axis, extent });
        }
        self.positions[axis].insert(label.clone(), position);
        self.labels[axis].push(label);
        Ok(position)
    }

    /// Register a label, returning its position (existing labels keep theirs).
    pub fn register_label(&mut self, axis: usize, label: &str) -> Result<usize> {
        self.array.layout().check_axis(axis)?;
        match self.positions[axis].get(label) {
            Some(&p) => Ok(p),
            None => self.push_label(axis, label.to_string()),
        }
    }

    /// Position of a label along an axis.
    pub fn position(&self, axis: usize, label: &str) -> Result<usize> {
        self.array.layout().check_axis(axis)?;
        self.positions[axis]
            .get(label)
            .copied()
            .ok_or_else(|| NdArrayError::UnknownLabel {
                axis,
                label: label.to_string(),
            })
    }

    /// Label at a position along an axis.
    pub fn label(&self, axis: usize, position: usize) -> Option<&str> {
        self.labels.get(axis)?.get(position).map(String::as_str)
    }

    pub fn labels(&self, axis: usize) -> &[String] {
        self.labels.get(axis).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Index of the axis with the given name.
    pub fn axis_index(&self, name: &str) -> Option<usize> {
        self.array.axis_names().iter().position(|n| n == name)
    }

    /// Integer location of a string location.
    pub fn location(&self, location: &[&str]) -> Result<Vec<usize>> {
        if location.len() != self.array.rank() {
            return Err(NdArrayError::RankMismatch {
                expected: self.array.rank(),
                actual: location.len(),
            });
        }
        location
            .iter()
            .enumerate()
            .map(|(axis, label)| self.position(axis, label))
            .collect()
    }

    pub fn get(&self, location: &[&str]) -> Result<T> {
        let loc = self.location(location)?;
        self.array.get(&loc)
    }

    /// Set a value, registering unknown labels when on-the-fly mode is on.
    pub fn set(&mut self, location: &[&str], value: T) -> Result<()> {
        if location.len() != self.array.rank() {
            return Err(NdArrayError::RankMismatch {
                expected: self.array.rank(),
                actual: location.len(),
            });
        }
        let mut loc = Vec::with_capacity(location.len());
        for (axis, label) in location.iter().enumerate() {
            let p = if self.add_labels_on_the_fly {
                self.register_label(axis, label)?
            } else {
                self.position(axis, label)?
            };
            loc.push(p);
        }
        self.array.set(&loc, value)
    }

    pub fn array(&self) -> &NdArray<T> {
        &self.array
    }

    pub fn array_mut(&mut self) -> &mut NdArray<T> {
        &mut self.array
    }

    pub fn into_array(self) -> NdArray<T> {
        self.array
    }
}
