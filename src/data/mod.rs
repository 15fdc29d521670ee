mod cells;
pub use cells::{CellContent, CellMode, CellSequence};

mod data_sample;
pub use data_sample::DataSample;

mod sorted_array;
pub(crate) use sorted_array::SortedArray;
