//! Staged move picker for the alpha-beta search.

mod picker;
mod scoring;
mod sorting;
mod types;

pub use picker::MovePicker;
pub use sorting::fast_partial_sort;
pub use types::PickStrategy;

#[cfg(test)]
mod tests;
