//! Edge processing for the circular Hough search: Sobel gradients and a
//! Canny edge map built on direction-aligned non-maximum suppression.

pub mod canny;
pub mod grad;

pub use canny::{canny, EdgeMap};
pub use grad::{sobel_gradients, Grad};
