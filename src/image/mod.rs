pub mod buffer;
pub mod f32;
pub mod io;
pub mod rgb;
pub mod traits;
pub mod u8;

pub use self::buffer::PixelBuffer;
pub use self::f32::ImageF32;
pub use self::rgb::ImageRgb8;
pub use self::traits::{ImageView, ImageViewMut};
pub use self::u8::{GrayImageU8, ImageU8};
