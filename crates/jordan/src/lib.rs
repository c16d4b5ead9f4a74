#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use jordan_tensor as tensor;

#[doc(inline)]
pub use jordan_linalg as linalg;
