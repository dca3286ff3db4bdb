#[macro_use]
mod logging;

mod buf;
mod error;
mod traits;
mod vec;

pub use buf::RawBuf;
pub use error::Error;
pub use traits::ContigIterator;
pub use vec::Vector;

#[cfg(test)]
pub mod dropflag;
