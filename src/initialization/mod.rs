mod input;

pub use input::SaxpyInput;
