pub mod keyboard;
pub mod keys;
pub mod page;

pub use keyboard::wire_global_keydown;
