pub mod describe;
pub mod evaluate;
pub mod util;
