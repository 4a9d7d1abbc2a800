pub mod access;
pub mod animals;
pub mod console;
pub mod stats;
