mod age_bracket;
mod distribution;

pub use age_bracket::AgeBracket;
pub use distribution::{Distribution, Distributions};
