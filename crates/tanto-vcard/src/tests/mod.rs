//! Cross-module tests: round trips through every format and end-to-end
//! reading and writing scenarios.

mod round_trip;
