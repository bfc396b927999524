pub mod homogeneous;

pub use homogeneous::homogeneous;

/// The invocation as recorded in the output's history attribute.
pub fn command_line() -> String {
    std::env::args().collect::<Vec<_>>().join(" ")
}
