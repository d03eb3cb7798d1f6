/// Presentation switches resolved from config and environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiOptions {
    pub high_contrast: bool,
    /// Skip reveal animations and show plaintext immediately.
    pub reduced_motion: bool,
}
