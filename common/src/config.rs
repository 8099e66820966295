/// Presentation settings, filled in from the command line.
///
/// Nothing in here changes how the engine scans, only what gets printed.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Hides the banner printed on startup.
    pub no_banner: bool,
    /// 1 hides headers and progress, 2 prints nothing but open targets.
    pub quiet: u8,
    /// Prints every outcome instead of only the open ones.
    pub show_all: bool,
    /// Disables the `q` key listener.
    ///
    /// Ctrl-C still cancels the scan.
    pub disable_input: bool,
}
