//! Runtime configuration.

/// Default limit on nested block execution.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Hard ceiling on nested block execution, sized for a default main-thread
/// stack. A larger `max_depth` is clamped to this value.
pub const MAX_DEPTH_LIMIT: usize = 512;

/// Interpreter configuration options.
#[derive(Clone, Copy, Debug)]
pub struct VmConfig {
    /// Maximum number of reentrant block executions alive at once. Each
    /// try, catch and finally span runs one level deeper than its construct.
    pub max_depth: usize,
    /// Collect `print` output in `Vm::output` instead of writing to stdout.
    pub capture_output: bool,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            capture_output: true,
        }
    }
}
