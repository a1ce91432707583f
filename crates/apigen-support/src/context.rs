/// Execution context handed to business methods by generated handlers.
///
/// Handlers always pass [`Context::background`]: no deadline, nothing to cancel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct Context;

impl Context {
  #[must_use]
  pub const fn background() -> Self {
    Self
  }
}
