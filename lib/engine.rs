use anyhow::Result;

/// An execution strategy for Capuchin source text. Engines keep their
/// environment between calls, so feeding a session line by line works.
pub trait Engine {
    fn run(&mut self, input: &str) -> Result<String>;
}
