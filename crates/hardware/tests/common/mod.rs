//! Shared test infrastructure.


pub use builder::instruction::InstructionBuilder;
pub use harness::TestContext;
