//! quizrace-io — Input and output collaborators.
//!
//! Implements `ResponseSource` and `PromptSink` for the terminal, plus
//! scripted versions for driving sessions in tests.

pub mod mock;
pub mod terminal;

pub use mock::{RecordingOutput, ScriptedInput, SilentInput};
pub use terminal::{ConsoleOutput, TerminalInput};
