pub mod assets;
pub mod output;
pub mod pipeline;
pub mod prompt;
