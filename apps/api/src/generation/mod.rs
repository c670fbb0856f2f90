// Panel generation: beat prose → moments → composed panels → packed pages.
// All orchestration calls go through the injected Orchestrator; nothing here
// talks HTTP directly.

pub mod assembler;
pub mod composition;
pub mod handlers;
pub mod lexicon;
pub mod moments;
pub mod pipeline;
pub mod selector;
