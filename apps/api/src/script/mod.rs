// Script formatting: authored pages + cover → formatted script, validation
// report and text/JSON exports. Pure; no orchestration calls.

pub mod export;
pub mod formatter;
pub mod handlers;
pub mod validator;
