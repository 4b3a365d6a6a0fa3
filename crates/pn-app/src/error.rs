use pn_core::ports::ClipboardError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("history runtime is not running")]
    RuntimeStopped,

    #[error("no clipboard is attached to this engine")]
    ClipboardUnavailable,

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
