use std::io;

use thiserror::Error;
use wombat_js::ScriptError;

/// Failure of a minifier pass.
///
/// Malformed markup is never an error: it is passed through. A pass fails
/// only when a script cannot be minified or the output cannot be written.
#[derive(Debug, Error)]
pub enum MinifyError {
    /// The script minifier rejected the text of a `<script>` element.
    #[error("failed to minify script")]
    Script(#[from] ScriptError),

    /// Writing the minified document failed.
    #[error("failed to write minified output")]
    Io(#[from] io::Error),
}
