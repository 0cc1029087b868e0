//! Style-only entry pruning.
//!
//! Entries backed purely by stylesheets still flow through the script side of
//! the pipeline as an empty bundle. Emitting that husk would litter the output
//! tree with zero-value files, so the pruner drops the script artifact (and
//! its map) before anything is written. Stylesheet artifacts are never pruned.

use crate::transform::script::strip_line;

/// Decide whether a script payload is an empty husk worth pruning.
///
/// The primary test is structural: an entry with no script or component
/// sources cannot have produced real script output. The content test is the
/// fallback for payloads that survive the chain but contain nothing beyond
/// boilerplate, comments, and separators.
pub fn is_trivial_script(has_script_sources: bool, bytes: &[u8]) -> bool {
    if !has_script_sources {
        return true;
    }
    let Ok(content) = std::str::from_utf8(bytes) else {
        return false;
    };

    let mut in_block = false;
    for line in content.lines() {
        let stripped = strip_line(line, &mut in_block);
        let meaningful = stripped
            .trim()
            .trim_start_matches("\"use strict\";")
            .trim_matches(|c: char| c.is_whitespace() || c == ';');
        if !meaningful.is_empty() {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_script_sources_is_trivial() {
        assert!(is_trivial_script(false, b"var a = 1;"));
    }

    #[test]
    fn test_empty_payload_is_trivial() {
        assert!(is_trivial_script(true, b""));
    }

    #[test]
    fn test_boilerplate_only_is_trivial() {
        assert!(is_trivial_script(true, b"\"use strict\";\n// banner\n;;\n"));
    }

    #[test]
    fn test_real_code_is_kept() {
        assert!(!is_trivial_script(true, b"var a = 1;"));
        assert!(!is_trivial_script(true, b"\"use strict\";\nconsole.log('x');"));
    }

    #[test]
    fn test_comment_only_payload_is_trivial() {
        assert!(is_trivial_script(true, b"/* header\n */\n// trailer"));
    }
}
