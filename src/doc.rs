//! Doc comment normalization.
//!
//! Turns the comment text attached to a declaration into the prose shown in
//! the generated reference: internal notes after a `---` line are cut,
//! `TODO` reminders and `+marker` directives are dropped, wrapped lines are
//! joined, paragraphs are kept and indented lines stay on their own lines.

/// Normalize raw comment text. Applying it twice gives the same result.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());

    for line in raw.lines() {
        let line = line.trim_end();
        let leading = line.trim_start();

        if leading == "---" {
            break;
        }

        if line.is_empty() {
            // Paragraph break; skip when nothing precedes it or one is open
            if out.is_empty() || out.ends_with("\n\n") {
                continue;
            }
            drop_separator(&mut out);
            out.push_str("\n\n");
        } else if leading.starts_with("TODO") || leading.starts_with('+') {
            continue;
        } else if leading.len() != line.len() {
            // Indented: keep as its own preformatted line
            drop_separator(&mut out);
            out.push('\n');
            out.push_str(line);
            out.push('\n');
        } else {
            out.push_str(line);
            out.push(' ');
        }
    }

    out.trim_start_matches('\n')
        .trim_end_matches([' ', '\n'])
        .to_string()
}

/// Remove the joining space or newline left by the previous line.
fn drop_separator(out: &mut String) {
    if out.ends_with(' ') || out.ends_with('\n') {
        out.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_wrapped_lines() {
        assert_eq!(
            normalize("Name of the cluster\nused as a prefix.\n"),
            "Name of the cluster used as a prefix."
        );
    }

    #[test]
    fn keeps_paragraphs() {
        assert_eq!(normalize("First.\n\nSecond.\n"), "First.\n\nSecond.");
    }

    #[test]
    fn collapses_blank_runs() {
        assert_eq!(normalize("\n\nFirst.\n\n\n\nSecond.\n\n"), "First.\n\nSecond.");
    }

    #[test]
    fn truncates_at_rule() {
        assert_eq!(normalize("Para one.\n---\nhidden"), "Para one.");
        assert_eq!(normalize("Para one.\n  ---  \nhidden\n"), "Para one.");
    }

    #[test]
    fn inline_dashes_are_text() {
        assert_eq!(normalize("a --- b"), "a --- b");
    }

    #[test]
    fn drops_todo_and_markers() {
        let raw = "Size of the cluster.\nTODO: validate upper bound\n+kubebuilder:validation:Minimum=1\n+optional\n";
        assert_eq!(normalize(raw), "Size of the cluster.");
    }

    #[test]
    fn indented_todo_is_dropped() {
        assert_eq!(normalize("Text\n\tTODO later\nmore"), "Text more");
    }

    #[test]
    fn indented_lines_are_preformatted() {
        let raw = "Example:\n\t{\"a\": 1}\n\t{\"b\": 2}\nafter\n";
        assert_eq!(normalize(raw), "Example:\n\t{\"a\": 1}\n\t{\"b\": 2}\nafter");
    }

    #[test]
    fn leading_indented_block() {
        assert_eq!(normalize("\tcode\nText"), "\tcode\nText");
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("+optional\n"), "");
        assert_eq!(normalize("---\nall hidden"), "");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "",
            "One line",
            "Para one.\n---\nhidden",
            "First.\n\n\nSecond.\n",
            "Example:\n\tfoo\n\n\tbar\nbaz\nqux\n",
            "\tcode first\n\nthen prose\n",
            "  spaced\n  block\n\n",
            "trailing   \nspaces\t\n",
            "TODO only\n+marker\n\n\n",
            "a\r\nb\r\n",
        ];
        for raw in samples {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "input: {raw:?}");
        }
    }
}
