use lazy_regex::regex_captures;

/// File name the driver compiles submissions under.
pub const SUBMISSION_FILENAME: &str = "<string>";

/// Drops every stack frame that does not belong to the submission, so the
/// learner sees a traceback that looks like it came from their own script.
///
/// A frame is a `  File "...", line N` header followed by its indented source
/// and caret lines. Everything else (the `Traceback` header, chained exception
/// separators, the final `Kind: message`) is kept. The result is trimmed.
pub fn filter_submission_frames(traceback: &str) -> String {
    let mut kept = Vec::new();
    let mut skipping_frame = false;

    for line in traceback.lines() {
        if let Some((_, file)) = regex_captures!(r#"^  File "([^"]*)", line \d+"#, line) {
            skipping_frame = file != SUBMISSION_FILENAME;
            if !skipping_frame {
                kept.push(line);
            }
            continue;
        }
        if skipping_frame && line.starts_with("    ") {
            continue;
        }
        skipping_frame = false;
        kept.push(line);
    }

    kept.join("\n").trim().to_owned()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn drops_driver_and_library_frames() {
        let tb = concat!(
            "Traceback (most recent call last):\n",
            "  File \"<driver>\", line 51, in main\n",
            "    exec(code, namespace)\n",
            "  File \"<string>\", line 3, in <module>\n",
            "    parse(\"x\")\n",
            "    ^^^^^^^^^^\n",
            "  File \"<string>\", line 2, in parse\n",
            "    return int(s)\n",
            "  File \"/usr/lib/python3.11/json/__init__.py\", line 346, in loads\n",
            "    return _default_decoder.decode(s)\n",
            "ValueError: invalid literal for int() with base 10: 'x'\n",
        );
        assert_eq!(
            filter_submission_frames(tb),
            concat!(
                "Traceback (most recent call last):\n",
                "  File \"<string>\", line 3, in <module>\n",
                "    parse(\"x\")\n",
                "    ^^^^^^^^^^\n",
                "  File \"<string>\", line 2, in parse\n",
                "    return int(s)\n",
                "ValueError: invalid literal for int() with base 10: 'x'",
            )
        );
    }

    #[test]
    fn keeps_syntax_error_location() {
        let tb = concat!(
            "Traceback (most recent call last):\n",
            "  File \"<driver>\", line 49, in main\n",
            "    code = compile(payload[\"code\"], SUBMISSION_FILENAME, \"exec\")\n",
            "  File \"<string>\", line 1\n",
            "    print(\n",
            "         ^\n",
            "SyntaxError: '(' was never closed\n",
        );
        let filtered = filter_submission_frames(tb);
        assert!(!filtered.contains("<driver>"));
        assert!(filtered.contains("  File \"<string>\", line 1"));
        assert!(filtered.ends_with("SyntaxError: '(' was never closed"));
    }

    #[test]
    fn keeps_chained_exception_sections() {
        let tb = concat!(
            "Traceback (most recent call last):\n",
            "  File \"<string>\", line 2, in <module>\n",
            "    {}['k']\n",
            "KeyError: 'k'\n",
            "\n",
            "During handling of the above exception, another exception occurred:\n",
            "\n",
            "Traceback (most recent call last):\n",
            "  File \"<driver>\", line 51, in main\n",
            "    exec(code, namespace)\n",
            "  File \"<string>\", line 4, in <module>\n",
            "    raise RuntimeError('boom')\n",
            "RuntimeError: boom\n",
        );
        let filtered = filter_submission_frames(tb);
        assert!(filtered.contains("During handling of the above exception"));
        assert!(filtered.contains("KeyError: 'k'"));
        assert!(!filtered.contains("exec(code, namespace)"));
        assert!(filtered.ends_with("RuntimeError: boom"));
    }
}
