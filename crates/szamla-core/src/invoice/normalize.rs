//! Cleanup of PDF-extracted invoice text.

/// UTF-8 sequences decoded as Windows-1252 by the extraction layer, for the
/// Hungarian alphabet. Hand-curated from observed exports; this is not a
/// general encoding detector.
const MOJIBAKE_FIXES: &[(&str, &str)] = &[
    ("Ã¡", "á"),
    ("Ã©", "é"),
    ("Ã\u{00ad}", "í"),
    ("Ã³", "ó"),
    ("Ã¶", "ö"),
    ("Å\u{2018}", "ő"),
    ("Ãº", "ú"),
    ("Ã¼", "ü"),
    ("Å±", "ű"),
    ("Ã\u{81}", "Á"),
    ("Ã\u{2030}", "É"),
    ("Ã\u{201c}", "Ó"),
    ("Ã\u{2013}", "Ö"),
    ("Ã\u{0161}", "Ú"),
    ("Ã\u{0153}", "Ü"),
    ("Å°", "Ű"),
];

/// Full-line corrections for known extraction artifacts, applied after
/// whitespace collapsing. Mostly spurious spaces inside the table sentinels.
const LINE_FIXES: &[(&str, &str)] = &[
    ("Nett ó ár", "Nettó ár"),
    ("Össz esen", "Összesen"),
    ("Ft/m 2", "Ft/m2"),
];

/// Normalize extracted text: fix mojibake, collapse whitespace runs inside
/// each line, apply the known-artifact dictionary. Line boundaries are
/// preserved; the function is total and idempotent.
pub fn normalize_text(raw: &str) -> String {
    raw.lines()
        .map(normalize_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn normalize_line(line: &str) -> String {
    let mut text = line.to_string();
    for (broken, fixed) in MOJIBAKE_FIXES {
        if text.contains(broken) {
            text = text.replace(broken, fixed);
        }
    }

    // NBSP counts as whitespace here; split_whitespace collapses the runs
    // and trims both ends.
    let text = text.replace('\u{00a0}', " ");
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    for (artifact, fixed) in LINE_FIXES {
        if collapsed == *artifact {
            return (*fixed).to_string();
        }
    }

    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fixes_lowercase_mojibake() {
        assert_eq!(normalize_text("fehÃ©r"), "fehér");
        assert_eq!(normalize_text("sÃ¶tÃ©tszÃ¼rke"), "sötétszürke");
        assert_eq!(normalize_text("zÃ¶ld"), "zöld");
    }

    #[test]
    fn collapses_whitespace_within_lines() {
        assert_eq!(
            normalize_text("  Panel\u{00a0} ajtó \t 800x400  "),
            "Panel ajtó 800x400"
        );
    }

    #[test]
    fn preserves_line_boundaries() {
        assert_eq!(normalize_text("a  b\nc\u{00a0}d"), "a b\nc d");
    }

    #[test]
    fn applies_known_line_artifacts() {
        assert_eq!(normalize_text("Nett ó ár"), "Nettó ár");
        assert_eq!(normalize_text("Ft/m  2"), "Ft/m2");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "fehÃ©r  panel\nNett ó ár\n1 234,56",
            "Å‘szi kollekciÃ³",
            "plain ascii",
            "",
        ];
        for sample in samples {
            let once = normalize_text(sample);
            assert_eq!(normalize_text(&once), once);
        }
    }
}
