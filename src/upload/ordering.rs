//! Natural, case-insensitive ordering of file names.
//!
//! Names are split into runs of ASCII digits and single characters. Digit
//! runs compare by numeric value, so `File 2` sorts before `File 10`. Other
//! characters compare by class first (whitespace, punctuation, Latin letters,
//! then every other script including CJK), then by their lower-cased,
//! accent-folded base letter. Accents only break ties left after that; case
//! never does.

use super::types::SelectedFile;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Digit,
    Latin,
    Other,
}

#[derive(Debug)]
enum Element<'a> {
    Number(&'a str),
    Char { base: char, accented: bool },
}

impl Element<'_> {
    fn class(&self) -> CharClass {
        match self {
            Element::Number(_) => CharClass::Digit,
            Element::Char { base, .. } => classify(*base),
        }
    }
}

fn classify(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if c.is_ascii_digit() {
        CharClass::Digit
    } else if c.is_ascii_alphabetic() {
        CharClass::Latin
    } else if c.is_alphanumeric() {
        CharClass::Other
    } else {
        CharClass::Punctuation
    }
}

/// Maps common Latin-1 and Latin Extended-A letters to their base letter.
fn fold_accent(c: char) -> char {
    match c {
        'à'..='å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è'..='ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ì'..='ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò'..='ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' | 'ŧ' => 't',
        'ù'..='ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

fn lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn elements(name: &str) -> Vec<Element<'_>> {
    let mut elements = Vec::new();
    let mut chars = name.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c.is_ascii_digit() {
            let mut end = start + c.len_utf8();
            while let Some(&(idx, next)) = chars.peek() {
                if !next.is_ascii_digit() {
                    break;
                }
                end = idx + next.len_utf8();
                chars.next();
            }
            elements.push(Element::Number(&name[start..end]));
        } else {
            let lowered = lower(c);
            let base = fold_accent(lowered);
            elements.push(Element::Char {
                base,
                accented: base != lowered,
            });
        }
    }

    elements
}

fn compare_numbers(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_primary(a: &Element<'_>, b: &Element<'_>) -> Ordering {
    a.class().cmp(&b.class()).then_with(|| match (a, b) {
        (Element::Number(x), Element::Number(y)) => compare_numbers(x, y),
        (Element::Char { base: x, .. }, Element::Char { base: y, .. }) => x.cmp(y),
        _ => Ordering::Equal,
    })
}

fn accent_of(element: &Element<'_>) -> bool {
    matches!(element, Element::Char { accented: true, .. })
}

/// Compares two file names. Names that differ only by case compare equal.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let left = elements(a);
    let right = elements(b);

    let primary = left
        .iter()
        .zip(right.iter())
        .map(|(x, y)| compare_primary(x, y))
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| left.len().cmp(&right.len()));
    if primary.is_ne() {
        return primary;
    }

    left.iter()
        .zip(right.iter())
        .map(|(x, y)| accent_of(x).cmp(&accent_of(y)))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Sorts in upload order. Raw string order breaks the ties left by
/// [`compare_names`] so the sequence does not depend on selection order.
pub fn sort_files(files: &mut [SelectedFile]) {
    files.sort_by(|a, b| compare_names(&a.name, &b.name).then_with(|| a.name.cmp(&b.name)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file(name: &str) -> SelectedFile {
        SelectedFile {
            name: name.to_string(),
            path: PathBuf::from(name),
            size: 0,
        }
    }

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut files: Vec<_> = names.iter().map(|n| file(n)).collect();
        sort_files(&mut files);
        files.into_iter().map(|f| f.name).collect()
    }

    #[test]
    fn numbers_sort_by_value() {
        assert_eq!(
            sorted(&["File 10.pdf", "File 2.pdf", "file 1.pdf"]),
            vec!["file 1.pdf", "File 2.pdf", "File 10.pdf"]
        );
    }

    #[test]
    fn case_only_difference_is_equal() {
        assert_eq!(compare_names("Report.pdf", "report.pdf"), Ordering::Equal);
        assert_eq!(compare_names("report.pdf", "Report.PDF"), Ordering::Equal);
    }

    #[test]
    fn accents_are_a_secondary_difference() {
        assert_eq!(compare_names("resume.pdf", "résumé.pdf"), Ordering::Less);
        assert_eq!(compare_names("résumé.pdf", "resumf.pdf"), Ordering::Less);
    }

    #[test]
    fn leading_zeros_do_not_change_value() {
        assert_eq!(compare_names("v007", "v7"), Ordering::Equal);
        assert_eq!(compare_names("v007", "v8"), Ordering::Less);
    }

    #[test]
    fn latin_sorts_before_cjk() {
        assert_eq!(
            sorted(&["文档.pdf", "zeta.pdf", "alpha.pdf"]),
            vec!["alpha.pdf", "zeta.pdf", "文档.pdf"]
        );
    }

    #[test]
    fn digits_sort_before_letters() {
        assert_eq!(sorted(&["b.txt", "2.txt", "a.txt"]), vec!["2.txt", "a.txt", "b.txt"]);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(compare_names("notes", "notes 2"), Ordering::Less);
    }
}
