use crate::models::CoverLetter;

/// Plain-text rendition of a cover letter: header block, body paragraphs,
/// sign-off, separated by blank lines. Empty parts are dropped.
pub fn compose_text(letter: &CoverLetter) -> String {
    let header = &letter.header;
    let header_block = [
        header.name.as_str(),
        header.location.as_str(),
        header.phone.as_str(),
        header.email.as_str(),
        header.date.as_str(),
        letter.greeting.as_str(),
    ]
    .into_iter()
    .filter(|line| !line.is_empty())
    .collect::<Vec<_>>()
    .join("\n");

    let body = std::iter::once(letter.opening_paragraph.as_str())
        .chain(letter.body_paragraphs.iter().map(String::as_str))
        .chain(std::iter::once(letter.closing_paragraph.as_str()))
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    [header_block.as_str(), "", body.as_str(), "", letter.sign_off.as_str()].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CoverLetterHeader;

    #[test]
    fn test_compose_full_letter() {
        let letter = CoverLetter {
            header: CoverLetterHeader {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                date: "Mon Oct 19 2026".to_string(),
                ..Default::default()
            },
            greeting: "Dear team,".to_string(),
            opening_paragraph: "  I am applying. ".to_string(),
            body_paragraphs: vec!["First.".to_string(), "   ".to_string(), "Second.".to_string()],
            closing_paragraph: "Thanks.".to_string(),
            sign_off: "Sincerely,\nAda".to_string(),
        };

        assert_eq!(
            compose_text(&letter),
            "Ada\nada@example.com\nMon Oct 19 2026\nDear team,\n\n\
             I am applying.\n\nFirst.\n\nSecond.\n\nThanks.\n\nSincerely,\nAda"
        );
    }

    #[test]
    fn test_empty_letter_keeps_separators() {
        assert_eq!(compose_text(&CoverLetter::default()), "\n\n\n\n");
    }
}
